//! Plain append-only file sink

use nia_core_types::Severity;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::{lock, open_append, Sink};
use crate::error::Result;
use crate::event::LogEvent;
use crate::format::Template;

/// Appends one rendered line per event to a file
#[derive(Debug)]
pub struct FileSink {
    name: String,
    path: PathBuf,
    threshold: Severity,
    template: Template,
    file: Mutex<File>,
}

impl FileSink {
    /// Open (or create) `path` in append mode
    ///
    /// # Errors
    ///
    /// Returns `CreateDir` or `OpenSink` if the destination cannot be prepared.
    pub fn open(path: impl Into<PathBuf>, threshold: Severity, template: Template) -> Result<Self> {
        let path = path.into();
        let file = open_append(&path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self {
            name,
            path,
            threshold,
            template,
            file: Mutex::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn template(&self) -> Template {
        self.template
    }
}

impl Sink for FileSink {
    fn name(&self) -> &str {
        &self.name
    }

    fn threshold(&self) -> Severity {
        self.threshold
    }

    fn write(&self, event: &LogEvent) -> std::io::Result<()> {
        let mut line = self.template.render(event);
        line.push('\n');
        let mut file = lock(&self.file);
        file.write_all(line.as_bytes())?;
        file.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Origin;
    use tempfile::TempDir;

    #[test]
    fn test_appends_lines_and_creates_parent() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("audit.log");
        let sink = FileSink::open(&path, Severity::Info, Template::Audit).unwrap();

        for message in ["first", "second"] {
            let event = LogEvent::new(Severity::Info, "nia_core", message, Origin::UNKNOWN);
            sink.write(&event).unwrap();
        }

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("AUDIT - INFO - first"));
        assert!(lines[1].ends_with("AUDIT - INFO - second"));
        assert_eq!(sink.name(), "audit.log");
    }

    #[test]
    fn test_reopen_appends_instead_of_truncating() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("errors.log");
        let event = LogEvent::new(Severity::Error, "nia_core", "boom", Origin::UNKNOWN);

        FileSink::open(&path, Severity::Error, Template::Full)
            .unwrap()
            .write(&event)
            .unwrap();
        FileSink::open(&path, Severity::Error, Template::Full)
            .unwrap()
            .write(&event)
            .unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 2);
    }

    #[test]
    fn test_accepts_respects_threshold() {
        let temp_dir = TempDir::new().unwrap();
        let sink = FileSink::open(
            temp_dir.path().join("e.log"),
            Severity::Error,
            Template::Full,
        )
        .unwrap();

        assert!(!sink.accepts(Severity::Warning));
        assert!(sink.accepts(Severity::Error));
        assert!(sink.accepts(Severity::Critical));
    }
}
