//! Size-bounded file sink with a numbered backup chain
//!
//! When the next line would push the active file past `max_bytes`, the chain
//! `name.{n-1} -> name.{n}`, ..., `name -> name.1` is shifted and a fresh
//! file is opened. Anything beyond `backup_count` falls off the end.

use nia_core_types::schema::{INFO_BACKUP_COUNT, INFO_MAX_BYTES};
use nia_core_types::Severity;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::{lock, open_append, Sink};
use crate::error::{LoggingError, Result};
use crate::event::LogEvent;
use crate::format::Template;

/// Size bound and history length for a rotating sink
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationPolicy {
    /// Rotate before a write would exceed this size; 0 disables rotation
    pub max_bytes: u64,
    /// Number of numbered backups kept; 0 truncates in place
    pub backup_count: usize,
}

impl Default for RotationPolicy {
    fn default() -> Self {
        Self {
            max_bytes: INFO_MAX_BYTES,
            backup_count: INFO_BACKUP_COUNT,
        }
    }
}

#[derive(Debug)]
struct ActiveFile {
    file: File,
    size: u64,
}

/// File sink that rotates on size
#[derive(Debug)]
pub struct RotatingFileSink {
    name: String,
    path: PathBuf,
    threshold: Severity,
    template: Template,
    policy: RotationPolicy,
    active: Mutex<ActiveFile>,
}

impl RotatingFileSink {
    /// Open (or create) the active file in append mode
    ///
    /// # Errors
    ///
    /// Returns `CreateDir` or `OpenSink` if the destination cannot be prepared.
    pub fn open(
        path: impl Into<PathBuf>,
        threshold: Severity,
        template: Template,
        policy: RotationPolicy,
    ) -> Result<Self> {
        let path = path.into();
        let file = open_append(&path)?;
        let size = file
            .metadata()
            .map_err(|source| LoggingError::OpenSink {
                path: path.clone(),
                source,
            })?
            .len();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Ok(Self {
            name,
            path,
            threshold,
            template,
            policy,
            active: Mutex::new(ActiveFile { file, size }),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn policy(&self) -> RotationPolicy {
        self.policy
    }

    /// Path of the `index`-th backup (`name.1` is the newest)
    pub fn backup_path(&self, index: usize) -> PathBuf {
        let mut os = self.path.as_os_str().to_owned();
        os.push(format!(".{}", index));
        PathBuf::from(os)
    }

    fn should_rotate(&self, active: &ActiveFile, incoming: u64) -> bool {
        self.policy.max_bytes > 0
            && active.size > 0
            && active.size + incoming > self.policy.max_bytes
    }

    /// Shift the backup chain and reopen an empty active file
    ///
    /// Called with the sink lock held, so no writer sees a half-rotated state.
    fn rotate(&self, active: &mut ActiveFile) -> std::io::Result<()> {
        if self.policy.backup_count == 0 {
            active.file.set_len(0)?;
            active.size = 0;
            return Ok(());
        }

        for index in (1..self.policy.backup_count).rev() {
            let src = self.backup_path(index);
            if src.exists() {
                let dst = self.backup_path(index + 1);
                if dst.exists() {
                    fs::remove_file(&dst)?;
                }
                fs::rename(&src, &dst)?;
            }
        }

        let first = self.backup_path(1);
        if first.exists() {
            fs::remove_file(&first)?;
        }
        if self.path.exists() {
            fs::rename(&self.path, &first)?;
        }

        active.file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        active.size = 0;
        Ok(())
    }
}

impl Sink for RotatingFileSink {
    fn name(&self) -> &str {
        &self.name
    }

    fn threshold(&self) -> Severity {
        self.threshold
    }

    fn write(&self, event: &LogEvent) -> std::io::Result<()> {
        let mut line = self.template.render(event);
        line.push('\n');
        let bytes = line.as_bytes();

        let mut active = lock(&self.active);
        if self.should_rotate(&active, bytes.len() as u64) {
            self.rotate(&mut active)?;
        }
        active.file.write_all(bytes)?;
        active.file.flush()?;
        active.size += bytes.len() as u64;
        Ok(())
    }
}
