//! Log destinations
//!
//! Every sink owns its threshold, template and destination, and serializes its
//! own write path. Sinks share no state with each other.

pub mod capture;
pub mod console;
pub mod file;
pub mod rotating;

pub use capture::{CaptureSink, CapturedEvent};
pub use console::ConsoleSink;
pub use file::FileSink;
pub use rotating::{RotatingFileSink, RotationPolicy};

use nia_core_types::Severity;
use std::fs::{self, File, OpenOptions};
use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::error::{LoggingError, Result};
use crate::event::LogEvent;

/// A single logging destination
pub trait Sink: Send + Sync {
    /// Short name used in diagnostics
    fn name(&self) -> &str;

    /// Minimum severity this sink accepts
    fn threshold(&self) -> Severity;

    /// Whether an event of `severity` reaches this sink
    fn accepts(&self, severity: Severity) -> bool {
        severity >= self.threshold()
    }

    /// Render and write one event
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error. The router absorbs it.
    fn write(&self, event: &LogEvent) -> std::io::Result<()>;
}

/// Open `path` for appending, creating it and its parent directory if needed
pub(crate) fn open_append(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| LoggingError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| LoggingError::OpenSink {
            path: path.to_path_buf(),
            source,
        })
}

/// Lock a sink mutex, recovering the guard if a writer panicked
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
