//! Setup-time errors for the logging facility
//!
//! Only configuration and sink construction can fail. Once a router is built,
//! delivery faults are absorbed by the router and never surface here.

use nia_errors::{io_error, ExError, ExErrorKind};
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using LoggingError
pub type Result<T> = std::result::Result<T, LoggingError>;

#[derive(Error, Debug)]
pub enum LoggingError {
    /// Log directory could not be created
    #[error("Failed to create log directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A file sink could not open its destination
    #[error("Failed to open log sink {}: {source}", path.display())]
    OpenSink {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Logging configuration could not be read or parsed
    #[error("Invalid logging configuration: {0}")]
    Config(String),
}

impl From<LoggingError> for ExError {
    fn from(err: LoggingError) -> Self {
        match &err {
            LoggingError::CreateDir { path, source } => io_error("create_log_dir", path, source),
            LoggingError::OpenSink { path, source } => io_error("open_sink", path, source),
            LoggingError::Config(_) => ExError::new(ExErrorKind::Config)
                .with_op("load_logging_config")
                .with_message(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_dir_maps_to_io() {
        let err = LoggingError::CreateDir {
            path: PathBuf::from("/nope"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let ex: ExError = err.into();
        assert_eq!(ex.kind(), ExErrorKind::Io);
        assert_eq!(ex.op(), Some("create_log_dir"));
        assert_eq!(ex.message(), "/nope: denied");
    }

    #[test]
    fn test_open_sink_maps_to_io_with_path() {
        let err = LoggingError::OpenSink {
            path: PathBuf::from("logs/nia_audit.log"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        let ex: ExError = err.into();
        assert_eq!(ex.code(), "ERR_IO");
        assert_eq!(ex.op(), Some("open_sink"));
        assert_eq!(ex.message(), "logs/nia_audit.log: missing");
    }

    #[test]
    fn test_config_maps_to_config_kind() {
        let ex: ExError = LoggingError::Config("bad toml".to_string()).into();
        assert_eq!(ex.code(), "ERR_CONFIG");
    }
}
