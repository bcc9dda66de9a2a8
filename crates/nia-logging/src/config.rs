//! Logging configuration
//!
//! Every field has a default matching the standard sink policy, so an empty
//! TOML document is a valid configuration.

use nia_core_types::schema::{
    AUDIT_LOG_FILE, DEFAULT_LOGGER_NAME, DEFAULT_LOG_DIR, ENV_LOGGER_NAME, ENV_LOG_DIR,
    ERROR_LOG_FILE, INFO_BACKUP_COUNT, INFO_LOG_FILE, INFO_MAX_BYTES,
};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::{LoggingError, Result};
use crate::sink::RotationPolicy;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Directory holding all log files; created on first router acquisition
    pub log_dir: PathBuf,
    /// Router name returned by `RouterRegistry::default_router`
    pub default_logger: String,
    pub info_max_bytes: u64,
    pub info_backup_count: usize,
    /// Attach the stderr sink
    pub console: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
            default_logger: DEFAULT_LOGGER_NAME.to_string(),
            info_max_bytes: INFO_MAX_BYTES,
            info_backup_count: INFO_BACKUP_COUNT,
            console: true,
        }
    }
}

impl LoggingConfig {
    /// Parse a TOML document
    ///
    /// # Errors
    ///
    /// Returns `Config` if the document is not valid TOML or has unknown keys.
    pub fn from_toml_str(input: &str) -> Result<Self> {
        toml::from_str(input).map_err(|e| LoggingError::Config(e.to_string()))
    }

    /// Read and parse a TOML file
    ///
    /// # Errors
    ///
    /// Returns `Config` if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let input = std::fs::read_to_string(path)
            .map_err(|e| LoggingError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&input)
    }

    /// Apply `NIA_LOG_DIR` / `NIA_LOGGER_NAME` from the process environment
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary lookup; empty values are ignored
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup(ENV_LOG_DIR).filter(|v| !v.is_empty()) {
            self.log_dir = PathBuf::from(dir);
        }
        if let Some(name) = lookup(ENV_LOGGER_NAME).filter(|v| !v.is_empty()) {
            self.default_logger = name;
        }
        self
    }

    pub fn with_log_dir(mut self, log_dir: impl Into<PathBuf>) -> Self {
        self.log_dir = log_dir.into();
        self
    }

    pub fn with_console(mut self, console: bool) -> Self {
        self.console = console;
        self
    }

    pub fn error_log_path(&self) -> PathBuf {
        self.log_dir.join(ERROR_LOG_FILE)
    }

    pub fn info_log_path(&self) -> PathBuf {
        self.log_dir.join(INFO_LOG_FILE)
    }

    pub fn audit_log_path(&self) -> PathBuf {
        self.log_dir.join(AUDIT_LOG_FILE)
    }

    pub fn rotation_policy(&self) -> RotationPolicy {
        RotationPolicy {
            max_bytes: self.info_max_bytes,
            backup_count: self.info_backup_count,
        }
    }
}
