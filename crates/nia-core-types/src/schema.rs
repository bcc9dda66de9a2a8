//! Canonical schema constants for structured logging
//!
//! These constants keep event wording, file names and rotation defaults
//! consistent between the router, the sinks and the tests that read them back.

// Scope lifecycle prefixes
pub const EVENT_START: &str = "START";
pub const EVENT_COMPLETE: &str = "COMPLETE";
pub const EVENT_FAILED: &str = "FAILED";

// Log destinations, relative to the configured log directory
pub const ERROR_LOG_FILE: &str = "nia_errors.log";
pub const INFO_LOG_FILE: &str = "nia_info.log";
pub const AUDIT_LOG_FILE: &str = "nia_audit.log";

pub const DEFAULT_LOG_DIR: &str = "logs";
pub const DEFAULT_LOGGER_NAME: &str = "nia_core";

/// Info log rotates once it would grow past this many bytes (10 MiB)
pub const INFO_MAX_BYTES: u64 = 10 * 1024 * 1024;
pub const INFO_BACKUP_COUNT: usize = 5;

/// Date format shared by every file template
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Tag rendered in place of the source name by the audit template
pub const AUDIT_TAG: &str = "AUDIT";

// Environment overrides
pub const ENV_LOG_DIR: &str = "NIA_LOG_DIR";
pub const ENV_LOGGER_NAME: &str = "NIA_LOGGER_NAME";
