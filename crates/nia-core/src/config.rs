//! Brain configuration
//!
//! Deserialized from a JSON object. Unknown keys are kept in `extra` so
//! callers can pass free-form options through to future components.

use nia_errors::{ExError, ExErrorKind};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Default operating mode
pub const DEFAULT_MODE: &str = "development";

/// Default substring that makes the template reasoner fail
pub const DEFAULT_FAULT_TRIGGER: &str = "error";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrainConfig {
    pub mode: String,

    /// Router name to acquire from a registry; `None` uses the registry default
    pub logger_name: Option<String>,

    /// Prompts containing this substring fail in the template reasoner
    pub simulate_fault_on: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for BrainConfig {
    fn default() -> Self {
        Self {
            mode: DEFAULT_MODE.to_string(),
            logger_name: None,
            simulate_fault_on: Some(DEFAULT_FAULT_TRIGGER.to_string()),
            extra: Map::new(),
        }
    }
}

impl BrainConfig {
    /// Build a config from a JSON value; missing fields take their defaults
    ///
    /// # Errors
    ///
    /// Returns `ERR_CONFIG` if `value` is not an object or a field has the
    /// wrong type.
    pub fn from_value(value: Value) -> nia_errors::Result<Self> {
        if !value.is_object() {
            return Err(ExError::new(ExErrorKind::Config)
                .with_op("load_brain_config")
                .with_message("brain config must be a JSON object"));
        }
        serde_json::from_value(value).map_err(|e| {
            ExError::new(ExErrorKind::Config)
                .with_op("load_brain_config")
                .with_message(e.to_string())
        })
    }

    /// Disable the simulated reasoning fault
    pub fn without_fault(mut self) -> Self {
        self.simulate_fault_on = None;
        self
    }

    pub fn with_logger_name(mut self, name: impl Into<String>) -> Self {
        self.logger_name = Some(name.into());
        self
    }
}
