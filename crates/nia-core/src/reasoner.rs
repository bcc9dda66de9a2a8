//! Reasoning backends
//!
//! [`Reasoner`] is the seam where a real model plugs in. The only backend
//! shipped here is [`TemplateReasoner`], which echoes the prompt.

use crate::errors::{BrainError, Result};

/// Message carried by the simulated reasoning fault
pub const SIMULATED_FAULT_MESSAGE: &str = "Simulated reasoning error";

/// Turns a validated prompt into a response
pub trait Reasoner: Send + Sync {
    /// # Errors
    ///
    /// Returns [`BrainError::Processing`] when the prompt cannot be reasoned about.
    fn reason(&self, prompt: &str) -> Result<String>;
}

/// Fixed-template reasoner with an optional fault trigger
#[derive(Debug, Clone, Default)]
pub struct TemplateReasoner {
    fault_trigger: Option<String>,
}

impl TemplateReasoner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail every prompt containing `trigger` (case-insensitive)
    ///
    /// An empty trigger disables the fault.
    pub fn with_fault_trigger(trigger: Option<&str>) -> Self {
        let fault_trigger = trigger.filter(|t| !t.is_empty()).map(str::to_lowercase);
        Self { fault_trigger }
    }

    pub fn fault_trigger(&self) -> Option<&str> {
        self.fault_trigger.as_deref()
    }
}

impl Reasoner for TemplateReasoner {
    fn reason(&self, prompt: &str) -> Result<String> {
        if let Some(trigger) = &self.fault_trigger {
            if prompt.to_lowercase().contains(trigger.as_str()) {
                return Err(BrainError::Processing {
                    message: SIMULATED_FAULT_MESSAGE.to_string(),
                });
            }
        }
        Ok(format!("Reasoning response to: {}", prompt))
    }
}
