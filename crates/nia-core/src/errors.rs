use nia_errors::{ExError, ExErrorKind};
use nia_logging::{Failure, LoggingError};
use std::borrow::Cow;
use thiserror::Error;

/// Result type alias using BrainError
pub type Result<T> = std::result::Result<T, BrainError>;

/// Error taxonomy for brain operations
#[derive(Error, Debug)]
pub enum BrainError {
    /// Prompt was empty or otherwise unusable
    #[error("Prompt must be a non-empty string")]
    InvalidInput,

    /// Memory key was empty
    #[error("Memory key cannot be empty")]
    EmptyKey,

    /// Reasoning failed while processing a valid prompt
    #[error("{message}")]
    Processing { message: String },

    /// Router for the brain could not be set up
    #[error(transparent)]
    Logging(#[from] LoggingError),
}

impl BrainError {
    /// Canonical kind for this error
    pub fn kind(&self) -> ExErrorKind {
        match self {
            BrainError::InvalidInput | BrainError::EmptyKey => ExErrorKind::InvalidInput,
            BrainError::Processing { .. } => ExErrorKind::Processing,
            BrainError::Logging(LoggingError::Config(_)) => ExErrorKind::Config,
            BrainError::Logging(_) => ExErrorKind::Io,
        }
    }
}

impl Failure for BrainError {
    fn kind_name(&self) -> Cow<'static, str> {
        match self {
            BrainError::InvalidInput => Cow::Borrowed("InvalidInput"),
            BrainError::EmptyKey => Cow::Borrowed("EmptyKey"),
            BrainError::Processing { .. } => Cow::Borrowed("ProcessingError"),
            BrainError::Logging(inner) => inner.kind_name(),
        }
    }
}

impl From<BrainError> for ExError {
    fn from(err: BrainError) -> Self {
        match err {
            BrainError::Logging(inner) => inner.into(),
            BrainError::EmptyKey => ExError::new(ExErrorKind::InvalidInput)
                .with_op("store_memory")
                .with_message(err.to_string()),
            BrainError::InvalidInput => ExError::new(ExErrorKind::InvalidInput)
                .with_op("think")
                .with_message(err.to_string()),
            BrainError::Processing { .. } => ExError::new(ExErrorKind::Processing)
                .with_op("process_reasoning")
                .with_message(err.to_string()),
        }
    }
}
