//! Nia brain core
//!
//! A stub "brain" that answers prompts with a template reasoner, keeps a
//! key/value memory and a conversation history, and reports every operation
//! through a [`nia_logging::LogRouter`].
//!
//! # Example
//!
//! ```no_run
//! use nia_core::{BrainConfig, BrainCore};
//! use nia_logging::{LoggingConfig, RouterRegistry};
//!
//! let registry = RouterRegistry::new(LoggingConfig::default().with_env_overrides());
//! let mut brain = BrainCore::from_registry(BrainConfig::default(), &registry)?;
//!
//! let answer = brain.think("What is machine learning?", None)?;
//! assert!(answer.is_some());
//! # Ok::<(), nia_core::BrainError>(())
//! ```

pub mod brain;
pub mod config;
pub mod errors;
pub mod memory;
pub mod reasoner;

pub use brain::BrainCore;
pub use config::BrainConfig;
pub use errors::{BrainError, Result};
pub use memory::{ConversationEntry, MemoryStore};
pub use reasoner::{Reasoner, TemplateReasoner};
