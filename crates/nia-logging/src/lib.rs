//! Structured multi-sink logging facility for Nia
//!
//! This crate provides:
//! - A [`LogRouter`] that fans each event out to severity-filtered sinks
//! - An application-owned [`RouterRegistry`] with idempotent acquisition
//! - The standard sink set (error file, rotating info file, audit file, console)
//! - [`TimedOperationScope`] for START / COMPLETE / FAILED telemetry
//! - A `tracing` bridge ([`layer::RouterLayer`]) and a [`CaptureSink`] for tests
//!
//! # Usage
//!
//! ```no_run
//! use nia_logging::{LoggingConfig, RouterRegistry, TimedOperationScope};
//!
//! let registry = RouterRegistry::new(LoggingConfig::default().with_env_overrides());
//! let router = registry.default_router()?;
//!
//! router.info("Nia Brain Core initialized successfully");
//! let guard = TimedOperationScope::new("Brain.think()", router.clone()).enter();
//! guard.complete();
//! # Ok::<(), nia_logging::LoggingError>(())
//! ```

pub mod config;
pub mod error;
pub mod event;
pub mod format;
pub mod layer;
pub mod macros;
pub mod registry;
pub mod router;
pub mod scope;
pub mod sink;

pub use config::LoggingConfig;
pub use error::{LoggingError, Result};
pub use event::{Failure, FailureDetail, LogEvent, Origin};
pub use format::Template;
pub use layer::init;
pub use nia_core_types::Severity;
pub use registry::{standard_router, RouterRegistry, StandardSinks};
pub use router::LogRouter;
pub use scope::{ScopeGuard, TimedOperationScope};
pub use sink::{CaptureSink, Sink};
