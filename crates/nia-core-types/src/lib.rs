//! Core types shared across Nia facilities
//!
//! This crate provides foundational types used by both error handling
//! and logging facilities:
//!
//! - **Severity**: the ordered log level used for sink thresholds
//! - **Schema constants**: canonical event prefixes, file names and defaults

pub mod schema;
pub mod severity;

pub use severity::{ParseSeverityError, Severity};
