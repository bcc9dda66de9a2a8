//! In-memory capture sink for deterministic logging assertions
//!
//! Clones share one buffer: attach a clone to a router and keep the original
//! to inspect what was delivered.

use nia_core_types::Severity;
use std::sync::{Arc, Mutex};

use super::{lock, Sink};
use crate::event::LogEvent;
use crate::format::Template;

/// A captured event together with its rendered line
#[derive(Clone, Debug)]
pub struct CapturedEvent {
    pub event: LogEvent,
    pub line: String,
}

/// Sink that records every accepted event in memory
#[derive(Clone, Debug)]
pub struct CaptureSink {
    threshold: Severity,
    template: Template,
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl CaptureSink {
    /// Capture everything at or above `threshold`, rendered with the full template
    pub fn new(threshold: Severity) -> Self {
        Self::with_template(threshold, Template::Full)
    }

    pub fn with_template(threshold: Severity, template: Template) -> Self {
        Self {
            threshold,
            template,
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Get all captured events
    pub fn events(&self) -> Vec<CapturedEvent> {
        lock(&self.events).clone()
    }

    /// Messages of all captured events, in delivery order
    pub fn messages(&self) -> Vec<String> {
        lock(&self.events)
            .iter()
            .map(|c| c.event.message().to_string())
            .collect()
    }

    /// Rendered lines of all captured events, in delivery order
    pub fn lines(&self) -> Vec<String> {
        lock(&self.events).iter().map(|c| c.line.clone()).collect()
    }

    /// Count events matching a predicate
    pub fn count_events<F>(&self, predicate: F) -> usize
    where
        F: Fn(&LogEvent) -> bool,
    {
        lock(&self.events)
            .iter()
            .filter(|c| predicate(&c.event))
            .count()
    }

    /// Assert that some captured message starts with `prefix`
    ///
    /// # Panics
    ///
    /// Panics if no such message was captured
    pub fn assert_message_starts_with(&self, prefix: &str) {
        let messages = self.messages();
        assert!(
            messages.iter().any(|m| m.starts_with(prefix)),
            "Expected a message starting with {:?} in {} captured events: {:?}",
            prefix,
            messages.len(),
            messages
        );
    }

    /// Clear all captured events
    pub fn clear(&self) {
        lock(&self.events).clear();
    }
}

impl Sink for CaptureSink {
    fn name(&self) -> &str {
        "capture"
    }

    fn threshold(&self) -> Severity {
        self.threshold
    }

    fn write(&self, event: &LogEvent) -> std::io::Result<()> {
        let line = self.template.render(event);
        lock(&self.events).push(CapturedEvent {
            event: event.clone(),
            line,
        });
        Ok(())
    }
}
