//! Console sink

use nia_core_types::Severity;
use std::io::{Stderr, Write};
use std::sync::Mutex;

use super::{lock, Sink};
use crate::event::LogEvent;
use crate::format::Template;

/// Writes console-formatted lines to a stream (stderr by default)
#[derive(Debug)]
pub struct ConsoleSink<W = Stderr> {
    threshold: Severity,
    writer: Mutex<W>,
}

impl ConsoleSink<Stderr> {
    pub fn stderr(threshold: Severity) -> Self {
        Self::with_writer(std::io::stderr(), threshold)
    }
}

impl<W: Write + Send> ConsoleSink<W> {
    /// Console sink over an arbitrary writer
    pub fn with_writer(writer: W, threshold: Severity) -> Self {
        Self {
            threshold,
            writer: Mutex::new(writer),
        }
    }
}

impl<W: Write + Send> Sink for ConsoleSink<W> {
    fn name(&self) -> &str {
        "console"
    }

    fn threshold(&self) -> Severity {
        self.threshold
    }

    fn write(&self, event: &LogEvent) -> std::io::Result<()> {
        let mut line = Template::Console.render(event);
        line.push('\n');
        let mut writer = lock(&self.writer);
        writer.write_all(line.as_bytes())?;
        writer.flush()
    }
}
