//! Bridge from `tracing` events into a [`LogRouter`]
//!
//! Lets code that logs through `tracing::info!` and friends reach the same
//! sinks as direct router calls.

use nia_core_types::Severity;
use std::fmt::Write as _;
use std::sync::{Arc, Once};
use tracing::field::{Field, Visit};
use tracing::Subscriber;
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::event::Origin;
use crate::router::LogRouter;

/// Collects the `message` field and renders the rest as `key=value`
#[derive(Default)]
struct FieldVisitor {
    message: String,
    fields: Vec<(&'static str, String)>,
}

impl FieldVisitor {
    fn into_message(self) -> String {
        let mut out = self.message;
        for (name, value) in self.fields {
            if !out.is_empty() {
                out.push(' ');
            }
            let _ = write!(out, "{}={}", name, value);
        }
        out
    }
}

impl Visit for FieldVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{:?}", value);
        } else {
            self.fields.push((field.name(), format!("{:?}", value)));
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.fields.push((field.name(), value.to_string()));
        }
    }
}

/// `tracing_subscriber` layer forwarding every event to a router
pub struct RouterLayer {
    router: Arc<LogRouter>,
}

impl RouterLayer {
    pub fn new(router: Arc<LogRouter>) -> Self {
        Self { router }
    }
}

impl<S> Layer<S> for RouterLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let severity = Severity::from(*metadata.level());
        if !self.router.enabled(severity) {
            return;
        }

        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);

        let origin = match (metadata.file(), metadata.line()) {
            (Some(file), Some(line)) => Origin { file, line },
            _ => Origin::UNKNOWN,
        };
        self.router
            .emit_at(severity, visitor.into_message(), origin, None);
    }
}

static INIT_ONCE: Once = Once::new();

/// Install `router` as the destination of the global `tracing` dispatcher
///
/// Only the first call has an effect. `RUST_LOG` overrides the default
/// `debug` filter. If another global subscriber is already installed, this
/// leaves it in place.
pub fn init(router: Arc<LogRouter>) {
    INIT_ONCE.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("debug"));
        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(RouterLayer::new(router))
            .try_init();
    });
}
