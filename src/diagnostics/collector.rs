//! This module provides a `tracing` layer that collects events into a
//! [`DiagnosticBuffer`].
use super::{Diagnostic, DiagnosticBuffer};
use chrono::Utc;
use std::fmt;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::{layer::Context, registry::LookupSpan, Layer};

/// A `tracing` layer that records every event it sees into a
/// `DiagnosticBuffer`.
///
/// Compose it with a filter (for example `Targets` or `EnvFilter`) to restrict
/// it to the logger's own diagnostics under [`super::TARGET`].
#[derive(Debug, Clone)]
pub struct DiagnosticCollector {
    buffer: DiagnosticBuffer,
}

impl DiagnosticCollector {
    /// Creates a new `DiagnosticCollector`.
    ///
    /// # Arguments
    ///
    /// * `buffer` - The `DiagnosticBuffer` to which diagnostics will be added.
    pub fn new(buffer: DiagnosticBuffer) -> Self {
        Self { buffer }
    }

    /// Returns the buffer this collector writes into.
    pub fn buffer(&self) -> &DiagnosticBuffer {
        &self.buffer
    }
}

impl<S> Layer<S> for DiagnosticCollector
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    /// Extracts the message and fields from an event and adds it to the
    /// buffer.
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();

        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);

        self.buffer.push(Diagnostic {
            timestamp: Utc::now(),
            level: *metadata.level(),
            target: metadata.target().to_string(),
            message: visitor.message,
            fields: visitor.fields,
        });
    }
}

/// Splits an event into its `message` and the remaining named fields.
#[derive(Default)]
struct FieldVisitor {
    message: String,
    fields: Vec<(String, String)>,
}

impl FieldVisitor {
    fn push(&mut self, field: &Field, value: String) {
        if field.name() == "message" {
            self.message = value;
        } else {
            self.fields.push((field.name().to_string(), value));
        }
    }
}

impl Visit for FieldVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.push(field, format!("{:?}", value));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.push(field, value.to_string());
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.push(field, value.to_string());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.push(field, value.to_string());
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.push(field, value.to_string());
    }
}
