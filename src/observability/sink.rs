//! Diagnostic sinks
//!
//! Malformed correlation data is telemetry, not control flow. Reports are
//! fire-and-forget: a sink never fails and never blocks the caller for long.
//! The library reports through a sink only; it never logs on its own.

use std::sync::{Arc, Mutex, PoisonError};

use super::events::Event;
use super::log_event;

/// Receiver for non-fatal reports about tolerated input.
pub trait DiagnosticSink: Send + Sync {
    /// Report a malformed-input or refused-derivation condition.
    fn report_error(&self, event: Event, message: &str);
}

/// Sink that writes each report as a structured log line on stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggerSink;

impl DiagnosticSink for LoggerSink {
    fn report_error(&self, event: Event, message: &str) {
        log_event(event, &[("message", message)]);
    }
}

/// Sink that discards every report.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn report_error(&self, _event: Event, _message: &str) {}
}

/// In-memory sink, shareable across clones.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    reports: Arc<Mutex<Vec<(Event, String)>>>,
}

impl MemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages received so far, oldest first.
    pub fn messages(&self) -> Vec<String> {
        self.lock().iter().map(|(_, message)| message.clone()).collect()
    }

    /// Events received so far, oldest first.
    pub fn events(&self) -> Vec<Event> {
        self.lock().iter().map(|(event, _)| *event).collect()
    }

    /// Number of reports received.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Check if no report was received.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop all collected reports.
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<(Event, String)>> {
        self.reports.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl DiagnosticSink for MemorySink {
    fn report_error(&self, event: Event, message: &str) {
        self.lock().push((event, message.to_string()));
    }
}
