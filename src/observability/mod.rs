//! Observability for correlation vectors
//!
//! - Structured logging (JSON, one line per event)
//! - Typed lifecycle events
//! - Diagnostic sinks receiving non-fatal format reports
//!
//! Observability never changes the outcome of a vector operation.
//!
//! # Usage
//!
//! ```ignore
//! use correlation_vector::observability::{log_event, DiagnosticSink, Event, MemorySink};
//!
//! log_event(Event::Extended, &[("cv", "tul4NUsfs9Cl7mOf.1")]);
//!
//! let sink = MemorySink::new();
//! sink.report_error(Event::ParseFallback, "Invalid correlation vector");
//! assert_eq!(sink.events(), vec![Event::ParseFallback]);
//! ```

mod events;
mod logger;
mod sink;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use sink::{DiagnosticSink, LoggerSink, MemorySink, NullSink};

/// Log an event at its own severity
///
/// Degraded events are logged at WARN, saturation at INFO and lifecycle
/// events at TRACE.
pub fn log_event(event: Event, fields: &[(&str, &str)]) {
    Logger::log(event.severity(), event, fields);
}
