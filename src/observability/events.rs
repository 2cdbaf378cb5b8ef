//! Observable correlation vector events
//!
//! Events are explicit and typed.

use std::fmt;

use super::logger::Severity;

/// Observable events emitted while creating and deriving vectors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// A new root vector was created
    Created,
    /// A vector was derived with the extend operator
    Extended,
    /// A vector was derived with the spin operator
    Spun,
    /// A serialized vector was parsed
    Parsed,
    /// Parsing failed and a fresh root vector was created instead
    ParseFallback,
    /// Serialized input did not match the grammar
    ValidationFailed,
    /// Version could not be inferred, V1 was assumed
    VersionFallback,
    /// Increment stopped at the length or integer ceiling
    Saturated,
    /// Derivation was requested on a terminated vector
    ImmutableDerivation,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::Created => "CV_CREATED",
            Event::Extended => "CV_EXTENDED",
            Event::Spun => "CV_SPUN",
            Event::Parsed => "CV_PARSED",
            Event::ParseFallback => "CV_PARSE_FALLBACK",
            Event::ValidationFailed => "CV_VALIDATION_FAILED",
            Event::VersionFallback => "CV_VERSION_FALLBACK",
            Event::Saturated => "CV_SATURATED",
            Event::ImmutableDerivation => "CV_IMMUTABLE_DERIVATION",
        }
    }

    /// Returns true if the event signals input that was tolerated rather than accepted
    pub fn is_degraded(&self) -> bool {
        matches!(
            self,
            Event::ParseFallback
                | Event::ValidationFailed
                | Event::VersionFallback
                | Event::ImmutableDerivation
        )
    }

    /// Severity the event is logged at
    pub fn severity(&self) -> Severity {
        match self {
            _ if self.is_degraded() => Severity::Warn,
            Event::Saturated => Severity::Info,
            _ => Severity::Trace,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_events_have_string_representation() {
        let events = [
            Event::Created,
            Event::Extended,
            Event::Spun,
            Event::Parsed,
            Event::ParseFallback,
            Event::ValidationFailed,
            Event::VersionFallback,
            Event::Saturated,
            Event::ImmutableDerivation,
        ];

        for event in events {
            let s = event.as_str();
            assert!(s.starts_with("CV_"));
            assert!(s.chars().all(|c| c.is_uppercase() || c == '_'));
        }
    }

    #[test]
    fn test_degraded_events() {
        assert!(Event::ValidationFailed.is_degraded());
        assert!(Event::ParseFallback.is_degraded());
        assert!(Event::ImmutableDerivation.is_degraded());
        assert!(!Event::Saturated.is_degraded());
        assert!(!Event::Extended.is_degraded());
    }

    #[test]
    fn test_event_severity() {
        assert_eq!(Event::VersionFallback.severity(), Severity::Warn);
        assert_eq!(Event::Saturated.severity(), Severity::Info);
        assert_eq!(Event::Extended.severity(), Severity::Trace);
    }

    #[test]
    fn test_event_display() {
        assert_eq!(format!("{}", Event::Spun), "CV_SPUN");
    }
}
