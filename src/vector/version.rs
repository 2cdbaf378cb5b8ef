//! Version policy
//!
//! Two wire formats coexist. The version is never carried on the wire; it is
//! recovered from the length of the base segment.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::errors::{CorrelationError, CorrelationResult};
use super::DELIMITER;
use crate::observability::{DiagnosticSink, Event};

/// Correlation vector wire format version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CorrelationVectorVersion {
    /// 16 character base, 63 characters total
    #[default]
    V1,
    /// 22 character base, 127 characters total
    V2,
}

impl CorrelationVectorVersion {
    /// Length of the base segment
    pub const fn base_length(self) -> usize {
        match self {
            CorrelationVectorVersion::V1 => 16,
            CorrelationVectorVersion::V2 => 22,
        }
    }

    /// Maximum length of the serialized vector
    pub const fn max_length(self) -> usize {
        match self {
            CorrelationVectorVersion::V1 => 63,
            CorrelationVectorVersion::V2 => 127,
        }
    }

    /// Number of unique-identifier bytes encoded into a fresh base
    pub const fn uuid_bytes(self) -> usize {
        match self {
            CorrelationVectorVersion::V1 => 12,
            CorrelationVectorVersion::V2 => 16,
        }
    }

    /// Version whose base segment has the given length
    pub fn from_base_length(length: usize) -> Option<Self> {
        [CorrelationVectorVersion::V1, CorrelationVectorVersion::V2]
            .into_iter()
            .find(|version| version.base_length() == length)
    }

    /// Infer the version of a serialized vector from the position of its
    /// first delimiter.
    ///
    /// Unrecognised layouts fall back to V1 so one malformed inbound header
    /// cannot take a service down. The fallback is reported only when
    /// `report_errors` is set.
    pub fn infer(serialized: &str, report_errors: bool, sink: &dyn DiagnosticSink) -> Self {
        let inferred = serialized
            .find(DELIMITER)
            .and_then(CorrelationVectorVersion::from_base_length);

        match inferred {
            Some(version) => version,
            None => {
                if report_errors {
                    sink.report_error(
                        Event::VersionFallback,
                        &format!("Invalid correlation vector {serialized}"),
                    );
                }
                CorrelationVectorVersion::V1
            }
        }
    }

    /// Returns the lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            CorrelationVectorVersion::V1 => "v1",
            CorrelationVectorVersion::V2 => "v2",
        }
    }
}

impl fmt::Display for CorrelationVectorVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CorrelationVectorVersion {
    type Err = CorrelationError;

    fn from_str(s: &str) -> CorrelationResult<Self> {
        match s {
            "v1" | "V1" => Ok(CorrelationVectorVersion::V1),
            "v2" | "V2" => Ok(CorrelationVectorVersion::V2),
            other => Err(CorrelationError::UnsupportedVersion(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observability::MemorySink;

    #[test]
    fn test_policy_table() {
        assert_eq!(CorrelationVectorVersion::V1.base_length(), 16);
        assert_eq!(CorrelationVectorVersion::V1.max_length(), 63);
        assert_eq!(CorrelationVectorVersion::V2.base_length(), 22);
        assert_eq!(CorrelationVectorVersion::V2.max_length(), 127);
    }

    #[test]
    fn test_infer_by_delimiter_position() {
        let sink = MemorySink::new();
        let v1 = CorrelationVectorVersion::infer("ABCDEFGHIJKLMNOP.1", true, &sink);
        let v2 = CorrelationVectorVersion::infer("ABCDEFGHIJKLMNOPQRSTUV.1.2", true, &sink);

        assert_eq!(v1, CorrelationVectorVersion::V1);
        assert_eq!(v2, CorrelationVectorVersion::V2);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_infer_falls_back_and_reports() {
        let sink = MemorySink::new();
        for input in ["", "short.1", "ABCDEFGHIJKLMNOP"] {
            assert_eq!(
                CorrelationVectorVersion::infer(input, true, &sink),
                CorrelationVectorVersion::V1
            );
        }
        assert_eq!(sink.events(), vec![Event::VersionFallback; 3]);
    }

    #[test]
    fn test_infer_silent_without_reporting() {
        let sink = MemorySink::new();
        let version = CorrelationVectorVersion::infer("nope", false, &sink);
        assert_eq!(version, CorrelationVectorVersion::V1);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_from_str() {
        assert_eq!("V2".parse::<CorrelationVectorVersion>(), Ok(CorrelationVectorVersion::V2));
        assert!(matches!(
            "v3".parse::<CorrelationVectorVersion>(),
            Err(CorrelationError::UnsupportedVersion(_))
        ));
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&CorrelationVectorVersion::V2).unwrap();
        assert_eq!(json, "\"v2\"");
        let parsed: CorrelationVectorVersion = serde_json::from_str("\"v1\"").unwrap();
        assert_eq!(parsed, CorrelationVectorVersion::V1);
    }
}
