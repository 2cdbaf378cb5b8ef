//! Grammar validation
//!
//! `base ('.' nonNegativeInteger)+ ['!']`, with the base length and total
//! length bounded by the version policy.

use super::errors::{CorrelationError, CorrelationResult};
use super::version::CorrelationVectorVersion;
use super::{DELIMITER, MAX_EXTENSION, TERMINATOR};
use crate::observability::{DiagnosticSink, Event};

/// Parse one extension segment.
///
/// Only ASCII digits are accepted: no sign, no leading `+`, no whitespace.
/// Values above [`MAX_EXTENSION`] are rejected.
pub fn parse_extension(segment: &str) -> Option<u32> {
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    segment
        .parse::<u32>()
        .ok()
        .filter(|value| *value <= MAX_EXTENSION)
}

/// Validate a serialized vector against a version policy.
///
/// # Errors
///
/// - `Empty` if the input is empty or only spaces
/// - `Oversized` if it exceeds the version's maximum length
/// - `InvalidBase` if there is no extension or the base length is wrong
/// - `InvalidExtension` if any extension is not a non-negative integer
pub fn validate(serialized: &str, version: CorrelationVectorVersion) -> CorrelationResult<()> {
    let body = serialized.strip_suffix(TERMINATOR).unwrap_or(serialized);
    let max_length = version.max_length();

    if body.is_empty() || body.bytes().all(|b| b == b' ') {
        return Err(CorrelationError::Empty);
    }

    if body.len() > max_length {
        return Err(CorrelationError::Oversized {
            vector: serialized.to_string(),
            max_length,
        });
    }

    let mut parts = body.split(DELIMITER);
    let base = parts.next().unwrap_or_default();
    let mut extensions = parts.peekable();

    if extensions.peek().is_none() || base.len() != version.base_length() {
        return Err(CorrelationError::InvalidBase {
            vector: serialized.to_string(),
            base: base.to_string(),
        });
    }

    for extension in extensions {
        if parse_extension(extension).is_none() {
            return Err(CorrelationError::InvalidExtension {
                vector: serialized.to_string(),
                extension: extension.to_string(),
            });
        }
    }

    Ok(())
}

/// Validate and turn a failure into a non-fatal report.
///
/// Returns true when the input is valid.
pub fn validate_and_report(
    serialized: &str,
    version: CorrelationVectorVersion,
    sink: &dyn DiagnosticSink,
) -> bool {
    match validate(serialized, version) {
        Ok(()) => true,
        Err(err) => {
            sink.report_error(Event::ValidationFailed, &err.to_string());
            false
        }
    }
}
