//! Correlation vector errors
//!
//! Error codes:
//! - CV_EMPTY
//! - CV_OVERSIZED
//! - CV_INVALID_BASE
//! - CV_INVALID_EXTENSION
//! - CV_UNSUPPORTED_VERSION (programming error)
//!
//! Format errors are never returned from `extend`, `spin` or `parse`. Those
//! operators report them to a diagnostic sink and fall back to a usable vector.

use thiserror::Error;

/// Result type for correlation vector operations
pub type CorrelationResult<T> = Result<T, CorrelationError>;

/// Correlation vector errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CorrelationError {
    /// Input is empty or contains only spaces
    #[error("The correlation vector can not be empty")]
    Empty,

    /// Input exceeds the version's maximum length
    #[error("The {vector} correlation vector can not be bigger than {max_length} characters")]
    Oversized { vector: String, max_length: usize },

    /// Missing extension or base segment of the wrong length
    #[error("Invalid correlation vector {vector}. Invalid base value {base}")]
    InvalidBase { vector: String, base: String },

    /// Extension segment is not a non-negative decimal integer
    #[error("Invalid correlation vector {vector}. Invalid extension value {extension}")]
    InvalidExtension { vector: String, extension: String },

    /// Version name outside the known set
    #[error("Unsupported correlation vector version: {0}")]
    UnsupportedVersion(String),
}

impl CorrelationError {
    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            CorrelationError::Empty => "CV_EMPTY",
            CorrelationError::Oversized { .. } => "CV_OVERSIZED",
            CorrelationError::InvalidBase { .. } => "CV_INVALID_BASE",
            CorrelationError::InvalidExtension { .. } => "CV_INVALID_EXTENSION",
            CorrelationError::UnsupportedVersion(_) => "CV_UNSUPPORTED_VERSION",
        }
    }

    /// Returns true for format errors, which are reported and tolerated
    pub fn is_format_error(&self) -> bool {
        !self.is_fatal()
    }

    /// Unsupported versions are caller bugs, not bad telemetry
    pub fn is_fatal(&self) -> bool {
        matches!(self, CorrelationError::UnsupportedVersion(_))
    }
}
