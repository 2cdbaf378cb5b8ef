//! Correlation vectors
//!
//! A vector is an immutable base segment identifying the root operation,
//! followed by a dot-separated chain of extensions identifying each hop.
//!
//! # Wire format
//!
//! `base ('.' nonNegativeInteger)+ ['!']`
//!
//! | Version | Base length | Max length |
//! |---------|-------------|------------|
//! | V1      | 16          | 63         |
//! | V2      | 22          | 127        |
//!
//! The version is recovered from the base length; it is never on the wire.
//!
//! # Operators
//!
//! - `extend`: the inbound value becomes the new base, counter restarts at 0
//! - `spin`: append a time and entropy derived value, counter restarts at 0
//! - `parse`: rebuild a vector from its serialized form
//! - `increment`: lock-free advance of the local counter

mod correlation_vector;
mod derive;
mod errors;
mod spin;
mod validation;
mod version;

pub use correlation_vector::CorrelationVector;
pub use errors::{CorrelationError, CorrelationResult};
pub use spin::{
    current_ticks, format_spin_value, spin_value, SpinCounterInterval, SpinCounterPeriodicity,
    SpinEntropy, SpinParameters,
};
pub use validation::{parse_extension, validate, validate_and_report};
pub use version::CorrelationVectorVersion;

/// Message header carrying the vector between services
pub const HEADER_NAME: &str = "MS-CV";

/// Trailing marker of a terminated vector
pub const TERMINATOR: char = '!';

/// Separator between base and extensions
pub const DELIMITER: char = '.';

/// Largest extension value, kept within a signed 32-bit range for
/// interoperability with other implementations
pub const MAX_EXTENSION: u32 = i32::MAX as u32;

/// True if the serialized vector carries the terminator.
pub fn is_terminated(serialized: &str) -> bool {
    serialized.ends_with(TERMINATOR)
}
