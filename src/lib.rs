//! correlation_vector - hierarchical identifiers for correlating events
//! across distributed service calls
//!
//! ```ignore
//! use correlation_vector::{CorrelationContext, CorrelationVector, HEADER_NAME};
//!
//! let ctx = CorrelationContext::default();
//! let cv = match inbound.header(HEADER_NAME) {
//!     Some(value) => ctx.extend(value),
//!     None => ctx.create_root(),
//! };
//! outbound.set_header(HEADER_NAME, cv.increment());
//! ```

pub mod cli;
pub mod config;
pub mod guid;
pub mod observability;
pub mod vector;

pub use config::{CorrelationConfig, CorrelationContext};
pub use guid::Guid;
pub use vector::{
    CorrelationError, CorrelationResult, CorrelationVector, CorrelationVectorVersion,
    SpinParameters, HEADER_NAME, TERMINATOR,
};
