//! CLI module for cvector
//!
//! Provides command-line access to:
//! - new: create a root vector
//! - extend / spin: derive a vector from an inbound value
//! - parse / increment: inspect and advance a vector
//! - validate / infer: check the wire format

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{build_context, run, run_command};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{write_error, write_response};
