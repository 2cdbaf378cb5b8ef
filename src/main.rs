//! cvector CLI entry point
//!
//! All logic is delegated to the CLI module. Errors have already been
//! written to stdout as a JSON response; only the exit status is left.

use correlation_vector::cli;

fn main() {
    if cli::run().is_err() {
        std::process::exit(1);
    }
}
