//! CLI argument definitions using clap
//!
//! Commands:
//! - cvector new [--version v1|v2]
//! - cvector extend <cv>
//! - cvector spin <cv> [--interval] [--periodicity] [--entropy]
//! - cvector parse <cv>
//! - cvector increment <cv> [--count n]
//! - cvector validate <cv> [--version v1|v2]
//! - cvector infer <cv>

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::vector::{SpinCounterInterval, SpinCounterPeriodicity, SpinEntropy};

/// cvector - create and derive correlation vectors
#[derive(Parser, Debug)]
#[command(name = "cvector")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to a JSON configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Validate inbound vectors, reporting format errors on stderr
    #[arg(long, global = true)]
    pub validate: bool,

    /// Log lifecycle events on stderr
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new root vector
    New {
        /// Wire format version, v1 or v2 (defaults to the configured version)
        #[arg(long)]
        version: Option<String>,
    },

    /// Derive a vector one level deeper
    Extend {
        /// Inbound vector
        cv: String,
    },

    /// Derive a vector with the spin operator
    Spin {
        /// Inbound vector
        cv: String,

        /// Tick resolution
        #[arg(long, value_enum)]
        interval: Option<IntervalArg>,

        /// Tick bits kept
        #[arg(long, value_enum)]
        periodicity: Option<PeriodicityArg>,

        /// Random bytes appended
        #[arg(long, value_enum)]
        entropy: Option<EntropyArg>,
    },

    /// Parse a serialized vector
    Parse {
        cv: String,
    },

    /// Parse a vector and increment it
    Increment {
        cv: String,

        /// Number of increments
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..=10_000))]
        count: u32,
    },

    /// Check a vector against the wire grammar
    Validate {
        cv: String,

        /// Version to validate against, v1 or v2 (inferred when omitted)
        #[arg(long)]
        version: Option<String>,
    },

    /// Infer the version of a serialized vector
    Infer {
        cv: String,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntervalArg {
    Coarse,
    Fine,
}

impl From<IntervalArg> for SpinCounterInterval {
    fn from(arg: IntervalArg) -> Self {
        match arg {
            IntervalArg::Coarse => SpinCounterInterval::Coarse,
            IntervalArg::Fine => SpinCounterInterval::Fine,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriodicityArg {
    None,
    Short,
    Medium,
    Long,
}

impl From<PeriodicityArg> for SpinCounterPeriodicity {
    fn from(arg: PeriodicityArg) -> Self {
        match arg {
            PeriodicityArg::None => SpinCounterPeriodicity::None,
            PeriodicityArg::Short => SpinCounterPeriodicity::Short,
            PeriodicityArg::Medium => SpinCounterPeriodicity::Medium,
            PeriodicityArg::Long => SpinCounterPeriodicity::Long,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntropyArg {
    None,
    One,
    Two,
    Three,
    Four,
}

impl From<EntropyArg> for SpinEntropy {
    fn from(arg: EntropyArg) -> Self {
        match arg {
            EntropyArg::None => SpinEntropy::None,
            EntropyArg::One => SpinEntropy::One,
            EntropyArg::Two => SpinEntropy::Two,
            EntropyArg::Three => SpinEntropy::Three,
            EntropyArg::Four => SpinEntropy::Four,
        }
    }
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
