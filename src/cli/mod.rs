//! CLI Module
//!
//! Command-line interface for checking and repairing WAV files.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Sampleguard - find NaN, Inf, and out-of-range samples in audio files
#[derive(Parser, Debug)]
#[command(name = "sampleguard")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Range overrides shared by every subcommand
#[derive(clap::Args, Debug, Clone, Default)]
pub struct RangeArgs {
    /// JSON guard configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Lowest valid sample value (overrides the config file)
    #[arg(long, allow_negative_numbers = true)]
    pub min: Option<f32>,

    /// Highest valid sample value (overrides the config file)
    #[arg(long, allow_negative_numbers = true)]
    pub max: Option<f32>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate a WAV file; exits with status 1 if any sample is invalid
    #[command(name = "check")]
    Check {
        /// Input WAV file
        input: PathBuf,

        #[command(flatten)]
        range: RangeArgs,

        /// Maximum number of violations to list
        #[arg(short, long)]
        limit: Option<usize>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write a copy with NaN/Inf silenced and out-of-range samples clamped
    #[command(name = "repair")]
    Repair {
        /// Input WAV file
        input: PathBuf,

        /// Output WAV file
        output: PathBuf,

        #[command(flatten)]
        range: RangeArgs,

        /// Output bit depth: 16, 24, or 32 (float)
        #[arg(short, long, default_value_t = 32)]
        bit_depth: u16,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_check() {
        let cli = Cli::parse_from([
            "sampleguard", "check", "in.wav", "--min", "-0.5", "--max", "0.5", "--json",
        ]);

        match cli.command {
            Some(Commands::Check {
                input, range, json, ..
            }) => {
                assert_eq!(input, PathBuf::from("in.wav"));
                assert_eq!(range.min, Some(-0.5));
                assert_eq!(range.max, Some(0.5));
                assert!(json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_repair_defaults() {
        let cli = Cli::parse_from(["sampleguard", "-v", "repair", "in.wav", "out.wav"]);
        assert!(cli.verbose);

        match cli.command {
            Some(Commands::Repair { bit_depth, range, .. }) => {
                assert_eq!(bit_depth, 32);
                assert!(range.config.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
