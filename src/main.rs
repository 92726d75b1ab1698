//! Sampleguard CLI
//!
//! Command-line interface for validating and repairing WAV files.

use anyhow::Context;
use clap::Parser;
use env_logger::Env;
use log::debug;

use sampleguard::cli::commands;
use sampleguard::cli::{Cli, Commands};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_level)).init();

    debug!("Sampleguard v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Some(cmd) => handle_command(cmd),
        None => {
            println!("Sampleguard v{}", env!("CARGO_PKG_VERSION"));
            println!("Use --help for available commands");
            Ok(())
        }
    }
}

fn handle_command(cmd: Commands) -> anyhow::Result<()> {
    match cmd {
        Commands::Check {
            input,
            range,
            limit,
            json,
        } => {
            let config = commands::resolve_config(&range).context("invalid guard configuration")?;
            let report = commands::check(&input, &config, limit, json)
                .with_context(|| format!("failed to check {}", input.display()))?;
            if !report.is_valid() {
                std::process::exit(1);
            }
            Ok(())
        }
        Commands::Repair {
            input,
            output,
            range,
            bit_depth,
        } => {
            let config = commands::resolve_config(&range).context("invalid guard configuration")?;
            commands::repair(&input, &output, &config, bit_depth)
                .with_context(|| format!("failed to repair {}", input.display()))?;
            Ok(())
        }
    }
}
