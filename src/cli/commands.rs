//! CLI Command Implementations
//!
//! Implements the actual logic for each CLI command.

use std::path::Path;

use log::{info, warn};
use serde_json::json;

use crate::cli::RangeArgs;
use crate::config::GuardConfig;
use crate::engine::buffer::calculate_peak;
use crate::engine::{export_audio, import_audio, ExportFormat};
use crate::error::Result;
use crate::validation::{validate_into, ValidationReport};

/// Build the effective configuration: file (or defaults), then flag overrides.
pub fn resolve_config(args: &RangeArgs) -> Result<GuardConfig> {
    let mut config = match &args.config {
        Some(path) => {
            info!("Loading guard configuration: {}", path.display());
            GuardConfig::load(path)?
        }
        None => GuardConfig::default(),
    };

    if let Some(min) = args.min {
        config.min_value = min;
    }
    if let Some(max) = args.max {
        config.max_value = max;
    }

    config.validate()?;
    Ok(config)
}

/// Validate a WAV file and print the report.
pub fn check(
    input: &Path,
    config: &GuardConfig,
    limit: Option<usize>,
    as_json: bool,
) -> Result<ValidationReport> {
    info!("Checking: {}", input.display());

    let limit = GuardConfig::check_report_limit(limit.unwrap_or(config.max_reported))?;
    let range = config.validate()?;
    let buffer = import_audio(input)?;

    let mut report = ValidationReport::with_limit(limit);
    validate_into(&buffer.as_block(), range, &mut report);

    if as_json {
        let output = json!({
            "file": input.display().to_string(),
            "channels": buffer.num_channels(),
            "sample_rate": buffer.sample_rate,
            "min_value": range.min_value(),
            "max_value": range.max_value(),
            "valid": report.is_valid(),
            "report": report,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(report);
    }

    println!(
        "{}: {} ch @ {} Hz, {:.2}s, peak {:.1} dBFS",
        input.display(),
        buffer.num_channels(),
        buffer.sample_rate,
        buffer.duration_secs(),
        calculate_peak(&buffer)
    );
    println!("Range: [{}, {}]", range.min_value(), range.max_value());
    println!("{}", report.summary());

    for violation in report.violations() {
        println!("  {}", violation);
    }
    if report.is_truncated() {
        println!(
            "  ... {} more not shown",
            report.violation_count() - report.violations().len()
        );
    }

    Ok(report)
}

/// Repair a WAV file into `output`.
///
/// # Returns
/// The number of samples that changed.
pub fn repair(input: &Path, output: &Path, config: &GuardConfig, bit_depth: u16) -> Result<usize> {
    info!("Repairing: {} -> {}", input.display(), output.display());

    let mut buffer = import_audio(input)?;
    let changed = buffer.repair(config.range()?);

    if changed == 0 {
        warn!("No invalid samples found in {}", input.display());
    }

    export_audio(&buffer, output, ExportFormat::new(bit_depth))?;

    println!("Repaired {} samples: {}", changed, output.display());
    Ok(changed)
}
