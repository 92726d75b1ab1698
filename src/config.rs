//! Guard configuration
//!
//! Settings for a `SampleGuard`, stored as JSON. Missing fields fall back to
//! their defaults, so `{}` is a valid configuration file.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SampleGuardError};
use crate::validation::{ValidationRange, ValidationReport, ViolationPolicy};

/// Validation settings shared by the CLI and the pass-through processor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuardConfig {
    /// Lowest valid sample value (inclusive)
    pub min_value: f32,
    /// Highest valid sample value (inclusive)
    pub max_value: f32,
    /// Response to a block containing bad samples
    pub policy: ViolationPolicy,
    /// Violations recorded per block; further ones are only counted
    pub max_reported: usize,
}

impl GuardConfig {
    pub const DEFAULT_MAX_REPORTED: usize = 64;
    /// Upper bound on `max_reported` and on the CLI `--limit`
    pub const MAX_REPORTED: usize = ValidationReport::MAX_LIMIT;

    /// Load a configuration from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => SampleGuardError::FileNotFound {
                path: path.display().to_string(),
                source: Some(e),
            },
            _ => SampleGuardError::Io(e),
        })?;

        let config: GuardConfig = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Write the configuration as pretty-printed JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// The validation range, or `InvalidRange` if the bounds are inverted or NaN
    pub fn range(&self) -> Result<ValidationRange<f32>> {
        ValidationRange::new(self.min_value, self.max_value)
    }

    /// Check every field, returning the validation range
    pub fn validate(&self) -> Result<ValidationRange<f32>> {
        Self::check_report_limit(self.max_reported)?;
        self.range()
    }

    /// `ReportLimit` if `limit` is above [`GuardConfig::MAX_REPORTED`]
    pub fn check_report_limit(limit: usize) -> Result<usize> {
        if limit > Self::MAX_REPORTED {
            return Err(SampleGuardError::ReportLimit {
                requested: limit,
                max: Self::MAX_REPORTED,
            });
        }
        Ok(limit)
    }
}

impl Default for GuardConfig {
    fn default() -> Self {
        let range = ValidationRange::<f32>::default();
        Self {
            min_value: range.min_value(),
            max_value: range.max_value(),
            policy: ViolationPolicy::default(),
            max_reported: Self::DEFAULT_MAX_REPORTED,
        }
    }
}
