//! Responding to bad samples
//!
//! The validator only detects. A `SampleGuard` pairs detection with a
//! `ViolationPolicy` so the processing path can decide what a bad block means:
//! count it, log it, repair it in place, or treat it as a programming error.

use log::{debug, error, warn};
use num_traits::Float;
use serde::{Deserialize, Serialize};

use crate::config::GuardConfig;
use crate::engine::AudioBuffer;
use crate::error::Result;
use crate::validation::{classify_sample, validate_into, ValidationRange, ValidationReport};

/// What to do when a block contains bad samples
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationPolicy {
    /// Count violations, nothing else
    Ignore,
    /// Warn once per block with the first violation and the total count
    #[default]
    Log,
    /// Silence NaN/Inf and clamp out-of-range samples in place
    Repair,
    /// Panic in debug builds; log at error level in release builds
    Assert,
}

/// Repair one channel in place
///
/// NaN and infinite samples become silence (clamped into `range` in case it
/// excludes zero); finite out-of-range samples are clamped to the nearest bound.
///
/// # Returns
/// The number of samples that changed.
pub fn repair_samples<T: Float>(samples: &mut [T], range: ValidationRange<T>) -> usize {
    let mut changed = 0;
    for sample in samples.iter_mut() {
        if classify_sample(*sample, &range).is_some() {
            let base = if sample.is_finite() { *sample } else { T::zero() };
            *sample = range.clamp(base);
            changed += 1;
        }
    }
    changed
}

/// Always-active detection plus response
///
/// The internal report is preallocated, so `inspect` does not allocate and can
/// run inside a real-time callback.
#[derive(Debug, Clone)]
pub struct SampleGuard {
    range: ValidationRange<f32>,
    policy: ViolationPolicy,
    report: ValidationReport,
}

impl SampleGuard {
    /// Create a guard recording at most `max_reported` violations per block
    ///
    /// At least one violation is always recorded so the first can be reported.
    pub fn new(range: ValidationRange<f32>, policy: ViolationPolicy, max_reported: usize) -> Self {
        Self {
            range,
            policy,
            report: ValidationReport::with_limit(max_reported.max(1)),
        }
    }

    /// Build a guard from configuration, validating its range and report limit
    pub fn from_config(config: &GuardConfig) -> Result<Self> {
        let range = config.validate()?;
        Ok(Self::new(range, config.policy, config.max_reported))
    }

    pub fn range(&self) -> ValidationRange<f32> {
        self.range
    }

    pub fn policy(&self) -> ViolationPolicy {
        self.policy
    }

    /// Report from the most recent inspection
    pub fn report(&self) -> &ValidationReport {
        &self.report
    }

    /// Validate `buffer` and apply the policy
    ///
    /// # Returns
    /// The number of violations found (before any repair).
    pub fn inspect(&mut self, buffer: &mut AudioBuffer) -> usize {
        validate_into(&buffer.as_block(), self.range, &mut self.report);

        let count = self.report.violation_count();
        let Some(first) = self.report.first().copied() else {
            return 0;
        };

        match self.policy {
            ViolationPolicy::Ignore => {}
            ViolationPolicy::Log => {
                warn!("{} invalid samples in block, first: {}", count, first);
            }
            ViolationPolicy::Repair => {
                let repaired = buffer.repair(self.range);
                debug!("Repaired {} samples, first: {}", repaired, first);
            }
            ViolationPolicy::Assert => {
                if cfg!(debug_assertions) {
                    panic!("audio block validation failed: {first} ({count} invalid samples)");
                }
                error!("{} invalid samples in block, first: {}", count, first);
            }
        }

        count
    }
}

impl Default for SampleGuard {
    fn default() -> Self {
        Self::new(
            ValidationRange::default(),
            ViolationPolicy::default(),
            GuardConfig::DEFAULT_MAX_REPORTED,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::DEFAULT_SAMPLE_RATE;
    use crate::error::SampleGuardError;
    use crate::validation::{validate, ViolationKind};

    fn buffer_of(samples: Vec<Vec<f32>>) -> AudioBuffer {
        AudioBuffer::from_channels(samples, DEFAULT_SAMPLE_RATE).unwrap()
    }

    #[test]
    fn test_repair_samples() {
        let mut samples = [0.5_f64, f64::NAN, 1.5, -3.0, f64::NEG_INFINITY];
        let changed = repair_samples(&mut samples, ValidationRange::default());

        assert_eq!(changed, 4);
        assert_eq!(samples, [0.5, 0.0, 1.0, -1.0, 0.0]);
    }

    #[test]
    fn test_repair_when_range_excludes_zero() {
        let range = ValidationRange::new(0.25_f32, 0.75).unwrap();
        let mut samples = [f32::NAN, 0.5];
        repair_samples(&mut samples, range);

        assert_eq!(samples, [0.25, 0.5]);
    }

    #[test]
    fn test_policy_serde() {
        let json = serde_json::to_string(&ViolationPolicy::Repair).unwrap();
        assert_eq!(json, "\"repair\"");

        let policy: ViolationPolicy = serde_json::from_str("\"ignore\"").unwrap();
        assert_eq!(policy, ViolationPolicy::Ignore);
        assert_eq!(ViolationPolicy::default(), ViolationPolicy::Log);
    }

    #[test]
    fn test_guard_clean_buffer() {
        let mut guard = SampleGuard::default();
        let mut buffer = buffer_of(vec![vec![0.5; 64], vec![-0.5; 64]]);

        assert_eq!(guard.inspect(&mut buffer), 0);
        assert!(guard.report().is_valid());
        assert_eq!(guard.report().samples_checked(), 128);
    }

    #[test]
    fn test_guard_ignore_leaves_buffer() {
        let mut guard = SampleGuard::new(ValidationRange::default(), ViolationPolicy::Ignore, 8);
        let mut buffer = buffer_of(vec![vec![2.0, f32::INFINITY]]);

        assert_eq!(guard.inspect(&mut buffer), 2);
        assert_eq!(buffer.get_sample(0, 0), Some(2.0));
        assert_eq!(guard.report().count(ViolationKind::Infinite), 1);
    }

    #[test]
    fn test_guard_log_leaves_buffer() {
        let mut guard = SampleGuard::new(ValidationRange::default(), ViolationPolicy::Log, 8);
        let mut buffer = buffer_of(vec![vec![f32::NAN, 0.0]]);

        assert_eq!(guard.inspect(&mut buffer), 1);
        assert!(buffer.get_sample(0, 0).unwrap().is_nan());
    }

    #[test]
    fn test_guard_repair_produces_valid_buffer() {
        let mut guard = SampleGuard::new(ValidationRange::default(), ViolationPolicy::Repair, 8);
        let mut buffer = buffer_of(vec![vec![f32::NAN, 1.2, -0.3], vec![f32::NEG_INFINITY, 0.0, -7.0]]);

        assert_eq!(guard.inspect(&mut buffer), 4);
        assert!(validate(&buffer.as_block(), ValidationRange::default()).is_valid());
        assert_eq!(buffer.channel(0), &[0.0, 1.0, -0.3]);
        assert_eq!(buffer.channel(1), &[0.0, 0.0, -1.0]);
    }

    #[test]
    fn test_guard_report_is_bounded() {
        let mut guard = SampleGuard::new(ValidationRange::default(), ViolationPolicy::Ignore, 3);
        let mut buffer = buffer_of(vec![vec![5.0; 100]]);

        assert_eq!(guard.inspect(&mut buffer), 100);
        assert_eq!(guard.report().violations().len(), 3);
        assert!(guard.report().is_truncated());
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "audio block validation failed")]
    fn test_guard_assert_panics_in_debug() {
        let mut guard = SampleGuard::new(ValidationRange::default(), ViolationPolicy::Assert, 1);
        let mut buffer = buffer_of(vec![vec![f32::INFINITY]]);
        guard.inspect(&mut buffer);
    }

    #[cfg(not(debug_assertions))]
    #[test]
    fn test_guard_assert_logs_in_release() {
        let mut guard = SampleGuard::new(ValidationRange::default(), ViolationPolicy::Assert, 1);
        let mut buffer = buffer_of(vec![vec![f32::INFINITY, 3.0]]);

        assert_eq!(guard.inspect(&mut buffer), 2);
        assert_eq!(buffer.get_sample(0, 0), Some(f32::INFINITY));
        assert_eq!(buffer.get_sample(0, 1), Some(3.0));
        assert_eq!(guard.report().count(ViolationKind::Infinite), 1);
    }

    #[test]
    fn test_guard_rejects_huge_report_limit() {
        let config = GuardConfig {
            max_reported: usize::MAX,
            ..GuardConfig::default()
        };
        assert!(matches!(
            SampleGuard::from_config(&config),
            Err(SampleGuardError::ReportLimit { .. })
        ));

        let guard = SampleGuard::new(ValidationRange::default(), ViolationPolicy::Log, usize::MAX);
        assert_eq!(guard.report().limit(), Some(ValidationReport::MAX_LIMIT));
    }

    #[test]
    fn test_guard_from_config() {
        let config = GuardConfig {
            min_value: -0.5,
            max_value: 0.5,
            policy: ViolationPolicy::Repair,
            max_reported: 4,
        };
        let guard = SampleGuard::from_config(&config).unwrap();
        assert_eq!(guard.range().max_value(), 0.5);
        assert_eq!(guard.policy(), ViolationPolicy::Repair);

        let inverted = GuardConfig {
            min_value: 1.0,
            max_value: 0.0,
            ..GuardConfig::default()
        };
        assert!(SampleGuard::from_config(&inverted).is_err());
    }
}
