//! Sample validation
//!
//! Scans an [`AudioBlock`] channel by channel and reports every sample that is
//! NaN, infinite, or outside a [`ValidationRange`]. Detection is separate from
//! response: these functions only observe, and the caller decides whether to
//! log, repair, or abort (see [`crate::validation::SampleGuard`]).
//!
//! `first_violation`, `for_each_violation`, `debug_validate`, and
//! `validate_into` with a limited report never allocate and are safe to call
//! from a real-time audio callback.

use std::ops::ControlFlow;

use num_traits::Float;

use crate::engine::AudioBlock;
use crate::validation::{ValidationRange, ValidationReport, Violation, ViolationKind};

/// Classify one sample, returning None if it is valid
#[inline]
pub fn classify_sample<T: Float>(value: T, range: &ValidationRange<T>) -> Option<ViolationKind> {
    if value.is_nan() {
        Some(ViolationKind::NotANumber)
    } else if value.is_infinite() {
        Some(ViolationKind::Infinite)
    } else if !range.contains(value) {
        Some(ViolationKind::OutOfRange)
    } else {
        None
    }
}

/// Validate every sample and collect the results
///
/// Allocates the violation list; use [`validate_into`] on the audio thread.
pub fn validate<T, C>(block: &AudioBlock<'_, T, C>, range: ValidationRange<T>) -> ValidationReport
where
    T: Float,
    C: AsRef<[T]>,
{
    let mut report = ValidationReport::new();
    validate_into(block, range, &mut report);
    report
}

/// Validate into a caller-owned report, clearing it first
pub fn validate_into<T, C>(
    block: &AudioBlock<'_, T, C>,
    range: ValidationRange<T>,
    report: &mut ValidationReport,
) where
    T: Float,
    C: AsRef<[T]>,
{
    report.clear();
    for_each_violation(block, range, |violation| report.record(violation));
    report.set_samples_checked(block.total_samples());
}

/// Invoke `on_violation` for each bad sample, channel-major then sample-minor
pub fn for_each_violation<T, C, F>(
    block: &AudioBlock<'_, T, C>,
    range: ValidationRange<T>,
    mut on_violation: F,
) where
    T: Float,
    C: AsRef<[T]>,
    F: FnMut(Violation),
{
    let _: ControlFlow<()> = scan(block, range, |violation| {
        on_violation(violation);
        ControlFlow::Continue(())
    });
}

/// Stop at the first bad sample
pub fn first_violation<T, C>(
    block: &AudioBlock<'_, T, C>,
    range: ValidationRange<T>,
) -> Option<Violation>
where
    T: Float,
    C: AsRef<[T]>,
{
    match scan(block, range, ControlFlow::Break) {
        ControlFlow::Break(violation) => Some(violation),
        ControlFlow::Continue(()) => None,
    }
}

/// Visit bad samples in scan order until `visit` breaks
fn scan<T, C, B>(
    block: &AudioBlock<'_, T, C>,
    range: ValidationRange<T>,
    mut visit: impl FnMut(Violation) -> ControlFlow<B>,
) -> ControlFlow<B>
where
    T: Float,
    C: AsRef<[T]>,
{
    for (channel, samples) in block.iter_channels().enumerate() {
        for (sample_index, &value) in samples.iter().enumerate() {
            if let Some(kind) = classify_sample(value, &range) {
                visit(Violation {
                    channel,
                    sample_index,
                    kind,
                    value: value.to_f64().unwrap_or(f64::NAN),
                })?;
            }
        }
    }
    ControlFlow::Continue(())
}

/// Development-time invariant check
///
/// Panics on the first bad sample when built with debug assertions. In
/// release builds the scan is compiled out and the call does nothing.
#[inline]
pub fn debug_validate<T, C>(block: &AudioBlock<'_, T, C>, range: ValidationRange<T>)
where
    T: Float,
    C: AsRef<[T]>,
{
    if cfg!(debug_assertions) {
        if let Some(violation) = first_violation(block, range) {
            panic!("audio block validation failed: {violation}");
        }
    }
}
