//! Amplitude bounds for sample validation

use num_traits::Float;

use crate::error::{Result, SampleGuardError};

/// Inclusive amplitude range `[min_value, max_value]`
///
/// Always satisfies `min_value <= max_value` with neither bound NaN.
/// Defaults to `[-1.0, 1.0]`, full scale for normalised audio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidationRange<T: Float> {
    min_value: T,
    max_value: T,
}

impl<T: Float> ValidationRange<T> {
    /// Create a range, rejecting inverted or NaN bounds
    ///
    /// Infinite bounds are accepted, so `new(-inf, inf)` checks only for
    /// NaN and Inf samples.
    pub fn new(min_value: T, max_value: T) -> Result<Self> {
        if min_value.is_nan() || max_value.is_nan() || min_value > max_value {
            return Err(SampleGuardError::InvalidRange {
                min: min_value.to_f64().unwrap_or(f64::NAN),
                max: max_value.to_f64().unwrap_or(f64::NAN),
            });
        }

        Ok(Self {
            min_value,
            max_value,
        })
    }

    /// Symmetric range `[-limit, limit]`
    pub fn symmetric(limit: T) -> Result<Self> {
        Self::new(-limit, limit)
    }

    #[inline]
    pub fn min_value(&self) -> T {
        self.min_value
    }

    #[inline]
    pub fn max_value(&self) -> T {
        self.max_value
    }

    /// True if `value` lies within the bounds. NaN is never contained.
    #[inline]
    pub fn contains(&self, value: T) -> bool {
        value >= self.min_value && value <= self.max_value
    }

    /// Clamp a non-NaN value into the range
    #[inline]
    pub fn clamp(&self, value: T) -> T {
        value.max(self.min_value).min(self.max_value)
    }
}

impl<T: Float> Default for ValidationRange<T> {
    fn default() -> Self {
        Self {
            min_value: -T::one(),
            max_value: T::one(),
        }
    }
}
