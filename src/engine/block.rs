//! Borrowed audio blocks
//!
//! An `AudioBlock` is a read-only view over `channels x samples` values, one
//! contiguous slice per channel. It never owns or copies sample data, so it can
//! be built inside a real-time callback from whatever storage the host hands
//! over: `&[&[f32]]`, `&[Vec<f64>]`, or an `AudioBuffer`.

use std::marker::PhantomData;

use num_traits::Float;

use crate::error::{Result, SampleGuardError};

/// Read-only view over equally sized channel slices
#[derive(Debug)]
pub struct AudioBlock<'a, T, C = &'a [T]>
where
    T: Float,
    C: AsRef<[T]>,
{
    channels: &'a [C],
    num_samples: usize,
    _sample: PhantomData<&'a [T]>,
}

// Only references are held, so copying never depends on `C: Copy`
impl<T, C> Clone for AudioBlock<'_, T, C>
where
    T: Float,
    C: AsRef<[T]>,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, C> Copy for AudioBlock<'_, T, C>
where
    T: Float,
    C: AsRef<[T]>,
{
}

impl<'a, T, C> AudioBlock<'a, T, C>
where
    T: Float,
    C: AsRef<[T]>,
{
    /// Wrap a set of channels
    ///
    /// Zero channels, or channels with zero samples, form a valid empty block.
    ///
    /// # Errors
    /// `RaggedBlock` if any channel's length differs from the first channel's.
    pub fn new(channels: &'a [C]) -> Result<Self> {
        let expected = channels.first().map(|ch| ch.as_ref().len()).unwrap_or(0);

        for (channel, data) in channels.iter().enumerate() {
            let actual = data.as_ref().len();
            if actual != expected {
                return Err(SampleGuardError::RaggedBlock {
                    channel,
                    expected,
                    actual,
                });
            }
        }

        Ok(Self::from_parts(channels, expected))
    }

    /// Caller guarantees every channel holds exactly `num_samples` values.
    pub(crate) fn from_parts(channels: &'a [C], num_samples: usize) -> Self {
        Self {
            channels,
            num_samples,
            _sample: PhantomData,
        }
    }

    #[inline]
    pub fn num_channels(&self) -> usize {
        self.channels.len()
    }

    /// Samples per channel
    #[inline]
    pub fn num_samples(&self) -> usize {
        self.num_samples
    }

    /// Total sample count across all channels
    #[inline]
    pub fn total_samples(&self) -> usize {
        self.num_channels() * self.num_samples
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.total_samples() == 0
    }

    /// Samples of one channel, or None if the index is out of bounds
    #[inline]
    pub fn channel(&self, index: usize) -> Option<&'a [T]> {
        self.channels.get(index).map(|ch| ch.as_ref())
    }

    /// Iterate channels in index order
    pub fn iter_channels(&self) -> impl Iterator<Item = &'a [T]> + 'a {
        self.channels.iter().map(|ch| ch.as_ref())
    }
}
