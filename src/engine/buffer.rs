//! Audio Buffer Management
//!
//! Provides the owned audio buffer type used by the processor and the CLI.
//! Samples are stored non-interleaved as 32-bit floats, one `Vec` per channel.

use crate::engine::block::AudioBlock;
use crate::error::{Result, SampleGuardError};
use crate::validation::{repair_samples, ValidationRange};

// ============================================================================
// Constants
// ============================================================================

/// Sample rate assigned to buffers created without one (48kHz)
pub const DEFAULT_SAMPLE_RATE: u32 = 48000;

// ============================================================================
// Helper Functions
// ============================================================================

/// Convert linear amplitude to decibels
///
/// # Returns
/// Value in decibels. Returns -f32::INFINITY for zero input.
#[inline]
pub fn linear_to_db(linear: f32) -> f32 {
    if linear <= 0.0 {
        f32::NEG_INFINITY
    } else {
        20.0 * linear.log10()
    }
}

/// Calculate the peak level of an audio buffer in dB
///
/// Non-finite samples are skipped so a single NaN cannot hide the real peak.
///
/// # Returns
/// Peak level in dB. Returns -f32::INFINITY for empty or silent buffers.
pub fn calculate_peak(buffer: &AudioBuffer) -> f32 {
    let peak = buffer
        .samples
        .iter()
        .flat_map(|channel| channel.iter())
        .filter(|s| s.is_finite())
        .map(|&s| s.abs())
        .fold(0.0_f32, f32::max);

    linear_to_db(peak)
}

// ============================================================================
// Channel Layout
// ============================================================================

/// Audio channel configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ChannelLayout {
    /// Single channel (mono)
    Mono,
    /// Two channels (stereo: left, right)
    #[default]
    Stereo,
}

impl ChannelLayout {
    /// Returns the number of channels for this layout
    pub fn num_channels(&self) -> usize {
        match self {
            ChannelLayout::Mono => 1,
            ChannelLayout::Stereo => 2,
        }
    }
}

// ============================================================================
// Audio Buffer
// ============================================================================

/// Owned multi-channel audio buffer
///
/// Every channel holds the same number of samples. Channel slices can be
/// mutated in place but never resized, so the invariant holds for the
/// lifetime of the buffer.
///
/// # Example
/// ```
/// use sampleguard::engine::{AudioBuffer, ChannelLayout, DEFAULT_SAMPLE_RATE};
///
/// let buffer = AudioBuffer::new(DEFAULT_SAMPLE_RATE as usize, ChannelLayout::Stereo);
/// assert_eq!(buffer.channels(), 2);
/// assert_eq!(buffer.len(), 48000);
/// ```
#[derive(Debug, Clone)]
pub struct AudioBuffer {
    samples: Vec<Vec<f32>>,
    /// Sample rate in Hz
    pub sample_rate: u32,
}

impl AudioBuffer {
    /// Create a new zeroed buffer with the given number of samples per channel
    pub fn new(num_samples: usize, layout: ChannelLayout) -> Self {
        Self::with_channels(layout.num_channels(), num_samples)
    }

    /// Create a new zeroed buffer with an arbitrary channel count
    pub fn with_channels(num_channels: usize, num_samples: usize) -> Self {
        Self {
            samples: vec![vec![0.0_f32; num_samples]; num_channels],
            sample_rate: DEFAULT_SAMPLE_RATE,
        }
    }

    /// Build a buffer from per-channel sample vectors
    ///
    /// # Errors
    /// `RaggedBlock` if the channels differ in length.
    pub fn from_channels(samples: Vec<Vec<f32>>, sample_rate: u32) -> Result<Self> {
        let expected = samples.first().map(Vec::len).unwrap_or(0);
        if let Some((channel, ch)) = samples
            .iter()
            .enumerate()
            .find(|(_, ch)| ch.len() != expected)
        {
            return Err(SampleGuardError::RaggedBlock {
                channel,
                expected,
                actual: ch.len(),
            });
        }

        Ok(Self {
            samples,
            sample_rate,
        })
    }

    /// Create an audio buffer from interleaved sample data
    ///
    /// # Arguments
    /// * `interleaved` - Interleaved sample data (L, R, L, R, ... for stereo)
    /// * `num_channels` - Number of interleaved channels
    /// * `sample_rate` - Sample rate in Hz
    pub fn from_interleaved(
        interleaved: &[f32],
        num_channels: usize,
        sample_rate: u32,
    ) -> Result<Self> {
        if num_channels == 0 {
            return Err(SampleGuardError::InvalidAudio {
                reason: "Interleaved data must have at least one channel".to_string(),
                source: None,
            });
        }

        if interleaved.len() % num_channels != 0 {
            return Err(SampleGuardError::InvalidAudio {
                reason: format!(
                    "Interleaved data length {} is not divisible by channel count {}",
                    interleaved.len(),
                    num_channels
                ),
                source: None,
            });
        }

        let num_samples = interleaved.len() / num_channels;
        let mut samples = vec![Vec::with_capacity(num_samples); num_channels];

        for frame in interleaved.chunks_exact(num_channels) {
            for (ch, &sample) in frame.iter().enumerate() {
                samples[ch].push(sample);
            }
        }

        Ok(Self {
            samples,
            sample_rate,
        })
    }

    /// Convert the buffer to interleaved format
    pub fn to_interleaved(&self) -> Vec<f32> {
        let num_channels = self.channels();
        let num_samples = self.len();

        let mut interleaved = Vec::with_capacity(num_channels * num_samples);
        for sample_idx in 0..num_samples {
            for channel in &self.samples {
                interleaved.push(channel[sample_idx]);
            }
        }

        interleaved
    }

    /// Get the number of channels
    #[inline]
    pub fn channels(&self) -> usize {
        self.samples.len()
    }

    /// Alias for channels() - returns the number of channels
    #[inline]
    pub fn num_channels(&self) -> usize {
        self.channels()
    }

    /// Get the number of samples per channel
    #[inline]
    pub fn len(&self) -> usize {
        self.samples.first().map(|ch| ch.len()).unwrap_or(0)
    }

    /// Check if the buffer is empty (no samples)
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Alias for len() - returns the number of samples per channel
    #[inline]
    pub fn num_samples(&self) -> usize {
        self.len()
    }

    /// Get the duration in seconds
    #[inline]
    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.len() as f64 / self.sample_rate as f64
    }

    /// Get immutable access to a channel's samples
    ///
    /// # Panics
    /// Panics if the channel index is out of bounds
    #[inline]
    pub fn channel(&self, index: usize) -> &[f32] {
        &self.samples[index]
    }

    /// Get mutable access to a channel's samples
    ///
    /// # Panics
    /// Panics if the channel index is out of bounds
    #[inline]
    pub fn channel_mut(&mut self, index: usize) -> &mut [f32] {
        &mut self.samples[index]
    }

    /// Get a sample at the specified channel and index
    #[inline]
    pub fn get_sample(&self, channel: usize, index: usize) -> Option<f32> {
        self.samples
            .get(channel)
            .and_then(|ch| ch.get(index).copied())
    }

    /// Set a sample at the specified channel and index
    ///
    /// # Returns
    /// true if the sample was set, false if indices are out of bounds
    #[inline]
    pub fn set_sample(&mut self, channel: usize, index: usize, value: f32) -> bool {
        if let Some(sample) = self
            .samples
            .get_mut(channel)
            .and_then(|ch| ch.get_mut(index))
        {
            *sample = value;
            return true;
        }
        false
    }

    /// Zero every sample of one channel. Out-of-range indices are ignored.
    pub fn clear_channel(&mut self, index: usize) {
        if let Some(channel) = self.samples.get_mut(index) {
            channel.fill(0.0);
        }
    }

    /// Borrow the buffer as a read-only block for validation
    pub fn as_block(&self) -> AudioBlock<'_, f32, Vec<f32>> {
        AudioBlock::from_parts(&self.samples, self.len())
    }

    /// Check if all samples are finite (not NaN or Infinity)
    pub fn is_finite(&self) -> bool {
        self.samples
            .iter()
            .flat_map(|ch| ch.iter())
            .all(|s| s.is_finite())
    }

    /// Replace NaN/Inf with silence and clamp everything into `range`
    ///
    /// # Returns
    /// The number of samples that changed.
    pub fn repair(&mut self, range: ValidationRange<f32>) -> usize {
        self.samples
            .iter_mut()
            .map(|channel| repair_samples(channel, range))
            .sum()
    }
}

// ============================================================================
// Tests
// ============================================================================
