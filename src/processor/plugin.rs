//! Host-facing processor interface
//!
//! The host drives a processor through an explicit capability set: negotiate a
//! bus layout, prepare, process blocks, release, and save/restore opaque state.

use crate::engine::AudioBuffer;
use crate::error::Result;

/// Input/output channel counts offered by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BusLayout {
    pub input_channels: usize,
    pub output_channels: usize,
}

impl BusLayout {
    pub fn new(input_channels: usize, output_channels: usize) -> Self {
        Self {
            input_channels,
            output_channels,
        }
    }

    pub fn mono() -> Self {
        Self::new(1, 1)
    }

    pub fn stereo() -> Self {
        Self::new(2, 2)
    }
}

/// Everything a processor needs to know before the first block
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProcessSetup {
    pub sample_rate: f64,
    pub max_block_size: usize,
    pub layout: BusLayout,
}

impl ProcessSetup {
    pub fn new(sample_rate: f64, max_block_size: usize, layout: BusLayout) -> Self {
        Self {
            sample_rate,
            max_block_size,
            layout,
        }
    }
}

/// Base trait for audio processors driven by a host
///
/// `process` runs on the real-time thread and must not allocate, lock, or
/// block. Every other method runs on the host's main thread.
pub trait AudioProcessor: Send {
    /// Display name reported to the host
    fn name(&self) -> &str;

    /// Whether the processor can run with this layout
    fn supports_layout(&self, layout: BusLayout) -> bool;

    /// Called before processing starts or when the setup changes
    fn prepare(&mut self, setup: ProcessSetup) -> Result<()>;

    /// Process one block in place
    fn process(&mut self, buffer: &mut AudioBuffer);

    /// Free anything allocated in `prepare`
    fn release_resources(&mut self);

    /// Serialise the processor's state
    fn get_state(&self) -> Result<Vec<u8>>;

    /// Restore state produced by `get_state`
    fn set_state(&mut self, data: &[u8]) -> Result<()>;

    fn accepts_midi(&self) -> bool {
        false
    }

    fn produces_midi(&self) -> bool {
        false
    }

    /// Seconds of output produced after input stops
    fn tail_length_secs(&self) -> f64 {
        0.0
    }
}
