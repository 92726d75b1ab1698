//! Audio Engine Module
//!
//! Audio data containers and file I/O:
//! - Owned audio buffers
//! - Borrowed, read-only audio blocks
//! - WAV import and export

pub mod block;
pub mod buffer;
pub mod io;

pub use block::AudioBlock;
pub use buffer::{AudioBuffer, ChannelLayout, DEFAULT_SAMPLE_RATE};
pub use io::{export_audio, generate_test_tone, import_audio, ExportFormat};
