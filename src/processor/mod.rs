//! Audio Processors
//!
//! Host-facing processing interface. Processors implement `AudioProcessor`
//! and are driven through prepare, process, and release by the host.

mod passthrough;
mod plugin;

pub use passthrough::PassThrough;
pub use plugin::{AudioProcessor, BusLayout, ProcessSetup};
