//! Sampleguard - Audio Buffer Validation
//!
//! Detects audio data corruption and runaway amplitude before it reaches
//! downstream processing or output hardware.
//!
//! # Architecture
//!
//! - `validation`: the sample scan (NaN, Inf, out-of-range) and response policies
//! - `engine`: owned buffers, borrowed blocks, WAV I/O
//! - `processor`: host-facing processor interface and a validating pass-through
//! - `config`: JSON guard configuration
//! - `cli`: the `sampleguard` command-line tool

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod processor;
pub mod validation;

pub use config::GuardConfig;
pub use engine::{AudioBlock, AudioBuffer};
pub use error::{Result, SampleGuardError};
pub use validation::{validate, ValidationRange, ValidationReport, Violation, ViolationKind};
