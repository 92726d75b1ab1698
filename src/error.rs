//! Error handling for Sampleguard
//!
//! Sample violations (NaN, Inf, out-of-range) are reported as data by the
//! validator, never through this type. These errors cover everything around it:
//! file I/O, malformed ranges and blocks, processor setup and state.

use thiserror::Error;

/// Result type alias for Sampleguard operations
pub type Result<T> = std::result::Result<T, SampleGuardError>;

/// Main error type for Sampleguard operations
#[derive(Error, Debug)]
pub enum SampleGuardError {
    // File Errors
    #[error("File not found: {path}")]
    FileNotFound {
        path: String,
        #[source]
        source: Option<std::io::Error>,
    },

    #[error("Invalid audio file: {reason}")]
    InvalidAudio {
        reason: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Unsupported audio format: {format}")]
    UnsupportedFormat { format: String },

    // Validation Setup Errors
    #[error("Invalid validation range: min {min} must not exceed max {max}, and neither may be NaN")]
    InvalidRange { min: f64, max: f64 },

    #[error("Report limit {requested} exceeds the maximum of {max}")]
    ReportLimit { requested: usize, max: usize },

    #[error("Ragged audio block: channel {channel} has {actual} samples, expected {expected}")]
    RaggedBlock {
        channel: usize,
        expected: usize,
        actual: usize,
    },

    // Processor Errors
    #[error("Unsupported bus layout: {input} input / {output} output channels")]
    UnsupportedLayout { input: usize, output: usize },

    #[error("Invalid process setup: {reason}")]
    InvalidSetup { reason: String },

    #[error("Invalid processor state: {reason}")]
    InvalidState { reason: String },

    // I/O Errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization Errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SampleGuardError {
    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            SampleGuardError::FileNotFound { .. } => "FILE_NOT_FOUND",
            SampleGuardError::InvalidAudio { .. } => "INVALID_AUDIO",
            SampleGuardError::UnsupportedFormat { .. } => "UNSUPPORTED_FORMAT",
            SampleGuardError::InvalidRange { .. } => "INVALID_RANGE",
            SampleGuardError::ReportLimit { .. } => "REPORT_LIMIT",
            SampleGuardError::RaggedBlock { .. } => "RAGGED_BLOCK",
            SampleGuardError::UnsupportedLayout { .. } => "UNSUPPORTED_LAYOUT",
            SampleGuardError::InvalidSetup { .. } => "INVALID_SETUP",
            SampleGuardError::InvalidState { .. } => "INVALID_STATE",
            SampleGuardError::Io(_) => "IO_ERROR",
            SampleGuardError::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }

    /// Get recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<&'static str> {
        match self {
            SampleGuardError::FileNotFound { .. } => vec![
                "Check the file path is correct",
                "Verify the file hasn't been moved or deleted",
            ],
            SampleGuardError::InvalidAudio { .. } => vec![
                "Check if the file plays in another application",
                "The file may be corrupted - try re-exporting from source",
            ],
            SampleGuardError::UnsupportedFormat { .. } => vec![
                "Convert to WAV format",
                "Supported sample formats: 8/16/24/32-bit integer, 32-bit float",
            ],
            SampleGuardError::InvalidRange { .. } => vec![
                "Make sure --min is less than or equal to --max",
                "Use the default range [-1.0, 1.0] for normalised audio",
            ],
            SampleGuardError::ReportLimit { .. } => vec![
                "Lower max_reported in the guard configuration",
                "Lower --limit; the totals are counted either way",
            ],
            SampleGuardError::UnsupportedLayout { .. } => vec![
                "Use a mono or stereo output bus",
                "Match the input channel count to the output",
            ],
            SampleGuardError::InvalidState { .. } => vec![
                "The saved state may come from an incompatible version",
                "Reset the processor to its default configuration",
            ],
            _ => vec![],
        }
    }
}
