//! Pass-through processor
//!
//! Leaves audio untouched apart from silencing output channels that have no
//! matching input, then runs a `SampleGuard` over the block so corrupt audio is
//! caught before it reaches the host.

use log::{debug, info};

use crate::config::GuardConfig;
use crate::engine::AudioBuffer;
use crate::error::{Result, SampleGuardError};
use crate::processor::{AudioProcessor, BusLayout, ProcessSetup};
use crate::validation::{SampleGuard, ValidationReport};

const NAME: &str = "Pass Through";

/// Processor that forwards audio and validates every block
#[derive(Debug, Clone)]
pub struct PassThrough {
    config: GuardConfig,
    guard: SampleGuard,
    setup: Option<ProcessSetup>,
}

impl PassThrough {
    /// Create a processor with the default guard configuration
    pub fn new() -> Self {
        Self {
            config: GuardConfig::default(),
            guard: SampleGuard::default(),
            setup: None,
        }
    }

    /// Create a processor with a custom guard configuration
    pub fn with_config(config: GuardConfig) -> Result<Self> {
        let guard = SampleGuard::from_config(&config)?;
        Ok(Self {
            config,
            guard,
            setup: None,
        })
    }

    pub fn config(&self) -> &GuardConfig {
        &self.config
    }

    /// Active setup, or None when not prepared
    pub fn setup(&self) -> Option<&ProcessSetup> {
        self.setup.as_ref()
    }

    pub fn is_prepared(&self) -> bool {
        self.setup.is_some()
    }

    /// Validation report for the most recent block
    pub fn last_report(&self) -> &ValidationReport {
        self.guard.report()
    }
}

impl Default for PassThrough {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioProcessor for PassThrough {
    fn name(&self) -> &str {
        NAME
    }

    /// Mono or stereo output, with the input matching the output
    fn supports_layout(&self, layout: BusLayout) -> bool {
        matches!(layout.output_channels, 1 | 2) && layout.input_channels == layout.output_channels
    }

    fn prepare(&mut self, setup: ProcessSetup) -> Result<()> {
        if !self.supports_layout(setup.layout) {
            return Err(SampleGuardError::UnsupportedLayout {
                input: setup.layout.input_channels,
                output: setup.layout.output_channels,
            });
        }
        if !(setup.sample_rate.is_finite() && setup.sample_rate > 0.0) {
            return Err(SampleGuardError::InvalidSetup {
                reason: format!("sample rate must be positive, got {}", setup.sample_rate),
            });
        }
        if setup.max_block_size == 0 {
            return Err(SampleGuardError::InvalidSetup {
                reason: "maximum block size must be non-zero".to_string(),
            });
        }

        info!(
            "Preparing {}: {} Hz, {} samples, {} ch",
            NAME, setup.sample_rate, setup.max_block_size, setup.layout.output_channels
        );
        self.setup = Some(setup);
        Ok(())
    }

    fn process(&mut self, buffer: &mut AudioBuffer) {
        let Some(setup) = self.setup else {
            return;
        };

        for channel in setup.layout.input_channels..buffer.num_channels() {
            buffer.clear_channel(channel);
        }

        self.guard.inspect(buffer);
    }

    fn release_resources(&mut self) {
        debug!("Releasing {}", NAME);
        self.setup = None;
    }

    fn get_state(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(&self.config)?)
    }

    fn set_state(&mut self, data: &[u8]) -> Result<()> {
        let config: GuardConfig =
            serde_json::from_slice(data).map_err(|e| SampleGuardError::InvalidState {
                reason: e.to_string(),
            })?;
        self.guard = SampleGuard::from_config(&config)?;
        self.config = config;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{ViolationKind, ViolationPolicy};
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    fn stereo_setup() -> ProcessSetup {
        ProcessSetup::new(48000.0, 512, BusLayout::stereo())
    }

    #[test_case(BusLayout::mono(), true ; "mono")]
    #[test_case(BusLayout::stereo(), true ; "stereo")]
    #[test_case(BusLayout::new(1, 2), false ; "mono to stereo")]
    #[test_case(BusLayout::new(6, 6), false ; "surround")]
    #[test_case(BusLayout::new(0, 0), false ; "disabled")]
    fn test_supports_layout(layout: BusLayout, expected: bool) {
        assert_eq!(PassThrough::new().supports_layout(layout), expected);
    }

    #[test]
    fn test_prepare_rejects_bad_setup() {
        let mut processor = PassThrough::new();

        let surround = ProcessSetup::new(48000.0, 512, BusLayout::new(6, 6));
        assert!(matches!(
            processor.prepare(surround),
            Err(SampleGuardError::UnsupportedLayout { input: 6, output: 6 })
        ));

        let zero_rate = ProcessSetup::new(0.0, 512, BusLayout::stereo());
        assert!(matches!(
            processor.prepare(zero_rate),
            Err(SampleGuardError::InvalidSetup { .. })
        ));

        let zero_block = ProcessSetup::new(44100.0, 0, BusLayout::stereo());
        assert!(processor.prepare(zero_block).is_err());
        assert!(!processor.is_prepared());
    }

    #[test]
    fn test_process_passes_audio_through() {
        let mut processor = PassThrough::new();
        processor.prepare(stereo_setup()).unwrap();

        let original =
            AudioBuffer::from_channels(vec![vec![0.1, -0.2, 0.3], vec![1.0, -1.0, 0.0]], 48000)
                .unwrap();
        let mut buffer = original.clone();
        processor.process(&mut buffer);

        assert_eq!(buffer.to_interleaved(), original.to_interleaved());
        assert!(processor.last_report().is_valid());
    }

    #[test]
    fn test_process_clears_unmatched_channels() {
        let mut processor = PassThrough::new();
        processor
            .prepare(ProcessSetup::new(48000.0, 64, BusLayout::mono()))
            .unwrap();

        let mut buffer =
            AudioBuffer::from_channels(vec![vec![0.5; 4], vec![0.7; 4]], 48000).unwrap();
        processor.process(&mut buffer);

        assert_eq!(buffer.channel(0), &[0.5; 4]);
        assert_eq!(buffer.channel(1), &[0.0; 4]);
    }

    #[test]
    fn test_process_before_prepare_is_noop() {
        let mut processor = PassThrough::new();
        let mut buffer = AudioBuffer::from_channels(vec![vec![5.0]], 48000).unwrap();
        processor.process(&mut buffer);

        assert_eq!(buffer.get_sample(0, 0), Some(5.0));
        assert_eq!(processor.last_report().samples_checked(), 0);
    }

    #[test]
    fn test_process_reports_violations() {
        let config = GuardConfig {
            policy: ViolationPolicy::Ignore,
            ..GuardConfig::default()
        };
        let mut processor = PassThrough::with_config(config).unwrap();
        processor.prepare(stereo_setup()).unwrap();

        let mut buffer =
            AudioBuffer::from_channels(vec![vec![f32::NAN, 0.0], vec![0.0, 1.5]], 48000).unwrap();
        processor.process(&mut buffer);

        let report = processor.last_report();
        assert_eq!(report.count(ViolationKind::NotANumber), 1);
        assert_eq!(report.count(ViolationKind::OutOfRange), 1);
    }

    #[test]
    fn test_process_repairs_with_repair_policy() {
        let config = GuardConfig {
            policy: ViolationPolicy::Repair,
            ..GuardConfig::default()
        };
        let mut processor = PassThrough::with_config(config).unwrap();
        processor.prepare(stereo_setup()).unwrap();

        let mut buffer =
            AudioBuffer::from_channels(vec![vec![f32::INFINITY], vec![-4.0]], 48000).unwrap();
        processor.process(&mut buffer);

        assert_eq!(buffer.to_interleaved(), vec![0.0, -1.0]);
    }

    #[test]
    fn test_release_resources() {
        let mut processor = PassThrough::new();
        processor.prepare(stereo_setup()).unwrap();
        assert_eq!(processor.setup(), Some(&stereo_setup()));

        processor.release_resources();
        assert!(!processor.is_prepared());
    }

    #[test]
    fn test_state_round_trip() {
        let config = GuardConfig {
            min_value: -0.5,
            max_value: 0.5,
            policy: ViolationPolicy::Repair,
            max_reported: 16,
        };
        let source = PassThrough::with_config(config.clone()).unwrap();
        let state = source.get_state().unwrap();

        let mut restored = PassThrough::new();
        restored.set_state(&state).unwrap();
        assert_eq!(restored.config(), &config);
    }

    #[test]
    fn test_set_state_rejects_garbage() {
        let mut processor = PassThrough::new();

        let result = processor.set_state(b"\x00\x01binary");
        assert!(matches!(result, Err(SampleGuardError::InvalidState { .. })));

        let inverted = br#"{ "min_value": 0.5, "max_value": -0.5 }"#;
        assert!(matches!(
            processor.set_state(inverted),
            Err(SampleGuardError::InvalidRange { .. })
        ));
        assert_eq!(processor.config(), &GuardConfig::default());
    }

    #[test]
    fn test_set_state_rejects_huge_report_limit() {
        let mut processor = PassThrough::new();

        let result = processor.set_state(br#"{ "max_reported": 18446744073709551615 }"#);
        assert!(matches!(result, Err(SampleGuardError::ReportLimit { .. })));
        assert_eq!(processor.config(), &GuardConfig::default());
    }

    #[test]
    fn test_processor_metadata() {
        let processor: Box<dyn AudioProcessor> = Box::new(PassThrough::new());
        assert_eq!(processor.name(), "Pass Through");
        assert!(!processor.accepts_midi());
        assert!(!processor.produces_midi());
        assert_eq!(processor.tail_length_secs(), 0.0);
    }
}
