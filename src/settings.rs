//! Layered settings for the command-line filter.
//!
//! Sources, lowest priority first:
//! 1. built-in defaults
//! 2. an optional TOML file (`--config`)
//! 3. `DVI_ADPCM_*` environment variables (e.g. `DVI_ADPCM_MODE=two-bit`)
//! 4. explicit command-line flags

use std::path::Path;

use config::{Config, Environment, File};
use dvi_adpcm::prelude::{Mode, PCM_BUF, SampleFormat, StreamConfig};
use serde::{Deserialize, Serialize};

/// Default sample rate for WAV output
pub const DEFAULT_SAMPLE_RATE: u32 = 8000;

/// Resolved filter settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
	/// Bitstream variant
	pub mode: Mode,
	/// Byte layout of raw PCM input/output
	pub format: SampleFormat,
	/// Prefix each packet with the encoder state
	pub framed: bool,
	/// Samples per packet
	pub chunk_samples: usize,
	/// Sample rate written to WAV output
	pub sample_rate: u32,
}

impl Default for Settings {
	fn default() -> Self {
		let stream = StreamConfig::default();
		Self {
			mode: stream.mode,
			format: stream.format,
			framed: stream.framed,
			chunk_samples: stream.chunk_samples,
			sample_rate: DEFAULT_SAMPLE_RATE,
		}
	}
}

impl Settings {
	/// Loads defaults, then the optional file, then the environment
	pub fn load(file: Option<&Path>) -> Result<Self, config::ConfigError> {
		let mut builder = Config::builder()
			.set_default("mode", Mode::default().to_string())?
			.set_default("format", SampleFormat::default().to_string())?
			.set_default("framed", false)?
			.set_default("chunk_samples", PCM_BUF as u64)?
			.set_default("sample_rate", DEFAULT_SAMPLE_RATE as u64)?;

		if let Some(path) = file {
			builder = builder.add_source(File::from(path).required(true));
		}

		builder
			.add_source(Environment::with_prefix("DVI_ADPCM").try_parsing(true))
			.build()?
			.try_deserialize()
	}

	/// Codec-facing part of the settings
	pub fn stream_config(&self) -> StreamConfig {
		StreamConfig {
			mode: self.mode,
			format: self.format,
			framed: self.framed,
			chunk_samples: self.chunk_samples,
		}
	}
}
