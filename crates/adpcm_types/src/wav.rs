//! WAV container support for the linear side of the codec.

use std::io::{Read, Seek, Write};

use crate::error::WavError;

/// Properties of a mono 16-bit WAV stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WavInfo {
	/// Sample rate in Hz
	pub sample_rate: u32,
	/// Number of samples
	pub sample_count: u32,
}

impl WavInfo {
	/// Calculates the duration in milliseconds
	pub fn duration_ms(&self) -> u64 {
		if self.sample_rate == 0 {
			return 0;
		}
		(self.sample_count as u64 * 1000) / self.sample_rate as u64
	}
}

/// Reads a 16-bit integer mono WAV stream
pub fn read_wav_mono<R: Read>(reader: R) -> Result<(WavInfo, Vec<i16>), WavError> {
	let mut wav_reader = hound::WavReader::new(reader)?;
	let spec = wav_reader.spec();

	if spec.channels != 1
		|| spec.bits_per_sample != 16
		|| spec.sample_format != hound::SampleFormat::Int
	{
		return Err(WavError::Unsupported {
			channels: spec.channels,
			bits_per_sample: spec.bits_per_sample,
			format: match spec.sample_format {
				hound::SampleFormat::Int => "integer",
				hound::SampleFormat::Float => "float",
			},
		});
	}

	let samples = wav_reader.samples::<i16>().collect::<Result<Vec<_>, _>>()?;
	let info = WavInfo {
		sample_rate: spec.sample_rate,
		sample_count: samples.len() as u32,
	};

	Ok((info, samples))
}

/// Writes `samples` as a 16-bit integer mono WAV stream
pub fn write_wav_mono<W: Write + Seek>(
	writer: W,
	sample_rate: u32,
	samples: &[i16],
) -> Result<(), WavError> {
	let spec = hound::WavSpec {
		channels: 1,
		sample_rate,
		bits_per_sample: 16,
		sample_format: hound::SampleFormat::Int,
	};

	let mut wav_writer = hound::WavWriter::new(writer, spec)?;

	for &sample in samples {
		wav_writer.write_sample(sample)?;
	}

	wav_writer.finalize()?;

	Ok(())
}
