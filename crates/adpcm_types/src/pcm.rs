//! PCM byte formats on the linear side of the codec.
//!
//! The codec itself only sees `i16` samples. This module converts the raw
//! byte streams a caller reads or writes into those samples:
//!
//! - [`SampleFormat::S16Le`]: signed 16-bit little-endian
//! - [`SampleFormat::S8`]: signed 8-bit, scaled by 256
//! - [`SampleFormat::MuLaw`]: ITU-T G.711 µ-law

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PcmError;

const ULAW_BIAS: i32 = 0x84;
const ULAW_CLIP: i32 = 32635;

/// Byte layout of linear-side audio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SampleFormat {
	/// Signed 16-bit little-endian
	#[default]
	S16Le,
	/// Signed 8-bit
	S8,
	/// G.711 µ-law, one byte per sample
	#[serde(alias = "ulaw", alias = "pcmu")]
	MuLaw,
}

impl SampleFormat {
	/// Size of one sample in bytes
	pub const fn bytes_per_sample(self) -> usize {
		match self {
			Self::S16Le => 2,
			Self::S8 | Self::MuLaw => 1,
		}
	}

	/// Converts raw bytes into 16-bit samples, returning the number written
	pub fn read_samples(self, bytes: &[u8], out: &mut [i16]) -> Result<usize, PcmError> {
		let width = self.bytes_per_sample();
		if bytes.len() % width != 0 {
			return Err(PcmError::TrailingBytes {
				len: bytes.len(),
				bytes_per_sample: width,
			});
		}

		let count = bytes.len() / width;
		if out.len() < count {
			return Err(PcmError::BufferTooSmall {
				required: count,
				available: out.len(),
			});
		}

		for (raw, sample) in bytes.chunks_exact(width).zip(out.iter_mut()) {
			*sample = match self {
				Self::S16Le => i16::from_le_bytes([raw[0], raw[1]]),
				Self::S8 => s8_to_linear(raw[0] as i8),
				Self::MuLaw => ulaw_to_linear(raw[0]),
			};
		}

		Ok(count)
	}

	/// Converts 16-bit samples into raw bytes, returning the number of bytes written
	pub fn write_samples(self, samples: &[i16], out: &mut [u8]) -> Result<usize, PcmError> {
		let width = self.bytes_per_sample();
		let required = samples.len() * width;
		if out.len() < required {
			return Err(PcmError::BufferTooSmall {
				required,
				available: out.len(),
			});
		}

		for (&sample, raw) in samples.iter().zip(out.chunks_exact_mut(width)) {
			match self {
				Self::S16Le => raw.copy_from_slice(&sample.to_le_bytes()),
				Self::S8 => raw[0] = linear_to_s8(sample) as u8,
				Self::MuLaw => raw[0] = linear_to_ulaw(sample),
			}
		}

		Ok(required)
	}
}

impl Display for SampleFormat {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::S16Le => write!(f, "s16le"),
			Self::S8 => write!(f, "s8"),
			Self::MuLaw => write!(f, "mulaw"),
		}
	}
}

impl FromStr for SampleFormat {
	type Err = PcmError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_ascii_lowercase().as_str() {
			"s16le" | "s16" | "l16" => Ok(Self::S16Le),
			"s8" | "8" => Ok(Self::S8),
			"mulaw" | "ulaw" | "pcmu" => Ok(Self::MuLaw),
			_ => Err(PcmError::UnknownFormat(s.to_string())),
		}
	}
}

/// Widens a signed 8-bit sample to 16 bits
#[inline]
pub fn s8_to_linear(sample: i8) -> i16 {
	(sample as i16) << 8
}

/// Narrows a 16-bit sample to signed 8 bits, discarding the low byte
#[inline]
pub fn linear_to_s8(sample: i16) -> i8 {
	(sample >> 8) as i8
}

/// Compands a 16-bit linear sample to G.711 µ-law
pub fn linear_to_ulaw(sample: i16) -> u8 {
	let mut magnitude = sample as i32;
	let sign = if magnitude < 0 {
		magnitude = -magnitude;
		0x80
	} else {
		0x00
	};

	let magnitude = magnitude.min(ULAW_CLIP) + ULAW_BIAS;

	// Segment is the position of the highest set bit above bit 7
	let exponent = (15 - (magnitude as u16).leading_zeros() as i32 - 7).max(0);
	let mantissa = (magnitude >> (exponent + 3)) & 0x0F;

	!(sign | (exponent << 4) as u8 | mantissa as u8)
}

/// Expands a G.711 µ-law byte to a 16-bit linear sample
pub fn ulaw_to_linear(code: u8) -> i16 {
	let code = !code;
	let exponent = ((code >> 4) & 0x07) as i32;
	let mantissa = (code & 0x0F) as i32;

	let magnitude = (((mantissa << 3) + ULAW_BIAS) << exponent) - ULAW_BIAS;
	if code & 0x80 != 0 {
		-magnitude as i16
	} else {
		magnitude as i16
	}
}
