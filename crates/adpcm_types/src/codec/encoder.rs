//! Encoder: 16-bit linear PCM to packed ADPCM codes.

use super::packing::insert_code;
use super::state::{Mode, State};
use super::tables::{IDX_2BIT, IDX_4BIT};
use crate::error::CodecError;

impl State {
	/// Quantizes one sample against the predictor and advances the state
	///
	/// Returns the code word in the low bits (4 or 2 bits wide depending on mode).
	#[inline]
	pub fn encode_sample(&mut self, sample: i16) -> u8 {
		match self.mode {
			Mode::FourBit => self.encode_4bit(sample),
			Mode::TwoBit => self.encode_2bit(sample),
		}
	}

	fn encode_4bit(&mut self, sample: i16) -> u8 {
		let mut step = self.step_size();

		let mut diff = sample as i32 - self.predictor as i32;
		let sign: u8 = if diff < 0 {
			8
		} else {
			0
		};
		diff = diff.abs();

		// Shift-only approximation of
		//   magnitude = diff * 4 / step
		//   vpdiff = (magnitude + 0.5) * step / 4
		// Bits dropped by the shifts are part of the IMA reference.
		let mut magnitude = 0u8;
		let mut vpdiff = step >> 3;

		if diff >= step {
			magnitude = 4;
			diff -= step;
			vpdiff += step;
		}
		step >>= 1;
		if diff >= step {
			magnitude |= 2;
			diff -= step;
			vpdiff += step;
		}
		step >>= 1;
		if diff >= step {
			magnitude |= 1;
			vpdiff += step;
		}

		self.apply_delta(sign != 0, vpdiff);

		let code = sign | magnitude;
		self.adapt_index(IDX_4BIT[code as usize]);
		code
	}

	fn encode_2bit(&mut self, sample: i16) -> u8 {
		let step = self.step_size();

		let mut diff = sample as i32 - self.predictor as i32;
		let sign: u8 = if diff < 0 {
			2
		} else {
			0
		};
		diff = diff.abs();

		// Strictly greater, unlike the 4-bit ladder.
		let mut magnitude = 0u8;
		let mut vpdiff = step >> 1;
		if diff > step {
			magnitude = 1;
			vpdiff += step;
		}

		self.apply_delta(sign != 0, vpdiff);

		let code = sign | magnitude;
		self.adapt_index(IDX_2BIT[code as usize]);
		code
	}
}

/// Encodes `pcm` into `out` and returns the number of bytes written
///
/// Writes `ceil(N / codes_per_byte)` bytes. A partial trailing byte is
/// emitted with its unused low slots set to zero, so the decoder must be
/// told the sample count out of band.
///
/// Fails with [`CodecError::BufferTooSmall`] before touching `state` if
/// `out` is too short.
pub fn encode(state: &mut State, pcm: &[i16], out: &mut [u8]) -> Result<usize, CodecError> {
	let required = state.mode.encoded_len(pcm.len());
	if out.len() < required {
		return Err(CodecError::BufferTooSmall {
			required,
			available: out.len(),
		});
	}

	encode_unchecked(state, pcm, &mut out[..required]);
	Ok(required)
}

/// Encodes `pcm` into a freshly allocated buffer
pub fn encode_to_vec(state: &mut State, pcm: &[i16]) -> Vec<u8> {
	let mut out = vec![0u8; state.mode.encoded_len(pcm.len())];
	encode_unchecked(state, pcm, &mut out);
	out
}

fn encode_unchecked(state: &mut State, pcm: &[i16], out: &mut [u8]) {
	let mode = state.mode;
	for (samples, byte) in pcm.chunks(mode.codes_per_byte()).zip(out.iter_mut()) {
		let mut packed = 0u8;
		for (slot, &sample) in samples.iter().enumerate() {
			packed = insert_code(mode, packed, slot, state.encode_sample(sample));
		}
		*byte = packed;
	}
}
