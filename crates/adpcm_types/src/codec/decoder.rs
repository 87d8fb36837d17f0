//! Decoder: packed ADPCM codes to 16-bit linear PCM.

use super::packing::{code_mask, extract_code};
use super::state::{Mode, State};
use super::tables::{IDX_2BIT, IDX_4BIT};
use crate::error::CodecError;

impl State {
	/// Reconstructs one sample from a code word and advances the state
	///
	/// Bits above the mode's code width are ignored. The returned sample is
	/// the new predictor.
	#[inline]
	pub fn decode_code(&mut self, code: u8) -> i16 {
		let code = code & code_mask(self.mode);
		match self.mode {
			Mode::FourBit => self.decode_4bit(code),
			Mode::TwoBit => self.decode_2bit(code),
		}
	}

	fn decode_4bit(&mut self, code: u8) -> i16 {
		// vpdiff uses the step from before the index moves
		let step = self.step_size();
		self.adapt_index(IDX_4BIT[code as usize]);

		let sign = code & 8;
		let magnitude = code & 7;

		let mut vpdiff = step >> 3;
		if magnitude & 4 != 0 {
			vpdiff += step;
		}
		if magnitude & 2 != 0 {
			vpdiff += step >> 1;
		}
		if magnitude & 1 != 0 {
			vpdiff += step >> 2;
		}

		self.apply_delta(sign != 0, vpdiff);
		self.predictor
	}

	fn decode_2bit(&mut self, code: u8) -> i16 {
		let step = self.step_size();
		self.adapt_index(IDX_2BIT[code as usize]);

		let sign = code & 2;
		let mut vpdiff = step >> 1;
		if code & 1 != 0 {
			vpdiff += step;
		}

		self.apply_delta(sign != 0, vpdiff);
		self.predictor
	}
}

/// Decodes the first `code_count` codes of `input` into `out`
///
/// Codes are read most significant slot first. Returns the number of
/// samples written, which is always `code_count`.
///
/// Fails before touching `state` with
/// - [`CodecError::CodeCountExceedsInput`] if `input` holds fewer than `code_count` codes
/// - [`CodecError::BufferTooSmall`] if `out` is shorter than `code_count`
pub fn decode(
	state: &mut State,
	input: &[u8],
	code_count: usize,
	out: &mut [i16],
) -> Result<usize, CodecError> {
	let capacity = state.mode.code_capacity(input.len());
	if code_count > capacity {
		return Err(CodecError::CodeCountExceedsInput {
			codes: code_count,
			capacity,
		});
	}
	if out.len() < code_count {
		return Err(CodecError::BufferTooSmall {
			required: code_count,
			available: out.len(),
		});
	}

	decode_unchecked(state, input, &mut out[..code_count]);
	Ok(code_count)
}

/// Decodes every code held by `input`
///
/// Convenience for streams whose sample count is a whole number of bytes,
/// i.e. `M = 2 * bytes` in 4-bit mode or `M = 4 * bytes` in 2-bit mode.
pub fn decode_to_vec(state: &mut State, input: &[u8]) -> Vec<i16> {
	let mut out = vec![0i16; state.mode.code_capacity(input.len())];
	decode_unchecked(state, input, &mut out);
	out
}

fn decode_unchecked(state: &mut State, input: &[u8], out: &mut [i16]) {
	let mode = state.mode;
	for (samples, &byte) in out.chunks_mut(mode.codes_per_byte()).zip(input) {
		for (slot, sample) in samples.iter_mut().enumerate() {
			*sample = state.decode_code(extract_code(mode, byte, slot));
		}
	}
}
