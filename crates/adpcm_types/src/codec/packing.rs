//! Bit packing of code words into bytes.
//!
//! Codes fill a byte from the most significant end:
//! - 4-bit: code `2k` in bits 7:4, code `2k+1` in bits 3:0
//! - 2-bit: codes `4k..4k+3` in bits 7:6, 5:4, 3:2, 1:0
//!
//! Unused slots of a trailing byte are zero.

use super::state::Mode;
use crate::error::CodecError;

/// Bit offset of code `slot` within its byte
#[inline]
const fn code_shift(mode: Mode, slot: usize) -> u32 {
	let bits = mode.bits_per_code() as usize;
	(8 - bits * (slot + 1)) as u32
}

/// Mask covering one code word
#[inline]
pub(crate) const fn code_mask(mode: Mode) -> u8 {
	match mode {
		Mode::FourBit => 0x0F,
		Mode::TwoBit => 0x03,
	}
}

/// Reads the code at `slot` (0-based, most significant first) from `byte`
#[inline]
pub fn extract_code(mode: Mode, byte: u8, slot: usize) -> u8 {
	(byte >> code_shift(mode, slot)) & code_mask(mode)
}

/// Returns `byte` with `code` ORed into `slot`
#[inline]
pub fn insert_code(mode: Mode, byte: u8, slot: usize, code: u8) -> u8 {
	byte | ((code & code_mask(mode)) << code_shift(mode, slot))
}

/// Unpacks every code held by `bytes` into `codes`
///
/// Returns the number of codes written, `bytes.len() * codes_per_byte`.
pub fn unpack_codes(mode: Mode, bytes: &[u8], codes: &mut [u8]) -> Result<usize, CodecError> {
	let required = mode.code_capacity(bytes.len());
	if codes.len() < required {
		return Err(CodecError::BufferTooSmall {
			required,
			available: codes.len(),
		});
	}

	let per_byte = mode.codes_per_byte();
	for (byte, chunk) in bytes.iter().zip(codes.chunks_exact_mut(per_byte)) {
		for (slot, code) in chunk.iter_mut().enumerate() {
			*code = extract_code(mode, *byte, slot);
		}
	}

	Ok(required)
}

/// Packs `codes` into `bytes`, zero-filling the unused slots of the last byte
///
/// Bits above the code width are ignored. Returns the number of bytes written.
pub fn pack_codes(mode: Mode, codes: &[u8], bytes: &mut [u8]) -> Result<usize, CodecError> {
	let required = mode.encoded_len(codes.len());
	if bytes.len() < required {
		return Err(CodecError::BufferTooSmall {
			required,
			available: bytes.len(),
		});
	}

	for (chunk, byte) in codes.chunks(mode.codes_per_byte()).zip(bytes.iter_mut()) {
		*byte = chunk
			.iter()
			.enumerate()
			.fold(0u8, |acc, (slot, &code)| insert_code(mode, acc, slot, code));
	}

	Ok(required)
}
