//! State-prefixed ADPCM packets.
//!
//! A packet starts with the encoder state captured before its payload was
//! encoded, so a receiver can decode it without having seen earlier packets.
//!
//! # Packet Layout
//!
//! | Offset | Size | Field                                  |
//! |--------|------|----------------------------------------|
//! | 0      | 2    | predictor, signed 16-bit big-endian    |
//! | 2      | 1    | step index                             |
//! | 3      | ...  | packed ADPCM codes                     |
//!
//! The mode is not on the wire; both ends agree on it out of band.

use log::debug;

use crate::codec::{self, Snapshot, State};
use crate::error::{CodecError, FrameError};

/// Size of the state header in bytes
pub const STATE_HEADER_SIZE: usize = 3;

impl Snapshot {
	/// Serialises the snapshot as a 3-byte state header
	pub fn to_bytes(&self) -> [u8; STATE_HEADER_SIZE] {
		let [hi, lo] = self.predictor.to_be_bytes();
		[hi, lo, self.step_index]
	}

	/// Parses a state header from the start of `bytes`
	pub fn from_bytes(bytes: &[u8]) -> Result<Self, FrameError> {
		let Some(header) = bytes.get(..STATE_HEADER_SIZE) else {
			return Err(FrameError::InsufficientData {
				expected: STATE_HEADER_SIZE,
				actual: bytes.len(),
			});
		};

		Ok(Self {
			predictor: i16::from_be_bytes([header[0], header[1]]),
			step_index: header[2],
		})
	}
}

/// Size of a packet carrying `samples` samples in `state`'s mode
pub fn packet_len(state: &State, samples: usize) -> usize {
	STATE_HEADER_SIZE + state.mode().encoded_len(samples)
}

/// Number of codes carried by a packet of `packet_len` bytes
pub fn packet_code_capacity(state: &State, packet_len: usize) -> usize {
	state.mode().code_capacity(packet_len.saturating_sub(STATE_HEADER_SIZE))
}

/// Writes the current state followed by the encoded `pcm` into `out`
///
/// Returns the number of bytes written. Nothing is written and `state` is
/// left untouched if `out` is too small.
pub fn encode_packet(state: &mut State, pcm: &[i16], out: &mut [u8]) -> Result<usize, FrameError> {
	let required = packet_len(state, pcm.len());
	if out.len() < required {
		return Err(CodecError::BufferTooSmall {
			required,
			available: out.len(),
		}
		.into());
	}

	let header = state.snapshot();
	out[..STATE_HEADER_SIZE].copy_from_slice(&header.to_bytes());
	let written = codec::encode(state, pcm, &mut out[STATE_HEADER_SIZE..])?;

	debug!(
		"Encoded packet: predictor {}, step index {}, {} samples -> {} bytes",
		header.predictor,
		header.step_index,
		pcm.len(),
		STATE_HEADER_SIZE + written
	);

	Ok(STATE_HEADER_SIZE + written)
}

/// Restores `state` from the packet header and decodes its payload into `out`
///
/// `code_count` of `None` decodes every code in the payload. Returns the
/// number of samples written.
pub fn decode_packet(
	state: &mut State,
	packet: &[u8],
	code_count: Option<usize>,
	out: &mut [i16],
) -> Result<usize, FrameError> {
	let header = Snapshot::from_bytes(packet)?;
	let payload = &packet[STATE_HEADER_SIZE..];
	let code_count = code_count.unwrap_or_else(|| state.mode().code_capacity(payload.len()));

	// Validate against a scratch copy so a failed call leaves `state` as it was
	let mut next = *state;
	next.restore_snapshot(header);
	let decoded = codec::decode(&mut next, payload, code_count, out)?;
	*state = next;

	debug!(
		"Decoded packet: predictor {}, step index {}, {} bytes -> {} samples",
		header.predictor,
		header.step_index,
		packet.len(),
		decoded
	);

	Ok(decoded)
}
