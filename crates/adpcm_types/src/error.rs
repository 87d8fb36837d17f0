//! Error types for the codec and the layers built around it.

use thiserror::Error;

use crate::codec::Mode;

/// Errors returned by the ADPCM encoder and decoder
///
/// Every error is reported before the codec state is touched, so the caller
/// can fix the buffers and retry with the same state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
	/// The output buffer cannot hold the codes or samples the call would produce
	#[error("Output buffer too small: need {required} elements, got {available}")]
	BufferTooSmall {
		/// Number of elements the call needs to write
		required: usize,
		/// Number of elements the caller provided
		available: usize,
	},

	/// Unrecognised mode tag
	#[error("Invalid mode tag: {0} (expected 4 or 2)")]
	InvalidMode(u8),

	/// Unrecognised mode name
	#[error("Invalid mode name: {0:?} (expected \"four-bit\" or \"two-bit\")")]
	InvalidModeName(String),

	/// The packed input does not contain as many codes as requested
	#[error("Code count {codes} exceeds the {capacity} codes held by the input")]
	CodeCountExceedsInput {
		/// Number of codes requested
		codes: usize,
		/// Number of codes the input bytes can hold
		capacity: usize,
	},
}

impl CodecError {
	/// Returns `true` for errors caused by an inconsistent mode or input length,
	/// as opposed to a lack of output capacity.
	pub fn is_invalid_config(&self) -> bool {
		!matches!(self, Self::BufferTooSmall { .. })
	}
}

/// Errors that can occur when reading or writing state-prefixed packets
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrameError {
	/// Not enough data to hold the state header
	#[error("Insufficient data: expected at least {expected} bytes, got {actual} bytes")]
	InsufficientData {
		/// Expected number of bytes
		expected: usize,
		/// Actual number of bytes
		actual: usize,
	},

	/// Codec error while processing the payload
	#[error(transparent)]
	Codec(#[from] CodecError),
}

/// Errors that can occur when converting between PCM byte formats and 16-bit samples
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PcmError {
	/// Output buffer too small for the converted data
	#[error("Output buffer too small: need {required} elements, got {available}")]
	BufferTooSmall {
		/// Number of elements required
		required: usize,
		/// Number of elements available
		available: usize,
	},

	/// Input length is not a whole number of samples
	#[error("{len} bytes is not a whole number of {bytes_per_sample}-byte samples")]
	TrailingBytes {
		/// Input length in bytes
		len: usize,
		/// Size of one sample in bytes
		bytes_per_sample: usize,
	},

	/// Unrecognised sample format name
	#[error("Unknown sample format: {0:?}")]
	UnknownFormat(String),
}

/// Errors that can occur when reading or writing WAV containers
#[derive(Debug, Error)]
pub enum WavError {
	/// Only 16-bit integer mono WAV files are handled
	#[error(
		"Unsupported WAV layout: {channels} channel(s), {bits_per_sample}-bit {format} (expected 16-bit integer mono)"
	)]
	Unsupported {
		/// Number of channels in the file
		channels: u16,
		/// Bits per sample in the file
		bits_per_sample: u16,
		/// Sample format name
		format: &'static str,
	},

	/// Error from the WAV reader or writer
	#[error(transparent)]
	Hound(#[from] hound::Error),
}

/// Errors that can occur while pumping a byte stream through the codec
#[derive(Debug, Error)]
pub enum StreamError {
	/// IO error
	#[error(transparent)]
	IOError(#[from] std::io::Error),

	/// Codec error
	#[error(transparent)]
	Codec(#[from] CodecError),

	/// Packet framing error
	#[error(transparent)]
	Frame(#[from] FrameError),

	/// PCM conversion error
	#[error(transparent)]
	Pcm(#[from] PcmError),

	/// A previous call on the same stream failed part-way
	#[error("Stream stopped after an earlier error")]
	Stopped,

	/// Codec state resumed into a stream configured for the other mode
	#[error("State is in {state} mode but the stream is configured for {config} mode")]
	ModeMismatch {
		/// Mode of the stream configuration
		config: Mode,
		/// Mode of the supplied codec state
		state: Mode,
	},

	/// Packet size unusable for the configured mode
	#[error(
		"Invalid chunk size {chunk_samples}: must be non-zero and, when framed, a multiple of {codes_per_byte}"
	)]
	InvalidChunkSize {
		/// Requested samples per chunk
		chunk_samples: usize,
		/// Codes packed into one byte in the configured mode
		codes_per_byte: usize,
	},
}
