//! Prelude module for `adpcm_types`.
//!
//! This module provides a convenient way to import commonly used types, traits, and constants.
//!
//! # Examples
//!
//! ```
//! use adpcm_types::prelude::*;
//!
//! let mut enc = State::new(Mode::TwoBit);
//! let mut dec = State::new(Mode::TwoBit);
//! let packed = encode_to_vec(&mut enc, &[100, -100, 2000, -2000]);
//! let pcm = decode_to_vec(&mut dec, &packed);
//! assert_eq!(enc.snapshot(), dec.snapshot());
//! assert_eq!(pcm.len(), 4);
//! ```

// Codec core
#[doc(inline)]
pub use crate::codec::{Mode, Snapshot, State, decode, decode_to_vec, encode, encode_to_vec};

// Errors
#[doc(inline)]
pub use crate::error::{CodecError, FrameError, PcmError, StreamError, WavError};

// Framing
#[doc(inline)]
pub use crate::frame::{STATE_HEADER_SIZE, decode_packet, encode_packet};

// PCM formats and streaming
#[doc(inline)]
pub use crate::pcm::SampleFormat;

#[doc(inline)]
pub use crate::stream::{
	PCM_BUF, StreamConfig, StreamDecoder, StreamEncoder, StreamStats, decode_stream,
	encode_stream,
};

#[doc(inline)]
pub use crate::wav::{WavInfo, read_wav_mono, write_wav_mono};

// Re-export the codec module for advanced usage
#[doc(inline)]
pub use crate::codec;
