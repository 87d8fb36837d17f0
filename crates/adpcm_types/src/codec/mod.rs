//! Streaming ADPCM codec core.
//!
//! This module converts between 16-bit linear PCM samples and a packed
//! ADPCM bitstream in one of two variants:
//!
//! - **4-bit DVI/IMA ADPCM** ([`Mode::FourBit`]), 4:1 against 16-bit PCM
//! - **2-bit ADPCM** ([`Mode::TwoBit`]), 8:1, same predictor/step-index
//!   structure with a one-bit quantizer and its own step table
//!
//! A caller-owned [`State`] carries the predictor and step index between
//! calls, so a stream may be pushed through in chunks of any size. The codec
//! never allocates unless a `*_to_vec` convenience is used.
//!
//! # Bitstream Layout
//!
//! - 4-bit: byte `k` holds sample `2k` in bits 7:4 and sample `2k+1` in bits 3:0
//! - 2-bit: byte `k` holds samples `4k..4k+3` in bits 7:6, 5:4, 3:2, 1:0
//!
//! A trailing partial byte is zero-padded in both modes. The number of
//! samples is not recoverable from the bytes alone; decoders take it as an
//! argument.
//!
//! # Examples
//!
//! ```
//! use adpcm_types::codec::{self, Mode, State};
//!
//! let pcm = [0i16, 1200, 2400, 1800, 600, -400, -1500, -900];
//!
//! let mut enc = State::new(Mode::FourBit);
//! let mut packed = [0u8; 4];
//! let written = codec::encode(&mut enc, &pcm, &mut packed)?;
//! assert_eq!(written, 4);
//!
//! let mut dec = State::new(Mode::FourBit);
//! let mut decoded = [0i16; 8];
//! codec::decode(&mut dec, &packed, pcm.len(), &mut decoded)?;
//!
//! // Both sides end on the same predictor trajectory
//! assert_eq!(enc.snapshot(), dec.snapshot());
//! # Ok::<(), adpcm_types::error::CodecError>(())
//! ```

mod decoder;
mod encoder;
mod packing;
mod state;

/// Step-size and index-adaptation tables
pub mod tables;

pub use self::decoder::{decode, decode_to_vec};
pub use self::encoder::{encode, encode_to_vec};
pub use self::packing::{extract_code, insert_code, pack_codes, unpack_codes};
pub use self::state::{Mode, Snapshot, State};
