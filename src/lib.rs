#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! `dvi-adpcm` is a streaming 4-bit DVI/IMA and 2-bit ADPCM codec.
//!
//! The codec turns 16-bit linear PCM into a packed bitstream at 4:1
//! ([`Mode::FourBit`]) or 8:1 ([`Mode::TwoBit`]) and back, threading a
//! small caller-owned [`State`] through each call so audio can be pushed
//! through in chunks of any size.
//!
//! ```
//! use dvi_adpcm::prelude::*;
//!
//! let pcm = [0i16, 16384, 0, 0, 0, 0, 0, 0];
//! let mut enc = State::new(Mode::FourBit);
//! let packed = encode_to_vec(&mut enc, &pcm);
//!
//! let mut dec = State::new(Mode::FourBit);
//! let decoded = decode_to_vec(&mut dec, &packed);
//! assert_eq!(decoded[1], 11);
//! ```
pub use adpcm_internal::*;
