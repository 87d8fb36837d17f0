//! This crate provides the ADPCM codec core and the layers built around it.
//!
//! # Modules
//!
//! - **codec**: 4-bit DVI/IMA and 2-bit ADPCM encoder and decoder over caller-owned state
//! - **frame**: Packets prefixed with a 3-byte state header
//! - **pcm**: Linear PCM byte formats (16-bit, 8-bit, µ-law)
//! - **stream**: Chunked byte-stream pump implementing `std::io::Write`
//! - **wav**: 16-bit mono WAV container support
//!
//! # Examples
//!
//! Using the prelude (recommended):
//!
//! ```
//! use adpcm_types::prelude::*;
//!
//! let mut state = State::new(Mode::FourBit);
//! let packed = encode_to_vec(&mut state, &[0, 0, 0, 0]);
//! assert_eq!(packed, [0x00, 0x00]);
//! ```
//!
//! Or use explicit paths:
//!
//! ```
//! use adpcm_types::codec::{Mode, State, decode_to_vec};
//!
//! let mut state = State::new(Mode::TwoBit);
//! let pcm = decode_to_vec(&mut state, &[0x55]);
//! assert_eq!(pcm.len(), 4);
//! ```

pub mod codec;
pub mod error;
pub mod frame;
pub mod pcm;
pub mod stream;
pub mod wav;

/// `use adpcm_types::prelude::*;` to import commonly used items.
pub mod prelude;
