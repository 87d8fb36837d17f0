//! Prelude module for `adpcm_internal`.
//!
//! This module provides a convenient way to import commonly used types and traits.
//!
//! # Examples
//!
//! ```rust
//! use adpcm_internal::prelude::*;
//!
//! let mut state = State::new(Mode::FourBit);
//! let mut packed = [0u8; 2];
//! encode(&mut state, &[120, 240, 360], &mut packed).unwrap();
//!
//! let header = state.snapshot().to_bytes();
//! assert_eq!(header.len(), STATE_HEADER_SIZE);
//! ```

// Re-export everything from adpcm_types::prelude
#[doc(inline)]
pub use adpcm_types::prelude::*;

// Re-export the entire adpcm_types module for advanced usage
#[doc(inline)]
pub use adpcm_types;
