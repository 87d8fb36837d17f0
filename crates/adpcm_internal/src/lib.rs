//! This module is separated into its own crate so the facade can stay thin, and should not be used directly.

/// `use dvi_adpcm::prelude::*;` to import commonly used items.
pub mod prelude;

// Re-export adpcm_types for convenience
pub use adpcm_types;

// Re-export commonly used types at crate root
pub use adpcm_types::codec::{Mode, Snapshot, State};
pub use adpcm_types::error::{CodecError, FrameError, PcmError, StreamError, WavError};
pub use adpcm_types::pcm::SampleFormat;
pub use adpcm_types::stream::{StreamConfig, StreamStats};
