//! Per-stream codec state and bitstream mode selection.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use log::warn;
use serde::{Deserialize, Serialize};

use super::tables::{STEP_2BIT, STEP_4BIT};
use crate::error::CodecError;

/// Bitstream variant of an ADPCM stream
///
/// The mode is agreed out of band and never changes within a stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
	/// 4-bit DVI/IMA ADPCM, two codes per byte
	#[default]
	FourBit,
	/// 2-bit ADPCM (G.726-16 style), four codes per byte
	TwoBit,
}

impl Mode {
	/// Converts a code width in bits (4 or 2) to a `Mode`
	pub fn from_u8(value: u8) -> Result<Self, CodecError> {
		match value {
			4 => Ok(Self::FourBit),
			2 => Ok(Self::TwoBit),
			_ => Err(CodecError::InvalidMode(value)),
		}
	}

	/// Converts `Mode` to its code width in bits
	pub fn to_u8(self) -> u8 {
		self.bits_per_code()
	}

	/// Width of one code word in bits
	pub const fn bits_per_code(self) -> u8 {
		match self {
			Self::FourBit => 4,
			Self::TwoBit => 2,
		}
	}

	/// Number of code words packed into one byte
	pub const fn codes_per_byte(self) -> usize {
		match self {
			Self::FourBit => 2,
			Self::TwoBit => 4,
		}
	}

	/// Largest valid step index for this mode
	pub const fn max_step_index(self) -> u8 {
		match self {
			Self::FourBit => 88,
			Self::TwoBit => 10,
		}
	}

	/// Number of bytes produced by encoding `samples` samples in one call
	pub const fn encoded_len(self, samples: usize) -> usize {
		samples.div_ceil(self.codes_per_byte())
	}

	/// Number of codes held by `bytes` packed bytes
	pub const fn code_capacity(self, bytes: usize) -> usize {
		bytes * self.codes_per_byte()
	}

	pub(crate) fn step_size(self, step_index: u8) -> i32 {
		match self {
			Self::FourBit => STEP_4BIT[step_index as usize],
			Self::TwoBit => STEP_2BIT[step_index as usize],
		}
	}
}

impl Display for Mode {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::FourBit => write!(f, "four-bit"),
			Self::TwoBit => write!(f, "two-bit"),
		}
	}
}

impl FromStr for Mode {
	type Err = CodecError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_ascii_lowercase().as_str() {
			"four-bit" | "4bit" | "4" | "dvi" | "ima" => Ok(Self::FourBit),
			"two-bit" | "2bit" | "2" | "g726-16" => Ok(Self::TwoBit),
			_ => Err(CodecError::InvalidModeName(s.to_string())),
		}
	}
}

/// Predictor and step index captured from a [`State`]
///
/// Framing layers serialise this alongside compressed data; see
/// [`crate::frame`] for the 3-byte wire layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Snapshot {
	/// Running reconstructed sample value
	pub predictor: i16,
	/// Index into the active step table
	pub step_index: u8,
}

/// Codec state threaded through every encode or decode call of one stream
///
/// The caller owns the state; concurrent streams need distinct states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct State {
	pub(crate) predictor: i16,
	pub(crate) step_index: u8,
	pub(crate) mode: Mode,
}

impl State {
	/// Creates a state with `predictor = 0` and `step_index = 0`
	pub const fn new(mode: Mode) -> Self {
		Self {
			predictor: 0,
			step_index: 0,
			mode,
		}
	}

	/// Resets the state for a new stream in `mode`
	pub fn init(&mut self, mode: Mode) {
		*self = Self::new(mode);
	}

	/// Bitstream variant this state was initialised for
	pub fn mode(&self) -> Mode {
		self.mode
	}

	/// Current predictor value
	pub fn predictor(&self) -> i16 {
		self.predictor
	}

	/// Current step index
	pub fn step_index(&self) -> u8 {
		self.step_index
	}

	/// Current quantizer step size
	pub fn step_size(&self) -> i32 {
		self.mode.step_size(self.step_index)
	}

	/// Captures the predictor and step index
	pub fn snapshot(&self) -> Snapshot {
		Snapshot {
			predictor: self.predictor,
			step_index: self.step_index,
		}
	}

	/// Overwrites the predictor and step index, keeping the mode
	///
	/// A step index beyond the mode's table is clamped to the last entry.
	pub fn restore(&mut self, predictor: i16, step_index: u8) {
		let max = self.mode.max_step_index();
		if step_index > max {
			warn!("Step index {} out of range for {} mode, clamping to {}", step_index, self.mode, max);
		}
		self.predictor = predictor;
		self.step_index = step_index.min(max);
	}

	/// Restores a previously captured [`Snapshot`]
	pub fn restore_snapshot(&mut self, snapshot: Snapshot) {
		self.restore(snapshot.predictor, snapshot.step_index);
	}

	/// Adds a predictor delta and saturates to the 16-bit range
	#[inline]
	pub(crate) fn apply_delta(&mut self, negative: bool, vpdiff: i32) {
		let predictor = self.predictor as i32;
		let predictor = if negative {
			predictor - vpdiff
		} else {
			predictor + vpdiff
		};
		self.predictor = predictor.clamp(i16::MIN as i32, i16::MAX as i32) as i16;
	}

	/// Moves the step index by `delta` and clamps it to the mode's table
	#[inline]
	pub(crate) fn adapt_index(&mut self, delta: i8) {
		let max = self.mode.max_step_index() as i32;
		self.step_index = (self.step_index as i32 + delta as i32).clamp(0, max) as u8;
	}
}

impl Default for State {
	fn default() -> Self {
		Self::new(Mode::default())
	}
}

impl Display for State {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(
			f,
			"State:\n\
			- Mode: {}\n\
			- Predictor: {}\n\
			- Step Index: {} (step {})",
			self.mode,
			self.predictor,
			self.step_index,
			self.step_size()
		)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_new_state() {
		let state = State::new(Mode::TwoBit);
		assert_eq!(state.predictor(), 0);
		assert_eq!(state.step_index(), 0);
		assert_eq!(state.mode(), Mode::TwoBit);
		assert_eq!(state.step_size(), 256);
	}

	#[test]
	fn test_init_resets() {
		let mut state = State::new(Mode::FourBit);
		state.restore(1234, 40);
		state.init(Mode::TwoBit);
		assert_eq!(state, State::new(Mode::TwoBit));
	}

	#[test_log::test]
	fn test_restore_clamps_step_index() {
		let mut state = State::new(Mode::TwoBit);
		state.restore(-500, 60);
		assert_eq!(state.snapshot(), Snapshot {
			predictor: -500,
			step_index: 10
		});

		let mut state = State::new(Mode::FourBit);
		state.restore_snapshot(Snapshot {
			predictor: 7,
			step_index: 200,
		});
		assert_eq!(state.step_index(), 88);
		assert_eq!(state.step_size(), 32767);
	}

	#[test]
	fn test_mode_conversions() {
		assert_eq!(Mode::from_u8(4).unwrap(), Mode::FourBit);
		assert_eq!(Mode::from_u8(2).unwrap(), Mode::TwoBit);
		assert_eq!(Mode::from_u8(3), Err(CodecError::InvalidMode(3)));
		assert_eq!(Mode::TwoBit.to_u8(), 2);

		assert_eq!("four-bit".parse::<Mode>().unwrap(), Mode::FourBit);
		assert_eq!("2".parse::<Mode>().unwrap(), Mode::TwoBit);
		assert!("eight-bit".parse::<Mode>().is_err());
		assert_eq!(Mode::TwoBit.to_string(), "two-bit");
	}

	#[test]
	fn test_mode_packing_arithmetic() {
		assert_eq!(Mode::FourBit.encoded_len(7), 4);
		assert_eq!(Mode::FourBit.encoded_len(8), 4);
		assert_eq!(Mode::TwoBit.encoded_len(5), 2);
		assert_eq!(Mode::TwoBit.encoded_len(0), 0);
		assert_eq!(Mode::FourBit.code_capacity(3), 6);
		assert_eq!(Mode::TwoBit.code_capacity(3), 12);
	}

	#[test]
	fn test_apply_delta_saturates() {
		let mut state = State::new(Mode::FourBit);
		state.restore(32000, 0);
		state.apply_delta(false, 60000);
		assert_eq!(state.predictor(), i16::MAX);
		state.apply_delta(true, 65534);
		assert_eq!(state.predictor(), -32767);
		state.apply_delta(true, 2);
		assert_eq!(state.predictor(), i16::MIN);
		state.apply_delta(true, 40000);
		assert_eq!(state.predictor(), i16::MIN);

		state.restore(i16::MAX, 0);
		state.apply_delta(true, 65536);
		assert_eq!(state.predictor(), i16::MIN);
	}

	#[test]
	fn test_adapt_index_clamps() {
		let mut state = State::new(Mode::FourBit);
		state.adapt_index(-1);
		assert_eq!(state.step_index(), 0);
		state.restore(0, 85);
		state.adapt_index(8);
		assert_eq!(state.step_index(), 88);
	}
}
