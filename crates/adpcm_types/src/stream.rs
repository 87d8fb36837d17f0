//! Byte-stream pump around the codec.
//!
//! [`StreamEncoder`] takes raw PCM bytes in any chunking and writes packed
//! ADPCM to a sink; [`StreamDecoder`] does the reverse. Both implement
//! [`Write`], so `std::io::copy` can drive them from any reader.
//!
//! Without framing the output does not depend on how the input was split.
//! With framing every `chunk_samples` samples become one packet prefixed by
//! the encoder state (see [`crate::frame`]).
//!
//! A failed call may already have consumed part of its input and written
//! part of its output, so after any error the pump is stopped and every
//! later call returns [`StreamError::Stopped`].
//!
//! # Examples
//!
//! ```
//! use adpcm_types::codec::Mode;
//! use adpcm_types::stream::{StreamConfig, StreamDecoder, StreamEncoder};
//!
//! # fn main() -> Result<(), adpcm_types::error::StreamError> {
//! let config = StreamConfig {
//!     mode: Mode::TwoBit,
//!     ..StreamConfig::default()
//! };
//!
//! let pcm: Vec<u8> = (0..64i16).flat_map(|i| (i * 300).to_le_bytes()).collect();
//!
//! let mut encoder = StreamEncoder::new(Vec::new(), config)?;
//! encoder.push(&pcm[..33])?;
//! encoder.push(&pcm[33..])?;
//! let (adpcm, stats) = encoder.finish()?;
//! assert_eq!(stats.samples, 64);
//! assert_eq!(adpcm.len(), 16);
//!
//! let mut decoder = StreamDecoder::new(Vec::new(), config)?;
//! decoder.push(&adpcm)?;
//! let (decoded, _) = decoder.finish()?;
//! assert_eq!(decoded.len(), pcm.len());
//! # Ok(())
//! # }
//! ```

use std::io::{self, Read, Write};

use log::trace;
use serde::{Deserialize, Serialize};

use crate::codec::{self, Mode, State};
use crate::error::{FrameError, PcmError, StreamError};
use crate::frame::{self, STATE_HEADER_SIZE};
use crate::pcm::SampleFormat;

/// Default number of samples per chunk or packet
pub const PCM_BUF: usize = 1024;

/// Settings shared by both ends of a stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamConfig {
	/// Bitstream variant
	pub mode: Mode,
	/// Byte layout of the PCM side
	pub format: SampleFormat,
	/// Prefix every packet with the encoder state
	pub framed: bool,
	/// Samples per packet when framed
	pub chunk_samples: usize,
}

impl Default for StreamConfig {
	fn default() -> Self {
		Self {
			mode: Mode::default(),
			format: SampleFormat::default(),
			framed: false,
			chunk_samples: PCM_BUF,
		}
	}
}

impl StreamConfig {
	/// Checks that framed packets hold a whole number of packed bytes
	pub fn validate(&self) -> Result<(), StreamError> {
		let per_byte = self.mode.codes_per_byte();
		if self.chunk_samples == 0 || (self.framed && self.chunk_samples % per_byte != 0) {
			return Err(StreamError::InvalidChunkSize {
				chunk_samples: self.chunk_samples,
				codes_per_byte: per_byte,
			});
		}
		Ok(())
	}

	/// Size in bytes of one full packet when framed
	pub fn packet_len(&self) -> usize {
		STATE_HEADER_SIZE + self.mode.encoded_len(self.chunk_samples)
	}
}

/// Running totals for one direction of a stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct StreamStats {
	/// PCM samples consumed or produced
	pub samples: u64,
	/// ADPCM bytes produced or consumed, headers included
	pub bytes: u64,
	/// Packets processed when framed
	pub packets: u64,
}

/// Writes `samples` to `writer` in `format`, reusing `raw` as scratch
fn write_pcm<W: Write>(
	writer: &mut W,
	format: SampleFormat,
	samples: &[i16],
	raw: &mut Vec<u8>,
) -> Result<(), StreamError> {
	raw.resize(samples.len() * format.bytes_per_sample(), 0);
	format.write_samples(samples, raw)?;
	writer.write_all(raw)?;
	Ok(())
}

/// PCM bytes in, ADPCM bytes out
#[derive(Debug)]
pub struct StreamEncoder<W: Write> {
	writer: W,
	state: State,
	config: StreamConfig,
	/// Bytes of a sample split across pushes
	carry: Vec<u8>,
	/// Samples not yet forming a whole byte or packet
	pending: Vec<i16>,
	packed: Vec<u8>,
	stats: StreamStats,
	stopped: bool,
}

impl<W: Write> StreamEncoder<W> {
	/// Creates an encoder starting from the initial codec state
	pub fn new(writer: W, config: StreamConfig) -> Result<Self, StreamError> {
		Self::with_state(writer, config, State::new(config.mode))
	}

	/// Creates an encoder continuing from `state`
	///
	/// Fails with [`StreamError::ModeMismatch`] if `state` belongs to the
	/// other mode.
	pub fn with_state(
		writer: W,
		config: StreamConfig,
		state: State,
	) -> Result<Self, StreamError> {
		config.validate()?;
		if state.mode() != config.mode {
			return Err(StreamError::ModeMismatch {
				config: config.mode,
				state: state.mode(),
			});
		}

		Ok(Self {
			writer,
			state,
			config,
			carry: Vec::with_capacity(2),
			pending: Vec::with_capacity(config.chunk_samples),
			packed: Vec::with_capacity(config.packet_len()),
			stats: StreamStats::default(),
			stopped: false,
		})
	}

	/// Current codec state
	pub fn state(&self) -> &State {
		&self.state
	}

	/// Totals so far
	pub fn stats(&self) -> StreamStats {
		self.stats
	}

	/// Runs `step`, stopping the encoder if it fails
	fn guarded(
		&mut self,
		step: impl FnOnce(&mut Self) -> Result<(), StreamError>,
	) -> Result<(), StreamError> {
		if self.stopped {
			return Err(StreamError::Stopped);
		}
		let result = step(self);
		self.stopped = result.is_err();
		result
	}

	/// Feeds raw PCM bytes in the configured sample format
	pub fn push(&mut self, bytes: &[u8]) -> Result<(), StreamError> {
		self.guarded(|encoder| encoder.push_bytes(bytes))
	}

	fn push_bytes(&mut self, bytes: &[u8]) -> Result<(), StreamError> {
		let format = self.config.format;
		let width = format.bytes_per_sample();
		let mut input = bytes;

		if !self.carry.is_empty() {
			let take = (width - self.carry.len()).min(input.len());
			self.carry.extend_from_slice(&input[..take]);
			input = &input[take..];
			if self.carry.len() < width {
				return Ok(());
			}

			let mut sample = [0i16; 1];
			format.read_samples(&self.carry, &mut sample)?;
			self.pending.push(sample[0]);
			self.carry.clear();
		}

		let whole = input.len() / width * width;
		let start = self.pending.len();
		self.pending.resize(start + whole / width, 0);
		format.read_samples(&input[..whole], &mut self.pending[start..])?;
		self.carry.extend_from_slice(&input[whole..]);

		self.drain(false)
	}

	/// Feeds already decoded 16-bit samples
	pub fn push_samples(&mut self, samples: &[i16]) -> Result<(), StreamError> {
		self.guarded(|encoder| {
			encoder.pending.extend_from_slice(samples);
			encoder.drain(false)
		})
	}

	/// Encodes everything that forms a whole output unit, or everything if `finish`
	fn drain(&mut self, finish: bool) -> Result<(), StreamError> {
		let group = if self.config.framed {
			self.config.chunk_samples
		} else {
			self.config.mode.codes_per_byte()
		};
		let ready = if finish {
			self.pending.len()
		} else {
			self.pending.len() / group * group
		};
		if ready == 0 {
			return Ok(());
		}

		if self.config.framed {
			for chunk in self.pending[..ready].chunks(group) {
				self.packed.resize(frame::packet_len(&self.state, chunk.len()), 0);
				let written = frame::encode_packet(&mut self.state, chunk, &mut self.packed)?;
				self.writer.write_all(&self.packed[..written])?;
				self.stats.bytes += written as u64;
				self.stats.packets += 1;
			}
		} else {
			self.packed.resize(self.config.mode.encoded_len(ready), 0);
			let written = codec::encode(&mut self.state, &self.pending[..ready], &mut self.packed)?;
			self.writer.write_all(&self.packed[..written])?;
			self.stats.bytes += written as u64;
		}

		trace!(
			"Encoded {} samples, predictor {}, step index {}",
			ready,
			self.state.predictor(),
			self.state.step_index()
		);

		self.stats.samples += ready as u64;
		self.pending.drain(..ready);
		Ok(())
	}

	/// Encodes every buffered sample now, zero-padding a partial byte
	///
	/// Samples pushed afterwards start a new byte, or a new packet when framed.
	pub fn flush_pending(&mut self) -> Result<(), StreamError> {
		self.guarded(|encoder| encoder.drain(true))
	}

	/// Flushes the tail and returns the sink with the final totals
	///
	/// A trailing partial byte is zero-padded. Fails if the input ended in
	/// the middle of a sample.
	pub fn finish(mut self) -> Result<(W, StreamStats), StreamError> {
		if self.stopped {
			return Err(StreamError::Stopped);
		}
		if !self.carry.is_empty() {
			return Err(PcmError::TrailingBytes {
				len: self.carry.len(),
				bytes_per_sample: self.config.format.bytes_per_sample(),
			}
			.into());
		}

		self.flush_pending()?;
		self.writer.flush()?;
		Ok((self.writer, self.stats))
	}
}

/// An `Err` from `write` stops the encoder; see the module docs.
impl<W: Write> Write for StreamEncoder<W> {
	fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
		self.push(buf).map_err(io::Error::other)?;
		Ok(buf.len())
	}

	fn flush(&mut self) -> io::Result<()> {
		self.writer.flush()
	}
}

/// ADPCM bytes in, PCM bytes out
#[derive(Debug)]
pub struct StreamDecoder<W: Write> {
	writer: W,
	state: State,
	config: StreamConfig,
	/// Bytes of a packet split across pushes
	pending: Vec<u8>,
	samples: Vec<i16>,
	raw: Vec<u8>,
	stats: StreamStats,
	stopped: bool,
}

impl<W: Write> StreamDecoder<W> {
	/// Creates a decoder starting from the initial codec state
	pub fn new(writer: W, config: StreamConfig) -> Result<Self, StreamError> {
		config.validate()?;

		Ok(Self {
			writer,
			state: State::new(config.mode),
			config,
			pending: Vec::with_capacity(config.packet_len()),
			samples: Vec::with_capacity(config.chunk_samples),
			raw: Vec::new(),
			stats: StreamStats::default(),
			stopped: false,
		})
	}

	/// Current codec state
	pub fn state(&self) -> &State {
		&self.state
	}

	/// Totals so far
	pub fn stats(&self) -> StreamStats {
		self.stats
	}

	/// Feeds packed ADPCM bytes
	///
	/// Unframed input decodes every code of every byte.
	pub fn push(&mut self, bytes: &[u8]) -> Result<(), StreamError> {
		if self.stopped {
			return Err(StreamError::Stopped);
		}
		let result = self.push_bytes(bytes);
		self.stopped = result.is_err();
		result
	}

	fn push_bytes(&mut self, bytes: &[u8]) -> Result<(), StreamError> {
		if self.config.framed {
			self.pending.extend_from_slice(bytes);
			let packet_len = self.config.packet_len();
			let whole = self.pending.len() / packet_len * packet_len;
			for index in (0..whole).step_by(packet_len) {
				self.decode_packet(index, packet_len)?;
			}
			self.pending.drain(..whole);
			return Ok(());
		}

		let mode = self.config.mode;
		for block in bytes.chunks(mode.encoded_len(self.config.chunk_samples)) {
			let count = mode.code_capacity(block.len());
			self.samples.resize(count, 0);
			codec::decode(&mut self.state, block, count, &mut self.samples)?;
			write_pcm(&mut self.writer, self.config.format, &self.samples, &mut self.raw)?;
			self.stats.samples += count as u64;
		}
		self.stats.bytes += bytes.len() as u64;

		trace!(
			"Decoded {} bytes, predictor {}, step index {}",
			bytes.len(),
			self.state.predictor(),
			self.state.step_index()
		);

		Ok(())
	}

	fn decode_packet(&mut self, start: usize, len: usize) -> Result<(), StreamError> {
		let packet = &self.pending[start..start + len];
		self.samples.resize(frame::packet_code_capacity(&self.state, packet.len()), 0);
		let count = frame::decode_packet(&mut self.state, packet, None, &mut self.samples)?;
		write_pcm(&mut self.writer, self.config.format, &self.samples[..count], &mut self.raw)?;

		self.stats.samples += count as u64;
		self.stats.bytes += len as u64;
		self.stats.packets += 1;
		Ok(())
	}

	/// Decodes a trailing short packet and returns the sink with the final totals
	pub fn finish(mut self) -> Result<(W, StreamStats), StreamError> {
		if self.stopped {
			return Err(StreamError::Stopped);
		}
		if !self.pending.is_empty() {
			if self.pending.len() < STATE_HEADER_SIZE {
				return Err(FrameError::InsufficientData {
					expected: STATE_HEADER_SIZE,
					actual: self.pending.len(),
				}
				.into());
			}
			let len = self.pending.len();
			self.decode_packet(0, len)?;
			self.pending.clear();
		}

		self.writer.flush()?;
		Ok((self.writer, self.stats))
	}
}

/// An `Err` from `write` stops the decoder; see the module docs.
impl<W: Write> Write for StreamDecoder<W> {
	fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
		self.push(buf).map_err(io::Error::other)?;
		Ok(buf.len())
	}

	fn flush(&mut self) -> io::Result<()> {
		self.writer.flush()
	}
}

/// Encodes everything `reader` yields into `writer`
pub fn encode_stream<R: Read, W: Write>(
	mut reader: R,
	writer: W,
	config: StreamConfig,
) -> Result<(W, StreamStats), StreamError> {
	let mut encoder = StreamEncoder::new(writer, config)?;
	io::copy(&mut reader, &mut encoder)?;
	encoder.finish()
}

/// Decodes everything `reader` yields into `writer`
pub fn decode_stream<R: Read, W: Write>(
	mut reader: R,
	writer: W,
	config: StreamConfig,
) -> Result<(W, StreamStats), StreamError> {
	let mut decoder = StreamDecoder::new(writer, config)?;
	io::copy(&mut reader, &mut decoder)?;
	decoder.finish()
}
