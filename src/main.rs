//! DVI/IMA ADPCM command-line filter
//!
//! Encodes raw or WAV PCM to 4-bit or 2-bit ADPCM, decodes it back, or does
//! both in one pass. Paths default to stdin/stdout so the tool can sit in a
//! pipeline.
//!
//! # Usage
//!
//! ```bash
//! # Encode 16-bit little-endian PCM to 4-bit ADPCM
//! cat test_s16_le.raw | dvi_adpcm encode > test.adpcm
//!
//! # Decode it again
//! cat test.adpcm | dvi_adpcm decode > test_s16_le.raw
//!
//! # 2-bit mode, 8-bit signed PCM
//! dvi_adpcm --mode two-bit --format s8 encode input.s8 output.adpcm
//!
//! # Encode and decode in one pass, writing a WAV and printing quality stats
//! dvi_adpcm roundtrip speech.wav speech_adpcm.wav --stats
//!
//! # Framed packets with a state header every 160 samples
//! dvi_adpcm --framed --chunk 160 encode speech.wav speech.pkt
//! dvi_adpcm --framed --chunk 160 inspect speech.pkt
//! ```

mod settings;

use std::fs;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use dvi_adpcm::prelude::*;
use log::{debug, info};
use serde::Serialize;

use crate::settings::Settings;

#[derive(Parser)]
#[command(name = "dvi_adpcm")]
#[command(version)]
#[command(about = "DVI/IMA ADPCM filter - encode, decode and inspect 4-bit and 2-bit ADPCM streams", long_about = None)]
struct Cli {
	#[command(subcommand)]
	command: Commands,

	#[command(flatten)]
	codec: CodecArgs,
}

#[derive(Args)]
struct CodecArgs {
	/// Bitstream variant: four-bit or two-bit
	#[arg(short, long, global = true)]
	mode: Option<Mode>,

	/// Raw PCM layout: s16le, s8 or mulaw
	#[arg(short, long, global = true)]
	format: Option<SampleFormat>,

	/// Prefix every packet with a 3-byte state header
	#[arg(long, global = true)]
	framed: bool,

	/// Samples per packet
	#[arg(long, global = true, value_name = "SAMPLES")]
	chunk: Option<usize>,

	/// Sample rate for WAV output
	#[arg(long, global = true, value_name = "HZ")]
	rate: Option<u32>,

	/// TOML settings file
	#[arg(long, global = true, env = "DVI_ADPCM_CONFIG", value_name = "FILE")]
	config: Option<PathBuf>,

	/// Show verbose output
	#[arg(short, long, global = true)]
	verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
	/// Encode PCM to ADPCM
	#[command(visible_alias = "e")]
	Encode {
		/// Input PCM file, raw or `.wav` (defaults to stdin)
		#[arg(value_name = "INPUT")]
		input: Option<PathBuf>,

		/// Output ADPCM file (defaults to stdout)
		#[arg(value_name = "OUTPUT")]
		output: Option<PathBuf>,
	},

	/// Decode ADPCM to PCM
	#[command(visible_alias = "d")]
	Decode {
		/// Input ADPCM file (defaults to stdin)
		#[arg(value_name = "INPUT")]
		input: Option<PathBuf>,

		/// Output PCM file, raw or `.wav` (defaults to stdout)
		#[arg(value_name = "OUTPUT")]
		output: Option<PathBuf>,
	},

	/// Encode then decode in one pass
	Roundtrip {
		/// Input PCM file, raw or `.wav` (defaults to stdin)
		#[arg(value_name = "INPUT")]
		input: Option<PathBuf>,

		/// Output PCM file, raw or `.wav` (defaults to stdout)
		#[arg(value_name = "OUTPUT")]
		output: Option<PathBuf>,

		/// Print a JSON quality report to stderr
		#[arg(short, long)]
		stats: bool,
	},

	/// List the state headers of a framed ADPCM file
	Inspect {
		/// Input framed ADPCM file
		#[arg(value_name = "INPUT")]
		input: PathBuf,

		/// Number of packets to show (0 shows all)
		#[arg(short = 'n', long, default_value_t = 8)]
		packets: usize,
	},
}

/// Quality summary printed by `roundtrip --stats`
#[derive(Debug, Serialize)]
struct RoundtripReport {
	mode: Mode,
	samples: usize,
	adpcm_bytes: u64,
	compression_ratio: f64,
	snr_db: f64,
	max_abs_error: i32,
	final_state: Snapshot,
}

impl RoundtripReport {
	fn new(
		settings: &Settings,
		original: &[i16],
		decoded: &[i16],
		adpcm_bytes: u64,
		final_state: Snapshot,
	) -> Self {
		let mut signal = 0f64;
		let mut noise = 0f64;
		let mut max_abs_error = 0i32;
		for (&a, &b) in original.iter().zip(decoded) {
			let error = a as i32 - b as i32;
			signal += (a as f64) * (a as f64);
			noise += (error as f64) * (error as f64);
			max_abs_error = max_abs_error.max(error.abs());
		}

		let snr_db = if noise == 0.0 {
			f64::INFINITY
		} else {
			10.0 * (signal / noise).log10()
		};
		let pcm_bytes = (original.len() * 2) as f64;

		Self {
			mode: settings.mode,
			samples: original.len(),
			adpcm_bytes,
			compression_ratio: if adpcm_bytes == 0 {
				0.0
			} else {
				pcm_bytes / adpcm_bytes as f64
			},
			snr_db,
			max_abs_error,
			final_state,
		}
	}
}

fn is_wav(path: Option<&Path>) -> bool {
	path.and_then(|p| p.extension())
		.and_then(|ext| ext.to_str())
		.is_some_and(|ext| ext.eq_ignore_ascii_case("wav"))
}

fn open_input(path: Option<&Path>) -> Result<Box<dyn Read>> {
	match path {
		Some(path) => {
			let file =
				fs::File::open(path).with_context(|| format!("Cannot open {}", path.display()))?;
			Ok(Box::new(BufReader::new(file)))
		}
		None => Ok(Box::new(BufReader::new(io::stdin().lock()))),
	}
}

fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
	match path {
		Some(path) => {
			let file =
				fs::File::create(path).with_context(|| format!("Cannot create {}", path.display()))?;
			Ok(Box::new(BufWriter::new(file)))
		}
		None => Ok(Box::new(BufWriter::new(io::stdout().lock()))),
	}
}

/// Reads every input sample, from a WAV file or raw PCM in the configured format
fn read_pcm(path: Option<&Path>, settings: &Settings) -> Result<Vec<i16>> {
	if is_wav(path) {
		let reader = open_input(path)?;
		let (wav, samples) = read_wav_mono(reader).context("Cannot read WAV input")?;
		info!(
			"WAV input: {} Hz, {} samples, {} ms",
			wav.sample_rate,
			wav.sample_count,
			wav.duration_ms()
		);
		return Ok(samples);
	}

	let mut raw = Vec::new();
	open_input(path)?.read_to_end(&mut raw).context("Cannot read PCM input")?;
	let mut samples = vec![0i16; raw.len() / settings.format.bytes_per_sample()];
	settings.format.read_samples(&raw, &mut samples).context("Malformed PCM input")?;
	Ok(samples)
}

fn write_wav(path: &Path, sample_rate: u32, samples: &[i16]) -> Result<()> {
	let file =
		fs::File::create(path).with_context(|| format!("Cannot create {}", path.display()))?;
	write_wav_mono(BufWriter::new(file), sample_rate, samples).context("Cannot write WAV output")
}

/// Writes samples to a WAV file or as raw PCM in the configured format
fn write_pcm(path: Option<&Path>, settings: &Settings, samples: &[i16]) -> Result<()> {
	if let Some(path) = path
		&& is_wav(Some(path))
	{
		return write_wav(path, settings.sample_rate, samples);
	}

	let mut raw = vec![0u8; samples.len() * settings.format.bytes_per_sample()];
	settings.format.write_samples(samples, &mut raw)?;
	let mut output = open_output(path)?;
	output.write_all(&raw)?;
	output.flush()?;
	Ok(())
}

fn handle_encode(input: Option<PathBuf>, output: Option<PathBuf>, settings: &Settings) -> Result<()> {
	let config = settings.stream_config();
	let writer = open_output(output.as_deref())?;

	let stats = if is_wav(input.as_deref()) {
		let samples = read_pcm(input.as_deref(), settings)?;
		let mut encoder = StreamEncoder::new(writer, config)?;
		encoder.push_samples(&samples)?;
		encoder.finish()?.1
	} else {
		encode_stream(open_input(input.as_deref())?, writer, config)?.1
	};

	info!(
		"Encoded {} samples -> {} bytes ({} mode, {} packets)",
		stats.samples, stats.bytes, settings.mode, stats.packets
	);
	Ok(())
}

fn handle_decode(input: Option<PathBuf>, output: Option<PathBuf>, settings: &Settings) -> Result<()> {
	let config = settings.stream_config();
	let reader = open_input(input.as_deref())?;

	let stats = if is_wav(output.as_deref()) {
		let pcm_config = StreamConfig {
			format: SampleFormat::S16Le,
			..config
		};
		let (raw, stats) = decode_stream(reader, Vec::new(), pcm_config)?;
		let mut samples = vec![0i16; raw.len() / 2];
		SampleFormat::S16Le.read_samples(&raw, &mut samples)?;
		write_pcm(output.as_deref(), settings, &samples)?;
		stats
	} else {
		decode_stream(reader, open_output(output.as_deref())?, config)?.1
	};

	info!(
		"Decoded {} bytes -> {} samples ({} mode, {} packets)",
		stats.bytes, stats.samples, settings.mode, stats.packets
	);
	Ok(())
}

fn handle_roundtrip(
	input: Option<PathBuf>,
	output: Option<PathBuf>,
	show_stats: bool,
	settings: &Settings,
) -> Result<()> {
	let original = read_pcm(input.as_deref(), settings)?;
	let config = settings.stream_config();

	let mut encoder = StreamEncoder::new(Vec::new(), config)?;
	encoder.push_samples(&original)?;
	encoder.flush_pending()?;
	let final_state = encoder.state().snapshot();
	let (adpcm, enc_stats) = encoder.finish()?;
	debug!("Encoder totals: {:?}", enc_stats);

	let pcm_config = StreamConfig {
		format: SampleFormat::S16Le,
		..config
	};
	let mut decoder = StreamDecoder::new(Vec::new(), pcm_config)?;
	decoder.push(&adpcm)?;
	let (raw, _) = decoder.finish()?;

	let mut decoded = vec![0i16; raw.len() / 2];
	SampleFormat::S16Le.read_samples(&raw, &mut decoded)?;
	// Padding codes in the last byte decode to extra samples
	decoded.truncate(original.len());

	write_pcm(output.as_deref(), settings, &decoded)?;

	if show_stats {
		let report =
			RoundtripReport::new(settings, &original, &decoded, enc_stats.bytes, final_state);
		eprintln!("{}", serde_json::to_string_pretty(&report)?);
	}

	info!("Round trip: {} samples through {} bytes", original.len(), enc_stats.bytes);
	Ok(())
}

fn handle_inspect(input: PathBuf, limit: usize, settings: &Settings) -> Result<()> {
	let data = fs::read(&input).with_context(|| format!("Cannot read {}", input.display()))?;
	let config = settings.stream_config();
	config.validate()?;
	let packet_len = config.packet_len();

	println!(
		"{} ({} bytes, {} mode, {}-byte packets)",
		input.display(),
		data.len(),
		settings.mode,
		packet_len
	);

	let total = data.len().div_ceil(packet_len);
	for (index, packet) in data.chunks(packet_len).enumerate() {
		if limit != 0 && index >= limit {
			println!("... {} more packets", total - index);
			break;
		}

		let header = Snapshot::from_bytes(packet)
			.with_context(|| format!("Packet {} is truncated", index))?;
		let payload = &packet[STATE_HEADER_SIZE..];
		let preview = &payload[..payload.len().min(8)];
		println!(
			"[{:4}] predictor {:6}, step index {:2}, {:4} codes, payload {}{}",
			index,
			header.predictor,
			header.step_index,
			settings.mode.code_capacity(payload.len()),
			hex::encode(preview),
			if payload.len() > preview.len() {
				"..."
			} else {
				""
			}
		);
	}

	Ok(())
}

fn resolve_settings(args: &CodecArgs) -> Result<Settings> {
	let mut settings = Settings::load(args.config.as_deref()).context("Cannot load settings")?;

	if let Some(mode) = args.mode {
		settings.mode = mode;
	}
	if let Some(format) = args.format {
		settings.format = format;
	}
	if args.framed {
		settings.framed = true;
	}
	if let Some(chunk) = args.chunk {
		settings.chunk_samples = chunk;
	}
	if let Some(rate) = args.rate {
		settings.sample_rate = rate;
	}

	settings.stream_config().validate()?;
	Ok(settings)
}

fn main() -> Result<()> {
	let cli = Cli::parse();

	let default_level = if cli.codec.verbose {
		"debug"
	} else {
		"info"
	};
	env_logger::init_from_env(env_logger::Env::default().default_filter_or(default_level));

	let settings = resolve_settings(&cli.codec)?;
	debug!("Settings: {:?}", settings);

	match cli.command {
		Commands::Encode {
			input,
			output,
		} => handle_encode(input, output, &settings),
		Commands::Decode {
			input,
			output,
		} => handle_decode(input, output, &settings),
		Commands::Roundtrip {
			input,
			output,
			stats,
		} => handle_roundtrip(input, output, stats, &settings),
		Commands::Inspect {
			input,
			packets,
		} => handle_inspect(input, packets, &settings),
	}
}
