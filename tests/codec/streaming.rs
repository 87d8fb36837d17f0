//! Stream pump, framing and container tests

use std::io::Cursor;

use dvi_adpcm::prelude::*;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

fn tone(len: usize) -> Vec<i16> {
	// Integer triangle wave, period 64 samples
	(0..len)
		.map(|i| {
			let phase = (i % 64) as i32;
			let v = if phase < 32 {
				phase * 1000 - 16000
			} else {
				(64 - phase) * 1000 - 16000
			};
			v as i16
		})
		.collect()
}

fn to_bytes(format: SampleFormat, samples: &[i16]) -> Vec<u8> {
	let mut raw = vec![0u8; samples.len() * format.bytes_per_sample()];
	format.write_samples(samples, &mut raw).unwrap();
	raw
}

#[test_log::test]
fn random_chunking_of_pcm_bytes() {
	let samples = tone(2048);
	let raw = to_bytes(SampleFormat::S16Le, &samples);
	let mut rng = SmallRng::seed_from_u64(99);

	for mode in [Mode::FourBit, Mode::TwoBit] {
		let config = StreamConfig {
			mode,
			..StreamConfig::default()
		};
		let (expected, _) = encode_stream(Cursor::new(&raw), Vec::new(), config).unwrap();

		let mut encoder = StreamEncoder::new(Vec::new(), config).unwrap();
		let mut rest = raw.as_slice();
		while !rest.is_empty() {
			let take = rng.random_range(1..=rest.len().min(97));
			encoder.push(&rest[..take]).unwrap();
			rest = &rest[take..];
		}
		let (actual, stats) = encoder.finish().unwrap();

		assert_eq!(actual, expected);
		assert_eq!(stats.samples, 2048);
	}
}

#[test_log::test]
fn eight_bit_pcm_roundtrip() {
	let samples: Vec<i16> = tone(512).iter().map(|&s| s & !0xFF).collect();
	let raw = to_bytes(SampleFormat::S8, &samples);
	assert_eq!(raw.len(), 512);

	let config = StreamConfig {
		mode: Mode::FourBit,
		format: SampleFormat::S8,
		..StreamConfig::default()
	};
	let (adpcm, _) = encode_stream(Cursor::new(&raw), Vec::new(), config).unwrap();
	assert_eq!(adpcm.len(), 256);

	let (decoded_raw, stats) = decode_stream(Cursor::new(&adpcm), Vec::new(), config).unwrap();
	assert_eq!(stats.samples, 512);
	assert_eq!(decoded_raw.len(), 512);

	// Same result as encoding the widened samples directly
	let mut enc = State::new(Mode::FourBit);
	assert_eq!(encode_to_vec(&mut enc, &samples), adpcm);
}

#[test_log::test]
fn framed_packets_carry_state() {
	let samples = tone(640);
	let config = StreamConfig {
		mode: Mode::TwoBit,
		framed: true,
		chunk_samples: 160,
		..StreamConfig::default()
	};

	let (packets, stats) =
		encode_stream(Cursor::new(to_bytes(SampleFormat::S16Le, &samples)), Vec::new(), config)
			.unwrap();
	assert_eq!(stats.packets, 4);
	assert_eq!(packets.len(), 4 * (STATE_HEADER_SIZE + 40));

	// The third packet decodes on its own from its header
	let third = &packets[2 * config.packet_len()..3 * config.packet_len()];
	let mut state = State::new(Mode::TwoBit);
	let mut out = [0i16; 160];
	assert_eq!(decode_packet(&mut state, third, Some(160), &mut out), Ok(160));

	let mut reference = State::new(Mode::TwoBit);
	let all = decode_to_vec(&mut reference, &encode_to_vec(&mut State::new(Mode::TwoBit), &samples));
	assert_eq!(&out[..], &all[320..480]);
}

#[test_log::test]
fn wav_roundtrip_through_codec() {
	let samples = tone(800);

	let mut wav = Cursor::new(Vec::new());
	write_wav_mono(&mut wav, 8000, &samples).unwrap();
	wav.set_position(0);

	let (info, pcm) = read_wav_mono(wav).unwrap();
	assert_eq!(info.sample_rate, 8000);
	assert_eq!(pcm, samples);

	let mut enc = State::new(Mode::FourBit);
	let packed = encode_to_vec(&mut enc, &pcm);
	let mut dec = State::new(Mode::FourBit);
	let decoded = decode_to_vec(&mut dec, &packed);

	let mut out = Cursor::new(Vec::new());
	write_wav_mono(&mut out, info.sample_rate, &decoded).unwrap();
	out.set_position(0);

	let reader = hound::WavReader::new(out).unwrap();
	assert_eq!(reader.spec().channels, 1);
	assert_eq!(reader.len(), 800);
}
