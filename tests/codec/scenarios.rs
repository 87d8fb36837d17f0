//! Concrete encode/decode scenarios through the public facade

use dvi_adpcm::prelude::*;
use log::debug;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

fn roundtrip(mode: Mode, pcm: &[i16]) -> (Vec<u8>, Vec<i16>, State, State) {
	let mut enc = State::new(mode);
	let mut packed = vec![0u8; mode.encoded_len(pcm.len())];
	let written = encode(&mut enc, pcm, &mut packed).unwrap();
	assert_eq!(written, packed.len());

	let mut dec = State::new(mode);
	let mut decoded = vec![0i16; pcm.len()];
	decode(&mut dec, &packed, pcm.len(), &mut decoded).unwrap();

	(packed, decoded, enc, dec)
}

#[test_log::test]
fn four_bit_silence() {
	let (packed, decoded, enc, dec) = roundtrip(Mode::FourBit, &[0; 8]);
	assert_eq!(packed, [0x00, 0x00, 0x00, 0x00]);
	assert_eq!(decoded, [0; 8]);
	assert_eq!(enc.snapshot(), Snapshot::default());
	assert_eq!(dec.snapshot(), Snapshot::default());
}

#[test_log::test]
fn four_bit_single_impulse() {
	let (packed, decoded, enc, dec) = roundtrip(Mode::FourBit, &[0, 16384, 0, 0, 0, 0, 0, 0]);
	debug!("impulse packed: {:02X?}", packed);

	assert_eq!(decoded, [0, 11, 1, 0, 1, 0, 1, 0]);
	assert_eq!(enc, dec);
	assert_eq!(enc.step_index(), 2);
}

#[test_log::test]
fn two_bit_silence() {
	let (packed, decoded, enc, dec) = roundtrip(Mode::TwoBit, &[0; 8]);
	assert_eq!(packed, [0x22, 0x22]);
	assert_eq!(decoded, [128, 0, 128, 0, 128, 0, 128, 0]);
	assert_eq!(enc, dec);
}

#[test_log::test]
fn four_bit_decode_only() {
	let mut state = State::new(Mode::FourBit);
	let mut out = [0i16; 4];
	assert_eq!(decode(&mut state, &[0x77, 0x77], 4, &mut out), Ok(4));
	assert_eq!(out, [11, 41, 104, 240]);
	assert_eq!(state.snapshot(), Snapshot {
		predictor: 240,
		step_index: 32
	});
}

#[test_log::test]
fn chunking_equivalence() {
	let mut rng = SmallRng::seed_from_u64(0x5EED);
	let pcm: Vec<i16> = (0..1000).map(|_| rng.random()).collect();

	for mode in [Mode::FourBit, Mode::TwoBit] {
		let mut single = State::new(mode);
		let expected = encode_to_vec(&mut single, &pcm);

		let mut threaded = State::new(mode);
		let mut chunked = Vec::with_capacity(expected.len());
		for chunk in pcm.chunks(100) {
			let mut out = [0u8; 50];
			let written = encode(&mut threaded, chunk, &mut out).unwrap();
			chunked.extend_from_slice(&out[..written]);
		}

		assert_eq!(chunked, expected, "{} mode", mode);
	}
}

#[test_log::test]
fn saturation_recovery() {
	let mut pcm = vec![0i16; 100];
	pcm.extend(std::iter::repeat_n(i16::MAX, 100));

	for mode in [Mode::FourBit, Mode::TwoBit] {
		let mut state = State::new(mode);
		let mut peak = 0u8;
		for &sample in &pcm {
			state.encode_sample(sample);
			peak = peak.max(state.step_index());
		}
		debug!("{} mode peak step index {}", mode, peak);
		assert!(peak >= mode.max_step_index().min(80));

		let (_, decoded, _, _) = roundtrip(mode, &pcm);
		let settled = &decoded[decoded.len() - 50..];
		assert!(settled.iter().all(|&s| s == i16::MAX), "{} mode", mode);
	}
}

#[test_log::test]
fn full_scale_alternating() {
	let pcm = [i16::MAX, i16::MIN].repeat(32);
	for mode in [Mode::FourBit, Mode::TwoBit] {
		let (_, decoded, enc, dec) = roundtrip(mode, &pcm);
		assert_eq!(enc, dec);
		assert_eq!(enc.step_index(), mode.max_step_index());
		assert_eq!(decoded.last(), Some(&i16::MIN));
	}
}

#[test_log::test]
fn odd_length_tail() {
	let (packed, decoded, _, _) = roundtrip(Mode::FourBit, &[100, 200, 300]);
	assert_eq!(packed, [0x77, 0x70]);
	assert_eq!(decoded, [11, 41, 104]);
}

#[test_log::test]
fn errors_leave_state_untouched() {
	let mut state = State::new(Mode::TwoBit);
	state.restore(1000, 5);
	let before = state;

	let mut small = [0u8; 1];
	let err = encode(&mut state, &[0; 5], &mut small).unwrap_err();
	assert!(!err.is_invalid_config());
	assert_eq!(state, before);

	let mut out = [0i16; 16];
	let err = decode(&mut state, &[0xAA], 5, &mut out).unwrap_err();
	assert!(err.is_invalid_config());
	assert_eq!(state, before);

	assert_eq!(Mode::from_u8(8), Err(CodecError::InvalidMode(8)));
}
