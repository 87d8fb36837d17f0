//! Benchmark suite for the ADPCM codec
//!
//! Run with: cargo bench --manifest-path benches/Cargo.toml

use adpcm_benches::{full_scale_alternating, noisy_tone, triangle};
use adpcm_types::prelude::*;
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;

/// One second of 8 kHz audio
const SAMPLES: usize = 8000;

fn signals() -> Vec<(&'static str, Vec<i16>)> {
	vec![
		("silence", vec![0; SAMPLES]),
		("tone", triangle(SAMPLES, 64, 16000)),
		("noisy_tone", noisy_tone(SAMPLES)),
		("full_scale", full_scale_alternating(SAMPLES)),
	]
}

fn bench_encode(c: &mut Criterion) {
	let mut group = c.benchmark_group("encode");
	group.throughput(Throughput::Elements(SAMPLES as u64));

	for mode in [Mode::FourBit, Mode::TwoBit] {
		for (name, pcm) in signals() {
			let mut out = vec![0u8; mode.encoded_len(pcm.len())];
			group.bench_with_input(BenchmarkId::new(mode.to_string(), name), &pcm, |b, pcm| {
				b.iter(|| {
					let mut state = State::new(mode);
					let result = encode(&mut state, black_box(pcm), &mut out);
					black_box(result)
				});
			});
		}
	}

	group.finish();
}

fn bench_decode(c: &mut Criterion) {
	let mut group = c.benchmark_group("decode");
	group.throughput(Throughput::Elements(SAMPLES as u64));

	for mode in [Mode::FourBit, Mode::TwoBit] {
		for (name, pcm) in signals() {
			let packed = encode_to_vec(&mut State::new(mode), &pcm);
			let mut out = vec![0i16; SAMPLES];
			group.bench_with_input(BenchmarkId::new(mode.to_string(), name), &packed, |b, packed| {
				b.iter(|| {
					let mut state = State::new(mode);
					let result = decode(&mut state, black_box(packed), SAMPLES, &mut out);
					black_box(result)
				});
			});
		}
	}

	group.finish();
}

/// Byte-stream pump with framing, to show the cost of headers and buffering
fn bench_stream(c: &mut Criterion) {
	let mut group = c.benchmark_group("stream");
	let raw: Vec<u8> = noisy_tone(SAMPLES).iter().flat_map(|s| s.to_le_bytes()).collect();
	group.throughput(Throughput::Bytes(raw.len() as u64));

	for framed in [false, true] {
		let config = StreamConfig {
			framed,
			chunk_samples: 256,
			..StreamConfig::default()
		};
		let label = if framed { "framed" } else { "raw" };
		group.bench_with_input(BenchmarkId::new("encode", label), &raw, |b, raw| {
			b.iter(|| {
				let result = encode_stream(black_box(raw.as_slice()), Vec::new(), config);
				black_box(result.map(|(bytes, _)| bytes.len()))
			});
		});
	}

	group.finish();
}

criterion_group!(benches, bench_encode, bench_decode, bench_stream);

criterion_main!(benches);
