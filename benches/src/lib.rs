//! Benchmark helper utilities for dvi-adpcm
//!
//! Synthetic PCM signals with different spectral content. ADPCM speed does
//! not depend much on the signal, but the step index trajectory does, so the
//! suite covers a quiet input, a speech-like input and a worst case.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Integer triangle wave in the range `-amplitude..=amplitude`
pub fn triangle(len: usize, period: usize, amplitude: i16) -> Vec<i16> {
	let period = period.max(2);
	let half = period / 2;
	let amplitude = amplitude as i32;

	(0..len)
		.map(|i| {
			let phase = (i % period) as i32;
			let rising = if phase < half as i32 {
				phase
			} else {
				period as i32 - phase
			};
			(rising * 2 * amplitude / half as i32 - amplitude) as i16
		})
		.collect()
}

/// Triangle carrier with pseudo-random noise on top
///
/// Seeded, so every run sees the same samples.
pub fn noisy_tone(len: usize) -> Vec<i16> {
	let mut rng = SmallRng::seed_from_u64(0x2545_F491);
	triangle(len, 200, 10000)
		.into_iter()
		.map(|sample| {
			let noise: i32 = rng.random_range(-300..=300);
			(sample as i32 + noise).clamp(i16::MIN as i32, i16::MAX as i32) as i16
		})
		.collect()
}

/// Alternating full-scale samples, keeping the step index pinned at its maximum
pub fn full_scale_alternating(len: usize) -> Vec<i16> {
	(0..len).map(|i| if i % 2 == 0 { i16::MAX } else { i16::MIN }).collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_triangle_bounds() {
		let wave = triangle(1000, 64, 16000);
		assert_eq!(wave.len(), 1000);
		assert_eq!(wave[0], -16000);
		assert_eq!(wave[32], 16000);
		assert!(wave.iter().all(|&s| (-16000..=16000).contains(&s)));
	}

	#[test]
	fn test_noisy_tone_is_deterministic() {
		assert_eq!(noisy_tone(256), noisy_tone(256));
	}

	#[test]
	fn test_noisy_tone_stays_near_carrier() {
		let carrier = triangle(1000, 200, 10000);
		let noisy = noisy_tone(1000);
		assert_ne!(noisy, carrier);
		for (&n, &c) in noisy.iter().zip(&carrier) {
			assert!((n as i32 - c as i32).abs() <= 300);
		}
	}
}
