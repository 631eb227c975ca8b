//! FM quadrature detection
//!
//! Audio is the wrapped instantaneous phase difference between
//! consecutive samples. The phase of the last sample of each block is
//! carried into the next call; FM is stateful across blocks, so the
//! first sample of a block differentiates against the previous block's
//! tail instead of starting from zero.

use std::f32::consts::PI;

use rustfft::num_complex::Complex;

use super::AUDIO_GAIN;

/// Wrap a phase difference into `(-π, π]`. A single 2π correction is
/// enough: consecutive-sample differences can never exceed 2π.
fn wrap_phase(diff: f32) -> f32 {
    if diff > PI {
        diff - 2.0 * PI
    } else if diff < -PI {
        diff + 2.0 * PI
    } else {
        diff
    }
}

/// Quadrature detector. `prev_phase` holds the final phase of the
/// previous block and is advanced in place.
pub(crate) fn demodulate(samples: &[Complex<f32>], volume: f32, prev_phase: &mut f32) -> Vec<f32> {
    let mut audio = Vec::with_capacity(samples.len());
    for iq in samples {
        let phase = iq.im.atan2(iq.re);
        let diff = wrap_phase(phase - *prev_phase);
        audio.push(diff * volume * AUDIO_GAIN);
        *prev_phase = phase;
    }
    audio
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tone(rate_rad: f32, start: f32, n: usize) -> Vec<Complex<f32>> {
        (0..n)
            .map(|i| Complex::from_polar(1.0, start + rate_rad * i as f32))
            .collect()
    }

    #[test]
    fn constant_rate_gives_constant_audio() {
        let mut prev = 0.0;
        let audio = demodulate(&tone(0.1, 0.1, 32), 1.0, &mut prev);
        for &sample in &audio {
            assert!((sample - 0.1 * 100.0).abs() < 1e-3, "sample {}", sample);
        }
    }

    #[test]
    fn phase_wrap_at_pi_boundary_has_no_spike() {
        // Rate 0.2 rad/sample crossing +π: raw differences jump by ~2π
        // at the wrap, the detector must not.
        let mut prev = 0.0;
        let audio = demodulate(&tone(0.2, PI - 0.5, 64), 1.0, &mut prev);
        for &sample in &audio[1..] {
            assert!(
                (sample - 0.2 * 100.0).abs() < 1e-2,
                "discontinuity spike: {}",
                sample
            );
        }
    }

    #[test]
    fn phase_carries_across_blocks() {
        let samples = tone(0.05, 0.0, 64);
        let mut prev_split = 0.0;
        let mut first = demodulate(&samples[..32], 1.0, &mut prev_split);
        first.extend(demodulate(&samples[32..], 1.0, &mut prev_split));

        let mut prev_whole = 0.0;
        let whole = demodulate(&samples, 1.0, &mut prev_whole);

        assert_eq!(first.len(), whole.len());
        for (a, b) in first.iter().zip(whole.iter()) {
            assert!((a - b).abs() < 1e-5);
        }
    }

    #[test]
    fn wrap_maps_into_half_open_interval() {
        assert!((wrap_phase(PI + 0.1) - (PI + 0.1 - 2.0 * PI)).abs() < 1e-6);
        assert!((wrap_phase(-PI - 0.1) - (-PI - 0.1 + 2.0 * PI)).abs() < 1e-6);
        assert_eq!(wrap_phase(1.0), 1.0);
    }
}
