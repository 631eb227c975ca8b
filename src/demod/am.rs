//! AM envelope detection

use rustfft::num_complex::Complex;

use super::AUDIO_GAIN;

/// Envelope detector: audio is the per-sample magnitude `sqrt(I² + Q²)`
/// scaled by volume and the fixed audio gain.
pub(crate) fn demodulate(samples: &[Complex<f32>], volume: f32) -> Vec<f32> {
    samples
        .iter()
        .map(|iq| iq.norm() * volume * AUDIO_GAIN)
        .collect()
}
