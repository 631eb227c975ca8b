//! Single-sideband approximation
//!
//! USB sums I and Q, LSB subtracts them. This is a crude stand-in for a
//! true Hilbert-transform SSB detector and is kept as a documented
//! design simplification. CW reuses the USB path for tone recovery.

use rustfft::num_complex::Complex;

use super::AUDIO_GAIN;

pub(crate) fn demodulate(samples: &[Complex<f32>], volume: f32, upper_sideband: bool) -> Vec<f32> {
    samples
        .iter()
        .map(|iq| {
            let raw = if upper_sideband {
                iq.re + iq.im
            } else {
                iq.re - iq.im
            };
            raw * volume * AUDIO_GAIN
        })
        .collect()
}
