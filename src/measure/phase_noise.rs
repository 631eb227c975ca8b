//! Phase-noise profile
//!
//! Phase noise is read off a Welch PSD of the IQ block: the strongest
//! bin is taken as the carrier, its bin power as the carrier reference,
//! and the density at each requested offset is expressed in dBc/Hz.

use super::PhaseNoiseProfile;
use crate::psd::welch_psd;
use crate::trace::IqBlock;

/// Estimate phase noise at the requested carrier offsets.
///
/// Offsets are resolved to the nearest PSD bin relative to the carrier
/// bin; offsets at or beyond Nyquist are skipped. Blocks shorter than
/// one Welch segment (or with a non-positive sample rate) yield an
/// empty profile rather than fabricated numbers.
pub fn measure_phase_noise(block: &IqBlock, offsets: &[f64], fft_size: usize) -> PhaseNoiseProfile {
    let psd = welch_psd(&block.samples, block.sample_rate, fft_size);
    if psd.is_empty() {
        return PhaseNoiseProfile::default();
    }

    let carrier_bin = psd
        .iter()
        .enumerate()
        .max_by(|a, b| a.1.total_cmp(b.1))
        .map(|(k, _)| k)
        .unwrap_or(0);

    let resolution = block.sample_rate / fft_size as f64;
    // Total power in the carrier bin, density times bin width.
    let carrier_power = psd[carrier_bin] * resolution;
    if carrier_power <= 0.0 {
        return PhaseNoiseProfile::default();
    }

    let n = fft_size as isize;
    let mut points = Vec::with_capacity(offsets.len());
    for &offset in offsets {
        if !offset.is_finite() || offset.abs() >= block.sample_rate / 2.0 {
            continue;
        }
        let bin_offset = (offset / resolution).round() as isize;
        let bin = (carrier_bin as isize + bin_offset).rem_euclid(n) as usize;
        let dbc_per_hz = 10.0 * (psd[bin] / carrier_power).log10();
        points.push((offset, dbc_per_hz));
    }

    PhaseNoiseProfile { points }
}
