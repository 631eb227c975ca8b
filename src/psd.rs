//! Welch power-spectral-density estimation
//!
//! Averaged periodograms over Hann-windowed segments with 50% overlap.
//! The output is a two-sided density in linear power per Hz: bin `k`
//! maps to frequency `k*fs/N` for `k < N/2` and `(k-N)*fs/N` above,
//! the usual complex-baseband layout.

use rustfft::{num_complex::Complex, FftPlanner};

/// Estimate the PSD of a complex baseband signal with Welch's method.
///
/// `fft_size` is the segment length; segments overlap by half. Returns
/// an empty vector when the signal is shorter than one segment or the
/// sample rate is not positive; the caller treats that as "no data".
pub fn welch_psd(samples: &[Complex<f32>], sample_rate: f64, fft_size: usize) -> Vec<f64> {
    if fft_size == 0 || samples.len() < fft_size || sample_rate <= 0.0 {
        return Vec::new();
    }

    let window = hann_window(fft_size);
    // Window power for density normalization.
    let window_power: f64 = window.iter().map(|&w| (w * w) as f64).sum();

    let mut planner = FftPlanner::new();
    let fft = planner.plan_fft_forward(fft_size);

    let hop = (fft_size / 2).max(1);
    let mut accumulated = vec![0.0f64; fft_size];
    let mut segments = 0usize;
    let mut buffer = vec![Complex::new(0.0f32, 0.0); fft_size];

    let mut start = 0;
    while start + fft_size <= samples.len() {
        for (i, slot) in buffer.iter_mut().enumerate() {
            *slot = samples[start + i] * window[i];
        }
        fft.process(&mut buffer);

        for (acc, value) in accumulated.iter_mut().zip(buffer.iter()) {
            *acc += value.norm_sqr() as f64;
        }
        segments += 1;
        start += hop;
    }

    let scale = 1.0 / (segments as f64 * sample_rate * window_power);
    for acc in accumulated.iter_mut() {
        *acc *= scale;
    }
    accumulated
}

/// Frequency of PSD bin `k` relative to the carrier at DC.
pub fn bin_frequency(k: usize, sample_rate: f64, fft_size: usize) -> f64 {
    if k < fft_size / 2 {
        k as f64 * sample_rate / fft_size as f64
    } else {
        (k as f64 - fft_size as f64) * sample_rate / fft_size as f64
    }
}

fn hann_window(n: usize) -> Vec<f32> {
    if n == 1 {
        return vec![1.0];
    }
    (0..n)
        .map(|i| {
            let x = 2.0 * std::f64::consts::PI * i as f64 / (n - 1) as f64;
            (0.5 * (1.0 - x.cos())) as f32
        })
        .collect()
}
