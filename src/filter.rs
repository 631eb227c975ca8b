//! Windowed-sinc FIR filter design
//!
//! Produces the low-pass kernel the demodulator convolves its audio
//! with. Design: ideal sinc low-pass truncated to `order` taps, shaped
//! by a Blackman window, then normalized to unit DC gain.

use crate::error::{Error, Result};

/// A low-pass FIR kernel. Coefficients sum to 1.0, so DC passes with
/// unit gain.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterKernel {
    coefficients: Vec<f64>,
}

impl FilterKernel {
    /// Design a windowed-sinc low-pass kernel of `order` taps with
    /// cutoff `fc = bandwidth / 2`.
    ///
    /// The center tap takes the sinc limit `2*fc` directly; evaluating
    /// `sin(2*fc*x)/x` there would divide by zero.
    pub fn design(bandwidth: f64, order: usize) -> Result<Self> {
        if bandwidth <= 0.0 {
            return Err(Error::InvalidParameter {
                what: format!("bandwidth must be positive, got {bandwidth}"),
            });
        }
        if order == 0 {
            return Err(Error::InvalidParameter {
                what: "filter order must be at least 1".into(),
            });
        }

        let fc = bandwidth / 2.0;
        let mut coefficients = vec![0.0f64; order];
        let mut sum = 0.0;

        for (i, coeff) in coefficients.iter_mut().enumerate() {
            *coeff = if i == order / 2 {
                2.0 * fc
            } else {
                let x = std::f64::consts::PI * (i as f64 - (order / 2) as f64);
                (2.0 * fc * x).sin() / x
            };

            // Blackman window
            let w = 0.42 - 0.5 * (2.0 * std::f64::consts::PI * i as f64 / order as f64).cos()
                + 0.08 * (4.0 * std::f64::consts::PI * i as f64 / order as f64).cos();
            *coeff *= w;
            sum += *coeff;
        }

        // Normalize to unity DC gain
        for coeff in coefficients.iter_mut() {
            *coeff /= sum;
        }

        Ok(Self { coefficients })
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    pub fn len(&self) -> usize {
        self.coefficients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coefficients.is_empty()
    }

    /// Causal convolution of `audio` with this kernel:
    /// `out[i] = Σ_j audio[i-j] * k[j]` for `j <= i`, zero-padded before
    /// index 0.
    pub fn apply(&self, audio: &[f32]) -> Vec<f32> {
        let mut filtered = vec![0.0f32; audio.len()];
        for (i, out) in filtered.iter_mut().enumerate() {
            let mut acc = 0.0f64;
            for (j, &coeff) in self.coefficients.iter().enumerate() {
                if i >= j {
                    acc += audio[i - j] as f64 * coeff;
                }
            }
            *out = acc as f32;
        }
        filtered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kernel_has_unity_dc_gain() {
        for bandwidth in [0.01, 0.1, 0.25, 1.0] {
            let kernel = FilterKernel::design(bandwidth, 64).unwrap();
            let sum: f64 = kernel.coefficients().iter().sum();
            assert!(
                (sum - 1.0).abs() < 1e-9,
                "bandwidth {}: coefficient sum {} != 1.0",
                bandwidth,
                sum
            );
        }
    }

    #[test]
    fn kernel_length_matches_order() {
        let kernel = FilterKernel::design(0.1, 32).unwrap();
        assert_eq!(kernel.len(), 32);
    }

    #[test]
    fn non_positive_bandwidth_is_rejected() {
        assert!(FilterKernel::design(0.0, 64).is_err());
        assert!(FilterKernel::design(-1.0, 64).is_err());
    }

    #[test]
    fn zero_order_is_rejected() {
        assert!(FilterKernel::design(0.1, 0).is_err());
    }

    #[test]
    fn dc_input_passes_unchanged_once_settled() {
        let kernel = FilterKernel::design(0.1, 16).unwrap();
        let audio = vec![1.0f32; 64];
        let filtered = kernel.apply(&audio);
        // After the kernel length the full tap sum (1.0) is in play.
        for &sample in &filtered[16..] {
            assert!((sample - 1.0).abs() < 1e-6, "settled sample {}", sample);
        }
    }

    #[test]
    fn convolution_is_causal() {
        let kernel = FilterKernel::design(0.1, 8).unwrap();
        // Impulse at index 4: nothing before index 4 may be non-zero.
        let mut audio = vec![0.0f32; 16];
        audio[4] = 1.0;
        let filtered = kernel.apply(&audio);
        for &sample in &filtered[..4] {
            assert_eq!(sample, 0.0);
        }
        // Impulse response equals the kernel itself.
        for (j, &coeff) in kernel.coefficients().iter().enumerate() {
            assert!((filtered[4 + j] as f64 - coeff).abs() < 1e-6);
        }
    }
}
