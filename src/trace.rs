//! Trace and IQ block value types
//!
//! A `SpectrumTrace` is one sweep of (frequency, amplitude) pairs in Hz
//! and dBm; an `IqBlock` is one block of complex baseband samples tied
//! to a sample rate. Both are plain data: the acquisition cycle produces
//! them fresh each tick and hands them to the measurers read-only.

use rustfft::num_complex::Complex;

/// One power-spectrum sweep: parallel frequency (Hz) and amplitude (dBm)
/// sequences of equal length, frequencies strictly increasing.
#[derive(Debug, Clone, PartialEq)]
pub struct SpectrumTrace {
    pub frequencies: Vec<f64>,
    pub amplitudes: Vec<f64>,
}

impl SpectrumTrace {
    /// Build a trace from parallel sequences.
    ///
    /// Mismatched lengths are a caller contract violation; the engine
    /// assumes equal lengths everywhere past this boundary.
    pub fn new(frequencies: Vec<f64>, amplitudes: Vec<f64>) -> Self {
        debug_assert_eq!(
            frequencies.len(),
            amplitudes.len(),
            "frequency/amplitude length mismatch"
        );
        Self {
            frequencies,
            amplitudes,
        }
    }

    /// Build a trace from a raw amplitude sweep, generating the linear
    /// frequency axis from a center frequency and span:
    /// `f[i] = (center - span/2) + i * span/(n-1)`.
    pub fn from_sweep(center_hz: f64, span_hz: f64, amplitudes: Vec<f64>) -> Self {
        let n = amplitudes.len();
        let start = center_hz - span_hz / 2.0;
        let step = if n > 1 { span_hz / (n - 1) as f64 } else { 0.0 };
        let frequencies = (0..n).map(|i| start + i as f64 * step).collect();
        Self {
            frequencies,
            amplitudes,
        }
    }

    pub fn len(&self) -> usize {
        self.amplitudes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.amplitudes.is_empty()
    }

    /// Lowest frequency in the trace, or 0.0 for an empty trace.
    pub fn start_freq(&self) -> f64 {
        self.frequencies.first().copied().unwrap_or(0.0)
    }

    /// Highest frequency in the trace, or 0.0 for an empty trace.
    pub fn stop_freq(&self) -> f64 {
        self.frequencies.last().copied().unwrap_or(0.0)
    }

    /// Full frequency span covered by the trace.
    pub fn span(&self) -> f64 {
        self.stop_freq() - self.start_freq()
    }
}

/// One block of complex baseband samples (I = re, Q = im), immutable
/// once fetched.
#[derive(Debug, Clone, PartialEq)]
pub struct IqBlock {
    pub samples: Vec<Complex<f32>>,
    pub sample_rate: f64,
}

impl IqBlock {
    pub fn new(samples: Vec<Complex<f32>>, sample_rate: f64) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sweep_axis_is_linear_and_centered() {
        let trace = SpectrumTrace::from_sweep(1e9, 100e6, vec![0.0; 5]);
        assert_eq!(trace.frequencies[0], 0.95e9);
        assert_eq!(trace.frequencies[4], 1.05e9);
        assert_eq!(trace.frequencies[2], 1e9);
        let step = trace.frequencies[1] - trace.frequencies[0];
        assert!((step - 25e6).abs() < 1e-3);
    }

    #[test]
    fn empty_sweep_builds_empty_trace() {
        let trace = SpectrumTrace::from_sweep(1e9, 100e6, vec![]);
        assert!(trace.is_empty());
        assert_eq!(trace.span(), 0.0);
    }

    #[test]
    fn single_point_sweep_sits_at_band_start() {
        let trace = SpectrumTrace::from_sweep(100.0, 10.0, vec![-30.0]);
        assert_eq!(trace.len(), 1);
        assert_eq!(trace.frequencies[0], 95.0);
    }
}
