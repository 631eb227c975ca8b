//! Engine configuration
//!
//! All fixed sizes the engine works with live here instead of being
//! scattered as magic numbers, so tests can run the whole pipeline at
//! small sizes. Defaults match the BB60C-class hardware the engine was
//! written against.

/// Fixed sizes and timing for the measurement engine.
///
/// `trace_len` and `iq_block_len` describe what the data provider
/// delivers per fetch; `fft_size` is the segment length of the Welch
/// PSD estimator; `filter_order` is the FIR kernel length used by the
/// demodulator.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// FIR low-pass kernel length (taps).
    pub filter_order: usize,
    /// Samples per power-spectrum trace from the provider.
    pub trace_len: usize,
    /// Complex samples per IQ block from the provider.
    pub iq_block_len: usize,
    /// Welch segment / FFT length. Must be a power of two.
    pub fft_size: usize,
    /// Continuous-acquisition tick period in milliseconds. The engine
    /// owns no timer; hosts drive `AcquisitionCycle::tick` at this rate.
    pub update_period_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            filter_order: 64,
            trace_len: 1001,
            iq_block_len: 16384,
            fft_size: 4096,
            update_period_ms: 100,
        }
    }
}

impl EngineConfig {
    /// A small configuration for unit tests that exercises the same code
    /// paths at a fraction of the cost.
    pub fn small() -> Self {
        Self {
            filter_order: 16,
            trace_len: 101,
            iq_block_len: 1024,
            fft_size: 256,
            update_period_ms: 10,
        }
    }
}
