//! Simulated acquisition source
//!
//! Stands in for real hardware in tests and the demo binary: generates
//! a noisy sweep with a main carrier and two deliberate spurs, and an
//! FM-modulated IQ tone with phase continuity across blocks.

use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use rustfft::num_complex::Complex;

use crate::acquire::SpectrumSource;
use crate::config::EngineConfig;

const NOISE_FLOOR_DBM: f64 = -90.0;
const NOISE_JITTER_DB: f64 = 1.5;
const CARRIER_DBM: f64 = -20.0;
const LOWER_SPUR_DBM: f64 = -65.0;
const UPPER_SPUR_DBM: f64 = -72.0;

/// Simulated IQ sample rate in Hz.
pub const SIM_SAMPLE_RATE: f64 = 48000.0;
/// Audio tone frequency carried by the simulated FM signal.
pub const SIM_TONE_HZ: f64 = 600.0;
/// Peak FM deviation of the simulated signal.
pub const SIM_DEVIATION_HZ: f64 = 2500.0;

/// Deterministic synthetic signal source.
#[derive(Debug)]
pub struct SimulatedSource {
    trace_len: usize,
    iq_block_len: usize,
    rng: StdRng,
    noise: Normal<f64>,
    /// Carrier phase, carried across blocks so FM audio is continuous.
    phase: f64,
    sample_index: u64,
}

impl SimulatedSource {
    pub fn new(config: &EngineConfig, seed: u64) -> Self {
        Self {
            trace_len: config.trace_len,
            iq_block_len: config.iq_block_len,
            rng: StdRng::seed_from_u64(seed),
            noise: Normal::new(0.0, NOISE_JITTER_DB).expect("jitter sigma is positive"),
            phase: 0.0,
            sample_index: 0,
        }
    }
}

impl SpectrumSource for SimulatedSource {
    fn fetch_trace(&mut self) -> Vec<f64> {
        let n = self.trace_len;
        let mut sweep: Vec<f64> = (0..n)
            .map(|_| NOISE_FLOOR_DBM + self.noise.sample(&mut self.rng))
            .collect();
        if n < 8 {
            return sweep;
        }

        // Main carrier: a narrow hump at the sweep center.
        let center = n / 2;
        sweep[center] = CARRIER_DBM;
        sweep[center - 1] = CARRIER_DBM - 6.0;
        sweep[center + 1] = CARRIER_DBM - 6.0;
        sweep[center - 2] = CARRIER_DBM - 25.0;
        sweep[center + 2] = CARRIER_DBM - 25.0;

        // Two spurs well clear of the carrier.
        sweep[n / 4] = LOWER_SPUR_DBM;
        sweep[3 * n / 4] = UPPER_SPUR_DBM;

        sweep
    }

    fn fetch_iq_block(&mut self) -> Vec<Complex<f32>> {
        let noise = Normal::new(0.0, 0.01).expect("iq noise sigma is positive");
        let mut block = Vec::with_capacity(self.iq_block_len);
        for _ in 0..self.iq_block_len {
            let t = self.sample_index as f64 / SIM_SAMPLE_RATE;
            let instantaneous =
                SIM_DEVIATION_HZ * (2.0 * std::f64::consts::PI * SIM_TONE_HZ * t).sin();
            self.phase += 2.0 * std::f64::consts::PI * instantaneous / SIM_SAMPLE_RATE;
            self.sample_index += 1;

            let i = self.phase.cos() + noise.sample(&mut self.rng);
            let q = self.phase.sin() + noise.sample(&mut self.rng);
            block.push(Complex::new(i as f32, q as f32));
        }
        block
    }

    fn sample_rate(&self) -> f64 {
        SIM_SAMPLE_RATE
    }
}
