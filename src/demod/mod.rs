//! Multi-mode demodulator
//!
//! Turns IQ blocks into audio. Mode is a closed enum so every mode is
//! handled at compile time. The demodulator owns its FIR kernel and the
//! FM phase memory; both are the only state that survives between
//! `demodulate` calls.
//!
//! Any configuration change (mode, frequency, bandwidth) regenerates
//! the kernel: the hardware reference did this unconditionally and the
//! behavior is reproduced here. AM and FM audio is low-pass filtered
//! through the kernel; USB/LSB/CW audio is not, matching the reference
//! even though the asymmetry looks accidental.

mod am;
mod fm;
mod ssb;

use crate::error::Result;
use crate::filter::FilterKernel;
use rustfft::num_complex::Complex;
use tracing::info;

/// Fixed audio scale applied after volume, common to all modes.
pub(crate) const AUDIO_GAIN: f32 = 100.0;

/// Demodulation mode. CW is recovered as upper sideband.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Am,
    Fm,
    Usb,
    Lsb,
    Cw,
}

/// Multi-mode IQ demodulator with owned filter kernel and FM phase
/// memory.
#[derive(Debug)]
pub struct Demodulator {
    mode: Mode,
    center_freq: f64,
    bandwidth: f64,
    volume: f32,
    prev_phase: f32,
    kernel: FilterKernel,
    order: usize,
}

impl Demodulator {
    /// Create a demodulator with the reference defaults: AM, 1 MHz,
    /// 10 kHz bandwidth, full volume.
    pub fn new(filter_order: usize) -> Result<Self> {
        let bandwidth = 10e3;
        let kernel = FilterKernel::design(bandwidth, filter_order)?;
        Ok(Self {
            mode: Mode::Am,
            center_freq: 1e6,
            bandwidth,
            volume: 1.0,
            prev_phase: 0.0,
            kernel,
            order: filter_order,
        })
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn center_frequency(&self) -> f64 {
        self.center_freq
    }

    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn kernel(&self) -> &FilterKernel {
        &self.kernel
    }

    /// Switch demodulation mode. Entering FM resets the carried phase
    /// so a stale phase from an earlier FM session cannot produce a
    /// click on the first sample.
    pub fn set_mode(&mut self, mode: Mode) -> Result<()> {
        if self.mode != mode {
            info!(?mode, "demodulator mode change");
            if mode == Mode::Fm {
                self.reset_phase();
            }
            self.mode = mode;
            self.rebuild_kernel()?;
        }
        Ok(())
    }

    pub fn set_frequency(&mut self, freq: f64) -> Result<()> {
        if self.center_freq != freq {
            self.center_freq = freq;
            self.rebuild_kernel()?;
        }
        Ok(())
    }

    pub fn set_bandwidth(&mut self, bandwidth: f64) -> Result<()> {
        if self.bandwidth != bandwidth {
            let kernel = FilterKernel::design(bandwidth, self.order)?;
            self.bandwidth = bandwidth;
            self.kernel = kernel;
        }
        Ok(())
    }

    /// Set output volume, clamped to [0, 1]. Does not touch the kernel.
    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
    }

    /// Clear the FM phase memory.
    pub fn reset_phase(&mut self) {
        self.prev_phase = 0.0;
    }

    fn rebuild_kernel(&mut self) -> Result<()> {
        self.kernel = FilterKernel::design(self.bandwidth, self.order)?;
        Ok(())
    }

    /// Demodulate one IQ block into audio of the same length. An empty
    /// block produces empty audio.
    pub fn demodulate(&mut self, samples: &[Complex<f32>]) -> Vec<f32> {
        if samples.is_empty() {
            return Vec::new();
        }
        match self.mode {
            Mode::Am => {
                let audio = am::demodulate(samples, self.volume);
                self.kernel.apply(&audio)
            }
            Mode::Fm => {
                let audio = fm::demodulate(samples, self.volume, &mut self.prev_phase);
                self.kernel.apply(&audio)
            }
            Mode::Usb | Mode::Cw => ssb::demodulate(samples, self.volume, true),
            Mode::Lsb => ssb::demodulate(samples, self.volume, false),
        }
    }
}
