//! Spectral measurements
//!
//! Pure functions over `SpectrumTrace` and `IqBlock` data. Every
//! operation is total: empty or out-of-range inputs yield the
//! documented degenerate result (negative infinity, zero span, empty
//! set) instead of an error.
//!
//! **Module organization**:
//! - `channel_power` - mean power over a frequency window
//! - `obw` - occupied bandwidth by symmetric expansion
//! - `acpr` - adjacent-channel power ratio
//! - `spurs` - spurious-peak search
//! - `phase_noise` - Welch-PSD phase-noise profile

mod acpr;
mod channel_power;
mod obw;
mod phase_noise;
mod spurs;

pub use acpr::measure_acpr;
pub use channel_power::measure_channel_power;
pub use obw::measure_obw;
pub use phase_noise::measure_phase_noise;
pub use spurs::find_spurs;

/// Adjacent-channel power ratio result. Ratios are `main - adjacent` in
/// dB, so a positive ratio means the adjacent channel is suppressed.
#[derive(Debug, Clone, PartialEq)]
pub struct AcprResult {
    pub main_channel_power: f64,
    pub lower_channel_power: f64,
    pub upper_channel_power: f64,
    pub lower_ratio: f64,
    pub upper_ratio: f64,
}

/// One spurious peak found by [`find_spurs`].
#[derive(Debug, Clone, PartialEq)]
pub struct SpurResult {
    pub frequency: f64,
    pub amplitude: f64,
    /// Amplitude relative to the global peak, always negative.
    pub relative_power: f64,
}

/// Phase noise sampled at requested carrier offsets, in dBc/Hz.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PhaseNoiseProfile {
    /// (offset from carrier in Hz, noise density in dBc/Hz) pairs in
    /// request order.
    pub points: Vec<(f64, f64)>,
}

/// Any single measurement output, as published to the result sink.
#[derive(Debug, Clone, PartialEq)]
pub enum Measurement {
    ChannelPower(f64),
    OccupiedBandwidth(f64),
    Acpr(AcprResult),
    Spurs(Vec<SpurResult>),
    PhaseNoise(PhaseNoiseProfile),
}

/// dBm to linear (milliwatt) power.
pub(crate) fn db_to_linear(db: f64) -> f64 {
    10f64.powf(db / 10.0)
}

/// Linear (milliwatt) power to dBm.
pub(crate) fn linear_to_db(linear: f64) -> f64 {
    10.0 * linear.log10()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn db_linear_round_trip() {
        for db in [-120.0, -30.0, 0.0, 10.0] {
            assert!((linear_to_db(db_to_linear(db)) - db).abs() < 1e-9);
        }
    }
}
