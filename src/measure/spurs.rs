//! Spurious-peak search

use super::SpurResult;
use crate::trace::SpectrumTrace;

/// Minimum separation below the global peak for a local maximum to
/// count as a spur rather than the main signal.
const SPUR_EXCLUSION_DB: f64 = 20.0;

/// Find spurious peaks: strict local maxima above `threshold` that sit
/// at least 20 dB below the global peak. The global peak itself can
/// never qualify. Results are sorted by amplitude, strongest first.
///
/// Traces with fewer than three samples have no interior points and
/// yield an empty set.
pub fn find_spurs(trace: &SpectrumTrace, threshold: f64) -> Vec<SpurResult> {
    let amps = &trace.amplitudes;
    if amps.len() < 3 {
        return Vec::new();
    }

    let global_max = amps.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let mut spurs = Vec::new();
    for i in 1..amps.len() - 1 {
        if amps[i] > amps[i - 1]
            && amps[i] > amps[i + 1]
            && amps[i] > threshold
            && amps[i] < global_max - SPUR_EXCLUSION_DB
        {
            spurs.push(SpurResult {
                frequency: trace.frequencies[i],
                amplitude: amps[i],
                relative_power: amps[i] - global_max,
            });
        }
    }

    spurs.sort_by(|a, b| b.amplitude.total_cmp(&a.amplitude));
    spurs
}
