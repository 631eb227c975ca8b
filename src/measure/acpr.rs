//! Adjacent-channel power ratio

use super::{measure_channel_power, AcprResult};
use crate::trace::SpectrumTrace;

/// ACPR about the trace center: the main channel spans `channel_bw`
/// around the midpoint of the trace's extreme frequencies, the lower
/// and upper adjacent channels span `channel_bw` offset by
/// `channel_spacing` outward from the main channel edges.
///
/// Channels that fall outside the trace measure negative infinity,
/// which shows up as an infinite (fully suppressed) ratio. An empty
/// trace yields all-negative-infinity powers with zero ratios.
pub fn measure_acpr(trace: &SpectrumTrace, channel_bw: f64, channel_spacing: f64) -> AcprResult {
    if trace.is_empty() {
        return AcprResult {
            main_channel_power: f64::NEG_INFINITY,
            lower_channel_power: f64::NEG_INFINITY,
            upper_channel_power: f64::NEG_INFINITY,
            lower_ratio: 0.0,
            upper_ratio: 0.0,
        };
    }

    let center = (trace.start_freq() + trace.stop_freq()) / 2.0;
    let half_bw = channel_bw / 2.0;
    let main_start = center - half_bw;
    let main_stop = center + half_bw;

    let main = measure_channel_power(trace, main_start, main_stop);
    let lower = measure_channel_power(
        trace,
        main_start - channel_spacing - channel_bw,
        main_start - channel_spacing,
    );
    let upper = measure_channel_power(
        trace,
        main_stop + channel_spacing,
        main_stop + channel_spacing + channel_bw,
    );

    AcprResult {
        main_channel_power: main,
        lower_channel_power: lower,
        upper_channel_power: upper,
        lower_ratio: main - lower,
        upper_ratio: main - upper,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 101-point trace over 0..=100 Hz: floor at -80 dBm with a -20 dBm
    /// block in the center 11 samples.
    fn center_loaded_trace() -> SpectrumTrace {
        let freqs: Vec<f64> = (0..=100).map(|i| i as f64).collect();
        let amps: Vec<f64> = (0..=100)
            .map(|i| if (45..=55).contains(&i) { -20.0 } else { -80.0 })
            .collect();
        SpectrumTrace::new(freqs, amps)
    }

    #[test]
    fn main_channel_dominates_adjacent() {
        let trace = center_loaded_trace();
        let result = measure_acpr(&trace, 10.0, 10.0);
        assert!((result.main_channel_power - (-20.0)).abs() < 0.1);
        assert!((result.lower_channel_power - (-80.0)).abs() < 0.1);
        assert!((result.upper_channel_power - (-80.0)).abs() < 0.1);
        assert!(result.lower_ratio > 55.0);
        assert!(result.upper_ratio > 55.0);
    }

    #[test]
    fn symmetric_trace_has_symmetric_ratios() {
        let trace = center_loaded_trace();
        let result = measure_acpr(&trace, 10.0, 20.0);
        assert!((result.lower_ratio - result.upper_ratio).abs() < 1e-9);
    }

    #[test]
    fn empty_trace_yields_degenerate_result() {
        let trace = SpectrumTrace::new(vec![], vec![]);
        let result = measure_acpr(&trace, 10.0, 10.0);
        assert_eq!(result.main_channel_power, f64::NEG_INFINITY);
        assert_eq!(result.lower_ratio, 0.0);
        assert_eq!(result.upper_ratio, 0.0);
    }

    #[test]
    fn adjacent_channel_outside_trace_reads_negative_infinity() {
        let trace = center_loaded_trace();
        // Spacing pushes the adjacent channels past both trace edges.
        let result = measure_acpr(&trace, 10.0, 200.0);
        assert_eq!(result.lower_channel_power, f64::NEG_INFINITY);
        assert_eq!(result.upper_channel_power, f64::NEG_INFINITY);
    }
}
