//! Channel power

use super::{db_to_linear, linear_to_db};
use crate::trace::SpectrumTrace;

/// Mean power in dBm over all trace samples with
/// `start_freq <= f <= stop_freq`.
///
/// Powers are averaged in the linear domain and converted back to dBm.
/// Returns negative infinity when no sample falls in the window;
/// callers must treat that as "no data", not an error.
pub fn measure_channel_power(trace: &SpectrumTrace, start_freq: f64, stop_freq: f64) -> f64 {
    let mut total = 0.0;
    let mut count = 0usize;

    for (&freq, &amp) in trace.frequencies.iter().zip(trace.amplitudes.iter()) {
        if freq >= start_freq && freq <= stop_freq {
            total += db_to_linear(amp);
            count += 1;
        }
    }

    if count == 0 {
        return f64::NEG_INFINITY;
    }
    linear_to_db(total / count as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat_trace(level_dbm: f64, n: usize) -> SpectrumTrace {
        SpectrumTrace::new((0..n).map(|i| i as f64).collect(), vec![level_dbm; n])
    }

    #[test]
    fn flat_trace_power_equals_level() {
        let trace = flat_trace(-30.0, 11);
        let power = measure_channel_power(&trace, 0.0, 10.0);
        assert!((power - (-30.0)).abs() < 1e-9);
    }

    #[test]
    fn empty_window_returns_negative_infinity() {
        let trace = flat_trace(-30.0, 11);
        assert_eq!(
            measure_channel_power(&trace, 100.0, 200.0),
            f64::NEG_INFINITY
        );
    }

    #[test]
    fn empty_trace_returns_negative_infinity() {
        let trace = SpectrumTrace::new(vec![], vec![]);
        assert_eq!(measure_channel_power(&trace, 0.0, 1.0), f64::NEG_INFINITY);
    }

    #[test]
    fn window_bounds_are_inclusive() {
        let trace = SpectrumTrace::new(vec![1.0, 2.0, 3.0], vec![-10.0, -90.0, -10.0]);
        // Exactly the edge samples.
        let power = measure_channel_power(&trace, 1.0, 1.0);
        assert!((power - (-10.0)).abs() < 1e-9);
    }

    #[test]
    fn growing_window_over_peak_is_monotone_in_power() {
        // One strong bin among a weak floor: widening the window past
        // the peak only adds averaging mass, but total dB power over a
        // window that grows to include a stronger sample never drops
        // below the floor-only value.
        let trace = SpectrumTrace::new(
            (0..9).map(|i| i as f64).collect(),
            vec![-80.0, -80.0, -80.0, -80.0, -10.0, -80.0, -80.0, -80.0, -80.0],
        );
        let narrow = measure_channel_power(&trace, 0.0, 3.0);
        let with_peak = measure_channel_power(&trace, 0.0, 4.0);
        assert!(with_peak > narrow);
    }
}
