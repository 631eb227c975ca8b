//! Occupied bandwidth

use super::db_to_linear;
use crate::trace::SpectrumTrace;

/// Frequency span around the trace midpoint that contains `percentage`
/// percent of the total linear power.
///
/// The window expands symmetrically from the midpoint index one step at
/// a time, re-summing the enclosed linear power, until the target is
/// met or the window covers the whole trace. Indices are clamped at the
/// trace edges, so an unreachable target (percentage >= 100 on an
/// asymmetric trace, or a tiny trace) terminates at full width.
/// An empty trace yields 0.0.
pub fn measure_obw(trace: &SpectrumTrace, percentage: f64) -> f64 {
    let n = trace.len();
    if n == 0 {
        return 0.0;
    }

    let total: f64 = trace.amplitudes.iter().map(|&a| db_to_linear(a)).sum();
    let target = total * percentage / 100.0;

    let center = n / 2;
    let mut bandwidth = 0usize;
    let mut current = 0.0;

    while current < target && bandwidth < n {
        let lo = center.saturating_sub(bandwidth / 2);
        let hi = (center + bandwidth / 2).min(n - 1);
        current = trace.amplitudes[lo..=hi]
            .iter()
            .map(|&a| db_to_linear(a))
            .sum();
        bandwidth += 1;
    }

    let lo = center.saturating_sub(bandwidth / 2);
    let hi = (center + bandwidth / 2).min(n - 1);
    (trace.frequencies[hi] - trace.frequencies[lo]).abs()
}
