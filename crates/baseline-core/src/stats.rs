use crate::models::BaselineStats;

// ── Moments ───────────────────────────────────────────────────────────────────

/// Arithmetic mean of `counts`.
///
/// Returns `0.0` for an empty slice.
pub fn mean(counts: &[u64]) -> f64 {
    if counts.is_empty() {
        return 0.0;
    }
    let sum: f64 = counts.iter().map(|&c| c as f64).sum();
    sum / counts.len() as f64
}

/// Sample standard deviation of `counts` (Bessel's correction, divisor n-1).
///
/// Fewer than two observations carry no estimable spread, so `0.0` is
/// returned for them.
pub fn sample_std_dev(counts: &[u64]) -> f64 {
    if counts.len() < 2 {
        return 0.0;
    }
    let m = mean(counts);
    let sum_sq: f64 = counts
        .iter()
        .map(|&c| {
            let d = c as f64 - m;
            d * d
        })
        .sum();
    (sum_sq / (counts.len() as f64 - 1.0)).sqrt()
}

/// Reduce a key's per-bucket counts to its baseline.
pub fn summarize(counts: &[u64]) -> BaselineStats {
    BaselineStats {
        mean: mean(counts),
        std: sample_std_dev(counts),
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
