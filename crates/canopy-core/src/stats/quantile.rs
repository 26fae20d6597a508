//! Quantiles and rank counts over an already-sorted slice.
//!
//! All functions are pure, compute in f64, and signal insufficient data by
//! returning `f64::NAN` instead of failing. Inputs must be ascending; the
//! sorted views handed out by the accumulators guarantee this.

/// Smallest element, NaN on empty input.
pub fn min(sorted: &[f32]) -> f64 {
    sorted.first().map_or(f64::NAN, |&v| v as f64)
}

/// Largest element, NaN on empty input.
pub fn max(sorted: &[f32]) -> f64 {
    sorted.last().map_or(f64::NAN, |&v| v as f64)
}

/// Linear-interpolated quantile. `q` is clamped to [0, 1].
///
/// With `f = q·(n−1)` and `i = floor(f)`, interpolates between elements
/// `i` and `i+1` by the fractional part of `f`; `quantile(s, 0)` is the
/// minimum and `quantile(s, 1)` the maximum.
pub fn quantile(sorted: &[f32], q: f64) -> f64 {
    let n = sorted.len();
    if n == 0 {
        return f64::NAN;
    }
    let q = q.clamp(0.0, 1.0);
    let f = q * (n - 1) as f64;
    let i = f.floor() as usize;
    let lo = sorted[i] as f64;
    if i + 1 < n {
        let frac = f - i as f64;
        lo + frac * (sorted[i + 1] as f64 - lo)
    } else {
        lo
    }
}

pub fn percentile(sorted: &[f32], p: f64) -> f64 {
    quantile(sorted, p / 100.0)
}

pub fn quartile(sorted: &[f32], k: u8) -> f64 {
    quantile(sorted, k as f64 / 4.0)
}

pub fn median(sorted: &[f32]) -> f64 {
    quantile(sorted, 0.5)
}

/// Number of elements strictly below `v` (lower-bound binary search).
pub fn count_lt(sorted: &[f32], v: f64) -> usize {
    sorted.partition_point(|&e| (e as f64) < v)
}

/// Number of elements at or above `v`.
pub fn count_ge(sorted: &[f32], v: f64) -> usize {
    sorted.len() - count_lt(sorted, v)
}
