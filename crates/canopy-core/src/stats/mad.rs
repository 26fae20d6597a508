//! Median absolute deviation in O(n) over sorted data.

use super::quantile::median;

/// Median of the absolute deviations from the median.
///
/// For sorted input the deviations can be enumerated in descending order
/// without materializing them: the largest remaining deviation is always at
/// one of the two ends of the untouched range, so two pointers walking
/// inward visit `|x − median|` largest-first. The median of the n
/// deviations is reached after `n/2 + 1` steps; the last visited value (odd
/// n) or the mean of the last two (even n) is the MAD. This replaces the
/// usual "subtract, re-sort, take the median" with a single linear walk.
///
/// n = 0 is undefined (NaN); n = 1 gives 0.
pub fn median_absolute_deviation(sorted: &[f32]) -> f64 {
    let n = sorted.len();
    if n == 0 {
        return f64::NAN;
    }
    if n == 1 {
        return 0.0;
    }

    let med = median(sorted);
    let mut lo = 0usize;
    let mut hi = n - 1;
    let mut last = 0.0f64;
    let mut prev = 0.0f64;

    for _ in 0..n / 2 + 1 {
        let d_lo = med - sorted[lo] as f64;
        let d_hi = sorted[hi] as f64 - med;
        prev = last;
        if d_lo >= d_hi {
            last = d_lo;
            lo += 1;
        } else {
            last = d_hi;
            hi -= 1;
        }
    }

    if n % 2 == 1 {
        last
    } else {
        (prev + last) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    /// Reference MAD: deviations from the median, sorted, median of those.
    /// Kept in f64 throughout so it matches the two-pointer arithmetic
    /// exactly.
    fn mad_naive(sorted: &[f32]) -> f64 {
        if sorted.is_empty() {
            return f64::NAN;
        }
        let med = median(sorted);
        let mut dev: Vec<f64> =
            sorted.iter().map(|&v| (v as f64 - med).abs()).collect();
        dev.sort_unstable_by(f64::total_cmp);
        let n = dev.len();
        if n % 2 == 1 {
            dev[n / 2]
        } else {
            (dev[n / 2 - 1] + dev[n / 2]) / 2.0
        }
    }

    #[test]
    fn known_small_cases() {
        assert!(median_absolute_deviation(&[]).is_nan());
        assert_relative_eq!(median_absolute_deviation(&[7.0]), 0.0);
        assert_relative_eq!(median_absolute_deviation(&[1.0, 5.0]), 2.0);
        assert_relative_eq!(
            median_absolute_deviation(&[1.0, 2.0, 3.0, 4.0, 5.0]),
            1.0
        );
        assert_relative_eq!(median_absolute_deviation(&[2.0, 2.0, 2.0]), 0.0);
    }

    #[test]
    fn heavy_tail_on_one_side() {
        // Deviations [0, 0, 0, 99]; their median is 0.
        assert_relative_eq!(
            median_absolute_deviation(&[1.0, 1.0, 1.0, 100.0]),
            0.0
        );
    }

    #[test]
    fn two_pointer_matches_naive_for_all_small_sizes() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for n in 0..=1000 {
            let mut data: Vec<f32> =
                (0..n).map(|_| rng.gen_range(-50.0f32..50.0)).collect();
            data.sort_unstable_by(f32::total_cmp);
            let fast = median_absolute_deviation(&data);
            let slow = mad_naive(&data);
            if n == 0 {
                assert!(fast.is_nan() && slow.is_nan());
            } else {
                assert_relative_eq!(fast, slow, epsilon = 1e-9, max_relative = 1e-9);
            }
        }
    }

    #[test]
    fn two_pointer_matches_naive_on_clustered_data() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..200 {
            let n = rng.gen_range(2..400);
            // Integer-valued samples force plenty of ties.
            let mut data: Vec<f32> =
                (0..n).map(|_| rng.gen_range(0..8) as f32).collect();
            data.sort_unstable_by(f32::total_cmp);
            assert_relative_eq!(
                median_absolute_deviation(&data),
                mad_naive(&data),
                epsilon = 1e-9
            );
        }
    }
}
