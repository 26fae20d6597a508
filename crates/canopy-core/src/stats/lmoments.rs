//! Sample L-moments and trimmed L-moments of sorted data.
//!
//! Direct estimators over order statistics: orders 1..4 use closed-form
//! integer-weight scans in O(n), higher orders fall back to a generic
//! O(n·r) pass over probability-weighted partial products. Trimmed
//! L-moments follow Elamir & Seheult (2003) with the rank binomials
//! updated incrementally as the scan advances.

/// Sample L-moment of order `r`. NaN when `n < r` or `r` is 0.
pub fn l_moment(sorted: &[f32], r: usize) -> f64 {
    let n = sorted.len();
    if r == 0 || n < r {
        return f64::NAN;
    }
    match r {
        1 => sorted.iter().map(|&v| v as f64).sum::<f64>() / n as f64,
        2 => l2(sorted),
        3 => l3(sorted),
        4 => l4(sorted),
        _ => l_moment_generic(sorted, r),
    }
}

/// L-moment ratio τ_r = λ_r / λ_2 for `r > 2` (τ_3 is L-skewness, τ_4
/// L-kurtosis).
pub fn l_moment_ratio(sorted: &[f32], r: usize) -> f64 {
    l_moment(sorted, r) / l_moment(sorted, 2)
}

/// Trimmed L-moment of order `r` with `s` smallest and `t` largest order
/// statistics removed from influence. NaN when fewer than `r` samples
/// remain after trimming.
pub fn tl_moment(sorted: &[f32], r: usize, s: usize, t: usize) -> f64 {
    let n = sorted.len();
    if r == 0 || n < r + s + t {
        return f64::NAN;
    }

    // l_r^(s,t) = Σ_p x_(p) Σ_k (−1)^k C(r−1,k) C(p−1, r+s−1−k) C(n−p, t+k)
    //             / (r · C(n, r+s+t)),   p = s+1 ..= n−t
    let mut acc = 0.0f64;
    for k in 0..r {
        let sign = if k % 2 == 0 { 1.0 } else { -1.0 };
        let c_rk = binom(r - 1, k);
        let a = r + s - 1 - k; // rank binomial C(p−1, a)
        let b = t + k; //          tail binomial C(n−p, b)

        // Both binomials advance by one multiplicative step per element
        // instead of being recomputed; C(p−1, a) seeds to 1 when p−1
        // first reaches a, C(n−p, b) decays to 0 once n−p drops below b.
        let mut front = binom(s, a);
        let mut back = binom(n - s - 1, b);
        let mut sum = 0.0f64;
        for p in (s + 1)..=(n - t) {
            sum += front * back * sorted[p - 1] as f64;
            if p == n - t {
                break;
            }
            front = if p < a {
                0.0
            } else if p == a {
                1.0
            } else {
                front * p as f64 / (p - a) as f64
            };
            back = back * ((n - p) as f64 - b as f64) / (n - p) as f64;
        }
        acc += sign * c_rk * sum;
    }
    acc / (r as f64 * binom(n, r + s + t))
}

/// Symmetric trim: `tl_moment(r, s, s)`.
pub fn tl_moment_sym(sorted: &[f32], r: usize, s: usize) -> f64 {
    tl_moment(sorted, r, s, s)
}

/// TL-moment ratio τ_r^(s,t) = λ_r^(s,t) / λ_2^(s,t) for `r > 2`.
pub fn tl_moment_ratio(sorted: &[f32], r: usize, s: usize, t: usize) -> f64 {
    tl_moment(sorted, r, s, t) / tl_moment(sorted, 2, s, t)
}

/// λ_2: weight 2p − n − 1 runs from −(n−1) to n−1 in steps of 2.
fn l2(sorted: &[f32]) -> f64 {
    let n = sorted.len();
    let mut k = -((n as i64) - 1);
    let mut sum = 0.0f64;
    for &x in sorted {
        sum += k as f64 * x as f64;
        k += 2;
    }
    sum / (n as f64 * (n - 1) as f64)
}

/// λ_3 weight per 0-based rank a (b = n−1−a):
///   C(a,2) − 2ab + C(b,2)
fn l3(sorted: &[f32]) -> f64 {
    let n = sorted.len();
    let mut sum = 0.0f64;
    for (i, &x) in sorted.iter().enumerate() {
        let a = i as f64;
        let b = (n - 1 - i) as f64;
        let w = 0.5 * a * (a - 1.0) - 2.0 * a * b + 0.5 * b * (b - 1.0);
        sum += w * x as f64;
    }
    2.0 * sum / (n as f64 * (n - 1) as f64 * (n - 2) as f64)
}

/// λ_4 weight per 0-based rank a (b = n−1−a):
///   C(a,3) − 3·C(a,2)·b + 3·a·C(b,2) − C(b,3)
fn l4(sorted: &[f32]) -> f64 {
    let n = sorted.len();
    let mut sum = 0.0f64;
    for (i, &x) in sorted.iter().enumerate() {
        let a = i as f64;
        let b = (n - 1 - i) as f64;
        let c2a = 0.5 * a * (a - 1.0);
        let c2b = 0.5 * b * (b - 1.0);
        let c3a = a * (a - 1.0) * (a - 2.0) / 6.0;
        let c3b = b * (b - 1.0) * (b - 2.0) / 6.0;
        let w = c3a - 3.0 * c2a * b + 3.0 * a * c2b - c3b;
        sum += w * x as f64;
    }
    6.0 * sum
        / (n as f64 * (n - 1) as f64 * (n - 2) as f64 * (n - 3) as f64)
}

/// Generic estimator via probability-weighted moments.
///
/// One pass maintains the r partial products
///   t_k(p) = C(p−1, k) / C(n−1, k),  k = 0..r−1,
/// each updated multiplicatively per element, accumulating
///   B_k = Σ_p t_k(p)·x_(p).
/// The L-moment is then Σ_k (−1)^(r−1−k) C(r−1,k) C(r−1+k,k) · B_k / n.
fn l_moment_generic(sorted: &[f32], r: usize) -> f64 {
    let n = sorted.len();
    let mut b_sums = vec![0.0f64; r];
    for (i, &x) in sorted.iter().enumerate() {
        let p = i + 1;
        let mut t = 1.0f64;
        for (k, b) in b_sums.iter_mut().enumerate() {
            *b += t * x as f64;
            if k + 1 < r {
                // advance t from ratio order k to k+1
                t *= (p as f64 - 1.0 - k as f64) / (n as f64 - 1.0 - k as f64);
            }
        }
    }

    let mut lm = 0.0f64;
    for (k, b) in b_sums.iter().enumerate() {
        let sign = if (r - 1 - k) % 2 == 0 { 1.0 } else { -1.0 };
        lm += sign * binom(r - 1, k) * binom(r - 1 + k, k) * b / n as f64;
    }
    lm
}

fn binom(n: usize, k: usize) -> f64 {
    if k > n {
        return 0.0;
    }
    (0..k).fold(1.0f64, |acc, j| acc * (n - j) as f64 / (j + 1) as f64)
}
