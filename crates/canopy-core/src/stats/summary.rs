//! Single-pass weighted power-sum accumulator.
//!
//! Maintains Σ x^p·w and Σ w^p for p = 1..=P while streaming, and derives
//! mean, variance and the named skewness/kurtosis conventions algebraically
//! from the sums — the data is never re-scanned. Central moments come from
//! the Pascal's-triangle expansion of (x − μ)^p over the raw power sums.

/// Running power sums of order `P` (4 unless a caller needs more).
#[derive(Debug, Clone)]
pub struct SummaryAccumulator {
    order: usize,
    /// x_sums[p−1] = Σ x^p · w
    x_sums: Vec<f64>,
    /// w_sums[p−1] = Σ w^p
    w_sums: Vec<f64>,
    count: u64,
}

impl Default for SummaryAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl SummaryAccumulator {
    /// Accumulator of order 4, enough for every derived statistic here.
    pub fn new() -> Self {
        Self::with_order(4)
    }

    pub fn with_order(order: usize) -> Self {
        assert!(order >= 1, "power-sum order must be at least 1");
        Self {
            order,
            x_sums: vec![0.0; order],
            w_sums: vec![0.0; order],
            count: 0,
        }
    }

    pub fn from_values(values: &[f32]) -> Self {
        let mut acc = Self::new();
        for &v in values {
            acc.push(v as f64);
        }
        acc
    }

    #[inline]
    pub fn push(&mut self, x: f64) {
        self.push_weighted(x, 1.0);
    }

    pub fn push_weighted(&mut self, x: f64, w: f64) {
        let mut xp = 1.0;
        let mut wp = 1.0;
        for p in 0..self.order {
            xp *= x;
            wp *= w;
            self.x_sums[p] += xp * w;
            self.w_sums[p] += wp;
        }
        self.count += 1;
    }

    #[inline]
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Total weight W₁ = Σ w.
    #[inline]
    pub fn weight(&self) -> f64 {
        self.w_sums[0]
    }

    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            return f64::NAN;
        }
        self.x_sums[0] / self.w_sums[0]
    }

    /// Mean of squares, Σx²w / Σw.
    pub fn mean_square(&self) -> f64 {
        if self.count == 0 || self.order < 2 {
            return f64::NAN;
        }
        self.x_sums[1] / self.w_sums[0]
    }

    /// Weighted central sum M_p = Σ w·(x − μ)^p, expanded over the power
    /// sums: M_p = Σ_{k=0..p} C(p,k)·(−μ)^(p−k)·S_k with S_0 = W₁.
    fn central_sum(&self, p: usize) -> f64 {
        debug_assert!(p >= 1 && p <= self.order);
        let mu = self.mean();
        let mut acc = 0.0;
        let mut c = 1.0f64; // C(p, k), updated along the row
        for k in 0..=p {
            let s_k = if k == 0 { self.w_sums[0] } else { self.x_sums[k - 1] };
            acc += c * (-mu).powi((p - k) as i32) * s_k;
            c = c * (p - k) as f64 / (k + 1) as f64;
        }
        acc
    }

    /// Population central moment m_p = M_p / W₁.
    pub fn central_moment(&self, p: usize) -> f64 {
        if self.count == 0 || p < 1 || p > self.order {
            return f64::NAN;
        }
        self.central_sum(p) / self.w_sums[0]
    }

    pub fn population_variance(&self) -> f64 {
        self.central_moment(2)
    }

    /// Unbiased form M₂·W₁ / (W₁² − W₂); reduces to M₂/(n−1) for unit
    /// weights.
    pub fn sample_variance(&self) -> f64 {
        if self.count < 2 || self.order < 2 {
            return f64::NAN;
        }
        let w1 = self.w_sums[0];
        let w2 = self.w_sums[1];
        self.central_sum(2) * w1 / (w1 * w1 - w2)
    }

    pub fn population_stddev(&self) -> f64 {
        self.population_variance().sqrt()
    }

    pub fn sample_stddev(&self) -> f64 {
        self.sample_variance().sqrt()
    }

    // Skewness. All three need at least 3 samples.

    /// g₁ = m₃ / m₂^(3/2).
    pub fn skewness_g1(&self) -> f64 {
        if self.count < 3 || self.order < 3 {
            return f64::NAN;
        }
        let m2 = self.central_moment(2);
        self.central_moment(3) / (m2 * m2.sqrt())
    }

    /// Bias-corrected G₁ = g₁ · √(n(n−1)) / (n−2).
    pub fn skewness(&self) -> f64 {
        if self.count < 3 {
            return f64::NAN;
        }
        let n = self.count as f64;
        self.skewness_g1() * (n * (n - 1.0)).sqrt() / (n - 2.0)
    }

    /// b₁ = m₃ / s³ with the sample standard deviation.
    pub fn skewness_b1(&self) -> f64 {
        if self.count < 3 || self.order < 3 {
            return f64::NAN;
        }
        let s = self.sample_stddev();
        self.central_moment(3) / (s * s * s)
    }

    // Kurtosis. Six conventions, selected by name; all need ≥ 4 samples.

    /// β₂ = m₄ / m₂².
    pub fn population_kurtosis_pearson(&self) -> f64 {
        if self.count < 4 || self.order < 4 {
            return f64::NAN;
        }
        let m2 = self.central_moment(2);
        self.central_moment(4) / (m2 * m2)
    }

    /// Excess form β₂ − 3.
    pub fn population_kurtosis_fisher(&self) -> f64 {
        self.population_kurtosis_pearson() - 3.0
    }

    /// [M₄/(n−1)] / s⁴.
    pub fn sample_kurtosis_pearson(&self) -> f64 {
        if self.count < 4 || self.order < 4 {
            return f64::NAN;
        }
        let n = self.count as f64;
        let s2 = self.sample_variance();
        self.central_sum(4) / (n - 1.0) / (s2 * s2)
    }

    pub fn sample_kurtosis_fisher(&self) -> f64 {
        self.sample_kurtosis_pearson() - 3.0
    }

    /// Bias-corrected G₂ = [(n−1)/((n−2)(n−3))]·[(n+1)(β₂−3) + 6].
    pub fn kurtosis(&self) -> f64 {
        if self.count < 4 {
            return f64::NAN;
        }
        let n = self.count as f64;
        let g2 = self.population_kurtosis_fisher();
        (n - 1.0) / ((n - 2.0) * (n - 3.0)) * ((n + 1.0) * g2 + 6.0)
    }

    /// b₂ = m₄ / s⁴ with the sample variance.
    pub fn kurtosis_b2(&self) -> f64 {
        if self.count < 4 || self.order < 4 {
            return f64::NAN;
        }
        let s2 = self.sample_variance();
        self.central_moment(4) / (s2 * s2)
    }
}
