//! Statistic selectors, parsed from text.
//!
//! `count | mean | mean2 | variance | skewness | kurtosis | L2 | L3 | L4 |
//! mad | p<N>` with N in 0..=100. `variance` is the sample variance;
//! `skewness` and `kurtosis` are the bias-corrected sample forms (G1, G2).

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::stats::{self, SummaryAccumulator};

/// One statistic over a bin's (filtered, sorted) height span.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Function {
    Count,
    Mean,
    MeanSquare,
    Variance,
    Skewness,
    Kurtosis,
    L2,
    L3,
    L4,
    Mad,
    Percentile(u8),
}

impl Function {
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        Ok(match text {
            "count" => Self::Count,
            "mean" => Self::Mean,
            "mean2" => Self::MeanSquare,
            "variance" => Self::Variance,
            "skewness" => Self::Skewness,
            "kurtosis" => Self::Kurtosis,
            "L2" => Self::L2,
            "L3" => Self::L3,
            "L4" => Self::L4,
            "mad" => Self::Mad,
            _ => {
                let digits = text.strip_prefix('p').ok_or_else(|| {
                    ConfigError::UnknownFunction(text.to_string())
                })?;
                if digits.is_empty()
                    || !digits.bytes().all(|b| b.is_ascii_digit())
                {
                    return Err(ConfigError::UnknownFunction(text.to_string()));
                }
                let p: u32 = digits.parse().map_err(|_| {
                    ConfigError::PercentileRange(text.to_string())
                })?;
                if p > 100 {
                    return Err(ConfigError::PercentileRange(text.to_string()));
                }
                Self::Percentile(p as u8)
            }
        })
    }

    pub fn to_text(&self) -> String {
        match *self {
            Self::Count => "count".to_string(),
            Self::Mean => "mean".to_string(),
            Self::MeanSquare => "mean2".to_string(),
            Self::Variance => "variance".to_string(),
            Self::Skewness => "skewness".to_string(),
            Self::Kurtosis => "kurtosis".to_string(),
            Self::L2 => "L2".to_string(),
            Self::L3 => "L3".to_string(),
            Self::L4 => "L4".to_string(),
            Self::Mad => "mad".to_string(),
            Self::Percentile(p) => format!("p{p}"),
        }
    }

    /// Apply the statistic to a sorted height span. NaN when the span is
    /// too small for the statistic; `count` is always defined.
    pub fn evaluate(&self, span: &[f32]) -> f64 {
        match *self {
            Self::Count => span.len() as f64,
            Self::Mean => SummaryAccumulator::from_values(span).mean(),
            Self::MeanSquare => {
                SummaryAccumulator::from_values(span).mean_square()
            }
            Self::Variance => {
                SummaryAccumulator::from_values(span).sample_variance()
            }
            Self::Skewness => SummaryAccumulator::from_values(span).skewness(),
            Self::Kurtosis => SummaryAccumulator::from_values(span).kurtosis(),
            Self::L2 => stats::l_moment(span, 2),
            Self::L3 => stats::l_moment(span, 3),
            Self::L4 => stats::l_moment(span, 4),
            Self::Mad => stats::median_absolute_deviation(span),
            Self::Percentile(p) => stats::percentile(span, p as f64),
        }
    }
}

impl std::fmt::Display for Function {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const S: &[f32] = &[1.0, 2.0, 3.0, 4.0, 5.0];

    #[test]
    fn names_round_trip() {
        for token in [
            "count", "mean", "mean2", "variance", "skewness", "kurtosis",
            "L2", "L3", "L4", "mad", "p0", "p50", "p95", "p100",
        ] {
            let f = Function::parse(token).unwrap();
            assert_eq!(f.to_text(), token, "round trip of `{token}`");
        }
    }

    #[test]
    fn bad_names_are_rejected() {
        assert!(matches!(
            Function::parse("average"),
            Err(ConfigError::UnknownFunction(_))
        ));
        assert!(matches!(
            Function::parse("l2"),
            Err(ConfigError::UnknownFunction(_))
        ));
        assert!(matches!(
            Function::parse("p"),
            Err(ConfigError::UnknownFunction(_))
        ));
        assert!(matches!(
            Function::parse("p12a"),
            Err(ConfigError::UnknownFunction(_))
        ));
        assert!(matches!(
            Function::parse("p101"),
            Err(ConfigError::PercentileRange(_))
        ));
        assert!(matches!(
            Function::parse("p4294967296"),
            Err(ConfigError::PercentileRange(_))
        ));
    }

    #[test]
    fn parsed_percentile_evaluates_like_the_library() {
        let f = Function::parse("p95").unwrap();
        assert_relative_eq!(f.evaluate(S), stats::percentile(S, 95.0));
        let f0 = Function::parse("p0").unwrap();
        assert_relative_eq!(f0.evaluate(S), stats::min(S));
    }

    #[test]
    fn evaluation_on_the_ladder() {
        assert_relative_eq!(Function::Count.evaluate(S), 5.0);
        assert_relative_eq!(Function::Mean.evaluate(S), 3.0);
        assert_relative_eq!(Function::MeanSquare.evaluate(S), 11.0);
        assert_relative_eq!(Function::Variance.evaluate(S), 2.5);
        assert_relative_eq!(Function::Mad.evaluate(S), 1.0);
        assert_relative_eq!(Function::L2.evaluate(S), 1.0);
    }

    #[test]
    fn small_spans_yield_nan_not_panics() {
        assert_relative_eq!(Function::Count.evaluate(&[]), 0.0);
        assert!(Function::Mean.evaluate(&[]).is_nan());
        assert!(Function::Variance.evaluate(&[2.0]).is_nan());
        assert!(Function::Skewness.evaluate(&[1.0, 2.0]).is_nan());
        assert!(Function::Kurtosis.evaluate(&[1.0, 2.0, 3.0]).is_nan());
        assert!(Function::L4.evaluate(&[1.0, 2.0, 3.0]).is_nan());
    }
}
