//! Error taxonomy for the metric engine.
//!
//! Only two things are fatal: a malformed metric configuration (caught in
//! full before any point is streamed) and a point falling outside the
//! declared grid. A bin holding too few samples for a statistic is *not* an
//! error; the affected cell yields `f64::NAN` and the run completes.

use thiserror::Error;

/// Rejection of a Filter / Function / FunctionFilter token or preset name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("unrecognized function in `{0}`")]
    UnknownFunction(String),

    #[error("percentile out of range in `{0}` (must be 0..=100)")]
    PercentileRange(String),

    #[error("unrecognized filter in `{0}` (expected `all` or `1ret`)")]
    UnknownFilter(String),

    #[error("malformed height bound in `{0}` (expected `_ge<int>cm` / `_lt<int>cm`)")]
    BadHeightBound(String),

    #[error("empty height interval in `{0}` (lower bound must be below upper)")]
    EmptyInterval(String),

    #[error("`{0}` is neither a metric token nor a known preset")]
    UnknownPreset(String),
}

/// A point that cannot be routed to a grid cell.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SpatialError {
    #[error("point ({x}, {y}) lies outside the declared grid bounds")]
    OutOfBounds { x: f64, y: f64 },
}
