//! Statistical descriptors of height samples.
//!
//! `quantile`, `mad` and `lmoments` are pure order-statistics functions
//! over already-sorted slices; `summary` is the streaming power-sum
//! accumulator for the conventional moments.

pub mod lmoments;
pub mod mad;
pub mod quantile;
pub mod summary;

pub use lmoments::{
    l_moment, l_moment_ratio, tl_moment, tl_moment_ratio, tl_moment_sym,
};
pub use mad::median_absolute_deviation;
pub use quantile::{
    count_ge, count_lt, max, median, min, percentile, quantile, quartile,
};
pub use summary::SummaryAccumulator;
