//! Per-bin statistical metrics of airborne laser scanning height samples.
//!
//! Points stream in as `{x, y, height, return_number}` records and are
//! routed into spatial bins — raster grid cells or circular field plots.
//! Each bin keeps its heights in lazily sorted accumulators; a text-driven
//! configuration (`p95_all_ge200cm`, preset names like `basic-linear`)
//! selects which point subsets and which statistics to evaluate, and the
//! engine produces one floating value per (bin, metric) pair, with NaN for
//! bins holding too few samples.
//!
//! Height values use f32; coordinate and statistic math uses f64.

pub mod accumulator;
pub mod cell;
pub mod config;
pub mod engine;
pub mod error;
pub mod grid;
pub mod plot;
pub mod point;
pub mod stats;

pub use accumulator::{HeightAccumulator, SortedView};
pub use cell::CellAccumulator;
pub use config::{create_set, Filter, Function, FunctionFilter};
pub use engine::{BinId, BinRow, MetricEngine, MetricTable};
pub use error::{ConfigError, SpatialError};
pub use grid::GridIndex;
pub use plot::PlotRecord;
pub use point::PointRecord;
