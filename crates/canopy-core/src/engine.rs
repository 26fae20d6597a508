//! The driving loop: route points into bins, then evaluate a metric set
//! against every bin.
//!
//! Bins share no state, so the streaming phase shards trivially by bin
//! range and the evaluation phase is read-only per bin: `evaluate_until`
//! offers a cooperative cancellation checkpoint between bins, and
//! `evaluate_par` (feature `threading`) fans the same work out with rayon,
//! one worker per bin at a time.

use std::sync::atomic::{AtomicBool, Ordering};

#[cfg(feature = "threading")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::cell::CellAccumulator;
use crate::config::FunctionFilter;
use crate::error::SpatialError;
use crate::grid::GridIndex;
use crate::plot::PlotRecord;
use crate::point::PointRecord;

/// Identity of one output row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinId {
    Cell { row: usize, col: usize },
    Plot { id: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BinRow {
    pub bin: BinId,
    /// One value per column; NaN marks a statistic the bin lacks samples
    /// for.
    pub values: Vec<f64>,
}

/// Evaluation result: one column per resolved FunctionFilter, one row per
/// bin. Rows cut off by cancellation are simply absent; the ones present
/// are complete and valid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricTable {
    pub columns: Vec<String>,
    pub rows: Vec<BinRow>,
}

enum Router {
    Grid(GridIndex),
    Plots(Vec<PlotRecord>),
}

impl Router {
    fn bin_id(&self, i: usize) -> BinId {
        match self {
            Router::Grid(g) => {
                BinId::Cell { row: i / g.cols, col: i % g.cols }
            }
            Router::Plots(plots) => BinId::Plot { id: plots[i].id.clone() },
        }
    }
}

/// Owns every bin for one run. Create once, stream points, evaluate.
pub struct MetricEngine {
    router: Router,
    bins: Vec<CellAccumulator>,
    skipped: u64,
}

impl MetricEngine {
    /// Raster mode: one bin per grid cell, row-major from the north-west
    /// corner.
    pub fn grid(index: GridIndex) -> Self {
        let bins = vec![CellAccumulator::new(); index.n_cells()];
        Self { router: Router::Grid(index), bins, skipped: 0 }
    }

    /// Plot mode: one bin per record, in table order.
    pub fn plots(records: Vec<PlotRecord>) -> Self {
        let bins = vec![CellAccumulator::new(); records.len()];
        Self { router: Router::Plots(records), bins, skipped: 0 }
    }

    pub fn grid_index(&self) -> Option<&GridIndex> {
        match &self.router {
            Router::Grid(g) => Some(g),
            Router::Plots(_) => None,
        }
    }

    #[inline]
    pub fn n_bins(&self) -> usize {
        self.bins.len()
    }

    /// Points dropped for carrying a non-finite height.
    #[inline]
    pub fn skipped(&self) -> u64 {
        self.skipped
    }

    /// Route one point. In grid mode a point outside the declared bounds
    /// (beyond the boundary tolerance) is a fatal configuration mismatch;
    /// in plot mode a point is pushed into every plot containing it and
    /// silently ignored when none does.
    pub fn push(&mut self, point: &PointRecord) -> Result<(), SpatialError> {
        if !point.height.is_finite() {
            self.skipped += 1;
            return Ok(());
        }
        let first = point.is_first_return();
        match &self.router {
            Router::Grid(g) => {
                let cell = g.cell(point.x, point.y).ok_or(
                    SpatialError::OutOfBounds { x: point.x, y: point.y },
                )?;
                self.bins[cell].push(point.height, first);
            }
            Router::Plots(plots) => {
                for (i, plot) in plots.iter().enumerate() {
                    if plot.contains(point.x, point.y) {
                        self.bins[i].push(point.height, first);
                    }
                }
            }
        }
        Ok(())
    }

    pub fn extend<'a, I>(&mut self, points: I) -> Result<(), SpatialError>
    where
        I: IntoIterator<Item = &'a PointRecord>,
    {
        for p in points {
            self.push(p)?;
        }
        Ok(())
    }

    /// Evaluate every column against every bin, in bin order.
    pub fn evaluate(&mut self, set: &[FunctionFilter]) -> MetricTable {
        self.evaluate_until(set, &AtomicBool::new(false))
    }

    /// As `evaluate`, but checks `cancel` between bins and stops early
    /// when it is raised. Rows already produced stay valid; re-running
    /// later yields the same values (sorting is not observable).
    pub fn evaluate_until(
        &mut self,
        set: &[FunctionFilter],
        cancel: &AtomicBool,
    ) -> MetricTable {
        let columns: Vec<String> =
            set.iter().map(FunctionFilter::to_text).collect();
        let mut rows = Vec::with_capacity(self.bins.len());
        for (i, cell) in self.bins.iter_mut().enumerate() {
            if cancel.load(Ordering::Relaxed) {
                break;
            }
            rows.push(BinRow {
                bin: self.router.bin_id(i),
                values: evaluate_cell(cell, set),
            });
        }
        MetricTable { columns, rows }
    }

    /// Parallel evaluation across bins. Each bin is touched by exactly
    /// one worker, which is all the synchronization the lazy sort needs.
    #[cfg(feature = "threading")]
    pub fn evaluate_par(&mut self, set: &[FunctionFilter]) -> MetricTable {
        let columns: Vec<String> =
            set.iter().map(FunctionFilter::to_text).collect();
        let router = &self.router;
        let rows: Vec<BinRow> = self
            .bins
            .par_iter_mut()
            .enumerate()
            .map(|(i, cell)| BinRow {
                bin: router.bin_id(i),
                values: evaluate_cell(cell, set),
            })
            .collect();
        MetricTable { columns, rows }
    }
}

fn evaluate_cell(cell: &mut CellAccumulator, set: &[FunctionFilter]) -> Vec<f64> {
    set.iter()
        .map(|ff| ff.function.evaluate(cell.ordered_span(&ff.filter)))
        .collect()
}
