//! Circular field-plot records.

use serde::{Deserialize, Serialize};

/// One surveyed sample plot: centre coordinates and radius in the same
/// planar CRS and unit as the point stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotRecord {
    pub id: String,
    pub east: f64,
    pub north: f64,
    pub radius: f64,
}

impl PlotRecord {
    pub fn new(
        id: impl Into<String>,
        east: f64,
        north: f64,
        radius: f64,
    ) -> Self {
        Self { id: id.into(), east, north, radius }
    }

    /// Whether `(x, y)` falls inside the plot circle (boundary inclusive).
    #[inline]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        let dx = x - self.east;
        let dy = y - self.north;
        dx * dx + dy * dy <= self.radius * self.radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn membership_is_boundary_inclusive() {
        let p = PlotRecord::new("1001", 100.0, 200.0, 10.0);
        assert!(p.contains(100.0, 200.0));
        assert!(p.contains(110.0, 200.0));
        assert!(p.contains(107.0, 207.0)); // √98 < 10
        assert!(!p.contains(107.2, 207.2));
        assert!(!p.contains(100.0, 210.1));
    }
}
