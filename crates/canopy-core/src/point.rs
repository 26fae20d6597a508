//! Input point records.
//!
//! The engine consumes a plain stream of these; decoding laser-scanner file
//! formats is the caller's concern. Coordinate math uses f64; height values
//! use f32.

use serde::{Deserialize, Serialize};

/// One height sample from an airborne point cloud.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointRecord {
    /// Easting in the same planar CRS as the grid / plot table.
    pub x: f64,
    /// Northing.
    pub y: f64,
    /// Height above ground in metres.
    pub height: f32,
    /// Return number from the scanner, if known. 1 = first return.
    pub return_number: Option<u8>,
}

impl PointRecord {
    pub fn new(x: f64, y: f64, height: f32, return_number: Option<u8>) -> Self {
        Self { x, y, height, return_number }
    }

    /// A record with no return number counts as a first return.
    #[inline]
    pub fn is_first_return(&self) -> bool {
        self.return_number.map_or(true, |r| r == 1)
    }
}
