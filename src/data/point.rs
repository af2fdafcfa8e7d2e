//! Resolved trace point: position plus diameter.

use serde::{Deserialize, Serialize};

/// Diameter used when the mesh carries no radius for a node.
pub const DEFAULT_DIAMETER: f64 = 1.0;

/// A node's geometry as written to a trace: `x, y, z` and diameter `d`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    #[serde(rename = "d")]
    pub diameter: f64,
}

impl Point {
    #[inline]
    pub const fn new(x: f64, y: f64, z: f64, diameter: f64) -> Self {
        Point { x, y, z, diameter }
    }

    /// Build a point from coordinates and an optional radius.
    ///
    /// The diameter is twice the radius, or [`DEFAULT_DIAMETER`] without one.
    pub fn from_coordinates(xyz: [f64; 3], radius: Option<f64>) -> Self {
        let diameter = radius.map_or(DEFAULT_DIAMETER, |r| 2.0 * r);
        Point::new(xyz[0], xyz[1], xyz[2], diameter)
    }

    #[inline]
    pub fn coordinates(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// `[x, y, z, d]`
    #[inline]
    pub fn to_array(&self) -> [f64; 4] {
        [self.x, self.y, self.z, self.diameter]
    }
}
