use crate::coords::Coords;
use serde::{Deserialize, Serialize};

/// Undirected raw segment between two points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub a: Coords,
    pub b: Coords,

    /// Segment length in meters
    pub distance: f64,
}

impl Line {
    pub fn new(a: Coords, b: Coords, distance: f64) -> Self {
        Self { a, b, distance }
    }

    /// Line whose length is the great-circle distance between its endpoints
    pub fn between(a: Coords, b: Coords) -> Self {
        let distance = a.distance_to(&b);
        Self { a, b, distance }
    }
}
