use crate::error::Result;
use crate::line::Line;
use crate::zone::ZoneName;
use crate::zone_set::ZoneSet;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Which endpoint of a [`Line`] becomes the parent of a connection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// `line.a` resolves to the parent, `line.b` to the neighbor
    ParentIsLeft,

    /// `line.b` resolves to the parent, `line.a` to the neighbor
    ParentIsRight,
}

/// One-way connection from a parent zone to its neighbor.
///
/// Two connections are equal when they join the same ordered pair of zones,
/// whatever distance they carry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Connection {
    parent: ZoneName,
    neighbor: ZoneName,

    /// Meters, copied from the source line
    distance: f64,
}

impl Connection {
    pub fn new(parent: ZoneName, neighbor: ZoneName, distance: f64) -> Self {
        Self {
            parent,
            neighbor,
            distance,
        }
    }

    /// Resolve both endpoints of `line` to their closest zones in `zones`.
    ///
    /// Nothing is registered; pass the result to [`crate::Zone::add_connection`]
    /// or use [`ZoneSet::connect`] to do both at once. Both endpoints may
    /// resolve to the same zone.
    pub fn resolve(line: &Line, zones: &ZoneSet, direction: Direction) -> Result<Self> {
        let (parent_at, neighbor_at) = match direction {
            Direction::ParentIsLeft => (&line.a, &line.b),
            Direction::ParentIsRight => (&line.b, &line.a),
        };

        let parent = zones.closest_zone_to(parent_at)?.name().clone();
        let neighbor = zones.closest_zone_to(neighbor_at)?.name().clone();

        Ok(Self::new(parent, neighbor, line.distance))
    }

    pub fn parent(&self) -> &ZoneName {
        &self.parent
    }

    pub fn neighbor(&self) -> &ZoneName {
        &self.neighbor
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn is_self_loop(&self) -> bool {
        self.parent == self.neighbor
    }

    /// Same edge walked the other way
    pub fn reversed(&self) -> Self {
        Self::new(self.neighbor.clone(), self.parent.clone(), self.distance)
    }
}

impl PartialEq for Connection {
    fn eq(&self, other: &Self) -> bool {
        self.parent == other.parent && self.neighbor == other.neighbor
    }
}

impl Eq for Connection {}

impl Hash for Connection {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.parent.hash(state);
        self.neighbor.hash(state);
    }
}

impl fmt::Display for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.parent, self.neighbor)
    }
}
