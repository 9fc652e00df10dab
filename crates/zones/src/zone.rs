use crate::connection::Connection;
use crate::coords::Coords;
use crate::error::{Result, ZoneError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Zone name that compares and hashes case-insensitively.
///
/// The original spelling is kept for display; `key()` is the lower-cased
/// form used for every lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct ZoneName {
    display: String,
    key: String,
}

impl ZoneName {
    pub fn new(name: impl Into<String>) -> Self {
        let display = name.into();
        let key = display.to_lowercase();
        Self { display, key }
    }

    pub fn as_str(&self) -> &str {
        &self.display
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

impl PartialEq for ZoneName {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for ZoneName {}

impl Hash for ZoneName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl fmt::Display for ZoneName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display)
    }
}

impl From<String> for ZoneName {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

impl From<&str> for ZoneName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<ZoneName> for String {
    fn from(name: ZoneName) -> Self {
        name.display
    }
}

/// Points a zone yields, as reported by the zone API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Points {
    /// Awarded once when the zone is taken
    pub takeover: u32,

    /// Awarded per hour while the zone is held
    pub per_hour: u32,
}

/// Named, located node of the territory graph.
///
/// Equality and hashing only look at the name.
#[derive(Debug, Clone)]
pub struct Zone {
    name: ZoneName,
    coords: Coords,
    points: Option<Points>,
    connections: Vec<Connection>,
}

impl Zone {
    pub fn new(name: impl Into<ZoneName>, coords: Coords) -> Self {
        Self {
            name: name.into(),
            coords,
            points: None,
            connections: Vec::new(),
        }
    }

    pub fn name(&self) -> &ZoneName {
        &self.name
    }

    pub fn coords(&self) -> Coords {
        self.coords
    }

    pub fn points(&self) -> Option<Points> {
        self.points
    }

    pub fn is_enriched(&self) -> bool {
        self.points.is_some()
    }

    /// Set points exactly once; a second call is an error
    pub fn set_points(&mut self, points: Points) -> Result<()> {
        if self.points.is_some() {
            return Err(ZoneError::AlreadyEnriched {
                name: self.name.to_string(),
            });
        }
        self.points = Some(points);
        Ok(())
    }

    /// Outgoing connections in registration order
    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn has_connection(&self, connection: &Connection) -> bool {
        self.connections.contains(connection)
    }

    /// Register an outgoing connection. Its parent must be this zone.
    pub fn add_connection(&mut self, connection: Connection) -> Result<()> {
        if connection.parent() != &self.name {
            return Err(ZoneError::ForeignConnection {
                zone: self.name.to_string(),
                connection: connection.to_string(),
            });
        }
        self.connections.push(connection);
        Ok(())
    }
}

impl PartialEq for Zone {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Zone {}

impl Hash for Zone {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_zone_name_case_insensitive() {
        let a = ZoneName::new("ZoneA");
        let b = ZoneName::new("zonea");
        assert_eq!(a, b);
        assert_eq!(a.key(), "zonea");
        assert_eq!(a.to_string(), "ZoneA");

        let set: HashSet<ZoneName> = [a, b].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_zone_equality_ignores_location() {
        let a = Zone::new("Central", Coords::new(1.0, 1.0));
        let b = Zone::new("central", Coords::new(2.0, 2.0));
        assert_eq!(a, b);
    }

    #[test]
    fn test_set_points_only_once() {
        let mut zone = Zone::new("Central", Coords::new(1.0, 1.0));
        assert!(!zone.is_enriched());

        zone.set_points(Points { takeover: 185, per_hour: 2 }).unwrap();
        assert_eq!(zone.points().map(|p| p.takeover), Some(185));

        let err = zone
            .set_points(Points { takeover: 1, per_hour: 1 })
            .unwrap_err();
        assert!(matches!(err, ZoneError::AlreadyEnriched { ref name } if name == "Central"));
        assert_eq!(zone.points().map(|p| p.takeover), Some(185));
    }

    #[test]
    fn test_add_connection_requires_own_parent() {
        let mut zone = Zone::new("Central", Coords::new(1.0, 1.0));

        zone.add_connection(Connection::new("central".into(), "East".into(), 10.0))
            .unwrap();
        let err = zone
            .add_connection(Connection::new("East".into(), "Central".into(), 10.0))
            .unwrap_err();

        assert!(matches!(
            err,
            ZoneError::ForeignConnection { ref zone, ref connection }
                if zone == "Central" && connection == "East -> Central"
        ));
        assert_eq!(zone.connections().len(), 1);
    }

    #[test]
    fn test_zone_name_serde_keeps_spelling() {
        let name: ZoneName = serde_json::from_str("\"SlottsBacken\"").unwrap();
        assert_eq!(name.key(), "slottsbacken");
        assert_eq!(serde_json::to_string(&name).unwrap(), "\"SlottsBacken\"");
    }
}
