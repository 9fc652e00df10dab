use crate::connection::{Connection, Direction};
use crate::coords::Coords;
use crate::error::{Result, ZoneError};
use crate::fetch::{MetadataFetcher, ZoneQuery};
use crate::line::Line;
use crate::zone::{Points, Zone};
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Where a set's zone data comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Provenance {
    /// Built locally, no points fetched yet
    Synthetic,

    /// Points fetched from the zone API and applied to every member
    Enriched,
}

/// Non-fatal finding from an enrichment run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// The API answered with a different number of records than requested
    /// although every member was matched
    CountMismatch { requested: usize, returned: usize },

    /// The API returned a zone more than once; only the first record is used
    DuplicateRecord { name: String },

    /// The API returned a zone that is not a member of the set
    UnknownRecord { name: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CountMismatch {
                requested,
                returned,
            } => write!(
                f,
                "API returned {returned} zones for {requested} requested, but every zone was found"
            ),
            Self::DuplicateRecord { name } => write!(f, "API returned zone {name} more than once"),
            Self::UnknownRecord { name } => write!(f, "API returned unrequested zone {name}"),
        }
    }
}

/// Outcome of a successful enrichment
#[derive(Debug, Clone, Serialize)]
pub struct EnrichReport {
    pub requested: usize,
    pub returned: usize,
    pub diagnostics: Vec<Diagnostic>,
}

/// Indexed set of zones.
///
/// Membership and the name index are fixed at construction; build a new
/// set (e.g. with [`ZoneSet::union`]) to change them. Iteration follows
/// insertion order.
#[derive(Debug, Clone)]
pub struct ZoneSet {
    zones: Vec<Zone>,

    /// Lower-cased name -> position in `zones`
    index: HashMap<String, usize>,

    provenance: Provenance,
}

impl ZoneSet {
    /// Build a set, rejecting names that collide case-insensitively
    pub fn new(zones: impl IntoIterator<Item = Zone>) -> Result<Self> {
        let zones: Vec<Zone> = zones.into_iter().collect();
        let mut index = HashMap::with_capacity(zones.len());

        for (pos, zone) in zones.iter().enumerate() {
            if index.insert(zone.name().key().to_string(), pos).is_some() {
                return Err(ZoneError::DuplicateName {
                    name: zone.name().to_string(),
                });
            }
        }

        Ok(Self {
            zones,
            index,
            provenance: Provenance::Synthetic,
        })
    }

    /// Merge two sets. Zones present in both (by name) are kept once, taken
    /// from `a`. The result is always [`Provenance::Synthetic`].
    pub fn union(a: &ZoneSet, b: &ZoneSet) -> Result<ZoneSet> {
        let merged = a
            .zones
            .iter()
            .chain(b.zones.iter().filter(|zone| !a.contains(zone.name().key())))
            .cloned();
        Self::new(merged)
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    pub fn provenance(&self) -> Provenance {
        self.provenance
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Zone> {
        self.zones.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.zones.iter().map(|zone| zone.name().as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(&name.to_lowercase())
    }

    /// Case-insensitive lookup
    pub fn find_by_name(&self, name: &str) -> Option<&Zone> {
        self.index
            .get(&name.to_lowercase())
            .map(|&pos| &self.zones[pos])
    }

    pub fn find_by_name_mut(&mut self, name: &str) -> Option<&mut Zone> {
        match self.index.get(&name.to_lowercase()) {
            Some(&pos) => Some(&mut self.zones[pos]),
            None => None,
        }
    }

    /// Closest member to `point`, scanning every zone.
    ///
    /// Ties go to the zone inserted first.
    pub fn closest_zone_to(&self, point: &Coords) -> Result<&Zone> {
        let mut closest: Option<(&Zone, f64)> = None;

        for zone in &self.zones {
            let distance = point.distance_to(&zone.coords());
            match closest {
                Some((_, best)) if distance >= best => {}
                _ => closest = Some((zone, distance)),
            }
        }

        closest.map(|(zone, _)| zone).ok_or(ZoneError::EmptySet)
    }

    /// Resolve `line` in `direction` and register the connection on its parent
    pub fn connect(&mut self, line: &Line, direction: Direction) -> Result<Connection> {
        let connection = Connection::resolve(line, self, direction)?;
        self.register(connection.clone())?;
        Ok(connection)
    }

    /// Register `line` in both directions
    pub fn connect_both(&mut self, line: &Line) -> Result<(Connection, Connection)> {
        let forward = self.connect(line, Direction::ParentIsLeft)?;
        let backward = self.connect(line, Direction::ParentIsRight)?;
        Ok((forward, backward))
    }

    /// Append an already resolved connection to its parent zone.
    /// Both ends must be members of this set.
    pub fn register(&mut self, connection: Connection) -> Result<()> {
        if !self.contains(connection.neighbor().key()) {
            return Err(ZoneError::NotFound {
                name: connection.neighbor().to_string(),
            });
        }
        match self.find_by_name_mut(connection.parent().key()) {
            Some(zone) => zone.add_connection(connection),
            None => Err(ZoneError::NotFound {
                name: connection.parent().to_string(),
            }),
        }
    }

    /// Fetch points for every member in one bulk request and apply them.
    ///
    /// Fails with [`ZoneError::PhantomZones`] when the API does not know
    /// one or more members. Points are applied only after the whole answer
    /// has been checked, so a failed call leaves every zone untouched.
    pub async fn enrich_with_metadata(
        &mut self,
        fetcher: &dyn MetadataFetcher,
    ) -> Result<EnrichReport> {
        let request: Vec<ZoneQuery> = self
            .zones
            .iter()
            .map(|zone| ZoneQuery {
                name: zone.name().to_string(),
            })
            .collect();

        log::debug!("Requesting points for {} zones", request.len());
        let records = fetcher
            .fetch(&request)
            .await
            .map_err(ZoneError::Transport)?;

        let mut diagnostics = Vec::new();
        let mut matched: HashSet<usize> = HashSet::with_capacity(records.len());
        let mut updates: Vec<(usize, Points)> = Vec::with_capacity(records.len());

        for record in &records {
            match self.index.get(&record.name.to_lowercase()) {
                Some(&pos) if matched.insert(pos) => updates.push((pos, record.points())),
                Some(_) => diagnostics.push(Diagnostic::DuplicateRecord {
                    name: record.name.clone(),
                }),
                None => diagnostics.push(Diagnostic::UnknownRecord {
                    name: record.name.clone(),
                }),
            }
        }

        if records.len() < request.len() {
            log::warn!(
                "API returned {} zones for {} requested",
                records.len(),
                request.len()
            );
        }

        let phantoms: Vec<String> = self
            .zones
            .iter()
            .enumerate()
            .filter(|(pos, _)| !matched.contains(pos))
            .map(|(_, zone)| zone.name().to_string())
            .collect();

        if !phantoms.is_empty() {
            for name in &phantoms {
                log::error!("Zone {} does not exist in the API", name);
            }
            return Err(ZoneError::PhantomZones { names: phantoms });
        }

        if records.len() != request.len() {
            diagnostics.insert(
                0,
                Diagnostic::CountMismatch {
                    requested: request.len(),
                    returned: records.len(),
                },
            );
        }

        if let Some(&(pos, _)) = updates.iter().find(|(pos, _)| self.zones[*pos].is_enriched()) {
            return Err(ZoneError::AlreadyEnriched {
                name: self.zones[pos].name().to_string(),
            });
        }

        for (pos, points) in updates {
            self.zones[pos].set_points(points)?;
        }

        for diagnostic in &diagnostics {
            log::warn!("{}", diagnostic);
        }

        self.provenance = Provenance::Enriched;
        log::info!("Applied points to {} zones", self.zones.len());

        Ok(EnrichReport {
            requested: request.len(),
            returned: records.len(),
            diagnostics,
        })
    }
}

impl<'a> IntoIterator for &'a ZoneSet {
    type Item = &'a Zone;
    type IntoIter = std::slice::Iter<'a, Zone>;

    fn into_iter(self) -> Self::IntoIter {
        self.zones.iter()
    }
}
