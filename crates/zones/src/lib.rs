//! # Turf Zones
//!
//! Zones, directed connections between them and bulk points enrichment
//! against the Turf zone API.
//!
//! ## Architecture
//!
//! ```text
//! Zone[] ──> ZoneSet (name index, Synthetic)
//!               │
//!               ├──> closest_zone_to(Coords)
//!               │      └─ Line endpoints -> parent / neighbor
//!               │
//!               ├──> Connection::resolve + Zone::add_connection
//!               │      └─ outgoing edges owned by the parent Zone
//!               │
//!               └──> enrich_with_metadata(MetadataFetcher)
//!                      ├─ one bulk request for every member
//!                      ├─ phantom zone reconciliation
//!                      └─ Points applied all-or-nothing (Enriched)
//! ```

mod connection;
mod coords;
mod error;
mod fetch;
mod line;
mod zone;
mod zone_set;

pub use connection::{Connection, Direction};
pub use coords::Coords;
pub use error::{Result, ZoneError};
pub use fetch::{MetadataFetcher, StaticFetcher, ZoneQuery, ZoneRecord};
pub use line::Line;
pub use zone::{Points, Zone, ZoneName};
pub use zone_set::{Diagnostic, EnrichReport, Provenance, ZoneSet};
