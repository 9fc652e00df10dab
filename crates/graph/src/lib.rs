//! # Turf Graph
//!
//! Territory graph built from raw map segments and a set of known zones.
//!
//! ## Architecture
//!
//! ```text
//! Line[] + ZoneSet
//!     │
//!     ├──> Graph Builder
//!     │      ├─ Resolve each line in both directions
//!     │      ├─ Drop self-loops and duplicate pairs (optional)
//!     │      └─ Register connections on parent zones
//!     │
//!     └──> Zone Graph (petgraph)
//!            ├─ Nodes: zones
//!            ├─ Edges: connections weighted in meters
//!            └─ Queries: neighbors, reachability, shortest route
//! ```

mod builder;
mod error;
mod graph;
mod types;

pub use builder::{BuildStats, GraphBuilder};
pub use error::{GraphError, Result};
pub use types::{ConnectionEdge, Route, ZoneGraph, ZoneNode};
