use crate::error::Result;
use crate::types::ZoneGraph;
use serde::Serialize;
use turf_zones::{Connection, Direction, Line, ZoneSet};

/// Counters from one graph build
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BuildStats {
    pub lines: usize,

    /// Connections registered on their parent zone
    pub registered: usize,

    /// Connections dropped because the ordered pair was already registered
    pub duplicates: usize,

    /// Connections dropped because both ends resolved to the same zone
    pub self_loops: usize,
}

/// Build zone graph from raw segments
#[derive(Debug, Clone)]
pub struct GraphBuilder {
    skip_self_loops: bool,
    dedupe: bool,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self {
            skip_self_loops: true,
            dedupe: true,
        }
    }

    pub fn skip_self_loops(mut self, skip: bool) -> Self {
        self.skip_self_loops = skip;
        self
    }

    pub fn dedupe(mut self, dedupe: bool) -> Self {
        self.dedupe = dedupe;
        self
    }

    /// Resolve every line in both directions and register the accepted
    /// connections on `zones`
    pub fn build(&self, zones: &mut ZoneSet, lines: &[Line]) -> Result<(ZoneGraph, BuildStats)> {
        let mut stats = BuildStats {
            lines: lines.len(),
            ..BuildStats::default()
        };

        for line in lines {
            for direction in [Direction::ParentIsLeft, Direction::ParentIsRight] {
                let connection = Connection::resolve(line, zones, direction)?;

                if self.skip_self_loops && connection.is_self_loop() {
                    log::debug!("Skipping self-loop {}", connection);
                    stats.self_loops += 1;
                    continue;
                }

                if self.dedupe && self.already_registered(zones, &connection) {
                    log::debug!("Skipping duplicate {}", connection);
                    stats.duplicates += 1;
                    continue;
                }

                zones.register(connection)?;
                stats.registered += 1;
            }
        }

        let graph = ZoneGraph::from_zone_set(zones);

        log::info!(
            "Built zone graph: {} nodes, {} edges ({} duplicates, {} self-loops skipped)",
            graph.node_count(),
            graph.edge_count(),
            stats.duplicates,
            stats.self_loops
        );

        Ok((graph, stats))
    }

    fn already_registered(&self, zones: &ZoneSet, connection: &Connection) -> bool {
        zones
            .find_by_name(connection.parent().key())
            .is_some_and(|zone| zone.has_connection(connection))
    }
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}
