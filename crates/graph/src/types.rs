use petgraph::graph::{DiGraph, NodeIndex};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use turf_zones::{Coords, Points, ZoneSet};

/// Node in zone graph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoneNode {
    pub name: String,
    pub coords: Coords,

    /// Present once the zone set has been enriched
    pub points: Option<Points>,
}

/// Edge in zone graph
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ConnectionEdge {
    /// Meters
    pub distance: f64,
}

/// Shortest route between two zones
#[derive(Debug, Clone, Serialize)]
pub struct Route {
    pub zones: Vec<String>,

    /// Total meters
    pub distance: f64,
}

/// Directed zone graph with a case-insensitive name index
#[derive(Debug)]
pub struct ZoneGraph {
    pub graph: DiGraph<ZoneNode, ConnectionEdge>,

    /// Lower-cased zone name -> NodeIndex
    pub name_index: HashMap<String, NodeIndex>,
}

impl ZoneGraph {
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            name_index: HashMap::new(),
        }
    }

    /// Snapshot every zone of `zones` and the connections registered on them
    pub fn from_zone_set(zones: &ZoneSet) -> Self {
        let mut graph = Self::new();

        for zone in zones {
            graph.add_node(ZoneNode {
                name: zone.name().to_string(),
                coords: zone.coords(),
                points: zone.points(),
            });
        }

        for zone in zones {
            for connection in zone.connections() {
                let from = graph.find_node(connection.parent().key());
                let to = graph.find_node(connection.neighbor().key());
                if let (Some(from), Some(to)) = (from, to) {
                    graph.add_edge(
                        from,
                        to,
                        ConnectionEdge {
                            distance: connection.distance(),
                        },
                    );
                }
            }
        }

        graph
    }

    /// Add node to graph
    pub fn add_node(&mut self, node: ZoneNode) -> NodeIndex {
        let key = node.name.to_lowercase();
        let idx = self.graph.add_node(node);
        self.name_index.insert(key, idx);
        idx
    }

    /// Add edge between nodes
    pub fn add_edge(&mut self, from: NodeIndex, to: NodeIndex, edge: ConnectionEdge) {
        self.graph.add_edge(from, to, edge);
    }

    /// Find node by zone name, ignoring case
    pub fn find_node(&self, name: &str) -> Option<NodeIndex> {
        self.name_index.get(&name.to_lowercase()).copied()
    }

    /// Get node data
    pub fn get_node(&self, idx: NodeIndex) -> Option<&ZoneNode> {
        self.graph.node_weight(idx)
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}

impl Default for ZoneGraph {
    fn default() -> Self {
        Self::new()
    }
}
