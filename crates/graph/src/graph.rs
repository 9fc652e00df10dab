use crate::error::{GraphError, Result};
use crate::types::{Route, ZoneGraph};
use petgraph::algo::astar;
use petgraph::graph::NodeIndex;
use petgraph::visit::EdgeRef;
use std::collections::{HashSet, VecDeque};

impl ZoneGraph {
    fn require(&self, name: &str) -> Result<NodeIndex> {
        self.find_node(name)
            .ok_or_else(|| GraphError::ZoneNotFound(name.to_string()))
    }

    fn name_of(&self, idx: NodeIndex) -> String {
        self.graph[idx].name.clone()
    }

    /// Zones directly reachable from `name`, with the connection length
    pub fn neighbors(&self, name: &str) -> Result<Vec<(String, f64)>> {
        let node = self.require(name)?;
        let mut neighbors: Vec<(String, f64)> = self
            .graph
            .edges(node)
            .map(|e| (self.name_of(e.target()), e.weight().distance))
            .collect();
        // petgraph yields edges newest first
        neighbors.reverse();
        Ok(neighbors)
    }

    /// Zones reachable from `name` within `max_hops` connections.
    /// Returns (zone, hops) in breadth-first order, excluding the start.
    pub fn reachable_from(&self, name: &str, max_hops: usize) -> Result<Vec<(String, usize)>> {
        let start = self.require(name)?;
        let mut visited = HashSet::from([start]);
        let mut queue = VecDeque::from([(start, 0usize)]);
        let mut result = Vec::new();

        while let Some((current, hops)) = queue.pop_front() {
            if current != start {
                result.push((self.name_of(current), hops));
            }
            if hops == max_hops {
                continue;
            }
            let targets: Vec<NodeIndex> = self.graph.edges(current).map(|e| e.target()).collect();
            for target in targets.into_iter().rev() {
                if visited.insert(target) {
                    queue.push_back((target, hops + 1));
                }
            }
        }

        Ok(result)
    }

    /// Shortest route by total connection length
    pub fn shortest_path(&self, from: &str, to: &str) -> Result<Option<Route>> {
        let start = self.require(from)?;
        let goal = self.require(to)?;

        let found = astar(
            &self.graph,
            start,
            |n| n == goal,
            |e| e.weight().distance,
            |_| 0.0,
        );

        Ok(found.map(|(distance, path)| Route {
            zones: path.into_iter().map(|idx| self.name_of(idx)).collect(),
            distance,
        }))
    }
}

#[cfg(test)]
mod tests {
    use crate::types::{ConnectionEdge, ZoneGraph, ZoneNode};
    use crate::GraphError;
    use pretty_assertions::assert_eq;
    use turf_zones::Coords;

    fn graph() -> ZoneGraph {
        // a -> b -> c -> d, plus a long a -> c shortcut
        let mut graph = ZoneGraph::new();
        let idx: Vec<_> = ["A", "b", "c", "d"]
            .iter()
            .enumerate()
            .map(|(i, name)| {
                graph.add_node(ZoneNode {
                    name: name.to_string(),
                    coords: Coords::new(0.0, i as f64),
                    points: None,
                })
            })
            .collect();

        for (from, to, distance) in [(0, 1, 100.0), (1, 2, 100.0), (2, 3, 50.0), (0, 2, 500.0)] {
            graph.add_edge(idx[from], idx[to], ConnectionEdge { distance });
        }
        graph
    }

    #[test]
    fn test_neighbors() {
        let graph = graph();
        assert_eq!(
            graph.neighbors("a").unwrap(),
            vec![("b".to_string(), 100.0), ("c".to_string(), 500.0)]
        );
        assert!(graph.neighbors("d").unwrap().is_empty());
    }

    #[test]
    fn test_shortest_path_prefers_shorter_total() {
        let graph = graph();
        let route = graph.shortest_path("A", "d").unwrap().unwrap();
        assert_eq!(route.zones, vec!["A", "b", "c", "d"]);
        assert_eq!(route.distance, 250.0);
    }

    #[test]
    fn test_shortest_path_respects_direction() {
        let graph = graph();
        assert!(graph.shortest_path("d", "a").unwrap().is_none());
    }

    #[test]
    fn test_reachable_from_limits_hops() {
        let graph = graph();
        assert_eq!(
            graph.reachable_from("a", 1).unwrap(),
            vec![("b".to_string(), 1), ("c".to_string(), 1)]
        );
        let all = graph.reachable_from("a", 5).unwrap();
        assert_eq!(all.last(), Some(&("d".to_string(), 2)));
    }

    #[test]
    fn test_unknown_zone() {
        let graph = graph();
        let err = graph.neighbors("nowhere").unwrap_err();
        assert!(matches!(err, GraphError::ZoneNotFound(ref name) if name == "nowhere"));
    }
}
