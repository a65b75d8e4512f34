//! Single-source shortest paths (Dijkstra)
//!
//! Precondition: every edge cost is non-negative. `Graph::add_edge` rejects
//! negative costs, so graphs from either builder satisfy it and the cost is
//! not re-validated here.
//!
//! The unvisited node with minimum tentative distance is settled first; ties
//! go to the lexicographically smallest node id. [`dijkstra`] does this with
//! a binary heap in O((V+E) log V); [`dijkstra_dense`] uses the O(V²) linear
//! scan. Both settle nodes in the same order and return identical results.

use super::{distance_serde, IndexedGraph};
use crate::graph::Graph;
use bibgraph_common::errors::{GraphError, Result};
use bibgraph_common::metrics::record_algorithm_run;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeMap, BinaryHeap};

/// Distances and predecessors from one source.
///
/// Unreachable nodes have `f64::INFINITY` distance and no predecessor
/// (serialized as `null`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShortestPaths {
    pub source: String,
    #[serde(with = "distance_serde::map")]
    pub distance: BTreeMap<String, f64>,
    pub predecessor: BTreeMap<String, Option<String>>,
}

/// A concrete path between two nodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphPath {
    /// Sequence of node ids from source to target
    pub nodes: Vec<String>,
    /// Sum of edge costs along the path
    pub total_cost: f64,
}

impl GraphPath {
    pub fn hop_count(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }

    pub fn source(&self) -> Option<&str> {
        self.nodes.first().map(|s| s.as_str())
    }

    pub fn target(&self) -> Option<&str> {
        self.nodes.last().map(|s| s.as_str())
    }
}

impl ShortestPaths {
    /// Shortest distance to `target` (infinite when unreachable)
    pub fn distance_to(&self, target: &str) -> Result<f64> {
        self.distance
            .get(target)
            .copied()
            .ok_or_else(|| GraphError::unknown_node(target))
    }

    /// Node preceding `target` on its shortest path
    pub fn predecessor_of(&self, target: &str) -> Result<Option<&str>> {
        self.predecessor
            .get(target)
            .map(|p| p.as_deref())
            .ok_or_else(|| GraphError::unknown_node(target))
    }

    pub fn is_reachable(&self, target: &str) -> Result<bool> {
        Ok(self.distance_to(target)?.is_finite())
    }

    /// Node ids reachable from the source (source included)
    pub fn reachable(&self) -> impl Iterator<Item = (&str, f64)> {
        self.distance
            .iter()
            .filter(|(_, d)| d.is_finite())
            .map(|(id, &d)| (id.as_str(), d))
    }

    /// Shortest path from the source to `target`; empty when unreachable
    pub fn path_to(&self, target: &str) -> Result<Vec<String>> {
        if !self.distance.contains_key(target) {
            return Err(GraphError::unknown_node(target));
        }
        Ok(reconstruct_path(&self.predecessor, &self.source, target))
    }
}

/// Rebuild the path `source → target` from a predecessor map.
///
/// Returns `[source]` when both are equal and an empty path when `target`
/// cannot be reached.
pub fn reconstruct_path(
    predecessor: &BTreeMap<String, Option<String>>,
    source: &str,
    target: &str,
) -> Vec<String> {
    if source == target {
        return vec![source.to_string()];
    }

    let mut path = vec![target.to_string()];
    let mut current = target;
    while current != source {
        match predecessor.get(current).and_then(|p| p.as_deref()) {
            // A predecessor chain never revisits a node
            Some(previous) if path.len() <= predecessor.len() => {
                path.push(previous.to_string());
                current = previous;
            }
            _ => return Vec::new(),
        }
    }
    path.reverse();
    path
}

/// Min-heap entry ordered by (distance, node index)
#[derive(Clone, Copy, PartialEq)]
struct QueueEntry {
    distance: f64,
    node: usize,
}

impl Eq for QueueEntry {}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: BinaryHeap is a max-heap
        other
            .distance
            .total_cmp(&self.distance)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Shortest paths from `source` using a binary heap
pub fn dijkstra(graph: &Graph, source: &str) -> Result<ShortestPaths> {
    let indexed = IndexedGraph::new(graph);
    let start = indexed.index_of(source)?;
    record_algorithm_run("dijkstra");

    let n = indexed.len();
    let mut distance = vec![f64::INFINITY; n];
    let mut predecessor: Vec<Option<usize>> = vec![None; n];
    let mut settled = vec![false; n];
    let mut heap = BinaryHeap::new();

    distance[start] = 0.0;
    heap.push(QueueEntry {
        distance: 0.0,
        node: start,
    });

    while let Some(QueueEntry { distance: d, node }) = heap.pop() {
        // Stale entry: node already settled or a shorter path was queued later
        if settled[node] || d > distance[node] {
            continue;
        }
        settled[node] = true;

        for &(next, cost) in &indexed.out[node] {
            if settled[next] {
                continue;
            }
            let candidate = d + cost;
            if candidate < distance[next] {
                distance[next] = candidate;
                predecessor[next] = Some(node);
                heap.push(QueueEntry {
                    distance: candidate,
                    node: next,
                });
            }
        }
    }

    tracing::debug!(
        source,
        reachable = distance.iter().filter(|d| d.is_finite()).count(),
        nodes = n,
        "Dijkstra finished"
    );
    Ok(collect(&indexed, source, distance, predecessor))
}

/// Shortest paths from `source` using the O(V²) linear-scan selection
pub fn dijkstra_dense(graph: &Graph, source: &str) -> Result<ShortestPaths> {
    let indexed = IndexedGraph::new(graph);
    let start = indexed.index_of(source)?;
    record_algorithm_run("dijkstra_dense");

    let n = indexed.len();
    let mut distance = vec![f64::INFINITY; n];
    let mut predecessor: Vec<Option<usize>> = vec![None; n];
    let mut settled = vec![false; n];
    distance[start] = 0.0;

    loop {
        // Lowest index wins ties because the scan keeps the first minimum
        let mut current: Option<usize> = None;
        for node in 0..n {
            if settled[node] || !distance[node].is_finite() {
                continue;
            }
            match current {
                Some(best) if distance[best] <= distance[node] => {}
                _ => current = Some(node),
            }
        }
        let Some(node) = current else { break };
        settled[node] = true;

        for &(next, cost) in &indexed.out[node] {
            if settled[next] {
                continue;
            }
            let candidate = distance[node] + cost;
            if candidate < distance[next] {
                distance[next] = candidate;
                predecessor[next] = Some(node);
            }
        }
    }

    Ok(collect(&indexed, source, distance, predecessor))
}

fn collect(
    indexed: &IndexedGraph<'_>,
    source: &str,
    distance: Vec<f64>,
    predecessor: Vec<Option<usize>>,
) -> ShortestPaths {
    ShortestPaths {
        source: source.to_string(),
        distance: indexed
            .ids
            .iter()
            .zip(distance)
            .map(|(id, d)| (id.to_string(), d))
            .collect(),
        predecessor: indexed
            .ids
            .iter()
            .zip(predecessor)
            .map(|(id, p)| (id.to_string(), p.map(|i| indexed.ids[i].to_string())))
            .collect(),
    }
}

/// Shortest path between two nodes; `None` when `target` is unreachable
pub fn shortest_path(graph: &Graph, source: &str, target: &str) -> Result<Option<GraphPath>> {
    if !graph.contains(target) {
        return Err(GraphError::unknown_node(target));
    }
    let paths = dijkstra(graph, source)?;
    let total_cost = paths.distance_to(target)?;
    if !total_cost.is_finite() {
        return Ok(None);
    }
    Ok(Some(GraphPath {
        nodes: paths.path_to(target)?,
        total_cost,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build_test_graph() -> Graph {
        let mut graph = Graph::directed();
        for id in ["A", "B", "C", "D", "E"] {
            graph.add_node(id);
        }
        graph.add_edge("A", "B", 1.0, 0.0).unwrap();
        graph.add_edge("A", "C", 4.0, 0.0).unwrap();
        graph.add_edge("B", "C", 2.0, 0.0).unwrap();
        graph.add_edge("C", "D", 1.0, 0.0).unwrap();
        // E is isolated
        graph
    }

    #[test]
    fn test_dijkstra_basic() {
        let graph = build_test_graph();
        let result = dijkstra(&graph, "A").unwrap();

        assert_eq!(result.distance_to("A").unwrap(), 0.0);
        assert_eq!(result.distance_to("C").unwrap(), 3.0);
        assert_eq!(result.distance_to("D").unwrap(), 4.0);
        assert_eq!(result.predecessor_of("C").unwrap(), Some("B"));
        assert_eq!(result.predecessor_of("A").unwrap(), None);
    }

    #[test]
    fn test_unreachable_is_infinite_not_error() {
        let graph = build_test_graph();
        let result = dijkstra(&graph, "A").unwrap();

        assert!(result.distance_to("E").unwrap().is_infinite());
        assert!(!result.is_reachable("E").unwrap());
        assert!(result.path_to("E").unwrap().is_empty());
        assert_eq!(result.predecessor_of("E").unwrap(), None);
        assert_eq!(result.reachable().count(), 4);
    }

    #[test]
    fn test_path_reconstruction() {
        let graph = build_test_graph();
        let result = dijkstra(&graph, "A").unwrap();

        assert_eq!(result.path_to("D").unwrap(), vec!["A", "B", "C", "D"]);
        assert_eq!(result.path_to("A").unwrap(), vec!["A"]);
    }

    #[test]
    fn test_unknown_nodes() {
        let graph = build_test_graph();
        assert!(matches!(
            dijkstra(&graph, "Z"),
            Err(GraphError::UnknownNode { .. })
        ));

        let result = dijkstra(&graph, "A").unwrap();
        assert!(result.distance_to("Z").is_err());
        assert!(result.path_to("Z").is_err());
        assert!(shortest_path(&graph, "A", "Z").is_err());
    }

    #[test]
    fn test_ties_break_lexicographically() {
        // Two equal-cost routes to D: via B and via C
        let mut graph = Graph::directed();
        for id in ["A", "B", "C", "D"] {
            graph.add_node(id);
        }
        graph.add_edge("A", "C", 1.0, 0.0).unwrap();
        graph.add_edge("A", "B", 1.0, 0.0).unwrap();
        graph.add_edge("C", "D", 1.0, 0.0).unwrap();
        graph.add_edge("B", "D", 1.0, 0.0).unwrap();

        let heap = dijkstra(&graph, "A").unwrap();
        let dense = dijkstra_dense(&graph, "A").unwrap();

        // B is settled before C, so D keeps B as predecessor
        assert_eq!(heap.predecessor_of("D").unwrap(), Some("B"));
        assert_eq!(heap, dense);
    }

    #[test]
    fn test_dense_matches_heap() {
        let graph = build_test_graph();
        for source in ["A", "B", "C", "D", "E"] {
            assert_eq!(
                dijkstra(&graph, source).unwrap(),
                dijkstra_dense(&graph, source).unwrap()
            );
        }
    }

    #[test]
    fn test_shortest_path() {
        let graph = build_test_graph();
        let path = shortest_path(&graph, "A", "D").unwrap().unwrap();

        assert_eq!(path.source(), Some("A"));
        assert_eq!(path.target(), Some("D"));
        assert_eq!(path.hop_count(), 3);
        assert_eq!(path.total_cost, 4.0);
        assert!(shortest_path(&graph, "A", "E").unwrap().is_none());
    }

    #[test]
    fn test_serialization_encodes_unreachable_as_null() {
        let graph = build_test_graph();
        let result = dijkstra(&graph, "A").unwrap();

        let json = serde_json::to_value(&result).unwrap();
        assert!(json["distance"]["E"].is_null());
        assert_eq!(json["distance"]["D"], 4.0);

        let restored: ShortestPaths = serde_json::from_value(json).unwrap();
        assert_eq!(restored, result);
    }

    #[test]
    fn test_reconstruct_path_broken_chain() {
        let mut predecessor = BTreeMap::new();
        predecessor.insert("A".to_string(), None);
        predecessor.insert("B".to_string(), None);
        predecessor.insert("C".to_string(), Some("B".to_string()));

        assert!(reconstruct_path(&predecessor, "A", "C").is_empty());
    }
}
