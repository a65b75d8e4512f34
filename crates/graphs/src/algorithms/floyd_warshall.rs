//! All-pairs shortest paths (Floyd–Warshall)
//!
//! O(V³) time and O(V²) memory, so only practical up to a few hundred
//! nodes. [`all_pairs_within`] skips graphs above a caller-chosen ceiling;
//! for a handful of pairs, run Dijkstra per source instead.

use super::{distance_serde, IndexedGraph};
use crate::graph::Graph;
use bibgraph_common::errors::{GraphError, Result};
use bibgraph_common::metrics::record_algorithm_run;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::instrument;

/// Node count above which a run is logged as expensive
pub const LARGE_GRAPH_NODES: usize = 300;

/// Distance and next-hop matrices over every ordered node pair.
///
/// `next_hop(i, j)` is the first step on the current best path from `i` to
/// `j`; it is `None` on the diagonal and for unreachable pairs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "AllPairsRecord", try_from = "AllPairsRecord")]
pub struct AllPairsShortestPaths {
    nodes: Vec<String>,
    index: HashMap<String, usize>,
    distance: Vec<f64>,
    next: Vec<Option<usize>>,
}

/// Serialized form: row-major matrices labelled by node id, unreachable
/// distances as `null`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllPairsRecord {
    pub nodes: Vec<String>,
    #[serde(with = "distance_serde::matrix")]
    pub distance: Vec<Vec<f64>>,
    pub next_hop: Vec<Vec<Option<String>>>,
}

impl AllPairsShortestPaths {
    /// Node ids labelling the matrix rows and columns
    pub fn nodes(&self) -> &[String] {
        &self.nodes
    }

    fn position(&self, id: &str) -> Result<usize> {
        self.index
            .get(id)
            .copied()
            .ok_or_else(|| GraphError::unknown_node(id))
    }

    fn cell(&self, i: usize, j: usize) -> usize {
        i * self.nodes.len() + j
    }

    /// Shortest distance from `from` to `to` (infinite when unreachable)
    pub fn distance(&self, from: &str, to: &str) -> Result<f64> {
        let (i, j) = (self.position(from)?, self.position(to)?);
        Ok(self.distance[self.cell(i, j)])
    }

    /// First step on the shortest path from `from` to `to`
    pub fn next_hop(&self, from: &str, to: &str) -> Result<Option<&str>> {
        let (i, j) = (self.position(from)?, self.position(to)?);
        Ok(self.next[self.cell(i, j)].map(|k| self.nodes[k].as_str()))
    }

    /// Shortest path from `from` to `to`; see [`reconstruct_path`]
    pub fn path(&self, from: &str, to: &str) -> Result<Vec<String>> {
        reconstruct_path(self, from, to)
    }

    /// Number of ordered pairs `i != j` with a finite distance
    pub fn reachable_pairs(&self) -> usize {
        let n = self.nodes.len();
        (0..n)
            .flat_map(|i| (0..n).map(move |j| (i, j)))
            .filter(|&(i, j)| i != j && self.distance[self.cell(i, j)].is_finite())
            .count()
    }

    /// The reachable pair `i != j` with the largest shortest distance.
    ///
    /// Ties keep the first pair in row-major (lexicographic) order.
    pub fn longest_shortest_path(&self) -> Option<(String, String, f64)> {
        let n = self.nodes.len();
        let mut best: Option<(usize, usize, f64)> = None;
        for i in 0..n {
            for j in 0..n {
                let d = self.distance[self.cell(i, j)];
                if i == j || !d.is_finite() {
                    continue;
                }
                if best.map_or(true, |(_, _, current)| d > current) {
                    best = Some((i, j, d));
                }
            }
        }
        best.map(|(i, j, d)| (self.nodes[i].clone(), self.nodes[j].clone(), d))
    }
}

/// Rebuild the path `from → to` by following next hops.
///
/// - `from == to` → `[from]`
/// - no next hop and `from != to` → empty (unreachable)
/// - otherwise hop `i = next(i, to)` until `i == to`
pub fn reconstruct_path(paths: &AllPairsShortestPaths, from: &str, to: &str) -> Result<Vec<String>> {
    let start = paths.position(from)?;
    let end = paths.position(to)?;

    if start == end {
        return Ok(vec![from.to_string()]);
    }

    let mut route = vec![paths.nodes[start].clone()];
    let mut current = start;
    while current != end {
        match paths.next[paths.cell(current, end)] {
            Some(step) if route.len() <= paths.nodes.len() => {
                route.push(paths.nodes[step].clone());
                current = step;
            }
            _ => return Ok(Vec::new()),
        }
    }
    Ok(route)
}

/// Compute shortest paths between every ordered pair of nodes
#[instrument(skip_all, fields(nodes = graph.node_count(), edges = graph.edge_count()))]
pub fn all_pairs_shortest_paths(graph: &Graph) -> AllPairsShortestPaths {
    let indexed = IndexedGraph::new(graph);
    let n = indexed.len();
    record_algorithm_run("floyd_warshall");

    if n > LARGE_GRAPH_NODES {
        tracing::warn!(
            nodes = n,
            "Floyd-Warshall on a large graph; cost grows with the cube of the node count"
        );
    }

    let mut distance = vec![f64::INFINITY; n * n];
    let mut next: Vec<Option<usize>> = vec![None; n * n];

    for i in 0..n {
        distance[i * n + i] = 0.0;
        for &(j, cost) in &indexed.out[i] {
            distance[i * n + j] = cost;
            next[i * n + j] = Some(j);
        }
    }

    for k in 0..n {
        for i in 0..n {
            let through_k = distance[i * n + k];
            if !through_k.is_finite() {
                continue;
            }
            for j in 0..n {
                let rest = distance[k * n + j];
                if !rest.is_finite() {
                    continue;
                }
                let candidate = through_k + rest;
                if candidate < distance[i * n + j] {
                    distance[i * n + j] = candidate;
                    next[i * n + j] = next[i * n + k];
                }
            }
        }
    }

    let nodes: Vec<String> = indexed.ids.iter().map(|id| id.to_string()).collect();
    let index = nodes
        .iter()
        .enumerate()
        .map(|(i, id)| (id.clone(), i))
        .collect();

    tracing::debug!("Floyd-Warshall finished");
    AllPairsShortestPaths {
        nodes,
        index,
        distance,
        next,
    }
}

/// Run [`all_pairs_shortest_paths`] only when the graph has at most
/// `max_nodes` nodes; larger graphs are skipped and `None` is returned
pub fn all_pairs_within(graph: &Graph, max_nodes: usize) -> Option<AllPairsShortestPaths> {
    if graph.node_count() > max_nodes {
        tracing::info!(
            nodes = graph.node_count(),
            max_nodes,
            "Skipping all-pairs shortest paths on oversized graph"
        );
        return None;
    }
    Some(all_pairs_shortest_paths(graph))
}

impl From<AllPairsShortestPaths> for AllPairsRecord {
    fn from(paths: AllPairsShortestPaths) -> Self {
        let n = paths.nodes.len();
        let distance = paths.distance.chunks(n.max(1)).map(|row| row.to_vec()).collect();
        let next_hop = paths
            .next
            .chunks(n.max(1))
            .map(|row| {
                row.iter()
                    .map(|hop| hop.map(|k| paths.nodes[k].clone()))
                    .collect()
            })
            .collect();
        AllPairsRecord {
            nodes: paths.nodes,
            distance,
            next_hop,
        }
    }
}

impl TryFrom<AllPairsRecord> for AllPairsShortestPaths {
    type Error = GraphError;

    fn try_from(record: AllPairsRecord) -> Result<Self> {
        let n = record.nodes.len();
        let index: HashMap<String, usize> = record
            .nodes
            .iter()
            .enumerate()
            .map(|(i, id)| (id.clone(), i))
            .collect();

        let square = record.distance.len() == n
            && record.next_hop.len() == n
            && record.distance.iter().all(|row| row.len() == n)
            && record.next_hop.iter().all(|row| row.len() == n);
        if !square || index.len() != n {
            return Err(GraphError::invalid_config(
                "all_pairs",
                format!("matrices must be {n}x{n} over distinct node ids"),
            ));
        }

        let mut next = Vec::with_capacity(n * n);
        for hop in record.next_hop.into_iter().flatten() {
            next.push(match hop {
                Some(id) => Some(
                    index
                        .get(&id)
                        .copied()
                        .ok_or_else(|| GraphError::unknown_node(&id))?,
                ),
                None => None,
            });
        }

        Ok(AllPairsShortestPaths {
            nodes: record.nodes,
            index,
            distance: record.distance.into_iter().flatten().collect(),
            next,
        })
    }
}
