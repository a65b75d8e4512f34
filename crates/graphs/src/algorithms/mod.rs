//! Classical graph algorithms over [`Graph`](crate::graph::Graph)
//!
//! - **Dijkstra**: single-source shortest paths (heap and dense variants)
//! - **Floyd–Warshall**: all-pairs shortest paths with next-hop reconstruction
//! - **Kosaraju**: strongly connected components of directed graphs
//! - **Connected components**: breadth-first partition of undirected graphs
//!
//! Every algorithm is a pure function over an immutable snapshot. Costs are
//! non-negative by construction (enforced by `Graph::add_edge`), which is the
//! precondition Dijkstra relies on. Traversals use explicit stacks and
//! queues over a dense index so long chains cannot overflow the call stack.

pub mod components;
pub mod dijkstra;
pub mod floyd_warshall;
pub mod scc;

pub use components::{connected_components, ComponentSet};
pub use dijkstra::{dijkstra, dijkstra_dense, reconstruct_path, shortest_path, GraphPath, ShortestPaths};
pub use floyd_warshall::{all_pairs_shortest_paths, all_pairs_within, AllPairsRecord, AllPairsShortestPaths};
pub use scc::strongly_connected_components;

use crate::graph::Graph;
use bibgraph_common::errors::{GraphError, Result};
use std::collections::HashMap;

/// Dense view of a graph: node ids in lexicographic order, addressed by
/// position. Comparing indices is therefore comparing ids.
pub(crate) struct IndexedGraph<'a> {
    pub ids: Vec<&'a str>,
    pub index: HashMap<&'a str, usize>,
    pub out: Vec<Vec<(usize, f64)>>,
}

impl<'a> IndexedGraph<'a> {
    pub fn new(graph: &'a Graph) -> Self {
        let ids: Vec<&'a str> = graph.nodes().collect();
        let index: HashMap<&'a str, usize> =
            ids.iter().enumerate().map(|(i, id)| (*id, i)).collect();

        let out = ids
            .iter()
            .map(|id| {
                graph
                    .neighbors(id)
                    .map(|neighbors| {
                        neighbors
                            .iter()
                            .filter_map(|(target, &cost)| {
                                index.get(target.as_str()).map(|&t| (t, cost))
                            })
                            .collect()
                    })
                    .unwrap_or_default()
            })
            .collect();

        Self { ids, index, out }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn index_of(&self, id: &str) -> Result<usize> {
        self.index
            .get(id)
            .copied()
            .ok_or_else(|| GraphError::unknown_node(id))
    }

    /// Reverse adjacency (every u→v becomes v→u), costs dropped
    pub fn transposed(&self) -> Vec<Vec<usize>> {
        let mut reversed = vec![Vec::new(); self.len()];
        for (source, targets) in self.out.iter().enumerate() {
            for &(target, _) in targets {
                reversed[target].push(source);
            }
        }
        reversed
    }

    /// Map a set of indices to their ids in lexicographic order
    pub fn sorted_ids(&self, mut members: Vec<usize>) -> Vec<String> {
        members.sort_unstable();
        members.into_iter().map(|i| self.ids[i].to_string()).collect()
    }
}

/// Serde helpers encoding unreachable (infinite) distances as `null`
pub(crate) mod distance_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::collections::BTreeMap;

    fn encode(distance: f64) -> Option<f64> {
        distance.is_finite().then_some(distance)
    }

    fn decode(distance: Option<f64>) -> f64 {
        distance.unwrap_or(f64::INFINITY)
    }

    pub mod map {
        use super::*;

        pub fn serialize<S: Serializer>(
            distances: &BTreeMap<String, f64>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            distances
                .iter()
                .map(|(id, &d)| (id, encode(d)))
                .collect::<BTreeMap<_, _>>()
                .serialize(serializer)
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<BTreeMap<String, f64>, D::Error> {
            let raw = BTreeMap::<String, Option<f64>>::deserialize(deserializer)?;
            Ok(raw.into_iter().map(|(id, d)| (id, decode(d))).collect())
        }
    }

    pub mod matrix {
        use super::*;

        pub fn serialize<S: Serializer>(rows: &[Vec<f64>], serializer: S) -> Result<S::Ok, S::Error> {
            rows.iter()
                .map(|row| row.iter().map(|&d| encode(d)).collect::<Vec<_>>())
                .collect::<Vec<_>>()
                .serialize(serializer)
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Vec<f64>>, D::Error> {
            let raw = Vec::<Vec<Option<f64>>>::deserialize(deserializer)?;
            Ok(raw
                .into_iter()
                .map(|row| row.into_iter().map(decode).collect())
                .collect())
        }
    }
}
