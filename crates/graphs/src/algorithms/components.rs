//! Connected components of undirected graphs (breadth-first)

use super::IndexedGraph;
use crate::graph::{Graph, GraphKind};
use bibgraph_common::errors::{GraphError, Result};
use bibgraph_common::metrics::record_algorithm_run;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// A partition of a graph's nodes.
///
/// Members of each component are sorted by id. Undirected components are
/// ordered by their smallest member; strongly connected components come in
/// the order Kosaraju's second pass discovers them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentSet(Vec<Vec<String>>);

impl ComponentSet {
    pub fn new(components: Vec<Vec<String>>) -> Self {
        Self(components)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &[String]> {
        self.0.iter().map(|c| c.as_slice())
    }

    /// Component sizes, in component order
    pub fn sizes(&self) -> Vec<usize> {
        self.0.iter().map(Vec::len).collect()
    }

    /// Largest component; ties keep the earliest
    pub fn largest(&self) -> Option<&[String]> {
        self.0
            .iter()
            .fold(None, |best: Option<&Vec<String>>, c| match best {
                Some(b) if b.len() >= c.len() => Some(b),
                _ => Some(c),
            })
            .map(|c| c.as_slice())
    }

    /// Position of the component containing `id`
    pub fn component_of(&self, id: &str) -> Option<usize> {
        self.0
            .iter()
            .position(|members| members.binary_search_by(|m| m.as_str().cmp(id)).is_ok())
    }

    /// Components with more than one member
    pub fn non_trivial(&self) -> impl Iterator<Item = &[String]> {
        self.iter().filter(|c| c.len() > 1)
    }

    /// Whether every node of `graph` appears in exactly one component
    pub fn covers(&self, graph: &Graph) -> bool {
        let total: usize = self.0.iter().map(Vec::len).sum();
        total == graph.node_count() && graph.nodes().all(|id| self.component_of(id).is_some())
    }

    pub fn into_inner(self) -> Vec<Vec<String>> {
        self.0
    }
}

/// Partition an undirected graph into connected components.
///
/// Directed graphs are rejected; use
/// [`strongly_connected_components`](super::strongly_connected_components).
pub fn connected_components(graph: &Graph) -> Result<ComponentSet> {
    if graph.kind() != GraphKind::Undirected {
        return Err(GraphError::UnsupportedGraphKind {
            operation: "connected_components".to_string(),
            expected: GraphKind::Undirected.to_string(),
            found: graph.kind().to_string(),
        });
    }

    let indexed = IndexedGraph::new(graph);
    record_algorithm_run("connected_components");

    let n = indexed.len();
    let mut visited = vec![false; n];
    let mut components = Vec::new();
    let mut queue = VecDeque::new();

    // Seeds are taken in index order, so components come out ordered by
    // their smallest member
    for seed in 0..n {
        if visited[seed] {
            continue;
        }
        visited[seed] = true;
        queue.push_back(seed);

        let mut members = Vec::new();
        while let Some(node) = queue.pop_front() {
            members.push(node);
            for &(next, _) in &indexed.out[node] {
                if !visited[next] {
                    visited[next] = true;
                    queue.push_back(next);
                }
            }
        }
        components.push(indexed.sorted_ids(members));
    }

    tracing::debug!(nodes = n, components = components.len(), "Connected components found");
    Ok(ComponentSet(components))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn forest() -> Graph {
        let mut graph = Graph::undirected();
        for id in ["e", "d", "c", "b", "a", "f"] {
            graph.add_node(id);
        }
        graph.add_edge("a", "c", 1.0, 1.0).unwrap();
        graph.add_edge("c", "e", 1.0, 1.0).unwrap();
        graph.add_edge("d", "b", 1.0, 1.0).unwrap();
        graph
    }

    #[test]
    fn test_components_sorted_and_ordered() {
        let components = connected_components(&forest()).unwrap();

        assert_eq!(
            components.clone().into_inner(),
            vec![
                vec!["a".to_string(), "c".to_string(), "e".to_string()],
                vec!["b".to_string(), "d".to_string()],
                vec!["f".to_string()],
            ]
        );
        assert_eq!(components.sizes(), vec![3, 2, 1]);
        assert_eq!(components.non_trivial().count(), 2);
        assert!(components.covers(&forest()));
    }

    #[test]
    fn test_component_lookup() {
        let components = connected_components(&forest()).unwrap();

        assert_eq!(components.component_of("e"), Some(0));
        assert_eq!(components.component_of("b"), Some(1));
        assert_eq!(components.component_of("zz"), None);
        assert_eq!(components.largest().map(|c| c.len()), Some(3));
    }

    #[test]
    fn test_isolated_nodes_are_singletons() {
        let mut graph = Graph::undirected();
        for id in ["x", "y", "z"] {
            graph.add_node(id);
        }
        let components = connected_components(&graph).unwrap();
        assert_eq!(components.len(), 3);
        assert!(components.non_trivial().next().is_none());
    }

    #[test]
    fn test_empty_graph() {
        let components = connected_components(&Graph::undirected()).unwrap();
        assert!(components.is_empty());
        assert!(components.largest().is_none());
    }

    #[test]
    fn test_rejects_directed_graph() {
        let err = connected_components(&Graph::directed()).unwrap_err();
        assert!(matches!(err, GraphError::UnsupportedGraphKind { .. }));
    }

    #[test]
    fn test_serializes_as_nested_lists() {
        let components = connected_components(&forest()).unwrap();
        let json = serde_json::to_value(&components).unwrap();
        assert_eq!(json[1][0], "b");
    }
}
