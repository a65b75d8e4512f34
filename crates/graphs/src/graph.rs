//! Shared graph representation
//!
//! Both builders produce a [`Graph`] and every algorithm consumes one. The
//! adjacency map stores the *cost* of each edge (lower = more related); the
//! parallel [`Edge`] list stores the human-facing *strength*. Builders define
//! the inverse transform between the two:
//!
//! - citation edges: `cost = 1 - similarity`, `strength = similarity`
//! - term edges: `cost = 1 / count`, `strength = count`
//!
//! Invariants enforced by [`Graph::add_edge`]: no self-loops, at most one edge
//! per ordered pair, finite non-negative costs, both endpoints present.
//! Undirected graphs store each edge in both directions with equal cost and a
//! single [`Edge`] record.

use bibgraph_common::errors::{GraphError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Whether edges are one-way or symmetric
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GraphKind {
    Directed,
    Undirected,
}

impl GraphKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            GraphKind::Directed => "directed",
            GraphKind::Undirected => "undirected",
        }
    }
}

impl fmt::Display for GraphKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Presentation twin of an adjacency entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub source: String,
    pub target: String,
    /// Relatedness as reported to humans (similarity or co-occurrence count)
    pub strength: f64,
}

/// Node-id → neighbor-id → cost
pub type Adjacency = BTreeMap<String, BTreeMap<String, f64>>;

/// Weighted graph over string node ids.
///
/// Nodes iterate in lexicographic order, which the algorithms rely on for
/// deterministic tie-breaking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "GraphExport", try_from = "GraphExport")]
pub struct Graph {
    kind: GraphKind,
    adjacency: Adjacency,
    edges: Vec<Edge>,
}

/// Serializable snapshot of a graph for reporting collaborators
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphExport {
    pub kind: GraphKind,
    pub nodes: Vec<String>,
    pub edges: Vec<Edge>,
    pub adjacency: Adjacency,
}

impl Graph {
    /// Create an empty graph
    pub fn new(kind: GraphKind) -> Self {
        Self {
            kind,
            adjacency: BTreeMap::new(),
            edges: Vec::new(),
        }
    }

    /// Create an empty directed graph
    pub fn directed() -> Self {
        Self::new(GraphKind::Directed)
    }

    /// Create an empty undirected graph
    pub fn undirected() -> Self {
        Self::new(GraphKind::Undirected)
    }

    pub fn kind(&self) -> GraphKind {
        self.kind
    }

    pub fn is_directed(&self) -> bool {
        self.kind == GraphKind::Directed
    }

    /// Add a node; returns `false` if it already existed
    pub fn add_node(&mut self, id: impl Into<String>) -> bool {
        let id = id.into();
        if self.adjacency.contains_key(&id) {
            return false;
        }
        self.adjacency.insert(id, BTreeMap::new());
        true
    }

    /// Add an edge between two existing nodes.
    ///
    /// For undirected graphs the reverse direction is inserted with the same
    /// cost, and an edge already present in either direction is a duplicate.
    pub fn add_edge(&mut self, source: &str, target: &str, cost: f64, strength: f64) -> Result<()> {
        if !self.adjacency.contains_key(source) {
            return Err(GraphError::unknown_node(source));
        }
        if !self.adjacency.contains_key(target) {
            return Err(GraphError::unknown_node(target));
        }
        if source == target {
            return Err(GraphError::SelfLoop {
                id: source.to_string(),
            });
        }
        if !cost.is_finite() || cost < 0.0 {
            return Err(GraphError::InvalidCost {
                from: source.to_string(),
                to: target.to_string(),
                cost,
            });
        }
        if self.cost(source, target).is_some() {
            return Err(GraphError::DuplicateEdge {
                from: source.to_string(),
                to: target.to_string(),
            });
        }

        self.insert_cost(source, target, cost);
        if self.kind == GraphKind::Undirected {
            self.insert_cost(target, source, cost);
        }
        self.edges.push(Edge {
            source: source.to_string(),
            target: target.to_string(),
            strength,
        });
        Ok(())
    }

    fn insert_cost(&mut self, source: &str, target: &str, cost: f64) {
        if let Some(neighbors) = self.adjacency.get_mut(source) {
            neighbors.insert(target.to_string(), cost);
        }
    }

    /// All node ids in lexicographic order
    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.adjacency.keys().map(|id| id.as_str())
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of edges (an undirected edge counts once)
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.adjacency.contains_key(id)
    }

    /// Outgoing neighbors of a node with their costs
    pub fn neighbors(&self, id: &str) -> Option<&BTreeMap<String, f64>> {
        self.adjacency.get(id)
    }

    /// Cost of the edge `source → target`, if present
    pub fn cost(&self, source: &str, target: &str) -> Option<f64> {
        self.adjacency.get(source)?.get(target).copied()
    }

    pub fn adjacency(&self) -> &Adjacency {
        &self.adjacency
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Number of outgoing edges (all incident edges for undirected graphs)
    pub fn out_degree(&self, id: &str) -> usize {
        self.adjacency.get(id).map(|n| n.len()).unwrap_or(0)
    }

    /// Number of incoming edges (all incident edges for undirected graphs)
    pub fn in_degree(&self, id: &str) -> usize {
        match self.kind {
            GraphKind::Undirected => self.out_degree(id),
            GraphKind::Directed => self
                .adjacency
                .values()
                .filter(|neighbors| neighbors.contains_key(id))
                .count(),
        }
    }

    /// Incident edge count: each edge contributes 1 to each endpoint
    pub fn degree(&self, id: &str) -> usize {
        match self.kind {
            GraphKind::Undirected => self.out_degree(id),
            GraphKind::Directed => self.in_degree(id) + self.out_degree(id),
        }
    }

    /// Degrees of every node, computed in one pass over the edge list
    pub fn degrees(&self) -> BTreeMap<String, usize> {
        let mut degrees: BTreeMap<String, usize> =
            self.adjacency.keys().map(|id| (id.clone(), 0)).collect();
        for edge in &self.edges {
            *degrees.entry(edge.source.clone()).or_default() += 1;
            *degrees.entry(edge.target.clone()).or_default() += 1;
        }
        degrees
    }

    /// Graph with every edge reversed (a copy for undirected graphs)
    pub fn transpose(&self) -> Graph {
        if self.kind == GraphKind::Undirected {
            return self.clone();
        }

        let mut transposed = Graph::directed();
        for id in self.nodes() {
            transposed.add_node(id);
        }
        for edge in &self.edges {
            if let Some(cost) = self.cost(&edge.source, &edge.target) {
                transposed.insert_cost(&edge.target, &edge.source, cost);
                transposed.edges.push(Edge {
                    source: edge.target.clone(),
                    target: edge.source.clone(),
                    strength: edge.strength,
                });
            }
        }
        transposed
    }

    /// Copy of this graph without the edge `source → target`.
    ///
    /// Unknown edges leave the copy unchanged. For undirected graphs the edge
    /// is removed in both directions.
    pub fn without_edge(&self, source: &str, target: &str) -> Graph {
        let mut copy = self.clone();
        let undirected = copy.kind == GraphKind::Undirected;

        if let Some(neighbors) = copy.adjacency.get_mut(source) {
            neighbors.remove(target);
        }
        if undirected {
            if let Some(neighbors) = copy.adjacency.get_mut(target) {
                neighbors.remove(source);
            }
        }
        copy.edges.retain(|edge| {
            let forward = edge.source == source && edge.target == target;
            let backward = undirected && edge.source == target && edge.target == source;
            !(forward || backward)
        });
        copy
    }

    /// Snapshot for reporting and serialization
    pub fn export(&self) -> GraphExport {
        GraphExport {
            kind: self.kind,
            nodes: self.adjacency.keys().cloned().collect(),
            edges: self.edges.clone(),
            adjacency: self.adjacency.clone(),
        }
    }

    /// Rebuild a graph from an export, re-checking every invariant
    pub fn from_export(export: GraphExport) -> Result<Self> {
        let mut graph = Graph::new(export.kind);
        for id in export.nodes {
            graph.add_node(id);
        }

        if let Some(stray) = export.adjacency.keys().find(|id| !graph.contains(id)) {
            return Err(GraphError::invalid_config(
                "adjacency",
                format!("adjacency lists unknown node {}", stray),
            ));
        }

        for edge in &export.edges {
            let cost = export
                .adjacency
                .get(&edge.source)
                .and_then(|neighbors| neighbors.get(&edge.target))
                .copied()
                .ok_or_else(|| {
                    GraphError::invalid_config(
                        "adjacency",
                        format!("edge {} -> {} has no cost entry", edge.source, edge.target),
                    )
                })?;
            graph.add_edge(&edge.source, &edge.target, cost, edge.strength)?;
        }

        let exported_entries: usize = export.adjacency.values().map(|n| n.len()).sum();
        let rebuilt_entries: usize = graph.adjacency.values().map(|n| n.len()).sum();
        if exported_entries != rebuilt_entries {
            return Err(GraphError::invalid_config(
                "adjacency",
                format!(
                    "{} adjacency entries do not match {} edges",
                    exported_entries,
                    graph.edges.len()
                ),
            ));
        }

        // Every exported entry, including the reverse side of undirected
        // edges, must carry the cost the rebuilt graph assigns it
        for (source, neighbors) in &export.adjacency {
            for (target, &cost) in neighbors {
                if graph.cost(source, target) != Some(cost) {
                    return Err(GraphError::invalid_config(
                        "adjacency",
                        format!("entry {} -> {} disagrees with the edge list", source, target),
                    ));
                }
            }
        }

        Ok(graph)
    }
}

impl GraphExport {
    /// Pretty-printed JSON document
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl From<Graph> for GraphExport {
    fn from(graph: Graph) -> Self {
        GraphExport {
            kind: graph.kind,
            nodes: graph.adjacency.keys().cloned().collect(),
            edges: graph.edges,
            adjacency: graph.adjacency,
        }
    }
}

impl TryFrom<GraphExport> for Graph {
    type Error = GraphError;

    fn try_from(export: GraphExport) -> Result<Self> {
        Graph::from_export(export)
    }
}
