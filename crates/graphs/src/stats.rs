//! Summary statistics over a built graph
//!
//! These are the figures a report prints next to the graph itself. Rankings
//! break ties by node id so repeated runs agree.

use crate::graph::{Edge, Graph, GraphKind};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Minimum, maximum and mean of edge strengths
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrengthStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

/// Degree distribution (median is the upper median: `sorted[len / 2]`)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DegreeStats {
    pub min: usize,
    pub max: usize,
    pub mean: f64,
    pub median: usize,
}

/// A node and the degree it was ranked by
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedNode {
    pub id: String,
    pub degree: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphSummary {
    pub kind: GraphKind,
    pub node_count: usize,
    pub edge_count: usize,
    /// Edge count over the maximum possible for this kind of graph
    pub density: f64,
    /// `None` when the graph has no edges
    pub strength: Option<StrengthStats>,
    /// `None` when the graph has no nodes
    pub degree: Option<DegreeStats>,
    /// Node with the highest in-degree (directed graphs only)
    pub most_cited: Option<RankedNode>,
    /// Node with the highest out-degree (directed graphs only)
    pub most_citing: Option<RankedNode>,
}

/// Compute the summary of a graph
pub fn summarize(graph: &Graph) -> GraphSummary {
    let n = graph.node_count();
    let m = graph.edge_count();

    let possible = match graph.kind() {
        GraphKind::Directed => n.saturating_mul(n.saturating_sub(1)),
        GraphKind::Undirected => n.saturating_mul(n.saturating_sub(1)) / 2,
    };
    let density = if possible == 0 {
        0.0
    } else {
        m as f64 / possible as f64
    };

    let strength = strength_stats(graph.edges());

    let mut degrees: Vec<usize> = graph.degrees().into_values().collect();
    degrees.sort_unstable();
    let degree = (!degrees.is_empty()).then(|| DegreeStats {
        min: degrees[0],
        max: degrees[degrees.len() - 1],
        mean: degrees.iter().sum::<usize>() as f64 / degrees.len() as f64,
        median: degrees[degrees.len() / 2],
    });

    let (most_cited, most_citing) = if graph.is_directed() {
        (
            max_by_degree(graph, |id| graph.in_degree(id)),
            max_by_degree(graph, |id| graph.out_degree(id)),
        )
    } else {
        (None, None)
    };

    GraphSummary {
        kind: graph.kind(),
        node_count: n,
        edge_count: m,
        density,
        strength,
        degree,
        most_cited,
        most_citing,
    }
}

fn strength_stats(edges: &[Edge]) -> Option<StrengthStats> {
    if edges.is_empty() {
        return None;
    }
    let (min, max, sum) = edges.iter().fold(
        (f64::INFINITY, f64::NEG_INFINITY, 0.0),
        |(min, max, sum), edge| (min.min(edge.strength), max.max(edge.strength), sum + edge.strength),
    );
    Some(StrengthStats {
        min,
        max,
        mean: sum / edges.len() as f64,
    })
}

/// Highest-scoring node; ties go to the smallest id
fn max_by_degree<F>(graph: &Graph, score: F) -> Option<RankedNode>
where
    F: Fn(&str) -> usize,
{
    graph
        .nodes()
        .map(|id| (id, score(id)))
        .fold(None, |best: Option<(&str, usize)>, (id, degree)| match best {
            Some((_, top)) if top >= degree => best,
            _ => Some((id, degree)),
        })
        .map(|(id, degree)| RankedNode {
            id: id.to_string(),
            degree,
        })
}

/// The `k` edges with the highest strength, ties by (source, target)
pub fn strongest_edges(graph: &Graph, k: usize) -> Vec<Edge> {
    let mut edges: Vec<&Edge> = graph.edges().iter().collect();
    edges.sort_by(|a, b| {
        b.strength
            .total_cmp(&a.strength)
            .then_with(|| a.source.cmp(&b.source))
            .then_with(|| a.target.cmp(&b.target))
    });
    edges.into_iter().take(k).cloned().collect()
}

/// The `k` nodes with the highest degree, ties by id
pub fn top_degree(graph: &Graph, k: usize) -> Vec<RankedNode> {
    let mut ranked: Vec<RankedNode> = graph
        .degrees()
        .into_iter()
        .map(|(id, degree)| RankedNode { id, degree })
        .collect();
    ranked.sort_by(|a, b| match b.degree.cmp(&a.degree) {
        Ordering::Equal => a.id.cmp(&b.id),
        other => other,
    });
    ranked.truncate(k);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn citations() -> Graph {
        let mut graph = Graph::directed();
        for id in ["A0", "A1", "A2", "A3"] {
            graph.add_node(id);
        }
        graph.add_edge("A1", "A0", 0.4, 0.6).unwrap();
        graph.add_edge("A2", "A0", 0.5, 0.5).unwrap();
        graph.add_edge("A2", "A1", 0.2, 0.8).unwrap();
        graph
    }

    #[test]
    fn test_directed_summary() {
        let summary = summarize(&citations());

        assert_eq!(summary.node_count, 4);
        assert_eq!(summary.edge_count, 3);
        assert!((summary.density - 0.25).abs() < 1e-12);

        let strength = summary.strength.unwrap();
        assert_eq!(strength.min, 0.5);
        assert_eq!(strength.max, 0.8);
        assert!((strength.mean - 19.0 / 30.0).abs() < 1e-12);

        // degrees sorted: A3=0, A0=2, A1=2, A2=2
        let degree = summary.degree.unwrap();
        assert_eq!((degree.min, degree.max, degree.median), (0, 2, 2));
        assert_eq!(degree.mean, 1.5);

        assert_eq!(summary.most_cited.unwrap().id, "A0");
        assert_eq!(
            summary.most_citing,
            Some(RankedNode {
                id: "A2".to_string(),
                degree: 2
            })
        );
    }

    #[test]
    fn test_undirected_summary_has_no_citation_ranking() {
        let mut graph = Graph::undirected();
        for id in ["a", "b", "c"] {
            graph.add_node(id);
        }
        graph.add_edge("a", "b", 0.5, 2.0).unwrap();

        let summary = summarize(&graph);
        assert!((summary.density - 1.0 / 3.0).abs() < 1e-12);
        assert!(summary.most_cited.is_none());
        assert!(summary.most_citing.is_none());
    }

    #[test]
    fn test_empty_graph_summary() {
        let summary = summarize(&Graph::directed());
        assert_eq!(summary.density, 0.0);
        assert!(summary.strength.is_none());
        assert!(summary.degree.is_none());
        assert!(summary.most_cited.is_none());
    }

    #[test]
    fn test_rankings() {
        let graph = citations();

        let strongest = strongest_edges(&graph, 2);
        assert_eq!(strongest.len(), 2);
        assert_eq!(strongest[0].strength, 0.8);
        assert_eq!(strongest[1].source, "A1");

        let top = top_degree(&graph, 3);
        let ids: Vec<&str> = top.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["A0", "A1", "A2"]);
        assert!(strongest_edges(&graph, 0).is_empty());
    }
}
