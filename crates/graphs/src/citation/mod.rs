//! Inferred-citation graphs
//!
//! Documents become nodes (ids `A0`, `A1`, ...). Sufficiently similar pairs
//! are linked newer → older with `cost = 1 - similarity` and
//! `strength = similarity`.

mod builder;
mod similarity;

pub use builder::{build_citation_graph, infer_direction, CitationGraphBuilder};
pub use similarity::{FnOracle, SimilarityMatrix, SimilarityOracle};

use crate::graph::Graph;
use bibgraph_common::models::DocumentRef;
use serde::{Deserialize, Serialize};

/// Directed citation graph together with the documents behind its nodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CitationGraph {
    graph: Graph,
    documents: Vec<DocumentRef>,
}

impl CitationGraph {
    pub(crate) fn new(graph: Graph, documents: Vec<DocumentRef>) -> Self {
        Self { graph, documents }
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Documents in corpus order
    pub fn documents(&self) -> &[DocumentRef] {
        &self.documents
    }

    /// Metadata for a node id
    pub fn document(&self, id: &str) -> Option<&DocumentRef> {
        self.documents.iter().find(|doc| doc.id() == id)
    }

    /// Documents cited by `id`, most similar first
    pub fn references(&self, id: &str) -> Vec<&DocumentRef> {
        let mut cited: Vec<(&str, f64)> = self
            .graph
            .neighbors(id)
            .map(|targets| targets.iter().map(|(t, &c)| (t.as_str(), c)).collect())
            .unwrap_or_default();
        cited.sort_by(|a, b| a.1.total_cmp(&b.1).then_with(|| a.0.cmp(b.0)));
        cited
            .into_iter()
            .filter_map(|(target, _)| self.document(target))
            .collect()
    }

    pub fn into_graph(self) -> Graph {
        self.graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lookup_and_references() {
        let documents: Vec<DocumentRef> = (0..3)
            .map(|i| DocumentRef::new(i, format!("Paper {}", i), Some(2000 + i as i32), ""))
            .collect();
        let mut similarity = SimilarityMatrix::zeros(3);
        similarity.set(0, 2, 0.5).unwrap();
        similarity.set(1, 2, 0.9).unwrap();

        let citations = build_citation_graph(&documents, &similarity, 0.4).unwrap();

        assert_eq!(citations.document("A1").map(|d| d.title()), Some("Paper 1"));
        assert!(citations.document("A9").is_none());

        let cited: Vec<&str> = citations
            .references("A2")
            .into_iter()
            .map(|d| d.id())
            .collect();
        assert_eq!(cited, vec!["A1", "A0"]);
        assert!(citations.references("A0").is_empty());
    }

    #[test]
    fn test_serialization_round_trip() {
        let documents = vec![DocumentRef::new(0, "Only", None, "")];
        let citations = build_citation_graph(&documents, &SimilarityMatrix::zeros(1), 0.5).unwrap();

        let json = serde_json::to_string(&citations).unwrap();
        let restored: CitationGraph = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, citations);
    }
}
