//! Term co-occurrence graphs
//!
//! Vocabulary terms become nodes of an undirected graph; terms that appear
//! within a token window of each other often enough are linked, with
//! `cost = 1 / count` and `strength = count`.

mod builder;
mod cooccurrence;
mod vocabulary;

pub use builder::{build_term_graph, TermGraphBuilder};
pub use cooccurrence::{count_cooccurrences, count_corpus, CooccurrenceCounts};
pub use vocabulary::{document_frequencies, VocabularyPolicy};

use crate::algorithms::ComponentSet;
use crate::graph::Graph;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Parameters a term graph was built with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermGraphParams {
    pub window: usize,
    pub min_cooccurrence: u64,
    pub vocabulary: VocabularyPolicy,
    pub vocab_size: usize,
}

/// Term graph with its degree table and connected components
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermGraph {
    pub graph: Graph,
    /// Incident edge count per term
    pub degree: BTreeMap<String, usize>,
    pub components: ComponentSet,
    pub params: TermGraphParams,
}

impl TermGraph {
    /// Terms linked to `term`, strongest first (ties by term)
    pub fn related(&self, term: &str) -> Vec<(&str, u64)> {
        let mut related: Vec<(&str, u64)> = self
            .graph
            .edges()
            .iter()
            .filter_map(|edge| {
                let other = if edge.source == term {
                    edge.target.as_str()
                } else if edge.target == term {
                    edge.source.as_str()
                } else {
                    return None;
                };
                Some((other, edge.strength as u64))
            })
            .collect();
        related.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        related
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_related_terms() {
        let corpus: Vec<Vec<String>> = ["a b", "a b", "a c", "b c"]
            .iter()
            .map(|t| t.split_whitespace().map(String::from).collect())
            .collect();
        let terms = build_term_graph(&corpus, &VocabularyPolicy::explicit(["a", "b", "c"]), 1, 1).unwrap();

        assert_eq!(terms.related("a"), vec![("b", 2), ("c", 1)]);
        assert!(terms.related("zz").is_empty());
    }

    #[test]
    fn test_serialization_round_trip() {
        let corpus = vec![vec!["x".to_string(), "y".to_string()]];
        let terms = build_term_graph(&corpus, &VocabularyPolicy::MinDocumentFrequency(1), 3, 1).unwrap();

        let json = serde_json::to_value(&terms).unwrap();
        assert_eq!(json["params"]["vocabulary"]["mode"], "min_document_frequency");
        assert_eq!(json["degree"]["x"], 1);

        let restored: TermGraph = serde_json::from_value(json).unwrap();
        assert_eq!(restored, terms);
    }
}
