//! Term co-occurrence graph construction

use super::cooccurrence::count_corpus;
use super::vocabulary::VocabularyPolicy;
use super::{TermGraph, TermGraphParams};
use crate::algorithms::connected_components;
use crate::graph::Graph;
use bibgraph_common::config::{validate_min_cooccurrence, validate_window, TermConfig};
use bibgraph_common::errors::Result;
use bibgraph_common::metrics::record_graph_build;
use std::time::Instant;
use tracing::instrument;

/// Builds an undirected graph linking terms that appear near each other
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TermGraphBuilder {
    window: usize,
    min_cooccurrence: u64,
}

impl TermGraphBuilder {
    /// Create a builder; `window` and `min_cooccurrence` must both be ≥ 1
    pub fn new(window: usize, min_cooccurrence: u64) -> Result<Self> {
        validate_window(window)?;
        validate_min_cooccurrence(min_cooccurrence)?;
        Ok(Self {
            window,
            min_cooccurrence,
        })
    }

    pub fn from_config(config: &TermConfig) -> Result<Self> {
        Self::new(config.window, config.min_cooccurrence)
    }

    pub fn window(&self) -> usize {
        self.window
    }

    pub fn min_cooccurrence(&self) -> u64 {
        self.min_cooccurrence
    }

    /// Build the graph from tokenized documents.
    ///
    /// Every vocabulary term becomes a node, isolated or not. A pair is
    /// linked when its corpus-wide count reaches `min_cooccurrence`, with
    /// `strength = count` and `cost = 1 / count`.
    #[instrument(skip_all, fields(documents = documents.len(), window = self.window, mode = policy.mode()))]
    pub fn build(&self, documents: &[Vec<String>], policy: &VocabularyPolicy) -> Result<TermGraph> {
        let started = Instant::now();
        let vocabulary = policy.resolve(documents)?;
        tracing::debug!(vocabulary = vocabulary.len(), "Vocabulary resolved");

        let mut graph = Graph::undirected();
        for term in &vocabulary {
            graph.add_node(term.as_str());
        }

        let counts = count_corpus(documents, &vocabulary, self.window);
        for (a, b, count) in counts.iter() {
            if count >= self.min_cooccurrence {
                let strength = count as f64;
                graph.add_edge(a, b, 1.0 / strength, strength)?;
            }
        }

        let degree = graph.degrees();
        let components = connected_components(&graph)?;

        let elapsed = started.elapsed();
        record_graph_build("terms", graph.node_count(), graph.edge_count(), elapsed);
        tracing::info!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            pairs = counts.len(),
            components = components.len(),
            elapsed_ms = elapsed.as_millis() as u64,
            "Term graph built"
        );

        Ok(TermGraph {
            params: TermGraphParams {
                window: self.window,
                min_cooccurrence: self.min_cooccurrence,
                vocabulary: policy.clone(),
                vocab_size: vocabulary.len(),
            },
            graph,
            degree,
            components,
        })
    }
}

/// Build a term graph with a one-off builder
pub fn build_term_graph(
    documents: &[Vec<String>],
    policy: &VocabularyPolicy,
    window: usize,
    min_cooccurrence: u64,
) -> Result<TermGraph> {
    TermGraphBuilder::new(window, min_cooccurrence)?.build(documents, policy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bibgraph_common::errors::GraphError;

    fn docs(texts: &[&str]) -> Vec<Vec<String>> {
        texts
            .iter()
            .map(|t| t.split_whitespace().map(String::from).collect())
            .collect()
    }

    fn corpus() -> Vec<Vec<String>> {
        docs(&[
            "neural network training",
            "neural network inference",
            "graph network",
            "isolated",
        ])
    }

    #[test]
    fn test_edges_respect_min_cooccurrence() {
        let policy = VocabularyPolicy::explicit(["neural", "network", "graph", "isolated"]);
        let terms = build_term_graph(&corpus(), &policy, 1, 2).unwrap();
        let graph = &terms.graph;

        // neural/network co-occur twice, graph/network once
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.cost("network", "neural"), Some(0.5));
        assert_eq!(graph.cost("neural", "network"), Some(0.5));
        assert_eq!(graph.edges()[0].strength, 2.0);
        assert_eq!(graph.cost("graph", "network"), None);
    }

    #[test]
    fn test_degree_and_components_cover_vocabulary() {
        let policy = VocabularyPolicy::explicit(["neural", "network", "graph", "isolated"]);
        let terms = build_term_graph(&corpus(), &policy, 1, 1).unwrap();

        assert_eq!(terms.degree["network"], 2);
        assert_eq!(terms.degree["isolated"], 0);
        assert_eq!(terms.components.sizes(), vec![3, 1]);
        assert!(terms.components.covers(&terms.graph));
        assert_eq!(terms.params.vocab_size, 4);
    }

    #[test]
    fn test_document_frequency_vocabulary() {
        let terms = build_term_graph(&corpus(), &VocabularyPolicy::MinDocumentFrequency(2), 2, 1).unwrap();

        // only "neural" and "network" appear in two or more documents
        assert_eq!(terms.graph.node_count(), 2);
        assert_eq!(terms.graph.edge_count(), 1);
        assert_eq!(terms.params.vocabulary.mode(), "min_document_frequency");
    }

    #[test]
    fn test_empty_vocabulary() {
        let policy = VocabularyPolicy::explicit(Vec::<String>::new());
        let terms = build_term_graph(&corpus(), &policy, 5, 1).unwrap();

        assert!(terms.graph.is_empty());
        assert!(terms.components.is_empty());
        assert!(terms.degree.is_empty());
    }

    #[test]
    fn test_rejects_invalid_parameters() {
        assert!(matches!(
            TermGraphBuilder::new(0, 1),
            Err(GraphError::InvalidConfiguration { .. })
        ));
        assert!(matches!(
            TermGraphBuilder::new(1, 0),
            Err(GraphError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_from_config() {
        let builder = TermGraphBuilder::from_config(&TermConfig::default()).unwrap();
        assert_eq!(builder.window(), 30);
        assert_eq!(builder.min_cooccurrence(), 2);
    }
}
