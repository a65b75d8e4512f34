//! Inferred-citation graph construction
//!
//! Explicit references are not available, so citations are inferred: two
//! documents whose similarity reaches the threshold are linked, and the edge
//! points from the newer document to the older one.

use super::similarity::SimilarityOracle;
use super::CitationGraph;
use crate::graph::Graph;
use bibgraph_common::config::{validate_min_similarity, CitationConfig};
use bibgraph_common::errors::{GraphError, Result};
use bibgraph_common::metrics::record_graph_build;
use bibgraph_common::models::DocumentRef;
use bibgraph_common::round_weight;
use std::collections::HashSet;
use std::time::Instant;
use tracing::instrument;

/// Builds a directed citation graph from document metadata and similarity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CitationGraphBuilder {
    min_similarity: f64,
}

impl CitationGraphBuilder {
    /// Create a builder; `min_similarity` outside [0, 1] is rejected
    pub fn new(min_similarity: f64) -> Result<Self> {
        validate_min_similarity(min_similarity)?;
        Ok(Self { min_similarity })
    }

    pub fn from_config(config: &CitationConfig) -> Result<Self> {
        Self::new(config.min_similarity)
    }

    pub fn min_similarity(&self) -> f64 {
        self.min_similarity
    }

    /// Build the graph.
    ///
    /// `documents[k]` must be the document the oracle knows as position `k`.
    /// An empty corpus yields an empty graph.
    #[instrument(skip_all, fields(documents = documents.len(), min_similarity = self.min_similarity))]
    pub fn build<O>(&self, documents: &[DocumentRef], oracle: &O) -> Result<CitationGraph>
    where
        O: SimilarityOracle + ?Sized,
    {
        let started = Instant::now();

        if oracle.len() != documents.len() {
            return Err(GraphError::invalid_config(
                "similarity",
                format!(
                    "oracle covers {} documents but {} were supplied",
                    oracle.len(),
                    documents.len()
                ),
            ));
        }

        let mut seen = HashSet::with_capacity(documents.len());
        let mut graph = Graph::directed();
        for doc in documents {
            if !seen.insert(doc.id()) {
                return Err(GraphError::invalid_config(
                    "documents",
                    format!("duplicate document id {}", doc.id()),
                ));
            }
            graph.add_node(doc.id());
        }

        for i in 0..documents.len() {
            for j in (i + 1)..documents.len() {
                let similarity = oracle.similarity(i, j);
                if !(0.0..=1.0).contains(&similarity) {
                    return Err(GraphError::InvalidSimilarity {
                        source_index: i,
                        target_index: j,
                        value: similarity,
                    });
                }
                if similarity < self.min_similarity {
                    continue;
                }

                let (citing, cited) = infer_direction(documents, i, j);
                let strength = round_weight(similarity);
                let cost = round_weight(1.0 - strength);
                graph.add_edge(documents[citing].id(), documents[cited].id(), cost, strength)?;
            }
        }

        let elapsed = started.elapsed();
        record_graph_build("citation", graph.node_count(), graph.edge_count(), elapsed);
        tracing::info!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            elapsed_ms = elapsed.as_millis() as u64,
            "Citation graph built"
        );

        Ok(CitationGraph::new(graph, documents.to_vec()))
    }
}

/// Decide which of two documents cites the other, as `(citing, cited)`.
///
/// With both years known and different, the newer document cites the older.
/// Otherwise the higher corpus index cites the lower one.
pub fn infer_direction(documents: &[DocumentRef], i: usize, j: usize) -> (usize, usize) {
    match (documents[i].year(), documents[j].year()) {
        (Some(year_i), Some(year_j)) if year_i != year_j => {
            if year_i > year_j {
                (i, j)
            } else {
                (j, i)
            }
        }
        _ => {
            if i > j {
                (i, j)
            } else {
                (j, i)
            }
        }
    }
}

/// Build a citation graph with a one-off builder
pub fn build_citation_graph<O>(
    documents: &[DocumentRef],
    oracle: &O,
    min_similarity: f64,
) -> Result<CitationGraph>
where
    O: SimilarityOracle + ?Sized,
{
    CitationGraphBuilder::new(min_similarity)?.build(documents, oracle)
}
