//! BibGraph Graphs Library
//!
//! Builds two graphs from a document corpus and analyses them:
//! - Inferred-citation graph (directed, from similarity and chronology)
//! - Term co-occurrence graph (undirected, from token windows)
//! - Shortest paths, strongly connected and connected components
//! - Summary statistics for reporting
//!
//! Both builders emit the same [`Graph`] type, so every algorithm runs on
//! either one. Lower edge cost always means more closely related.

pub mod algorithms;
pub mod citation;
pub mod graph;
pub mod stats;
pub mod terms;

// Re-export commonly used types
pub use crate::algorithms::{
    all_pairs_shortest_paths, connected_components, dijkstra, shortest_path,
    strongly_connected_components, AllPairsShortestPaths, ComponentSet, GraphPath, ShortestPaths,
};
pub use crate::citation::{build_citation_graph, CitationGraph, CitationGraphBuilder, SimilarityOracle};
pub use crate::graph::{Edge, Graph, GraphExport, GraphKind};
pub use crate::stats::{summarize, GraphSummary};
pub use crate::terms::{build_term_graph, TermGraph, TermGraphBuilder, VocabularyPolicy};
