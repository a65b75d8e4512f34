//! Error types for BibGraph
//!
//! Provides the failure model shared by the graph builders and algorithms:
//! - Distinct error types for configuration, lookup and integrity failures
//! - Stable error codes for machine-readable handling
//! - Caller/internal classification for the reporting layer
//!
//! Unreachable nodes and empty inputs are expected outcomes and are encoded
//! in results (infinite distance, empty path, empty graph), never as errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias using GraphError
pub type Result<T> = std::result::Result<T, GraphError>;

/// Error codes for machine-readable error identification
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Configuration errors (1xxx)
    InvalidConfiguration,
    InvalidSimilarity,
    UnsupportedGraphKind,

    // Lookup errors (4xxx)
    UnknownNode,

    // Graph integrity errors (7xxx)
    SelfLoop,
    DuplicateEdge,
    InvalidCost,

    // Internal errors (9xxx)
    ConfigurationError,
    SerializationError,
}

impl ErrorCode {
    /// Get the numeric code for this error
    pub fn as_code(&self) -> u16 {
        match self {
            ErrorCode::InvalidConfiguration => 1001,
            ErrorCode::InvalidSimilarity => 1002,
            ErrorCode::UnsupportedGraphKind => 1003,

            ErrorCode::UnknownNode => 4001,

            ErrorCode::SelfLoop => 7001,
            ErrorCode::DuplicateEdge => 7002,
            ErrorCode::InvalidCost => 7003,

            ErrorCode::ConfigurationError => 9001,
            ErrorCode::SerializationError => 9002,
        }
    }
}

/// Graph analysis error types
#[derive(Error, Debug)]
pub enum GraphError {
    // Configuration errors
    #[error("Invalid configuration for {parameter}: {message}")]
    InvalidConfiguration { parameter: String, message: String },

    #[error("Similarity oracle returned {value} for pair ({source_index}, {target_index}); expected a value in [0, 1]")]
    InvalidSimilarity {
        source_index: usize,
        target_index: usize,
        value: f64,
    },

    #[error("{operation} requires a {expected} graph, got a {found} graph")]
    UnsupportedGraphKind {
        operation: String,
        expected: String,
        found: String,
    },

    // Lookup errors
    #[error("Unknown node: {id}")]
    UnknownNode { id: String },

    // Graph integrity errors
    #[error("Self-loop rejected on node {id}")]
    SelfLoop { id: String },

    #[error("Duplicate edge {from} -> {to}")]
    DuplicateEdge { from: String, to: String },

    #[error("Invalid cost {cost} on edge {from} -> {to}; costs must be finite and non-negative")]
    InvalidCost { from: String, to: String, cost: f64 },

    // Internal errors
    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl GraphError {
    /// Shorthand for an `InvalidConfiguration` error
    pub fn invalid_config(parameter: &str, message: impl Into<String>) -> Self {
        GraphError::InvalidConfiguration {
            parameter: parameter.to_string(),
            message: message.into(),
        }
    }

    /// Shorthand for an `UnknownNode` error
    pub fn unknown_node(id: &str) -> Self {
        GraphError::UnknownNode { id: id.to_string() }
    }

    /// Get the error code for this error
    pub fn code(&self) -> ErrorCode {
        match self {
            GraphError::InvalidConfiguration { .. } => ErrorCode::InvalidConfiguration,
            GraphError::InvalidSimilarity { .. } => ErrorCode::InvalidSimilarity,
            GraphError::UnsupportedGraphKind { .. } => ErrorCode::UnsupportedGraphKind,
            GraphError::UnknownNode { .. } => ErrorCode::UnknownNode,
            GraphError::SelfLoop { .. } => ErrorCode::SelfLoop,
            GraphError::DuplicateEdge { .. } => ErrorCode::DuplicateEdge,
            GraphError::InvalidCost { .. } => ErrorCode::InvalidCost,
            GraphError::Config(_) => ErrorCode::ConfigurationError,
            GraphError::Serialization(_) => ErrorCode::SerializationError,
        }
    }

    /// Check if the caller can fix this error by changing its input
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self.code(),
            ErrorCode::InvalidConfiguration
                | ErrorCode::InvalidSimilarity
                | ErrorCode::UnsupportedGraphKind
                | ErrorCode::UnknownNode
        )
    }

    /// Check if this error reports a broken graph invariant
    pub fn is_integrity_error(&self) -> bool {
        (7000..8000).contains(&self.code().as_code())
    }
}
