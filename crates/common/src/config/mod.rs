//! Configuration management for BibGraph analyses
//!
//! Supports loading configuration from:
//! - Configuration files (bibgraph.toml)
//! - Inline TOML strings
//! - Default values
//!
//! Builders and algorithms never read configuration themselves; callers load
//! an [`AnalysisConfig`] and pass its values as explicit arguments.

use ::config::{Config, File, FileFormat};
use serde::{Deserialize, Serialize};

use crate::errors::{GraphError, Result};

/// Main analysis configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AnalysisConfig {
    /// Inferred-citation graph parameters
    #[serde(default)]
    pub citation: CitationConfig,

    /// Term co-occurrence graph parameters
    #[serde(default)]
    pub terms: TermConfig,

    /// Algorithm guard rails
    #[serde(default)]
    pub algorithms: AlgorithmConfig,

    /// Observability configuration
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CitationConfig {
    /// Minimum similarity (0.0-1.0) for an inferred citation edge
    #[serde(default = "default_min_similarity")]
    pub min_similarity: f64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TermConfig {
    /// Sliding window size in tokens
    #[serde(default = "default_window")]
    pub window: usize,

    /// Minimum summed co-occurrence count for an edge
    #[serde(default = "default_min_cooccurrence")]
    pub min_cooccurrence: u64,

    /// Minimum document frequency when no explicit vocabulary is supplied
    #[serde(default = "default_min_document_frequency")]
    pub min_document_frequency: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AlgorithmConfig {
    /// Largest graph `all_pairs_within` will run Floyd-Warshall on
    #[serde(default = "default_floyd_warshall_max_nodes")]
    pub floyd_warshall_max_nodes: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable JSON logging
    #[serde(default = "default_json_logging")]
    pub json_logging: bool,
}

// Default value functions
fn default_min_similarity() -> f64 { 0.35 }
fn default_window() -> usize { 30 }
fn default_min_cooccurrence() -> u64 { 2 }
fn default_min_document_frequency() -> usize { 3 }
fn default_floyd_warshall_max_nodes() -> usize { 150 }
fn default_log_level() -> String { "info".to_string() }
fn default_json_logging() -> bool { false }

impl Default for CitationConfig {
    fn default() -> Self {
        Self {
            min_similarity: default_min_similarity(),
        }
    }
}

impl Default for TermConfig {
    fn default() -> Self {
        Self {
            window: default_window(),
            min_cooccurrence: default_min_cooccurrence(),
            min_document_frequency: default_min_document_frequency(),
        }
    }
}

impl Default for AlgorithmConfig {
    fn default() -> Self {
        Self {
            floyd_warshall_max_nodes: default_floyd_warshall_max_nodes(),
        }
    }
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json_logging: default_json_logging(),
        }
    }
}

impl AnalysisConfig {
    /// Load from a configuration file (extension selects the format)
    pub fn from_file(path: &str) -> Result<Self> {
        let config = Config::builder()
            .add_source(File::with_name(path))
            .build()?;

        let parsed: Self = config.try_deserialize()?;
        parsed.validate()?;
        Ok(parsed)
    }

    /// Load from an inline TOML document
    pub fn from_toml_str(toml: &str) -> Result<Self> {
        let config = Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?;

        let parsed: Self = config.try_deserialize()?;
        parsed.validate()?;
        Ok(parsed)
    }

    /// Reject values the builders would refuse at their boundary
    pub fn validate(&self) -> Result<()> {
        validate_min_similarity(self.citation.min_similarity)?;
        validate_window(self.terms.window)?;
        validate_min_cooccurrence(self.terms.min_cooccurrence)?;
        validate_min_document_frequency(self.terms.min_document_frequency)?;
        Ok(())
    }
}

/// `min_similarity` must be a number in [0, 1]
pub fn validate_min_similarity(min_similarity: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&min_similarity) {
        return Err(GraphError::invalid_config(
            "min_similarity",
            format!("{} is outside [0, 1]", min_similarity),
        ));
    }
    Ok(())
}

/// `window` must be at least 1
pub fn validate_window(window: usize) -> Result<()> {
    if window < 1 {
        return Err(GraphError::invalid_config("window", "must be at least 1"));
    }
    Ok(())
}

/// `min_cooccurrence` must be at least 1
pub fn validate_min_cooccurrence(min_cooccurrence: u64) -> Result<()> {
    if min_cooccurrence < 1 {
        return Err(GraphError::invalid_config(
            "min_cooccurrence",
            "must be at least 1",
        ));
    }
    Ok(())
}

/// `min_document_frequency` must be at least 1
pub fn validate_min_document_frequency(min_df: usize) -> Result<()> {
    if min_df < 1 {
        return Err(GraphError::invalid_config(
            "min_document_frequency",
            "must be at least 1",
        ));
    }
    Ok(())
}
