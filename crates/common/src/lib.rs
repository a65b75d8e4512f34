//! BibGraph Common Library
//!
//! Shared code for the BibGraph analysis crates including:
//! - Error types and handling
//! - Configuration management
//! - Tracing initialisation
//! - Metrics helpers
//! - Document data model

pub mod config;
pub mod errors;
pub mod metrics;
pub mod models;
pub mod telemetry;

// Re-export commonly used types
pub use crate::config::AnalysisConfig;
pub use crate::errors::{GraphError, Result};
pub use crate::models::{DocumentRecord, DocumentRef};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Decimal places kept for citation similarities and costs
pub const WEIGHT_PRECISION: i32 = 6;

/// Round a weight to [`WEIGHT_PRECISION`] decimal places
pub fn round_weight(value: f64) -> f64 {
    let scale = 10f64.powi(WEIGHT_PRECISION);
    (value * scale).round() / scale
}
