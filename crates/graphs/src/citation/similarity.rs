//! Pairwise document similarity sources
//!
//! How similarity is computed (TF-IDF, embeddings, ...) is not this crate's
//! concern. Builders only need a symmetric score in [0, 1] per document pair.

use bibgraph_common::errors::{GraphError, Result};

/// Symmetric similarity over a corpus addressed by position
pub trait SimilarityOracle {
    /// Number of documents the oracle covers
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Similarity of documents `i` and `j`, expected in [0, 1].
    ///
    /// Builders call this once per unordered pair with `i < j`.
    fn similarity(&self, i: usize, j: usize) -> f64;
}

/// Dense, validated similarity matrix
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatrix {
    size: usize,
    values: Vec<f64>,
}

impl SimilarityMatrix {
    /// Build from rows; the matrix must be square, symmetric and bounded
    pub fn new(rows: Vec<Vec<f64>>) -> Result<Self> {
        let size = rows.len();
        if let Some(i) = rows.iter().position(|row| row.len() != size) {
            return Err(GraphError::invalid_config(
                "similarity",
                format!("row {} has {} entries, expected {}", i, rows[i].len(), size),
            ));
        }

        let values: Vec<f64> = rows.into_iter().flatten().collect();
        for i in 0..size {
            for j in 0..size {
                let value = values[i * size + j];
                if !(0.0..=1.0).contains(&value) {
                    return Err(GraphError::InvalidSimilarity {
                        source_index: i,
                        target_index: j,
                        value,
                    });
                }
                if j > i && value != values[j * size + i] {
                    return Err(GraphError::invalid_config(
                        "similarity",
                        format!("matrix is not symmetric at ({}, {})", i, j),
                    ));
                }
            }
        }

        Ok(Self { size, values })
    }

    /// Matrix with zero similarity everywhere off the diagonal
    pub fn zeros(size: usize) -> Self {
        let mut values = vec![0.0; size * size];
        for i in 0..size {
            values[i * size + i] = 1.0;
        }
        Self { size, values }
    }

    /// Set the similarity of a pair (both orientations)
    pub fn set(&mut self, i: usize, j: usize, value: f64) -> Result<()> {
        if i >= self.size || j >= self.size {
            return Err(GraphError::invalid_config(
                "similarity",
                format!("pair ({}, {}) outside a {}-document matrix", i, j, self.size),
            ));
        }
        if !(0.0..=1.0).contains(&value) {
            return Err(GraphError::InvalidSimilarity {
                source_index: i,
                target_index: j,
                value,
            });
        }
        self.values[i * self.size + j] = value;
        self.values[j * self.size + i] = value;
        Ok(())
    }
}

impl SimilarityOracle for SimilarityMatrix {
    fn len(&self) -> usize {
        self.size
    }

    fn similarity(&self, i: usize, j: usize) -> f64 {
        self.values[i * self.size + j]
    }
}

/// Oracle backed by a closure, for similarity computed on the fly
pub struct FnOracle<F> {
    len: usize,
    similarity: F,
}

impl<F> FnOracle<F>
where
    F: Fn(usize, usize) -> f64,
{
    pub fn new(len: usize, similarity: F) -> Self {
        Self { len, similarity }
    }
}

impl<F> SimilarityOracle for FnOracle<F>
where
    F: Fn(usize, usize) -> f64,
{
    fn len(&self) -> usize {
        self.len
    }

    fn similarity(&self, i: usize, j: usize) -> f64 {
        (self.similarity)(i, j)
    }
}
