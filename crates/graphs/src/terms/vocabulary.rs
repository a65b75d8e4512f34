//! Vocabulary selection

use bibgraph_common::config::validate_min_document_frequency;
use bibgraph_common::errors::Result;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// How the term vocabulary is chosen; exactly one mode applies per build
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "value", rename_all = "snake_case")]
pub enum VocabularyPolicy {
    /// Use this candidate set as is
    Explicit(BTreeSet<String>),
    /// Every token appearing in at least this many documents
    MinDocumentFrequency(usize),
}

impl VocabularyPolicy {
    /// Explicit policy from any collection of terms
    pub fn explicit<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        VocabularyPolicy::Explicit(terms.into_iter().map(Into::into).collect())
    }

    /// Short name of the active mode, as reported in build parameters
    pub fn mode(&self) -> &'static str {
        match self {
            VocabularyPolicy::Explicit(_) => "explicit",
            VocabularyPolicy::MinDocumentFrequency(_) => "min_document_frequency",
        }
    }

    pub fn validate(&self) -> Result<()> {
        match self {
            VocabularyPolicy::Explicit(_) => Ok(()),
            VocabularyPolicy::MinDocumentFrequency(min_df) => validate_min_document_frequency(*min_df),
        }
    }

    /// The vocabulary this policy selects for a tokenized corpus
    pub fn resolve(&self, documents: &[Vec<String>]) -> Result<BTreeSet<String>> {
        self.validate()?;
        Ok(match self {
            VocabularyPolicy::Explicit(terms) => terms.clone(),
            VocabularyPolicy::MinDocumentFrequency(min_df) => document_frequencies(documents)
                .into_iter()
                .filter(|(_, frequency)| frequency >= min_df)
                .map(|(term, _)| term)
                .collect(),
        })
    }
}

/// Number of documents each token appears in (repeats within a document
/// count once)
pub fn document_frequencies(documents: &[Vec<String>]) -> BTreeMap<String, usize> {
    let mut frequencies = BTreeMap::new();
    for tokens in documents {
        let distinct: BTreeSet<&str> = tokens.iter().map(String::as_str).collect();
        for token in distinct {
            *frequencies.entry(token.to_string()).or_insert(0) += 1;
        }
    }
    frequencies
}
