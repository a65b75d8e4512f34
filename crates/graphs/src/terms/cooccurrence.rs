//! Windowed co-occurrence counting

use std::collections::{BTreeMap, BTreeSet};

/// Co-occurrence counts keyed by the lexicographically sorted term pair
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CooccurrenceCounts {
    counts: BTreeMap<(String, String), u64>,
}

impl CooccurrenceCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one co-occurrence of two distinct terms; equal terms are ignored
    pub fn add(&mut self, a: &str, b: &str) {
        if a == b {
            return;
        }
        let key = if a < b {
            (a.to_string(), b.to_string())
        } else {
            (b.to_string(), a.to_string())
        };
        *self.counts.entry(key).or_insert(0) += 1;
    }

    /// Count for a pair, in either order
    pub fn get(&self, a: &str, b: &str) -> u64 {
        let key = if a < b { (a, b) } else { (b, a) };
        self.counts
            .get(&(key.0.to_string(), key.1.to_string()))
            .copied()
            .unwrap_or(0)
    }

    /// Add every count of `other` into `self`
    pub fn merge(&mut self, other: CooccurrenceCounts) {
        for (pair, count) in other.counts {
            *self.counts.entry(pair).or_insert(0) += count;
        }
    }

    /// Pairs `(a, b)` with `a < b` and their counts, in pair order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, u64)> {
        self.counts
            .iter()
            .map(|((a, b), &count)| (a.as_str(), b.as_str(), count))
    }

    /// Number of distinct pairs
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// Count co-occurrences within one token sequence.
///
/// For each position `i` holding a vocabulary term, every later vocabulary
/// term at `j` with `i < j <= i + window` is counted once against it.
pub fn count_cooccurrences(tokens: &[String], vocabulary: &BTreeSet<String>, window: usize) -> CooccurrenceCounts {
    let mut counts = CooccurrenceCounts::new();
    if vocabulary.is_empty() {
        return counts;
    }

    let n = tokens.len();
    for i in 0..n {
        if !vocabulary.contains(&tokens[i]) {
            continue;
        }
        let last = n.min(i.saturating_add(window).saturating_add(1));
        for j in (i + 1)..last {
            if vocabulary.contains(&tokens[j]) {
                counts.add(&tokens[i], &tokens[j]);
            }
        }
    }
    counts
}

/// Sum [`count_cooccurrences`] over a corpus
pub fn count_corpus(documents: &[Vec<String>], vocabulary: &BTreeSet<String>, window: usize) -> CooccurrenceCounts {
    documents
        .iter()
        .fold(CooccurrenceCounts::new(), |mut total, tokens| {
            total.merge(count_cooccurrences(tokens, vocabulary, window));
            total
        })
}
