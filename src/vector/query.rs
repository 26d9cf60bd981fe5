//! Query Engine
//!
//! Scores a query word against every other word in the store and keeps the
//! best N.

use std::fmt;
use std::str::FromStr;

use super::embedding_store::EmbeddingStore;
use super::similarity::{DotProduct, SimilarityScorer};
use super::top_n::{ScoredCandidate, TopNSelector};
use crate::error::{Error, Result};

/// How many results a query should return
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopN {
    Count(usize),
    /// Every word except the query word
    All,
}

impl TopN {
    /// Parse `"all"` (any case) or a non-negative integer
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();
        if input.eq_ignore_ascii_case("all") {
            return Ok(TopN::All);
        }
        input.parse::<usize>().map(TopN::Count).map_err(|_| {
            Error::InvalidArgument(format!(
                "expected a non-negative integer or 'all', got {input:?}"
            ))
        })
    }

    /// Concrete result count for a store holding `store_len` words
    pub fn resolve(self, store_len: usize) -> usize {
        match self {
            TopN::Count(n) => n,
            TopN::All => store_len.saturating_sub(1),
        }
    }
}

impl FromStr for TopN {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        TopN::parse(s)
    }
}

impl fmt::Display for TopN {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TopN::Count(n) => write!(f, "{}", n),
            TopN::All => write!(f, "all"),
        }
    }
}

/// Top-N similarity search over an [`EmbeddingStore`]
pub struct QueryEngine<'a, S = DotProduct> {
    store: &'a EmbeddingStore,
    scorer: S,
}

impl<'a> QueryEngine<'a, DotProduct> {
    /// Create an engine scoring by dot product
    pub fn new(store: &'a EmbeddingStore) -> Self {
        Self::with_scorer(store, DotProduct)
    }
}

impl<'a, S: SimilarityScorer> QueryEngine<'a, S> {
    pub fn with_scorer(store: &'a EmbeddingStore, scorer: S) -> Self {
        Self { store, scorer }
    }

    /// Return the `top_n` words most similar to `word`, highest score first.
    ///
    /// `word` itself is never part of the result. Fails with `NotFound` if
    /// the word is not in the store.
    pub fn query(&self, word: &str, top_n: usize) -> Result<Vec<ScoredCandidate>> {
        let query = self
            .store
            .get(word)
            .ok_or_else(|| Error::NotFound(word.to_string()))?;

        let mut selector = TopNSelector::new(top_n);
        for (candidate, vector) in self.store.iter() {
            if candidate == word {
                continue;
            }
            let score = self.scorer.score(query, vector)?;
            selector.offer(ScoredCandidate::new(candidate, score));
        }

        Ok(selector.into_sorted_vec())
    }

    /// Like [`query`](Self::query), resolving a [`TopN`] against the store size
    pub fn query_top(&self, word: &str, top_n: TopN) -> Result<Vec<ScoredCandidate>> {
        self.query(word, top_n.resolve(self.store.len()))
    }

    pub fn store(&self) -> &EmbeddingStore {
        self.store
    }
}
