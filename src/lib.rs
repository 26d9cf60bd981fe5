//! WORDSIM - Word Embedding Similarity Lookup
//!
//! Loads word vectors from a comma-separated text file and answers
//! "top-N most similar words" queries by dot product, using a bounded
//! min-heap so only N candidates are held while the table is scanned.

pub mod config;
pub mod console;
pub mod error;
pub mod persistence;
pub mod vector;

pub use config::Config;
pub use console::{CommandId, Reply, Session};
pub use error::{Error, ParseFailure, Result};
pub use vector::{
    EmbeddingStore, LoadOptions, LoadPolicy, LoadReport, QueryEngine, ScoredCandidate,
    SharedStore, TopN, TopNSelector, VectorParser,
};
