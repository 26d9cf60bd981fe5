//! Vector Module
//!
//! Embedding table, record parsing, dot-product scoring and top-N search.

mod embedding_store;
mod parser;
mod query;
mod similarity;
mod snapshot;
mod top_n;

pub use embedding_store::{EmbeddingStore, LoadOptions, LoadPolicy, LoadReport, SkippedRecord};
pub use parser::{format_record, VectorParser, DELIMITER};
pub use query::{QueryEngine, TopN};
pub use similarity::{dot_product, score, DotProduct, SimilarityScorer};
pub use snapshot::SharedStore;
pub use top_n::{select_top_n, ScoredCandidate, TopNSelector};
