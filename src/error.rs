//! Error Types
//!
//! Typed failures surfaced by loading, scoring and querying.

use std::path::PathBuf;
use thiserror::Error;

/// Why a single record could not be turned into a (word, vector) pair
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseFailure {
    #[error("empty record")]
    Empty,
    #[error("record is not valid UTF-8")]
    InvalidEncoding,
    #[error("record has no word")]
    MissingWord,
    #[error("record has no numeric fields after the word")]
    NoFields,
    #[error("field {field} is not a number: {value:?}")]
    InvalidNumber { field: usize, value: String },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error on line {line}: {failure}")]
    Parse { line: usize, failure: ParseFailure },
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
    #[error("Embeddings file not found: {}", .0.display())]
    FileNotFound(PathBuf),
    #[error("Word not found: {0:?}")]
    NotFound(String),
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, Error>;
