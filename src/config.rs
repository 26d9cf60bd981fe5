//! Configuration
//!
//! Paths and load behaviour, passed explicitly to whatever needs them.

use std::path::PathBuf;

use crate::vector::{LoadOptions, LoadPolicy};

pub const DEFAULT_EMBEDDINGS_FILE: &str = "./word-embeddings.txt";
pub const DEFAULT_OUTPUT_FILE: &str = "output.txt";

/// Session configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Embeddings file to load from and append new words to
    pub embeddings_path: PathBuf,

    /// Destination for query reports
    pub output_path: PathBuf,

    /// Load policy, dimension check and parent directory search
    pub load: LoadOptions,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            embeddings_path: PathBuf::from(DEFAULT_EMBEDDINGS_FILE),
            output_path: PathBuf::from(DEFAULT_OUTPUT_FILE),
            load: LoadOptions::default(),
        }
    }
}

impl Config {
    /// Set the embeddings file
    pub fn with_embeddings_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.embeddings_path = path.into();
        self
    }

    /// Set the report destination
    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = path.into();
        self
    }

    pub fn with_policy(mut self, policy: LoadPolicy) -> Self {
        self.load.policy = policy;
        self
    }

    pub fn with_dimension_check(mut self, enforce: bool) -> Self {
        self.load.enforce_dimension = enforce;
        self
    }

    pub fn with_parent_search(mut self, search: bool) -> Self {
        self.load.search_parents = search;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.embeddings_path, PathBuf::from("./word-embeddings.txt"));
        assert_eq!(config.output_path, PathBuf::from("output.txt"));
        assert_eq!(config.load.policy, LoadPolicy::Strict);
        assert!(config.load.enforce_dimension);
        assert!(config.load.search_parents);
    }

    #[test]
    fn test_builders() {
        let config = Config::default()
            .with_embeddings_path("data/glove.txt")
            .with_output_path("out/results.txt")
            .with_policy(LoadPolicy::Lenient)
            .with_dimension_check(false)
            .with_parent_search(false);

        assert_eq!(config.embeddings_path, PathBuf::from("data/glove.txt"));
        assert_eq!(config.output_path, PathBuf::from("out/results.txt"));
        assert_eq!(config.load.policy, LoadPolicy::Lenient);
        assert!(!config.load.enforce_dimension);
        assert!(!config.load.search_parents);
    }
}
