//! Embedding Store
//!
//! Word -> vector table loaded from delimited text records.

use hashbrown::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use super::parser::VectorParser;
use crate::error::{Error, ParseFailure, Result};
use crate::persistence::resolve_source;

/// What to do with a record that cannot be loaded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadPolicy {
    /// Abort the whole load; the store keeps its previous contents
    #[default]
    Strict,
    /// Skip the record and keep going
    Lenient,
}

/// Load options
#[derive(Debug, Clone)]
pub struct LoadOptions {
    pub policy: LoadPolicy,
    /// Require every vector to match the dimension of the first one
    pub enforce_dimension: bool,
    /// Look for a file of the same name in parent directories when the path is missing
    pub search_parents: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            policy: LoadPolicy::Strict,
            enforce_dimension: true,
            search_parents: true,
        }
    }
}

impl LoadOptions {
    pub fn lenient() -> Self {
        Self::default().with_policy(LoadPolicy::Lenient)
    }

    pub fn with_policy(mut self, policy: LoadPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_dimension_check(mut self, enforce: bool) -> Self {
        self.enforce_dimension = enforce;
        self
    }

    pub fn with_parent_search(mut self, search: bool) -> Self {
        self.search_parents = search;
        self
    }
}

/// A record left out of a load
#[derive(Debug)]
pub struct SkippedRecord {
    /// 1-based line number
    pub line: usize,
    pub error: Error,
}

/// Outcome of a successful load
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Records accepted, duplicates included
    pub loaded: usize,
    pub skipped: Vec<SkippedRecord>,
    /// File the records came from, if any
    pub source: Option<PathBuf>,
}

impl LoadReport {
    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }
}

/// A word and its vector
#[derive(Debug, Clone, PartialEq)]
struct EmbeddingEntry {
    word: String,
    vector: Vec<f64>,
}

/// In-memory embedding table
///
/// Iteration follows first insertion order; overwriting a word keeps its slot.
#[derive(Debug, Clone)]
pub struct EmbeddingStore {
    /// Word -> position in `entries`
    index: HashMap<String, usize>,
    entries: Vec<EmbeddingEntry>,
    /// Established by the first inserted vector
    dimension: Option<usize>,
    enforce_dimension: bool,
}

impl Default for EmbeddingStore {
    fn default() -> Self {
        Self::new()
    }
}

impl EmbeddingStore {
    /// Create an empty store that enforces a single dimension
    pub fn new() -> Self {
        Self {
            index: HashMap::new(),
            entries: Vec::new(),
            dimension: None,
            enforce_dimension: true,
        }
    }

    /// Build a store from records, failing on the first bad one
    pub fn from_records<R: BufRead>(reader: R) -> Result<Self> {
        let mut store = Self::new();
        store.load(reader, &LoadOptions::default())?;
        Ok(store)
    }

    /// Replace the contents of the store with the records read from `reader`.
    ///
    /// The new table is built on the side and swapped in only once every
    /// record has been processed, so a failed load leaves the store as it was.
    pub fn load<R: BufRead>(
        &mut self,
        mut reader: R,
        options: &LoadOptions,
    ) -> Result<LoadReport> {
        let mut fresh = Self {
            enforce_dimension: options.enforce_dimension,
            ..Self::new()
        };
        let mut report = LoadReport::default();

        let mut buf = Vec::new();
        let mut line_no = 0;

        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            line_no += 1;

            let outcome = decode_line(line_no, &buf)
                .and_then(|line| VectorParser::parse_line(line_no, line))
                .and_then(|(word, vector)| fresh.insert(word, vector));

            match outcome {
                Ok(()) => report.loaded += 1,
                Err(error) if is_blank(&error) || options.policy == LoadPolicy::Lenient => {
                    report.skipped.push(SkippedRecord {
                        line: line_no,
                        error,
                    });
                }
                Err(error) => return Err(error),
            }
        }

        *self = fresh;
        Ok(report)
    }

    /// Resolve `path` (see [`resolve_source`]) and load it
    pub fn load_file(&mut self, path: &Path, options: &LoadOptions) -> Result<LoadReport> {
        let resolved = resolve_source(path, options.search_parents)?;
        let file = open_source(&resolved)?;
        let mut report = self.load(BufReader::new(file), options)?;
        report.source = Some(resolved);
        Ok(report)
    }

    /// Insert or overwrite a word
    pub fn insert(&mut self, word: String, vector: Vec<f64>) -> Result<()> {
        let len = vector.len();
        self.check_dimension(len)?;

        match self.index.get(&word) {
            Some(&slot) => self.entries[slot].vector = vector,
            None => {
                self.index.insert(word.clone(), self.entries.len());
                self.entries.push(EmbeddingEntry { word, vector });
            }
        }
        if self.dimension.is_none() {
            self.dimension = Some(len);
        }
        Ok(())
    }

    /// Fail with `DimensionMismatch` if a vector of length `len` cannot be stored
    pub fn check_dimension(&self, len: usize) -> Result<()> {
        match self.dimension {
            Some(expected) if self.enforce_dimension && expected != len => {
                Err(Error::DimensionMismatch {
                    expected,
                    actual: len,
                })
            }
            _ => Ok(()),
        }
    }

    /// Get the vector for a word (exact, case-sensitive)
    pub fn get(&self, word: &str) -> Option<&[f64]> {
        self.index
            .get(word)
            .map(|&slot| self.entries[slot].vector.as_slice())
    }

    /// Check if word exists
    pub fn contains(&self, word: &str) -> bool {
        self.index.contains_key(word)
    }

    /// Get number of stored words
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Dimension of the first inserted vector
    pub fn dimension(&self) -> Option<usize> {
        self.dimension
    }

    pub fn enforces_dimension(&self) -> bool {
        self.enforce_dimension
    }

    /// Iterate entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.entries
            .iter()
            .map(|e| (e.word.as_str(), e.vector.as_slice()))
    }
}

/// Open a resolved source; anything unreadable counts as not found
fn open_source(path: &Path) -> Result<File> {
    File::open(path).map_err(|_| Error::FileNotFound(path.to_path_buf()))
}

/// One record without its line terminator
fn decode_line(line: usize, raw: &[u8]) -> Result<&str> {
    let raw = raw.strip_suffix(b"\n").unwrap_or(raw);
    let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
    std::str::from_utf8(raw).map_err(|_| Error::Parse {
        line,
        failure: ParseFailure::InvalidEncoding,
    })
}

fn is_blank(error: &Error) -> bool {
    matches!(
        error,
        Error::Parse {
            failure: ParseFailure::Empty,
            ..
        }
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    const ANIMALS: &str = "cat,1,0\ndog,0.9,0.1\ncar,0,1\n";

    #[test]
    fn test_embedding_store() {
        let store = EmbeddingStore::from_records(ANIMALS.as_bytes()).unwrap();

        assert_eq!(store.len(), 3);
        assert_eq!(store.dimension(), Some(2));
        assert!(store.contains("dog"));
        assert!(!store.contains("Dog"));
        assert_eq!(store.get("dog"), Some(&[0.9, 0.1][..]));
        assert_eq!(store.get("bird"), None);
    }

    #[test]
    fn test_duplicate_word_last_write_wins() {
        let mut store = EmbeddingStore::new();
        let report = store
            .load("a,1,1\nb,2,2\na,3,3\n".as_bytes(), &LoadOptions::default())
            .unwrap();

        assert_eq!(report.loaded, 3);
        assert_eq!(store.len(), 2);
        assert_eq!(store.get("a"), Some(&[3.0, 3.0][..]));

        // Overwrite keeps the original slot
        let words: Vec<&str> = store.iter().map(|(w, _)| w).collect();
        assert_eq!(words, vec!["a", "b"]);
    }

    #[test]
    fn test_strict_load_is_all_or_nothing() {
        let mut store = EmbeddingStore::from_records(ANIMALS.as_bytes()).unwrap();

        let result = store.load("x,1,1\ny,1,bad\n".as_bytes(), &LoadOptions::default());

        assert!(matches!(result, Err(Error::Parse { line: 2, .. })));
        assert_eq!(store.len(), 3);
        assert!(store.contains("cat"));
        assert!(!store.contains("x"));
    }

    #[test]
    fn test_lenient_load_skips_bad_records() {
        let mut store = EmbeddingStore::new();
        let report = store
            .load(
                "a,1,1\nb,oops,1\n\nc,1,2,3\nd,4,4\n".as_bytes(),
                &LoadOptions::lenient(),
            )
            .unwrap();

        assert_eq!(report.loaded, 2);
        assert_eq!(report.skipped_count(), 3);
        let lines: Vec<usize> = report.skipped.iter().map(|s| s.line).collect();
        assert_eq!(lines, vec![2, 3, 4]);
        assert!(matches!(
            report.skipped[2].error,
            Error::DimensionMismatch {
                expected: 2,
                actual: 3
            }
        ));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_lenient_load_skips_invalid_utf8() {
        let mut store = EmbeddingStore::new();
        let report = store
            .load(&b"a,1,1\ncaf\xe9,2,2\nb,3,3\n"[..], &LoadOptions::lenient())
            .unwrap();

        assert_eq!(report.loaded, 2);
        assert_eq!(report.skipped_count(), 1);
        assert_eq!(report.skipped[0].line, 2);
        assert!(matches!(
            report.skipped[0].error,
            Error::Parse {
                failure: ParseFailure::InvalidEncoding,
                ..
            }
        ));
        assert!(store.contains("a"));
        assert!(store.contains("b"));
    }

    #[test]
    fn test_strict_load_rejects_invalid_utf8() {
        let mut store = EmbeddingStore::from_records(ANIMALS.as_bytes()).unwrap();
        let result = store.load(&b"a,1,1\ncaf\xe9,2,2\nb,3,3\n"[..], &LoadOptions::default());

        assert!(matches!(
            result,
            Err(Error::Parse {
                line: 2,
                failure: ParseFailure::InvalidEncoding
            })
        ));
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_crlf_records() {
        let store = EmbeddingStore::from_records("a,1,2\r\nb,3,4\r\n".as_bytes()).unwrap();
        assert_eq!(store.get("b"), Some(&[3.0, 4.0][..]));
    }

    #[test]
    fn test_unreadable_source_is_not_found() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("gone.txt");
        assert!(matches!(open_source(&path), Err(Error::FileNotFound(p)) if p == path));
    }

    #[test]
    fn test_strict_load_skips_blank_lines() {
        let mut store = EmbeddingStore::new();
        let report = store
            .load("a,1\n\n  \nb,2\n".as_bytes(), &LoadOptions::default())
            .unwrap();

        assert_eq!(report.loaded, 2);
        assert_eq!(report.skipped_count(), 2);
    }

    #[test]
    fn test_dimension_mismatch_is_fatal_in_strict_mode() {
        let mut store = EmbeddingStore::new();
        let result = store.load("a,1,2\nb,1\n".as_bytes(), &LoadOptions::default());
        assert!(matches!(
            result,
            Err(Error::DimensionMismatch {
                expected: 2,
                actual: 1
            })
        ));
        assert!(store.is_empty());
    }

    #[test]
    fn test_dimension_check_can_be_disabled() {
        let mut store = EmbeddingStore::new();
        let options = LoadOptions::default().with_dimension_check(false);
        store.load("a,1,2\nb,1\n".as_bytes(), &options).unwrap();

        assert_eq!(store.len(), 2);
        assert!(!store.enforces_dimension());
        assert_eq!(store.get("b"), Some(&[1.0][..]));
    }

    #[test]
    fn test_load_replaces_previous_contents() {
        let mut store = EmbeddingStore::from_records(ANIMALS.as_bytes()).unwrap();
        store
            .load("sun,1,1,1\n".as_bytes(), &LoadOptions::default())
            .unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.dimension(), Some(3));
        assert!(!store.contains("cat"));
    }

    #[test]
    fn test_load_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("word-embeddings.txt");
        let mut file = File::create(&path).unwrap();
        file.write_all(ANIMALS.as_bytes()).unwrap();

        let mut store = EmbeddingStore::new();
        let report = store.load_file(&path, &LoadOptions::default()).unwrap();

        assert_eq!(report.loaded, 3);
        assert_eq!(report.source.as_deref(), Some(path.as_path()));
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_load_file_missing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("no-such-embeddings-file.txt");

        let mut store = EmbeddingStore::from_records(ANIMALS.as_bytes()).unwrap();
        let options = LoadOptions::default().with_parent_search(false);
        let result = store.load_file(&path, &options);

        assert!(matches!(result, Err(Error::FileNotFound(_))));
        assert_eq!(store.len(), 3);
    }
}
