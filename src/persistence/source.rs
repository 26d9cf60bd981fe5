//! Source Resolution
//!
//! Locates the embeddings file, optionally walking up parent directories.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Resolve the embeddings file for `path`.
///
/// An existing file is returned as is. Otherwise, when `search_parents` is
/// set, the current directory and each of its ancestors are searched for a
/// file with the same base name. Fails with `FileNotFound` if nothing turns up.
pub fn resolve_source(path: &Path, search_parents: bool) -> Result<PathBuf> {
    if path.is_file() {
        return Ok(path.to_path_buf());
    }

    if search_parents {
        if let Some(name) = path.file_name() {
            let cwd = std::env::current_dir()?;
            if let Some(found) = search_upward(&cwd, name) {
                return Ok(found);
            }
        }
    }

    Err(Error::FileNotFound(path.to_path_buf()))
}

/// Find `file_name` in `start` or the nearest ancestor that has it
pub fn search_upward(start: &Path, file_name: &OsStr) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(file_name))
        .find(|candidate| candidate.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_existing_path_is_returned() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("vectors.txt");
        fs::write(&path, "a,1\n").unwrap();

        assert_eq!(resolve_source(&path, false).unwrap(), path);
    }

    #[test]
    fn test_search_upward_finds_nearest_ancestor() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("a").join("b").join("c");
        fs::create_dir_all(&nested).unwrap();
        fs::write(dir.path().join("vectors.txt"), "top,1\n").unwrap();
        fs::write(dir.path().join("a").join("vectors.txt"), "mid,1\n").unwrap();

        let found = search_upward(&nested, OsStr::new("vectors.txt")).unwrap();
        assert_eq!(found, dir.path().join("a").join("vectors.txt"));
    }

    #[test]
    fn test_search_upward_gives_up_at_root() {
        let dir = tempdir().unwrap();
        let found = search_upward(dir.path(), OsStr::new("wordsim-no-such-file-8f3a1c.txt"));
        assert!(found.is_none());
    }

    #[test]
    fn test_missing_file_without_search() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing.txt");
        assert!(matches!(
            resolve_source(&path, false),
            Err(Error::FileNotFound(p)) if p == path
        ));
    }

    #[test]
    fn test_missing_file_with_parent_search() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("wordsim-absent-everywhere-5d91e0.txt");
        assert!(matches!(
            resolve_source(&path, true),
            Err(Error::FileNotFound(p)) if p == path
        ));
    }

    #[test]
    fn test_directory_is_not_a_source() {
        let dir = tempdir().unwrap();
        assert!(matches!(
            resolve_source(dir.path(), false),
            Err(Error::FileNotFound(_))
        ));
    }
}
