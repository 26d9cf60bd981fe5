//! Record Appender
//!
//! Appends new word records to an embeddings file.

use std::fs::{self, OpenOptions};
use std::io::{BufWriter, Read, Seek, SeekFrom, Write};
use std::path::Path;

use crate::error::{Error, Result};
use crate::vector::{format_record, DELIMITER};

/// Append `word` and `vector` as one record at the end of `path`.
///
/// The file (and its parent directories) are created if missing. A missing
/// trailing newline on the last existing record is repaired first.
pub fn append_record(path: &Path, word: &str, vector: &[f64]) -> Result<()> {
    validate_word(word)?;
    if vector.is_empty() {
        return Err(Error::InvalidArgument(
            "a record needs at least one value".to_string(),
        ));
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut file = OpenOptions::new()
        .create(true)
        .read(true)
        .append(true)
        .open(path)?;

    let needs_newline = if file.metadata()?.len() > 0 {
        let mut last = [0u8; 1];
        file.seek(SeekFrom::End(-1))?;
        file.read_exact(&mut last)?;
        last[0] != b'\n'
    } else {
        false
    };

    let mut writer = BufWriter::new(file);
    if needs_newline {
        writer.write_all(b"\n")?;
    }
    writer.write_all(format_record(word, vector).as_bytes())?;
    writer.write_all(b"\n")?;
    writer.flush()?;

    Ok(())
}

/// A word must be non-empty and fit in a single field
pub fn validate_word(word: &str) -> Result<()> {
    if word.trim().is_empty() {
        return Err(Error::InvalidArgument("word must not be empty".to_string()));
    }
    if word.trim() != word {
        return Err(Error::InvalidArgument(format!(
            "word must not have surrounding whitespace: {word:?}"
        )));
    }
    if word.contains(DELIMITER) || word.contains(['\n', '\r']) {
        return Err(Error::InvalidArgument(format!(
            "word must not contain {DELIMITER:?} or line breaks: {word:?}"
        )));
    }
    Ok(())
}
