//! Result Report
//!
//! Renders a top-N result to the configured output destination.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::error::Result;
use crate::vector::ScoredCandidate;

/// Write the report header and one `word: score` line per result
pub fn write_report<W: Write>(
    mut writer: W,
    query: &str,
    top_n: usize,
    results: &[ScoredCandidate],
) -> io::Result<()> {
    writeln!(
        writer,
        "Top {} most similar words for query word \"{}\":",
        top_n, query
    )?;
    for candidate in results {
        writeln!(writer, "{}: {}", candidate.word, candidate.score)?;
    }
    writer.flush()
}

/// Overwrite `path` with the report for `results`
pub fn write_report_file(
    path: &Path,
    query: &str,
    top_n: usize,
    results: &[ScoredCandidate],
) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    write_report(BufWriter::new(file), query, top_n, results)?;
    Ok(())
}
