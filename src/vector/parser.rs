//! Record Parser
//!
//! Turns one delimited text record (`word,v1,v2,...`) into a word and its
//! embedding vector, and writes records back out in the same shape.

use crate::error::{Error, ParseFailure, Result};

/// Field delimiter used by embedding files
pub const DELIMITER: char = ',';

/// Parser for delimited embedding records
#[derive(Debug, Clone, Copy, Default)]
pub struct VectorParser;

impl VectorParser {
    /// Parse a record. `line` is the 1-based line number reported on failure.
    pub fn parse_line(line: usize, record: &str) -> Result<(String, Vec<f64>)> {
        Self::parse_record(record).map_err(|failure| Error::Parse { line, failure })
    }

    /// Parse a record without line context
    pub fn parse_record(record: &str) -> std::result::Result<(String, Vec<f64>), ParseFailure> {
        if record.trim().is_empty() {
            return Err(ParseFailure::Empty);
        }

        let mut fields = record.split(DELIMITER);
        let word = fields.next().map(str::trim).unwrap_or_default();
        if word.is_empty() {
            return Err(ParseFailure::MissingWord);
        }

        let vector = fields
            .enumerate()
            .map(|(i, raw)| {
                let value = raw.trim();
                value.parse::<f64>().map_err(|_| ParseFailure::InvalidNumber {
                    field: i + 1,
                    value: value.to_string(),
                })
            })
            .collect::<std::result::Result<Vec<f64>, _>>()?;

        if vector.is_empty() {
            return Err(ParseFailure::NoFields);
        }

        Ok((word.to_string(), vector))
    }
}

/// Serialize a word and vector into a record `parse_record` reads back unchanged
pub fn format_record(word: &str, vector: &[f64]) -> String {
    let mut record = String::with_capacity(word.len() + vector.len() * 12);
    record.push_str(word);
    for value in vector {
        record.push(DELIMITER);
        record.push_str(&value.to_string());
    }
    record
}
