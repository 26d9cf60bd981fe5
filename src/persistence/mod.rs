//! Persistence Module
//!
//! Embeddings file resolution, record appends and result reports.

mod appender;
mod report;
mod source;

pub use appender::{append_record, validate_word};
pub use report::{write_report, write_report_file};
pub use source::{resolve_source, search_upward};
