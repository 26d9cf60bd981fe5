//! Console Commands
//!
//! Command identifiers, their aliases, and the replies handlers produce.

use std::fmt;
use std::path::PathBuf;

use crate::vector::{LoadReport, ScoredCandidate};

/// Command identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandId {
    /// (Re)load the embeddings file
    Load,
    /// Change the report destination
    Output,
    /// Top-N similarity search, written to the report destination
    Search,
    /// Append a new word to the embeddings file and reload
    Add,
    /// Check whether a word is loaded
    Exists,
    Help,
    Quit,
}

impl CommandId {
    pub const ALL: [CommandId; 7] = [
        CommandId::Load,
        CommandId::Output,
        CommandId::Search,
        CommandId::Add,
        CommandId::Exists,
        CommandId::Help,
        CommandId::Quit,
    ];

    /// Parse a command name or its numeric menu alias
    pub fn from_token(token: &str) -> Option<Self> {
        let id = match token.to_ascii_lowercase().as_str() {
            "load" | "1" => CommandId::Load,
            "output" | "2" => CommandId::Output,
            "search" | "3" => CommandId::Search,
            "add" | "4" => CommandId::Add,
            "exists" | "5" => CommandId::Exists,
            "help" | "?" => CommandId::Help,
            "quit" | "exit" | "-1" => CommandId::Quit,
            _ => return None,
        };
        Some(id)
    }

    pub fn name(&self) -> &'static str {
        match self {
            CommandId::Load => "load",
            CommandId::Output => "output",
            CommandId::Search => "search",
            CommandId::Add => "add",
            CommandId::Exists => "exists",
            CommandId::Help => "help",
            CommandId::Quit => "quit",
        }
    }

    pub fn usage(&self) -> &'static str {
        match self {
            CommandId::Load => "load [path]              (1) Load embeddings (default: configured file)",
            CommandId::Output => "output <path>            (2) Set the report file (default: ./output.txt)",
            CommandId::Search => "search <word> [N|all]    (3) Write the N most similar words to the report file",
            CommandId::Add => "add <word> <v1> <v2> ... (4) Append a word to the embeddings file",
            CommandId::Exists => "exists <word>            (5) Check whether a word is loaded",
            CommandId::Help => "help                         Show this help",
            CommandId::Quit => "quit                    (-1) Exit",
        }
    }
}

impl fmt::Display for CommandId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Result of a handled command
#[derive(Debug)]
pub enum Reply {
    Loaded(LoadReport),
    OutputChanged(PathBuf),
    Results {
        query: String,
        top_n: usize,
        results: Vec<ScoredCandidate>,
        written_to: PathBuf,
    },
    Added {
        word: String,
        path: PathBuf,
        report: LoadReport,
    },
    Exists {
        word: String,
        exists: bool,
    },
    Help,
    Quit,
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reply::Loaded(report) => {
                write!(f, "Loaded {} records", report.loaded)?;
                if let Some(source) = &report.source {
                    write!(f, " from {}", source.display())?;
                }
                if report.skipped_count() > 0 {
                    write!(f, " ({} skipped)", report.skipped_count())?;
                }
                Ok(())
            }
            Reply::OutputChanged(path) => write!(f, "Report file set to {}", path.display()),
            Reply::Results {
                query,
                top_n,
                results,
                written_to,
            } => {
                writeln!(
                    f,
                    "Top {} most similar words for \"{}\" written to {}",
                    top_n,
                    query,
                    written_to.display()
                )?;
                writeln!(f, "{:>4} {:>12} Word", "Rank", "Score")?;
                write!(f, "{}", "-".repeat(30))?;
                for (i, candidate) in results.iter().enumerate() {
                    write!(f, "\n{:4}: {:12.6} {}", i + 1, candidate.score, candidate.word)?;
                }
                Ok(())
            }
            Reply::Added { word, path, report } => write!(
                f,
                "Added \"{}\" to {} ({} records loaded)",
                word,
                path.display(),
                report.loaded
            ),
            Reply::Exists { word, exists: true } => write!(f, "\"{}\" exists", word),
            Reply::Exists { word, exists: false } => {
                write!(f, "\"{}\" does not exist; use 'add' to create it", word)
            }
            Reply::Help => {
                writeln!(f, "Available commands:")?;
                for id in CommandId::ALL {
                    write!(f, "\n  {}", id.usage())?;
                }
                Ok(())
            }
            Reply::Quit => write!(f, "Goodbye!"),
        }
    }
}
