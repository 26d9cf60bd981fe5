//! Command Dispatch
//!
//! Maps each [`CommandId`] to a handler operating on a [`Session`].

use hashbrown::HashMap;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, info, warn};

use super::command::{CommandId, Reply};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::persistence::{append_record, write_report_file};
use crate::vector::{LoadReport, QueryEngine, SharedStore, TopN};

/// Default result count when `search` is given no N
pub const DEFAULT_TOP_N: TopN = TopN::Count(10);

/// Command handler
pub type Handler = fn(&mut Session, &[&str]) -> Result<Reply>;

/// Build the command table
pub fn dispatch_table() -> HashMap<CommandId, Handler> {
    let mut table: HashMap<CommandId, Handler> = HashMap::new();
    table.insert(CommandId::Load, handle_load);
    table.insert(CommandId::Output, handle_output);
    table.insert(CommandId::Search, handle_search);
    table.insert(CommandId::Add, handle_add);
    table.insert(CommandId::Exists, handle_exists);
    table.insert(CommandId::Help, |_, _| Ok(Reply::Help));
    table.insert(CommandId::Quit, |_, _| Ok(Reply::Quit));
    table
}

/// Interactive session state: configuration and the published store
pub struct Session {
    config: Config,
    store: SharedStore,
    handlers: HashMap<CommandId, Handler>,
}

impl Session {
    /// Create a session with an empty store
    pub fn new(config: Config) -> Self {
        Self::with_store(config, SharedStore::default())
    }

    pub fn with_store(config: Config, store: SharedStore) -> Self {
        Self {
            config,
            store,
            handlers: dispatch_table(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn store(&self) -> &SharedStore {
        &self.store
    }

    /// Parse and run one input line
    pub fn execute(&mut self, line: &str) -> Result<Reply> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some((&token, args)) = parts.split_first() else {
            return Err(Error::InvalidArgument("empty command".to_string()));
        };

        let id = CommandId::from_token(token).ok_or_else(|| {
            Error::InvalidArgument(format!(
                "unknown command: {}. Type 'help' for available commands.",
                token
            ))
        })?;

        self.dispatch(id, args)
    }

    /// Run the handler registered for `id`
    pub fn dispatch(&mut self, id: CommandId, args: &[&str]) -> Result<Reply> {
        let handler = *self
            .handlers
            .get(&id)
            .ok_or_else(|| Error::InvalidArgument(format!("no handler for {}", id)))?;

        let start = Instant::now();
        let reply = handler(self, args);
        debug!(cmd = %id, latency = ?start.elapsed(), "Command executed");
        reply
    }

    /// Load the configured embeddings file and publish it
    pub fn load(&mut self) -> Result<LoadReport> {
        let path = self.config.embeddings_path.clone();
        self.load_from(path)
    }

    fn load_from(&mut self, path: PathBuf) -> Result<LoadReport> {
        let report = self.store.reload(&path, &self.config.load)?;

        for skipped in &report.skipped {
            warn!(line = skipped.line, error = %skipped.error, "Skipped record");
        }
        if let Some(source) = &report.source {
            info!(
                "Loaded {} records ({} words) from {}",
                report.loaded,
                self.store.snapshot().len(),
                source.display()
            );
            self.config.embeddings_path = source.clone();
        }

        Ok(report)
    }
}

fn handle_load(session: &mut Session, args: &[&str]) -> Result<Reply> {
    let path = match args {
        [] => session.config.embeddings_path.clone(),
        [path] => PathBuf::from(path),
        _ => return Err(usage(CommandId::Load)),
    };
    session.load_from(path).map(Reply::Loaded)
}

fn handle_output(session: &mut Session, args: &[&str]) -> Result<Reply> {
    let [path] = args else {
        return Err(usage(CommandId::Output));
    };
    session.config.output_path = PathBuf::from(path);
    info!("Report file set to {}", path);
    Ok(Reply::OutputChanged(session.config.output_path.clone()))
}

fn handle_search(session: &mut Session, args: &[&str]) -> Result<Reply> {
    let (word, top_n) = match args {
        [word] => (*word, DEFAULT_TOP_N),
        [word, n] => (*word, TopN::parse(n)?),
        _ => return Err(usage(CommandId::Search)),
    };

    let store = session.store.snapshot();
    let top_n = top_n.resolve(store.len());

    let start = Instant::now();
    let results = QueryEngine::new(&store).query(word, top_n)?;
    debug!(word, top_n, latency = ?start.elapsed(), "Query finished");

    let written_to = session.config.output_path.clone();
    write_report_file(&written_to, word, top_n, &results)?;
    info!(
        "Top {} most similar words for \"{}\" written to {}",
        top_n,
        word,
        written_to.display()
    );

    Ok(Reply::Results {
        query: word.to_string(),
        top_n,
        results,
        written_to,
    })
}

fn handle_add(session: &mut Session, args: &[&str]) -> Result<Reply> {
    let [word, values @ ..] = args else {
        return Err(usage(CommandId::Add));
    };
    if values.is_empty() {
        return Err(usage(CommandId::Add));
    }

    let vector = values
        .iter()
        .map(|v| {
            v.trim_matches(',')
                .parse::<f64>()
                .map_err(|_| Error::InvalidArgument(format!("not a number: {:?}", v)))
        })
        .collect::<Result<Vec<f64>>>()?;

    session.store.snapshot().check_dimension(vector.len())?;

    let path = session.config.embeddings_path.clone();
    append_record(&path, word, &vector)?;
    info!("Added \"{}\" to {}", word, path.display());

    let report = session.load_from(path.clone())?;
    Ok(Reply::Added {
        word: word.to_string(),
        path,
        report,
    })
}

fn handle_exists(session: &mut Session, args: &[&str]) -> Result<Reply> {
    let [word] = args else {
        return Err(usage(CommandId::Exists));
    };
    Ok(Reply::Exists {
        word: word.to_string(),
        exists: session.store.snapshot().contains(word),
    })
}

fn usage(id: CommandId) -> Error {
    Error::InvalidArgument(format!("usage: {}", id.usage()))
}
