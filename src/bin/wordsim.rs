//! WORDSIM CLI
//!
//! One-shot top-N query, or an interactive shell when no query is given.

use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};
use wordsim::{CommandId, Config, LoadPolicy, Reply, Session, TopN};

/// WORDSIM - Similarity Search with Word Embeddings
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Embeddings file (word,v1,v2,... per line)
    #[arg(short, long, default_value = wordsim::config::DEFAULT_EMBEDDINGS_FILE)]
    embeddings: PathBuf,

    /// Report file for query results
    #[arg(short, long, default_value = wordsim::config::DEFAULT_OUTPUT_FILE)]
    output: PathBuf,

    /// Skip malformed records instead of aborting the load
    #[arg(long)]
    lenient: bool,

    /// Accept vectors whose length differs from the first record
    #[arg(long)]
    no_dimension_check: bool,

    /// Do not look for the embeddings file in parent directories
    #[arg(long)]
    no_parent_search: bool,

    /// Query word; runs a single search and exits
    #[arg(short, long)]
    query: Option<String>,

    /// Number of results, or "all"
    #[arg(short = 'n', long, default_value = "10", value_parser = parse_top_n)]
    top: TopN,
}

fn parse_top_n(s: &str) -> Result<TopN, String> {
    TopN::parse(s).map_err(|e| e.to_string())
}

fn main() -> anyhow::Result<()> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("wordsim=info".parse()?))
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let config = Config::default()
        .with_embeddings_path(&args.embeddings)
        .with_output_path(&args.output)
        .with_policy(if args.lenient {
            LoadPolicy::Lenient
        } else {
            LoadPolicy::Strict
        })
        .with_dimension_check(!args.no_dimension_check)
        .with_parent_search(!args.no_parent_search);

    let mut session = Session::new(config);

    match args.query {
        Some(word) => {
            session.load()?;
            let top = args.top.to_string();
            let reply = session.dispatch(CommandId::Search, &[word.as_str(), top.as_str()])?;
            println!("{}", reply);
            Ok(())
        }
        None => run_shell(session),
    }
}

fn run_shell(mut session: Session) -> anyhow::Result<()> {
    println!("WORDSIM - Similarity Search with Word Embeddings");

    match session.load() {
        Ok(report) => println!("{}", Reply::Loaded(report)),
        Err(e) => {
            info!("No embeddings loaded yet: {}", e);
            println!("Use 'load <path>' to load an embeddings file.");
        }
    }
    println!("Type 'help' for available commands, 'quit' to exit.\n");

    loop {
        print!("wordsim> ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }
        let input = input.trim();

        if input.is_empty() {
            continue;
        }

        match session.execute(input) {
            Ok(Reply::Quit) => {
                println!("{}", Reply::Quit);
                break;
            }
            Ok(reply) => println!("{}\n", reply),
            Err(e) => eprintln!("Error: {}\n", e),
        }
    }

    Ok(())
}
