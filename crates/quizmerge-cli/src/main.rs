//! quizmerge CLI — merge plain-text question banks into a JSON question store.

use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "quizmerge",
    version,
    about = "Merge plain-text question banks into a JSON question store"
)]
struct Cli {
    /// Defaults to `merge` with the configured paths
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Input and store paths; each overrides the config file.
#[derive(Args, Debug, Default)]
pub struct SourceArgs {
    /// Plain-text question bank
    #[arg(long)]
    questions: Option<PathBuf>,

    /// Plain-text answer key
    #[arg(long)]
    answers: Option<PathBuf>,

    /// JSON question store
    #[arg(long)]
    store: Option<PathBuf>,

    /// Config file path
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse the bank and key, then append new questions to the store
    Merge {
        #[command(flatten)]
        sources: SourceArgs,

        /// Report what would be added without writing the store
        #[arg(long)]
        dry_run: bool,
    },

    /// Show how each parsed question would be merged
    Inspect {
        #[command(flatten)]
        sources: SourceArgs,
    },

    /// Create a starter config and an empty store
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "quizmerge=info,quizmerge_core=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        None => commands::merge::execute(SourceArgs::default(), false),
        Some(Commands::Merge { sources, dry_run }) => commands::merge::execute(sources, dry_run),
        Some(Commands::Inspect { sources }) => commands::inspect::execute(sources),
        Some(Commands::Init) => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
