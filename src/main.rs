//! `wordvisor` command-line entry point.
//!
//! Reads source descriptors from stdin, one per line, and prints a per-source
//! count followed by the total:
//!
//! ```text
//! $ printf 'a.txt\nb.txt\n' | wordvisor --type file
//! Count for a.txt: 2
//! Count for b.txt: 0
//! Total: 2
//! ```

use std::sync::Arc;

use anyhow::anyhow;
use clap::{CommandFactory, Parser, error::ErrorKind};
use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;

use wordvisor::{Config, LogWriter, Pipeline, ProviderKind, ReportWriter, Subscribe};

#[derive(Parser, Debug)]
#[command(name = "wordvisor", version)]
#[command(about = "Count occurrences of a word across sources listed on stdin")]
struct Cli {
    /// Type of input. Supported types: file, url, debug
    #[arg(short = 't', long = "type", value_name = "TYPE", env = "WORDVISOR_TYPE")]
    kind: ProviderKind,

    /// Word to count (substring match, case-sensitive)
    #[arg(short, long, default_value = "Go")]
    word: String,

    /// Maximum number of sources processed at the same time
    #[arg(short = 'k', long, default_value_t = 5)]
    max_in_flight: usize,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging()?;

    let cfg = Config {
        target: cli.word,
        max_in_flight: cli.max_in_flight,
        ..Config::default()
    };
    let subs: Vec<Arc<dyn Subscribe>> = vec![Arc::new(LogWriter::new()), Arc::new(ReportWriter::new())];

    let pipeline = match Pipeline::builder(cfg)
        .with_provider_kind(cli.kind)
        .with_subscribers(subs)
        .build()
    {
        Ok(pipeline) => pipeline,
        Err(e) => Cli::command().error(ErrorKind::InvalidValue, e).exit(),
    };

    pipeline.run(BufReader::new(tokio::io::stdin())).await;
    Ok(())
}

/// Logs go to stderr so stdout carries only the report lines.
fn init_logging() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!(e))
}
