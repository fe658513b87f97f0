//! CLI binary for surya.
//!
//! Results go to stdout; all tracing output goes to stderr so `--json`
//! output stays machine-readable.

use anyhow::Context;
use clap::{Parser, Subcommand};
use surya::{CancellationToken, SearchBridge, SearchConfig, SourceId};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Surya: search several web search engines at once.
#[derive(Parser)]
#[command(name = "surya", version, about)]
struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    command: Command,
}

/// Available commands.
#[derive(Subcommand)]
enum Command {
    /// Query every configured source and print the combined results.
    Search {
        /// Search terms, joined with spaces.
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,

        /// Source to query (repeatable). Defaults to all sources.
        #[arg(short, long = "source", value_name = "ID")]
        sources: Vec<SourceId>,

        /// Per-fetch timeout in seconds.
        #[arg(short, long)]
        timeout: Option<u64>,

        /// Maximum results kept per source.
        #[arg(short, long)]
        max: Option<usize>,

        /// Print the outcome as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Fetch a page and print its main text content.
    Read {
        /// Page URL.
        url: String,

        /// Fetch timeout in seconds.
        #[arg(short, long)]
        timeout: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("surya=info,surya_search=warn")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Search {
            query,
            sources,
            timeout,
            max,
            json,
        } => {
            let mut config = SearchConfig::default();
            if !sources.is_empty() {
                config.sources = sources;
            }
            if let Some(secs) = timeout {
                config.timeout_seconds = secs;
            }
            if let Some(max) = max {
                config.max_results_per_source = Some(max);
            }
            run_search(config, &query.join(" "), json).await
        }
        Command::Read { url, timeout } => {
            let mut config = SearchConfig::default();
            if let Some(secs) = timeout {
                config.timeout_seconds = secs;
            }
            run_read(config, &url).await
        }
    }
}

async fn run_search(config: SearchConfig, query: &str, json: bool) -> anyhow::Result<()> {
    let bridge = SearchBridge::new(config)?;
    let pending = bridge.submit(query);
    cancel_on_ctrl_c(pending.cancel_token());

    let outcome = pending.await.context("search failed")?;
    info!(
        results = outcome.results.len(),
        failed = outcome.failures.len(),
        "search finished"
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        print!("{}", surya::render::outcome_text(&outcome));
    }
    Ok(())
}

async fn run_read(config: SearchConfig, url: &str) -> anyhow::Result<()> {
    let bridge = SearchBridge::new(config)?;
    let pending = bridge.fetch_content(url);
    cancel_on_ctrl_c(pending.cancel_token());

    let text = pending
        .await
        .with_context(|| format!("could not read {url}"))?;
    println!("{text}");
    Ok(())
}

/// Cancel `token` on the first Ctrl+C.
fn cancel_on_ctrl_c(token: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("received Ctrl+C, cancelling...");
            token.cancel();
        }
    });
}
