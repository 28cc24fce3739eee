//! Appgraph CLI binary.

use anyhow::Result;
use appgraph::cli::Cli;
use tracing_subscriber::EnvFilter;

/// Main entry point for the appgraph CLI.
///
/// Uses tokio's `current_thread` runtime; every command is a short sequence
/// of file reads followed by in-memory graph work.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Logs go to stderr so `--json` output on stdout stays parseable.
    // Example: RUST_LOG=appgraph=debug,appgraph_jsonl=trace appgraph graph
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("appgraph=warn,appgraph_jsonl=warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    tracing::debug!("Starting appgraph CLI");

    let cli = Cli::parse_args();
    cli.execute().await?;

    tracing::debug!("Appgraph CLI completed successfully");
    Ok(())
}
