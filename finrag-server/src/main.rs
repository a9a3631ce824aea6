use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use finrag_core::{HashingEmbedder, QueryEngine};
use finrag_server::loader::load_dataset;
use finrag_server::server::{AppState, ServerConfig, run_server};

/// Retrieval-backed finance Q&A server.
#[derive(Parser, Debug)]
#[command(name = "finrag-server", version, about)]
struct Args {
    /// Host to bind the HTTP listener on.
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Port to bind the HTTP listener on.
    #[arg(long, default_value_t = 5001)]
    port: u16,

    /// Directory holding corpus, glossary, and market data files.
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let dataset = load_dataset(&args.data_dir)
        .with_context(|| format!("failed to load data from {}", args.data_dir.display()))?;

    let engine = QueryEngine::builder()
        .embedding_provider(Arc::new(HashingEmbedder::default()))
        .documents(dataset.documents)
        .glossary(dataset.glossary)
        .market_data(dataset.market)
        .build()
        .await
        .context("failed to initialize query engine")?;
    info!(documents = engine.document_count(), "query engine ready");

    run_server(
        ServerConfig { host: args.host, port: args.port },
        AppState { engine: Arc::new(engine) },
    )
    .await
}
