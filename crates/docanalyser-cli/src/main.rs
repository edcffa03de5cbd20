mod config;

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use docanalyser_ai::GeminiBackend;
use docanalyser_server::AppState;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use crate::config::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Before the subscriber, so RUST_LOG from .env applies too.
    let dotenv = config::load_dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        model = %cli.model,
        credential = cli.api_key.is_some(),
        dotenv = ?dotenv,
        "docanalyser starting"
    );
    if cli.api_key.is_none() {
        tracing::warn!("GOOGLE_API_KEY is not set; analysis requests will fail");
    }

    let backend = GeminiBackend::new(cli.gemini_config()).context("building Gemini client")?;
    let state = AppState::new(Arc::new(backend));

    let addr = cli.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    docanalyser_server::serve(listener, state)
        .await
        .context("serving HTTP")?;

    tracing::info!("docanalyser stopped");
    Ok(())
}
