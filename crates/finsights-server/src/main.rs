//! FinSights server binary
//!
//! Usage:
//!   finsights                         Serve the demo fixtures on :8081
//!   finsights --port 3000             Custom port (PORT env also honored)
//!   NESSIE_KEY=... finsights          Serve live Nessie sandbox data
//!   OPENAI_API_KEY=... finsights      Enable the LLM-backed AI features

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use finsights_core::{DataProvider, LlmClient};
use finsights_server::{serve, ServerConfig};

#[derive(Parser)]
#[command(name = "finsights", about = "FinSights personal finance API server")]
struct Cli {
    /// Host to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on (falls back to the PORT env var, then 8081)
    #[arg(long)]
    port: Option<u16>,

    /// Nessie sandbox API key; without one (or NESSIE_KEY) the server uses
    /// the built-in demo fixtures
    #[arg(long)]
    nessie_key: Option<String>,

    /// Allowed CORS origin (repeatable; default allows any origin)
    #[arg(long = "allowed-origin")]
    allowed_origins: Vec<String>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let port = cli
        .port
        .or_else(|| std::env::var("PORT").ok().and_then(|p| p.parse().ok()))
        .unwrap_or(8081);

    let nessie_key = cli
        .nessie_key
        .or_else(|| std::env::var("NESSIE_KEY").ok())
        .filter(|k| !k.is_empty());

    let provider = match nessie_key {
        Some(ref key) => {
            info!("Using Nessie sandbox API for bank data");
            DataProvider::nessie(key)
        }
        None => {
            info!("Nessie API key not found, using demo fixtures");
            DataProvider::mock()
        }
    };
    info!("Data source: {}", provider.name());

    let llm = LlmClient::from_env();

    let config = ServerConfig {
        allowed_origins: cli.allowed_origins,
    };

    serve(provider, llm, &cli.host, port, config).await
}
