// src/main.rs

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

use rolechat::config::{self, CONFIG};
use rolechat::provider::GeminiProvider;
use rolechat::server;

#[derive(Parser)]
#[command(name = "rolechat")]
#[command(about = "Role-based Gemini chat with a streaming web page")]
struct Args {
    /// Host to bind
    #[arg(long, env = "ROLECHAT_HOST")]
    host: Option<String>,

    /// Port to bind
    #[arg(long, env = "ROLECHAT_PORT")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(CONFIG.log_level.clone()));
    fmt().with_env_filter(filter).init();

    info!("Starting rolechat");
    info!("Model: {}", CONFIG.gemini_model);

    // The API key is the one fatal configuration requirement: halt before
    // accepting any chat interaction when it is missing.
    let api_key = match config::require_api_key() {
        Ok(key) => key,
        Err(e) => {
            error!("Configuration error: {}", e);
            error!("Set GEMINI_API_KEY in the environment or a .env file.");
            std::process::exit(1);
        }
    };

    let provider = Arc::new(GeminiProvider::new(api_key, CONFIG.gemini_model.clone()));

    // CLI args > env vars > defaults
    let host = args.host.unwrap_or_else(|| CONFIG.host.clone());
    let port = args.port.unwrap_or(CONFIG.port);
    let bind_address = format!("{}:{}", host, port);

    server::run(&bind_address, provider, CONFIG.gemini_model.clone()).await
}
