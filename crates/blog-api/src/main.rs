//! Blog API Server entry point
//!
//! Run with:
//! ```bash
//! cargo run -p blog-api
//! ```
//!
//! Configuration is loaded from environment variables and an optional `.env` file.

use anyhow::Context;
use blog_common::{try_init_tracing, AppConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // .env may carry RUST_LOG / LOG_FORMAT, so load it before tracing
    let _ = dotenvy::dotenv();

    if let Err(e) = try_init_tracing() {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    if let Err(e) = run().await {
        error!(error = ?e, "Server failed");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    info!("Starting Blog API Server...");

    let config = AppConfig::from_env().context("failed to load configuration")?;

    info!(
        env = ?config.app.env,
        address = %config.api.address(),
        backend = ?config.storage.backend,
        "Configuration loaded"
    );

    blog_api::run(config).await.context("server error")?;

    Ok(())
}
