use std::sync::Arc;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use facturare_api::{config, db, http};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = config::init()?;

    // Pool construction and schema initialization are both fatal on
    // failure; the server never serves against an unverified schema.
    let db = db::init(&config).await?;
    tracing::info!("database connection established, schema verified");

    let app = http::router(Arc::new(db));

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;
    tracing::info!(port = config.port, "listening");

    axum::serve(listener, app).await?;

    Ok(())
}
