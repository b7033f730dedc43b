//! Verification server binary.
//!
//! Serves the single-pair and batch verification endpoints over HTTP,
//! backed by a JSON catalog file, the fixture search provider, and the
//! in-memory store.
//!
//! Configuration comes from the environment:
//! - `VERIFY_CATALOG` — path to a JSON file `{"brokers": [...], "countries": [...]}` (required)
//! - `VERIFY_HOST` — bind host (default `127.0.0.1`)
//! - `VERIFY_PORT` — bind port (default `8750`)

use std::sync::Arc;

use anyhow::Context;

use country_verify::{
    FixtureSearch, MemoryStore, ServerConfig, StaticCatalog, Verifier, VerifyConfig, VerifyServer,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let catalog_path = std::env::var("VERIFY_CATALOG")
        .context("VERIFY_CATALOG must point to a catalog JSON file")?;
    let catalog_json = std::fs::read_to_string(&catalog_path)
        .with_context(|| format!("failed to read catalog file {catalog_path}"))?;
    let catalog = StaticCatalog::from_json(&catalog_json)
        .with_context(|| format!("failed to parse catalog file {catalog_path}"))?;

    tracing::info!(
        brokers = catalog.broker_count(),
        countries = catalog.country_count(),
        "catalog loaded"
    );

    let server_config = ServerConfig {
        host: std::env::var("VERIFY_HOST").unwrap_or_else(|_| "127.0.0.1".to_owned()),
        port: std::env::var("VERIFY_PORT")
            .ok()
            .map(|port| port.parse().context("VERIFY_PORT must be a port number"))
            .transpose()?
            .unwrap_or(8750),
    };

    let verifier = Verifier::new(
        catalog,
        FixtureSearch,
        MemoryStore::new(),
        VerifyConfig::default(),
    )
    .context("failed to build verifier")?;

    let server = VerifyServer::start(Arc::new(verifier), &server_config)
        .await
        .context("failed to start verification server")?;

    tracing::info!(addr = %server.addr(), "verification server running, ctrl-c to stop");

    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for shutdown signal")?;

    tracing::info!("shutting down");
    server.shutdown();
    Ok(())
}
