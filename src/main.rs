use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use catalog_admin_api::database::postgres::PgCatalog;
use catalog_admin_api::{app, config, database, AppState};

/// Admin backend for multi-tenant storefront catalog management
#[derive(Debug, Parser)]
#[command(name = "catalog-admin-api", version)]
struct Args {
    /// Port to listen on; falls back to PORT, then 3000
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let config = config::config();
    tracing::info!("Starting catalog admin API in {:?} mode", config.environment);

    let pool = database::connect(&config.database)
        .await
        .context("failed to create database pool")?;
    let state = AppState {
        catalog: Arc::new(PgCatalog::new(pool)),
    };

    let port = args
        .port
        .or_else(|| std::env::var("PORT").ok().and_then(|s| s.parse().ok()))
        .unwrap_or(3000);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Catalog admin API listening on http://{}", bind_addr);

    axum::serve(listener, app(state)).await.context("server")?;
    Ok(())
}
