use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use geomark_api::config::{self, StorageBackend};
use geomark_api::database::{MemoryStore, PgStore};
use geomark_api::server;
use geomark_api::state::AppState;

#[derive(Parser)]
#[command(name = "geomark-api")]
#[command(about = "Shared map annotations with owner and admin access control")]
#[command(version)]
struct Args {
    #[arg(long, help = "Port to listen on (overrides PORT)")]
    port: Option<u16>,

    #[arg(long, value_enum, help = "Storage backend (overrides STORAGE_BACKEND)")]
    storage: Option<StorageBackend>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let mut config = config::config().clone();
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(backend) = args.storage {
        config.storage.backend = backend;
    }
    tracing::info!("Starting geomark-api in {:?} mode", config.environment);

    config.validate()?;
    if geomark_api::is_production!() && config.security.trust_identity_header {
        tracing::warn!("X-User-Email is trusted as identity in production");
    }

    let mut pg = None;
    let state = match config.storage.backend {
        StorageBackend::Postgres => {
            let store = Arc::new(
                PgStore::connect(&config.database)
                    .await
                    .context("failed to connect to postgres")?,
            );
            tracing::info!("Using postgres storage");
            pg = Some(store.clone());
            AppState::new(store, config)
        }
        StorageBackend::Memory => {
            tracing::info!("Using in-memory storage; data is lost on exit");
            AppState::new(Arc::new(MemoryStore::new()), config)
        }
    };

    // Seeding must finish before the listener accepts requests
    if let Some(seed) = state.config.security.bootstrap_admin.clone() {
        state
            .seed_admin(&seed)
            .await
            .context("failed to seed admin account")?;
    }

    let bind_addr = format!("0.0.0.0:{}", state.config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("geomark-api listening on http://{}", bind_addr);

    axum::serve(listener, server::app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    if let Some(store) = pg {
        store.close().await;
    }
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
