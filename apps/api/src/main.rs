mod ats;
mod config;
mod db;
mod errors;
mod models;
mod resumes;
mod routes;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Config, StorageBackend};
use crate::db::create_pool;
use crate::resumes::repository::{InMemoryResumeRepository, PgResumeRepository, ResumeRepository};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume API v{}", env!("CARGO_PKG_VERSION"));

    let repo = build_repository(&config).await?;
    info!("Resume storage: {}", repo.backend());

    let state = AppState { repo };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Picks the resume store once, at startup. Handlers only ever see the trait.
async fn build_repository(config: &Config) -> Result<Arc<dyn ResumeRepository>> {
    match (config.storage_backend, config.database_url.as_deref()) {
        (StorageBackend::Memory, _) | (StorageBackend::Auto, None) => {
            Ok(Arc::new(InMemoryResumeRepository::new()))
        }
        (StorageBackend::Postgres, url) => {
            let url = url.context("DATABASE_URL is required for postgres storage")?;
            let pool = create_pool(url, config.db_max_connections).await?;
            Ok(Arc::new(PgResumeRepository::new(pool)))
        }
        (StorageBackend::Auto, Some(url)) => {
            match create_pool(url, config.db_max_connections).await {
                Ok(pool) => Ok(Arc::new(PgResumeRepository::new(pool))),
                Err(e) => {
                    warn!("PostgreSQL unavailable ({e:#}); falling back to in-memory storage");
                    Ok(Arc::new(InMemoryResumeRepository::new()))
                }
            }
        }
    }
}
