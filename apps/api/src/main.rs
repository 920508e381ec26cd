mod config;
mod errors;
mod models;
mod resume;
mod routes;
mod state;
mod store;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Config, StoreBackend};
use crate::resume::session::ResumeSession;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::{FileStore, KeyValueStore, MemoryStore};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume API v{}", env!("CARGO_PKG_VERSION"));

    let store: Arc<dyn KeyValueStore> = match config.store_backend {
        StoreBackend::File => {
            let store = FileStore::new(&config.data_dir);
            info!("Using file store at {}", store.dir().display());
            Arc::new(store)
        }
        StoreBackend::Memory => {
            info!("Using in-memory store; edits will not survive a restart");
            Arc::new(MemoryStore::new())
        }
    };

    let session = ResumeSession::load(store).await;
    let state = AppState::new(session);

    // The presentation layer is served from another origin during development
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = SocketAddr::new(config.bind_addr, config.port);
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
