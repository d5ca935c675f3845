use anyhow::Result;
use std::sync::Arc;
use tracing::info;

use qrtrail::config::{Config, DatabaseBackend};
use qrtrail::storage::{CodeStore, MemoryStorage, SqliteStorage, Storage};
use qrtrail::{api, redirect};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load configuration
    let config = Config::from_env()?;
    info!("Loaded configuration");

    // Initialize storage
    let backend: Arc<dyn Storage> = match config.database.backend {
        DatabaseBackend::Sqlite => {
            info!("Using SQLite storage: {}", config.database.url);
            Arc::new(
                SqliteStorage::new(&config.database.url, config.database.max_connections).await?,
            )
        }
        DatabaseBackend::Memory => {
            info!("Using in-memory storage (data is lost on restart)");
            Arc::new(MemoryStorage::new())
        }
    };

    let store = Arc::new(CodeStore::new(backend));

    info!("Initializing storage...");
    store.init().await?;
    info!("Storage initialized successfully");

    // Create routers
    let api_router = api::create_api_router(
        Arc::clone(&store),
        config.tracking.public_base_url.clone(),
    );
    let redirect_router =
        redirect::create_redirect_router(Arc::clone(&store), config.tracking.fallback_url.clone());

    info!(
        "Tracking URLs resolve under {}/track/...",
        config.tracking.public_base_url
    );

    // Start API server
    let api_addr = format!("{}:{}", config.api_server.host, config.api_server.port);
    let api_listener = tokio::net::TcpListener::bind(&api_addr).await?;
    info!("🚀 API server listening on http://{}", api_addr);
    info!("   - API endpoints available at http://{}/api/...", api_addr);

    // Start redirect server
    let redirect_addr = format!(
        "{}:{}",
        config.redirect_server.host, config.redirect_server.port
    );
    let redirect_listener = tokio::net::TcpListener::bind(&redirect_addr).await?;
    info!("🚀 Redirect server listening on http://{}", redirect_addr);

    // Run both servers concurrently
    tokio::try_join!(
        axum::serve(api_listener, api_router),
        axum::serve(redirect_listener, redirect_router),
    )?;

    Ok(())
}
