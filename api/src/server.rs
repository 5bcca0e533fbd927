//! Server startup and shutdown

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use sqlx::postgres::PgPool;
use tracing::{error, info, warn};
use video_catalog_core::connection;
use video_catalog_core::repository::{
    InMemoryVideoRepository, PostgresVideoRepository, VideoRepository,
};

use crate::config::{AppConfig, StorageBackend};
use crate::routes;
use crate::state::AppState;

/// Serve the API until SIGINT or SIGTERM, then release the database pool
pub async fn run(config: AppConfig) -> Result<()> {
    let (videos, pool) = build_repository(&config).await?;
    let app = routes::create_router(AppState::new(videos));

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid server address")?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(pool) = pool {
        pool.close().await;
        info!("Database connection closed");
    }

    info!("Server stopped");
    Ok(())
}

async fn build_repository(
    config: &AppConfig,
) -> Result<(Arc<dyn VideoRepository>, Option<PgPool>)> {
    match config.storage {
        StorageBackend::Postgres => {
            let pool = connection::connect(&config.db)
                .await
                .context("Failed to connect to database")?;
            let videos: Arc<dyn VideoRepository> =
                Arc::new(PostgresVideoRepository::new(pool.clone()));
            Ok((videos, Some(pool)))
        }
        StorageBackend::Memory => {
            warn!("Using in-memory storage, videos are lost on exit");
            let videos: Arc<dyn VideoRepository> = Arc::new(InMemoryVideoRepository::new());
            Ok((videos, None))
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C signal"),
        _ = terminate => info!("Received terminate signal"),
    }

    info!("Shutting down");
}
