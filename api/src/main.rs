//! Video Catalog API Server

mod config;
mod error;
mod handlers;
mod routes;
mod server;
mod state;
mod telemetry;


use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = match config::AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            // No file sink yet: its location comes from the config that failed
            telemetry::init(&config::LogConfig::default())?;
            telemetry::report_fatal(&e);
            return Err(e);
        }
    };

    let _log_guard = telemetry::init(&config.log)?;

    info!("Starting Video Catalog API Server");
    info!("Storage backend: {:?}", config.storage);

    if let Err(e) = server::run(config).await {
        telemetry::report_fatal(&e);
        return Err(e);
    }

    Ok(())
}
