//! Tracing subscriber setup

use anyhow::{Context, Result};
use tracing::error;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LogConfig;

const DEFAULT_FILTER: &str = "info,video_catalog_api=debug,tower_http=debug";

/// Install the global subscriber: stdout, plus rotated files when `log.dir` is set.
///
/// The returned guard must live until shutdown; dropping it flushes the file sink.
pub fn init(config: &LogConfig) -> Result<Option<WorkerGuard>> {
    let (file_layer, guard) = match file_writer(config)? {
        Some((writer, guard)) => (
            Some(fmt::layer().with_ansi(false).with_writer(writer)),
            Some(guard),
        ),
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_FILTER.into()),
        ))
        .with(fmt::layer())
        .with(file_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(guard)
}

/// Log an error that is about to terminate the process
pub fn report_fatal(err: &anyhow::Error) {
    error!("Fatal: {:#}", err);
}

fn file_writer(config: &LogConfig) -> Result<Option<(NonBlocking, WorkerGuard)>> {
    let Some(ref dir) = config.dir else {
        return Ok(None);
    };

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(config.prefix.clone())
        .filename_suffix("log")
        .max_log_files(config.max_files)
        .build(dir)
        .with_context(|| format!("Failed to open log directory {}", dir))?;

    Ok(Some(tracing_appender::non_blocking(appender)))
}
