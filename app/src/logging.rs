// In app/src/logging.rs

use anyhow::{Context, Result};
use app_config::AppSettings;
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::filter::Targets;
use tracing_subscriber::prelude::*;

/// Installs the global subscriber: a colored stdout layer plus a plain `trading.log` file layer.
///
/// The returned guard flushes the file writer on drop and must live until exit.
pub fn init(settings: &AppSettings) -> Result<WorkerGuard> {
    let level: Level = settings
        .log_level
        .parse()
        .with_context(|| format!("invalid log level '{}'", settings.log_level))?;
    let filter = Targets::new().with_default(level);

    let file = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix("trading")
        .filename_suffix("log")
        .build(&settings.log_dir)
        .with_context(|| format!("cannot open log file in '{}'", settings.log_dir))?;
    let (file_writer, guard) = tracing_appender::non_blocking(file);

    let stdout_layer = tracing_subscriber::fmt::layer().with_filter(filter.clone());
    let file_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_writer(file_writer)
        .with_filter(filter);

    tracing_subscriber::registry()
        .with(stdout_layer)
        .with(file_layer)
        .try_init()
        .context("a global tracing subscriber is already installed")?;

    Ok(guard)
}
