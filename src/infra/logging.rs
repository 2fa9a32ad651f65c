use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::infra::{config::LogConfig, error::AppError, storage_layout::StorageLayout};

const LOG_FILE_NAME: &str = "revterm.log";

/// Routes tracing output to a file, since the terminal belongs to the TUI.
/// The returned guard flushes pending lines when dropped.
pub fn init(config: &LogConfig, layout: &StorageLayout) -> Result<WorkerGuard, AppError> {
    let appender = tracing_appender::rolling::never(&layout.log_dir, LOG_FILE_NAME);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level)),
        )
        .with_target(true)
        .with_ansi(false)
        .with_writer(writer)
        .try_init()
        .map_err(AppError::LoggingInit)?;

    Ok(guard)
}

pub fn log_file(layout: &StorageLayout) -> std::path::PathBuf {
    layout.log_dir.join(LOG_FILE_NAME)
}
