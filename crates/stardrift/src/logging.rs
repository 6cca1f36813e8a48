//! File logging setup.
//!
//! The terminal belongs to the UI, so log output only ever goes to a file.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use color_eyre::eyre::WrapErr;
use stardrift_config::LogConfig;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Keeps the background log writer alive; logs flush when dropped.
#[derive(Debug)]
pub struct LoggingGuard {
    _guard: WorkerGuard,
    path: PathBuf,
}

impl LoggingGuard {
    /// File this run logs to.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// File name for a run starting now.
fn run_file_name() -> String {
    format!("run_{}.log", Local::now().format("%Y%m%d_%H%M%S"))
}

/// Install the global subscriber. Returns `None` when logging is disabled.
pub fn init(config: &LogConfig) -> color_eyre::Result<Option<LoggingGuard>> {
    if !config.enabled {
        return Ok(None);
    }

    let dir = config.resolved_dir();
    fs::create_dir_all(&dir)
        .wrap_err_with(|| format!("failed to create log directory {}", dir.display()))?;

    let file_name = run_file_name();
    let appender = tracing_appender::rolling::never(&dir, &file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .wrap_err_with(|| format!("invalid log level {:?}", config.level))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true),
        )
        .try_init()
        .wrap_err("failed to install log subscriber")?;

    Ok(Some(LoggingGuard {
        _guard: guard,
        path: dir.join(file_name),
    }))
}
