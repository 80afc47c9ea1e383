use crate::context::LOG_FILE;
use anyhow::{Context, Result};
use headlamp_infrastructure::HeadlampPaths;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Sends all tracing output to `logs/headlamp.log` so the terminal stays
/// free for the conversation. `RUST_LOG` overrides the default `info` level.
pub fn init_file_logging(paths: &HeadlampPaths) -> Result<PathBuf> {
    let log_dir = paths.log_dir()?;
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("failed to create log directory '{}'", log_dir.display()))?;

    let log_path = log_dir.join(LOG_FILE);
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("failed to open log file '{}'", log_path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_ansi(false)
        .with_writer(Mutex::new(log_file))
        .init();

    Ok(log_path)
}
