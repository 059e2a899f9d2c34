//! File logging.
//!
//! The terminal belongs to the interactive generator, so logs go to
//! `${FIGART_HOME}/logs/figart.log` through a non-blocking writer.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Environment variable overriding the configured filter.
pub const LOG_ENV: &str = "FIGART_LOG";
pub const LOG_FILE: &str = "figart.log";
const FALLBACK_DIRECTIVE: &str = "info";

/// Picks the filter directive: a non-blank environment override wins over the config value.
pub fn filter_directive(env_override: Option<String>, configured: &str) -> String {
    match env_override {
        Some(directive) if !directive.trim().is_empty() => directive,
        _ => configured.to_string(),
    }
}

/// Installs the global subscriber. Keep the returned guard alive until exit so buffered lines
/// are flushed.
pub fn init(logs_dir: &Path, configured: &str) -> Result<WorkerGuard> {
    fs::create_dir_all(logs_dir)
        .with_context(|| format!("Failed to create log directory {}", logs_dir.display()))?;

    let directive = filter_directive(std::env::var(LOG_ENV).ok(), configured);
    let filter = EnvFilter::try_new(&directive)
        .or_else(|_| EnvFilter::try_new(FALLBACK_DIRECTIVE))
        .context("Failed to build log filter")?;

    let appender = tracing_appender::rolling::never(logs_dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))
        .context("Failed to install log subscriber")?;

    tracing::debug!(%directive, "logging initialised");
    Ok(guard)
}
