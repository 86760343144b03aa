//! Logging setup.
//!
//! CLI commands log to stderr. The TUI owns the terminal, so it logs to a
//! file under ${MHUB_HOME}/logs instead; call sites use `tracing` either way.

use std::fs::OpenOptions;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::paths;

/// Environment variable controlling log verbosity (EnvFilter syntax).
pub const LOG_ENV_VAR: &str = "MHUB_LOG";

const DEFAULT_DIRECTIVES: &str = "mhub=info,mhub_core=info,mhub_tui=info";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES))
}

/// Initializes stderr logging for CLI commands.
///
/// Safe to call more than once; later calls are no-ops.
pub fn init_cli() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .try_init();
}

/// Initializes file logging for the TUI.
///
/// Returns the appender guard; dropping it flushes and stops the background
/// writer, so hold it for as long as the TUI runs.
pub fn init_tui() -> Result<WorkerGuard> {
    let dir = paths::logs_dir();
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join("mhub-tui.log"))
        .with_context(|| format!("Failed to open log file in {}", dir.display()))?;

    let (writer, guard) = tracing_appender::non_blocking(file);
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(writer)
        .with_ansi(false)
        .try_init();
    Ok(guard)
}
