//! Tracing setup. The TUI owns the terminal, so log lines are appended to a
//! file instead of being printed.

use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Install the global subscriber writing to `log_file`. `RUST_LOG` takes
/// precedence over `default_filter`. Calling this twice keeps the first
/// subscriber.
pub fn init_tracing(log_file: &Path, default_filter: &str) -> Result<()> {
    if let Some(parent) = log_file.parent() {
        fs::create_dir_all(parent).context("failed to create log directory")?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .with_context(|| format!("failed to open log file {}", log_file.display()))?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();
    if let Err(err) = installed {
        debug!(error = %err, "global subscriber already installed, keeping it");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_the_log_file_and_tolerates_reinit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("arranger.log");

        init_tracing(&path, "debug").unwrap();
        init_tracing(&path, "not a [valid filter").unwrap();

        assert!(path.exists());
    }
}
