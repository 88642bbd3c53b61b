//! Logging init.
//!
//! Two layers: the full event stream goes to `imglocal.log` under the XDG
//! state dir, and warnings (failed downloads, skipped styles, missing
//! backups) are echoed to stderr as they happen so a long run is not silent.

use anyhow::{Context, Result};
use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

const DEFAULT_FILTER: &str = "info,imglocal=debug,imglocal_core=debug";
const LOG_FILE_NAME: &str = "imglocal.log";

/// Log file filter: `RUST_LOG` if set, otherwise [`DEFAULT_FILTER`].
fn file_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Compact one-line stderr output, warnings and errors only.
fn console_layer<S>() -> impl Layer<S>
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    fmt::layer()
        .with_writer(io::stderr)
        .without_time()
        .with_target(false)
        .with_filter(LevelFilter::WARN)
}

/// `$XDG_STATE_HOME/imglocal/imglocal.log`, creating the directory.
pub fn log_file_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("imglocal")?;
    let log_dir = xdg_dirs.get_state_home();
    fs::create_dir_all(&log_dir)
        .with_context(|| format!("create log directory {}", log_dir.display()))?;
    Ok(log_dir.join(LOG_FILE_NAME))
}

/// File log plus stderr warnings. Returns the log path; an `Err` leaves no
/// subscriber installed so the caller can fall back to [`init_logging_stderr`].
pub fn init_logging() -> Result<PathBuf> {
    let path = log_file_path()?;
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("open log file {}", path.display()))?;

    let file_layer = fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_filter(file_filter());

    tracing_subscriber::registry()
        .with(file_layer)
        .with(console_layer())
        .try_init()
        .context("install tracing subscriber")?;

    tracing::info!("imglocal logging to {}", path.display());
    Ok(path)
}

/// Stderr only, for when the log file cannot be opened.
pub fn init_logging_stderr() {
    let _ = tracing_subscriber::registry().with(console_layer()).try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filter_parses() {
        assert!(DEFAULT_FILTER.parse::<EnvFilter>().is_ok());
    }

    #[test]
    fn console_layer_stacks_on_registry() {
        let subscriber = tracing_subscriber::registry().with(console_layer());
        tracing::subscriber::with_default(subscriber, || {
            tracing::warn!("could not download https://example.com/a.png: HTTP 404");
            tracing::info!("not shown on stderr");
        });
    }
}
