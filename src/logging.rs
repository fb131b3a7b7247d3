//! `tracing` setup. Events go to a log file because the terminal belongs to
//! the TUI.

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Errors that can occur while installing the log subscriber.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    /// The log file could not be created.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The platform does not provide a data directory.
    #[error("could not determine XDG data directory")]
    NoDataDir,

    /// A global subscriber was already installed.
    #[error("failed to install log subscriber: {0}")]
    Install(String),
}

/// Default log file location (`~/.local/share/chartpop/chartpop.log`).
pub fn log_path() -> Result<PathBuf, LoggingError> {
    dirs::data_dir()
        .map(|dir| dir.join("chartpop").join("chartpop.log"))
        .ok_or(LoggingError::NoDataDir)
}

/// Installs a global subscriber appending to `path`.
///
/// `RUST_LOG` takes precedence over `default_filter`.
pub fn init(path: &Path, default_filter: &str) -> Result<(), LoggingError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = File::options().create(true).append(true).open(path)?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|err| LoggingError::Install(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_creates_log_file_and_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("chartpop.log");
        // Another test binary may already own the global subscriber.
        let _ = init(&path, "chartpop=debug");
        assert!(path.exists());
    }

    #[test]
    fn log_path_ends_with_file_name() {
        if let Ok(path) = log_path() {
            assert!(path.ends_with("chartpop/chartpop.log"));
        }
    }
}
