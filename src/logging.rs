//! File logging for the binary
//!
//! The terminal host owns stdout, so log records go to a file through
//! `simplelog::WriteLogger`.

use crate::Result;
use crate::config::{LogSettings, SelectionUiConfig};
use simplelog::{Config, WriteLogger};
use std::fs::{self, OpenOptions};
use std::path::PathBuf;

/// Where log records go for `settings`
///
/// # Errors
///
/// Returns `SelectionError::ConfigError` if no file is configured and the
/// default location cannot be determined.
pub fn log_path(settings: &LogSettings) -> Result<PathBuf> {
    match &settings.file {
        Some(file) => Ok(file.clone()),
        None => Ok(SelectionUiConfig::default_log_path()?),
    }
}

/// Install the global file logger.
///
/// Returns the log file path, or `None` when logging is off.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened or a logger is
/// already installed.
pub fn init(settings: &LogSettings) -> Result<Option<PathBuf>> {
    let filter = settings.level.filter();
    if filter == log::LevelFilter::Off {
        return Ok(None);
    }

    let path = log_path(settings)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    WriteLogger::init(filter, Config::default(), file)?;
    log::info!("logging to {}", path.display());
    Ok(Some(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LogLevel;

    #[test]
    fn test_logging_off_installs_nothing() {
        let settings = LogSettings {
            level: LogLevel::Off,
            file: None,
        };
        assert!(init(&settings).unwrap().is_none());
    }

    #[test]
    fn test_configured_path_wins() {
        let dir = tempfile::tempdir().unwrap();
        let settings = LogSettings {
            level: LogLevel::Debug,
            file: Some(dir.path().join("custom.log")),
        };
        assert_eq!(log_path(&settings).unwrap(), dir.path().join("custom.log"));
    }
}
