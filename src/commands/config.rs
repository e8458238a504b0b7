//! Config command - locate, print or create the configuration file

use crate::cli::ConfigCommands;
use crate::config::SelectionUiConfig;
use crate::ui::{OutputWriter, StdoutWriter};
use crate::{Result, SelectionError};
use std::path::Path;

/// Execute a config subcommand against the file at `path`
///
/// # Errors
///
/// Returns an error if the configuration cannot be serialized or written,
/// or if `init` would overwrite a file without `--force`.
pub fn execute(
    command: &ConfigCommands,
    path: &Path,
    config: &SelectionUiConfig,
    quiet: bool,
) -> Result<()> {
    match command {
        ConfigCommands::Path => println!("{}", path.display()),
        ConfigCommands::Show => print!("{}", config.to_toml()?),
        ConfigCommands::Init { force } => {
            init(path, *force)?;
            if !quiet {
                StdoutWriter::new().success(&format!("wrote {}", path.display()));
            }
        }
    }
    Ok(())
}

/// Write the default configuration to `path`
///
/// # Errors
///
/// Returns `SelectionError::InvalidInput` if the file exists and `force`
/// is not set, or `SelectionError::ConfigError` if writing fails.
pub fn init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(SelectionError::InvalidInput(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }
    SelectionUiConfig::default().save_to(path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_writes_loadable_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        init(&path, false).unwrap();
        assert_eq!(SelectionUiConfig::load_from(&path).unwrap(), SelectionUiConfig::default());
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "").unwrap();

        assert!(matches!(init(&path, false), Err(SelectionError::InvalidInput(_))));
        init(&path, true).unwrap();
        assert!(std::fs::read_to_string(&path).unwrap().contains("[labels]"));
    }
}
