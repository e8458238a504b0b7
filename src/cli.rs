//! Command-line interface definitions and parsing
//!
//! # Commands
//!
//! - **browse**: Interactive terminal host over a JSON record file
//! - **run**: Select records by id and run one action without a TUI
//! - **config**: Show or create the configuration file
//!
//! # Examples
//!
//! ```
//! use clap::Parser;
//! use selection_ui::cli::{ActionArg, Cli, Commands};
//!
//! let cli = Cli::parse_from(["selui", "run", "items.json", "-s", "a,b", "copy"]);
//! match cli.command {
//!     Commands::Run { select, action, .. } => {
//!         assert_eq!(select, vec!["a", "b"]);
//!         assert_eq!(action, ActionArg::Copy);
//!     }
//!     _ => unreachable!(),
//! }
//! ```

use crate::Result;
use crate::config::SelectionUiConfig;
use crate::selection::SelectionAction;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Action to run from the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionArg {
    /// Edit the single selected record
    Edit,
    /// Copy the selected records
    Copy,
    /// Delete the selected records (asks first)
    Delete,
}

impl From<ActionArg> for SelectionAction {
    fn from(arg: ActionArg) -> Self {
        match arg {
            ActionArg::Edit => Self::Edit,
            ActionArg::Copy => Self::Copy,
            ActionArg::Delete => Self::Delete,
        }
    }
}

/// Main CLI structure for parsing command-line arguments
#[derive(Parser, Debug)]
#[command(name = "selui")]
#[command(about = "Multi-select list browser", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Use this config file instead of the default location
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Suppress informational output (only print results)
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Browse a record file in the terminal
    #[command(visible_alias = "b")]
    Browse {
        /// JSON file with an array of records
        #[arg(value_name = "ITEMS")]
        items: PathBuf,

        /// Delete without asking
        #[arg(long = "no-confirm")]
        no_confirm: bool,

        /// Write the records back here on exit
        #[arg(short = 'o', long = "output", value_name = "PATH")]
        output: Option<PathBuf>,
    },

    /// Select records and run one action
    Run {
        /// JSON file with an array of records
        #[arg(value_name = "ITEMS")]
        items: PathBuf,

        /// Ids to select (comma separated or repeated)
        #[arg(short = 's', long = "select", value_name = "ID", value_delimiter = ',', required = true)]
        select: Vec<String>,

        /// Action to run
        #[arg(value_enum)]
        action: ActionArg,

        /// Answer yes to the delete confirmation
        #[arg(short = 'y', long = "yes")]
        yes: bool,

        /// Write the resulting records here
        #[arg(short = 'o', long = "output", value_name = "PATH")]
        output: Option<PathBuf>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

/// Configuration subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommands {
    /// Print the config file location
    Path,

    /// Print the effective configuration as TOML
    Show,

    /// Write a config file with default values
    Init {
        /// Overwrite an existing file
        #[arg(short = 'f', long = "force")]
        force: bool,
    },
}

impl Cli {
    /// Parse command line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Config file in use
    ///
    /// # Errors
    ///
    /// Returns `SelectionError::ConfigError` if no `--config` was given and
    /// the config directory cannot be determined.
    pub fn config_path(&self) -> Result<PathBuf> {
        match &self.config {
            Some(path) => Ok(path.clone()),
            None => Ok(SelectionUiConfig::config_path()?),
        }
    }

    /// Load the configuration, falling back to defaults when the file is missing
    ///
    /// # Errors
    ///
    /// Returns `SelectionError::ConfigError` if the file exists but is invalid.
    pub fn load_config(&self) -> Result<SelectionUiConfig> {
        let path = self.config_path()?;
        if path.exists() {
            Ok(SelectionUiConfig::load_from(&path)?)
        } else {
            Ok(SelectionUiConfig::default())
        }
    }
}
