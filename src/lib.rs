//! selection-ui - multi-item selection for list views
//!
//! A [`SelectionController`](selection::SelectionController) switches a
//! list between browsing and selecting, tracks the selected identifiers,
//! keeps checkboxes, counter and action buttons in step with the
//! selection, and dispatches copy, delete and edit to caller-supplied
//! handlers. Delete always asks for confirmation first.
//!
//! The controller only talks to traits in [`ui`]; [`ui::MemoryHost`] is an
//! in-memory document used by tests and by the terminal host behind the
//! `selui` binary.

use thiserror::Error;

pub mod cli;
pub mod commands;
pub mod config;
pub mod keybinds;
pub mod logging;
pub mod records;
pub mod selection;
pub mod ui;

/// Error enum, contains all failure states of the program
#[derive(Debug, Error)]
pub enum SelectionError {
    /// Represents a configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] ::config::ConfigError),
    /// Represents an I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    /// Terminal host error
    #[error("UI error: {0}")]
    UiError(#[from] ui::UiError),
    /// Record file could not be parsed or written
    #[error("Invalid record file: {0}")]
    Json(#[from] serde_json::Error),
    /// Logger was already installed
    #[error("Logger error: {0}")]
    LoggerError(#[from] log::SetLoggerError),
    /// A selection handler failed
    #[error("Handler failed: {0}")]
    HandlerError(String),
    /// Invalid input error
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for crate-level operations
pub type Result<T> = std::result::Result<T, SelectionError>;
