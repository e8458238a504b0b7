//! Configuration module for selection-ui
//!
//! Loads text templates, item markers, keybinds, toast and log settings.
//! Configuration is stored in the user's config directory
//! (`~/.config/selection-ui/config.toml` on Linux); every field has a
//! default so partial files are fine.

use crate::keybinds::KeybindConfig;
use crate::selection::{DEFAULT_ID_ATTRIBUTE, DEFAULT_ROOT_CLASS, Labels};
use config::{Config, ConfigError, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// How selectable items are recognized on the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Markers {
    /// Attribute marking an item as selectable
    #[serde(default = "default_selectable_attribute")]
    pub selectable_attribute: String,

    /// Value the selectable attribute must have
    #[serde(default = "default_selectable_value")]
    pub selectable_value: String,

    /// Attribute holding the item identifier
    #[serde(default = "default_id_attribute")]
    pub id_attribute: String,

    /// Root class toggled with selection mode
    #[serde(default = "default_root_class")]
    pub root_class: String,
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            selectable_attribute: default_selectable_attribute(),
            selectable_value: default_selectable_value(),
            id_attribute: default_id_attribute(),
            root_class: default_root_class(),
        }
    }
}

fn default_selectable_attribute() -> String {
    "data-selectable".to_string()
}

fn default_selectable_value() -> String {
    "true".to_string()
}

fn default_id_attribute() -> String {
    DEFAULT_ID_ATTRIBUTE.to_string()
}

fn default_root_class() -> String {
    DEFAULT_ROOT_CLASS.to_string()
}

/// Toast settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToastSettings {
    /// How long a toast stays visible, in milliseconds
    #[serde(default = "default_toast_duration_ms")]
    pub duration_ms: u64,
}

impl Default for ToastSettings {
    fn default() -> Self {
        Self {
            duration_ms: default_toast_duration_ms(),
        }
    }
}

impl ToastSettings {
    /// Toast lifetime
    #[must_use]
    pub const fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

const fn default_toast_duration_ms() -> u64 {
    5000
}

/// Log level names accepted in the config file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Logging disabled
    Off,
    /// Errors only
    Error,
    /// Warnings and errors
    #[default]
    Warn,
    /// Informational messages
    Info,
    /// Mode transitions and action dispatch
    Debug,
    /// Every toggle
    Trace,
}

impl LogLevel {
    /// Matching `log` filter
    #[must_use]
    pub const fn filter(self) -> log::LevelFilter {
        match self {
            Self::Off => log::LevelFilter::Off,
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct LogSettings {
    /// Minimum level written
    #[serde(default)]
    pub level: LogLevel,

    /// Log file; defaults to the local data directory
    #[serde(default)]
    pub file: Option<PathBuf>,
}

/// Application configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SelectionUiConfig {
    /// Counter, prompt and toast text
    #[serde(default)]
    pub labels: Labels,

    /// Item markers
    #[serde(default)]
    pub markers: Markers,

    /// Terminal host keybinds
    #[serde(default)]
    pub keybinds: KeybindConfig,

    /// Toast settings
    #[serde(default)]
    pub toast: ToastSettings,

    /// Log settings
    #[serde(default)]
    pub log: LogSettings,
}

impl SelectionUiConfig {
    /// Get the path to the config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be determined.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ConfigError::Message("Could not determine config directory".to_string()))?;

        Ok(config_dir.join("selection-ui").join("config.toml"))
    }

    /// Default log file location
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the local data directory cannot be determined.
    pub fn default_log_path() -> Result<PathBuf, ConfigError> {
        let data_dir = dirs::data_local_dir()
            .ok_or_else(|| ConfigError::Message("Could not determine data directory".to_string()))?;

        Ok(data_dir.join("selection-ui").join("selui.log"))
    }

    /// Load configuration from the default path, falling back to defaults
    /// when no file exists
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config file cannot be read or parsed.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file is missing, unreadable or invalid.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml))
            .build()?;

        settings.try_deserialize()
    }

    /// Save configuration to the default path
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config directory cannot be determined.
    /// See [`Self::save_to`] for write failures.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to a specific file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the parent directory cannot be created, the
    /// configuration cannot be serialized to TOML, or the file cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ConfigError::Message(format!("Failed to create config directory: {e}")))?;
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Message(format!("Failed to serialize config: {e}")))?;

        fs::write(path, toml_string)
            .map_err(|e| ConfigError::Message(format!("Failed to write config file: {e}")))?;

        Ok(())
    }

    /// Render as TOML, for `selui config show`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if serialization fails.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Message(format!("Failed to serialize config: {e}")))
    }
}
