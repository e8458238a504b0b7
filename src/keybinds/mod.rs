//! Keybind system for the terminal host.
//!
//! Maps key names to [`KeyAction`]s through a configurable table.

pub mod actions;
pub mod config;
pub mod keys;

pub use actions::KeyAction;
pub use config::{KeybindConfig, KeybindDef};
pub use keys::{key_to_string, parse_key_string};
