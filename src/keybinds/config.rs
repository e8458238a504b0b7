//! Configuration for keybinds.

use super::actions::KeyAction;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Configuration for keybinds.
///
/// Actions missing from the map keep their default keys.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct KeybindConfig {
    /// Keybind mappings, keyed by action name
    pub keybinds: HashMap<String, KeybindDef>,
}

/// Keybind definition - can be single key, multiple keys, or disabled.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum KeybindDef {
    /// Single keybind
    Single(String),
    /// Multiple alternative keybinds for the same action
    Multiple(Vec<String>),
}

impl Default for KeybindConfig {
    fn default() -> Self {
        Self {
            keybinds: default_keybinds(),
        }
    }
}

fn single(key: &str) -> KeybindDef {
    KeybindDef::Single(key.to_string())
}

fn multiple(keys: &[&str]) -> KeybindDef {
    KeybindDef::Multiple(keys.iter().map(ToString::to_string).collect())
}

fn default_keybinds() -> HashMap<String, KeybindDef> {
    let mut keybinds = HashMap::new();

    // Mode
    keybinds.insert(KeyAction::EnterSelection.name().to_string(), single("s"));
    keybinds.insert(KeyAction::Cancel.name().to_string(), single("esc"));
    keybinds.insert(KeyAction::ToggleTrigger.name().to_string(), single("t"));

    // Items
    keybinds.insert(KeyAction::Toggle.name().to_string(), single("space"));
    keybinds.insert(KeyAction::Click.name().to_string(), single("enter"));
    keybinds.insert(KeyAction::CursorUp.name().to_string(), multiple(&["up", "k"]));
    keybinds.insert(KeyAction::CursorDown.name().to_string(), multiple(&["down", "j"]));

    // Batch actions
    keybinds.insert(KeyAction::Copy.name().to_string(), single("c"));
    keybinds.insert(KeyAction::Delete.name().to_string(), single("d"));
    keybinds.insert(KeyAction::Edit.name().to_string(), single("e"));

    // System
    keybinds.insert(KeyAction::Quit.name().to_string(), multiple(&["q", "ctrl-c"]));

    keybinds
}

impl KeybindConfig {
    /// Get the keybind(s) for a given action name.
    ///
    /// Falls back to the default keys; returns an empty list for unknown
    /// actions.
    #[must_use]
    pub fn get(&self, action: &str) -> Vec<String> {
        let def = match self.keybinds.get(action) {
            Some(def) => def.clone(),
            None => match default_keybinds().remove(action) {
                Some(def) => def,
                None => return Vec::new(),
            },
        };

        match def {
            KeybindDef::Single(key) => vec![key],
            KeybindDef::Multiple(keys) => keys,
        }
    }

    /// Check if a keybind is disabled for an action.
    #[must_use]
    pub fn is_disabled(&self, action: &str) -> bool {
        self.keybinds.get(action).is_some_and(|def| match def {
            KeybindDef::Single(key) => key == "none",
            KeybindDef::Multiple(keys) => keys.iter().all(|k| k == "none"),
        })
    }

    /// Find the action bound to a normalized key name (`"ctrl-c"`, `"esc"`).
    #[must_use]
    pub fn action_for(&self, key: &str) -> Option<KeyAction> {
        KeyAction::ALL.into_iter().find(|action| {
            self.get(action.name())
                .iter()
                .any(|k| k != "none" && k.eq_ignore_ascii_case(key))
        })
    }

    /// First configured key for an action, for hint display
    #[must_use]
    pub fn primary_key(&self, action: KeyAction) -> Option<String> {
        self.get(action.name()).into_iter().find(|k| k != "none")
    }

    /// (key, description) pairs for every enabled action
    #[must_use]
    pub fn hints(&self) -> Vec<(String, String)> {
        KeyAction::ALL
            .into_iter()
            .filter(|action| !self.is_disabled(action.name()))
            .filter_map(|action| {
                self.primary_key(action)
                    .map(|key| (key, action.description().to_string()))
            })
            .collect()
    }
}
