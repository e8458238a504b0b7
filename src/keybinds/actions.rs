//! Actions reachable from the terminal host's keyboard

/// Actions that can be triggered by keybinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    /// Enter selection mode
    EnterSelection,
    /// Leave selection mode
    Cancel,
    /// Toggle the checkbox of the item under the cursor
    Toggle,
    /// Click the item under the cursor (edit while browsing, toggle while selecting)
    Click,
    /// Copy selected items
    Copy,
    /// Delete selected items
    Delete,
    /// Edit the single selected item
    Edit,
    /// Move cursor up
    CursorUp,
    /// Move cursor down
    CursorDown,
    /// Show or hide the selection trigger
    ToggleTrigger,
    /// Leave the program
    Quit,
}

impl KeyAction {
    /// Every action, in help order
    pub const ALL: [Self; 11] = [
        Self::EnterSelection,
        Self::Cancel,
        Self::Toggle,
        Self::Click,
        Self::Copy,
        Self::Delete,
        Self::Edit,
        Self::CursorUp,
        Self::CursorDown,
        Self::ToggleTrigger,
        Self::Quit,
    ];

    /// Config key naming this action
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::EnterSelection => "enter_selection",
            Self::Cancel => "cancel",
            Self::Toggle => "toggle",
            Self::Click => "click",
            Self::Copy => "copy",
            Self::Delete => "delete",
            Self::Edit => "edit",
            Self::CursorUp => "cursor_up",
            Self::CursorDown => "cursor_down",
            Self::ToggleTrigger => "toggle_trigger",
            Self::Quit => "quit",
        }
    }

    /// Look up an action by its config key
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|action| action.name() == name)
    }

    /// Returns a human-readable description of the action.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::EnterSelection => "Select items",
            Self::Cancel => "Cancel selection",
            Self::Toggle => "Toggle item",
            Self::Click => "Open / toggle item",
            Self::Copy => "Copy selected",
            Self::Delete => "Delete selected",
            Self::Edit => "Edit selected",
            Self::CursorUp => "Up",
            Self::CursorDown => "Down",
            Self::ToggleTrigger => "Show/hide select button",
            Self::Quit => "Quit",
        }
    }

    /// Whether the action only makes sense in selection mode
    #[must_use]
    pub const fn requires_selection_mode(self) -> bool {
        matches!(
            self,
            Self::Cancel | Self::Toggle | Self::Copy | Self::Delete | Self::Edit
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for action in KeyAction::ALL {
            assert_eq!(KeyAction::from_name(action.name()), Some(action));
        }
        assert_eq!(KeyAction::from_name("unknown"), None);
    }

    #[test]
    fn test_selection_mode_actions() {
        assert!(KeyAction::Copy.requires_selection_mode());
        assert!(!KeyAction::Click.requires_selection_mode());
        assert!(!KeyAction::EnterSelection.requires_selection_mode());
    }
}
