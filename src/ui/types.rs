//! Shared types for the host abstraction layer

/// Handle to a checkbox affordance attached to an item by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CheckboxHandle(pub u64);

/// Token for a click listener bound to an item by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerToken(pub u64);

/// Fixed chrome elements owned by the selection controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChromeElement {
    /// Container holding the select and cancel triggers (toggled by show/hide)
    TriggerContainer,
    /// Trigger that enters selection mode
    SelectTrigger,
    /// Trigger that leaves selection mode
    CancelTrigger,
    /// Group holding the edit, copy and delete buttons
    ActionGroup,
}

impl ChromeElement {
    /// Every chrome element
    pub const ALL: [Self; 4] = [
        Self::TriggerContainer,
        Self::SelectTrigger,
        Self::CancelTrigger,
        Self::ActionGroup,
    ];
}

/// Visual state of an action button.
///
/// Disabled buttons stay in place but are drawn at reduced opacity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ButtonState {
    /// Whether the button reacts to presses
    pub enabled: bool,
    /// Opacity in `0.0..=1.0`
    pub opacity: f32,
}

impl ButtonState {
    /// Fully opaque, clickable
    pub const ENABLED: Self = Self {
        enabled: true,
        opacity: 1.0,
    };

    /// Dimmed, not clickable
    pub const DISABLED: Self = Self {
        enabled: false,
        opacity: 0.5,
    };

    /// Pick the enabled or disabled state
    #[must_use]
    pub const fn from_enabled(enabled: bool) -> Self {
        if enabled { Self::ENABLED } else { Self::DISABLED }
    }
}

impl Default for ButtonState {
    fn default() -> Self {
        Self::ENABLED
    }
}
