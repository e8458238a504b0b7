//! Color theme for the terminal host

use crate::ui::{ButtonState, MessageLevel};
use ratatui::style::{Color, Modifier, Style};

/// Theme configuration for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    /// Background of selected items
    pub selection_bg: Color,
    /// Foreground of selected items
    pub selection_fg: Color,
    /// Cursor indicator
    pub cursor: Color,
    /// Checked checkbox mark
    pub checked: Color,
    /// Success messages
    pub success: Color,
    /// Error messages
    pub error: Color,
    /// Warning messages and the confirm dialog border
    pub warning: Color,
    /// Info messages
    pub info: Color,
    /// Borders
    pub border: Color,
    /// Dimmed/inactive text
    pub dimmed: Color,
    /// Enabled action buttons
    pub button: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Create a dark theme (default)
    #[must_use]
    pub const fn dark() -> Self {
        Self {
            selection_bg: Color::Blue,
            selection_fg: Color::White,
            cursor: Color::Cyan,
            checked: Color::Green,
            success: Color::Green,
            error: Color::Red,
            warning: Color::Yellow,
            info: Color::Cyan,
            border: Color::DarkGray,
            dimmed: Color::DarkGray,
            button: Color::Magenta,
        }
    }

    /// Style for selected items
    #[must_use]
    pub fn selected_style(&self) -> Style {
        Style::default()
            .bg(self.selection_bg)
            .fg(self.selection_fg)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for the cursor indicator (>)
    #[must_use]
    pub fn cursor_style(&self) -> Style {
        Style::default()
            .fg(self.cursor)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for a checked checkbox
    #[must_use]
    pub fn checked_style(&self) -> Style {
        Style::default()
            .fg(self.checked)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for an action button
    ///
    /// Reduced opacity renders dimmed; the button stays on screen.
    #[must_use]
    pub fn button_style(&self, state: ButtonState) -> Style {
        if state.opacity < 1.0 {
            self.dimmed_style()
        } else {
            Style::default()
                .fg(self.button)
                .add_modifier(Modifier::BOLD)
        }
    }

    /// Style for a toast of `level`
    #[must_use]
    pub fn level_style(&self, level: MessageLevel) -> Style {
        match level {
            MessageLevel::Success => Style::default().fg(self.success),
            MessageLevel::Error => Style::default().fg(self.error),
            MessageLevel::Warning => Style::default().fg(self.warning),
            MessageLevel::Info => Style::default().fg(self.info),
            MessageLevel::Normal => Style::default(),
        }
    }

    /// Style for warning-colored borders
    #[must_use]
    pub fn warning_border_style(&self) -> Style {
        Style::default()
            .fg(self.warning)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for borders
    #[must_use]
    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    /// Style for dimmed text
    #[must_use]
    pub fn dimmed_style(&self) -> Style {
        Style::default().fg(self.dimmed)
    }
}
