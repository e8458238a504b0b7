//! Interaction mode of a selection controller

/// Current interaction mode.
///
/// Checkbox affordances exist on items if and only if the mode is
/// [`SelectionMode::Selecting`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SelectionMode {
    /// Normal view; clicking an item opens it for editing
    #[default]
    Browsing,
    /// Items show checkboxes and clicks toggle membership
    Selecting,
}

impl SelectionMode {
    /// Whether items currently carry checkbox affordances
    #[must_use]
    pub const fn is_selecting(self) -> bool {
        matches!(self, Self::Selecting)
    }

    /// Lowercase name used in log output
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Browsing => "browsing",
            Self::Selecting => "selecting",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_browsing() {
        assert_eq!(SelectionMode::default(), SelectionMode::Browsing);
        assert!(!SelectionMode::Browsing.is_selecting());
        assert!(SelectionMode::Selecting.is_selecting());
    }
}
