//! Batch actions and their availability rules

/// Batch action triggered from the action button group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectionAction {
    /// Open the single selected item for editing
    Edit,
    /// Duplicate the selected items
    Copy,
    /// Delete the selected items (after confirmation)
    Delete,
}

impl SelectionAction {
    /// Every action, in button group order (edit on top)
    pub const ALL: [Self; 3] = [Self::Edit, Self::Copy, Self::Delete];

    /// Returns a human-readable description of the action.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Edit => "Edit selected item",
            Self::Copy => "Copy selected items",
            Self::Delete => "Delete selected items",
        }
    }

    /// Short button caption
    #[must_use]
    pub const fn caption(self) -> &'static str {
        match self {
            Self::Edit => "edit",
            Self::Copy => "copy",
            Self::Delete => "delete",
        }
    }
}

/// Which actions are enabled for a given selection size.
///
/// Edit needs exactly one item; copy and delete need at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionAvailability {
    /// Edit button enabled
    pub edit: bool,
    /// Copy button enabled
    pub copy: bool,
    /// Delete button enabled
    pub delete: bool,
}

impl ActionAvailability {
    /// Availability for `count` selected items
    #[must_use]
    pub const fn for_count(count: usize) -> Self {
        Self {
            edit: count == 1,
            copy: count >= 1,
            delete: count >= 1,
        }
    }

    /// Check if a specific action is enabled
    #[must_use]
    pub const fn is_enabled(self, action: SelectionAction) -> bool {
        match action {
            SelectionAction::Edit => self.edit,
            SelectionAction::Copy => self.copy,
            SelectionAction::Delete => self.delete,
        }
    }
}

/// Why an action was not dispatched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Nothing is selected
    EmptySelection,
    /// Edit requires exactly one selected item
    NotSingleSelection,
    /// No handler was configured for the action
    NoHandler,
}

/// Result of running a batch action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The handler ran to completion
    Dispatched,
    /// The user declined the confirmation prompt
    Declined,
    /// Preconditions were not met; nothing happened
    Skipped(SkipReason),
}

impl ActionOutcome {
    /// Check if the handler ran
    #[must_use]
    pub const fn is_dispatched(self) -> bool {
        matches!(self, Self::Dispatched)
    }
}

/// What an item click turned into
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Selection mode: membership was toggled
    Toggled,
    /// Browsing mode: the edit handler ran for this id
    Edited(String),
    /// Browsing mode without an edit handler
    Ignored,
    /// The item has no bound click listener
    Unbound,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_availability_by_count() {
        let none = ActionAvailability::for_count(0);
        assert!(!none.edit && !none.copy && !none.delete);

        let one = ActionAvailability::for_count(1);
        assert!(one.edit && one.copy && one.delete);

        let two = ActionAvailability::for_count(2);
        assert!(!two.edit);
        assert!(two.is_enabled(SelectionAction::Copy));
        assert!(two.is_enabled(SelectionAction::Delete));
    }

    #[test]
    fn test_button_order_has_edit_first() {
        assert_eq!(SelectionAction::ALL[0], SelectionAction::Edit);
    }
}
