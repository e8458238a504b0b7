//! Set of selected item identifiers

use std::collections::HashSet;

/// Identifiers of the currently selected items.
///
/// Membership is unordered; [`SelectedIds::to_vec`] sorts for
/// deterministic output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectedIds {
    ids: HashSet<String>,
}

impl SelectedIds {
    /// Create an empty selection
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip membership of `id`.
    ///
    /// Returns `true` if the id is selected after the call.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.ids.remove(id) {
            false
        } else {
            self.ids.insert(id.to_string());
            true
        }
    }

    /// Remove `id`, returning whether it was selected
    pub fn remove(&mut self, id: &str) -> bool {
        self.ids.remove(id)
    }

    /// Check if an id is selected
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Number of selected ids
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Check if nothing is selected
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// The selected id when exactly one is selected
    #[must_use]
    pub fn single(&self) -> Option<&str> {
        if self.ids.len() == 1 {
            self.ids.iter().next().map(String::as_str)
        } else {
            None
        }
    }

    /// Remove every id
    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Selected ids as a sorted list
    #[must_use]
    pub fn to_vec(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.ids.iter().cloned().collect();
        ids.sort();
        ids
    }
}
