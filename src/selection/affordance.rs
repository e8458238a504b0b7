//! Per-item affordance bookkeeping
//!
//! The controller never stores flags on host items. Instead every item it
//! has touched gets one entry here, keyed by the host handle, holding the
//! identifier it was bound under and the handles needed to undo what was
//! attached. An identifier is claimed by at most one item at a time.

use crate::ui::{CheckboxHandle, ListenerToken};
use std::collections::HashMap;
use std::hash::Hash;

/// Host handles owned on behalf of one item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Affordance {
    /// Identifier the item was bound under
    pub id: String,
    /// Checkbox attached while in selection mode
    pub checkbox: Option<CheckboxHandle>,
    /// Click listener, bound once for the item's lifetime
    pub listener: ListenerToken,
}

/// Item → affordance handles
#[derive(Debug, Clone)]
pub struct AffordanceTable<I> {
    entries: HashMap<I, Affordance>,
}

impl<I> Default for AffordanceTable<I> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<I: Clone + Eq + Hash> AffordanceTable<I> {
    /// Create an empty table
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a click listener is bound for `item`
    #[must_use]
    pub fn is_bound(&self, item: &I) -> bool {
        self.entries.contains_key(item)
    }

    /// Get the entry for `item`
    #[must_use]
    pub fn get(&self, item: &I) -> Option<&Affordance> {
        self.entries.get(item)
    }

    /// Item currently bound under `id`
    #[must_use]
    pub fn owner(&self, id: &str) -> Option<&I> {
        self.entries
            .iter()
            .find(|(_, entry)| entry.id == id)
            .map(|(item, _)| item)
    }

    /// Record a freshly bound listener for `item`.
    ///
    /// An existing entry keeps its listener and checkbox.
    pub fn bind(&mut self, item: I, id: String, listener: ListenerToken) {
        self.entries.entry(item).or_insert(Affordance {
            id,
            checkbox: None,
            listener,
        });
    }

    /// Drop the entries for which `keep` returns false.
    ///
    /// Returns each dropped item with its entry, so the caller can undo
    /// the visual state on the host.
    pub fn prune<F>(&mut self, mut keep: F) -> Vec<(I, Affordance)>
    where
        F: FnMut(&I, &Affordance) -> bool,
    {
        let dropped: Vec<I> = self
            .entries
            .iter()
            .filter(|(item, entry)| !keep(item, entry))
            .map(|(item, _)| item.clone())
            .collect();

        dropped
            .into_iter()
            .filter_map(|item| self.entries.remove(&item).map(|entry| (item, entry)))
            .collect()
    }

    /// Checkbox attached to `item`, if any
    #[must_use]
    pub fn checkbox(&self, item: &I) -> Option<CheckboxHandle> {
        self.entries.get(item).and_then(|entry| entry.checkbox)
    }

    /// Record the checkbox attached to `item`
    pub fn set_checkbox(&mut self, item: &I, checkbox: CheckboxHandle) {
        if let Some(entry) = self.entries.get_mut(item) {
            entry.checkbox = Some(checkbox);
        }
    }

    /// Detach every checkbox from the table.
    ///
    /// Returns each bound item together with the checkbox it held.
    pub fn take_checkboxes(&mut self) -> Vec<(I, Option<CheckboxHandle>)> {
        self.entries
            .iter_mut()
            .map(|(item, entry)| (item.clone(), entry.checkbox.take()))
            .collect()
    }

    /// Number of items with a bound listener
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no item has been bound
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of items currently holding a checkbox
    #[must_use]
    pub fn checkbox_count(&self) -> usize {
        self.entries
            .values()
            .filter(|entry| entry.checkbox.is_some())
            .count()
    }
}
