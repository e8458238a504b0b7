//! Core traits for the host abstraction layer

use super::types::{ButtonState, CheckboxHandle, ChromeElement, ListenerToken};
use crate::selection::SelectionAction;
use std::hash::Hash;

/// The UI surface a selection controller drives.
///
/// A host owns the on-screen items and the chrome (triggers, action
/// buttons, counter). The controller only asks it to attach or detach
/// affordances and to flip visual state; it never holds item content.
///
/// All methods are infallible: a handle the host no longer knows about
/// (for example a checkbox on an item removed meanwhile) is ignored.
pub trait ItemHost {
    /// Host handle for one on-screen item.
    ///
    /// Equal handles must denote the same item; a removed item's handle
    /// is not reused for a new one.
    type Item: Clone + Eq + Hash;

    /// All items currently marked selectable, in display order
    fn selectable_items(&self) -> Vec<Self::Item>;

    /// Read an attribute of an item
    fn attribute(&self, item: &Self::Item, name: &str) -> Option<String>;

    /// Attach a checkbox child to an item
    fn attach_checkbox(&mut self, item: &Self::Item) -> CheckboxHandle;

    /// Remove a previously attached checkbox
    fn detach_checkbox(&mut self, checkbox: CheckboxHandle);

    /// Route clicks on an item to the controller
    fn bind_click(&mut self, item: &Self::Item) -> ListenerToken;

    /// Add or remove the item's "selected" visual state
    fn set_item_selected(&mut self, item: &Self::Item, selected: bool);

    /// Add or remove a checkbox's "checked" visual state
    fn set_checkbox_checked(&mut self, checkbox: CheckboxHandle, checked: bool);

    /// Add or remove a class on the host root (used for styling)
    fn set_root_class(&mut self, class: &str, enabled: bool);

    /// Show or hide a chrome element
    fn set_visible(&mut self, element: ChromeElement, visible: bool);

    /// Update an action button
    fn set_button_state(&mut self, action: SelectionAction, state: ButtonState);

    /// Update the selection counter
    fn set_count_label(&mut self, text: &str, visible: bool);
}
