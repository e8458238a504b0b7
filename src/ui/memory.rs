//! In-memory item host
//!
//! A small document model standing in for a real view: elements with
//! attributes and classes, checkbox children, click listeners and the
//! selection chrome. The terminal host renders it and tests inspect it.
//!
//! Clones share the same document, so a caller can keep a handle for
//! inspection while the controller owns another.

use super::traits::ItemHost;
use super::types::{ButtonState, CheckboxHandle, ChromeElement, ListenerToken};
use crate::config::Markers;
use crate::selection::SelectionAction;
use std::cell::{Ref, RefCell, RefMut};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::rc::Rc;

/// Class set on selected items
pub const SELECTED_CLASS: &str = "selected";

/// Class set on checked checkboxes
pub const CHECKED_CLASS: &str = "checked";

/// Handle to an element in a [`MemoryHost`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub u64);

#[derive(Debug, Clone)]
struct Checkbox {
    handle: CheckboxHandle,
    classes: BTreeSet<String>,
}

impl Checkbox {
    fn is_checked(&self) -> bool {
        self.classes.contains(CHECKED_CLASS)
    }
}

#[derive(Debug, Clone)]
struct Element {
    id: ElementId,
    label: String,
    attributes: BTreeMap<String, String>,
    classes: BTreeSet<String>,
    checkboxes: Vec<Checkbox>,
    listeners: Vec<ListenerToken>,
}

#[derive(Debug)]
struct Document {
    markers: Markers,
    elements: Vec<Element>,
    root_classes: BTreeSet<String>,
    visible: HashMap<ChromeElement, bool>,
    buttons: HashMap<SelectionAction, ButtonState>,
    count_label: String,
    count_visible: bool,
    next_handle: u64,
}

impl Document {
    fn next_handle(&mut self) -> u64 {
        self.next_handle += 1;
        self.next_handle
    }

    fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.iter().find(|element| element.id == id)
    }

    fn element_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.iter_mut().find(|element| element.id == id)
    }

    fn is_selectable(&self, element: &Element) -> bool {
        element
            .attributes
            .get(&self.markers.selectable_attribute)
            .is_some_and(|value| *value == self.markers.selectable_value)
    }
}

/// Read-only view of one element, for rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementView {
    /// Element handle
    pub element: ElementId,
    /// Value of the identifier attribute
    pub record_id: Option<String>,
    /// Display text
    pub label: String,
    /// Marked selectable
    pub selectable: bool,
    /// Carries at least one checkbox
    pub has_checkbox: bool,
    /// Its checkbox is checked
    pub checked: bool,
    /// Carries the selected class
    pub selected: bool,
}

/// Shared in-memory document implementing [`ItemHost`]
#[derive(Debug, Clone)]
pub struct MemoryHost {
    doc: Rc<RefCell<Document>>,
}

impl MemoryHost {
    /// Empty document with default markers
    #[must_use]
    pub fn new() -> Self {
        Self::with_markers(Markers::default())
    }

    /// Empty document recognizing items by `markers`
    #[must_use]
    pub fn with_markers(markers: Markers) -> Self {
        Self {
            doc: Rc::new(RefCell::new(Document {
                markers,
                elements: Vec::new(),
                root_classes: BTreeSet::new(),
                visible: HashMap::new(),
                buttons: HashMap::new(),
                count_label: String::new(),
                count_visible: false,
                next_handle: 0,
            })),
        }
    }

    fn doc(&self) -> Ref<'_, Document> {
        self.doc.borrow()
    }

    fn doc_mut(&self) -> RefMut<'_, Document> {
        self.doc.borrow_mut()
    }

    /// Markers used to find selectable items
    #[must_use]
    pub fn markers(&self) -> Markers {
        self.doc().markers.clone()
    }

    /// Append an element with arbitrary attributes
    pub fn push_element<'a>(
        &self,
        label: &str,
        attributes: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> ElementId {
        let mut doc = self.doc_mut();
        let id = ElementId(doc.next_handle());
        doc.elements.push(Element {
            id,
            label: label.to_string(),
            attributes: attributes
                .into_iter()
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect(),
            classes: BTreeSet::new(),
            checkboxes: Vec::new(),
            listeners: Vec::new(),
        });
        id
    }

    /// Append an element carrying an identifier and the selectable marker
    pub fn push_record(&self, record_id: &str, label: &str, selectable: bool) -> ElementId {
        let markers = self.markers();
        let flag = if selectable { markers.selectable_value.as_str() } else { "false" };
        self.push_element(
            label,
            [
                (markers.id_attribute.as_str(), record_id),
                (markers.selectable_attribute.as_str(), flag),
            ],
        )
    }

    /// Remove an element with all its children and listeners
    pub fn remove(&self, element: ElementId) -> bool {
        let mut doc = self.doc_mut();
        let before = doc.elements.len();
        doc.elements.retain(|e| e.id != element);
        doc.elements.len() != before
    }

    /// First element whose identifier attribute equals `record_id`
    #[must_use]
    pub fn find_by_id(&self, record_id: &str) -> Option<ElementId> {
        let doc = self.doc();
        let attribute = &doc.markers.id_attribute;
        doc.elements
            .iter()
            .find(|e| e.attributes.get(attribute).is_some_and(|v| v == record_id))
            .map(|e| e.id)
    }

    /// Display text of an element
    #[must_use]
    pub fn label(&self, element: ElementId) -> Option<String> {
        self.doc().element(element).map(|e| e.label.clone())
    }

    /// Number of elements
    #[must_use]
    pub fn len(&self) -> usize {
        self.doc().elements.len()
    }

    /// Check if the document has no elements
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.doc().elements.is_empty()
    }

    /// Views of all elements in document order
    #[must_use]
    pub fn snapshot(&self) -> Vec<ElementView> {
        let doc = self.doc();
        doc.elements
            .iter()
            .map(|e| ElementView {
                element: e.id,
                record_id: e.attributes.get(&doc.markers.id_attribute).cloned(),
                label: e.label.clone(),
                selectable: doc.is_selectable(e),
                has_checkbox: !e.checkboxes.is_empty(),
                checked: e.checkboxes.iter().any(Checkbox::is_checked),
                selected: e.classes.contains(SELECTED_CLASS),
            })
            .collect()
    }

    /// Checkboxes attached to one element
    #[must_use]
    pub fn checkbox_count(&self, element: ElementId) -> usize {
        self.doc().element(element).map_or(0, |e| e.checkboxes.len())
    }

    /// Checkboxes attached across the document
    #[must_use]
    pub fn total_checkboxes(&self) -> usize {
        self.doc().elements.iter().map(|e| e.checkboxes.len()).sum()
    }

    /// Click listeners bound to one element
    #[must_use]
    pub fn listener_count(&self, element: ElementId) -> usize {
        self.doc().element(element).map_or(0, |e| e.listeners.len())
    }

    /// Check if a click on `element` reaches a listener
    #[must_use]
    pub fn is_click_bound(&self, element: ElementId) -> bool {
        self.listener_count(element) > 0
    }

    /// Check if an element carries `class`
    #[must_use]
    pub fn has_class(&self, element: ElementId, class: &str) -> bool {
        self.doc()
            .element(element)
            .is_some_and(|e| e.classes.contains(class))
    }

    /// Check if an element carries the selected class
    #[must_use]
    pub fn is_item_selected(&self, element: ElementId) -> bool {
        self.has_class(element, SELECTED_CLASS)
    }

    /// Check if an element's checkbox is checked
    #[must_use]
    pub fn is_checkbox_checked(&self, element: ElementId) -> bool {
        self.doc()
            .element(element)
            .is_some_and(|e| e.checkboxes.iter().any(Checkbox::is_checked))
    }

    /// Check if the root carries `class`
    #[must_use]
    pub fn root_has_class(&self, class: &str) -> bool {
        self.doc().root_classes.contains(class)
    }

    /// Visibility of a chrome element (hidden until set)
    #[must_use]
    pub fn is_visible(&self, element: ChromeElement) -> bool {
        self.doc().visible.get(&element).copied().unwrap_or(false)
    }

    /// Current state of an action button
    #[must_use]
    pub fn button_state(&self, action: SelectionAction) -> ButtonState {
        self.doc().buttons.get(&action).copied().unwrap_or_default()
    }

    /// Counter text and visibility
    #[must_use]
    pub fn count_label(&self) -> (String, bool) {
        let doc = self.doc();
        (doc.count_label.clone(), doc.count_visible)
    }
}

impl Default for MemoryHost {
    fn default() -> Self {
        Self::new()
    }
}

impl ItemHost for MemoryHost {
    type Item = ElementId;

    fn selectable_items(&self) -> Vec<ElementId> {
        let doc = self.doc();
        doc.elements
            .iter()
            .filter(|e| doc.is_selectable(e))
            .map(|e| e.id)
            .collect()
    }

    fn attribute(&self, item: &ElementId, name: &str) -> Option<String> {
        self.doc()
            .element(*item)
            .and_then(|e| e.attributes.get(name).cloned())
    }

    fn attach_checkbox(&mut self, item: &ElementId) -> CheckboxHandle {
        let mut doc = self.doc_mut();
        let handle = CheckboxHandle(doc.next_handle());
        if let Some(element) = doc.element_mut(*item) {
            element.checkboxes.push(Checkbox {
                handle,
                classes: BTreeSet::new(),
            });
        }
        handle
    }

    fn detach_checkbox(&mut self, checkbox: CheckboxHandle) {
        for element in &mut self.doc_mut().elements {
            element.checkboxes.retain(|c| c.handle != checkbox);
        }
    }

    fn bind_click(&mut self, item: &ElementId) -> ListenerToken {
        let mut doc = self.doc_mut();
        let token = ListenerToken(doc.next_handle());
        if let Some(element) = doc.element_mut(*item) {
            element.listeners.push(token);
        }
        token
    }

    fn set_item_selected(&mut self, item: &ElementId, selected: bool) {
        if let Some(element) = self.doc_mut().element_mut(*item) {
            if selected {
                element.classes.insert(SELECTED_CLASS.to_string());
            } else {
                element.classes.remove(SELECTED_CLASS);
            }
        }
    }

    fn set_checkbox_checked(&mut self, checkbox: CheckboxHandle, checked: bool) {
        let mut doc = self.doc_mut();
        let found = doc
            .elements
            .iter_mut()
            .flat_map(|e| e.checkboxes.iter_mut())
            .find(|c| c.handle == checkbox);
        if let Some(found) = found {
            if checked {
                found.classes.insert(CHECKED_CLASS.to_string());
            } else {
                found.classes.remove(CHECKED_CLASS);
            }
        }
    }

    fn set_root_class(&mut self, class: &str, enabled: bool) {
        let mut doc = self.doc_mut();
        if enabled {
            doc.root_classes.insert(class.to_string());
        } else {
            doc.root_classes.remove(class);
        }
    }

    fn set_visible(&mut self, element: ChromeElement, visible: bool) {
        self.doc_mut().visible.insert(element, visible);
    }

    fn set_button_state(&mut self, action: SelectionAction, state: ButtonState) {
        self.doc_mut().buttons.insert(action, state);
    }

    fn set_count_label(&mut self, text: &str, visible: bool) {
        let mut doc = self.doc_mut();
        doc.count_label = text.to_string();
        doc.count_visible = visible;
    }
}
