//! Selection mode controller
//!
//! Owns the mode, the selected identifiers and the affordance table, and
//! drives an [`ItemHost`] to reflect them.

use super::actions::{ActionAvailability, ActionOutcome, ClickOutcome, SelectionAction, SkipReason};
use super::affordance::AffordanceTable;
use super::callbacks::{HandlerError, IdExtractor, SelectionCallbacks};
use super::labels::Labels;
use super::mode::SelectionMode;
use super::state::SelectedIds;
use crate::ui::{ButtonState, ChromeElement, ConfirmPrompt, ItemHost};
use log::{debug, trace, warn};

/// Root class added while selection mode is active
pub const DEFAULT_ROOT_CLASS: &str = "selection-mode";

/// Construction-time configuration of a controller
pub struct SelectionOptions<H: ItemHost> {
    /// Action handlers
    pub callbacks: SelectionCallbacks,
    /// How to read an item's identifier
    pub id_extractor: IdExtractor<H>,
    /// Counter and prompt text
    pub labels: Labels,
    /// Root class toggled with selection mode
    pub root_class: String,
}

impl<H: ItemHost> SelectionOptions<H> {
    /// Options with the given handlers and defaults for everything else
    #[must_use]
    pub fn new(callbacks: SelectionCallbacks) -> Self {
        Self {
            callbacks,
            id_extractor: IdExtractor::default(),
            labels: Labels::default(),
            root_class: DEFAULT_ROOT_CLASS.to_string(),
        }
    }

    /// Replace the identifier extractor
    #[must_use]
    pub fn with_id_extractor(mut self, id_extractor: IdExtractor<H>) -> Self {
        self.id_extractor = id_extractor;
        self
    }

    /// Replace the text templates
    #[must_use]
    pub fn with_labels(mut self, labels: Labels) -> Self {
        self.labels = labels;
        self
    }

    /// Replace the root class
    #[must_use]
    pub fn with_root_class(mut self, root_class: impl Into<String>) -> Self {
        self.root_class = root_class.into();
        self
    }
}

impl<H: ItemHost> Default for SelectionOptions<H> {
    fn default() -> Self {
        Self::new(SelectionCallbacks::default())
    }
}

/// Multi-item selection controller.
///
/// One instance per view, held for the view's lifetime. All operations
/// are defensive: calling them with unmet preconditions does nothing.
///
/// # Examples
///
/// ```
/// use futures::executor::block_on;
/// use selection_ui::selection::{SelectionCallbacks, SelectionController, SelectionOptions};
/// use selection_ui::ui::{MemoryHost, ScriptedConfirm};
///
/// let host = MemoryHost::new();
/// let first = host.push_record("a", "Rent", true);
/// host.push_record("b", "Food", true);
///
/// let options = SelectionOptions::new(SelectionCallbacks::new());
/// let mut controller = SelectionController::new(host.clone(), ScriptedConfirm::accept(), options);
///
/// controller.enter_selection_mode();
/// controller.toggle_item_selection(&first);
/// assert_eq!(controller.get_selected_items(), vec!["a"]);
/// assert_eq!(host.count_label(), ("1件選択".to_string(), true));
///
/// controller.exit_selection_mode();
/// assert!(controller.get_selected_items().is_empty());
/// # let _ = block_on(controller.execute_copy());
/// ```
pub struct SelectionController<H: ItemHost, C: ConfirmPrompt> {
    host: H,
    confirm: C,
    mode: SelectionMode,
    selected: SelectedIds,
    affordances: AffordanceTable<H::Item>,
    callbacks: SelectionCallbacks,
    id_extractor: IdExtractor<H>,
    labels: Labels,
    root_class: String,
}

impl<H: ItemHost, C: ConfirmPrompt> SelectionController<H, C> {
    /// Create a controller and put the host chrome into its initial state.
    ///
    /// The trigger container starts hidden; call [`Self::show`] to reveal it.
    pub fn new(host: H, confirm: C, options: SelectionOptions<H>) -> Self {
        let SelectionOptions {
            callbacks,
            id_extractor,
            labels,
            root_class,
        } = options;

        let mut controller = Self {
            host,
            confirm,
            mode: SelectionMode::Browsing,
            selected: SelectedIds::new(),
            affordances: AffordanceTable::new(),
            callbacks,
            id_extractor,
            labels,
            root_class,
        };
        controller.init_chrome();
        controller
    }

    fn init_chrome(&mut self) {
        self.host.set_visible(ChromeElement::TriggerContainer, false);
        self.host.set_visible(ChromeElement::SelectTrigger, true);
        self.host.set_visible(ChromeElement::CancelTrigger, false);
        self.host.set_visible(ChromeElement::ActionGroup, false);
        let label = self.labels.count(0);
        self.host.set_count_label(&label, false);
    }

    /// Current mode
    #[must_use]
    pub const fn mode(&self) -> SelectionMode {
        self.mode
    }

    /// Check if selection mode is active
    #[must_use]
    pub const fn is_selecting(&self) -> bool {
        self.mode.is_selecting()
    }

    /// The host this controller drives
    #[must_use]
    pub const fn host(&self) -> &H {
        &self.host
    }

    /// Mutable access to the host
    pub const fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Text templates in use
    #[must_use]
    pub const fn labels(&self) -> &Labels {
        &self.labels
    }

    /// Number of selected items
    #[must_use]
    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    /// Check if the item with `id` is selected
    #[must_use]
    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    /// Currently enabled actions
    #[must_use]
    pub fn action_availability(&self) -> ActionAvailability {
        ActionAvailability::for_count(self.selected.len())
    }

    /// Identifier of a host item, as the controller sees it
    #[must_use]
    pub fn item_id(&self, item: &H::Item) -> String {
        self.id_extractor.extract(&self.host, item)
    }

    /// Enter selection mode.
    ///
    /// Scans the host for selectable items and attaches one checkbox to
    /// each. Calling it while already selecting changes nothing.
    pub fn enter_selection_mode(&mut self) {
        if self.mode.is_selecting() {
            trace!("enter_selection_mode ignored: already selecting");
            return;
        }

        self.mode = SelectionMode::Selecting;
        self.host.set_root_class(&self.root_class, true);
        self.host.set_visible(ChromeElement::SelectTrigger, false);
        self.host.set_visible(ChromeElement::CancelTrigger, true);
        self.host.set_visible(ChromeElement::ActionGroup, true);

        self.attach_affordances();
        self.selected.clear();
        self.update_selection_count();
        self.update_action_buttons();

        debug!(
            "entered selection mode with {} checkbox(es)",
            self.affordances.checkbox_count()
        );
    }

    /// Leave selection mode.
    ///
    /// Always succeeds. Clears the selection, removes every checkbox and
    /// selected state, restores the triggers and runs `on_cancel`.
    pub fn exit_selection_mode(&mut self) {
        let previous = self.mode;
        self.mode = SelectionMode::Browsing;
        self.selected.clear();

        self.host.set_root_class(&self.root_class, false);
        self.host.set_visible(ChromeElement::SelectTrigger, true);
        self.host.set_visible(ChromeElement::CancelTrigger, false);
        self.host.set_visible(ChromeElement::ActionGroup, false);

        self.remove_affordances();
        let label = self.labels.count(0);
        self.host.set_count_label(&label, false);

        self.callbacks.cancel();
        debug!("left selection mode (was {})", previous.as_str());
    }

    /// Same as [`Self::exit_selection_mode`]
    pub fn reset(&mut self) {
        self.exit_selection_mode();
    }

    /// Reveal the entry-point trigger container
    pub fn show(&mut self) {
        self.host.set_visible(ChromeElement::TriggerContainer, true);
    }

    /// Hide the entry-point trigger container and leave selection mode
    pub fn hide(&mut self) {
        self.host.set_visible(ChromeElement::TriggerContainer, false);
        self.exit_selection_mode();
    }

    /// Selected identifiers (sorted)
    #[must_use]
    pub fn get_selected_items(&self) -> Vec<String> {
        self.selected.to_vec()
    }

    /// Re-run the attach step for items added since the last scan.
    ///
    /// Binds click listeners to new items; while selecting it also gives
    /// them checkboxes. Items already known are left alone.
    pub fn refresh_items(&mut self) {
        self.attach_affordances();
    }

    /// Flip the selection state of an item.
    ///
    /// Ignored outside selection mode and for items without a checkbox.
    pub fn toggle_item_selection(&mut self, item: &H::Item) {
        if !self.mode.is_selecting() {
            trace!("toggle ignored: not in selection mode");
            return;
        }

        let Some(checkbox) = self.affordances.checkbox(item) else {
            trace!("toggle ignored: item has no checkbox");
            return;
        };
        let Some(id) = self.affordances.get(item).map(|entry| entry.id.clone()) else {
            return;
        };

        let selected = self.selected.toggle(&id);
        self.host.set_checkbox_checked(checkbox, selected);
        self.host.set_item_selected(item, selected);
        trace!("item {id:?} selected={selected}");

        self.update_selection_count();
        self.update_action_buttons();
    }

    /// Route a click on an item.
    ///
    /// While selecting the click toggles the item; while browsing it asks
    /// the edit handler to open the item.
    ///
    /// # Errors
    ///
    /// Returns the edit handler's error unchanged.
    pub async fn handle_item_click(&mut self, item: &H::Item) -> Result<ClickOutcome, HandlerError> {
        let Some(id) = self.affordances.get(item).map(|entry| entry.id.clone()) else {
            return Ok(ClickOutcome::Unbound);
        };

        match self.mode {
            SelectionMode::Selecting => {
                self.toggle_item_selection(item);
                Ok(ClickOutcome::Toggled)
            }
            SelectionMode::Browsing => match self.callbacks.edit(id.clone()) {
                Some(edit) => {
                    edit.await?;
                    Ok(ClickOutcome::Edited(id))
                }
                None => Ok(ClickOutcome::Ignored),
            },
        }
    }

    /// React to a key press given as a normalized name (`"esc"`, `"ctrl-t"`).
    ///
    /// Escape leaves selection mode. Returns `true` if the key was consumed.
    pub fn handle_key(&mut self, key: &str) -> bool {
        let is_escape = key.eq_ignore_ascii_case("esc") || key.eq_ignore_ascii_case("escape");
        if is_escape && self.mode.is_selecting() {
            self.exit_selection_mode();
            true
        } else {
            false
        }
    }

    /// Run the copy handler on the selected items.
    ///
    /// # Errors
    ///
    /// Returns the copy handler's error unchanged.
    pub async fn execute_copy(&self) -> Result<ActionOutcome, HandlerError> {
        if self.selected.is_empty() {
            return Ok(ActionOutcome::Skipped(SkipReason::EmptySelection));
        }

        let Some(copy) = self.callbacks.copy(self.selected.to_vec()) else {
            return Ok(ActionOutcome::Skipped(SkipReason::NoHandler));
        };

        debug!("copy requested for {} item(s)", self.selected.len());
        copy.await?;
        Ok(ActionOutcome::Dispatched)
    }

    /// Ask for confirmation, then run the delete handler.
    ///
    /// # Errors
    ///
    /// Returns the delete handler's error unchanged.
    pub async fn execute_delete(&self) -> Result<ActionOutcome, HandlerError> {
        if self.selected.is_empty() {
            return Ok(ActionOutcome::Skipped(SkipReason::EmptySelection));
        }

        let message = self.labels.delete_confirm(self.selected.len());
        if !self.confirm.confirm(&message).await {
            debug!("delete declined");
            return Ok(ActionOutcome::Declined);
        }

        let Some(delete) = self.callbacks.delete(self.selected.to_vec()) else {
            warn!("delete confirmed but no delete handler is configured");
            return Ok(ActionOutcome::Skipped(SkipReason::NoHandler));
        };

        debug!("delete requested for {} item(s)", self.selected.len());
        delete.await?;
        Ok(ActionOutcome::Dispatched)
    }

    /// Run the edit handler when exactly one item is selected.
    ///
    /// # Errors
    ///
    /// Returns the edit handler's error unchanged.
    pub async fn execute_edit(&self) -> Result<ActionOutcome, HandlerError> {
        let Some(id) = self.selected.single() else {
            return Ok(ActionOutcome::Skipped(SkipReason::NotSingleSelection));
        };

        let Some(edit) = self.callbacks.edit(id.to_string()) else {
            return Ok(ActionOutcome::Skipped(SkipReason::NoHandler));
        };

        debug!("edit requested for {id:?}");
        edit.await?;
        Ok(ActionOutcome::Dispatched)
    }

    /// Run any action by kind
    ///
    /// # Errors
    ///
    /// Returns the handler's error unchanged.
    pub async fn execute(&self, action: SelectionAction) -> Result<ActionOutcome, HandlerError> {
        match action {
            SelectionAction::Edit => self.execute_edit().await,
            SelectionAction::Copy => self.execute_copy().await,
            SelectionAction::Delete => self.execute_delete().await,
        }
    }

    fn attach_affordances(&mut self) {
        let selecting = self.mode.is_selecting();

        let scanned: Vec<(H::Item, String)> = self
            .host
            .selectable_items()
            .into_iter()
            .map(|item| {
                let id = self.id_extractor.extract(&self.host, &item);
                (item, id)
            })
            .collect();

        self.prune_affordances(&scanned);

        for (item, id) in scanned {
            if id.is_empty() {
                warn!("skipping selectable item without an identifier");
                continue;
            }

            if !self.affordances.is_bound(&item) {
                if self.affordances.owner(&id).is_some() {
                    warn!("skipping selectable item with duplicate identifier {id:?}");
                    continue;
                }
                let listener = self.host.bind_click(&item);
                self.affordances.bind(item.clone(), id, listener);
            }

            if selecting && self.affordances.checkbox(&item).is_none() {
                let checkbox = self.host.attach_checkbox(&item);
                self.affordances.set_checkbox(&item, checkbox);
            }
        }
    }

    /// Forget items that left the host or changed identifier.
    fn prune_affordances(&mut self, scanned: &[(H::Item, String)]) {
        let dropped = self.affordances.prune(|item, entry| {
            scanned
                .iter()
                .any(|(present, id)| present == item && *id == entry.id)
        });
        if dropped.is_empty() {
            return;
        }

        let mut deselected = false;
        for (item, entry) in &dropped {
            if let Some(checkbox) = entry.checkbox {
                self.host.detach_checkbox(checkbox);
            }
            self.host.set_item_selected(item, false);
            deselected |= self.selected.remove(&entry.id);
        }
        trace!("dropped {} stale affordance(s)", dropped.len());

        if deselected && self.mode.is_selecting() {
            self.update_selection_count();
            self.update_action_buttons();
        }
    }

    fn remove_affordances(&mut self) {
        for (item, checkbox) in self.affordances.take_checkboxes() {
            if let Some(checkbox) = checkbox {
                self.host.detach_checkbox(checkbox);
            }
            self.host.set_item_selected(&item, false);
        }
    }

    fn update_selection_count(&mut self) {
        let count = self.selected.len();
        let label = self.labels.count(count);
        self.host.set_count_label(&label, count > 0);
    }

    fn update_action_buttons(&mut self) {
        let availability = self.action_availability();
        for action in SelectionAction::ALL {
            let state = ButtonState::from_enabled(availability.is_enabled(action));
            self.host.set_button_state(action, state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::{MemoryHost, ScriptedConfirm};
    use futures::executor::block_on;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Log = Rc<RefCell<Vec<String>>>;

    fn recording_callbacks(log: &Log) -> SelectionCallbacks {
        let copy_log = Rc::clone(log);
        let delete_log = Rc::clone(log);
        let edit_log = Rc::clone(log);
        let cancel_log = Rc::clone(log);
        SelectionCallbacks::new()
            .on_copy(move |ids| {
                let log = Rc::clone(&copy_log);
                async move {
                    log.borrow_mut().push(format!("copy:{}", ids.join(",")));
                    Ok(())
                }
            })
            .on_delete(move |ids| {
                let log = Rc::clone(&delete_log);
                async move {
                    log.borrow_mut().push(format!("delete:{}", ids.join(",")));
                    Ok(())
                }
            })
            .on_edit(move |id| {
                let log = Rc::clone(&edit_log);
                async move {
                    log.borrow_mut().push(format!("edit:{id}"));
                    Ok(())
                }
            })
            .on_cancel(move || cancel_log.borrow_mut().push("cancel".to_string()))
    }

    fn setup(confirm: ScriptedConfirm) -> (SelectionController<MemoryHost, ScriptedConfirm>, MemoryHost, Log) {
        let host = MemoryHost::new();
        host.push_record("a", "Rent", true);
        host.push_record("b", "Food", true);
        host.push_record("c", "Travel", true);
        let log: Log = Rc::default();
        let options = SelectionOptions::new(recording_callbacks(&log));
        let controller = SelectionController::new(host.clone(), confirm, options);
        (controller, host, log)
    }

    fn item(host: &MemoryHost, id: &str) -> crate::ui::ElementId {
        host.find_by_id(id).unwrap()
    }

    #[test]
    fn test_initial_chrome() {
        let (controller, host, _) = setup(ScriptedConfirm::accept());
        assert_eq!(controller.mode(), SelectionMode::Browsing);
        assert!(!host.is_visible(ChromeElement::TriggerContainer));
        assert!(host.is_visible(ChromeElement::SelectTrigger));
        assert!(!host.is_visible(ChromeElement::CancelTrigger));
        assert!(!host.is_visible(ChromeElement::ActionGroup));
        assert_eq!(host.total_checkboxes(), 0);
    }

    #[test]
    fn test_enter_attaches_checkboxes_and_chrome() {
        let (mut controller, host, _) = setup(ScriptedConfirm::accept());
        controller.enter_selection_mode();

        assert!(controller.is_selecting());
        assert!(host.root_has_class(DEFAULT_ROOT_CLASS));
        assert!(!host.is_visible(ChromeElement::SelectTrigger));
        assert!(host.is_visible(ChromeElement::CancelTrigger));
        assert!(host.is_visible(ChromeElement::ActionGroup));
        assert_eq!(host.total_checkboxes(), 3);
        assert_eq!(host.count_label(), ("0件選択".to_string(), false));
    }

    #[test]
    fn test_reenter_is_noop() {
        let (mut controller, host, _) = setup(ScriptedConfirm::accept());
        controller.enter_selection_mode();
        controller.toggle_item_selection(&item(&host, "a"));
        controller.enter_selection_mode();

        assert_eq!(controller.get_selected_items(), vec!["a"]);
        assert_eq!(host.total_checkboxes(), 3);
    }

    #[test]
    fn test_exit_clears_everything_and_runs_cancel() {
        let (mut controller, host, log) = setup(ScriptedConfirm::accept());
        controller.enter_selection_mode();
        controller.toggle_item_selection(&item(&host, "a"));
        controller.toggle_item_selection(&item(&host, "b"));
        controller.exit_selection_mode();

        assert!(controller.get_selected_items().is_empty());
        assert_eq!(host.total_checkboxes(), 0);
        assert!(!host.is_item_selected(item(&host, "a")));
        assert!(!host.root_has_class(DEFAULT_ROOT_CLASS));
        assert!(host.is_visible(ChromeElement::SelectTrigger));
        assert!(!host.count_label().1);
        assert_eq!(*log.borrow(), vec!["cancel"]);
    }

    #[test]
    fn test_toggle_ignored_while_browsing() {
        let (mut controller, host, _) = setup(ScriptedConfirm::accept());
        controller.toggle_item_selection(&item(&host, "a"));
        assert_eq!(controller.selected_count(), 0);
    }

    #[test]
    fn test_toggle_updates_item_and_checkbox() {
        let (mut controller, host, _) = setup(ScriptedConfirm::accept());
        controller.enter_selection_mode();
        let a = item(&host, "a");

        controller.toggle_item_selection(&a);
        assert!(host.is_item_selected(a));
        assert!(host.is_checkbox_checked(a));

        controller.toggle_item_selection(&a);
        assert!(!host.is_item_selected(a));
        assert!(!host.is_checkbox_checked(a));
        assert_eq!(controller.selected_count(), 0);
    }

    #[test]
    fn test_button_states_follow_count() {
        let (mut controller, host, _) = setup(ScriptedConfirm::accept());
        controller.enter_selection_mode();
        assert_eq!(host.button_state(SelectionAction::Edit), ButtonState::DISABLED);
        assert_eq!(host.button_state(SelectionAction::Copy), ButtonState::DISABLED);

        controller.toggle_item_selection(&item(&host, "a"));
        for action in SelectionAction::ALL {
            assert_eq!(host.button_state(action), ButtonState::ENABLED);
        }

        controller.toggle_item_selection(&item(&host, "b"));
        assert_eq!(host.button_state(SelectionAction::Edit), ButtonState::DISABLED);
        assert_eq!(host.button_state(SelectionAction::Delete), ButtonState::ENABLED);
    }

    #[test]
    fn test_copy_skips_on_empty_selection() {
        let (controller, _, log) = setup(ScriptedConfirm::accept());
        let outcome = block_on(controller.execute_copy()).unwrap();
        assert_eq!(outcome, ActionOutcome::Skipped(SkipReason::EmptySelection));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_copy_passes_sorted_ids() {
        let (mut controller, host, log) = setup(ScriptedConfirm::accept());
        controller.enter_selection_mode();
        controller.toggle_item_selection(&item(&host, "c"));
        controller.toggle_item_selection(&item(&host, "a"));

        let outcome = block_on(controller.execute_copy()).unwrap();
        assert_eq!(outcome, ActionOutcome::Dispatched);
        assert_eq!(*log.borrow(), vec!["copy:a,c"]);
        assert!(controller.is_selecting());
    }

    #[test]
    fn test_delete_uses_confirm_message() {
        let confirm = ScriptedConfirm::accept();
        let (mut controller, host, log) = setup(confirm.clone());
        controller.enter_selection_mode();
        controller.toggle_item_selection(&item(&host, "a"));
        controller.toggle_item_selection(&item(&host, "b"));

        let outcome = block_on(controller.execute_delete()).unwrap();
        assert_eq!(outcome, ActionOutcome::Dispatched);
        assert_eq!(confirm.prompts(), vec!["選択した2件のデータを削除しますか？"]);
        assert_eq!(*log.borrow(), vec!["delete:a,b"]);
    }

    #[test]
    fn test_delete_without_handler_after_confirm() {
        let host = MemoryHost::new();
        let a = host.push_record("a", "Rent", true);
        let mut controller = SelectionController::new(
            host,
            ScriptedConfirm::accept(),
            SelectionOptions::new(SelectionCallbacks::new()),
        );
        controller.enter_selection_mode();
        controller.toggle_item_selection(&a);

        let outcome = block_on(controller.execute_delete()).unwrap();
        assert_eq!(outcome, ActionOutcome::Skipped(SkipReason::NoHandler));
    }

    #[test]
    fn test_edit_requires_single_selection() {
        let (mut controller, host, log) = setup(ScriptedConfirm::accept());
        controller.enter_selection_mode();
        controller.toggle_item_selection(&item(&host, "a"));
        controller.toggle_item_selection(&item(&host, "b"));

        let outcome = block_on(controller.execute_edit()).unwrap();
        assert_eq!(outcome, ActionOutcome::Skipped(SkipReason::NotSingleSelection));

        controller.toggle_item_selection(&item(&host, "b"));
        let outcome = block_on(controller.execute(SelectionAction::Edit)).unwrap();
        assert_eq!(outcome, ActionOutcome::Dispatched);
        assert_eq!(*log.borrow(), vec!["edit:a"]);
    }

    #[test]
    fn test_handler_error_passes_through() {
        let host = MemoryHost::new();
        let a = host.push_record("a", "Rent", true);
        let callbacks = SelectionCallbacks::new()
            .on_copy(|_ids| async { Err::<(), HandlerError>("backend down".into()) });
        let mut controller =
            SelectionController::new(host, ScriptedConfirm::accept(), SelectionOptions::new(callbacks));
        controller.enter_selection_mode();
        controller.toggle_item_selection(&a);

        let err = block_on(controller.execute_copy()).unwrap_err();
        assert_eq!(err.to_string(), "backend down");
        assert_eq!(controller.selected_count(), 1);
    }

    #[test]
    fn test_click_routing() {
        let (mut controller, host, log) = setup(ScriptedConfirm::accept());
        let a = item(&host, "a");

        let outcome = block_on(controller.handle_item_click(&a)).unwrap();
        assert_eq!(outcome, ClickOutcome::Unbound);

        controller.refresh_items();
        assert_eq!(host.total_checkboxes(), 0);
        let outcome = block_on(controller.handle_item_click(&a)).unwrap();
        assert_eq!(outcome, ClickOutcome::Edited("a".to_string()));

        controller.enter_selection_mode();
        let outcome = block_on(controller.handle_item_click(&a)).unwrap();
        assert_eq!(outcome, ClickOutcome::Toggled);
        assert!(controller.is_selected("a"));
        assert_eq!(*log.borrow(), vec!["edit:a"]);
    }

    #[test]
    fn test_listener_bound_once_across_cycles() {
        let (mut controller, host, _) = setup(ScriptedConfirm::accept());
        for _ in 0..3 {
            controller.enter_selection_mode();
            controller.exit_selection_mode();
        }
        controller.refresh_items();
        assert_eq!(host.listener_count(item(&host, "a")), 1);
    }

    #[test]
    fn test_refresh_attaches_late_items() {
        let (mut controller, host, _) = setup(ScriptedConfirm::accept());
        controller.enter_selection_mode();
        let late = host.push_record("d", "Late", true);
        assert_eq!(host.checkbox_count(late), 0);

        controller.refresh_items();
        assert_eq!(host.checkbox_count(late), 1);
        assert_eq!(host.total_checkboxes(), 4);
    }

    #[test]
    fn test_reinserted_id_binds_new_item() {
        let (mut controller, host, _) = setup(ScriptedConfirm::accept());
        controller.refresh_items();

        let first = host.push_record("a-copy1", "Rent (copy)", true);
        controller.refresh_items();
        assert!(host.is_click_bound(first));

        host.remove(first);
        let second = host.push_record("a-copy1", "Rent (copy)", true);
        assert_ne!(first, second);
        controller.refresh_items();

        assert!(host.is_click_bound(second));
        assert_eq!(host.listener_count(second), 1);
        let outcome = block_on(controller.handle_item_click(&second)).unwrap();
        assert_eq!(outcome, ClickOutcome::Edited("a-copy1".to_string()));
    }

    #[test]
    fn test_removed_selected_item_leaves_selection() {
        let (mut controller, host, _) = setup(ScriptedConfirm::accept());
        controller.enter_selection_mode();
        controller.toggle_item_selection(&item(&host, "a"));
        controller.toggle_item_selection(&item(&host, "b"));

        host.remove(item(&host, "a"));
        controller.refresh_items();

        assert_eq!(controller.get_selected_items(), vec!["b"]);
        assert_eq!(host.count_label(), ("1件選択".to_string(), true));
        assert_eq!(host.total_checkboxes(), 2);
    }

    #[test]
    fn test_duplicate_id_keeps_first_item_only() {
        let host = MemoryHost::new();
        let x1 = host.push_record("x", "First", true);
        let x2 = host.push_record("x", "Second", true);
        let mut controller = SelectionController::new(
            host.clone(),
            ScriptedConfirm::accept(),
            SelectionOptions::default(),
        );

        controller.enter_selection_mode();
        assert_eq!(host.checkbox_count(x1), 1);
        assert_eq!(host.checkbox_count(x2), 0);
        assert!(!host.is_click_bound(x2));

        controller.toggle_item_selection(&x2);
        assert_eq!(controller.selected_count(), 0);

        controller.toggle_item_selection(&x1);
        controller.exit_selection_mode();
        assert!(!host.is_item_selected(x1));
        assert!(!host.is_item_selected(x2));
        assert_eq!(host.total_checkboxes(), 0);
    }

    #[test]
    fn test_duplicate_takes_over_once_owner_is_gone() {
        let host = MemoryHost::new();
        let x1 = host.push_record("x", "First", true);
        let x2 = host.push_record("x", "Second", true);
        let mut controller = SelectionController::new(
            host.clone(),
            ScriptedConfirm::accept(),
            SelectionOptions::default(),
        );
        controller.enter_selection_mode();

        host.remove(x1);
        controller.refresh_items();
        assert_eq!(host.checkbox_count(x2), 1);
        assert!(host.is_click_bound(x2));
    }

    #[test]
    fn test_items_without_id_are_skipped() {
        let host = MemoryHost::new();
        let orphan = host.push_element("no id", [("data-selectable", "true")]);
        let mut controller = SelectionController::new(
            host.clone(),
            ScriptedConfirm::accept(),
            SelectionOptions::default(),
        );
        controller.enter_selection_mode();
        assert_eq!(host.checkbox_count(orphan), 0);
    }

    #[test]
    fn test_escape_only_exits_selection_mode() {
        let (mut controller, _, log) = setup(ScriptedConfirm::accept());
        assert!(!controller.handle_key("esc"));
        assert!(log.borrow().is_empty());

        controller.enter_selection_mode();
        assert!(!controller.handle_key("q"));
        assert!(controller.handle_key("esc"));
        assert!(!controller.is_selecting());
    }

    #[test]
    fn test_show_hide() {
        let (mut controller, host, _) = setup(ScriptedConfirm::accept());
        controller.show();
        assert!(host.is_visible(ChromeElement::TriggerContainer));

        controller.enter_selection_mode();
        controller.hide();
        assert!(!host.is_visible(ChromeElement::TriggerContainer));
        assert!(!controller.is_selecting());
    }

    #[test]
    fn test_custom_id_extractor() {
        let host = MemoryHost::new();
        let item = host.push_element("Rent", [("data-selectable", "true"), ("data-key", "k-1")]);
        let options = SelectionOptions::new(SelectionCallbacks::new())
            .with_id_extractor(IdExtractor::attribute("data-key"))
            .with_root_class("picking");
        let mut controller = SelectionController::new(host.clone(), ScriptedConfirm::accept(), options);

        controller.enter_selection_mode();
        controller.toggle_item_selection(&item);
        assert_eq!(controller.get_selected_items(), vec!["k-1"]);
        assert!(host.root_has_class("picking"));
    }
}
