//! Browse session and event loop
//!
//! [`BrowseSession`] owns the controller and turns key actions into
//! controller calls. Handlers only post [`RecordCommand`]s; the session
//! applies them to the document after each action, reports the result
//! as a toast and leaves selection mode.

use super::TerminalHandle;
use super::render::BrowseView;
use crate::config::SelectionUiConfig;
use crate::keybinds::{KeyAction, KeybindConfig, key_to_string};
use crate::records::{Applied, RecordCommand, apply, command_callbacks, command_channel};
use crate::selection::{
    ActionOutcome, ClickOutcome, IdExtractor, Labels, SelectionAction, SelectionController,
    SelectionOptions, SkipReason,
};
use crate::ui::{ChromeElement, ConfirmPrompt, ElementId, MemoryHost, OutputWriter, Result, ToastQueue};
use crossterm::event::{self, Event, KeyEventKind};
use futures::channel::mpsc::UnboundedReceiver;
use futures::executor::block_on;
use log::{debug, info, warn};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

/// Event poll interval; toasts expire between key presses
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Whether the event loop keeps going
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Keep running
    Continue,
    /// Leave the event loop
    Quit,
}

/// A running browse session over one document
pub struct BrowseSession {
    controller: SelectionController<MemoryHost, Box<dyn ConfirmPrompt>>,
    view: Rc<RefCell<BrowseView>>,
    commands: UnboundedReceiver<RecordCommand>,
    keybinds: KeybindConfig,
    labels: Labels,
    toasts: ToastQueue,
    clipboard: Option<arboard::Clipboard>,
}

impl BrowseSession {
    /// Start a session over the document shown by `view`.
    ///
    /// The selection trigger is shown and every item present gets its
    /// click listener, so browsing-mode clicks open items right away.
    pub fn new(
        view: Rc<RefCell<BrowseView>>,
        confirm: Box<dyn ConfirmPrompt>,
        config: &SelectionUiConfig,
    ) -> Self {
        let (host, toasts) = {
            let view = view.borrow();
            (view.host.clone(), view.toasts.clone())
        };

        let (sender, commands) = command_channel();
        let callbacks =
            command_callbacks(&sender).on_cancel(|| debug!("selection mode left"));
        let options = SelectionOptions::new(callbacks)
            .with_labels(config.labels.clone())
            .with_root_class(config.markers.root_class.clone())
            .with_id_extractor(IdExtractor::attribute(config.markers.id_attribute.clone()));

        let mut controller = SelectionController::new(host, confirm, options);
        controller.show();
        controller.refresh_items();

        Self {
            controller,
            view,
            commands,
            keybinds: config.keybinds.clone(),
            labels: config.labels.clone(),
            toasts,
            clipboard: None,
        }
    }

    /// Place copied ids on the system clipboard
    #[must_use]
    pub fn with_clipboard(mut self) -> Self {
        match arboard::Clipboard::new() {
            Ok(clipboard) => self.clipboard = Some(clipboard),
            Err(e) => warn!("clipboard unavailable: {e}"),
        }
        self
    }

    /// The controller driving this session
    #[must_use]
    pub const fn controller(&self) -> &SelectionController<MemoryHost, Box<dyn ConfirmPrompt>> {
        &self.controller
    }

    /// Action bound to a key name
    #[must_use]
    pub fn action_for(&self, key: &str) -> Option<KeyAction> {
        self.keybinds.action_for(key)
    }

    /// Handle a key given by its normalized name.
    ///
    /// The controller sees the key first (Escape leaves selection mode);
    /// anything it does not consume goes through the keybinds.
    pub async fn press(&mut self, key: &str) -> Flow {
        if self.controller.handle_key(key) {
            debug!("{key} handled by the controller");
            return Flow::Continue;
        }

        match self.action_for(key) {
            Some(action) => self.dispatch(action).await,
            None => {
                debug!("unbound key {key}");
                Flow::Continue
            }
        }
    }

    /// Run one action, then apply whatever the handlers requested
    pub async fn dispatch(&mut self, action: KeyAction) -> Flow {
        if action.requires_selection_mode() && !self.controller.is_selecting() {
            debug!("{} ignored outside selection mode", action.name());
            return Flow::Continue;
        }

        match action {
            KeyAction::Quit => return Flow::Quit,
            KeyAction::EnterSelection => self.controller.enter_selection_mode(),
            KeyAction::Cancel => self.controller.exit_selection_mode(),
            KeyAction::ToggleTrigger => {
                if self.controller.host().is_visible(ChromeElement::TriggerContainer) {
                    self.controller.hide();
                } else {
                    self.controller.show();
                }
            }
            KeyAction::CursorUp => self.view.borrow_mut().cursor_up(),
            KeyAction::CursorDown => self.view.borrow_mut().cursor_down(),
            KeyAction::Toggle => {
                if let Some(element) = self.current_element() {
                    self.controller.toggle_item_selection(&element);
                }
            }
            KeyAction::Click => self.click().await,
            KeyAction::Copy => self.execute(SelectionAction::Copy).await,
            KeyAction::Delete => self.execute(SelectionAction::Delete).await,
            KeyAction::Edit => self.execute(SelectionAction::Edit).await,
        }

        self.apply_pending();
        Flow::Continue
    }

    fn current_element(&self) -> Option<ElementId> {
        self.view.borrow().current().map(|view| view.element)
    }

    async fn click(&mut self) {
        let Some(element) = self.current_element() else {
            return;
        };

        match self.controller.handle_item_click(&element).await {
            Ok(ClickOutcome::Unbound) => debug!("click on an item without a listener"),
            Ok(outcome) => debug!("click: {outcome:?}"),
            Err(e) => self.toasts.error(&e.to_string()),
        }
    }

    async fn execute(&mut self, action: SelectionAction) {
        match self.controller.execute(action).await {
            Ok(ActionOutcome::Dispatched) => debug!("{} dispatched", action.caption()),
            Ok(ActionOutcome::Declined) => self.toasts.info("cancelled"),
            Ok(ActionOutcome::Skipped(SkipReason::NotSingleSelection)) => {
                self.toasts.warning("select exactly one item to edit");
            }
            Ok(ActionOutcome::Skipped(reason)) => debug!("{} skipped: {reason:?}", action.caption()),
            Err(e) => self.toasts.error(&e.to_string()),
        }
    }

    /// Apply commands posted by the handlers
    pub fn apply_pending(&mut self) {
        let mut changed = false;

        while let Ok(command) = self.commands.try_recv() {
            let host = self.controller.host().clone();
            match apply(&host, command) {
                Applied::Copied { sources, created } => {
                    info!("copied {sources:?} to {created:?}");
                    self.to_clipboard(&sources);
                    self.toasts.success(&self.labels.copied(created.len()));
                    changed = true;
                }
                Applied::Deleted { removed } => {
                    info!("deleted {removed} record(s)");
                    self.toasts.success(&self.labels.deleted(removed));
                    changed = true;
                }
                Applied::EditRequested { id, label } => {
                    info!("edit requested for {id:?}");
                    let text = label.map_or_else(
                        || self.labels.edit(&id),
                        |label| format!("{} ({label})", self.labels.edit(&id)),
                    );
                    self.toasts.info(&text);
                }
            }
        }

        if changed {
            self.controller.reset();
            self.controller.refresh_items();
            self.view.borrow_mut().clamp_cursor();
        }
    }

    fn to_clipboard(&mut self, ids: &[String]) {
        if let Some(clipboard) = &mut self.clipboard
            && let Err(e) = clipboard.set_text(ids.join("\n"))
        {
            warn!("could not copy ids to the clipboard: {e}");
        }
    }

    /// Drive the session until a quit action
    ///
    /// # Errors
    ///
    /// Returns `UiError` if drawing or reading terminal events fails.
    pub fn run(&mut self, terminal: &TerminalHandle) -> Result<()> {
        loop {
            self.toasts.prune();
            {
                let view = self.view.borrow();
                terminal.borrow_mut().draw(|frame| view.draw(frame))?;
            }

            if !event::poll(POLL_INTERVAL)? {
                continue;
            }

            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }

            let Some(name) = key_to_string(&key) else {
                continue;
            };

            if block_on(self.press(&name)) == Flow::Quit {
                return Ok(());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keybinds::KeybindDef;
    use crate::records::{Record, populate};
    use crate::ui::ScriptedConfirm;

    fn session(confirm: ScriptedConfirm) -> (BrowseSession, MemoryHost) {
        let host = MemoryHost::new();
        populate(
            &host,
            &[
                Record::new("a", "Alpha"),
                Record::new("b", "Beta"),
                Record::new("c", "Gamma"),
            ],
        );
        let view = BrowseView::new(host.clone(), ToastQueue::new(), KeybindConfig::default());
        let session = BrowseSession::new(
            Rc::new(RefCell::new(view)),
            Box::new(confirm),
            &SelectionUiConfig::default(),
        );
        (session, host)
    }

    fn run(session: &mut BrowseSession, actions: &[KeyAction]) {
        for action in actions {
            block_on(session.dispatch(*action));
        }
    }

    fn latest_toast(session: &BrowseSession) -> String {
        session.toasts.latest().map(|t| t.message).unwrap_or_default()
    }

    #[test]
    fn test_session_shows_trigger() {
        let (session, host) = session(ScriptedConfirm::accept());
        assert!(host.is_visible(ChromeElement::TriggerContainer));
        assert!(!session.controller().is_selecting());
    }

    #[test]
    fn test_keys_map_to_actions() {
        let (session, _) = session(ScriptedConfirm::accept());
        assert_eq!(session.action_for("s"), Some(KeyAction::EnterSelection));
        assert_eq!(session.action_for("space"), Some(KeyAction::Toggle));
        assert_eq!(session.action_for("x"), None);
    }

    #[test]
    fn test_selection_actions_need_selection_mode() {
        let (mut session, host) = session(ScriptedConfirm::accept());
        run(&mut session, &[KeyAction::Toggle, KeyAction::Delete]);
        assert_eq!(session.controller().selected_count(), 0);
        assert_eq!(host.len(), 3);
    }

    #[test]
    fn test_copy_adds_records_and_resets() {
        let (mut session, host) = session(ScriptedConfirm::accept());
        run(
            &mut session,
            &[
                KeyAction::EnterSelection,
                KeyAction::Toggle,
                KeyAction::CursorDown,
                KeyAction::Toggle,
                KeyAction::Copy,
            ],
        );

        assert_eq!(host.len(), 5);
        assert!(host.find_by_id("a-copy1").is_some());
        assert!(host.find_by_id("b-copy1").is_some());
        assert_eq!(latest_toast(&session), "2件のデータをコピーしました");
        assert!(!session.controller().is_selecting());
    }

    #[test]
    fn test_copies_are_clickable() {
        let (mut session, host) = session(ScriptedConfirm::accept());
        run(
            &mut session,
            &[KeyAction::EnterSelection, KeyAction::Toggle, KeyAction::Copy],
        );

        let copy = host.find_by_id("a-copy1").unwrap();
        assert!(host.is_click_bound(copy));
    }

    #[test]
    fn test_delete_confirmed() {
        let (mut session, host) = session(ScriptedConfirm::accept());
        run(
            &mut session,
            &[KeyAction::EnterSelection, KeyAction::Toggle, KeyAction::Delete],
        );

        assert!(host.find_by_id("a").is_none());
        assert_eq!(host.len(), 2);
        assert_eq!(latest_toast(&session), "1件のデータを削除しました");
        assert_eq!(host.total_checkboxes(), 0);
    }

    #[test]
    fn test_delete_declined() {
        let confirm = ScriptedConfirm::decline();
        let (mut session, host) = session(confirm.clone());
        run(
            &mut session,
            &[KeyAction::EnterSelection, KeyAction::Toggle, KeyAction::Delete],
        );

        assert_eq!(host.len(), 3);
        assert_eq!(session.controller().get_selected_items(), vec!["a"]);
        assert_eq!(confirm.prompts(), vec!["選択した1件のデータを削除しますか？"]);
        assert_eq!(latest_toast(&session), "cancelled");
    }

    #[test]
    fn test_click_while_browsing_requests_edit() {
        let (mut session, _) = session(ScriptedConfirm::accept());
        run(&mut session, &[KeyAction::CursorDown, KeyAction::Click]);
        assert_eq!(latest_toast(&session), "編集: b (Beta)");
    }

    #[test]
    fn test_edit_needs_single_selection() {
        let (mut session, _) = session(ScriptedConfirm::accept());
        run(
            &mut session,
            &[
                KeyAction::EnterSelection,
                KeyAction::Click,
                KeyAction::CursorDown,
                KeyAction::Click,
                KeyAction::Edit,
            ],
        );
        assert_eq!(latest_toast(&session), "select exactly one item to edit");
        assert!(session.controller().is_selecting());
    }

    #[test]
    fn test_toggle_trigger_hides_and_exits() {
        let (mut session, host) = session(ScriptedConfirm::accept());
        run(&mut session, &[KeyAction::EnterSelection, KeyAction::ToggleTrigger]);
        assert!(!host.is_visible(ChromeElement::TriggerContainer));
        assert!(!session.controller().is_selecting());

        run(&mut session, &[KeyAction::ToggleTrigger]);
        assert!(host.is_visible(ChromeElement::TriggerContainer));
    }

    #[test]
    fn test_escape_leaves_selection_mode() {
        let mut config = SelectionUiConfig::default();
        config
            .keybinds
            .keybinds
            .insert(KeyAction::Cancel.name().to_string(), KeybindDef::Single("x".to_string()));

        let host = MemoryHost::new();
        populate(&host, &[Record::new("a", "Alpha")]);
        let view = BrowseView::new(host.clone(), ToastQueue::new(), config.keybinds.clone());
        let mut session =
            BrowseSession::new(Rc::new(RefCell::new(view)), Box::new(ScriptedConfirm::accept()), &config);

        assert_eq!(block_on(session.press("esc")), Flow::Continue);
        assert!(!session.controller().is_selecting());

        block_on(session.press("s"));
        block_on(session.press("space"));
        assert_eq!(session.controller().selected_count(), 1);

        assert_eq!(block_on(session.press("esc")), Flow::Continue);
        assert!(!session.controller().is_selecting());
        assert_eq!(host.total_checkboxes(), 0);
        assert!(!host.is_item_selected(host.find_by_id("a").unwrap()));
    }

    #[test]
    fn test_press_uses_keybinds() {
        let (mut session, _) = session(ScriptedConfirm::accept());
        block_on(session.press("s"));
        assert!(session.controller().is_selecting());
        assert_eq!(block_on(session.press("zz")), Flow::Continue);
        assert_eq!(block_on(session.press("q")), Flow::Quit);
    }

    #[test]
    fn test_quit() {
        let (mut session, _) = session(ScriptedConfirm::accept());
        assert_eq!(block_on(session.dispatch(KeyAction::Quit)), Flow::Quit);
        assert_eq!(block_on(session.dispatch(KeyAction::CursorDown)), Flow::Continue);
    }
}
