//! Host abstraction layer
//!
//! The selection controller never talks to a concrete UI. It drives an
//! [`ItemHost`], asks questions through a [`ConfirmPrompt`], and hosts
//! report results through an [`OutputWriter`].
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          SelectionController            │
//! │   (mode, selected ids, affordances)     │
//! └────────────────────┬────────────────────┘
//!                      │ uses traits
//!                      ▼
//! ┌─────────────────────────────────────────┐
//! │ ItemHost · ConfirmPrompt · OutputWriter │
//! └────────────────────┬────────────────────┘
//!                      │ implemented by
//!             ┌────────┴─────────┐
//!             ▼                  ▼
//! ┌──────────────────┐  ┌───────────────────┐
//! │ MemoryHost       │  │ terminal          │
//! │ ScriptedConfirm  │  │ - TerminalConfirm │
//! │ DialoguerConfirm │  │ - ToastQueue      │
//! └──────────────────┘  └───────────────────┘
//! ```
//!
//! # Implementing a host
//!
//! ```no_run
//! use selection_ui::selection::SelectionAction;
//! use selection_ui::ui::{ButtonState, CheckboxHandle, ChromeElement, ItemHost, ListenerToken};
//!
//! struct Widgets;
//!
//! impl ItemHost for Widgets {
//!     type Item = usize;
//!
//!     fn selectable_items(&self) -> Vec<usize> { vec![0, 1, 2] }
//!     fn attribute(&self, item: &usize, _name: &str) -> Option<String> { Some(item.to_string()) }
//!     fn attach_checkbox(&mut self, item: &usize) -> CheckboxHandle { CheckboxHandle(*item as u64) }
//!     fn detach_checkbox(&mut self, _checkbox: CheckboxHandle) {}
//!     fn bind_click(&mut self, item: &usize) -> ListenerToken { ListenerToken(*item as u64) }
//!     fn set_item_selected(&mut self, _item: &usize, _selected: bool) {}
//!     fn set_checkbox_checked(&mut self, _checkbox: CheckboxHandle, _checked: bool) {}
//!     fn set_root_class(&mut self, _class: &str, _enabled: bool) {}
//!     fn set_visible(&mut self, _element: ChromeElement, _visible: bool) {}
//!     fn set_button_state(&mut self, _action: SelectionAction, _state: ButtonState) {}
//!     fn set_count_label(&mut self, _text: &str, _visible: bool) {}
//! }
//! ```

mod error;
mod memory;
mod traits;
mod types;

pub mod input;
pub mod output;
pub mod terminal;

pub use error::{Result, UiError};
pub use input::{ConfirmPrompt, DialoguerConfirm, InputError, ScriptedConfirm};
pub use memory::{CHECKED_CLASS, ElementId, ElementView, MemoryHost, SELECTED_CLASS};
pub use output::{MessageLevel, OutputWriter, StdoutWriter, Toast, ToastQueue};
pub use traits::ItemHost;
pub use types::{ButtonState, CheckboxHandle, ChromeElement, ListenerToken};
