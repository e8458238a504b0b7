//! Multi-item selection mode
//!
//! A [`SelectionController`] toggles a "selection mode" over the selectable
//! items of an [`ItemHost`](crate::ui::ItemHost), tracks which identifiers
//! are selected and dispatches batch actions to caller-supplied handlers.
//!
//! # Workflow
//!
//! ```text
//! Browsing ──enter_selection_mode()──▶ Selecting
//!    ▲                                    │
//!    │        click item → toggle         │
//!    │        copy / delete / edit        │
//!    │        (mode unchanged)            │
//!    └──exit_selection_mode() / Esc / reset() / hide()
//! ```
//!
//! While browsing, a click on a bound item is routed to the edit handler
//! instead of toggling it.
//!
//! # Action availability
//!
//! | Selected | Edit | Copy | Delete |
//! |----------|------|------|--------|
//! | 0        | off  | off  | off    |
//! | 1        | on   | on   | on     |
//! | 2+       | off  | on   | on     |

mod actions;
mod affordance;
mod callbacks;
mod controller;
mod labels;
mod mode;
mod state;

pub use actions::{ActionAvailability, ActionOutcome, ClickOutcome, SelectionAction, SkipReason};
pub use affordance::{Affordance, AffordanceTable};
pub use callbacks::{DEFAULT_ID_ATTRIBUTE, HandlerError, HandlerResult, IdExtractor, SelectionCallbacks};
pub use controller::{DEFAULT_ROOT_CLASS, SelectionController, SelectionOptions};
pub use labels::Labels;
pub use mode::SelectionMode;
pub use state::SelectedIds;
