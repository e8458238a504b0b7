//! Terminal host
//!
//! Renders a [`MemoryHost`](crate::ui::MemoryHost) document with ratatui
//! and feeds crossterm key events to a [`BrowseSession`].
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │               BrowseSession                 │
//! │   (controller, command channel, toasts)     │
//! └────────────────────┬────────────────────────┘
//!                      │
//!        ┌─────────────┼─────────────┐
//!        ▼             ▼             ▼
//! ┌────────────┐ ┌───────────┐ ┌─────────────────┐
//! │ BrowseView │ │ Crossterm │ │ TerminalConfirm │
//! │ (ratatui)  │ │  (events) │ │ (modal dialog)  │
//! └────────────┘ └───────────┘ └─────────────────┘
//! ```

mod app;
mod confirm;
mod render;
mod theme;

pub use app::{BrowseSession, Flow};
pub use confirm::{ConfirmDialog, TerminalConfirm, answer_for};
pub use render::BrowseView;
pub use theme::Theme;

use crate::ui::Result;
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::cell::RefCell;
use std::io::{self, Stdout};
use std::rc::Rc;

/// The terminal the host draws on
pub type TuiTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Shared handle, used by the event loop and the confirm dialog
pub type TerminalHandle = Rc<RefCell<TuiTerminal>>;

/// Setup terminal for TUI
///
/// # Errors
///
/// Returns `UiError` if raw mode or the alternate screen cannot be entered.
pub fn setup_terminal() -> Result<TerminalHandle> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(Rc::new(RefCell::new(terminal)))
}

/// Cleanup terminal after TUI
///
/// # Errors
///
/// Returns `UiError` if the terminal cannot be restored.
pub fn cleanup_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}
