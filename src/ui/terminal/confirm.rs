//! In-TUI confirmation dialog
//!
//! A modal drawn over the current screen. `Y`/`Enter` confirms, `N`/`Esc`
//! cancels; nothing else is accepted while it is open.

use super::render::BrowseView;
use super::theme::Theme;
use super::TerminalHandle;
use crate::ui::ConfirmPrompt;
use async_trait::async_trait;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use log::{debug, warn};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};
use std::cell::RefCell;
use std::io;
use std::rc::Rc;

/// Confirmation dialog overlay widget
pub struct ConfirmDialog<'a> {
    title: &'a str,
    message: &'a str,
    theme: &'a Theme,
}

impl<'a> ConfirmDialog<'a> {
    /// Create a new confirmation dialog widget
    #[must_use]
    pub const fn new(title: &'a str, message: &'a str, theme: &'a Theme) -> Self {
        Self {
            title,
            message,
            theme,
        }
    }

    fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
        let x = area.x + (area.width.saturating_sub(width)) / 2;
        let y = area.y + (area.height.saturating_sub(height)) / 2;
        Rect::new(x, y, width.min(area.width), height.min(area.height))
    }
}

impl Widget for ConfirmDialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let message_width = u16::try_from(Line::from(self.message).width())
            .unwrap_or(u16::MAX)
            .saturating_add(4);
        let width = message_width
            .clamp(40, 70)
            .min(area.width.saturating_sub(4));
        let modal_area = Self::centered_rect(width, 7, area);

        Clear.render(modal_area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.warning_border_style())
            .title(format!(" {} ", self.title))
            .title_alignment(Alignment::Center);

        let inner = block.inner(modal_area);
        block.render(modal_area, buf);

        let [_, message_area, _, buttons_area, help_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(inner);

        Paragraph::new(self.message)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::White))
            .render(message_area, buf);

        let buttons = Line::from(vec![
            Span::styled(
                " [Y] Yes ",
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Red)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled(
                " [N] No ",
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
        ]);
        Paragraph::new(buttons)
            .alignment(Alignment::Center)
            .render(buttons_area, buf);

        Paragraph::new("Y/Enter: confirm | N/ESC: cancel")
            .style(self.theme.dimmed_style())
            .alignment(Alignment::Center)
            .render(help_area, buf);
    }
}

/// Answer for a key pressed while the dialog is open
///
/// `None` means the key is ignored and the dialog stays open.
#[must_use]
pub const fn answer_for(code: KeyCode, modifiers: KeyModifiers) -> Option<bool> {
    match code {
        KeyCode::Char('y' | 'Y') | KeyCode::Enter => Some(true),
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Some(false),
        KeyCode::Char('n' | 'N') | KeyCode::Esc => Some(false),
        _ => None,
    }
}

/// Confirmation shown as a modal inside the running TUI
pub struct TerminalConfirm {
    terminal: TerminalHandle,
    view: Rc<RefCell<BrowseView>>,
    title: String,
}

impl TerminalConfirm {
    /// Create a dialog drawing over `view` on `terminal`
    #[must_use]
    pub fn new(terminal: TerminalHandle, view: Rc<RefCell<BrowseView>>) -> Self {
        Self {
            terminal,
            view,
            title: String::from("Confirm"),
        }
    }

    /// Set the dialog title
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    fn ask(&self, message: &str) -> io::Result<bool> {
        loop {
            {
                let view = self.view.borrow();
                self.terminal.borrow_mut().draw(|frame| {
                    view.draw(frame);
                    frame.render_widget(
                        ConfirmDialog::new(&self.title, message, &view.theme),
                        frame.area(),
                    );
                })?;
            }

            if let Event::Key(key) = event::read()?
                && key.kind == KeyEventKind::Press
                && let Some(answer) = answer_for(key.code, key.modifiers)
            {
                return Ok(answer);
            }
        }
    }
}

#[async_trait(?Send)]
impl ConfirmPrompt for TerminalConfirm {
    async fn confirm(&self, message: &str) -> bool {
        match self.ask(message) {
            Ok(answer) => {
                debug!("confirm dialog answered {answer}");
                answer
            }
            Err(e) => {
                warn!("confirm dialog failed: {e}");
                false
            }
        }
    }
}
