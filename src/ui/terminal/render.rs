//! Drawing the hosted document
//!
//! The screen has three parts: the selection chrome on top (triggers,
//! action buttons, counter), the item list, and a status area with the
//! latest toast and key hints.

use super::theme::Theme;
use crate::keybinds::{KeyAction, KeybindConfig};
use crate::selection::SelectionAction;
use crate::ui::{ChromeElement, ElementView, MemoryHost, ToastQueue};
use ratatui::{
    Frame,
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Everything needed to draw one frame.
///
/// Shared between the event loop and the confirm dialog so the dialog
/// can redraw the screen behind itself.
#[derive(Debug, Clone)]
pub struct BrowseView {
    /// Document being shown
    pub host: MemoryHost,
    /// Index of the highlighted element
    pub cursor: usize,
    /// Notifications
    pub toasts: ToastQueue,
    /// Key bindings, for button captions and hints
    pub keybinds: KeybindConfig,
    /// Colors
    pub theme: Theme,
    /// Title of the list block
    pub title: String,
}

impl BrowseView {
    /// Create a view with the cursor on the first element
    #[must_use]
    pub fn new(host: MemoryHost, toasts: ToastQueue, keybinds: KeybindConfig) -> Self {
        Self {
            host,
            cursor: 0,
            toasts,
            keybinds,
            theme: Theme::default(),
            title: String::from(" items "),
        }
    }

    /// Set the list title
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = format!(" {} ", title.into());
        self
    }

    /// Element under the cursor
    #[must_use]
    pub fn current(&self) -> Option<ElementView> {
        self.host.snapshot().into_iter().nth(self.cursor)
    }

    /// Move the cursor up one row
    pub const fn cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Move the cursor down one row
    pub fn cursor_down(&mut self) {
        if self.cursor + 1 < self.host.len() {
            self.cursor += 1;
        }
    }

    /// Keep the cursor inside the document after removals
    pub fn clamp_cursor(&mut self) {
        self.cursor = self.cursor.min(self.host.len().saturating_sub(1));
    }

    /// Draw the whole screen
    pub fn draw(&self, frame: &mut Frame) {
        frame.render_widget(self, frame.area());
    }

    fn key_caption(&self, action: KeyAction) -> String {
        self.keybinds
            .primary_key(action)
            .map_or_else(String::new, |key| format!("[{key}] "))
    }

    fn chrome_line(&self) -> Line<'static> {
        let host = &self.host;
        let theme = &self.theme;
        let mut spans = Vec::new();

        if !host.is_visible(ChromeElement::TriggerContainer) {
            return Line::from(Span::styled("selection hidden", theme.dimmed_style()));
        }

        if host.is_visible(ChromeElement::SelectTrigger) {
            spans.push(Span::styled(
                format!("{}select", self.key_caption(KeyAction::EnterSelection)),
                theme.cursor_style(),
            ));
        }
        if host.is_visible(ChromeElement::CancelTrigger) {
            spans.push(Span::styled(
                format!("{}cancel", self.key_caption(KeyAction::Cancel)),
                theme.cursor_style(),
            ));
        }

        if host.is_visible(ChromeElement::ActionGroup) {
            for action in SelectionAction::ALL {
                let key = match action {
                    SelectionAction::Edit => KeyAction::Edit,
                    SelectionAction::Copy => KeyAction::Copy,
                    SelectionAction::Delete => KeyAction::Delete,
                };
                spans.push(Span::raw("  "));
                spans.push(Span::styled(
                    format!("{}{}", self.key_caption(key), action.caption()),
                    theme.button_style(host.button_state(action)),
                ));
            }
        }

        let (count, count_visible) = host.count_label();
        if count_visible {
            spans.push(Span::raw("  "));
            spans.push(Span::styled(count, theme.checked_style()));
        }

        Line::from(spans)
    }

    fn item_line(&self, index: usize, view: &ElementView) -> Line<'static> {
        let theme = &self.theme;
        let mut spans = Vec::new();

        if index == self.cursor {
            spans.push(Span::styled("> ", theme.cursor_style()));
        } else {
            spans.push(Span::raw("  "));
        }

        if view.has_checkbox {
            if view.checked {
                spans.push(Span::styled("[x] ", theme.checked_style()));
            } else {
                spans.push(Span::raw("[ ] "));
            }
        }

        let label_style = if view.selected {
            theme.selected_style()
        } else if view.selectable {
            ratatui::style::Style::default()
        } else {
            theme.dimmed_style()
        };
        spans.push(Span::styled(view.label.clone(), label_style));

        if let Some(id) = &view.record_id {
            spans.push(Span::styled(format!("  #{id}"), theme.dimmed_style()));
        }

        Line::from(spans)
    }

    fn status_line(&self) -> Line<'static> {
        self.toasts.latest().map_or_else(Line::default, |toast| {
            Line::from(Span::styled(
                toast.message,
                self.theme.level_style(toast.level),
            ))
        })
    }

    fn help_line(&self) -> Line<'static> {
        let hints: Vec<String> = self
            .keybinds
            .hints()
            .into_iter()
            .filter(|(_, description)| !description.is_empty())
            .map(|(key, description)| format!("{key}: {description}"))
            .collect();
        Line::from(Span::styled(hints.join(" | "), self.theme.dimmed_style()))
    }
}

impl Widget for &BrowseView {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [chrome_area, list_area, status_area, help_area] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(area);

        let chrome = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border_style());
        let chrome_inner = chrome.inner(chrome_area);
        chrome.render(chrome_area, buf);
        Paragraph::new(self.chrome_line()).render(chrome_inner, buf);

        let list = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border_style())
            .title(self.title.clone());
        let list_inner = list.inner(list_area);
        list.render(list_area, buf);

        let height = usize::from(list_inner.height.max(1));
        let offset = self.cursor.saturating_sub(height - 1);
        let lines: Vec<Line> = self
            .host
            .snapshot()
            .iter()
            .enumerate()
            .skip(offset)
            .take(height)
            .map(|(index, view)| self.item_line(index, view))
            .collect();
        Paragraph::new(lines).render(list_inner, buf);

        Paragraph::new(self.status_line()).render(status_area, buf);
        Paragraph::new(self.help_line()).render(help_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::{ButtonState, ItemHost, OutputWriter};
    use ratatui::{Terminal, backend::TestBackend};

    fn rendered(view: &BrowseView) -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(80, 12)).unwrap();
        terminal.draw(|frame| view.draw(frame)).unwrap();
        let buffer = terminal.backend().buffer();
        (0..buffer.area.height)
            .map(|y| {
                (0..buffer.area.width)
                    .map(|x| buffer[(x, y)].symbol().to_string())
                    .collect()
            })
            .collect()
    }

    fn view_with(records: &[(&str, &str)]) -> BrowseView {
        let host = MemoryHost::new();
        for (id, label) in records {
            host.push_record(id, label, true);
        }
        BrowseView::new(host, ToastQueue::new(), KeybindConfig::default())
    }

    #[test]
    fn test_cursor_stays_in_bounds() {
        let mut view = view_with(&[("a", "Alpha"), ("b", "Beta")]);
        view.cursor_up();
        assert_eq!(view.cursor, 0);
        view.cursor_down();
        view.cursor_down();
        assert_eq!(view.cursor, 1);
        assert_eq!(view.current().unwrap().record_id.as_deref(), Some("b"));

        let b = view.host.find_by_id("b").unwrap();
        view.host.remove(b);
        view.clamp_cursor();
        assert_eq!(view.cursor, 0);
    }

    #[test]
    fn test_renders_items_and_checkboxes() {
        let view = view_with(&[("a", "Alpha"), ("b", "Beta")]);
        let mut host = view.host.clone();
        let a = host.find_by_id("a").unwrap();
        let checkbox = host.attach_checkbox(&a);
        host.set_checkbox_checked(checkbox, true);

        let screen = rendered(&view).join("\n");
        assert!(screen.contains("> [x] Alpha  #a"));
        assert!(screen.contains("Beta  #b"));
    }

    #[test]
    fn test_renders_chrome() {
        let view = view_with(&[("a", "Alpha")]);
        let mut host = view.host.clone();
        host.set_visible(ChromeElement::TriggerContainer, true);
        host.set_visible(ChromeElement::CancelTrigger, true);
        host.set_visible(ChromeElement::ActionGroup, true);
        host.set_button_state(SelectionAction::Edit, ButtonState::DISABLED);

        let screen = rendered(&view).join("\n");
        assert!(screen.contains("[esc] cancel"));
        assert!(screen.contains("[e] edit"));
        assert!(screen.contains("[c] copy"));
        assert!(!screen.contains("[s] select"));
    }

    #[test]
    fn test_renders_latest_toast() {
        let view = view_with(&[("a", "Alpha")]);
        view.toasts.success("done copying");
        let screen = rendered(&view);
        assert!(screen[10].starts_with("done copying"));
    }
}
