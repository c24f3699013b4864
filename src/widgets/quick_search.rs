//! Debounced quick-search box.
//!
//! Edits restart a fixed 250 ms quiet window; once the window elapses on a
//! tick, the value is committed and emitted exactly once, and only if it
//! actually differs from the last committed value.

use crate::theme::Theme;
use crate::widgets::line_edit::LineEdit;
use crossterm::event::KeyEvent;
use ratatui::prelude::*;
use ratatui::widgets::block::Padding;
use ratatui::widgets::{Block, Borders, Paragraph};
use std::time::{Duration, Instant};
use tracing::trace;

/// How long the input has to stay quiet before a change propagates.
pub const QUIET_WINDOW: Duration = Duration::from_millis(250);

#[derive(Debug, Default)]
pub struct QuickSearch {
    edit: LineEdit,
    committed: String,
    deadline: Option<Instant>,
}

impl QuickSearch {
    pub fn new() -> Self {
        Self::default()
    }

    /// The text currently in the box, committed or not.
    pub fn text(&self) -> &str {
        self.edit.text()
    }

    /// The last value that made it through the quiet window.
    pub fn committed(&self) -> &str {
        &self.committed
    }

    /// Whether a change is waiting out the quiet window.
    pub fn pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn handle_key(&mut self, key: &KeyEvent, now: Instant) {
        if self.edit.handle_key(key) {
            self.deadline = Some(now + QUIET_WINDOW);
        }
    }

    /// Drive the debounce from the host's tick. Emits the new value once the
    /// quiet window has elapsed and the text differs from the last commit.
    pub fn on_tick(&mut self, now: Instant) -> Option<String> {
        let due = self.deadline.is_some_and(|d| now >= d);
        if !due {
            return None;
        }
        self.deadline = None;
        if self.edit.text() == self.committed {
            return None;
        }
        self.committed = self.edit.text().to_string();
        trace!(value = %self.committed, "quick-search value committed");
        Some(self.committed.clone())
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, focused: bool) {
        let (border_style, bg) = if focused {
            (Theme::border_focused(), Style::default())
        } else {
            (Theme::border(), Style::default())
        };

        let block = Block::default()
            .title(" Search ")
            .title_style(if focused { Theme::title() } else { Theme::border() })
            .borders(Borders::ALL)
            .border_style(border_style)
            .padding(Padding::horizontal(1))
            .style(bg);

        let inner = block.inner(area);
        frame.render_widget(block, area);

        if self.edit.is_empty() && !focused {
            let placeholder = Paragraph::new("Type to search…").style(Theme::placeholder());
            frame.render_widget(placeholder, inner);
            return;
        }

        let line = Line::from(vec![
            Span::styled("? ", Theme::border_focused()),
            Span::styled(self.edit.text(), Theme::input_text()),
        ]);
        frame.render_widget(Paragraph::new(line), inner);

        if focused {
            // Prompt "? " is two columns wide.
            let cursor_x = inner.x + 2 + self.edit.cursor_column();
            frame.set_cursor_position((cursor_x.min(inner.right().saturating_sub(1)), inner.y));
        }
    }
}
