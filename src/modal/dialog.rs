//! Dialog widget: a centered overlay with a message and OK/Cancel buttons.
//!
//! Keyboard contract: Tab / arrow keys move button focus (wrapping), Enter
//! activates the focused button (or the primary one when nothing is
//! focused), Esc dismisses. Activation and dismissal settle the dialog.

use crate::modal::{DialogTone, Settlement};
use crate::theme::Theme;
use crossterm::event::{Event, KeyCode, KeyEventKind};
use ratatui::prelude::*;
use ratatui::widgets::block::Padding;
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap};
use unicode_width::UnicodeWidthStr;

const MIN_WIDTH: u16 = 30;
const MAX_WIDTH: u16 = 60;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogButton {
    pub label: String,
    pub settlement: Settlement,
    pub primary: bool,
}

impl DialogButton {
    fn display(&self) -> String {
        format!("[ {} ]", self.label)
    }
}

/// Button focus for an open dialog. `None` means nothing is focused yet and
/// Enter falls through to the primary button.
#[derive(Debug, Clone, Default)]
pub struct DialogState {
    pub focused: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct Dialog {
    title: String,
    message: String,
    tone: DialogTone,
    buttons: Vec<DialogButton>,
}

impl Dialog {
    /// A dialog with a single primary OK button.
    pub fn new(
        title: impl Into<String>,
        message: impl Into<String>,
        tone: DialogTone,
    ) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            tone,
            buttons: vec![DialogButton {
                label: "OK".to_string(),
                settlement: Settlement::Accepted,
                primary: true,
            }],
        }
    }

    pub fn ok_label(mut self, label: impl Into<String>) -> Self {
        self.buttons[0].label = label.into();
        self
    }

    /// Append a cancel button settling [`Settlement::Rejected`].
    pub fn with_cancel(mut self, label: impl Into<String>) -> Self {
        self.buttons.push(DialogButton {
            label: label.into(),
            settlement: Settlement::Rejected,
            primary: false,
        });
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn has_cancel(&self) -> bool {
        self.buttons.len() > 1
    }

    /// Handle a terminal event, settling the dialog if a button fires.
    pub fn handle_event(&self, event: &Event, state: &mut DialogState) -> Option<Settlement> {
        let Event::Key(key) = event else { return None };
        if key.kind != KeyEventKind::Press {
            return None;
        }

        match key.code {
            KeyCode::Esc => Some(Settlement::Rejected),
            KeyCode::Enter => {
                let idx = state
                    .focused
                    .or_else(|| self.buttons.iter().position(|b| b.primary))?;
                self.buttons.get(idx).map(|b| b.settlement)
            }
            KeyCode::Tab | KeyCode::Right => {
                state.focused = Some(match state.focused {
                    Some(i) => (i + 1) % self.buttons.len(),
                    None => 0,
                });
                None
            }
            KeyCode::BackTab | KeyCode::Left => {
                state.focused = Some(match state.focused {
                    Some(0) | None => self.buttons.len() - 1,
                    Some(i) => i - 1,
                });
                None
            }
            _ => None,
        }
    }

    fn border_style(&self) -> Style {
        match self.tone {
            DialogTone::Info => Theme::dialog_border_info(),
            DialogTone::Success => Theme::dialog_border_success(),
            DialogTone::Error => Theme::dialog_border_error(),
            DialogTone::Confirm => Theme::dialog_border_confirm(),
        }
    }

    /// Centered dialog rectangle within `area`.
    fn dialog_area(&self, area: Rect) -> Rect {
        let width = (self.message.width() as u16 + 6)
            .clamp(MIN_WIDTH, MAX_WIDTH)
            .min(area.width);
        let inner_width = width.saturating_sub(4).max(1);

        // Wrapped message height plus a spacer and the button row.
        let message_lines: u16 = self
            .message
            .lines()
            .map(|l| ((l.width() as u16).max(1)).div_ceil(inner_width))
            .sum::<u16>()
            .max(1);
        let height = (message_lines + 4).min(area.height);

        let x = area.x + (area.width.saturating_sub(width)) / 2;
        let y = area.y + (area.height.saturating_sub(height)) / 2;
        Rect::new(x, y, width, height)
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, state: &DialogState) {
        if area.width < 4 || area.height < 4 {
            return;
        }
        let dialog = self.dialog_area(area);

        frame.render_widget(Clear, dialog);
        let block = Block::default()
            .title(format!(" {} ", self.title))
            .title_style(Theme::dialog_title())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(self.border_style())
            .padding(Padding::horizontal(1));
        let inner = block.inner(dialog);
        frame.render_widget(block, dialog);

        if inner.height == 0 {
            return;
        }

        // Message on top, buttons on the bottom row.
        let message_area = Rect {
            height: inner.height.saturating_sub(2),
            ..inner
        };
        let paragraph = Paragraph::new(self.message.as_str())
            .style(Theme::dialog_message())
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, message_area);

        if inner.height >= 2 {
            let button_area = Rect {
                y: inner.y + inner.height - 1,
                height: 1,
                ..inner
            };
            self.render_buttons(frame, button_area, state);
        }
    }

    fn render_buttons(&self, frame: &mut Frame, area: Rect, state: &DialogState) {
        let mut spans: Vec<Span> = Vec::new();
        for (i, button) in self.buttons.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw("  "));
            }
            let style = if state.focused == Some(i) {
                Theme::button_focused()
            } else if button.primary {
                Theme::button_primary()
            } else {
                Theme::button()
            };
            spans.push(Span::styled(button.display(), style));
        }
        let line = Line::from(spans).alignment(Alignment::Center);
        frame.render_widget(Paragraph::new(line), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, KeyModifiers};

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn confirm() -> Dialog {
        Dialog::new("tidepool", "Proceed?", DialogTone::Confirm).with_cancel("Cancel")
    }

    #[test]
    fn escape_settles_rejected() {
        let dialog = confirm();
        let mut state = DialogState::default();
        assert_eq!(
            dialog.handle_event(&key(KeyCode::Esc), &mut state),
            Some(Settlement::Rejected)
        );
    }

    #[test]
    fn enter_without_focus_activates_primary() {
        let dialog = confirm();
        let mut state = DialogState::default();
        assert_eq!(
            dialog.handle_event(&key(KeyCode::Enter), &mut state),
            Some(Settlement::Accepted)
        );
    }

    #[test]
    fn tab_cycles_and_wraps() {
        let dialog = confirm();
        let mut state = DialogState::default();
        dialog.handle_event(&key(KeyCode::Tab), &mut state);
        assert_eq!(state.focused, Some(0));
        dialog.handle_event(&key(KeyCode::Tab), &mut state);
        assert_eq!(state.focused, Some(1));
        dialog.handle_event(&key(KeyCode::Tab), &mut state);
        assert_eq!(state.focused, Some(0));
    }

    #[test]
    fn enter_on_cancel_settles_rejected() {
        let dialog = confirm();
        let mut state = DialogState {
            focused: Some(1),
        };
        assert_eq!(
            dialog.handle_event(&key(KeyCode::Enter), &mut state),
            Some(Settlement::Rejected)
        );
    }

    #[test]
    fn other_keys_do_not_settle() {
        let dialog = confirm();
        let mut state = DialogState::default();
        assert_eq!(dialog.handle_event(&key(KeyCode::Char('x')), &mut state), None);
    }

    #[test]
    fn dialog_area_is_centered_and_clamped() {
        let dialog = Dialog::new("t", "short", DialogTone::Info);
        let area = Rect::new(0, 0, 100, 40);
        let rect = dialog.dialog_area(area);
        assert_eq!(rect.width, MIN_WIDTH);
        assert_eq!(rect.x, (100 - MIN_WIDTH) / 2);
        assert!(rect.height >= 5);

        let long = Dialog::new("t", "m".repeat(200), DialogTone::Info);
        assert_eq!(long.dialog_area(area).width, MAX_WIDTH);
    }

    #[test]
    fn render_does_not_panic_in_tiny_area() {
        let dialog = confirm();
        let state = DialogState::default();
        let backend = ratatui::backend::TestBackend::new(10, 3);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                dialog.render(f, area, &state);
            })
            .unwrap();
    }
}
