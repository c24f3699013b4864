//! Validated text input.
//!
//! A labelled single-line input with required/readonly/disabled states, an
//! optional custom validator, and per-error-kind message overrides. Errors
//! only surface once the field is dirty or its form was submitted, so
//! pristine forms render without red ink.

use crate::theme::Theme;
use crate::widgets::line_edit::LineEdit;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rand::RngExt;
use ratatui::prelude::*;
use ratatui::widgets::block::Padding;
use ratatui::widgets::{Block, Borders, Paragraph};

pub const DEFAULT_MAX_LEN: usize = 256;
pub const REQUIRED_MESSAGE: &str = "This field should not be empty";
pub const EMAIL_MESSAGE: &str = "The email you entered is invalid";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputKind {
    #[default]
    Text,
    Email,
    Password,
}

/// Error-message overrides. Precedence per error kind: the kind-specific
/// override, then `any`, then the built-in default.
#[derive(Debug, Clone, Default)]
pub struct ErrorMessages {
    pub any: Option<String>,
    pub required: Option<String>,
    pub email: Option<String>,
}

/// Which validation mark the field currently earns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mark {
    Ok,
    Error,
}

pub type Validator = Box<dyn FnMut(&str) -> Option<String>>;

pub struct TextInput {
    label: Option<String>,
    placeholder: Option<String>,
    input_id: String,
    kind: InputKind,
    max_len: usize,
    required: bool,
    readonly: bool,
    disabled: bool,
    validator: Option<Validator>,
    messages: ErrorMessages,
    edit: LineEdit,
    dirty: bool,
    submitted: bool,
}

fn generate_input_id() -> String {
    let mut rng = rand::rng();
    format!("ti-{}", rng.random_range(0..10_000_000_000u64))
}

impl Default for TextInput {
    fn default() -> Self {
        Self::new()
    }
}

impl TextInput {
    pub fn new() -> Self {
        Self {
            label: None,
            placeholder: None,
            input_id: generate_input_id(),
            kind: InputKind::Text,
            max_len: DEFAULT_MAX_LEN,
            required: false,
            readonly: false,
            disabled: false,
            validator: None,
            messages: ErrorMessages::default(),
            edit: LineEdit::new(),
            dirty: false,
            submitted: false,
        }
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn input_id(mut self, id: impl Into<String>) -> Self {
        self.input_id = id.into();
        self
    }

    pub fn kind(mut self, kind: InputKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn max_len(mut self, max_len: usize) -> Self {
        self.max_len = max_len;
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn readonly(mut self, readonly: bool) -> Self {
        self.readonly = readonly;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Custom validator; a returned message marks the field invalid.
    pub fn validator(mut self, validator: Validator) -> Self {
        self.validator = Some(validator);
        self
    }

    pub fn messages(mut self, messages: ErrorMessages) -> Self {
        self.messages = messages;
        self
    }

    pub fn id(&self) -> &str {
        &self.input_id
    }

    pub fn text(&self) -> &str {
        self.edit.text()
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.edit.set_text(text);
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    /// Mark the field as part of a submitted form; errors become visible.
    pub fn set_submitted(&mut self) {
        self.submitted = true;
    }

    pub fn reset(&mut self) {
        self.edit.clear();
        self.dirty = false;
        self.submitted = false;
    }

    pub fn handle_key(&mut self, key: &KeyEvent) -> bool {
        if self.readonly || self.disabled {
            return false;
        }
        // Enforce max_len on plain insertions; edits and deletions pass.
        if let KeyCode::Char(_) = key.code {
            if !key.modifiers.contains(KeyModifiers::CONTROL)
                && self.edit.text().chars().count() >= self.max_len
            {
                return false;
            }
        }
        let changed = self.edit.handle_key(key);
        if changed {
            self.dirty = true;
        }
        changed
    }

    /// Compute the current validation error, if any. Order: required, then
    /// the input-kind check, then the custom validator.
    pub fn validate(&mut self) -> Option<String> {
        let text = self.edit.text().to_string();
        if self.required && text.trim().is_empty() {
            return Some(
                self.messages
                    .required
                    .clone()
                    .or_else(|| self.messages.any.clone())
                    .unwrap_or_else(|| REQUIRED_MESSAGE.to_string()),
            );
        }
        if self.kind == InputKind::Email && !text.is_empty() && !valid_email(&text) {
            return Some(
                self.messages
                    .email
                    .clone()
                    .or_else(|| self.messages.any.clone())
                    .unwrap_or_else(|| EMAIL_MESSAGE.to_string()),
            );
        }
        if let Some(validator) = &mut self.validator {
            if let Some(message) = validator(&text) {
                return Some(message);
            }
        }
        None
    }

    pub fn is_valid(&mut self) -> bool {
        self.validate().is_none()
    }

    /// The error to show, gated on dirty/submitted state.
    pub fn visible_error(&mut self) -> Option<String> {
        if self.dirty || self.submitted {
            self.validate()
        } else {
            None
        }
    }

    /// Ok/error mark, gated the same way as [`Self::visible_error`].
    pub fn mark(&mut self) -> Option<Mark> {
        if !(self.dirty || self.submitted) {
            return None;
        }
        if self.validate().is_some() {
            Some(Mark::Error)
        } else {
            Some(Mark::Ok)
        }
    }

    fn display_text(&self) -> String {
        match self.kind {
            InputKind::Password => "•".repeat(self.edit.text().chars().count()),
            _ => self.edit.text().to_string(),
        }
    }

    /// Render label, boxed value and error line into `area` (label row,
    /// three input rows, error row).
    pub fn render(&mut self, frame: &mut Frame, area: Rect, focused: bool) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Length(1),
            ])
            .split(area);

        if let Some(label) = &self.label {
            let mut spans = vec![Span::styled(
                label.clone(),
                if self.disabled {
                    Theme::disabled()
                } else if self.required {
                    Theme::required_label()
                } else {
                    Theme::label()
                },
            )];
            if self.required {
                spans.push(Span::styled(" *", Theme::error_text()));
            }
            match self.mark() {
                Some(Mark::Ok) => spans.push(Span::styled(" ✓", Theme::ok_mark())),
                Some(Mark::Error) => spans.push(Span::styled(" ✗", Theme::error_mark())),
                None => {}
            }
            frame.render_widget(Paragraph::new(Line::from(spans)), rows[0]);
        }

        let border_style = if self.disabled {
            Theme::disabled()
        } else if focused {
            Theme::border_focused()
        } else {
            Theme::border()
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .padding(Padding::horizontal(1));
        let inner = block.inner(rows[1]);
        frame.render_widget(block, rows[1]);

        if self.edit.is_empty() {
            if let Some(placeholder) = &self.placeholder {
                frame.render_widget(
                    Paragraph::new(placeholder.as_str()).style(Theme::placeholder()),
                    inner,
                );
            }
        } else {
            let style = if self.disabled {
                Theme::disabled()
            } else {
                Theme::input_text()
            };
            frame.render_widget(Paragraph::new(self.display_text()).style(style), inner);
        }

        if focused && !self.readonly && !self.disabled {
            let cursor_x = inner.x + self.edit.cursor_column();
            frame.set_cursor_position((cursor_x.min(inner.right().saturating_sub(1)), inner.y));
        }

        if let Some(error) = self.visible_error() {
            frame.render_widget(
                Paragraph::new(error).style(Theme::error_text()),
                rows[2],
            );
        }
    }
}

fn valid_email(text: &str) -> bool {
    let Some((local, domain)) = text.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !text.contains(char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
    }

    #[test]
    fn required_field_uses_default_message() {
        let mut input = TextInput::new().required(true);
        assert_eq!(input.validate(), Some(REQUIRED_MESSAGE.to_string()));
    }

    #[test]
    fn required_message_override_wins() {
        let mut input = TextInput::new().required(true).messages(ErrorMessages {
            required: Some("Name is mandatory".into()),
            ..Default::default()
        });
        assert_eq!(input.validate(), Some("Name is mandatory".to_string()));

        let mut catch_all = TextInput::new().required(true).messages(ErrorMessages {
            any: Some("Fix this field".into()),
            ..Default::default()
        });
        assert_eq!(catch_all.validate(), Some("Fix this field".to_string()));
    }

    #[test]
    fn email_kind_validates_shape() {
        let mut input = TextInput::new().kind(InputKind::Email);
        input.set_text("not-an-email");
        assert_eq!(input.validate(), Some(EMAIL_MESSAGE.to_string()));
        input.set_text("user@example.com");
        assert_eq!(input.validate(), None);
        // Empty non-required email is fine.
        input.set_text("");
        assert_eq!(input.validate(), None);
    }

    #[test]
    fn custom_validator_message_is_used_directly() {
        let mut input = TextInput::new().validator(Box::new(|text| {
            (!text.starts_with("td-")).then(|| "Must start with td-".to_string())
        }));
        input.set_text("nope");
        assert_eq!(input.validate(), Some("Must start with td-".to_string()));
        input.set_text("td-ok");
        assert_eq!(input.validate(), None);
    }

    #[test]
    fn required_check_runs_before_custom_validator() {
        let mut input = TextInput::new()
            .required(true)
            .validator(Box::new(|_| Some("custom".to_string())));
        assert_eq!(input.validate(), Some(REQUIRED_MESSAGE.to_string()));
    }

    #[test]
    fn errors_stay_hidden_until_dirty_or_submitted() {
        let mut input = TextInput::new().required(true);
        assert_eq!(input.visible_error(), None);
        assert_eq!(input.mark(), None);

        input.handle_key(&press('x'));
        input.handle_key(&KeyEvent::new(KeyCode::Backspace, KeyModifiers::NONE));
        assert_eq!(input.visible_error(), Some(REQUIRED_MESSAGE.to_string()));
        assert_eq!(input.mark(), Some(Mark::Error));

        let mut pristine = TextInput::new().required(true);
        pristine.set_submitted();
        assert_eq!(pristine.visible_error(), Some(REQUIRED_MESSAGE.to_string()));
    }

    #[test]
    fn valid_dirty_field_earns_ok_mark() {
        let mut input = TextInput::new().required(true);
        input.handle_key(&press('a'));
        assert_eq!(input.mark(), Some(Mark::Ok));
    }

    #[test]
    fn max_len_blocks_further_insertions() {
        let mut input = TextInput::new().max_len(3);
        for c in "abcd".chars() {
            input.handle_key(&press(c));
        }
        assert_eq!(input.text(), "abc");
        // Deletion still works at the limit.
        assert!(input.handle_key(&KeyEvent::new(KeyCode::Backspace, KeyModifiers::NONE)));
    }

    #[test]
    fn readonly_and_disabled_ignore_keys() {
        let mut readonly = TextInput::new().readonly(true);
        assert!(!readonly.handle_key(&press('a')));
        assert_eq!(readonly.text(), "");

        let mut disabled = TextInput::new().disabled(true);
        assert!(!disabled.handle_key(&press('a')));
        assert!(!disabled.is_dirty());
    }

    #[test]
    fn generated_input_ids_have_prefix() {
        let input = TextInput::new();
        assert!(input.id().starts_with("ti-"));
        let named = TextInput::new().input_id("login-name");
        assert_eq!(named.id(), "login-name");
    }

    #[test]
    fn email_shape_edge_cases() {
        assert!(valid_email("a@b.co"));
        assert!(!valid_email("@b.co"));
        assert!(!valid_email("a@"));
        assert!(!valid_email("a@b"));
        assert!(!valid_email("a b@c.d"));
        assert!(!valid_email("a@.com"));
    }
}
