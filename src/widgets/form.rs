//! Form submit helper.
//!
//! On submit every field is marked submitted (so pending errors become
//! visible) and the id of the first invalid field is returned for the host
//! to focus.

use crate::widgets::text_input::TextInput;
use tracing::debug;

#[derive(Debug, Default)]
pub struct Form {
    submitted: bool,
}

impl Form {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    /// Validate all fields. Returns the id of the first invalid field, or
    /// `None` when the form is good to go.
    pub fn submit(&mut self, fields: &mut [&mut TextInput]) -> Option<String> {
        self.submitted = true;
        let mut first_invalid = None;
        for field in fields.iter_mut() {
            field.set_submitted();
            if field.validate().is_some() && first_invalid.is_none() {
                first_invalid = Some(field.id().to_string());
            }
        }
        if let Some(id) = &first_invalid {
            debug!(%id, "form submit blocked by invalid field");
        }
        first_invalid
    }

    pub fn reset(&mut self, fields: &mut [&mut TextInput]) {
        self.submitted = false;
        for field in fields.iter_mut() {
            field.reset();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submit_returns_first_invalid_field_id() {
        let mut name = TextInput::new().input_id("name").required(true);
        let mut email = TextInput::new().input_id("email").required(true);
        email.set_text("a@b.co");

        let mut form = Form::new();
        let focus = form.submit(&mut [&mut name, &mut email]);
        assert_eq!(focus, Some("name".to_string()));
        // Every field shows its state after submit, not only the first.
        assert_eq!(email.visible_error(), None);
        assert!(name.visible_error().is_some());
    }

    #[test]
    fn valid_form_submits_clean() {
        let mut name = TextInput::new().input_id("name").required(true);
        name.set_text("Ada");
        let mut form = Form::new();
        assert_eq!(form.submit(&mut [&mut name]), None);
        assert!(form.is_submitted());
    }

    #[test]
    fn reset_clears_fields_and_submit_flag() {
        let mut name = TextInput::new().input_id("name").required(true);
        name.set_text("Ada");
        let mut form = Form::new();
        form.submit(&mut [&mut name]);
        form.reset(&mut [&mut name]);
        assert!(!form.is_submitted());
        assert_eq!(name.text(), "");
        assert_eq!(name.visible_error(), None);
    }
}
