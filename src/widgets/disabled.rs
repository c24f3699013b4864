//! Disabled-state toggle.
//!
//! Tracks a watched boolean expression. While disabled, the host dims the
//! element's style and swallows activation events instead of acting on them.

use ratatui::style::Style;

use crate::theme::Theme;

#[derive(Debug, Clone, Copy, Default)]
pub struct DisableState {
    disabled: bool,
}

impl DisableState {
    pub fn new(disabled: bool) -> Self {
        Self { disabled }
    }

    /// Feed the watched value. Returns whether the state changed.
    pub fn update(&mut self, disabled: bool) -> bool {
        let changed = self.disabled != disabled;
        self.disabled = disabled;
        changed
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Style to draw the element with.
    pub fn style(&self, base: Style) -> Style {
        if self.disabled {
            base.patch(Theme::disabled())
        } else {
            base
        }
    }

    /// Whether an activation event (click, Enter) should be swallowed.
    pub fn blocks_activation(&self) -> bool {
        self.disabled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::{Color, Modifier};

    #[test]
    fn update_reports_changes() {
        let mut state = DisableState::default();
        assert!(!state.is_disabled());
        assert!(state.update(true));
        assert!(!state.update(true));
        assert!(state.update(false));
    }

    #[test]
    fn disabled_state_blocks_activation_and_dims() {
        let state = DisableState::new(true);
        assert!(state.blocks_activation());
        let styled = state.style(Style::default().fg(Color::White));
        assert!(styled.add_modifier.contains(Modifier::DIM));
    }

    #[test]
    fn enabled_state_leaves_style_alone() {
        let state = DisableState::new(false);
        let base = Style::default().fg(Color::White);
        assert_eq!(state.style(base), base);
        assert!(!state.blocks_activation());
    }
}
