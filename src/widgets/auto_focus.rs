//! Delay-then-focus behavior.
//!
//! Armed once when its host view mounts; after the delay elapses it fires a
//! single [`FocusRequest`] and never again. Hosts drive it from their tick
//! event and move focus (optionally selecting the text) when it fires.

use std::time::{Duration, Instant};
use tracing::trace;

pub const DEFAULT_FOCUS_DELAY: Duration = Duration::from_millis(10);

/// What the host should do when the behavior fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusRequest {
    pub select_all: bool,
}

#[derive(Debug, Clone)]
pub struct AutoFocus {
    delay: Duration,
    select_all: bool,
    due: Option<Instant>,
    fired: bool,
}

impl Default for AutoFocus {
    fn default() -> Self {
        Self::new()
    }
}

impl AutoFocus {
    pub fn new() -> Self {
        Self {
            delay: DEFAULT_FOCUS_DELAY,
            select_all: false,
            due: None,
            fired: false,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Also ask the host to select the focused element's text.
    pub fn select_text(mut self) -> Self {
        self.select_all = true;
        self
    }

    /// Whether an attribute-style toggle enables the behavior. The disabling
    /// tokens are `0`, `false`, `off`, `no` and their shorthands `f`/`n`
    /// (case-insensitive); everything else, including empty, enables.
    pub fn enabled_attr(value: &str) -> bool {
        !matches!(
            value.trim().to_ascii_lowercase().as_str(),
            "0" | "false" | "off" | "no" | "f" | "n"
        )
    }

    /// Start the countdown. Arming again while counting or after the
    /// behavior fired is a no-op.
    pub fn arm(&mut self, now: Instant) {
        if !self.fired && self.due.is_none() {
            self.due = Some(now + self.delay);
        }
    }

    pub fn has_fired(&self) -> bool {
        self.fired
    }

    /// Drive from the host tick; yields the focus request exactly once.
    pub fn on_tick(&mut self, now: Instant) -> Option<FocusRequest> {
        let due = self.due.is_some_and(|d| now >= d);
        if !due {
            return None;
        }
        self.due = None;
        self.fired = true;
        trace!("auto-focus firing");
        Some(FocusRequest {
            select_all: self.select_all,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_once_after_delay() {
        let start = Instant::now();
        let mut focus = AutoFocus::new().with_delay(Duration::from_millis(100));
        focus.arm(start);

        assert_eq!(focus.on_tick(start + Duration::from_millis(50)), None);
        assert_eq!(
            focus.on_tick(start + Duration::from_millis(100)),
            Some(FocusRequest { select_all: false })
        );
        assert!(focus.has_fired());

        // Re-arming after firing does nothing.
        focus.arm(start + Duration::from_millis(200));
        assert_eq!(focus.on_tick(start + Duration::from_secs(1)), None);
    }

    #[test]
    fn select_text_propagates_in_the_request() {
        let start = Instant::now();
        let mut focus = AutoFocus::new().select_text();
        focus.arm(start);
        let request = focus.on_tick(start + DEFAULT_FOCUS_DELAY).unwrap();
        assert!(request.select_all);
    }

    #[test]
    fn unarmed_behavior_never_fires() {
        let mut focus = AutoFocus::new();
        assert_eq!(focus.on_tick(Instant::now()), None);
    }

    #[test]
    fn attribute_toggle_tokens() {
        for off in ["0", "false", "off", "no", "f", "n", " OFF ", "No"] {
            assert!(!AutoFocus::enabled_attr(off), "{off:?} should disable");
        }
        for on in ["", "1", "true", "yes", "anything"] {
            assert!(AutoFocus::enabled_attr(on), "{on:?} should enable");
        }
    }
}
