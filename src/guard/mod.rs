//! Leave-guard coordinator.
//!
//! Page controllers register "do I have unsaved changes?" callbacks here.
//! The guard intercepts screen transitions and app quit: if any callback
//! reports unsaved state, the transition is denied and a confirmation dialog
//! is opened through the [`ModalService`]; accepting the dialog replays the
//! original transition, cancelling leaves the user where they are.
//!
//! Interception is a two-phase protocol. [`LeaveGuard::handle_navigation`]
//! either allows the transition or denies it and keeps it as pending;
//! [`LeaveGuard::on_settlement`] is the explicit resume call that hands the
//! pending transition back once the dialog settles.

use crate::modal::{DialogOptions, ModalService, Settlement};
use std::collections::BTreeMap;
use tracing::debug;

/// Message shown when a dirty check reports unsaved state without its own text.
pub const UNSAVED_CHANGES_MESSAGE: &str = "You have unsaved changes, proceed anyway?";

/// Dialog id used for the guard's confirmation dialog.
pub const CONFIRM_DIALOG_ID: &str = "leave-confirm";

/// Result of a single dirty-check callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirtyState {
    /// Everything saved; the scan moves on to the next subscriber.
    Clean,
    /// Unsaved state; the default message is used.
    Dirty,
    /// Unsaved state with a caller-supplied message.
    Message(String),
}

impl DirtyState {
    pub fn message(text: impl Into<String>) -> Self {
        Self::Message(text.into())
    }
}

pub type DirtyCheck = Box<dyn FnMut() -> DirtyState>;

/// First positive result of a dirty scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirtyHit {
    /// Id of the subscription that reported unsaved state.
    pub id: String,
    pub message: String,
}

/// A pending screen transition: target state plus its parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transition {
    pub to: String,
    pub params: BTreeMap<String, String>,
}

impl Transition {
    pub fn new(to: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            params: BTreeMap::new(),
        }
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }
}

/// Verdict of the navigation-intercept hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavDecision {
    Allow,
    Deny,
}

struct Subscription {
    id: String,
    check: DirtyCheck,
}

/// Coordinates dirty checks against navigation and quit.
///
/// Constructed once at application start and passed by reference; all state
/// lives in the value, there are no globals. Invariants: at most one
/// confirmation dialog is in flight, and the hooks arm at most once no
/// matter how many registrations happen.
pub struct LeaveGuard {
    subscribers: Vec<Subscription>,
    armed: bool,
    dialog_open: bool,
    pending: Option<Transition>,
    next_id: u64,
}

impl Default for LeaveGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl LeaveGuard {
    pub fn new() -> Self {
        Self {
            subscribers: Vec::new(),
            armed: false,
            dialog_open: false,
            pending: None,
            next_id: 0,
        }
    }

    /// Register a dirty-check callback under `id`, generating an id when none
    /// is supplied. Registering an existing id replaces its callback. The
    /// first registration ever arms the navigation and quit hooks; later
    /// registrations only touch the registry.
    pub fn register(&mut self, check: DirtyCheck, id: Option<&str>) -> String {
        let id = match id {
            Some(id) => id.to_string(),
            None => {
                self.next_id += 1;
                format!("sub-{}", self.next_id)
            }
        };
        if !self.armed {
            self.armed = true;
            debug!("arming leave-guard hooks");
        }
        match self.subscribers.iter_mut().find(|s| s.id == id) {
            Some(sub) => sub.check = check,
            None => self.subscribers.push(Subscription {
                id: id.clone(),
                check,
            }),
        }
        id
    }

    /// Remove the subscription for `id`, or every subscription when `id` is
    /// `None`. Unknown ids are a no-op. The hooks stay armed either way.
    pub fn unregister(&mut self, id: Option<&str>) {
        match id {
            None => self.subscribers.clear(),
            Some(id) => self.subscribers.retain(|s| s.id != id),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_registered(&self, id: &str) -> bool {
        self.subscribers.iter().any(|s| s.id == id)
    }

    /// Whether the hooks have ever been armed. Stays true after a full
    /// unregister; only the registry empties.
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn dialog_in_flight(&self) -> bool {
        self.dialog_open
    }

    /// The transition denied while the confirmation dialog is open, if any.
    pub fn pending(&self) -> Option<&Transition> {
        self.pending.as_ref()
    }

    /// Run the dirty checks in registration order. The first subscriber
    /// reporting unsaved state wins and the scan stops; a bare
    /// [`DirtyState::Dirty`] maps to [`UNSAVED_CHANGES_MESSAGE`].
    pub fn check_dirty(&mut self) -> Option<DirtyHit> {
        for sub in &mut self.subscribers {
            match (sub.check)() {
                DirtyState::Clean => {}
                DirtyState::Dirty => {
                    return Some(DirtyHit {
                        id: sub.id.clone(),
                        message: UNSAVED_CHANGES_MESSAGE.to_string(),
                    })
                }
                DirtyState::Message(message) => {
                    return Some(DirtyHit {
                        id: sub.id.clone(),
                        message,
                    })
                }
            }
        }
        None
    }

    /// Navigation-intercept hook. Call with every transition about to start.
    ///
    /// While the confirmation dialog is in flight every new transition is
    /// denied outright, without running any dirty check. A clean scan clears
    /// the registry and allows the transition. A dirty scan denies it, keeps
    /// it pending and opens the confirmation dialog with the dirty message.
    pub fn handle_navigation(
        &mut self,
        transition: Transition,
        modals: &mut ModalService,
    ) -> NavDecision {
        if self.dialog_open {
            debug!(to = %transition.to, "transition denied, confirmation already in flight");
            return NavDecision::Deny;
        }

        let Some(hit) = self.check_dirty() else {
            self.unregister(None);
            return NavDecision::Allow;
        };

        debug!(id = %hit.id, to = %transition.to, "transition denied, unsaved changes");
        self.pending = Some(transition);
        self.dialog_open = true;
        modals.confirm(DialogOptions::new(hit.message).id(CONFIRM_DIALOG_ID));
        NavDecision::Deny
    }

    /// Resume half of the intercept protocol. Feed dialog settlements here;
    /// settlements for other dialog ids are ignored. Acceptance clears every
    /// subscription and returns the pending transition for the caller to
    /// replay. Cancellation drops the pending transition and keeps the
    /// subscriptions for the next attempt.
    pub fn on_settlement(&mut self, id: &str, settlement: Settlement) -> Option<Transition> {
        if id != CONFIRM_DIALOG_ID || !self.dialog_open {
            return None;
        }
        self.dialog_open = false;
        match settlement {
            Settlement::Accepted => {
                self.unregister(None);
                let transition = self.pending.take();
                if let Some(t) = &transition {
                    debug!(to = %t.to, "leave confirmed, replaying transition");
                }
                transition
            }
            Settlement::Rejected => {
                debug!("leave cancelled, staying on current page");
                self.pending = None;
                None
            }
        }
    }

    /// Quit-intercept hook. Returns the dirty message when anything is
    /// unsaved; the host uses a `Some` return to raise its own leave prompt.
    pub fn handle_quit(&mut self) -> Option<String> {
        self.check_dirty().map(|hit| hit.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn counted(
        result: DirtyState,
    ) -> (DirtyCheck, Rc<Cell<usize>>) {
        let calls = Rc::new(Cell::new(0));
        let calls2 = calls.clone();
        let check = Box::new(move || {
            calls2.set(calls2.get() + 1);
            result.clone()
        });
        (check, calls)
    }

    fn modals() -> ModalService {
        ModalService::new("tidepool")
    }

    #[test]
    fn register_stores_every_id_until_unregistered() {
        let mut guard = LeaveGuard::new();
        let a = guard.register(Box::new(|| DirtyState::Clean), Some("a"));
        let b = guard.register(Box::new(|| DirtyState::Clean), None);
        assert_eq!(a, "a");
        assert!(guard.is_registered(&a));
        assert!(guard.is_registered(&b));
        assert_eq!(guard.subscriber_count(), 2);

        guard.unregister(Some(&a));
        assert!(!guard.is_registered(&a));
        assert!(guard.is_registered(&b));

        // Unknown ids are a silent no-op.
        guard.unregister(Some("missing"));
        assert_eq!(guard.subscriber_count(), 1);
    }

    #[test]
    fn register_same_id_replaces_callback() {
        let mut guard = LeaveGuard::new();
        guard.register(Box::new(|| DirtyState::message("old")), Some("x"));
        guard.register(Box::new(|| DirtyState::message("new")), Some("x"));
        assert_eq!(guard.subscriber_count(), 1);
        assert_eq!(guard.check_dirty().unwrap().message, "new");
    }

    #[test]
    fn arming_happens_once_and_survives_unregister_all() {
        let mut guard = LeaveGuard::new();
        assert!(!guard.is_armed());
        guard.register(Box::new(|| DirtyState::Clean), Some("a"));
        assert!(guard.is_armed());
        guard.unregister(None);
        assert_eq!(guard.subscriber_count(), 0);
        assert!(guard.is_armed());
    }

    #[test]
    fn first_dirty_result_wins_and_stops_the_scan() {
        let mut guard = LeaveGuard::new();
        let (clean, clean_calls) = counted(DirtyState::Clean);
        let (msg, msg_calls) = counted(DirtyState::message("dirty!"));
        let (tail, tail_calls) = counted(DirtyState::Dirty);
        guard.register(clean, Some("first"));
        guard.register(msg, Some("second"));
        guard.register(tail, Some("third"));

        let hit = guard.check_dirty().unwrap();
        assert_eq!(hit.id, "second");
        assert_eq!(hit.message, "dirty!");
        assert_eq!(clean_calls.get(), 1);
        assert_eq!(msg_calls.get(), 1);
        assert_eq!(tail_calls.get(), 0);
    }

    #[test]
    fn bare_dirty_uses_default_message() {
        let mut guard = LeaveGuard::new();
        guard.register(Box::new(|| DirtyState::Dirty), Some("form"));
        let hit = guard.check_dirty().unwrap();
        assert_eq!(hit.message, UNSAVED_CHANGES_MESSAGE);
    }

    #[test]
    fn unregister_all_empties_registry_and_scan_reports_clean() {
        let mut guard = LeaveGuard::new();
        guard.register(Box::new(|| DirtyState::Dirty), Some("a"));
        guard.register(Box::new(|| DirtyState::Dirty), Some("b"));
        guard.unregister(None);
        assert_eq!(guard.subscriber_count(), 0);
        assert!(guard.check_dirty().is_none());
    }

    #[test]
    fn clean_navigation_is_allowed_and_clears_registry() {
        let mut guard = LeaveGuard::new();
        let mut modals = modals();
        guard.register(Box::new(|| DirtyState::Clean), Some("page"));

        let decision = guard.handle_navigation(Transition::new("home"), &mut modals);
        assert_eq!(decision, NavDecision::Allow);
        assert_eq!(guard.subscriber_count(), 0);
        assert_eq!(modals.open_count(), 0);
    }

    #[test]
    fn dirty_navigation_is_denied_and_dialog_carries_message() {
        let mut guard = LeaveGuard::new();
        let mut modals = modals();
        guard.register(
            Box::new(|| DirtyState::message("Unsaved edits")),
            Some("form1"),
        );

        let transition = Transition::new("home").with_param("tab", "2");
        let decision = guard.handle_navigation(transition.clone(), &mut modals);
        assert_eq!(decision, NavDecision::Deny);
        assert!(guard.dialog_in_flight());
        assert_eq!(guard.pending(), Some(&transition));
        assert!(modals.is_open(CONFIRM_DIALOG_ID));
        assert_eq!(
            modals.message_of(CONFIRM_DIALOG_ID),
            Some("Unsaved edits")
        );
    }

    #[test]
    fn navigation_while_dialog_in_flight_is_denied_without_dirty_checks() {
        let mut guard = LeaveGuard::new();
        let mut modals = modals();
        let (check, calls) = counted(DirtyState::Dirty);
        guard.register(check, Some("a"));

        guard.handle_navigation(Transition::new("one"), &mut modals);
        assert_eq!(calls.get(), 1);

        let decision = guard.handle_navigation(Transition::new("two"), &mut modals);
        assert_eq!(decision, NavDecision::Deny);
        assert_eq!(calls.get(), 1, "no dirty check while dialog is open");
        // The original target stays pending.
        assert_eq!(guard.pending().unwrap().to, "one");
    }

    #[test]
    fn accepting_the_dialog_replays_original_transition_and_clears_registry() {
        let mut guard = LeaveGuard::new();
        let mut modals = modals();
        guard.register(
            Box::new(|| DirtyState::message("Unsaved edits")),
            Some("form1"),
        );

        let original = Transition::new("reports").with_param("id", "7");
        assert_eq!(
            guard.handle_navigation(original.clone(), &mut modals),
            NavDecision::Deny
        );

        let replay = guard.on_settlement(CONFIRM_DIALOG_ID, Settlement::Accepted);
        assert_eq!(replay, Some(original));
        assert_eq!(guard.subscriber_count(), 0);
        assert!(!guard.dialog_in_flight());
        assert!(guard.pending().is_none());
    }

    #[test]
    fn cancelling_the_dialog_keeps_subscriptions_for_the_next_attempt() {
        let mut guard = LeaveGuard::new();
        let mut modals = modals();
        guard.register(Box::new(|| DirtyState::Dirty), Some("form"));

        guard.handle_navigation(Transition::new("away"), &mut modals);
        let replay = guard.on_settlement(CONFIRM_DIALOG_ID, Settlement::Rejected);
        assert_eq!(replay, None);
        assert!(!guard.dialog_in_flight());
        assert!(guard.pending().is_none());
        assert_eq!(guard.subscriber_count(), 1);

        // A later attempt runs the full intercept again.
        assert_eq!(
            guard.handle_navigation(Transition::new("away"), &mut modals),
            NavDecision::Deny
        );
    }

    #[test]
    fn settlements_for_other_dialogs_are_ignored() {
        let mut guard = LeaveGuard::new();
        let mut modals = modals();
        guard.register(Box::new(|| DirtyState::Dirty), Some("form"));
        guard.handle_navigation(Transition::new("away"), &mut modals);

        assert_eq!(guard.on_settlement("something-else", Settlement::Accepted), None);
        assert!(guard.dialog_in_flight());
        assert_eq!(guard.subscriber_count(), 1);
    }

    #[test]
    fn quit_hook_returns_message_only_when_dirty() {
        let mut guard = LeaveGuard::new();
        assert_eq!(guard.handle_quit(), None);

        guard.register(Box::new(|| DirtyState::Clean), Some("clean"));
        assert_eq!(guard.handle_quit(), None);

        guard.register(Box::new(|| DirtyState::message("wait!")), Some("dirty"));
        assert_eq!(guard.handle_quit(), Some("wait!".to_string()));
        // Quit checks do not consume the registry.
        assert_eq!(guard.subscriber_count(), 2);
    }

    #[test]
    fn end_to_end_dirty_then_accept() {
        let mut guard = LeaveGuard::new();
        let mut modals = modals();
        guard.register(
            Box::new(|| DirtyState::message("Unsaved edits")),
            Some("form1"),
        );

        let target = Transition::new("home");
        assert_eq!(
            guard.handle_navigation(target.clone(), &mut modals),
            NavDecision::Deny
        );
        assert_eq!(modals.message_of(CONFIRM_DIALOG_ID), Some("Unsaved edits"));

        // User accepts through the real dialog key handling.
        let enter = crossterm::event::Event::Key(crossterm::event::KeyEvent::new(
            crossterm::event::KeyCode::Enter,
            crossterm::event::KeyModifiers::NONE,
        ));
        let (id, settlement) = modals.handle_event(&enter).unwrap();
        assert_eq!(id, CONFIRM_DIALOG_ID);
        assert_eq!(settlement, Settlement::Accepted);

        let replay = guard.on_settlement(&id, settlement).unwrap();
        assert_eq!(replay, target);
        assert_eq!(guard.subscriber_count(), 0);
    }
}
