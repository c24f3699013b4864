//! Reusable TUI widgets and a leave-guard coordinator for ratatui apps.
//!
//! The widgets (validated text input, form helper, debounced quick-search,
//! FAQ accordion, video overlay, auto-focus and disabled-state behaviors)
//! are independent pieces of view state. The one coordinated component is
//! the [`guard::LeaveGuard`], which blocks screen transitions and app quit
//! while registered dirty checks report unsaved changes, confirming through
//! the [`modal::ModalService`].
//!
//! Run `cargo run --bin gallery` for a demo wiring everything together.

pub mod config;
pub mod guard;
pub mod modal;
pub mod theme;
pub mod widgets;

pub use guard::{DirtyState, LeaveGuard, NavDecision, Transition};
pub use modal::{DialogOptions, ModalService, Settlement};
