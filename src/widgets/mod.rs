//! Self-contained view widgets and behaviors. None of them share state; the
//! only coordinated component lives in [`crate::guard`].

pub mod auto_focus;
pub mod disabled;
pub mod faq;
pub mod form;
pub mod line_edit;
pub mod quick_search;
pub mod text_input;
pub mod video;
