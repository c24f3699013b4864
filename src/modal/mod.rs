//! Modal dialog service.
//!
//! Dialogs are opened by id and settle to [`Settlement::Accepted`] (OK) or
//! [`Settlement::Rejected`] (Cancel / dismiss). Requests for an id that is
//! already open join the pending dialog instead of opening a second one, so
//! repeated prompts collapse. The service owns the open set; the host routes
//! terminal events through [`ModalService::handle_event`] and draws with
//! [`ModalService::render`].

mod dialog;

pub use dialog::{Dialog, DialogButton, DialogState};

use crossterm::event::Event;
use ratatui::Frame;
use tracing::{debug, trace};

/// Dialog id shared by the service-level preset prompts.
pub const SERVICE_DIALOG_ID: &str = "td-dialog";

/// Outcome of a settled dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settlement {
    /// The OK / primary button fired.
    Accepted,
    /// Cancel fired or the dialog was dismissed.
    Rejected,
}

/// Visual tone of a dialog; picks the border accent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DialogTone {
    #[default]
    Info,
    Success,
    Error,
    Confirm,
}

/// Dialog configuration.
///
/// Field defaults, applied by [`ModalService::show`] and the preset
/// constructors: `title` falls back to the configured project name (`Error`
/// tone falls back to `"Error"`); `ok` falls back to `"OK"`; `cancel` is
/// absent unless set, and [`ModalService::confirm`] fills in `"Cancel"`;
/// `id` falls back to [`SERVICE_DIALOG_ID`] for presets and a generated id
/// for [`ModalService::show`].
#[derive(Debug, Clone, Default)]
pub struct DialogOptions {
    pub message: String,
    pub title: Option<String>,
    pub ok: Option<String>,
    pub cancel: Option<String>,
    pub tone: DialogTone,
    pub id: Option<String>,
}

impl DialogOptions {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Default::default()
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn ok(mut self, label: impl Into<String>) -> Self {
        self.ok = Some(label.into());
        self
    }

    pub fn cancel(mut self, label: impl Into<String>) -> Self {
        self.cancel = Some(label.into());
        self
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

impl From<&str> for DialogOptions {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

impl From<String> for DialogOptions {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

struct OpenDialog {
    id: String,
    dialog: Dialog,
    state: DialogState,
}

/// Owns the set of open dialogs, newest on top.
pub struct ModalService {
    project_name: String,
    ok_label: String,
    cancel_label: String,
    open: Vec<OpenDialog>,
    next_id: u64,
}

impl ModalService {
    pub fn new(project_name: impl Into<String>) -> Self {
        Self {
            project_name: project_name.into(),
            ok_label: "OK".to_string(),
            cancel_label: "Cancel".to_string(),
            open: Vec::new(),
            next_id: 0,
        }
    }

    /// Override the default button labels.
    pub fn with_labels(mut self, ok: impl Into<String>, cancel: impl Into<String>) -> Self {
        self.ok_label = ok.into();
        self.cancel_label = cancel.into();
        self
    }

    /// Informational prompt with a single OK button.
    pub fn info(&mut self, opts: impl Into<DialogOptions>) -> String {
        self.preset(opts.into(), DialogTone::Info, false)
    }

    /// Success prompt with a single OK button.
    pub fn success(&mut self, opts: impl Into<DialogOptions>) -> String {
        self.preset(opts.into(), DialogTone::Success, false)
    }

    /// Error prompt; the title falls back to `"Error"`.
    pub fn error(&mut self, opts: impl Into<DialogOptions>) -> String {
        self.preset(opts.into(), DialogTone::Error, false)
    }

    /// OK/Cancel confirmation prompt.
    pub fn confirm(&mut self, opts: impl Into<DialogOptions>) -> String {
        self.preset(opts.into(), DialogTone::Confirm, true)
    }

    fn preset(&mut self, mut opts: DialogOptions, tone: DialogTone, with_cancel: bool) -> String {
        opts.tone = tone;
        if opts.id.is_none() {
            opts.id = Some(SERVICE_DIALOG_ID.to_string());
        }
        if with_cancel && opts.cancel.is_none() {
            opts.cancel = Some(self.cancel_label.clone());
        }
        self.show(opts)
    }

    /// Open the dialog described by `opts`, or join the one already open
    /// under the same id. Returns the dialog id either way.
    pub fn show(&mut self, mut opts: DialogOptions) -> String {
        let id = opts.id.take().unwrap_or_else(|| {
            self.next_id += 1;
            format!("td-modal-{}", self.next_id)
        });

        if self.open.iter().any(|d| d.id == id) {
            trace!(%id, "joining dialog already open");
            return id;
        }

        let title = opts.title.unwrap_or_else(|| match opts.tone {
            DialogTone::Error => "Error".to_string(),
            _ => self.project_name.clone(),
        });
        let mut dialog = Dialog::new(title, opts.message, opts.tone)
            .ok_label(opts.ok.unwrap_or_else(|| self.ok_label.clone()));
        if let Some(cancel) = opts.cancel {
            dialog = dialog.with_cancel(cancel);
        }

        debug!(%id, "opening dialog");
        self.open.push(OpenDialog {
            id: id.clone(),
            dialog,
            state: DialogState::default(),
        });
        id
    }

    pub fn open_count(&self) -> usize {
        self.open.len()
    }

    pub fn any_open(&self) -> bool {
        !self.open.is_empty()
    }

    pub fn is_open(&self, id: &str) -> bool {
        self.open.iter().any(|d| d.id == id)
    }

    /// Message text of an open dialog, if present.
    pub fn message_of(&self, id: &str) -> Option<&str> {
        self.open
            .iter()
            .find(|d| d.id == id)
            .map(|d| d.dialog.message())
    }

    /// Route a terminal event to the topmost dialog. Returns the settled
    /// dialog's id and outcome once a button fires or the dialog is
    /// dismissed; the dialog is closed at that point.
    pub fn handle_event(&mut self, event: &Event) -> Option<(String, Settlement)> {
        let settled = {
            let top = self.open.last_mut()?;
            top.dialog.handle_event(event, &mut top.state)?
        };
        let top = self.open.pop()?;
        debug!(id = %top.id, ?settled, "dialog settled");
        Some((top.id, settled))
    }

    /// Draw the topmost dialog over the whole frame, if any is open.
    pub fn render(&self, frame: &mut Frame) {
        if let Some(top) = self.open.last() {
            let area = frame.area();
            top.dialog.render(frame, area, &top.state);
        }
    }
}
