//! Widget gallery: a small TUI wiring every tidepool component together.
//!
//! Pages are switched with F1–F4; switching and quitting (Ctrl+Q) route
//! through the leave guard, so a form with unsaved edits prompts before the
//! transition goes through.

use anyhow::Result;
use chrono::Local;
use crossterm::{
    event::{Event as CEvent, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph};
use std::cell::RefCell;
use std::io;
use std::rc::Rc;
use std::time::Instant;
use tokio::sync::mpsc;

use tidepool::config::{self, UiConfig};
use tidepool::guard::{DirtyState, LeaveGuard, NavDecision, Transition};
use tidepool::modal::{DialogOptions, ModalService, Settlement};
use tidepool::theme::Theme;
use tidepool::widgets::auto_focus::AutoFocus;
use tidepool::widgets::disabled::DisableState;
use tidepool::widgets::faq::Faq;
use tidepool::widgets::form::Form;
use tidepool::widgets::quick_search::QuickSearch;
use tidepool::widgets::text_input::{InputKind, TextInput};
use tidepool::widgets::video::VideoOverlay;

const GUARD_SUBSCRIPTION_ID: &str = "gallery-form";
const QUIT_DIALOG_ID: &str = "quit-confirm";

const FAQ_TEXT: &str = "\
Getting started
===============

What is tidepool?
A widget toolkit for ratatui apps: inputs, dialogs,
and a leave guard for unsaved changes.

How do I switch pages?
Press F1 through F4.

Behaviors
---------

Why does leaving the form page sometimes prompt?
The form registers a dirty check with the leave guard;
unsaved edits deny the transition until you confirm.";

const SEARCH_ITEMS: &[&str] = &[
    "anemone", "barnacle", "chiton", "hermit crab", "kelp", "limpet", "mussel", "sea star",
    "sea urchin", "sculpin", "snail", "sponge", "tide pool shrimp", "whelk",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Page {
    Form,
    Search,
    Faq,
    Video,
}

impl Page {
    const ALL: [Page; 4] = [Page::Form, Page::Search, Page::Faq, Page::Video];

    fn name(self) -> &'static str {
        match self {
            Page::Form => "form",
            Page::Search => "search",
            Page::Faq => "faq",
            Page::Video => "video",
        }
    }

    fn title(self) -> &'static str {
        match self {
            Page::Form => "Form",
            Page::Search => "Search",
            Page::Faq => "FAQ",
            Page::Video => "Video",
        }
    }

    fn from_name(name: &str) -> Option<Page> {
        Page::ALL.iter().copied().find(|p| p.name() == name)
    }
}

#[derive(Debug)]
enum GalleryEvent {
    Terminal(CEvent),
    Tick,
}

struct FormPage {
    name: TextInput,
    email: TextInput,
    form: Form,
    focused: usize,
    submit_state: DisableState,
    saved: bool,
}

impl FormPage {
    fn new() -> Self {
        Self {
            name: TextInput::new()
                .input_id("name")
                .label("Name")
                .placeholder("Your name")
                .required(true),
            email: TextInput::new()
                .input_id("email")
                .label("Email")
                .placeholder("you@example.com")
                .kind(InputKind::Email)
                .required(true),
            form: Form::new(),
            focused: 0,
            submit_state: DisableState::default(),
            saved: false,
        }
    }

    fn has_unsaved_edits(&self) -> bool {
        !self.saved && (self.name.is_dirty() || self.email.is_dirty())
    }

    fn focused_input(&mut self) -> &mut TextInput {
        if self.focused == 0 {
            &mut self.name
        } else {
            &mut self.email
        }
    }
}

struct SearchPage {
    search: QuickSearch,
    matches: Vec<String>,
}

impl SearchPage {
    fn new() -> Self {
        Self {
            search: QuickSearch::new(),
            matches: SEARCH_ITEMS.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn refilter(&mut self, needle: &str) {
        let needle = needle.to_lowercase();
        self.matches = SEARCH_ITEMS
            .iter()
            .filter(|item| item.to_lowercase().contains(&needle))
            .map(|s| s.to_string())
            .collect();
    }
}

struct App {
    cfg: UiConfig,
    page: Page,
    guard: LeaveGuard,
    modals: ModalService,
    form: Rc<RefCell<FormPage>>,
    search: SearchPage,
    faq: Faq,
    video: VideoOverlay,
    auto_focus: AutoFocus,
    status: Option<String>,
    last_clock: String,
    should_quit: bool,
    dirty: bool,
}

impl App {
    fn new(cfg: UiConfig) -> Self {
        let modals = ModalService::new(cfg.project_name.clone())
            .with_labels(cfg.dialog.ok_label.clone(), cfg.dialog.cancel_label.clone());
        let mut app = Self {
            cfg,
            page: Page::Form,
            guard: LeaveGuard::new(),
            modals,
            form: Rc::new(RefCell::new(FormPage::new())),
            search: SearchPage::new(),
            faq: Faq::from_text(FAQ_TEXT).header("Tidepool FAQ").default_open(0),
            video: VideoOverlay::new("dQw4w9WgXcQ").placeholder("Watch the tour"),
            auto_focus: AutoFocus::new(),
            status: None,
            last_clock: String::new(),
            should_quit: false,
            dirty: true,
        };
        app.enter_page(Page::Form);
        app
    }

    /// Page-entry hooks: the form page registers its dirty check (the guard
    /// drops all subscriptions whenever a leave is confirmed) and re-arms
    /// auto focus.
    fn enter_page(&mut self, page: Page) {
        if page == Page::Form {
            let form = Rc::clone(&self.form);
            self.guard.register(
                Box::new(move || {
                    if form.borrow().has_unsaved_edits() {
                        DirtyState::message("You have unsaved form edits, leave anyway?")
                    } else {
                        DirtyState::Clean
                    }
                }),
                Some(GUARD_SUBSCRIPTION_ID),
            );
            self.auto_focus = AutoFocus::new();
            self.auto_focus.arm(Instant::now());
        }
    }

    fn navigate(&mut self, page: Page) {
        if page == self.page {
            return;
        }
        let transition = Transition::new(page.name());
        match self.guard.handle_navigation(transition, &mut self.modals) {
            NavDecision::Allow => {
                self.page = page;
                self.enter_page(page);
            }
            NavDecision::Deny => {}
        }
        self.dirty = true;
    }

    fn apply_transition(&mut self, transition: Transition) {
        if let Some(page) = Page::from_name(&transition.to) {
            self.page = page;
            self.enter_page(page);
            self.dirty = true;
        }
    }

    fn request_quit(&mut self) {
        match self.guard.handle_quit() {
            Some(message) => {
                self.modals
                    .confirm(DialogOptions::new(message).id(QUIT_DIALOG_ID));
            }
            None => self.should_quit = true,
        }
        self.dirty = true;
    }

    fn on_tick(&mut self, now: Instant) {
        if let Some(value) = self.search.search.on_tick(now) {
            self.search.refilter(&value);
            self.dirty = true;
        }
        if self.page == Page::Form && self.auto_focus.on_tick(now).is_some() {
            self.form.borrow_mut().focused = 0;
            self.dirty = true;
        }
        let clock = Local::now().format("%H:%M:%S").to_string();
        if clock != self.last_clock {
            self.last_clock = clock;
            self.dirty = true;
        }
    }

    fn on_terminal(&mut self, event: CEvent) {
        self.dirty = true;

        // Open dialogs swallow input first.
        if self.modals.any_open() {
            if let Some((id, settlement)) = self.modals.handle_event(&event) {
                if let Some(transition) = self.guard.on_settlement(&id, settlement) {
                    self.apply_transition(transition);
                } else if id == QUIT_DIALOG_ID && settlement == Settlement::Accepted {
                    self.should_quit = true;
                }
            }
            return;
        }

        let CEvent::Key(key) = event else { return };
        if key.kind != KeyEventKind::Press {
            return;
        }

        // The video overlay is modal while open.
        if self.video.is_open() && self.video.handle_key(&key) {
            return;
        }

        match key.code {
            KeyCode::Char('q') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.request_quit();
                return;
            }
            KeyCode::F(1) => return self.navigate(Page::Form),
            KeyCode::F(2) => return self.navigate(Page::Search),
            KeyCode::F(3) => return self.navigate(Page::Faq),
            KeyCode::F(4) => return self.navigate(Page::Video),
            _ => {}
        }

        match self.page {
            Page::Form => self.handle_form_key(&key),
            Page::Search => self.search.search.handle_key(&key, Instant::now()),
            Page::Faq => self.faq.handle_key(&key),
            Page::Video => {
                if key.code == KeyCode::Enter {
                    self.video.open();
                }
            }
        }
    }

    fn handle_form_key(&mut self, key: &KeyEvent) {
        let mut form = self.form.borrow_mut();
        match key.code {
            KeyCode::Tab | KeyCode::BackTab => form.focused = 1 - form.focused,
            KeyCode::Enter => {
                let FormPage {
                    name, email, form: f, ..
                } = &mut *form;
                match f.submit(&mut [&mut *name, &mut *email]) {
                    Some(id) => {
                        // Focus the first invalid field.
                        form.focused = if id == "email" { 1 } else { 0 };
                        self.status = Some("Fix the highlighted field".to_string());
                    }
                    None => {
                        form.saved = true;
                        self.status = Some("Saved".to_string());
                    }
                }
            }
            _ => {
                if form.focused_input().handle_key(key) {
                    form.saved = false;
                }
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Install panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        original_hook(info);
    }));

    let cfg = config::load_config()?;
    if cfg.logging.enabled {
        let file = std::fs::File::create(&cfg.logging.log_file)?;
        tracing_subscriber::fmt()
            .with_writer(std::sync::Arc::new(file))
            .with_ansi(false)
            .init();
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, cfg).await;

    restore_terminal()?;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    cfg: UiConfig,
) -> Result<()> {
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<GalleryEvent>();

    // Spawn terminal input task
    let term_tx = event_tx.clone();
    tokio::spawn(async move {
        let mut reader = EventStream::new();
        loop {
            match reader.next().await {
                Some(Ok(event)) => {
                    if term_tx.send(GalleryEvent::Terminal(event)).is_err() {
                        break;
                    }
                }
                Some(Err(_)) => break,
                None => break,
            }
        }
    });

    // Spawn tick task (20 FPS = 50ms)
    let tick_tx = event_tx.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(std::time::Duration::from_millis(50));
        loop {
            interval.tick().await;
            if tick_tx.send(GalleryEvent::Tick).is_err() {
                break;
            }
        }
    });

    let mut app = App::new(cfg);
    terminal.draw(|f| render(f, &mut app))?;

    loop {
        let event = event_rx.recv().await;
        let Some(event) = event else { break };

        match event {
            GalleryEvent::Terminal(ev) => app.on_terminal(ev),
            GalleryEvent::Tick => app.on_tick(Instant::now()),
        }

        if app.should_quit {
            break;
        }

        if app.dirty {
            terminal.draw(|f| render(f, &mut app))?;
            app.dirty = false;
        }
    }

    Ok(())
}

fn render(frame: &mut Frame, app: &mut App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(frame.area());

    render_tabs(frame, rows[0], app);
    match app.page {
        Page::Form => render_form(frame, rows[1], app),
        Page::Search => render_search(frame, rows[1], app),
        Page::Faq => app.faq.render(frame, rows[1], true),
        Page::Video => render_video_page(frame, rows[1], app),
    }
    render_status_bar(frame, rows[2], app);

    app.video.render(frame);
    app.modals.render(frame);
}

fn render_tabs(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans: Vec<Span> = Vec::new();
    for (i, page) in Page::ALL.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" | ", Theme::border()));
        }
        let label = format!("F{} {}", i + 1, page.title());
        let style = if *page == app.page {
            Theme::title()
        } else {
            Theme::label()
        };
        spans.push(Span::styled(label, style));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_form(frame: &mut Frame, area: Rect, app: &mut App) {
    let mut form = app.form.borrow_mut();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Length(5),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(area);

    let focused = form.focused;
    form.name.render(frame, rows[0], focused == 0);
    form.email.render(frame, rows[1], focused == 1);

    let valid = form.name.is_valid() && form.email.is_valid();
    form.submit_state.update(!valid);
    let hint = if form.saved {
        "Saved — edit a field to mark the page dirty again"
    } else {
        "[ Enter ] Save   [ Tab ] Next field"
    };
    frame.render_widget(
        Paragraph::new(hint).style(form.submit_state.style(Theme::label())),
        rows[2],
    );
}

fn render_search(frame: &mut Frame, area: Rect, app: &mut App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1)])
        .split(area);

    app.search.search.render(frame, rows[0], true);

    let items: Vec<ListItem> = app
        .search
        .matches
        .iter()
        .map(|item| ListItem::new(Span::styled(format!(" {item}"), Theme::input_text())))
        .collect();
    let list = List::new(items).block(
        Block::default()
            .title(format!(" Results ({}) ", app.search.matches.len()))
            .title_style(Theme::title())
            .borders(Borders::ALL)
            .border_style(Theme::border()),
    );
    frame.render_widget(list, rows[1]);
}

fn render_video_page(frame: &mut Frame, area: Rect, app: &App) {
    let lines = vec![
        Line::from(Span::styled(app.video.label(), Theme::title())),
        Line::default(),
        Line::from(Span::styled(
            "Press Enter to open the overlay.",
            Theme::label(),
        )),
        Line::from(Span::styled(app.video.watch_url(), Theme::placeholder())),
    ];
    let block = Block::default()
        .title(" Video ")
        .title_style(Theme::title())
        .borders(Borders::ALL)
        .border_style(Theme::border());
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let left = app
        .status
        .clone()
        .unwrap_or_else(|| format!("{} — Ctrl+Q to quit", app.cfg.project_name));
    let clock = &app.last_clock;
    let pad = (area.width as usize)
        .saturating_sub(left.chars().count() + clock.chars().count() + 2);
    let text = format!(" {left}{}{clock} ", " ".repeat(pad));
    frame.render_widget(Paragraph::new(text).style(Theme::status_bar()), area);
}
