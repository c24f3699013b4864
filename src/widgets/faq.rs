//! FAQ accordion and its source parser.
//!
//! Sources are plain text blobs: blocks separated by blank lines, first line
//! of a block is the question, remaining lines the answer. A block whose
//! first answer line is a run of `=` or `-` characters starts a new section
//! titled by the question line. Sources may also be URLs, fetched with a
//! plain GET.

use crate::theme::Theme;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};
use thiserror::Error;
use tracing::debug;

/// Separator answer lines are joined with; the renderer splits on it again.
pub const ANSWER_SEPARATOR: &str = "<br/>";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaqEntry {
    pub question: String,
    pub answer: String,
}

impl FaqEntry {
    /// The answer split back into display lines.
    pub fn answer_lines(&self) -> impl Iterator<Item = &str> {
        self.answer.split(ANSWER_SEPARATOR)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaqSection {
    pub title: Option<String>,
    pub entries: Vec<FaqEntry>,
}

/// Where FAQ content comes from: inline text or a URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FaqSource {
    Inline(String),
    Remote(String),
}

impl FaqSource {
    /// Classify a source string. Schemeful `http(s)://` and
    /// protocol-relative `//` strings are remote, everything else inline.
    pub fn detect(source: &str) -> Self {
        let trimmed = source.trim();
        let lower = trimmed.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") || trimmed.starts_with("//")
        {
            Self::Remote(trimmed.to_string())
        } else {
            Self::Inline(source.to_string())
        }
    }
}

#[derive(Debug, Error)]
pub enum FaqError {
    #[error("failed to fetch FAQ from {url}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Fetch a remote FAQ blob. Protocol-relative URLs default to https.
pub async fn load(url: &str) -> Result<String, FaqError> {
    let absolute = if url.starts_with("//") {
        format!("https:{url}")
    } else {
        url.to_string()
    };
    debug!(url = %absolute, "fetching FAQ source");
    let response = reqwest::get(&absolute)
        .await
        .and_then(|r| r.error_for_status())
        .map_err(|source| FaqError::Fetch {
            url: absolute.clone(),
            source,
        })?;
    response.text().await.map_err(|source| FaqError::Fetch {
        url: absolute,
        source,
    })
}

fn is_rule(line: &str) -> bool {
    let line = line.trim_end();
    !line.is_empty()
        && (line.chars().all(|c| c == '=') || line.chars().all(|c| c == '-'))
}

/// Parse a FAQ blob into sections of question/answer entries.
pub fn parse(text: &str) -> Vec<FaqSection> {
    let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
    let mut sections: Vec<FaqSection> = Vec::new();

    for block in normalized.split("\n\n") {
        let block = block.trim_matches('\n');
        if block.trim().is_empty() {
            continue;
        }
        let mut lines = block.lines();
        let question = lines.next().unwrap_or_default().to_string();
        let answer_lines: Vec<&str> = lines.collect();

        if answer_lines.first().is_some_and(|l| is_rule(l)) {
            sections.push(FaqSection {
                title: Some(question),
                entries: Vec::new(),
            });
            continue;
        }

        let entry = FaqEntry {
            question,
            answer: answer_lines.join(ANSWER_SEPARATOR),
        };
        match sections.last_mut() {
            Some(section) => section.entries.push(entry),
            None => sections.push(FaqSection {
                title: None,
                entries: vec![entry],
            }),
        }
    }
    sections
}

/// Accordion over parsed FAQ content. Entries toggle independently; up/down
/// move the selection across sections.
pub struct Faq {
    header: Option<String>,
    sections: Vec<FaqSection>,
    open: Vec<bool>,
    selected: usize,
}

impl Faq {
    pub fn from_text(text: &str) -> Self {
        let sections = parse(text);
        let count = sections.iter().map(|s| s.entries.len()).sum();
        Self {
            header: None,
            sections,
            open: vec![false; count],
            selected: 0,
        }
    }

    /// Resolve a source (fetching remote ones) and parse it.
    pub async fn from_source(source: &FaqSource) -> Result<Self, FaqError> {
        match source {
            FaqSource::Inline(text) => Ok(Self::from_text(text)),
            FaqSource::Remote(url) => Ok(Self::from_text(&load(url).await?)),
        }
    }

    pub fn header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }

    /// Open an entry (by flat index) up front.
    pub fn default_open(mut self, index: usize) -> Self {
        if let Some(flag) = self.open.get_mut(index) {
            *flag = true;
        }
        self
    }

    pub fn entry_count(&self) -> usize {
        self.open.len()
    }

    pub fn sections(&self) -> &[FaqSection] {
        &self.sections
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn is_open(&self, index: usize) -> bool {
        self.open.get(index).copied().unwrap_or(false)
    }

    pub fn toggle_selected(&mut self) {
        if let Some(flag) = self.open.get_mut(self.selected) {
            *flag = !*flag;
        }
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.entry_count() {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn handle_key(&mut self, key: &KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => self.select_next(),
            KeyCode::Up | KeyCode::Char('k') => self.select_prev(),
            KeyCode::Enter | KeyCode::Char(' ') => self.toggle_selected(),
            _ => {}
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, focused: bool) {
        let block = Block::default()
            .title(format!(
                " {} ",
                self.header.as_deref().unwrap_or("FAQ")
            ))
            .title_style(Theme::title())
            .borders(Borders::ALL)
            .border_style(if focused {
                Theme::border_focused()
            } else {
                Theme::border()
            });
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut lines: Vec<Line> = Vec::new();
        let mut selected_line = 0usize;
        let mut flat = 0usize;
        for section in &self.sections {
            if let Some(title) = &section.title {
                lines.push(Line::styled(title.clone(), Theme::section_header()));
            }
            for entry in &section.entries {
                let open = self.is_open(flat);
                let marker = if open { "▾ " } else { "▸ " };
                let mut style = if open {
                    Theme::faq_question_open()
                } else {
                    Theme::faq_question()
                };
                if focused && flat == self.selected {
                    selected_line = lines.len();
                    style = style.patch(Theme::selection());
                }
                lines.push(Line::styled(
                    format!("{marker}{}", entry.question),
                    style,
                ));
                if open {
                    for answer in entry.answer_lines() {
                        lines.push(Line::styled(format!("  {answer}"), Theme::faq_answer()));
                    }
                }
                flat += 1;
            }
        }

        // Keep the selected question in view.
        let height = inner.height as usize;
        let scroll = selected_line.saturating_sub(height.saturating_sub(1));
        frame.render_widget(
            Paragraph::new(lines).scroll((scroll as u16, 0)),
            inner,
        );
    }
}
