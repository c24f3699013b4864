//! Video overlay.
//!
//! Sizes a playback surface to 80 % of the viewport at a fixed 1.66 aspect
//! ratio: whichever dimension overflows the ratio is clamped, and the result
//! is centered. The overlay itself renders the video link (terminals do not
//! embed players) and closes on Esc.

use crate::theme::Theme;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::prelude::*;
use ratatui::widgets::block::Padding;
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap};

/// Fraction of the viewport the overlay may cover in each dimension.
pub const VIEWPORT_FRACTION: f64 = 0.8;
/// Width / height ratio of the playback surface.
pub const ASPECT_RATIO: f64 = 1.66;
pub const DEFAULT_PLACEHOLDER: &str = "Watch the video";

/// Overlay rectangle: 80 % of the viewport with the overflowing dimension
/// clamped to the aspect ratio, centered.
pub fn overlay_area(viewport: Rect) -> Rect {
    let mut width = (f64::from(viewport.width) * VIEWPORT_FRACTION).round() as u16;
    let mut height = (f64::from(viewport.height) * VIEWPORT_FRACTION).round() as u16;
    if f64::from(width) / f64::from(height.max(1)) > ASPECT_RATIO {
        width = (f64::from(height) * ASPECT_RATIO).round() as u16;
    } else {
        height = (f64::from(width) / ASPECT_RATIO).round() as u16;
    }
    let x = viewport.x + (viewport.width.saturating_sub(width)) / 2;
    let y = viewport.y + (viewport.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(viewport.width), height.min(viewport.height))
}

#[derive(Debug, Clone)]
pub struct VideoOverlay {
    video_id: String,
    placeholder: String,
    open: bool,
}

impl VideoOverlay {
    pub fn new(video_id: impl Into<String>) -> Self {
        Self {
            video_id: video_id.into(),
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            open: false,
        }
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn video_id(&self) -> &str {
        &self.video_id
    }

    pub fn label(&self) -> &str {
        &self.placeholder
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// Embed URL with autoplay and stripped chrome.
    pub fn embed_url(&self) -> String {
        format!(
            "https://www.youtube.com/embed/{}?autoplay=1&rel=0&showinfo=0",
            self.video_id
        )
    }

    /// Plain watch URL for terminals that hand links to the browser.
    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.video_id)
    }

    /// Returns true when the event was consumed by the overlay.
    pub fn handle_key(&mut self, key: &KeyEvent) -> bool {
        if !self.open || key.kind != KeyEventKind::Press {
            return false;
        }
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => {
                self.close();
                true
            }
            _ => true, // the overlay is modal while open
        }
    }

    pub fn render(&self, frame: &mut Frame) {
        if !self.open {
            return;
        }
        let area = overlay_area(frame.area());
        frame.render_widget(Clear, area);

        let block = Block::default()
            .title(format!(" {} ", self.placeholder))
            .title_style(Theme::title())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Theme::border_focused())
            .padding(Padding::uniform(1));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let lines = vec![
            Line::from(Span::styled(self.watch_url(), Theme::input_text())),
            Line::default(),
            Line::from(Span::styled("Press Esc to close", Theme::overlay_hint())),
        ];
        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wide_viewport_clamps_width() {
        // 80 % of 200x40 is 160x32; 160/32 = 5 > 1.66, so width clamps.
        let area = overlay_area(Rect::new(0, 0, 200, 40));
        assert_eq!(area.height, 32);
        assert_eq!(area.width, (32.0 * ASPECT_RATIO).round() as u16);
        // Centered.
        assert_eq!(area.x, (200 - area.width) / 2);
        assert_eq!(area.y, 4);
    }

    #[test]
    fn tall_viewport_clamps_height() {
        // 80 % of 40x100 is 32x80; 32/80 < 1.66, so height clamps.
        let area = overlay_area(Rect::new(0, 0, 40, 100));
        assert_eq!(area.width, 32);
        assert_eq!(area.height, (32.0 / ASPECT_RATIO).round() as u16);
    }

    #[test]
    fn urls_embed_the_video_id() {
        let video = VideoOverlay::new("abc123");
        assert_eq!(
            video.embed_url(),
            "https://www.youtube.com/embed/abc123?autoplay=1&rel=0&showinfo=0"
        );
        assert_eq!(video.watch_url(), "https://www.youtube.com/watch?v=abc123");
    }

    #[test]
    fn placeholder_defaults_and_overrides() {
        assert_eq!(VideoOverlay::new("x").label(), DEFAULT_PLACEHOLDER);
        assert_eq!(
            VideoOverlay::new("x").placeholder("Demo reel").label(),
            "Demo reel"
        );
    }

    #[test]
    fn escape_closes_and_other_keys_are_swallowed_while_open() {
        let mut video = VideoOverlay::new("x");
        let esc = KeyEvent::new(KeyCode::Esc, crossterm::event::KeyModifiers::NONE);
        let other = KeyEvent::new(KeyCode::Char('a'), crossterm::event::KeyModifiers::NONE);

        assert!(!video.handle_key(&esc), "closed overlay ignores keys");
        video.open();
        assert!(video.handle_key(&other));
        assert!(video.is_open());
        assert!(video.handle_key(&esc));
        assert!(!video.is_open());
    }
}
