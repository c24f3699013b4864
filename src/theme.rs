use ratatui::style::{Color, Modifier, Style};

pub struct Theme;

impl Theme {
    pub fn border() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    pub fn border_focused() -> Style {
        Style::default().fg(Color::Cyan)
    }

    pub fn title() -> Style {
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
    }

    pub fn label() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn required_label() -> Style {
        Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD)
    }

    pub fn input_text() -> Style {
        Style::default().fg(Color::White)
    }

    pub fn placeholder() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    pub fn error_text() -> Style {
        Style::default().fg(Color::Red)
    }

    pub fn ok_mark() -> Style {
        Style::default().fg(Color::Green)
    }

    pub fn error_mark() -> Style {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    }

    pub fn disabled() -> Style {
        Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM)
    }

    pub fn dialog_title() -> Style {
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
    }

    pub fn dialog_message() -> Style {
        Style::default().fg(Color::White)
    }

    pub fn dialog_border_info() -> Style {
        Style::default().fg(Color::Cyan)
    }

    pub fn dialog_border_success() -> Style {
        Style::default().fg(Color::Green)
    }

    pub fn dialog_border_error() -> Style {
        Style::default().fg(Color::Red)
    }

    pub fn dialog_border_confirm() -> Style {
        Style::default().fg(Color::Yellow)
    }

    pub fn button() -> Style {
        Style::default().fg(Color::White)
    }

    pub fn button_primary() -> Style {
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
    }

    pub fn button_focused() -> Style {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    }

    pub fn section_header() -> Style {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    }

    pub fn faq_question() -> Style {
        Style::default().fg(Color::White)
    }

    pub fn faq_question_open() -> Style {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    }

    pub fn faq_answer() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn selection() -> Style {
        Style::default().bg(Color::DarkGray)
    }

    pub fn overlay_hint() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    pub fn status_bar() -> Style {
        Style::default().fg(Color::White).bg(Color::DarkGray)
    }
}
