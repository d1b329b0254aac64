//! # TitleBar Component
//!
//! Top status line.
//!
//! ```text
//! TCG Browser [en] | 12 cards found | ★ 3 selected
//! TCG Browser [en] | ⠹ Searching for "Pikachu"...
//! TCG Browser [en] | Error: network error: connection refused
//! ```
//!
//! An error replaces the status text and is drawn in red, so a failed
//! search can be told apart from one that found nothing.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::tui::component::Component;

const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Spinner glyph for an animation frame counter.
pub fn spinner_glyph(frame: usize) -> &'static str {
    SPINNER_FRAMES[frame % SPINNER_FRAMES.len()]
}

/// Stateless: all fields are props copied from the session each frame.
pub struct TitleBar<'a> {
    pub language: &'a str,
    pub status_message: &'a str,
    pub error: Option<&'a str>,
    pub selected_count: usize,
    /// Some(frame) while a request is in flight
    pub busy_frame: Option<usize>,
}

impl TitleBar<'_> {
    fn spans(&self) -> Vec<Span<'_>> {
        let mut spans = vec![
            Span::styled(
                "TCG Browser",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(" [{}]", self.language),
                Style::default().fg(Color::DarkGray),
            ),
            Span::raw(" | "),
        ];

        if let Some(error) = self.error {
            spans.push(Span::styled(
                format!("Error: {error}"),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ));
        } else {
            if let Some(frame) = self.busy_frame {
                spans.push(Span::styled(
                    format!("{} ", spinner_glyph(frame)),
                    Style::default().fg(Color::Cyan),
                ));
            }
            spans.push(Span::raw(self.status_message));
        }

        if self.selected_count > 0 {
            spans.push(Span::raw(" | "));
            spans.push(Span::styled(
                format!("★ {} selected", self.selected_count),
                Style::default().fg(Color::Green),
            ));
        }
        spans
    }
}

impl Component for TitleBar<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(Line::from(self.spans()), area);
    }
}
