//! # Selection Overlay Component
//!
//! Full-screen overlay listing "my cards". Opened with Ctrl+S (only when
//! the selection is non-empty), dismissed with Esc or Ctrl+S.
//!
//! - `SelectionOverlayState` lives in `TuiState`
//! - `SelectionOverlay` is created each frame with borrowed state

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Clear, List, ListItem, ListState, Padding, Paragraph};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::catalog::CardBrief;
use crate::tui::event::TuiEvent;

/// Persistent state for the overlay.
#[derive(Default)]
pub struct SelectionOverlayState {
    pub selected: usize,
    pub list_state: ListState,
}

/// Events emitted by the overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionEvent {
    /// Remove (or re-add) the card at this index of the selection
    Toggle(usize),
    Dismiss,
}

impl SelectionOverlayState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle a key event against a selection of `len` cards.
    pub fn handle_event(&mut self, event: &TuiEvent, len: usize) -> Option<SelectionEvent> {
        match event {
            TuiEvent::Escape | TuiEvent::ShowSelection => Some(SelectionEvent::Dismiss),
            TuiEvent::CursorUp => {
                self.selected = self.selected.saturating_sub(1);
                None
            }
            TuiEvent::CursorDown => {
                if len > 0 {
                    self.selected = (self.selected + 1).min(len - 1);
                }
                None
            }
            TuiEvent::InputChar(' ') | TuiEvent::Submit if self.selected < len => {
                Some(SelectionEvent::Toggle(self.selected))
            }
            _ => None,
        }
    }

    /// Keep the highlight valid after the selection shrank.
    pub fn clamp(&mut self, len: usize) {
        if len == 0 {
            self.selected = 0;
            self.list_state.select(None);
        } else {
            self.selected = self.selected.min(len - 1);
            self.list_state.select(Some(self.selected));
        }
    }
}

/// Transient render wrapper for the overlay.
pub struct SelectionOverlay<'a> {
    cards: &'a [CardBrief],
    state: &'a mut SelectionOverlayState,
}

impl<'a> SelectionOverlay<'a> {
    pub fn new(cards: &'a [CardBrief], state: &'a mut SelectionOverlayState) -> Self {
        Self { cards, state }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let overlay = centered_rect(80, 70, area);
        frame.render_widget(Clear, overlay);

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Yellow))
            .title(format!(" My cards ({}) ", self.cards.len()))
            .title_alignment(Alignment::Left)
            .title_bottom(Line::from(" Space Remove  ↑↓ Move  Esc Back ").centered())
            .padding(Padding::horizontal(1));

        if self.cards.is_empty() {
            let empty = Paragraph::new("No cards selected.")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(empty, overlay);
            return;
        }

        self.state.clamp(self.cards.len());
        // borders + padding
        let inner_width = overlay.width.saturating_sub(4) as usize;

        let items: Vec<ListItem> = self
            .cards
            .iter()
            .enumerate()
            .map(|(i, card)| {
                let style = if i == self.state.selected {
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD | Modifier::REVERSED)
                } else {
                    Style::default().fg(Color::Gray)
                };
                let title = truncate_str(&format!("#{} {}", card.local_id, card.name), inner_width);
                let url = card
                    .high_res_image_url()
                    .unwrap_or_else(|| String::from("no image"));
                ListItem::new(vec![
                    Line::from(Span::styled(title, style)),
                    Line::from(Span::styled(
                        truncate_str(&format!("  {url}"), inner_width),
                        Style::default().fg(Color::DarkGray),
                    )),
                ])
            })
            .collect();

        frame.render_stateful_widget(List::new(items).block(block), overlay, &mut self.state.list_state);
    }
}

/// Truncate to `max_width` display columns, ending in "..." if cut.
fn truncate_str(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width <= 3 {
        return ".".repeat(max_width);
    }
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > max_width - 3 {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push_str("...");
    out
}

/// Compute a centered rect using percentage of the outer rect.
fn centered_rect(percent_x: u16, percent_y: u16, outer: Rect) -> Rect {
    let [_, center_v, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(outer);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(center_v);
    center
}
