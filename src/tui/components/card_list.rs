//! # CardList Component
//!
//! Search results for the picked set, one entry per card:
//!
//! ```text
//! [x] #58 Pikachu
//!     https://assets.tcgdex.net/en/base/base1/58/high.png
//! [ ] #60 Pikachu Illustrator with a name long enough
//!     to wrap onto a second line
//!     no image
//! ```
//!
//! Entries have variable height (names wrap), so the list is drawn on a
//! `tui_scrollview` canvas and `CardListState` keeps the per-entry heights
//! from the last frame to scroll the highlighted entry into view.

use ratatui::Frame;
use ratatui::layout::{Alignment, Position, Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::catalog::CardBrief;
use crate::tui::component::Component;
use crate::tui::components::title_bar::spinner_glyph;
use crate::tui::event::TuiEvent;

/// "[x] " / "    " gutter in front of every line
const GUTTER: usize = 4;

#[derive(Default)]
pub struct CardListState {
    pub selected: usize,
    pub scroll_state: ScrollViewState,
    /// Height of each entry as laid out in the last frame
    pub heights: Vec<u16>,
    pub viewport_height: u16,
}

impl CardListState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Back to the top, used when a new result set arrives.
    pub fn reset(&mut self) {
        self.selected = 0;
        self.scroll_state.set_offset(Position { x: 0, y: 0 });
    }

    /// Move the highlight. Returns true if the event was a navigation key.
    pub fn navigate(&mut self, event: &TuiEvent, len: usize) -> bool {
        if len == 0 {
            return false;
        }
        match event {
            TuiEvent::CursorUp => self.selected = self.selected.saturating_sub(1),
            TuiEvent::CursorDown => self.selected = (self.selected + 1).min(len - 1),
            TuiEvent::PageUp => self.selected = self.selected.saturating_sub(5),
            TuiEvent::PageDown => self.selected = (self.selected + 5).min(len - 1),
            _ => return false,
        }
        self.scroll_to_selected();
        true
    }

    /// Scroll so the highlighted entry is fully visible.
    /// Entries taller than the viewport are aligned to their top edge.
    pub fn scroll_to_selected(&mut self) {
        if self.selected >= self.heights.len() {
            return;
        }
        let top: u16 = self.heights[..self.selected].iter().sum();
        let bottom = top + self.heights[self.selected];
        let offset_y = self.scroll_state.offset().y;

        if top < offset_y {
            self.scroll_state.set_offset(Position { x: 0, y: top });
        } else if bottom > offset_y + self.viewport_height {
            let y = bottom.saturating_sub(self.viewport_height).min(top);
            self.scroll_state.set_offset(Position { x: 0, y });
        }
    }
}

/// Name line(s) for one card, wrapped to `width` columns.
fn wrap_title(card: &CardBrief, width: usize) -> Vec<String> {
    let title = format!("#{} {}", card.local_id, card.name);
    textwrap::wrap(&title, width.max(1))
        .into_iter()
        .map(|line| line.into_owned())
        .collect()
}

fn entry_lines(card: &CardBrief, selected: bool, highlighted: bool, width: usize) -> Vec<Line<'static>> {
    let mark = if selected { "[x] " } else { "[ ] " };
    let mark_style = if selected {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let mut name_style = Style::default().fg(Color::White);
    if highlighted {
        name_style = name_style.add_modifier(Modifier::REVERSED | Modifier::BOLD);
    }

    let mut lines: Vec<Line<'static>> = wrap_title(card, width.saturating_sub(GUTTER))
        .into_iter()
        .enumerate()
        .map(|(i, text)| {
            let gutter = if i == 0 {
                Span::styled(mark, mark_style)
            } else {
                Span::raw("    ")
            };
            Line::from(vec![gutter, Span::styled(text, name_style)])
        })
        .collect();

    let url = card
        .high_res_image_url()
        .unwrap_or_else(|| String::from("no image"));
    lines.push(Line::from(vec![
        Span::raw("    "),
        Span::styled(url, Style::default().fg(Color::DarkGray)),
    ]));
    lines
}

pub struct CardList<'a> {
    pub cards: &'a [CardBrief],
    /// Ids currently in the selection, for the [x] marks
    pub is_selected: &'a dyn Fn(&str) -> bool,
    pub is_searching: bool,
    pub spinner_frame: usize,
    pub focused: bool,
    pub state: &'a mut CardListState,
}

impl Component for CardList<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.state.viewport_height = area.height;

        if self.is_searching || self.cards.is_empty() {
            let text = if self.is_searching {
                format!("{} Searching...", spinner_glyph(self.spinner_frame))
            } else {
                String::from("No cards to show. Type a name and press Enter.")
            };
            let paragraph = Paragraph::new(text)
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center);
            frame.render_widget(paragraph, area);
            return;
        }

        // One column for the scrollbar
        let content_width = area.width.saturating_sub(1);
        self.state.selected = self.state.selected.min(self.cards.len() - 1);

        let entries: Vec<Vec<Line<'static>>> = self
            .cards
            .iter()
            .enumerate()
            .map(|(i, card)| {
                entry_lines(
                    card,
                    (self.is_selected)(&card.id),
                    self.focused && i == self.state.selected,
                    content_width as usize,
                )
            })
            .collect();

        self.state.heights = entries.iter().map(|lines| lines.len() as u16).collect();
        let total_height: u16 = self.state.heights.iter().sum();
        self.state.scroll_to_selected();

        let mut scroll_view = ScrollView::new(Size::new(content_width, total_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let mut y = 0u16;
        for (lines, height) in entries.into_iter().zip(self.state.heights.iter()) {
            scroll_view.render_widget(Paragraph::new(lines), Rect::new(0, y, content_width, *height));
            y += height;
        }

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}
