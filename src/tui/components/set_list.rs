//! # SetList Component
//!
//! Suggestions for the set filter, shown while no set is picked.
//!
//! Same split as the other list views:
//! - `SetListState` lives in `TuiState` (highlight survives between frames)
//! - `SetList` is built each frame from the session's filtered sets

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, List, ListItem, ListState, Paragraph};

use crate::catalog::SetResume;
use crate::tui::component::Component;
use crate::tui::event::TuiEvent;

/// Highlighted suggestion, clamped to the current match count.
#[derive(Default)]
pub struct SetListState {
    pub selected: usize,
    pub list_state: ListState,
}

impl SetListState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep the highlight inside `0..len` after the filter changed.
    pub fn clamp(&mut self, len: usize) {
        if len == 0 {
            self.selected = 0;
            self.list_state.select(None);
        } else {
            self.selected = self.selected.min(len - 1);
            self.list_state.select(Some(self.selected));
        }
    }

    /// Move the highlight. Returns true if the event was a navigation key.
    pub fn navigate(&mut self, event: &TuiEvent, len: usize) -> bool {
        if len == 0 {
            return false;
        }
        match event {
            TuiEvent::CursorUp => self.selected = self.selected.saturating_sub(1),
            TuiEvent::CursorDown => self.selected = (self.selected + 1).min(len - 1),
            TuiEvent::PageUp => self.selected = self.selected.saturating_sub(10),
            TuiEvent::PageDown => self.selected = (self.selected + 10).min(len - 1),
            _ => return false,
        }
        self.list_state.select(Some(self.selected));
        true
    }

    /// Index of the highlighted suggestion, if any.
    pub fn selected_index(&self, len: usize) -> Option<usize> {
        (self.selected < len).then_some(self.selected)
    }
}

pub struct SetList<'a> {
    pub sets: &'a [&'a SetResume],
    pub filter: &'a str,
    pub loading: bool,
    /// Highlight is only drawn when the list has keyboard focus
    pub focused: bool,
    pub state: &'a mut SetListState,
}

impl SetList<'_> {
    fn placeholder(&self) -> Option<&'static str> {
        if self.loading {
            Some("Loading sets...")
        } else if self.filter.trim().is_empty() {
            Some("Start typing to search sets")
        } else if self.sets.is_empty() {
            Some("No sets found")
        } else {
            None
        }
    }
}

fn set_line(set: &SetResume) -> Line<'_> {
    let mut spans = vec![
        Span::styled(set.name.as_str(), Style::default().fg(Color::White)),
        Span::styled(format!("  {}", set.id), Style::default().fg(Color::DarkGray)),
    ];
    if let Some(count) = &set.card_count {
        spans.push(Span::styled(
            format!("  {} cards", count.total),
            Style::default().fg(Color::DarkGray),
        ));
    }
    Line::from(spans)
}

impl Component for SetList<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(if self.focused {
                Color::Green
            } else {
                Color::DarkGray
            }))
            .title(" Sets ");

        if let Some(text) = self.placeholder() {
            let paragraph = Paragraph::new(text)
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(paragraph, area);
            return;
        }

        self.state.clamp(self.sets.len());
        let items: Vec<ListItem> = self.sets.iter().map(|set| ListItem::new(set_line(set))).collect();

        let highlight = if self.focused {
            Style::default().add_modifier(Modifier::REVERSED | Modifier::BOLD)
        } else {
            Style::default()
        };
        let list = List::new(items)
            .block(block)
            .highlight_style(highlight)
            .highlight_symbol("> ");

        frame.render_stateful_widget(list, area, &mut self.state.list_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_sets;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render_text(list: &mut SetList<'_>) -> String {
        let backend = TestBackend::new(50, 8);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| list.render(f, f.area())).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>()
    }

    #[test]
    fn test_navigate_clamps() {
        let mut state = SetListState::new();
        assert!(state.navigate(&TuiEvent::CursorDown, 2));
        assert!(state.navigate(&TuiEvent::CursorDown, 2));
        assert_eq!(state.selected, 1);
        assert!(state.navigate(&TuiEvent::PageUp, 2));
        assert_eq!(state.selected, 0);
        assert!(!state.navigate(&TuiEvent::CursorDown, 0));
        assert!(!state.navigate(&TuiEvent::Submit, 2));
    }

    #[test]
    fn test_clamp_after_filter_shrinks() {
        let mut state = SetListState::new();
        state.selected = 4;
        state.clamp(2);
        assert_eq!(state.selected_index(2), Some(1));
        state.clamp(0);
        assert_eq!(state.selected_index(0), None);
    }

    #[test]
    fn test_render_matches() {
        let sets = sample_sets();
        let matches: Vec<&SetResume> = sets.iter().filter(|s| s.name.contains("Base")).collect();
        let mut state = SetListState::new();
        let text = render_text(&mut SetList {
            sets: &matches,
            filter: "base",
            loading: false,
            focused: true,
            state: &mut state,
        });
        assert!(text.contains("Base Set"));
        assert!(text.contains("Base Set 2"));
        assert!(!text.contains("Jungle"));
    }

    #[test]
    fn test_render_no_match_only_with_filter() {
        let mut state = SetListState::new();
        let text = render_text(&mut SetList {
            sets: &[],
            filter: "zzz",
            loading: false,
            focused: false,
            state: &mut state,
        });
        assert!(text.contains("No sets found"));

        let text = render_text(&mut SetList {
            sets: &[],
            filter: "",
            loading: false,
            focused: false,
            state: &mut state,
        });
        assert!(!text.contains("No sets found"));
        assert!(text.contains("Start typing"));
    }

    #[test]
    fn test_render_loading() {
        let mut state = SetListState::new();
        let text = render_text(&mut SetList {
            sets: &[],
            filter: "base",
            loading: true,
            focused: false,
            state: &mut state,
        });
        assert!(text.contains("Loading sets..."));
    }
}
