//! # InputBox Component
//!
//! Single-line text field used for the set filter and the card name.
//!
//! The buffer is internal state, but the session owns the real value: the
//! event loop pushes it back in with [`InputBox::set_text`] every frame, so a
//! picked set name or a reset shows up here without special cases.
//!
//! A locked box renders its text dimmed and ignores editing (the set field
//! once a set is picked).

mod cursor;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Paragraph};
use unicode_width::UnicodeWidthChar;

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

use cursor::{CursorState, next_char_boundary, prev_char_boundary};

/// Border (2) + padding (2) consumed horizontally by the bordered block
const HORIZONTAL_OVERHEAD: u16 = 4;
/// Fixed height: one text line plus top and bottom borders
pub const INPUT_HEIGHT: u16 = 3;

/// High-level events emitted by the InputBox
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Enter pressed; carries the current text (the buffer is kept)
    Submit(String),
    /// Text or cursor changed
    ContentChanged,
}

pub struct InputBox {
    pub buffer: String,
    /// Block title, e.g. "Set"
    pub title: String,
    /// Dim hint shown while empty
    pub placeholder: String,
    /// Receives keystrokes (Prop)
    pub focused: bool,
    /// Read-only (Prop)
    pub locked: bool,
    cursor: CursorState,
}

impl InputBox {
    pub fn new(title: impl Into<String>, placeholder: impl Into<String>) -> Self {
        Self {
            buffer: String::new(),
            title: title.into(),
            placeholder: placeholder.into(),
            focused: false,
            locked: false,
            cursor: CursorState::new(),
        }
    }

    /// Replace the text if it differs, leaving the cursor at the end.
    pub fn set_text(&mut self, text: &str) {
        if self.buffer != text {
            self.buffer = text.to_string();
            self.cursor.move_to_end(&self.buffer);
        }
    }

    /// The part of the buffer visible from display column `scroll_x`.
    fn visible_text(&self, width: u16) -> String {
        let mut skipped = 0u16;
        let mut used = 0u16;
        let mut out = String::new();
        for c in self.buffer.chars() {
            let w = c.width().unwrap_or(0) as u16;
            if skipped < self.cursor.scroll_x {
                skipped += w;
                continue;
            }
            if used + w > width {
                break;
            }
            used += w;
            out.push(c);
        }
        out
    }
}

impl Component for InputBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let inner_width = area.width.saturating_sub(HORIZONTAL_OVERHEAD);
        self.cursor.update_scroll(&self.buffer, inner_width);

        let border_style = if self.locked {
            Style::default().fg(Color::DarkGray)
        } else if self.focused {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::Gray)
        };

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(format!(" {} ", self.title))
            .padding(ratatui::widgets::Padding::horizontal(1));

        let paragraph = if self.buffer.is_empty() && !self.locked {
            Paragraph::new(self.placeholder.as_str())
                .style(Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC))
        } else if self.locked {
            Paragraph::new(self.visible_text(inner_width))
                .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        } else {
            Paragraph::new(self.visible_text(inner_width)).style(Style::default().fg(Color::White))
        };

        frame.render_widget(paragraph.block(block), area);

        if self.focused && !self.locked {
            let col = self.cursor.column(&self.buffer).saturating_sub(self.cursor.scroll_x);
            let x = area.x + 2 + col;
            let y = area.y + 1;
            frame.set_cursor_position((x.min(area.right().saturating_sub(2)), y));
        }
    }
}

impl EventHandler for InputBox {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        if self.locked {
            return None;
        }
        let pos = self.cursor.pos;
        match event {
            TuiEvent::InputChar(c) => {
                self.buffer.insert(pos, *c);
                self.cursor.pos += c.len_utf8();
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Paste(text) => {
                // Single line: newlines in pasted text become spaces
                let text = text.replace(['\r', '\n'], " ");
                self.buffer.insert_str(pos, &text);
                self.cursor.pos += text.len();
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Backspace if pos > 0 => {
                let prev = prev_char_boundary(&self.buffer, pos);
                self.buffer.drain(prev..pos);
                self.cursor.pos = prev;
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Delete if pos < self.buffer.len() => {
                let next = next_char_boundary(&self.buffer, pos);
                self.buffer.drain(pos..next);
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::CursorLeft if pos > 0 => {
                self.cursor.pos = prev_char_boundary(&self.buffer, pos);
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::CursorRight if pos < self.buffer.len() => {
                self.cursor.pos = next_char_boundary(&self.buffer, pos);
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::CursorHome if pos > 0 => {
                self.cursor.pos = 0;
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::CursorEnd if pos < self.buffer.len() => {
                self.cursor.pos = self.buffer.len();
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Submit => Some(InputEvent::Submit(self.buffer.clone())),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn type_str(input: &mut InputBox, text: &str) {
        for c in text.chars() {
            input.handle_event(&TuiEvent::InputChar(c));
        }
    }

    #[test]
    fn test_typing_and_backspace() {
        let mut input = InputBox::new("Set", "");
        type_str(&mut input, "ab");
        assert_eq!(input.buffer, "ab");

        let res = input.handle_event(&TuiEvent::Backspace);
        assert_eq!(res, Some(InputEvent::ContentChanged));
        assert_eq!(input.buffer, "a");

        input.handle_event(&TuiEvent::Backspace);
        assert_eq!(input.handle_event(&TuiEvent::Backspace), None);
    }

    #[test]
    fn test_edit_in_middle() {
        let mut input = InputBox::new("Card", "");
        type_str(&mut input, "Pkachu");
        for _ in 0..5 {
            input.handle_event(&TuiEvent::CursorLeft);
        }
        input.handle_event(&TuiEvent::InputChar('i'));
        assert_eq!(input.buffer, "Pikachu");

        input.handle_event(&TuiEvent::CursorHome);
        input.handle_event(&TuiEvent::Delete);
        assert_eq!(input.buffer, "ikachu");
    }

    #[test]
    fn test_submit_keeps_buffer() {
        let mut input = InputBox::new("Card", "");
        type_str(&mut input, "Mew");
        let res = input.handle_event(&TuiEvent::Submit);
        assert_eq!(res, Some(InputEvent::Submit("Mew".to_string())));
        assert_eq!(input.buffer, "Mew");
    }

    #[test]
    fn test_paste_flattens_newlines() {
        let mut input = InputBox::new("Card", "");
        input.handle_event(&TuiEvent::Paste("Dark\nCharizard".to_string()));
        assert_eq!(input.buffer, "Dark Charizard");
    }

    #[test]
    fn test_locked_ignores_input() {
        let mut input = InputBox::new("Set", "");
        input.set_text("Base Set");
        input.locked = true;
        assert_eq!(input.handle_event(&TuiEvent::InputChar('x')), None);
        assert_eq!(input.handle_event(&TuiEvent::Submit), None);
        assert_eq!(input.buffer, "Base Set");
    }

    #[test]
    fn test_set_text_moves_cursor_to_end() {
        let mut input = InputBox::new("Set", "");
        input.set_text("Jungle");
        input.handle_event(&TuiEvent::InputChar('!'));
        assert_eq!(input.buffer, "Jungle!");
    }

    #[test]
    fn test_render_shows_title_and_placeholder() {
        let backend = TestBackend::new(40, 3);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut input = InputBox::new("Set", "type a set name");

        terminal
            .draw(|f| {
                input.render(f, f.area());
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        let text = buffer.content().iter().map(|c| c.symbol()).collect::<String>();
        assert!(text.contains("Set"));
        assert!(text.contains("type a set name"));
    }
}
