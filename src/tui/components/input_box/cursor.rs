//! Cursor tracking for the single-line InputBox.
//!
//! `CursorState` owns the cursor byte offset and the horizontal scroll
//! offset (in display columns). The text itself stays in `InputBox`; every
//! method takes `buffer: &str` explicitly.

use unicode_width::UnicodeWidthStr;

pub(super) struct CursorState {
    /// Cursor position as byte offset in buffer (0..=buffer.len())
    pub pos: usize,
    /// Display columns hidden off the left edge
    pub scroll_x: u16,
}

impl CursorState {
    pub fn new() -> Self {
        Self { pos: 0, scroll_x: 0 }
    }

    /// Put the cursor at the end of `buffer` (after the text is replaced).
    pub fn move_to_end(&mut self, buffer: &str) {
        self.pos = buffer.len();
        self.scroll_x = 0;
    }

    /// Display column of the cursor within the whole buffer.
    pub fn column(&self, buffer: &str) -> u16 {
        buffer[..self.pos].width() as u16
    }

    /// Scroll so the cursor stays inside a viewport `width` columns wide.
    pub fn update_scroll(&mut self, buffer: &str, width: u16) {
        if width == 0 {
            self.scroll_x = 0;
            return;
        }
        let col = self.column(buffer);
        if col < self.scroll_x {
            self.scroll_x = col;
        } else if col >= self.scroll_x + width {
            self.scroll_x = col + 1 - width;
        }
    }
}

/// Byte offset of the character boundary before `pos`.
pub(super) fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Byte offset of the character boundary after `pos`.
pub(super) fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .char_indices()
        .nth(1)
        .map(|(i, _)| pos + i)
        .unwrap_or(text.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_boundaries_multibyte() {
        let text = "Pokémon";
        let e_acute = text.find('é').unwrap();
        assert_eq!(next_char_boundary(text, e_acute), e_acute + 2);
        assert_eq!(prev_char_boundary(text, e_acute + 2), e_acute);
        assert_eq!(prev_char_boundary(text, 0), 0);
        assert_eq!(next_char_boundary(text, text.len()), text.len());
    }

    #[test]
    fn test_scroll_follows_cursor() {
        let buffer = "abcdefghij";
        let mut cursor = CursorState::new();
        cursor.move_to_end(buffer);
        cursor.update_scroll(buffer, 4);
        assert_eq!(cursor.scroll_x, 7);

        cursor.pos = 2;
        cursor.update_scroll(buffer, 4);
        assert_eq!(cursor.scroll_x, 2);
    }

    #[test]
    fn test_column_counts_wide_chars() {
        let buffer = "ポケモン";
        let mut cursor = CursorState::new();
        cursor.move_to_end(buffer);
        assert_eq!(cursor.column(buffer), 8);
    }
}
