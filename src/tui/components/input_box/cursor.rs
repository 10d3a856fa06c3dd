//! Cursor position and horizontal scrolling for the single-line InputBox.
//!
//! `CursorState` owns the cursor byte offset and the column scroll offset.
//! Columns are display columns (`unicode-width`), not chars or bytes.

use ratatui::layout::Rect;
use unicode_width::UnicodeWidthChar;
use unicode_width::UnicodeWidthStr;

/// Border (1) on the left.
pub const BORDER_OFFSET: u16 = 1;
/// The prompt drawn before the text.
pub const PROMPT: &str = "> ";
pub const PROMPT_WIDTH: u16 = 2;

/// Columns available for text inside a box of `outer_width`.
pub fn text_width(outer_width: u16) -> u16 {
    outer_width.saturating_sub(2 * BORDER_OFFSET + PROMPT_WIDTH)
}

pub fn prev_char_boundary(s: &str, pos: usize) -> usize {
    s[..pos].char_indices().next_back().map(|(i, _)| i).unwrap_or(0)
}

pub fn next_char_boundary(s: &str, pos: usize) -> usize {
    s[pos..]
        .chars()
        .next()
        .map(|c| pos + c.len_utf8())
        .unwrap_or(s.len())
}

/// The part of `buffer` that fits in `width` columns starting at column `scroll`.
pub fn visible_slice(buffer: &str, scroll: u16, width: u16) -> String {
    let (scroll, width) = (scroll as usize, width as usize);
    let mut col = 0;
    let mut out = String::new();
    for c in buffer.chars() {
        let w = c.width().unwrap_or(0);
        if col >= scroll {
            if col + w > scroll + width {
                break;
            }
            out.push(c);
        }
        col += w;
    }
    out
}

pub(super) struct CursorState {
    /// Cursor position as byte offset in buffer (0..=buffer.len())
    pub pos: usize,
    /// First visible column
    pub scroll: u16,
}

impl CursorState {
    pub fn new() -> Self {
        Self { pos: 0, scroll: 0 }
    }

    pub fn reset(&mut self) {
        self.pos = 0;
        self.scroll = 0;
    }

    pub fn to_end(&mut self, buffer: &str) {
        self.pos = buffer.len();
    }

    /// Display column of the cursor.
    pub fn column(&self, buffer: &str) -> u16 {
        buffer[..self.pos].width() as u16
    }

    /// Scrolls so the cursor column stays inside `width` columns.
    pub fn update_scroll(&mut self, buffer: &str, width: u16) {
        if width == 0 {
            self.scroll = 0;
            return;
        }
        let col = self.column(buffer);
        if col < self.scroll {
            self.scroll = col;
        } else if col >= self.scroll + width {
            self.scroll = col + 1 - width;
        }
    }

    /// Screen position of the cursor inside `area` (the bordered box).
    pub fn screen_pos(&self, buffer: &str, area: Rect) -> (u16, u16) {
        let col = self.column(buffer).saturating_sub(self.scroll);
        (
            area.x + BORDER_OFFSET + PROMPT_WIDTH + col,
            area.y + BORDER_OFFSET,
        )
    }
}
