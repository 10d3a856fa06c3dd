//! # InputBox Component
//!
//! The single-line prompt.
//!
//! ## Responsibilities
//!
//! - Capture text input
//! - Handle editing (backspace, delete, cursor movement, paste)
//! - Hand the control keys (Enter, Tab, Up, Down) to `core::input`
//! - Display the buffer with horizontal scrolling
//!
//! The buffer is public: `core::input::InputController` rewrites it on
//! history navigation and completion, after which the parent calls
//! [`InputBox::cursor_to_end`].

mod cursor;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph};

use crate::core::input::ControlKey;
use crate::core::transcript::sanitize;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;
use crate::tui::palette::Palette;

use cursor::{CursorState, PROMPT, next_char_boundary, prev_char_boundary, text_width, visible_slice};

/// High-level events emitted by the InputBox
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// A key the input controller interprets
    Control(ControlKey),
    /// The text changed
    ContentChanged,
    /// Only the cursor moved
    CursorMoved,
}

/// # Props
///
/// - `palette`: colors for the current theme
/// - `dimmed`: drawn muted while input is not accepted (overlay open)
pub struct InputBox {
    /// Text buffer
    pub buffer: String,
    pub palette: Palette,
    pub dimmed: bool,
    cursor: CursorState,
}

impl InputBox {
    pub fn new(palette: Palette) -> Self {
        Self {
            buffer: String::new(),
            palette,
            dimmed: false,
            cursor: CursorState::new(),
        }
    }

    /// Call after the buffer was replaced from outside.
    pub fn cursor_to_end(&mut self) {
        self.cursor.to_end(&self.buffer);
    }

    fn insert(&mut self, text: &str) {
        self.buffer.insert_str(self.cursor.pos, text);
        self.cursor.pos += text.len();
    }
}

impl Component for InputBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        // The buffer may have been replaced since the last frame
        self.cursor.pos = self.cursor.pos.min(self.buffer.len());
        while !self.buffer.is_char_boundary(self.cursor.pos) {
            self.cursor.pos -= 1;
        }

        let width = text_width(area.width);
        self.cursor.update_scroll(&self.buffer, width);
        let visible = visible_slice(&self.buffer, self.cursor.scroll, width);

        let style = if self.dimmed {
            self.palette.base().fg(self.palette.muted)
        } else {
            self.palette.base()
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(style.fg(self.palette.border))
            .title("Input");
        let line = Line::from(vec![
            Span::styled(PROMPT, style.add_modifier(Modifier::BOLD)),
            Span::styled(visible, style),
        ]);

        frame.render_widget(Paragraph::new(line).block(block).style(style), area);

        if !self.dimmed {
            let (x, y) = self.cursor.screen_pos(&self.buffer, area);
            frame.set_cursor_position((x, y));
        }
    }
}

impl EventHandler for InputBox {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                let mut tmp = [0u8; 4];
                self.insert(c.encode_utf8(&mut tmp));
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Paste(text) => {
                // Single-line field
                let flat = sanitize(&text.replace(['\r', '\n'], " "));
                if flat.is_empty() {
                    return None;
                }
                self.insert(&flat);
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Backspace => {
                if self.cursor.pos > 0 {
                    let prev = prev_char_boundary(&self.buffer, self.cursor.pos);
                    self.buffer.drain(prev..self.cursor.pos);
                    self.cursor.pos = prev;
                    Some(InputEvent::ContentChanged)
                } else {
                    None
                }
            }
            TuiEvent::Delete => {
                if self.cursor.pos < self.buffer.len() {
                    let next = next_char_boundary(&self.buffer, self.cursor.pos);
                    self.buffer.drain(self.cursor.pos..next);
                    Some(InputEvent::ContentChanged)
                } else {
                    None
                }
            }
            TuiEvent::CursorLeft => (self.cursor.pos > 0).then(|| {
                self.cursor.pos = prev_char_boundary(&self.buffer, self.cursor.pos);
                InputEvent::CursorMoved
            }),
            TuiEvent::CursorRight => (self.cursor.pos < self.buffer.len()).then(|| {
                self.cursor.pos = next_char_boundary(&self.buffer, self.cursor.pos);
                InputEvent::CursorMoved
            }),
            TuiEvent::CursorHome => (self.cursor.pos != 0).then(|| {
                self.cursor.pos = 0;
                InputEvent::CursorMoved
            }),
            TuiEvent::CursorEnd => (self.cursor.pos != self.buffer.len()).then(|| {
                self.cursor.to_end(&self.buffer);
                InputEvent::CursorMoved
            }),
            TuiEvent::Submit => {
                let event = InputEvent::Control(ControlKey::Enter);
                self.cursor.reset();
                Some(event)
            }
            TuiEvent::Tab => Some(InputEvent::Control(ControlKey::Tab)),
            TuiEvent::CursorUp => Some(InputEvent::Control(ControlKey::Up)),
            TuiEvent::CursorDown => Some(InputEvent::Control(ControlKey::Down)),
            _ => None,
        }
    }
}
