//! Colors for the two themes.

use ratatui::style::{Color, Modifier, Style};

use crate::core::status::Status;
use crate::core::theme::Theme;
use crate::core::transcript::LineClass;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub text: Color,
    pub muted: Color,
    pub accent: Color,
    pub error: Color,
    pub result: Color,
    pub border: Color,
}

impl Palette {
    pub const DARK: Palette = Palette {
        background: Color::Black,
        text: Color::Green,
        muted: Color::DarkGray,
        accent: Color::Cyan,
        error: Color::LightRed,
        result: Color::Yellow,
        border: Color::Green,
    };

    pub const LIGHT: Palette = Palette {
        background: Color::White,
        text: Color::Black,
        muted: Color::Gray,
        accent: Color::Blue,
        error: Color::Red,
        result: Color::Magenta,
        border: Color::DarkGray,
    };

    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self::DARK,
            Theme::Light => Self::LIGHT,
        }
    }

    pub fn base(&self) -> Style {
        Style::default().fg(self.text).bg(self.background)
    }

    pub fn line_style(&self, class: LineClass) -> Style {
        let base = self.base();
        match class {
            LineClass::Echo => base.fg(self.accent),
            LineClass::Output => base,
            LineClass::Error => base.fg(self.error),
            LineClass::Result => base.fg(self.result),
            LineClass::Welcome => base.add_modifier(Modifier::BOLD),
        }
    }

    pub fn status_style(&self, status: &Status) -> Style {
        let style = self.base().add_modifier(Modifier::REVERSED);
        if status.is_error() {
            style.fg(self.error)
        } else {
            style
        }
    }

    pub fn selected(&self) -> Style {
        self.base().fg(self.accent).add_modifier(Modifier::BOLD | Modifier::REVERSED)
    }
}
