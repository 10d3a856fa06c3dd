//! # StatusBar Component
//!
//! Top line: site title, the dispatcher status, and a "↓ New" marker when
//! output exists below the scroll position.
//!
//! Stateless; all fields are props. The dispatcher returns to `OPERATIONAL`
//! at the end of every command, so the bar also shows the outcome of the
//! last command next to it.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};

use crate::core::status::Status;
use crate::tui::component::Component;
use crate::tui::palette::Palette;

pub struct StatusBar {
    pub title: String,
    pub status: Status,
    /// Outcome of the last command, if any
    pub last_outcome: Option<Status>,
    pub has_unseen_content: bool,
    pub palette: Palette,
}

impl StatusBar {
    pub fn new(
        title: String,
        status: Status,
        last_outcome: Option<Status>,
        has_unseen_content: bool,
        palette: Palette,
    ) -> Self {
        Self {
            title,
            status,
            last_outcome,
            has_unseen_content,
            palette,
        }
    }

    fn status_text(&self) -> String {
        match &self.last_outcome {
            Some(outcome) if self.status == Status::Operational => {
                format!(" STATUS: {} (last: {}) ", self.status, outcome)
            }
            _ => format!(" STATUS: {} ", self.status),
        }
    }
}

impl Component for StatusBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let base = self.palette.base();
        let mut spans = vec![
            Span::styled(format!(" {} ", self.title), base.fg(self.palette.accent)),
            Span::styled("|", base.fg(self.palette.muted)),
            Span::styled(self.status_text(), self.palette.status_style(&self.status)),
        ];
        if self.has_unseen_content {
            spans.push(Span::styled(" ↓ New", base.fg(self.palette.accent)));
        }
        frame.render_widget(Line::from(spans).style(base), area);
    }
}
