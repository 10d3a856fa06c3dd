//! # SuggestionList Component
//!
//! Autocomplete popup drawn just above the input box.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `SuggestionListState` lives in `TuiState` (scroll offset, last drawn area)
//! - `SuggestionList` is created each frame with the core `SuggestionState`

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, List, ListItem, ListState};

use crate::core::autocomplete::SuggestionState;
use crate::tui::component::Component;
use crate::tui::palette::Palette;

/// Rows shown before the list scrolls.
pub const MAX_VISIBLE: u16 = 8;
const MAX_WIDTH: u16 = 60;

#[derive(Default)]
pub struct SuggestionListState {
    pub list_state: ListState,
    /// Where the popup was drawn last frame (`None` = hidden)
    pub area: Option<Rect>,
}

impl SuggestionListState {
    /// Index of the suggestion under a click, if any.
    pub fn hit_test(&self, col: u16, row: u16) -> Option<usize> {
        let area = self.area?;
        let inner = Rect {
            x: area.x + 1,
            y: area.y + 1,
            width: area.width.saturating_sub(2),
            height: area.height.saturating_sub(2),
        };
        let inside = col >= inner.x
            && col < inner.x + inner.width
            && row >= inner.y
            && row < inner.y + inner.height;
        inside.then(|| self.list_state.offset() + (row - inner.y) as usize)
    }
}

/// Popup rect for `count` suggestions, sitting on top of `input_area`.
pub fn popup_rect(input_area: Rect, count: usize) -> Rect {
    let rows = (count as u16).min(MAX_VISIBLE);
    let height = (rows + 2).min(input_area.y);
    Rect {
        x: input_area.x,
        y: input_area.y.saturating_sub(height),
        width: input_area.width.min(MAX_WIDTH),
        height,
    }
}

pub struct SuggestionList<'a> {
    pub state: &'a mut SuggestionListState,
    pub suggestions: &'a SuggestionState,
    pub marker: char,
    pub palette: Palette,
}

impl<'a> SuggestionList<'a> {
    pub fn new(
        state: &'a mut SuggestionListState,
        suggestions: &'a SuggestionState,
        marker: char,
        palette: Palette,
    ) -> Self {
        Self {
            state,
            suggestions,
            marker,
            palette,
        }
    }
}

impl<'a> Component for SuggestionList<'a> {
    /// `area` is the input box; the popup is placed above it.
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        if !self.suggestions.is_visible() {
            self.state.area = None;
            self.state.list_state = ListState::default();
            return;
        }

        let popup = popup_rect(area, self.suggestions.matches().len());
        if popup.height < 3 {
            self.state.area = None;
            return;
        }
        frame.render_widget(Clear, popup);

        let base = self.palette.base();
        let items: Vec<ListItem> = self
            .suggestions
            .matches()
            .iter()
            .map(|command| {
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{}{:<10}", self.marker, command.name), base),
                    Span::styled(format!(" {}", command.description), base.fg(self.palette.muted)),
                ]))
            })
            .collect();

        let list = List::new(items)
            .block(
                Block::bordered()
                    .border_style(base.fg(self.palette.border))
                    .style(base),
            )
            .highlight_style(self.palette.selected());

        self.state.list_state.select(self.suggestions.selected());
        frame.render_stateful_widget(list, popup, &mut self.state.list_state);
        self.state.area = Some(popup);
    }
}
