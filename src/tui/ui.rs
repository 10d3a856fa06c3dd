use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::widgets::Block;

use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{MapOverlay, StatusBar, SuggestionList, TranscriptView};
use crate::tui::palette::Palette;

pub struct ScreenLayout {
    pub status: Rect,
    pub transcript: Rect,
    pub input: Rect,
}

pub fn screen_layout(area: Rect) -> ScreenLayout {
    use Constraint::{Length, Min};
    let [status, transcript, input] = Layout::vertical([Length(1), Min(0), Length(3)]).areas(area);
    ScreenLayout {
        status,
        transcript,
        input,
    }
}

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    let palette = Palette::for_theme(app.theme);
    let layout = screen_layout(frame.area());

    frame.render_widget(Block::default().style(palette.base()), frame.area());

    StatusBar::new(
        app.site_title.clone(),
        app.status.current().clone(),
        app.status.last_outcome().cloned(),
        tui.transcript_view.has_unseen_content(),
        palette,
    )
    .render(frame, layout.status);

    TranscriptView::new(&mut tui.transcript_view, &app.transcript, palette)
        .render(frame, layout.transcript);

    tui.input_box.palette = palette;
    tui.input_box.dimmed = app.map.is_open();
    tui.input_box.render(frame, layout.input);

    if app.map.is_open() {
        MapOverlay::new(app.map.phase(), palette).render(frame, frame.area());
    } else {
        SuggestionList::new(
            &mut tui.suggestion_list,
            &app.input.suggestions,
            app.catalog.marker(),
            palette,
        )
        .render(frame, layout.input);
    }
}
