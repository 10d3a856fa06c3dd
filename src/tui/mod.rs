//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! translates keyboard and mouse events into core `Action` values, and
//! performs the `Effect`s that `update()` returns (background fetches and
//! the typing ticker).
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! The event loop uses conditional redraw to avoid unnecessary work:
//!
//! - **Busy** (welcome animation, index or graph loading): polls at the
//!   typing speed so background actions are picked up promptly.
//! - **Idle**: sleeps up to 500ms, only redraws on events, background
//!   actions or terminal resize.
//!
//! A `SteadyBlock` cursor style is used instead of a blinking cursor because
//! ratatui's `set_cursor_position` resets the terminal's blink timer on every
//! `draw()` call.

mod component;
mod components;
mod event;
mod palette;
mod ui;

use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::Duration;

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use log::{debug, info, warn};
use ratatui::layout::Rect;
use tokio::task::AbortHandle;

use crate::core::action::{Action, Effect, update};
use crate::core::input::KeyOutcome;
use crate::core::listeners::Trigger;
use crate::core::state::App;
use crate::graph::load_graph_layout;
use crate::search::{IndexState, load_search_index};
use crate::site::SiteFetcher;
use crate::tui::component::EventHandler;
use crate::tui::components::{
    InputBox, InputEvent, OverlayClick, SuggestionListState, TranscriptViewState, classify_click,
    overlay_rect,
};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};
use crate::tui::palette::Palette;

const IDLE_POLL: Duration = Duration::from_millis(500);
const BUSY_POLL_MAX: Duration = Duration::from_millis(80);

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub transcript_view: TranscriptViewState,
    pub input_box: InputBox,
    pub suggestion_list: SuggestionListState,
}

impl TuiState {
    pub fn new(palette: Palette) -> Self {
        Self {
            transcript_view: TranscriptViewState::new(),
            input_box: InputBox::new(palette),
            suggestion_list: SuggestionListState::default(),
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // REPORT_EVENT_TYPES makes key releases visible; event.rs filters them
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, steady block cursor, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableMouseCapture,
            DisableBracketedPaste,
            Hide
        );
    }
}

/// Performs effects returned by `update()`.
struct Effects {
    fetcher: Arc<dyn SiteFetcher>,
    tx: mpsc::Sender<Action>,
    ticker: Option<AbortHandle>,
}

impl Effects {
    /// Returns `true` when the app should quit.
    fn perform(&mut self, app: &App, effect: Effect) -> bool {
        match effect {
            Effect::None => {}
            Effect::Quit => return true,
            Effect::StartTyping => {
                self.stop_ticker();
                self.ticker = Some(spawn_ticker(app.type_speed_ms, self.tx.clone()));
            }
            Effect::StopTyping => self.stop_ticker(),
            Effect::FetchSearchIndex => spawn_search_index_load(
                self.fetcher.clone(),
                app.search_index_path.clone(),
                self.tx.clone(),
            ),
            Effect::FetchGraph => match &app.graph_path {
                Some(path) => spawn_graph_load(self.fetcher.clone(), path.clone(), self.tx.clone()),
                None => warn!("Graph fetch requested but no graph path is configured"),
            },
        }
        false
    }

    fn stop_ticker(&mut self) {
        if let Some(handle) = self.ticker.take() {
            debug!("Stopping typewriter ticker");
            handle.abort();
        }
    }
}

pub fn run(mut app: App, fetcher: Arc<dyn SiteFetcher>) -> std::io::Result<()> {
    let mut tui = TuiState::new(Palette::for_theme(app.theme));

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();
    let mut effects = Effects {
        fetcher,
        tx,
        ticker: None,
    };

    for action in [Action::ShowWelcome, Action::LoadSearchIndex] {
        let effect = update(&mut app, action);
        effects.perform(&app, effect);
    }

    let mut needs_redraw = true;
    let mut should_quit = false;

    while !should_quit {
        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui))?;
            needs_redraw = false;
        }

        let busy = app.is_typing()
            || app.map.is_loading()
            || matches!(app.search.state(), IndexState::Loading);
        let timeout = if busy {
            Duration::from_millis(app.type_speed_ms).min(BUSY_POLL_MAX)
        } else {
            IDLE_POLL
        };
        let first_event = poll_event_timeout(timeout);

        // Process first event + drain ALL pending events before next draw
        if first_event.is_some() {
            needs_redraw = true;
        }
        let screen = terminal.get_frame().area();
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            for effect in route_event(&mut app, &mut tui, event, screen) {
                should_quit |= effects.perform(&app, effect);
            }
            if should_quit {
                break;
            }
        }

        // Handle background task actions
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            if !matches!(action, Action::TypewriterTick) {
                debug!("Event loop received: {:?}", action);
            }
            let effect = update(&mut app, action);
            should_quit |= effects.perform(&app, effect);
        }
    }

    info!("Shutting down");
    effects.stop_ticker();
    ratatui::restore();
    Ok(())
}

/// Turns one terminal event into state changes. Returns the effects the
/// caller must perform.
fn route_event(app: &mut App, tui: &mut TuiState, event: TuiEvent, screen: Rect) -> Vec<Effect> {
    let mut effects = Vec::new();

    match event {
        TuiEvent::Resize => return effects,
        TuiEvent::ForceQuit => {
            effects.push(update(app, Action::Quit));
            return effects;
        }
        _ => {}
    }

    // Any key during the welcome animation finishes it, then is handled
    if app.is_typing() && event.is_key() {
        effects.push(update(app, Action::SkipTyping));
    }

    if app.map.is_open() {
        let action = match event {
            TuiEvent::Escape => Some(Action::DismissOverlay(Trigger::EscapeKey)),
            TuiEvent::MouseClick(col, row) => {
                match classify_click(overlay_rect(screen), app.map.layout(), col, row) {
                    OverlayClick::Close => Some(Action::DismissOverlay(Trigger::CloseControl)),
                    OverlayClick::Outside => Some(Action::DismissOverlay(Trigger::ClickOutside)),
                    OverlayClick::Node(index) => Some(Action::ActivateNode(index)),
                    OverlayClick::Inside => None,
                }
            }
            // The prompt is inert while the overlay is up
            _ => None,
        };
        if let Some(action) = action {
            effects.push(update(app, action));
        }
        return effects;
    }

    match event {
        TuiEvent::ScrollUp
        | TuiEvent::ScrollDown
        | TuiEvent::ScrollPageUp
        | TuiEvent::ScrollPageDown => {
            tui.transcript_view.handle_event(&event);
        }
        TuiEvent::MouseClick(col, row) => {
            if let Some(index) = tui.suggestion_list.hit_test(col, row)
                && app
                    .input
                    .select(index, &mut tui.input_box.buffer, &app.catalog)
            {
                tui.input_box.cursor_to_end();
            }
        }
        TuiEvent::Escape => app.input.suggestions.clear(),
        _ => match tui.input_box.handle_event(&event) {
            Some(InputEvent::Control(key)) => {
                match app.input.on_key(key, &mut tui.input_box.buffer, &app.catalog) {
                    KeyOutcome::Submitted(line) => {
                        tui.input_box.cursor_to_end();
                        effects.push(update(app, Action::Submit(line)));
                    }
                    KeyOutcome::FieldChanged => tui.input_box.cursor_to_end(),
                    KeyOutcome::Ignored => {}
                }
            }
            Some(InputEvent::ContentChanged) => {
                app.input.on_change(&tui.input_box.buffer, &app.catalog);
            }
            Some(InputEvent::CursorMoved) | None => {}
        },
    }

    effects
}

fn spawn_ticker(period_ms: u64, tx: mpsc::Sender<Action>) -> AbortHandle {
    debug!("Starting typewriter ticker ({}ms)", period_ms);
    let handle = tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_millis(period_ms.max(1)));
        // The first tick completes immediately
        interval.tick().await;
        loop {
            interval.tick().await;
            if tx.send(Action::TypewriterTick).is_err() {
                return;
            }
        }
    });
    handle.abort_handle()
}

fn spawn_search_index_load(fetcher: Arc<dyn SiteFetcher>, path: String, tx: mpsc::Sender<Action>) {
    info!("Loading search index from {}{}", fetcher.origin(), path);
    tokio::spawn(async move {
        let result = load_search_index(fetcher.as_ref(), &path).await;
        if tx.send(Action::SearchIndexLoaded(result)).is_err() {
            warn!("Failed to deliver search index: receiver dropped");
        }
    });
}

fn spawn_graph_load(fetcher: Arc<dyn SiteFetcher>, path: String, tx: mpsc::Sender<Action>) {
    info!("Loading graph from {}{}", fetcher.origin(), path);
    tokio::spawn(async move {
        let result = load_graph_layout(fetcher.as_ref(), &path).await;
        if tx.send(Action::GraphLoaded(result)).is_err() {
            warn!("Failed to deliver graph data: receiver dropped");
        }
    });
}
