//! # Actions
//!
//! Everything that can happen in logshell becomes an `Action`.
//! User presses Enter? That's `Action::Submit(line)`.
//! The search index arrives? That's `Action::SearchIndexLoaded(result)`.
//!
//! The `update()` function takes the current state and an action, mutates
//! the state and returns an `Effect` describing the I/O the adapter must
//! perform next. No side effects here. I/O happens elsewhere.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use log::{debug, info, warn};

use crate::core::dispatch::{dispatch, graph_ready};
use crate::core::listeners::Trigger;
use crate::core::state::App;
use crate::core::status::Status;
use crate::core::theme::{Theme, switch_theme};
use crate::core::transcript::LineClass;
use crate::core::typewriter::Typewriter;
use crate::graph::GraphLayout;
use crate::search::SearchIndexEntry;
use crate::site::FetchError;

#[derive(Debug)]
pub enum Action {
    /// Prints the welcome banner, animated unless reduced motion is on.
    ShowWelcome,
    /// Starts the one-shot search index load.
    LoadSearchIndex,
    /// A line was submitted from the input box.
    Submit(String),
    TypewriterTick,
    /// Any key during the welcome animation.
    SkipTyping,
    SearchIndexLoaded(Result<Vec<SearchIndexEntry>, FetchError>),
    /// A laid-out graph, computed off the event loop.
    GraphLoaded(Result<GraphLayout, FetchError>),
    DismissOverlay(Trigger),
    /// A node in the map overlay was clicked (index into the layout).
    ActivateNode(usize),
    SwitchTheme(Theme),
    Quit,
}

/// I/O the adapter performs after an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    Quit,
    StartTyping,
    StopTyping,
    FetchSearchIndex,
    FetchGraph,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::ShowWelcome => {
            let lines = app.welcome_lines();
            if app.reduced_motion {
                for line in &lines {
                    app.transcript.push(line, LineClass::Welcome);
                }
                Effect::None
            } else {
                debug!("Typing welcome banner");
                app.typewriter = Some(Typewriter::new(lines, LineClass::Welcome));
                Effect::StartTyping
            }
        }
        Action::LoadSearchIndex => {
            if app.search.begin_loading() {
                Effect::FetchSearchIndex
            } else {
                Effect::None
            }
        }
        Action::Submit(line) => {
            info!("Submitted: {:?}", line);
            let stopped = finish_typing(app);
            app.transcript.echo(&line);
            match dispatch(app, &line) {
                Effect::None if stopped => Effect::StopTyping,
                effect => effect,
            }
        }
        Action::TypewriterTick => match app.typewriter.as_mut() {
            Some(typewriter) => {
                if typewriter.tick(&mut app.transcript) {
                    Effect::None
                } else {
                    debug!("Welcome banner finished");
                    app.typewriter = None;
                    Effect::StopTyping
                }
            }
            None => Effect::StopTyping,
        },
        Action::SkipTyping => {
            if finish_typing(app) {
                debug!("Typing skipped");
                Effect::StopTyping
            } else {
                Effect::None
            }
        }
        Action::SearchIndexLoaded(result) => {
            if let Some(err) = app.search.finish(result) {
                warn!("Search index load failed: {}", err);
                app.transcript
                    .push("Error: Could not load search data.", LineClass::Error);
            }
            Effect::None
        }
        Action::GraphLoaded(Ok(layout)) => {
            info!(
                "Graph loaded: {} nodes, {} edges",
                layout.nodes.len(),
                layout.edges.len()
            );
            graph_ready(app, layout);
            Effect::None
        }
        Action::GraphLoaded(Err(err)) => {
            warn!("Graph load failed: {}", err);
            app.graph_fetch_pending = false;
            app.transcript
                .push("Error: Could not load graph data.", LineClass::Error);
            if app.map.close(&mut app.listeners) {
                app.status.set(Status::Error);
                app.status.set(Status::Operational);
            }
            Effect::None
        }
        Action::DismissOverlay(trigger) => {
            if !app.listeners.is_listening(trigger) {
                debug!("Ignoring {:?}: no overlay listening", trigger);
                return Effect::None;
            }
            if app.map.close(&mut app.listeners) {
                app.status.set(Status::Operational);
            }
            Effect::None
        }
        Action::ActivateNode(index) => {
            let target = app
                .map
                .layout()
                .and_then(|layout| layout.nodes.get(index))
                .map(|node| format!("{}{}", app.base_url.trim_end_matches('/'), node.id));
            if let Some(target) = target {
                info!("Opening {}", target);
                app.transcript
                    .push(&format!("Opening {target}"), LineClass::Output);
            }
            Effect::None
        }
        Action::SwitchTheme(theme) => {
            match switch_theme(theme.as_str(), &mut app.storage) {
                Ok(theme) => app.theme = theme,
                Err(err) => warn!("{}", err),
            }
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}

/// Flushes the welcome animation. Returns whether one was running.
fn finish_typing(app: &mut App) -> bool {
    match app.typewriter.take() {
        Some(mut typewriter) => {
            typewriter.finish(&mut app.transcript);
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::listeners::Trigger;
    use crate::graph::PlacedNode;
    use crate::test_support::{sample_index, sample_layout, test_app, transcript_texts};

    #[test]
    fn test_welcome_animates_then_stops() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::ShowWelcome), Effect::StartTyping);
        assert!(app.is_typing());

        let mut ticks = 0;
        while update(&mut app, Action::TypewriterTick) == Effect::None {
            ticks += 1;
            assert!(ticks < 1000);
        }
        assert!(app.typewriter.is_none());
        assert_eq!(
            transcript_texts(&app),
            vec![
                "Welcome to Test Log!",
                "Type `/help` to see a list of available commands.",
                ""
            ]
        );
    }

    #[test]
    fn test_welcome_reduced_motion_is_immediate() {
        let mut app = test_app();
        app.reduced_motion = true;
        assert_eq!(update(&mut app, Action::ShowWelcome), Effect::None);
        assert_eq!(app.transcript.len(), 3);
        assert!(app.typewriter.is_none());
    }

    #[test]
    fn test_skip_typing_flushes_banner() {
        let mut app = test_app();
        update(&mut app, Action::ShowWelcome);
        update(&mut app, Action::TypewriterTick);
        assert_eq!(update(&mut app, Action::SkipTyping), Effect::StopTyping);
        assert_eq!(app.transcript.len(), 3);
        assert_eq!(app.transcript.last_text(), Some(""));
        assert_eq!(update(&mut app, Action::SkipTyping), Effect::None);
    }

    #[test]
    fn test_submit_during_typing_finishes_banner_first() {
        let mut app = test_app();
        update(&mut app, Action::ShowWelcome);
        let effect = update(&mut app, Action::Submit("/clear".to_string()));
        assert_eq!(effect, Effect::StopTyping);
        assert!(app.transcript.is_empty());
    }

    #[test]
    fn test_search_index_loads_once() {
        let mut app = test_app();
        assert_eq!(
            update(&mut app, Action::LoadSearchIndex),
            Effect::FetchSearchIndex
        );
        assert_eq!(update(&mut app, Action::LoadSearchIndex), Effect::None);
        update(&mut app, Action::SearchIndexLoaded(Ok(sample_index())));
        assert!(app.search.is_loaded());
    }

    #[test]
    fn test_search_index_failure_reports_once() {
        let mut app = test_app();
        update(&mut app, Action::LoadSearchIndex);
        update(
            &mut app,
            Action::SearchIndexLoaded(Err(FetchError::Network("refused".to_string()))),
        );
        assert_eq!(
            transcript_texts(&app),
            vec!["Error: Could not load search data."]
        );

        update(&mut app, Action::Submit("/search rust".to_string()));
        assert_eq!(
            app.transcript.last_text(),
            Some("Search index is unavailable.")
        );
    }

    #[test]
    fn test_submit_echoes_input() {
        let mut app = test_app();
        update(&mut app, Action::Submit("/man help".to_string()));
        assert_eq!(transcript_texts(&app)[0], "> /man help");
        assert_eq!(app.status.current(), &Status::Operational);
    }

    #[test]
    fn test_map_lifecycle() {
        let mut app = test_app();
        let effect = update(&mut app, Action::Submit("/map".to_string()));
        assert_eq!(effect, Effect::FetchGraph);

        update(&mut app, Action::GraphLoaded(Ok(sample_layout())));
        assert_eq!(app.status.current(), &Status::MapLoaded);
        assert!(app.map.layout().is_some());
        assert!(app.graph_layout.is_some());

        update(&mut app, Action::DismissOverlay(Trigger::EscapeKey));
        assert!(!app.map.is_open());
        assert!(app.listeners.is_empty());
        assert_eq!(app.status.current(), &Status::Operational);

        // Second open reuses the cached layout
        let effect = update(&mut app, Action::Submit("/map".to_string()));
        assert_eq!(effect, Effect::None);
        assert_eq!(app.status.current(), &Status::MapLoaded);
    }

    #[test]
    fn test_map_toggle_closes() {
        let mut app = test_app();
        app.graph_layout = Some(crate::graph::GraphLayout::default());
        update(&mut app, Action::Submit("/map".to_string()));
        update(&mut app, Action::Submit("/map".to_string()));
        assert!(!app.map.is_open());
        assert!(app.listeners.is_empty());
        assert_eq!(app.status.current(), &Status::Operational);
    }

    #[test]
    fn test_dismiss_without_overlay_is_ignored() {
        let mut app = test_app();
        update(&mut app, Action::DismissOverlay(Trigger::ClickOutside));
        assert!(app.listeners.is_empty());
        assert_eq!(app.status.current(), &Status::Operational);
    }

    #[test]
    fn test_graph_failure_closes_overlay() {
        let mut app = test_app();
        update(&mut app, Action::Submit("/map".to_string()));
        update(
            &mut app,
            Action::GraphLoaded(Err(FetchError::NotFound("/pages/graph.json".to_string()))),
        );
        assert!(!app.map.is_open());
        assert!(app.listeners.is_empty());
        assert_eq!(
            app.transcript.last_text(),
            Some("Error: Could not load graph data.")
        );
        assert_eq!(app.status.last_outcome(), Some(&Status::Error));
        assert_eq!(app.status.current(), &Status::Operational);
    }

    #[test]
    fn test_graph_arriving_after_dismissal_is_cached() {
        let mut app = test_app();
        update(&mut app, Action::Submit("/map".to_string()));
        update(&mut app, Action::DismissOverlay(Trigger::CloseControl));
        update(&mut app, Action::GraphLoaded(Ok(sample_layout())));
        assert!(!app.map.is_open());
        assert!(app.graph_layout.is_some());
        assert_eq!(app.status.current(), &Status::Operational);
    }

    #[test]
    fn test_graph_loaded_shows_layout_as_delivered() {
        let layout = GraphLayout {
            nodes: vec![PlacedNode {
                id: "/posts/a/".to_string(),
                label: "a".to_string(),
                x: 0.25,
                y: 0.75,
                group: None,
            }],
            edges: vec![],
        };
        let mut app = test_app();
        update(&mut app, Action::Submit("/map".to_string()));
        update(&mut app, Action::GraphLoaded(Ok(layout.clone())));

        assert_eq!(app.map.layout(), Some(&layout));
        assert_eq!(app.graph_layout.as_ref(), Some(&layout));
        assert!(!app.graph_fetch_pending);
    }

    #[test]
    fn test_reopen_while_loading_reuses_pending_fetch() {
        let mut app = test_app();
        assert_eq!(
            update(&mut app, Action::Submit("/map".to_string())),
            Effect::FetchGraph
        );
        update(&mut app, Action::DismissOverlay(Trigger::EscapeKey));
        assert_eq!(
            update(&mut app, Action::Submit("/map".to_string())),
            Effect::None
        );
        assert!(app.map.is_loading());

        update(&mut app, Action::GraphLoaded(Ok(sample_layout())));
        assert!(app.map.is_open());
        assert!(app.map.layout().is_some());
        assert_eq!(app.status.current(), &Status::MapLoaded);
    }

    #[test]
    fn test_failed_fetch_allows_a_fresh_one() {
        let mut app = test_app();
        update(&mut app, Action::Submit("/map".to_string()));
        update(
            &mut app,
            Action::GraphLoaded(Err(FetchError::Network("refused".to_string()))),
        );
        assert!(!app.graph_fetch_pending);
        assert_eq!(
            update(&mut app, Action::Submit("/map".to_string())),
            Effect::FetchGraph
        );
    }

    #[test]
    fn test_activate_node_prints_link() {
        let mut app = test_app();
        update(&mut app, Action::Submit("/map".to_string()));
        update(&mut app, Action::GraphLoaded(Ok(sample_layout())));
        let id = app.map.layout().unwrap().nodes[0].id.clone();
        update(&mut app, Action::ActivateNode(0));
        assert_eq!(
            app.transcript.last_text(),
            Some(format!("Opening http://localhost:1313{id}").as_str())
        );
        assert!(app.map.is_open());
    }

    #[test]
    fn test_switch_theme_action_persists() {
        let mut app = test_app();
        update(&mut app, Action::SwitchTheme(Theme::Light));
        assert_eq!(app.theme, Theme::Light);
        assert_eq!(app.storage.get("theme"), Some("light"));
    }

    #[test]
    fn test_quit() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::Quit), Effect::Quit);
    }
}
