//! # Command Dispatcher
//!
//! Runs one submitted line through the status state machine:
//!
//! ```text
//! PROCESSING → (handler writes lines + its own status) → OPERATIONAL
//! ```
//!
//! The only exception is `map`, which leaves the slot on `LOADING MAP...` /
//! `MAP LOADED` until the overlay is dismissed. Every failure is reported as
//! a transcript line; nothing escapes this module.

use log::debug;

use crate::core::action::Effect;
use crate::core::command::{Handler, ParsedLine, parse_line};
use crate::core::state::App;
use crate::core::status::Status;
use crate::core::theme::switch_theme;
use crate::core::transcript::LineClass;
use crate::graph::GraphLayout;
use crate::search::Unavailable;

/// Column the command names are padded to in `/help`.
const HELP_NAME_WIDTH: usize = 10;

pub fn dispatch(app: &mut App, line: &str) -> Effect {
    app.status.begin();
    let marker = app.catalog.marker();

    let effect = match parse_line(line, marker) {
        ParsedLine::Text(text) => {
            command_not_found(app, text);
            Effect::None
        }
        ParsedLine::Command {
            name,
            raw_name,
            args,
        } => {
            let handler = app.catalog.handler(&name);
            debug!("Dispatching {:?} for {:?} args={:?}", handler, name, args);
            match handler {
                Some(Handler::Help) => help(app),
                Some(Handler::Man) => man(app, &args),
                Some(Handler::Theme) => theme(app, &args),
                Some(Handler::Search) => search(app, &name, &args),
                Some(Handler::Map) => map(app),
                Some(Handler::Clear) => clear(app),
                None => {
                    command_not_found(app, &format!("{marker}{raw_name}"));
                    Effect::None
                }
            }
        }
    };

    if !app.map.is_open() {
        app.status.set(Status::Operational);
    }
    effect
}

fn command_not_found(app: &mut App, command: &str) {
    app.transcript
        .push(&format!("-bash: {command}: command not found"), LineClass::Error);
    app.status.set(Status::Error);
}

fn usage(app: &mut App, synopsis: &str) {
    let marker = app.catalog.marker();
    app.transcript
        .push(&format!("Usage: {marker}{synopsis}"), LineClass::Output);
}

fn help(app: &mut App) -> Effect {
    let marker = app.catalog.marker();
    for command in app.catalog.commands() {
        app.transcript.push(
            &format!(
                "  {marker}{:<width$} {}",
                command.name,
                command.description,
                width = HELP_NAME_WIDTH
            ),
            LineClass::Output,
        );
    }
    app.status.set(Status::HelpDisplayed);
    Effect::None
}

fn man(app: &mut App, args: &[&str]) -> Effect {
    let Some(&requested) = args.first() else {
        usage(app, "man [command]");
        return Effect::None;
    };
    let name = requested
        .strip_prefix(app.catalog.marker())
        .unwrap_or(requested);

    match app.catalog.find(name) {
        Some(command) if !command.man_page.is_empty() => {
            app.transcript.push(&command.man_page, LineClass::Output);
        }
        _ => {
            app.transcript
                .push(&format!("No manual entry for {name}"), LineClass::Output);
        }
    }
    Effect::None
}

fn theme(app: &mut App, args: &[&str]) -> Effect {
    match args.first().map(|value| switch_theme(value, &mut app.storage)) {
        Some(Ok(theme)) => {
            app.theme = theme;
            app.transcript
                .push(&format!("Theme switched to {theme}."), LineClass::Output);
        }
        _ => usage(app, "theme [light|dark]"),
    }
    Effect::None
}

fn search(app: &mut App, invoked_as: &str, args: &[&str]) -> Effect {
    if args.is_empty() {
        usage(app, &format!("{invoked_as} [keyword]"));
        app.status.set(Status::Error);
        return Effect::None;
    }

    let keyword = args.join(" ").to_lowercase();
    match app.search.query(&keyword) {
        Err(Unavailable::NotLoaded) => {
            app.transcript.push(
                "Search index is not loaded yet. Please try again in a moment.",
                LineClass::Error,
            );
            app.status.set(Status::Error);
        }
        Err(Unavailable::Failed) => {
            app.transcript
                .push("Search index is unavailable.", LineClass::Error);
            app.status.set(Status::Error);
        }
        Ok(hits) if hits.is_empty() => {
            app.transcript.push(
                &format!("No posts found containing \"{keyword}\"."),
                LineClass::Output,
            );
            app.status.set(Status::NoResults);
        }
        Ok(hits) => {
            for entry in &hits {
                app.transcript.push(&entry.result_line(), LineClass::Result);
            }
            app.status.set(Status::SearchComplete(hits.len()));
        }
    }
    Effect::None
}

fn map(app: &mut App) -> Effect {
    if app.map.is_open() {
        app.map.close(&mut app.listeners);
        return Effect::None;
    }
    if app.graph_path.is_none() {
        app.transcript
            .push("Error: Map overlay is unavailable.", LineClass::Error);
        app.status.set(Status::Error);
        return Effect::None;
    }

    app.map.open(&mut app.listeners);
    app.status.set(Status::LoadingMap);

    match &app.graph_layout {
        Some(layout) => {
            app.map.show(layout.clone());
            app.status.set(Status::MapLoaded);
            Effect::None
        }
        // The overlay picks up the pending result when it lands
        None if app.graph_fetch_pending => {
            debug!("Graph load already in flight");
            Effect::None
        }
        None => {
            app.graph_fetch_pending = true;
            Effect::FetchGraph
        }
    }
}

fn clear(app: &mut App) -> Effect {
    app.transcript.clear();
    app.status.set(Status::ScreenCleared);
    Effect::None
}

/// Caches a finished layout and shows it if the overlay is still waiting.
pub fn graph_ready(app: &mut App, layout: GraphLayout) {
    app.graph_fetch_pending = false;
    if app.map.is_loading() && app.map.show(layout.clone()) {
        app.status.set(Status::MapLoaded);
    }
    app.graph_layout = Some(layout);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::theme::{THEME_KEY, Theme};
    use crate::test_support::{loaded_app, test_app, transcript_texts};

    fn run(app: &mut App, line: &str) -> Effect {
        app.transcript.echo(line);
        dispatch(app, line)
    }

    #[test]
    fn test_unknown_command() {
        let mut app = test_app();
        run(&mut app, "/frobnicate");
        assert_eq!(
            transcript_texts(&app),
            vec!["> /frobnicate", "-bash: /frobnicate: command not found"]
        );
        assert_eq!(app.status.current(), &Status::Operational);
        assert_eq!(
            app.status.trail(),
            &[Status::Processing, Status::Error, Status::Operational]
        );
    }

    #[test]
    fn test_plain_text_is_not_a_command() {
        let mut app = test_app();
        run(&mut app, "ls -la");
        assert_eq!(
            app.transcript.last_text(),
            Some("-bash: ls -la: command not found")
        );
    }

    #[test]
    fn test_help_lists_catalog_padded() {
        let mut app = test_app();
        run(&mut app, "/HELP");
        let texts = transcript_texts(&app);
        assert_eq!(texts.len(), 7);
        assert_eq!(texts[1], "  /help       Show this help message");
        assert_eq!(app.status.last_outcome(), Some(&Status::HelpDisplayed));
        assert_eq!(app.status.current(), &Status::Operational);
    }

    #[test]
    fn test_man_variants() {
        let mut app = test_app();
        run(&mut app, "/man");
        assert_eq!(app.transcript.last_text(), Some("Usage: /man [command]"));

        run(&mut app, "/man nope");
        assert_eq!(app.transcript.last_text(), Some("No manual entry for nope"));

        run(&mut app, "/man /clear");
        assert!(transcript_texts(&app).contains(&"CLEAR(1)".to_string()));
    }

    #[test]
    fn test_theme_switch_persists() {
        let mut app = test_app();
        run(&mut app, "/theme light");
        assert_eq!(app.theme, Theme::Light);
        assert_eq!(app.storage.get(THEME_KEY), Some("light"));
        assert_eq!(app.transcript.last_text(), Some("Theme switched to light."));
    }

    #[test]
    fn test_theme_invalid_prints_usage() {
        let mut app = test_app();
        run(&mut app, "/theme purple");
        assert_eq!(app.theme, Theme::Dark);
        assert!(app.storage.get(THEME_KEY).is_none());
        assert_eq!(app.transcript.last_text(), Some("Usage: /theme [light|dark]"));

        run(&mut app, "/theme");
        assert_eq!(app.transcript.last_text(), Some("Usage: /theme [light|dark]"));
    }

    #[test]
    fn test_search_before_index_loaded() {
        let mut app = test_app();
        run(&mut app, "/search rust");
        assert_eq!(
            app.transcript.last_text(),
            Some("Search index is not loaded yet. Please try again in a moment.")
        );
        assert_eq!(app.status.last_outcome(), Some(&Status::Error));
        assert_eq!(app.status.current(), &Status::Operational);
    }

    #[test]
    fn test_search_hits_and_misses() {
        let mut app = loaded_app();
        run(&mut app, "/search rust");
        assert_eq!(
            app.transcript.last_text(),
            Some("  2024-03-01  Intro to Rust  /posts/intro-to-rust/  [rust, systems]")
        );
        assert_eq!(app.status.last_outcome(), Some(&Status::SearchComplete(1)));

        run(&mut app, "/grep python");
        assert_eq!(
            app.transcript.last_text(),
            Some("No posts found containing \"python\".")
        );
        assert_eq!(app.status.last_outcome(), Some(&Status::NoResults));
    }

    #[test]
    fn test_search_usage_names_alias() {
        let mut app = loaded_app();
        run(&mut app, "/grep");
        assert_eq!(app.transcript.last_text(), Some("Usage: /grep [keyword]"));
    }

    #[test]
    fn test_search_joins_multiword_keyword() {
        let mut app = loaded_app();
        run(&mut app, "/search Intro  TO");
        assert_eq!(app.status.last_outcome(), Some(&Status::SearchComplete(1)));
    }

    #[test]
    fn test_clear_empties_transcript() {
        let mut app = test_app();
        run(&mut app, "/help");
        run(&mut app, "/clear");
        assert!(app.transcript.is_empty());
        assert_eq!(app.status.last_outcome(), Some(&Status::ScreenCleared));
    }

    #[test]
    fn test_map_requests_graph_and_holds_status() {
        let mut app = test_app();
        let effect = run(&mut app, "/map");
        assert_eq!(effect, Effect::FetchGraph);
        assert!(app.map.is_loading());
        assert_eq!(app.status.current(), &Status::LoadingMap);
        assert_eq!(app.listeners.len(), 3);
    }

    #[test]
    fn test_map_uses_cached_layout() {
        let mut app = test_app();
        app.graph_layout = Some(GraphLayout::default());
        let effect = run(&mut app, "/map");
        assert_eq!(effect, Effect::None);
        assert_eq!(app.status.current(), &Status::MapLoaded);
        assert_eq!(
            app.status.trail(),
            &[Status::Processing, Status::LoadingMap, Status::MapLoaded]
        );
    }

    #[test]
    fn test_map_disabled() {
        let mut app = test_app();
        app.graph_path = None;
        let effect = run(&mut app, "/map");
        assert_eq!(effect, Effect::None);
        assert!(!app.map.is_open());
        assert_eq!(
            app.transcript.last_text(),
            Some("Error: Map overlay is unavailable.")
        );
        assert_eq!(app.status.current(), &Status::Operational);
    }
}
