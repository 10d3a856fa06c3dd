//! # Application State
//!
//! Core business state for logshell. This module contains domain logic only -
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── catalog: CommandCatalog        // commands + handler table
//! ├── transcript: Transcript         // output lines
//! ├── status: StatusSlot             // dispatcher phase
//! ├── input: InputController         // history + suggestions
//! ├── search: SearchIndex            // one-shot remote index
//! ├── map: MapOverlayState           // knowledge graph overlay
//! ├── listeners: Listeners           // overlay dismissal subscriptions
//! ├── graph_layout: Option<..>       // cached after the first load
//! ├── graph_fetch_pending: bool      // at most one graph load in flight
//! ├── theme / storage                // palette + persisted preference
//! └── typewriter: Option<Typewriter> // welcome animation in progress
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use crate::core::command::CommandCatalog;
use crate::core::config::ResolvedConfig;
use crate::core::input::InputController;
use crate::core::listeners::Listeners;
use crate::core::overlay::MapOverlayState;
use crate::core::status::StatusSlot;
use crate::core::storage::LocalStorage;
use crate::core::theme::{Theme, stored_theme};
use crate::core::transcript::Transcript;
use crate::core::typewriter::Typewriter;
use crate::graph::GraphLayout;
use crate::search::SearchIndex;

pub struct App {
    pub catalog: CommandCatalog,
    pub transcript: Transcript,
    pub status: StatusSlot,
    pub input: InputController,
    pub search: SearchIndex,
    pub map: MapOverlayState,
    pub listeners: Listeners,
    pub graph_layout: Option<GraphLayout>,
    /// A graph load has been requested and has not reported back yet.
    pub graph_fetch_pending: bool,
    pub theme: Theme,
    pub storage: LocalStorage,
    pub typewriter: Option<Typewriter>,
    pub site_title: String,
    pub base_url: String,
    pub search_index_path: String,
    /// `None` when the map is disabled.
    pub graph_path: Option<String>,
    pub reduced_motion: bool,
    pub type_speed_ms: u64,
}

impl App {
    pub fn from_config(config: &ResolvedConfig, storage: LocalStorage) -> Self {
        let catalog = if config.commands.is_empty() {
            CommandCatalog::builtin(config.marker)
        } else {
            CommandCatalog::new(config.commands.clone(), config.marker)
        };
        // A stored preference beats the configured default
        let theme = stored_theme(&storage).unwrap_or(config.theme);

        Self {
            catalog,
            transcript: Transcript::new(),
            status: StatusSlot::new(),
            input: InputController::new(),
            search: SearchIndex::new(),
            map: MapOverlayState::new(),
            listeners: Listeners::new(),
            graph_layout: None,
            graph_fetch_pending: false,
            theme,
            storage,
            typewriter: None,
            site_title: config.site_title.clone(),
            base_url: config.base_url.clone(),
            search_index_path: config.search_index_path.clone(),
            graph_path: config.graph_path.clone(),
            reduced_motion: config.reduced_motion,
            type_speed_ms: config.type_speed_ms,
        }
    }

    pub fn welcome_lines(&self) -> Vec<String> {
        vec![
            format!("Welcome to {}!", self.site_title),
            format!(
                "Type `{}help` to see a list of available commands.",
                self.catalog.marker()
            ),
            String::new(),
        ]
    }

    pub fn is_typing(&self) -> bool {
        self.typewriter.as_ref().is_some_and(Typewriter::is_pending)
    }
}

#[cfg(test)]
mod tests {
    use crate::core::command::Command;
    use crate::core::storage::LocalStorage;
    use crate::core::theme::{THEME_KEY, Theme};
    use crate::test_support::{test_app, test_config};

    use super::App;

    #[test]
    fn test_app_new_defaults() {
        let app = test_app();
        assert_eq!(app.status.current().to_string(), "OPERATIONAL");
        assert!(app.transcript.is_empty());
        assert!(!app.map.is_open());
        assert!(!app.is_typing());
        assert_eq!(app.catalog.commands().len(), 6);
    }

    #[test]
    fn test_stored_theme_beats_config() {
        let mut storage = LocalStorage::in_memory();
        storage.set(THEME_KEY, "light").unwrap();
        let app = App::from_config(&test_config(), storage);
        assert_eq!(app.theme, Theme::Light);
    }

    #[test]
    fn test_configured_catalog_replaces_builtin() {
        let mut config = test_config();
        config.commands = vec![Command {
            name: "help".to_string(),
            description: "Only help here".to_string(),
            man_page: String::new(),
        }];
        let app = App::from_config(&config, LocalStorage::in_memory());
        assert_eq!(app.catalog.commands().len(), 1);
    }

    #[test]
    fn test_welcome_lines_use_title_and_marker() {
        let app = test_app();
        let lines = app.welcome_lines();
        assert_eq!(lines[0], "Welcome to Test Log!");
        assert_eq!(lines[1], "Type `/help` to see a list of available commands.");
    }
}
