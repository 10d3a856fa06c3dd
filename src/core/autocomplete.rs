//! # Autocomplete
//!
//! Recomputed on every edit of the prompt. When the field starts with the
//! command marker, the rest of the field is a case-insensitive prefix and the
//! catalog is filtered in catalog order. Anything else hides the list.

use crate::core::command::{Command, CommandCatalog};

#[derive(Debug, Default)]
pub struct SuggestionState {
    matches: Vec<Command>,
    /// `None` means nothing highlighted.
    selected: Option<usize>,
}

impl SuggestionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refilters the catalog against the current field. Drops any selection.
    pub fn update(&mut self, field: &str, catalog: &CommandCatalog) {
        self.selected = None;
        self.matches.clear();

        let Some(rest) = field.strip_prefix(catalog.marker()) else {
            return;
        };
        let prefix = rest.to_lowercase();
        self.matches.extend(
            catalog
                .commands()
                .iter()
                .filter(|c| c.name.to_lowercase().starts_with(&prefix))
                .cloned(),
        );
    }

    pub fn clear(&mut self) {
        self.matches.clear();
        self.selected = None;
    }

    pub fn is_visible(&self) -> bool {
        !self.matches.is_empty()
    }

    pub fn matches(&self) -> &[Command] {
        &self.matches
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_command(&self) -> Option<&Command> {
        self.selected.and_then(|i| self.matches.get(i))
    }

    /// Moves the highlight down, wrapping from the last entry to the first.
    pub fn select_next(&mut self) -> Option<&Command> {
        let len = self.matches.len();
        if len == 0 {
            return None;
        }
        self.selected = Some(match self.selected {
            Some(i) => (i + 1) % len,
            None => 0,
        });
        self.selected_command()
    }

    /// Moves the highlight up, wrapping from the first entry to the last.
    pub fn select_previous(&mut self) -> Option<&Command> {
        let len = self.matches.len();
        if len == 0 {
            return None;
        }
        self.selected = Some(match self.selected {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        });
        self.selected_command()
    }

    /// The entry Tab would complete to: the highlighted one, or the only match.
    pub fn completion(&self) -> Option<&Command> {
        self.selected_command().or(match self.matches.as_slice() {
            [only] => Some(only),
            _ => None,
        })
    }
}
