//! # Input Controller
//!
//! Owns the prompt's history and suggestion state and decides what the four
//! intercepted keys do to the field. Every other key is plain editing and
//! belongs to the prompt widget, which calls `on_change` afterwards.

use crate::core::autocomplete::SuggestionState;
use crate::core::command::CommandCatalog;
use crate::core::history::HistoryLog;

/// Keys the controller intercepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKey {
    Enter,
    Tab,
    Up,
    Down,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    /// A non-empty line was submitted; it is already in the history.
    Submitted(String),
    /// The field was rewritten without submitting.
    FieldChanged,
    /// Nothing to do for this key in the current state.
    Ignored,
}

#[derive(Debug, Default)]
pub struct InputController {
    pub history: HistoryLog,
    pub suggestions: SuggestionState,
}

impl InputController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Called after every user edit of the field.
    pub fn on_change(&mut self, field: &str, catalog: &CommandCatalog) {
        self.suggestions.update(field, catalog);
    }

    pub fn on_key(&mut self, key: ControlKey, field: &mut String, catalog: &CommandCatalog) -> KeyOutcome {
        match key {
            ControlKey::Enter => {
                let value = field.trim().to_string();
                field.clear();
                self.suggestions.clear();
                if value.is_empty() {
                    KeyOutcome::FieldChanged
                } else {
                    self.history.push(value.clone());
                    KeyOutcome::Submitted(value)
                }
            }
            ControlKey::Tab => {
                let Some(command) = self.suggestions.completion() else {
                    return KeyOutcome::Ignored;
                };
                *field = catalog.command_text(command);
                self.suggestions.clear();
                KeyOutcome::FieldChanged
            }
            ControlKey::Up if self.suggestions.is_visible() => {
                match self.suggestions.select_previous() {
                    Some(command) => {
                        *field = catalog.command_text(command);
                        KeyOutcome::FieldChanged
                    }
                    None => KeyOutcome::Ignored,
                }
            }
            ControlKey::Down if self.suggestions.is_visible() => {
                match self.suggestions.select_next() {
                    Some(command) => {
                        *field = catalog.command_text(command);
                        KeyOutcome::FieldChanged
                    }
                    None => KeyOutcome::Ignored,
                }
            }
            ControlKey::Up => match self.history.previous() {
                Some(entry) => {
                    *field = entry.to_string();
                    KeyOutcome::FieldChanged
                }
                None => KeyOutcome::Ignored,
            },
            ControlKey::Down => match self.history.next() {
                Some(entry) => {
                    *field = entry.to_string();
                    KeyOutcome::FieldChanged
                }
                None => KeyOutcome::Ignored,
            },
        }
    }

    /// Pointer activation of the suggestion at `index`. Writes the command
    /// into the field and closes the list; never submits.
    pub fn select(&mut self, index: usize, field: &mut String, catalog: &CommandCatalog) -> bool {
        let Some(command) = self.suggestions.matches().get(index) else {
            return false;
        };
        *field = catalog.command_text(command);
        self.suggestions.clear();
        true
    }
}
