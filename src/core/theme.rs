//! # Theme
//!
//! Light/dark switching. Only the exact strings `light` and `dark` are
//! accepted; anything else is rejected with no side effect. A valid switch
//! is remembered in preference storage under [`THEME_KEY`].

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::core::storage::LocalStorage;

pub const THEME_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum ThemeError {
    Invalid(String),
}

impl fmt::Display for ThemeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThemeError::Invalid(value) => write!(f, "invalid theme: {value}"),
        }
    }
}

impl std::error::Error for ThemeError {}

impl FromStr for Theme {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(ThemeError::Invalid(other.to_string())),
        }
    }
}

/// Validates `value` and persists it. A storage failure is logged but does
/// not undo the switch.
pub fn switch_theme(value: &str, storage: &mut LocalStorage) -> Result<Theme, ThemeError> {
    let theme: Theme = value.parse().inspect_err(|e| warn!("{e}"))?;
    if let Err(e) = storage.set(THEME_KEY, theme.as_str()) {
        warn!("Failed to persist theme preference: {}", e);
    }
    info!("Theme switched to {}", theme);
    Ok(theme)
}

/// The remembered preference, if a valid one is stored.
pub fn stored_theme(storage: &LocalStorage) -> Option<Theme> {
    storage.get(THEME_KEY).and_then(|v| v.parse().ok())
}
