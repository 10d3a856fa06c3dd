//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.logshell/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

use crate::core::command::{Command, DEFAULT_MARKER};
use crate::core::theme::Theme;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct LogshellConfig {
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub commands: Vec<Command>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct SiteConfig {
    pub base_url: Option<String>,
    pub search_index_path: Option<String>,
    pub graph_path: Option<String>,
    pub title: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct UiConfig {
    pub theme: Option<Theme>,
    pub reduced_motion: Option<bool>,
    pub type_speed_ms: Option<u64>,
    pub command_marker: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_BASE_URL: &str = "http://localhost:1313";
pub const DEFAULT_SEARCH_INDEX_PATH: &str = "/pages/search.json";
pub const DEFAULT_GRAPH_PATH: &str = "/pages/graph.json";
pub const DEFAULT_SITE_TITLE: &str = "Veru's Log";
pub const DEFAULT_TYPE_SPEED_MS: u64 = 50;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub base_url: String,
    pub search_index_path: String,
    /// `None` disables the map overlay (configured as an empty string).
    pub graph_path: Option<String>,
    pub site_title: String,
    pub theme: Theme,
    pub reduced_motion: bool,
    pub type_speed_ms: u64,
    pub marker: char,
    /// Empty means "use the built-in catalog".
    pub commands: Vec<Command>,
}

/// Values taken from CLI flags (`None`/`false` = not specified).
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub site: Option<String>,
    pub reduced_motion: bool,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.logshell/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".logshell").join("config.toml"))
}

/// Load config from `~/.logshell/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `LogshellConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<LogshellConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(LogshellConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(LogshellConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config: LogshellConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &PathBuf) {
    let default_content = r#"# logshell configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [site]
# base_url = "http://localhost:1313"   # Or a path to a built site, e.g. "./public"
# search_index_path = "/pages/search.json"
# graph_path = "/pages/graph.json"     # "" disables /map
# title = "Veru's Log"

# [ui]
# theme = "dark"                       # Used until /theme stores a preference
# reduced_motion = false               # Or set LOGSHELL_REDUCED_MOTION=1
# type_speed_ms = 50
# command_marker = "/"

# Replaces the built-in command catalog shown by /help.
# [[commands]]
# name = "help"
# description = "Show this help message"
# man_page = "HELP(1) ..."
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &LogshellConfig, cli: &CliOverrides) -> ResolvedConfig {
    // Site: CLI → env → config → default
    let base_url = cli
        .site
        .clone()
        .or_else(|| std::env::var("LOGSHELL_BASE_URL").ok())
        .or_else(|| config.site.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    let graph_path = match config.site.graph_path.as_deref() {
        Some("") => None,
        Some(p) => Some(p.to_string()),
        None => Some(DEFAULT_GRAPH_PATH.to_string()),
    };

    // Reduced motion: any source turning it on wins
    let reduced_motion = cli.reduced_motion
        || env_flag("LOGSHELL_REDUCED_MOTION")
        || config.ui.reduced_motion.unwrap_or(false);

    let marker = config
        .ui
        .command_marker
        .as_deref()
        .and_then(|m| m.chars().next())
        .unwrap_or(DEFAULT_MARKER);

    ResolvedConfig {
        base_url,
        search_index_path: config
            .site
            .search_index_path
            .clone()
            .unwrap_or_else(|| DEFAULT_SEARCH_INDEX_PATH.to_string()),
        graph_path,
        site_title: config
            .site
            .title
            .clone()
            .unwrap_or_else(|| DEFAULT_SITE_TITLE.to_string()),
        theme: config.ui.theme.unwrap_or_default(),
        reduced_motion,
        type_speed_ms: config.ui.type_speed_ms.unwrap_or(DEFAULT_TYPE_SPEED_MS).max(1),
        marker,
        commands: config.commands.clone(),
    }
}

fn env_flag(name: &str) -> bool {
    std::env::var(name)
        .map(|v| !v.is_empty() && v != "0" && !v.eq_ignore_ascii_case("false"))
        .unwrap_or(false)
}
