//! # Command Catalog
//!
//! The static list of commands offered by `/help` and autocomplete, plus the
//! name → handler table the dispatcher routes through.
//!
//! The catalog is documentation: it can be replaced from the config file.
//! The handler table is fixed and resolved once when the catalog is built,
//! so `/grep` keeps working even though only `search` is listed.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Leading character that turns a line into a dispatchable command.
pub const DEFAULT_MARKER: char = '/';

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    pub name: String,
    pub description: String,
    #[serde(default, alias = "manPage")]
    pub man_page: String,
}

impl Command {
    fn new(name: &str, description: &str, man_page: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            man_page: man_page.to_string(),
        }
    }
}

/// What a command name resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handler {
    Help,
    Man,
    Theme,
    Search,
    Map,
    Clear,
}

const HANDLERS: &[(&str, Handler)] = &[
    ("help", Handler::Help),
    ("man", Handler::Man),
    ("theme", Handler::Theme),
    ("search", Handler::Search),
    ("grep", Handler::Search),
    ("map", Handler::Map),
    ("clear", Handler::Clear),
];

pub struct CommandCatalog {
    marker: char,
    commands: Vec<Command>,
    handlers: HashMap<&'static str, Handler>,
}

impl CommandCatalog {
    pub fn new(commands: Vec<Command>, marker: char) -> Self {
        Self {
            marker,
            commands,
            handlers: HANDLERS.iter().copied().collect(),
        }
    }

    /// The catalog shipped with the binary.
    pub fn builtin(marker: char) -> Self {
        Self::new(builtin_commands(), marker)
    }

    pub fn marker(&self) -> char {
        self.marker
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Looks up a catalog entry by name, ignoring ASCII case.
    pub fn find(&self, name: &str) -> Option<&Command> {
        self.commands
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name))
    }

    /// Resolves an already lower-cased command name to its handler.
    pub fn handler(&self, name: &str) -> Option<Handler> {
        self.handlers.get(name).copied()
    }

    /// Full command text for a catalog entry, marker included.
    pub fn command_text(&self, command: &Command) -> String {
        format!("{}{}", self.marker, command.name)
    }
}

/// A submitted line after splitting off the marker.
#[derive(Debug, PartialEq, Eq)]
pub enum ParsedLine<'a> {
    /// No marker: not a command at all.
    Text(&'a str),
    Command {
        /// Lower-cased name used for dispatch.
        name: String,
        /// The name exactly as typed, for error messages.
        raw_name: &'a str,
        args: Vec<&'a str>,
    },
}

pub fn parse_line(line: &str, marker: char) -> ParsedLine<'_> {
    let Some(rest) = line.strip_prefix(marker) else {
        return ParsedLine::Text(line);
    };

    let mut tokens = rest.split_whitespace();
    let raw_name = match rest.chars().next() {
        Some(c) if !c.is_whitespace() => tokens.next().unwrap_or(""),
        _ => "",
    };

    ParsedLine::Command {
        name: raw_name.to_lowercase(),
        raw_name,
        args: tokens.collect(),
    }
}

fn builtin_commands() -> Vec<Command> {
    vec![
        Command::new(
            "help",
            "Show this help message",
            "HELP(1)\n\nNAME\n    help - list available commands\n\nSYNOPSIS\n    /help\n\nDESCRIPTION\n    Prints every command with a one-line description.",
        ),
        Command::new(
            "man",
            "Show the manual page for a command",
            "MAN(1)\n\nNAME\n    man - display a command's manual page\n\nSYNOPSIS\n    /man [command]\n\nDESCRIPTION\n    Prints the full manual entry for the named command.",
        ),
        Command::new(
            "theme",
            "Switch between light and dark themes",
            "THEME(1)\n\nNAME\n    theme - switch the color theme\n\nSYNOPSIS\n    /theme [light|dark]\n\nDESCRIPTION\n    Switches the palette and remembers the choice for next time.",
        ),
        Command::new(
            "search",
            "Search posts by keyword",
            "SEARCH(1)\n\nNAME\n    search - find posts containing a keyword\n\nSYNOPSIS\n    /search [keyword]\n    /grep [keyword]\n\nDESCRIPTION\n    Lists every post whose title, content or tags contain the keyword,\n    ignoring case. Each result shows the date, title, link and tags.",
        ),
        Command::new(
            "map",
            "Open the knowledge graph",
            "MAP(1)\n\nNAME\n    map - show the knowledge graph of posts\n\nSYNOPSIS\n    /map\n\nDESCRIPTION\n    Opens a full-screen graph of posts and their links.\n    Close it with Esc, the [x] control, or a click outside the graph.",
        ),
        Command::new(
            "clear",
            "Clear the terminal screen",
            "CLEAR(1)\n\nNAME\n    clear - clear the terminal screen\n\nSYNOPSIS\n    /clear",
        ),
    ]
}
