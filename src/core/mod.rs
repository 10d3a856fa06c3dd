//! # Core Application Logic
//!
//! This module contains logshell's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │  • dispatch() (commands)│
//!                    │                         │
//!                    │  No network. No UI.     │
//!                    └───────────┬─────────────┘
//!                                │
//!                                ▼
//!                         ┌────────────┐
//!                         │    TUI     │
//!                         │  Adapter   │
//!                         │ (ratatui)  │
//!                         └────────────┘
//! ```
//!
//! The only I/O core performs is persisting the theme preference through
//! [`storage::LocalStorage`].
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct, all application state in one place
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`dispatch`]: Runs one submitted line through its command handler
//! - [`command`]: Command catalog and line parsing
//! - [`input`]: Key handling for the input field (history + suggestions)
//! - [`config`]: TOML config file and resolution

pub mod action;
pub mod autocomplete;
pub mod command;
pub mod config;
pub mod dispatch;
pub mod history;
pub mod input;
pub mod listeners;
pub mod overlay;
pub mod state;
pub mod status;
pub mod storage;
pub mod theme;
pub mod transcript;
pub mod typewriter;

pub use action::{Action, Effect, update};
pub use state::App;
