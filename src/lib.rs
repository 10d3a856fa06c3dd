//! logshell library exports

pub mod core;
pub mod graph;
pub mod search;
pub mod site;
pub mod tui;

#[cfg(test)]
pub mod test_support;

pub use crate::core::theme::Theme;
