//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;

use crate::core::command::{Command, DEFAULT_MARKER};
use crate::core::config::{
    DEFAULT_BASE_URL, DEFAULT_GRAPH_PATH, DEFAULT_SEARCH_INDEX_PATH, DEFAULT_TYPE_SPEED_MS,
    ResolvedConfig,
};
use crate::core::state::App;
use crate::core::storage::LocalStorage;
use crate::core::theme::Theme;
use crate::graph::{ForceParams, GraphData, GraphLayout, GraphLink, GraphNode};
use crate::search::SearchIndexEntry;
use crate::site::{FetchError, SiteFetcher};

/// A fetcher serving canned bodies from memory.
pub struct StaticFetcher {
    files: HashMap<String, Vec<u8>>,
}

impl StaticFetcher {
    pub fn new() -> Self {
        Self {
            files: HashMap::new(),
        }
    }

    pub fn with(mut self, path: &str, body: &str) -> Self {
        self.files.insert(path.to_string(), body.as_bytes().to_vec());
        self
    }
}

#[async_trait]
impl SiteFetcher for StaticFetcher {
    fn origin(&self) -> &str {
        "memory"
    }

    async fn fetch(&self, path: &str) -> Result<Vec<u8>, FetchError> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| FetchError::NotFound(path.to_string()))
    }
}

pub fn test_config() -> ResolvedConfig {
    ResolvedConfig {
        base_url: DEFAULT_BASE_URL.to_string(),
        search_index_path: DEFAULT_SEARCH_INDEX_PATH.to_string(),
        graph_path: Some(DEFAULT_GRAPH_PATH.to_string()),
        site_title: "Test Log".to_string(),
        theme: Theme::Dark,
        reduced_motion: false,
        type_speed_ms: DEFAULT_TYPE_SPEED_MS,
        marker: DEFAULT_MARKER,
        commands: Vec::<Command>::new(),
    }
}

/// Creates a test App backed by in-memory storage.
pub fn test_app() -> App {
    App::from_config(&test_config(), LocalStorage::in_memory())
}

/// A test App whose search index has already loaded [`sample_index`].
pub fn loaded_app() -> App {
    let mut app = test_app();
    app.search.begin_loading();
    app.search.finish(Ok(sample_index()));
    app
}

pub fn transcript_texts(app: &App) -> Vec<String> {
    app.transcript
        .lines()
        .iter()
        .map(|line| line.text.clone())
        .collect()
}

fn tags(values: &[&str]) -> BTreeSet<String> {
    values.iter().map(|t| t.to_string()).collect()
}

pub fn sample_index() -> Vec<SearchIndexEntry> {
    vec![
        SearchIndexEntry {
            title: "Intro to Rust".to_string(),
            url: "/posts/intro-to-rust/".to_string(),
            date: "2024-03-01T10:00:00+00:00".to_string(),
            content: "Ownership and borrowing in safe code.".to_string(),
            tags: tags(&["rust", "systems"]),
        },
        SearchIndexEntry {
            title: "Go basics".to_string(),
            url: "/posts/go-basics/".to_string(),
            date: "2023-11-20".to_string(),
            content: "Goroutines and channels.".to_string(),
            tags: tags(&["go"]),
        },
    ]
}

fn node(id: &str) -> GraphNode {
    GraphNode {
        id: id.to_string(),
        date: None,
        group: None,
    }
}

fn link(from: &str, to: &str) -> GraphLink {
    GraphLink {
        id: None,
        from: from.to_string(),
        to: to.to_string(),
    }
}

/// Three posts, three links; the last link points at a post that is not in
/// the node list.
pub fn sample_graph() -> GraphData {
    GraphData {
        nodes: vec![
            node("/posts/intro-to-rust/"),
            node("/posts/go-basics/"),
            node("/posts/ownership/"),
        ],
        links: vec![
            link("/posts/intro-to-rust/", "/posts/ownership/"),
            link("/posts/go-basics/", "/posts/intro-to-rust/"),
            link("/posts/ownership/", "/posts/missing/"),
        ],
    }
}

pub fn sample_layout() -> GraphLayout {
    GraphLayout::compute(&sample_graph(), &ForceParams::default())
}
