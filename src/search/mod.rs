//! # Search Index
//!
//! The site publishes a JSON array of posts. It is fetched once at startup,
//! in the background, and answers keyword queries with a plain
//! case-insensitive substring match over title, content and tags.
//! No ranking, no pagination.

use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use log::{info, warn};
use serde::{Deserialize, Deserializer, Serialize};

use crate::site::{FetchError, SiteFetcher, fetch_json};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SearchIndexEntry {
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub content: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tags: BTreeSet<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<BTreeSet<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<BTreeSet<String>>::deserialize(deserializer)?.unwrap_or_default())
}

impl SearchIndexEntry {
    /// `keyword` must already be lower-cased.
    pub fn matches(&self, keyword: &str) -> bool {
        self.title.to_lowercase().contains(keyword)
            || self.content.to_lowercase().contains(keyword)
            || self.tags.iter().any(|t| t.to_lowercase().contains(keyword))
    }

    /// `YYYY-MM-DD` when the date parses, the raw string otherwise.
    pub fn display_date(&self) -> String {
        let raw = self.date.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return dt.date_naive().to_string();
        }
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
            return dt.date().to_string();
        }
        if let Ok(d) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            return d.to_string();
        }
        raw.to_string()
    }

    /// One transcript line: date, title, link and tags.
    pub fn result_line(&self) -> String {
        let mut line = format!("  {}  {}  {}", self.display_date(), self.title, self.url);
        if !self.tags.is_empty() {
            let tags: Vec<&str> = self.tags.iter().map(String::as_str).collect();
            line.push_str(&format!("  [{}]", tags.join(", ")));
        }
        line
    }
}

/// Where the index is in its one-shot lifecycle.
#[derive(Debug, Default)]
pub enum IndexState {
    #[default]
    Absent,
    Loading,
    Loaded(Vec<SearchIndexEntry>),
    /// The fetch failed; the index stays unavailable for the session.
    Failed(String),
}

/// Why a query could not run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unavailable {
    /// Not fetched yet, or still in flight. The caller should retry later.
    NotLoaded,
    Failed,
}

#[derive(Debug, Default)]
pub struct SearchIndex {
    state: IndexState,
}

impl SearchIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &IndexState {
        &self.state
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.state, IndexState::Loaded(_))
    }

    /// Marks the load as started. Returns `false` if it was ever started
    /// before, so the fetch happens at most once.
    pub fn begin_loading(&mut self) -> bool {
        if !matches!(self.state, IndexState::Absent) {
            return false;
        }
        self.state = IndexState::Loading;
        true
    }

    /// Applies the outcome of the fetch. Returns the failure, if any, so the
    /// caller can report it once.
    pub fn finish(&mut self, result: Result<Vec<SearchIndexEntry>, FetchError>) -> Option<FetchError> {
        if !matches!(self.state, IndexState::Loading) {
            warn!("Ignoring search index result outside of a load");
            return None;
        }
        match result {
            Ok(entries) => {
                info!("Search index loaded: {} entries", entries.len());
                self.state = IndexState::Loaded(entries);
                None
            }
            Err(e) => {
                warn!("Search index failed to load: {}", e);
                self.state = IndexState::Failed(e.to_string());
                Some(e)
            }
        }
    }

    /// All entries containing `keyword` (case-insensitive), in index order.
    pub fn query(&self, keyword: &str) -> Result<Vec<&SearchIndexEntry>, Unavailable> {
        match &self.state {
            IndexState::Loaded(entries) => {
                let keyword = keyword.to_lowercase();
                Ok(entries.iter().filter(|e| e.matches(&keyword)).collect())
            }
            IndexState::Failed(_) => Err(Unavailable::Failed),
            IndexState::Absent | IndexState::Loading => Err(Unavailable::NotLoaded),
        }
    }
}

pub async fn load_search_index(
    fetcher: &dyn SiteFetcher,
    path: &str,
) -> Result<Vec<SearchIndexEntry>, FetchError> {
    fetch_json(fetcher, path).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_index;

    fn loaded() -> SearchIndex {
        let mut index = SearchIndex::new();
        index.begin_loading();
        index.finish(Ok(sample_index()));
        index
    }

    #[test]
    fn test_query_rust_returns_first_entry() {
        let index = loaded();
        let hits = index.query("rust").unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "Intro to Rust");
    }

    #[test]
    fn test_query_is_case_insensitive() {
        let index = loaded();
        assert_eq!(index.query("GO").unwrap().len(), 1);
    }

    #[test]
    fn test_query_matches_tags_and_content() {
        let index = loaded();
        let hits = index.query("goroutine").unwrap();
        assert_eq!(hits[0].title, "Go basics");
        let hits = index.query("systems").unwrap();
        assert_eq!(hits[0].title, "Intro to Rust");
    }

    #[test]
    fn test_query_python_is_empty() {
        assert!(loaded().query("python").unwrap().is_empty());
    }

    #[test]
    fn test_not_loaded_asks_for_retry() {
        let mut index = SearchIndex::new();
        assert_eq!(index.query("rust").unwrap_err(), Unavailable::NotLoaded);
        index.begin_loading();
        assert_eq!(index.query("rust").unwrap_err(), Unavailable::NotLoaded);
    }

    #[test]
    fn test_loads_at_most_once() {
        let mut index = SearchIndex::new();
        assert!(index.begin_loading());
        assert!(!index.begin_loading());
        index.finish(Err(FetchError::Network("refused".to_string())));
        assert!(!index.begin_loading());
        assert_eq!(index.query("rust").unwrap_err(), Unavailable::Failed);
    }

    #[test]
    fn test_result_line_format() {
        let entry = &sample_index()[0];
        assert_eq!(
            entry.result_line(),
            "  2024-03-01  Intro to Rust  /posts/intro-to-rust/  [rust, systems]"
        );
    }

    #[test]
    fn test_display_date_variants() {
        let mut entry = sample_index().remove(1);
        assert_eq!(entry.display_date(), "2023-11-20");
        entry.date = "2023-11-20T08:00:00".to_string();
        assert_eq!(entry.display_date(), "2023-11-20");
        entry.date = "last tuesday".to_string();
        assert_eq!(entry.display_date(), "last tuesday");
    }

    #[test]
    fn test_tags_optional_or_null() {
        let json = r#"[
            {"title":"a","url":"/a/","date":"2024-01-01","content":"x"},
            {"title":"b","url":"/b/","date":"2024-01-02","content":"y","tags":null}
        ]"#;
        let entries: Vec<SearchIndexEntry> = serde_json::from_str(json).unwrap();
        assert!(entries.iter().all(|e| e.tags.is_empty()));
    }
}
