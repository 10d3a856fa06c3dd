//! # Knowledge Graph
//!
//! Posts and the links between them, as published by the site at
//! `/pages/graph.json`. The core never interprets the graph beyond laying it
//! out for the map overlay.

pub mod layout;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::site::{FetchError, SiteFetcher, fetch_json};

pub use layout::{ForceParams, GraphLayout, PlacedNode};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct GraphNode {
    /// Site-relative URL of the post; doubles as the node's identity.
    pub id: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub group: Option<serde_json::Value>,
}

impl GraphNode {
    /// Short label: the last non-empty path segment of the id.
    pub fn label(&self) -> &str {
        self.id
            .split('/')
            .rev()
            .find(|s| !s.is_empty())
            .unwrap_or(&self.id)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct GraphLink {
    #[serde(default)]
    pub id: Option<serde_json::Value>,
    pub from: String,
    pub to: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct GraphData {
    #[serde(default)]
    pub nodes: Vec<GraphNode>,
    #[serde(default)]
    pub links: Vec<GraphLink>,
}

pub async fn load_graph(fetcher: &dyn SiteFetcher, path: &str) -> Result<GraphData, FetchError> {
    fetch_json(fetcher, path).await
}

/// Fetches the graph and lays it out on the blocking pool. The simulation is
/// quadratic in the node count, so it never runs on the event loop.
pub async fn load_graph_layout(
    fetcher: &dyn SiteFetcher,
    path: &str,
) -> Result<GraphLayout, FetchError> {
    let graph = load_graph(fetcher, path).await?;
    debug!(
        "Laying out graph: {} nodes, {} links",
        graph.nodes.len(),
        graph.links.len()
    );
    tokio::task::spawn_blocking(move || GraphLayout::compute(&graph, &ForceParams::default()))
        .await
        .map_err(|e| FetchError::Layout(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{StaticFetcher, sample_graph};

    #[test]
    fn test_parse_graph_json() {
        let json = r#"{
            "nodes": [{"id": "/posts/a/", "date": "2024-01-01", "group": 1}, {"id": "/posts/b/"}],
            "links": [{"id": 1, "from": "/posts/a/", "to": "/posts/b/"}]
        }"#;
        let graph: GraphData = serde_json::from_str(json).unwrap();
        assert_eq!(graph.nodes.len(), 2);
        assert_eq!(graph.nodes[1].date, None);
        assert_eq!(graph.links[0].to, "/posts/b/");
    }

    #[test]
    fn test_node_label() {
        let node = GraphNode {
            id: "/posts/intro-to-rust/".to_string(),
            date: None,
            group: None,
        };
        assert_eq!(node.label(), "intro-to-rust");
    }

    #[tokio::test]
    async fn test_load_graph_layout_matches_direct_compute() {
        let body = serde_json::to_string(&sample_graph()).unwrap();
        let fetcher = StaticFetcher::new().with("/pages/graph.json", &body);

        let layout = load_graph_layout(&fetcher, "/pages/graph.json").await.unwrap();
        assert_eq!(
            layout,
            GraphLayout::compute(&sample_graph(), &ForceParams::default())
        );
    }

    #[tokio::test]
    async fn test_load_graph_layout_missing_resource() {
        let fetcher = StaticFetcher::new();
        let err = load_graph_layout(&fetcher, "/pages/graph.json")
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::NotFound(_)));
    }
}
