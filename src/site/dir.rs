use std::io;
use std::path::PathBuf;

use async_trait::async_trait;
use log::info;

use super::{FetchError, SiteFetcher};

/// Reads site resources from a built site directory.
pub struct DirFetcher {
    root: PathBuf,
    origin: String,
}

impl DirFetcher {
    pub fn new(root: PathBuf) -> Self {
        let origin = root.display().to_string();
        Self { root, origin }
    }
}

#[async_trait]
impl SiteFetcher for DirFetcher {
    fn origin(&self) -> &str {
        &self.origin
    }

    async fn fetch(&self, path: &str) -> Result<Vec<u8>, FetchError> {
        let file = self.root.join(path.trim_start_matches('/'));
        info!("Reading {}", file.display());
        tokio::fs::read(&file).await.map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => FetchError::NotFound(path.to_string()),
            _ => FetchError::Io(e.to_string()),
        })
    }
}
