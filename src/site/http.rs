use async_trait::async_trait;
use log::{debug, info};

use super::{FetchError, SiteFetcher};

/// Reads site resources over HTTP(S).
pub struct HttpFetcher {
    base_url: String,
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

#[async_trait]
impl SiteFetcher for HttpFetcher {
    fn origin(&self) -> &str {
        &self.base_url
    }

    async fn fetch(&self, path: &str) -> Result<Vec<u8>, FetchError> {
        let url = self.url_for(path);
        info!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                path: path.to_string(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;
        debug!("GET {} -> {} bytes", url, body.len());
        Ok(body.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_join_handles_slashes() {
        let fetcher = HttpFetcher::new("http://localhost:1313/".to_string());
        assert_eq!(
            fetcher.url_for("/pages/search.json"),
            "http://localhost:1313/pages/search.json"
        );
        assert_eq!(fetcher.url_for("graph.json"), "http://localhost:1313/graph.json");
    }
}
