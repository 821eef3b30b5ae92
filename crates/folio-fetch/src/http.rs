use async_trait::async_trait;
use tracing::debug;

use crate::error::{Error, Result};
use crate::Fetcher;

/// [`Fetcher`] backed by reqwest, resolving paths against a site root URL.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    root: String,
}

impl HttpFetcher {
    /// Creates a fetcher rooted at `root` (e.g. `https://example.org`).
    pub fn new(root: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            root: root.into().trim_end_matches('/').to_string(),
        }
    }

    /// Resolves a resource path against the root. Absolute URLs pass
    /// through untouched.
    fn resolve(&self, path: &str) -> Result<String> {
        if path.is_empty() {
            return Err(Error::InvalidUrl("a resource path is required".to_string()));
        }
        if path.starts_with("http://") || path.starts_with("https://") {
            return Ok(path.to_string());
        }
        Ok(format!("{}/{}", self.root, path.trim_start_matches('/')))
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn get_text(&self, path: &str) -> Result<String> {
        let url = self.resolve(path)?;
        debug!(%url, "fetching resource");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status {
                status: status.as_u16(),
                url,
            });
        }

        Ok(response.text().await?)
    }

    async fn probe(&self, path: &str) -> bool {
        let Ok(url) = self.resolve(path) else {
            return false;
        };
        match self.client.get(&url).send().await {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }
}
