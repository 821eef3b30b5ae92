//! Resource fetching for the folio presentation engine.
//!
//! The [`Fetcher`] trait is the seam between the presentation layer and the
//! network: callers declare the response type they expect (JSON, text, SVG)
//! and the implementation decodes accordingly. [`HttpFetcher`] resolves
//! relative resource paths against a configured site root. SVG responses
//! are sanitized before they are handed out.

mod error;
mod http;
mod svg;

pub use error::{Error, Result};
pub use http::HttpFetcher;
pub use svg::{sanitize_svg, SvgCache};

use async_trait::async_trait;
use serde_json::Value;

/// Declared-type resource access.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetches a resource as plain text. Non-success responses are errors.
    async fn get_text(&self, path: &str) -> Result<String>;

    /// Fetches and decodes a JSON resource.
    async fn get_json(&self, path: &str) -> Result<Value> {
        let body = self.get_text(path).await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Fetches an SVG resource, sanitized for inline embedding.
    async fn get_svg(&self, path: &str) -> Result<String> {
        let body = self.get_text(path).await?;
        Ok(sanitize_svg(&body))
    }

    /// Checks whether a resource exists without decoding it.
    async fn probe(&self, path: &str) -> bool {
        self.get_text(path).await.is_ok()
    }
}
