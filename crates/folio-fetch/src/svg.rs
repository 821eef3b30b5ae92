use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use regex::Regex;
use tokio::sync::Mutex;
use tracing::debug;

use crate::error::Result;
use crate::Fetcher;

fn script_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?is)<script\b[^>]*>.*?</script\s*>").unwrap())
}

fn handler_attr_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"(?i)\son[a-z]+\s*=\s*("[^"]*"|'[^']*'|[^\s>]+)"#).unwrap())
}

fn anchor_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)<a\b[^>]*>").unwrap())
}

fn href_attr_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?i)\s(?:xlink:)?href\s*=\s*("[^"]*"|'[^']*'|[^\s>]+)"#).unwrap()
    })
}

/// Strips active content from SVG markup before inline embedding:
/// script elements, inline event-handler attributes, and link targets
/// on anchor elements.
pub fn sanitize_svg(markup: &str) -> String {
    let without_scripts = script_re().replace_all(markup, "");
    let without_handlers = handler_attr_re().replace_all(&without_scripts, "");
    anchor_re()
        .replace_all(&without_handlers, |caps: &regex::Captures<'_>| {
            href_attr_re().replace_all(&caps[0], "").into_owned()
        })
        .into_owned()
}

/// Memoizing store for embeddable icons.
///
/// Fetches and sanitizes each SVG at most once per path; a fetch failure
/// is recovered locally with a fallback glyph, never propagated.
pub struct SvgCache {
    fetcher: Arc<dyn Fetcher>,
    cache: Mutex<HashMap<String, String>>,
}

impl SvgCache {
    pub fn new(fetcher: Arc<dyn Fetcher>) -> Self {
        Self {
            fetcher,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the sanitized SVG markup for `path`.
    pub async fn get(&self, path: &str) -> Result<String> {
        let mut cache = self.cache.lock().await;
        if let Some(svg) = cache.get(path) {
            return Ok(svg.clone());
        }

        let svg = self.fetcher.get_svg(path).await?;
        cache.insert(path.to_string(), svg.clone());
        Ok(svg)
    }

    /// Returns markup embedding the icon at `path`, falling back to a
    /// text glyph (`alt`, or `⨯` when no alt is given) on failure.
    pub async fn embed(&self, path: &str, alt: Option<&str>) -> String {
        match self.get(path).await {
            Ok(svg) => svg,
            Err(err) => {
                debug!(path, %err, "icon fetch failed, using fallback glyph");
                format!("<span>{}</span>", alt.unwrap_or("\u{2a2f}"))
            }
        }
    }
}
