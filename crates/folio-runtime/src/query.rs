use std::collections::HashMap;

/// A recognized deep-link directive from the query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// `?q=view-post&id={id}` — open the post reader.
    ViewPost { id: String },
    /// `?q=view-project&uuid={uuid}` — open the project viewer.
    ViewProject { uuid: String },
}

/// Parsed query-string parameters.
///
/// Directives are consumed once by the caller (the query string is cleared
/// after initialization) so a reload does not re-trigger them.
#[derive(Debug, Clone, Default)]
pub struct Query {
    pairs: HashMap<String, String>,
}

impl Query {
    /// Parses a raw query string (with or without the leading `?`).
    /// Keys without a value are kept with an empty value.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.strip_prefix('?').unwrap_or(raw);
        if raw.is_empty() {
            return Self::default();
        }

        let mut pairs = HashMap::new();
        for pair in raw.split('&') {
            if pair.is_empty() {
                continue;
            }
            match pair.split_once('=') {
                Some((key, value)) => pairs.insert(key.to_string(), value.to_string()),
                None => pairs.insert(pair.to_string(), String::new()),
            };
        }

        Self { pairs }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Item-count override for paginated views.
    pub fn max_items(&self) -> Option<usize> {
        self.get("maxItems").and_then(|v| v.parse().ok())
    }

    /// Decodes the deep-link directive, if the query carries one.
    pub fn directive(&self) -> Option<Directive> {
        match self.get("q")? {
            "view-post" => Some(Directive::ViewPost {
                id: self.get("id")?.to_string(),
            }),
            "view-project" => Some(Directive::ViewProject {
                uuid: self.get("uuid")?.to_string(),
            }),
            _ => None,
        }
    }
}
