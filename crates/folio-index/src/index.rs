use std::sync::Arc;
use std::time::{Duration, Instant};

use folio_fetch::Fetcher;
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::debug;

use crate::error::Result;

/// Freshness window after which an index is considered stale.
pub const MAX_AGE: Duration = Duration::from_millis(15_000);

struct State<T> {
    store: Option<Arc<Vec<T>>>,
    last_sync: Option<Instant>,
}

/// A time-boxed cache over one JSON index endpoint.
///
/// Within the freshness window, `get` returns the cached collection by
/// reference (the same `Arc`, not a copy). A refresh stamps the window
/// from the instant the fetch started, so a slow response does not extend
/// freshness past the intended window. A failed refresh propagates its
/// error and leaves the previous collection and stamp untouched.
pub struct Index<T> {
    fetcher: Arc<dyn Fetcher>,
    path: String,
    process: fn(Value) -> Result<Vec<T>>,
    max_age: Duration,
    state: Mutex<State<T>>,
}

impl<T> Index<T> {
    pub fn new(
        fetcher: Arc<dyn Fetcher>,
        path: impl Into<String>,
        process: fn(Value) -> Result<Vec<T>>,
    ) -> Self {
        Self::with_max_age(fetcher, path, process, MAX_AGE)
    }

    pub fn with_max_age(
        fetcher: Arc<dyn Fetcher>,
        path: impl Into<String>,
        process: fn(Value) -> Result<Vec<T>>,
        max_age: Duration,
    ) -> Self {
        Self {
            fetcher,
            path: path.into(),
            process,
            max_age,
            state: Mutex::new(State {
                store: None,
                last_sync: None,
            }),
        }
    }

    /// Returns the collection, refreshing it when stale or when
    /// `force_refresh` is set.
    pub async fn get(&self, force_refresh: bool) -> Result<Arc<Vec<T>>> {
        let mut state = self.state.lock().await;

        if !force_refresh
            && let (Some(store), Some(last_sync)) = (&state.store, state.last_sync)
            && last_sync.elapsed() < self.max_age
        {
            return Ok(store.clone());
        }

        debug!(path = %self.path, force_refresh, "refreshing index");

        let started = Instant::now();
        let data = self.fetcher.get_json(&self.path).await?;
        let store = Arc::new((self.process)(data)?);

        state.store = Some(store.clone());
        state.last_sync = Some(started);

        Ok(store)
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}
