use std::path::PathBuf;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::error::{Error, Result};

/// The typed session record persisted across navigations.
///
/// `current_*` is written before every view build so that a restart during
/// a failed build still points at the attempted view. View options are
/// opaque JSON maps owned by the views themselves.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SessionState {
    pub current_view: Option<String>,
    pub current_view_options: Option<Value>,
    pub previous_view: Option<String>,
    pub previous_view_options: Option<Value>,
    /// UI preference: whether the dialog details expander is open.
    pub show_error_details: bool,
}

impl SessionState {
    /// Shifts the record for a new navigation: previous takes the old
    /// current, current takes the new pair.
    pub fn shift(&mut self, view: impl Into<String>, options: Option<Value>) {
        self.previous_view = self.current_view.take();
        self.previous_view_options = self.current_view_options.take();
        self.current_view = Some(view.into());
        self.current_view_options = options;
    }
}

/// Storage backing for the session record.
///
/// Injected into the view manager so navigation logic never touches
/// ambient global state directly.
pub trait SessionStore: Send + Sync {
    /// Reads the session. Absence or corruption yields the default record.
    fn get(&self) -> SessionState;

    fn set(&self, state: SessionState) -> Result<()>;

    fn clear(&self) -> Result<()>;
}

/// Session kept in process memory only. Suits tests and one-shot renders.
#[derive(Default)]
pub struct MemorySessionStore {
    state: Mutex<SessionState>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self) -> SessionState {
        self.state.lock().expect("session lock poisoned").clone()
    }

    fn set(&self, state: SessionState) -> Result<()> {
        *self.state.lock().expect("session lock poisoned") = state;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.set(SessionState::default())
    }
}

/// Session persisted as a JSON file, surviving process restarts.
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self) -> SessionState {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(_) => return SessionState::default(),
        };
        match serde_json::from_str(&raw) {
            Ok(state) => state,
            Err(err) => {
                warn!(path = %self.path.display(), %err, "session file unreadable, starting fresh");
                SessionState::default()
            }
        }
    }

    fn set(&self, state: SessionState) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| Error::Session(e.to_string()))?;
        }
        let raw = serde_json::to_string_pretty(&state).map_err(|e| Error::Session(e.to_string()))?;
        std::fs::write(&self.path, raw).map_err(|e| Error::Session(e.to_string()))
    }

    fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(Error::Session(err.to_string())),
        }
    }
}
