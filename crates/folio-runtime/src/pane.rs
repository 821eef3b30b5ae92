use std::sync::{Arc, Mutex};

/// The content surface a view renders into.
///
/// Models the mutable bits of the page's main pane element: its inner
/// HTML, the set of animation classes currently applied, and the busy
/// flag shown while content is loading.
#[derive(Debug, Default)]
pub struct Pane {
    inner: Mutex<PaneState>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct PaneState {
    content: String,
    classes: Vec<String>,
    busy: bool,
}

pub type SharedPane = Arc<Pane>;

impl Pane {
    pub fn new() -> SharedPane {
        Arc::new(Self::default())
    }

    pub fn content(&self) -> String {
        self.lock().content.clone()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().content.is_empty()
    }

    pub fn is_busy(&self) -> bool {
        self.lock().busy
    }

    pub fn set_content(&self, content: impl Into<String>) {
        self.lock().content = content.into();
    }

    pub fn set_busy(&self, busy: bool) {
        self.lock().busy = busy;
    }

    pub fn add_class(&self, class: &str) {
        let mut state = self.lock();
        if !state.classes.iter().any(|c| c == class) {
            state.classes.push(class.to_string());
        }
    }

    pub fn remove_class(&self, class: &str) {
        self.lock().classes.retain(|c| c != class);
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.lock().classes.iter().any(|c| c == class)
    }

    pub fn classes(&self) -> Vec<String> {
        self.lock().classes.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, PaneState> {
        self.inner.lock().expect("pane lock poisoned")
    }
}
