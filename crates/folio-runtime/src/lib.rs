//! View lifecycle runtime: registry, session persistence, navigation
//! state machine, modal dialog queue, and animated content presentation.

pub mod animator;
pub mod dialog;
pub mod error;
pub mod manager;
pub mod pane;
pub mod presenter;
pub mod query;
pub mod registry;
pub mod session;

pub use animator::Animator;
pub use dialog::{DialogQueue, DialogView};
pub use error::{Error, Result};
pub use manager::{ViewChanged, ViewManager, POST_READER_VIEW, PROJECT_VIEWER_VIEW};
pub use pane::{Pane, SharedPane};
pub use presenter::{Presenter, Swap};
pub use query::{Directive, Query};
pub use registry::{FnViewBuilder, ViewBuilder, ViewDescriptor, ViewRegistry};
pub use session::{FileSessionStore, MemorySessionStore, SessionState, SessionStore};
