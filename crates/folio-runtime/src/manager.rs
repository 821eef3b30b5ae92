use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use futures::future::BoxFuture;
use futures::FutureExt;
use serde_json::{json, Value};
use tokio::sync::broadcast;
use tracing::{error, info, warn};

use folio_types::{DialogAction, DialogRequest};

use crate::animator::Animator;
use crate::dialog::DialogQueue;
use crate::error::{Error, Result};
use crate::pane::{Pane, SharedPane};
use crate::presenter::{Presenter, Swap};
use crate::query::{Directive, Query};
use crate::registry::ViewRegistry;
use crate::session::SessionStore;

/// View opened by the `view-post` deep-link directive.
pub const POST_READER_VIEW: &str = "PostReader";
/// View opened by the `view-project` deep-link directive.
pub const PROJECT_VIEWER_VIEW: &str = "ProjectViewer";

const TRANSITION_OUT: &str = "pop-out";
const TRANSITION_IN: &str = "pop-in";

/// Broadcast whenever a navigation starts, before the new content is
/// built, so navigation chrome can update independently of content
/// load latency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewChanged {
    pub view: String,
    pub parent: Option<String>,
}

struct ManagerInner {
    registry: ViewRegistry,
    session: Arc<dyn SessionStore>,
    presenter: Presenter,
    dialogs: Arc<DialogQueue>,
    events: broadcast::Sender<ViewChanged>,
    generation: AtomicU64,
    default_view: String,
}

/// Orchestrates view activation: session persistence, change
/// notifications, content building, and animated pane transitions.
///
/// Overlapping navigations follow cancel-and-supersede: every `show_view`
/// bumps a generation counter, and a build whose generation is no longer
/// current is discarded without touching the pane or raising a dialog.
#[derive(Clone)]
pub struct ViewManager {
    inner: Arc<ManagerInner>,
}

impl ViewManager {
    /// Creates a manager with a fresh pane and the standard animation set.
    pub fn new(
        registry: ViewRegistry,
        session: Arc<dyn SessionStore>,
        default_view: impl Into<String>,
    ) -> Self {
        let dialogs = Arc::new(DialogQueue::new(session.clone()));
        let presenter = Presenter::new(Pane::new(), Animator::standard());
        Self::with_parts(registry, session, dialogs, presenter, default_view)
    }

    pub fn with_parts(
        registry: ViewRegistry,
        session: Arc<dyn SessionStore>,
        dialogs: Arc<DialogQueue>,
        presenter: Presenter,
        default_view: impl Into<String>,
    ) -> Self {
        let default_view = default_view.into();
        debug_assert!(
            registry.is_valid(&default_view),
            "default view must be registered"
        );
        let (events, _) = broadcast::channel(16);
        Self {
            inner: Arc::new(ManagerInner {
                registry,
                session,
                presenter,
                dialogs,
                events,
                generation: AtomicU64::new(0),
                default_view,
            }),
        }
    }

    pub fn pane(&self) -> &SharedPane {
        self.inner.presenter.pane()
    }

    pub fn dialogs(&self) -> &Arc<DialogQueue> {
        &self.inner.dialogs
    }

    pub fn registry(&self) -> &ViewRegistry {
        &self.inner.registry
    }

    /// Subscribes to view-changed notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<ViewChanged> {
        self.inner.events.subscribe()
    }

    /// Resolves the initial view on cold start, in priority order:
    /// a deep-link query directive (consumed by the caller afterwards),
    /// the persisted session, then the default root view.
    pub async fn initialize(&self, query: Option<&str>) -> Result<()> {
        let query = query.map(Query::parse).unwrap_or_default();
        let max_items = query.max_items();

        if let Some(directive) = query.directive() {
            let mut state = self.inner.session.get();
            match directive {
                Directive::ViewPost { id } => {
                    state.current_view = Some(POST_READER_VIEW.to_string());
                    state.current_view_options = Some(json!({ "postId": id }));
                }
                Directive::ViewProject { uuid } => {
                    state.current_view = Some(PROJECT_VIEWER_VIEW.to_string());
                    state.current_view_options = Some(json!({ "projectUuid": uuid }));
                }
            }
            if let Some(count) = max_items {
                merge_max_items(&mut state.current_view_options, count);
            }
            if let Err(err) = self.inner.session.set(state) {
                warn!(%err, "could not persist deep-link session state");
            }
            return self.reload().await;
        }

        if self.inner.session.get().current_view.is_some() {
            // The item-count override applies to whichever view the
            // session restores, not only deep-link targets.
            if let Some(count) = max_items {
                let mut state = self.inner.session.get();
                merge_max_items(&mut state.current_view_options, count);
                if let Err(err) = self.inner.session.set(state) {
                    warn!(%err, "could not persist query overrides");
                }
            }
            return self.reload().await;
        }

        let default_view = self.inner.default_view.clone();
        let options = max_items.map(|count| json!({ "maxItems": count }));
        self.show_view_with(&default_view, options, true).await
    }

    /// Shows a view as a direct navigation target. Secret views are
    /// rejected loudly; unknown views force a full session reset.
    pub async fn show_view(&self, view: &str, options: Option<Value>) -> Result<()> {
        self.show_view_with(view, options, false).await
    }

    /// Opens the post reader (internal navigation).
    pub async fn show_post(&self, post_id: &str) -> Result<()> {
        self.show_view_with(POST_READER_VIEW, Some(json!({ "postId": post_id })), true)
            .await
    }

    /// Opens the project viewer (internal navigation).
    pub async fn show_project(&self, project_uuid: &str) -> Result<()> {
        self.show_view_with(
            PROJECT_VIEWER_VIEW,
            Some(json!({ "projectUuid": project_uuid })),
            true,
        )
        .await
    }

    /// Restores the previous view.
    ///
    /// With `fallback_parent` set and no previous view recorded, navigates
    /// to the current view's registered parent instead (the default root
    /// when the view is itself rootless). Returns whether any navigation
    /// happened.
    pub async fn show_previous_view(&self, fallback_parent: bool) -> Result<bool> {
        let state = self.inner.session.get();

        if let Some(previous) = state.previous_view {
            self.show_view_with(&previous, state.previous_view_options, true)
                .await?;
            return Ok(true);
        }

        if fallback_parent {
            let current = state
                .current_view
                .unwrap_or_else(|| self.inner.default_view.clone());
            let parent = self
                .inner
                .registry
                .parent_of(&current, None)
                .unwrap_or(&self.inner.default_view)
                .to_string();
            self.show_view_with(&parent, None, true).await?;
            return Ok(true);
        }

        Ok(false)
    }

    /// Replays the current view with its persisted options.
    pub async fn reload(&self) -> Result<()> {
        let state = self.inner.session.get();
        match state.current_view {
            Some(view) => {
                self.show_view_with(&view, state.current_view_options, true)
                    .await
            }
            None => {
                let default_view = self.inner.default_view.clone();
                self.show_view_with(&default_view, None, true).await
            }
        }
    }

    /// Clears the session and returns to the default root view.
    pub async fn reset(&self) -> Result<()> {
        if let Err(err) = self.inner.session.clear() {
            warn!(%err, "could not clear session");
        }
        let default_view = self.inner.default_view.clone();
        self.show_view_with(&default_view, None, true).await
    }

    async fn show_view_with(
        &self,
        view: &str,
        options: Option<Value>,
        allow_secret: bool,
    ) -> Result<()> {
        if !self.inner.registry.is_valid(view) {
            error!(view, "invalid navigation target, resetting session");
            self.reset_boxed().await?;
            return Err(Error::UnknownView(view.to_string()));
        }

        if !allow_secret && self.inner.registry.is_secret(view) == Some(true) {
            return Err(Error::SecretView(view.to_string()));
        }

        let generation = self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1;
        info!(view, generation, "showing view");

        // Navigation chrome updates immediately, before content builds.
        let _ = self.inner.events.send(ViewChanged {
            view: view.to_string(),
            parent: self
                .inner
                .registry
                .parent_of(view, None)
                .map(str::to_string),
        });

        // Write-before-build: a reload during a failed build points at the
        // attempted view, not the old one.
        let mut state = self.inner.session.get();
        state.shift(view, options.clone());
        if let Err(err) = self.inner.session.set(state) {
            warn!(%err, "could not persist session state");
        }

        let options_value = options.clone().unwrap_or_else(|| json!({}));
        let build = async {
            let content = self
                .inner
                .registry
                .activate(view, &options_value, true)
                .await;
            if self.inner.generation.load(Ordering::SeqCst) != generation {
                return Ok(Swap::Discard);
            }
            content.map(Swap::Apply)
        };

        match self
            .inner
            .presenter
            .present(build, TRANSITION_OUT, TRANSITION_IN)
            .await
        {
            Ok(_) => Ok(()),
            Err(err) => {
                error!(view, %err, "view build failed");
                self.spawn_failure_dialog(view.to_string(), options, &err);
                Err(err)
            }
        }
    }

    /// Presents the build-failure dialog on a separate task. Awaiting it
    /// inline would deadlock the navigation on its own recovery choice.
    fn spawn_failure_dialog(&self, view: String, options: Option<Value>, err: &Error) {
        let request = DialogRequest::new("Oops!", "An error occurred while loading the page.")
            .with_details(err.to_string())
            .with_action(DialogAction::new("Home"))
            .with_action(DialogAction::new("Retry").suggested());

        let manager = self.clone();
        tokio::spawn(async move {
            match manager.dialogs().show(request).await.as_str() {
                "Home" => {
                    if let Err(err) = manager.reset_boxed().await {
                        error!(%err, "reset after failure did not recover");
                    }
                }
                "Retry" => {
                    let _ = manager.retry_boxed(view, options).await;
                }
                _ => {}
            }
        });
    }

    fn reset_boxed(&self) -> BoxFuture<'static, Result<()>> {
        let manager = self.clone();
        async move { manager.reset().await }.boxed()
    }

    fn retry_boxed(&self, view: String, options: Option<Value>) -> BoxFuture<'static, Result<()>> {
        let manager = self.clone();
        async move { manager.show_view_with(&view, options, true).await }.boxed()
    }
}

fn merge_max_items(options: &mut Option<Value>, max_items: usize) {
    match options {
        Some(Value::Object(map)) => {
            map.insert("maxItems".to_string(), json!(max_items));
        }
        _ => *options = Some(json!({ "maxItems": max_items })),
    }
}
