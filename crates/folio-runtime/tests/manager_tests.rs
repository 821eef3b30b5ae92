use std::sync::Arc;
use std::time::Duration;

use futures::future::BoxFuture;
use serde_json::{json, Value};

use folio_runtime::{
    Animator, DialogQueue, Error, FnViewBuilder, MemorySessionStore, Pane, Presenter, Result,
    SessionStore, ViewBuilder, ViewDescriptor, ViewManager, ViewRegistry,
};

fn static_view(html: &str) -> Arc<dyn ViewBuilder> {
    let html = html.to_string();
    Arc::new(FnViewBuilder(move |_: &Value| {
        let html = html.clone();
        Box::pin(async move { Ok(html) }) as BoxFuture<'static, Result<String>>
    }))
}

/// Renders its options verbatim, so tests can see what a view received.
fn echo_view() -> Arc<dyn ViewBuilder> {
    Arc::new(FnViewBuilder(|options: &Value| {
        let options = options.clone();
        Box::pin(async move { Ok(format!("<p>{}</p>", options)) })
            as BoxFuture<'static, Result<String>>
    }))
}

fn broken_view() -> Arc<dyn ViewBuilder> {
    Arc::new(FnViewBuilder(|_: &Value| {
        Box::pin(async { Err(Error::Build("boom".to_string())) })
            as BoxFuture<'static, Result<String>>
    }))
}

/// Completes only after a delay, to exercise overlapping navigations.
fn slow_view(html: &str, delay: Duration) -> Arc<dyn ViewBuilder> {
    let html = html.to_string();
    Arc::new(FnViewBuilder(move |_: &Value| {
        let html = html.clone();
        Box::pin(async move {
            tokio::time::sleep(delay).await;
            Ok(html)
        }) as BoxFuture<'static, Result<String>>
    }))
}

fn registry() -> ViewRegistry {
    ViewRegistry::new()
        .register(ViewDescriptor::new("Home", static_view("<p>home</p>")))
        .register(ViewDescriptor::new("About", echo_view()).with_parent("Home"))
        .register(
            ViewDescriptor::new("PostReader", echo_view())
                .with_parent("PostFeed")
                .secret(),
        )
        .register(ViewDescriptor::new("Broken", broken_view()))
        .register(ViewDescriptor::new(
            "Slow",
            slow_view("<p>slow</p>", Duration::from_millis(50)),
        ))
}

fn manager() -> (ViewManager, Arc<MemorySessionStore>) {
    let session: Arc<MemorySessionStore> = Arc::new(MemorySessionStore::new());
    let store: Arc<dyn SessionStore> = session.clone();
    let dialogs = Arc::new(DialogQueue::new(store.clone()));
    // Empty animation table: transitions complete immediately.
    let presenter = Presenter::new(Pane::new(), Animator::new());
    let manager = ViewManager::with_parts(registry(), store, dialogs, presenter, "Home");
    (manager, session)
}

async fn wait_for_dialog(manager: &ViewManager) -> folio_runtime::DialogView {
    for _ in 0..100 {
        if let Some(view) = manager.dialogs().visible() {
            return view;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("no dialog appeared");
}

#[tokio::test]
async fn test_show_view_renders_and_persists() {
    let (manager, session) = manager();

    manager.show_view("Home", None).await.unwrap();

    assert_eq!(manager.pane().content(), "<p>home</p>");
    assert!(!manager.pane().is_busy());
    let state = session.get();
    assert_eq!(state.current_view.as_deref(), Some("Home"));
    assert_eq!(state.previous_view, None);
}

#[tokio::test]
async fn test_view_changed_broadcast_precedes_build() {
    let (manager, _) = manager();
    let mut events = manager.subscribe();

    manager.show_view("About", None).await.unwrap();

    let event = events.recv().await.unwrap();
    assert_eq!(event.view, "About");
    assert_eq!(event.parent.as_deref(), Some("Home"));
}

#[tokio::test]
async fn test_unknown_view_resets_session() {
    let (manager, session) = manager();
    manager
        .show_view("About", Some(json!({ "page": 2 })))
        .await
        .unwrap();

    let err = manager.show_view("NoSuchView", None).await.unwrap_err();
    assert!(matches!(err, Error::UnknownView(_)));

    // The reset dropped the stale record and landed on the default root.
    let state = session.get();
    assert_eq!(state.current_view.as_deref(), Some("Home"));
    assert_eq!(state.previous_view, None);
    assert_eq!(manager.pane().content(), "<p>home</p>");
}

#[tokio::test]
async fn test_secret_view_rejected_as_direct_target() {
    let (manager, session) = manager();
    manager.show_view("Home", None).await.unwrap();

    let err = manager
        .show_view("PostReader", Some(json!({ "postId": "x" })))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::SecretView(_)));

    // Nothing moved: pane and session still show the old view.
    assert_eq!(manager.pane().content(), "<p>home</p>");
    assert_eq!(session.get().current_view.as_deref(), Some("Home"));
}

#[tokio::test]
async fn test_show_post_reaches_secret_view() {
    let (manager, session) = manager();

    manager.show_post("deadbeef").await.unwrap();

    assert!(manager.pane().content().contains("deadbeef"));
    let state = session.get();
    assert_eq!(state.current_view.as_deref(), Some("PostReader"));
    assert_eq!(
        state.current_view_options,
        Some(json!({ "postId": "deadbeef" }))
    );
}

#[tokio::test]
async fn test_show_previous_view_restores_options() {
    let (manager, session) = manager();
    manager
        .show_view("About", Some(json!({ "page": 3 })))
        .await
        .unwrap();
    manager.show_view("Home", None).await.unwrap();

    let moved = manager.show_previous_view(false).await.unwrap();
    assert!(moved);

    let state = session.get();
    assert_eq!(state.current_view.as_deref(), Some("About"));
    assert_eq!(state.current_view_options, Some(json!({ "page": 3 })));
    assert!(manager.pane().content().contains("\"page\":3"));
}

#[tokio::test]
async fn test_show_previous_view_without_history() {
    let (manager, session) = manager();
    manager.show_view("About", None).await.unwrap();
    assert_eq!(session.get().previous_view, None);

    // Without the fallback, nothing happens.
    let moved = manager.show_previous_view(false).await.unwrap();
    assert!(!moved);
    assert_eq!(session.get().current_view.as_deref(), Some("About"));

    // With it, navigation falls back to the registered parent.
    let moved = manager.show_previous_view(true).await.unwrap();
    assert!(moved);
    assert_eq!(session.get().current_view.as_deref(), Some("Home"));
}

#[tokio::test]
async fn test_overlapping_navigation_discards_stale_build() {
    let (manager, session) = manager();

    let slow = {
        let manager = manager.clone();
        tokio::spawn(async move { manager.show_view("Slow", None).await })
    };
    tokio::time::sleep(Duration::from_millis(10)).await;
    manager.show_view("Home", None).await.unwrap();

    // The superseded build completes without error and without swapping.
    slow.await.unwrap().unwrap();
    assert_eq!(manager.pane().content(), "<p>home</p>");
    assert_eq!(session.get().current_view.as_deref(), Some("Home"));
    assert!(manager.dialogs().visible().is_none());
}

#[tokio::test]
async fn test_build_failure_presents_recovery_dialog() {
    let (manager, _) = manager();

    let err = manager.show_view("Broken", None).await.unwrap_err();
    assert!(matches!(err, Error::Build(_)));
    assert!(manager.pane().is_empty());

    let dialog = wait_for_dialog(&manager).await;
    assert_eq!(dialog.title, "Oops!");
    assert_eq!(dialog.details.as_deref(), Some("View build failed: boom"));
    let actions: Vec<&str> = dialog.actions.iter().map(|a| a.text.as_str()).collect();
    assert_eq!(actions, vec!["Home", "Retry"]);
}

#[tokio::test]
async fn test_failure_dialog_home_resets() {
    let (manager, session) = manager();
    let _ = manager.show_view("Broken", None).await;
    wait_for_dialog(&manager).await;

    assert!(manager.dialogs().select("Home"));

    for _ in 0..100 {
        if manager.pane().content() == "<p>home</p>" {
            break;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    assert_eq!(manager.pane().content(), "<p>home</p>");
    assert_eq!(session.get().current_view.as_deref(), Some("Home"));
}

#[tokio::test]
async fn test_initialize_prefers_deep_link_directive() {
    let (manager, session) = manager();

    manager
        .initialize(Some("?q=view-post&id=abc123"))
        .await
        .unwrap();

    assert!(manager.pane().content().contains("abc123"));
    assert_eq!(session.get().current_view.as_deref(), Some("PostReader"));
}

#[tokio::test]
async fn test_initialize_restores_session() {
    let (manager, session) = manager();
    let mut state = session.get();
    state.current_view = Some("About".to_string());
    state.current_view_options = Some(json!({ "page": 7 }));
    session.set(state).unwrap();

    manager.initialize(None).await.unwrap();

    assert!(manager.pane().content().contains("\"page\":7"));
}

#[tokio::test]
async fn test_initialize_merges_max_items_into_restored_view() {
    let (manager, session) = manager();
    let mut state = session.get();
    state.current_view = Some("About".to_string());
    state.current_view_options = Some(json!({ "page": 2 }));
    session.set(state).unwrap();

    manager.initialize(Some("?maxItems=3")).await.unwrap();

    let content = manager.pane().content();
    assert!(content.contains("\"page\":2"));
    assert!(content.contains("\"maxItems\":3"));
    assert_eq!(
        session.get().current_view_options.unwrap()["maxItems"],
        json!(3)
    );
}

#[tokio::test]
async fn test_initialize_passes_max_items_with_deep_link() {
    let (manager, _) = manager();

    manager
        .initialize(Some("?q=view-post&id=abc123&maxItems=5"))
        .await
        .unwrap();

    let content = manager.pane().content();
    assert!(content.contains("abc123"));
    assert!(content.contains("\"maxItems\":5"));
}

#[tokio::test]
async fn test_initialize_defaults_to_root() {
    let (manager, session) = manager();

    manager.initialize(Some("?plain=query")).await.unwrap();

    assert_eq!(manager.pane().content(), "<p>home</p>");
    assert_eq!(session.get().current_view.as_deref(), Some("Home"));
}

#[tokio::test]
async fn test_reload_replays_current_view() {
    let (manager, _) = manager();
    manager
        .show_view("About", Some(json!({ "page": 1 })))
        .await
        .unwrap();
    manager.pane().set_content("stale");

    manager.reload().await.unwrap();

    assert!(manager.pane().content().contains("\"page\":1"));
}
