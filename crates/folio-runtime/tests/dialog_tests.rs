use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use folio_runtime::{DialogQueue, MemorySessionStore, SessionStore};
use folio_types::{DialogAction, DialogRequest};

fn queue() -> (Arc<DialogQueue>, Arc<MemorySessionStore>) {
    let session: Arc<MemorySessionStore> = Arc::new(MemorySessionStore::new());
    let store: Arc<dyn SessionStore> = session.clone();
    (Arc::new(DialogQueue::new(store)), session)
}

async fn wait_for<F>(mut check: F)
where
    F: FnMut() -> bool,
{
    for _ in 0..100 {
        if check() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("condition not reached");
}

#[tokio::test]
async fn test_show_resolves_with_selected_action() {
    let (queue, _) = queue();

    let shown = {
        let queue = queue.clone();
        tokio::spawn(async move {
            queue
                .show(
                    DialogRequest::new("Hey", "Pick one")
                        .with_action(DialogAction::new("Cancel"))
                        .with_action(DialogAction::new("Go").suggested()),
                )
                .await
        })
    };

    wait_for(|| queue.visible().is_some()).await;
    let dialog = queue.visible().unwrap();
    assert_eq!(dialog.title, "Hey");
    assert_eq!(dialog.actions.len(), 2);

    assert!(queue.select("Go"));
    assert_eq!(shown.await.unwrap(), "Go");
    assert!(queue.visible().is_none());
}

#[tokio::test]
async fn test_requests_queue_in_submission_order() {
    let (queue, _) = queue();

    let first = {
        let queue = queue.clone();
        tokio::spawn(async move { queue.show(DialogRequest::new("First", "")).await })
    };
    wait_for(|| queue.visible().is_some()).await;

    let second = {
        let queue = queue.clone();
        tokio::spawn(async move { queue.show(DialogRequest::new("Second", "")).await })
    };
    tokio::time::sleep(Duration::from_millis(20)).await;

    // Only one dialog occupies the slot until it is dismissed.
    assert_eq!(queue.visible().unwrap().title, "First");

    assert!(queue.select("OK"));
    assert_eq!(first.await.unwrap(), "OK");

    wait_for(|| matches!(queue.visible(), Some(d) if d.title == "Second")).await;
    assert!(queue.select("OK"));
    assert_eq!(second.await.unwrap(), "OK");
}

#[tokio::test]
async fn test_empty_action_list_gets_default_ok() {
    let (queue, _) = queue();

    let shown = {
        let queue = queue.clone();
        tokio::spawn(async move { queue.show(DialogRequest::new("Note", "All done")).await })
    };

    wait_for(|| queue.visible().is_some()).await;
    let dialog = queue.visible().unwrap();
    assert_eq!(dialog.actions.len(), 1);
    assert_eq!(dialog.actions[0].text, "OK");

    assert!(queue.select("OK"));
    assert_eq!(shown.await.unwrap(), "OK");
}

#[tokio::test]
async fn test_keep_open_action_holds_the_slot() {
    let (queue, _) = queue();

    let shown = {
        let queue = queue.clone();
        tokio::spawn(async move {
            queue
                .show(
                    DialogRequest::new("Busy", "Working")
                        .with_action(DialogAction::new("Wait").keep_open()),
                )
                .await
        })
    };

    wait_for(|| queue.visible().is_some()).await;
    assert!(queue.select("Wait"));
    tokio::time::sleep(Duration::from_millis(20)).await;

    // Still occupying the slot, still pending, until dismissed.
    assert!(queue.visible().is_some());
    assert!(!shown.is_finished());

    queue.dismiss();
    assert_eq!(shown.await.unwrap(), "");
    assert!(queue.visible().is_none());
}

#[tokio::test]
async fn test_kept_open_dialog_accepts_follow_up_selection() {
    let (queue, _) = queue();
    let waited = Arc::new(AtomicBool::new(false));

    let shown = {
        let queue = queue.clone();
        let waited = waited.clone();
        tokio::spawn(async move {
            queue
                .show(
                    DialogRequest::new("Busy", "Working")
                        .with_action(DialogAction::new("Wait").keep_open().on_select(
                            move || {
                                waited.store(true, Ordering::SeqCst);
                                Ok(())
                            },
                        ))
                        .with_action(DialogAction::new("Close")),
                )
                .await
        })
    };

    wait_for(|| queue.visible().is_some()).await;
    assert!(queue.select("Wait"));
    wait_for(|| waited.load(Ordering::SeqCst)).await;
    assert!(queue.visible().is_some());

    // The remaining actions stay live after a keep-open selection.
    assert!(queue.select("Close"));
    assert_eq!(shown.await.unwrap(), "Close");
    assert!(queue.visible().is_none());
}

#[tokio::test]
async fn test_callback_error_does_not_block_resolution() {
    let (queue, _) = queue();
    let ran = Arc::new(AtomicBool::new(false));

    let shown = {
        let queue = queue.clone();
        let ran = ran.clone();
        tokio::spawn(async move {
            queue
                .show(
                    DialogRequest::new("Oops", "Something failed").with_action(
                        DialogAction::new("Retry").on_select(move || {
                            ran.store(true, Ordering::SeqCst);
                            Err("callback exploded".into())
                        }),
                    ),
                )
                .await
        })
    };

    wait_for(|| queue.visible().is_some()).await;
    assert!(queue.select("Retry"));
    assert_eq!(shown.await.unwrap(), "Retry");
    assert!(ran.load(Ordering::SeqCst));
}

#[tokio::test]
async fn test_details_expander_follows_session_preference() {
    let (queue, session) = queue();
    let mut state = session.get();
    state.show_error_details = true;
    session.set(state).unwrap();

    let _shown = {
        let queue = queue.clone();
        tokio::spawn(async move {
            queue
                .show(DialogRequest::new("Oops", "Failed").with_details("stack trace here"))
                .await
        })
    };

    wait_for(|| queue.visible().is_some()).await;
    let dialog = queue.visible().unwrap();
    assert!(dialog.details_open);
    assert!(dialog.body_html.contains("<details open>"));
    assert!(dialog.body_html.contains("stack trace here"));

    queue.set_details_open(false);
    assert!(!queue.visible().unwrap().details_open);
    assert!(!session.get().show_error_details);
}
