use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use folio_fetch::Fetcher;
use folio_index::{Catalog, Index, POSTS_INDEX_PATH, PROJECTS_INDEX_PATH};
use folio_types::Post;
use uuid::Uuid;

/// Serves canned JSON bodies per path, counting fetches and optionally
/// failing on demand.
struct FakeFetcher {
    bodies: HashMap<String, String>,
    calls: AtomicUsize,
    failing: AtomicBool,
}

impl FakeFetcher {
    fn new() -> Self {
        Self {
            bodies: HashMap::new(),
            calls: AtomicUsize::new(0),
            failing: AtomicBool::new(false),
        }
    }

    fn with_body(mut self, path: &str, body: &str) -> Self {
        self.bodies.insert(path.to_string(), body.to_string());
        self
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

#[async_trait]
impl Fetcher for FakeFetcher {
    async fn get_text(&self, path: &str) -> folio_fetch::Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(folio_fetch::Error::Status {
                status: 500,
                url: path.to_string(),
            });
        }
        self.bodies
            .get(path)
            .cloned()
            .ok_or_else(|| folio_fetch::Error::Status {
                status: 404,
                url: path.to_string(),
            })
    }
}

const POSTS_BODY: &str = r#"{
    "posts": [
        {"id": "first", "title": "First", "date": "2023-01-01", "description": "a"},
        {"id": "second", "title": "Second", "date": "2024-06-01", "description": "b"},
        {"id": "third", "title": "Third", "date": "2023-06-15", "description": "c"}
    ]
}"#;

const PROJECTS_BODY: &str = r#"{
    "projects": [
        {
            "uuid": "a4c9ed18-84b8-4bff-9af9-3c0ab3d31d9a",
            "name": "folio",
            "url": "https://example.org/folio",
            "status": "active"
        }
    ]
}"#;

fn catalog() -> (Arc<FakeFetcher>, Catalog) {
    let fetcher = Arc::new(
        FakeFetcher::new()
            .with_body(POSTS_INDEX_PATH, POSTS_BODY)
            .with_body(PROJECTS_INDEX_PATH, PROJECTS_BODY),
    );
    let catalog = Catalog::new(fetcher.clone());
    (fetcher, catalog)
}

#[tokio::test]
async fn test_posts_sorted_by_date_descending() {
    let (_, catalog) = catalog();
    let posts = catalog.posts(false).await.unwrap();
    let ids: Vec<&str> = posts.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["second", "third", "first"]);
}

#[tokio::test]
async fn test_second_get_within_window_returns_same_reference() {
    let (fetcher, catalog) = catalog();
    let first = catalog.posts(false).await.unwrap();
    let second = catalog.posts(false).await.unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(fetcher.calls(), 1);
}

#[tokio::test]
async fn test_force_refresh_always_refetches() {
    let (fetcher, catalog) = catalog();
    let first = catalog.posts(false).await.unwrap();
    let second = catalog.posts(true).await.unwrap();
    assert!(!Arc::ptr_eq(&first, &second));
    assert_eq!(fetcher.calls(), 2);
}

#[tokio::test]
async fn test_expired_window_refetches() {
    let fetcher = Arc::new(FakeFetcher::new().with_body("idx.json", POSTS_BODY));
    let index: Index<Post> = Index::with_max_age(
        fetcher.clone(),
        "idx.json",
        |data| {
            let doc: folio_types::PostIndexDoc = serde_json::from_value(data)?;
            Ok(doc
                .posts
                .into_iter()
                .map(|r| Post {
                    resource_path: folio_index::post_resource_path(&r.id),
                    id: r.id,
                    date: r.date.unwrap_or_default(),
                    title: r.title,
                    description: r.description,
                })
                .collect())
        },
        Duration::from_millis(10),
    );

    index.get(false).await.unwrap();
    tokio::time::sleep(Duration::from_millis(25)).await;
    index.get(false).await.unwrap();
    assert_eq!(fetcher.calls(), 2);
}

#[tokio::test]
async fn test_refresh_failure_propagates_and_keeps_cache() {
    let (fetcher, catalog) = catalog();
    let first = catalog.posts(false).await.unwrap();

    fetcher.set_failing(true);
    assert!(catalog.posts(true).await.is_err());

    // The failed refresh must not have destroyed the cached collection.
    fetcher.set_failing(false);
    let after = catalog.posts(false).await.unwrap();
    assert!(Arc::ptr_eq(&first, &after));
}

#[tokio::test]
async fn test_post_info_lookup() {
    let (_, catalog) = catalog();
    let found = catalog.post_info("third").await.unwrap();
    assert_eq!(found.unwrap().title, "Third");
    assert!(catalog.post_info("missing").await.unwrap().is_none());
}

#[tokio::test]
async fn test_project_info_lookup() {
    let (_, catalog) = catalog();
    let uuid = Uuid::parse_str("a4c9ed18-84b8-4bff-9af9-3c0ab3d31d9a").unwrap();
    let found = catalog.project_info(&uuid).await.unwrap();
    assert_eq!(found.unwrap().name, "folio");
    assert!(catalog
        .project_info(&Uuid::parse_str("00000000-0000-0000-0000-000000000000").unwrap())
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_post_document_fetched_by_convention_path() {
    let fetcher = Arc::new(
        FakeFetcher::new()
            .with_body(POSTS_INDEX_PATH, POSTS_BODY)
            .with_body(
                "meta/posts/repo/first.json",
                r#"[{"type": "h1", "text": "First"}]"#,
            ),
    );
    let catalog = Catalog::new(fetcher);
    let post = catalog.post_info("first").await.unwrap().unwrap();
    assert_eq!(post.resource_path, "meta/posts/repo/first.json");
    let doc = catalog.post_document(&post).await.unwrap();
    assert_eq!(doc.len(), 1);
}

#[tokio::test]
async fn test_lookup_does_not_force_refresh() {
    let (fetcher, catalog) = catalog();
    catalog.posts(false).await.unwrap();
    catalog.post_info("first").await.unwrap();
    catalog.post_info("second").await.unwrap();
    assert_eq!(fetcher.calls(), 1);
}

#[tokio::test]
async fn test_get_json_decode_error_propagates() {
    let fetcher = Arc::new(FakeFetcher::new().with_body(POSTS_INDEX_PATH, "not json"));
    let catalog = Catalog::new(fetcher);
    assert!(catalog.posts(false).await.is_err());
}
