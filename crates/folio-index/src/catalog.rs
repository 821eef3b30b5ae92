use std::sync::Arc;

use folio_fetch::Fetcher;
use folio_types::{MarkupNode, Post, PostIndexDoc, Project, ProjectIndexDoc};
use serde_json::Value;
use uuid::Uuid;

use crate::error::Result;
use crate::index::Index;

pub const POSTS_INDEX_PATH: &str = "meta/posts/index.json";
pub const PROJECTS_INDEX_PATH: &str = "meta/projects/index.json";

/// Read-only access to the post and project indices.
///
/// Each index is cached behind its own freshness window; lookup helpers
/// never force a refresh. Collections are shared, not copied — callers
/// must not mutate them.
pub struct Catalog {
    fetcher: Arc<dyn Fetcher>,
    posts: Index<Post>,
    projects: Index<Project>,
}

impl Catalog {
    pub fn new(fetcher: Arc<dyn Fetcher>) -> Self {
        Self {
            posts: Index::new(fetcher.clone(), POSTS_INDEX_PATH, process_posts),
            projects: Index::new(fetcher.clone(), PROJECTS_INDEX_PATH, process_projects),
            fetcher,
        }
    }

    /// All posts, most recent first.
    pub async fn posts(&self, force_refresh: bool) -> Result<Arc<Vec<Post>>> {
        self.posts.get(force_refresh).await
    }

    /// All projects, in index order.
    pub async fn projects(&self, force_refresh: bool) -> Result<Arc<Vec<Project>>> {
        self.projects.get(force_refresh).await
    }

    /// Looks a post up by id. Absence is not an error.
    pub async fn post_info(&self, id: &str) -> Result<Option<Post>> {
        let posts = self.posts(false).await?;
        Ok(posts.iter().find(|p| p.id == id).cloned())
    }

    /// Looks a project up by uuid. Absence is not an error.
    pub async fn project_info(&self, uuid: &Uuid) -> Result<Option<Project>> {
        let projects = self.projects(false).await?;
        Ok(projects.iter().find(|p| &p.uuid == uuid).cloned())
    }

    /// Fetches the markup document backing a post.
    pub async fn post_document(&self, post: &Post) -> Result<Vec<MarkupNode>> {
        let data = self.fetcher.get_json(&post.resource_path).await?;
        Ok(serde_json::from_value(data)?)
    }
}

pub fn post_resource_path(id: &str) -> String {
    format!("meta/posts/repo/{id}.json")
}

fn process_posts(data: Value) -> Result<Vec<Post>> {
    let doc: PostIndexDoc = serde_json::from_value(data)?;

    let mut posts: Vec<Post> = doc
        .posts
        .into_iter()
        .map(|record| Post {
            resource_path: post_resource_path(&record.id),
            id: record.id,
            date: record.date.unwrap_or_default(),
            title: record.title,
            description: record.description,
        })
        .collect();

    // Most recent first; stable, so same-day posts keep index order.
    posts.sort_by(|a, b| b.date.cmp(&a.date));

    Ok(posts)
}

fn process_projects(data: Value) -> Result<Vec<Project>> {
    let doc: ProjectIndexDoc = serde_json::from_value(data)?;
    Ok(doc.projects)
}
