use std::fmt::Write;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use folio_markup::escape;
use folio_runtime::{Result, ViewBuilder};

use crate::format::short_date;
use crate::paginator::Paginator;
use crate::views::SiteContext;

/// The paginated post list.
///
/// Options: `maxItems` overrides the configured page size, `page`
/// selects a 1-based page.
pub struct PostFeedView {
    context: Arc<SiteContext>,
}

impl PostFeedView {
    pub fn new(context: Arc<SiteContext>) -> Self {
        Self { context }
    }
}

#[async_trait]
impl ViewBuilder for PostFeedView {
    async fn build(&self, options: &Value) -> Result<String> {
        let posts = self.context.catalog.posts(false).await?;

        let per_page = options
            .get("maxItems")
            .and_then(Value::as_u64)
            .map(|n| n as usize)
            .unwrap_or(self.context.posts_per_page);
        let page = options.get("page").and_then(Value::as_u64).unwrap_or(1) as usize;

        let mut paginator = Paginator::new(posts.as_ref().clone(), per_page);
        for _ in 1..page.max(1) {
            if !paginator.next() {
                break;
            }
        }

        let mut html = String::from("<h1>Posts</h1>\n<ul class=\"post-feed\">");
        for post in paginator.items() {
            let _ = write!(
                html,
                "<li><a href=\"/?q=view-post&amp;id={id}\"><h3>{title}</h3></a>\
                 <time datetime=\"{datetime}\">{date}</time>\
                 <p>{description}</p></li>",
                id = escape(&post.id),
                title = escape(&post.title),
                datetime = post.date.to_rfc3339(),
                date = short_date(&post.date),
                description = escape(&post.description),
            );
        }
        html.push_str("</ul>\n");

        let _ = write!(
            html,
            "<nav class=\"paginator\">Page {} of {}</nav>",
            paginator.page_index(),
            paginator.total_pages().max(1),
        );

        Ok(html)
    }
}
