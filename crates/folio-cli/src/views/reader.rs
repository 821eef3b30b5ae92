use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use folio_markup::{escape, render};
use folio_runtime::{Error, Result, ViewBuilder};

use crate::format::long_date;
use crate::views::SiteContext;

/// Renders one post: header from the index entry, body from the post's
/// markup document. Requires a `postId` option.
pub struct PostReaderView {
    context: Arc<SiteContext>,
}

impl PostReaderView {
    pub fn new(context: Arc<SiteContext>) -> Self {
        Self { context }
    }
}

#[async_trait]
impl ViewBuilder for PostReaderView {
    async fn build(&self, options: &Value) -> Result<String> {
        let post_id = options
            .get("postId")
            .and_then(Value::as_str)
            .ok_or_else(|| Error::Build("PostReader requires a postId option".to_string()))?;

        let post = self
            .context
            .catalog
            .post_info(post_id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("post \"{}\"", post_id)))?;

        let document = self.context.catalog.post_document(&post).await?;

        let mut html = format!(
            "<header><h1>{title}</h1><p>{description}</p>\
             <time datetime=\"{datetime}\">{date}</time></header>\n<article>\n",
            title = escape(&post.title),
            description = escape(&post.description),
            datetime = post.date.to_rfc3339(),
            date = long_date(&post.date),
        );
        html.push_str(&render(&document));
        html.push_str("</article>");

        Ok(html)
    }
}
