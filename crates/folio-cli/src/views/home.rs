use async_trait::async_trait;
use serde_json::Value;

use folio_markup::render;
use folio_runtime::{Result, ViewBuilder};
use folio_types::MarkupNode;

/// The landing page. Static content, no catalog access.
pub struct HomeView;

#[async_trait]
impl ViewBuilder for HomeView {
    async fn build(&self, _options: &Value) -> Result<String> {
        Ok(render(&document()))
    }
}

fn document() -> Vec<MarkupNode> {
    vec![
        MarkupNode::heading(1, "Welcome!"),
        MarkupNode::paragraph(
            "This is my personal corner of the web: a place for programming \
             notes, experiments, and the projects I maintain.",
        ),
        MarkupNode::paragraph(
            "Have a look at the post feed for recent writing, or browse the \
             portfolio to see what I have been building.",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_home_is_static() {
        let html = HomeView.build(&json!({})).await.unwrap();
        assert!(html.starts_with("<h1>Welcome!</h1>"));
    }
}
