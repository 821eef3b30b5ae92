use async_trait::async_trait;
use serde_json::Value;

use folio_markup::render;
use folio_runtime::{Result, ViewBuilder};
use folio_types::MarkupNode;

/// The about page. Static content, no catalog access.
pub struct AboutView;

#[async_trait]
impl ViewBuilder for AboutView {
    async fn build(&self, _options: &Value) -> Result<String> {
        Ok(render(&document()))
    }
}

fn document() -> Vec<MarkupNode> {
    vec![
        MarkupNode::heading(1, "About"),
        MarkupNode::paragraph(
            "I'm a software developer with a soft spot for systems \
             programming, desktop applications, and free software.",
        ),
        MarkupNode::paragraph(
            "Everything on this site is hand-built; the content is plain \
             JSON documents rendered to HTML on the fly.",
        ),
        MarkupNode::link("https://github.com/piskolab", "Find me on GitHub"),
    ]
}
