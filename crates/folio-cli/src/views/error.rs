use async_trait::async_trait;
use serde_json::Value;

use folio_markup::escape;
use folio_runtime::{Result, ViewBuilder};

/// Fallback page for navigation failures. Secret: only internal
/// navigation may land here. Takes an optional `reason` option shown in
/// a collapsed details block.
pub struct ErrorView;

#[async_trait]
impl ViewBuilder for ErrorView {
    async fn build(&self, options: &Value) -> Result<String> {
        let mut html = String::from(
            "<h1>Oops!</h1><p>Something went wrong while loading this page.</p>",
        );

        if let Some(reason) = options.get("reason").and_then(Value::as_str) {
            html.push_str(&format!(
                "<details><summary>Details</summary>\
                 <div class=\"reason\">{}</div></details>",
                escape(reason)
            ));
        }

        html.push_str(
            "<nav class=\"actions\">\
             <button data-action=\"retry\">Retry</button>\
             <button data-action=\"go-home\">Go home</button></nav>",
        );

        Ok(html)
    }
}
