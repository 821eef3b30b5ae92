use std::fmt::Write;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use folio_markup::escape;
use folio_runtime::{Result, ViewBuilder};

use crate::views::SiteContext;

/// Fallback logo for projects that do not ship one.
const DEFAULT_LOGO: &str = "img/icons/project.svg";

/// The project card list.
pub struct PortfolioView {
    context: Arc<SiteContext>,
}

impl PortfolioView {
    pub fn new(context: Arc<SiteContext>) -> Self {
        Self { context }
    }
}

#[async_trait]
impl ViewBuilder for PortfolioView {
    async fn build(&self, _options: &Value) -> Result<String> {
        let projects = self.context.catalog.projects(false).await?;

        let mut html = String::from("<h1>Portfolio</h1>\n<ul class=\"projects\">");
        for project in projects.iter() {
            let logo_path = project.logo.as_deref().unwrap_or(DEFAULT_LOGO);
            let logo = self.context.svg.embed(logo_path, Some(&project.name)).await;

            let _ = write!(
                html,
                "<li><a href=\"/?q=view-project&amp;uuid={uuid}\">\
                 <span class=\"logo\">{logo}</span><h3>{name}</h3></a>\
                 <p>{brief}</p></li>",
                uuid = project.uuid,
                name = escape(&project.name),
                brief = escape(project.brief.as_deref().unwrap_or_default()),
            );
        }
        html.push_str("</ul>");

        Ok(html)
    }
}
