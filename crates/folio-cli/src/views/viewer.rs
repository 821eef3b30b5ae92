use std::fmt::Write;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;

use folio_markup::escape;
use folio_runtime::{Error, Result, ViewBuilder};
use folio_types::{DetailLink, LicenseRef};

use crate::views::SiteContext;

/// One project in detail: logo, status, description, and the optional
/// licensing/docs/links sections. Requires a `projectUuid` option.
pub struct ProjectViewerView {
    context: Arc<SiteContext>,
}

impl ProjectViewerView {
    pub fn new(context: Arc<SiteContext>) -> Self {
        Self { context }
    }
}

#[async_trait]
impl ViewBuilder for ProjectViewerView {
    async fn build(&self, options: &Value) -> Result<String> {
        let raw = options.get("projectUuid").and_then(Value::as_str).ok_or_else(|| {
            Error::Build("ProjectViewer requires a projectUuid option".to_string())
        })?;
        let uuid = Uuid::parse_str(raw)
            .map_err(|_| Error::Build(format!("invalid project uuid: {}", raw)))?;

        let project = self
            .context
            .catalog
            .project_info(&uuid)
            .await?
            .ok_or_else(|| Error::NotFound(format!("project {}", uuid)))?;

        let mut html = String::from("<header>");
        if let Some(logo) = &project.logo {
            let logo = self.context.svg.embed(logo, Some(&project.name)).await;
            let _ = write!(html, "<span class=\"logo\">{}</span>", logo);
        }
        let _ = write!(
            html,
            "<h1>{name}</h1><a href=\"{url}\">Project page</a>",
            name = escape(&project.name),
            url = escape(&project.url),
        );
        if let Some(brief) = &project.brief {
            let _ = write!(html, "<p>{}</p>", escape(brief));
        }
        let _ = write!(
            html,
            "<span class=\"status\" data-status=\"{}\">{}</span></header>\n",
            project.status.as_str(),
            project.status.message(),
        );

        let paragraphs: Vec<&str> = project
            .description
            .iter()
            .map(|line| line.trim())
            .filter(|line| !line.is_empty())
            .collect();
        if !paragraphs.is_empty() {
            html.push_str("<section class=\"description\">");
            for line in paragraphs {
                let _ = write!(html, "<p>{}</p>", escape(line));
            }
            html.push_str("</section>\n");
        }

        if let Some(details) = &project.details {
            html.push_str(&compose_licenses(&details.licenses));
            html.push_str(&compose_links("docs", "Documentation", &details.docs));
            html.push_str(&compose_links("links", "Links", &details.links));
        }

        Ok(html)
    }
}

fn compose_licenses(licenses: &[LicenseRef]) -> String {
    if licenses.is_empty() {
        return String::new();
    }

    let mut html = String::from("<section class=\"licensing\"><h2>Licensing</h2><ul>");
    for license in licenses {
        let _ = write!(
            html,
            "<li><a href=\"{url}\"><span>{id}</span></a></li>",
            url = escape(&license.url),
            id = escape(&license.identifier),
        );
    }
    html.push_str("</ul></section>\n");
    html
}

fn compose_links(class: &str, title: &str, links: &[DetailLink]) -> String {
    if links.is_empty() {
        return String::new();
    }

    let mut html = format!("<section class=\"{}\"><h2>{}</h2><ul>", class, title);
    for link in links {
        // An untitled link shows its URL.
        let text = link.title.as_deref().unwrap_or(&link.url);
        let _ = write!(
            html,
            "<li><a href=\"{url}\"><span>{text}</span></a></li>",
            url = escape(&link.url),
            text = escape(text),
        );
    }
    html.push_str("</ul></section>\n");
    html
}
