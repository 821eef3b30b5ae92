use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A blog post entry from the post index.
///
/// Posts are denormalized, read-only records. The `resource_path` points at
/// the markup document holding the post body and is derived from the post id
/// when the index is processed, not carried on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub date: DateTime<Utc>,
    pub title: String,
    pub description: String,
    pub resource_path: String,
}

/// Wire shape of one entry in the post index document.
///
/// A missing publish date is treated as the Unix epoch so that undated posts
/// sink to the bottom of the date-descending feed instead of failing decode.
#[derive(Debug, Clone, Deserialize)]
pub struct PostRecord {
    pub id: String,
    #[serde(default, deserialize_with = "de_post_date")]
    pub date: Option<DateTime<Utc>>,
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// Index dates come as either RFC 3339 timestamps or bare `YYYY-MM-DD`
/// dates (taken as midnight UTC). Anything else decodes as absent.
fn de_post_date<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let Some(raw) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };

    if let Ok(ts) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(Some(ts.with_timezone(&Utc)));
    }

    if let Ok(date) = raw.parse::<chrono::NaiveDate>() {
        return Ok(date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc()));
    }

    Ok(None)
}

/// Wire envelope of the post index endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct PostIndexDoc {
    pub posts: Vec<PostRecord>,
}

/// Development status of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    Drafting,
    Active,
    Unmaintained,
    Deprecated,
    Canceled,
}

impl ProjectStatus {
    /// Human-readable status label shown in the project viewer.
    pub fn message(&self) -> &'static str {
        match self {
            ProjectStatus::Drafting => "Drafting phase",
            ProjectStatus::Active => "Active development",
            ProjectStatus::Unmaintained => "Unmaintained",
            ProjectStatus::Deprecated => "Deprecated",
            ProjectStatus::Canceled => "Canceled",
        }
    }

    /// Wire identifier, used as a `data-status` attribute value.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Drafting => "drafting",
            ProjectStatus::Active => "active",
            ProjectStatus::Unmaintained => "unmaintained",
            ProjectStatus::Deprecated => "deprecated",
            ProjectStatus::Canceled => "canceled",
        }
    }
}

/// A license reference in a project's detail section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicenseRef {
    pub identifier: String,
    pub url: String,
}

/// A titled link in a project's docs or links section.
///
/// A missing title falls back to the URL for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailLink {
    #[serde(default)]
    pub title: Option<String>,
    pub url: String,
}

/// Optional per-project detail sections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectDetails {
    #[serde(default)]
    pub licenses: Vec<LicenseRef>,
    #[serde(default)]
    pub docs: Vec<DetailLink>,
    #[serde(default)]
    pub links: Vec<DetailLink>,
}

/// A portfolio project entry from the project index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub uuid: Uuid,
    pub name: String,
    #[serde(default)]
    pub logo: Option<String>,
    pub url: String,
    pub status: ProjectStatus,
    /// One-line summary shown under the project name.
    #[serde(default)]
    pub brief: Option<String>,
    /// Longer description, one paragraph per entry. Blank entries are
    /// skipped at render time.
    #[serde(default)]
    pub description: Vec<String>,
    #[serde(default)]
    pub details: Option<ProjectDetails>,
}

/// Wire envelope of the project index endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectIndexDoc {
    pub projects: Vec<Project>,
}
