//! Index caching for the folio presentation engine.
//!
//! The post and project indices are small JSON collections fetched from the
//! site root and cached in memory behind a 15-second freshness window.
//! Collections are replaced wholesale on refresh, never mutated in place.

mod catalog;
mod error;
mod index;

pub use catalog::{post_resource_path, Catalog, POSTS_INDEX_PATH, PROJECTS_INDEX_PATH};
pub use error::{Error, Result};
pub use index::{Index, MAX_AGE};
