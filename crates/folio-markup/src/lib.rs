//! Markup document rendering.
//!
//! Turns a tree of [`folio_types::MarkupNode`] values into an HTML fragment
//! string. The renderer is a pure function over trusted-but-imperfect
//! content: every text and attribute value is entity-escaped on the way
//! out, and nodes the grammar does not recognize degrade to an escaped
//! dump instead of an error.

mod render;
pub mod text;

pub use render::render;
pub use text::{escape, escape_lines};
