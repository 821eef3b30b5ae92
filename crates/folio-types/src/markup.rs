use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::debug;

/// Content of a markup node, in precedence order.
///
/// A node supplies at most one content form: literal text, a list of lines
/// joined with newlines, or child nodes. Table parts are carried on the
/// table variant directly.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeBody {
    Text(String),
    Lines(Vec<String>),
    Children(Vec<MarkupNode>),
    Empty,
}

/// Badge rendered over a link node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overlay {
    pub label: Option<String>,
    pub icon: Option<String>,
}

/// One node of a markup document tree.
///
/// The wire format is a JSON object tagged by `type`. Decoding is total: an
/// unrecognized or malformed node becomes [`MarkupNode::Unknown`] carrying
/// the raw value, so a document never fails to decode on bad authoring.
#[derive(Debug, Clone, PartialEq)]
pub enum MarkupNode {
    /// `h1`..`h6`.
    Heading {
        level: u8,
        style: Vec<String>,
        strip_blank: bool,
        body: NodeBody,
    },
    /// `group` — a plain container div.
    Group {
        style: Vec<String>,
        strip_blank: bool,
        body: NodeBody,
    },
    Paragraph {
        style: Vec<String>,
        strip_blank: bool,
        body: NodeBody,
    },
    Link {
        style: Vec<String>,
        href: Option<String>,
        open_in_new: bool,
        block: bool,
        overlay: Option<Overlay>,
        body: NodeBody,
    },
    Image {
        src: Option<String>,
        alt: Option<String>,
    },
    Span {
        style: Vec<String>,
        text: Option<String>,
    },
    List {
        style: Vec<String>,
        children: Vec<MarkupNode>,
    },
    ListItem {
        style: Vec<String>,
        body: NodeBody,
    },
    /// Inline quotation (`q`). Takes text or children, never lines.
    Quote {
        cite: Option<String>,
        strip_blank: bool,
        body: NodeBody,
    },
    BlockQuote {
        cite: Option<String>,
        strip_blank: bool,
        body: NodeBody,
    },
    /// Inline code.
    Code { body: NodeBody },
    /// Block code. Always rendered inside a scroll container with a
    /// block marker attribute.
    BlockCode {
        language: Option<String>,
        highlight: bool,
        body: NodeBody,
    },
    /// Table with optional caption, header rows, and body rows.
    Table {
        caption: Option<String>,
        head: Vec<Vec<String>>,
        body: Vec<Vec<String>>,
    },
    /// Anything the grammar does not recognize. Rendered as an escaped
    /// JSON dump instead of being rejected.
    Unknown(Value),
}

impl MarkupNode {
    /// Converts a raw JSON value into a markup node. Total: inputs that
    /// do not match the grammar land in [`MarkupNode::Unknown`].
    pub fn from_value(value: Value) -> Self {
        let Some(obj) = value.as_object() else {
            return MarkupNode::Unknown(value);
        };
        let Some(kind) = obj.get("type").and_then(Value::as_str) else {
            return MarkupNode::Unknown(value);
        };

        match kind {
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
                drop_extra_keys(kind, obj, &["style", "stripBlank", "text", "lines", "children"]);
                MarkupNode::Heading {
                    level: kind.as_bytes()[1] - b'0',
                    style: style_of(obj),
                    strip_blank: flag_of(obj, "stripBlank"),
                    body: body_of(obj, true, true),
                }
            }
            "group" | "paragraph" => {
                drop_extra_keys(kind, obj, &["style", "stripBlank", "text", "lines", "children"]);
                let style = style_of(obj);
                let strip_blank = flag_of(obj, "stripBlank");
                let body = body_of(obj, true, true);
                if kind == "group" {
                    MarkupNode::Group { style, strip_blank, body }
                } else {
                    MarkupNode::Paragraph { style, strip_blank, body }
                }
            }
            "link" => {
                drop_extra_keys(
                    kind,
                    obj,
                    &["style", "href", "openInNew", "block", "text", "lines", "children", "overlay"],
                );
                MarkupNode::Link {
                    style: style_of(obj),
                    href: string_of(obj, "href"),
                    open_in_new: flag_of(obj, "openInNew"),
                    block: flag_of(obj, "block"),
                    overlay: overlay_of(obj),
                    body: body_of(obj, true, true),
                }
            }
            "image" => {
                drop_extra_keys(kind, obj, &["src", "alt"]);
                MarkupNode::Image {
                    src: string_of(obj, "src"),
                    alt: string_of(obj, "alt"),
                }
            }
            "span" => {
                drop_extra_keys(kind, obj, &["style", "text"]);
                MarkupNode::Span {
                    style: style_of(obj),
                    text: string_of(obj, "text"),
                }
            }
            "list" => {
                drop_extra_keys(kind, obj, &["style", "children"]);
                MarkupNode::List {
                    style: style_of(obj),
                    children: children_of(obj),
                }
            }
            "listitem" => {
                drop_extra_keys(kind, obj, &["style", "text", "lines", "children"]);
                MarkupNode::ListItem {
                    style: style_of(obj),
                    body: body_of(obj, true, true),
                }
            }
            "quote" => {
                drop_extra_keys(kind, obj, &["cite", "stripBlank", "text", "children"]);
                MarkupNode::Quote {
                    cite: string_of(obj, "cite"),
                    strip_blank: flag_of(obj, "stripBlank"),
                    body: body_of(obj, false, true),
                }
            }
            "blockquote" => {
                drop_extra_keys(kind, obj, &["cite", "stripBlank", "text", "lines", "children"]);
                MarkupNode::BlockQuote {
                    cite: string_of(obj, "cite"),
                    strip_blank: flag_of(obj, "stripBlank"),
                    body: body_of(obj, true, true),
                }
            }
            "code" => {
                drop_extra_keys(kind, obj, &["text", "lines", "children"]);
                MarkupNode::Code {
                    body: body_of(obj, true, true),
                }
            }
            "blockcode" => {
                drop_extra_keys(kind, obj, &["language", "highlight", "text", "lines", "children"]);
                MarkupNode::BlockCode {
                    language: string_of(obj, "language"),
                    highlight: flag_of(obj, "highlight"),
                    body: body_of(obj, true, true),
                }
            }
            "table" => {
                drop_extra_keys(kind, obj, &["caption", "head", "body"]);
                MarkupNode::Table {
                    caption: string_of(obj, "caption"),
                    head: rows_of(obj, "head"),
                    body: rows_of(obj, "body"),
                }
            }
            _ => MarkupNode::Unknown(value),
        }
    }

    /// Convenience constructor for a plain text paragraph.
    pub fn paragraph(text: impl Into<String>) -> Self {
        MarkupNode::Paragraph {
            style: Vec::new(),
            strip_blank: false,
            body: NodeBody::Text(text.into()),
        }
    }

    /// Convenience constructor for a heading. `level` is clamped to 1..=6.
    pub fn heading(level: u8, text: impl Into<String>) -> Self {
        MarkupNode::Heading {
            level: level.clamp(1, 6),
            style: Vec::new(),
            strip_blank: false,
            body: NodeBody::Text(text.into()),
        }
    }

    /// Convenience constructor for a text link.
    pub fn link(href: impl Into<String>, text: impl Into<String>) -> Self {
        MarkupNode::Link {
            style: Vec::new(),
            href: Some(href.into()),
            open_in_new: false,
            block: false,
            overlay: None,
            body: NodeBody::Text(text.into()),
        }
    }
}

impl<'de> Deserialize<'de> for MarkupNode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(MarkupNode::from_value(value))
    }
}

type JsonObject = serde_json::Map<String, Value>;

fn string_of(obj: &JsonObject, key: &str) -> Option<String> {
    obj.get(key).and_then(Value::as_str).map(str::to_owned)
}

fn flag_of(obj: &JsonObject, key: &str) -> bool {
    obj.get(key).and_then(Value::as_bool).unwrap_or(false)
}

fn style_of(obj: &JsonObject) -> Vec<String> {
    match obj.get("style").and_then(Value::as_array) {
        Some(tokens) => tokens
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_owned)
            .collect(),
        None => Vec::new(),
    }
}

fn children_of(obj: &JsonObject) -> Vec<MarkupNode> {
    match obj.get("children").and_then(Value::as_array) {
        Some(nodes) => nodes.iter().cloned().map(MarkupNode::from_value).collect(),
        None => Vec::new(),
    }
}

/// Selects the node content by precedence: text, then lines, then children.
fn body_of(obj: &JsonObject, allow_lines: bool, allow_children: bool) -> NodeBody {
    if let Some(text) = string_of(obj, "text") {
        return NodeBody::Text(text);
    }
    if allow_lines
        && let Some(lines) = obj.get("lines").and_then(Value::as_array)
    {
        return NodeBody::Lines(
            lines
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_owned)
                .collect(),
        );
    }
    if allow_children && obj.contains_key("children") {
        return NodeBody::Children(children_of(obj));
    }
    NodeBody::Empty
}

fn overlay_of(obj: &JsonObject) -> Option<Overlay> {
    let overlay = obj.get("overlay")?.as_object()?;
    Some(Overlay {
        label: string_of(overlay, "label"),
        icon: string_of(overlay, "icon"),
    })
}

/// Row-major cell grid for table heads and bodies. Non-string scalars are
/// stringified; anything else is dumped as JSON.
fn rows_of(obj: &JsonObject, key: &str) -> Vec<Vec<String>> {
    let Some(rows) = obj.get(key).and_then(Value::as_array) else {
        return Vec::new();
    };
    rows.iter()
        .map(|row| match row.as_array() {
            Some(cells) => cells.iter().map(cell_to_string).collect(),
            None => vec![cell_to_string(row)],
        })
        .collect()
}

fn cell_to_string(cell: &Value) -> String {
    match cell {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn drop_extra_keys(kind: &str, obj: &JsonObject, allowed: &[&str]) {
    for key in obj.keys() {
        if key != "type" && !allowed.contains(&key.as_str()) {
            debug!(kind, key, "dropping attribute not in whitelist");
        }
    }
}
