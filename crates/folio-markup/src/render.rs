use folio_types::{MarkupNode, NodeBody, Overlay};
use tracing::debug;

use crate::text::{escape, escape_lines};

/// Icon names an overlay badge may reference, with their resource paths.
const OVERLAY_ICONS: &[(&str, &str)] = &[
    ("link", "img/icons/link.svg"),
    ("external-link", "img/icons/open-in-new.svg"),
];

/// CSS class of the wrapper element around scrollable content.
const SCROLL_WRAPPER_CLASS: &str = "meta-scrolled-window";

/// Renders a markup document into an HTML fragment.
///
/// Pure and deterministic: the same tree always yields byte-identical
/// output. Never panics on malformed input; unrecognized nodes render as
/// an escaped JSON dump inside a paragraph.
pub fn render(nodes: &[MarkupNode]) -> String {
    let mut out = String::new();
    for node in nodes {
        render_node(node, &mut out);
    }
    out
}

/// An attribute is either `key="value"` or a bare marker key.
enum Attr {
    Value(&'static str, String),
    Marker(&'static str),
}

struct Tag {
    name: &'static str,
    attrs: Vec<Attr>,
    /// Emit `<tag/>` when there is no content, instead of `<tag></tag>`.
    self_closing: bool,
    vertical_scroll: bool,
    strip_blank: bool,
    overlay: Option<Overlay>,
}

impl Tag {
    fn new(name: &'static str) -> Self {
        Self {
            name,
            attrs: Vec::new(),
            self_closing: false,
            vertical_scroll: false,
            strip_blank: false,
            overlay: None,
        }
    }

    fn attr(mut self, key: &'static str, value: &str) -> Self {
        self.attrs.push(Attr::Value(key, escape(value)));
        self
    }

    fn attr_opt(self, key: &'static str, value: Option<&String>) -> Self {
        match value {
            Some(v) => self.attr(key, v),
            None => self,
        }
    }

    fn marker(mut self, key: &'static str, enabled: bool) -> Self {
        if enabled {
            self.attrs.push(Attr::Marker(key));
        }
        self
    }

    /// Style tokens become a `class` attribute with a `style-` prefix
    /// per token. An empty token list emits no class attribute.
    fn style(mut self, tokens: &[String]) -> Self {
        if !tokens.is_empty() {
            let classes = tokens
                .iter()
                .map(|t| format!("style-{}", escape(t)))
                .collect::<Vec<_>>()
                .join(" ");
            self.attrs.push(Attr::Value("class", classes));
        }
        self
    }

    fn strip_blank(mut self, strip: bool) -> Self {
        self.strip_blank = strip;
        self
    }

    fn scrolled(mut self) -> Self {
        self.vertical_scroll = true;
        self
    }

    fn with_overlay(mut self, overlay: Option<Overlay>) -> Self {
        self.overlay = overlay;
        self
    }

    /// Writes the complete tag with `content` between open and close tags.
    fn compose(self, content: &str, out: &mut String) {
        let mut result = String::new();
        result.push('<');
        result.push_str(self.name);
        for attr in &self.attrs {
            result.push(' ');
            match attr {
                Attr::Value(key, value) => {
                    result.push_str(key);
                    result.push_str("=\"");
                    result.push_str(value);
                    result.push('"');
                }
                Attr::Marker(key) => result.push_str(key),
            }
        }

        if self.self_closing && content.is_empty() && self.overlay.is_none() {
            result.push_str("/>");
        } else {
            result.push('>');
            result.push_str(content);
            if let Some(overlay) = &self.overlay {
                compose_overlay(overlay, &mut result);
            }
            result.push_str("</");
            result.push_str(self.name);
            result.push('>');
        }

        if self.vertical_scroll {
            out.push_str(&format!("<div class=\"{SCROLL_WRAPPER_CLASS}\">{result}</div>"));
        } else {
            out.push_str(&result);
        }

        if !self.strip_blank {
            out.push('\n');
        }
    }
}

fn render_node(node: &MarkupNode, out: &mut String) {
    match node {
        MarkupNode::Heading {
            level,
            style,
            strip_blank,
            body,
        } => {
            let name = match level {
                1 => "h1",
                2 => "h2",
                3 => "h3",
                4 => "h4",
                5 => "h5",
                _ => "h6",
            };
            Tag::new(name)
                .style(style)
                .strip_blank(*strip_blank)
                .compose(&render_body(body), out);
        }
        MarkupNode::Group {
            style,
            strip_blank,
            body,
        } => {
            Tag::new("div")
                .style(style)
                .strip_blank(*strip_blank)
                .compose(&render_body(body), out);
        }
        MarkupNode::Paragraph {
            style,
            strip_blank,
            body,
        } => {
            Tag::new("p")
                .style(style)
                .strip_blank(*strip_blank)
                .compose(&render_body(body), out);
        }
        MarkupNode::Link {
            style,
            href,
            open_in_new,
            block,
            overlay,
            body,
        } => {
            Tag::new("a")
                .style(style)
                .attr_opt("href", href.as_ref())
                .marker("target=\"_blank\"", *open_in_new)
                .marker("data-block", *block)
                .with_overlay(overlay.clone())
                .compose(&render_body(body), out);
        }
        MarkupNode::Image { src, alt } => {
            let mut tag = Tag::new("img")
                .attr_opt("src", src.as_ref())
                .attr_opt("alt", alt.as_ref())
                .attr("draggable", "false");
            tag.self_closing = true;
            tag.compose("", out);
        }
        MarkupNode::Span { style, text } => {
            let content = text.as_deref().map(escape).unwrap_or_default();
            Tag::new("span").style(style).compose(&content, out);
        }
        MarkupNode::List { style, children } => {
            Tag::new("ul").style(style).compose(&render(children), out);
        }
        MarkupNode::ListItem { style, body } => {
            Tag::new("li").style(style).compose(&render_body(body), out);
        }
        MarkupNode::Quote {
            cite,
            strip_blank,
            body,
        } => {
            Tag::new("q")
                .attr_opt("cite", cite.as_ref())
                .strip_blank(*strip_blank)
                .compose(&render_body(body), out);
        }
        MarkupNode::BlockQuote {
            cite,
            strip_blank,
            body,
        } => {
            Tag::new("blockquote")
                .attr_opt("cite", cite.as_ref())
                .strip_blank(*strip_blank)
                .compose(&render_body(body), out);
        }
        MarkupNode::Code { body } => {
            Tag::new("code").compose(&render_body(body), out);
        }
        MarkupNode::BlockCode {
            language,
            highlight,
            body,
        } => {
            Tag::new("code")
                .attr_opt("data-language", language.as_ref())
                .marker("data-highlight", *highlight)
                .marker("data-block", true)
                .scrolled()
                .compose(&render_body(body), out);
        }
        MarkupNode::Table {
            caption,
            head,
            body,
        } => {
            let content = compose_table(caption.as_deref(), head, body);
            Tag::new("table").scrolled().compose(&content, out);
        }
        MarkupNode::Unknown(value) => {
            debug!(node = %value, "no rule for node, rendering raw dump");
            let dump = serde_json::to_string(value).unwrap_or_default();
            Tag::new("p").compose(&escape(&dump), out);
        }
    }
}

fn render_body(body: &NodeBody) -> String {
    match body {
        NodeBody::Text(text) => escape(text),
        NodeBody::Lines(lines) => escape_lines(lines),
        NodeBody::Children(children) => render(children),
        NodeBody::Empty => String::new(),
    }
}

fn compose_overlay(overlay: &Overlay, out: &mut String) {
    out.push_str("<div class=\"meta-overlay\"><div>");

    if let Some(label) = &overlay.label {
        out.push_str("<span>");
        out.push_str(&escape(label));
        out.push_str("</span>");
    }

    if let Some(icon) = &overlay.icon {
        match OVERLAY_ICONS.iter().find(|(name, _)| *name == icon.as_str()) {
            Some((_, path)) => {
                out.push_str(&format!("<embed-svg src=\"{path}\"></embed-svg>"));
            }
            None => debug!(icon, "unknown overlay icon"),
        }
    }

    out.push_str("</div></div>");
}

fn compose_table(caption: Option<&str>, head: &[Vec<String>], body: &[Vec<String>]) -> String {
    let mut table = String::new();

    if let Some(caption) = caption {
        table.push_str("<caption>");
        table.push_str(&escape(caption));
        table.push_str("</caption>");
    }

    if !head.is_empty() {
        table.push_str("<thead>");
        compose_rows(head, "th", &mut table);
        table.push_str("</thead>");
    }

    if !body.is_empty() {
        table.push_str("<tbody>");
        compose_rows(body, "td", &mut table);
        table.push_str("</tbody>");
    }

    table
}

fn compose_rows(rows: &[Vec<String>], cell_tag: &str, out: &mut String) {
    for row in rows {
        out.push_str("<tr>");
        for cell in row {
            out.push('<');
            out.push_str(cell_tag);
            out.push('>');
            out.push_str(&escape(cell));
            out.push_str("</");
            out.push_str(cell_tag);
            out.push('>');
        }
        out.push_str("</tr>");
    }
}
