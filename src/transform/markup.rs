//! Markup serialization: the inverse of the parse convention.
//!
//! A mapping key with a leading `@` becomes an attribute — that prefix is the
//! sole signal separating attributes from child elements. Nested mappings
//! become child elements, and a sequence value emits one repeated child per
//! item. Output is built under a synthetic `<root>` element and
//! pretty-printed with two-space indentation.

use crate::error::{PipelineError, PipelineResult};
use crate::value::{Mapping, Value};

const INDENT: &str = "  ";

/// Serialize a value as markup.
///
/// - A `Mapping` converts under `<root>` via the inverse convention.
/// - A `Sequence` of `Mapping`s wraps each record in a repeated `<item>`.
/// - Any other `Sequence` emits one `<item>` per element with its string form
///   as text.
/// - `Text` that already parses as well-formed markup passes through
///   unchanged; otherwise each line becomes an `<item>`.
/// - Scalars fail.
pub fn transform(value: &Value) -> PipelineResult<String> {
    match value {
        Value::Mapping(map) => {
            let mut root = Element::new("root");
            add_mapping(&mut root, map);
            Ok(root.pretty())
        }
        Value::Sequence(items) if items.iter().all(|item| item.as_mapping().is_some()) => {
            let mut root = Element::new("root");
            for item in items.iter().filter_map(Value::as_mapping) {
                let mut child = Element::new("item");
                add_mapping(&mut child, item);
                root.children.push(child);
            }
            Ok(root.pretty())
        }
        Value::Sequence(items) => {
            let mut root = Element::new("root");
            for item in items {
                root.children.push(Element::with_text("item", item.to_string()));
            }
            Ok(root.pretty())
        }
        Value::Text(text) => {
            if roxmltree::Document::parse(text).is_ok() {
                Ok(text.clone())
            } else {
                let mut root = Element::new("root");
                for line in text.trim().split('\n') {
                    root.children.push(Element::with_text("item", line.to_owned()));
                }
                Ok(root.pretty())
            }
        }
        other => Err(PipelineError::TransformFailure {
            message: format!("cannot convert {} to xml", other.kind()),
        }),
    }
}

/// Apply the inverse convention to one mapping: `@`-prefixed keys become
/// attributes of `parent` (any value via its string form), everything else
/// becomes child elements.
fn add_mapping(parent: &mut Element, map: &Mapping) {
    for (key, value) in map.iter() {
        if let Some(attribute) = key.strip_prefix('@') {
            parent.attributes.push((attribute.to_owned(), value.to_string()));
            continue;
        }
        match value {
            Value::Mapping(nested) => {
                let mut child = Element::new(key);
                add_mapping(&mut child, nested);
                parent.children.push(child);
            }
            Value::Sequence(items) => {
                for item in items {
                    match item {
                        Value::Mapping(nested) => {
                            let mut child = Element::new(key);
                            add_mapping(&mut child, nested);
                            parent.children.push(child);
                        }
                        other => parent.children.push(Element::with_text(key, other.to_string())),
                    }
                }
            }
            other => parent.children.push(Element::with_text(key, other.to_string())),
        }
    }
}

/// A tree node of the writer. An element carries either text or child
/// elements, never both — mixed content has no source in the conversion.
struct Element {
    tag: String,
    attributes: Vec<(String, String)>,
    text: Option<String>,
    children: Vec<Element>,
}

impl Element {
    fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: Vec::new(),
            text: None,
            children: Vec::new(),
        }
    }

    fn with_text(tag: impl Into<String>, text: String) -> Self {
        let mut element = Self::new(tag);
        element.text = Some(text);
        element
    }

    fn pretty(&self) -> String {
        let mut out = String::new();
        self.write(&mut out, 0);
        out
    }

    fn write(&self, out: &mut String, depth: usize) {
        let pad = INDENT.repeat(depth);
        out.push_str(&pad);
        out.push('<');
        out.push_str(&self.tag);
        for (name, value) in &self.attributes {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(&escape_attribute(value));
            out.push('"');
        }

        if self.children.is_empty() {
            match &self.text {
                None => out.push_str("/>\n"),
                Some(text) => {
                    out.push('>');
                    out.push_str(&escape_text(text));
                    out.push_str("</");
                    out.push_str(&self.tag);
                    out.push_str(">\n");
                }
            }
        } else {
            out.push_str(">\n");
            for child in &self.children {
                child.write(out, depth + 1);
            }
            out.push_str(&pad);
            out.push_str("</");
            out.push_str(&self.tag);
            out.push_str(">\n");
        }
    }
}

fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

fn escape_attribute(s: &str) -> String {
    escape_text(s).replace('"', "&quot;")
}
