//! Markup parsing and validation.
//!
//! Markup is the one format without a direct value-model analogue, so parsing
//! follows a fixed element-tree convention, rooted at the document element:
//!
//! - attributes land in a nested mapping under `"@attributes"`;
//! - each distinct child tag becomes a key — a tag that recurs collapses into
//!   a `Sequence` of the occurrences in document order;
//! - an element with only text converts to a bare `Text` of the trimmed
//!   content;
//! - an element with text *and* attributes or children keeps the text under
//!   `"#text"`.
//!
//! Comments, namespaces and processing instructions are not preserved. The
//! convention is intentionally lossy in both directions; the transformer in
//! [`crate::transform::markup`] applies its exact inverse.

use std::fs;
use std::path::Path;

use crate::error::{PipelineError, PipelineResult};
use crate::parsing::{Validation, walk_empty_keys};
use crate::value::{Mapping, Value};

/// Parse a markup file into the element-tree convention above.
pub fn parse(path: &Path) -> PipelineResult<Value> {
    let text = fs::read_to_string(path).map_err(|e| PipelineError::ParseFailure {
        message: format!("error reading xml file {}: {e}", path.display()),
    })?;
    let doc = roxmltree::Document::parse(&text).map_err(|e| PipelineError::ParseFailure {
        message: format!("invalid xml in {}: {e}", path.display()),
    })?;
    Ok(element_to_value(doc.root_element()))
}

fn element_to_value(node: roxmltree::Node<'_, '_>) -> Value {
    let mut result = Mapping::new();

    let attributes: Mapping = node
        .attributes()
        .map(|a| (a.name().to_owned(), Value::text(a.value())))
        .collect();
    if !attributes.is_empty() {
        result.insert("@attributes", Value::Mapping(attributes));
    }

    for child in node.children().filter(roxmltree::Node::is_element) {
        let tag = child.tag_name().name();
        let converted = element_to_value(child);
        if !result.contains_key(tag) {
            result.insert(tag, converted);
            continue;
        }
        // The tag recurs: collapse the occurrences into a sequence in
        // document order.
        if let Some(existing) = result.get_mut(tag) {
            if let Value::Sequence(occurrences) = existing {
                occurrences.push(converted);
            } else {
                let first = existing.clone();
                *existing = Value::Sequence(vec![first, converted]);
            }
        }
    }

    // Like the leading-text rule of classic element trees: only text between
    // the start tag and the first child element counts.
    let text = node
        .children()
        .next()
        .filter(roxmltree::Node::is_text)
        .and_then(|n| n.text())
        .unwrap_or("")
        .trim();

    if !text.is_empty() && result.is_empty() {
        return Value::text(text);
    }
    if !text.is_empty() {
        result.insert("#text", Value::text(text));
    }
    Value::Mapping(result)
}

/// Walk the value and flag empty tags, like the object-notation validator but
/// with the markup wording. Markup has a single root, so there is no
/// sequence-of-items case.
pub fn validate(value: &Value) -> Validation {
    if value.is_null() {
        return Validation::from_errors(vec!["Data is null".to_owned()]);
    }

    let mut errors = Vec::new();
    if let Value::Mapping(map) = value {
        walk_empty_keys(map, "", "Empty tag found", &mut errors);
    }
    Validation::from_errors(errors)
}
