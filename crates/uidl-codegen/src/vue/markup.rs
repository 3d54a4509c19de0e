//! Markup element tree for templates.

use std::sync::OnceLock;

use indexmap::IndexMap;
use regex::Regex;
use uidl_core::BuildError;
use uidl_pipeline::{NodePath, SourceTree};

/// Prefix of attributes bound to an expression.
pub const BIND_PREFIX: char = ':';

/// A markup element.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkupElement {
    pub tag: String,
    pub attributes: IndexMap<String, String>,
    pub children: Vec<MarkupNode>,
    /// Printed as `<tag/>` while it has no children.
    pub self_closing: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MarkupNode {
    Element(MarkupElement),
    Text(String),
}

impl MarkupElement {
    /// `<tag> </tag>` form, without validating the tag name.
    pub fn open_close(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: IndexMap::new(),
            children: Vec::new(),
            self_closing: false,
        }
    }

    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into(), value.into());
    }

    /// Set `:name="expression"`.
    pub fn set_bound_attribute(&mut self, name: &str, expression: impl Into<String>) {
        self.attributes
            .insert(format!("{}{}", BIND_PREFIX, name), expression.into());
    }

    pub fn append_text(&mut self, text: impl Into<String>) {
        self.children.push(MarkupNode::Text(text.into()));
    }

    pub fn append(&mut self, element: MarkupElement) {
        self.children.push(MarkupNode::Element(element));
    }

    pub fn element_at(&self, path: &NodePath) -> Option<&MarkupElement> {
        path.indices()
            .iter()
            .try_fold(self, |element, &index| match element.children.get(index)? {
                MarkupNode::Element(child) => Some(child),
                MarkupNode::Text(_) => None,
            })
    }

    pub fn element_at_mut(&mut self, path: &NodePath) -> Option<&mut MarkupElement> {
        path.indices()
            .iter()
            .try_fold(self, |element, &index| match element.children.get_mut(index)? {
                MarkupNode::Element(child) => Some(child),
                MarkupNode::Text(_) => None,
            })
    }

    fn write(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.tag);
        for (name, value) in &self.attributes {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(&value.replace('"', "&quot;"));
            out.push('"');
        }
        if self.self_closing && self.children.is_empty() {
            out.push_str("/>");
            return;
        }
        out.push('>');
        for child in &self.children {
            match child {
                MarkupNode::Element(element) => element.write(out),
                MarkupNode::Text(text) => out.push_str(text),
            }
        }
        out.push_str("</");
        out.push_str(&self.tag);
        out.push('>');
    }
}

impl SourceTree for MarkupElement {
    fn to_source(&self) -> String {
        let mut out = String::new();
        self.write(&mut out);
        out
    }
}

fn tag_name_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"^[A-Za-z][A-Za-z0-9_.:-]*$").ok())
        .as_ref()
}

/// Create an empty element, checking that `tag` parses as a tag name.
pub fn single_node(tag: &str, self_closing: bool) -> Result<MarkupElement, BuildError> {
    let malformed = |reason: &str| BuildError::MalformedLeafMarkup {
        tag: tag.to_string(),
        reason: reason.to_string(),
    };

    let pattern = tag_name_pattern().ok_or_else(|| malformed("tag name pattern unavailable"))?;
    if !pattern.is_match(tag) {
        return Err(malformed("not a valid tag name"));
    }

    Ok(MarkupElement {
        self_closing,
        ..MarkupElement::open_close(tag)
    })
}

/// Like [`single_node`], substituting the open/close form on failure.
pub fn single_node_or_fallback(tag: &str, self_closing: bool) -> MarkupElement {
    single_node(tag, self_closing).unwrap_or_else(|err| {
        tracing::warn!(error = %err, "using open/close fallback for tag");
        MarkupElement::open_close(tag)
    })
}
