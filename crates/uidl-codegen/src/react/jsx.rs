//! JSX element tree and helpers for editing it.

use uidl_core::{AttrValue, BuildError};
use uidl_pipeline::{NodePath, SourceTree};

use crate::js::{write_string_literal, Expression, TemplateLiteral};

/// Attribute holding CSS classes in JSX.
pub const CLASS_ATTRIBUTE: &str = "className";

/// Object the generated component reads its props from.
pub const PROPS_OBJECT: &str = "props";

/// A JSX element.
#[derive(Debug, Clone, PartialEq)]
pub struct JsxElement {
    pub name: String,
    pub attributes: Vec<JsxAttribute>,
    pub children: Vec<JsxChild>,
}

impl JsxElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&JsxAttribute> {
        self.attributes.iter().find(|a| a.name == name)
    }

    /// Add `attribute`, replacing an existing one of the same name in place.
    pub fn set_attribute(&mut self, attribute: JsxAttribute) {
        match self.attributes.iter_mut().find(|a| a.name == attribute.name) {
            Some(existing) => *existing = attribute,
            None => self.attributes.push(attribute),
        }
    }

    /// Descendant element at `path`; every step must land on an element.
    pub fn element_at(&self, path: &NodePath) -> Option<&JsxElement> {
        path.indices()
            .iter()
            .try_fold(self, |element, &index| match element.children.get(index)? {
                JsxChild::Element(child) => Some(child),
                _ => None,
            })
    }

    pub fn element_at_mut(&mut self, path: &NodePath) -> Option<&mut JsxElement> {
        path.indices()
            .iter()
            .try_fold(self, |element, &index| match element.children.get_mut(index)? {
                JsxChild::Element(child) => Some(child),
                _ => None,
            })
    }

    fn write(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.name);
        for attribute in &self.attributes {
            out.push(' ');
            attribute.write(out);
        }
        if self.children.is_empty() {
            out.push_str(" />");
            return;
        }
        out.push('>');
        for child in &self.children {
            child.write(out);
        }
        out.push_str("</");
        out.push_str(&self.name);
        out.push('>');
    }
}

impl SourceTree for JsxElement {
    fn to_source(&self) -> String {
        let mut out = String::new();
        self.write(&mut out);
        out
    }
}

/// `name`, `name="value"` or `name={expression}`.
#[derive(Debug, Clone, PartialEq)]
pub struct JsxAttribute {
    pub name: String,
    pub value: Option<JsxAttrValue>,
}

impl JsxAttribute {
    pub fn string(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Some(JsxAttrValue::String(value.into())),
        }
    }

    pub fn expression(name: impl Into<String>, expression: Expression) -> Self {
        Self {
            name: name.into(),
            value: Some(JsxAttrValue::Expression(expression)),
        }
    }

    fn write(&self, out: &mut String) {
        out.push_str(&self.name);
        match &self.value {
            None => {}
            Some(JsxAttrValue::String(value)) => {
                out.push_str("=\"");
                out.push_str(&value.replace('"', "&quot;"));
                out.push('"');
            }
            Some(JsxAttrValue::Expression(expression)) => {
                out.push_str("={");
                expression.write(out, None);
                out.push('}');
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum JsxAttrValue {
    String(String),
    Expression(Expression),
}

#[derive(Debug, Clone, PartialEq)]
pub enum JsxChild {
    Element(JsxElement),
    Text(String),
    /// `{expression}`
    Expression(Expression),
}

impl JsxChild {
    fn write(&self, out: &mut String) {
        match self {
            JsxChild::Element(element) => element.write(out),
            // braces and angle brackets would be read as JSX syntax
            JsxChild::Text(text) if text.contains(['{', '}', '<', '>']) => {
                out.push('{');
                write_string_literal(out, text);
                out.push('}');
            }
            JsxChild::Text(text) => out.push_str(text),
            JsxChild::Expression(expression) => {
                out.push('{');
                expression.write(out, None);
                out.push('}');
            }
        }
    }
}

/// `props.<prop>`
pub fn props_member(prop: &str) -> Expression {
    Expression::member(PROPS_OBJECT, prop)
}

/// Add a literal attribute. Strings are quoted, other literals become
/// expressions, and no value gives a bare boolean attribute.
pub fn add_attribute(element: &mut JsxElement, name: impl Into<String>, value: Option<&AttrValue>) {
    let name = name.into();
    let attribute = match value {
        None => JsxAttribute { name, value: None },
        Some(AttrValue::String(s)) => JsxAttribute::string(name, s.clone()),
        Some(other) => JsxAttribute::expression(name, Expression::literal(other)),
    };
    element.attributes.push(attribute);
}

/// Add `name={props.<prop>}`.
pub fn add_dynamic_prop(element: &mut JsxElement, name: impl Into<String>, prop: &str) {
    element
        .attributes
        .push(JsxAttribute::expression(name, props_member(prop)));
}

/// The class attribute of `element`.
///
/// When missing and `create_if_not_found` is set, an empty one is appended
/// to the attribute list and returned.
pub fn class_attribute(
    element: &mut JsxElement,
    create_if_not_found: bool,
) -> Option<&mut JsxAttribute> {
    let position = element.attributes.iter().position(|a| a.name == CLASS_ATTRIBUTE);
    match position {
        Some(index) => element.attributes.get_mut(index),
        None if create_if_not_found => {
            element.attributes.push(JsxAttribute::string(CLASS_ATTRIBUTE, ""));
            element.attributes.last_mut()
        }
        None => None,
    }
}

/// Append a class token to the element's class list.
///
/// The existing class attribute must hold a string literal; anything else
/// fails with [`BuildError::InvalidClassMergeTarget`].
pub fn add_class_string(element: &mut JsxElement, class: &str) -> Result<(), BuildError> {
    let tag = element.name.clone();
    let invalid = || BuildError::InvalidClassMergeTarget {
        tag: tag.clone(),
        attribute: CLASS_ATTRIBUTE.to_string(),
        token: class.to_string(),
    };

    let attribute = class_attribute(element, true).ok_or_else(invalid)?;
    match &mut attribute.value {
        Some(JsxAttrValue::String(value)) => {
            let mut classes: Vec<&str> = value.split_whitespace().collect();
            classes.push(class);
            let joined = classes.join(" ");
            *value = joined.trim().to_string();
            Ok(())
        }
        _ => Err(invalid()),
    }
}

/// Wrap CSS text in a template literal, on its own lines.
pub fn string_as_template_literal(css: &str) -> TemplateLiteral {
    TemplateLiteral::new(format!("\n{}\n  ", css))
}

/// Source of a scoped style block.
#[derive(Debug, Clone, PartialEq)]
pub enum StyleSource {
    Text(String),
    Template(TemplateLiteral),
}

impl From<&str> for StyleSource {
    fn from(css: &str) -> Self {
        StyleSource::Text(css.to_string())
    }
}

impl From<String> for StyleSource {
    fn from(css: String) -> Self {
        StyleSource::Text(css)
    }
}

impl From<TemplateLiteral> for StyleSource {
    fn from(template: TemplateLiteral) -> Self {
        StyleSource::Template(template)
    }
}

/// An element with no attributes.
pub fn basic_jsx_tag(name: &str, children: Vec<JsxChild>) -> JsxElement {
    JsxElement {
        name: name.to_string(),
        attributes: Vec::new(),
        children,
    }
}

/// `<style jsx>{`...`}</style>`
pub fn styled_jsx_tag(source: impl Into<StyleSource>) -> JsxElement {
    let template = match source.into() {
        StyleSource::Text(css) => string_as_template_literal(&css),
        StyleSource::Template(template) => template,
    };
    let mut tag = basic_jsx_tag(
        "style",
        vec![JsxChild::Expression(Expression::Template(template))],
    );
    add_attribute(&mut tag, "jsx", None);
    tag
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_print_nested() {
        let mut root = JsxElement::new("div");
        add_attribute(&mut root, "id", Some(&AttrValue::from("main")));
        add_attribute(&mut root, "tabIndex", Some(&AttrValue::Number(1.0)));
        add_dynamic_prop(&mut root, "title", "heading");
        root.children.push(JsxChild::Text("Hi ".into()));
        root.children.push(JsxChild::Expression(props_member("name")));
        root.children.push(JsxChild::Element(JsxElement::new("br")));

        assert_eq!(
            root.to_source(),
            "<div id=\"main\" tabIndex={1} title={props.heading}>Hi {props.name}<br /></div>"
        );
    }

    #[test]
    fn test_set_attribute_replaces() {
        let mut element = JsxElement::new("div");
        add_attribute(&mut element, "style", Some(&AttrValue::from("color: red")));
        add_attribute(&mut element, "id", Some(&AttrValue::from("x")));
        element.set_attribute(JsxAttribute::expression("style", props_member("style")));
        element.set_attribute(JsxAttribute::string("title", "t"));
        assert_eq!(
            element.to_source(),
            "<div style={props.style} id=\"x\" title=\"t\" />"
        );
    }

    #[test]
    fn test_class_attribute_created_on_demand() {
        let mut element = JsxElement::new("button");
        assert!(class_attribute(&mut element, false).is_none());
        assert!(element.attributes.is_empty());

        let attribute = class_attribute(&mut element, true).unwrap();
        assert_eq!(attribute.value, Some(JsxAttrValue::String(String::new())));
        assert_eq!(element.attributes.len(), 1);
    }

    #[test]
    fn test_add_class_string() {
        let mut element = JsxElement::new("button");
        element.attributes.push(JsxAttribute::string(CLASS_ATTRIBUTE, "btn"));
        add_class_string(&mut element, "active").unwrap();
        assert_eq!(
            element.attribute(CLASS_ATTRIBUTE).unwrap().value,
            Some(JsxAttrValue::String("btn active".into()))
        );
    }

    #[test]
    fn test_add_class_string_on_missing_attribute() {
        let mut element = JsxElement::new("div");
        add_class_string(&mut element, "card").unwrap();
        assert_eq!(element.to_source(), "<div className=\"card\" />");
    }

    #[test]
    fn test_add_class_string_rejects_expression() {
        let mut element = JsxElement::new("button");
        add_dynamic_prop(&mut element, CLASS_ATTRIBUTE, "classes");
        let err = add_class_string(&mut element, "active").unwrap_err();
        assert!(matches!(err, BuildError::InvalidClassMergeTarget { ref token, .. } if token == "active"));
        assert_eq!(element.attributes.len(), 1);
    }

    #[test]
    fn test_styled_jsx_tag() {
        let tag = styled_jsx_tag(".card { color: red; }");
        assert_eq!(
            tag.to_source(),
            "<style jsx>{`\n.card { color: red; }\n  `}</style>"
        );

        let prebuilt = styled_jsx_tag(TemplateLiteral::new("a {}"));
        assert_eq!(prebuilt.to_source(), "<style jsx>{`a {}`}</style>");
    }

    #[test]
    fn test_element_at() {
        let mut root = JsxElement::new("div");
        root.children.push(JsxChild::Text("x".into()));
        let mut inner = JsxElement::new("span");
        inner.children.push(JsxChild::Element(JsxElement::new("b")));
        root.children.push(JsxChild::Element(inner));

        assert_eq!(root.element_at(&NodePath::from(vec![1, 0])).unwrap().name, "b");
        assert!(root.element_at(&NodePath::from(vec![0])).is_none());
        root.element_at_mut(&NodePath::from(vec![1])).unwrap().name = "p".into();
        assert_eq!(root.element_at(&NodePath::from(vec![1])).unwrap().name, "p");
    }
}
