//! UIDL tree types.
//!
//! A UIDL document describes one component: its name, the props it accepts,
//! and a tree of abstract elements. Element types are resolved to concrete
//! target elements later, by the generators.

use std::fmt;

use indexmap::IndexMap;

/// Attributes of a node, in declaration order.
pub type Attrs = IndexMap<String, AttrValue>;

/// Style declarations of a node (CSS property -> value), in declaration order.
pub type Style = IndexMap<String, AttrValue>;

/// A complete component description.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ComponentUidl {
    /// Component name.
    pub name: String,
    /// Props accepted by the component.
    #[cfg_attr(feature = "serde", serde(rename = "propDefinitions", default))]
    pub prop_definitions: IndexMap<String, PropDefinition>,
    /// Root of the element tree.
    pub content: UidlNode,
}

impl ComponentUidl {
    /// Create a component with no prop definitions.
    pub fn new(name: impl Into<String>, content: UidlNode) -> Self {
        Self {
            name: name.into(),
            prop_definitions: IndexMap::new(),
            content,
        }
    }

    /// Declare a prop.
    pub fn with_prop(mut self, name: impl Into<String>, definition: PropDefinition) -> Self {
        self.prop_definitions.insert(name.into(), definition);
        self
    }
}

/// A single element of the UIDL tree.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UidlNode {
    /// Abstract element type (`container`, `text`, `Datepicker`, ...).
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub element_type: String,
    /// Node name, used as the lookup key for the synthesized element.
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "IndexMap::is_empty"))]
    pub attrs: Attrs,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Children::is_empty"))]
    pub children: Children,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "IndexMap::is_empty"))]
    pub style: Style,
    /// External dependency the element needs, if any.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub dependency: Option<DependencyDescriptor>,
}

impl UidlNode {
    /// Create a node of the given type.
    pub fn new(element_type: impl Into<String>) -> Self {
        Self {
            element_type: element_type.into(),
            name: String::new(),
            attrs: Attrs::new(),
            children: Children::Empty,
            style: Style::new(),
            dependency: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.attrs.insert(key.into(), value.into());
        self
    }

    pub fn with_style(mut self, property: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.style.insert(property.into(), value.into());
        self
    }

    pub fn with_dependency(mut self, dependency: DependencyDescriptor) -> Self {
        self.dependency = Some(dependency);
        self
    }

    /// Replace the children with a single text value.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.children = Children::Text(text.into());
        self
    }

    /// Append a child node.
    pub fn with_child(mut self, child: UidlNode) -> Self {
        self.children.push(ChildNode::Node(child));
        self
    }

    /// Append a text entry to the children sequence.
    pub fn with_text_child(mut self, text: impl Into<String>) -> Self {
        self.children.push(ChildNode::Text(text.into()));
        self
    }

    /// Iterate over this node and all of its descendants, pre-order.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }
}

/// Pre-order iterator over a node subtree.
#[derive(Debug)]
pub struct Descendants<'a> {
    stack: Vec<&'a UidlNode>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a UidlNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        if let Children::Elements(children) = &node.children {
            self.stack.extend(children.iter().rev().filter_map(ChildNode::as_node));
        }
        Some(node)
    }
}

/// The children of a node.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(untagged))]
pub enum Children {
    /// An ordered sequence of text entries and nodes.
    Elements(Vec<ChildNode>),
    /// A single text value.
    Text(String),
    #[default]
    Empty,
}

impl Children {
    pub fn is_empty(&self) -> bool {
        match self {
            Children::Elements(children) => children.is_empty(),
            Children::Text(_) => false,
            Children::Empty => true,
        }
    }

    /// Number of entries the children contribute to the synthesized tree.
    pub fn len(&self) -> usize {
        match self {
            Children::Elements(children) => children.len(),
            Children::Text(_) => 1,
            Children::Empty => 0,
        }
    }

    /// Append an entry, turning `Empty` or `Text` into a sequence.
    pub fn push(&mut self, child: ChildNode) {
        match self {
            Children::Elements(children) => children.push(child),
            Children::Text(text) => {
                let text = std::mem::take(text);
                *self = Children::Elements(vec![ChildNode::Text(text), child]);
            }
            Children::Empty => *self = Children::Elements(vec![child]),
        }
    }
}

/// One entry of a children sequence.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(untagged))]
pub enum ChildNode {
    Text(String),
    Node(UidlNode),
}

impl ChildNode {
    pub fn as_node(&self) -> Option<&UidlNode> {
        match self {
            ChildNode::Node(node) => Some(node),
            ChildNode::Text(_) => None,
        }
    }
}

/// A literal attribute, style, or default value.
///
/// Strings may carry a dynamic binding, see [`crate::binding`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(untagged))]
pub enum AttrValue {
    Boolean(bool),
    Number(f64),
    String(String),
}

impl AttrValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttrValue::String(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Boolean(b) => write!(f, "{}", b),
            AttrValue::Number(n) => write!(f, "{}", format_number(*n)),
            AttrValue::String(s) => f.write_str(s),
        }
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::String(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        AttrValue::String(value)
    }
}

impl From<f64> for AttrValue {
    fn from(value: f64) -> Self {
        AttrValue::Number(value)
    }
}

impl From<i32> for AttrValue {
    fn from(value: i32) -> Self {
        AttrValue::Number(f64::from(value))
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        AttrValue::Boolean(value)
    }
}

/// Format a number the way JavaScript prints it: integral values carry no
/// fractional part.
pub fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

/// A prop accepted by a component.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PropDefinition {
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub prop_type: PropType,
    #[cfg_attr(
        feature = "serde",
        serde(rename = "defaultValue", default, skip_serializing_if = "Option::is_none")
    )]
    pub default_value: Option<AttrValue>,
}

impl PropDefinition {
    pub fn new(prop_type: PropType) -> Self {
        Self {
            prop_type,
            default_value: None,
        }
    }

    pub fn with_default(mut self, value: impl Into<AttrValue>) -> Self {
        self.default_value = Some(value.into());
        self
    }
}

/// Declared type of a prop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum PropType {
    String,
    Number,
    Boolean,
    /// Realized as nested content, never as a declared prop.
    Children,
    Func,
    Object,
    Array,
    #[cfg_attr(feature = "serde", serde(other))]
    Unknown,
}

/// An external dependency introduced by an element.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DependencyDescriptor {
    #[cfg_attr(feature = "serde", serde(rename = "type", alias = "kind"))]
    pub kind: DependencyKind,
    pub meta: DependencyMeta,
}

impl DependencyDescriptor {
    /// A package dependency imported as a default import.
    pub fn package(path: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            kind: DependencyKind::Package,
            meta: DependencyMeta {
                path: path.into(),
                version: Some(version.into()),
                named_import: false,
            },
        }
    }

    /// A dependency on a module of the same project.
    pub fn local(path: impl Into<String>) -> Self {
        Self {
            kind: DependencyKind::Local,
            meta: DependencyMeta {
                path: path.into(),
                version: None,
                named_import: false,
            },
        }
    }

    /// Import the dependency by name instead of as a default import.
    pub fn named(mut self) -> Self {
        self.meta.named_import = true;
        self
    }
}

/// Where a dependency comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum DependencyKind {
    Package,
    Local,
    Library,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DependencyMeta {
    pub path: String,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub version: Option<String>,
    #[cfg_attr(feature = "serde", serde(rename = "namedImport", default))]
    pub named_import: bool,
}
