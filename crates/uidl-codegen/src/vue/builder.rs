//! Builds a template markup tree from a UIDL subtree.

use uidl_core::{prop_reference, split_attrs, ChildNode, Children, UidlNode};
use uidl_pipeline::{Lookup, NodePath, PipelineOperations};

use super::markup::{single_node_or_fallback, MarkupElement};

/// A synthesized template and the path of every named node in it.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkupTree {
    pub root: MarkupElement,
    pub lookup: Lookup,
}

/// Build the template element for `node` and its descendants.
pub fn build_markup_tree(node: &UidlNode, operations: &mut PipelineOperations) -> MarkupTree {
    let (root, lookup) = build_element(node, NodePath::root(), operations);
    MarkupTree { root, lookup }
}

fn build_element(
    node: &UidlNode,
    path: NodePath,
    operations: &mut PipelineOperations,
) -> (MarkupElement, Lookup) {
    let resolved = operations.resolve(&node.element_type, &node.attrs, node.dependency.as_ref());
    if let Some(dependency) = &resolved.dependency {
        operations.register_dependency(resolved.node_name.clone(), dependency.clone());
    }

    // custom elements cannot be self-closing in templates
    let self_closing = resolved.dependency.is_none() && !has_content(&node.children);
    let mut element = single_node_or_fallback(&resolved.node_name, self_closing);

    let mut lookup = Lookup::new();
    match &node.children {
        Children::Elements(children) => {
            for child in children {
                match child {
                    ChildNode::Text(text) => add_text_node(&mut element, text),
                    ChildNode::Node(child) => {
                        let child_path = path.child(element.children.len());
                        let (child_element, child_lookup) =
                            build_element(child, child_path, operations);
                        lookup.extend(child_lookup);
                        element.append(child_element);
                    }
                }
            }
        }
        Children::Text(text) if !text.is_empty() => add_text_node(&mut element, text),
        Children::Text(_) | Children::Empty => {}
    }

    let split = split_attrs(&resolved.attrs);
    for (name, value) in &split.static_attrs {
        element.set_attribute(name.clone(), value.to_string());
    }
    for (name, prop) in &split.dynamic_attrs {
        element.set_bound_attribute(name, prop.clone());
    }

    if !node.name.is_empty() {
        lookup.insert(node.name.clone(), path);
    }

    (element, lookup)
}

/// An empty text value counts as no children.
fn has_content(children: &Children) -> bool {
    match children {
        Children::Text(text) => !text.is_empty(),
        other => !other.is_empty(),
    }
}

fn add_text_node(element: &mut MarkupElement, text: &str) {
    match prop_reference(text) {
        Some(prop) => element.append_text(format!("{{{{{}}}}}", prop)),
        None => element.append_text(text),
    }
}
