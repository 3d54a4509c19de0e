//! Builds a JSX tree from a UIDL subtree.

use uidl_core::{prop_reference, split_attrs, ChildNode, Children, UidlNode};
use uidl_pipeline::{Lookup, NodePath, PipelineOperations};

use super::jsx::{add_attribute, add_dynamic_prop, props_member, JsxChild, JsxElement};

/// A synthesized JSX tree and the path of every named node in it.
#[derive(Debug, Clone, PartialEq)]
pub struct JsxTree {
    pub root: JsxElement,
    pub lookup: Lookup,
}

/// Build the JSX element for `node` and its descendants.
///
/// Every node is resolved through `operations`; resolved dependencies are
/// registered under the resolved element name.
pub fn build_jsx_tree(node: &UidlNode, operations: &mut PipelineOperations) -> JsxTree {
    let (root, lookup) = build_element(node, NodePath::root(), operations);
    JsxTree { root, lookup }
}

fn build_element(
    node: &UidlNode,
    path: NodePath,
    operations: &mut PipelineOperations,
) -> (JsxElement, Lookup) {
    let resolved = operations.resolve(&node.element_type, &node.attrs, node.dependency.as_ref());
    if let Some(dependency) = &resolved.dependency {
        operations.register_dependency(resolved.node_name.clone(), dependency.clone());
    }

    let mut element = JsxElement::new(resolved.node_name.clone());

    let split = split_attrs(&resolved.attrs);
    for (name, value) in &split.static_attrs {
        add_attribute(&mut element, name.clone(), Some(value));
    }
    for (name, prop) in &split.dynamic_attrs {
        add_dynamic_prop(&mut element, name.clone(), prop);
    }

    let mut lookup = Lookup::new();
    match &node.children {
        Children::Elements(children) => {
            for child in children {
                match child {
                    ChildNode::Text(text) => element.children.push(text_child(text)),
                    ChildNode::Node(child) => {
                        let child_path = path.child(element.children.len());
                        let (child_element, child_lookup) =
                            build_element(child, child_path, operations);
                        lookup.extend(child_lookup);
                        element.children.push(JsxChild::Element(child_element));
                    }
                }
            }
        }
        Children::Text(text) => element.children.push(text_child(text)),
        Children::Empty => {}
    }

    if !node.name.is_empty() {
        lookup.insert(node.name.clone(), path);
    }

    (element, lookup)
}

fn text_child(text: &str) -> JsxChild {
    match prop_reference(text) {
        Some(prop) => JsxChild::Expression(props_member(prop)),
        None => JsxChild::Text(text.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::sync::Arc;
    use uidl_core::DependencyDescriptor;
    use uidl_pipeline::{ElementMapping, MappingResolver, SourceTree};

    fn operations() -> PipelineOperations {
        let resolver = MappingResolver::new()
            .with_mapping("container", ElementMapping::new("div"))
            .with_mapping("text", ElementMapping::new("span"))
            .with_mapping(
                "Datepicker",
                ElementMapping::new("ReactDatepicker")
                    .with_dependency(DependencyDescriptor::package("react-datepicker", "1.0.2")),
            );
        PipelineOperations::new(Arc::new(resolver))
    }

    #[test]
    fn test_build_nested_tree() {
        let node = UidlNode::new("container")
            .with_name("root")
            .with_child(UidlNode::new("text").with_name("greeting").with_text("Hello"));

        let mut ops = operations();
        let tree = build_jsx_tree(&node, &mut ops);
        assert_eq!(tree.root.to_source(), "<div><span>Hello</span></div>");
        assert_eq!(tree.lookup["greeting"], NodePath::from(vec![0]));
        assert!(tree.lookup["root"].is_root());
        assert!(ops.dependencies().is_empty());
    }

    #[test]
    fn test_dynamic_attribute_and_text() {
        let node = UidlNode::new("text")
            .with_attr("label", "$props.title")
            .with_attr("role", "note")
            .with_text_child("$props.body")
            .with_text_child("$props.");

        let tree = build_jsx_tree(&node, &mut operations());
        assert_eq!(
            tree.root.to_source(),
            "<span role=\"note\" label={props.title}>{props.body}$props.</span>"
        );
    }

    #[test]
    fn test_literal_text_with_jsx_syntax() {
        let node = UidlNode::new("text").with_text("Total {count} < 5");
        let tree = build_jsx_tree(&node, &mut operations());
        assert_eq!(tree.root.to_source(), "<span>{\"Total {count} < 5\"}</span>");

        let node = UidlNode::new("text").with_text("Plain text");
        let tree = build_jsx_tree(&node, &mut operations());
        assert_eq!(tree.root.to_source(), "<span>Plain text</span>");
    }

    #[test]
    fn test_dependency_registration() {
        let node = UidlNode::new("container")
            .with_child(UidlNode::new("Datepicker").with_name("picker"))
            .with_child(UidlNode::new("Unknown"));

        let mut ops = operations();
        let tree = build_jsx_tree(&node, &mut ops);
        assert_eq!(tree.root.to_source(), "<div><ReactDatepicker /><Unknown /></div>");
        let keys: Vec<&str> = ops.dependencies().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["ReactDatepicker"]);
    }

    #[test]
    fn test_lookup_paths_count_text_entries() {
        let node = UidlNode::new("container")
            .with_text_child("before")
            .with_child(UidlNode::new("text").with_name("label"));

        let tree = build_jsx_tree(&node, &mut operations());
        assert_eq!(tree.lookup["label"], NodePath::from(vec![1]));
        assert_eq!(tree.root.element_at(&tree.lookup["label"]).unwrap().name, "span");
    }

    fn arb_node() -> impl Strategy<Value = UidlNode> {
        let leaf = prop_oneof![
            Just(UidlNode::new("text").with_text("leaf")),
            Just(UidlNode::new("container")),
            Just(UidlNode::new("Datepicker")),
        ];
        leaf.prop_recursive(4, 48, 4, |inner| {
            (
                prop_oneof![Just("container"), Just("text"), Just("section")],
                prop::collection::vec(
                    prop_oneof![
                        inner.prop_map(ChildNode::Node),
                        "[a-z$.]{0,10}".prop_map(ChildNode::Text),
                    ],
                    0..4,
                ),
            )
                .prop_map(|(element_type, children)| {
                    let mut node = UidlNode::new(element_type);
                    for child in children {
                        node.children.push(child);
                    }
                    node
                })
        })
    }

    fn count_elements(element: &JsxElement) -> usize {
        1 + element
            .children
            .iter()
            .map(|child| match child {
                JsxChild::Element(child) => count_elements(child),
                _ => 0,
            })
            .sum::<usize>()
    }

    fn same_shape(node: &UidlNode, element: &JsxElement) -> bool {
        if node.children.len() != element.children.len() {
            return false;
        }
        match &node.children {
            Children::Elements(children) => children.iter().zip(&element.children).all(
                |(source, built)| match (source, built) {
                    (ChildNode::Node(source), JsxChild::Element(built)) => same_shape(source, built),
                    (ChildNode::Text(_), JsxChild::Text(_) | JsxChild::Expression(_)) => true,
                    _ => false,
                },
            ),
            _ => true,
        }
    }

    proptest! {
        #[test]
        fn prop_every_node_built_once(node in arb_node()) {
            let tree = build_jsx_tree(&node, &mut operations());
            prop_assert_eq!(count_elements(&tree.root), node.descendants().count());
            prop_assert!(same_shape(&node, &tree.root));
        }
    }
}
