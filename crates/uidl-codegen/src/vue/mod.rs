//! Template output: Vue single-file components.

mod builder;
pub mod markup;
pub mod script;

pub use builder::{build_markup_tree, MarkupTree};
pub use markup::{single_node, single_node_or_fallback, MarkupElement, MarkupNode};
pub use script::{empty_vue_component_script, empty_vue_export, props_object_mut};
