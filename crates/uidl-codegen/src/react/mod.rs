//! Expression-tree output: React function components with JSX.

mod builder;
mod component;
pub mod jsx;

pub use builder::{build_jsx_tree, JsxTree};
pub use component::ReactComponent;
pub use jsx::{
    add_attribute, add_class_string, add_dynamic_prop, basic_jsx_tag, class_attribute,
    props_member, string_as_template_literal, styled_jsx_tag, JsxAttrValue, JsxAttribute,
    JsxChild, JsxElement, StyleSource, CLASS_ATTRIBUTE, PROPS_OBJECT,
};
