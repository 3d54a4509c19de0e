//! Dynamic prop bindings.
//!
//! A string value of the form `$props.<name>` refers to the component prop
//! `<name>` instead of holding a literal. The bare prefix with nothing after
//! it is kept literal, so a reference that is still being typed renders as
//! text.

use indexmap::IndexMap;

use crate::uidl::{AttrValue, Attrs};

/// Prefix marking a dynamic prop binding.
pub const PROP_BINDING_PREFIX: &str = "$props.";

/// Return the referenced prop name if `value` is a dynamic binding.
pub fn prop_reference(value: &str) -> Option<&str> {
    value
        .strip_prefix(PROP_BINDING_PREFIX)
        .filter(|name| !name.is_empty())
}

impl AttrValue {
    /// The referenced prop name, for string values carrying a binding.
    pub fn prop_reference(&self) -> Option<&str> {
        self.as_str().and_then(prop_reference)
    }
}

/// Attributes split by binding kind, each side in declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SplitAttrs {
    /// Literal attributes.
    pub static_attrs: IndexMap<String, AttrValue>,
    /// Attribute name -> referenced prop name.
    pub dynamic_attrs: IndexMap<String, String>,
}

/// Split attributes into literal and prop-bound ones.
pub fn split_attrs(attrs: &Attrs) -> SplitAttrs {
    attrs
        .iter()
        .fold(SplitAttrs::default(), |mut split, (key, value)| {
            match value.prop_reference() {
                Some(prop) => {
                    split.dynamic_attrs.insert(key.clone(), prop.to_string());
                }
                None => {
                    split.static_attrs.insert(key.clone(), value.clone());
                }
            }
            split
        })
}
