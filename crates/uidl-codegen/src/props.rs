//! Prop declarations derived from UIDL prop definitions.

use indexmap::IndexMap;
use uidl_core::{AttrValue, PropDefinition, PropType};

use crate::js::{Expression, ObjectExpression};

/// Runtime type a declared prop is checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropKind {
    String,
    Number,
    Boolean,
    Any,
}

impl PropKind {
    /// Kind for a declared type; `None` for types that are not declared.
    pub fn for_type(prop_type: PropType) -> Option<Self> {
        match prop_type {
            PropType::String => Some(PropKind::String),
            PropType::Number => Some(PropKind::Number),
            PropType::Boolean => Some(PropKind::Boolean),
            // children become nested content
            PropType::Children => None,
            PropType::Func | PropType::Object | PropType::Array | PropType::Unknown => {
                Some(PropKind::Any)
            }
        }
    }

    /// Vue constructor used as the prop type.
    pub fn vue_type(self) -> Expression {
        match self {
            PropKind::String => Expression::identifier("String"),
            PropKind::Number => Expression::identifier("Number"),
            PropKind::Boolean => Expression::identifier("Boolean"),
            PropKind::Any => Expression::Null,
        }
    }

    /// `PropTypes` validator.
    pub fn prop_types_validator(self) -> Expression {
        let validator = match self {
            PropKind::String => "string",
            PropKind::Number => "number",
            PropKind::Boolean => "bool",
            PropKind::Any => "any",
        };
        Expression::member("PropTypes", validator)
    }
}

/// A prop as declared in generated code.
#[derive(Debug, Clone, PartialEq)]
pub struct PropDeclaration {
    pub kind: PropKind,
    pub default: Option<AttrValue>,
}

/// Map prop definitions to declarations, skipping `children` props.
pub fn prop_declarations(
    definitions: &IndexMap<String, PropDefinition>,
) -> IndexMap<String, PropDeclaration> {
    definitions
        .iter()
        .filter_map(|(name, definition)| {
            let kind = PropKind::for_type(definition.prop_type)?;
            Some((
                name.clone(),
                PropDeclaration {
                    kind,
                    default: definition.default_value.clone(),
                },
            ))
        })
        .collect()
}

/// The `props` object of a Vue component.
///
/// Props with a default become `{ type, default }`, others the bare type.
pub fn vue_props_object(declarations: &IndexMap<String, PropDeclaration>) -> ObjectExpression {
    let mut props = ObjectExpression::new();
    for (name, declaration) in declarations {
        let value = match &declaration.default {
            Some(default) => Expression::Object(
                ObjectExpression::new()
                    .with_property("type", declaration.kind.vue_type())
                    .with_property("default", Expression::literal(default)),
            ),
            None => declaration.kind.vue_type(),
        };
        props.push(name.clone(), value);
    }
    props
}

/// `propTypes` and `defaultProps` objects of a React component.
pub fn react_prop_types(
    declarations: &IndexMap<String, PropDeclaration>,
) -> (ObjectExpression, ObjectExpression) {
    let mut prop_types = ObjectExpression::new();
    let mut defaults = ObjectExpression::new();
    for (name, declaration) in declarations {
        prop_types.push(name.clone(), declaration.kind.prop_types_validator());
        if let Some(default) = &declaration.default {
            defaults.push(name.clone(), Expression::literal(default));
        }
    }
    (prop_types, defaults)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn definitions() -> IndexMap<String, PropDefinition> {
        let mut definitions = IndexMap::new();
        definitions.insert("content".to_string(), PropDefinition::new(PropType::Children));
        definitions.insert("title".to_string(), PropDefinition::new(PropType::String));
        definitions.insert(
            "count".to_string(),
            PropDefinition::new(PropType::Number).with_default(3),
        );
        definitions.insert("onClick".to_string(), PropDefinition::new(PropType::Func));
        definitions
    }

    #[test]
    fn test_children_are_skipped() {
        let declarations = prop_declarations(&definitions());
        let names: Vec<&str> = declarations.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["title", "count", "onClick"]);
        assert_eq!(declarations["onClick"].kind, PropKind::Any);
    }

    #[test]
    fn test_vue_props_object() {
        let props = vue_props_object(&prop_declarations(&definitions()));
        assert_eq!(
            Expression::Object(props).to_code(),
            "{\n  title: String,\n  count: {\n    type: Number,\n    default: 3\n  },\n  onClick: null\n}"
        );
    }

    #[test]
    fn test_react_prop_types() {
        let (prop_types, defaults) = react_prop_types(&prop_declarations(&definitions()));
        assert_eq!(
            Expression::Object(prop_types).to_code(),
            "{\n  title: PropTypes.string,\n  count: PropTypes.number,\n  onClick: PropTypes.any\n}"
        );
        assert_eq!(Expression::Object(defaults).to_code(), "{\n  count: 3\n}");
    }
}
