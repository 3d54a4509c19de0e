//! The React function component wrapping a JSX tree.

use uidl_pipeline::SourceTree;

use super::jsx::{JsxElement, PROPS_OBJECT};

/// `const Name = (props) => { return (<jsx />) }`
#[derive(Debug, Clone, PartialEq)]
pub struct ReactComponent {
    pub name: String,
    pub jsx: JsxElement,
}

impl ReactComponent {
    pub fn new(name: impl Into<String>, jsx: JsxElement) -> Self {
        Self {
            name: name.into(),
            jsx,
        }
    }
}

impl SourceTree for ReactComponent {
    fn to_source(&self) -> String {
        format!(
            "const {} = ({}) => {{\n  return (\n    {}\n  )\n}}",
            self.name,
            PROPS_OBJECT,
            self.jsx.to_source()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_source() {
        let component = ReactComponent::new("Card", JsxElement::new("div"));
        assert_eq!(
            component.to_source(),
            "const Card = (props) => {\n  return (\n    <div />\n  )\n}"
        );
    }
}
