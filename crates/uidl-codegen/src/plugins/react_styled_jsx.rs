//! Plugin writing node styles into a scoped `<style jsx>` block.

use convert_case::{Case, Casing};
use uidl_core::{PipelineError, Style};
use uidl_pipeline::{BoxFuture, ComponentPlugin, PipelineOperations, PipelineStructure};

use super::{react_component_mut, styled_nodes, ReactStylesConfig};
use crate::react::{add_class_string, styled_jsx_tag, JsxChild, PROPS_OBJECT};

/// Gives every styled node a class named after it and collects the rules
/// into one `<style jsx>` tag appended to the root element.
///
/// Fails with `InvalidClassMergeTarget` when a styled node already has a
/// non-literal `className`.
#[derive(Debug, Clone, Default)]
pub struct ReactStyledJsxPlugin {
    config: ReactStylesConfig,
}

impl ReactStyledJsxPlugin {
    pub fn new(config: ReactStylesConfig) -> Self {
        Self { config }
    }

    fn apply(
        &self,
        mut structure: PipelineStructure,
        _operations: &mut PipelineOperations,
    ) -> Result<PipelineStructure, PipelineError> {
        let chunk_name = &self.config.component_chunk_name;
        let styled = styled_nodes(&structure, chunk_name)?;
        if styled.is_empty() {
            return Ok(structure);
        }

        let component = react_component_mut(&mut structure, chunk_name)?;
        let mut rules = Vec::with_capacity(styled.len());
        for (name, path, style) in styled {
            let Some(element) = component.jsx.element_at_mut(&path) else {
                tracing::debug!(node = %name, "styled node not found in JSX tree");
                continue;
            };
            let class = name.to_case(Case::Kebab);
            add_class_string(element, &class)?;
            rules.push(css_rule(&class, &style));
        }

        component
            .jsx
            .children
            .push(JsxChild::Element(styled_jsx_tag(rules.join("\n"))));
        Ok(structure)
    }
}

fn css_rule(class: &str, style: &Style) -> String {
    let mut rule = format!(".{} {{\n", class);
    for (property, value) in style {
        let value = match value.prop_reference() {
            Some(prop) => format!("${{{}.{}}}", PROPS_OBJECT, prop),
            None => escape_template_text(&value.to_string()),
        };
        rule.push_str(&format!("  {}: {};\n", property.to_case(Case::Kebab), value));
    }
    rule.push('}');
    rule
}

/// Escape text placed inside a template literal.
fn escape_template_text(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('`', "\\`")
        .replace("${", "\\${")
}

impl ComponentPlugin for ReactStyledJsxPlugin {
    fn name(&self) -> &str {
        "react-styled-jsx"
    }

    fn run<'a>(
        &'a self,
        structure: PipelineStructure,
        operations: &'a mut PipelineOperations,
    ) -> BoxFuture<'a, Result<PipelineStructure, PipelineError>> {
        Box::pin(async move { self.apply(structure, operations) })
    }
}
