//! Plugin writing node styles as a JSS style sheet.

use convert_case::{Case, Casing};
use serde::{Deserialize, Serialize};
use uidl_core::{DependencyDescriptor, PipelineError};
use uidl_pipeline::{
    BoxFuture, Chunk, ComponentPlugin, PipelineOperations, PipelineStructure, JS_CHUNK,
};

use super::{react_component_mut, style_object, styled_nodes};
use crate::js::{Expression, JsProgram, ObjectExpression, Statement};
use crate::react::{props_member, JsxAttribute, CLASS_ATTRIBUTE, PROPS_OBJECT};

/// Import name of the JSS higher-order component.
pub const INJECT_SHEET_IMPORT: &str = "injectSheet";

const JSS_PACKAGE: &str = "react-jss";
const JSS_VERSION: &str = "8.6.1";
const STYLES_IDENTIFIER: &str = "styles";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReactJssConfig {
    pub component_chunk_name: String,
    pub export_chunk_name: String,
    pub style_chunk_name: String,
}

impl Default for ReactJssConfig {
    fn default() -> Self {
        Self {
            component_chunk_name: "react-component".to_string(),
            export_chunk_name: "export".to_string(),
            style_chunk_name: "jss-style-definition".to_string(),
        }
    }
}

impl ReactJssConfig {
    pub fn with_component_chunk_name(mut self, name: impl Into<String>) -> Self {
        self.component_chunk_name = name.into();
        self
    }

    pub fn with_export_chunk_name(mut self, name: impl Into<String>) -> Self {
        self.export_chunk_name = name.into();
        self
    }

    pub fn with_style_chunk_name(mut self, name: impl Into<String>) -> Self {
        self.style_chunk_name = name.into();
        self
    }
}

/// Moves node styles into a `const styles = { ... }` sheet.
///
/// Every styled node reads its class from `props.classes.<name>`, the sheet
/// chunk is placed before the export chunk, and the default export becomes
/// `injectSheet(styles)(Name)`. Dynamic values become `(props) => props.x`.
#[derive(Debug, Clone, Default)]
pub struct ReactJssPlugin {
    config: ReactJssConfig,
}

impl ReactJssPlugin {
    pub fn new(config: ReactJssConfig) -> Self {
        Self { config }
    }

    fn apply(
        &self,
        mut structure: PipelineStructure,
        operations: &mut PipelineOperations,
    ) -> Result<PipelineStructure, PipelineError> {
        let component_chunk = &self.config.component_chunk_name;
        let styled = styled_nodes(&structure, component_chunk)?;
        if styled.is_empty() {
            return Ok(structure);
        }

        let component = react_component_mut(&mut structure, component_chunk)?;
        let mut sheet = ObjectExpression::new();
        for (name, path, style) in styled {
            let Some(element) = component.jsx.element_at_mut(&path) else {
                tracing::debug!(node = %name, "styled node not found in JSX tree");
                continue;
            };
            let class = name.to_case(Case::Camel);
            element.set_attribute(JsxAttribute::expression(
                CLASS_ATTRIBUTE,
                Expression::member_path(PROPS_OBJECT, &["classes", &class]),
            ));
            let rules = style_object(&style, |prop| {
                Expression::arrow(PROPS_OBJECT, props_member(prop))
            });
            sheet.push(class, Expression::Object(rules));
        }

        let export_chunk = &self.config.export_chunk_name;
        let export = structure
            .require_chunk_mut(export_chunk)?
            .content_as_mut::<JsProgram>()
            .and_then(JsProgram::default_export_mut)
            .ok_or_else(|| PipelineError::UnexpectedContent {
                name: export_chunk.clone(),
                expected: "default export",
            })?;
        let exported = std::mem::replace(export, Expression::Null);
        *export = Expression::call(
            Expression::call(
                Expression::identifier(INJECT_SHEET_IMPORT),
                vec![Expression::identifier(STYLES_IDENTIFIER)],
            ),
            vec![exported],
        );

        let mut program = JsProgram::new();
        program.push(Statement::Const {
            name: STYLES_IDENTIFIER.to_string(),
            value: Expression::Object(sheet),
        });
        structure.insert_chunk_before(
            export_chunk,
            Chunk::new(JS_CHUNK, self.config.style_chunk_name.clone(), program),
        );

        operations.register_dependency(
            INJECT_SHEET_IMPORT,
            DependencyDescriptor::package(JSS_PACKAGE, JSS_VERSION),
        );

        Ok(structure)
    }
}

impl ComponentPlugin for ReactJssPlugin {
    fn name(&self) -> &str {
        "react-jss"
    }

    fn run<'a>(
        &'a self,
        structure: PipelineStructure,
        operations: &'a mut PipelineOperations,
    ) -> BoxFuture<'a, Result<PipelineStructure, PipelineError>> {
        Box::pin(async move { self.apply(structure, operations) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugins::ReactComponentPlugin;
    use futures::executor::block_on;
    use std::sync::Arc;
    use uidl_core::{ComponentUidl, UidlNode};
    use uidl_pipeline::{ElementMapping, MappingResolver};

    fn run(uidl: ComponentUidl) -> (PipelineStructure, PipelineOperations) {
        let resolver = MappingResolver::new()
            .with_mapping("container", ElementMapping::new("div"))
            .with_mapping("text", ElementMapping::new("span"));
        let mut operations = PipelineOperations::new(Arc::new(resolver));
        let structure = block_on(
            ReactComponentPlugin::default().run(PipelineStructure::new(uidl), &mut operations),
        )
        .unwrap();
        let structure =
            block_on(ReactJssPlugin::default().run(structure, &mut operations)).unwrap();
        (structure, operations)
    }

    #[test]
    fn test_style_sheet() {
        let uidl = ComponentUidl::new(
            "Card",
            UidlNode::new("container")
                .with_name("card-body")
                .with_style("padding", 8)
                .with_child(
                    UidlNode::new("text")
                        .with_name("title")
                        .with_style("font-size", 12)
                        .with_style("color", "$props.color")
                        .with_text("Hi"),
                ),
        );

        let (structure, operations) = run(uidl);
        let names: Vec<&str> = structure.chunks.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["import", "react-component", "jss-style-definition", "export"]
        );

        assert_eq!(
            structure.chunk("react-component").unwrap().render(),
            "const Card = (props) => {\n  return (\n    <div className={props.classes.cardBody}><span className={props.classes.title}>Hi</span></div>\n  )\n}"
        );
        assert_eq!(
            structure.chunk("jss-style-definition").unwrap().render(),
            "const styles = {\n  cardBody: {\n    padding: 8\n  },\n  title: {\n    fontSize: 12,\n    color: (props) => props.color\n  }\n}"
        );
        assert_eq!(
            structure.chunk("export").unwrap().render(),
            "export default injectSheet(styles)(Card)"
        );
        assert_eq!(
            operations.dependencies()[INJECT_SHEET_IMPORT].meta.path,
            "react-jss"
        );
    }

    #[test]
    fn test_unstyled_component_untouched() {
        let (structure, operations) =
            run(ComponentUidl::new("Card", UidlNode::new("container").with_name("card")));
        assert_eq!(structure.chunks.len(), 3);
        assert_eq!(structure.chunk("export").unwrap().render(), "export default Card");
        assert!(operations.dependencies().is_empty());
    }
}
