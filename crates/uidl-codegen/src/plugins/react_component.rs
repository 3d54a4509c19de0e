//! Plugin producing the React component chunks.

use convert_case::{Case, Casing};
use serde::{Deserialize, Serialize};
use uidl_core::{DependencyDescriptor, PipelineError};
use uidl_pipeline::{
    BoxFuture, Chunk, ChunkMeta, ComponentPlugin, PipelineOperations, PipelineStructure, JS_CHUNK,
};

use crate::js::{Expression, ImportDeclaration, JsProgram, Statement};
use crate::props::{prop_declarations, react_prop_types};
use crate::react::{build_jsx_tree, ReactComponent};

/// Import name of the prop validation package.
pub const PROP_TYPES_IMPORT: &str = "PropTypes";

const PROP_TYPES_PACKAGE: &str = "prop-types";
const PROP_TYPES_VERSION: &str = "15.7.2";

/// Chunk names used by the React plugins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReactComponentConfig {
    pub component_chunk_name: String,
    pub import_chunk_name: String,
    pub export_chunk_name: String,
}

impl Default for ReactComponentConfig {
    fn default() -> Self {
        Self {
            component_chunk_name: "react-component".to_string(),
            import_chunk_name: "import".to_string(),
            export_chunk_name: "export".to_string(),
        }
    }
}

impl ReactComponentConfig {
    pub fn with_component_chunk_name(mut self, name: impl Into<String>) -> Self {
        self.component_chunk_name = name.into();
        self
    }

    pub fn with_import_chunk_name(mut self, name: impl Into<String>) -> Self {
        self.import_chunk_name = name.into();
        self
    }

    pub fn with_export_chunk_name(mut self, name: impl Into<String>) -> Self {
        self.export_chunk_name = name.into();
        self
    }
}

/// Builds the JSX tree and emits three `js` chunks: imports, the component
/// function, and the export (with `propTypes`/`defaultProps` when the
/// component declares props).
#[derive(Debug, Clone, Default)]
pub struct ReactComponentPlugin {
    config: ReactComponentConfig,
}

impl ReactComponentPlugin {
    pub fn new(config: ReactComponentConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ReactComponentConfig {
        &self.config
    }

    fn apply(
        &self,
        mut structure: PipelineStructure,
        operations: &mut PipelineOperations,
    ) -> Result<PipelineStructure, PipelineError> {
        let tree = build_jsx_tree(&structure.uidl.content, operations);
        let name = component_identifier(&structure.uidl.name);
        let declarations = prop_declarations(&structure.uidl.prop_definitions);

        let mut imports = JsProgram::new();
        imports.push(Statement::Import(ImportDeclaration::default_import("React", "react")));

        let mut exports = JsProgram::new();
        if !declarations.is_empty() {
            operations.register_dependency(
                PROP_TYPES_IMPORT,
                DependencyDescriptor::package(PROP_TYPES_PACKAGE, PROP_TYPES_VERSION),
            );

            let (prop_types, defaults) = react_prop_types(&declarations);
            exports.push(Statement::Assign {
                target: Expression::member(name.clone(), "propTypes"),
                value: Expression::Object(prop_types),
            });
            if !defaults.is_empty() {
                exports.push(Statement::Assign {
                    target: Expression::member(name.clone(), "defaultProps"),
                    value: Expression::Object(defaults),
                });
            }
        }
        exports.push(Statement::ExportDefault(Expression::identifier(name.clone())));

        structure.push_chunk(Chunk::new(JS_CHUNK, self.config.import_chunk_name.clone(), imports));
        structure.push_chunk(
            Chunk::new(
                JS_CHUNK,
                self.config.component_chunk_name.clone(),
                ReactComponent::new(name, tree.root),
            )
            .with_meta(ChunkMeta::with_lookup(tree.lookup)),
        );
        structure.push_chunk(Chunk::new(JS_CHUNK, self.config.export_chunk_name.clone(), exports));

        Ok(structure)
    }
}

/// Identifier used for a component name.
pub fn component_identifier(name: &str) -> String {
    name.to_case(Case::Pascal)
}

impl ComponentPlugin for ReactComponentPlugin {
    fn name(&self) -> &str {
        "react-component"
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
    use futures::executor::block_on;
    use std::sync::Arc;
    use uidl_core::{ComponentUidl, PropDefinition, PropType, UidlNode};
    use uidl_pipeline::{ElementMapping, MappingResolver};

    fn run(uidl: ComponentUidl) -> (PipelineStructure, PipelineOperations) {
        let resolver = MappingResolver::new().with_mapping("container", ElementMapping::new("div"));
        let mut operations = PipelineOperations::new(Arc::new(resolver));
        let plugin = ReactComponentPlugin::default();
        let structure =
            block_on(plugin.run(PipelineStructure::new(uidl), &mut operations)).unwrap();
        (structure, operations)
    }

    #[test]
    fn test_chunks_in_order() {
        let (structure, operations) =
            run(ComponentUidl::new("my card", UidlNode::new("container").with_name("root")));

        let names: Vec<&str> = structure.chunks.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["import", "react-component", "export"]);

        let component = structure.chunk("react-component").unwrap();
        assert_eq!(
            component.render(),
            "const MyCard = (props) => {\n  return (\n    <div />\n  )\n}"
        );
        assert!(component.meta.lookup.contains_key("root"));
        assert_eq!(structure.chunk("export").unwrap().render(), "export default MyCard");
        assert!(operations.dependencies().is_empty());
    }

    #[test]
    fn test_prop_types_declared() {
        let uidl = ComponentUidl::new("Card", UidlNode::new("container"))
            .with_prop("title", PropDefinition::new(PropType::String).with_default("Untitled"))
            .with_prop("children", PropDefinition::new(PropType::Children));

        let (structure, operations) = run(uidl);
        assert_eq!(
            structure.chunk("export").unwrap().render(),
            "Card.propTypes = {\n  title: PropTypes.string\n}\n\nCard.defaultProps = {\n  title: \"Untitled\"\n}\n\nexport default Card"
        );
        assert!(operations.dependencies().contains_key(PROP_TYPES_IMPORT));
    }

    #[test]
    fn test_config_from_json() {
        let config: ReactComponentConfig =
            serde_json::from_str(r#"{ "componentChunkName": "component" }"#).unwrap();
        assert_eq!(config.component_chunk_name, "component");
        assert_eq!(config.import_chunk_name, "import");
    }
}
