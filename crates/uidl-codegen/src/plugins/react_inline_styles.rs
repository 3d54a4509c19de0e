//! Plugin writing node styles as inline `style` objects.

use serde::{Deserialize, Serialize};
use uidl_core::PipelineError;
use uidl_pipeline::{BoxFuture, ComponentPlugin, PipelineOperations, PipelineStructure};

use super::{react_component_mut, style_object, styled_nodes};
use crate::js::Expression;
use crate::react::{props_member, JsxAttribute};

/// Chunk the style plugins edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReactStylesConfig {
    pub component_chunk_name: String,
}

impl Default for ReactStylesConfig {
    fn default() -> Self {
        Self {
            component_chunk_name: "react-component".to_string(),
        }
    }
}

impl ReactStylesConfig {
    pub fn with_component_chunk_name(mut self, name: impl Into<String>) -> Self {
        self.component_chunk_name = name.into();
        self
    }
}

/// Adds `style={{ ... }}` to every named node that has styles.
#[derive(Debug, Clone, Default)]
pub struct ReactInlineStylesPlugin {
    config: ReactStylesConfig,
}

impl ReactInlineStylesPlugin {
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
        let component = react_component_mut(&mut structure, chunk_name)?;

        for (name, path, style) in styled {
            let Some(element) = component.jsx.element_at_mut(&path) else {
                tracing::debug!(node = %name, "styled node not found in JSX tree");
                continue;
            };
            element.set_attribute(JsxAttribute::expression(
                "style",
                Expression::Object(style_object(&style, props_member)),
            ));
        }

        Ok(structure)
    }
}

impl ComponentPlugin for ReactInlineStylesPlugin {
    fn name(&self) -> &str {
        "react-inline-styles"
    }

    fn run<'a>(
        &'a self,
        structure: PipelineStructure,
        operations: &'a mut PipelineOperations,
    ) -> BoxFuture<'a, Result<PipelineStructure, PipelineError>> {
        Box::pin(async move { self.apply(structure, operations) })
    }
}
