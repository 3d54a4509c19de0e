//! Plugin producing the Vue single-file component chunks.

use serde::{Deserialize, Serialize};
use uidl_core::PipelineError;
use uidl_pipeline::{
    BoxFuture, Chunk, ChunkMeta, ComponentPlugin, PipelineOperations, PipelineStructure,
    HTML_CHUNK, JS_CHUNK,
};

use crate::js::ImportDeclaration;
use crate::props::{prop_declarations, vue_props_object};
use crate::vue::{build_markup_tree, empty_vue_component_script, props_object_mut};

/// Frame a markup section.
pub fn wrap_template(content: &str) -> String {
    format!("<template>\n\n{}\n</template>\n", content)
}

/// Frame a script section.
pub fn wrap_script(content: &str) -> String {
    format!("<script>\n\n{}\n</script>", content)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VueComponentConfig {
    pub template_chunk_name: String,
    pub js_chunk_name: String,
}

impl Default for VueComponentConfig {
    fn default() -> Self {
        Self {
            template_chunk_name: "vue-component-template-chunk".to_string(),
            js_chunk_name: "vue-component-js-chunk".to_string(),
        }
    }
}

impl VueComponentConfig {
    pub fn with_template_chunk_name(mut self, name: impl Into<String>) -> Self {
        self.template_chunk_name = name.into();
        self
    }

    pub fn with_js_chunk_name(mut self, name: impl Into<String>) -> Self {
        self.js_chunk_name = name.into();
        self
    }
}

/// Emits the `html` template chunk and the `js` script chunk of a Vue
/// component.
///
/// The script imports every dependency registered while building the
/// template (and before), lists them under `components` and declares the
/// component props.
#[derive(Debug, Clone, Default)]
pub struct VueComponentPlugin {
    config: VueComponentConfig,
}

impl VueComponentPlugin {
    pub fn new(config: VueComponentConfig) -> Self {
        Self { config }
    }

    fn apply(
        &self,
        mut structure: PipelineStructure,
        operations: &mut PipelineOperations,
    ) -> Result<PipelineStructure, PipelineError> {
        let tree = build_markup_tree(&structure.uidl.content, operations);

        let dependencies = operations.dependencies();
        let imports = dependencies
            .iter()
            .map(|(key, dependency)| ImportDeclaration::for_dependency(key, dependency))
            .collect();
        let components: Vec<String> = dependencies.keys().cloned().collect();

        let mut script = empty_vue_component_script(&structure.uidl.name, imports, &components);
        let declarations = prop_declarations(&structure.uidl.prop_definitions);
        if let Some(props) = props_object_mut(&mut script) {
            *props = vue_props_object(&declarations);
        }

        structure.push_chunk(
            Chunk::new(HTML_CHUNK, self.config.template_chunk_name.clone(), tree.root)
                .with_meta(ChunkMeta::with_lookup(tree.lookup))
                .with_wrap(wrap_template),
        );
        structure.push_chunk(
            Chunk::new(JS_CHUNK, self.config.js_chunk_name.clone(), script).with_wrap(wrap_script),
        );

        Ok(structure)
    }
}

impl ComponentPlugin for VueComponentPlugin {
    fn name(&self) -> &str {
        "vue-component"
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
    use uidl_core::{ComponentUidl, DependencyDescriptor, PropDefinition, PropType, UidlNode};
    use uidl_pipeline::{ElementMapping, MappingResolver};

    fn run(uidl: ComponentUidl) -> PipelineStructure {
        let resolver = MappingResolver::new()
            .with_mapping("container", ElementMapping::new("div"))
            .with_mapping("text", ElementMapping::new("span"))
            .with_mapping(
                "Datepicker",
                ElementMapping::new("VueDatepicker")
                    .with_dependency(DependencyDescriptor::package("vue-datepicker", "2.0.0")),
            );
        let mut operations = PipelineOperations::new(Arc::new(resolver));
        block_on(VueComponentPlugin::default().run(PipelineStructure::new(uidl), &mut operations))
            .unwrap()
    }

    #[test]
    fn test_wraps() {
        assert_eq!(wrap_template("<div/>"), "<template>\n\n<div/>\n</template>\n");
        assert_eq!(wrap_script("x"), "<script>\n\nx\n</script>");
    }

    #[test]
    fn test_template_and_script_chunks() {
        let uidl = ComponentUidl::new(
            "Form",
            UidlNode::new("container")
                .with_name("form")
                .with_child(UidlNode::new("Datepicker"))
                .with_child(UidlNode::new("text").with_text("$props.title")),
        )
        .with_prop("title", PropDefinition::new(PropType::String).with_default("Hi"));

        let structure = run(uidl);
        let template = structure.chunk("vue-component-template-chunk").unwrap();
        assert_eq!(template.chunk_type, HTML_CHUNK);
        assert_eq!(
            template.render(),
            "<template>\n\n<div><VueDatepicker></VueDatepicker><span>{{title}}</span></div>\n</template>\n"
        );
        assert!(template.meta.lookup["form"].is_root());

        let script = structure.chunk("vue-component-js-chunk").unwrap();
        assert_eq!(
            script.render(),
            "<script>\n\nimport VueDatepicker from 'vue-datepicker'\n\nexport default {\n  name: \"Form\",\n  props: {\n    title: {\n      type: String,\n      default: \"Hi\"\n    }\n  },\n  components: {\n    VueDatepicker\n  }\n}\n</script>"
        );
    }
}
