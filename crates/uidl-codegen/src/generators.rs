//! Ready-made React and Vue generators.
//!
//! A generator is an assembly line with a fixed plugin set plus a linker.
//! Both hold the resolver behind an `Arc` and can run any number of
//! components, concurrently if the caller wishes.

use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use uidl_core::{ComponentUidl, DependencyDescriptor};
use uidl_pipeline::{AssemblyLine, BoxFuture, Linker, Resolver};

use crate::error::{CodegenError, Result};
use crate::plugins::{
    ImportStatementsConfig, ImportStatementsPlugin, ReactComponentConfig, ReactComponentPlugin,
    ReactInlineStylesPlugin, ReactJssConfig, ReactJssPlugin, ReactStyledJsxPlugin,
    ReactStylesConfig, VueComponentConfig, VueComponentPlugin,
};

/// Linked output of one component.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeneratedComponent {
    /// Output type -> linked source text, in first-appearance order.
    pub code: IndexMap<String, String>,
    /// Dependencies registered during the run.
    pub dependencies: IndexMap<String, DependencyDescriptor>,
}

impl GeneratedComponent {
    /// All output types joined into one file, in order.
    pub fn single_file(&self) -> String {
        self.code.values().cloned().collect::<Vec<_>>().join("\n")
    }
}

/// Common trait for component generators.
pub trait ComponentGenerator: Send + Sync {
    /// Target framework name.
    fn framework_name(&self) -> &'static str;

    fn assembly_line(&self) -> &AssemblyLine;

    fn linker(&self) -> &Linker;

    /// Run the assembly line over `uidl` and link the chunks.
    fn generate<'a>(&'a self, uidl: ComponentUidl) -> BoxFuture<'a, Result<GeneratedComponent>> {
        Box::pin(async move {
            self.assembly_line()
                .run(uidl)
                .await
                .map(|output| GeneratedComponent {
                    code: self.linker().link(&output.chunks),
                    dependencies: output.dependencies,
                })
                .map_err(CodegenError::from)
        })
    }
}

/// How the React generator renders node styles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StyleVariation {
    /// `style={{ ... }}` attributes.
    #[default]
    InlineStyles,
    /// Classes plus a scoped `<style jsx>` block.
    StyledJsx,
    /// A `react-jss` style sheet injected through `injectSheet`.
    Jss,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReactGeneratorConfig {
    pub variation: StyleVariation,
    pub component: ReactComponentConfig,
}

impl ReactGeneratorConfig {
    pub fn with_variation(mut self, variation: StyleVariation) -> Self {
        self.variation = variation;
        self
    }

    pub fn with_component(mut self, component: ReactComponentConfig) -> Self {
        self.component = component;
        self
    }
}

/// React function components with `propTypes`.
///
/// Plugins run in this order: component, styles, import statements.
pub struct ReactGenerator {
    line: AssemblyLine,
    linker: Linker,
}

impl ReactGenerator {
    pub fn new(resolver: impl Resolver + 'static) -> Self {
        Self::from_config(Arc::new(resolver), ReactGeneratorConfig::default())
    }

    pub fn with_variation(resolver: impl Resolver + 'static, variation: StyleVariation) -> Self {
        Self::from_config(
            Arc::new(resolver),
            ReactGeneratorConfig::default().with_variation(variation),
        )
    }

    pub fn from_config(resolver: Arc<dyn Resolver>, config: ReactGeneratorConfig) -> Self {
        let styles = ReactStylesConfig::default()
            .with_component_chunk_name(config.component.component_chunk_name.clone());
        let imports = ImportStatementsConfig::default()
            .with_import_chunk_name(config.component.import_chunk_name.clone());
        let jss = ReactJssConfig::default()
            .with_component_chunk_name(config.component.component_chunk_name.clone())
            .with_export_chunk_name(config.component.export_chunk_name.clone());

        let mut line = AssemblyLine::with_shared_resolver(resolver)
            .with_plugin(ReactComponentPlugin::new(config.component));
        line = match config.variation {
            StyleVariation::InlineStyles => line.with_plugin(ReactInlineStylesPlugin::new(styles)),
            StyleVariation::StyledJsx => line.with_plugin(ReactStyledJsxPlugin::new(styles)),
            StyleVariation::Jss => line.with_plugin(ReactJssPlugin::new(jss)),
        };
        let line = line.with_plugin(ImportStatementsPlugin::new(imports));

        Self {
            line,
            linker: Linker::default(),
        }
    }
}

impl ComponentGenerator for ReactGenerator {
    fn framework_name(&self) -> &'static str {
        "React"
    }

    fn assembly_line(&self) -> &AssemblyLine {
        &self.line
    }

    fn linker(&self) -> &Linker {
        &self.linker
    }
}

/// Vue single-file components.
pub struct VueGenerator {
    line: AssemblyLine,
    linker: Linker,
}

impl VueGenerator {
    pub fn new(resolver: impl Resolver + 'static) -> Self {
        Self::from_config(Arc::new(resolver), VueComponentConfig::default())
    }

    pub fn from_config(resolver: Arc<dyn Resolver>, config: VueComponentConfig) -> Self {
        Self {
            line: AssemblyLine::with_shared_resolver(resolver)
                .with_plugin(VueComponentPlugin::new(config)),
            linker: Linker::default(),
        }
    }
}

impl ComponentGenerator for VueGenerator {
    fn framework_name(&self) -> &'static str {
        "Vue"
    }

    fn assembly_line(&self) -> &AssemblyLine {
        &self.line
    }

    fn linker(&self) -> &Linker {
        &self.linker
    }
}

/// Generate a React component with the default chunk names.
pub async fn generate_react_component(
    uidl: ComponentUidl,
    variation: StyleVariation,
    resolver: impl Resolver + 'static,
) -> Result<GeneratedComponent> {
    ReactGenerator::with_variation(resolver, variation)
        .generate(uidl)
        .await
}

/// Generate a Vue component with the default chunk names.
pub async fn generate_vue_component(
    uidl: ComponentUidl,
    resolver: impl Resolver + 'static,
) -> Result<GeneratedComponent> {
    VueGenerator::new(resolver).generate(uidl).await
}
