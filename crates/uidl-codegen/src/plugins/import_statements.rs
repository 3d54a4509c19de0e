//! Plugin writing import statements for registered dependencies.

use serde::{Deserialize, Serialize};
use uidl_core::PipelineError;
use uidl_pipeline::{BoxFuture, ComponentPlugin, PipelineOperations, PipelineStructure};

use crate::js::{ImportDeclaration, JsProgram};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ImportStatementsConfig {
    pub import_chunk_name: String,
}

impl Default for ImportStatementsConfig {
    fn default() -> Self {
        Self {
            import_chunk_name: "import".to_string(),
        }
    }
}

impl ImportStatementsConfig {
    pub fn with_import_chunk_name(mut self, name: impl Into<String>) -> Self {
        self.import_chunk_name = name.into();
        self
    }
}

/// Adds one import per dependency registered so far to the import chunk.
///
/// Runs after the plugins that register dependencies. Bindings the chunk
/// already imports are left alone.
#[derive(Debug, Clone, Default)]
pub struct ImportStatementsPlugin {
    config: ImportStatementsConfig,
}

impl ImportStatementsPlugin {
    pub fn new(config: ImportStatementsConfig) -> Self {
        Self { config }
    }

    fn apply(
        &self,
        mut structure: PipelineStructure,
        operations: &mut PipelineOperations,
    ) -> Result<PipelineStructure, PipelineError> {
        let chunk_name = &self.config.import_chunk_name;
        let chunk = structure.require_chunk_mut(chunk_name)?;
        let program = chunk
            .content_as_mut::<JsProgram>()
            .ok_or_else(|| PipelineError::UnexpectedContent {
                name: chunk_name.clone(),
                expected: "JavaScript program",
            })?;

        for (key, dependency) in operations.dependencies() {
            if !program.imports(key) {
                program.push_import(ImportDeclaration::for_dependency(key, dependency));
            }
        }

        Ok(structure)
    }
}

impl ComponentPlugin for ImportStatementsPlugin {
    fn name(&self) -> &str {
        "import-statements"
    }

    fn run<'a>(
        &'a self,
        structure: PipelineStructure,
        operations: &'a mut PipelineOperations,
    ) -> BoxFuture<'a, Result<PipelineStructure, PipelineError>> {
        Box::pin(async move { self.apply(structure, operations) })
    }
}
