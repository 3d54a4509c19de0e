//! The assembly line: an ordered sequence of plugins over one shared structure.

use std::sync::Arc;

use futures::future::BoxFuture;
use indexmap::IndexMap;
use tracing::Instrument;
use uidl_core::{Attrs, ComponentUidl, DependencyDescriptor, PipelineError};

use crate::chunk::Chunk;
use crate::dependencies::DependencyRegistry;
use crate::resolver::{ResolvedElement, Resolver, WithFallback};

/// The state plugins read and extend.
#[derive(Debug)]
pub struct PipelineStructure {
    pub uidl: ComponentUidl,
    /// Chunks in insertion order.
    pub chunks: Vec<Chunk>,
}

impl PipelineStructure {
    pub fn new(uidl: ComponentUidl) -> Self {
        Self {
            uidl,
            chunks: Vec::new(),
        }
    }

    pub fn chunk(&self, name: &str) -> Option<&Chunk> {
        self.chunks.iter().find(|chunk| chunk.name == name)
    }

    pub fn chunk_mut(&mut self, name: &str) -> Option<&mut Chunk> {
        self.chunks.iter_mut().find(|chunk| chunk.name == name)
    }

    /// Like [`chunk_mut`](Self::chunk_mut), failing with `MissingChunk`.
    pub fn require_chunk_mut(&mut self, name: &str) -> Result<&mut Chunk, PipelineError> {
        self.chunk_mut(name).ok_or_else(|| PipelineError::MissingChunk {
            name: name.to_string(),
        })
    }

    pub fn push_chunk(&mut self, chunk: Chunk) {
        self.chunks.push(chunk);
    }

    /// Insert `chunk` right before the chunk named `before`, or append it
    /// when there is no such chunk.
    pub fn insert_chunk_before(&mut self, before: &str, chunk: Chunk) {
        match self.chunks.iter().position(|c| c.name == before) {
            Some(index) => self.chunks.insert(index, chunk),
            None => self.chunks.push(chunk),
        }
    }
}

/// Services available to plugins during one run.
pub struct PipelineOperations {
    resolver: WithFallback<Arc<dyn Resolver>>,
    registry: DependencyRegistry,
}

impl PipelineOperations {
    pub fn new(resolver: Arc<dyn Resolver>) -> Self {
        Self {
            resolver: WithFallback::new(resolver),
            registry: DependencyRegistry::new(),
        }
    }

    /// Resolve an element type, falling back to the type name.
    pub fn resolve(
        &self,
        element_type: &str,
        attrs: &Attrs,
        dependency: Option<&DependencyDescriptor>,
    ) -> ResolvedElement {
        self.resolver.resolve(element_type, attrs, dependency)
    }

    pub fn register_dependency(&mut self, key: impl Into<String>, dependency: DependencyDescriptor) {
        self.registry.register(key, dependency);
    }

    /// Dependencies registered so far.
    pub fn dependencies(&self) -> &IndexMap<String, DependencyDescriptor> {
        self.registry.dependencies()
    }

    pub fn into_dependencies(self) -> IndexMap<String, DependencyDescriptor> {
        self.registry.into_inner()
    }
}

impl std::fmt::Debug for PipelineOperations {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipelineOperations")
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

/// A stage of the assembly line.
///
/// A plugin receives the structure by value and hands it back when done.
/// Returning an error aborts the run.
pub trait ComponentPlugin: Send + Sync {
    /// Name used in logs and errors.
    fn name(&self) -> &str;

    fn run<'a>(
        &'a self,
        structure: PipelineStructure,
        operations: &'a mut PipelineOperations,
    ) -> BoxFuture<'a, Result<PipelineStructure, PipelineError>>;
}

/// Result of a completed run.
#[derive(Debug)]
pub struct PipelineOutput {
    pub chunks: Vec<Chunk>,
    pub dependencies: IndexMap<String, DependencyDescriptor>,
}

/// Runs plugins one after another over a UIDL component.
pub struct AssemblyLine {
    plugins: Vec<Box<dyn ComponentPlugin>>,
    resolver: Arc<dyn Resolver>,
}

impl AssemblyLine {
    pub fn new(resolver: impl Resolver + 'static) -> Self {
        Self {
            plugins: Vec::new(),
            resolver: Arc::new(resolver),
        }
    }

    /// Share a resolver that is already behind an `Arc`.
    pub fn with_shared_resolver(resolver: Arc<dyn Resolver>) -> Self {
        Self {
            plugins: Vec::new(),
            resolver,
        }
    }

    /// Append a plugin; plugins run in the order they are added.
    pub fn with_plugin(mut self, plugin: impl ComponentPlugin + 'static) -> Self {
        self.plugins.push(Box::new(plugin));
        self
    }

    pub fn add_plugin(&mut self, plugin: Box<dyn ComponentPlugin>) {
        self.plugins.push(plugin);
    }

    pub fn plugin_names(&self) -> impl Iterator<Item = &str> {
        self.plugins.iter().map(|p| p.name())
    }

    /// Run every plugin in order over `uidl`.
    ///
    /// Each plugin is awaited to completion before the next one starts. The
    /// first error is returned as is and nothing of the run is kept.
    pub async fn run(&self, uidl: ComponentUidl) -> Result<PipelineOutput, PipelineError> {
        let span = tracing::info_span!("assembly_line", component = %uidl.name);

        async move {
            let mut operations = PipelineOperations::new(Arc::clone(&self.resolver));
            let mut structure = PipelineStructure::new(uidl);

            for (index, plugin) in self.plugins.iter().enumerate() {
                tracing::debug!(plugin = plugin.name(), index, "running plugin");
                structure = match plugin.run(structure, &mut operations).await {
                    Ok(structure) => structure,
                    Err(err) => {
                        tracing::debug!(plugin = plugin.name(), error = %err, "plugin failed");
                        return Err(err);
                    }
                };
                tracing::debug!(
                    plugin = plugin.name(),
                    chunks = structure.chunks.len(),
                    "plugin finished"
                );
            }

            Ok(PipelineOutput {
                chunks: structure.chunks,
                dependencies: operations.into_dependencies(),
            })
        }
        .instrument(span)
        .await
    }
}

impl std::fmt::Debug for AssemblyLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssemblyLine")
            .field("plugins", &self.plugin_names().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunk::SourceTree;
    use crate::resolver::MappingResolver;
    use futures::executor::block_on;
    use uidl_core::UidlNode;

    #[derive(Debug)]
    struct Marker(String);

    impl SourceTree for Marker {
        fn to_source(&self) -> String {
            self.0.clone()
        }
    }

    struct Push(&'static str);

    impl ComponentPlugin for Push {
        fn name(&self) -> &str {
            self.0
        }

        fn run<'a>(
            &'a self,
            mut structure: PipelineStructure,
            operations: &'a mut PipelineOperations,
        ) -> BoxFuture<'a, Result<PipelineStructure, PipelineError>> {
            Box::pin(async move {
                operations.register_dependency(self.0, DependencyDescriptor::local(format!("./{}", self.0)));
                structure.push_chunk(Chunk::new("js", self.0, Marker(self.0.to_string())));
                Ok(structure)
            })
        }
    }

    struct Fail;

    impl ComponentPlugin for Fail {
        fn name(&self) -> &str {
            "fail"
        }

        fn run<'a>(
            &'a self,
            _structure: PipelineStructure,
            _operations: &'a mut PipelineOperations,
        ) -> BoxFuture<'a, Result<PipelineStructure, PipelineError>> {
            Box::pin(async move { Err(PipelineError::plugin("fail", "boom")) })
        }
    }

    fn uidl() -> ComponentUidl {
        ComponentUidl::new("Test", UidlNode::new("container"))
    }

    #[test]
    fn test_plugins_run_in_order() {
        let line = AssemblyLine::new(MappingResolver::new())
            .with_plugin(Push("first"))
            .with_plugin(Push("second"))
            .with_plugin(Push("third"));

        let output = block_on(line.run(uidl())).unwrap();
        let names: Vec<&str> = output.chunks.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["first", "second", "third"]);
        let keys: Vec<&str> = output.dependencies.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_failure_aborts_run() {
        let line = AssemblyLine::new(MappingResolver::new())
            .with_plugin(Push("first"))
            .with_plugin(Fail)
            .with_plugin(Push("never"));

        let err = block_on(line.run(uidl())).unwrap_err();
        assert_eq!(err, PipelineError::plugin("fail", "boom"));
    }

    #[test]
    fn test_runs_share_no_state() {
        let line = AssemblyLine::new(MappingResolver::new()).with_plugin(Push("only"));
        let first = block_on(line.run(uidl())).unwrap();
        let second = block_on(line.run(uidl())).unwrap();
        assert_eq!(first.chunks.len(), 1);
        assert_eq!(second.chunks.len(), 1);
        assert_eq!(second.dependencies.len(), 1);
    }

    #[test]
    fn test_insert_chunk_before() {
        let mut structure = PipelineStructure::new(uidl());
        structure.push_chunk(Chunk::new("js", "component", Marker("a".into())));
        structure.push_chunk(Chunk::new("js", "export", Marker("b".into())));
        structure.insert_chunk_before("export", Chunk::new("js", "styles", Marker("s".into())));
        structure.insert_chunk_before("missing", Chunk::new("js", "tail", Marker("t".into())));

        let names: Vec<&str> = structure.chunks.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["component", "styles", "export", "tail"]);
    }

    #[test]
    fn test_operations_fallback() {
        let operations = PipelineOperations::new(Arc::new(MappingResolver::new()));
        let resolved = operations.resolve("section", &Attrs::new(), None);
        assert_eq!(resolved.node_name, "section");
    }
}
