//! Plugin pipeline for UIDL component generators.
//!
//! A generator is an [`AssemblyLine`] of [`ComponentPlugin`]s. Plugins run in
//! order over a shared [`PipelineStructure`], resolve element types through a
//! [`Resolver`], register the dependencies they meet, and append [`Chunk`]s.
//! The [`Linker`] turns the final chunk list into source text.
//!
//! # Example
//!
//! ```ignore
//! use uidl_pipeline::{AssemblyLine, Linker, MappingResolver};
//!
//! let line = AssemblyLine::new(MappingResolver::new()).with_plugin(my_plugin);
//! let output = line.run(uidl).await?;
//! let code = Linker::new().link(&output.chunks);
//! ```

pub mod assembly;
pub mod chunk;
pub mod dependencies;
pub mod linker;
pub mod resolver;

pub use assembly::{
    AssemblyLine, ComponentPlugin, PipelineOperations, PipelineOutput, PipelineStructure,
};
pub use chunk::{AsAny, Chunk, ChunkMeta, Lookup, NodePath, SourceTree, WrapFn, HTML_CHUNK, JS_CHUNK};
pub use dependencies::DependencyRegistry;
pub use linker::Linker;
pub use resolver::{ElementMapping, MappingResolver, ResolvedElement, Resolver, WithFallback};

pub use futures::future::BoxFuture;
