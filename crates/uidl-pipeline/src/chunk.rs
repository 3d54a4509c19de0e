//! Chunks: the units of output produced by plugins.
//!
//! A chunk carries a synthesized tree whose concrete type only the producing
//! plugin (and the plugins cooperating with it) know about. Later plugins find
//! chunks by name and downcast the content to edit it in place.

use std::any::Any;
use std::fmt;

use indexmap::IndexMap;
use smallvec::SmallVec;

/// Chunk type of markup sections.
pub const HTML_CHUNK: &str = "html";

/// Chunk type of script sections.
pub const JS_CHUNK: &str = "js";

/// Upcast helper for [`SourceTree`] downcasting.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// A synthesized tree that can be printed as source text.
pub trait SourceTree: AsAny + fmt::Debug + Send + Sync {
    /// Serialize the tree. Output must be deterministic.
    fn to_source(&self) -> String;
}

/// Child-index path from the root of a tree to one of its nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct NodePath(SmallVec<[usize; 8]>);

impl NodePath {
    /// The path of the root itself.
    pub fn root() -> Self {
        Self::default()
    }

    /// The path of the `index`-th child of this node.
    pub fn child(&self, index: usize) -> Self {
        let mut path = self.clone();
        path.0.push(index);
        path
    }

    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<usize>> for NodePath {
    fn from(indices: Vec<usize>) -> Self {
        Self(SmallVec::from_vec(indices))
    }
}

/// Node name -> path of the node in a chunk's tree.
pub type Lookup = IndexMap<String, NodePath>;

/// Cross-plugin metadata of a chunk.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChunkMeta {
    pub lookup: Lookup,
}

impl ChunkMeta {
    pub fn with_lookup(lookup: Lookup) -> Self {
        Self { lookup }
    }
}

/// Frames the serialized content of a chunk.
pub type WrapFn = Box<dyn Fn(&str) -> String + Send + Sync>;

/// A named, typed unit of generated output.
pub struct Chunk {
    /// Output kind; chunks of one type are linked together.
    pub chunk_type: String,
    /// Unique within the run.
    pub name: String,
    pub meta: ChunkMeta,
    content: Box<dyn SourceTree>,
    wrap: Option<WrapFn>,
}

impl Chunk {
    pub fn new(
        chunk_type: impl Into<String>,
        name: impl Into<String>,
        content: impl SourceTree,
    ) -> Self {
        Self {
            chunk_type: chunk_type.into(),
            name: name.into(),
            meta: ChunkMeta::default(),
            content: Box::new(content),
            wrap: None,
        }
    }

    pub fn with_meta(mut self, meta: ChunkMeta) -> Self {
        self.meta = meta;
        self
    }

    /// Set the function framing the serialized content.
    pub fn with_wrap<F>(mut self, wrap: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.wrap = Some(Box::new(wrap));
        self
    }

    pub fn content(&self) -> &dyn SourceTree {
        &*self.content
    }

    /// The content, if it is a `T`.
    pub fn content_as<T: SourceTree>(&self) -> Option<&T> {
        let tree: &dyn SourceTree = &*self.content;
        tree.as_any().downcast_ref::<T>()
    }

    /// The content, mutably, if it is a `T`.
    pub fn content_as_mut<T: SourceTree>(&mut self) -> Option<&mut T> {
        let tree: &mut dyn SourceTree = &mut *self.content;
        tree.as_any_mut().downcast_mut::<T>()
    }

    /// Serialize the content and apply the wrap.
    pub fn render(&self) -> String {
        let source = self.content.to_source();
        match &self.wrap {
            Some(wrap) => wrap(&source),
            None => source,
        }
    }
}

impl fmt::Debug for Chunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chunk")
            .field("chunk_type", &self.chunk_type)
            .field("name", &self.name)
            .field("meta", &self.meta)
            .field("content", &self.content)
            .field("wrapped", &self.wrap.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Text(String);

    impl SourceTree for Text {
        fn to_source(&self) -> String {
            self.0.clone()
        }
    }

    #[test]
    fn test_render_with_wrap() {
        let chunk = Chunk::new(HTML_CHUNK, "template", Text("<div/>".into()))
            .with_wrap(|content| format!("<template>\n\n{}\n</template>\n", content));
        assert_eq!(chunk.render(), "<template>\n\n<div/>\n</template>\n");
    }

    #[test]
    fn test_render_without_wrap() {
        let chunk = Chunk::new(JS_CHUNK, "script", Text("export default {}".into()));
        assert_eq!(chunk.render(), "export default {}");
    }

    #[test]
    fn test_content_downcast() {
        let mut chunk = Chunk::new(JS_CHUNK, "script", Text("a".into()));
        chunk.content_as_mut::<Text>().unwrap().0.push('b');
        assert_eq!(chunk.content_as::<Text>().unwrap().0, "ab");
        assert!(chunk.content_as::<NotText>().is_none());
    }

    #[derive(Debug)]
    struct NotText;

    impl SourceTree for NotText {
        fn to_source(&self) -> String {
            String::new()
        }
    }

    #[test]
    fn test_node_path() {
        let path = NodePath::root().child(2).child(0);
        assert_eq!(path.indices(), &[2, 0]);
        assert!(NodePath::root().is_root());
    }
}
