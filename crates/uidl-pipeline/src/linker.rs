//! Linking chunks into final source text.

use indexmap::IndexMap;

use crate::chunk::Chunk;

/// Groups chunks by type and concatenates their rendered text.
#[derive(Debug, Clone)]
pub struct Linker {
    separator: String,
}

impl Default for Linker {
    fn default() -> Self {
        Self {
            separator: "\n".to_string(),
        }
    }
}

impl Linker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text placed between chunks of the same type.
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Link chunks into one text per chunk type.
    ///
    /// Types appear in order of their first chunk; chunks of a type keep
    /// their insertion order.
    pub fn link(&self, chunks: &[Chunk]) -> IndexMap<String, String> {
        let mut groups: IndexMap<String, Vec<String>> = IndexMap::new();
        for chunk in chunks {
            groups
                .entry(chunk.chunk_type.clone())
                .or_default()
                .push(chunk.render());
        }

        groups
            .into_iter()
            .map(|(chunk_type, texts)| (chunk_type, texts.join(&self.separator)))
            .collect()
    }

    /// Link only the chunks of one type.
    pub fn link_type(&self, chunks: &[Chunk], chunk_type: &str) -> Option<String> {
        let texts: Vec<String> = chunks
            .iter()
            .filter(|chunk| chunk.chunk_type == chunk_type)
            .map(Chunk::render)
            .collect();
        (!texts.is_empty()).then(|| texts.join(&self.separator))
    }
}
