//! Error types shared by the pipeline and the generators.

use thiserror::Error;

/// Errors raised while synthesizing a target tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    /// A class token was appended to a class attribute that is not a string literal.
    #[error("Cannot add class '{token}' to <{tag}>: its {attribute} attribute is not a string literal")]
    InvalidClassMergeTarget {
        tag: String,
        attribute: String,
        token: String,
    },

    /// A tag could not be created for the given name.
    #[error("Malformed markup for tag '{tag}': {reason}")]
    MalformedLeafMarkup { tag: String, reason: String },
}

/// Errors that abort a pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Build(#[from] BuildError),

    #[error("Chunk '{name}' not found")]
    MissingChunk { name: String },

    #[error("Chunk '{name}' does not hold {expected} content")]
    UnexpectedContent { name: String, expected: &'static str },

    #[error("Plugin '{plugin}' failed: {reason}")]
    PluginFailure { plugin: String, reason: String },
}

impl PipelineError {
    /// Wrap an arbitrary plugin error.
    pub fn plugin(plugin: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        PipelineError::PluginFailure {
            plugin: plugin.into(),
            reason: reason.to_string(),
        }
    }
}
