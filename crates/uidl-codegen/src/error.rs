//! Error types for component generation.

use thiserror::Error;
use uidl_core::{BuildError, PipelineError};

/// Result type alias for generator operations.
pub type Result<T> = std::result::Result<T, CodegenError>;

/// Errors that can occur while generating a component.
#[derive(Error, Debug)]
pub enum CodegenError {
    /// The assembly line aborted.
    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    /// UIDL or mapping JSON could not be read.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<BuildError> for CodegenError {
    fn from(err: BuildError) -> Self {
        CodegenError::Pipeline(err.into())
    }
}
