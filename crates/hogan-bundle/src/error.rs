//! Bundle error types.

use std::path::PathBuf;

use hogan_compiler::TemplateError;
use thiserror::Error;

/// Errors raised by the bundle transform.
#[derive(Debug, Error)]
pub enum BundleError {
    /// The transform cannot be built from the given arguments.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A file arrived with streaming contents.
    #[error("Streaming not supported: {}", path.display())]
    UnsupportedInput { path: PathBuf },

    /// A template failed to compile.
    #[error("failed to compile template '{name}': {source}")]
    Compile {
        name: String,
        #[source]
        source: TemplateError,
    },

    /// A JSON configuration document could not be read.
    #[error("invalid bundle configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl BundleError {
    pub fn missing_destination() -> Self {
        Self::Configuration("Missing dest argument for hogan bundle".to_string())
    }
}

/// Result alias for bundle operations.
pub type BundleResult<T> = Result<T, BundleError>;
