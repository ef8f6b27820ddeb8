//! Shared types for the Hogan template compiler.
//!
//! This crate defines the template tree, source spans and the error type
//! used by every compiler stage.

mod error;
mod span;
pub mod tree;

pub use error::{ErrorCategory, ErrorCode, TemplateError};
pub use span::{CharPos, SourceFile, Span};

/// Result type used throughout the template compiler.
pub type Result<T> = std::result::Result<T, TemplateError>;
