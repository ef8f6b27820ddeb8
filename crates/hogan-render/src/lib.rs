//! Hogan tree-walking renderer.
//!
//! Renders parsed templates directly against `serde_json::Value` data,
//! with the lookup, escaping and section rules of the Hogan runtime that
//! generated code targets.

pub mod context;
pub mod template;
pub mod value;

pub use context::ContextStack;
pub use template::{Partials, Template, MAX_PARTIAL_DEPTH};
