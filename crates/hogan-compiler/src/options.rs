use serde::{Deserialize, Serialize};

/// Options understood by [`compile`](crate::compile).
///
/// Deserializes from the camelCase keys Hogan uses (`asString`,
/// `delimiters`); unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompilerOptions {
    /// Produce the JavaScript literal instead of a live template.
    pub as_string: bool,
    /// Initial delimiters as `"<open> <close>"`, e.g. `"<% %>"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delimiters: Option<String>,
}

impl CompilerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_string(mut self, as_string: bool) -> Self {
        self.as_string = as_string;
        self
    }

    pub fn delimiters(mut self, delimiters: impl Into<String>) -> Self {
        self.delimiters = Some(delimiters.into());
        self
    }
}
