//! Transform options and the JSON configuration surface.
//!
//! [`BundleOptions`] holds the resolved settings a transform runs with.
//! [`BundleConfig`] is the partial, serializable form; [`BundleOptions::merge`]
//! lays it over the defaults, merging `templateOptions` key by key.

use std::fmt;
use std::path::Component;
use std::sync::Arc;

use hogan_compiler::CompilerOptions;
use serde::{Deserialize, Serialize};

use crate::error::BundleResult;
use crate::file::File;

/// Derives a template name from an incoming file.
pub type TemplateNamer = Arc<dyn Fn(&File) -> String + Send + Sync>;

/// Module wrapper placed around the generated templates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Wrapper {
    /// `define(function(require) { ... })`
    #[default]
    Amd,
    /// `module.exports = (function() { ... })();`
    #[serde(rename = "commonjs")]
    CommonJs,
    /// Bare `var templates = {};` plus assignments.
    None,
}

/// Resolved transform options.
#[derive(Clone)]
pub struct BundleOptions {
    /// Joins generated lines. Default `"\n"`.
    pub new_line: String,
    /// Default [`Wrapper::Amd`].
    pub wrapper: Wrapper,
    /// Passed to the compiler. `as_string` is overwritten by the transform.
    pub template_options: CompilerOptions,
    /// Default [`default_template_name`].
    pub template_name: TemplateNamer,
    /// Name of the generated map variable. Default `"templates"`.
    pub templates_variable_name: String,
    /// Module id required in wrapped output. Default `"hogan"`.
    pub hogan_module: String,
}

impl Default for BundleOptions {
    fn default() -> Self {
        Self {
            new_line: "\n".to_string(),
            wrapper: Wrapper::default(),
            template_options: CompilerOptions::default(),
            template_name: Arc::new(default_template_name),
            templates_variable_name: "templates".to_string(),
            hogan_module: "hogan".to_string(),
        }
    }
}

impl fmt::Debug for BundleOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BundleOptions")
            .field("new_line", &self.new_line)
            .field("wrapper", &self.wrapper)
            .field("template_options", &self.template_options)
            .field("templates_variable_name", &self.templates_variable_name)
            .field("hogan_module", &self.hogan_module)
            .finish_non_exhaustive()
    }
}

impl BundleOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults with `config` merged over them.
    pub fn from_config(config: &BundleConfig) -> Self {
        Self::default().merge(config)
    }

    /// Overlay every field `config` sets. `template_options` is merged
    /// field by field rather than replaced.
    pub fn merge(mut self, config: &BundleConfig) -> Self {
        if let Some(new_line) = &config.new_line {
            self.new_line = new_line.clone();
        }
        if let Some(wrapper) = config.wrapper {
            self.wrapper = wrapper.resolve();
        }
        if let Some(template_options) = &config.template_options {
            if let Some(as_string) = template_options.as_string {
                self.template_options.as_string = as_string;
            }
            if let Some(delimiters) = &template_options.delimiters {
                self.template_options.delimiters = Some(delimiters.clone());
            }
        }
        if let Some(name) = &config.templates_variable_name {
            self.templates_variable_name = name.clone();
        }
        if let Some(module) = &config.hogan_module {
            self.hogan_module = module.clone();
        }
        self
    }

    pub fn new_line(mut self, new_line: impl Into<String>) -> Self {
        self.new_line = new_line.into();
        self
    }

    pub fn wrapper(mut self, wrapper: Wrapper) -> Self {
        self.wrapper = wrapper;
        self
    }

    pub fn template_options(mut self, options: CompilerOptions) -> Self {
        self.template_options = options;
        self
    }

    pub fn template_name<F>(mut self, namer: F) -> Self
    where
        F: Fn(&File) -> String + Send + Sync + 'static,
    {
        self.template_name = Arc::new(namer);
        self
    }

    pub fn templates_variable_name(mut self, name: impl Into<String>) -> Self {
        self.templates_variable_name = name.into();
        self
    }

    pub fn hogan_module(mut self, module: impl Into<String>) -> Self {
        self.hogan_module = module.into();
        self
    }
}

/// Directory of the file's relative path joined with its stem, using `/`:
/// `foo/file1.js` → `foo/file1`, `file1.js` → `file1`.
pub fn default_template_name(file: &File) -> String {
    let relative = file.relative();
    let mut parts: Vec<String> = relative
        .parent()
        .map(|dir| {
            dir.components()
                .filter_map(|component| match component {
                    Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
                    Component::ParentDir => Some("..".to_string()),
                    _ => None,
                })
                .collect()
        })
        .unwrap_or_default();
    if let Some(stem) = relative.file_stem() {
        parts.push(stem.to_string_lossy().into_owned());
    }
    parts.join("/")
}

// ─────────────────────────────────────────────────────────────────────
// JSON configuration
// ─────────────────────────────────────────────────────────────────────

/// Partial options as read from JSON. Every field is optional.
///
/// ```json
/// { "newLine": "\r\n", "wrapper": "commonjs",
///   "templateOptions": { "delimiters": "<% %>" },
///   "templatesVariableName": "views", "hoganModule": "hogan.js" }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BundleConfig {
    #[serde(alias = "lineSeparator", skip_serializing_if = "Option::is_none")]
    pub new_line: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wrapper: Option<WrapperSetting>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_options: Option<TemplateOptionsConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub templates_variable_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hogan_module: Option<String>,
}

impl BundleConfig {
    pub fn from_json(json: &str) -> BundleResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_value(value: serde_json::Value) -> BundleResult<Self> {
        Ok(serde_json::from_value(value)?)
    }
}

/// `wrapper` accepts a kind name or a boolean: `false` disables the
/// wrapper, `true` selects the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WrapperSetting {
    Enabled(bool),
    Kind(Wrapper),
}

impl WrapperSetting {
    pub fn resolve(self) -> Wrapper {
        match self {
            WrapperSetting::Enabled(true) => Wrapper::default(),
            WrapperSetting::Enabled(false) => Wrapper::None,
            WrapperSetting::Kind(kind) => kind,
        }
    }
}

/// Partial compiler options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TemplateOptionsConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub as_string: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delimiters: Option<String>,
}
