//! Bundles Mustache templates into a single JavaScript module.
//!
//! A [`TemplateBundleTransform`] sits in a file pipeline: every file pushed
//! through [`Transform::on_item`] is compiled with the Hogan compiler, and
//! [`Transform::on_complete`] emits one generated module that registers all
//! of them, wrapped for AMD, CommonJS, or not at all.
//!
//! ```text
//! views/list.mustache ─┐
//! views/row.mustache  ─┼→ TemplateBundleTransform → templates.js
//! views/empty.mustache┘
//! ```
//!
//! With a [`Destination::Container`] the transform fills a caller-owned map
//! with live templates instead and emits no file.

pub mod error;
pub mod file;
pub mod map;
pub mod module;
pub mod options;
pub mod stream;
pub mod transform;

pub use error::{BundleError, BundleResult};
pub use file::{Contents, File};
pub use hogan_compiler::{CompilerOptions, Template};
pub use map::TemplateMap;
pub use module::generate_module;
pub use options::{
    default_template_name, BundleConfig, BundleOptions, TemplateNamer, TemplateOptionsConfig,
    Wrapper, WrapperSetting,
};
pub use stream::{drive, EventSink, StreamEvent, Transform};
pub use transform::{Destination, TemplateBundleTransform};
