//! Generated module source.
//!
//! ```text
//! define(function(require) {                       ← wrapper open
//!     var Hogan = require('hogan');                ← any wrapper
//!     var templates = {};
//!     templates['name'] = new Hogan.Template(...);  ← one per entry
//!     return templates;                            ← any wrapper
//! })                                               ← wrapper close
//! ```

use crate::options::{BundleOptions, Wrapper};

/// Identifier the generated code binds the engine module to.
pub const ENGINE_BINDING: &str = "Hogan";

const INDENT: &str = "    ";

/// Build the module text for `entries` (name, JS literal) in the given
/// order. Literals are embedded verbatim.
pub fn generate_module<'e, I>(entries: I, options: &BundleOptions) -> String
where
    I: IntoIterator<Item = (&'e str, &'e str)>,
{
    let var = &options.templates_variable_name;
    let wrapped = options.wrapper != Wrapper::None;
    let mut lines = Vec::new();

    match options.wrapper {
        Wrapper::Amd => lines.push("define(function(require) {".to_string()),
        Wrapper::CommonJs => lines.push("module.exports = (function() {".to_string()),
        Wrapper::None => {}
    }
    if wrapped {
        lines.push(format!(
            "{INDENT}var {ENGINE_BINDING} = require('{}');",
            options.hogan_module
        ));
    }

    lines.push(format!("{INDENT}var {var} = {{}};"));
    for (name, literal) in entries {
        lines.push(format!(
            "{INDENT}{var}['{name}'] = new {ENGINE_BINDING}.Template({literal});"
        ));
    }

    if wrapped {
        lines.push(format!("{INDENT}return {var};"));
    }
    match options.wrapper {
        Wrapper::Amd => lines.push("})".to_string()),
        Wrapper::CommonJs => lines.push("})();".to_string()),
        Wrapper::None => {}
    }

    lines.join(&options.new_line)
}
