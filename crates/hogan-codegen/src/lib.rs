//! Hogan code generator: compiles a template tree to the JavaScript
//! literal that `new Hogan.Template(...)` accepts.
//!
//! # Output shape
//!
//! ```text
//! {code: function (c,p,i) { var t=this;t.b(i=i||"");<body>return t.fl(); },partials: {<partials>}, subs: {  }}
//! ```
//!
//! `c` is the context stack, `p` the partials map and `i` the indentation
//! written after every line break. Each partial call site gets an entry
//! `"<name0":{name:"name", partials: {}, subs: {  }}`.

pub mod codegen;
pub mod escape;

pub use codegen::{generate, CodeObject, PartialRef};
pub use escape::esc;

use hogan_types::tree::Node;

/// Wrap a generated body in the runtime prologue and epilogue.
pub fn wrap_main(code: &str) -> String {
    format!("var t=this;t.b(i=i||\"\");{code}return t.fl();")
}

/// Render a [`CodeObject`] as a JS object literal.
pub fn stringify(code: &CodeObject) -> String {
    format!(
        "{{code: function (c,p,i) {{ {} }},{}}}",
        wrap_main(&code.code),
        stringify_partials(&code.partials)
    )
}

/// Generate and stringify in one step.
pub fn to_source(nodes: &[Node]) -> String {
    stringify(&generate(nodes))
}

fn stringify_partials(partials: &[PartialRef]) -> String {
    let entries: Vec<String> = partials
        .iter()
        .map(|p| {
            format!(
                "\"{}\":{{name:\"{}\", partials: {{}}, subs: {{  }}}}",
                esc(&p.symbol),
                esc(&p.name)
            )
        })
        .collect();
    format!("partials: {{{}}}, subs: {{  }}", entries.join(","))
}
