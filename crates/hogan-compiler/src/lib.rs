//! Hogan compiler: orchestrates the template pipeline.
//!
//! ```text
//! template text → Lexer → Parser → ┬→ Codegen → JS literal   (asString)
//!                                  └→ Template (live render)
//! ```

pub mod options;

pub use hogan_render::{Partials, Template};
pub use hogan_types::{ErrorCode, TemplateError};
pub use options::CompilerOptions;

use hogan_lexer::Lexer;
use hogan_parser::Parser;
use hogan_types::tree::Node;
use hogan_types::SourceFile;

/// File name used in errors when the caller does not name the template.
pub const ANONYMOUS: &str = "template";

/// The result of compiling one template.
#[derive(Debug, Clone)]
pub enum Compiled {
    /// JavaScript literal for `new Hogan.Template(...)`.
    Source(String),
    /// Live template.
    Template(Template),
}

impl Compiled {
    pub fn as_source(&self) -> Option<&str> {
        match self {
            Compiled::Source(source) => Some(source),
            Compiled::Template(_) => None,
        }
    }

    pub fn as_template(&self) -> Option<&Template> {
        match self {
            Compiled::Template(template) => Some(template),
            Compiled::Source(_) => None,
        }
    }
}

/// Compile `text`, producing a literal or a live template depending on
/// `options.as_string`.
pub fn compile(text: &str, options: &CompilerOptions) -> hogan_types::Result<Compiled> {
    compile_named(ANONYMOUS, text, options)
}

/// Like [`compile`], with `name` used as the file name in errors.
pub fn compile_named(
    name: &str,
    text: &str,
    options: &CompilerOptions,
) -> hogan_types::Result<Compiled> {
    if options.as_string {
        compile_source(name, text, options).map(Compiled::Source)
    } else {
        compile_template(name, text, options).map(Compiled::Template)
    }
}

/// Compile to the JavaScript literal form regardless of `as_string`.
pub fn compile_source(
    name: &str,
    text: &str,
    options: &CompilerOptions,
) -> hogan_types::Result<String> {
    let nodes = parse(name, text, options.delimiters.as_deref())?;
    Ok(hogan_codegen::to_source(&nodes))
}

/// Compile to a live template regardless of `as_string`.
pub fn compile_template(
    name: &str,
    text: &str,
    options: &CompilerOptions,
) -> hogan_types::Result<Template> {
    let nodes = parse(name, text, options.delimiters.as_deref())?;
    Ok(Template::new(nodes, text))
}

/// Scan and parse `text` into a template tree.
pub fn parse(name: &str, text: &str, delimiters: Option<&str>) -> hogan_types::Result<Vec<Node>> {
    let source_file = SourceFile::new(name, text);
    let lexer = match delimiters {
        Some(delimiters) => Lexer::with_delimiters(&source_file, delimiters),
        None => Lexer::new(&source_file),
    };
    let lexed = lexer.lex();
    if let Some(err) = lexed.errors.into_iter().next() {
        return Err(err);
    }
    Parser::new(lexed.tokens, &source_file).parse()
}
