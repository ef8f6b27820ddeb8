//! Template parser: converts a token stream into a template tree.

mod parser;

pub use parser::Parser;
