//! Template tree produced by the parser.
//!
//! Nodes appear in source order. Sections own their children; every
//! other node is a leaf.

use crate::Span;

/// One node of a compiled template.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Literal text (never contains a newline).
    Text(String),
    /// A line break. `last` is set when the following token is another
    /// line break or the end of the template, in which case no partial
    /// indentation is written after it.
    Newline { last: bool },
    /// `{{name}}`, HTML-escaped interpolation.
    Variable(Tag),
    /// `{{{name}}}` or `{{& name}}`, raw interpolation.
    Unescaped(Tag),
    /// `{{#name}}...{{/name}}`
    Section(Section),
    /// `{{^name}}...{{/name}}`
    Inverted(Section),
    /// `{{> name}}`
    Partial(Partial),
    /// `{{! comment}}`
    Comment(Tag),
}

/// A named leaf tag.
#[derive(Debug, Clone, PartialEq)]
pub struct Tag {
    pub name: String,
    pub span: Span,
}

impl Tag {
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }

    /// Dotted names (`a.b`, `.`) resolve member by member.
    pub fn is_dotted(&self) -> bool {
        self.name.contains('.')
    }
}

/// A section or inverted section with its children.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub name: String,
    pub nodes: Vec<Node>,
    /// UTF-16 offset just past the opening tag.
    pub start: usize,
    /// UTF-16 offset of the closing tag.
    pub end: usize,
    /// Delimiters in effect at the opening tag, e.g. `("{{", "}}")`.
    pub otag: String,
    pub ctag: String,
    /// Span from the opening tag through the closing tag.
    pub span: Span,
}

impl Section {
    /// Dotted names (`a.b`, `.`) resolve member by member.
    pub fn is_dotted(&self) -> bool {
        self.name.contains('.')
    }
}

/// A partial reference.
#[derive(Debug, Clone, PartialEq)]
pub struct Partial {
    pub name: String,
    /// Leading whitespace of a standalone partial line, written before
    /// every line of the partial's output.
    pub indent: String,
    pub span: Span,
}
