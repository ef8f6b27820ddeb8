//! Token types for the template scanner.
//!
//! Defines [`TagKind`] for every Mustache tag sigil and [`Token`], which
//! pairs a [`TokenKind`] with a source [`Span`].

use hogan_types::Span;
use std::fmt;

// ─────────────────────────────────────────────────────────────────────
// Token
// ─────────────────────────────────────────────────────────────────────

/// A single token produced by the scanner.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// What kind of token this is.
    pub kind: TokenKind,
    /// Source location.
    pub span: Span,
}

impl Token {
    /// Create a new token.
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Returns the tag payload if this is a tag token.
    pub fn as_tag(&self) -> Option<&TagToken> {
        match &self.kind {
            TokenKind::Tag(tag) => Some(tag),
            _ => None,
        }
    }
}

/// Token payloads.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// A run of literal text on one line.
    Text(String),
    /// A `\n` that survived standalone-line filtering.
    Newline,
    /// Any `{{...}}` tag.
    Tag(TagToken),
}

impl TokenKind {
    /// Text made only of whitespace.
    pub fn is_blank_text(&self) -> bool {
        matches!(self, TokenKind::Text(text) if text.chars().all(char::is_whitespace))
    }
}

/// A scanned tag.
#[derive(Debug, Clone, PartialEq)]
pub struct TagToken {
    pub kind: TagKind,
    /// Trimmed tag content without the sigil.
    pub name: String,
    /// Opening delimiter in effect when the tag was scanned.
    pub otag: String,
    /// Closing delimiter in effect when the tag was scanned.
    pub ctag: String,
    /// UTF-16 offset: start of the tag for closing tags, just past the
    /// tag for every other kind.
    pub index: usize,
    /// Leading whitespace of a standalone partial line.
    pub indent: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────
// TagKind
// ─────────────────────────────────────────────────────────────────────

/// Tag kinds, one per sigil.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagKind {
    /// `#`
    Section,
    /// `^`
    Inverted,
    /// `<` (template inheritance)
    Parent,
    /// `$` (template inheritance)
    Block,
    /// `/`
    Close,
    /// `!`
    Comment,
    /// `>`
    Partial,
    /// `=`
    Delimiters,
    /// no sigil
    Variable,
    /// `{`
    TripleStache,
    /// `&`
    Ampersand,
}

impl TagKind {
    /// Map the character after the opening delimiter to a tag kind.
    /// Any other character starts a plain variable.
    pub fn from_sigil(c: char) -> Option<Self> {
        match c {
            '#' => Some(Self::Section),
            '^' => Some(Self::Inverted),
            '<' => Some(Self::Parent),
            '$' => Some(Self::Block),
            '/' => Some(Self::Close),
            '!' => Some(Self::Comment),
            '>' => Some(Self::Partial),
            '=' => Some(Self::Delimiters),
            '{' => Some(Self::TripleStache),
            '&' => Some(Self::Ampersand),
            _ => None,
        }
    }

    /// The sigil as written in source; empty for variables.
    pub fn sigil(self) -> &'static str {
        match self {
            Self::Section => "#",
            Self::Inverted => "^",
            Self::Parent => "<",
            Self::Block => "$",
            Self::Close => "/",
            Self::Comment => "!",
            Self::Partial => ">",
            Self::Delimiters => "=",
            Self::Variable => "",
            Self::TripleStache => "{",
            Self::Ampersand => "&",
        }
    }

    /// Tags that produce no output of their own. A line holding only
    /// these plus whitespace is a standalone line and is removed.
    pub fn is_standalone(self) -> bool {
        !matches!(self, Self::Variable | Self::TripleStache | Self::Ampersand)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Text(text) => write!(f, "text {text:?}"),
            TokenKind::Newline => write!(f, "newline"),
            TokenKind::Tag(tag) => {
                write!(f, "{}{}{}{}", tag.otag, tag.kind.sigil(), tag.name, tag.ctag)
            }
        }
    }
}
