//! Template lexer: converts Mustache source text into a token stream.

pub mod lexer;
pub mod token;

pub use lexer::{LexResult, Lexer, DEFAULT_CTAG, DEFAULT_OTAG};
pub use token::{TagKind, TagToken, Token, TokenKind};
