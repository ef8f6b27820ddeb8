//! Token stream → template tree.

use std::collections::VecDeque;

use hogan_lexer::{TagKind, TagToken, Token, TokenKind};
use hogan_types::tree::{Node, Partial, Section, Tag};
use hogan_types::{ErrorCode, SourceFile, Span, TemplateError};

/// The template parser.
///
/// Consumes the scanner's tokens and builds the section tree. Unlike the
/// scanner it stops at the first error: an unbalanced section makes the
/// rest of the tree meaningless.
pub struct Parser<'src> {
    tokens: VecDeque<Token>,
    source_file: &'src SourceFile,
}

/// An open `#`/`^` section waiting for its closing tag.
struct Opener {
    tag: TagToken,
    span: Span,
}

/// Children collected for one nesting level, plus the closing tag that
/// ended it (`None` at top level).
struct Block {
    nodes: Vec<Node>,
    close: Option<(TagToken, Span)>,
}

impl<'src> Parser<'src> {
    /// Create a parser from a token stream and its source file.
    pub fn new(tokens: Vec<Token>, source_file: &'src SourceFile) -> Self {
        Self {
            tokens: tokens.into(),
            source_file,
        }
    }

    /// Parse the whole token stream into a list of top-level nodes.
    pub fn parse(mut self) -> hogan_types::Result<Vec<Node>> {
        let block = self.parse_block(None)?;
        Ok(block.nodes)
    }

    fn parse_block(&mut self, opener: Option<&Opener>) -> hogan_types::Result<Block> {
        let mut nodes = Vec::new();

        while let Some(token) = self.tokens.pop_front() {
            let span = token.span;
            let tag = match token.kind {
                TokenKind::Text(text) => {
                    nodes.push(Node::Text(text));
                    continue;
                }
                TokenKind::Newline => {
                    let last = matches!(
                        self.tokens.front().map(|t| &t.kind),
                        None | Some(TokenKind::Newline)
                    );
                    nodes.push(Node::Newline { last });
                    continue;
                }
                TokenKind::Tag(tag) => tag,
            };

            match tag.kind {
                TagKind::Section | TagKind::Inverted => {
                    nodes.push(self.parse_section(tag, span)?);
                }
                TagKind::Close => {
                    let Some(opener) = opener else {
                        return Err(self.error(
                            ErrorCode::CLOSE_WITHOUT_OPENER,
                            format!("Closing tag without opener: /{}", tag.name),
                            span,
                        ));
                    };
                    if tag.name != opener.tag.name {
                        return Err(self
                            .error(
                                ErrorCode::NESTING_MISMATCH,
                                format!("Nesting error: {} vs. {}", opener.tag.name, tag.name),
                                span,
                            )
                            .with_suggestion(format!(
                                "Close '{}' before '{}'",
                                opener.tag.name, tag.name
                            )));
                    }
                    return Ok(Block {
                        nodes,
                        close: Some((tag, span)),
                    });
                }
                TagKind::Parent | TagKind::Block => {
                    return Err(self
                        .error(
                            ErrorCode::UNSUPPORTED_TAG,
                            format!(
                                "template inheritance is not supported: {}{}",
                                tag.kind.sigil(),
                                tag.name
                            ),
                            span,
                        )
                        .with_suggestion(format!("Use a partial ({{{{> {}}}}}) instead", tag.name)));
                }
                TagKind::Partial => nodes.push(Node::Partial(Partial {
                    name: tag.name,
                    indent: tag.indent.unwrap_or_default(),
                    span,
                })),
                TagKind::Comment => nodes.push(Node::Comment(Tag::new(tag.name, span))),
                TagKind::Variable => nodes.push(Node::Variable(Tag::new(tag.name, span))),
                TagKind::TripleStache | TagKind::Ampersand => {
                    nodes.push(Node::Unescaped(Tag::new(tag.name, span)))
                }
                // The scanner consumes delimiter changes itself.
                TagKind::Delimiters => {}
            }
        }

        if let Some(opener) = opener {
            return Err(self.error(
                ErrorCode::UNCLOSED_SECTION,
                format!("missing closing tag: {}", opener.tag.name),
                opener.span,
            ));
        }

        Ok(Block { nodes, close: None })
    }

    fn parse_section(&mut self, tag: TagToken, span: Span) -> hogan_types::Result<Node> {
        let opener = Opener { tag, span };
        let block = self.parse_block(Some(&opener))?;
        let Opener { tag, span } = opener;

        let (end, span) = match block.close {
            Some((close, close_span)) => (close.index, span.to(close_span)),
            None => (tag.index, span),
        };

        let section = Section {
            name: tag.name,
            nodes: block.nodes,
            start: tag.index,
            end,
            otag: tag.otag,
            ctag: tag.ctag,
            span,
        };

        Ok(match tag.kind {
            TagKind::Inverted => Node::Inverted(section),
            _ => Node::Section(section),
        })
    }

    fn error(&self, code: ErrorCode, message: impl Into<String>, span: Span) -> TemplateError {
        let source_line = self.source_file.line(span.start_line).unwrap_or("");
        TemplateError::new(&self.source_file.name, code, message, span, source_line)
    }
}
