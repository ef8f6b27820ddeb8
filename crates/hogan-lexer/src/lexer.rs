//! Template scanner: converts template text to a token stream.
//!
//! Follows Hogan's scanning rules:
//! - Default delimiters `{{ }}`, replaceable up front or with `{{=<% %>=}}`
//! - Tag names are trimmed; `{{{name}}}` swallows its third brace
//! - Standalone lines (only whitespace and non-output tags) lose their
//!   whitespace and line break; the indentation moves onto a partial
//! - An unterminated tag at end of input is kept as plain text of its
//!   content (the opening delimiter is dropped)

use hogan_types::{ErrorCode, SourceFile, Span, TemplateError};

use crate::token::{TagKind, TagToken, Token, TokenKind};

/// Opening delimiter used unless the caller or the template changes it.
pub const DEFAULT_OTAG: &str = "{{";
/// Closing delimiter used unless the caller or the template changes it.
pub const DEFAULT_CTAG: &str = "}}";

/// Scanner state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Copying literal text.
    Text,
    /// Just matched an opening delimiter; the next char may be a sigil.
    TagType,
    /// Inside a tag, collecting its name until the closing delimiter.
    Tag,
}

/// The template scanner.
pub struct Lexer<'src> {
    chars: &'src [char],
    /// Positions, spans and source lines.
    source_file: &'src SourceFile,
    otag: Vec<char>,
    ctag: Vec<char>,
    state: State,
    /// Kind of the tag being scanned.
    tag_kind: TagKind,
    /// Char index of the current tag's opening delimiter.
    tag_start: usize,
    /// Char index of the last tag seen on the current line.
    seen_tag: Option<usize>,
    /// Pending text or tag content.
    buf: String,
    buf_start: usize,
    tokens: Vec<Token>,
    /// Index into `tokens` where the current line begins.
    line_start: usize,
    errors: Vec<TemplateError>,
}

/// Result of scanning: tokens + any error that stopped the scan.
pub struct LexResult {
    pub tokens: Vec<Token>,
    pub errors: Vec<TemplateError>,
}

impl LexResult {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

impl<'src> Lexer<'src> {
    /// Create a scanner using the default `{{ }}` delimiters.
    pub fn new(source_file: &'src SourceFile) -> Self {
        Self {
            chars: source_file.chars(),
            source_file,
            otag: DEFAULT_OTAG.chars().collect(),
            ctag: DEFAULT_CTAG.chars().collect(),
            state: State::Text,
            tag_kind: TagKind::Variable,
            tag_start: 0,
            seen_tag: None,
            buf: String::new(),
            buf_start: 0,
            tokens: Vec::new(),
            line_start: 0,
            errors: Vec::new(),
        }
    }

    /// Create a scanner with initial delimiters given as `"<open> <close>"`.
    pub fn with_delimiters(source_file: &'src SourceFile, delimiters: &str) -> Self {
        let mut lexer = Self::new(source_file);
        match split_delimiters(delimiters) {
            Some((otag, ctag)) => {
                lexer.otag = otag;
                lexer.ctag = ctag;
            }
            None => {
                let err = TemplateError::new(
                    &source_file.name,
                    ErrorCode::INVALID_DELIMITERS,
                    format!("invalid delimiters: {delimiters:?}"),
                    Span::point(1, 1),
                    source_file.line(1).unwrap_or(""),
                )
                .with_suggestion("Pass the opening and closing delimiter separated by a space, e.g. \"<% %>\"");
                lexer.errors.push(err);
            }
        }
        lexer
    }

    /// Scan the whole template.
    pub fn lex(mut self) -> LexResult {
        if !self.errors.is_empty() {
            return LexResult {
                tokens: Vec::new(),
                errors: self.errors,
            };
        }

        let len = self.chars.len();
        let mut i = 0;
        while i < len {
            match self.state {
                State::Text => {
                    if starts_at(&self.chars, &self.otag, i) {
                        self.flush_text(i);
                        self.tag_start = i;
                        self.state = State::TagType;
                        continue;
                    }
                    if self.chars[i] == '\n' {
                        self.filter_line(i, false);
                    } else {
                        self.push_char(i);
                    }
                    i += 1;
                }
                State::TagType => {
                    i += self.otag.len() - 1;
                    match self.chars.get(i + 1).copied().and_then(TagKind::from_sigil) {
                        Some(TagKind::Delimiters) => {
                            match self.change_delimiters(i) {
                                Some(next) => i = next,
                                None => break,
                            }
                            self.state = State::Text;
                        }
                        Some(kind) => {
                            i += 1;
                            self.tag_kind = kind;
                            self.state = State::Tag;
                        }
                        None => {
                            self.tag_kind = TagKind::Variable;
                            self.state = State::Tag;
                        }
                    }
                    self.seen_tag = Some(i);
                    i += 1;
                }
                State::Tag => {
                    if starts_at(&self.chars, &self.ctag, i) {
                        i = self.push_tag(i);
                        self.state = State::Text;
                    } else {
                        self.push_char(i);
                    }
                    i += 1;
                }
            }
        }

        if self.errors.is_empty() {
            self.filter_line(len, true);
        }

        LexResult {
            tokens: self.tokens,
            errors: self.errors,
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Buffers & tokens
    // ─────────────────────────────────────────────────────────────

    fn push_char(&mut self, i: usize) {
        if self.buf.is_empty() {
            self.buf_start = i;
        }
        self.buf.push(self.chars[i]);
    }

    fn flush_text(&mut self, end: usize) {
        if self.buf.is_empty() {
            return;
        }
        let text = std::mem::take(&mut self.buf);
        let span = self.source_file.span(self.buf_start, end);
        self.tokens.push(Token::new(TokenKind::Text(text), span));
    }

    /// Emit the tag whose closing delimiter starts at `i`. Returns the
    /// index of the last char consumed.
    fn push_tag(&mut self, i: usize) -> usize {
        let ctag_len = self.ctag.len();
        let mut name = self.buf.trim().to_string();
        self.buf.clear();

        let index = if self.tag_kind == TagKind::Close {
            let seen = self.seen_tag.unwrap_or(self.tag_start);
            let at = self.source_file.pos(seen).utf16;
            at.saturating_sub(utf16_len(&self.otag))
        } else {
            self.source_file.pos(i + ctag_len).utf16
        };

        let mut last = i + ctag_len - 1;
        if self.tag_kind == TagKind::TripleStache {
            if self.ctag == ['}', '}'] {
                last += 1;
            } else if name.ends_with('}') {
                name.pop();
            }
        }

        let span = self.source_file.span(self.tag_start, last + 1);
        let tag = TagToken {
            kind: self.tag_kind,
            name,
            otag: self.otag.iter().collect(),
            ctag: self.ctag.iter().collect(),
            index,
            indent: None,
        };
        self.tokens.push(Token::new(TokenKind::Tag(tag), span));
        last
    }

    /// End the current line at `at`. Standalone lines drop their blank
    /// text and their line break.
    fn filter_line(&mut self, at: usize, no_new_line: bool) {
        self.flush_text(at);

        if self.seen_tag.is_some() && self.line_is_whitespace() {
            let mut j = self.line_start;
            while j < self.tokens.len() {
                if let TokenKind::Text(text) = &self.tokens[j].kind {
                    let indent = text.clone();
                    if let Some(TokenKind::Tag(next)) =
                        self.tokens.get_mut(j + 1).map(|t| &mut t.kind)
                    {
                        if next.kind == TagKind::Partial {
                            next.indent = Some(indent);
                        }
                    }
                    self.tokens.remove(j);
                } else {
                    j += 1;
                }
            }
        } else if !no_new_line {
            let span = self.source_file.span(at, at + 1);
            self.tokens.push(Token::new(TokenKind::Newline, span));
        }

        self.seen_tag = None;
        self.line_start = self.tokens.len();
    }

    fn line_is_whitespace(&self) -> bool {
        self.tokens[self.line_start..]
            .iter()
            .all(|token| match &token.kind {
                TokenKind::Tag(tag) => tag.kind.is_standalone(),
                kind => kind.is_blank_text(),
            })
    }

    /// Handle `{{=<% %>=}}`. `i` is the last char of the opening
    /// delimiter. Returns the index of the last char of the tag.
    fn change_delimiters(&mut self, i: usize) -> Option<usize> {
        let close: Vec<char> = std::iter::once('=')
            .chain(self.ctag.iter().copied())
            .collect();
        let content_start = i + 2;
        let close_index = (content_start..self.chars.len())
            .find(|&k| starts_at(&self.chars, &close, k));

        let Some(close_index) = close_index else {
            self.delimiter_error(i, "unterminated delimiter change");
            return None;
        };

        let content: String = self.chars[content_start..close_index].iter().collect();
        let Some((otag, ctag)) = split_delimiters(&content) else {
            self.delimiter_error(i, format!("invalid delimiters: {:?}", content.trim()));
            return None;
        };

        self.otag = otag;
        self.ctag = ctag;
        Some(close_index + close.len() - 1)
    }

    fn delimiter_error(&mut self, i: usize, message: impl Into<String>) {
        let span = self.source_file.span(self.tag_start, i + 2);
        let source_line = self
            .source_file
            .line(span.start_line)
            .unwrap_or("")
            .to_string();
        let err = TemplateError::new(
            &self.source_file.name,
            ErrorCode::INVALID_DELIMITERS,
            message,
            span,
            source_line,
        )
        .with_suggestion("Write delimiter changes as {{=<open> <close>=}}");
        self.errors.push(err);
    }

}

// ─────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────

fn starts_at(chars: &[char], tag: &[char], i: usize) -> bool {
    chars.get(i..i + tag.len()) == Some(tag)
}

fn utf16_len(chars: &[char]) -> usize {
    chars.iter().map(|c| c.len_utf16()).sum()
}

/// `"<% %>"` → (`<%`, `%>`). The first and last whitespace-separated
/// words win.
fn split_delimiters(delimiters: &str) -> Option<(Vec<char>, Vec<char>)> {
    let parts: Vec<&str> = delimiters.split_whitespace().collect();
    let otag = parts.first()?;
    let ctag = parts.last()?;
    Some((otag.chars().collect(), ctag.chars().collect()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_delimiters() {
        let (o, c) = split_delimiters("<% %>").unwrap();
        assert_eq!(o, vec!['<', '%']);
        assert_eq!(c, vec!['%', '>']);
        assert!(split_delimiters("   ").is_none());
    }

    #[test]
    fn test_starts_at() {
        let chars: Vec<char> = "ab{{c".chars().collect();
        assert!(starts_at(&chars, &['{', '{'], 2));
        assert!(!starts_at(&chars, &['{', '{'], 4));
    }
}
