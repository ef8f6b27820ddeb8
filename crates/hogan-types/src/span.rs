use serde::{Deserialize, Serialize};
use std::fmt;

/// A region of template text, 1-based and inclusive at both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    #[serde(rename = "line")]
    pub start_line: u32,
    #[serde(rename = "column")]
    pub start_col: u32,
    pub end_line: u32,
    #[serde(rename = "end_column")]
    pub end_col: u32,
}

impl Span {
    pub fn new(start_line: u32, start_col: u32, end_line: u32, end_col: u32) -> Self {
        Self {
            start_line,
            start_col,
            end_line,
            end_col,
        }
    }

    /// Zero-width span, used for errors that have no better location.
    pub fn point(line: u32, col: u32) -> Self {
        Self::new(line, col, line, col)
    }

    /// Smallest span covering both, e.g. a section's open and close tags.
    pub fn to(self, other: Span) -> Span {
        let (start_line, start_col) =
            (self.start_line, self.start_col).min((other.start_line, other.start_col));
        let (end_line, end_col) = (self.end_line, self.end_col).max((other.end_line, other.end_col));
        Span::new(start_line, start_col, end_line, end_col)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.start_line, self.start_col)
    }
}

/// Where one char of a template sits, in every unit the compiler needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharPos {
    /// Byte offset into the UTF-8 text.
    pub byte: usize,
    /// Offset in UTF-16 code units, as JavaScript string indices count.
    pub utf16: usize,
    pub line: u32,
    pub col: u32,
}

/// A named template's text, indexed by char.
///
/// Scanning works on char indices; spans, section offsets and error
/// source lines are all read from the same index.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub name: String,
    pub source: String,
    chars: Vec<char>,
    /// One entry per char plus one for the end of input.
    index: Vec<CharPos>,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        let source = source.into();
        let mut chars = Vec::with_capacity(source.len());
        let mut index = Vec::with_capacity(source.len() + 1);
        let mut pos = CharPos {
            byte: 0,
            utf16: 0,
            line: 1,
            col: 1,
        };

        for ch in source.chars() {
            chars.push(ch);
            index.push(pos);
            pos.byte += ch.len_utf8();
            pos.utf16 += ch.len_utf16();
            if ch == '\n' {
                pos.line += 1;
                pos.col = 1;
            } else {
                pos.col += 1;
            }
        }
        index.push(pos);

        Self {
            name: name.into(),
            source,
            chars,
            index,
        }
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    /// Position of char `i`; indices past the end clamp to end of input.
    pub fn pos(&self, i: usize) -> CharPos {
        self.index[i.min(self.chars.len())]
    }

    /// Span over chars `start..end` (end exclusive). An empty range
    /// covers the char at `start`.
    pub fn span(&self, start: usize, end: usize) -> Span {
        let first = self.pos(start);
        let last = self.pos(end.saturating_sub(1).max(start));
        Span::new(first.line, first.col, last.line, last.col)
    }

    /// Text of a 1-based line, without its line break.
    pub fn line(&self, line_number: u32) -> Option<&str> {
        let start = self.index.partition_point(|p| p.line < line_number);
        if self.index.get(start)?.line != line_number {
            return None;
        }
        // The line's last entry is its '\n', or the end of input.
        let end = self.index.partition_point(|p| p.line <= line_number) - 1;
        let text = &self.source[self.index[start].byte..self.index[end].byte];
        Some(text.trim_end_matches('\r'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_to_across_lines() {
        let open = Span::new(1, 1, 1, 10);
        let close = Span::new(3, 1, 3, 10);
        assert_eq!(open.to(close), Span::new(1, 1, 3, 10));
        assert_eq!(close.to(open), Span::new(1, 1, 3, 10));
    }

    #[test]
    fn test_span_to_same_line() {
        let merged = Span::new(1, 5, 1, 10).to(Span::new(1, 3, 1, 8));
        assert_eq!(merged, Span::new(1, 3, 1, 10));
    }

    #[test]
    fn test_span_display() {
        assert_eq!(Span::new(3, 7, 3, 15).to_string(), "3:7");
    }

    #[test]
    fn test_index_counts_utf16_units() {
        let src = SourceFile::new("t", "a😀\nb");
        assert_eq!(src.chars().len(), 4);
        let utf16: Vec<usize> = (0..=4).map(|i| src.pos(i).utf16).collect();
        assert_eq!(utf16, vec![0, 1, 3, 4, 5]);
        assert_eq!(src.pos(3).byte, 6);
        assert_eq!((src.pos(3).line, src.pos(3).col), (2, 1));
        assert_eq!(src.pos(99), src.pos(4));
    }

    #[test]
    fn test_span_over_chars() {
        let src = SourceFile::new("t", "ab\n{{x}}");
        assert_eq!(src.span(3, 8), Span::new(2, 1, 2, 5));
        assert_eq!(src.span(2, 2), Span::point(1, 3));
    }

    #[test]
    fn test_source_file_line_extraction() {
        let src = SourceFile::new("list.mustache", "<ul>\n{{#items}}\n</ul>");
        assert_eq!(src.line(1), Some("<ul>"));
        assert_eq!(src.line(2), Some("{{#items}}"));
        assert_eq!(src.line(3), Some("</ul>"));
        assert_eq!(src.line(0), None);
        assert_eq!(src.line(4), None);
    }

    #[test]
    fn test_source_file_crlf_and_multibyte() {
        let src = SourceFile::new("crlf.mustache", "ö one\r\ntwo\r\n");
        assert_eq!(src.line(1), Some("ö one"));
        assert_eq!(src.line(2), Some("two"));
        assert_eq!(src.line(3), Some(""));
    }

    #[test]
    fn test_source_file_empty() {
        let src = SourceFile::new("empty.mustache", "");
        assert!(src.chars().is_empty());
        assert_eq!(src.line(1), Some(""));
        assert_eq!(src.span(0, 0), Span::point(1, 1));
    }
}
