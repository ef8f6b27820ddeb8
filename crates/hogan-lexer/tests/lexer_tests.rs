//! Scanner tests: tag kinds, standalone lines, delimiter changes,
//! offsets, partial indentation and scanner errors.

use hogan_lexer::{LexResult, Lexer, TagKind, TagToken, TokenKind};
use hogan_types::{ErrorCode, SourceFile};

// ─────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────

fn lex(source: &str) -> LexResult {
    let sf = SourceFile::new("test.mustache", source);
    Lexer::new(&sf).lex()
}

fn lex_with(source: &str, delimiters: &str) -> LexResult {
    let sf = SourceFile::new("test.mustache", source);
    Lexer::with_delimiters(&sf, delimiters).lex()
}

/// Token kinds, asserting the scan succeeded.
fn kinds(source: &str) -> Vec<TokenKind> {
    let result = lex(source);
    assert!(!result.has_errors(), "unexpected errors: {:?}", result.errors);
    result.tokens.into_iter().map(|t| t.kind).collect()
}

fn tags(source: &str) -> Vec<TagToken> {
    lex(source)
        .tokens
        .iter()
        .filter_map(|t| t.as_tag().cloned())
        .collect()
}

fn text(s: &str) -> TokenKind {
    TokenKind::Text(s.to_string())
}

/// Render tokens back to a compact form for readable assertions.
fn shape(source: &str) -> Vec<String> {
    kinds(source).iter().map(|k| k.to_string()).collect()
}

// ─────────────────────────────────────────────────────────────────────
// Tags
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_plain_text() {
    assert_eq!(kinds("hello world"), vec![text("hello world")]);
}

#[test]
fn test_empty_source() {
    assert!(kinds("").is_empty());
}

#[test]
fn test_every_tag_kind() {
    let cases = [
        ("{{name}}", TagKind::Variable),
        ("{{#name}}", TagKind::Section),
        ("{{^name}}", TagKind::Inverted),
        ("{{/name}}", TagKind::Close),
        ("{{!name}}", TagKind::Comment),
        ("{{>name}}", TagKind::Partial),
        ("{{&name}}", TagKind::Ampersand),
        ("{{{name}}}", TagKind::TripleStache),
        ("{{<name}}", TagKind::Parent),
        ("{{$name}}", TagKind::Block),
    ];
    for (source, expected) in cases {
        let found = tags(source);
        assert_eq!(found.len(), 1, "{source}");
        assert_eq!(found[0].kind, expected, "{source}");
        assert_eq!(found[0].name, "name", "{source}");
    }
}

#[test]
fn test_tag_names_are_trimmed() {
    let found = tags("{{  spaced  }}{{# open }}{{/ open }}");
    let names: Vec<_> = found.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["spaced", "open", "open"]);
}

#[test]
fn test_text_around_tags() {
    assert_eq!(
        shape("hello {{place}}!"),
        vec!["text \"hello \"", "{{place}}", "text \"!\""]
    );
}

#[test]
fn test_triple_stache_consumes_third_brace() {
    assert_eq!(shape("<{{{html}}}>"), vec!["text \"<\"", "{{{html}}", "text \">\""]);
}

#[test]
fn test_delimiters_recorded_on_tags() {
    let found = tags("{{a}}");
    assert_eq!(found[0].otag, "{{");
    assert_eq!(found[0].ctag, "}}");
}

// ─────────────────────────────────────────────────────────────────────
// Offsets
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_tag_index_past_tag() {
    let found = tags("hello {{place}}");
    assert_eq!(found[0].index, 15);
}

#[test]
fn test_section_offsets() {
    let found = tags("{{#items}}x{{/items}}");
    assert_eq!(found[0].kind, TagKind::Section);
    assert_eq!(found[0].index, 10);
    assert_eq!(found[1].kind, TagKind::Close);
    assert_eq!(found[1].index, 11);
}

#[test]
fn test_offsets_count_utf16_units() {
    // The emoji is two UTF-16 units.
    let found = tags("😀{{#a}}b{{/a}}");
    assert_eq!(found[0].index, 8);
    assert_eq!(found[1].index, 9);
}

#[test]
fn test_token_spans() {
    let result = lex("ab\n  {{name}}");
    let tag = result.tokens.iter().find(|t| t.as_tag().is_some()).unwrap();
    assert_eq!(tag.span.start_line, 2);
    assert_eq!(tag.span.start_col, 3);
    assert_eq!(tag.span.end_col, 10);
}

// ─────────────────────────────────────────────────────────────────────
// Standalone lines
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_newlines_are_tokens() {
    assert_eq!(
        kinds("a\nb\n"),
        vec![text("a"), TokenKind::Newline, text("b"), TokenKind::Newline]
    );
}

#[test]
fn test_standalone_section_lines_removed() {
    assert_eq!(
        shape("{{#a}}\nX\n{{/a}}\n"),
        vec!["{{#a}}", "text \"X\"", "newline", "{{/a}}"]
    );
}

#[test]
fn test_standalone_with_surrounding_whitespace() {
    assert_eq!(
        shape("  {{#a}}  \nX\n\t{{/a}}"),
        vec!["{{#a}}", "text \"X\"", "newline", "{{/a}}"]
    );
}

#[test]
fn test_standalone_comment_removed() {
    assert_eq!(shape("{{! note }}\nbody"), vec!["{{!note}}", "text \"body\""]);
}

#[test]
fn test_variable_line_is_not_standalone() {
    assert_eq!(
        shape("  {{name}}\n"),
        vec!["text \"  \"", "{{name}}", "newline"]
    );
}

#[test]
fn test_mixed_line_keeps_everything() {
    assert_eq!(
        shape("x {{#a}}\n"),
        vec!["text \"x \"", "{{#a}}", "newline"]
    );
}

#[test]
fn test_standalone_partial_takes_indent() {
    let result = lex("  {{> row}}\nnext");
    let kinds: Vec<_> = result.tokens.iter().map(|t| &t.kind).collect();
    assert_eq!(kinds.len(), 2);
    let TokenKind::Tag(partial) = kinds[0] else {
        panic!("expected partial, got {}", kinds[0]);
    };
    assert_eq!(partial.kind, TagKind::Partial);
    assert_eq!(partial.name, "row");
    assert_eq!(partial.indent.as_deref(), Some("  "));
    assert_eq!(*kinds[1], text("next"));
}

#[test]
fn test_inline_partial_has_no_indent() {
    let found = tags("a {{> row}}");
    assert_eq!(found[0].indent, None);
}

// ─────────────────────────────────────────────────────────────────────
// Delimiters
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_set_delimiters_inline() {
    let found = tags("{{=<% %>=}}<%name%> {{literal}}");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "name");
    assert_eq!(found[0].otag, "<%");
    assert_eq!(found[0].ctag, "%>");
    assert_eq!(
        shape("{{=<% %>=}}<%name%> {{literal}}"),
        vec!["<%name%>", "text \" {{literal}}\""]
    );
}

#[test]
fn test_delimiter_change_line_is_standalone() {
    assert_eq!(shape("{{=| |=}}\n|a|"), vec!["|a|"]);
}

#[test]
fn test_initial_delimiters() {
    let result = lex_with("<%#list%><%.%><%/list%>", "<% %>");
    assert!(!result.has_errors());
    let names: Vec<_> = result
        .tokens
        .iter()
        .filter_map(|t| t.as_tag())
        .map(|t| (t.kind, t.name.as_str()))
        .collect();
    assert_eq!(
        names,
        vec![
            (TagKind::Section, "list"),
            (TagKind::Variable, "."),
            (TagKind::Close, "list"),
        ]
    );
}

#[test]
fn test_initial_delimiters_extra_whitespace() {
    let result = lex_with("[[x]]", "  [[   ]]  ");
    let found: Vec<_> = result.tokens.iter().filter_map(|t| t.as_tag()).collect();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "x");
}

#[test]
fn test_triple_stache_with_custom_delimiters() {
    let result = lex_with("<%{html}%>", "<% %>");
    let found: Vec<_> = result.tokens.iter().filter_map(|t| t.as_tag()).collect();
    assert_eq!(found[0].kind, TagKind::TripleStache);
    assert_eq!(found[0].name, "html");
}

// ─────────────────────────────────────────────────────────────────────
// Errors and leftovers
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_invalid_initial_delimiters() {
    let result = lex_with("{{a}}", "   ");
    assert!(result.tokens.is_empty());
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].code, ErrorCode::INVALID_DELIMITERS);
    assert!(result.errors[0].suggestion.is_some());
}

#[test]
fn test_unterminated_delimiter_change() {
    let result = lex("before {{=<% %>");
    assert!(result.has_errors());
    assert_eq!(result.errors[0].code, ErrorCode::INVALID_DELIMITERS);
    assert!(result.errors[0].message.contains("unterminated"));
}

#[test]
fn test_empty_delimiter_change() {
    let result = lex("{{= =}}");
    assert!(result.has_errors());
    assert!(result.errors[0].message.contains("invalid delimiters"));
}

#[test]
fn test_unterminated_tag_kept_as_text() {
    assert_eq!(kinds("a {{b"), vec![text("a "), text("b")]);
}

#[test]
fn test_lone_closing_delimiter_is_text() {
    assert_eq!(kinds("a }} b"), vec![text("a }} b")]);
}

#[test]
fn test_deterministic() {
    let source = "{{#a}}\n  {{> p}}\n{{/a}}{{=[ ]=}}[b]";
    let first = lex(source).tokens;
    for _ in 0..50 {
        assert_eq!(lex(source).tokens, first);
    }
}
