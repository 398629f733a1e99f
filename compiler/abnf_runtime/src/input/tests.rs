use pretty_assertions::assert_eq;

use super::*;

#[test]
fn absent_input_is_empty() {
    let source = SourceText::from_optional(None);
    let input = source.input();
    assert!(input.at_end());
    assert_eq!(input.position(), 0);
    assert_eq!(input.current(), None);
}

#[test]
fn advance_returns_new_cursor() {
    let source = SourceText::new("abc");
    let start = source.input();
    let next = start.advance(1);
    assert_eq!(start.current(), Some('a'));
    assert_eq!(next.current(), Some('b'));
    assert_eq!(next.position(), 1);
    assert_eq!(start.position(), 0);
}

#[test]
fn advance_clamps_at_end() {
    let source = SourceText::new("ab");
    let end = source.input().advance(10);
    assert!(end.at_end());
    assert_eq!(end.position(), 2);
    assert_eq!(end.advance(usize::MAX).position(), 2);
}

#[test]
fn equality_needs_same_buffer_and_position() {
    let a = SourceText::new("xyz");
    let b = SourceText::new("xyz");
    assert_eq!(a.input().advance(1), a.input().advance(1));
    assert_ne!(a.input(), a.input().advance(1));
    assert_ne!(a.input(), b.input());
}

#[test]
fn peek_and_remaining() {
    let source = SourceText::new("hello");
    let input = source.input().advance(1);
    assert_eq!(input.peek(0), Some('e'));
    assert_eq!(input.peek(3), Some('o'));
    assert_eq!(input.peek(4), None);
    assert_eq!(input.remaining(), &['e', 'l', 'l', 'o']);
}

#[test]
fn consumed_text_and_span() {
    let source = SourceText::new("2024-01-31");
    let start = source.input().advance(5);
    let end = start.advance(2);
    assert_eq!(end.text_since(start), "01");
    assert_eq!(end.span_from(start), Span::new(5, 7));
    // a start ahead of the cursor consumes nothing
    assert_eq!(start.text_since(end), "");
}

#[test]
fn match_str_respects_case() {
    let source = SourceText::new("TRUE)");
    let input = source.input();
    assert_eq!(input.match_str("true", Case::Insensitive), Some(4));
    assert_eq!(input.match_str("true", Case::Sensitive), None);
    assert_eq!(input.match_str("TRUE)!", Case::Sensitive), None);
    assert!(input.starts_with("", Case::Sensitive));
}

#[test]
fn positions_count_characters_not_bytes() {
    let source = SourceText::new("é'x'");
    let input = source.input().advance(1);
    assert_eq!(input.current(), Some('\''));
    assert_eq!(source.len(), 4);
    assert_eq!(source.slice(Span::new(1, 3)), "'x");
}

#[test]
fn debug_shows_position_and_preview() {
    let source = SourceText::new("abc");
    assert_eq!(format!("{:?}", source.input().advance(1)), "Input@1(\"bc\")");
}

#[test]
fn case_insensitivity_is_ascii_only() {
    assert!(Case::Insensitive.matches('a', 'A'));
    assert!(!Case::Insensitive.matches('é', 'É'));
    assert!(!Case::Sensitive.matches('a', 'A'));
}
