use abnf_ir::Span;
use pretty_assertions::assert_eq;

use super::*;

fn source() -> LineIndex {
    LineIndex::new("a = b\nc = d\ne = f\n")
}

fn err(code: ErrorCode, start: u32, msg: &str) -> Diagnostic {
    Diagnostic::error(code)
        .with_message(msg)
        .with_label(Span::new(start, start + 1), "here")
}

#[test]
fn flush_sorts_by_position() {
    let index = source();
    let mut queue = DiagnosticQueue::with_config(DiagnosticConfig::unlimited());
    queue.add(err(ErrorCode::E2003, 12, "third"), &index);
    queue.add(err(ErrorCode::E2003, 0, "first"), &index);
    queue.add(err(ErrorCode::E2003, 6, "second"), &index);

    let messages: Vec<_> = queue.flush().into_iter().map(|d| d.message).collect();
    assert_eq!(messages, vec!["first", "second", "third"]);
    assert!(queue.is_empty());
}

#[test]
fn same_position_keeps_insertion_order() {
    let index = source();
    let mut queue = DiagnosticQueue::with_config(DiagnosticConfig::unlimited());
    queue.add(err(ErrorCode::E3002, 4, "b"), &index);
    queue.add(err(ErrorCode::E3001, 4, "a"), &index);

    let messages: Vec<_> = queue.flush().into_iter().map(|d| d.message).collect();
    assert_eq!(messages, vec!["b", "a"]);
}

#[test]
fn duplicates_are_dropped() {
    let index = source();
    let mut queue = DiagnosticQueue::new();
    assert!(queue.add(err(ErrorCode::E2003, 4, "undefined"), &index));
    assert!(!queue.add(err(ErrorCode::E2003, 4, "undefined"), &index));
    assert!(queue.add(err(ErrorCode::E2003, 6, "undefined"), &index));
    assert_eq!(queue.error_count(), 2);
}

#[test]
fn error_limit_stops_errors_but_not_warnings() {
    let index = source();
    let mut queue = DiagnosticQueue::with_config(DiagnosticConfig {
        error_limit: 1,
        ..DiagnosticConfig::default()
    });
    assert!(queue.add(err(ErrorCode::E2003, 0, "one"), &index));
    assert!(queue.limit_reached());
    assert!(!queue.add(err(ErrorCode::E2003, 6, "two"), &index));

    let warning = Diagnostic::warning(ErrorCode::W3006)
        .with_message("unused")
        .with_label(Span::new(12, 13), "here");
    assert!(queue.add(warning, &index));
    assert_eq!(queue.warning_count(), 1);
}

#[test]
fn suppress_warnings_filters_warnings() {
    let index = source();
    let mut queue = DiagnosticQueue::with_config(DiagnosticConfig {
        suppress_warnings: true,
        ..DiagnosticConfig::default()
    });
    let warning = Diagnostic::warning(ErrorCode::W3008).with_message("nullable");
    assert!(!queue.add(warning, &index));
    assert!(!queue.has_errors());
}

#[test]
fn diagnostics_without_span_sort_first() {
    let index = source();
    let mut queue = DiagnosticQueue::new();
    queue.add(err(ErrorCode::E2003, 6, "spanned"), &index);
    queue.add(
        Diagnostic::error(ErrorCode::E2004).with_message("no start rule"),
        &index,
    );
    let messages: Vec<_> = queue.flush().into_iter().map(|d| d.message).collect();
    assert_eq!(messages, vec!["no start rule", "spanned"]);
}
