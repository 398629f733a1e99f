use abnf_diagnostic::emitter::ColorMode;
use abnf_diagnostic::ErrorCode;
use abnf_ir::Span;
use abnf_runtime::prelude::*;
use abnf_runtime::{parse_complete, SourceText};
use pretty_assertions::assert_eq;

use super::*;

fn fail(parser: &impl Parser, text: &str) -> ParseFailure {
    match parse_complete(parser, &SourceText::new(text)) {
        Err(failure) => failure,
        Ok(_) => panic!("{text:?} should be rejected"),
    }
}

#[test]
fn rejection_span_counts_bytes() {
    let greeting = Literal::sensitive("é").then(Literal::sensitive("x"));
    let failure = fail(&greeting, "éy");
    assert_eq!(failure.offset(), 1);

    let diagnostic = rejection("éy", &failure);
    assert_eq!(diagnostic.code, ErrorCode::E4001);
    assert_eq!(diagnostic.primary_span(), Some(Span::new(2, 3)));
}

#[test]
fn trailing_input_mentions_match() {
    let digit = CharRange::new('0', '9');
    let failure = fail(&digit, "1a");

    let diagnostic = rejection("1a", &failure);
    assert_eq!(diagnostic.code, ErrorCode::E4002);
    assert_eq!(diagnostic.primary_span(), Some(Span::new(1, 2)));
    assert_eq!(diagnostic.notes, vec!["the rule matched the first 1 character".to_string()]);
}

#[test]
fn rejection_at_end_is_empty() {
    let failure = fail(&Literal::sensitive("ab"), "");
    let diagnostic = rejection("", &failure);
    assert_eq!(diagnostic.primary_span(), Some(Span::new(0, 0)));
}

#[test]
fn report_counts_errors() {
    let mut out = Vec::new();
    let mut err = Vec::new();
    let mut streams = Streams {
        out: &mut out,
        err: &mut err,
        color: ColorMode::Never,
        is_tty: false,
    };
    let failure = fail(&Literal::sensitive("ab"), "ax");
    let failed = streams.report(SourceFile::new("<input>", "ax"), &[rejection("ax", &failure)]);
    assert!(failed);
    assert!(!streams.report(SourceFile::new("<input>", "ax"), &[]));

    let err = String::from_utf8_lossy(&err);
    assert!(err.contains("E4001"), "{err}");
    assert!(err.contains("aborting due to previous error"), "{err}");
    assert!(out.is_empty());
}

#[test]
fn outcome_exit_codes() {
    assert_eq!(Outcome::Success.exit_code(), 0);
    assert_eq!(Outcome::Failed.exit_code(), 1);
}
