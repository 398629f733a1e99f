use pretty_assertions::assert_eq;

use crate::{CharRange, Expectation, Input, Lexeme, Literal, ParseOutput, SourceText};

#[derive(Debug, PartialEq)]
struct Time {
    hour: (char, char),
    colon: Lexeme,
    minute: (char, char),
}

fn two_digits(input: Input<'_>) -> ParseOutput<'_, (char, char)> {
    seq!(input;
        a = CharRange::new('0', '9'),
        b = CharRange::new('0', '9'),
        => (a, b)
    )
}

fn time(input: Input<'_>) -> ParseOutput<'_, Time> {
    seq!(input;
        hour = crate::from_fn(two_digits),
        colon = Literal::sensitive(":"),
        minute = crate::from_fn(two_digits),
        => Time { hour, colon, minute }
    )
}

#[derive(Debug, PartialEq)]
enum Sign {
    Plus,
    EncodedPlus(Lexeme),
    Minus,
}

fn sign(input: Input<'_>) -> ParseOutput<'_, Sign> {
    one_of!(input;
        Literal::sensitive("+") => |_| Sign::Plus,
        Literal::insensitive("%2B") => Sign::EncodedPlus,
        Literal::sensitive("-") => |_| Sign::Minus,
    )
}

#[test]
fn seq_builds_node() {
    let source = SourceText::new("12:30Z");
    let out = time(source.input());
    let parsed = out.parsed();
    assert_eq!(parsed.map(|t| t.hour), Some(('1', '2')));
    assert_eq!(parsed.map(|t| t.colon.text()), Some(":"));
    assert_eq!(parsed.map(|t| t.minute), Some(('3', '0')));
    assert_eq!(out.remainder().current(), Some('Z'));
}

#[test]
fn seq_failure_returns_original_input() {
    let source = SourceText::new("12-30");
    let start = source.input().advance(0);
    let out = time(start);
    assert!(out.is_failure());
    assert_eq!(out.remainder(), start);
    assert_eq!(out.furthest().position(), 2);
    assert_eq!(out.furthest().expected(), &[Expectation::Literal(":".into())]);
}

#[test]
fn seq_failure_mid_input() {
    let source = SourceText::new("x1a");
    let at_one = source.input().advance(1);
    let out = two_digits(at_one);
    assert!(out.is_failure());
    assert_eq!(out.remainder().position(), 1);
    assert_eq!(out.furthest().position(), 2);
}

#[test]
fn one_of_first_success_wins() {
    let source = SourceText::new("-1");
    assert_eq!(sign(source.input()).into_parsed(), Some(Sign::Minus));

    let source = SourceText::new("%2b1");
    let out = sign(source.input());
    assert_eq!(out.remainder().position(), 3);
    assert!(matches!(out.into_parsed(), Some(Sign::EncodedPlus(l)) if l.text() == "%2b"));
}

#[test]
fn one_of_failure_merges_alternatives() {
    let source = SourceText::new("5");
    let out = sign(source.input());
    assert!(out.is_failure());
    assert_eq!(out.remainder(), source.input());
    assert_eq!(
        out.furthest().expected(),
        &[
            Expectation::Literal("+".into()),
            Expectation::Literal("%2B".into()),
            Expectation::Literal("-".into()),
        ]
    );
}

#[test]
fn one_of_earlier_prefix_shadows_later() {
    fn word(input: Input<'_>) -> ParseOutput<'_, &'static str> {
        one_of!(input;
            Literal::sensitive("INF") => |_| "INF",
            Literal::sensitive("INFINITY") => |_| "INFINITY",
        )
    }
    let source = SourceText::new("INFINITY");
    let out = word(source.input());
    assert_eq!(out.parsed(), Some(&"INF"));
    assert_eq!(out.remainder().position(), 3);
}
