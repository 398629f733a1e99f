//! Combinator behavior on real OData rules.

use abnf_runtime::{parse_complete, ParseOutput, Parser, ParserExt, SourceText};
use odata_rules::chars::{AlphaParser, DIGIT};
use odata_rules::literals::{NanInfinity, NanInfinityParser};
use odata_rules::punctuation::{Sign, SignParser};
use odata_rules::uri::ListItemParser;
use odata_rules::{parse_odata, DummyStartRule};
use pretty_assertions::assert_eq;

#[test]
fn literal_alternation_stops_before_the_digit() {
    let source = SourceText::new("-5");
    let ParseOutput::Success {
        parsed, remainder, ..
    } = SignParser.parse(source.input())
    else {
        panic!("`-` is a sign");
    };
    assert_eq!(parsed, Sign::Minus);
    assert_eq!(remainder.position(), 1);
    assert_eq!(remainder.current(), Some('5'));
}

#[test]
fn optional_sign_then_digits() {
    let number = SignParser.optional().then(DIGIT.repeat(1, None));
    let source = SourceText::new("42");
    let Ok((sign, digits)) = parse_complete(&number, &source) else {
        panic!("digits without a sign");
    };
    assert_eq!(sign, None);
    assert_eq!(digits, vec!['4', '2']);
}

#[test]
fn exact_repetition_needs_every_match() {
    let pair = AlphaParser.repeat(2, Some(2));
    let source = SourceText::new("ab");
    assert_eq!(parse_complete(&pair, &source), Ok(vec!['a', 'b']));

    let short = SourceText::new("a");
    let out = pair.parse(short.input());
    assert!(out.is_failure());
    assert_eq!(out.remainder(), short.input());
}

#[test]
fn longer_literal_is_reachable() {
    let source = SourceText::new("-INF");
    assert_eq!(
        parse_complete(&NanInfinityParser, &source),
        Ok(NanInfinity::NegativeInfinity)
    );
}

#[test]
fn empty_list_tail_consumes_nothing() {
    let source = SourceText::new(")");
    let out = ListItemParser.many().parse(source.input());
    assert_eq!(out.parsed().map(Vec::len), Some(0));
    assert_eq!(out.remainder(), source.input());
}

#[test]
fn start_rule_alternatives() {
    let cases = [
        ("http://host/People?$top=1", "odataUri"),
        ("OData-Version: 4.0", "header"),
        ("2012-12-03", "primitiveValue"),
        ("'text'", "primitiveValue"),
    ];
    for (text, kind) in cases {
        match parse_odata(text) {
            Ok(parsed) => assert_eq!(parsed.kind(), kind, "{text:?}"),
            Err(failure) => panic!("{text:?}: {failure}"),
        }
    }
    assert!(matches!(
        parse_odata("true"),
        Ok(DummyStartRule::Value(_))
    ));
}

#[test]
fn rejections_report_an_offset() {
    for (text, offset) in [("", 0), ("http://", 7), ("2012-12-03T", 11)] {
        let Err(failure) = parse_odata(text) else {
            panic!("{text:?} should be rejected");
        };
        assert_eq!(failure.offset(), offset, "{text:?}: {failure}");
    }
}
