use abnf_runtime::{parse_complete, parse_prefix, ParseFailure, SourceText};
use pretty_assertions::assert_eq;

use super::*;

fn primitive(text: &str) -> Result<PrimitiveValue, ParseFailure> {
    parse_complete(&PrimitiveValueParser, &SourceText::new(text))
}

#[test]
fn first_matching_alternative_wins() {
    let cases = [
        ("true", "Edm.Boolean"),
        ("FALSE", "Edm.Boolean"),
        ("01234567-89ab-CDEF-0123-456789abcdef", "Edm.Guid"),
        ("-P1DT2H3M4.5S", "Edm.Duration"),
        ("2012-12-03T07:16:23Z", "Edm.DateTimeOffset"),
        ("2012-12-03", "Edm.Date"),
        ("07:59:59.999", "Edm.TimeOfDay"),
        ("-1.5e+10", "Edm.Decimal"),
        ("-INF", "Edm.Decimal"),
        ("binary'T0RhdGE='", "Edm.Binary"),
        ("'it''s'", "Edm.String"),
    ];
    for (text, type_name) in cases {
        let Ok(value) = primitive(text) else {
            panic!("{text:?} should parse");
        };
        assert_eq!(value.type_name(), type_name, "{text:?}");
        assert_eq!(value.text(), text);
    }
}

#[test]
fn nan_infinity_alternatives_are_all_reachable() {
    for (text, expected) in [
        ("NaN", NanInfinity::NaN),
        ("-INF", NanInfinity::NegativeInfinity),
        ("INF", NanInfinity::Infinity),
    ] {
        assert_eq!(
            parse_complete(&NanInfinityParser, &SourceText::new(text)),
            Ok(expected)
        );
    }
    assert!(parse_complete(&NanInfinityParser, &SourceText::new("nan")).is_err());
}

#[test]
fn decimal_values() {
    let decimal = |text| parse_complete(&DecimalValueParser, &SourceText::new(text));
    let Ok(DecimalValue::Number(number)) = decimal("42") else {
        panic!("an integer");
    };
    assert!(number.sign.is_none());
    assert_eq!(number.digits, vec!['4', '2']);
    assert!(number.is_integer());

    assert_eq!(decimal("-2.5E2").map(|d| d.to_f64()), Ok(-250.0));
    assert_eq!(decimal("%2B1").map(|d| d.to_f64()), Ok(1.0));
    assert_eq!(decimal("-INF").map(|d| d.to_f64()), Ok(f64::NEG_INFINITY));
    assert!(decimal("1.").is_err());
    assert!(decimal(".5").is_err());
}

#[test]
fn sign_without_digits_keeps_input() {
    let source = SourceText::new("-x");
    let out = DecimalValueParser.parse(source.input());
    assert!(out.is_failure());
    assert_eq!(out.remainder(), source.input());
}

#[test]
fn guid_digits() {
    let Ok(PrimitiveValue::Guid(guid)) = primitive("01234567-89AB-cdef-0123-456789ABCDEF") else {
        panic!("a guid");
    };
    assert_eq!(guid.hex(), "0123456789abcdef0123456789abcdef");
    assert!(primitive("01234567-89ab-cdef-0123-456789abcde").is_err());
}

#[test]
fn durations() {
    let duration = |text| parse_complete(&DurationValueParser, &SourceText::new(text));
    let Ok(value) = duration("P12DT5S") else {
        panic!("days and seconds");
    };
    assert_eq!(value.days.as_ref().map(DurationPart::amount), Some(12));
    let time = value.time.as_ref();
    assert!(time.is_some_and(|time| time.hours.is_none() && time.minutes.is_none()));
    assert!(time.is_some_and(|time| time.seconds.is_some()));

    assert!(duration("p").is_ok());
    assert!(duration("PT").is_ok());
    assert!(duration("P1H").is_err());
    assert!(duration("PT1S2M").is_err());
}

#[test]
fn binary_groups() {
    let binary = |text| parse_complete(&BinaryParser, &SourceText::new(text));
    let Ok(value) = binary("binary'T0RhdGE='") else {
        panic!("padded b16 tail");
    };
    assert_eq!(value.value.quads.len(), 1);
    assert!(matches!(value.value.tail, Some(Base64Tail::B16 { pad: Some(_), .. })));

    let Ok(value) = binary("BINARY'YQ=='") else {
        panic!("padded b8 tail");
    };
    assert!(value.value.quads.is_empty());
    assert!(matches!(value.value.tail, Some(Base64Tail::B8 { .. })));

    assert!(binary("binary''").is_ok());
    assert!(binary("binary'YR=='").is_err());
}

#[test]
fn string_values() {
    let string = |text| parse_complete(&StringValueParser, &SourceText::new(text));
    let Ok(value) = string("'it''s%20ok'") else {
        panic!("escaped quote and encoded space");
    };
    assert_eq!(value.value(), "it's ok");
    assert_eq!(value.text(), "'it''s%20ok'");

    let Ok(value) = string("'caf%C3%A9'") else {
        panic!("encoded UTF-8");
    };
    assert_eq!(value.value(), "caf\u{e9}");

    assert!(string("''").is_ok());
    assert!(string("'a%27b'").is_err());
    assert!(string("'abc").is_err());
}

#[test]
fn string_stops_at_first_unescaped_quote() {
    let source = SourceText::new("'a'b'");
    let Ok((value, rest)) = parse_prefix(&StringValueParser, &source) else {
        panic!("a prefix parses");
    };
    assert_eq!(value.value(), "a");
    assert_eq!(rest, 3);
}

#[test]
fn null_is_case_sensitive() {
    let literal = |text| parse_complete(&PrimitiveLiteralParser, &SourceText::new(text));
    assert_eq!(literal("null"), Ok(PrimitiveLiteral::Null));
    assert!(literal("NULL").is_err());
    assert!(matches!(literal("1"), Ok(PrimitiveLiteral::Value(_))));
}

#[test]
fn rejection_points_at_the_deepest_failure() {
    let Err(failure) = primitive("2012-13-01") else {
        panic!("month 13");
    };
    // `1` starts a valid month; `3` is where it goes wrong
    assert_eq!(failure.offset(), 6);
}
