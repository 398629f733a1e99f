//! The generated parsers and the hand-written OData rules accept the same
//! inputs and reproduce them identically.

#![allow(clippy::unwrap_used)]

use abnf_runtime::{parse_complete, Lossless, SourceText};
use odata_codegen::odata::{
    BooleanValue, BooleanValueParser, DateValueParser, DummyStartRule, DummyStartRuleParser,
};
use odata_rules::parse_odata;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn parse_generated(text: &str) -> Result<DummyStartRule, abnf_runtime::ParseFailure> {
    parse_complete(&DummyStartRuleParser, &SourceText::new(text))
}

fn assert_agree(text: &str) {
    let typed = parse_odata(text);
    let generated = parse_generated(text);
    match (&typed, &generated) {
        (Ok(typed), Ok(generated)) => {
            assert_eq!(typed.text(), text);
            assert_eq!(generated.text(), text);
        }
        (Err(_), Err(_)) => {}
        _ => panic!("{text:?}: hand-written {typed:?}, generated {generated:?}"),
    }
}

#[test]
fn known_inputs_agree() {
    for text in [
        "http://host/People?$top=5",
        "http://host/People('a')/Name?$select=*,Id&$filter=Id in (1,2)",
        "http://host/a/b/c/",
        "http://host/People?top=x&$count=false",
        "http://host/People?$top=x",
        "OData-Isolation: snapshot",
        "OData-Version: 4.1",
        "2012-12-03T07:16",
        "2012-13-01",
        "P1Y",
        "-INF",
        "INFINITY",
        "binary'AQ=='",
        "binary'AQE'",
        "'a''b'",
        "'a%27b'",
        "",
    ] {
        assert_agree(text);
    }
}

#[test]
fn start_rule_alternatives() {
    assert!(matches!(parse_generated("OData-Version: 4.01"), Ok(DummyStartRule::Header(_))));
    assert!(matches!(parse_generated("http://host/"), Ok(DummyStartRule::OdataUri(_))));
    assert!(matches!(parse_generated("true"), Ok(DummyStartRule::PrimitiveValue(_))));
}

#[test]
fn rule_fields_hold_their_text() {
    let date = parse_complete(&DateValueParser, &SourceText::new("2012-12-03")).unwrap();
    assert_eq!(date.year.text(), "2012");
    assert_eq!(date.month.text(), "12");
    assert_eq!(date.day.text(), "03");

    let boolean = parse_complete(&BooleanValueParser, &SourceText::new("TRUE")).unwrap();
    assert!(matches!(boolean, BooleanValue::True(_)));
    assert_eq!(boolean.text(), "TRUE");
}

/// Fragments that, glued together, often form valid or nearly valid input.
const FRAGMENTS: &[&str] = &[
    "http", "://", "host", ":", "80", "/", "People", "(", ")", "?", "&", "=", "$top",
    "$select", "$filter", " in ", "%20", ",", "'", "''", "%27", "x", "1", "42", ".", "-",
    "+", "e", "T", "Z", "P", "D", "2012", "12", "03", "true", "NaN", "INF", "binary",
    "AQ", "==", "OData-", "Version", "4.0",
];

proptest! {
    #[test]
    fn random_inputs_agree(parts in prop::collection::vec(prop::sample::select(FRAGMENTS), 0..10)) {
        assert_agree(&parts.concat());
    }
}
