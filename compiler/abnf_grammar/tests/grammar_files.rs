//! Whole grammar files through the front end.

#![allow(clippy::unwrap_used)]

use abnf_diagnostic::ErrorCode;
use abnf_grammar::{load_grammar, parse_grammar, GrammarOptions, LoadError, CORE_GRAMMAR};
use pretty_assertions::assert_eq;

const ODATA: &str = include_str!("../../../grammars/odata-literals.abnf");

#[test]
fn odata_grammar_loads_cleanly() {
    let loaded = load_grammar(ODATA, &GrammarOptions::default()).unwrap();
    assert!(loaded.warnings.is_empty(), "{:#?}", loaded.warnings);
    assert_eq!(loaded.grammar[loaded.start].name, "dummyStartRule");

    let core: Vec<&str> = loaded
        .grammar
        .iter()
        .filter(|rule| rule.is_core())
        .map(|rule| rule.name.as_str())
        .collect();
    assert_eq!(core, vec!["ALPHA", "DIGIT", "HEXDIG", "HTAB", "SP"]);
}

#[test]
fn odata_nan_infinity_keeps_longest_first_order() {
    let loaded = load_grammar(ODATA, &GrammarOptions::default()).unwrap();
    let rule = loaded.grammar.get("nanInfinity").unwrap();
    assert_eq!(rule.definition.to_string(), "%s\"NaN\" / %s\"-INF\" / %s\"INF\"");
}

#[test]
fn core_grammar_is_a_valid_grammar() {
    let parsed = parse_grammar(
        CORE_GRAMMAR,
        &GrammarOptions {
            start: Some("LWSP".to_string()),
            ..GrammarOptions::default()
        },
    );
    assert!(!parsed.has_errors(), "{:#?}", parsed.diagnostics);
}

#[test]
fn every_broken_rule_is_reported() {
    let source = "\
good   = \"ok\" bad-ref
broken = ( \"x\"
twice  = \"1\"
twice  = \"2\"
odd    = %q41
";
    let parsed = parse_grammar(source, &GrammarOptions::default());
    let mut codes: Vec<ErrorCode> = parsed.diagnostics.iter().map(|d| d.code).collect();
    codes.sort();
    assert_eq!(
        codes,
        vec![
            ErrorCode::E0003,
            // the malformed value leaves `odd` without a body
            ErrorCode::E1002,
            ErrorCode::E1003,
            ErrorCode::E2001,
            ErrorCode::E2003,
        ]
    );
}

#[test]
fn unknown_start_rule() {
    let options = GrammarOptions {
        start: Some("primitivValue".to_string()),
        ..GrammarOptions::default()
    };
    let err = load_grammar(ODATA, &options).unwrap_err();
    let LoadError::Invalid { diagnostics, count } = err else {
        panic!("expected diagnostics, got {err:?}");
    };
    assert_eq!(count, 1);
    assert_eq!(diagnostics[0].code, ErrorCode::E2004);
    assert_eq!(diagnostics[0].suggestions, vec!["did you mean `primitiveValue`?".to_string()]);
}

#[test]
fn empty_grammar() {
    let err = load_grammar("; nothing\n", &GrammarOptions::default()).unwrap_err();
    assert!(matches!(err, LoadError::Empty));
    assert_eq!(err.to_string(), "grammar defines no rules");
}

#[test]
fn without_core_rules_references_are_undefined() {
    let options = GrammarOptions {
        core_rules: false,
        ..GrammarOptions::default()
    };
    let parsed = parse_grammar("digits = 1*DIGIT", &options);
    assert!(parsed.has_errors());
    assert_eq!(parsed.diagnostics[0].code, ErrorCode::E2003);
}

#[test]
fn deeply_nested_grammar_is_analysed() {
    let depth = 5_000;
    let source = format!("a = {}\"x\"{}", "(".repeat(depth), ")".repeat(depth));
    let parsed = parse_grammar(&source, &GrammarOptions::default());
    assert!(parsed.diagnostics.is_empty());
}
