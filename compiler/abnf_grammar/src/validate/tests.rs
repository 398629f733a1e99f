use pretty_assertions::assert_eq;

use super::*;
use crate::{parse_grammar, GrammarOptions, GrammarParse};

fn load(source: &str) -> GrammarParse {
    parse_grammar(source, &GrammarOptions::default())
}

fn codes(source: &str) -> Vec<ErrorCode> {
    load(source).diagnostics.iter().map(|d| d.code).collect()
}

fn nullable_names(source: &str) -> Vec<String> {
    let parsed = load(source);
    let nullable = nullable_rules(&parsed.grammar);
    parsed
        .grammar
        .iter()
        .filter(|rule| nullable[rule.id.index()])
        .map(|rule| rule.name.clone())
        .collect()
}

// === Nullability ===

#[test]
fn nullable_shapes() {
    let source = "\
top = a b c d e f
a = [\"x\"]
b = *\"x\"
c = \"\"
d = a b
e = \"x\" / a
f = 1*\"x\"
";
    assert_eq!(nullable_names(source), vec!["a", "b", "c", "d", "e"]);
}

#[test]
fn nullability_reaches_a_fixed_point_through_recursion() {
    // `list` is only known to be nullable after `item` is
    let source = "list = item *(\",\" item)\nitem = [\"x\"] / list \"y\"";
    assert_eq!(nullable_names(source), vec!["list", "item"]);
}

// === Left recursion ===

#[test]
fn direct_left_recursion() {
    let parsed = load("sum = sum \"+\" term / term\nterm = DIGIT");
    let codes: Vec<ErrorCode> = parsed.diagnostics.iter().map(|d| d.code).collect();
    assert_eq!(codes, vec![ErrorCode::E3001]);
    assert_eq!(parsed.diagnostics[0].message, "rule `sum` is left-recursive");
    assert_eq!(parsed.diagnostics[0].notes, vec!["`sum` -> `sum` can be followed without consuming input".to_string()]);
}

#[test]
fn indirect_left_recursion_names_the_cycle() {
    let parsed = load("a = b \"x\"\nb = c / \"y\"\nc = a \"z\"");
    assert_eq!(parsed.diagnostics.len(), 1);
    assert_eq!(
        parsed.diagnostics[0].notes,
        vec!["`a` -> `b` -> `c` -> `a` can be followed without consuming input".to_string()]
    );
}

#[test]
fn left_recursion_through_nullable_prefix() {
    assert_eq!(
        codes("expr = [sign] expr \"!\" / \"1\"\nsign = \"-\""),
        vec![ErrorCode::E3001]
    );
}

#[test]
fn right_recursion_is_fine() {
    let parsed = load("list = item [\",\" list]\nitem = ALPHA");
    assert!(parsed.diagnostics.is_empty(), "{:?}", parsed.diagnostics);
}

#[test]
fn recursion_after_consuming_input_is_fine() {
    let parsed = load("group = \"(\" [group] \")\"");
    assert!(parsed.diagnostics.is_empty(), "{:?}", parsed.diagnostics);
    let nullable = nullable_rules(&parsed.grammar);
    assert!(left_recursive_cycles(&parsed.grammar, &nullable).is_empty());
}

// === Element checks ===

#[test]
fn inverted_repetition_bounds() {
    assert_eq!(codes("a = 3*2\"x\""), vec![ErrorCode::E3002]);
}

#[test]
fn empty_numeric_range() {
    assert_eq!(codes("a = %x39-30"), vec![ErrorCode::E3003]);
}

#[test]
fn numeric_value_outside_unicode() {
    assert_eq!(codes("a = %xD800"), vec![ErrorCode::E3004]);
    assert_eq!(codes("a = %x41-110000"), vec![ErrorCode::E3004]);
    // a range may span the surrogates as long as its ends are characters
    assert!(codes("a = %x0-10FFFF").is_empty());
}

#[test]
fn prose_cannot_be_compiled() {
    assert_eq!(codes("a = <any octet>"), vec![ErrorCode::E3005]);
}

#[test]
fn repetition_of_nullable_element() {
    assert_eq!(codes("a = *([\"x\"])"), vec![ErrorCode::W3008]);
    // at most one match cannot loop
    assert!(codes("a = *1([\"x\"]) \"y\"").is_empty());
}

// === Shadowing ===

#[test]
fn shorter_literal_first_shadows_longer() {
    let parsed = load("nanInfinity = \"NaN\" / \"INF\" / \"-INF\" / \"INFINITY\"");
    assert_eq!(parsed.diagnostics.len(), 1);
    let warning = &parsed.diagnostics[0];
    assert_eq!(warning.code, ErrorCode::W3007);
    assert!(warning.is_warning());
    assert_eq!(warning.message, "alternative `\"INFINITY\"` can never match");
}

#[test]
fn longest_first_ordering_is_clean() {
    assert!(codes("nanInfinity = \"NaN\" / \"-INF\" / \"INFINITY\" / \"INF\"").is_empty());
}

#[test]
fn literal_prefix_of_a_sequence_is_shadowed() {
    assert_eq!(
        codes("a = \"x\" / \"x\" DIGIT\n"),
        vec![ErrorCode::W3007]
    );
}

#[test]
fn huge_exact_repetition_is_not_expanded() {
    assert!(codes("r = 100000(100000\"a\") / \"b\"\n").is_empty());
}

#[test]
fn case_sensitive_literal_does_not_shadow_insensitive() {
    assert!(codes("b = 'true' / \"TRUE\"").is_empty());
    assert_eq!(codes("b = \"true\" / 'TRUE'"), vec![ErrorCode::W3007]);
}

#[test]
fn alternative_after_nullable_one_is_never_tried() {
    assert_eq!(
        codes("a = [\"x\"] / \"y\" / \"z\"\n"),
        vec![ErrorCode::W3007]
    );
}

// === Reachability ===

#[test]
fn unreachable_rule_is_a_warning() {
    let parsed = load("top = used\nused = \"u\"\nunused = \"n\"");
    assert_eq!(parsed.diagnostics.len(), 1);
    assert_eq!(parsed.diagnostics[0].code, ErrorCode::W3006);
    assert!(!parsed.has_errors());
}

#[test]
fn start_rule_decides_reachability() {
    let options = GrammarOptions {
        start: Some("used".to_string()),
        ..GrammarOptions::default()
    };
    let parsed = parse_grammar("top = used\nused = \"u\"", &options);
    let codes: Vec<ErrorCode> = parsed.diagnostics.iter().map(|d| d.code).collect();
    assert_eq!(codes, vec![ErrorCode::W3006]);
}

#[test]
fn core_rules_are_not_reported() {
    // HEXDIG pulls in DIGIT; neither is unreachable or shadowed
    assert!(codes("hex = 2HEXDIG").is_empty());
}
