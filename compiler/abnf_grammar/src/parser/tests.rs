use pretty_assertions::assert_eq;

use super::*;
use crate::ast::Bounds;
use crate::lexer::lex;

fn syntax(source: &str) -> SyntaxOutput {
    let lexed = lex(source);
    assert!(lexed.diagnostics.is_empty(), "{:?}", lexed.diagnostics);
    parse(&lexed.tokens)
}

/// Rule definitions printed back, one per line.
fn printed(source: &str) -> Vec<String> {
    let out = syntax(source);
    assert!(out.diagnostics.is_empty(), "{:?}", out.diagnostics);
    out.definitions
        .iter()
        .map(|d| {
            let op = match d.kind {
                DefinitionKind::Basic => "=",
                DefinitionKind::Incremental => "=/",
            };
            format!("{} {op} {}", d.name, d.body)
        })
        .collect()
}

fn error_codes(source: &str) -> Vec<ErrorCode> {
    syntax(source).diagnostics.iter().map(|d| d.code).collect()
}

// === Well-formed grammars ===

#[test]
fn alternation_and_concatenation() {
    assert_eq!(
        printed("SIGN = \"+\" / \"%2B\" / \"-\" / \"%2D\"\nint = [SIGN] 1*DIGIT"),
        vec![
            "SIGN = \"+\" / \"%2B\" / \"-\" / \"%2D\"",
            "int = [SIGN] 1*DIGIT",
        ]
    );
}

#[test]
fn groups_are_kept() {
    assert_eq!(
        printed("listExpr = OPEN BWS item BWS *( COMMA BWS item BWS ) CLOSE"),
        vec!["listExpr = OPEN BWS item BWS *(COMMA BWS item BWS) CLOSE"]
    );
}

#[test]
fn continuation_lines_extend_the_rule() {
    assert_eq!(
        printed("dateValue = year \"-\" month\n            \"-\" day\nday = 2DIGIT"),
        vec!["dateValue = year \"-\" month \"-\" day", "day = 2DIGIT"]
    );
}

#[test]
fn comments_are_ignored() {
    assert_eq!(
        printed("; dates\nyear = 4DIGIT ; four digits\n  ; more\nmonth = 2DIGIT"),
        vec!["year = 4DIGIT", "month = 2DIGIT"]
    );
}

#[test]
fn incremental_definition() {
    let out = syntax("a = \"x\"\na =/ \"y\"");
    assert_eq!(out.definitions.len(), 2);
    assert_eq!(out.definitions[1].kind, DefinitionKind::Incremental);
}

#[test]
fn repetition_shapes() {
    let out = syntax("r = 2*4HEXDIG");
    let ElementKind::Repetition { bounds, element } = &out.definitions[0].body.kind else {
        panic!("expected repetition, got {:?}", out.definitions[0].body);
    };
    assert_eq!(*bounds, Bounds::new(2, Some(4)));
    assert_eq!(element.kind, ElementKind::RuleRef("HEXDIG".to_string()));
}

#[test]
fn numeric_values_print_canonically() {
    assert_eq!(
        printed("crlf = %x0d.0a\nlower = %d97-122"),
        vec!["crlf = %x0D.0A", "lower = %d97-122"]
    );
}

#[test]
fn nested_alternation_in_option() {
    assert_eq!(
        printed("frac = [ \".\" 1*DIGIT / \",\" 1*DIGIT ]"),
        vec!["frac = [\".\" 1*DIGIT / \",\" 1*DIGIT]"]
    );
}

#[test]
fn spans_cover_the_body() {
    let source = "a = b c";
    let out = syntax(source);
    let body = &out.definitions[0].body;
    assert_eq!(&source[body.span.to_range()], "b c");
    assert_eq!(out.definitions[0].name_span, Span::new(0, 1));
}

#[test]
fn deeply_nested_groups() {
    let depth = 2_000;
    let source = format!("a = {}\"x\"{}", "(".repeat(depth), ")".repeat(depth));
    let out = syntax(&source);
    assert!(out.diagnostics.is_empty());
    assert_eq!(out.definitions.len(), 1);
}

// === Errors and recovery ===

#[test]
fn missing_defined_as() {
    assert_eq!(error_codes("a \"x\"\nb = c"), vec![ErrorCode::E1004]);
}

#[test]
fn recovery_continues_with_next_rule() {
    let out = syntax("a = \nb = \"x\"\nc = ( d\ne = f");
    let codes: Vec<ErrorCode> = out.diagnostics.iter().map(|d| d.code).collect();
    assert_eq!(codes, vec![ErrorCode::E1002, ErrorCode::E1003]);
    let names: Vec<&str> = out.definitions.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["b", "e"]);
}

#[test]
fn unclosed_option_points_at_opener() {
    let out = syntax("a = [ b");
    assert_eq!(out.diagnostics.len(), 1);
    let diagnostic = &out.diagnostics[0];
    assert_eq!(diagnostic.code, ErrorCode::E1003);
    assert!(diagnostic
        .labels
        .iter()
        .any(|l| !l.is_primary && l.span == Span::new(4, 5)));
}

#[test]
fn stray_closer() {
    assert_eq!(error_codes("a = b )"), vec![ErrorCode::E1001]);
}

#[test]
fn indented_first_rule() {
    assert_eq!(error_codes("  a = b"), vec![ErrorCode::E1005]);
}

#[test]
fn repeat_prefix_must_touch_element() {
    assert_eq!(error_codes("a = 1* DIGIT"), vec![ErrorCode::E1006]);
    assert_eq!(error_codes("a = b 2*"), vec![ErrorCode::E1006]);
}

#[test]
fn empty_group() {
    assert_eq!(error_codes("a = ( )"), vec![ErrorCode::E1002]);
}

#[test]
fn empty_grammar_has_no_rules() {
    let out = syntax("; nothing here\n");
    assert!(out.definitions.is_empty());
    assert!(out.diagnostics.is_empty());
}
