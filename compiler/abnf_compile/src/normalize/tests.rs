use abnf_grammar::{load_grammar, GrammarOptions};
use pretty_assertions::assert_eq;

use super::*;

fn lowered(source: &str, options: &CompileOptions) -> Vec<NormalRule> {
    let loaded = match load_grammar(source, &GrammarOptions::default()) {
        Ok(loaded) => loaded,
        Err(err) => panic!("`{source}` does not load: {err}"),
    };
    match normalize(&loaded.grammar, options) {
        Ok(rules) => rules,
        Err(err) => panic!("`{source}` does not normalize: {err}"),
    }
}

fn body(source: &str) -> Expr {
    lowered(source, &CompileOptions::default()).remove(0).body
}

fn literal(text: &str, case: Case) -> Expr {
    Expr::Literal {
        text: text.to_string(),
        case,
    }
}

#[test]
fn groups_and_nested_sequences_flatten() {
    assert_eq!(
        body("a = \"x\" (\"y\" %x7A)"),
        Expr::Sequence(vec![
            literal("x", Case::Insensitive),
            literal("y", Case::Insensitive),
            literal("z", Case::Sensitive),
        ])
    );
}

#[test]
fn repetition_shapes() {
    assert_eq!(body("a = 1*1'x'"), literal("x", Case::Sensitive));
    assert_eq!(body("a = *1'x'"), Expr::Optional(Box::new(literal("x", Case::Sensitive))));
    assert_eq!(
        body("a = 2*'x'"),
        Expr::Repeat {
            min: 2,
            max: None,
            expr: Box::new(literal("x", Case::Sensitive)),
        }
    );
}

#[test]
fn numeric_values() {
    assert_eq!(body("crlf = %x0D.0A"), literal("\r\n", Case::Sensitive));
    assert_eq!(body("digit = %d48-57"), Expr::Range { lo: '0', hi: '9' });
}

#[test]
fn alternatives_keep_grammar_order_by_default() {
    let Expr::Choice(alternatives) = body("n = 'NaN' / 'INF' / '-INF'") else {
        panic!("expected a choice");
    };
    let indices: Vec<usize> = alternatives.iter().map(|alt| alt.index).collect();
    assert_eq!(indices, vec![0, 1, 2]);
}

#[test]
fn reorder_puts_longer_literals_first() {
    let options = CompileOptions { reorder: true };
    let rules = lowered("n = \"INF\" / \"INFINITY\" / \"-INF\"", &options);
    let Expr::Choice(alternatives) = &rules[0].body else {
        panic!("expected a choice");
    };
    let order: Vec<(usize, &Expr)> = alternatives.iter().map(|alt| (alt.index, &alt.expr)).collect();
    assert_eq!(
        order,
        vec![
            (1, &literal("INFINITY", Case::Insensitive)),
            (2, &literal("-INF", Case::Insensitive)),
            (0, &literal("INF", Case::Insensitive)),
        ]
    );
}

#[test]
fn reorder_leaves_mixed_alternatives_alone() {
    let options = CompileOptions { reorder: true };
    let rules = lowered("n = \"x\" / 1*DIGIT / \"xyz\"", &options);
    let Expr::Choice(alternatives) = &rules[0].body else {
        panic!("expected a choice");
    };
    let indices: Vec<usize> = alternatives.iter().map(|alt| alt.index).collect();
    assert_eq!(indices, vec![0, 1, 2]);
}

#[test]
fn rule_references_resolve_to_ids() {
    let rules = lowered("pair = digit digit\ndigit = %x30-39", &CompileOptions::default());
    let digit = rules[1].id;
    assert_eq!(rules[0].body, Expr::Sequence(vec![Expr::Rule(digit), Expr::Rule(digit)]));
}

#[test]
fn prose_is_an_error() {
    // the front end reports prose too; lower an unchecked grammar directly
    let parsed = abnf_grammar::parse_grammar("a = <anything>", &GrammarOptions::default());
    let Err(err) = normalize(&parsed.grammar, &CompileOptions::default()) else {
        panic!("prose should not lower");
    };
    assert!(matches!(err, CompileError::Prose { ref rule, .. } if rule == "a"));
    assert_eq!(err.diagnostics()[0].code, abnf_diagnostic::ErrorCode::E3005);
}
