use abnf_grammar::GrammarOptions;
use abnf_runtime::{parse_prefix, Lossless};
use pretty_assertions::assert_eq;

use super::*;
use crate::{compile_source, CompileOptions};

fn grammar(source: &str) -> CompiledGrammar {
    grammar_with(source, &CompileOptions::default())
}

fn grammar_with(source: &str, options: &CompileOptions) -> CompiledGrammar {
    match compile_source(source, &GrammarOptions::default(), options) {
        Ok(compiled) => compiled,
        Err(err) => panic!("`{source}` does not compile: {err}"),
    }
}

const NUMBER: &str = "\
number = [sign] 1*DIGIT
sign   = \"+\" / \"-\"
";

#[test]
fn builds_a_rule_tree() {
    let compiled = grammar(NUMBER);
    let tree = match compiled.parse("-42") {
        Ok(tree) => tree,
        Err(err) => panic!("{err}"),
    };
    assert_eq!(tree.rule_name(), Some("number"));
    assert_eq!(tree.text(), "-42");
    assert_eq!(
        tree.find_rule("sign").map(Node::children),
        Some(
            &[Node::Alternative {
                index: 1,
                node: Box::new(Node::Literal(abnf_runtime::Lexeme::new(
                    abnf_ir::Span::new(0, 1),
                    "-"
                ))),
            }][..]
        )
    );
    let digits: Vec<String> = tree
        .child_rules()
        .into_iter()
        .filter(|node| node.rule_name() == Some("DIGIT"))
        .map(Lossless::text)
        .collect();
    assert_eq!(digits, vec!["4", "2"]);
}

#[test]
fn optional_sign_absent() {
    let compiled = grammar(NUMBER);
    let tree = compiled.parse("42");
    assert!(tree.is_ok_and(|tree| tree.find_rule("sign").is_none()));
}

#[test]
fn rejection_names_the_rule() {
    let compiled = grammar(NUMBER);
    let Err(err) = compiled.parse("x") else {
        panic!("`x` is not a number");
    };
    assert_eq!(err.offset(), 0);
    assert!(err.to_string().contains("number"), "{err}");
}

#[test]
fn trailing_input_is_rejected() {
    let compiled = grammar(NUMBER);
    let Err(err) = compiled.parse("12a") else {
        panic!("trailing `a` should be rejected");
    };
    assert!(matches!(err, ParseFailure::TrailingInput { matched: 2, .. }));
}

#[test]
fn prefix_parse_stops_after_the_match() {
    let compiled = grammar(NUMBER);
    let parsed = parse_prefix(&compiled.start(), &SourceText::new("12a"));
    assert!(parsed.is_ok_and(|(tree, consumed)| consumed == 2 && tree.text() == "12"));
}

#[test]
fn rules_are_found_ignoring_case() {
    let compiled = grammar(NUMBER);
    assert_eq!(compiled.rule("SIGN").map(|rule| rule.name().to_string()), Some("sign".to_string()));
    assert!(compiled.rule("exponent").is_none());
    assert_eq!(compiled.rule_names().collect::<Vec<_>>(), vec!["number", "sign", "DIGIT"]);
    assert_eq!(compiled.start_name(), "number");
}

#[test]
fn any_rule_can_be_a_start_rule() {
    let compiled = grammar(NUMBER);
    let sign = compiled.rule("sign").map(|rule| rule.parse_text("+"));
    assert!(matches!(sign, Some(Ok(_))));
}

#[test]
fn declaration_order_decides_overlapping_literals() {
    let source = "nan-infinity = \"INF\" / \"INFINITY\"";
    // the shorter literal wins and leaves `INITY` behind
    assert!(grammar(source).parse("INFINITY").is_err());

    let reordered = grammar_with(source, &CompileOptions { reorder: true });
    let tree = match reordered.parse("INFINITY") {
        Ok(tree) => tree,
        Err(err) => panic!("{err}"),
    };
    let Node::Rule { child, .. } = tree else {
        panic!("expected a rule node");
    };
    // the alternative still reports its place in the grammar text
    assert!(matches!(*child, Node::Alternative { index: 1, .. }));
}

#[test]
fn recursive_rules_resolve() {
    let compiled = grammar("list = item [\",\" list]\nitem = 1*ALPHA");
    let tree = compiled.parse("a,bc,d");
    assert!(tree.is_ok_and(|tree| tree.text() == "a,bc,d"));
}

#[test]
fn deep_nesting_does_not_overflow() {
    let compiled = grammar("group = \"(\" [group] \")\"");
    let depth = 2_000;
    let text = format!("{}{}", "(".repeat(depth), ")".repeat(depth));
    let tree = compiled.parse(&text);
    assert!(tree.is_ok_and(|tree| tree.text().len() == depth * 2));
}

#[test]
fn grammar_is_shareable() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<CompiledGrammar>();
    assert_send_sync::<RuleHandle>();
}

#[test]
fn handle_outlives_grammar() {
    let handle = grammar(NUMBER).rule("number");
    assert!(handle.is_some_and(|handle| handle.parse_text("7").is_ok()));
}
