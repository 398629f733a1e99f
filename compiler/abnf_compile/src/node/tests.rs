use abnf_ir::Span;
use abnf_runtime::{Lexeme, Lossless};
use pretty_assertions::assert_eq;

use super::*;

fn rule(name: &str, start: u32, end: u32, child: Node) -> Node {
    Node::Rule {
        name: Arc::from(name),
        span: Span::new(start, end),
        child: Box::new(child),
    }
}

fn literal(start: u32, text: &str) -> Node {
    #[allow(clippy::cast_possible_truncation)]
    let end = start + text.chars().count() as u32;
    Node::Literal(Lexeme::new(Span::new(start, end), text))
}

/// `sign = "-"`, `digits = 1*DIGIT` over `-42`.
fn signed_number() -> Node {
    rule(
        "number",
        0,
        3,
        Node::Sequence(vec![
            Node::Optional(Some(Box::new(rule(
                "sign",
                0,
                1,
                Node::Alternative {
                    index: 1,
                    node: Box::new(literal(0, "-")),
                },
            )))),
            rule(
                "digits",
                1,
                3,
                Node::Repetition(vec![
                    rule("DIGIT", 1, 2, Node::Char('4')),
                    rule("DIGIT", 2, 3, Node::Char('2')),
                ]),
            ),
        ]),
    )
}

#[test]
fn text_is_the_matched_input() {
    assert_eq!(signed_number().text(), "-42");
    assert_eq!(Node::Optional(None).text(), "");
}

#[test]
fn find_rule_ignores_case() {
    let tree = signed_number();
    let digits = tree.find_rule("Digits").map(Lossless::text);
    assert_eq!(digits.as_deref(), Some("42"));
    assert_eq!(tree.find_rule("digit").and_then(Node::span), Some(Span::new(1, 2)));
    assert!(tree.find_rule("exponent").is_none());
}

#[test]
fn child_rules_skip_structure() {
    let tree = signed_number();
    let names: Vec<&str> = tree.child_rules().into_iter().filter_map(Node::rule_name).collect();
    assert_eq!(names, vec!["sign", "digits"]);
}

#[test]
fn display_is_a_rule_outline() {
    let expected = "\
number @0..3 \"-42\"
  sign @0..1 \"-\"
  digits @1..3 \"42\"
    DIGIT @1..2 \"4\"
    DIGIT @2..3 \"2\"
";
    assert_eq!(signed_number().to_string(), expected);
}
