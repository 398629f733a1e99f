//! Generic CST produced by compiled grammars.

use std::fmt;
use std::sync::Arc;

use abnf_ir::Span;
use abnf_runtime::stack::ensure_sufficient_stack;
use abnf_runtime::{Lexeme, Lossless};

/// A concrete syntax tree node.
///
/// The shape follows the normalized rule body: a rule reference becomes a
/// [`Node::Rule`], a concatenation a [`Node::Sequence`] and so on. Every
/// matched character is kept, so [`Lossless::text`] gives back the input.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Node {
    /// A matched rule and the span it covers.
    Rule {
        name: Arc<str>,
        span: Span,
        child: Box<Node>,
    },
    Sequence(Vec<Node>),
    /// The alternative that matched, by its position in the grammar text.
    Alternative { index: usize, node: Box<Node> },
    Repetition(Vec<Node>),
    Optional(Option<Box<Node>>),
    Literal(Lexeme),
    Char(char),
}

impl Node {
    /// Name of a rule node.
    pub fn rule_name(&self) -> Option<&str> {
        match self {
            Node::Rule { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Span of a rule node or a literal.
    pub fn span(&self) -> Option<Span> {
        match self {
            Node::Rule { span, .. } => Some(*span),
            Node::Literal(lexeme) => Some(lexeme.span()),
            _ => None,
        }
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Node::Rule { child, .. } => std::slice::from_ref(child),
            Node::Alternative { node, .. } => std::slice::from_ref(node),
            Node::Optional(Some(node)) => std::slice::from_ref(node),
            Node::Sequence(nodes) | Node::Repetition(nodes) => nodes,
            Node::Optional(None) | Node::Literal(_) | Node::Char(_) => &[],
        }
    }

    /// First rule node named `name`, depth first, this node included.
    /// Names compare case-insensitively, like ABNF rule names.
    pub fn find_rule(&self, name: &str) -> Option<&Node> {
        if self.rule_name().is_some_and(|n| n.eq_ignore_ascii_case(name)) {
            return Some(self);
        }
        ensure_sufficient_stack(|| self.children().iter().find_map(|child| child.find_rule(name)))
    }

    /// Rule nodes directly below this node, skipping structural nodes.
    pub fn child_rules(&self) -> Vec<&Node> {
        let mut rules = Vec::new();
        for child in self.children() {
            child.collect_rules(&mut rules);
        }
        rules
    }

    fn collect_rules<'a>(&'a self, rules: &mut Vec<&'a Node>) {
        if let Node::Rule { .. } = self {
            rules.push(self);
        } else {
            ensure_sufficient_stack(|| {
                for child in self.children() {
                    child.collect_rules(rules);
                }
            });
        }
    }

    fn write_outline(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        match self {
            Node::Rule { name, span, .. } => {
                writeln!(f, "{:indent$}{name} @{span} {:?}", "", self.text(), indent = depth * 2)?;
                for rule in self.child_rules() {
                    rule.write_outline(f, depth + 1)?;
                }
                Ok(())
            }
            _ => {
                for rule in self.child_rules() {
                    rule.write_outline(f, depth)?;
                }
                Ok(())
            }
        }
    }
}

impl Lossless for Node {
    fn write_text(&self, out: &mut String) {
        match self {
            Node::Literal(lexeme) => out.push_str(lexeme.text()),
            Node::Char(c) => out.push(*c),
            _ => ensure_sufficient_stack(|| {
                for child in self.children() {
                    child.write_text(out);
                }
            }),
        }
    }
}

/// An outline of the rule nodes, one per line, indented by depth.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_outline(f, 0)
    }
}

#[cfg(test)]
mod tests;
