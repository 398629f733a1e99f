//! In-process parser graphs.
//!
//! Rules refer to each other, possibly in cycles, so the graph cannot be
//! built bottom-up. Instead the rule table is created with
//! [`Arc::new_cyclic`]: each rule reference holds a [`Weak`] handle to the
//! table being built plus the target's [`RuleId`], and resolves it at
//! parse time. Once built, the table never changes.

use std::borrow::Cow;
use std::fmt;
use std::sync::{Arc, Weak};

use abnf_grammar::{rule_key, RuleId};
use abnf_runtime::stack::ensure_sufficient_stack;
use abnf_runtime::{
    parse_complete, BoxedParser, CharRange, Expectation, Input, Literal, Or, ParseFailure,
    ParseOutput, Parser, ParserExt, Sequence, SourceText,
};
use rustc_hash::FxHashMap;

use crate::normalize::{Expr, NormalRule};
use crate::Node;

struct CompiledRule {
    name: Arc<str>,
    body: BoxedParser<Node>,
}

struct Table {
    rules: Vec<CompiledRule>,
    by_name: FxHashMap<String, RuleId>,
    start: RuleId,
}

impl Table {
    fn invoke<'a>(&self, id: RuleId, input: Input<'a>) -> ParseOutput<'a, Node> {
        let Some(rule) = self.rules.get(id.index()) else {
            return ParseOutput::failure(input, Expectation::Rule(Cow::Borrowed("rule")));
        };
        let output = match ensure_sufficient_stack(|| rule.body.parse(input)) {
            ParseOutput::Success {
                parsed,
                remainder,
                furthest,
            } => ParseOutput::Success {
                parsed: Node::Rule {
                    name: Arc::clone(&rule.name),
                    span: remainder.span_from(input),
                    child: Box::new(parsed),
                },
                remainder,
                furthest,
            },
            ParseOutput::Failure {
                remainder,
                furthest,
            } => ParseOutput::Failure {
                remainder,
                furthest,
            },
        };
        tracing::trace!(
            rule = %rule.name,
            at = input.position(),
            matched = output.is_success(),
            "rule"
        );
        output.named(input, Cow::Owned(rule.name.to_string()))
    }
}

/// A reference from one rule body to another rule.
struct RuleCall {
    table: Weak<Table>,
    id: RuleId,
    name: Arc<str>,
}

impl Parser for RuleCall {
    type Value = Node;

    fn parse<'a>(&self, input: Input<'a>) -> ParseOutput<'a, Node> {
        match self.table.upgrade() {
            Some(table) => table.invoke(self.id, input),
            // only reachable while the grammar is being dropped
            None => ParseOutput::failure(input, Expectation::Rule(Cow::Owned(self.name.to_string()))),
        }
    }
}

/// A compiled grammar: one parser per rule, sharing a rule table.
///
/// Cloning is cheap. The grammar is `Send + Sync` and holds no mutable
/// state, so one instance can parse on many threads at once.
#[derive(Clone)]
pub struct CompiledGrammar {
    table: Arc<Table>,
}

impl CompiledGrammar {
    pub(crate) fn build(rules: Vec<NormalRule>, start: RuleId) -> Self {
        let names: Vec<Arc<str>> = rules.iter().map(|rule| Arc::from(rule.name.as_str())).collect();
        let table = Arc::new_cyclic(|table: &Weak<Table>| {
            let builder = GraphBuilder {
                table,
                names: &names,
            };
            let compiled = rules
                .iter()
                .zip(&names)
                .map(|(rule, name)| CompiledRule {
                    name: Arc::clone(name),
                    body: builder.build(&rule.body),
                })
                .collect();
            let by_name = rules.iter().map(|rule| (rule_key(&rule.name), rule.id)).collect();
            Table {
                rules: compiled,
                by_name,
                start,
            }
        });
        CompiledGrammar { table }
    }

    /// Parser for the start rule.
    pub fn start(&self) -> RuleHandle {
        RuleHandle {
            table: Arc::clone(&self.table),
            id: self.table.start,
        }
    }

    pub fn start_name(&self) -> &str {
        self.table
            .rules
            .get(self.table.start.index())
            .map_or("", |rule| &rule.name)
    }

    /// Parser for the rule called `name`, ignoring case.
    pub fn rule(&self, name: &str) -> Option<RuleHandle> {
        let id = *self.table.by_name.get(&rule_key(name))?;
        Some(RuleHandle {
            table: Arc::clone(&self.table),
            id,
        })
    }

    /// Rule names in definition order, core rules last.
    pub fn rule_names(&self) -> impl Iterator<Item = &str> {
        self.table.rules.iter().map(|rule| &*rule.name)
    }

    /// Parse all of `text` with the start rule.
    pub fn parse(&self, text: &str) -> Result<Node, ParseFailure> {
        self.start().parse_text(text)
    }
}

impl fmt::Debug for CompiledGrammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledGrammar")
            .field("start", &self.start_name())
            .field("rules", &self.table.rules.len())
            .finish()
    }
}

/// One rule of a [`CompiledGrammar`], usable as a [`Parser`].
///
/// Keeps the whole grammar alive.
#[derive(Clone)]
pub struct RuleHandle {
    table: Arc<Table>,
    id: RuleId,
}

impl RuleHandle {
    pub fn name(&self) -> &str {
        self.table.rules.get(self.id.index()).map_or("", |rule| &rule.name)
    }

    /// Parse all of `text` with this rule.
    pub fn parse_text(&self, text: &str) -> Result<Node, ParseFailure> {
        parse_complete(self, &SourceText::new(text))
    }
}

impl Parser for RuleHandle {
    type Value = Node;

    fn parse<'a>(&self, input: Input<'a>) -> ParseOutput<'a, Node> {
        self.table.invoke(self.id, input)
    }
}

impl fmt::Debug for RuleHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RuleHandle").field(&self.name()).finish()
    }
}

struct GraphBuilder<'b> {
    table: &'b Weak<Table>,
    names: &'b [Arc<str>],
}

impl GraphBuilder<'_> {
    fn build(&self, expr: &Expr) -> BoxedParser<Node> {
        ensure_sufficient_stack(|| self.build_inner(expr))
    }

    fn build_inner(&self, expr: &Expr) -> BoxedParser<Node> {
        match expr {
            Expr::Choice(alternatives) => Or::new(
                alternatives
                    .iter()
                    .map(|alternative| {
                        let index = alternative.index;
                        self.build(&alternative.expr)
                            .map(move |node| Node::Alternative {
                                index,
                                node: Box::new(node),
                            })
                            .boxed()
                    })
                    .collect(),
            )
            .boxed(),
            Expr::Sequence(parts) => {
                Sequence::new(parts.iter().map(|part| self.build(part)).collect())
                    .map(Node::Sequence)
                    .boxed()
            }
            Expr::Repeat { min, max, expr } => self
                .build(expr)
                .repeat(*min, *max)
                .map(Node::Repetition)
                .boxed(),
            Expr::Optional(expr) => self
                .build(expr)
                .optional()
                .map(|node| Node::Optional(node.map(Box::new)))
                .boxed(),
            Expr::Rule(id) => RuleCall {
                table: Weak::clone(self.table),
                id: *id,
                name: self
                    .names
                    .get(id.index())
                    .map_or_else(|| Arc::from("rule"), Arc::clone),
            }
            .boxed(),
            Expr::Literal { text, case } => Literal::new(text.clone(), *case).map(Node::Literal).boxed(),
            Expr::Range { lo, hi } => CharRange::new(*lo, *hi).map(Node::Char).boxed(),
        }
    }
}

#[cfg(test)]
mod tests;
