//! Lowering grammar elements to parser expressions.
//!
//! Groups disappear, nested concatenations are flattened, `1*1x` becomes
//! `x` and `*1x` becomes `[x]`. Numeric value sequences turn into literal
//! text. Both back ends consume the result.

use abnf_grammar::{literal_text, Element, ElementKind, Grammar, NumValue, Rule, RuleId};
use abnf_ir::Span;
use abnf_runtime::stack::ensure_sufficient_stack;
use abnf_runtime::Case;

use crate::{CompileError, CompileOptions};

/// A normalized rule body.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Expr {
    /// Ordered choice. Each alternative keeps its position in the grammar
    /// text, even after reordering.
    Choice(Vec<Alternative>),
    Sequence(Vec<Expr>),
    Repeat {
        min: usize,
        max: Option<usize>,
        expr: Box<Expr>,
    },
    Optional(Box<Expr>),
    Rule(RuleId),
    Literal { text: String, case: Case },
    Range { lo: char, hi: char },
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Alternative {
    pub index: usize,
    pub expr: Expr,
}

/// A rule ready for a back end.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NormalRule {
    pub id: RuleId,
    pub name: String,
    pub body: Expr,
}

/// Normalize every rule of `grammar`, in rule order.
#[tracing::instrument(level = "debug", skip_all, fields(rules = grammar.len()))]
pub fn normalize(grammar: &Grammar, options: &CompileOptions) -> Result<Vec<NormalRule>, CompileError> {
    grammar
        .iter()
        .map(|rule| {
            let lowering = Lowering {
                grammar,
                rule,
                options,
            };
            Ok(NormalRule {
                id: rule.id,
                name: rule.name.clone(),
                body: lowering.lower(&rule.definition)?,
            })
        })
        .collect()
}

struct Lowering<'g> {
    grammar: &'g Grammar,
    rule: &'g Rule,
    options: &'g CompileOptions,
}

impl Lowering<'_> {
    fn lower(&self, element: &Element) -> Result<Expr, CompileError> {
        ensure_sufficient_stack(|| self.lower_inner(element))
    }

    fn lower_inner(&self, element: &Element) -> Result<Expr, CompileError> {
        match &element.kind {
            ElementKind::Group(inner) => self.lower(inner),
            ElementKind::Alternation(_) => self.lower_choice(element),
            ElementKind::Concatenation(items) => {
                let mut parts = Vec::with_capacity(items.len());
                for item in items {
                    match self.lower(item)? {
                        Expr::Sequence(inner) => parts.extend(inner),
                        expr => parts.push(expr),
                    }
                }
                Ok(Expr::Sequence(parts))
            }
            ElementKind::Repetition { bounds, element: inner } => {
                let expr = self.lower(inner)?;
                let min = bounds.min as usize;
                let max = bounds.max.map(|max| max as usize);
                Ok(match (min, max) {
                    (1, Some(1)) => expr,
                    (0, Some(1)) => Expr::Optional(Box::new(expr)),
                    _ => Expr::Repeat {
                        min,
                        max,
                        expr: Box::new(expr),
                    },
                })
            }
            ElementKind::Optional(inner) => Ok(Expr::Optional(Box::new(self.lower(inner)?))),
            ElementKind::RuleRef(name) => match self.grammar.id_of(name) {
                Some(id) => Ok(Expr::Rule(id)),
                None => Err(CompileError::UndefinedRule {
                    rule: self.rule.name.clone(),
                    name: name.clone(),
                    span: element.span,
                }),
            },
            ElementKind::CharVal { text, case } => Ok(Expr::Literal {
                text: text.clone(),
                case: *case,
            }),
            ElementKind::NumVal { value, .. } => match value {
                NumValue::Range { lo, hi } => Ok(Expr::Range {
                    lo: self.scalar(*lo, element.span)?,
                    hi: self.scalar(*hi, element.span)?,
                }),
                NumValue::Sequence(values) => {
                    let text = values
                        .iter()
                        .map(|&value| self.scalar(value, element.span))
                        .collect::<Result<String, _>>()?;
                    Ok(Expr::Literal {
                        text,
                        case: Case::Sensitive,
                    })
                }
            },
            ElementKind::Prose(_) => Err(CompileError::Prose {
                rule: self.rule.name.clone(),
                span: element.span,
            }),
        }
    }

    fn lower_choice(&self, element: &Element) -> Result<Expr, CompileError> {
        let mut alternatives = element
            .alternatives()
            .iter()
            .enumerate()
            .map(|(index, alternative)| {
                Ok(Alternative {
                    index,
                    expr: self.lower(alternative)?,
                })
            })
            .collect::<Result<Vec<_>, CompileError>>()?;
        if self.options.reorder {
            self.reorder(element, &mut alternatives);
        }
        Ok(Expr::Choice(alternatives))
    }

    /// Longest first, when every alternative is fixed text.
    fn reorder(&self, element: &Element, alternatives: &mut [Alternative]) {
        let lengths: Option<Vec<usize>> = element
            .alternatives()
            .iter()
            .map(|alt| literal_text(alt).map(|text| text.len()))
            .collect();
        let Some(lengths) = lengths else {
            return;
        };
        if lengths.windows(2).all(|w| w[0] >= w[1]) {
            return;
        }
        alternatives.sort_by_key(|alt| std::cmp::Reverse(lengths[alt.index]));
        tracing::debug!(rule = %self.rule.name, "reordered literal alternatives longest first");
    }

    fn scalar(&self, value: u32, span: Span) -> Result<char, CompileError> {
        char::from_u32(value).ok_or_else(|| CompileError::NotACharacter {
            rule: self.rule.name.clone(),
            value,
            span,
        })
    }
}

#[cfg(test)]
mod tests;
