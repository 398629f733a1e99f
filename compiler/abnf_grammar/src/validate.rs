//! Grammar analysis.
//!
//! Runs after every reference resolves. Errors here make a grammar
//! impossible to compile into terminating parsers:
//!
//! - E3001 left recursion, direct or through rules that can match empty
//! - E3002 repetition with `min > max`
//! - E3003 numeric range with `lo > hi`
//! - E3004 numeric value that is not a Unicode scalar value
//! - E3005 prose value
//!
//! Warnings point at rules that compile but cannot behave as written:
//!
//! - W3006 rule unreachable from the start rule
//! - W3007 alternative shadowed by an earlier one
//! - W3008 repetition of an element that can match empty input

use abnf_diagnostic::{Diagnostic, ErrorCode};
use abnf_runtime::stack::ensure_sufficient_stack;

use crate::ast::{Element, ElementKind, Grammar, NumValue, RuleId};
use crate::literal::{literal_prefix, literal_text};

/// Run every check. `start` enables the reachability warning.
#[tracing::instrument(level = "debug", skip_all, fields(rules = grammar.len()))]
pub fn validate(grammar: &Grammar, start: Option<RuleId>) -> Vec<Diagnostic> {
    let nullable = nullable_rules(grammar);
    let mut diagnostics = Vec::new();

    for cycle in left_recursive_cycles(grammar, &nullable) {
        diagnostics.push(left_recursion(grammar, &cycle));
    }

    for rule in grammar.iter().filter(|rule| !rule.is_core()) {
        rule.definition.walk(&mut |element| {
            check_element(element, grammar, &nullable, &mut diagnostics);
        });
    }

    if let Some(start) = start {
        diagnostics.extend(unreachable_rules(grammar, start));
    }

    tracing::debug!(count = diagnostics.len(), "grammar analysis done");
    diagnostics
}

// === Nullability ===

/// For each rule (by id), whether it can match the empty string.
///
/// Rules are recursive, so this iterates to a fixed point: a rule becomes
/// nullable once its body is nullable given what is already known.
pub fn nullable_rules(grammar: &Grammar) -> Vec<bool> {
    let mut nullable = vec![false; grammar.len()];
    let mut changed = true;
    while changed {
        changed = false;
        for rule in grammar.iter() {
            if !nullable[rule.id.index()] && is_nullable(&rule.definition, grammar, &nullable) {
                nullable[rule.id.index()] = true;
                changed = true;
            }
        }
    }
    nullable
}

/// Can `element` match the empty string?
///
/// There are no lookahead operators, so an element that can match empty
/// input always succeeds.
pub fn is_nullable(element: &Element, grammar: &Grammar, nullable: &[bool]) -> bool {
    ensure_sufficient_stack(|| match &element.kind {
        ElementKind::Alternation(items) => {
            items.iter().any(|item| is_nullable(item, grammar, nullable))
        }
        ElementKind::Concatenation(items) => {
            items.iter().all(|item| is_nullable(item, grammar, nullable))
        }
        ElementKind::Repetition { bounds, element } => {
            bounds.min == 0 || is_nullable(element, grammar, nullable)
        }
        ElementKind::Optional(_) => true,
        ElementKind::Group(inner) => is_nullable(inner, grammar, nullable),
        ElementKind::RuleRef(name) => grammar.id_of(name).is_some_and(|id| nullable[id.index()]),
        ElementKind::CharVal { text, .. } => text.is_empty(),
        ElementKind::NumVal { value, .. } => match value {
            NumValue::Sequence(values) => values.is_empty(),
            NumValue::Range { .. } => false,
        },
        ElementKind::Prose(_) => false,
    })
}

// === Left recursion ===

/// Rules `element` may invoke before consuming any input.
fn left_references(element: &Element, grammar: &Grammar, nullable: &[bool], out: &mut Vec<RuleId>) {
    ensure_sufficient_stack(|| match &element.kind {
        ElementKind::Alternation(items) => {
            for item in items {
                left_references(item, grammar, nullable, out);
            }
        }
        ElementKind::Concatenation(items) => {
            for item in items {
                left_references(item, grammar, nullable, out);
                if !is_nullable(item, grammar, nullable) {
                    break;
                }
            }
        }
        ElementKind::Repetition { bounds, element } => {
            if bounds.max != Some(0) {
                left_references(element, grammar, nullable, out);
            }
        }
        ElementKind::Optional(inner) | ElementKind::Group(inner) => {
            left_references(inner, grammar, nullable, out);
        }
        ElementKind::RuleRef(name) => out.extend(grammar.id_of(name)),
        ElementKind::CharVal { .. } | ElementKind::NumVal { .. } | ElementKind::Prose(_) => {}
    });
}

/// Every left-recursive cycle, each as the path of rules from its
/// lowest-numbered rule back to itself.
pub fn left_recursive_cycles(grammar: &Grammar, nullable: &[bool]) -> Vec<Vec<RuleId>> {
    let edges: Vec<Vec<RuleId>> = grammar
        .iter()
        .map(|rule| {
            let mut out = Vec::new();
            left_references(&rule.definition, grammar, nullable, &mut out);
            out.sort_unstable();
            out.dedup();
            out
        })
        .collect();

    let mut tarjan = Tarjan::new(edges.len());
    for rule in grammar.iter() {
        if tarjan.index[rule.id.index()].is_none() {
            tarjan.strongconnect(rule.id, &edges);
        }
    }

    let mut cycles: Vec<Vec<RuleId>> = tarjan
        .components
        .into_iter()
        .filter(|scc| scc.len() > 1 || scc.iter().any(|id| edges[id.index()].contains(id)))
        .filter_map(|scc| cycle_path(&scc, &edges))
        .collect();
    cycles.sort();
    cycles
}

/// Tarjan's strongly connected components over rule ids.
struct Tarjan {
    next: u32,
    index: Vec<Option<u32>>,
    lowlink: Vec<u32>,
    on_stack: Vec<bool>,
    stack: Vec<RuleId>,
    components: Vec<Vec<RuleId>>,
}

impl Tarjan {
    fn new(len: usize) -> Self {
        Tarjan {
            next: 0,
            index: vec![None; len],
            lowlink: vec![0; len],
            on_stack: vec![false; len],
            stack: Vec::new(),
            components: Vec::new(),
        }
    }

    fn strongconnect(&mut self, v: RuleId, edges: &[Vec<RuleId>]) {
        let vi = v.index();
        self.index[vi] = Some(self.next);
        self.lowlink[vi] = self.next;
        self.next += 1;
        self.stack.push(v);
        self.on_stack[vi] = true;

        for &w in &edges[vi] {
            let wi = w.index();
            match self.index[wi] {
                None => {
                    ensure_sufficient_stack(|| self.strongconnect(w, edges));
                    self.lowlink[vi] = self.lowlink[vi].min(self.lowlink[wi]);
                }
                Some(w_index) if self.on_stack[wi] => {
                    self.lowlink[vi] = self.lowlink[vi].min(w_index);
                }
                Some(_) => {}
            }
        }

        if Some(self.lowlink[vi]) == self.index[vi] {
            let mut component = Vec::new();
            while let Some(w) = self.stack.pop() {
                self.on_stack[w.index()] = false;
                component.push(w);
                if w == v {
                    break;
                }
            }
            component.sort_unstable();
            self.components.push(component);
        }
    }
}

/// Shortest path from the component's first rule back to itself, staying
/// inside the component.
fn cycle_path(component: &[RuleId], edges: &[Vec<RuleId>]) -> Option<Vec<RuleId>> {
    let &start = component.first()?;
    let mut parent: rustc_hash::FxHashMap<RuleId, RuleId> = rustc_hash::FxHashMap::default();
    let mut queue = std::collections::VecDeque::from([start]);

    while let Some(current) = queue.pop_front() {
        for &next in &edges[current.index()] {
            if !component.contains(&next) {
                continue;
            }
            if next == start {
                let mut path = vec![current];
                let mut at = current;
                while at != start {
                    at = *parent.get(&at)?;
                    path.push(at);
                }
                path.reverse();
                return Some(path);
            }
            if !parent.contains_key(&next) {
                parent.insert(next, current);
                queue.push_back(next);
            }
        }
    }
    None
}

fn left_recursion(grammar: &Grammar, cycle: &[RuleId]) -> Diagnostic {
    let first = &grammar[cycle[0]];
    let path: Vec<String> = cycle
        .iter()
        .chain(std::iter::once(&cycle[0]))
        .map(|&id| format!("`{}`", grammar[id].name))
        .collect();

    let mut diagnostic = Diagnostic::error(ErrorCode::E3001)
        .with_message(format!("rule `{}` is left-recursive", first.name))
        .with_label(first.name_span, "this rule can invoke itself without consuming input");
    for &id in &cycle[1..] {
        diagnostic = diagnostic.with_secondary_label(grammar[id].name_span, "part of the cycle");
    }
    diagnostic
        .with_note(format!("{} can be followed without consuming input", path.join(" -> ")))
        .with_suggestion("rewrite the recursion as a repetition, e.g. `sum = term *(\"+\" term)`")
}

// === Element checks ===

fn check_element(element: &Element, grammar: &Grammar, nullable: &[bool], out: &mut Vec<Diagnostic>) {
    match &element.kind {
        ElementKind::Repetition { bounds, element: inner } => {
            if bounds.is_inverted() {
                out.push(
                    Diagnostic::error(ErrorCode::E3002)
                        .with_message(format!(
                            "repetition `{bounds}` requires at least {} but at most {} matches",
                            bounds.min,
                            bounds.max.unwrap_or_default()
                        ))
                        .with_label(element.span, "no input can satisfy these bounds"),
                );
            } else if bounds.max.map_or(true, |max| max > 1) && is_nullable(inner, grammar, nullable) {
                out.push(
                    Diagnostic::warning(ErrorCode::W3008)
                        .with_message("repeated element can match empty input")
                        .with_label(inner.span, "this can match nothing")
                        .with_secondary_label(element.span, "in this repetition")
                        .with_note("once the minimum is reached, an empty match ends the repetition"),
                );
            }
        }
        ElementKind::NumVal {
            value: NumValue::Range { lo, hi },
            ..
        } => {
            if lo > hi {
                out.push(
                    Diagnostic::error(ErrorCode::E3003)
                        .with_message(format!("range `{element}` is empty"))
                        .with_label(element.span, "low bound is above high bound")
                        .with_suggestion("swap the bounds"),
                );
            }
            check_scalar_values(element, &[*lo, *hi], out);
        }
        ElementKind::NumVal {
            value: NumValue::Sequence(values),
            ..
        } => check_scalar_values(element, values, out),
        ElementKind::Prose(text) => {
            out.push(
                Diagnostic::error(ErrorCode::E3005)
                    .with_message(format!("prose value `<{text}>` cannot be compiled"))
                    .with_label(element.span, "informal description")
                    .with_note("prose values describe a rule in words; write it in ABNF instead"),
            );
        }
        ElementKind::Alternation(items) => shadowed_alternatives(items, grammar, nullable, out),
        _ => {}
    }
}

fn check_scalar_values(element: &Element, values: &[u32], out: &mut Vec<Diagnostic>) {
    if let Some(bad) = values.iter().find(|&&v| char::from_u32(v).is_none()) {
        out.push(
            Diagnostic::error(ErrorCode::E3004)
                .with_message(format!("`{bad:#X}` is not a Unicode scalar value"))
                .with_label(element.span, "not a character")
                .with_note("values must be at most 0x10FFFF and outside the surrogate range 0xD800-0xDFFF"),
        );
    }
}

/// Ordered choice takes the first alternative that matches, so a later
/// alternative is dead when an earlier one always succeeds or is a fixed
/// literal that every match of the later one starts with.
fn shadowed_alternatives(items: &[Element], grammar: &Grammar, nullable: &[bool], out: &mut Vec<Diagnostic>) {
    let mut reported = vec![false; items.len()];

    for (i, earlier) in items.iter().enumerate() {
        let Some(later_items) = items.get(i + 1..).filter(|rest| !rest.is_empty()) else {
            break;
        };

        if is_nullable(earlier, grammar, nullable) {
            let next = &later_items[0];
            if !reported[i + 1] {
                out.push(
                    Diagnostic::warning(ErrorCode::W3007)
                        .with_message("alternatives after one that always succeeds are never tried")
                        .with_label(next.span, "never tried")
                        .with_secondary_label(earlier.span, "this alternative can match empty input"),
                );
            }
            break;
        }

        let Some(text) = literal_text(earlier) else {
            continue;
        };
        for (offset, later) in later_items.iter().enumerate() {
            let j = i + 1 + offset;
            if reported[j] || !text.covers(&literal_prefix(later)) {
                continue;
            }
            reported[j] = true;
            out.push(
                Diagnostic::warning(ErrorCode::W3007)
                    .with_message(format!("alternative `{later}` can never match"))
                    .with_label(later.span, "shadowed")
                    .with_secondary_label(
                        earlier.span,
                        format!("`{}` matches first on the same input", text.text()),
                    )
                    .with_suggestion("list the longer alternative first"),
            );
        }
    }
}

// === Reachability ===

fn unreachable_rules(grammar: &Grammar, start: RuleId) -> Vec<Diagnostic> {
    let mut reachable = vec![false; grammar.len()];
    for id in grammar.reachable_from(start) {
        reachable[id.index()] = true;
    }
    let start_name = &grammar[start].name;
    grammar
        .iter()
        .filter(|rule| !rule.is_core() && !reachable[rule.id.index()])
        .map(|rule| {
            Diagnostic::warning(ErrorCode::W3006)
                .with_message(format!("rule `{}` is never used", rule.name))
                .with_label(rule.name_span, "unreachable")
                .with_note(format!("no path leads here from the start rule `{start_name}`"))
        })
        .collect()
}

#[cfg(test)]
mod tests;
