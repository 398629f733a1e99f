//! Turning rule definitions into a [`Grammar`].
//!
//! Definitions are merged in file order: `=` defines a rule, `=/` appends
//! alternatives to one. Core rules are added for any name the grammar
//! references but does not define, then every remaining reference is
//! checked.

use abnf_diagnostic::{Diagnostic, ErrorCode};

use crate::ast::{Element, ElementKind, Grammar, Rule, RuleId, RuleOrigin};
use crate::core_rules::{add_referenced_core_rules, is_core_rule};
use crate::parser::{DefinitionKind, RuleDefinition};
use crate::suggest::suggest_rule;

/// Merge definitions into a rule table, reporting E2001 to E2003.
#[tracing::instrument(level = "debug", skip_all, fields(definitions = definitions.len()))]
pub(crate) fn build_grammar(
    definitions: Vec<RuleDefinition>,
    core_rules: bool,
) -> (Grammar, Vec<Diagnostic>) {
    let mut grammar = Grammar::new();
    let mut diagnostics = Vec::new();

    for definition in definitions {
        match (definition.kind, grammar.id_of(&definition.name)) {
            (DefinitionKind::Basic, None) => {
                grammar.push(new_rule(definition));
            }
            (DefinitionKind::Basic, Some(existing)) => {
                let first = grammar.rule(existing);
                diagnostics.push(
                    Diagnostic::error(ErrorCode::E2001)
                        .with_message(format!("rule `{}` is defined more than once", definition.name))
                        .with_label(definition.name_span, "redefined here")
                        .with_secondary_label(first.name_span, "first defined here")
                        .with_suggestion(format!(
                            "use `{} =/ ...` to add alternatives to the existing rule",
                            definition.name
                        )),
                );
            }
            (DefinitionKind::Incremental, Some(existing)) => {
                let rule = grammar.rule_mut(existing);
                rule.definition = append_alternatives(&rule.definition, definition.body);
            }
            (DefinitionKind::Incremental, None) => {
                diagnostics.push(
                    Diagnostic::error(ErrorCode::E2002)
                        .with_message(format!(
                            "`=/` adds alternatives to `{}`, which is not defined yet",
                            definition.name
                        ))
                        .with_label(definition.name_span, "no earlier `=` definition")
                        .with_note("incremental alternatives must follow the rule's `=` line"),
                );
                // keep the rule so references to it are not reported as well
                grammar.push(new_rule(definition));
            }
        }
    }

    if core_rules {
        add_referenced_core_rules(&mut grammar);
    }
    diagnostics.extend(undefined_references(&grammar, core_rules));

    (grammar, diagnostics)
}

fn new_rule(definition: RuleDefinition) -> Rule {
    Rule {
        id: RuleId::from_raw(0),
        name: definition.name,
        name_span: definition.name_span,
        definition: definition.body,
        origin: RuleOrigin::Grammar,
    }
}

/// `existing / added`, flattened into one alternation.
fn append_alternatives(existing: &Element, added: Element) -> Element {
    let span = existing.span.merge(added.span);
    let mut items = existing.alternatives().to_vec();
    items.extend(added.alternatives().iter().cloned());
    Element::new(ElementKind::Alternation(items), span)
}

fn undefined_references(grammar: &Grammar, core_rules: bool) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    for rule in grammar.iter() {
        for (name, span) in rule.definition.rule_refs() {
            if grammar.contains(name) {
                continue;
            }
            let mut diagnostic = Diagnostic::error(ErrorCode::E2003)
                .with_message(format!("rule `{name}` is not defined"))
                .with_label(span, "referenced here")
                .with_secondary_label(rule.name_span, format!("in the definition of `{}`", rule.name));
            if let Some(similar) = suggest_rule(name, grammar.iter().map(|r| r.name.as_str())) {
                diagnostic = diagnostic.with_suggestion(format!("did you mean `{similar}`?"));
            }
            if !core_rules && is_core_rule(name) {
                diagnostic = diagnostic.with_note(format!(
                    "`{name}` is an RFC 5234 core rule, but core rules are disabled"
                ));
            }
            diagnostics.push(diagnostic);
        }
    }
    diagnostics
}
