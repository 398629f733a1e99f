//! ABNF front end.
//!
//! Turns RFC 5234 grammar text into a checked [`Grammar`]:
//!
//! ```text
//! source ─lex─▶ TokenList ─parse─▶ RuleDefinitions ─resolve─▶ Grammar ─validate─▶ diagnostics
//! ```
//!
//! Besides RFC 5234 (with the RFC 7405 `%s`/`%i` string prefixes), single
//! quoted strings are accepted as case-sensitive literals, as the OData
//! ABNF writes them. Core rules (`ALPHA`, `DIGIT`, ...) are added when a
//! grammar references them without defining them.
//!
//! Every phase collects diagnostics instead of stopping at the first
//! problem. [`parse_grammar`] returns all of them; [`load_grammar`] is the
//! convenience entry point that fails if any is an error.

mod ast;
mod core_rules;
mod display;
mod lexer;
mod literal;
mod parser;
mod resolve;
mod suggest;
mod token;
mod validate;

use abnf_diagnostic::{Diagnostic, ErrorCode, Tally};

pub use ast::{
    rule_key, Bounds, Element, ElementKind, Grammar, NumBase, NumValue, Rule, RuleId, RuleOrigin,
};
pub use core_rules::{is_core_rule, CORE_GRAMMAR};
pub use lexer::{lex, LexOutput};
pub use literal::{literal_prefix, literal_text, LiteralText};
pub use parser::{parse, DefinitionKind, RuleDefinition, SyntaxOutput};
pub use token::{Token, TokenFlags, TokenKind, TokenList};
pub use validate::{is_nullable, left_recursive_cycles, nullable_rules, validate};

/// How a grammar is loaded.
#[derive(Clone, Debug)]
pub struct GrammarOptions {
    /// Add RFC 5234 core rules the grammar references but does not define.
    pub core_rules: bool,
    /// Start rule; the first rule in the file when unset.
    pub start: Option<String>,
}

impl Default for GrammarOptions {
    fn default() -> Self {
        GrammarOptions {
            core_rules: true,
            start: None,
        }
    }
}

/// Everything learned from one grammar source.
#[derive(Clone, Debug)]
pub struct GrammarParse {
    pub grammar: Grammar,
    /// `None` when the grammar has no rules or the requested start rule
    /// does not exist.
    pub start: Option<RuleId>,
    /// Diagnostics from every phase, errors and warnings, in phase order.
    pub diagnostics: Vec<Diagnostic>,
}

impl GrammarParse {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    pub fn error_count(&self) -> usize {
        Tally::of(&self.diagnostics).errors
    }
}

/// Lex, parse, resolve and analyse a grammar.
///
/// Analysis only runs when the earlier phases found no errors, so a typo
/// in a rule name is reported once rather than again as a dead rule.
#[tracing::instrument(level = "debug", skip_all, fields(bytes = source.len()))]
pub fn parse_grammar(source: &str, options: &GrammarOptions) -> GrammarParse {
    let lexed = lex(source);
    let mut diagnostics = lexed.diagnostics;

    let syntax = parse(&lexed.tokens);
    diagnostics.extend(syntax.diagnostics);

    let (grammar, resolve_diagnostics) = resolve::build_grammar(syntax.definitions, options.core_rules);
    diagnostics.extend(resolve_diagnostics);

    let start = match options.start.as_deref() {
        Some(name) => {
            let id = grammar.id_of(name);
            if id.is_none() {
                diagnostics.push(unknown_start_rule(&grammar, name));
            }
            id
        }
        None => grammar.first_rule().map(|rule| rule.id),
    };

    if !diagnostics.iter().any(Diagnostic::is_error) {
        diagnostics.extend(validate(&grammar, start));
    }

    tracing::debug!(
        rules = grammar.len(),
        diagnostics = diagnostics.len(),
        "grammar loaded"
    );
    GrammarParse {
        grammar,
        start,
        diagnostics,
    }
}

fn unknown_start_rule(grammar: &Grammar, name: &str) -> Diagnostic {
    let mut diagnostic = Diagnostic::error(ErrorCode::E2004)
        .with_message(format!("start rule `{name}` is not defined in this grammar"));
    if let Some(similar) = suggest::suggest_rule(name, grammar.iter().map(|r| r.name.as_str())) {
        diagnostic = diagnostic.with_suggestion(format!("did you mean `{similar}`?"));
    }
    diagnostic
}

/// Why a grammar could not be loaded.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// At least one diagnostic is an error. `diagnostics` holds all of
    /// them, warnings included, for rendering.
    #[error("grammar has {count} error(s)")]
    Invalid {
        diagnostics: Vec<Diagnostic>,
        count: usize,
    },
    #[error("grammar defines no rules")]
    Empty,
}

/// A grammar that passed every check.
#[derive(Clone, Debug)]
pub struct LoadedGrammar {
    pub grammar: Grammar,
    pub start: RuleId,
    pub warnings: Vec<Diagnostic>,
}

/// [`parse_grammar`], failing on any error.
pub fn load_grammar(source: &str, options: &GrammarOptions) -> Result<LoadedGrammar, LoadError> {
    let parsed = parse_grammar(source, options);
    if parsed.has_errors() {
        return Err(LoadError::Invalid {
            count: parsed.error_count(),
            diagnostics: parsed.diagnostics,
        });
    }
    let Some(start) = parsed.start else {
        return Err(LoadError::Empty);
    };
    Ok(LoadedGrammar {
        grammar: parsed.grammar,
        start,
        warnings: parsed.diagnostics,
    })
}
