//! Grammar compiler.
//!
//! Two back ends share one lowering step ([`normalize`]):
//!
//! - [`compile`] builds a [`CompiledGrammar`], an immutable graph of
//!   combinator parsers producing a generic [`Node`] tree. The graph is
//!   built once and can be shared between threads.
//! - [`generate_rust`] writes Rust source for typed rule parsers: one
//!   `{Rule}Parser` unit struct and one CST type per rule, in the same
//!   convention as hand-written rule modules.
//!
//! Both expect a grammar that passed analysis; [`compile_source`] runs the
//! whole pipeline from grammar text.

mod codegen;
mod compiled;
mod node;
mod normalize;

use abnf_diagnostic::{Diagnostic, ErrorCode};
use abnf_grammar::{load_grammar, Grammar, GrammarOptions, LoadError, RuleId};
use abnf_ir::Span;

pub use codegen::{generate_rust, CodegenOptions};
pub use compiled::{CompiledGrammar, RuleHandle};
pub use node::Node;
pub use normalize::{normalize, Alternative, Expr, NormalRule};

/// How rule bodies are lowered.
#[derive(Clone, Debug, Default)]
pub struct CompileOptions {
    /// Try purely literal alternatives longest first. The CST still
    /// reports each alternative's position in the grammar text.
    pub reorder: bool,
}

/// Why a grammar could not be compiled.
#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    #[error(transparent)]
    Grammar(#[from] LoadError),

    #[error("rule `{rule}` uses a prose value, which has no parser")]
    Prose { rule: String, span: Span },

    #[error("rule `{rule}` uses {value:#X}, which is not a character")]
    NotACharacter { rule: String, value: u32, span: Span },

    #[error("rule `{rule}` references undefined rule `{name}`")]
    UndefinedRule { rule: String, name: String, span: Span },
}

impl CompileError {
    /// Diagnostics describing this error, for rendering with the grammar
    /// source.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        match self {
            CompileError::Grammar(LoadError::Invalid { diagnostics, .. }) => diagnostics.clone(),
            CompileError::Grammar(LoadError::Empty) => vec![Diagnostic::error(ErrorCode::E9001)
                .with_message(self.to_string())
                .with_note("a grammar needs at least one rule to start from")],
            CompileError::Prose { span, .. } => vec![Diagnostic::error(ErrorCode::E3005)
                .with_message(self.to_string())
                .with_label(*span, "prose value")],
            CompileError::NotACharacter { span, .. } => vec![Diagnostic::error(ErrorCode::E3004)
                .with_message(self.to_string())
                .with_label(*span, "not a Unicode scalar value")],
            CompileError::UndefinedRule { span, .. } => vec![Diagnostic::error(ErrorCode::E2003)
                .with_message(self.to_string())
                .with_label(*span, "not defined")],
        }
    }
}

/// Compile a checked grammar into a parser graph starting at `start`.
#[tracing::instrument(level = "debug", skip_all, fields(rules = grammar.len()))]
pub fn compile(
    grammar: &Grammar,
    start: RuleId,
    options: &CompileOptions,
) -> Result<CompiledGrammar, CompileError> {
    let rules = normalize(grammar, options)?;
    let compiled = CompiledGrammar::build(rules, start);
    tracing::debug!(start = compiled.start_name(), "grammar compiled");
    Ok(compiled)
}

/// Load, check and compile grammar text.
pub fn compile_source(
    source: &str,
    grammar_options: &GrammarOptions,
    options: &CompileOptions,
) -> Result<CompiledGrammar, CompileError> {
    let loaded = load_grammar(source, grammar_options)?;
    compile(&loaded.grammar, loaded.start, options)
}
