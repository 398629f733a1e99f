//! The `check` command: load and compile a grammar, reporting every problem.

use std::path::Path;

use abnf_compile::{compile, CompileError, CompileOptions};
use abnf_diagnostic::emitter::{DiagnosticEmitter, JsonEmitter, SourceFile};
use abnf_diagnostic::DiagnosticQueue;
use abnf_grammar::{parse_grammar, GrammarOptions, LoadError};
use abnf_ir::LineIndex;

use super::{read_file, Outcome, Streams};
use crate::CliError;

/// Check a grammar file.
///
/// Syntax, definition and analysis diagnostics are all reported together,
/// in source order with repeats dropped. A grammar without errors is also
/// compiled, which catches prose values and numeric values that are not
/// characters. With `json`, stdout gets one JSON array of diagnostics and
/// nothing else.
#[tracing::instrument(level = "debug", skip_all, fields(path = %path.display()))]
pub fn check_grammar(
    path: &Path,
    grammar_options: &GrammarOptions,
    compile_options: &CompileOptions,
    json: bool,
    streams: &mut Streams<'_>,
) -> Result<Outcome, CliError> {
    let source = read_file(path)?;
    let parsed = parse_grammar(&source, grammar_options);
    let mut diagnostics = parsed.diagnostics.clone();

    let compiled = if parsed.has_errors() {
        None
    } else {
        let result = match parsed.start {
            Some(start) => compile(&parsed.grammar, start, compile_options),
            None => Err(CompileError::Grammar(LoadError::Empty)),
        };
        match result {
            Ok(compiled) => Some(compiled),
            Err(error) => {
                diagnostics.extend(error.diagnostics());
                None
            }
        }
    };

    let index = LineIndex::new(&source);
    let mut queue = DiagnosticQueue::new();
    queue.extend(diagnostics, &index);
    let failed = queue.has_errors();
    let diagnostics = queue.flush();

    if json {
        let mut emitter = JsonEmitter::new(&mut *streams.out).with_line_index(index);
        emitter.emit_all(&diagnostics);
        emitter.flush();
    } else {
        let file = SourceFile::new(path.display().to_string(), source);
        streams.report(file, &diagnostics);
    }
    let Some(compiled) = compiled.filter(|_| !failed) else {
        return Ok(Outcome::Failed);
    };
    if json {
        return Ok(Outcome::Success);
    }

    writeln!(
        streams.out,
        "OK: {} ({} rules, start rule `{}`)",
        path.display(),
        compiled.rule_names().count(),
        compiled.start_name()
    )?;
    Ok(Outcome::Success)
}
