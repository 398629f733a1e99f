//! Command handlers for the `abnfc` driver.
//!
//! Each submodule implements one command. Commands write their results to
//! [`Streams::out`] and render diagnostics to [`Streams::err`]; shared
//! helpers such as [`read_file`] and rejection reporting live here.

use std::io::Write;
use std::path::Path;

use abnf_diagnostic::emitter::{ColorMode, DiagnosticEmitter, SourceFile, TerminalEmitter};
use abnf_diagnostic::{Diagnostic, ErrorCode, Tally};
use abnf_ir::Span;
use abnf_runtime::ParseFailure;

use crate::CliError;

mod check;
mod explain;
mod gen;
mod lex;
mod odata;
mod parse;

pub use check::check_grammar;
pub use explain::explain_code;
pub use gen::generate;
pub use lex::lex_grammar;
pub use odata::parse_odata_text;
pub use parse::parse_input;

/// How a command finished, when it could run at all.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[must_use]
pub enum Outcome {
    Success,
    /// The grammar had errors or the input was rejected. The details have
    /// been rendered already.
    Failed,
}

impl Outcome {
    pub fn exit_code(self) -> i32 {
        match self {
            Outcome::Success => 0,
            Outcome::Failed => 1,
        }
    }
}

/// Where commands write.
pub struct Streams<'a> {
    pub out: &'a mut dyn Write,
    pub err: &'a mut dyn Write,
    pub color: ColorMode,
    /// Whether `err` is a terminal, for [`ColorMode::Auto`].
    pub is_tty: bool,
}

impl Streams<'_> {
    fn emitter(&mut self) -> TerminalEmitter<&mut dyn Write> {
        let err: &mut dyn Write = &mut *self.err;
        TerminalEmitter::with_color_mode(err, self.color, self.is_tty)
    }

    /// Render `diagnostics` against `source` without a summary line.
    fn emit(&mut self, source: SourceFile, diagnostics: &[Diagnostic]) {
        if diagnostics.is_empty() {
            return;
        }
        let mut emitter = self.emitter().with_source(source);
        emitter.emit_all(diagnostics);
        emitter.flush();
    }

    /// Render `diagnostics` against `source`, then a summary line.
    ///
    /// Returns whether any of them is an error.
    fn report(&mut self, source: SourceFile, diagnostics: &[Diagnostic]) -> bool {
        let tally = Tally::of(diagnostics);
        self.emit(source, diagnostics);
        let mut emitter = self.emitter();
        emitter.emit_summary(tally.errors, tally.warnings);
        emitter.flush();
        tally.errors > 0
    }
}

pub(crate) fn read_file(path: &Path) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// A diagnostic for input a rule rejected, labelled at the failure.
///
/// Failures count characters; diagnostic spans count bytes.
pub(crate) fn rejection(text: &str, failure: &ParseFailure) -> Diagnostic {
    let start = text
        .char_indices()
        .nth(failure.offset())
        .map_or(text.len(), |(byte, _)| byte);
    let end = text[start..]
        .chars()
        .next()
        .map_or(start, |c| start + c.len_utf8());
    let label = format!("expected {}", failure.furthest().describe());
    let span = Span::from_range(start..end);
    match failure {
        ParseFailure::Rejected { .. } => Diagnostic::error(ErrorCode::E4001)
            .with_message("input does not match the grammar")
            .with_label(span, label),
        ParseFailure::TrailingInput { matched, .. } => Diagnostic::error(ErrorCode::E4002)
            .with_message("unexpected trailing input")
            .with_label(span, label)
            .with_note(format!(
                "the rule matched the first {matched} character{}",
                if *matched == 1 { "" } else { "s" }
            )),
    }
}

#[cfg(test)]
mod tests;
