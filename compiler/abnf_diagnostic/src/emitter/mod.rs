//! Diagnostic Emitters
//!
//! Provides different output formats for diagnostics:
//! - Terminal: human-readable output with source snippets
//! - JSON: machine-readable output for tooling
//!
//! Each emitter implements the `DiagnosticEmitter` trait.

mod json;
mod terminal;

pub use json::JsonEmitter;
pub use terminal::{ColorMode, TerminalEmitter};

use crate::Diagnostic;

/// A named source buffer that diagnostics point into.
///
/// Spans on diagnostics are byte offsets into `text`.
#[derive(Clone, Debug)]
pub struct SourceFile {
    pub name: String,
    pub text: String,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        SourceFile {
            name: name.into(),
            text: text.into(),
        }
    }

    /// Convert a byte offset into a character offset.
    ///
    /// Offsets inside a multi-byte character round down to its start.
    pub fn char_offset(&self, byte: usize) -> usize {
        let byte = byte.min(self.text.len());
        self.text
            .char_indices()
            .take_while(|&(i, c)| i + c.len_utf8() <= byte)
            .count()
    }
}

/// Trait for emitting diagnostics in various formats.
pub trait DiagnosticEmitter {
    fn emit(&mut self, diagnostic: &Diagnostic);

    fn emit_all(&mut self, diagnostics: &[Diagnostic]) {
        for diag in diagnostics {
            self.emit(diag);
        }
    }

    /// Flush any buffered output.
    fn flush(&mut self);

    /// Emit a summary of errors/warnings.
    fn emit_summary(&mut self, error_count: usize, warning_count: usize);
}

#[cfg(test)]
mod tests;
