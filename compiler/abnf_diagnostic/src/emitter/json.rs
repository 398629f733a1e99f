//! JSON Emitter
//!
//! Emits diagnostics as a single JSON array, one object per diagnostic:
//!
//! ```json
//! [{"code":"E2003","severity":"error","message":"...","line":3,"column":7,
//!   "labels":[{"start":12,"end":17,"message":"...","primary":true}],
//!   "notes":[],"suggestions":[]}]
//! ```

use std::io::Write;

use abnf_ir::LineIndex;
use serde_json::{json, Value};

use crate::Diagnostic;

use super::DiagnosticEmitter;

pub struct JsonEmitter<W: Write> {
    writer: W,
    index: Option<LineIndex>,
    entries: Vec<Value>,
}

impl<W: Write> JsonEmitter<W> {
    pub fn new(writer: W) -> Self {
        JsonEmitter {
            writer,
            index: None,
            entries: Vec::new(),
        }
    }

    /// Resolve primary spans to line/column using `index`.
    #[must_use]
    pub fn with_line_index(mut self, index: LineIndex) -> Self {
        self.index = Some(index);
        self
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn to_value(&self, diagnostic: &Diagnostic) -> Value {
        let position = match (&self.index, diagnostic.primary_span()) {
            (Some(index), Some(span)) => Some(index.line_col(span.start)),
            _ => None,
        };
        let labels: Vec<Value> = diagnostic
            .labels
            .iter()
            .map(|label| {
                json!({
                    "start": label.span.start,
                    "end": label.span.end,
                    "message": label.message,
                    "primary": label.is_primary,
                })
            })
            .collect();
        json!({
            "code": diagnostic.code.as_str(),
            "severity": diagnostic.severity.to_string(),
            "message": diagnostic.message,
            "line": position.map(|p| p.line),
            "column": position.map(|p| p.col),
            "labels": labels,
            "notes": diagnostic.notes,
            "suggestions": diagnostic.suggestions,
        })
    }
}

impl<W: Write> DiagnosticEmitter for JsonEmitter<W> {
    fn emit(&mut self, diagnostic: &Diagnostic) {
        let value = self.to_value(diagnostic);
        self.entries.push(value);
    }

    /// Write the collected array. Entries are cleared so the emitter can be reused.
    fn flush(&mut self) {
        let entries = std::mem::take(&mut self.entries);
        let _ = serde_json::to_writer(&mut self.writer, &Value::Array(entries));
        let _ = writeln!(self.writer);
        let _ = self.writer.flush();
    }

    fn emit_summary(&mut self, _error_count: usize, _warning_count: usize) {
        // JSON consumers count entries themselves
    }
}
