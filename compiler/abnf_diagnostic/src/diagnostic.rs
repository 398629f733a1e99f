//! The diagnostic value shared by every phase.
//!
//! Grammar problems and rejected input are both reported as a
//! [`Diagnostic`]: a code, a severity, a one-line message and any number
//! of labelled byte spans into the text the problem was found in.

use std::fmt;

use abnf_ir::Span;

use crate::ErrorCode;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
pub enum Severity {
    /// Stops the pipeline: a grammar with errors is never compiled.
    Error,
    Warning,
    Note,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Note => "note",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A message attached to a span of the source.
///
/// Every diagnostic with labels has one primary label, where the problem
/// is; secondary labels point at related text such as an earlier
/// definition.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Label {
    pub span: Span,
    pub message: String,
    pub is_primary: bool,
}

impl Label {
    pub fn primary(span: Span, message: impl Into<String>) -> Self {
        Label {
            span,
            message: message.into(),
            is_primary: true,
        }
    }

    pub fn secondary(span: Span, message: impl Into<String>) -> Self {
        Label {
            span,
            message: message.into(),
            is_primary: false,
        }
    }
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[must_use = "diagnostics should be reported or returned, not silently dropped"]
pub struct Diagnostic {
    pub code: ErrorCode,
    pub severity: Severity,
    pub message: String,
    pub labels: Vec<Label>,
    pub notes: Vec<String>,
    /// Rendered as `help:` lines.
    pub suggestions: Vec<String>,
}

impl Diagnostic {
    fn with_severity(code: ErrorCode, severity: Severity) -> Self {
        Diagnostic {
            code,
            severity,
            message: String::new(),
            labels: Vec::new(),
            notes: Vec::new(),
            suggestions: Vec::new(),
        }
    }

    pub fn error(code: ErrorCode) -> Self {
        Self::with_severity(code, Severity::Error)
    }

    pub fn warning(code: ErrorCode) -> Self {
        Self::with_severity(code, Severity::Warning)
    }

    /// A diagnostic whose severity follows the code: `W` codes warn.
    pub fn for_code(code: ErrorCode) -> Self {
        if code.is_warning() {
            Self::warning(code)
        } else {
            Self::error(code)
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Point at where the problem is.
    pub fn with_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::primary(span, message));
        self
    }

    pub fn with_secondary_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::secondary(span, message));
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    pub fn primary_span(&self) -> Option<Span> {
        self.labels
            .iter()
            .find(|label| label.is_primary)
            .map(|label| label.span)
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    pub fn is_warning(&self) -> bool {
        self.severity == Severity::Warning
    }
}

/// Error and warning counts of a batch of diagnostics.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Tally {
    pub errors: usize,
    pub warnings: usize,
}

impl Tally {
    pub fn of<'a>(diagnostics: impl IntoIterator<Item = &'a Diagnostic>) -> Self {
        let mut tally = Tally::default();
        for diagnostic in diagnostics {
            match diagnostic.severity {
                Severity::Error => tally.errors += 1,
                Severity::Warning => tally.warnings += 1,
                Severity::Note => {}
            }
        }
        tally
    }
}

/// `error[E2003]: message`, then one indented line per label, note and
/// suggestion. Spans print as byte ranges.
impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]: {}", self.severity, self.code, self.message)?;
        for label in &self.labels {
            let marker = if label.is_primary { "-->" } else { "   " };
            write!(f, "\n  {marker} {}: {}", label.span, label.message)?;
        }
        for note in &self.notes {
            write!(f, "\n  = note: {note}")?;
        }
        for suggestion in &self.suggestions {
            write!(f, "\n  = help: {suggestion}")?;
        }
        Ok(())
    }
}

/// E1001: the parser met `found` where it needed `expected`.
pub fn unexpected_token(span: Span, expected: &str, found: &str) -> Diagnostic {
    Diagnostic::error(ErrorCode::E1001)
        .with_message(format!("unexpected {found}, expected {expected}"))
        .with_label(span, format!("expected {expected}"))
}

/// E1003: a group `(`, option `[` or prose value `<` is never closed.
pub fn unclosed_delimiter(open_span: Span, close_span: Span, delimiter: char) -> Diagnostic {
    let closing = match delimiter {
        '(' => ')',
        '[' => ']',
        '<' => '>',
        other => other,
    };
    Diagnostic::error(ErrorCode::E1003)
        .with_message(format!("unclosed `{delimiter}`"))
        .with_label(close_span, format!("expected `{closing}` here"))
        .with_secondary_label(open_span, "opened here")
}
