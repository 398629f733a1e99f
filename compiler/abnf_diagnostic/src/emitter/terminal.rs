//! Terminal Emitter
//!
//! Human-readable diagnostic output. With a source attached, diagnostics are
//! rendered as annotated snippets via `ariadne`; without one, each label is
//! printed as a span line.

use std::io::{self, Write};

use ariadne::{Color, Config, Label as SnippetLabel, Report, ReportKind, Source};

use crate::{Diagnostic, Severity};

use super::{DiagnosticEmitter, SourceFile};

/// ANSI color codes for terminal output.
mod colors {
    pub const ERROR: &str = "\x1b[1;31m"; // Bold red
    pub const WARNING: &str = "\x1b[1;33m"; // Bold yellow
    pub const NOTE: &str = "\x1b[1;36m"; // Bold cyan
    pub const HELP: &str = "\x1b[1;32m"; // Bold green
    pub const BOLD: &str = "\x1b[1m";
    pub const SECONDARY: &str = "\x1b[1;34m"; // Bold blue
    pub const RESET: &str = "\x1b[0m";
}

/// Returns "s" for plural counts, "" for singular.
#[inline]
fn plural_s(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

/// Color output mode for terminal emitter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Use colors when the output is a terminal.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    /// Resolve to a boolean. `is_tty` only matters for `Auto`.
    pub fn should_use_colors(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

/// Terminal emitter with optional color support.
pub struct TerminalEmitter<W: Write> {
    writer: W,
    colors: bool,
    source: Option<SourceFile>,
}

impl<W: Write> TerminalEmitter<W> {
    pub fn with_color_mode(writer: W, mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter {
            writer,
            colors: mode.should_use_colors(is_tty),
            source: None,
        }
    }

    /// Attach the source that diagnostic spans point into.
    #[must_use]
    pub fn with_source(mut self, source: SourceFile) -> Self {
        self.source = Some(source);
        self
    }

    /// Consume the emitter and return its writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_colored(&mut self, text: &str, color: &str) {
        if self.colors {
            let _ = write!(self.writer, "{color}{text}{}", colors::RESET);
        } else {
            let _ = write!(self.writer, "{text}");
        }
    }

    fn write_severity(&mut self, severity: Severity) {
        let color = match severity {
            Severity::Error => colors::ERROR,
            Severity::Warning => colors::WARNING,
            Severity::Note => colors::NOTE,
        };
        self.write_colored(&severity.to_string(), color);
    }

    fn emit_plain(&mut self, diagnostic: &Diagnostic) {
        // Header: severity[CODE]: message
        self.write_severity(diagnostic.severity);
        if self.colors {
            let _ = write!(
                self.writer,
                "{}[{}]{}",
                colors::BOLD,
                diagnostic.code,
                colors::RESET
            );
        } else {
            let _ = write!(self.writer, "[{}]", diagnostic.code);
        }
        let _ = writeln!(self.writer, ": {}", diagnostic.message);

        for label in &diagnostic.labels {
            let marker = if label.is_primary { "-->" } else { "   " };
            let _ = write!(self.writer, "  {marker} {:?}: ", label.span);
            let color = if label.is_primary {
                colors::ERROR
            } else {
                colors::SECONDARY
            };
            self.write_colored(&label.message, color);
            let _ = writeln!(self.writer);
        }

        for note in &diagnostic.notes {
            let _ = write!(self.writer, "  = ");
            self.write_colored("note", colors::BOLD);
            let _ = writeln!(self.writer, ": {note}");
        }

        for suggestion in &diagnostic.suggestions {
            let _ = write!(self.writer, "  = ");
            self.write_colored("help", colors::HELP);
            let _ = writeln!(self.writer, ": {suggestion}");
        }

        let _ = writeln!(self.writer);
    }
}

fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Error => Color::Red,
        Severity::Warning => Color::Yellow,
        Severity::Note => Color::Cyan,
    }
}

/// Render one diagnostic as an annotated snippet of `source`.
fn emit_snippet(
    writer: &mut impl Write,
    colors: bool,
    source: &SourceFile,
    diagnostic: &Diagnostic,
) -> io::Result<()> {
    let name = source.name.as_str();
    let total_chars = source.text.chars().count();
    let char_range = |span: abnf_ir::Span| {
        let start = source.char_offset(span.start as usize);
        let end = source.char_offset(span.end as usize);
        // zero-width labels get one column so the caret is visible
        if end <= start && start < total_chars {
            start..start + 1
        } else {
            start..end.max(start)
        }
    };

    let kind = match diagnostic.severity {
        Severity::Error => ReportKind::Error,
        Severity::Warning => ReportKind::Warning,
        Severity::Note => ReportKind::Advice,
    };
    let offset = diagnostic
        .primary_span()
        .map_or(0, |span| char_range(span).start);

    let mut report = Report::build(kind, name, offset)
        .with_code(diagnostic.code)
        .with_message(&diagnostic.message)
        .with_config(Config::default().with_color(colors));

    for label in &diagnostic.labels {
        let color = if label.is_primary {
            severity_color(diagnostic.severity)
        } else {
            Color::Blue
        };
        report = report.with_label(
            SnippetLabel::new((name, char_range(label.span)))
                .with_message(&label.message)
                .with_color(color),
        );
    }
    if !diagnostic.notes.is_empty() {
        report = report.with_note(diagnostic.notes.join("\n"));
    }
    if !diagnostic.suggestions.is_empty() {
        report = report.with_help(diagnostic.suggestions.join("\n"));
    }

    report
        .finish()
        .write((name, Source::from(source.text.as_str())), writer)
}

impl<W: Write> DiagnosticEmitter for TerminalEmitter<W> {
    fn emit(&mut self, diagnostic: &Diagnostic) {
        if let Some(source) = self.source.as_ref().filter(|_| !diagnostic.labels.is_empty()) {
            // rendered in full before anything reaches the writer
            let mut snippet = Vec::new();
            if emit_snippet(&mut snippet, self.colors, source, diagnostic).is_ok() {
                let _ = self.writer.write_all(&snippet);
                return;
            }
        }
        self.emit_plain(diagnostic);
    }

    fn flush(&mut self) {
        let _ = self.writer.flush();
    }

    fn emit_summary(&mut self, error_count: usize, warning_count: usize) {
        if error_count > 0 {
            self.write_colored("error", colors::ERROR);
            let error_part = if error_count == 1 {
                "previous error".to_string()
            } else {
                format!("{error_count} previous errors")
            };
            if warning_count > 0 {
                let _ = writeln!(
                    self.writer,
                    ": aborting due to {error_part}; {warning_count} warning{} emitted",
                    plural_s(warning_count)
                );
            } else {
                let _ = writeln!(self.writer, ": aborting due to {error_part}");
            }
        } else if warning_count > 0 {
            self.write_colored("warning", colors::WARNING);
            let _ = writeln!(
                self.writer,
                ": {warning_count} warning{} emitted",
                plural_s(warning_count)
            );
        }
    }
}

#[cfg(test)]
mod tests;
