use abnf_ir::Span;
use pretty_assertions::assert_eq;

use super::*;
use crate::ErrorCode;

fn render(emitter: TerminalEmitter<Vec<u8>>) -> String {
    String::from_utf8(emitter.into_inner()).unwrap_or_default()
}

fn sample() -> Diagnostic {
    Diagnostic::error(ErrorCode::E2003)
        .with_message("undefined rule `digti`")
        .with_label(Span::new(6, 11), "not defined")
        .with_suggestion("did you mean `DIGIT`?")
}

#[test]
fn plain_output_without_source() {
    let mut emitter = TerminalEmitter::with_color_mode(Vec::new(), ColorMode::Never, false);
    emitter.emit(&sample());
    assert_eq!(
        render(emitter),
        "error[E2003]: undefined rule `digti`\n  \
         --> 6..11: not defined\n  \
         = help: did you mean `DIGIT`?\n\n"
    );
}

#[test]
fn snippet_output_with_source() {
    let source = SourceFile::new("num.abnf", "num = digti\n");
    let mut emitter =
        TerminalEmitter::with_color_mode(Vec::new(), ColorMode::Never, false).with_source(source);
    emitter.emit(&sample());
    let text = render(emitter);
    assert!(text.contains("undefined rule `digti`"), "{text}");
    assert!(text.contains("E2003"), "{text}");
    assert!(text.contains("not defined"), "{text}");
    assert!(text.contains("num.abnf"), "{text}");
}

/// Fails its second write, then accepts everything again.
struct FlakyWriter {
    written: Vec<u8>,
    calls: usize,
}

impl Write for FlakyWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.calls += 1;
        if self.calls == 2 {
            return Err(io::Error::other("interrupted"));
        }
        self.written.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn snippet_is_written_once() {
    let source = SourceFile::new("num.abnf", "num = digti\n");
    let writer = FlakyWriter {
        written: Vec::new(),
        calls: 0,
    };
    let mut emitter =
        TerminalEmitter::with_color_mode(writer, ColorMode::Never, false).with_source(source);
    emitter.emit(&sample());
    emitter.emit(&sample());
    let writer = emitter.into_inner();
    let text = String::from_utf8(writer.written).unwrap_or_default();
    // the failed second write drops one whole snippet, nothing is printed twice
    assert_eq!(text.matches("undefined rule `digti`").count(), 1, "{text}");
    assert!(!text.contains("error[E2003]"), "{text}");
}

#[test]
fn unlabelled_diagnostic_falls_back_to_plain() {
    let source = SourceFile::new("g.abnf", "a = b\n");
    let mut emitter =
        TerminalEmitter::with_color_mode(Vec::new(), ColorMode::Never, false).with_source(source);
    emitter.emit(&Diagnostic::error(ErrorCode::E2004).with_message("no rule named `start`"));
    assert_eq!(render(emitter), "error[E2004]: no rule named `start`\n\n");
}

#[test]
fn summary_counts() {
    let mut emitter = TerminalEmitter::with_color_mode(Vec::new(), ColorMode::Never, false);
    emitter.emit_summary(2, 1);
    emitter.emit_summary(0, 3);
    emitter.emit_summary(1, 0);
    emitter.emit_summary(0, 0);
    assert_eq!(
        render(emitter),
        "error: aborting due to 2 previous errors; 1 warning emitted\n\
         warning: 3 warnings emitted\n\
         error: aborting due to previous error\n"
    );
}

#[test]
fn color_mode_resolution() {
    assert!(ColorMode::Auto.should_use_colors(true));
    assert!(!ColorMode::Auto.should_use_colors(false));
    assert!(ColorMode::Always.should_use_colors(false));
    assert!(!ColorMode::Never.should_use_colors(true));
}

#[test]
fn colored_header_uses_ansi() {
    let mut emitter = TerminalEmitter::with_color_mode(Vec::new(), ColorMode::Always, false);
    emitter.emit(&Diagnostic::warning(ErrorCode::W3006).with_message("unused"));
    let text = render(emitter);
    assert!(text.starts_with("\x1b[1;33mwarning\x1b[0m"), "{text:?}");
}
