use abnf_ir::{LineIndex, Span};
use pretty_assertions::assert_eq;
use serde_json::Value;

use super::*;
use crate::ErrorCode;

#[test]
fn char_offset_counts_characters() {
    let source = SourceFile::new("x", "aé b");
    assert_eq!(source.char_offset(0), 0);
    assert_eq!(source.char_offset(1), 1);
    // inside the two-byte `é`
    assert_eq!(source.char_offset(2), 1);
    assert_eq!(source.char_offset(3), 2);
    assert_eq!(source.char_offset(99), 4);
}

#[test]
fn json_emitter_writes_array() {
    let text = "a = b\nc = dd\n";
    let mut emitter = JsonEmitter::new(Vec::new()).with_line_index(LineIndex::new(text));
    emitter.emit(
        &Diagnostic::error(ErrorCode::E2003)
            .with_message("undefined rule `dd`")
            .with_label(Span::new(10, 12), "not defined"),
    );
    emitter.emit(&Diagnostic::warning(ErrorCode::W3006).with_message("rule `c` is unused"));
    emitter.flush();

    let output = String::from_utf8(emitter.into_inner()).unwrap_or_default();
    let parsed: Value = serde_json::from_str(&output).unwrap_or(Value::Null);
    let entries = parsed.as_array().cloned().unwrap_or_default();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["code"], "E2003");
    assert_eq!(entries[0]["line"], 2);
    assert_eq!(entries[0]["column"], 5);
    assert_eq!(entries[0]["labels"][0]["primary"], true);
    assert_eq!(entries[1]["severity"], "warning");
    assert_eq!(entries[1]["line"], Value::Null);
}
