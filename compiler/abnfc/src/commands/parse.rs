//! The `parse` command: parse input with one rule of a grammar.

use std::path::Path;

use abnf_compile::{compile_source, CompileOptions, Node, RuleHandle};
use abnf_diagnostic::emitter::SourceFile;
use abnf_grammar::GrammarOptions;
use abnf_runtime::{parse_prefix, ParseFailure, SourceText};
use rayon::prelude::*;

use super::{read_file, rejection, Outcome, Streams};
use crate::{CliError, InputSource};

/// Compile `grammar_path` and parse `input` with its rule `rule`.
///
/// Accepted input is printed as an outline of rule nodes, or as JSON. With
/// `prefix`, the longest accepted prefix is parsed and its length printed.
pub fn parse_input(
    grammar_path: &Path,
    rule: &str,
    input: &InputSource,
    json: bool,
    prefix: bool,
    streams: &mut Streams<'_>,
) -> Result<Outcome, CliError> {
    let source = read_file(grammar_path)?;
    let grammar = match compile_source(&source, &GrammarOptions::default(), &CompileOptions::default()) {
        Ok(grammar) => grammar,
        Err(error) => {
            let file = SourceFile::new(grammar_path.display().to_string(), source);
            streams.report(file, &error.diagnostics());
            return Ok(Outcome::Failed);
        }
    };
    let Some(handle) = grammar.rule(rule) else {
        return Err(CliError::UnknownRule {
            rule: rule.to_string(),
            grammar: grammar_path.to_path_buf(),
        });
    };

    match input {
        InputSource::Text(text) => parse_one(&handle, "<input>", text, json, prefix, streams),
        InputSource::File(path) => {
            let text = read_file(path)?;
            let name = path.display().to_string();
            parse_one(&handle, &name, strip_newline(&text), json, prefix, streams)
        }
        InputSource::Lines(path) => parse_lines(&handle, path, json, streams),
    }
}

/// `text` without one trailing `\n` or `\r\n`.
fn strip_newline(text: &str) -> &str {
    match text.strip_suffix('\n') {
        Some(line) => line.strip_suffix('\r').unwrap_or(line),
        None => text,
    }
}

fn parse_one(
    handle: &RuleHandle,
    name: &str,
    text: &str,
    json: bool,
    prefix: bool,
    streams: &mut Streams<'_>,
) -> Result<Outcome, CliError> {
    let result = if prefix {
        parse_prefix(handle, &SourceText::new(text)).map(|(node, consumed)| (node, Some(consumed)))
    } else {
        handle.parse_text(text).map(|node| (node, None))
    };
    let (node, consumed) = match result {
        Ok(parsed) => parsed,
        Err(failure) => {
            streams.report(SourceFile::new(name, text), &[rejection(text, &failure)]);
            return Ok(Outcome::Failed);
        }
    };

    let total = text.chars().count();
    match (json, consumed) {
        (true, None) => writeln!(streams.out, "{}", serde_json::to_string_pretty(&node)?)?,
        (true, Some(consumed)) => {
            let value = serde_json::json!({ "consumed": consumed, "node": node });
            writeln!(streams.out, "{}", serde_json::to_string_pretty(&value)?)?;
        }
        (false, None) => write!(streams.out, "{node}")?,
        (false, Some(consumed)) => {
            write!(streams.out, "{node}")?;
            writeln!(streams.out, "matched {consumed} of {total} characters")?;
        }
    }
    Ok(Outcome::Success)
}

/// Parse each line of `path` on the rayon pool; report in line order.
fn parse_lines(
    handle: &RuleHandle,
    path: &Path,
    json: bool,
    streams: &mut Streams<'_>,
) -> Result<Outcome, CliError> {
    let text = read_file(path)?;
    let lines: Vec<&str> = text.lines().collect();
    let results: Vec<Result<Node, ParseFailure>> =
        lines.par_iter().map(|line| handle.parse_text(line)).collect();

    let mut accepted = 0;
    for (number, (line, result)) in lines.iter().zip(results).enumerate() {
        let location = format!("{}:{}", path.display(), number + 1);
        match result {
            Ok(node) => {
                accepted += 1;
                if json {
                    writeln!(streams.out, "{}", serde_json::to_string(&node)?)?;
                } else {
                    writeln!(streams.out, "{location}: ok")?;
                }
            }
            Err(failure) => {
                let diagnostic = rejection(line, &failure);
                streams.emit(SourceFile::new(location, *line), &[diagnostic]);
            }
        }
    }
    tracing::debug!(accepted, total = lines.len(), "lines parsed");

    let summary = format!("{accepted} of {} lines accepted", lines.len());
    if json {
        writeln!(streams.err, "{summary}")?;
    } else {
        writeln!(streams.out, "{summary}")?;
    }
    Ok(if accepted == lines.len() {
        Outcome::Success
    } else {
        Outcome::Failed
    })
}

#[cfg(test)]
mod tests {
    use super::strip_newline;

    #[test]
    fn strips_one_newline() {
        assert_eq!(strip_newline("42\n"), "42");
        assert_eq!(strip_newline("42\r\n"), "42");
        assert_eq!(strip_newline("42\n\n"), "42\n");
        assert_eq!(strip_newline("42"), "42");
    }
}
