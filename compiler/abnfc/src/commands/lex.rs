//! The `lex` command: display the tokens of a grammar file.

use std::path::Path;

use abnf_diagnostic::emitter::SourceFile;
use abnf_grammar::lex;

use super::{read_file, Outcome, Streams};
use crate::CliError;

pub fn lex_grammar(path: &Path, streams: &mut Streams<'_>) -> Result<Outcome, CliError> {
    let source = read_file(path)?;
    let lexed = lex(&source);

    writeln!(
        streams.out,
        "Tokens for '{}' ({} tokens):",
        path.display(),
        lexed.tokens.len()
    )?;
    for token in lexed.tokens.iter() {
        writeln!(streams.out, "  {:?} @ {}", token.kind, token.span)?;
    }

    let file = SourceFile::new(path.display().to_string(), source);
    if lexed.diagnostics.is_empty() || !streams.report(file, &lexed.diagnostics) {
        Ok(Outcome::Success)
    } else {
        Ok(Outcome::Failed)
    }
}
