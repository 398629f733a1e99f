//! The `gen` command: generate a Rust module of typed rule parsers.

use std::path::Path;

use abnf_compile::{generate_rust, CodegenOptions, CompileError};
use abnf_diagnostic::emitter::SourceFile;
use abnf_grammar::{load_grammar, GrammarOptions};

use super::{read_file, Outcome, Streams};
use crate::CliError;

/// Generate parsers for every rule of `grammar_path`.
///
/// Warnings are rendered but do not stop generation.
#[tracing::instrument(level = "debug", skip_all, fields(path = %grammar_path.display()))]
pub fn generate(
    grammar_path: &Path,
    output: Option<&Path>,
    reorder: bool,
    streams: &mut Streams<'_>,
) -> Result<Outcome, CliError> {
    let source = read_file(grammar_path)?;
    let file = SourceFile::new(grammar_path.display().to_string(), source.as_str());

    let loaded = match load_grammar(&source, &GrammarOptions::default()) {
        Ok(loaded) => loaded,
        Err(error) => {
            streams.report(file, &CompileError::from(error).diagnostics());
            return Ok(Outcome::Failed);
        }
    };
    streams.emit(file.clone(), &loaded.warnings);

    let options = CodegenOptions {
        reorder,
        title: grammar_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned()),
        embedded: false,
    };
    let code = match generate_rust(&loaded.grammar, &options) {
        Ok(code) => code,
        Err(error) => {
            streams.report(file, &error.diagnostics());
            return Ok(Outcome::Failed);
        }
    };

    match output {
        Some(path) => {
            std::fs::write(path, &code).map_err(|source| CliError::Write {
                path: path.to_path_buf(),
                source,
            })?;
            writeln!(
                streams.out,
                "OK: wrote {} ({} rules)",
                path.display(),
                loaded.grammar.len()
            )?;
        }
        None => streams.out.write_all(code.as_bytes())?,
    }
    Ok(Outcome::Success)
}
