//! The `odata` command: parse text with the built-in OData rules.

use abnf_diagnostic::emitter::SourceFile;
use odata_rules::parse_odata;

use super::{rejection, Outcome, Streams};
use crate::CliError;

/// Print which start-rule alternative matched `text`, then its typed tree.
pub fn parse_odata_text(text: &str, streams: &mut Streams<'_>) -> Result<Outcome, CliError> {
    match parse_odata(text) {
        Ok(parsed) => {
            writeln!(streams.out, "{}", parsed.kind())?;
            writeln!(streams.out, "{parsed:#?}")?;
            Ok(Outcome::Success)
        }
        Err(failure) => {
            streams.report(SourceFile::new("<input>", text), &[rejection(text, &failure)]);
            Ok(Outcome::Failed)
        }
    }
}
