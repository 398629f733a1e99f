//! The `explain` command: display documentation for a diagnostic code.

use abnf_diagnostic::{ErrorCode, ErrorDocs};

use super::{Outcome, Streams};
use crate::CliError;

pub fn explain_code(code: &str, streams: &mut Streams<'_>) -> Result<Outcome, CliError> {
    let Some(parsed) = ErrorCode::parse(code) else {
        return Err(CliError::UnknownCode(code.to_string()));
    };

    if let Some(doc) = ErrorDocs::get(parsed) {
        writeln!(streams.out, "{doc}")?;
        Ok(Outcome::Success)
    } else {
        writeln!(streams.err, "No documentation available for {parsed}")?;
        Ok(Outcome::Failed)
    }
}
