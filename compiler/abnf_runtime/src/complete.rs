//! Whole-input parsing.

use crate::{EndOfInput, Expectation, Furthest, ParseOutput, Parser, SourceText};

/// Why an input was rejected.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum ParseFailure {
    /// The start rule did not match.
    #[error("input does not conform to the grammar at offset {}: expected {}", .furthest.position(), .furthest.describe())]
    Rejected { furthest: Furthest },

    /// The start rule matched a prefix, but input remains.
    #[error("unexpected trailing input at offset {}: expected {}", .furthest.position(), .furthest.describe())]
    TrailingInput {
        /// Characters the start rule consumed.
        matched: usize,
        furthest: Furthest,
    },
}

impl ParseFailure {
    /// Character offset the failure is reported at.
    pub fn offset(&self) -> usize {
        self.furthest().position()
    }

    pub fn furthest(&self) -> &Furthest {
        match self {
            ParseFailure::Rejected { furthest } | ParseFailure::TrailingInput { furthest, .. } => {
                furthest
            }
        }
    }
}

/// Parse all of `source` with `parser`.
///
/// Succeeds only if the parser matches and leaves nothing behind. A trailing
/// remainder is reported at the deepest failure seen, which is at least the
/// end of the match.
pub fn parse_complete<P: Parser>(parser: &P, source: &SourceText) -> Result<P::Value, ParseFailure> {
    let input = source.input();
    match parser.parse(input) {
        ParseOutput::Success {
            parsed,
            remainder,
            furthest,
        } => {
            if remainder.at_end() {
                return Ok(parsed);
            }
            let at_end = EndOfInput.parse(remainder).into_furthest();
            let furthest = furthest.merged(at_end);
            tracing::debug!(
                matched = remainder.position(),
                len = source.len(),
                "trailing input"
            );
            Err(ParseFailure::TrailingInput {
                matched: remainder.position(),
                furthest,
            })
        }
        ParseOutput::Failure { furthest, .. } => {
            let furthest = if furthest.is_empty() {
                Furthest::at(0, Expectation::Rule("start rule".into()))
            } else {
                furthest
            };
            tracing::debug!(offset = furthest.position(), "input rejected");
            Err(ParseFailure::Rejected { furthest })
        }
    }
}

/// Parse the longest prefix of `source` the parser accepts.
///
/// Returns the value and the number of characters consumed.
pub fn parse_prefix<P: Parser>(
    parser: &P,
    source: &SourceText,
) -> Result<(P::Value, usize), ParseFailure> {
    parser
        .parse(source.input())
        .into_result()
        .map(|(value, rest)| (value, rest.position()))
        .map_err(|furthest| ParseFailure::Rejected { furthest })
}
