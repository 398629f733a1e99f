//! Parse results.
//!
//! A [`ParseOutput`] is either a success carrying the parsed value and the
//! cursor after it, or a failure carrying the cursor the parser was *given*.
//! That second rule is what makes ordered choice work: an enclosing
//! alternation retries from exactly the same place, never from a
//! partially-advanced one.
//!
//! | Variant | `remainder` |
//! |---------|-------------|
//! | `Success` | position after the match (never before the input) |
//! | `Failure` | the original input, unchanged |
//!
//! Both variants also carry a [`Furthest`] record for diagnostics.

use std::borrow::Cow;

use crate::{Expectation, Furthest, Input};

#[derive(Clone, Debug, PartialEq, Eq)]
#[must_use = "a parse result should be checked for success"]
pub enum ParseOutput<'a, T> {
    Success {
        parsed: T,
        remainder: Input<'a>,
        furthest: Furthest,
    },
    Failure {
        remainder: Input<'a>,
        furthest: Furthest,
    },
}

impl<'a, T> ParseOutput<'a, T> {
    // === Constructors ===

    #[inline]
    pub fn success(parsed: T, remainder: Input<'a>) -> Self {
        ParseOutput::Success {
            parsed,
            remainder,
            furthest: Furthest::default(),
        }
    }

    /// A failure at `input` expecting one thing.
    #[cold]
    pub fn failure(input: Input<'a>, expectation: Expectation) -> Self {
        ParseOutput::Failure {
            remainder: input,
            furthest: Furthest::at(input.position(), expectation),
        }
    }

    /// A failure at `input` with an already-built furthest record.
    #[inline]
    pub fn failure_with(input: Input<'a>, furthest: Furthest) -> Self {
        ParseOutput::Failure {
            remainder: input,
            furthest,
        }
    }

    // === Predicates and accessors ===

    #[inline]
    pub fn is_success(&self) -> bool {
        matches!(self, ParseOutput::Success { .. })
    }

    #[inline]
    pub fn is_failure(&self) -> bool {
        !self.is_success()
    }

    /// The parsed value, if the parse succeeded.
    pub fn parsed(&self) -> Option<&T> {
        match self {
            ParseOutput::Success { parsed, .. } => Some(parsed),
            ParseOutput::Failure { .. } => None,
        }
    }

    pub fn into_parsed(self) -> Option<T> {
        match self {
            ParseOutput::Success { parsed, .. } => Some(parsed),
            ParseOutput::Failure { .. } => None,
        }
    }

    #[inline]
    pub fn remainder(&self) -> Input<'a> {
        match self {
            ParseOutput::Success { remainder, .. } | ParseOutput::Failure { remainder, .. } => {
                *remainder
            }
        }
    }

    pub fn furthest(&self) -> &Furthest {
        match self {
            ParseOutput::Success { furthest, .. } | ParseOutput::Failure { furthest, .. } => {
                furthest
            }
        }
    }

    pub fn into_furthest(self) -> Furthest {
        match self {
            ParseOutput::Success { furthest, .. } | ParseOutput::Failure { furthest, .. } => {
                furthest
            }
        }
    }

    // === Transformations ===

    /// Map the parsed value, preserving remainder and furthest.
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> ParseOutput<'a, U> {
        match self {
            ParseOutput::Success {
                parsed,
                remainder,
                furthest,
            } => ParseOutput::Success {
                parsed: f(parsed),
                remainder,
                furthest,
            },
            ParseOutput::Failure {
                remainder,
                furthest,
            } => ParseOutput::Failure {
                remainder,
                furthest,
            },
        }
    }

    /// Merge an earlier furthest record into this result.
    pub fn with_furthest(self, earlier: Furthest) -> Self {
        match self {
            ParseOutput::Success {
                parsed,
                remainder,
                furthest,
            } => ParseOutput::Success {
                parsed,
                remainder,
                furthest: earlier.merged(furthest),
            },
            ParseOutput::Failure {
                remainder,
                furthest,
            } => ParseOutput::Failure {
                remainder,
                furthest: earlier.merged(furthest),
            },
        }
    }

    /// Attribute failures at the rule's start to the rule itself.
    ///
    /// `start` is the input the rule was given. Failures that got further
    /// than `start` keep their own, more specific, expectations.
    pub fn named(mut self, start: Input<'a>, rule: impl Into<Cow<'static, str>>) -> Self {
        let rule = rule.into();
        match &mut self {
            ParseOutput::Success { furthest, .. } | ParseOutput::Failure { furthest, .. } => {
                furthest.relabel(start.position(), rule);
            }
        }
        self
    }

    /// Split into the value and remainder, or the furthest failure.
    pub fn into_result(self) -> Result<(T, Input<'a>), Furthest> {
        match self {
            ParseOutput::Success {
                parsed, remainder, ..
            } => Ok((parsed, remainder)),
            ParseOutput::Failure { furthest, .. } => Err(furthest),
        }
    }
}
