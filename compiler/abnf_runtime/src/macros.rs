//! Rule-body macros.
//!
//! Typed rule parsers are written as a fixed pipeline of sub-parsers
//! (`seq!`) or an ordered list of alternatives (`one_of!`). The macros expand
//! to straight-line code with early exits, so a rule body costs no more than
//! the hand-written `match` ladder it replaces, and every rule gets the
//! failure convention right by construction.

/// Run parsers in sequence, binding each value, then build a node.
///
/// ```text
/// seq!(input;
///     year = YearParser,
///     dash = Literal::sensitive("-"),
///     month = MonthParser,
///     => DateValue { year, dash, month }
/// )
/// ```
///
/// - On success of every step: `Success` with the built node and the last
///   remainder.
/// - On the first failing step: `Failure` whose remainder is the `input`
///   given to the macro, not the partially-advanced one.
///
/// Furthest-failure records of every attempted step are merged.
#[macro_export]
macro_rules! seq {
    ($input:expr; $($name:ident = $parser:expr),+ $(,)? => $build:expr $(,)?) => {{
        let __start: $crate::Input<'_> = $input;
        let mut __rest = __start;
        let mut __furthest = $crate::Furthest::default();
        'seq: {
            $(
                let $name = match $crate::Parser::parse(&$parser, __rest) {
                    $crate::ParseOutput::Success { parsed, remainder, furthest } => {
                        __furthest.merge(furthest);
                        __rest = remainder;
                        parsed
                    }
                    $crate::ParseOutput::Failure { furthest, .. } => {
                        __furthest.merge(furthest);
                        break 'seq $crate::ParseOutput::Failure {
                            remainder: __start,
                            furthest: __furthest,
                        };
                    }
                };
            )+
            $crate::ParseOutput::Success {
                parsed: $build,
                remainder: __rest,
                furthest: __furthest,
            }
        }
    }};
}

/// Try alternatives in order from the same input; the first success wins.
///
/// Each alternative is `parser => constructor`, where the constructor wraps
/// the parsed value into the rule's node type (an enum variant, or a closure
/// returning a payload-free variant):
///
/// ```text
/// one_of!(input;
///     Literal::sensitive("+") => |_| Sign::Plus,
///     Literal::sensitive("%2B") => Sign::EncodedPlus,
///     Literal::sensitive("-") => |_| Sign::Minus,
/// )
/// ```
///
/// If every alternative fails, the result is a `Failure` at `input` with the
/// merged expectations of all alternatives.
#[macro_export]
macro_rules! one_of {
    ($input:expr; $($parser:expr => $wrap:expr),+ $(,)?) => {{
        let __start: $crate::Input<'_> = $input;
        let mut __furthest = $crate::Furthest::default();
        'one_of: {
            $(
                match $crate::Parser::parse(&$parser, __start) {
                    $crate::ParseOutput::Success { parsed, remainder, furthest } => {
                        __furthest.merge(furthest);
                        break 'one_of $crate::ParseOutput::Success {
                            parsed: ($wrap)(parsed),
                            remainder,
                            furthest: __furthest,
                        };
                    }
                    $crate::ParseOutput::Failure { furthest, .. } => __furthest.merge(furthest),
                }
            )+
            $crate::ParseOutput::Failure {
                remainder: __start,
                furthest: __furthest,
            }
        }
    }};
}

#[cfg(test)]
mod tests;
