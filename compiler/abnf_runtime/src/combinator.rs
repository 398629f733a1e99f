//! Combinators: alternation, optionality, repetition, sequencing.
//!
//! All of them follow the same two rules:
//! - on failure, the remainder is the input they were given;
//! - every child result's furthest record is merged into their own.
//!
//! Alternation is ordered choice: the first alternative to succeed wins and
//! later ones are never tried. Only alternation retries from the original
//! input; a sequence whose second step fails simply fails.

use std::borrow::Cow;

use crate::stack::ensure_sufficient_stack;
use crate::{BoxedParser, Furthest, Input, ParseOutput, Parser};

/// Ordered choice over any number of parsers with a common value type.
pub struct Or<T> {
    alternatives: Vec<BoxedParser<T>>,
}

impl<T> Or<T> {
    pub fn new(alternatives: Vec<BoxedParser<T>>) -> Self {
        Or { alternatives }
    }

    #[must_use]
    pub fn with(mut self, alternative: BoxedParser<T>) -> Self {
        self.alternatives.push(alternative);
        self
    }

    pub fn len(&self) -> usize {
        self.alternatives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alternatives.is_empty()
    }
}

impl<T> Parser for Or<T> {
    type Value = T;

    fn parse<'a>(&self, input: Input<'a>) -> ParseOutput<'a, T> {
        let mut furthest = Furthest::default();
        for alternative in &self.alternatives {
            match alternative.parse(input) {
                ParseOutput::Success {
                    parsed,
                    remainder,
                    furthest: inner,
                } => {
                    return ParseOutput::Success {
                        parsed,
                        remainder,
                        furthest: furthest.merged(inner),
                    };
                }
                ParseOutput::Failure { furthest: inner, .. } => furthest.merge(inner),
            }
        }
        ParseOutput::failure_with(input, furthest)
    }
}

/// Ordered choice between two parsers.
#[derive(Clone, Debug)]
pub struct Alt<A, B> {
    first: A,
    second: B,
}

impl<A, B> Alt<A, B> {
    pub fn new(first: A, second: B) -> Self {
        Alt { first, second }
    }
}

impl<A, B> Parser for Alt<A, B>
where
    A: Parser,
    B: Parser<Value = A::Value>,
{
    type Value = A::Value;

    fn parse<'a>(&self, input: Input<'a>) -> ParseOutput<'a, A::Value> {
        match self.first.parse(input) {
            ok @ ParseOutput::Success { .. } => ok,
            ParseOutput::Failure { furthest, .. } => self.second.parse(input).with_furthest(furthest),
        }
    }
}

/// Zero or one match. Never fails.
#[derive(Clone, Debug)]
pub struct Optional<P> {
    inner: P,
}

impl<P> Optional<P> {
    pub fn new(inner: P) -> Self {
        Optional { inner }
    }
}

impl<P: Parser> Parser for Optional<P> {
    type Value = Option<P::Value>;

    fn parse<'a>(&self, input: Input<'a>) -> ParseOutput<'a, Self::Value> {
        match self.inner.parse(input) {
            ParseOutput::Success {
                parsed,
                remainder,
                furthest,
            } => ParseOutput::Success {
                parsed: Some(parsed),
                remainder,
                furthest,
            },
            ParseOutput::Failure { furthest, .. } => ParseOutput::Success {
                parsed: None,
                remainder: input,
                furthest,
            },
        }
    }
}

/// Collect matches of `inner` from `input`, stopping at `max`.
///
/// A match that consumes nothing ends the loop without being collected once
/// `min` items are in hand, so repeating a parser that can match empty input
/// still terminates. Below `min` an empty match counts, since parsing is pure
/// and it would match empty again at the same place.
fn collect<'a, P: Parser>(
    inner: &P,
    input: Input<'a>,
    min: usize,
    max: Option<usize>,
) -> (Vec<P::Value>, Input<'a>, Furthest) {
    let mut items = Vec::new();
    let mut rest = input;
    let mut furthest = Furthest::default();
    while max.map_or(true, |max| items.len() < max) {
        match inner.parse(rest) {
            ParseOutput::Success {
                parsed,
                remainder,
                furthest: inner_furthest,
            } => {
                furthest.merge(inner_furthest);
                if remainder.position() == rest.position() && items.len() >= min {
                    break;
                }
                items.push(parsed);
                rest = remainder;
            }
            ParseOutput::Failure {
                furthest: inner_furthest,
                ..
            } => {
                furthest.merge(inner_furthest);
                break;
            }
        }
    }
    (items, rest, furthest)
}

/// Zero or more matches, greedily. Never fails.
#[derive(Clone, Debug)]
pub struct Many<P> {
    inner: P,
}

impl<P> Many<P> {
    pub fn new(inner: P) -> Self {
        Many { inner }
    }
}

impl<P: Parser> Parser for Many<P> {
    type Value = Vec<P::Value>;

    fn parse<'a>(&self, input: Input<'a>) -> ParseOutput<'a, Self::Value> {
        let (items, remainder, furthest) = collect(&self.inner, input, 0, None);
        ParseOutput::Success {
            parsed: items,
            remainder,
            furthest,
        }
    }
}

/// Between `min` and `max` matches (ABNF `min*max`).
///
/// Stops trying once `max` matches are collected; fails with the original
/// input if fewer than `min` are available. `max: None` is unbounded.
#[derive(Clone, Debug)]
pub struct Repeat<P> {
    inner: P,
    min: usize,
    max: Option<usize>,
}

impl<P> Repeat<P> {
    pub fn new(inner: P, min: usize, max: Option<usize>) -> Self {
        Repeat { inner, min, max }
    }

    /// Exactly `count` matches.
    pub fn exactly(inner: P, count: usize) -> Self {
        Repeat::new(inner, count, Some(count))
    }

    pub fn min(&self) -> usize {
        self.min
    }

    pub fn max(&self) -> Option<usize> {
        self.max
    }
}

impl<P: Parser> Parser for Repeat<P> {
    type Value = Vec<P::Value>;

    fn parse<'a>(&self, input: Input<'a>) -> ParseOutput<'a, Self::Value> {
        let (items, remainder, furthest) = collect(&self.inner, input, self.min, self.max);
        if items.len() < self.min {
            return ParseOutput::failure_with(input, furthest);
        }
        ParseOutput::Success {
            parsed: items,
            remainder,
            furthest,
        }
    }
}

/// Transform the parsed value.
#[derive(Clone, Debug)]
pub struct Map<P, F> {
    inner: P,
    f: F,
}

impl<P, F> Map<P, F> {
    pub fn new(inner: P, f: F) -> Self {
        Map { inner, f }
    }
}

impl<P, F, U> Parser for Map<P, F>
where
    P: Parser,
    F: Fn(P::Value) -> U,
{
    type Value = U;

    #[inline]
    fn parse<'a>(&self, input: Input<'a>) -> ParseOutput<'a, U> {
        self.inner.parse(input).map(&self.f)
    }
}

/// Two parsers in sequence, yielding both values.
#[derive(Clone, Debug)]
pub struct Then<A, B> {
    first: A,
    second: B,
}

impl<A, B> Then<A, B> {
    pub fn new(first: A, second: B) -> Self {
        Then { first, second }
    }
}

impl<A: Parser, B: Parser> Parser for Then<A, B> {
    type Value = (A::Value, B::Value);

    fn parse<'a>(&self, input: Input<'a>) -> ParseOutput<'a, Self::Value> {
        let (a, rest, furthest) = match self.first.parse(input) {
            ParseOutput::Success {
                parsed,
                remainder,
                furthest,
            } => (parsed, remainder, furthest),
            ParseOutput::Failure { furthest, .. } => {
                return ParseOutput::failure_with(input, furthest)
            }
        };
        match self.second.parse(rest) {
            ParseOutput::Success {
                parsed,
                remainder,
                furthest: second,
            } => ParseOutput::Success {
                parsed: (a, parsed),
                remainder,
                furthest: furthest.merged(second),
            },
            ParseOutput::Failure {
                furthest: second, ..
            } => ParseOutput::failure_with(input, furthest.merged(second)),
        }
    }
}

/// Any number of parsers in sequence with a common value type.
pub struct Sequence<T> {
    steps: Vec<BoxedParser<T>>,
}

impl<T> Sequence<T> {
    pub fn new(steps: Vec<BoxedParser<T>>) -> Self {
        Sequence { steps }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl<T> Parser for Sequence<T> {
    type Value = Vec<T>;

    fn parse<'a>(&self, input: Input<'a>) -> ParseOutput<'a, Vec<T>> {
        let mut values = Vec::with_capacity(self.steps.len());
        let mut rest = input;
        let mut furthest = Furthest::default();
        for step in &self.steps {
            match step.parse(rest) {
                ParseOutput::Success {
                    parsed,
                    remainder,
                    furthest: inner,
                } => {
                    furthest.merge(inner);
                    values.push(parsed);
                    rest = remainder;
                }
                ParseOutput::Failure { furthest: inner, .. } => {
                    return ParseOutput::failure_with(input, furthest.merged(inner));
                }
            }
        }
        ParseOutput::Success {
            parsed: values,
            remainder: rest,
            furthest,
        }
    }
}

/// A parser reported under a rule name.
///
/// Runs the inner parser with stack growth enabled, since named parsers are
/// where grammars recurse.
#[derive(Clone, Debug)]
pub struct Named<P> {
    inner: P,
    name: Cow<'static, str>,
}

impl<P> Named<P> {
    pub fn new(inner: P, name: impl Into<Cow<'static, str>>) -> Self {
        Named {
            inner,
            name: name.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<P: Parser> Parser for Named<P> {
    type Value = P::Value;

    fn parse<'a>(&self, input: Input<'a>) -> ParseOutput<'a, P::Value> {
        let out = ensure_sufficient_stack(|| self.inner.parse(input));
        tracing::trace!(
            rule = %self.name,
            at = input.position(),
            matched = out.is_success(),
            "rule"
        );
        out.named(input, self.name.clone())
    }
}
