//! Furthest-failure tracking.
//!
//! A plain combinator parser only knows that a rule failed at its start. To
//! say *where* and *why* input was rejected, every result also carries the
//! deepest position at which any primitive failed, together with what was
//! expected there. Merging keeps the deeper of two records and unions the
//! expectations of records at the same depth.

use std::borrow::Cow;
use std::fmt;

use smallvec::SmallVec;

/// Something a parser was looking for when it failed.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum Expectation {
    /// Literal text.
    Literal(Cow<'static, str>),
    /// A character in an inclusive range.
    CharRange(char, char),
    /// Any one of a set of characters.
    OneOf(Cow<'static, str>),
    /// A named rule.
    Rule(Cow<'static, str>),
    EndOfInput,
}

impl fmt::Display for Expectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expectation::Literal(text) => write!(f, "{text:?}"),
            Expectation::CharRange(lo, hi) if lo == hi => write!(f, "{lo:?}"),
            Expectation::CharRange(lo, hi) => write!(f, "{lo:?}..={hi:?}"),
            Expectation::OneOf(chars) => write!(f, "one of {chars:?}"),
            Expectation::Rule(name) => write!(f, "{name}"),
            Expectation::EndOfInput => write!(f, "end of input"),
        }
    }
}

/// The deepest failure seen so far.
///
/// An empty record (no expectations) means nothing has failed yet and loses
/// every merge.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Furthest {
    position: usize,
    expected: SmallVec<[Expectation; 2]>,
}

impl Furthest {
    /// A failure at `position` expecting `expectation`.
    pub fn at(position: usize, expectation: Expectation) -> Self {
        let mut expected = SmallVec::new();
        expected.push(expectation);
        Furthest { position, expected }
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn expected(&self) -> &[Expectation] {
        &self.expected
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.expected.is_empty()
    }

    /// Keep whichever record is deeper; union them on a tie.
    pub fn merge(&mut self, other: Furthest) {
        if other.is_empty() {
            return;
        }
        if self.is_empty() || other.position > self.position {
            *self = other;
            return;
        }
        if other.position == self.position {
            for expectation in other.expected {
                if !self.expected.contains(&expectation) {
                    self.expected.push(expectation);
                }
            }
        }
    }

    /// Merge, returning the result.
    #[must_use]
    pub fn merged(mut self, other: Furthest) -> Self {
        self.merge(other);
        self
    }

    /// Replace expectations recorded exactly at `start` with the rule name.
    ///
    /// Failures deeper than the rule's start are more specific and are kept.
    pub fn relabel(&mut self, start: usize, rule: Cow<'static, str>) {
        if !self.is_empty() && self.position == start {
            self.expected.clear();
            self.expected.push(Expectation::Rule(rule));
        }
    }

    /// Human-readable list of expectations: `a`, `a or b`, `a, b, or c`.
    pub fn describe(&self) -> String {
        let items: Vec<String> = self.expected.iter().map(ToString::to_string).collect();
        match items.as_slice() {
            [] => "valid input".to_string(),
            [only] => only.clone(),
            [first, second] => format!("{first} or {second}"),
            [init @ .., last] => format!("{}, or {last}", init.join(", ")),
        }
    }
}
