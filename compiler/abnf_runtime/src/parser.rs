//! The parser trait.

use std::borrow::Cow;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::combinator::{Alt, Many, Map, Named, Optional, Repeat, Then};
use crate::{Input, ParseOutput};

/// A parser: a pure function from an input cursor to a [`ParseOutput`].
///
/// Implementations hold only construction-time wiring, so a parser can be
/// shared freely, including across threads.
///
/// Contract:
/// - a success's remainder is never behind the input;
/// - a failure's remainder is the input, unchanged.
pub trait Parser {
    type Value;

    fn parse<'a>(&self, input: Input<'a>) -> ParseOutput<'a, Self::Value>;
}

/// A type-erased, thread-shareable parser.
pub type BoxedParser<T> = Box<dyn Parser<Value = T> + Send + Sync>;

impl<P: Parser + ?Sized> Parser for &P {
    type Value = P::Value;

    #[inline]
    fn parse<'a>(&self, input: Input<'a>) -> ParseOutput<'a, Self::Value> {
        (**self).parse(input)
    }
}

impl<P: Parser + ?Sized> Parser for Box<P> {
    type Value = P::Value;

    #[inline]
    fn parse<'a>(&self, input: Input<'a>) -> ParseOutput<'a, Self::Value> {
        (**self).parse(input)
    }
}

impl<P: Parser + ?Sized> Parser for Arc<P> {
    type Value = P::Value;

    #[inline]
    fn parse<'a>(&self, input: Input<'a>) -> ParseOutput<'a, Self::Value> {
        (**self).parse(input)
    }
}

/// A parser built from a function.
pub struct FnParser<F, T> {
    f: F,
    _value: PhantomData<fn() -> T>,
}

/// Wrap a function as a parser.
pub fn from_fn<T, F>(f: F) -> FnParser<F, T>
where
    F: for<'a> Fn(Input<'a>) -> ParseOutput<'a, T>,
{
    FnParser {
        f,
        _value: PhantomData,
    }
}

impl<F, T> Parser for FnParser<F, T>
where
    F: for<'a> Fn(Input<'a>) -> ParseOutput<'a, T>,
{
    type Value = T;

    #[inline]
    fn parse<'a>(&self, input: Input<'a>) -> ParseOutput<'a, T> {
        (self.f)(input)
    }
}

/// Combinator methods available on every sized parser.
pub trait ParserExt: Parser + Sized {
    /// Transform the parsed value.
    fn map<U, F>(self, f: F) -> Map<Self, F>
    where
        F: Fn(Self::Value) -> U,
    {
        Map::new(self, f)
    }

    /// Ordered choice: try `self`, then `other` from the same input.
    fn or<Q>(self, other: Q) -> Alt<Self, Q>
    where
        Q: Parser<Value = Self::Value>,
    {
        Alt::new(self, other)
    }

    fn optional(self) -> Optional<Self> {
        Optional::new(self)
    }

    fn many(self) -> Many<Self> {
        Many::new(self)
    }

    /// Between `min` and `max` matches; `None` means no upper bound.
    fn repeat(self, min: usize, max: Option<usize>) -> Repeat<Self> {
        Repeat::new(self, min, max)
    }

    /// Sequence: `self`, then `next` on the remainder.
    fn then<Q: Parser>(self, next: Q) -> Then<Self, Q> {
        Then::new(self, next)
    }

    /// Report failures at this parser's start as the given rule name.
    fn named(self, name: impl Into<Cow<'static, str>>) -> Named<Self> {
        Named::new(self, name)
    }

    fn boxed(self) -> BoxedParser<Self::Value>
    where
        Self: Send + Sync + 'static,
    {
        Box::new(self)
    }
}

impl<P: Parser> ParserExt for P {}
