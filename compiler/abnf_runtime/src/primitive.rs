//! Terminal parsers: literal text, character ranges and sets, end of input.

use std::borrow::Cow;

use crate::{Case, Expectation, Input, Lexeme, ParseOutput, Parser};

/// Literal text, matched case-sensitively or ASCII-case-insensitively.
///
/// Yields a [`Lexeme`] holding the text exactly as it appeared in the input,
/// so an insensitive match on `"true"` against `TRUE` still round-trips.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Literal {
    text: Cow<'static, str>,
    case: Case,
}

impl Literal {
    pub const fn sensitive(text: &'static str) -> Self {
        Literal {
            text: Cow::Borrowed(text),
            case: Case::Sensitive,
        }
    }

    pub const fn insensitive(text: &'static str) -> Self {
        Literal {
            text: Cow::Borrowed(text),
            case: Case::Insensitive,
        }
    }

    pub fn new(text: impl Into<Cow<'static, str>>, case: Case) -> Self {
        Literal {
            text: text.into(),
            case,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn case(&self) -> Case {
        self.case
    }
}

impl Parser for Literal {
    type Value = Lexeme;

    fn parse<'a>(&self, input: Input<'a>) -> ParseOutput<'a, Lexeme> {
        match input.match_str(&self.text, self.case) {
            Some(len) => {
                let end = input.advance(len);
                ParseOutput::success(Lexeme::new(end.span_from(input), end.text_since(input)), end)
            }
            None => ParseOutput::failure(input, Expectation::Literal(self.text.clone())),
        }
    }
}

/// One character in an inclusive code point range.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct CharRange {
    lo: char,
    hi: char,
}

impl CharRange {
    pub const fn new(lo: char, hi: char) -> Self {
        CharRange { lo, hi }
    }

    /// Exactly one character.
    pub const fn single(c: char) -> Self {
        CharRange { lo: c, hi: c }
    }
}

impl Parser for CharRange {
    type Value = char;

    #[inline]
    fn parse<'a>(&self, input: Input<'a>) -> ParseOutput<'a, char> {
        match input.current() {
            Some(c) if (self.lo..=self.hi).contains(&c) => ParseOutput::success(c, input.advance(1)),
            _ => ParseOutput::failure(input, Expectation::CharRange(self.lo, self.hi)),
        }
    }
}

/// One character from a fixed set.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CharSet {
    chars: Cow<'static, str>,
}

impl CharSet {
    pub const fn new(chars: &'static str) -> Self {
        CharSet {
            chars: Cow::Borrowed(chars),
        }
    }
}

impl Parser for CharSet {
    type Value = char;

    #[inline]
    fn parse<'a>(&self, input: Input<'a>) -> ParseOutput<'a, char> {
        match input.current() {
            Some(c) if self.chars.contains(c) => ParseOutput::success(c, input.advance(1)),
            _ => ParseOutput::failure(input, Expectation::OneOf(self.chars.clone())),
        }
    }
}

/// Succeeds, consuming nothing, only at the end of input.
#[derive(Copy, Clone, Debug, Default)]
pub struct EndOfInput;

impl Parser for EndOfInput {
    type Value = ();

    fn parse<'a>(&self, input: Input<'a>) -> ParseOutput<'a, ()> {
        if input.at_end() {
            ParseOutput::success((), input)
        } else {
            ParseOutput::failure(input, Expectation::EndOfInput)
        }
    }
}
