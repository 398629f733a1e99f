//! ABNF runtime: the parser-combinator core behind every rule parser.
//!
//! # Overview
//!
//! A rule parser is a pure object from an [`Input`] cursor to a
//! [`ParseOutput`]. Rules are composed from a handful of pieces:
//!
//! | Piece | Meaning | Fails? |
//! |-------|---------|--------|
//! | [`Literal`], [`CharRange`], [`CharSet`] | terminals | yes |
//! | [`Or`], [`Alt`], [`one_of!`] | ordered choice | if every alternative fails |
//! | [`seq!`], [`Then`], [`Sequence`] | sequencing | if any step fails |
//! | [`Optional`] | zero or one | never |
//! | [`Many`] | zero or more | never |
//! | [`Repeat`] | `min*max` | if fewer than `min` |
//!
//! # The failure convention
//!
//! A failed parse returns the input it was given as its remainder, never a
//! partially-advanced cursor. Alternation relies on this to retry the next
//! alternative from the same place. Every combinator here (and every body
//! built with [`seq!`] and [`one_of!`]) upholds it.
//!
//! # Diagnostics
//!
//! Results also carry a [`Furthest`] record: the deepest position at which
//! anything failed and what was expected there. [`parse_complete`] turns it
//! into a [`ParseFailure`] such as "expected `-` at offset 7".
//!
//! # Sharing
//!
//! Parsers hold no mutable state. Typed rule parsers are zero-sized, and
//! [`BoxedParser`] requires `Send + Sync`, so one parser graph can serve many
//! threads at once.

mod combinator;
mod complete;
mod expected;
mod input;
mod lossless;
mod macros;
mod output;
mod parser;
mod primitive;
pub mod stack;

pub use combinator::{Alt, Many, Map, Named, Optional, Or, Repeat, Sequence, Then};
pub use complete::{parse_complete, parse_prefix, ParseFailure};
pub use expected::{Expectation, Furthest};
pub use input::{Case, Input, SourceText};
pub use lossless::{Lexeme, Lossless};
pub use output::ParseOutput;
pub use parser::{from_fn, BoxedParser, FnParser, Parser, ParserExt};
pub use primitive::{CharRange, CharSet, EndOfInput, Literal};

/// Everything a rule module needs.
pub mod prelude {
    pub use crate::{
        one_of, seq, CharRange, CharSet, Input, Lexeme, Literal, Lossless, ParseOutput, Parser,
        ParserExt,
    };
}
