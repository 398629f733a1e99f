//! Punctuation and whitespace.
//!
//! URIs may carry most punctuation percent-encoded, so each delimiter has a
//! plain and an encoded form. The plain form is a fixed character and gets
//! a payload-free variant; the encoded form keeps its text, since `%2c`
//! and `%2C` are both accepted.

use abnf_runtime::prelude::*;

/// `EQ = "="`
pub const EQ: Literal = Literal::sensitive("=");

/// `SIGN = "+" / "%2B" / "-"`
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Sign {
    Plus,
    EncodedPlus(Lexeme),
    Minus,
}

impl Sign {
    pub fn is_negative(&self) -> bool {
        matches!(self, Sign::Minus)
    }
}

impl Lossless for Sign {
    fn write_text(&self, out: &mut String) {
        match self {
            Sign::Plus => out.push('+'),
            Sign::EncodedPlus(lexeme) => lexeme.write_text(out),
            Sign::Minus => out.push('-'),
        }
    }
}

#[derive(Copy, Clone, Debug, Default)]
pub struct SignParser;

impl Parser for SignParser {
    type Value = Sign;

    fn parse<'a>(&self, input: Input<'a>) -> ParseOutput<'a, Sign> {
        one_of!(input;
            Literal::sensitive("+") => |_| Sign::Plus,
            Literal::insensitive("%2B") => Sign::EncodedPlus,
            Literal::sensitive("-") => |_| Sign::Minus,
        )
        .named(input, "SIGN")
    }
}

macro_rules! delimiter {
    ($(#[$doc:meta])* $name:ident, $parser:ident, $rule:literal, $plain:literal, $encoded:literal) => {
        $(#[$doc])*
        #[derive(Clone, Debug, Eq, PartialEq)]
        pub enum $name {
            Plain,
            Encoded(Lexeme),
        }

        impl Lossless for $name {
            fn write_text(&self, out: &mut String) {
                match self {
                    $name::Plain => out.push_str($plain),
                    $name::Encoded(lexeme) => lexeme.write_text(out),
                }
            }
        }

        #[derive(Copy, Clone, Debug, Default)]
        pub struct $parser;

        impl Parser for $parser {
            type Value = $name;

            fn parse<'a>(&self, input: Input<'a>) -> ParseOutput<'a, $name> {
                one_of!(input;
                    Literal::sensitive($plain) => |_| $name::Plain,
                    Literal::insensitive($encoded) => $name::Encoded,
                )
                .named(input, $rule)
            }
        }
    };
}

delimiter!(
    /// `COMMA = "," / "%2C"`
    Comma, CommaParser, "COMMA", ",", "%2C"
);
delimiter!(
    /// `STAR = "*" / "%2A"`
    Star, StarParser, "STAR", "*", "%2A"
);
delimiter!(
    /// `OPEN = "(" / "%28"`
    Open, OpenParser, "OPEN", "(", "%28"
);
delimiter!(
    /// `CLOSE = ")" / "%29"`
    Close, CloseParser, "CLOSE", ")", "%29"
);
delimiter!(
    /// `SQUOTE = "'" / "%27"`
    Squote, SquoteParser, "SQUOTE", "'", "%27"
);

/// `SP / HTAB / "%20" / "%09"`
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Whitespace {
    Space,
    Tab,
    Encoded(Lexeme),
}

impl Lossless for Whitespace {
    fn write_text(&self, out: &mut String) {
        match self {
            Whitespace::Space => out.push(' '),
            Whitespace::Tab => out.push('\t'),
            Whitespace::Encoded(lexeme) => lexeme.write_text(out),
        }
    }
}

#[derive(Copy, Clone, Debug, Default)]
pub struct WhitespaceParser;

impl Parser for WhitespaceParser {
    type Value = Whitespace;

    fn parse<'a>(&self, input: Input<'a>) -> ParseOutput<'a, Whitespace> {
        one_of!(input;
            CharRange::single(' ') => |_| Whitespace::Space,
            CharRange::single('\t') => |_| Whitespace::Tab,
            Literal::sensitive("%20") => Whitespace::Encoded,
            Literal::sensitive("%09") => Whitespace::Encoded,
        )
    }
}

/// A run of whitespace: `OWS`, `BWS` or `RWS`.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Blank(pub Vec<Whitespace>);

impl Lossless for Blank {
    fn write_text(&self, out: &mut String) {
        self.0.write_text(out);
    }
}

/// `OWS = *( SP / HTAB / "%20" / "%09" )`
#[derive(Copy, Clone, Debug, Default)]
pub struct OwsParser;

impl Parser for OwsParser {
    type Value = Blank;

    fn parse<'a>(&self, input: Input<'a>) -> ParseOutput<'a, Blank> {
        WhitespaceParser.many().map(Blank).parse(input)
    }
}

/// `BWS`, "bad" whitespace: allowed, but should not be produced.
#[derive(Copy, Clone, Debug, Default)]
pub struct BwsParser;

impl Parser for BwsParser {
    type Value = Blank;

    fn parse<'a>(&self, input: Input<'a>) -> ParseOutput<'a, Blank> {
        WhitespaceParser.many().map(Blank).parse(input)
    }
}

/// `RWS = 1*( SP / HTAB / "%20" / "%09" )`
#[derive(Copy, Clone, Debug, Default)]
pub struct RwsParser;

impl Parser for RwsParser {
    type Value = Blank;

    fn parse<'a>(&self, input: Input<'a>) -> ParseOutput<'a, Blank> {
        WhitespaceParser
            .repeat(1, None)
            .map(Blank)
            .parse(input)
            .named(input, "RWS")
    }
}
