//! Character classes: RFC 5234 core rules and RFC 3986 URI characters.
//!
//! Single characters are kept as plain `char`s in the tree; only
//! percent-encoded octets get a node of their own.

use abnf_runtime::prelude::*;
use abnf_runtime::Expectation;

/// `ALPHA = %x41-5A / %x61-7A`
#[derive(Copy, Clone, Debug, Default)]
pub struct AlphaParser;

impl Parser for AlphaParser {
    type Value = char;

    fn parse<'a>(&self, input: Input<'a>) -> ParseOutput<'a, char> {
        one_of!(input;
            CharRange::new('A', 'Z') => |c| c,
            CharRange::new('a', 'z') => |c| c,
        )
        .named(input, "ALPHA")
    }
}

/// `DIGIT = %x30-39`
pub const DIGIT: CharRange = CharRange::new('0', '9');

/// `HEXDIG = DIGIT / "A" / "B" / "C" / "D" / "E" / "F"`, either case.
#[derive(Copy, Clone, Debug, Default)]
pub struct HexDigParser;

impl Parser for HexDigParser {
    type Value = char;

    fn parse<'a>(&self, input: Input<'a>) -> ParseOutput<'a, char> {
        one_of!(input;
            DIGIT => |c| c,
            CharSet::new("ABCDEFabcdef") => |c| c,
        )
        .named(input, "HEXDIG")
    }
}

/// `pct-encoded = "%" HEXDIG HEXDIG`
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PctEncoded {
    pub percent: Lexeme,
    pub high: char,
    pub low: char,
}

impl PctEncoded {
    /// The encoded octet.
    pub fn octet(&self) -> u8 {
        let nibble = |c: char| c.to_digit(16).and_then(|d| u8::try_from(d).ok()).unwrap_or(0);
        (nibble(self.high) << 4) | nibble(self.low)
    }
}

impl Lossless for PctEncoded {
    fn write_text(&self, out: &mut String) {
        self.percent.write_text(out);
        out.push(self.high);
        out.push(self.low);
    }
}

#[derive(Copy, Clone, Debug, Default)]
pub struct PctEncodedParser;

impl Parser for PctEncodedParser {
    type Value = PctEncoded;

    fn parse<'a>(&self, input: Input<'a>) -> ParseOutput<'a, PctEncoded> {
        seq!(input;
            percent = Literal::sensitive("%"),
            high = HexDigParser,
            low = HexDigParser,
            => PctEncoded { percent, high, low }
        )
        .named(input, "pct-encoded")
    }
}

/// Which percent-encoded octets a character class accepts.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Encoded {
    None,
    Any,
    /// Anything but `%27`, the encoded single quote.
    NoSquote,
}

/// One URI character, plain or percent-encoded.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum UriChar {
    Plain(char),
    Encoded(PctEncoded),
}

impl UriChar {
    /// Append the octets this stands for: the UTF-8 encoding of a plain
    /// character, or the encoded octet.
    pub fn push_octets(&self, bytes: &mut Vec<u8>) {
        match self {
            UriChar::Plain(c) => {
                let mut buf = [0; 4];
                bytes.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
            }
            UriChar::Encoded(pct) => bytes.push(pct.octet()),
        }
    }
}

/// Percent-decode a run of URI characters as UTF-8. Invalid sequences
/// become U+FFFD.
pub fn percent_decode<'c>(chars: impl IntoIterator<Item = &'c UriChar>) -> String {
    let mut bytes = Vec::new();
    for c in chars {
        c.push_octets(&mut bytes);
    }
    String::from_utf8_lossy(&bytes).into_owned()
}

impl Lossless for UriChar {
    fn write_text(&self, out: &mut String) {
        match self {
            UriChar::Plain(c) => out.push(*c),
            UriChar::Encoded(pct) => pct.write_text(out),
        }
    }
}

/// A URI character class: `unreserved`, plus `extra` punctuation, plus
/// percent-encoded octets as `encoded` allows.
#[derive(Copy, Clone, Debug)]
pub struct UriCharParser {
    rule: &'static str,
    extra: &'static str,
    encoded: Encoded,
}

impl UriCharParser {
    pub const fn new(rule: &'static str, extra: &'static str, encoded: Encoded) -> Self {
        UriCharParser {
            rule,
            extra,
            encoded,
        }
    }
}

impl Parser for UriCharParser {
    type Value = UriChar;

    fn parse<'a>(&self, input: Input<'a>) -> ParseOutput<'a, UriChar> {
        let plain = one_of!(input;
            AlphaParser => |c| c,
            DIGIT => |c| c,
            CharSet::new(UNRESERVED_PUNCTUATION) => |c| c,
            CharSet::new(self.extra) => |c| c,
        );
        let output = match plain {
            ParseOutput::Success {
                parsed,
                remainder,
                furthest,
            } => ParseOutput::Success {
                parsed: UriChar::Plain(parsed),
                remainder,
                furthest,
            },
            ParseOutput::Failure { furthest, .. } if self.encoded == Encoded::None => {
                ParseOutput::failure_with(input, furthest)
            }
            ParseOutput::Failure { furthest, .. } => match PctEncodedParser.parse(input) {
                ParseOutput::Success { parsed, .. }
                    if self.encoded == Encoded::NoSquote && parsed.octet() == b'\'' =>
                {
                    ParseOutput::failure(input, Expectation::Rule("pct-encoded-no-SQUOTE".into()))
                }
                encoded => encoded.map(UriChar::Encoded).with_furthest(furthest),
            },
        };
        output.named(input, self.rule)
    }
}

/// `unreserved = ALPHA / DIGIT / "-" / "." / "_" / "~"`
const UNRESERVED_PUNCTUATION: &str = "-._~";

pub const UNRESERVED: UriCharParser = UriCharParser::new("unreserved", "", Encoded::None);

/// `pchar = unreserved / pct-encoded / sub-delims / ":" / "@"`
pub const PCHAR: UriCharParser = UriCharParser::new("pchar", "$&'!()*+,;=:@", Encoded::Any);

/// `pchar-no-SQUOTE = unreserved / pct-encoded-no-SQUOTE / other-delims / "$" / "&" / "=" / ":" / "@"`
pub const PCHAR_NO_SQUOTE: UriCharParser =
    UriCharParser::new("pchar-no-SQUOTE", "!()*+,;$&=:@", Encoded::NoSquote);

/// `host = 1*( unreserved / pct-encoded )`
pub const HOST_CHAR: UriCharParser = UriCharParser::new("host", "", Encoded::Any);

/// `qchar-no-AMP`
pub const QCHAR_NO_AMP: UriCharParser = UriCharParser::new("qchar-no-AMP", "!()*+,;:@/?$'=", Encoded::Any);

/// `qchar-no-AMP-EQ`
pub const QCHAR_NO_AMP_EQ: UriCharParser =
    UriCharParser::new("qchar-no-AMP-EQ", "!()*+,;:@/?$'", Encoded::Any);

/// `qchar-no-AMP-EQ-AT-DOLLAR`
pub const QCHAR_NO_AMP_EQ_AT_DOLLAR: UriCharParser =
    UriCharParser::new("qchar-no-AMP-EQ-AT-DOLLAR", "!()*+,;:/?'", Encoded::Any);
