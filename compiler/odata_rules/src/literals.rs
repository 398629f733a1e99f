//! Primitive literals.
//!
//! ```text
//! primitiveValue   = booleanValue / guidValue / durationValue
//!                  / dateTimeOffsetValue / dateValue / timeOfDayValue
//!                  / decimalValue / binary / string
//! primitiveLiteral = nullValue / primitiveValue
//! ```
//!
//! Alternatives are tried in that order, so `2012-12-03T07:16:23Z` is a
//! `dateTimeOffsetValue` rather than a `dateValue` followed by junk, and
//! `-INF` is a decimal because nothing earlier accepts a leading `-I`.

use abnf_runtime::prelude::*;
use abnf_runtime::stack::ensure_sufficient_stack;

use crate::chars::{AlphaParser, HexDigParser, UriChar, DIGIT, PCHAR_NO_SQUOTE};
use crate::punctuation::{Sign, SignParser, Squote, SquoteParser};
use crate::temporal::{
    DateTimeOffsetValue, DateTimeOffsetValueParser, DateValue, DateValueParser, Fraction,
    TimeOfDayValue, TimeOfDayValueParser,
};

fn digits_text(digits: &[char]) -> String {
    digits.iter().collect()
}

/// `"." 1*DIGIT`
#[derive(Copy, Clone, Debug, Default)]
struct FractionParser;

impl Parser for FractionParser {
    type Value = Fraction;

    fn parse<'a>(&self, input: Input<'a>) -> ParseOutput<'a, Fraction> {
        Literal::sensitive(".")
            .then(DIGIT.repeat(1, None))
            .map(|(dot, digits)| Fraction { dot, digits })
            .parse(input)
    }
}

/// `nullValue = 'null'`
pub const NULL_VALUE: Literal = Literal::sensitive("null");

/// `booleanValue = "true" / "false"`
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum BooleanValue {
    True(Lexeme),
    False(Lexeme),
}

impl BooleanValue {
    pub fn value(&self) -> bool {
        matches!(self, BooleanValue::True(_))
    }
}

impl Lossless for BooleanValue {
    fn write_text(&self, out: &mut String) {
        match self {
            BooleanValue::True(lexeme) | BooleanValue::False(lexeme) => lexeme.write_text(out),
        }
    }
}

#[derive(Copy, Clone, Debug, Default)]
pub struct BooleanValueParser;

impl Parser for BooleanValueParser {
    type Value = BooleanValue;

    fn parse<'a>(&self, input: Input<'a>) -> ParseOutput<'a, BooleanValue> {
        one_of!(input;
            Literal::insensitive("true") => BooleanValue::True,
            Literal::insensitive("false") => BooleanValue::False,
        )
        .named(input, "booleanValue")
    }
}

/// `nanInfinity = 'NaN' / '-INF' / 'INF'`
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum NanInfinity {
    NaN,
    NegativeInfinity,
    Infinity,
}

impl Lossless for NanInfinity {
    fn write_text(&self, out: &mut String) {
        out.push_str(match self {
            NanInfinity::NaN => "NaN",
            NanInfinity::NegativeInfinity => "-INF",
            NanInfinity::Infinity => "INF",
        });
    }
}

#[derive(Copy, Clone, Debug, Default)]
pub struct NanInfinityParser;

impl Parser for NanInfinityParser {
    type Value = NanInfinity;

    fn parse<'a>(&self, input: Input<'a>) -> ParseOutput<'a, NanInfinity> {
        one_of!(input;
            Literal::sensitive("NaN") => |_| NanInfinity::NaN,
            Literal::sensitive("-INF") => |_| NanInfinity::NegativeInfinity,
            Literal::sensitive("INF") => |_| NanInfinity::Infinity,
        )
        .named(input, "nanInfinity")
    }
}

/// `"e" [ SIGN ] 1*DIGIT`
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Exponent {
    pub e: Lexeme,
    pub sign: Option<Sign>,
    pub digits: Vec<char>,
}

impl Lossless for Exponent {
    fn write_text(&self, out: &mut String) {
        self.e.write_text(out);
        self.sign.write_text(out);
        self.digits.write_text(out);
    }
}

/// `[ SIGN ] 1*DIGIT [ "." 1*DIGIT ] [ "e" [ SIGN ] 1*DIGIT ]`
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Number {
    pub sign: Option<Sign>,
    pub digits: Vec<char>,
    pub fraction: Option<Fraction>,
    pub exponent: Option<Exponent>,
}

impl Number {
    pub fn is_integer(&self) -> bool {
        self.fraction.is_none() && self.exponent.is_none()
    }
}

impl Lossless for Number {
    fn write_text(&self, out: &mut String) {
        self.sign.write_text(out);
        self.digits.write_text(out);
        self.fraction.write_text(out);
        self.exponent.write_text(out);
    }
}

/// `decimalValue = [ SIGN ] 1*DIGIT [ "." 1*DIGIT ] [ "e" [ SIGN ] 1*DIGIT ] / nanInfinity`
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DecimalValue {
    Number(Number),
    NanInfinity(NanInfinity),
}

impl DecimalValue {
    /// The value as a double, rounding as `str::parse` does.
    pub fn to_f64(&self) -> f64 {
        match self {
            DecimalValue::NanInfinity(NanInfinity::NaN) => f64::NAN,
            DecimalValue::NanInfinity(NanInfinity::NegativeInfinity) => f64::NEG_INFINITY,
            DecimalValue::NanInfinity(NanInfinity::Infinity) => f64::INFINITY,
            DecimalValue::Number(number) => {
                let mut text = String::new();
                if number.sign.as_ref().is_some_and(Sign::is_negative) {
                    text.push('-');
                }
                text.push_str(&digits_text(&number.digits));
                if let Some(fraction) = &number.fraction {
                    text.push('.');
                    text.push_str(&digits_text(&fraction.digits));
                }
                if let Some(exponent) = &number.exponent {
                    text.push('e');
                    if exponent.sign.as_ref().is_some_and(Sign::is_negative) {
                        text.push('-');
                    }
                    text.push_str(&digits_text(&exponent.digits));
                }
                text.parse().unwrap_or(f64::NAN)
            }
        }
    }
}

impl Lossless for DecimalValue {
    fn write_text(&self, out: &mut String) {
        match self {
            DecimalValue::Number(number) => number.write_text(out),
            DecimalValue::NanInfinity(value) => value.write_text(out),
        }
    }
}

#[derive(Copy, Clone, Debug, Default)]
struct NumberParser;

impl Parser for NumberParser {
    type Value = Number;

    fn parse<'a>(&self, input: Input<'a>) -> ParseOutput<'a, Number> {
        let exponent = Literal::insensitive("e")
            .then(SignParser.optional())
            .then(DIGIT.repeat(1, None))
            .map(|((e, sign), digits)| Exponent { e, sign, digits });
        seq!(input;
            sign = SignParser.optional(),
            digits = DIGIT.repeat(1, None),
            fraction = FractionParser.optional(),
            exponent = exponent.optional(),
            => Number { sign, digits, fraction, exponent }
        )
    }
}

#[derive(Copy, Clone, Debug, Default)]
pub struct DecimalValueParser;

impl Parser for DecimalValueParser {
    type Value = DecimalValue;

    fn parse<'a>(&self, input: Input<'a>) -> ParseOutput<'a, DecimalValue> {
        one_of!(input;
            NumberParser => DecimalValue::Number,
            NanInfinityParser => DecimalValue::NanInfinity,
        )
        .named(input, "decimalValue")
    }
}

/// `guidValue = 8HEXDIG "-" 4HEXDIG "-" 4HEXDIG "-" 4HEXDIG "-" 12HEXDIG`
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GuidValue {
    pub data1: Vec<char>,
    pub dash1: Lexeme,
    pub data2: Vec<char>,
    pub dash2: Lexeme,
    pub data3: Vec<char>,
    pub dash3: Lexeme,
    pub data4: Vec<char>,
    pub dash4: Lexeme,
    pub data5: Vec<char>,
}

impl GuidValue {
    /// The 32 hex digits, lowercased, without dashes.
    pub fn hex(&self) -> String {
        [&self.data1, &self.data2, &self.data3, &self.data4, &self.data5]
            .into_iter()
            .flatten()
            .map(char::to_ascii_lowercase)
            .collect()
    }
}

impl Lossless for GuidValue {
    fn write_text(&self, out: &mut String) {
        self.data1.write_text(out);
        self.dash1.write_text(out);
        self.data2.write_text(out);
        self.dash2.write_text(out);
        self.data3.write_text(out);
        self.dash3.write_text(out);
        self.data4.write_text(out);
        self.dash4.write_text(out);
        self.data5.write_text(out);
    }
}

#[derive(Copy, Clone, Debug, Default)]
pub struct GuidValueParser;

impl Parser for GuidValueParser {
    type Value = GuidValue;

    fn parse<'a>(&self, input: Input<'a>) -> ParseOutput<'a, GuidValue> {
        let hex = |n| HexDigParser.repeat(n, Some(n));
        seq!(input;
            data1 = hex(8),
            dash1 = Literal::sensitive("-"),
            data2 = hex(4),
            dash2 = Literal::sensitive("-"),
            data3 = hex(4),
            dash3 = Literal::sensitive("-"),
            data4 = hex(4),
            dash4 = Literal::sensitive("-"),
            data5 = hex(12),
            => GuidValue { data1, dash1, data2, dash2, data3, dash3, data4, dash4, data5 }
        )
        .named(input, "guidValue")
    }
}

/// `1*DIGIT unit`, one component of a duration.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DurationPart {
    pub digits: Vec<char>,
    pub unit: Lexeme,
}

impl DurationPart {
    pub fn amount(&self) -> u64 {
        digits_text(&self.digits).parse().unwrap_or(u64::MAX)
    }
}

impl Lossless for DurationPart {
    fn write_text(&self, out: &mut String) {
        self.digits.write_text(out);
        self.unit.write_text(out);
    }
}

#[derive(Copy, Clone, Debug)]
struct DurationPartParser {
    unit: &'static str,
}

impl Parser for DurationPartParser {
    type Value = DurationPart;

    fn parse<'a>(&self, input: Input<'a>) -> ParseOutput<'a, DurationPart> {
        DIGIT
            .repeat(1, None)
            .then(Literal::insensitive(self.unit))
            .map(|(digits, unit)| DurationPart { digits, unit })
            .parse(input)
    }
}

/// `1*DIGIT [ "." 1*DIGIT ] "S"`
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DurationSeconds {
    pub digits: Vec<char>,
    pub fraction: Option<Fraction>,
    pub unit: Lexeme,
}

impl Lossless for DurationSeconds {
    fn write_text(&self, out: &mut String) {
        self.digits.write_text(out);
        self.fraction.write_text(out);
        self.unit.write_text(out);
    }
}

/// `"T" [ 1*DIGIT "H" ] [ 1*DIGIT "M" ] [ 1*DIGIT [ "." 1*DIGIT ] "S" ]`
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DurationTime {
    pub t: Lexeme,
    pub hours: Option<DurationPart>,
    pub minutes: Option<DurationPart>,
    pub seconds: Option<DurationSeconds>,
}

impl Lossless for DurationTime {
    fn write_text(&self, out: &mut String) {
        self.t.write_text(out);
        self.hours.write_text(out);
        self.minutes.write_text(out);
        self.seconds.write_text(out);
    }
}

#[derive(Copy, Clone, Debug, Default)]
struct DurationTimeParser;

impl Parser for DurationTimeParser {
    type Value = DurationTime;

    fn parse<'a>(&self, input: Input<'a>) -> ParseOutput<'a, DurationTime> {
        let seconds = DIGIT
            .repeat(1, None)
            .then(FractionParser.optional())
            .then(Literal::insensitive("S"))
            .map(|((digits, fraction), unit)| DurationSeconds {
                digits,
                fraction,
                unit,
            });
        seq!(input;
            t = Literal::insensitive("T"),
            hours = DurationPartParser { unit: "H" }.optional(),
            minutes = DurationPartParser { unit: "M" }.optional(),
            seconds = seconds.optional(),
            => DurationTime { t, hours, minutes, seconds }
        )
    }
}

/// `durationValue = [ SIGN ] "P" [ 1*DIGIT "D" ] [ "T" ... ]`
///
/// A bare `P` is accepted: every component is optional.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DurationValue {
    pub sign: Option<Sign>,
    pub p: Lexeme,
    pub days: Option<DurationPart>,
    pub time: Option<DurationTime>,
}

impl Lossless for DurationValue {
    fn write_text(&self, out: &mut String) {
        self.sign.write_text(out);
        self.p.write_text(out);
        self.days.write_text(out);
        self.time.write_text(out);
    }
}

#[derive(Copy, Clone, Debug, Default)]
pub struct DurationValueParser;

impl Parser for DurationValueParser {
    type Value = DurationValue;

    fn parse<'a>(&self, input: Input<'a>) -> ParseOutput<'a, DurationValue> {
        seq!(input;
            sign = SignParser.optional(),
            p = Literal::insensitive("P"),
            days = DurationPartParser { unit: "D" }.optional(),
            time = DurationTimeParser.optional(),
            => DurationValue { sign, p, days, time }
        )
        .named(input, "durationValue")
    }
}

/// `base64char = ALPHA / DIGIT / "-" / "_"`
#[derive(Copy, Clone, Debug, Default)]
struct Base64CharParser;

impl Parser for Base64CharParser {
    type Value = char;

    fn parse<'a>(&self, input: Input<'a>) -> ParseOutput<'a, char> {
        one_of!(input;
            AlphaParser => |c| c,
            DIGIT => |c| c,
            CharSet::new("-_") => |c| c,
        )
        .named(input, "base64char")
    }
}

/// The short final group of a `binaryValue`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Base64Tail {
    /// `base64b16 = 2base64char ( 'A' / 'E' / ... / '8' ) [ "=" ]`
    B16 {
        chars: Vec<char>,
        last: char,
        pad: Option<Lexeme>,
    },
    /// `base64b8 = base64char ( 'A' / 'Q' / 'g' / 'w' ) [ "==" ]`
    B8 {
        first: char,
        last: char,
        pad: Option<Lexeme>,
    },
}

impl Lossless for Base64Tail {
    fn write_text(&self, out: &mut String) {
        match self {
            Base64Tail::B16 { chars, last, pad } => {
                chars.write_text(out);
                out.push(*last);
                pad.write_text(out);
            }
            Base64Tail::B8 { first, last, pad } => {
                out.push(*first);
                out.push(*last);
                pad.write_text(out);
            }
        }
    }
}

#[derive(Copy, Clone, Debug, Default)]
struct Base64TailParser;

impl Parser for Base64TailParser {
    type Value = Base64Tail;

    fn parse<'a>(&self, input: Input<'a>) -> ParseOutput<'a, Base64Tail> {
        let b16 = |input: Input<'a>| {
            seq!(input;
                chars = Base64CharParser.repeat(2, Some(2)),
                last = CharSet::new("AEIMQUYcgkosw048"),
                pad = Literal::sensitive("=").optional(),
                => Base64Tail::B16 { chars, last, pad }
            )
        };
        let b8 = |input: Input<'a>| {
            seq!(input;
                first = Base64CharParser,
                last = CharSet::new("AQgw"),
                pad = Literal::sensitive("==").optional(),
                => Base64Tail::B8 { first, last, pad }
            )
        };
        match b16(input) {
            ParseOutput::Failure { furthest, .. } => b8(input).with_furthest(furthest),
            success => success,
        }
    }
}

/// `binaryValue = *( 4base64char ) [ base64b16 / base64b8 ]`
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BinaryValue {
    pub quads: Vec<Vec<char>>,
    pub tail: Option<Base64Tail>,
}

impl Lossless for BinaryValue {
    fn write_text(&self, out: &mut String) {
        self.quads.write_text(out);
        self.tail.write_text(out);
    }
}

/// `binary = "binary" SQUOTE binaryValue SQUOTE`
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Binary {
    pub prefix: Lexeme,
    pub open: Squote,
    pub value: BinaryValue,
    pub close: Squote,
}

impl Lossless for Binary {
    fn write_text(&self, out: &mut String) {
        self.prefix.write_text(out);
        self.open.write_text(out);
        self.value.write_text(out);
        self.close.write_text(out);
    }
}

#[derive(Copy, Clone, Debug, Default)]
pub struct BinaryParser;

impl Parser for BinaryParser {
    type Value = Binary;

    fn parse<'a>(&self, input: Input<'a>) -> ParseOutput<'a, Binary> {
        let value = Base64CharParser
            .repeat(4, Some(4))
            .many()
            .then(Base64TailParser.optional())
            .map(|(quads, tail)| BinaryValue { quads, tail });
        seq!(input;
            prefix = Literal::insensitive("binary"),
            open = SquoteParser,
            value = value,
            close = SquoteParser,
            => Binary { prefix, open, value, close }
        )
        .named(input, "binary")
    }
}

/// One character of a string literal.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum StringChar {
    /// `SQUOTE-in-string = SQUOTE SQUOTE`
    EscapedQuote(Squote, Squote),
    Char(UriChar),
}

impl Lossless for StringChar {
    fn write_text(&self, out: &mut String) {
        match self {
            StringChar::EscapedQuote(first, second) => {
                first.write_text(out);
                second.write_text(out);
            }
            StringChar::Char(c) => c.write_text(out),
        }
    }
}

/// `string = SQUOTE *( SQUOTE-in-string / pchar-no-SQUOTE ) SQUOTE`
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StringValue {
    pub open: Squote,
    pub chars: Vec<StringChar>,
    pub close: Squote,
}

impl StringValue {
    /// The string's value: quotes unescaped, percent-encoding decoded as
    /// UTF-8 (invalid sequences become U+FFFD).
    pub fn value(&self) -> String {
        let mut bytes = Vec::new();
        for c in &self.chars {
            match c {
                StringChar::EscapedQuote(..) => bytes.push(b'\''),
                StringChar::Char(c) => c.push_octets(&mut bytes),
            }
        }
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

impl Lossless for StringValue {
    fn write_text(&self, out: &mut String) {
        self.open.write_text(out);
        self.chars.write_text(out);
        self.close.write_text(out);
    }
}

#[derive(Copy, Clone, Debug, Default)]
struct StringCharParser;

impl Parser for StringCharParser {
    type Value = StringChar;

    fn parse<'a>(&self, input: Input<'a>) -> ParseOutput<'a, StringChar> {
        one_of!(input;
            SquoteParser.then(SquoteParser) => |(first, second)| StringChar::EscapedQuote(first, second),
            PCHAR_NO_SQUOTE => StringChar::Char,
        )
    }
}

#[derive(Copy, Clone, Debug, Default)]
pub struct StringValueParser;

impl Parser for StringValueParser {
    type Value = StringValue;

    fn parse<'a>(&self, input: Input<'a>) -> ParseOutput<'a, StringValue> {
        seq!(input;
            open = SquoteParser,
            chars = StringCharParser.many(),
            close = SquoteParser,
            => StringValue { open, chars, close }
        )
        .named(input, "string")
    }
}

/// `primitiveValue`
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PrimitiveValue {
    Boolean(BooleanValue),
    Guid(GuidValue),
    Duration(DurationValue),
    DateTimeOffset(DateTimeOffsetValue),
    Date(DateValue),
    TimeOfDay(TimeOfDayValue),
    Decimal(DecimalValue),
    Binary(Binary),
    String(StringValue),
}

impl PrimitiveValue {
    /// The EDM type name this literal denotes.
    pub fn type_name(&self) -> &'static str {
        match self {
            PrimitiveValue::Boolean(_) => "Edm.Boolean",
            PrimitiveValue::Guid(_) => "Edm.Guid",
            PrimitiveValue::Duration(_) => "Edm.Duration",
            PrimitiveValue::DateTimeOffset(_) => "Edm.DateTimeOffset",
            PrimitiveValue::Date(_) => "Edm.Date",
            PrimitiveValue::TimeOfDay(_) => "Edm.TimeOfDay",
            PrimitiveValue::Decimal(_) => "Edm.Decimal",
            PrimitiveValue::Binary(_) => "Edm.Binary",
            PrimitiveValue::String(_) => "Edm.String",
        }
    }
}

impl Lossless for PrimitiveValue {
    fn write_text(&self, out: &mut String) {
        match self {
            PrimitiveValue::Boolean(value) => value.write_text(out),
            PrimitiveValue::Guid(value) => value.write_text(out),
            PrimitiveValue::Duration(value) => value.write_text(out),
            PrimitiveValue::DateTimeOffset(value) => value.write_text(out),
            PrimitiveValue::Date(value) => value.write_text(out),
            PrimitiveValue::TimeOfDay(value) => value.write_text(out),
            PrimitiveValue::Decimal(value) => value.write_text(out),
            PrimitiveValue::Binary(value) => value.write_text(out),
            PrimitiveValue::String(value) => value.write_text(out),
        }
    }
}

#[derive(Copy, Clone, Debug, Default)]
pub struct PrimitiveValueParser;

impl Parser for PrimitiveValueParser {
    type Value = PrimitiveValue;

    fn parse<'a>(&self, input: Input<'a>) -> ParseOutput<'a, PrimitiveValue> {
        ensure_sufficient_stack(|| {
            one_of!(input;
                BooleanValueParser => PrimitiveValue::Boolean,
                GuidValueParser => PrimitiveValue::Guid,
                DurationValueParser => PrimitiveValue::Duration,
                DateTimeOffsetValueParser => PrimitiveValue::DateTimeOffset,
                DateValueParser => PrimitiveValue::Date,
                TimeOfDayValueParser => PrimitiveValue::TimeOfDay,
                DecimalValueParser => PrimitiveValue::Decimal,
                BinaryParser => PrimitiveValue::Binary,
                StringValueParser => PrimitiveValue::String,
            )
        })
        .named(input, "primitiveValue")
    }
}

/// `primitiveLiteral = nullValue / primitiveValue`
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PrimitiveLiteral {
    Null,
    Value(PrimitiveValue),
}

impl Lossless for PrimitiveLiteral {
    fn write_text(&self, out: &mut String) {
        match self {
            PrimitiveLiteral::Null => out.push_str("null"),
            PrimitiveLiteral::Value(value) => value.write_text(out),
        }
    }
}

#[derive(Copy, Clone, Debug, Default)]
pub struct PrimitiveLiteralParser;

impl Parser for PrimitiveLiteralParser {
    type Value = PrimitiveLiteral;

    fn parse<'a>(&self, input: Input<'a>) -> ParseOutput<'a, PrimitiveLiteral> {
        one_of!(input;
            NULL_VALUE => |_| PrimitiveLiteral::Null,
            PrimitiveValueParser => PrimitiveLiteral::Value,
        )
        .named(input, "primitiveLiteral")
    }
}

#[cfg(test)]
mod tests;
