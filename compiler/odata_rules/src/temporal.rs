//! Dates and times.
//!
//! ```text
//! dateValue           = year "-" month "-" day
//! dateTimeOffsetValue = year "-" month "-" day "T" timeOfDayValue ( "Z" / SIGN hour ":" minute )
//! timeOfDayValue      = hour ":" minute [ ":" second [ "." fractionalSeconds ] ]
//! ```
//!
//! Two-digit fields check their range in the grammar itself (`month` is
//! `01`..`12`, `hour` is `00`..`23`), so a parsed tree always holds a
//! plausible value. Day-of-month against month is not checked.

use abnf_runtime::prelude::*;
use abnf_runtime::stack::ensure_sufficient_stack;

use crate::chars::DIGIT;
use crate::punctuation::{Sign, SignParser};

/// `oneToNine = "1" / "2" / "3" / "4" / "5" / "6" / "7" / "8" / "9"`
const ONE_TO_NINE: CharRange = CharRange::new('1', '9');

/// Two digits of a bounded field.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct TwoDigits {
    pub tens: char,
    pub units: char,
}

impl TwoDigits {
    fn new((tens, units): (char, char)) -> Self {
        TwoDigits { tens, units }
    }

    pub fn value(self) -> u32 {
        self.tens.to_digit(10).unwrap_or(0) * 10 + self.units.to_digit(10).unwrap_or(0)
    }
}

impl Lossless for TwoDigits {
    fn write_text(&self, out: &mut String) {
        out.push(self.tens);
        out.push(self.units);
    }
}

/// `year = [ "-" ] ( "0" 3DIGIT / oneToNine 3*DIGIT )`
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Year {
    pub minus: Option<Lexeme>,
    /// All digits, the leading one included.
    pub digits: Vec<char>,
}

impl Lossless for Year {
    fn write_text(&self, out: &mut String) {
        self.minus.write_text(out);
        self.digits.write_text(out);
    }
}

#[derive(Copy, Clone, Debug, Default)]
pub struct YearParser;

impl Parser for YearParser {
    type Value = Year;

    fn parse<'a>(&self, input: Input<'a>) -> ParseOutput<'a, Year> {
        let prepend = |(first, mut rest): (char, Vec<char>)| {
            rest.insert(0, first);
            rest
        };
        seq!(input;
            minus = Literal::sensitive("-").optional(),
            digits = CharRange::single('0')
                .then(DIGIT.repeat(3, Some(3)))
                .or(ONE_TO_NINE.then(DIGIT.repeat(3, None)))
                .map(prepend),
            => Year { minus, digits }
        )
        .named(input, "year")
    }
}

/// `month = "0" oneToNine / "1" ( "0" / "1" / "2" )`
#[derive(Copy, Clone, Debug, Default)]
pub struct MonthParser;

impl Parser for MonthParser {
    type Value = TwoDigits;

    fn parse<'a>(&self, input: Input<'a>) -> ParseOutput<'a, TwoDigits> {
        one_of!(input;
            CharRange::single('0').then(ONE_TO_NINE) => TwoDigits::new,
            CharRange::single('1').then(CharRange::new('0', '2')) => TwoDigits::new,
        )
        .named(input, "month")
    }
}

/// `day = "0" oneToNine / ( "1" / "2" ) DIGIT / "3" ( "0" / "1" )`
#[derive(Copy, Clone, Debug, Default)]
pub struct DayParser;

impl Parser for DayParser {
    type Value = TwoDigits;

    fn parse<'a>(&self, input: Input<'a>) -> ParseOutput<'a, TwoDigits> {
        one_of!(input;
            CharRange::single('0').then(ONE_TO_NINE) => TwoDigits::new,
            CharRange::new('1', '2').then(DIGIT) => TwoDigits::new,
            CharRange::single('3').then(CharRange::new('0', '1')) => TwoDigits::new,
        )
        .named(input, "day")
    }
}

/// `hour = ( "0" / "1" ) DIGIT / "2" ( "0" / "1" / "2" / "3" )`
#[derive(Copy, Clone, Debug, Default)]
pub struct HourParser;

impl Parser for HourParser {
    type Value = TwoDigits;

    fn parse<'a>(&self, input: Input<'a>) -> ParseOutput<'a, TwoDigits> {
        one_of!(input;
            CharRange::new('0', '1').then(DIGIT) => TwoDigits::new,
            CharRange::single('2').then(CharRange::new('0', '3')) => TwoDigits::new,
        )
        .named(input, "hour")
    }
}

/// `zeroToFiftyNine = ( "0" / "1" / "2" / "3" / "4" / "5" ) DIGIT`, used
/// for both `minute` and `second`.
#[derive(Copy, Clone, Debug)]
pub struct SexagesimalParser {
    rule: &'static str,
}

pub const MINUTE: SexagesimalParser = SexagesimalParser { rule: "minute" };
pub const SECOND: SexagesimalParser = SexagesimalParser { rule: "second" };

impl Parser for SexagesimalParser {
    type Value = TwoDigits;

    fn parse<'a>(&self, input: Input<'a>) -> ParseOutput<'a, TwoDigits> {
        CharRange::new('0', '5')
            .then(DIGIT)
            .map(TwoDigits::new)
            .parse(input)
            .named(input, self.rule)
    }
}

/// `dateValue = year "-" month "-" day`
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DateValue {
    pub year: Year,
    pub dash1: Lexeme,
    pub month: TwoDigits,
    pub dash2: Lexeme,
    pub day: TwoDigits,
}

impl Lossless for DateValue {
    fn write_text(&self, out: &mut String) {
        self.year.write_text(out);
        self.dash1.write_text(out);
        self.month.write_text(out);
        self.dash2.write_text(out);
        self.day.write_text(out);
    }
}

#[derive(Copy, Clone, Debug, Default)]
pub struct DateValueParser;

impl Parser for DateValueParser {
    type Value = DateValue;

    fn parse<'a>(&self, input: Input<'a>) -> ParseOutput<'a, DateValue> {
        seq!(input;
            year = YearParser,
            dash1 = Literal::sensitive("-"),
            month = MonthParser,
            dash2 = Literal::sensitive("-"),
            day = DayParser,
            => DateValue { year, dash1, month, dash2, day }
        )
        .named(input, "dateValue")
    }
}

/// `":" second [ "." fractionalSeconds ]`
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Seconds {
    pub colon: Lexeme,
    pub second: TwoDigits,
    pub fraction: Option<Fraction>,
}

impl Lossless for Seconds {
    fn write_text(&self, out: &mut String) {
        self.colon.write_text(out);
        self.second.write_text(out);
        self.fraction.write_text(out);
    }
}

/// `"." fractionalSeconds`, `fractionalSeconds = 1*12DIGIT`
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Fraction {
    pub dot: Lexeme,
    pub digits: Vec<char>,
}

impl Lossless for Fraction {
    fn write_text(&self, out: &mut String) {
        self.dot.write_text(out);
        self.digits.write_text(out);
    }
}

/// `timeOfDayValue = hour ":" minute [ ":" second [ "." fractionalSeconds ] ]`
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TimeOfDayValue {
    pub hour: TwoDigits,
    pub colon: Lexeme,
    pub minute: TwoDigits,
    pub seconds: Option<Seconds>,
}

impl Lossless for TimeOfDayValue {
    fn write_text(&self, out: &mut String) {
        self.hour.write_text(out);
        self.colon.write_text(out);
        self.minute.write_text(out);
        self.seconds.write_text(out);
    }
}

#[derive(Copy, Clone, Debug, Default)]
pub struct TimeOfDayValueParser;

impl Parser for TimeOfDayValueParser {
    type Value = TimeOfDayValue;

    fn parse<'a>(&self, input: Input<'a>) -> ParseOutput<'a, TimeOfDayValue> {
        let fraction = Literal::sensitive(".")
            .then(DIGIT.repeat(1, Some(12)))
            .map(|(dot, digits)| Fraction { dot, digits });
        let seconds = Literal::sensitive(":")
            .then(SECOND)
            .then(fraction.optional())
            .map(|((colon, second), fraction)| Seconds {
                colon,
                second,
                fraction,
            });
        seq!(input;
            hour = HourParser,
            colon = Literal::sensitive(":"),
            minute = MINUTE,
            seconds = seconds.optional(),
            => TimeOfDayValue { hour, colon, minute, seconds }
        )
        .named(input, "timeOfDayValue")
    }
}

/// `"Z" / SIGN hour ":" minute`
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Offset {
    Utc(Lexeme),
    Numeric {
        sign: Sign,
        hour: TwoDigits,
        colon: Lexeme,
        minute: TwoDigits,
    },
}

impl Lossless for Offset {
    fn write_text(&self, out: &mut String) {
        match self {
            Offset::Utc(z) => z.write_text(out),
            Offset::Numeric {
                sign,
                hour,
                colon,
                minute,
            } => {
                sign.write_text(out);
                hour.write_text(out);
                colon.write_text(out);
                minute.write_text(out);
            }
        }
    }
}

#[derive(Copy, Clone, Debug, Default)]
struct NumericOffsetParser;

impl Parser for NumericOffsetParser {
    type Value = Offset;

    fn parse<'a>(&self, input: Input<'a>) -> ParseOutput<'a, Offset> {
        seq!(input;
            sign = SignParser,
            hour = HourParser,
            colon = Literal::sensitive(":"),
            minute = MINUTE,
            => Offset::Numeric { sign, hour, colon, minute }
        )
    }
}

#[derive(Copy, Clone, Debug, Default)]
struct OffsetParser;

impl Parser for OffsetParser {
    type Value = Offset;

    fn parse<'a>(&self, input: Input<'a>) -> ParseOutput<'a, Offset> {
        one_of!(input;
            Literal::insensitive("Z") => Offset::Utc,
            NumericOffsetParser => |offset| offset,
        )
    }
}

/// `dateTimeOffsetValue = year "-" month "-" day "T" timeOfDayValue ( "Z" / SIGN hour ":" minute )`
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DateTimeOffsetValue {
    pub date: DateValue,
    pub t: Lexeme,
    pub time: TimeOfDayValue,
    pub offset: Offset,
}

impl Lossless for DateTimeOffsetValue {
    fn write_text(&self, out: &mut String) {
        self.date.write_text(out);
        self.t.write_text(out);
        self.time.write_text(out);
        self.offset.write_text(out);
    }
}

#[derive(Copy, Clone, Debug, Default)]
pub struct DateTimeOffsetValueParser;

impl Parser for DateTimeOffsetValueParser {
    type Value = DateTimeOffsetValue;

    fn parse<'a>(&self, input: Input<'a>) -> ParseOutput<'a, DateTimeOffsetValue> {
        ensure_sufficient_stack(|| {
            seq!(input;
                date = DateValueParser,
                t = Literal::insensitive("T"),
                time = TimeOfDayValueParser,
                offset = OffsetParser,
                => DateTimeOffsetValue { date, t, time, offset }
            )
        })
        .named(input, "dateTimeOffsetValue")
    }
}

#[cfg(test)]
mod tests;
