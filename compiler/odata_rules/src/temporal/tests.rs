use abnf_runtime::{parse_complete, SourceText};
use pretty_assertions::assert_eq;

use super::*;

fn accepts<P: Parser>(parser: &P, text: &str) -> bool {
    parse_complete(parser, &SourceText::new(text)).is_ok()
}

#[test]
fn year_forms() {
    let Ok(year) = parse_complete(&YearParser, &SourceText::new("-12345")) else {
        panic!("`-12345` is a year");
    };
    assert!(year.minus.is_some());
    assert_eq!(year.digits.iter().collect::<String>(), "12345");

    assert!(accepts(&YearParser, "0042"));
    assert!(!accepts(&YearParser, "00042"));
    assert!(!accepts(&YearParser, "042"));
}

#[test]
fn bounded_fields() {
    assert!(accepts(&MonthParser, "12"));
    assert!(!accepts(&MonthParser, "13"));
    assert!(!accepts(&MonthParser, "00"));
    assert!(accepts(&DayParser, "31"));
    assert!(!accepts(&DayParser, "32"));
    assert!(accepts(&HourParser, "23"));
    assert!(!accepts(&HourParser, "24"));
    assert!(accepts(&MINUTE, "59"));
    assert!(!accepts(&SECOND, "60"));
}

#[test]
fn date_value() {
    let Ok(date) = parse_complete(&DateValueParser, &SourceText::new("2024-02-29")) else {
        panic!("a date");
    };
    assert_eq!(date.month.value(), 2);
    assert_eq!(date.day.value(), 29);
    assert_eq!(date.text(), "2024-02-29");
}

#[test]
fn time_of_day_fraction_is_bounded() {
    assert!(accepts(&TimeOfDayValueParser, "07:59"));
    assert!(accepts(&TimeOfDayValueParser, "07:59:59.123456789012"));
    assert!(!accepts(&TimeOfDayValueParser, "07:59:59.1234567890123"));
    assert!(!accepts(&TimeOfDayValueParser, "07:59:59."));
}

#[test]
fn date_time_offsets() {
    let Ok(value) = parse_complete(
        &DateTimeOffsetValueParser,
        &SourceText::new("2012-12-03T07:16:23z"),
    ) else {
        panic!("lowercase `z` is accepted");
    };
    assert!(matches!(value.offset, Offset::Utc(_)));
    assert_eq!(value.text(), "2012-12-03T07:16:23z");

    let Ok(value) = parse_complete(
        &DateTimeOffsetValueParser,
        &SourceText::new("2012-12-03t07:16-05:30"),
    ) else {
        panic!("numeric offset");
    };
    let Offset::Numeric { sign, hour, .. } = &value.offset else {
        panic!("numeric offset");
    };
    assert!(sign.is_negative());
    assert_eq!(hour.value(), 5);
}

#[test]
fn date_time_without_offset_fails_at_the_end() {
    let text = "2012-12-03T07:16:23";
    let Err(failure) = parse_complete(&DateTimeOffsetValueParser, &SourceText::new(text)) else {
        panic!("offset is required");
    };
    assert_eq!(failure.offset(), text.chars().count());
}
