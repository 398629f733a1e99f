//! Parsed trees write back the exact input.

use abnf_runtime::Lossless;
use odata_rules::parse_odata;
use proptest::prelude::*;

fn arb_decimal() -> impl Strategy<Value = String> {
    "(\\+|-|%2[bB])?[0-9]{1,6}(\\.[0-9]{1,4})?([eE](\\+|-)?[0-9]{1,3})?"
}

fn arb_date_time() -> impl Strategy<Value = String> {
    "-?[1-9][0-9]{3}-(0[1-9]|1[0-2])-(0[1-9]|[12][0-9]|3[01])[Tt]([01][0-9]|2[0-3]):[0-5][0-9](:[0-5][0-9](\\.[0-9]{1,12})?)?([Zz]|[+-]([01][0-9]|2[0-3]):[0-5][0-9])"
}

fn arb_string() -> impl Strategy<Value = String> {
    "'([a-zA-Z0-9 !()*+,;$&=:@._~-]|''|%[0-9A-F][0-9A-F])*'"
        .prop_filter("no encoded quote", |text| !text.contains("%27"))
        .prop_map(|text| text.replace(' ', "%20"))
}

fn arb_uri() -> impl Strategy<Value = String> {
    (
        "[hH][tT][tT][pP][sS]?",
        "[a-z0-9.-]{1,12}",
        "(:[0-9]{1,5})?",
        "([A-Za-z_][A-Za-z0-9_]{0,8}/){0,2}",
        "[A-Za-z_][A-Za-z0-9_]{0,8}",
        "(\\?\\$top=[0-9]{1,3}(&\\$select=[A-Za-z]{1,4}(%2[cC][A-Za-z]{1,4})?)?)?",
    )
        .prop_map(|(scheme, host, port, segments, path, query)| {
            format!("{scheme}://{host}{port}/{segments}{path}{query}")
        })
}

proptest! {
    #[test]
    fn decimals_round_trip(text in arb_decimal()) {
        let parsed = parse_odata(&text);
        prop_assert!(parsed.is_ok(), "{}: {:?}", text, parsed);
        prop_assert_eq!(parsed.map(|p| p.text()).unwrap_or_default(), text);
    }

    #[test]
    fn date_times_round_trip(text in arb_date_time()) {
        let parsed = parse_odata(&text);
        prop_assert!(parsed.is_ok(), "{}: {:?}", text, parsed);
        prop_assert_eq!(parsed.map(|p| p.text()).unwrap_or_default(), text);
    }

    #[test]
    fn strings_round_trip(text in arb_string()) {
        let parsed = parse_odata(&text);
        prop_assert!(parsed.is_ok(), "{}: {:?}", text, parsed);
        prop_assert_eq!(parsed.map(|p| p.text()).unwrap_or_default(), text);
    }

    #[test]
    fn uris_round_trip(text in arb_uri()) {
        let parsed = parse_odata(&text);
        prop_assert!(parsed.is_ok(), "{}: {:?}", text, parsed);
        prop_assert_eq!(parsed.map(|p| p.text()).unwrap_or_default(), text);
    }

    #[test]
    fn arbitrary_text_never_panics(text in "\\PC{0,40}") {
        if let Ok(parsed) = parse_odata(&text) {
            prop_assert_eq!(parsed.text(), text);
        }
    }
}
