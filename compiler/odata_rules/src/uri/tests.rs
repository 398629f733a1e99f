use abnf_runtime::{parse_complete, SourceText};
use pretty_assertions::assert_eq;

use super::*;

fn uri(text: &str) -> OdataUri {
    match parse_complete(&OdataUriParser, &SourceText::new(text)) {
        Ok(uri) => uri,
        Err(failure) => panic!("{text:?}: {failure}"),
    }
}

#[test]
fn service_root_only() {
    let parsed = uri("https://example.org:8080/service/v4/");
    assert_eq!(parsed.root.host(), "example.org");
    assert_eq!(parsed.root.port(), Some(8080));
    assert_eq!(parsed.root.segments.len(), 2);
    assert!(parsed.relative.is_none());
}

#[test]
fn root_segments_need_a_trailing_slash() {
    let parsed = uri("http://host/service/Products(42)/Name");
    assert_eq!(parsed.root.segments.len(), 2);
    let Some(OdataRelativeUri::Resource { path, query: None }) = &parsed.relative else {
        panic!("a resource path");
    };
    assert_eq!(path.entity_set.name(), "Name");

    let parsed = uri("http://host/Products(42)/Name");
    let Some(OdataRelativeUri::Resource { path, .. }) = &parsed.relative else {
        panic!("a resource path");
    };
    assert_eq!(path.entity_set.name(), "Name");
}

#[test]
fn key_predicate_and_navigation() {
    let parsed = uri("http://host/Products('a%2Fb')");
    let Some(OdataRelativeUri::Resource { path, .. }) = &parsed.relative else {
        panic!("a resource path");
    };
    assert_eq!(path.entity_set.name(), "Products");
    let Some(key) = &path.key else {
        panic!("a key");
    };
    assert_eq!(key.key.text(), "'a%2Fb'");
    assert!(path.navigation.is_empty());
}

#[test]
fn metadata_and_batch() {
    assert!(matches!(
        uri("http://host/$metadata").relative,
        Some(OdataRelativeUri::Metadata { query: None, .. })
    ));
    assert!(matches!(
        uri("http://host/$BATCH?x=1").relative,
        Some(OdataRelativeUri::Batch { query: Some(_), .. })
    ));
}

#[test]
fn system_and_custom_options() {
    let parsed = uri("http://host/People?$top=10&skip=2&$count=true&$select=Name,*&debug=on&flag");
    let options: Vec<&QueryOption> = parsed.query_options().collect();
    assert_eq!(options.len(), 6);
    assert!(matches!(
        options[0],
        QueryOption::System(SystemQueryOption::Top(top)) if top.value() == 10
    ));
    assert!(matches!(options[1], QueryOption::System(SystemQueryOption::Skip(_))));
    assert!(matches!(
        options[2],
        QueryOption::System(SystemQueryOption::Count(count)) if count.value.value()
    ));
    let QueryOption::System(SystemQueryOption::Select(select)) = options[3] else {
        panic!("a select");
    };
    assert_eq!(select.items().count(), 2);
    let QueryOption::Custom(custom) = options[4] else {
        panic!("a custom option");
    };
    assert_eq!(custom.pair(), ("debug".to_string(), Some("on".to_string())));
    let QueryOption::Custom(flag) = options[5] else {
        panic!("a custom option");
    };
    assert_eq!(flag.pair(), ("flag".to_string(), None));
}

#[test]
fn scheme_ignores_ascii_case_only() {
    assert_eq!(uri("HtTpS://h/A").root.host(), "h");
    // U+017F folds to `s` under Unicode rules, not ASCII ones
    assert!(parse_complete(&OdataUriParser, &SourceText::new("htTP\u{17f}://h/A")).is_err());
}

#[test]
fn percent_decoding_is_utf8() {
    let parsed = uri("http://caf%C3%A9/People?%C3%A9t%C3%A9=%E2%9C%93");
    assert_eq!(parsed.root.host(), "caf\u{e9}");
    let options: Vec<&QueryOption> = parsed.query_options().collect();
    let [QueryOption::Custom(custom)] = options[..] else {
        panic!("one custom option, got {options:?}");
    };
    assert_eq!(
        custom.pair(),
        ("\u{e9}t\u{e9}".to_string(), Some("\u{2713}".to_string()))
    );
}

#[test]
fn malformed_system_option_falls_back_to_custom() {
    let parsed = uri("http://host/People?top=all");
    let options: Vec<&QueryOption> = parsed.query_options().collect();
    assert!(matches!(options.as_slice(), [QueryOption::Custom(_)]));
}

#[test]
fn dollar_cannot_start_a_custom_name() {
    let text = "http://host/People?$top=all";
    assert!(parse_complete(&OdataUriParser, &SourceText::new(text)).is_err());
}

#[test]
fn filter_in_list() {
    let parsed = uri("http://host/People?$filter=Name%20in%20('a',%20'b'%2C3)");
    let options: Vec<&QueryOption> = parsed.query_options().collect();
    let [QueryOption::System(SystemQueryOption::Filter(filter))] = options.as_slice() else {
        panic!("one filter");
    };
    assert_eq!(filter.property.name(), "Name");
    assert_eq!(filter.list.literals().count(), 3);
    assert_eq!(filter.list.rest.len(), 2);
}

#[test]
fn list_with_one_item_has_empty_tail() {
    let source = SourceText::new("( 42 )");
    let Ok(list) = parse_complete(&ListExprParser, &source) else {
        panic!("a one-item list");
    };
    assert!(list.rest.is_empty());
    assert_eq!(list.before.0.len(), 1);
    assert_eq!(list.after.0.len(), 1);

    // the tail parser consumes nothing and leaves its input in place
    let at_close = source.input().advance(5);
    let out = ListItemParser.many().parse(at_close);
    assert_eq!(out.parsed().map(Vec::len), Some(0));
    assert_eq!(out.remainder(), at_close);
}

#[test]
fn identifier_length_is_bounded() {
    let longest = format!("a{}", "b".repeat(127));
    assert!(parse_complete(&OdataIdentifierParser, &SourceText::new(&longest)).is_ok());
    let too_long = format!("{longest}b");
    assert!(parse_complete(&OdataIdentifierParser, &SourceText::new(&too_long)).is_err());
    assert!(parse_complete(&OdataIdentifierParser, &SourceText::new("_1")).is_ok());
    assert!(parse_complete(&OdataIdentifierParser, &SourceText::new("1a")).is_err());
}

#[test]
fn round_trip() {
    for text in [
        "HTTP://h/",
        "http://h%41/$metadata?a=b",
        "http://h/E(-INF)/A/B?$select=%2A%2cX&$filter=X%09IN(null)",
    ] {
        assert_eq!(uri(text).text(), text);
    }
}
