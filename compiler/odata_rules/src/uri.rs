//! Resource paths and query options.
//!
//! ```text
//! odataUri         = serviceRoot [ odataRelativeUri ]
//! serviceRoot      = ( "https" / "http" ) "://" host [ ":" port ] "/" *( segment-nz "/" )
//! odataRelativeUri = "$batch" [ "?" queryOptions ]
//!                  / "$metadata" [ "?" queryOptions ]
//!                  / resourcePath [ "?" queryOptions ]
//! ```
//!
//! Service root segments are greedy: every `pchar` run followed by a `/`
//! belongs to the root, so only the last segment reaches `resourcePath`.

use abnf_runtime::prelude::*;
use abnf_runtime::stack::ensure_sufficient_stack;

use crate::chars::{
    percent_decode, AlphaParser, UriChar, DIGIT, HOST_CHAR, PCHAR, QCHAR_NO_AMP,
    QCHAR_NO_AMP_EQ, QCHAR_NO_AMP_EQ_AT_DOLLAR,
};
use crate::literals::{BooleanValue, BooleanValueParser, PrimitiveLiteral, PrimitiveLiteralParser};
use crate::punctuation::{
    Blank, BwsParser, Close, CloseParser, Comma, CommaParser, Open, OpenParser, RwsParser, Star,
    StarParser, EQ,
};

/// `odataIdentifier = identifierLeadingCharacter *127identifierCharacter`
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OdataIdentifier {
    pub leading: char,
    pub rest: Vec<char>,
}

impl OdataIdentifier {
    pub fn name(&self) -> String {
        self.text()
    }
}

impl Lossless for OdataIdentifier {
    fn write_text(&self, out: &mut String) {
        out.push(self.leading);
        self.rest.write_text(out);
    }
}

#[derive(Copy, Clone, Debug, Default)]
pub struct OdataIdentifierParser;

impl Parser for OdataIdentifierParser {
    type Value = OdataIdentifier;

    fn parse<'a>(&self, input: Input<'a>) -> ParseOutput<'a, OdataIdentifier> {
        let leading = AlphaParser.or(CharRange::single('_'));
        let character = AlphaParser.or(CharRange::single('_')).or(DIGIT);
        seq!(input;
            leading = leading,
            rest = character.repeat(0, Some(127)),
            => OdataIdentifier { leading, rest }
        )
        .named(input, "odataIdentifier")
    }
}

/// `"https" / "http"`
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Scheme {
    Https(Lexeme),
    Http(Lexeme),
}

impl Lossless for Scheme {
    fn write_text(&self, out: &mut String) {
        match self {
            Scheme::Https(lexeme) | Scheme::Http(lexeme) => lexeme.write_text(out),
        }
    }
}

/// `":" port`, `port = *DIGIT`
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Port {
    pub colon: Lexeme,
    pub digits: Vec<char>,
}

impl Lossless for Port {
    fn write_text(&self, out: &mut String) {
        self.colon.write_text(out);
        self.digits.write_text(out);
    }
}

/// `segment-nz "/"`, `segment-nz = 1*pchar`
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RootSegment {
    pub chars: Vec<UriChar>,
    pub slash: Lexeme,
}

impl Lossless for RootSegment {
    fn write_text(&self, out: &mut String) {
        self.chars.write_text(out);
        self.slash.write_text(out);
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ServiceRoot {
    pub scheme: Scheme,
    pub separator: Lexeme,
    pub host: Vec<UriChar>,
    pub port: Option<Port>,
    pub slash: Lexeme,
    pub segments: Vec<RootSegment>,
}

impl ServiceRoot {
    /// The host, percent-decoded.
    pub fn host(&self) -> String {
        percent_decode(&self.host)
    }

    pub fn port(&self) -> Option<u16> {
        let digits: String = self.port.as_ref()?.digits.iter().collect();
        digits.parse().ok()
    }
}

impl Lossless for ServiceRoot {
    fn write_text(&self, out: &mut String) {
        self.scheme.write_text(out);
        self.separator.write_text(out);
        self.host.write_text(out);
        self.port.write_text(out);
        self.slash.write_text(out);
        self.segments.write_text(out);
    }
}

#[derive(Copy, Clone, Debug, Default)]
pub struct ServiceRootParser;

impl Parser for ServiceRootParser {
    type Value = ServiceRoot;

    fn parse<'a>(&self, input: Input<'a>) -> ParseOutput<'a, ServiceRoot> {
        let scheme = Literal::insensitive("https")
            .map(Scheme::Https)
            .or(Literal::insensitive("http").map(Scheme::Http));
        let port = Literal::sensitive(":")
            .then(DIGIT.many())
            .map(|(colon, digits)| Port { colon, digits });
        let segment = PCHAR
            .repeat(1, None)
            .then(Literal::sensitive("/"))
            .map(|(chars, slash)| RootSegment { chars, slash });
        seq!(input;
            scheme = scheme,
            separator = Literal::sensitive("://"),
            host = HOST_CHAR.repeat(1, None),
            port = port.optional(),
            slash = Literal::sensitive("/"),
            segments = segment.many(),
            => ServiceRoot { scheme, separator, host, port, slash, segments }
        )
        .named(input, "serviceRoot")
    }
}

/// `keyPredicate = OPEN primitiveLiteral CLOSE`
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct KeyPredicate {
    pub open: Open,
    pub key: PrimitiveLiteral,
    pub close: Close,
}

impl Lossless for KeyPredicate {
    fn write_text(&self, out: &mut String) {
        self.open.write_text(out);
        self.key.write_text(out);
        self.close.write_text(out);
    }
}

#[derive(Copy, Clone, Debug, Default)]
pub struct KeyPredicateParser;

impl Parser for KeyPredicateParser {
    type Value = KeyPredicate;

    fn parse<'a>(&self, input: Input<'a>) -> ParseOutput<'a, KeyPredicate> {
        seq!(input;
            open = OpenParser,
            key = PrimitiveLiteralParser,
            close = CloseParser,
            => KeyPredicate { open, key, close }
        )
        .named(input, "keyPredicate")
    }
}

/// `"/" odataIdentifier`
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Navigation {
    pub slash: Lexeme,
    pub property: OdataIdentifier,
}

impl Lossless for Navigation {
    fn write_text(&self, out: &mut String) {
        self.slash.write_text(out);
        self.property.write_text(out);
    }
}

/// `resourcePath = odataIdentifier [ keyPredicate ] *( "/" odataIdentifier )`
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ResourcePath {
    pub entity_set: OdataIdentifier,
    pub key: Option<KeyPredicate>,
    pub navigation: Vec<Navigation>,
}

impl Lossless for ResourcePath {
    fn write_text(&self, out: &mut String) {
        self.entity_set.write_text(out);
        self.key.write_text(out);
        self.navigation.write_text(out);
    }
}

#[derive(Copy, Clone, Debug, Default)]
pub struct ResourcePathParser;

impl Parser for ResourcePathParser {
    type Value = ResourcePath;

    fn parse<'a>(&self, input: Input<'a>) -> ParseOutput<'a, ResourcePath> {
        let navigation = Literal::sensitive("/")
            .then(OdataIdentifierParser)
            .map(|(slash, property)| Navigation { slash, property });
        seq!(input;
            entity_set = OdataIdentifierParser,
            key = KeyPredicateParser.optional(),
            navigation = navigation.many(),
            => ResourcePath { entity_set, key, navigation }
        )
        .named(input, "resourcePath")
    }
}

/// `( "$top" / "top" ) EQ 1*DIGIT`, and the same for `skip`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Paging {
    pub name: Lexeme,
    pub eq: Lexeme,
    pub digits: Vec<char>,
}

impl Paging {
    /// The count, saturating at `u64::MAX`.
    pub fn value(&self) -> u64 {
        let digits: String = self.digits.iter().collect();
        digits.parse().unwrap_or(u64::MAX)
    }
}

impl Lossless for Paging {
    fn write_text(&self, out: &mut String) {
        self.name.write_text(out);
        self.eq.write_text(out);
        self.digits.write_text(out);
    }
}

/// `( "$name" / "name" )`: the option name, with or without its `$`.
#[derive(Copy, Clone, Debug)]
struct OptionNameParser {
    dollar: &'static str,
    bare: &'static str,
}

impl Parser for OptionNameParser {
    type Value = Lexeme;

    fn parse<'a>(&self, input: Input<'a>) -> ParseOutput<'a, Lexeme> {
        Literal::insensitive(self.dollar)
            .or(Literal::insensitive(self.bare))
            .parse(input)
    }
}

#[derive(Copy, Clone, Debug)]
struct PagingParser {
    rule: &'static str,
    name: OptionNameParser,
}

impl Parser for PagingParser {
    type Value = Paging;

    fn parse<'a>(&self, input: Input<'a>) -> ParseOutput<'a, Paging> {
        seq!(input;
            name = self.name,
            eq = EQ,
            digits = DIGIT.repeat(1, None),
            => Paging { name, eq, digits }
        )
        .named(input, self.rule)
    }
}

const TOP: PagingParser = PagingParser {
    rule: "top",
    name: OptionNameParser {
        dollar: "$top",
        bare: "top",
    },
};

const SKIP: PagingParser = PagingParser {
    rule: "skip",
    name: OptionNameParser {
        dollar: "$skip",
        bare: "skip",
    },
};

/// `count = ( "$count" / "count" ) EQ booleanValue`
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Count {
    pub name: Lexeme,
    pub eq: Lexeme,
    pub value: BooleanValue,
}

impl Lossless for Count {
    fn write_text(&self, out: &mut String) {
        self.name.write_text(out);
        self.eq.write_text(out);
        self.value.write_text(out);
    }
}

#[derive(Copy, Clone, Debug, Default)]
struct CountParser;

impl Parser for CountParser {
    type Value = Count;

    fn parse<'a>(&self, input: Input<'a>) -> ParseOutput<'a, Count> {
        let name = OptionNameParser {
            dollar: "$count",
            bare: "count",
        };
        seq!(input;
            name = name,
            eq = EQ,
            value = BooleanValueParser,
            => Count { name, eq, value }
        )
        .named(input, "count")
    }
}

/// `selectItem = STAR / odataIdentifier`
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SelectItem {
    Star(Star),
    Property(OdataIdentifier),
}

impl Lossless for SelectItem {
    fn write_text(&self, out: &mut String) {
        match self {
            SelectItem::Star(star) => star.write_text(out),
            SelectItem::Property(property) => property.write_text(out),
        }
    }
}

#[derive(Copy, Clone, Debug, Default)]
pub struct SelectItemParser;

impl Parser for SelectItemParser {
    type Value = SelectItem;

    fn parse<'a>(&self, input: Input<'a>) -> ParseOutput<'a, SelectItem> {
        one_of!(input;
            StarParser => SelectItem::Star,
            OdataIdentifierParser => SelectItem::Property,
        )
        .named(input, "selectItem")
    }
}

/// `COMMA selectItem`
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MoreSelectItem {
    pub comma: Comma,
    pub item: SelectItem,
}

impl Lossless for MoreSelectItem {
    fn write_text(&self, out: &mut String) {
        self.comma.write_text(out);
        self.item.write_text(out);
    }
}

/// `select = ( "$select" / "select" ) EQ selectItem *( COMMA selectItem )`
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Select {
    pub name: Lexeme,
    pub eq: Lexeme,
    pub first: SelectItem,
    pub rest: Vec<MoreSelectItem>,
}

impl Select {
    pub fn items(&self) -> impl Iterator<Item = &SelectItem> {
        std::iter::once(&self.first).chain(self.rest.iter().map(|more| &more.item))
    }
}

impl Lossless for Select {
    fn write_text(&self, out: &mut String) {
        self.name.write_text(out);
        self.eq.write_text(out);
        self.first.write_text(out);
        self.rest.write_text(out);
    }
}

#[derive(Copy, Clone, Debug, Default)]
struct SelectParser;

impl Parser for SelectParser {
    type Value = Select;

    fn parse<'a>(&self, input: Input<'a>) -> ParseOutput<'a, Select> {
        let name = OptionNameParser {
            dollar: "$select",
            bare: "select",
        };
        let more = CommaParser
            .then(SelectItemParser)
            .map(|(comma, item)| MoreSelectItem { comma, item });
        seq!(input;
            name = name,
            eq = EQ,
            first = SelectItemParser,
            rest = more.many(),
            => Select { name, eq, first, rest }
        )
        .named(input, "select")
    }
}

/// `COMMA BWS primitiveLiteral BWS`
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ListItem {
    pub comma: Comma,
    pub before: Blank,
    pub literal: PrimitiveLiteral,
    pub after: Blank,
}

impl Lossless for ListItem {
    fn write_text(&self, out: &mut String) {
        self.comma.write_text(out);
        self.before.write_text(out);
        self.literal.write_text(out);
        self.after.write_text(out);
    }
}

#[derive(Copy, Clone, Debug, Default)]
pub struct ListItemParser;

impl Parser for ListItemParser {
    type Value = ListItem;

    fn parse<'a>(&self, input: Input<'a>) -> ParseOutput<'a, ListItem> {
        seq!(input;
            comma = CommaParser,
            before = BwsParser,
            literal = PrimitiveLiteralParser,
            after = BwsParser,
            => ListItem { comma, before, literal, after }
        )
    }
}

/// `listExpr = OPEN BWS primitiveLiteral BWS *( COMMA BWS primitiveLiteral BWS ) CLOSE`
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ListExpr {
    pub open: Open,
    pub before: Blank,
    pub first: PrimitiveLiteral,
    pub after: Blank,
    pub rest: Vec<ListItem>,
    pub close: Close,
}

impl ListExpr {
    pub fn literals(&self) -> impl Iterator<Item = &PrimitiveLiteral> {
        std::iter::once(&self.first).chain(self.rest.iter().map(|item| &item.literal))
    }
}

impl Lossless for ListExpr {
    fn write_text(&self, out: &mut String) {
        self.open.write_text(out);
        self.before.write_text(out);
        self.first.write_text(out);
        self.after.write_text(out);
        self.rest.write_text(out);
        self.close.write_text(out);
    }
}

#[derive(Copy, Clone, Debug, Default)]
pub struct ListExprParser;

impl Parser for ListExprParser {
    type Value = ListExpr;

    fn parse<'a>(&self, input: Input<'a>) -> ParseOutput<'a, ListExpr> {
        seq!(input;
            open = OpenParser,
            before = BwsParser,
            first = PrimitiveLiteralParser,
            after = BwsParser,
            rest = ListItemParser.many(),
            close = CloseParser,
            => ListExpr { open, before, first, after, rest, close }
        )
        .named(input, "listExpr")
    }
}

/// `filter = ( "$filter" / "filter" ) EQ odataIdentifier RWS "in" BWS listExpr`
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Filter {
    pub name: Lexeme,
    pub eq: Lexeme,
    pub property: OdataIdentifier,
    pub space: Blank,
    pub operator: Lexeme,
    pub before_list: Blank,
    pub list: ListExpr,
}

impl Lossless for Filter {
    fn write_text(&self, out: &mut String) {
        self.name.write_text(out);
        self.eq.write_text(out);
        self.property.write_text(out);
        self.space.write_text(out);
        self.operator.write_text(out);
        self.before_list.write_text(out);
        self.list.write_text(out);
    }
}

#[derive(Copy, Clone, Debug, Default)]
struct FilterParser;

impl Parser for FilterParser {
    type Value = Filter;

    fn parse<'a>(&self, input: Input<'a>) -> ParseOutput<'a, Filter> {
        let name = OptionNameParser {
            dollar: "$filter",
            bare: "filter",
        };
        seq!(input;
            name = name,
            eq = EQ,
            property = OdataIdentifierParser,
            space = RwsParser,
            operator = Literal::insensitive("in"),
            before_list = BwsParser,
            list = ListExprParser,
            => Filter { name, eq, property, space, operator, before_list, list }
        )
        .named(input, "filter")
    }
}

/// `systemQueryOption = top / skip / count / select / filter`
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SystemQueryOption {
    Top(Paging),
    Skip(Paging),
    Count(Count),
    Select(Select),
    Filter(Filter),
}

impl Lossless for SystemQueryOption {
    fn write_text(&self, out: &mut String) {
        match self {
            SystemQueryOption::Top(option) | SystemQueryOption::Skip(option) => option.write_text(out),
            SystemQueryOption::Count(option) => option.write_text(out),
            SystemQueryOption::Select(option) => option.write_text(out),
            SystemQueryOption::Filter(option) => option.write_text(out),
        }
    }
}

#[derive(Copy, Clone, Debug, Default)]
pub struct SystemQueryOptionParser;

impl Parser for SystemQueryOptionParser {
    type Value = SystemQueryOption;

    fn parse<'a>(&self, input: Input<'a>) -> ParseOutput<'a, SystemQueryOption> {
        one_of!(input;
            TOP => SystemQueryOption::Top,
            SKIP => SystemQueryOption::Skip,
            CountParser => SystemQueryOption::Count,
            SelectParser => SystemQueryOption::Select,
            FilterParser => SystemQueryOption::Filter,
        )
        .named(input, "systemQueryOption")
    }
}

/// `customName = qchar-no-AMP-EQ-AT-DOLLAR *qchar-no-AMP-EQ`
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CustomName {
    pub first: UriChar,
    pub rest: Vec<UriChar>,
}

impl Lossless for CustomName {
    fn write_text(&self, out: &mut String) {
        self.first.write_text(out);
        self.rest.write_text(out);
    }
}

/// `EQ customValue`, `customValue = *qchar-no-AMP`
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CustomValue {
    pub eq: Lexeme,
    pub chars: Vec<UriChar>,
}

impl Lossless for CustomValue {
    fn write_text(&self, out: &mut String) {
        self.eq.write_text(out);
        self.chars.write_text(out);
    }
}

/// `customQueryOption = customName [ EQ customValue ]`
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CustomQueryOption {
    pub name: CustomName,
    pub value: Option<CustomValue>,
}

impl CustomQueryOption {
    /// Name and value, percent-decoded.
    pub fn pair(&self) -> (String, Option<String>) {
        let name = percent_decode(std::iter::once(&self.name.first).chain(&self.name.rest));
        (name, self.value.as_ref().map(|value| percent_decode(&value.chars)))
    }
}

impl Lossless for CustomQueryOption {
    fn write_text(&self, out: &mut String) {
        self.name.write_text(out);
        self.value.write_text(out);
    }
}

#[derive(Copy, Clone, Debug, Default)]
pub struct CustomQueryOptionParser;

impl Parser for CustomQueryOptionParser {
    type Value = CustomQueryOption;

    fn parse<'a>(&self, input: Input<'a>) -> ParseOutput<'a, CustomQueryOption> {
        let name = QCHAR_NO_AMP_EQ_AT_DOLLAR
            .then(QCHAR_NO_AMP_EQ.many())
            .map(|(first, rest)| CustomName { first, rest });
        let value = EQ
            .then(QCHAR_NO_AMP.many())
            .map(|(eq, chars)| CustomValue { eq, chars });
        seq!(input;
            name = name,
            value = value.optional(),
            => CustomQueryOption { name, value }
        )
        .named(input, "customQueryOption")
    }
}

/// `queryOption = systemQueryOption / customQueryOption`
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum QueryOption {
    System(SystemQueryOption),
    Custom(CustomQueryOption),
}

impl Lossless for QueryOption {
    fn write_text(&self, out: &mut String) {
        match self {
            QueryOption::System(option) => option.write_text(out),
            QueryOption::Custom(option) => option.write_text(out),
        }
    }
}

#[derive(Copy, Clone, Debug, Default)]
pub struct QueryOptionParser;

impl Parser for QueryOptionParser {
    type Value = QueryOption;

    fn parse<'a>(&self, input: Input<'a>) -> ParseOutput<'a, QueryOption> {
        one_of!(input;
            SystemQueryOptionParser => QueryOption::System,
            CustomQueryOptionParser => QueryOption::Custom,
        )
        .named(input, "queryOption")
    }
}

/// `"&" queryOption`
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MoreQueryOption {
    pub amp: Lexeme,
    pub option: QueryOption,
}

impl Lossless for MoreQueryOption {
    fn write_text(&self, out: &mut String) {
        self.amp.write_text(out);
        self.option.write_text(out);
    }
}

/// `queryOptions = queryOption *( "&" queryOption )`
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct QueryOptions {
    pub first: QueryOption,
    pub rest: Vec<MoreQueryOption>,
}

impl QueryOptions {
    pub fn iter(&self) -> impl Iterator<Item = &QueryOption> {
        std::iter::once(&self.first).chain(self.rest.iter().map(|more| &more.option))
    }
}

impl Lossless for QueryOptions {
    fn write_text(&self, out: &mut String) {
        self.first.write_text(out);
        self.rest.write_text(out);
    }
}

#[derive(Copy, Clone, Debug, Default)]
pub struct QueryOptionsParser;

impl Parser for QueryOptionsParser {
    type Value = QueryOptions;

    fn parse<'a>(&self, input: Input<'a>) -> ParseOutput<'a, QueryOptions> {
        let more = Literal::sensitive("&")
            .then(QueryOptionParser)
            .map(|(amp, option)| MoreQueryOption { amp, option });
        seq!(input;
            first = QueryOptionParser,
            rest = more.many(),
            => QueryOptions { first, rest }
        )
        .named(input, "queryOptions")
    }
}

/// `"?" queryOptions`
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Query {
    pub question: Lexeme,
    pub options: QueryOptions,
}

impl Lossless for Query {
    fn write_text(&self, out: &mut String) {
        self.question.write_text(out);
        self.options.write_text(out);
    }
}

#[derive(Copy, Clone, Debug, Default)]
struct QueryParser;

impl Parser for QueryParser {
    type Value = Query;

    fn parse<'a>(&self, input: Input<'a>) -> ParseOutput<'a, Query> {
        Literal::sensitive("?")
            .then(QueryOptionsParser)
            .map(|(question, options)| Query { question, options })
            .parse(input)
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum OdataRelativeUri {
    Batch {
        keyword: Lexeme,
        query: Option<Query>,
    },
    Metadata {
        keyword: Lexeme,
        query: Option<Query>,
    },
    Resource {
        path: ResourcePath,
        query: Option<Query>,
    },
}

impl OdataRelativeUri {
    pub fn query(&self) -> Option<&QueryOptions> {
        match self {
            OdataRelativeUri::Batch { query, .. }
            | OdataRelativeUri::Metadata { query, .. }
            | OdataRelativeUri::Resource { query, .. } => query.as_ref().map(|query| &query.options),
        }
    }
}

impl Lossless for OdataRelativeUri {
    fn write_text(&self, out: &mut String) {
        match self {
            OdataRelativeUri::Batch { keyword, query }
            | OdataRelativeUri::Metadata { keyword, query } => {
                keyword.write_text(out);
                query.write_text(out);
            }
            OdataRelativeUri::Resource { path, query } => {
                path.write_text(out);
                query.write_text(out);
            }
        }
    }
}

#[derive(Copy, Clone, Debug, Default)]
pub struct OdataRelativeUriParser;

impl Parser for OdataRelativeUriParser {
    type Value = OdataRelativeUri;

    fn parse<'a>(&self, input: Input<'a>) -> ParseOutput<'a, OdataRelativeUri> {
        one_of!(input;
            Literal::insensitive("$batch").then(QueryParser.optional())
                => |(keyword, query)| OdataRelativeUri::Batch { keyword, query },
            Literal::insensitive("$metadata").then(QueryParser.optional())
                => |(keyword, query)| OdataRelativeUri::Metadata { keyword, query },
            ResourcePathParser.then(QueryParser.optional())
                => |(path, query)| OdataRelativeUri::Resource { path, query },
        )
        .named(input, "odataRelativeUri")
    }
}

/// `odataUri = serviceRoot [ odataRelativeUri ]`
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OdataUri {
    pub root: ServiceRoot,
    pub relative: Option<OdataRelativeUri>,
}

impl OdataUri {
    pub fn query_options(&self) -> impl Iterator<Item = &QueryOption> {
        self.relative
            .as_ref()
            .and_then(OdataRelativeUri::query)
            .into_iter()
            .flat_map(QueryOptions::iter)
    }
}

impl Lossless for OdataUri {
    fn write_text(&self, out: &mut String) {
        self.root.write_text(out);
        self.relative.write_text(out);
    }
}

#[derive(Copy, Clone, Debug, Default)]
pub struct OdataUriParser;

impl Parser for OdataUriParser {
    type Value = OdataUri;

    fn parse<'a>(&self, input: Input<'a>) -> ParseOutput<'a, OdataUri> {
        ensure_sufficient_stack(|| {
            seq!(input;
                root = ServiceRootParser,
                relative = OdataRelativeUriParser.optional(),
                => OdataUri { root, relative }
            )
        })
        .named(input, "odataUri")
    }
}

#[cfg(test)]
mod tests;
