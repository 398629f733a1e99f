//! Request headers, as `Name: value` lines.

use abnf_runtime::prelude::*;

use crate::chars::{percent_decode, UriChar, DIGIT, UNRESERVED};
use crate::punctuation::{Blank, OwsParser};

/// `Name ":" OWS`, the part every header shares.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HeaderName {
    pub name: Lexeme,
    pub colon: Lexeme,
    pub space: Blank,
}

impl Lossless for HeaderName {
    fn write_text(&self, out: &mut String) {
        self.name.write_text(out);
        self.colon.write_text(out);
        self.space.write_text(out);
    }
}

#[derive(Copy, Clone, Debug)]
struct HeaderNameParser(&'static str);

impl Parser for HeaderNameParser {
    type Value = HeaderName;

    fn parse<'a>(&self, input: Input<'a>) -> ParseOutput<'a, HeaderName> {
        seq!(input;
            name = Literal::insensitive(self.0),
            colon = Literal::sensitive(":"),
            space = OwsParser,
            => HeaderName { name, colon, space }
        )
    }
}

/// `content-id = "Content-ID" ":" OWS request-id`, `request-id = 1*unreserved`
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ContentId {
    pub header: HeaderName,
    pub request_id: Vec<UriChar>,
}

impl ContentId {
    pub fn request_id(&self) -> String {
        percent_decode(&self.request_id)
    }
}

impl Lossless for ContentId {
    fn write_text(&self, out: &mut String) {
        self.header.write_text(out);
        self.request_id.write_text(out);
    }
}

#[derive(Copy, Clone, Debug, Default)]
pub struct ContentIdParser;

impl Parser for ContentIdParser {
    type Value = ContentId;

    fn parse<'a>(&self, input: Input<'a>) -> ParseOutput<'a, ContentId> {
        seq!(input;
            header = HeaderNameParser("Content-ID"),
            request_id = UNRESERVED.repeat(1, None),
            => ContentId { header, request_id }
        )
        .named(input, "content-id")
    }
}

/// `odata-maxversion = "OData-MaxVersion" ":" OWS 1*DIGIT "." 1*DIGIT`
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MaxVersion {
    pub header: HeaderName,
    pub major: Vec<char>,
    pub dot: Lexeme,
    pub minor: Vec<char>,
}

impl MaxVersion {
    /// `(major, minor)`, or `None` if either overflows.
    pub fn version(&self) -> Option<(u32, u32)> {
        let number = |digits: &[char]| digits.iter().collect::<String>().parse().ok();
        Some((number(&self.major)?, number(&self.minor)?))
    }
}

impl Lossless for MaxVersion {
    fn write_text(&self, out: &mut String) {
        self.header.write_text(out);
        self.major.write_text(out);
        self.dot.write_text(out);
        self.minor.write_text(out);
    }
}

#[derive(Copy, Clone, Debug, Default)]
pub struct MaxVersionParser;

impl Parser for MaxVersionParser {
    type Value = MaxVersion;

    fn parse<'a>(&self, input: Input<'a>) -> ParseOutput<'a, MaxVersion> {
        seq!(input;
            header = HeaderNameParser("OData-MaxVersion"),
            major = DIGIT.repeat(1, None),
            dot = Literal::sensitive("."),
            minor = DIGIT.repeat(1, None),
            => MaxVersion { header, major, dot, minor }
        )
        .named(input, "odata-maxversion")
    }
}

/// `odata-version = "OData-Version" ":" OWS "4.0" [ "1" ]`
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Version {
    pub header: HeaderName,
    pub version: Lexeme,
    pub revision: Option<Lexeme>,
}

impl Version {
    /// Whether this is `4.01` rather than `4.0`.
    pub fn is_revised(&self) -> bool {
        self.revision.is_some()
    }
}

impl Lossless for Version {
    fn write_text(&self, out: &mut String) {
        self.header.write_text(out);
        self.version.write_text(out);
        self.revision.write_text(out);
    }
}

#[derive(Copy, Clone, Debug, Default)]
pub struct VersionParser;

impl Parser for VersionParser {
    type Value = Version;

    fn parse<'a>(&self, input: Input<'a>) -> ParseOutput<'a, Version> {
        seq!(input;
            header = HeaderNameParser("OData-Version"),
            version = Literal::sensitive("4.0"),
            revision = Literal::sensitive("1").optional(),
            => Version { header, version, revision }
        )
        .named(input, "odata-version")
    }
}

/// `isolation = [ "OData-" ] "Isolation" ":" OWS "snapshot"`
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Isolation {
    pub prefix: Option<Lexeme>,
    pub header: HeaderName,
    pub level: Lexeme,
}

impl Lossless for Isolation {
    fn write_text(&self, out: &mut String) {
        self.prefix.write_text(out);
        self.header.write_text(out);
        self.level.write_text(out);
    }
}

#[derive(Copy, Clone, Debug, Default)]
pub struct IsolationParser;

impl Parser for IsolationParser {
    type Value = Isolation;

    fn parse<'a>(&self, input: Input<'a>) -> ParseOutput<'a, Isolation> {
        seq!(input;
            prefix = Literal::insensitive("OData-").optional(),
            header = HeaderNameParser("Isolation"),
            level = Literal::insensitive("snapshot"),
            => Isolation { prefix, header, level }
        )
        .named(input, "isolation")
    }
}

/// `header = content-id / odata-maxversion / odata-version / isolation`
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Header {
    ContentId(ContentId),
    MaxVersion(MaxVersion),
    Version(Version),
    Isolation(Isolation),
}

impl Header {
    /// The header name as written.
    pub fn name(&self) -> String {
        let header = match self {
            Header::ContentId(value) => &value.header,
            Header::MaxVersion(value) => &value.header,
            Header::Version(value) => &value.header,
            Header::Isolation(value) => &value.header,
        };
        match self {
            Header::Isolation(Isolation {
                prefix: Some(prefix),
                ..
            }) => format!("{prefix}{}", header.name),
            _ => header.name.to_string(),
        }
    }
}

impl Lossless for Header {
    fn write_text(&self, out: &mut String) {
        match self {
            Header::ContentId(value) => value.write_text(out),
            Header::MaxVersion(value) => value.write_text(out),
            Header::Version(value) => value.write_text(out),
            Header::Isolation(value) => value.write_text(out),
        }
    }
}

#[derive(Copy, Clone, Debug, Default)]
pub struct HeaderParser;

impl Parser for HeaderParser {
    type Value = Header;

    fn parse<'a>(&self, input: Input<'a>) -> ParseOutput<'a, Header> {
        one_of!(input;
            ContentIdParser => Header::ContentId,
            MaxVersionParser => Header::MaxVersion,
            VersionParser => Header::Version,
            IsolationParser => Header::Isolation,
        )
        .named(input, "header")
    }
}
