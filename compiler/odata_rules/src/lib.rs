//! Typed rule parsers for a slice of the OData ABNF.
//!
//! Each grammar rule in `grammars/odata-literals.abnf` has a `{Rule}Parser`
//! here producing a typed syntax tree. The trees are lossless: every node
//! implements [`Lossless`](abnf_runtime::Lossless) and writes back exactly the
//! text it was parsed from, including percent-encoded punctuation and the
//! spelling of case-insensitive keywords.
//!
//! The parsers accept exactly what the grammar accepts when compiled at run
//! time, so either can be used for the same input.
//!
//! ```text
//! dummyStartRule = odataUri / header / primitiveValue
//! ```

pub mod chars;
pub mod header;
pub mod literals;
pub mod punctuation;
pub mod temporal;
pub mod uri;

use abnf_runtime::prelude::*;
use abnf_runtime::{parse_complete, ParseFailure, SourceText};

pub use header::{Header, HeaderParser};
pub use literals::{
    PrimitiveLiteral, PrimitiveLiteralParser, PrimitiveValue, PrimitiveValueParser,
};
pub use uri::{OdataUri, OdataUriParser};

/// Any input the grammar's start rule accepts.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DummyStartRule {
    Uri(OdataUri),
    Header(Header),
    Value(PrimitiveValue),
}

impl DummyStartRule {
    /// Which alternative matched, by rule name.
    pub fn kind(&self) -> &'static str {
        match self {
            DummyStartRule::Uri(_) => "odataUri",
            DummyStartRule::Header(_) => "header",
            DummyStartRule::Value(_) => "primitiveValue",
        }
    }
}

impl Lossless for DummyStartRule {
    fn write_text(&self, out: &mut String) {
        match self {
            DummyStartRule::Uri(value) => value.write_text(out),
            DummyStartRule::Header(value) => value.write_text(out),
            DummyStartRule::Value(value) => value.write_text(out),
        }
    }
}

#[derive(Copy, Clone, Debug, Default)]
pub struct DummyStartRuleParser;

impl Parser for DummyStartRuleParser {
    type Value = DummyStartRule;

    fn parse<'a>(&self, input: Input<'a>) -> ParseOutput<'a, DummyStartRule> {
        one_of!(input;
            OdataUriParser => DummyStartRule::Uri,
            HeaderParser => DummyStartRule::Header,
            PrimitiveValueParser => DummyStartRule::Value,
        )
        .named(input, "dummyStartRule")
    }
}

/// Parse all of `text` as a URI, a header or a primitive value.
pub fn parse_odata(text: &str) -> Result<DummyStartRule, ParseFailure> {
    let result = parse_complete(&DummyStartRuleParser, &SourceText::new(text));
    match &result {
        Ok(parsed) => tracing::debug!(kind = parsed.kind(), "parsed"),
        Err(failure) => tracing::debug!(offset = failure.offset(), "rejected"),
    }
    result
}
