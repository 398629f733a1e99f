//! ABNF lexer using logos.
//!
//! Two layers, like every lexer in this workspace:
//! - `RawToken` is what logos recognizes: shapes of text, no validation.
//! - [`lex`] "cooks" raw tokens into [`TokenKind`]s (parsing numbers,
//!   stripping quotes), folds whitespace, newlines and comments into
//!   [`TokenFlags`] on the next token, and reports malformed tokens as
//!   diagnostics instead of stopping.
//!
//! Every quoted form matches with an optional closing delimiter so an
//! unterminated string is one token with a precise error, not a cascade.

use abnf_diagnostic::{Diagnostic, ErrorCode};
use abnf_ir::Span;
use abnf_runtime::Case;
use logos::Logos;

use crate::ast::{Bounds, NumBase, NumValue};
use crate::token::{Token, TokenFlags, TokenKind, TokenList};

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum RawToken {
    #[regex(r"[ \t]+")]
    Whitespace,

    #[regex(r"\r\n|\n|\r")]
    Newline,

    #[regex(r";[^\r\n]*")]
    Comment,

    #[regex(r"[A-Za-z][A-Za-z0-9\-]*")]
    RuleName,

    #[token("=")]
    DefinedAs,

    #[token("=/")]
    Incremental,

    #[token("/")]
    Slash,

    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[token("[")]
    LBracket,

    #[token("]")]
    RBracket,

    #[regex(r"[0-9]*\*[0-9]*")]
    Repeat,

    #[regex(r"[0-9]+")]
    Count,

    /// `"text"`: case-insensitive.
    #[regex(r#""[^"\r\n]*"?"#)]
    DoubleQuoted,

    /// `'text'`: case-sensitive.
    #[regex(r"'[^'\r\n]*'?")]
    SingleQuoted,

    /// `%s"text"` or `%i"text"` (RFC 7405).
    #[regex(r#"%[sSiI]"[^"\r\n]*"?"#)]
    PrefixedQuoted,

    /// `%x41`, `%d48-57`, `%x0D.0A`, or something malformed in between.
    #[regex(r"%[0-9A-Za-z.\-]*")]
    Numeric,

    #[regex(r"<[^>\r\n]*>?")]
    Prose,
}

/// Tokens and lexing diagnostics of one grammar file.
#[derive(Clone, Debug, Default)]
pub struct LexOutput {
    pub tokens: TokenList,
    pub diagnostics: Vec<Diagnostic>,
}

/// Tokenize grammar text. Never fails; problems become diagnostics.
#[tracing::instrument(level = "debug", skip_all, fields(len = source.len()))]
pub fn lex(source: &str) -> LexOutput {
    let mut out = LexOutput::default();
    let mut flags = TokenFlags::LINE_START;

    for (raw, range) in RawToken::lexer(source).spanned() {
        let span = Span::from_range(range.clone());
        let text = &source[range];
        let raw = match raw {
            Ok(raw) => raw,
            Err(()) => {
                out.diagnostics.push(invalid_character(text, span));
                flags = TokenFlags::empty();
                continue;
            }
        };
        match raw {
            RawToken::Whitespace => flags |= TokenFlags::SPACE_BEFORE,
            RawToken::Newline => flags = TokenFlags::LINE_START,
            RawToken::Comment => flags |= TokenFlags::TRIVIA_BEFORE,
            _ => {
                match cook(raw, text, span) {
                    Ok(kind) => out.tokens.push(Token::new(kind, span, flags)),
                    Err(diagnostic) => out.diagnostics.push(diagnostic),
                }
                flags = TokenFlags::empty();
            }
        }
    }

    let end = u32::try_from(source.len()).unwrap_or(u32::MAX);
    out.tokens.push(Token::new(
        TokenKind::Eof,
        Span::point(end),
        flags | TokenFlags::LINE_START,
    ));
    tracing::debug!(
        tokens = out.tokens.len(),
        errors = out.diagnostics.len(),
        "lexed grammar"
    );
    out
}

fn cook(raw: RawToken, text: &str, span: Span) -> Result<TokenKind, Diagnostic> {
    let kind = match raw {
        RawToken::RuleName => TokenKind::RuleName(text.to_string()),
        RawToken::DefinedAs => TokenKind::DefinedAs,
        RawToken::Incremental => TokenKind::Incremental,
        RawToken::Slash => TokenKind::Slash,
        RawToken::LParen => TokenKind::LParen,
        RawToken::RParen => TokenKind::RParen,
        RawToken::LBracket => TokenKind::LBracket,
        RawToken::RBracket => TokenKind::RBracket,
        RawToken::Repeat | RawToken::Count => TokenKind::Repeat(cook_repeat(text, span)?),
        RawToken::DoubleQuoted => TokenKind::CharVal {
            text: cook_quoted(text, '"', span)?,
            case: Case::Insensitive,
        },
        RawToken::SingleQuoted => TokenKind::CharVal {
            text: cook_quoted(text, '\'', span)?,
            case: Case::Sensitive,
        },
        RawToken::PrefixedQuoted => {
            let case = if text[1..].starts_with(['s', 'S']) {
                Case::Sensitive
            } else {
                Case::Insensitive
            };
            TokenKind::CharVal {
                text: cook_quoted(&text[2..], '"', span)?,
                case,
            }
        }
        RawToken::Numeric => {
            let (base, value) = cook_numeric(text, span)?;
            TokenKind::NumVal { base, value }
        }
        RawToken::Prose => {
            if text.len() < 2 || !text.ends_with('>') {
                return Err(Diagnostic::error(ErrorCode::E0004)
                    .with_message("unterminated prose value")
                    .with_label(span, "missing closing `>`"));
            }
            TokenKind::Prose(text[1..text.len() - 1].to_string())
        }
        RawToken::Whitespace | RawToken::Newline | RawToken::Comment => {
            unreachable!("trivia is folded into token flags")
        }
    };
    Ok(kind)
}

/// Strip matching quotes; the text starts with `quote`.
fn cook_quoted(text: &str, quote: char, span: Span) -> Result<String, Diagnostic> {
    if text.len() < 2 || !text.ends_with(quote) {
        return Err(Diagnostic::error(ErrorCode::E0001)
            .with_message("unterminated quoted string")
            .with_label(span, format!("missing closing `{quote}`"))
            .with_note("quoted strings cannot span lines"));
    }
    Ok(text[1..text.len() - 1].to_string())
}

fn cook_repeat(text: &str, span: Span) -> Result<Bounds, Diagnostic> {
    let parse = |digits: &str| -> Result<Option<u32>, Diagnostic> {
        if digits.is_empty() {
            return Ok(None);
        }
        digits.parse::<u32>().map(Some).map_err(|_| {
            Diagnostic::error(ErrorCode::E0003)
                .with_message(format!("repetition count `{digits}` is too large"))
                .with_label(span, "does not fit in 32 bits")
        })
    };
    match text.split_once('*') {
        None => {
            let count = parse(text)?.unwrap_or(0);
            Ok(Bounds::exactly(count))
        }
        Some((min, max)) => Ok(Bounds::new(parse(min)?.unwrap_or(0), parse(max)?)),
    }
}

/// Parse `%x41`, `%x30-39`, `%x0D.0A` and the `%d`/`%b` forms.
fn cook_numeric(text: &str, span: Span) -> Result<(NumBase, NumValue), Diagnostic> {
    let malformed = |why: String| {
        Diagnostic::error(ErrorCode::E0003)
            .with_message(format!("malformed numeric value `{text}`"))
            .with_label(span, why)
            .with_suggestion("write `%x` (hex), `%d` (decimal) or `%b` (binary) followed by digits, e.g. `%x41`, `%x30-39` or `%x0D.0A`")
    };

    let mut chars = text[1..].chars();
    let base = match chars.next().map(|c| c.to_ascii_lowercase()) {
        Some('x') => NumBase::Hex,
        Some('d') => NumBase::Decimal,
        Some('b') => NumBase::Binary,
        Some(other) => return Err(malformed(format!("`{other}` is not a numeric base"))),
        None => return Err(malformed("expected `x`, `d` or `b` after `%`".to_string())),
    };
    let body = chars.as_str();

    let value = |digits: &str| -> Result<u32, Diagnostic> {
        if digits.is_empty() {
            return Err(malformed("expected digits".to_string()));
        }
        if let Some(bad) = digits.chars().find(|c| !c.is_digit(base.radix())) {
            return Err(malformed(format!(
                "invalid digit `{bad}` for base {}",
                base.radix()
            )));
        }
        u32::from_str_radix(digits, base.radix())
            .map_err(|_| malformed("value does not fit in 32 bits".to_string()))
    };

    let has_range = body.contains('-');
    let has_seq = body.contains('.');
    let parsed = match (has_range, has_seq) {
        (true, true) => {
            return Err(malformed(
                "a value is either a range (`-`) or a sequence (`.`), not both".to_string(),
            ))
        }
        (true, false) => {
            let mut parts = body.split('-');
            let lo = value(parts.next().unwrap_or(""))?;
            let hi = value(parts.next().unwrap_or(""))?;
            if parts.next().is_some() {
                return Err(malformed("a range has exactly two bounds".to_string()));
            }
            NumValue::Range { lo, hi }
        }
        (false, _) => NumValue::Sequence(body.split('.').map(value).collect::<Result<_, _>>()?),
    };
    Ok((base, parsed))
}

fn invalid_character(text: &str, span: Span) -> Diagnostic {
    let c = text.chars().next().unwrap_or('\u{FFFD}');
    let diagnostic = Diagnostic::error(ErrorCode::E0002)
        .with_message(format!("invalid character `{}` in grammar", c.escape_default()))
        .with_label(span, "not part of ABNF syntax");
    match c {
        '|' => diagnostic.with_suggestion("ABNF separates alternatives with `/`"),
        '{' | '}' => diagnostic.with_suggestion("repetition is written as a prefix: `n*m element`"),
        ':' => diagnostic.with_suggestion("rules are defined with `=`, not `:` or `::=`"),
        _ => diagnostic,
    }
}
