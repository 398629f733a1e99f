//! Grammar tokens.

use std::fmt;

use abnf_ir::Span;
use abnf_runtime::Case;
use bitflags::bitflags;

use crate::ast::{Bounds, NumBase, NumValue};

bitflags! {
    /// Layout facts about the text before a token.
    ///
    /// ABNF is line-oriented: a rule starts with a name in the first column,
    /// and a line that begins with whitespace continues the previous rule.
    #[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
    pub struct TokenFlags: u8 {
        /// First token on its line.
        const LINE_START = 1 << 0;
        /// Spaces or tabs directly before this token.
        const SPACE_BEFORE = 1 << 1;
        /// A comment appeared since the previous token.
        const TRIVIA_BEFORE = 1 << 2;
    }
}

impl TokenFlags {
    /// Token sits in the first column of its line.
    #[inline]
    pub fn at_column_zero(self) -> bool {
        self.contains(TokenFlags::LINE_START) && !self.contains(TokenFlags::SPACE_BEFORE)
    }
}

/// Token kinds, with cooked payloads.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TokenKind {
    /// Rule name, as written.
    RuleName(String),
    /// `=`
    DefinedAs,
    /// `=/`
    Incremental,
    /// `/`
    Slash,
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// Repetition prefix: `*`, `n*`, `*m`, `n*m` or `n`.
    Repeat(Bounds),
    /// Quoted string.
    CharVal { text: String, case: Case },
    /// `%x`, `%d` or `%b` value.
    NumVal { base: NumBase, value: NumValue },
    /// `<prose>`
    Prose(String),
    Eof,
}

impl TokenKind {
    /// Short description for "unexpected ..." messages.
    pub fn describe(&self) -> String {
        match self {
            TokenKind::RuleName(name) => format!("rule name `{name}`"),
            TokenKind::DefinedAs => "`=`".to_string(),
            TokenKind::Incremental => "`=/`".to_string(),
            TokenKind::Slash => "`/`".to_string(),
            TokenKind::LParen => "`(`".to_string(),
            TokenKind::RParen => "`)`".to_string(),
            TokenKind::LBracket => "`[`".to_string(),
            TokenKind::RBracket => "`]`".to_string(),
            TokenKind::Repeat(_) => "repetition prefix".to_string(),
            TokenKind::CharVal { .. } => "quoted string".to_string(),
            TokenKind::NumVal { .. } => "numeric value".to_string(),
            TokenKind::Prose(_) => "prose value".to_string(),
            TokenKind::Eof => "end of file".to_string(),
        }
    }

    /// Can this token begin an element?
    pub fn starts_element(&self) -> bool {
        matches!(
            self,
            TokenKind::RuleName(_)
                | TokenKind::LParen
                | TokenKind::LBracket
                | TokenKind::CharVal { .. }
                | TokenKind::NumVal { .. }
                | TokenKind::Prose(_)
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

/// A token with its byte span in the grammar text.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    pub flags: TokenFlags,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span, flags: TokenFlags) -> Self {
        Token { kind, span, flags }
    }

    /// A rule name in the first column: the start of a rule definition.
    #[inline]
    pub fn is_rule_start(&self) -> bool {
        matches!(self.kind, TokenKind::RuleName(_)) && self.flags.at_column_zero()
    }
}

/// Tokens of one grammar file. The last token is always [`TokenKind::Eof`].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct TokenList {
    tokens: Vec<Token>,
}

impl TokenList {
    pub fn new() -> Self {
        TokenList { tokens: Vec::new() }
    }

    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn as_slice(&self) -> &[Token] {
        &self.tokens
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }
}

impl std::ops::Index<usize> for TokenList {
    type Output = Token;

    fn index(&self, index: usize) -> &Token {
        &self.tokens[index]
    }
}

impl<'a> IntoIterator for &'a TokenList {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

const _: () = assert!(std::mem::size_of::<TokenFlags>() == 1);
