//! Recursive descent parser for ABNF rule lists.
//!
//! RFC 5234 grammar, as implemented:
//!
//! ```text
//! rulelist      = 1*rule
//! rule          = rulename ("=" / "=/") alternation      ; name in column 0
//! alternation   = concatenation *("/" concatenation)
//! concatenation = repetition *repetition
//! repetition    = [repeat] element                       ; no space after repeat
//! element       = rulename / group / option / char-val / num-val / prose-val
//! ```
//!
//! A rule body ends at the next token in the first column. Errors are
//! collected; after one, the parser skips to the next rule definition and
//! carries on, so one pass reports every broken rule.

use abnf_diagnostic::{unclosed_delimiter, unexpected_token, Diagnostic, ErrorCode};
use abnf_ir::Span;
use abnf_runtime::stack::ensure_sufficient_stack;

use crate::ast::{Element, ElementKind};
use crate::token::{Token, TokenFlags, TokenKind, TokenList};

/// How a rule line binds its body.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum DefinitionKind {
    /// `name = ...`
    Basic,
    /// `name =/ ...`: more alternatives for an existing rule.
    Incremental,
}

/// One `name = ...` or `name =/ ...` line, before rules are merged.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RuleDefinition {
    pub name: String,
    pub name_span: Span,
    pub kind: DefinitionKind,
    pub body: Element,
}

/// Rule definitions in file order, plus syntax diagnostics.
#[derive(Clone, Debug, Default)]
pub struct SyntaxOutput {
    pub definitions: Vec<RuleDefinition>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Parse a token list into rule definitions.
#[tracing::instrument(level = "debug", skip_all, fields(tokens = tokens.len()))]
pub fn parse(tokens: &TokenList) -> SyntaxOutput {
    Parser::new(tokens.as_slice()).parse_rulelist()
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token]) -> Self {
        Parser {
            tokens,
            pos: 0,
            diagnostics: Vec::new(),
        }
    }

    /// Invariant: the last token is `Eof` and `pos` never moves past it.
    #[inline]
    fn current(&self) -> &'a Token {
        &self.tokens[self.pos.min(self.tokens.len().saturating_sub(1))]
    }

    #[inline]
    fn is_at_end(&self) -> bool {
        self.pos + 1 >= self.tokens.len()
    }

    fn advance(&mut self) -> &'a Token {
        let token = self.current();
        if !self.is_at_end() {
            self.pos += 1;
        }
        token
    }

    /// The current token ends the rule body: end of file, or anything in
    /// the first column.
    #[inline]
    fn at_boundary(&self) -> bool {
        let token = self.current();
        token.kind == TokenKind::Eof || token.flags.at_column_zero()
    }

    /// Skip to the next rule definition.
    fn synchronize(&mut self) {
        while !self.is_at_end() && !self.current().is_rule_start() {
            self.advance();
        }
    }

    fn parse_rulelist(mut self) -> SyntaxOutput {
        let mut definitions = Vec::new();

        while !self.is_at_end() {
            let token = self.current();
            if token.is_rule_start() {
                match self.parse_rule() {
                    Ok(definition) => definitions.push(definition),
                    Err(diagnostic) => {
                        self.diagnostics.push(diagnostic);
                        self.synchronize();
                    }
                }
                continue;
            }

            let diagnostic = match &token.kind {
                TokenKind::RuleName(name) if token.flags.contains(TokenFlags::LINE_START) => {
                    Diagnostic::error(ErrorCode::E1005)
                        .with_message(format!(
                            "rule `{name}` must start in the first column"
                        ))
                        .with_label(token.span, "indented rule name")
                        .with_note("an indented line continues the previous rule")
                }
                _ => unexpected_token(token.span, "a rule definition", &token.kind.describe()),
            };
            self.diagnostics.push(diagnostic);
            self.advance();
            self.synchronize();
        }

        tracing::debug!(
            rules = definitions.len(),
            errors = self.diagnostics.len(),
            "parsed grammar"
        );
        SyntaxOutput {
            definitions,
            diagnostics: self.diagnostics,
        }
    }

    fn parse_rule(&mut self) -> Result<RuleDefinition, Diagnostic> {
        let name_token = self.advance();
        let TokenKind::RuleName(name) = &name_token.kind else {
            return Err(unexpected_token(
                name_token.span,
                "a rule name",
                &name_token.kind.describe(),
            ));
        };

        let operator = self.current();
        let kind = match operator.kind {
            TokenKind::DefinedAs if !self.at_boundary() => DefinitionKind::Basic,
            TokenKind::Incremental if !self.at_boundary() => DefinitionKind::Incremental,
            _ => {
                return Err(Diagnostic::error(ErrorCode::E1004)
                    .with_message(format!(
                        "expected `=` or `=/` after rule name `{name}`, found {}",
                        operator.kind.describe()
                    ))
                    .with_label(operator.span, "expected `=` here")
                    .with_secondary_label(name_token.span, "rule name"));
            }
        };
        self.advance();

        let body = self.parse_alternation()?;
        if !self.at_boundary() {
            let token = self.current();
            return Err(unexpected_token(
                token.span,
                "`/`, an element, or the next rule",
                &token.kind.describe(),
            ));
        }

        Ok(RuleDefinition {
            name: name.clone(),
            name_span: name_token.span,
            kind,
            body,
        })
    }

    fn parse_alternation(&mut self) -> Result<Element, Diagnostic> {
        let mut items = vec![self.parse_concatenation()?];
        while !self.at_boundary() && self.current().kind == TokenKind::Slash {
            self.advance();
            items.push(self.parse_concatenation()?);
        }
        Ok(collapse(items, ElementKind::Alternation))
    }

    fn parse_concatenation(&mut self) -> Result<Element, Diagnostic> {
        let mut items = Vec::new();
        while !self.at_boundary() && starts_repetition(&self.current().kind) {
            items.push(self.parse_repetition()?);
        }
        if items.is_empty() {
            let token = self.current();
            let found = if token.kind != TokenKind::Eof && token.flags.at_column_zero() {
                "the next rule".to_string()
            } else {
                token.kind.describe()
            };
            return Err(Diagnostic::error(ErrorCode::E1002)
                .with_message(format!("expected an element, found {found}"))
                .with_label(token.span, "expected a rule name, string, number, group or option"));
        }
        Ok(collapse(items, ElementKind::Concatenation))
    }

    fn parse_repetition(&mut self) -> Result<Element, Diagnostic> {
        let TokenKind::Repeat(bounds) = self.current().kind else {
            return self.parse_element();
        };
        let repeat = self.advance();

        let next = self.current();
        if self.at_boundary()
            || !next.kind.starts_element()
            || next.flags.intersects(TokenFlags::SPACE_BEFORE | TokenFlags::LINE_START)
        {
            return Err(Diagnostic::error(ErrorCode::E1006)
                .with_message("repetition prefix must be directly followed by an element")
                .with_label(repeat.span, "this prefix")
                .with_secondary_label(next.span, "is not followed by an element")
                .with_suggestion("write the prefix and the element without space between, e.g. `1*DIGIT`"));
        }

        let element = self.parse_element()?;
        let span = repeat.span.merge(element.span);
        Ok(Element::new(
            ElementKind::Repetition {
                bounds,
                element: Box::new(element),
            },
            span,
        ))
    }

    fn parse_element(&mut self) -> Result<Element, Diagnostic> {
        let token = self.current();
        let kind = match &token.kind {
            TokenKind::RuleName(name) => ElementKind::RuleRef(name.clone()),
            TokenKind::CharVal { text, case } => ElementKind::CharVal {
                text: text.clone(),
                case: *case,
            },
            TokenKind::NumVal { base, value } => ElementKind::NumVal {
                base: *base,
                value: value.clone(),
            },
            TokenKind::Prose(text) => ElementKind::Prose(text.clone()),
            TokenKind::LParen => {
                return ensure_sufficient_stack(|| self.parse_bracketed(TokenKind::RParen, '('))
            }
            TokenKind::LBracket => {
                return ensure_sufficient_stack(|| self.parse_bracketed(TokenKind::RBracket, '['))
            }
            other => {
                return Err(Diagnostic::error(ErrorCode::E1002)
                    .with_message(format!("expected an element, found {}", other.describe()))
                    .with_label(token.span, "expected an element"));
            }
        };
        self.advance();
        Ok(Element::new(kind, token.span))
    }

    /// `( alternation )` or `[ alternation ]`; the opener is current.
    fn parse_bracketed(&mut self, close: TokenKind, open_char: char) -> Result<Element, Diagnostic> {
        let open = self.advance();
        let inner = self.parse_alternation()?;

        let token = self.current();
        if self.at_boundary() || token.kind != close {
            return Err(unclosed_delimiter(open.span, token.span, open_char));
        }
        self.advance();

        let span = open.span.merge(token.span);
        let kind = if open_char == '[' {
            ElementKind::Optional(Box::new(inner))
        } else {
            ElementKind::Group(Box::new(inner))
        };
        Ok(Element::new(kind, span))
    }
}

#[inline]
fn starts_repetition(kind: &TokenKind) -> bool {
    matches!(kind, TokenKind::Repeat(_)) || kind.starts_element()
}

/// A single item stands for itself; more become an alternation or
/// concatenation spanning all of them.
fn collapse(mut items: Vec<Element>, wrap: fn(Vec<Element>) -> ElementKind) -> Element {
    if items.len() == 1 {
        if let Some(only) = items.pop() {
            return only;
        }
    }
    let span = match (items.first(), items.last()) {
        (Some(first), Some(last)) => first.span.merge(last.span),
        _ => Span::DUMMY,
    };
    Element::new(wrap(items), span)
}

#[cfg(test)]
mod tests;
