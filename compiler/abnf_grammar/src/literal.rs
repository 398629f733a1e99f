//! Fixed literal text of grammar elements.
//!
//! Used to spot alternatives an earlier literal alternative always wins
//! over, and to reorder purely literal alternations longest first.

use abnf_runtime::stack::ensure_sufficient_stack;
use abnf_runtime::Case;

use crate::ast::{Element, ElementKind, NumValue};

/// Longest text [`literal_text`] and [`literal_prefix`] expand. Exact
/// repetitions such as `1000(1000"a")` stop here instead of expanding.
pub const MAX_LITERAL_LEN: usize = 1024;

/// Literal text where each character carries its own case sensitivity
/// (`"in" %s"F"` mixes both).
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct LiteralText {
    chars: Vec<(char, Case)>,
}

impl LiteralText {
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn text(&self) -> String {
        self.chars.iter().map(|&(c, _)| c).collect()
    }

    /// Append `chars`, or return false if that would pass
    /// [`MAX_LITERAL_LEN`].
    fn extend(&mut self, chars: impl ExactSizeIterator<Item = (char, Case)>) -> bool {
        if self.chars.len() + chars.len() > MAX_LITERAL_LEN {
            return false;
        }
        self.chars.extend(chars);
        true
    }

    /// Every input that starts with `other` also starts with text `self`
    /// accepts.
    pub fn covers(&self, other: &LiteralText) -> bool {
        self.len() <= other.len()
            && self
                .chars
                .iter()
                .zip(&other.chars)
                .all(|(&(mine, my_case), &(theirs, their_case))| match my_case {
                    Case::Insensitive => mine.eq_ignore_ascii_case(&theirs),
                    Case::Sensitive => {
                        mine == theirs
                            && (their_case == Case::Sensitive || !theirs.is_ascii_alphabetic())
                    }
                })
    }
}

/// The exact text `element` matches, if it always matches the same text
/// and that text is at most [`MAX_LITERAL_LEN`] characters.
pub fn literal_text(element: &Element) -> Option<LiteralText> {
    let mut text = LiteralText::default();
    if append_literal(element, &mut text) {
        Some(text)
    } else {
        None
    }
}

/// The longest fixed text every match of `element` starts with, cut at
/// [`MAX_LITERAL_LEN`] characters.
pub fn literal_prefix(element: &Element) -> LiteralText {
    let mut text = LiteralText::default();
    match &element.ungrouped().kind {
        ElementKind::Concatenation(items) => {
            for item in items {
                if !append_literal(item, &mut text) {
                    break;
                }
            }
        }
        _ => {
            append_literal(element, &mut text);
        }
    }
    text
}

/// Append `element`'s fixed text, returning false if it has none. On
/// false, `text` may hold a partial prefix.
fn append_literal(element: &Element, text: &mut LiteralText) -> bool {
    match &element.kind {
        ElementKind::CharVal { text: value, case } => {
            let chars: Vec<char> = value.chars().collect();
            text.extend(chars.into_iter().map(|c| (c, *case)))
        }
        ElementKind::NumVal {
            value: NumValue::Sequence(values),
            ..
        } => {
            let chars: Option<Vec<char>> = values.iter().map(|&v| char::from_u32(v)).collect();
            chars.is_some_and(|chars| text.extend(chars.into_iter().map(|c| (c, Case::Sensitive))))
        }
        ElementKind::Group(inner) => ensure_sufficient_stack(|| append_literal(inner, text)),
        ElementKind::Concatenation(items) => items.iter().all(|item| append_literal(item, text)),
        ElementKind::Repetition { bounds, element } if bounds.max == Some(bounds.min) => {
            let Some(once) = ensure_sufficient_stack(|| literal_text(element)) else {
                return false;
            };
            let Ok(count) = usize::try_from(bounds.min) else {
                return false;
            };
            if once.is_empty() {
                return true;
            }
            if once.len().saturating_mul(count) > MAX_LITERAL_LEN - text.len() {
                return false;
            }
            (0..count).all(|_| text.extend(once.chars.iter().copied()))
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::lex;
    use crate::parser::parse;

    fn body(source: &str) -> Element {
        let lexed = lex(&format!("r = {source}"));
        let mut syntax = parse(&lexed.tokens);
        assert!(syntax.diagnostics.is_empty(), "{:?}", syntax.diagnostics);
        syntax.definitions.remove(0).body
    }

    fn text(source: &str) -> Option<String> {
        literal_text(&body(source)).map(|t| t.text())
    }

    #[test]
    fn fixed_text() {
        assert_eq!(text("\"INF\""), Some("INF".to_string()));
        assert_eq!(text("\"-\" 'INF'"), Some("-INF".to_string()));
        assert_eq!(text("%x0D.0A"), Some("\r\n".to_string()));
        assert_eq!(text("2\"ab\""), Some("abab".to_string()));
        assert_eq!(text("1*DIGIT"), None);
        assert_eq!(text("\"a\" / \"b\""), None);
    }

    #[test]
    fn long_expansions_are_cut_off() {
        assert_eq!(text("1024\"a\"").map(|t| t.len()), Some(MAX_LITERAL_LEN));
        assert_eq!(text("1025\"a\""), None);
        assert_eq!(text("100000(100000\"a\")"), None);
        assert_eq!(text("4000000000(\"\")"), Some(String::new()));
        let prefix = literal_prefix(&body("1000\"a\" 1000\"b\" DIGIT"));
        assert_eq!(prefix.len(), 1000);
    }

    #[test]
    fn prefix_stops_at_first_variable_part() {
        assert_eq!(literal_prefix(&body("\"dura\" \"tion\" SQUOTE x")).text(), "duration");
        assert_eq!(literal_prefix(&body("DIGIT \"x\"")).text(), "");
    }

    #[test]
    fn coverage_respects_case() {
        let insensitive = literal_text(&body("\"inf\"")).unwrap_or_default();
        let sensitive = literal_text(&body("'INF'")).unwrap_or_default();
        let longer = literal_prefix(&body("'INFINITY'"));
        assert!(insensitive.covers(&sensitive));
        assert!(insensitive.covers(&longer));
        assert!(sensitive.covers(&longer));
        // `'INF'` does not match `inf`, which `"inf"` accepts
        assert!(!sensitive.covers(&insensitive));
        assert!(!longer.covers(&sensitive));
    }

    #[test]
    fn sensitive_digits_cover_insensitive_digits() {
        let sensitive = literal_text(&body("%x31")).unwrap_or_default();
        let insensitive = literal_text(&body("\"1\"")).unwrap_or_default();
        assert!(sensitive.covers(&insensitive));
    }
}
