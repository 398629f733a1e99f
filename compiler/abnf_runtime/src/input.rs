//! Input cursor over a character buffer.
//!
//! An [`Input`] is a position into an immutable `char` slice. It is `Copy`,
//! so "the remainder from position N" is just another `Input` sharing the
//! same buffer; nothing is ever copied or mutated.
//!
//! The owning buffer is [`SourceText`]. It is built once per parse, which is
//! also where an absent input is normalized to the empty input.

use std::fmt;

use abnf_ir::{LineIndex, Span};

/// How literal text is compared against input.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Case {
    /// Exact match.
    Sensitive,
    /// ASCII letters match regardless of case, as for ABNF `"..."` strings.
    Insensitive,
}

impl Case {
    #[inline]
    pub fn matches(self, expected: char, actual: char) -> bool {
        match self {
            Case::Sensitive => expected == actual,
            Case::Insensitive => expected.eq_ignore_ascii_case(&actual),
        }
    }
}

/// Owned parser input.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SourceText {
    chars: Box<[char]>,
}

impl SourceText {
    pub fn new(text: &str) -> Self {
        SourceText {
            chars: text.chars().collect(),
        }
    }

    /// Build input from an optional string. `None` is the empty input.
    pub fn from_optional(text: Option<&str>) -> Self {
        Self::new(text.unwrap_or_default())
    }

    /// A cursor at position 0.
    #[inline]
    pub fn input(&self) -> Input<'_> {
        Input::new(&self.chars)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn as_chars(&self) -> &[char] {
        &self.chars
    }

    /// The text covered by a character span, clamped to the buffer.
    pub fn slice(&self, span: Span) -> String {
        let end = (span.end as usize).min(self.chars.len());
        let start = (span.start as usize).min(end);
        self.chars[start..end].iter().collect()
    }

    /// Line/column index in character offsets.
    pub fn line_index(&self) -> LineIndex {
        LineIndex::from_chars(&self.chars)
    }
}

impl From<&str> for SourceText {
    fn from(text: &str) -> Self {
        SourceText::new(text)
    }
}

impl fmt::Display for SourceText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.chars.iter().try_for_each(|c| write!(f, "{c}"))
    }
}

/// Immutable cursor: a backing buffer plus a position into it.
///
/// Two inputs are equal when they share the same buffer (by address) and sit
/// at the same position.
#[derive(Copy, Clone)]
pub struct Input<'a> {
    chars: &'a [char],
    position: usize,
}

impl<'a> Input<'a> {
    /// A cursor at the start of `chars`.
    #[inline]
    pub fn new(chars: &'a [char]) -> Self {
        Input { chars, position: 0 }
    }

    #[inline]
    pub fn position(self) -> usize {
        self.position
    }

    #[inline]
    pub fn at_end(self) -> bool {
        self.position >= self.chars.len()
    }

    /// The character at the cursor, or `None` at end of input.
    #[inline]
    pub fn current(self) -> Option<char> {
        self.chars.get(self.position).copied()
    }

    /// The character `offset` positions ahead of the cursor.
    #[inline]
    pub fn peek(self, offset: usize) -> Option<char> {
        self.chars.get(self.position.checked_add(offset)?).copied()
    }

    /// A new cursor `n` characters further on, clamped to the end.
    #[inline]
    #[must_use]
    pub fn advance(self, n: usize) -> Self {
        Input {
            chars: self.chars,
            position: self.position.saturating_add(n).min(self.chars.len()),
        }
    }

    /// A cursor on the same buffer at an absolute position, clamped to the end.
    #[inline]
    #[must_use]
    pub fn at(self, position: usize) -> Self {
        Input {
            chars: self.chars,
            position: position.min(self.chars.len()),
        }
    }

    /// Everything from the cursor to the end.
    #[inline]
    pub fn remaining(self) -> &'a [char] {
        &self.chars[self.position.min(self.chars.len())..]
    }

    /// The whole backing buffer.
    #[inline]
    pub fn source(self) -> &'a [char] {
        self.chars
    }

    /// Characters consumed between `start` and this cursor.
    ///
    /// Empty if `start` is not behind this cursor.
    pub fn consumed_since(self, start: Input<'a>) -> &'a [char] {
        let from = start.position.min(self.position);
        &self.chars[from..self.position]
    }

    /// Text consumed between `start` and this cursor.
    pub fn text_since(self, start: Input<'a>) -> String {
        self.consumed_since(start).iter().collect()
    }

    /// Character span from `start` to this cursor.
    pub fn span_from(self, start: Input<'a>) -> Span {
        Span::from_range(start.position.min(self.position)..self.position)
    }

    /// Number of characters `text` occupies at the cursor, if it matches.
    pub fn match_str(self, text: &str, case: Case) -> Option<usize> {
        let rest = self.remaining();
        let mut len = 0;
        for expected in text.chars() {
            let actual = *rest.get(len)?;
            if !case.matches(expected, actual) {
                return None;
            }
            len += 1;
        }
        Some(len)
    }

    /// Check whether `text` appears at the cursor.
    #[inline]
    pub fn starts_with(self, text: &str, case: Case) -> bool {
        self.match_str(text, case).is_some()
    }
}

impl PartialEq for Input<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.chars.as_ptr() == other.chars.as_ptr()
            && self.chars.len() == other.chars.len()
            && self.position == other.position
    }
}

impl Eq for Input<'_> {}

impl fmt::Debug for Input<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const PREVIEW: usize = 16;
        let rest = self.remaining();
        let preview: String = rest.iter().take(PREVIEW).collect();
        let ellipsis = if rest.len() > PREVIEW { "…" } else { "" };
        write!(f, "Input@{}({preview:?}{ellipsis})", self.position)
    }
}

#[cfg(test)]
mod tests;
