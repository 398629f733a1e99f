//! Lossless CST support.
//!
//! Every CST node keeps every matched piece of input, fixed literals
//! included, so writing a tree back out reproduces the text it was parsed
//! from. [`Lossless`] is that write-back.

use std::fmt;

use abnf_ir::Span;

/// Matched literal text and where it was found.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Lexeme {
    span: Span,
    text: String,
}

impl Lexeme {
    pub fn new(span: Span, text: impl Into<String>) -> Self {
        Lexeme {
            span,
            text: text.into(),
        }
    }

    #[inline]
    pub fn span(&self) -> Span {
        self.span
    }

    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl fmt::Display for Lexeme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Reconstruct the exact input text a node was parsed from.
pub trait Lossless {
    fn write_text(&self, out: &mut String);

    fn text(&self) -> String {
        let mut out = String::new();
        self.write_text(&mut out);
        out
    }
}

impl Lossless for char {
    #[inline]
    fn write_text(&self, out: &mut String) {
        out.push(*self);
    }
}

impl Lossless for Lexeme {
    #[inline]
    fn write_text(&self, out: &mut String) {
        out.push_str(&self.text);
    }
}

impl Lossless for () {
    fn write_text(&self, _out: &mut String) {}
}

impl<T: Lossless + ?Sized> Lossless for Box<T> {
    fn write_text(&self, out: &mut String) {
        (**self).write_text(out);
    }
}

impl<T: Lossless> Lossless for Option<T> {
    fn write_text(&self, out: &mut String) {
        if let Some(inner) = self {
            inner.write_text(out);
        }
    }
}

impl<T: Lossless> Lossless for Vec<T> {
    fn write_text(&self, out: &mut String) {
        for item in self {
            item.write_text(out);
        }
    }
}

macro_rules! lossless_tuple {
    ($($name:ident),+) => {
        impl<$($name: Lossless),+> Lossless for ($($name,)+) {
            #[allow(non_snake_case)]
            fn write_text(&self, out: &mut String) {
                let ($($name,)+) = self;
                $($name.write_text(out);)+
            }
        }
    };
}

lossless_tuple!(A);
lossless_tuple!(A, B);
lossless_tuple!(A, B, C);
lossless_tuple!(A, B, C, D);
lossless_tuple!(A, B, C, D, E);
lossless_tuple!(A, B, C, D, E, F);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn containers_concatenate_in_order() {
        let lexeme = Lexeme::new(Span::new(0, 2), "0x");
        let node = (Some('-'), lexeme, vec!['1', 'f'], None::<char>, Box::new('!'));
        assert_eq!(node.text(), "-0x1f!");
    }

    #[test]
    fn lexeme_display_is_its_text() {
        let lexeme = Lexeme::new(Span::new(3, 7), "true");
        assert_eq!(lexeme.to_string(), "true");
        assert_eq!(lexeme.span(), Span::new(3, 7));
        assert!(!lexeme.is_empty());
    }
}
