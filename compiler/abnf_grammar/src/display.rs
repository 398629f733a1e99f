//! Printing grammar elements back as ABNF.
//!
//! Output is canonical rather than verbatim: one space between items,
//! `" / "` between alternatives, upper-case hex digits, and case-sensitive
//! strings as `%s"..."`. Parentheses are added wherever the tree needs
//! them, so printing then re-parsing yields the same tree shape.

use std::fmt;

use abnf_runtime::Case;

use crate::ast::{Bounds, Element, ElementKind, Grammar, NumBase, NumValue, Rule};

/// Binding strength of an element, loosest first.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd)]
enum Precedence {
    Alternation,
    Concatenation,
    Repetition,
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_element(f, self, Precedence::Alternation)
    }
}

fn write_element(f: &mut fmt::Formatter<'_>, element: &Element, context: Precedence) -> fmt::Result {
    let own = match &element.kind {
        ElementKind::Alternation(_) => Precedence::Alternation,
        ElementKind::Concatenation(_) => Precedence::Concatenation,
        _ => Precedence::Repetition,
    };
    if own < context {
        f.write_str("(")?;
        write_element(f, element, Precedence::Alternation)?;
        return f.write_str(")");
    }

    match &element.kind {
        ElementKind::Alternation(items) => write_list(f, items, " / ", Precedence::Concatenation),
        ElementKind::Concatenation(items) => write_list(f, items, " ", Precedence::Repetition),
        ElementKind::Repetition { bounds, element } => {
            write!(f, "{bounds}")?;
            // a bare repetition inside a repetition needs parens: `2*(3DIGIT)`
            if matches!(element.kind, ElementKind::Repetition { .. }) {
                f.write_str("(")?;
                write_element(f, element, Precedence::Alternation)?;
                f.write_str(")")
            } else {
                write_element(f, element, Precedence::Repetition)
            }
        }
        ElementKind::Optional(inner) => {
            f.write_str("[")?;
            write_element(f, inner, Precedence::Alternation)?;
            f.write_str("]")
        }
        ElementKind::Group(inner) => {
            f.write_str("(")?;
            write_element(f, inner, Precedence::Alternation)?;
            f.write_str(")")
        }
        ElementKind::RuleRef(name) => f.write_str(name),
        ElementKind::CharVal { text, case } => write_char_val(f, text, *case),
        ElementKind::NumVal { base, value } => write_num_val(f, *base, value),
        ElementKind::Prose(text) => write!(f, "<{text}>"),
    }
}

fn write_list(
    f: &mut fmt::Formatter<'_>,
    items: &[Element],
    separator: &str,
    context: Precedence,
) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(separator)?;
        }
        write_element(f, item, context)?;
    }
    Ok(())
}

fn write_char_val(f: &mut fmt::Formatter<'_>, text: &str, case: Case) -> fmt::Result {
    match case {
        Case::Insensitive => write!(f, "\"{text}\""),
        Case::Sensitive if text.contains('"') => write!(f, "'{text}'"),
        Case::Sensitive => write!(f, "%s\"{text}\""),
    }
}

fn write_num_val(f: &mut fmt::Formatter<'_>, base: NumBase, value: &NumValue) -> fmt::Result {
    let digits = |n: u32| match base {
        NumBase::Binary => format!("{n:b}"),
        NumBase::Decimal => format!("{n}"),
        NumBase::Hex => format!("{n:02X}"),
    };
    write!(f, "%{}", base.prefix())?;
    match value {
        NumValue::Range { lo, hi } => write!(f, "{}-{}", digits(*lo), digits(*hi)),
        NumValue::Sequence(values) => {
            let parts: Vec<String> = values.iter().map(|v| digits(*v)).collect();
            f.write_str(&parts.join("."))
        }
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.min, self.max) {
            (min, Some(max)) if min == max => write!(f, "{min}"),
            (0, None) => f.write_str("*"),
            (0, Some(max)) => write!(f, "*{max}"),
            (min, None) => write!(f, "{min}*"),
            (min, Some(max)) => write!(f, "{min}*{max}"),
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.name, self.definition)
    }
}

impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rule in self.iter() {
            writeln!(f, "{rule}")?;
        }
        Ok(())
    }
}
