//! Grammar model.
//!
//! A [`Grammar`] is an ordered table of [`Rule`]s. Rules are addressed by a
//! stable [`RuleId`] (their index) and looked up by name case-insensitively,
//! as RFC 5234 requires. Rule bodies are [`Element`] trees that keep the
//! shape they were written in, groups included, so they print back as
//! written.

use abnf_ir::Span;
use abnf_runtime::stack::ensure_sufficient_stack;
use abnf_runtime::Case;
use rustc_hash::FxHashMap;

/// Index of a rule in its grammar.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RuleId(u32);

impl RuleId {
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        RuleId(raw)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Repetition bounds. `max: None` is unbounded.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    pub min: u32,
    pub max: Option<u32>,
}

impl Bounds {
    /// `*`: zero or more.
    pub const ANY: Bounds = Bounds { min: 0, max: None };

    pub const fn new(min: u32, max: Option<u32>) -> Self {
        Bounds { min, max }
    }

    pub const fn exactly(count: u32) -> Self {
        Bounds {
            min: count,
            max: Some(count),
        }
    }

    /// `min > max`, which no input satisfies.
    pub fn is_inverted(self) -> bool {
        self.max.is_some_and(|max| self.min > max)
    }
}

/// Radix of a numeric value.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NumBase {
    Binary,
    Decimal,
    Hex,
}

impl NumBase {
    pub fn radix(self) -> u32 {
        match self {
            NumBase::Binary => 2,
            NumBase::Decimal => 10,
            NumBase::Hex => 16,
        }
    }

    /// The letter after `%`.
    pub fn prefix(self) -> char {
        match self {
            NumBase::Binary => 'b',
            NumBase::Decimal => 'd',
            NumBase::Hex => 'x',
        }
    }
}

/// A numeric terminal: one code point range, or a fixed code point sequence.
///
/// A single value like `%x41` is a sequence of length one.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NumValue {
    Range { lo: u32, hi: u32 },
    Sequence(Vec<u32>),
}

/// A node in a rule body.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Element {
    pub kind: ElementKind,
    pub span: Span,
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ElementKind {
    /// `a / b / c`, tried in order.
    Alternation(Vec<Element>),
    /// `a b c`
    Concatenation(Vec<Element>),
    /// `n*m element`
    Repetition {
        bounds: Bounds,
        element: Box<Element>,
    },
    /// `[ element ]`
    Optional(Box<Element>),
    /// `( element )`
    Group(Box<Element>),
    /// Reference to a rule by name, as written.
    RuleRef(String),
    /// Quoted literal text.
    CharVal { text: String, case: Case },
    NumVal { base: NumBase, value: NumValue },
    /// `<free text>`; describes a rule informally and cannot be compiled.
    Prose(String),
}

impl Element {
    pub fn new(kind: ElementKind, span: Span) -> Self {
        Element { kind, span }
    }

    /// Child elements, in order.
    pub fn children(&self) -> &[Element] {
        match &self.kind {
            ElementKind::Alternation(items) | ElementKind::Concatenation(items) => items,
            ElementKind::Repetition { element, .. }
            | ElementKind::Optional(element)
            | ElementKind::Group(element) => std::slice::from_ref(element.as_ref()),
            ElementKind::RuleRef(_)
            | ElementKind::CharVal { .. }
            | ElementKind::NumVal { .. }
            | ElementKind::Prose(_) => &[],
        }
    }

    /// Visit this element and every descendant, parents first.
    pub fn walk<'a>(&'a self, f: &mut impl FnMut(&'a Element)) {
        f(self);
        for child in self.children() {
            ensure_sufficient_stack(|| child.walk(f));
        }
    }

    /// Names of every rule referenced from this element, in order of
    /// appearance (with repeats).
    pub fn rule_refs(&self) -> Vec<(&str, Span)> {
        let mut refs = Vec::new();
        self.walk(&mut |element| {
            if let ElementKind::RuleRef(name) = &element.kind {
                refs.push((name.as_str(), element.span));
            }
        });
        refs
    }

    /// Strip any number of enclosing groups.
    pub fn ungrouped(&self) -> &Element {
        let mut element = self;
        while let ElementKind::Group(inner) = &element.kind {
            element = inner;
        }
        element
    }

    /// The alternatives of this element: itself unless it is an alternation.
    pub fn alternatives(&self) -> &[Element] {
        match &self.ungrouped().kind {
            ElementKind::Alternation(items) => items,
            _ => std::slice::from_ref(self),
        }
    }
}

/// Where a rule came from.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RuleOrigin {
    /// Written in the grammar file.
    Grammar,
    /// One of the RFC 5234 Appendix B core rules, added because it was
    /// referenced.
    Core,
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rule {
    pub id: RuleId,
    /// Name as first written.
    pub name: String,
    /// Span of the name in the defining `=` line.
    pub name_span: Span,
    pub definition: Element,
    pub origin: RuleOrigin,
}

impl Rule {
    pub fn is_core(&self) -> bool {
        self.origin == RuleOrigin::Core
    }
}

/// Lookup key for a rule name. ABNF rule names are case-insensitive.
pub fn rule_key(name: &str) -> String {
    name.to_ascii_lowercase()
}

/// An ordered rule table.
#[derive(Clone, Debug, Default)]
pub struct Grammar {
    rules: Vec<Rule>,
    by_name: FxHashMap<String, RuleId>,
}

impl Grammar {
    pub fn new() -> Self {
        Grammar::default()
    }

    /// Add a rule, replacing the id with its table index.
    ///
    /// The caller guarantees the name is not yet defined.
    pub(crate) fn push(&mut self, mut rule: Rule) -> RuleId {
        let id = RuleId(u32::try_from(self.rules.len()).unwrap_or(u32::MAX));
        rule.id = id;
        self.by_name.insert(rule_key(&rule.name), id);
        self.rules.push(rule);
        id
    }

    pub(crate) fn rule_mut(&mut self, id: RuleId) -> &mut Rule {
        &mut self.rules[id.index()]
    }

    #[inline]
    pub fn rule(&self, id: RuleId) -> &Rule {
        &self.rules[id.index()]
    }

    /// Look up a rule by name, ignoring case.
    pub fn get(&self, name: &str) -> Option<&Rule> {
        self.id_of(name).map(|id| self.rule(id))
    }

    pub fn id_of(&self, name: &str) -> Option<RuleId> {
        self.by_name.get(&rule_key(name)).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(&rule_key(name))
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// The first rule written in the grammar file: the default start rule.
    pub fn first_rule(&self) -> Option<&Rule> {
        self.rules.iter().find(|rule| !rule.is_core())
    }

    /// Rules referenced from `id`'s body that exist in this grammar.
    pub fn successors(&self, id: RuleId) -> Vec<RuleId> {
        let mut out: Vec<RuleId> = self
            .rule(id)
            .definition
            .rule_refs()
            .into_iter()
            .filter_map(|(name, _)| self.id_of(name))
            .collect();
        out.sort_unstable();
        out.dedup();
        out
    }

    /// Every rule reachable from `start`, including `start`, in id order.
    pub fn reachable_from(&self, start: RuleId) -> Vec<RuleId> {
        let mut seen = vec![false; self.rules.len()];
        let mut stack = vec![start];
        while let Some(id) = stack.pop() {
            if std::mem::replace(&mut seen[id.index()], true) {
                continue;
            }
            stack.extend(self.successors(id));
        }
        seen.iter()
            .enumerate()
            .filter(|&(_, &s)| s)
            .map(|(i, _)| RuleId(u32::try_from(i).unwrap_or(u32::MAX)))
            .collect()
    }
}

impl std::ops::Index<RuleId> for Grammar {
    type Output = Rule;

    fn index(&self, id: RuleId) -> &Rule {
        self.rule(id)
    }
}
