//! Rust source for typed rule parsers.
//!
//! Every rule `r` becomes a CST type `R` and a zero-sized `RParser`
//! implementing `Parser<Value = R>`, written with `seq!` and `one_of!` the
//! same way hand-written rule modules are:
//!
//! - an alternation is an enum with one variant per alternative; exact
//!   case-sensitive literals are payload-free unit variants;
//! - a concatenation is a struct with one field per element, literals
//!   included, so the tree stays lossless;
//! - anything else is a newtype around the element's value.
//!
//! Alternations and concatenations nested inside a rule get their own types
//! named after the rule (`DateValueSeq1`, `SignAlt2`). A reference back into
//! the rule's own cycle is boxed.

use abnf_grammar::{Grammar, RuleId};
use abnf_runtime::stack::ensure_sufficient_stack;
use abnf_runtime::Case;
use rustc_hash::FxHashSet;

use crate::normalize::{normalize, Alternative, Expr, NormalRule};
use crate::{CompileError, CompileOptions};

/// Code generation settings.
#[derive(Clone, Debug, Default)]
pub struct CodegenOptions {
    /// Try purely literal alternatives longest first.
    pub reorder: bool,
    /// Named in the module docs, usually the grammar file name.
    pub title: Option<String>,
    /// Leave out the module docs and inner attributes, for output that is
    /// `include!`d into another module.
    pub embedded: bool,
}

/// Generate a Rust module with typed parsers for every rule of `grammar`.
///
/// The module imports `abnf_runtime::prelude::*`.
#[tracing::instrument(level = "debug", skip_all, fields(rules = grammar.len()))]
pub fn generate_rust(grammar: &Grammar, options: &CodegenOptions) -> Result<String, CompileError> {
    let rules = normalize(
        grammar,
        &CompileOptions {
            reorder: options.reorder,
        },
    )?;
    let mut names = Names::new(&rules);
    let recursion = Recursion::new(&rules);

    let mut out = header(options);
    for rule in &rules {
        let owner_type = names.rule_type(rule.id).to_string();
        let generator = RuleGen {
            names: &mut names,
            recursion: &recursion,
            owner: rule.id,
            owner_type,
            next_part: 1,
            items: Vec::new(),
        };
        let doc = format!("`{} = {}`", rule.name, grammar[rule.id].definition);
        for item in generator.generate(rule, &doc) {
            out.push('\n');
            out.push_str(&item);
        }
    }
    tracing::debug!(bytes = out.len(), "generated rule parsers");
    Ok(out)
}

fn header(options: &CodegenOptions) -> String {
    const IMPORTS: &str = "use abnf_runtime::prelude::*;\nuse abnf_runtime::stack::ensure_sufficient_stack;\n";
    if options.embedded {
        return IMPORTS.to_string();
    }
    let title = options
        .title
        .as_deref()
        .map_or_else(|| "the grammar".to_string(), |title| format!("`{title}`"));
    format!(
        "//! Typed rule parsers for {title}.
//!
//! Generated by `abnfc gen`. Edit the grammar, not this file.

#![allow(clippy::pedantic, clippy::upper_case_acronyms, unused_imports)]

{IMPORTS}"
    )
}

// === Naming ===

/// Names generated code must not shadow.
const RESERVED_TYPES: &[&str] = &[
    "Box", "CharRange", "CharSet", "Clone", "Copy", "Debug", "Default", "Eq", "Err", "Input",
    "Lexeme", "Literal", "Lossless", "None", "Ok", "Option", "ParseOutput", "Parser", "ParserExt",
    "PartialEq", "Result", "Self", "Some", "String", "Vec",
];

/// Rust keywords, plus `input`, which rule bodies already bind.
const RESERVED_FIELDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "crate",
    "do", "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl", "in",
    "input", "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv",
    "pub", "ref", "return", "self", "static", "struct", "super", "trait", "true", "try", "type",
    "typeof", "unsafe", "unsized", "use", "virtual", "where", "while", "yield",
];

/// `dateValue` → `DateValue`, `segment-nz` → `SegmentNz`, `HEXDIG` → `Hexdig`.
fn upper_camel(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for word in name.split(|c: char| !c.is_ascii_alphanumeric()).filter(|w| !w.is_empty()) {
        let shouting = !word.chars().any(|c| c.is_ascii_lowercase());
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            out.push(first.to_ascii_uppercase());
        }
        if shouting {
            out.extend(chars.map(|c| c.to_ascii_lowercase()));
        } else {
            out.extend(chars);
        }
    }
    out
}

/// `dateTimeOffsetValue` → `date_time_offset_value`, `HEXDIG` → `hexdig`.
fn snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let chars: Vec<char> = name.chars().collect();
    for (i, &c) in chars.iter().enumerate() {
        if !c.is_ascii_alphanumeric() {
            if !out.is_empty() && !out.ends_with('_') {
                out.push('_');
            }
            continue;
        }
        if c.is_ascii_uppercase() && i > 0 && !out.ends_with('_') {
            let prev = chars[i - 1];
            let next_lower = chars.get(i + 1).is_some_and(char::is_ascii_lowercase);
            if prev.is_ascii_lowercase() || prev.is_ascii_digit() || (prev.is_ascii_uppercase() && next_lower) {
                out.push('_');
            }
        }
        out.push(c.to_ascii_lowercase());
    }
    while out.ends_with('_') {
        out.pop();
    }
    out
}

fn punctuation_word(c: char) -> Option<&'static str> {
    Some(match c {
        '+' => "Plus",
        '-' => "Minus",
        '*' => "Star",
        '/' => "Slash",
        '\\' => "Backslash",
        '.' => "Dot",
        ',' => "Comma",
        ':' => "Colon",
        ';' => "Semicolon",
        '=' => "Eq",
        '(' => "LParen",
        ')' => "RParen",
        '[' => "LBracket",
        ']' => "RBracket",
        '{' => "LBrace",
        '}' => "RBrace",
        '<' => "Lt",
        '>' => "Gt",
        '%' => "Percent",
        '$' => "Dollar",
        '&' => "Amp",
        '@' => "At",
        '!' => "Bang",
        '?' => "Question",
        '#' => "Hash",
        '\'' => "Quote",
        '"' => "DoubleQuote",
        '_' => "Underscore",
        '~' => "Tilde",
        '^' => "Caret",
        '|' => "Pipe",
        ' ' => "Space",
        '\t' => "Tab",
        '\r' => "Cr",
        '\n' => "Lf",
        _ => return None,
    })
}

/// `"$top"` → `DollarTop`, `"-INF"` → `MinusINF`, `"4.0"` → `X4Dot0`.
fn literal_name(text: &str) -> Option<String> {
    let mut out = String::new();
    let mut word_start = true;
    for c in text.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(if word_start { c.to_ascii_uppercase() } else { c });
            word_start = false;
        } else {
            if let Some(word) = punctuation_word(c) {
                out.push_str(word);
            }
            word_start = true;
        }
    }
    if out.is_empty() {
        return None;
    }
    if out.starts_with(|c: char| c.is_ascii_digit()) {
        out.insert(0, 'X');
    }
    Some(out)
}

fn field_ident(name: String) -> String {
    if RESERVED_FIELDS.contains(&name.as_str()) {
        format!("{name}_")
    } else {
        name
    }
}

/// Type names, unique across the generated module.
struct Names {
    rule_types: Vec<String>,
    used: FxHashSet<String>,
}

impl Names {
    fn new(rules: &[NormalRule]) -> Self {
        let mut names = Names {
            rule_types: Vec::with_capacity(rules.len()),
            used: RESERVED_TYPES.iter().map(|name| (*name).to_string()).collect(),
        };
        for rule in rules {
            let mut base = upper_camel(&rule.name);
            if base.is_empty() || RESERVED_TYPES.contains(&base.as_str()) {
                base.push_str("Rule");
            }
            let name = names.fresh(&base);
            names.rule_types.push(name);
        }
        names
    }

    fn rule_type(&self, id: RuleId) -> &str {
        self.rule_types.get(id.index()).map_or("Unknown", String::as_str)
    }

    /// `base`, or `base` with a number appended, such that neither the
    /// name nor its parser name is taken.
    fn fresh(&mut self, base: &str) -> String {
        let mut candidate = base.to_string();
        let mut n = 2;
        while self.used.contains(&candidate) || self.used.contains(&format!("{candidate}Parser")) {
            candidate = format!("{base}{n}");
            n += 1;
        }
        self.used.insert(format!("{candidate}Parser"));
        self.used.insert(candidate.clone());
        candidate
    }
}

/// Which rule references need a `Box` to keep CST types finite.
struct Recursion {
    /// `reaches[r]`: rules reachable from `r` in one or more steps.
    reaches: Vec<FxHashSet<RuleId>>,
}

impl Recursion {
    fn new(rules: &[NormalRule]) -> Self {
        let successors: Vec<Vec<RuleId>> = rules
            .iter()
            .map(|rule| {
                let mut refs = Vec::new();
                collect_refs(&rule.body, &mut refs);
                refs
            })
            .collect();
        let reaches = (0..rules.len())
            .map(|start| {
                let mut seen = FxHashSet::default();
                let mut stack: Vec<RuleId> = successors.get(start).cloned().unwrap_or_default();
                while let Some(id) = stack.pop() {
                    if seen.insert(id) {
                        stack.extend(successors.get(id.index()).into_iter().flatten().copied());
                    }
                }
                seen
            })
            .collect();
        Recursion { reaches }
    }

    /// A field of `owner`'s types holding `target` must be boxed.
    fn needs_box(&self, owner: RuleId, target: RuleId) -> bool {
        owner == target
            || self
                .reaches
                .get(target.index())
                .is_some_and(|reached| reached.contains(&owner))
    }
}

fn collect_refs(expr: &Expr, refs: &mut Vec<RuleId>) {
    match expr {
        Expr::Choice(alternatives) => {
            for alternative in alternatives {
                collect_refs(&alternative.expr, refs);
            }
        }
        Expr::Sequence(parts) => {
            for part in parts {
                collect_refs(part, refs);
            }
        }
        Expr::Repeat { expr, .. } | Expr::Optional(expr) => collect_refs(expr, refs),
        Expr::Rule(id) => refs.push(*id),
        Expr::Literal { .. } | Expr::Range { .. } => {}
    }
}

// === Generation ===

/// The type and parser expression of one element.
struct Part {
    ty: String,
    parser: String,
}

struct RuleGen<'g> {
    names: &'g mut Names,
    recursion: &'g Recursion,
    owner: RuleId,
    owner_type: String,
    next_part: usize,
    items: Vec<String>,
}

impl RuleGen<'_> {
    fn generate(mut self, rule: &NormalRule, doc: &str) -> Vec<String> {
        let ty = self.owner_type.clone();
        self.define(&ty, &rule.body, Some(&rule.name), doc);
        self.items
    }

    /// Emit a type, its `Lossless` impl and its parser.
    fn define(&mut self, ty: &str, expr: &Expr, rule: Option<&str>, doc: &str) {
        let slot = self.items.len();
        self.items.push(String::new());

        let body_indent = if rule.is_some() { 12 } else { 8 };
        let shape = match expr {
            Expr::Choice(alternatives) => self.choice(ty, alternatives, body_indent),
            Expr::Sequence(parts) => self.sequence(ty, parts, body_indent),
            other => self.newtype(ty, other),
        };
        let body = match rule {
            Some(name) => format!(
                "ensure_sufficient_stack(|| {{\n            {}\n        }})\n        .named(input, {name:?})",
                shape.body
            ),
            None => shape.body,
        };

        self.items[slot] = format!(
            "/// {doc}
#[derive(Clone, Debug, Eq, PartialEq)]
{definition}

impl Lossless for {ty} {{
    fn write_text(&self, out: &mut String) {{
{lossless}    }}
}}

#[derive(Copy, Clone, Debug, Default)]
pub struct {ty}Parser;

impl Parser for {ty}Parser {{
    type Value = {ty};

    fn parse<'a>(&self, input: Input<'a>) -> ParseOutput<'a, {ty}> {{
        {body}
    }}
}}
",
            definition = shape.definition,
            lossless = shape.lossless,
        );
    }

    fn choice(&mut self, ty: &str, alternatives: &[Alternative], indent: usize) -> Shape {
        let pad = " ".repeat(indent + 4);
        let close = " ".repeat(indent);

        // variants are declared in grammar order, tried in `alternatives` order
        let mut by_index: Vec<&Alternative> = alternatives.iter().collect();
        by_index.sort_by_key(|alt| alt.index);

        let mut used = FxHashSet::default();
        let mut variants = Vec::with_capacity(by_index.len());
        for alternative in by_index {
            let mut name = self
                .variant_name(&alternative.expr)
                .unwrap_or_else(|| format!("Alt{}", alternative.index));
            if !used.insert(name.clone()) {
                name = format!("Alt{}", alternative.index);
                used.insert(name.clone());
            }
            let variant = match &alternative.expr {
                Expr::Literal { text, case } if is_exact(text, *case) => Variant {
                    index: alternative.index,
                    name,
                    payload: None,
                    parser: literal_parser(text, *case),
                    text: Some(text.clone()),
                },
                expr => {
                    let part = self.part(expr);
                    Variant {
                        index: alternative.index,
                        name,
                        payload: Some(part.ty),
                        parser: part.parser,
                        text: None,
                    }
                }
            };
            variants.push(variant);
        }

        let mut definition = format!("pub enum {ty} {{\n");
        let mut lossless = "        match self {\n".to_string();
        for variant in &variants {
            match &variant.payload {
                Some(payload) => {
                    definition.push_str(&format!("    {}({payload}),\n", variant.name));
                    lossless.push_str(&format!(
                        "            {ty}::{}(value) => value.write_text(out),\n",
                        variant.name
                    ));
                }
                None => {
                    definition.push_str(&format!("    {},\n", variant.name));
                    lossless.push_str(&format!(
                        "            {ty}::{} => out.push_str({:?}),\n",
                        variant.name,
                        variant.text.as_deref().unwrap_or_default()
                    ));
                }
            }
        }
        definition.push('}');
        lossless.push_str("        }\n");

        let mut body = "one_of!(input;\n".to_string();
        for alternative in alternatives {
            let Some(variant) = variants.iter().find(|v| v.index == alternative.index) else {
                continue;
            };
            let wrap = match variant.payload {
                Some(_) => format!("{ty}::{}", variant.name),
                None => format!("|_| {ty}::{}", variant.name),
            };
            body.push_str(&format!("{pad}{} => {wrap},\n", variant.parser));
        }
        body.push_str(&close);
        body.push(')');

        Shape {
            definition,
            lossless,
            body,
        }
    }

    fn sequence(&mut self, ty: &str, parts: &[Expr], indent: usize) -> Shape {
        let pad = " ".repeat(indent + 4);
        let close = " ".repeat(indent);

        let mut used = FxHashSet::default();
        let mut fields = Vec::with_capacity(parts.len());
        for expr in parts {
            let base = field_ident(self.field_name(expr));
            let mut name = base.clone();
            let mut n = 2;
            while !used.insert(name.clone()) {
                name = format!("{base}{n}");
                n += 1;
            }
            fields.push((name, self.part(expr)));
        }

        let mut definition = format!("pub struct {ty} {{\n");
        let mut lossless = String::new();
        let mut body = "seq!(input;\n".to_string();
        for (name, part) in &fields {
            definition.push_str(&format!("    pub {name}: {},\n", part.ty));
            lossless.push_str(&format!("        self.{name}.write_text(out);\n"));
            body.push_str(&format!("{pad}{name} = {},\n", part.parser));
        }
        definition.push('}');
        let names: Vec<&str> = fields.iter().map(|(name, _)| name.as_str()).collect();
        body.push_str(&format!("{pad}=> {ty} {{ {} }}\n{close})", names.join(", ")));

        Shape {
            definition,
            lossless,
            body,
        }
    }

    fn newtype(&mut self, ty: &str, expr: &Expr) -> Shape {
        let part = self.part(expr);
        Shape {
            definition: format!("pub struct {ty}(pub {});", part.ty),
            lossless: "        self.0.write_text(out);\n".to_string(),
            body: format!("{}.map({ty}).parse(input)", part.parser),
        }
    }

    fn part(&mut self, expr: &Expr) -> Part {
        ensure_sufficient_stack(|| self.part_inner(expr))
    }

    fn part_inner(&mut self, expr: &Expr) -> Part {
        match expr {
            Expr::Choice(_) | Expr::Sequence(_) => {
                let kind = if matches!(expr, Expr::Choice(_)) { "Alt" } else { "Seq" };
                let base = format!("{}{kind}{}", self.owner_type, self.next_part);
                self.next_part += 1;
                let ty = self.names.fresh(&base);
                let doc = format!("Part of [`{}`].", self.owner_type);
                self.define(&ty, expr, None, &doc);
                Part {
                    parser: format!("{ty}Parser"),
                    ty,
                }
            }
            Expr::Repeat { min, max, expr } => {
                let inner = self.part(expr);
                let parser = match (min, max) {
                    (0, None) => format!("{}.many()", inner.parser),
                    (min, Some(max)) => format!("{}.repeat({min}, Some({max}))", inner.parser),
                    (min, None) => format!("{}.repeat({min}, None)", inner.parser),
                };
                Part {
                    ty: format!("Vec<{}>", inner.ty),
                    parser,
                }
            }
            Expr::Optional(expr) => {
                let inner = self.part(expr);
                Part {
                    ty: format!("Option<{}>", inner.ty),
                    parser: format!("{}.optional()", inner.parser),
                }
            }
            Expr::Rule(id) => {
                let target = self.names.rule_type(*id).to_string();
                if self.recursion.needs_box(self.owner, *id) {
                    Part {
                        ty: format!("Box<{target}>"),
                        parser: format!("{target}Parser.map(Box::new)"),
                    }
                } else {
                    Part {
                        parser: format!("{target}Parser"),
                        ty: target,
                    }
                }
            }
            Expr::Literal { text, case } => Part {
                ty: "Lexeme".to_string(),
                parser: literal_parser(text, *case),
            },
            Expr::Range { lo, hi } => Part {
                ty: "char".to_string(),
                parser: if lo == hi {
                    format!("CharRange::single({lo:?})")
                } else {
                    format!("CharRange::new({lo:?}, {hi:?})")
                },
            },
        }
    }

    fn variant_name(&self, expr: &Expr) -> Option<String> {
        match expr {
            Expr::Rule(id) => Some(self.names.rule_type(*id).to_string()),
            Expr::Literal { text, .. } => literal_name(text),
            Expr::Sequence(parts) => parts.first().and_then(|first| self.variant_name(first)),
            Expr::Repeat { expr, .. } | Expr::Optional(expr) => self.variant_name(expr),
            Expr::Choice(_) | Expr::Range { .. } => None,
        }
    }

    fn field_name(&self, expr: &Expr) -> String {
        match expr {
            Expr::Rule(id) => snake_case(self.names.rule_type(*id)),
            Expr::Literal { text, .. } => literal_name(text).map_or_else(|| "literal".to_string(), |name| snake_case(&name)),
            Expr::Repeat { expr, .. } | Expr::Optional(expr) => self.field_name(expr),
            Expr::Range { .. } => "range".to_string(),
            Expr::Choice(_) | Expr::Sequence(_) => "group".to_string(),
        }
    }
}

struct Shape {
    definition: String,
    lossless: String,
    body: String,
}

struct Variant {
    index: usize,
    name: String,
    payload: Option<String>,
    parser: String,
    /// Text of a payload-free variant.
    text: Option<String>,
}

/// A literal that always matches exactly its own text.
fn is_exact(text: &str, case: Case) -> bool {
    case == Case::Sensitive || !text.chars().any(|c| c.is_ascii_alphabetic())
}

fn literal_parser(text: &str, case: Case) -> String {
    match case {
        Case::Sensitive => format!("Literal::sensitive({text:?})"),
        Case::Insensitive => format!("Literal::insensitive({text:?})"),
    }
}
