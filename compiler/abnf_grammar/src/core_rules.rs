//! RFC 5234 Appendix B core rules.
//!
//! Grammars use `ALPHA`, `DIGIT`, `DQUOTE` and friends without defining
//! them. When a grammar references a core rule it does not define itself,
//! the definition below is added (with anything it references in turn).

use std::sync::OnceLock;

use crate::ast::{rule_key, Grammar, Rule, RuleId, RuleOrigin};
use crate::lexer::lex;
use crate::parser::parse;

/// The core rules, verbatim from RFC 5234 Appendix B.1.
pub const CORE_GRAMMAR: &str = "\
ALPHA          =  %x41-5A / %x61-7A   ; A-Z / a-z
BIT            =  \"0\" / \"1\"
CHAR           =  %x01-7F
CR             =  %x0D
CRLF           =  CR LF
CTL            =  %x00-1F / %x7F
DIGIT          =  %x30-39
DQUOTE         =  %x22
HEXDIG         =  DIGIT / \"A\" / \"B\" / \"C\" / \"D\" / \"E\" / \"F\"
HTAB           =  %x09
LF             =  %x0A
LWSP           =  *(WSP / CRLF WSP)
OCTET          =  %x00-FF
SP             =  %x20
VCHAR          =  %x21-7E
WSP            =  SP / HTAB
";

/// Parsed core rules, built once.
fn core_rules() -> &'static [Rule] {
    static RULES: OnceLock<Vec<Rule>> = OnceLock::new();
    RULES.get_or_init(|| {
        let lexed = lex(CORE_GRAMMAR);
        parse(&lexed.tokens)
            .definitions
            .into_iter()
            .map(|definition| Rule {
                id: RuleId::from_raw(0),
                name: definition.name,
                name_span: abnf_ir::Span::DUMMY,
                definition: definition.body,
                origin: RuleOrigin::Core,
            })
            .collect()
    })
}

/// Is `name` one of the core rules?
pub fn is_core_rule(name: &str) -> bool {
    core_rules().iter().any(|rule| rule.name.eq_ignore_ascii_case(name))
}

/// Add every core rule `grammar` references but does not define.
///
/// Returns the names added, in the order they were added.
pub fn add_referenced_core_rules(grammar: &mut Grammar) -> Vec<String> {
    let mut added = Vec::new();
    loop {
        let missing: Vec<&'static Rule> = core_rules()
            .iter()
            .filter(|core| !grammar.contains(&core.name))
            .filter(|core| references(grammar, &core.name))
            .collect();
        if missing.is_empty() {
            break;
        }
        for core in missing {
            added.push(core.name.clone());
            grammar.push(core.clone());
        }
    }
    if !added.is_empty() {
        tracing::debug!(rules = ?added, "added core rules");
    }
    added
}

fn references(grammar: &Grammar, name: &str) -> bool {
    let key = rule_key(name);
    grammar.iter().any(|rule| {
        rule.definition
            .rule_refs()
            .iter()
            .any(|(referenced, _)| rule_key(referenced) == key)
    })
}
