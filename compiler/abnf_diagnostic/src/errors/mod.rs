//! Embedded error documentation for `abnfc explain` support.
//!
//! Each error code has a markdown file in this directory, embedded at compile
//! time. Add new entries to `DOCS` when adding a code.

use crate::ErrorCode;

/// Registry of embedded error documentation.
pub struct ErrorDocs;

impl ErrorDocs {
    /// Get the documentation for an error code.
    pub fn get(code: ErrorCode) -> Option<&'static str> {
        DOCS.iter().find(|(c, _)| *c == code).map(|(_, doc)| *doc)
    }

    /// Get all documented error codes.
    pub fn all_codes() -> impl Iterator<Item = ErrorCode> {
        DOCS.iter().map(|(code, _)| *code)
    }

    pub fn has_docs(code: ErrorCode) -> bool {
        DOCS.iter().any(|(c, _)| *c == code)
    }
}

static DOCS: &[(ErrorCode, &str)] = &[
    // Lexing (E0xxx)
    (ErrorCode::E0001, include_str!("E0001.md")),
    (ErrorCode::E0002, include_str!("E0002.md")),
    (ErrorCode::E0003, include_str!("E0003.md")),
    (ErrorCode::E0004, include_str!("E0004.md")),
    // Syntax (E1xxx)
    (ErrorCode::E1001, include_str!("E1001.md")),
    (ErrorCode::E1002, include_str!("E1002.md")),
    (ErrorCode::E1003, include_str!("E1003.md")),
    (ErrorCode::E1004, include_str!("E1004.md")),
    (ErrorCode::E1005, include_str!("E1005.md")),
    (ErrorCode::E1006, include_str!("E1006.md")),
    // Definitions (E2xxx)
    (ErrorCode::E2001, include_str!("E2001.md")),
    (ErrorCode::E2002, include_str!("E2002.md")),
    (ErrorCode::E2003, include_str!("E2003.md")),
    (ErrorCode::E2004, include_str!("E2004.md")),
    // Analysis (E3xxx / W3xxx)
    (ErrorCode::E3001, include_str!("E3001.md")),
    (ErrorCode::E3002, include_str!("E3002.md")),
    (ErrorCode::E3003, include_str!("E3003.md")),
    (ErrorCode::E3004, include_str!("E3004.md")),
    (ErrorCode::E3005, include_str!("E3005.md")),
    (ErrorCode::W3006, include_str!("W3006.md")),
    (ErrorCode::W3007, include_str!("W3007.md")),
    (ErrorCode::W3008, include_str!("W3008.md")),
    // Input (E4xxx)
    (ErrorCode::E4001, include_str!("E4001.md")),
    (ErrorCode::E4002, include_str!("E4002.md")),
    // Internal (E9xxx)
    (ErrorCode::E9001, include_str!("E9001.md")),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_code_is_documented() {
        for code in ErrorCode::ALL {
            assert!(ErrorDocs::has_docs(*code), "{code} has no documentation");
        }
        assert_eq!(ErrorDocs::all_codes().count(), ErrorCode::ALL.len());
    }

    #[test]
    fn test_doc_titles_match_codes() {
        for code in ErrorDocs::all_codes() {
            let doc = ErrorDocs::get(code).unwrap_or_default();
            assert!(
                doc.starts_with(&format!("# {code}:")),
                "{code} doc has the wrong title"
            );
        }
    }

    #[test]
    fn test_left_recursion_doc() {
        let doc = ErrorDocs::get(ErrorCode::E3001).unwrap_or_default();
        assert!(doc.contains("Left Recursion"));
    }
}
