use std::fmt;

/// Error codes for all toolkit diagnostics.
///
/// Format: E#### (or W#### for warnings) where the first digit is the phase:
/// - E0xxx: Grammar lexing
/// - E1xxx: Grammar syntax
/// - E2xxx: Rule definitions and references
/// - E3xxx: Grammar analysis
/// - E4xxx: Input rejected by a grammar
/// - E9xxx: Internal errors
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord, Debug)]
pub enum ErrorCode {
    // Lexing (E0xxx)
    /// Unterminated quoted string
    E0001,
    /// Invalid character in grammar text
    E0002,
    /// Malformed numeric value (`%x`, `%d`, `%b`)
    E0003,
    /// Unterminated prose value
    E0004,

    // Syntax (E1xxx)
    /// Unexpected token
    E1001,
    /// Expected an element
    E1002,
    /// Unclosed group or option
    E1003,
    /// Expected `=` or `=/` after a rule name
    E1004,
    /// Rule definition does not start in the first column
    E1005,
    /// Repetition prefix not directly followed by an element
    E1006,

    // Definitions (E2xxx)
    /// Rule defined twice with `=`
    E2001,
    /// Incremental alternative (`=/`) for an undefined rule
    E2002,
    /// Reference to an undefined rule
    E2003,
    /// Unknown start rule
    E2004,

    // Analysis (E3xxx)
    /// Left recursion
    E3001,
    /// Repetition minimum exceeds maximum
    E3002,
    /// Numeric range with low bound above high bound
    E3003,
    /// Numeric value is not a Unicode scalar value
    E3004,
    /// Prose value cannot be compiled
    E3005,

    // Input (E4xxx)
    /// Input does not conform to the grammar
    E4001,
    /// Input has trailing text after a complete match
    E4002,

    // Internal (E9xxx)
    /// Internal compiler error
    E9001,

    // Analysis warnings (W3xxx)
    /// Rule is unreachable from the start rule
    W3006,
    /// Alternative is shadowed by an earlier one
    W3007,
    /// Repetition of an element that can match empty input
    W3008,
}

impl ErrorCode {
    /// Every code, in declaration order.
    pub const ALL: &'static [ErrorCode] = &[
        ErrorCode::E0001,
        ErrorCode::E0002,
        ErrorCode::E0003,
        ErrorCode::E0004,
        ErrorCode::E1001,
        ErrorCode::E1002,
        ErrorCode::E1003,
        ErrorCode::E1004,
        ErrorCode::E1005,
        ErrorCode::E1006,
        ErrorCode::E2001,
        ErrorCode::E2002,
        ErrorCode::E2003,
        ErrorCode::E2004,
        ErrorCode::E3001,
        ErrorCode::E3002,
        ErrorCode::E3003,
        ErrorCode::E3004,
        ErrorCode::E3005,
        ErrorCode::E4001,
        ErrorCode::E4002,
        ErrorCode::E9001,
        ErrorCode::W3006,
        ErrorCode::W3007,
        ErrorCode::W3008,
    ];

    /// Get the code as a string (e.g., "E1001").
    pub fn as_str(&self) -> &'static str {
        match self {
            // Lexing
            ErrorCode::E0001 => "E0001",
            ErrorCode::E0002 => "E0002",
            ErrorCode::E0003 => "E0003",
            ErrorCode::E0004 => "E0004",
            // Syntax
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E1003 => "E1003",
            ErrorCode::E1004 => "E1004",
            ErrorCode::E1005 => "E1005",
            ErrorCode::E1006 => "E1006",
            // Definitions
            ErrorCode::E2001 => "E2001",
            ErrorCode::E2002 => "E2002",
            ErrorCode::E2003 => "E2003",
            ErrorCode::E2004 => "E2004",
            // Analysis
            ErrorCode::E3001 => "E3001",
            ErrorCode::E3002 => "E3002",
            ErrorCode::E3003 => "E3003",
            ErrorCode::E3004 => "E3004",
            ErrorCode::E3005 => "E3005",
            // Input
            ErrorCode::E4001 => "E4001",
            ErrorCode::E4002 => "E4002",
            // Internal
            ErrorCode::E9001 => "E9001",
            // Warnings
            ErrorCode::W3006 => "W3006",
            ErrorCode::W3007 => "W3007",
            ErrorCode::W3008 => "W3008",
        }
    }

    /// Parse a code string such as `"E3001"` (case-insensitive).
    pub fn parse(text: &str) -> Option<ErrorCode> {
        let text = text.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|code| code.as_str().eq_ignore_ascii_case(text))
    }

    pub fn is_lexer_error(&self) -> bool {
        self.as_str().starts_with("E0")
    }

    pub fn is_syntax_error(&self) -> bool {
        self.as_str().starts_with("E1")
    }

    /// Check if this is a grammar analysis code (E3xxx or W3xxx).
    pub fn is_analysis(&self) -> bool {
        self.as_str()[1..].starts_with('3')
    }

    pub fn is_input_error(&self) -> bool {
        self.as_str().starts_with("E4")
    }

    /// Check if this is a warning code (Wxxxx range).
    pub fn is_warning(&self) -> bool {
        self.as_str().starts_with('W')
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
