//! Diagnostic system for grammar and input errors.
//!
//! Every problem found while loading a grammar or checking input against it
//! becomes a [`Diagnostic`]:
//! - an error code for searchability (`abnfc explain E3001`)
//! - a message saying what went wrong
//! - labelled spans saying where
//! - notes and help text saying what to do about it
//!
//! Diagnostics are collected rather than returned one at a time, so a single
//! run reports every broken rule in a grammar.

mod diagnostic;
pub mod emitter;
mod error_code;
pub mod errors;
pub mod queue;

pub use diagnostic::{unclosed_delimiter, unexpected_token, Diagnostic, Label, Severity, Tally};
pub use error_code::ErrorCode;
pub use errors::ErrorDocs;
pub use queue::{DiagnosticConfig, DiagnosticQueue};
