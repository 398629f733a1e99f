//! ABNF toolkit driver.
//!
//! `abnfc` checks grammar files, parses text against a rule of a grammar,
//! generates typed Rust rule parsers and parses OData literals with the
//! built-in rule library. The binary in `main.rs` only collects arguments;
//! everything else lives here so it can be tested against in-memory
//! streams.

pub mod commands;
mod options;

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Once;

use abnf_compile::CompileOptions;
use abnf_grammar::GrammarOptions;

pub use commands::{Outcome, Streams};
pub use options::{CliOptions, Command, InputSource};

/// Usage text, printed by `abnfc help` and after usage errors.
pub const USAGE: &str = "\
ABNF toolkit

Usage: abnfc <command> [options]

Commands:
  check <grammar>              Check a grammar and report every problem
  parse <grammar> <rule> ...   Parse input with one rule of a grammar
  gen <grammar>                Generate typed Rust parsers for a grammar
  odata <text>                 Parse a URI, header or literal with the OData rules
  lex <grammar>                Tokenize a grammar and display tokens
  explain <code>               Explain a diagnostic code (e.g., E3001)
  help                         Show this help message
  version                      Show version information

Check options:
  --start=<rule>      Start rule (default: first rule in the file)
  --no-core           Do not add RFC 5234 core rules on demand
  --reorder           Try purely literal alternatives longest first
  --json              Print diagnostics as a JSON array instead

Parse options (exactly one input):
  <text>              Parse the argument itself
  --file=<path>       Parse a file, minus one trailing newline
  --lines=<path>      Parse every line of a file separately
  --json              Print the syntax tree as JSON
  --prefix            Parse the longest accepted prefix instead of all input

Gen options:
  -o <path>           Write the module to a file instead of stdout
  --reorder           Try purely literal alternatives longest first

Global options:
  --color=<mode>      Diagnostic colors: auto, always, never

Arguments after `--` are never read as options.

Examples:
  abnfc check grammars/odata-literals.abnf
  abnfc parse grammars/odata-literals.abnf dateValue 2012-12-03
  abnfc parse grammars/odata-literals.abnf primitiveValue --lines=values.txt
  abnfc gen grammars/odata-literals.abnf -o src/rules.rs
  abnfc odata \"http://host/service/People?$top=2\"
  abnfc explain E4001
";

static TRACING_INIT: Once = Once::new();

/// Install the tracing subscriber.
///
/// Nothing is installed unless `RUST_LOG` is set, e.g.
/// `RUST_LOG=abnf_compile=debug`. With `ABNFC_TRACE_TREE` also set, spans
/// are printed as an indented tree instead of flat lines. Safe to call more
/// than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_err() {
            return;
        }
        let (tree, flat) = if std::env::var_os("ABNFC_TRACE_TREE").is_some() {
            let tree = tracing_tree::HierarchicalLayer::new(2)
                .with_targets(true)
                .with_writer(io::stderr);
            (Some(tree), None)
        } else {
            let flat = fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_writer(io::stderr);
            (None, Some(flat))
        };
        tracing_subscriber::registry()
            .with(tree)
            .with(flat)
            .with(EnvFilter::from_default_env())
            .init();
    });
}

/// Why a command could not run.
///
/// Rejected input and grammar diagnostics are not errors here: they are
/// rendered by the command, which then reports [`Outcome::Failed`].
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),

    #[error("{}", read_message(.path, .source))]
    Read { path: PathBuf, source: io::Error },

    #[error("cannot write '{}': {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("rule `{rule}` is not defined in '{}'", .grammar.display())]
    UnknownRule { rule: String, grammar: PathBuf },

    #[error("unknown diagnostic code: {0} (codes look like E1001 or W3006)")]
    UnknownCode(String),

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("cannot serialize syntax tree: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Process exit code: 2 for usage errors, 1 otherwise.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Usage(_) => 2,
            _ => 1,
        }
    }
}

fn read_message(path: &Path, error: &io::Error) -> String {
    let path = path.display();
    match error.kind() {
        io::ErrorKind::NotFound => format!("cannot find file '{path}'"),
        io::ErrorKind::PermissionDenied => format!("permission denied reading '{path}'"),
        io::ErrorKind::InvalidData => format!("'{path}' contains invalid UTF-8 data"),
        _ => format!("error reading '{path}': {error}"),
    }
}

/// Run one parsed command line.
pub fn run(options: &CliOptions, streams: &mut Streams<'_>) -> Result<Outcome, CliError> {
    tracing::debug!(command = ?options.command, "running");
    match &options.command {
        Command::Check {
            grammar,
            start,
            core_rules,
            reorder,
            json,
        } => {
            let grammar_options = GrammarOptions {
                core_rules: *core_rules,
                start: start.clone(),
            };
            let compile_options = CompileOptions { reorder: *reorder };
            commands::check_grammar(grammar, &grammar_options, &compile_options, *json, streams)
        }
        Command::Parse {
            grammar,
            rule,
            input,
            json,
            prefix,
        } => commands::parse_input(grammar, rule, input, *json, *prefix, streams),
        Command::Gen {
            grammar,
            output,
            reorder,
        } => commands::generate(grammar, output.as_deref(), *reorder, streams),
        Command::Odata { text } => commands::parse_odata_text(text, streams),
        Command::Lex { grammar } => commands::lex_grammar(grammar, streams),
        Command::Explain { code } => commands::explain_code(code, streams),
        Command::Help => {
            streams.out.write_all(USAGE.as_bytes())?;
            Ok(Outcome::Success)
        }
        Command::Version => {
            writeln!(streams.out, "abnfc {}", env!("CARGO_PKG_VERSION"))?;
            Ok(Outcome::Success)
        }
    }
}
