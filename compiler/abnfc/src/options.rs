//! Command-line parsing.
//!
//! Hand-rolled: every command takes a few positional arguments and a few
//! `--flag` or `--key=value` options, in any order.

use std::path::PathBuf;

use abnf_diagnostic::emitter::ColorMode;

use crate::CliError;

/// Where `abnfc parse` reads its input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InputSource {
    Text(String),
    /// A whole file, minus one trailing newline.
    File(PathBuf),
    /// Every line of a file, parsed separately.
    Lines(PathBuf),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Check {
        grammar: PathBuf,
        start: Option<String>,
        core_rules: bool,
        reorder: bool,
        json: bool,
    },
    Parse {
        grammar: PathBuf,
        rule: String,
        input: InputSource,
        json: bool,
        prefix: bool,
    },
    Gen {
        grammar: PathBuf,
        output: Option<PathBuf>,
        reorder: bool,
    },
    Odata {
        text: String,
    },
    Lex {
        grammar: PathBuf,
    },
    Explain {
        code: String,
    },
    Help,
    Version,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CliOptions {
    pub command: Command,
    pub color: ColorMode,
}

impl CliOptions {
    /// Parse the arguments after the program name.
    ///
    /// No arguments at all means `help`.
    pub fn parse(args: &[String]) -> Result<Self, CliError> {
        let mut color = ColorMode::Auto;
        let mut rest = Vec::with_capacity(args.len());
        let mut literal = false;
        for arg in args {
            if literal {
                rest.push(arg.as_str());
                continue;
            }
            if let Some(mode) = arg.strip_prefix("--color=") {
                color = match mode {
                    "auto" => ColorMode::Auto,
                    "always" => ColorMode::Always,
                    "never" => ColorMode::Never,
                    _ => {
                        return Err(CliError::Usage(format!(
                            "unknown color mode `{mode}` (expected auto, always or never)"
                        )))
                    }
                };
                continue;
            }
            literal = arg == "--";
            rest.push(arg.as_str());
        }

        let command = match rest.split_first() {
            None => Command::Help,
            Some((command, args)) => parse_command(command, args)?,
        };
        Ok(CliOptions { command, color })
    }
}

/// Arguments of one command, split into positionals and options.
struct Args<'a> {
    positional: Vec<&'a str>,
    options: Vec<(&'a str, Option<&'a str>)>,
}

impl<'a> Args<'a> {
    /// Split `args`, rejecting options not named in `known`.
    ///
    /// `-o` takes the following argument as its value. A lone `-` and
    /// text such as `-5` are positional.
    fn split(command: &str, args: &[&'a str], known: &[&str]) -> Result<Self, CliError> {
        let mut positional = Vec::new();
        let mut options = Vec::new();
        let mut iter = args.iter().copied();
        while let Some(arg) = iter.next() {
            if arg == "--" {
                positional.extend(iter.by_ref());
                break;
            }
            let (name, value) = if arg == "-o" {
                let Some(value) = iter.next() else {
                    return Err(CliError::Usage("`-o` needs a path".to_string()));
                };
                (arg, Some(value))
            } else if arg.starts_with("--") {
                match arg.split_once('=') {
                    Some((name, value)) => (name, Some(value)),
                    None => (arg, None),
                }
            } else {
                positional.push(arg);
                continue;
            };
            if !known.contains(&name) {
                return Err(CliError::Usage(format!(
                    "unknown option `{name}` for `{command}`"
                )));
            }
            options.push((name, value));
        }
        Ok(Args {
            positional,
            options,
        })
    }

    fn flag(&self, name: &str) -> bool {
        self.options.iter().any(|&(n, _)| n == name)
    }

    /// Value of the last `name=value` option.
    fn value(&self, name: &str) -> Result<Option<&'a str>, CliError> {
        match self.options.iter().rev().find(|&&(n, _)| n == name) {
            None => Ok(None),
            Some(&(_, Some(value))) if !value.is_empty() => Ok(Some(value)),
            Some(_) => Err(CliError::Usage(format!("`{name}` needs a value"))),
        }
    }
}

fn usage(synopsis: &str) -> CliError {
    CliError::Usage(format!("usage: abnfc {synopsis}"))
}

fn parse_command(command: &str, args: &[&str]) -> Result<Command, CliError> {
    match command {
        "check" => {
            const SYNOPSIS: &str = "check <grammar> [--start=<rule>] [--no-core] [--reorder] [--json]";
            let args = Args::split(
                command,
                args,
                &["--start", "--no-core", "--reorder", "--json"],
            )?;
            let [grammar] = args.positional[..] else {
                return Err(usage(SYNOPSIS));
            };
            Ok(Command::Check {
                grammar: PathBuf::from(grammar),
                start: args.value("--start")?.map(str::to_string),
                core_rules: !args.flag("--no-core"),
                reorder: args.flag("--reorder"),
                json: args.flag("--json"),
            })
        }
        "parse" => {
            const SYNOPSIS: &str = "parse <grammar> <rule> (<text> | --file=<path> | --lines=<path>) [--json] [--prefix]";
            let args = Args::split(
                command,
                args,
                &["--file", "--lines", "--json", "--prefix"],
            )?;
            let file = args.value("--file")?;
            let lines = args.value("--lines")?;
            let (grammar, rule, input) = match (&args.positional[..], file, lines) {
                (&[grammar, rule, text], None, None) => {
                    (grammar, rule, InputSource::Text(text.to_string()))
                }
                (&[grammar, rule], Some(path), None) => {
                    (grammar, rule, InputSource::File(PathBuf::from(path)))
                }
                (&[grammar, rule], None, Some(path)) => {
                    (grammar, rule, InputSource::Lines(PathBuf::from(path)))
                }
                _ => return Err(usage(SYNOPSIS)),
            };
            let prefix = args.flag("--prefix");
            if prefix && matches!(input, InputSource::Lines(_)) {
                return Err(CliError::Usage(
                    "`--prefix` cannot be combined with `--lines`".to_string(),
                ));
            }
            Ok(Command::Parse {
                grammar: PathBuf::from(grammar),
                rule: rule.to_string(),
                input,
                json: args.flag("--json"),
                prefix,
            })
        }
        "gen" => {
            const SYNOPSIS: &str = "gen <grammar> [-o <out.rs>] [--reorder]";
            let args = Args::split(command, args, &["-o", "--reorder"])?;
            let [grammar] = args.positional[..] else {
                return Err(usage(SYNOPSIS));
            };
            Ok(Command::Gen {
                grammar: PathBuf::from(grammar),
                output: args.value("-o")?.map(PathBuf::from),
                reorder: args.flag("--reorder"),
            })
        }
        "odata" => {
            let args = Args::split(command, args, &[])?;
            let [text] = args.positional[..] else {
                return Err(usage("odata <text>"));
            };
            Ok(Command::Odata {
                text: text.to_string(),
            })
        }
        "lex" => {
            let args = Args::split(command, args, &[])?;
            let [grammar] = args.positional[..] else {
                return Err(usage("lex <grammar>"));
            };
            Ok(Command::Lex {
                grammar: PathBuf::from(grammar),
            })
        }
        "explain" | "--explain" => {
            let args = Args::split(command, args, &[])?;
            let [code] = args.positional[..] else {
                return Err(usage("explain <code>"));
            };
            Ok(Command::Explain {
                code: code.to_string(),
            })
        }
        "help" | "--help" | "-h" => Ok(Command::Help),
        "version" | "--version" | "-V" => Ok(Command::Version),
        _ => Err(CliError::Usage(format!("unknown command `{command}`"))),
    }
}

#[cfg(test)]
mod tests;
