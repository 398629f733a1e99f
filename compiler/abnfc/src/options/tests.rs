use std::path::PathBuf;

use abnf_diagnostic::emitter::ColorMode;
use pretty_assertions::assert_eq;

use super::*;

fn parse(args: &[&str]) -> Result<CliOptions, CliError> {
    let args: Vec<String> = args.iter().map(ToString::to_string).collect();
    CliOptions::parse(&args)
}

fn command(args: &[&str]) -> Command {
    match parse(args) {
        Ok(options) => options.command,
        Err(error) => panic!("{args:?} should parse: {error}"),
    }
}

fn usage_error(args: &[&str]) -> String {
    match parse(args) {
        Err(CliError::Usage(message)) => message,
        other => panic!("{args:?} should be a usage error, got {other:?}"),
    }
}

#[test]
fn no_arguments_is_help() {
    assert_eq!(command(&[]), Command::Help);
    assert_eq!(command(&["--help"]), Command::Help);
}

#[test]
fn check_defaults_and_flags() {
    assert_eq!(
        command(&["check", "g.abnf"]),
        Command::Check {
            grammar: PathBuf::from("g.abnf"),
            start: None,
            core_rules: true,
            reorder: false,
            json: false,
        }
    );
    assert_eq!(
        command(&["check", "--no-core", "g.abnf", "--start=value", "--reorder"]),
        Command::Check {
            grammar: PathBuf::from("g.abnf"),
            start: Some("value".to_string()),
            core_rules: false,
            reorder: true,
            json: false,
        }
    );
}

#[test]
fn parse_takes_exactly_one_input() {
    assert_eq!(
        command(&["parse", "g.abnf", "year", "2024"]),
        Command::Parse {
            grammar: PathBuf::from("g.abnf"),
            rule: "year".to_string(),
            input: InputSource::Text("2024".to_string()),
            json: false,
            prefix: false,
        }
    );
    assert_eq!(
        command(&["parse", "g.abnf", "year", "--lines=years.txt", "--json"]),
        Command::Parse {
            grammar: PathBuf::from("g.abnf"),
            rule: "year".to_string(),
            input: InputSource::Lines(PathBuf::from("years.txt")),
            json: true,
            prefix: false,
        }
    );
    assert!(usage_error(&["parse", "g.abnf", "year"]).starts_with("usage: abnfc parse"));
    assert!(usage_error(&["parse", "g.abnf", "year", "2024", "--file=x"]).starts_with("usage:"));
    assert_eq!(
        usage_error(&["parse", "g.abnf", "year", "--lines=x", "--prefix"]),
        "`--prefix` cannot be combined with `--lines`"
    );
}

#[test]
fn signed_text_is_positional() {
    assert_eq!(
        command(&["odata", "-INF"]),
        Command::Odata {
            text: "-INF".to_string()
        }
    );
    assert_eq!(
        command(&["odata", "--", "--x"]),
        Command::Odata {
            text: "--x".to_string()
        }
    );
}

#[test]
fn gen_output_path() {
    assert_eq!(
        command(&["gen", "g.abnf", "-o", "out.rs"]),
        Command::Gen {
            grammar: PathBuf::from("g.abnf"),
            output: Some(PathBuf::from("out.rs")),
            reorder: false,
        }
    );
    assert_eq!(usage_error(&["gen", "g.abnf", "-o"]), "`-o` needs a path");
}

#[test]
fn color_is_global() {
    let Ok(options) = parse(&["--color=never", "lex", "g.abnf"]) else {
        panic!("should parse");
    };
    assert_eq!(options.color, ColorMode::Never);
    assert_eq!(
        options.command,
        Command::Lex {
            grammar: PathBuf::from("g.abnf")
        }
    );
    assert!(usage_error(&["--color=sometimes", "help"]).contains("sometimes"));
}

#[test]
fn unknown_options_and_commands() {
    assert_eq!(
        usage_error(&["check", "g.abnf", "--prefix"]),
        "unknown option `--prefix` for `check`"
    );
    assert_eq!(usage_error(&["frobnicate"]), "unknown command `frobnicate`");
    assert_eq!(usage_error(&["check", "g.abnf", "--start="]), "`--start` needs a value");
}

#[test]
fn usage_errors_exit_with_two() {
    let error = CliError::Usage(String::new());
    assert_eq!(error.exit_code(), 2);
    assert_eq!(CliError::UnknownCode("X".to_string()).exit_code(), 1);
}
