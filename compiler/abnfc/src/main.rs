//! `abnfc` command-line driver.

use std::io::{IsTerminal, Write};

use abnfc::{CliOptions, Streams, USAGE};

fn main() {
    abnfc::init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = match CliOptions::parse(&args) {
        Ok(options) => options,
        Err(error) => {
            eprintln!("error: {error}");
            eprintln!();
            eprint!("{USAGE}");
            std::process::exit(error.exit_code());
        }
    };

    let stdout = std::io::stdout();
    let stderr = std::io::stderr();
    let is_tty = stderr.is_terminal();
    let mut out = stdout.lock();
    let mut err = stderr.lock();

    let code = {
        let mut streams = Streams {
            out: &mut out,
            err: &mut err,
            color: options.color,
            is_tty,
        };
        match abnfc::run(&options, &mut streams) {
            Ok(outcome) => outcome.exit_code(),
            Err(error) => {
                let _ = writeln!(streams.err, "error: {error}");
                error.exit_code()
            }
        }
    };

    let _ = out.flush();
    let _ = err.flush();
    std::process::exit(code);
}
