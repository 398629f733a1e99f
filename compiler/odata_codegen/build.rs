//! Generates `odata_literals.rs` from `grammars/odata-literals.abnf`.

use std::env;
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use abnf_compile::{generate_rust, CodegenOptions};
use abnf_grammar::{load_grammar, GrammarOptions};

fn main() -> Result<(), Box<dyn Error>> {
    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let grammar_path = manifest_dir.join("../../grammars/odata-literals.abnf");
    println!("cargo:rerun-if-changed={}", grammar_path.display());

    let source = fs::read_to_string(&grammar_path)?;
    let loaded = load_grammar(&source, &GrammarOptions::default())?;
    let code = generate_rust(
        &loaded.grammar,
        &CodegenOptions {
            embedded: true,
            ..CodegenOptions::default()
        },
    )?;

    let out_dir = env::var("OUT_DIR")?;
    fs::write(Path::new(&out_dir).join("odata_literals.rs"), code)?;
    Ok(())
}
