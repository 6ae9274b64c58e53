//! Token dump utility.
//!
//! Usage: tokenize <file>
//!
//! Prints one token per line as `LINE:COL<TAB>KIND<TAB>text`, stopping at
//! end of input or the first lexical error.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use smic_std::smic_core::lexer::{Lexer, TokenKind};

#[derive(Parser)]
#[command(about = "Dump the tokens of a MIB module")]
struct Args {
    /// Module source file.
    file: PathBuf,
}

fn main() -> ExitCode {
    let args = Args::parse();
    let source = match fs::read_to_string(&args.file) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("{}: {e}", args.file.display());
            return ExitCode::FAILURE;
        }
    };

    let mut lexer = Lexer::new(&source);
    loop {
        match lexer.next_token() {
            Ok(token) if token.kind == TokenKind::Eof => return ExitCode::SUCCESS,
            Ok(token) => println!(
                "{}\t{:?}\t{}",
                token.position,
                token.kind,
                escape_text(token.text)
            ),
            Err(e) => {
                eprintln!("{}: {e}", args.file.display());
                return ExitCode::FAILURE;
            }
        }
    }
}

/// Escape newlines and tabs so each token stays on one line.
fn escape_text(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\n' => result.push_str("\\n"),
            '\r' => result.push_str("\\r"),
            '\t' => result.push_str("\\t"),
            _ => result.push(c),
        }
    }
    result
}
