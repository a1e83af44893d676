//! Print the tokens of an Easel program, one per line.
//!
//! ```ignore
//! <program.easel easel_tokens [--track-lines]
//! ```
//!
//! Set `RUST_LOG=easel=trace` to see each token as it is scanned.

use std::io::{Read, Write};
use std::process::ExitCode;

use easel::{Newlines, Options};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut options = Options::default();
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--track-lines" => options.newlines = Newlines::Track,
            other => {
                eprintln!("error: unknown argument {other:?}");
                return ExitCode::FAILURE;
            }
        }
    }

    let mut input = String::new();
    if let Err(e) = std::io::stdin().lock().read_to_string(&mut input) {
        eprintln!("error: could not read input: {e}");
        return ExitCode::FAILURE;
    }

    let tokens = match easel::tokenize_with(&input, options) {
        Ok(tokens) => tokens,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut stdout = std::io::stdout().lock();
    for token in tokens {
        if let Err(e) = writeln!(
            stdout,
            "{}:{} {} {:?}",
            token.line, token.column, token.kind, token.lexeme
        ) {
            eprintln!("error: could not write output: {e}");
            return ExitCode::FAILURE;
        }
    }
    ExitCode::SUCCESS
}
