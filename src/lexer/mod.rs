//! Support for reading Easel source text into tokens.

use std::io::ErrorKind;

use thiserror::Error;

mod scanner;
mod token;

pub use scanner::{Newlines, Options, Tokenizer};
pub use token::{operator_kind, Keyword, Token, TokenKind, TokenValue};

/// Split the input into its constituent tokens, using the default options.
///
/// On success the last token is always the single EOF token.
/// Any lexical fault ends the scan; no partial output is returned.
pub fn tokenize(input: &str) -> LexResult<Vec<Token>> {
    tokenize_with(input, Options::default())
}

/// Split the input into its constituent tokens.
pub fn tokenize_with(input: &str, options: Options) -> LexResult<Vec<Token>> {
    Tokenizer::with_options(input, options).scan_tokens()
}

/// Reason a scan failed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LexErrorKind {
    #[error("unterminated string literal opened with {quote:?}")]
    UnterminatedString { quote: char },
    #[error("unrecognized character {0:?}")]
    UnrecognizedCharacter(char),
}

/// A fatal lexical error, at a 1-based line and column.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("line {line}, column {column}: {kind}")]
pub struct LexicalError {
    pub kind: LexErrorKind,
    pub line: usize,
    pub column: usize,
}

impl LexicalError {
    pub fn new(kind: LexErrorKind, line: usize, column: usize) -> Self {
        LexicalError { kind, line, column }
    }

    /// The reason, without position information.
    pub fn message(&self) -> String {
        self.kind.to_string()
    }
}

/// The main result type for this module.
pub type LexResult<T> = Result<T, LexicalError>;

impl From<LexicalError> for std::io::Error {
    fn from(value: LexicalError) -> Self {
        std::io::Error::new(ErrorKind::InvalidInput, value.to_string())
    }
}
