//! Lexical front end for Easel, a small scripting language.
//!
//! `tokenize` turns source text into tokens; `ast` holds the node shapes the parser
//! builds from them.

pub mod ast;
pub mod lexer;

pub use lexer::{
    tokenize, tokenize_with, Keyword, LexErrorKind, LexResult, LexicalError, Newlines, Options,
    Token, TokenKind, TokenValue, Tokenizer,
};
