//! Token and keyword model.
//!
//! The lookup tables here are built once per process, on first use,
//! and shared read-only by every tokenizer.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// The closed set of token kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TokenKind {
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    LeftBracket,
    RightBracket,
    Period,
    Comma,
    Colon,
    Keyword,
    Identifier,
    String,
    Number,
    Boolean,
    Assign,
    Or,
    Not,
    And,
    Equiv,
    NotEquiv,
    Gt,
    Gte,
    Lt,
    Lte,
    Plus,
    Minus,
    Asterisk,
    Slash,
    Eof,
}

impl TokenKind {
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::LeftParen => "LeftParen",
            TokenKind::RightParen => "RightParen",
            TokenKind::LeftBrace => "LeftBrace",
            TokenKind::RightBrace => "RightBrace",
            TokenKind::LeftBracket => "LeftBracket",
            TokenKind::RightBracket => "RightBracket",
            TokenKind::Period => "Period",
            TokenKind::Comma => "Comma",
            TokenKind::Colon => "Colon",
            TokenKind::Keyword => "Keyword",
            TokenKind::Identifier => "Identifier",
            TokenKind::String => "String",
            TokenKind::Number => "Number",
            TokenKind::Boolean => "Boolean",
            TokenKind::Assign => "Assign",
            TokenKind::Or => "Or",
            TokenKind::Not => "Not",
            TokenKind::And => "And",
            TokenKind::Equiv => "Equiv",
            TokenKind::NotEquiv => "NotEquiv",
            TokenKind::Gt => "Gt",
            TokenKind::Gte => "Gte",
            TokenKind::Lt => "Lt",
            TokenKind::Lte => "Lte",
            TokenKind::Plus => "Plus",
            TokenKind::Minus => "Minus",
            TokenKind::Asterisk => "Asterisk",
            TokenKind::Slash => "Slash",
            TokenKind::Eof => "EOF",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Reserved words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Keyword {
    Prepare,
    As,
    Brush,
    Prep,
    Has,
    Sketch,
    Needs,
    Finished,
    Loop,
    Through,
    While,
    If,
    Elif,
    Else,
}

impl Keyword {
    pub const ALL: [Keyword; 14] = [
        Keyword::Prepare,
        Keyword::As,
        Keyword::Brush,
        Keyword::Prep,
        Keyword::Has,
        Keyword::Sketch,
        Keyword::Needs,
        Keyword::Finished,
        Keyword::Loop,
        Keyword::Through,
        Keyword::While,
        Keyword::If,
        Keyword::Elif,
        Keyword::Else,
    ];

    /// The source spelling, which is also the canonical id.
    pub fn as_str(self) -> &'static str {
        match self {
            Keyword::Prepare => "prepare",
            Keyword::As => "as",
            Keyword::Brush => "brush",
            Keyword::Prep => "prep",
            Keyword::Has => "has",
            Keyword::Sketch => "sketch",
            Keyword::Needs => "needs",
            Keyword::Finished => "finished",
            Keyword::Loop => "loop",
            Keyword::Through => "through",
            Keyword::While => "while",
            Keyword::If => "if",
            Keyword::Elif => "elif",
            Keyword::Else => "else",
        }
    }

    /// Exact lookup in the keyword table; no prefix matching.
    pub fn lookup(word: &str) -> Option<Keyword> {
        keywords().get(word).copied()
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Keyword {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Keyword::lookup(s).ok_or_else(|| format!("{s:?} is not a reserved word"))
    }
}

fn keywords() -> &'static HashMap<&'static str, Keyword> {
    static KEYWORDS: OnceLock<HashMap<&'static str, Keyword>> = OnceLock::new();
    KEYWORDS.get_or_init(|| Keyword::ALL.iter().map(|&k| (k.as_str(), k)).collect())
}

/// Every punctuation and operator lexeme, with the kind it produces.
///
/// `&` and `|` only exist doubled; there is no single-character form for either.
const OPERATORS: [(&str, TokenKind); 23] = [
    ("(", TokenKind::LeftParen),
    (")", TokenKind::RightParen),
    ("{", TokenKind::LeftBrace),
    ("}", TokenKind::RightBrace),
    ("[", TokenKind::LeftBracket),
    ("]", TokenKind::RightBracket),
    (".", TokenKind::Period),
    (",", TokenKind::Comma),
    (":", TokenKind::Colon),
    ("+", TokenKind::Plus),
    ("-", TokenKind::Minus),
    ("*", TokenKind::Asterisk),
    ("/", TokenKind::Slash),
    ("=", TokenKind::Assign),
    ("==", TokenKind::Equiv),
    ("!", TokenKind::Not),
    ("!=", TokenKind::NotEquiv),
    (">", TokenKind::Gt),
    (">=", TokenKind::Gte),
    ("<", TokenKind::Lt),
    ("<=", TokenKind::Lte),
    ("&&", TokenKind::And),
    ("||", TokenKind::Or),
];

/// Look up the kind for a punctuation or operator lexeme.
pub fn operator_kind(lexeme: &str) -> Option<TokenKind> {
    static TABLE: OnceLock<HashMap<&'static str, TokenKind>> = OnceLock::new();
    TABLE
        .get_or_init(|| OPERATORS.iter().copied().collect())
        .get(lexeme)
        .copied()
}

/// The interpreted content of a token.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenValue {
    /// Raw text: the lexeme itself, or a string literal's inner text.
    Text(String),
    Number(f64),
    Keyword(Keyword),
    Boolean(bool),
}

impl fmt::Display for TokenValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenValue::Text(s) => f.write_str(s),
            TokenValue::Number(n) => write!(f, "{n}"),
            TokenValue::Keyword(k) => write!(f, "{k}"),
            TokenValue::Boolean(b) => write!(f, "{b}"),
        }
    }
}

/// A classified unit of input.
///
/// `line` and `column` are 1-based and point at the last character of the lexeme.
/// The EOF token carries the count of characters consumed on the final line.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub value: TokenValue,
    pub line: usize,
    pub column: usize,
}

impl Token {
    /// A token whose interpreted value is its own lexeme.
    pub fn plain(kind: TokenKind, lexeme: impl Into<String>, line: usize, column: usize) -> Self {
        let lexeme = lexeme.into();
        Token {
            kind,
            value: TokenValue::Text(lexeme.clone()),
            lexeme,
            line,
            column,
        }
    }

    pub fn eof(line: usize, column: usize) -> Self {
        Token::plain(TokenKind::Eof, "", line, column)
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lexeme)
    }
}
