//! The tokenizer: a single pass over the source text.
//!
//! The tokenizer keeps a cursor into the source, plus the line and column of the
//! last consumed character. Each call to `scan_token` consumes one character and
//! dispatches on it:
//! - quotes start a string literal, which runs verbatim to the matching quote;
//! - digits start a number, which may hold at most one `.`;
//! - letters and `_` start a word, which is a keyword, a boolean, or an identifier;
//! - anything else is looked up in the operator table, two characters first.
//!
//! Any character that fits none of these ends the scan with an error.

use ::regex::Regex;

use super::token::{operator_kind, Keyword, Token, TokenKind, TokenValue};
use super::{LexErrorKind, LexResult, LexicalError};

/// How a newline affects position tracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Newlines {
    /// A newline is an ordinary character: the column keeps counting and the line stays put.
    /// Positions are then only meaningful for single-line programs.
    #[default]
    Flat,
    /// A newline starts the next line at column 0.
    Track,
}

/// Tokenizer configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Options {
    pub newlines: Newlines,
}

mod patterns {
    use ::regex::Regex;
    use std::sync::OnceLock;

    pub(super) fn number() -> &'static Regex {
        static MATCH: OnceLock<Regex> = OnceLock::new();
        MATCH.get_or_init(|| {
            // Digits, then optionally one period and more digits.
            // A second period is left for the next token.
            Regex::new(r"\A[0-9]+(?:[.][0-9]*)?").expect("could not compile regex for number")
        })
    }

    pub(super) fn word() -> &'static Regex {
        static MATCH: OnceLock<Regex> = OnceLock::new();
        MATCH.get_or_init(|| {
            Regex::new(r"\A[A-Za-z_][A-Za-z0-9_]*").expect("could not compile regex for word")
        })
    }
}

/// Scanner state for one source text.
///
/// Every token, and every error, is stamped with the line and column of the last
/// character consumed when it is produced: the final character of the lexeme.
pub struct Tokenizer<'a> {
    source: &'a str,
    options: Options,
    tokens: Vec<Token>,

    // Byte offset of the next character.
    current: usize,
    line: usize,
    // Count of characters consumed on this line.
    column: usize,
}

impl<'a> Tokenizer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self::with_options(source, Options::default())
    }

    pub fn with_options(source: &'a str, options: Options) -> Self {
        Tokenizer {
            source,
            options,
            tokens: Vec::new(),
            current: 0,
            line: 1,
            column: 0,
        }
    }

    /// Scan the whole source, returning the tokens followed by one EOF token.
    pub fn scan_tokens(mut self) -> LexResult<Vec<Token>> {
        while self.peek().is_some() {
            if let Err(err) = self.scan_token() {
                tracing::debug!("scan failed after {} tokens: {err}", self.tokens.len());
                return Err(err);
            }
        }
        let eof = Token::eof(self.line, self.column);
        self.push(eof);
        tracing::debug!("scanned {} tokens", self.tokens.len());
        Ok(self.tokens)
    }

    /// The next character, without consuming it. `None` at the end of input.
    pub fn peek(&self) -> Option<char> {
        self.source.get(self.current..)?.chars().next()
    }

    /// Consume and return the next character. `None` at the end of input.
    pub fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.current += ch.len_utf8();
        if ch == '\n' && self.options.newlines == Newlines::Track {
            self.line += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    /// Consume the next character only if it is `expected`.
    pub fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Record a token at the current position.
    fn emit(&mut self, kind: TokenKind, lexeme: &str, value: TokenValue) {
        let token = Token {
            kind,
            lexeme: lexeme.to_owned(),
            value,
            line: self.line,
            column: self.column,
        };
        self.push(token);
    }

    fn push(&mut self, token: Token) {
        tracing::trace!(
            "token {} {:?} at {}:{}",
            token.kind,
            token.lexeme,
            token.line,
            token.column
        );
        self.tokens.push(token);
    }

    fn error(&self, kind: LexErrorKind) -> LexicalError {
        LexicalError::new(kind, self.line, self.column)
    }

    /// Consume one character and whatever token it starts.
    fn scan_token(&mut self) -> LexResult<()> {
        let start = self.current;
        let Some(ch) = self.advance() else {
            return Ok(());
        };

        match ch {
            ' ' | '\t' | '\r' | '\n' => Ok(()),
            '"' | '\'' => self.string(ch),
            '0'..='9' => {
                self.number(start);
                Ok(())
            }
            'a'..='z' | 'A'..='Z' | '_' => {
                self.word(start);
                Ok(())
            }
            _ => self.operator(ch),
        }
    }

    fn string(&mut self, quote: char) -> LexResult<()> {
        let source = self.source;
        let start = self.current;
        loop {
            match self.advance() {
                None => return Err(self.error(LexErrorKind::UnterminatedString { quote })),
                Some(ch) if ch == quote => break,
                Some(_) => {}
            }
        }
        let text = &source[start..self.current - quote.len_utf8()];
        self.emit(TokenKind::String, text, TokenValue::Text(text.to_owned()));
        Ok(())
    }

    /// Consume the longest match of `pattern` starting at `start`, whose first
    /// character is already consumed. Returns the matched text.
    fn consume_match(&mut self, pattern: &Regex, start: usize) -> &'a str {
        let source = self.source;
        let end = pattern
            .find(&source[start..])
            .map(|m| start + m.end())
            .expect("internal error: dispatched on a character the pattern does not accept");
        let text = &source[start..end];
        for _ in text.chars().skip(1) {
            self.advance();
        }
        text
    }

    fn number(&mut self, start: usize) {
        let text = self.consume_match(patterns::number(), start);
        let number: f64 = text
            .parse()
            .expect("internal error: regex recognized a number that is not a float");
        self.emit(TokenKind::Number, text, TokenValue::Number(number));
    }

    fn word(&mut self, start: usize) {
        let text = self.consume_match(patterns::word(), start);
        let (kind, value) = if let Some(keyword) = Keyword::lookup(text) {
            (TokenKind::Keyword, TokenValue::Keyword(keyword))
        } else if text == "true" || text == "false" {
            (TokenKind::Boolean, TokenValue::Boolean(text == "true"))
        } else {
            (TokenKind::Identifier, TokenValue::Text(text.to_owned()))
        };
        self.emit(kind, text, value);
    }

    /// Punctuation and operators, by maximal munch over the operator table.
    fn operator(&mut self, first: char) -> LexResult<()> {
        if let Some(second) = self.peek() {
            let pair: String = [first, second].iter().collect();
            if let Some(kind) = operator_kind(&pair) {
                if self.match_char(second) {
                    self.emit(kind, &pair, TokenValue::Text(pair.clone()));
                    return Ok(());
                }
            }
        }
        let single = first.to_string();
        match operator_kind(&single) {
            Some(kind) => {
                self.emit(kind, &single, TokenValue::Text(single.clone()));
                Ok(())
            }
            None => Err(self.error(LexErrorKind::UnrecognizedCharacter(first))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::{tokenize, tokenize_with};
    use pretty_assertions::assert_eq;

    fn kinds(input: &str) -> LexResult<Vec<TokenKind>> {
        Ok(tokenize(input)?.into_iter().map(|t| t.kind).collect())
    }

    #[test]
    fn primitives() {
        let mut t = Tokenizer::new("ab");
        assert_eq!(t.peek(), Some('a'));
        assert_eq!(t.peek(), Some('a'));
        assert!(!t.match_char('b'));
        assert!(t.match_char('a'));
        assert_eq!(t.column, 1);
        assert_eq!(t.advance(), Some('b'));
        assert_eq!(t.advance(), None);
        assert_eq!(t.peek(), None);
        assert_eq!(t.column, 2);
        assert!(!t.match_char('b'));
    }

    #[test]
    fn single_characters() -> LexResult<()> {
        let cases = [
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
            (">", TokenKind::Gt),
            ("<", TokenKind::Lt),
            ("!", TokenKind::Not),
            ("=", TokenKind::Assign),
        ];
        for (i, (input, kind)) in cases.iter().enumerate() {
            let tokens = tokenize(input)?;
            assert_eq!(tokens.len(), 2, "unexpected token count in case {i}");
            assert_eq!(tokens[0].kind, *kind, "unexpected kind in case {i}");
            assert_eq!(tokens[0].lexeme, *input);
            assert_eq!(tokens[0].value, TokenValue::Text(input.to_string()));
            assert_eq!(tokens[1].kind, TokenKind::Eof);
        }
        Ok(())
    }

    #[test]
    fn double_characters() -> LexResult<()> {
        let got = kinds("== != >= <= && || > = <")?;
        let want = vec![
            TokenKind::Equiv,
            TokenKind::NotEquiv,
            TokenKind::Gte,
            TokenKind::Lte,
            TokenKind::And,
            TokenKind::Or,
            TokenKind::Gt,
            TokenKind::Assign,
            TokenKind::Lt,
            TokenKind::Eof,
        ];
        assert_eq!(got, want);
        Ok(())
    }

    #[test]
    fn doubled_forms_are_greedy() -> LexResult<()> {
        assert_eq!(kinds("===")?, vec![TokenKind::Equiv, TokenKind::Assign, TokenKind::Eof]);
        assert_eq!(kinds("!!")?, vec![TokenKind::Not, TokenKind::Not, TokenKind::Eof]);
        Ok(())
    }

    #[test]
    fn lone_ampersand_and_bar() {
        for (input, ch) in [("&", '&'), ("|", '|'), ("a & b", '&'), ("|&", '|')] {
            let err = tokenize(input).expect_err("no error for lone operator");
            assert_eq!(err.kind, LexErrorKind::UnrecognizedCharacter(ch), "input {input:?}");
        }
    }

    #[test]
    fn empty_input() -> LexResult<()> {
        let tokens = tokenize("")?;
        assert_eq!(tokens, vec![Token::eof(1, 0)]);
        Ok(())
    }

    #[test]
    fn numbers() -> LexResult<()> {
        let tokens = tokenize("123.45")?;
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].kind, TokenKind::Number);
        assert_eq!(tokens[0].lexeme, "123.45");
        assert_eq!(tokens[0].value, TokenValue::Number(123.45));

        let tokens = tokenize("7 10.")?;
        assert_eq!(tokens[0].value, TokenValue::Number(7.0));
        assert_eq!(tokens[1].lexeme, "10.");
        assert_eq!(tokens[1].value, TokenValue::Number(10.0));
        Ok(())
    }

    #[test]
    fn second_period_ends_number() -> LexResult<()> {
        let tokens = tokenize("12.3.4")?;
        let got: Vec<_> = tokens.iter().map(|t| (t.kind, t.value.clone())).collect();
        let want = vec![
            (TokenKind::Number, TokenValue::Number(12.3)),
            (TokenKind::Period, TokenValue::Text(".".to_owned())),
            (TokenKind::Number, TokenValue::Number(4.0)),
            (TokenKind::Eof, TokenValue::Text(String::new())),
        ];
        assert_eq!(got, want);
        Ok(())
    }

    #[test]
    fn strings() -> LexResult<()> {
        let tokens = tokenize(r#""abc" 'it "works"' "a\n""#)?;
        let got: Vec<_> = tokens.iter().map(|t| t.lexeme.as_str()).collect();
        assert_eq!(got, vec!["abc", r#"it "works""#, r"a\n", ""]);
        assert_eq!(tokens[0].kind, TokenKind::String);
        assert_eq!(tokens[0].value, TokenValue::Text("abc".to_owned()));
        Ok(())
    }

    #[test]
    fn empty_string() -> LexResult<()> {
        let tokens = tokenize("''")?;
        assert_eq!(tokens[0].kind, TokenKind::String);
        assert_eq!(tokens[0].lexeme, "");
        Ok(())
    }

    #[test]
    fn unterminated_string() {
        let err = tokenize(r#"x "abc"#).expect_err("no error for unterminated string");
        assert_eq!(err.kind, LexErrorKind::UnterminatedString { quote: '"' });
        assert_eq!((err.line, err.column), (1, 6));

        let err = tokenize(r#""abcdef"#).expect_err("no error for unterminated string");
        assert_eq!((err.line, err.column), (1, 7));

        // A quote of the other kind does not close the literal.
        let err = tokenize(r#"'abc""#).expect_err("no error for mismatched quotes");
        assert_eq!(err.kind, LexErrorKind::UnterminatedString { quote: '\'' });
    }

    #[test]
    fn words() -> LexResult<()> {
        let tokens = tokenize("if iffy true false _x9 finished")?;
        let got: Vec<_> = tokens.iter().map(|t| (t.kind, t.value.clone())).collect();
        let want = vec![
            (TokenKind::Keyword, TokenValue::Keyword(Keyword::If)),
            (TokenKind::Identifier, TokenValue::Text("iffy".to_owned())),
            (TokenKind::Boolean, TokenValue::Boolean(true)),
            (TokenKind::Boolean, TokenValue::Boolean(false)),
            (TokenKind::Identifier, TokenValue::Text("_x9".to_owned())),
            (TokenKind::Keyword, TokenValue::Keyword(Keyword::Finished)),
            (TokenKind::Eof, TokenValue::Text(String::new())),
        ];
        assert_eq!(got, want);
        Ok(())
    }

    #[test]
    fn digits_then_letters() -> LexResult<()> {
        assert_eq!(
            kinds("9lives")?,
            vec![TokenKind::Number, TokenKind::Identifier, TokenKind::Eof]
        );
        Ok(())
    }

    #[test]
    fn unrecognized_character() {
        let err = tokenize("a # b").expect_err("no error for '#'");
        assert_eq!(err.kind, LexErrorKind::UnrecognizedCharacter('#'));
        assert_eq!((err.line, err.column), (1, 3));
        assert!(err.to_string().contains("'#'"), "got: {err}");

        let err = tokenize("é").expect_err("no error for non-ASCII letter");
        assert_eq!(err.kind, LexErrorKind::UnrecognizedCharacter('é'));
    }

    #[test]
    fn nul_is_not_end_of_input() {
        let err = tokenize("a\0b").expect_err("no error for NUL");
        assert_eq!(err.kind, LexErrorKind::UnrecognizedCharacter('\0'));
        assert_eq!((err.line, err.column), (1, 2));
    }

    #[test]
    fn positions_flat() -> LexResult<()> {
        let tokens = tokenize("prepare x\nas 10")?;
        let got: Vec<_> = tokens.iter().map(|t| (t.line, t.column)).collect();
        assert_eq!(got, vec![(1, 7), (1, 9), (1, 12), (1, 15), (1, 15)]);

        let tokens = tokenize("123.45")?;
        let got: Vec<_> = tokens.iter().map(|t| (t.line, t.column)).collect();
        assert_eq!(got, vec![(1, 6), (1, 6)]);
        Ok(())
    }

    #[test]
    fn positions_tracked() -> LexResult<()> {
        let options = Options {
            newlines: Newlines::Track,
        };
        let tokens = tokenize_with("prepare x\n  as 10", options)?;
        let got: Vec<_> = tokens.iter().map(|t| (t.line, t.column)).collect();
        assert_eq!(got, vec![(1, 7), (1, 9), (2, 4), (2, 7), (2, 7)]);

        let err = tokenize_with("a\n\n  #", options).expect_err("no error for '#'");
        assert_eq!((err.line, err.column), (3, 3));
        Ok(())
    }

    #[test]
    fn program() -> LexResult<()> {
        let input = "sketch add needs [a, b] { finished a + b }";
        let got: Vec<String> = tokenize(input)?.iter().map(|t| t.to_string()).collect();
        let want = [
            "sketch", "add", "needs", "[", "a", ",", "b", "]", "{", "finished", "a", "+", "b",
            "}", "",
        ];
        assert_eq!(got, want);
        Ok(())
    }
}
