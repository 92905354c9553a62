//! The expression tokenizer.
//!
//! Produces one [`Token`] per call from a [`CharSource`]. The lexer keeps no
//! state between calls: every token carries its own text.

use rem_value::EvalError;

use crate::source::CharSource;
use crate::token::{Token, TokenKind};

/// Errors raised while scanning a token.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LexError {
    #[error("Missing quote")]
    MissingQuote,
    #[error("Illegal character `{0}'")]
    IllegalChar(char),
}

impl From<LexError> for EvalError {
    fn from(err: LexError) -> Self {
        match err {
            LexError::MissingQuote => EvalError::MissingQuote,
            LexError::IllegalChar(c) => EvalError::IllegalChar(c),
        }
    }
}

/// Tokenizer settings.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Lexer {
    /// Character skipped like whitespace (line continuation).
    continuation: Option<char>,
    /// Host time separator, accepted inside words alongside `:` and `.`.
    time_sep: char,
}

impl Default for Lexer {
    fn default() -> Self {
        Lexer {
            continuation: Some('\\'),
            time_sep: ':',
        }
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

impl Lexer {
    pub fn new(time_sep: char) -> Self {
        Lexer {
            time_sep,
            ..Lexer::default()
        }
    }

    #[must_use]
    pub fn with_continuation(mut self, continuation: Option<char>) -> Self {
        self.continuation = continuation;
        self
    }

    fn is_blank(self, c: char) -> bool {
        c.is_whitespace() || Some(c) == self.continuation
    }

    fn is_word_char(self, c: char) -> bool {
        is_ident_char(c) || c == ':' || c == '.' || c == self.time_sep
    }

    fn skip_blank(self, src: &mut dyn CharSource) {
        while src.peek().is_some_and(|c| self.is_blank(c)) {
            src.advance();
        }
    }

    /// Skips blanks and returns the next character without consuming it.
    pub fn peek_non_blank(self, src: &mut dyn CharSource) -> Option<char> {
        self.skip_blank(src);
        src.peek()
    }

    /// Scans the next token.
    pub fn next_token(self, src: &mut dyn CharSource) -> Result<Token, LexError> {
        self.skip_blank(src);
        let Some(c) = src.advance() else {
            return Ok(Token::end());
        };

        let token = match c {
            ',' => Token::new(TokenKind::Comma, ","),
            ']' => Token::new(TokenKind::CloseBracket, "]"),
            '(' => Token::new(TokenKind::LeftParen, "("),
            ')' => Token::new(TokenKind::RightParen, ")"),
            '+' | '-' | '*' | '/' | '%' => Token::new(TokenKind::Operator, c),
            '&' | '|' | '=' => {
                let mut text = String::from(c);
                if src.peek() == Some(c) {
                    src.advance();
                    text.push(c);
                }
                Token::new(TokenKind::Operator, text)
            }
            '!' | '>' | '<' => {
                let mut text = String::from(c);
                if src.peek() == Some('=') {
                    src.advance();
                    text.push('=');
                }
                Token::new(TokenKind::Operator, text)
            }
            '"' => Token::new(TokenKind::Str, scan_string(src)?),
            '\'' => Token::new(TokenKind::Date, scan_date(src)?),
            c if is_ident_char(c) || c == '$' => self.scan_word(c, src),
            c => return Err(LexError::IllegalChar(c)),
        };
        tracing::trace!(token = %token, "lexed");
        Ok(token)
    }

    fn scan_word(self, first: char, src: &mut dyn CharSource) -> Token {
        let mut text = String::from(first);
        while let Some(c) = src.peek().filter(|&c| self.is_word_char(c)) {
            text.push(c);
            src.advance();
        }
        self.skip_blank(src);
        if src.peek() == Some('(') {
            src.advance();
            Token::new(TokenKind::Call, text)
        } else {
            Token::new(TokenKind::Word, text)
        }
    }
}

/// Scans the body of a double-quoted string; the opening quote is consumed.
fn scan_string(src: &mut dyn CharSource) -> Result<String, LexError> {
    let mut text = String::new();
    loop {
        match src.advance() {
            None => return Err(LexError::MissingQuote),
            Some('"') => return Ok(text),
            Some('\\') => {
                let escaped = src.advance().ok_or(LexError::MissingQuote)?;
                text.push(match escaped {
                    'a' => '\x07',
                    'b' => '\x08',
                    'f' => '\x0c',
                    'n' => '\n',
                    'r' => '\r',
                    't' => '\t',
                    'v' => '\x0b',
                    other => other,
                });
            }
            Some(c) => text.push(c),
        }
    }
}

/// Scans the body of a single-quoted date; the opening quote is consumed.
fn scan_date(src: &mut dyn CharSource) -> Result<String, LexError> {
    let mut text = String::new();
    loop {
        match src.advance() {
            None => return Err(LexError::MissingQuote),
            Some('\'') => return Ok(text),
            Some(c) => text.push(c),
        }
    }
}
