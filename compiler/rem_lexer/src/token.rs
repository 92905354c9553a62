//! Lexical units returned by the lexer.

use std::fmt;

/// Token classification.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// End of input.
    End,
    /// `,`
    Comma,
    /// `]`, closes an embedded expression.
    CloseBracket,
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// An operator spelling: `+ - * / % ! != < <= > >= = == & && | ||`.
    Operator,
    /// A double-quoted string; `text` holds the unescaped contents.
    Str,
    /// A single-quoted date literal; `text` holds the contents.
    Date,
    /// An identifier, `$name`, number or time literal.
    Word,
    /// A word followed by `(`; `text` holds the function name.
    Call,
}

/// A token with its owned text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Token {
            kind,
            text: text.into(),
        }
    }

    pub fn end() -> Self {
        Token::new(TokenKind::End, String::new())
    }

    /// Whether this token ends an expression: end of input, `,`, `]` or `)`.
    pub fn is_terminator(&self) -> bool {
        matches!(
            self.kind,
            TokenKind::End | TokenKind::Comma | TokenKind::CloseBracket | TokenKind::RightParen
        )
    }

    /// First character of the token text, for diagnostics.
    pub fn first_char(&self) -> char {
        self.text.chars().next().unwrap_or(' ')
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::End => f.write_str("<end>"),
            TokenKind::Str => write!(f, "\"{}\"", self.text),
            TokenKind::Date => write!(f, "'{}'", self.text),
            TokenKind::Call => write!(f, "{}(", self.text),
            _ => f.write_str(&self.text),
        }
    }
}
