//! Rem Lexer - tokenizer for reminder expressions.
//!
//! The lexer pulls characters from a [`CharSource`] and returns one owned
//! [`Token`] per call. Identifiers, numbers and times share a single word
//! scan; the evaluator tells them apart when it builds a value.

mod lexer;
mod source;
mod token;

pub use lexer::{LexError, Lexer};
pub use source::{CharSource, StrSource};
pub use token::{Token, TokenKind};
