//! Character sources consumed by the lexer.
//!
//! The host may layer substitution or line joining underneath a source; the
//! lexer only ever sees one character of lookahead.

/// A stream of characters with one-character lookahead.
pub trait CharSource {
    /// The next character, without consuming it.
    fn peek(&self) -> Option<char>;

    /// Consumes and returns the next character.
    fn advance(&mut self) -> Option<char>;
}

/// A [`CharSource`] over a borrowed string.
#[derive(Clone, Debug)]
pub struct StrSource<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> StrSource<'a> {
    pub fn new(text: &'a str) -> Self {
        StrSource { text, pos: 0 }
    }

    /// Byte offset of the next unread character.
    pub fn offset(&self) -> usize {
        self.pos
    }

    /// The unread tail of the text.
    pub fn remaining(&self) -> &'a str {
        &self.text[self.pos..]
    }
}

impl CharSource for StrSource<'_> {
    fn peek(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn peek_does_not_consume() {
        let src = StrSource::new("ab");
        assert_eq!(src.peek(), Some('a'));
        assert_eq!(src.peek(), Some('a'));
        assert_eq!(src.offset(), 0);
    }

    #[test]
    fn advance_walks_multibyte_text() {
        let mut src = StrSource::new("é1");
        assert_eq!(src.advance(), Some('é'));
        assert_eq!(src.offset(), 2);
        assert_eq!(src.remaining(), "1");
        assert_eq!(src.advance(), Some('1'));
        assert_eq!(src.advance(), None);
        assert_eq!(src.peek(), None);
    }
}
