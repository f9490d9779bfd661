//! Lexical reader for the tree parser.
//!
//! The [`Lexer`] hands out one [`LexToken`] at a time with no lookahead beyond the
//! current byte. It recognizes the opening bytes of objects, arrays and strings,
//! closing parentheses, and runs of symbol characters. String bodies are read
//! separately with [`Lexer::read_string`] once the parser has seen the opening quote.

use crate::options::CommentStyle;
use crate::{Error, Result};

/// Kind of a lexical token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexKind {
    /// `(`
    Open,
    /// `#`, the first byte of an array
    ArrayOpen,
    /// `)`
    Close,
    /// `"`, the start of a string body
    StringOpen,
    /// A run of symbol characters starting with `:`, used for object keys
    Symbol,
    /// Any other run of symbol characters
    Primitive,
}

impl LexKind {
    /// Short description used in error messages.
    #[must_use]
    pub const fn describe(&self) -> &'static str {
        match self {
            LexKind::Open => "'('",
            LexKind::ArrayOpen => "'#'",
            LexKind::Close => "')'",
            LexKind::StringOpen => "a string",
            LexKind::Symbol => "a key",
            LexKind::Primitive => "a primitive",
        }
    }
}

/// A token produced by the [`Lexer`]: a kind and its byte span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LexToken {
    pub kind: LexKind,
    pub start: usize,
    pub end: usize,
}

impl LexToken {
    /// Source text of the token.
    #[must_use]
    pub fn text<'a>(&self, input: &'a str) -> &'a str {
        &input[self.start..self.end]
    }
}

/// Returns `true` for bytes allowed in keys, symbols and numbers.
#[inline]
pub fn is_symbol_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric()
        || matches!(
            byte,
            b'-' | b'+'
                | b'*'
                | b'/'
                | b'@'
                | b'$'
                | b'%'
                | b'&'
                | b'='
                | b'<'
                | b'>'
                | b'.'
                | b'_'
                | b'~'
                | b'?'
                | b'!'
                | b'['
                | b']'
                | b'{'
                | b'}'
                | b'^'
                | b':'
        )
}

/// Single-token reader over a SEDF document.
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    input: &'a str,
    pos: usize,
    comments: CommentStyle,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str, comments: CommentStyle) -> Self {
        Lexer {
            input,
            pos: 0,
            comments,
        }
    }

    /// Byte offset of the cursor.
    #[must_use]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Checks if we're at the end of input
    #[must_use]
    pub fn is_eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    /// The byte under the cursor.
    #[must_use]
    pub fn peek_byte(&self) -> Option<u8> {
        self.input.as_bytes().get(self.pos).copied()
    }

    /// Advances past the byte under the cursor.
    pub fn bump(&mut self) {
        if !self.is_eof() {
            self.pos += 1;
        }
    }

    /// Skips whitespace and comments.
    pub fn skip_trivia(&mut self) -> Result<()> {
        let input = self.input;
        let bytes = input.as_bytes();
        while let Some(byte) = self.peek_byte() {
            match byte {
                b' ' | b'\t' | b'\r' | b'\n' => self.pos += 1,
                b';' => {
                    if self.comments == CommentStyle::DoubleSemicolon
                        && bytes.get(self.pos + 1) != Some(&b';')
                    {
                        return Err(Error::unexpected_char(input, self.pos));
                    }
                    self.pos = memchr::memchr2(b'\n', b'\r', &bytes[self.pos..])
                        .map_or(bytes.len(), |offset| self.pos + offset);
                }
                _ => break,
            }
        }
        Ok(())
    }

    /// Reads the next token, or `None` at end of input.
    ///
    /// For [`LexKind::StringOpen`] only the opening quote is consumed; call
    /// [`read_string`](Self::read_string) for the body.
    pub fn next_token(&mut self) -> Result<Option<LexToken>> {
        self.skip_trivia()?;
        let start = self.pos;
        let Some(byte) = self.peek_byte() else {
            return Ok(None);
        };

        let kind = match byte {
            b'(' => LexKind::Open,
            b')' => LexKind::Close,
            b'"' => LexKind::StringOpen,
            b'#' => LexKind::ArrayOpen,
            b':' => LexKind::Symbol,
            byte if is_symbol_byte(byte) => LexKind::Primitive,
            _ => return Err(Error::unexpected_char(self.input, start)),
        };

        self.pos += 1;
        if matches!(kind, LexKind::Symbol | LexKind::Primitive) {
            let input = self.input;
            let rest = &input.as_bytes()[self.pos..];
            self.pos += rest
                .iter()
                .position(|&b| !is_symbol_byte(b))
                .unwrap_or(rest.len());
        }

        Ok(Some(LexToken {
            kind,
            start,
            end: self.pos,
        }))
    }

    /// Reads a string body up to the next unescaped `"` and consumes the quote.
    ///
    /// The cursor must be just past the opening quote. Backslashes only protect
    /// the byte after them from ending the string; the body is returned verbatim.
    pub fn read_string(&mut self) -> Result<&'a str> {
        let input = self.input;
        let bytes = input.as_bytes();
        let start = self.pos;
        let mut i = start;
        loop {
            let offset = memchr::memchr2(b'"', b'\\', &bytes[i..])
                .ok_or_else(|| Error::unexpected_eof(input, bytes.len(), "'\"'"))?;
            i += offset;
            if bytes[i] == b'"' {
                break;
            }
            if i + 1 >= bytes.len() {
                return Err(Error::unexpected_eof(input, bytes.len(), "'\"'"));
            }
            i += 2;
        }
        self.pos = i + 1;
        Ok(&input[start..i])
    }
}
