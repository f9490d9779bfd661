//! Zero-copy, resumable SEDF tokenizer.
//!
//! The [`Tokenizer`] walks an input buffer and writes flat [`Token`] records into a
//! caller-owned arena. Records never copy input bytes: they hold byte offsets into
//! the original buffer plus the index of their enclosing container, so the arena
//! encodes the document tree without any heap allocation.
//!
//! ## Two-pass usage
//!
//! Passing no arena performs a sizing pass that validates the input and returns the
//! number of tokens it would emit:
//!
//! ```rust
//! use serde_sedf::{Token, TokenKind, Tokenizer};
//!
//! let input = b"(:name \"Ada\" :tags #(t nil))";
//!
//! let mut tokenizer = Tokenizer::new();
//! let count = tokenizer.parse(input, None).unwrap();
//! assert_eq!(count, 7);
//!
//! let mut tokens = vec![Token::default(); count];
//! tokenizer.reset();
//! tokenizer.parse(input, Some(&mut tokens[..])).unwrap();
//! assert_eq!(tokens[0].kind, TokenKind::SExp);
//! assert_eq!(tokens[0].size, 4);
//! assert_eq!(tokens[2].text(input), Some(&b"Ada"[..]));
//! ```
//!
//! ## Streaming
//!
//! Calling [`Tokenizer::parse`] again with the same state and a longer buffer (old
//! bytes unchanged) resumes at the saved cursor. [`TokenizeError::Incomplete`] means
//! "feed more bytes"; the count returned on success is cumulative.
//!
//! ```rust
//! use serde_sedf::{Token, TokenizeError, Tokenizer};
//!
//! let mut tokens = [Token::default(); 8];
//! let mut tokenizer = Tokenizer::new();
//!
//! let err = tokenizer.parse(b"(a ", Some(&mut tokens[..])).unwrap_err();
//! assert!(matches!(err, TokenizeError::Incomplete { .. }));
//!
//! let count = tokenizer.parse(b"(a b)", Some(&mut tokens[..])).unwrap();
//! assert_eq!(count, 3);
//! ```

use crate::error::{SyntaxReason, TokenizeError};
use tracing::{debug, trace};

/// Kind of a token record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TokenKind {
    /// A record that has not been written yet.
    #[default]
    Undefined,
    /// S-expression: `(...)`
    SExp,
    /// Array: `#(...)`
    Array,
    /// String: `"..."`
    String,
    /// Primitive: `:keyword`, number, symbol
    Primitive,
}

impl TokenKind {
    /// Returns the upper-case name of this kind.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_sedf::TokenKind;
    ///
    /// assert_eq!(TokenKind::SExp.as_str(), "SEXP");
    /// assert_eq!(TokenKind::Primitive.as_str(), "PRIMITIVE");
    /// ```
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Undefined => "UNDEFINED",
            TokenKind::SExp => "SEXP",
            TokenKind::Array => "ARRAY",
            TokenKind::String => "STRING",
            TokenKind::Primitive => "PRIMITIVE",
        }
    }

    /// Returns `true` for kinds that can hold children.
    #[inline]
    #[must_use]
    pub const fn is_composite(&self) -> bool {
        matches!(self, TokenKind::SExp | TokenKind::Array)
    }
}

/// One record of the token arena.
///
/// `start..end` is the byte span of the token in the original input. Strings
/// exclude their quotes; containers include their opening `(` or `#(` and their
/// closing `)`. A container's `end` stays `None` until its `)` is seen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Token {
    pub kind: TokenKind,
    pub start: usize,
    pub end: Option<usize>,
    /// Number of immediate children.
    pub size: usize,
    /// Index of the enclosing container, `None` at top level.
    pub parent: Option<usize>,
}

impl Token {
    /// Returns `true` for S-expression and array tokens.
    #[inline]
    #[must_use]
    pub const fn is_composite(&self) -> bool {
        self.kind.is_composite()
    }

    /// Returns `true` if this is a container still waiting for its `)`.
    #[inline]
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.kind.is_composite() && self.end.is_none()
    }

    /// Byte range of the token, once its end is known.
    #[inline]
    #[must_use]
    pub fn span(&self) -> Option<std::ops::Range<usize>> {
        self.end.map(|end| self.start..end)
    }

    /// Source bytes of the token, once its end is known.
    #[must_use]
    pub fn text<'a>(&self, input: &'a [u8]) -> Option<&'a [u8]> {
        self.span().and_then(|span| input.get(span))
    }
}

/// Tokenizer state for one parsing session.
///
/// The state is explicit and independently instantiable; hold one per input
/// stream and do not share it between threads without synchronization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tokenizer {
    pos: usize,
    next: usize,
    superior: Option<usize>,
    depth: usize,
}

impl Tokenizer {
    /// Creates a tokenizer positioned at the start of an input.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resets the cursor and arena bookkeeping for a new session.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Byte offset the next call resumes from.
    #[must_use]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Number of tokens emitted (or counted) so far.
    #[must_use]
    pub fn token_count(&self) -> usize {
        self.next
    }

    /// Index of the innermost open container.
    ///
    /// Only tracked while materializing into an arena.
    #[must_use]
    pub fn superior(&self) -> Option<usize> {
        self.superior
    }

    /// Number of containers opened but not yet closed.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Tokenizes `input`, writing records into `tokens`.
    ///
    /// With `tokens` set to `None` this is a sizing pass: the input is validated
    /// and the token count is returned, but nothing is written. Do not mix sizing
    /// and materializing calls within one session; [`reset`](Self::reset) between them.
    ///
    /// Returns the cumulative number of tokens of the session.
    ///
    /// # Errors
    ///
    /// - [`TokenizeError::Capacity`] when the arena is full. The cursor is rewound
    ///   to the token that did not fit, so the call can be repeated with a larger
    ///   arena holding the same records.
    /// - [`TokenizeError::Syntax`] for an invalid byte, an invalid escape or an
    ///   unmatched `)`.
    /// - [`TokenizeError::Incomplete`] when the input ends inside a string, inside a
    ///   primitive that belongs to an open container, or with a container still open.
    pub fn parse(
        &mut self,
        input: &[u8],
        mut tokens: Option<&mut [Token]>,
    ) -> Result<usize, TokenizeError> {
        if self.pos > 0 {
            trace!(resume_at = self.pos, tokens = self.next, "tokenizer resuming");
        }
        if let Some(arena) = tokens.as_deref() {
            if arena.len() < self.next {
                return Err(TokenizeError::Capacity { position: self.pos });
            }
        }

        let result = self.run(input, &mut tokens);
        match &result {
            Ok(count) => trace!(count, position = self.pos, "tokenizer finished"),
            Err(err) => debug!(position = err.position(), error = %err, "tokenizer stopped"),
        }
        result
    }

    fn run(
        &mut self,
        input: &[u8],
        tokens: &mut Option<&mut [Token]>,
    ) -> Result<usize, TokenizeError> {
        while self.pos < input.len() {
            match input[self.pos] {
                b'(' => self.open(tokens.as_deref_mut(), TokenKind::SExp, 1)?,
                b'#' if input.get(self.pos + 1) == Some(&b'(') => {
                    self.open(tokens.as_deref_mut(), TokenKind::Array, 2)?;
                }
                b')' => self.close(tokens.as_deref_mut())?,
                b'"' => self.string(input, tokens.as_deref_mut())?,
                b' ' | b'\t' | b'\r' | b'\n' => self.pos += 1,
                b';' => {
                    if !self.comment(input) {
                        break;
                    }
                }
                _ => self.primitive(input, tokens.as_deref_mut())?,
            }
        }

        if self.depth > 0 {
            return Err(TokenizeError::Incomplete { position: self.pos });
        }
        Ok(self.next)
    }

    /// Stores a record in the next free slot and links it to the open container.
    fn emit(
        &mut self,
        tokens: Option<&mut [Token]>,
        kind: TokenKind,
        start: usize,
        end: Option<usize>,
    ) -> Result<(), TokenizeError> {
        if let Some(tokens) = tokens {
            let slot = tokens
                .get_mut(self.next)
                .ok_or(TokenizeError::Capacity { position: self.pos })?;
            *slot = Token {
                kind,
                start,
                end,
                size: 0,
                parent: self.superior,
            };
            if let Some(parent) = self.superior {
                tokens[parent].size += 1;
            }
        }
        self.next += 1;
        Ok(())
    }

    fn open(
        &mut self,
        tokens: Option<&mut [Token]>,
        kind: TokenKind,
        width: usize,
    ) -> Result<(), TokenizeError> {
        let materializing = tokens.is_some();
        self.emit(tokens, kind, self.pos, None)?;
        if materializing {
            self.superior = Some(self.next - 1);
        }
        self.depth += 1;
        self.pos += width;
        Ok(())
    }

    fn close(&mut self, tokens: Option<&mut [Token]>) -> Result<(), TokenizeError> {
        let unmatched = TokenizeError::Syntax {
            position: self.pos,
            reason: SyntaxReason::UnmatchedClose,
        };
        if self.depth == 0 {
            return Err(unmatched);
        }

        if let Some(tokens) = tokens {
            let filled = &mut tokens[..self.next];
            let open = filled.iter().rposition(Token::is_open).ok_or(unmatched)?;
            filled[open].end = Some(self.pos + 1);
            self.superior = filled[..open].iter().rposition(Token::is_open);
        }
        self.depth -= 1;
        self.pos += 1;
        Ok(())
    }

    fn string(&mut self, input: &[u8], tokens: Option<&mut [Token]>) -> Result<(), TokenizeError> {
        let start = self.pos;
        let incomplete = TokenizeError::Incomplete { position: start };
        let mut i = start + 1;

        loop {
            let Some(offset) = memchr::memchr2(b'"', b'\\', &input[i..]) else {
                return Err(incomplete);
            };
            i += offset;
            if input[i] == b'"' {
                break;
            }

            let escape = *input.get(i + 1).ok_or(incomplete)?;
            i += 2;
            match escape {
                b'"' | b'\\' | b'/' | b'b' | b'f' | b'r' | b'n' | b't' => {}
                b'x' => i = hex_digits(input, i, 2, start)?,
                b'u' => i = hex_digits(input, i, 4, start)?,
                _ => {
                    return Err(TokenizeError::Syntax {
                        position: i - 1,
                        reason: SyntaxReason::InvalidEscape,
                    })
                }
            }
        }

        self.emit(tokens, TokenKind::String, start + 1, Some(i))?;
        self.pos = i + 1;
        Ok(())
    }

    /// Skips a comment through end of line. Returns `false` if the input ends
    /// first; the cursor then stays on the `;` so a resumed call rescans it.
    fn comment(&mut self, input: &[u8]) -> bool {
        match memchr::memchr2(b'\n', b'\r', &input[self.pos..]) {
            Some(offset) => {
                self.pos += offset;
                true
            }
            None => false,
        }
    }

    fn primitive(
        &mut self,
        input: &[u8],
        tokens: Option<&mut [Token]>,
    ) -> Result<(), TokenizeError> {
        let start = self.pos;
        let mut end = start;
        while let Some(&byte) = input.get(end) {
            match byte {
                b' ' | b'\t' | b'\r' | b'\n' | b'(' | b')' | b';' => break,
                32..=126 => end += 1,
                _ => {
                    return Err(TokenizeError::Syntax {
                        position: end,
                        reason: SyntaxReason::InvalidByte,
                    })
                }
            }
        }

        // More bytes could still extend a primitive inside an open container.
        if end == input.len() && self.depth > 0 {
            return Err(TokenizeError::Incomplete { position: start });
        }

        self.emit(tokens, TokenKind::Primitive, start, Some(end))?;
        self.pos = end;
        Ok(())
    }
}

/// Validates `count` hex digits at `at`, returning the offset after them.
fn hex_digits(input: &[u8], at: usize, count: usize, start: usize) -> Result<usize, TokenizeError> {
    for position in at..at + count {
        match input.get(position) {
            Some(byte) if byte.is_ascii_hexdigit() => {}
            Some(_) => {
                return Err(TokenizeError::Syntax {
                    position,
                    reason: SyntaxReason::InvalidHexDigit,
                })
            }
            None => return Err(TokenizeError::Incomplete { position: start }),
        }
    }
    Ok(at + count)
}

/// Tokenizes a complete buffer with a sizing pass followed by a materializing pass.
///
/// # Examples
///
/// ```rust
/// use serde_sedf::{tokenize, TokenKind};
///
/// let tokens = tokenize(b"#(1 2 3)").unwrap();
/// assert_eq!(tokens.len(), 4);
/// assert_eq!(tokens[0].kind, TokenKind::Array);
/// assert_eq!(tokens[0].size, 3);
/// assert!(tokens[1..].iter().all(|t| t.parent == Some(0)));
/// ```
///
/// # Errors
///
/// Returns the first [`TokenizeError`] of either pass.
pub fn tokenize(input: &[u8]) -> Result<Vec<Token>, TokenizeError> {
    let mut tokenizer = Tokenizer::new();
    let count = tokenizer.parse(input, None)?;

    let mut tokens = vec![Token::default(); count];
    tokenizer.reset();
    tokenizer.parse(input, Some(&mut tokens[..]))?;
    Ok(tokens)
}

/// Iterates over the immediate children of the token at `parent`, with their indices.
pub fn children(tokens: &[Token], parent: usize) -> impl Iterator<Item = (usize, &Token)> {
    tokens
        .iter()
        .enumerate()
        .skip(parent + 1)
        .filter(move |(_, token)| token.parent == Some(parent))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_all(input: &[u8], capacity: usize) -> (Result<usize, TokenizeError>, Vec<Token>) {
        let mut tokens = vec![Token::default(); capacity];
        let mut tokenizer = Tokenizer::new();
        let result = tokenizer.parse(input, Some(&mut tokens[..]));
        (result, tokens)
    }

    fn text<'a>(input: &'a [u8], token: &Token) -> &'a str {
        std::str::from_utf8(token.text(input).unwrap()).unwrap()
    }

    #[test]
    fn test_sexp_with_primitives() {
        let input = b"(a b c)";
        let (result, tokens) = parse_all(input, 8);
        assert_eq!(result, Ok(4));

        assert_eq!(tokens[0].kind, TokenKind::SExp);
        assert_eq!(tokens[0].span(), Some(0..7));
        assert_eq!(tokens[0].size, 3);
        assert_eq!(tokens[0].parent, None);

        for (i, name) in ["a", "b", "c"].iter().enumerate() {
            assert_eq!(tokens[i + 1].kind, TokenKind::Primitive);
            assert_eq!(text(input, &tokens[i + 1]), *name);
            assert_eq!(tokens[i + 1].parent, Some(0));
        }
    }

    #[test]
    fn test_array_tokens() {
        let input = b"#(1 #(2) 3)";
        let (result, tokens) = parse_all(input, 8);
        assert_eq!(result, Ok(5));

        assert_eq!(tokens[0].kind, TokenKind::Array);
        assert_eq!(tokens[0].start, 0);
        assert_eq!(tokens[0].size, 3);
        assert_eq!(tokens[2].kind, TokenKind::Array);
        assert_eq!(text(input, &tokens[2]), "#(2)");
        assert_eq!(tokens[3].parent, Some(2));
        assert_eq!(tokens[4].parent, Some(0));
    }

    #[test]
    fn test_hash_without_paren_is_primitive() {
        let input = b"(#foo #)";
        let (result, tokens) = parse_all(input, 4);
        assert_eq!(result, Ok(3));
        assert_eq!(text(input, &tokens[1]), "#foo");
        assert_eq!(text(input, &tokens[2]), "#");
        assert_eq!(tokens[0].size, 2);
    }

    #[test]
    fn test_top_level_hash_at_end_is_primitive() {
        let tokens = tokenize(b"#").unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Primitive);
    }

    #[test]
    fn test_string_excludes_quotes() {
        let input = br#"("hello world" "")"#;
        let (result, tokens) = parse_all(input, 4);
        assert_eq!(result, Ok(3));
        assert_eq!(tokens[1].kind, TokenKind::String);
        assert_eq!(text(input, &tokens[1]), "hello world");
        assert_eq!(tokens[2].span(), Some(16..16));
    }

    #[test]
    fn test_string_escapes() {
        let input = br#""a\"b\\c\/\b\f\r\n\t\x4F\u00E9""#;
        let tokens = tokenize(input).unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].start, 1);
        assert_eq!(tokens[0].end, Some(input.len() - 1));
    }

    #[test]
    fn test_invalid_escape() {
        let err = tokenize(br#""a\qb""#).unwrap_err();
        assert_eq!(
            err,
            TokenizeError::Syntax {
                position: 3,
                reason: SyntaxReason::InvalidEscape
            }
        );
    }

    #[test]
    fn test_invalid_hex_digits() {
        let err = tokenize(br#""\xG0""#).unwrap_err();
        assert!(matches!(
            err,
            TokenizeError::Syntax {
                reason: SyntaxReason::InvalidHexDigit,
                position: 3
            }
        ));

        let err = tokenize(br#""\u12z4""#).unwrap_err();
        assert!(matches!(
            err,
            TokenizeError::Syntax {
                reason: SyntaxReason::InvalidHexDigit,
                position: 5
            }
        ));
    }

    #[test]
    fn test_unterminated_string_is_incomplete() {
        let mut tokenizer = Tokenizer::new();
        let mut tokens = [Token::default(); 4];
        let err = tokenizer.parse(br#"("abc"#, Some(&mut tokens[..])).unwrap_err();
        assert_eq!(err, TokenizeError::Incomplete { position: 1 });
        assert_eq!(tokenizer.position(), 1);

        let err = tokenize(br#""ab\"#).unwrap_err();
        assert_eq!(err, TokenizeError::Incomplete { position: 0 });

        let err = tokenize(br#""\u12"#).unwrap_err();
        assert_eq!(err, TokenizeError::Incomplete { position: 0 });
    }

    #[test]
    fn test_comments_are_skipped() {
        let input = b"; header\n(a ; trailing\n b)\r; last";
        let tokens = tokenize(input).unwrap();
        assert_eq!(tokens.len(), 3);
        assert_eq!(text(input, &tokens[1]), "a");
        assert_eq!(text(input, &tokens[2]), "b");
    }

    #[test]
    fn test_semicolon_ends_primitive() {
        let input = b"abc;comment\n";
        let tokens = tokenize(input).unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(text(input, &tokens[0]), "abc");
    }

    #[test]
    fn test_unclosed_is_incomplete_and_unmatched_is_syntax() {
        let err = tokenize(b"(").unwrap_err();
        assert_eq!(err, TokenizeError::Incomplete { position: 1 });

        let err = tokenize(b")").unwrap_err();
        assert_eq!(
            err,
            TokenizeError::Syntax {
                position: 0,
                reason: SyntaxReason::UnmatchedClose
            }
        );

        let (result, _) = parse_all(b"(a))", 4);
        assert!(matches!(
            result,
            Err(TokenizeError::Syntax {
                position: 3,
                reason: SyntaxReason::UnmatchedClose
            })
        ));
    }

    #[test]
    fn test_non_printable_byte() {
        let err = tokenize(b"(ab\x01c)").unwrap_err();
        assert_eq!(
            err,
            TokenizeError::Syntax {
                position: 3,
                reason: SyntaxReason::InvalidByte
            }
        );
        assert!(tokenize(&[0xC3, 0xA9]).is_err());
    }

    #[test]
    fn test_capacity_exhaustion_and_retry() {
        let input = b"(a b (c))";
        let mut small = [Token::default(); 3];
        let mut tokenizer = Tokenizer::new();
        let err = tokenizer.parse(input, Some(&mut small[..])).unwrap_err();
        assert_eq!(err, TokenizeError::Capacity { position: 5 });
        assert_eq!(tokenizer.position(), 5);

        tokenizer.reset();
        let mut large = [Token::default(); 5];
        assert_eq!(tokenizer.parse(input, Some(&mut large[..])), Ok(5));
    }

    #[test]
    fn test_capacity_error_on_string_points_at_quote() {
        let input = br#"(a "xy")"#;
        let mut small = [Token::default(); 2];
        let mut tokenizer = Tokenizer::new();
        let err = tokenizer.parse(input, Some(&mut small[..])).unwrap_err();
        assert_eq!(err, TokenizeError::Capacity { position: 3 });
        assert_eq!(err.position(), tokenizer.position());

        let mut tokens = [Token::default(); 3];
        tokens[..2].copy_from_slice(&small);
        assert_eq!(tokenizer.parse(input, Some(&mut tokens[..])), Ok(3));
        assert_eq!(tokens[2].kind, TokenKind::String);
        assert_eq!((tokens[2].start, tokens[2].end), (4, Some(6)));
    }

    #[test]
    fn test_capacity_retry_resumes_in_place() {
        let input = b"(a b (c))";
        let mut tokens = [Token::default(); 5];
        let mut tokenizer = Tokenizer::new();

        let err = tokenizer.parse(input, Some(&mut tokens[..3])).unwrap_err();
        assert!(matches!(err, TokenizeError::Capacity { .. }));
        assert_eq!(tokenizer.parse(input, Some(&mut tokens[..])), Ok(5));
        assert_eq!(tokens, tokenize(input).unwrap()[..]);
    }

    #[test]
    fn test_arena_smaller_than_filled_records() {
        let mut tokens = [Token::default(); 4];
        let mut tokenizer = Tokenizer::new();
        assert_eq!(tokenizer.parse(b"a b c", Some(&mut tokens[..])), Ok(3));
        let err = tokenizer.parse(b"a b c d", Some(&mut tokens[..2])).unwrap_err();
        assert!(matches!(err, TokenizeError::Capacity { .. }));
    }

    #[test]
    fn test_sizing_pass_matches_materializing_pass() {
        let input = b"(:a 1 :b #(x \"y\" (z)) ; note\n :c nil)";
        let mut tokenizer = Tokenizer::new();
        let sized = tokenizer.parse(input, None).unwrap();
        assert_eq!(tokenize(input).unwrap().len(), sized);
    }

    #[test]
    fn test_sizing_pass_detects_errors() {
        assert!(matches!(
            Tokenizer::new().parse(b"(a", None),
            Err(TokenizeError::Incomplete { .. })
        ));
        assert!(matches!(
            Tokenizer::new().parse(b"a)", None),
            Err(TokenizeError::Syntax { .. })
        ));
    }

    #[test]
    fn test_resume_after_incomplete() {
        let mut tokens = [Token::default(); 8];
        let mut tokenizer = Tokenizer::new();

        assert!(tokenizer.parse(b"(a ", Some(&mut tokens[..])).is_err());
        assert_eq!(tokenizer.token_count(), 2);
        assert_eq!(tokenizer.superior(), Some(0));
        assert_eq!(tokenizer.parse(b"(a b)", Some(&mut tokens[..])), Ok(3));

        assert_eq!(tokens[..3], tokenize(b"(a b)").unwrap()[..]);
    }

    #[test]
    fn test_resume_does_not_split_primitives() {
        let mut tokens = [Token::default(); 8];
        let mut tokenizer = Tokenizer::new();

        let err = tokenizer.parse(b"(abc", Some(&mut tokens[..])).unwrap_err();
        assert_eq!(err, TokenizeError::Incomplete { position: 1 });
        assert_eq!(tokenizer.parse(b"(abcdef)", Some(&mut tokens[..])), Ok(2));
        assert_eq!(tokens[1].span(), Some(1..7));
    }

    #[test]
    fn test_resume_does_not_split_comments() {
        let mut tokens = [Token::default(); 8];
        let mut tokenizer = Tokenizer::new();

        assert!(tokenizer.parse(b"(a ;com", Some(&mut tokens[..])).is_err());
        assert_eq!(
            tokenizer.parse(b"(a ;comment\n b)", Some(&mut tokens[..])),
            Ok(3)
        );
    }

    #[test]
    fn test_superior_restored_after_close() {
        let input = b"(a (b) c)";
        let (result, tokens) = parse_all(input, 8);
        assert_eq!(result, Ok(5));
        assert_eq!(tokens[4].parent, Some(0));
        assert_eq!(tokens[0].size, 3);
        assert_eq!(tokens[2].size, 1);
    }

    #[test]
    fn test_multiple_top_level_tokens() {
        let input = b"1 \"two\" (three) #()";
        let tokens = tokenize(input).unwrap();
        assert_eq!(tokens.len(), 5);
        assert!(tokens
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != 3)
            .all(|(_, t)| t.parent.is_none()));
        assert_eq!(tokens[4].size, 0);
    }

    #[test]
    fn test_children() {
        let tokens = tokenize(b"(a (b c) d)").unwrap();
        let kids: Vec<usize> = children(&tokens, 0).map(|(i, _)| i).collect();
        assert_eq!(kids, vec![1, 2, 5]);
        let kids: Vec<usize> = children(&tokens, 2).map(|(i, _)| i).collect();
        assert_eq!(kids, vec![3, 4]);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(tokenize(b"").unwrap(), Vec::<Token>::new());
        assert_eq!(tokenize(b"  \n\t ; only a comment").unwrap(), Vec::<Token>::new());
    }
}
