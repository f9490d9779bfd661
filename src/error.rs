//! Error types for SEDF tokenizing, parsing and decoding.
//!
//! The two engines report failures differently:
//!
//! - [`TokenizeError`]: returned by the zero-copy [`Tokenizer`](crate::Tokenizer).
//!   It is `Copy`, carries only byte offsets, and never allocates.
//! - [`Error`]: returned by the tree-building [`Parser`](crate::Parser) and by the
//!   serde decoding entry points. Parse errors carry line and column information.
//!
//! Both classify into a shared [`Category`]:
//!
//! - **Resource exhaustion**: the arena or the heap was too small. Retry with more room.
//! - **Malformed input**: the bytes are wrong. Not retryable without fixing them.
//! - **Incomplete input**: the buffer ended mid-structure. Feed more bytes and retry.
//!
//! ## Examples
//!
//! ```rust
//! use serde_sedf::{parse_document, Category, Error};
//!
//! let err = parse_document("(:name").unwrap_err();
//! assert_eq!(err.category(), Category::Incomplete);
//! assert!(err.to_string().contains("line 1"));
//! ```

use std::collections::TryReserveError;
use std::fmt;
use thiserror::Error;

/// Coarse classification shared by [`Error`] and [`TokenizeError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// The arena or heap ran out of room.
    ResourceExhausted,
    /// The input is not well-formed SEDF.
    Malformed,
    /// The input ended before the structure was complete.
    Incomplete,
}

/// Errors reported by the tree-building parser and the serde decoding layer.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A heap reservation failed while building the document.
    #[error("Out of memory while building the document")]
    OutOfMemory,

    /// A byte that cannot start or continue any token.
    #[error("Unexpected character {ch:?} at line {line}, column {col}")]
    UnexpectedChar { line: usize, col: usize, ch: char },

    /// Input ended in the middle of a token, string or container.
    #[error("Unexpected end of input at line {line}, column {col}\nExpected: {expected}")]
    UnexpectedEof {
        line: usize,
        col: usize,
        expected: String,
    },

    /// A well-formed token appeared where the grammar does not allow it.
    #[error("Unexpected token at line {line}, column {col}: expected {expected}, found {found}")]
    UnexpectedToken {
        line: usize,
        col: usize,
        expected: String,
        found: String,
    },

    /// Containers nested deeper than [`ParserOptions::max_depth`](crate::ParserOptions).
    #[error("Nesting deeper than {limit} levels at line {line}, column {col}")]
    RecursionLimit {
        line: usize,
        col: usize,
        limit: usize,
    },

    /// IO error while reading input
    #[error("IO error: {0}")]
    Io(String),

    /// Custom error, raised by serde or by value conversions
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates an unexpected-character error at a byte offset of `input`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_sedf::Error;
    ///
    /// let err = Error::unexpected_char("(\n  ,", 4);
    /// assert!(err.to_string().contains("line 2, column 3"));
    /// ```
    pub fn unexpected_char(input: &str, offset: usize) -> Self {
        let (line, col) = line_col(input, offset);
        let ch = input[offset..].chars().next().unwrap_or('\0');
        Error::UnexpectedChar { line, col, ch }
    }

    /// Creates an unexpected end-of-input error at a byte offset of `input`.
    pub fn unexpected_eof(input: &str, offset: usize, expected: &str) -> Self {
        let (line, col) = line_col(input, offset);
        Error::UnexpectedEof {
            line,
            col,
            expected: expected.to_string(),
        }
    }

    /// Creates an unexpected-token error at a byte offset of `input`.
    pub fn unexpected_token(input: &str, offset: usize, expected: &str, found: &str) -> Self {
        let (line, col) = line_col(input, offset);
        Error::UnexpectedToken {
            line,
            col,
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }

    /// Creates a nesting-limit error at a byte offset of `input`.
    pub fn recursion_limit(input: &str, offset: usize, limit: usize) -> Self {
        let (line, col) = line_col(input, offset);
        Error::RecursionLimit { line, col, limit }
    }

    /// Creates a custom error with a display message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_sedf::Error;
    ///
    /// let err = Error::custom("something went wrong");
    /// assert!(err.to_string().contains("something went wrong"));
    /// ```
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for reading failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// Classifies this error.
    ///
    /// `Io` and `Custom` count as malformed input: they are not fixed by
    /// feeding more bytes or by retrying with more memory.
    #[must_use]
    pub fn category(&self) -> Category {
        match self {
            Error::OutOfMemory => Category::ResourceExhausted,
            Error::UnexpectedEof { .. } => Category::Incomplete,
            Error::UnexpectedChar { .. }
            | Error::UnexpectedToken { .. }
            | Error::RecursionLimit { .. }
            | Error::Io(_)
            | Error::Custom(_) => Category::Malformed,
        }
    }

    /// Returns the 1-based line and column of the error, if it has one.
    #[must_use]
    pub fn location(&self) -> Option<(usize, usize)> {
        match self {
            Error::UnexpectedChar { line, col, .. }
            | Error::UnexpectedEof { line, col, .. }
            | Error::UnexpectedToken { line, col, .. }
            | Error::RecursionLimit { line, col, .. } => Some((*line, *col)),
            _ => None,
        }
    }
}

impl From<TryReserveError> for Error {
    fn from(_: TryReserveError) -> Self {
        Error::OutOfMemory
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Errors reported by the zero-copy tokenizer.
///
/// Positions are byte offsets into the input buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenizeError {
    /// The token arena is full. The tokenizer cursor was rewound to `position`,
    /// the start of the token that could not be stored.
    #[error("token arena exhausted at byte {position}")]
    Capacity { position: usize },

    /// The input is not valid SEDF.
    #[error("invalid input at byte {position}: {reason}")]
    Syntax {
        position: usize,
        reason: SyntaxReason,
    },

    /// The input ended inside a string or with an unclosed container.
    #[error("incomplete input at byte {position}, more bytes expected")]
    Incomplete { position: usize },
}

impl TokenizeError {
    /// Classifies this error.
    #[must_use]
    pub const fn category(&self) -> Category {
        match self {
            TokenizeError::Capacity { .. } => Category::ResourceExhausted,
            TokenizeError::Syntax { .. } => Category::Malformed,
            TokenizeError::Incomplete { .. } => Category::Incomplete,
        }
    }

    /// Byte offset the error refers to.
    #[must_use]
    pub const fn position(&self) -> usize {
        match self {
            TokenizeError::Capacity { position }
            | TokenizeError::Syntax { position, .. }
            | TokenizeError::Incomplete { position } => *position,
        }
    }
}

/// Why the tokenizer rejected its input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxReason {
    /// A byte outside printable ASCII where a primitive was expected.
    InvalidByte,
    /// A backslash followed by an unsupported character.
    InvalidEscape,
    /// A non-hex digit inside `\x` or `\u`.
    InvalidHexDigit,
    /// A `)` with no open container.
    UnmatchedClose,
}

impl SyntaxReason {
    /// Get a human-readable message for this reason.
    pub fn message(self) -> &'static str {
        match self {
            Self::InvalidByte => "invalid byte",
            Self::InvalidEscape => "invalid escape sequence",
            Self::InvalidHexDigit => "invalid hex digit in escape",
            Self::UnmatchedClose => "unmatched closing parenthesis",
        }
    }
}

impl fmt::Display for SyntaxReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// 1-based line and column of a byte offset. Columns count characters.
fn line_col(input: &str, offset: usize) -> (usize, usize) {
    let offset = offset.min(input.len());
    let before = &input.as_bytes()[..offset];
    let line = memchr::memchr_iter(b'\n', before).count() + 1;
    let line_start = memchr::memrchr(b'\n', before).map_or(0, |i| i + 1);
    let col = input[line_start..offset].chars().count() + 1;
    (line, col)
}
