//! Configuration options for the SEDF tree parser.
//!
//! This module provides types to customize how [`Parser`](crate::Parser) reads input:
//!
//! - [`ParserOptions`]: Main configuration struct
//! - [`CommentStyle`]: Which comment syntax the lexer accepts
//!
//! ## Examples
//!
//! ```rust
//! use serde_sedf::{parse_document_with_options, CommentStyle, ParserOptions};
//!
//! let options = ParserOptions::new().with_comments(CommentStyle::DoubleSemicolon);
//! let atoms = parse_document_with_options(";; note\n42", options).unwrap();
//! assert_eq!(atoms.len(), 1);
//!
//! let options = ParserOptions::new().with_max_depth(2);
//! assert!(parse_document_with_options("#(#(#()))", options).is_err());
//! ```

/// Comment syntax accepted by the tree parser.
///
/// The [`Tokenizer`](crate::Tokenizer) always uses [`CommentStyle::Line`].
///
/// # Examples
///
/// ```rust
/// use serde_sedf::CommentStyle;
///
/// assert_eq!(CommentStyle::Line.marker(), ";");
/// assert_eq!(CommentStyle::DoubleSemicolon.marker(), ";;");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum CommentStyle {
    /// `;` starts a comment running to end of line.
    #[default]
    Line,
    /// `;;` starts a comment running to end of line; a lone `;` is an error.
    DoubleSemicolon,
}

impl CommentStyle {
    /// Returns the text that opens a comment in this style.
    #[must_use]
    pub const fn marker(&self) -> &'static str {
        match self {
            CommentStyle::Line => ";",
            CommentStyle::DoubleSemicolon => ";;",
        }
    }
}

/// Configuration options for the tree parser.
///
/// # Examples
///
/// ```rust
/// use serde_sedf::{CommentStyle, ParserOptions};
///
/// // Defaults: single `;` comments, 128 levels of nesting
/// let options = ParserOptions::new();
/// assert_eq!(options.max_depth, 128);
///
/// // Custom configuration
/// let options = ParserOptions::new()
///     .with_comments(CommentStyle::DoubleSemicolon)
///     .with_max_depth(16);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParserOptions {
    pub comments: CommentStyle,
    /// Deepest allowed nesting of objects and arrays.
    pub max_depth: usize,
}

impl Default for ParserOptions {
    fn default() -> Self {
        ParserOptions {
            comments: CommentStyle::default(),
            max_depth: 128,
        }
    }
}

impl ParserOptions {
    /// Creates default options.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_sedf::{CommentStyle, ParserOptions};
    ///
    /// let options = ParserOptions::new();
    /// assert_eq!(options.comments, CommentStyle::Line);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the accepted comment syntax.
    #[must_use]
    pub fn with_comments(mut self, comments: CommentStyle) -> Self {
        self.comments = comments;
        self
    }

    /// Sets the nesting limit for objects and arrays.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_sedf::ParserOptions;
    ///
    /// let options = ParserOptions::new().with_max_depth(4);
    /// assert_eq!(options.max_depth, 4);
    /// ```
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}
