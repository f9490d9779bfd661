//! # serde_sedf
//!
//! A parser for SEDF (S-Expression Data Format), a parenthesized, Lisp-flavored
//! notation for structured data, with Serde support for typed decoding.
//!
//! ## What is SEDF?
//!
//! SEDF carries the same kinds of data as JSON in s-expression clothing:
//!
//! ```text
//! ; a person
//! (:name "Ada" :tags #(t nil 3.5))
//! ```
//!
//! - `( :key value ... )` is an object of ordered key/value pairs
//! - `#( value ... )` is an array
//! - `"..."` is a string
//! - anything else is a bare primitive: `t`, `nil`, a number, or a symbol
//!
//! ## Two Engines
//!
//! - **Tokenizer** ([`Tokenizer`], [`tokenize`]): a zero-allocation scanner that writes
//!   flat [`Token`] records into a caller-supplied slice. It can size its own output,
//!   resume after a short buffer, and resume after running out of input.
//! - **Tree parser** ([`Parser`], [`parse_document`]): builds an owned tree of
//!   [`Value`] atoms, inferring booleans, nulls and numbers from bare words.
//!
//! ## Quick Start
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! serde_sedf = "0.1"
//! serde = { version = "1.0", features = ["derive"] }
//! ```
//!
//! ### Parsing a document
//!
//! ```rust
//! use serde_sedf::{parse_document, Value};
//!
//! let atoms = parse_document("(:name \"Ada\" :tags #(t nil 3.5))").unwrap();
//! assert_eq!(atoms.len(), 1);
//! assert_eq!(atoms[0].get("name"), Some(&Value::String("Ada".to_string())));
//! ```
//!
//! ### Typed decoding
//!
//! ```rust
//! use serde::Deserialize;
//! use serde_sedf::from_str;
//!
//! #[derive(Deserialize, PartialEq, Debug)]
//! struct User {
//!     id: u32,
//!     name: String,
//!     active: bool,
//! }
//!
//! let user: User = from_str("(:id 123 :name \"Alice\" :active t)").unwrap();
//! assert_eq!(user, User { id: 123, name: "Alice".to_string(), active: true });
//! ```
//!
//! ### Tokenizing into a fixed buffer
//!
//! ```rust
//! use serde_sedf::{Token, TokenKind, Tokenizer};
//!
//! let input = b"#(1 2 3)";
//! let mut tokens = [Token::default(); 8];
//! let mut tokenizer = Tokenizer::new();
//!
//! let count = tokenizer.parse(input, Some(&mut tokens[..])).unwrap();
//! assert_eq!(count, 4);
//! assert_eq!(tokens[0].kind, TokenKind::Array);
//! assert_eq!(tokens[0].size, 3);
//! ```
//!
//! ### Building values with the sedf! macro
//!
//! ```rust
//! use serde_sedf::{sedf, Value};
//!
//! let data = sedf!({
//!     "name": "Alice",
//!     "tags": ["rust", "sexp"]
//! });
//! assert_eq!(data.get("name").and_then(Value::as_str), Some("Alice"));
//! ```
//!
//! ## Logging
//!
//! Both engines emit [`tracing`](https://docs.rs/tracing) events at `debug` and
//! `trace` level. The library installs no subscriber.
//!
//! ## Safety Guarantees
//!
//! - No `unsafe` code blocks
//! - Allocation failure in the tree parser is reported as [`Error::OutOfMemory`]
//! - Nesting depth is bounded by [`ParserOptions::max_depth`]
//! - No panics in public API
//!
//! See the [`format`] module for the grammar.

pub mod de;
pub mod error;
pub mod format;
pub mod lexer;
pub mod macros;
pub mod map;
pub mod options;
pub mod parser;
pub mod token;
pub mod value;

pub use de::{from_value, Deserializer};
pub use error::{Category, Error, Result, SyntaxReason, TokenizeError};
pub use lexer::{LexKind, LexToken, Lexer};
pub use map::SedfMap;
pub use options::{CommentStyle, ParserOptions};
pub use parser::Parser;
pub use token::{children, tokenize, Token, TokenKind, Tokenizer};
pub use value::Value;

use serde::de::DeserializeOwned;
use std::io;

/// Parses every top-level atom of a SEDF document with default options.
///
/// # Examples
///
/// ```rust
/// use serde_sedf::{parse_document, Value};
///
/// let atoms = parse_document("1 \"two\" ; three\n").unwrap();
/// assert_eq!(atoms, vec![Value::Number(1.0), Value::String("two".to_string())]);
/// ```
///
/// # Errors
///
/// Returns the first error encountered; no partial document is returned.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse_document(input: &str) -> Result<Vec<Value>> {
    Parser::new(input).parse_document()
}

/// Parses every top-level atom of a SEDF document with custom options.
///
/// # Examples
///
/// ```rust
/// use serde_sedf::{parse_document_with_options, CommentStyle, ParserOptions};
///
/// let options = ParserOptions::new().with_comments(CommentStyle::DoubleSemicolon);
/// assert!(parse_document_with_options("; lone", options).is_err());
/// ```
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse_document_with_options(input: &str, options: ParserOptions) -> Result<Vec<Value>> {
    Parser::with_options(input, options).parse_document()
}

/// Parses a document that holds exactly one atom.
///
/// # Examples
///
/// ```rust
/// use serde_sedf::{parse_value, Value};
///
/// assert_eq!(parse_value(" nil ").unwrap(), Value::Null);
/// assert!(parse_value("1 2").is_err());
/// ```
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse_value(input: &str) -> Result<Value> {
    Parser::new(input).parse_single()
}

/// Deserialize an instance of type `T` from a string of SEDF text.
///
/// # Examples
///
/// ```rust
/// use serde_sedf::from_str;
/// use serde::Deserialize;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let point: Point = from_str("(:x 1 :y 2)").unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns an error if the input is not valid SEDF, does not hold exactly one
/// top-level atom, or cannot be deserialized to type `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str<T>(s: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    from_value(parse_value(s)?)
}

/// Deserialize an instance of type `T` from an I/O stream of SEDF.
///
/// # Examples
///
/// ```rust
/// use serde_sedf::from_reader;
/// use std::io::Cursor;
///
/// let cursor = Cursor::new(b"#(1 2 3)");
/// let nums: Vec<i32> = from_reader(cursor).unwrap();
/// assert_eq!(nums, vec![1, 2, 3]);
/// ```
///
/// # Errors
///
/// Returns an error if reading from the reader fails, the input is not valid SEDF,
/// or the data cannot be deserialized to type `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R, T>(mut reader: R) -> Result<T>
where
    R: io::Read,
    T: DeserializeOwned,
{
    let mut string = String::new();
    reader
        .read_to_string(&mut string)
        .map_err(|e| Error::io(&e.to_string()))?;
    from_str(&string)
}

/// Deserialize an instance of type `T` from bytes of SEDF text.
///
/// # Errors
///
/// Returns an error if the bytes are not valid UTF-8, not valid SEDF,
/// or cannot be deserialized to type `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice<T>(v: &[u8]) -> Result<T>
where
    T: DeserializeOwned,
{
    let s = std::str::from_utf8(v).map_err(|e| Error::custom(e.to_string()))?;
    from_str(s)
}
