//! SEDF Format Reference
//!
//! This module documents the SEDF (S-Expression Data Format) grammar as read by
//! this library.
//!
//! # Overview
//!
//! SEDF is a small Lisp-like notation for structured data. A document is a sequence
//! of atoms separated by whitespace and comments:
//!
//! ```text
//! document   := atom*
//! atom       := object | array | string | primitive
//! object     := "(" (key atom)* ")"
//! array      := "#(" atom* ")"
//! key        := ":" symbol-chars
//! string     := '"' (char | escape)* '"'
//! escape     := \" | \\ | \/ | \b | \f | \r | \n | \t | \x HEXHEX | \u HEXHEXHEXHEX
//! primitive  := symbol-chars+
//! comment    := ";" .* EOL
//! ```
//!
//! # Core Syntax
//!
//! ## Objects
//!
//! Parentheses hold key/value pairs. Every key is a word starting with `:`, and
//! each key is followed by exactly one atom:
//!
//! ```text
//! (:name "Ada" :born 1815 :tags #(math engine))
//! ```
//!
//! **Rules**:
//! - Pairs keep their source order
//! - Duplicate keys are kept; lookups return the first
//! - The parser stores keys without the leading `:`
//! - A key that is not a `:` word, or a key with no value, is an unexpected-token error
//!
//! ## Arrays
//!
//! `#(` opens an array of zero or more atoms. No whitespace is allowed between
//! `#` and `(`:
//!
//! ```text
//! #(1 2 3)
//! #()
//! #(#(1 2) (:a 1) "three")
//! ```
//!
//! ## Strings
//!
//! Strings are double-quoted and may span lines. The tokenizer validates escapes;
//! the tree parser only uses a backslash to keep the next byte from closing the
//! string, and stores the body exactly as written.
//!
//! | Escape    | Meaning                      |
//! |-----------|------------------------------|
//! | `\"`      | quote                        |
//! | `\\`      | backslash                    |
//! | `\/`      | slash                        |
//! | `\b` `\f` | backspace, form feed         |
//! | `\r` `\n` `\t` | carriage return, newline, tab |
//! | `\xHH`    | byte, two hex digits         |
//! | `\uHHHH`  | code point, four hex digits  |
//!
//! ## Primitives
//!
//! A primitive is a run of symbol characters: ASCII letters, digits, and
//! `- + * / @ $ % & = < > . _ ~ ? ! [ ] { } ^ :`.
//!
//! The tree parser infers a type for each primitive:
//!
//! | Text              | Value            |
//! |-------------------|------------------|
//! | `t`               | `Bool(true)`     |
//! | `nil`             | `Null`           |
//! | `42`, `-1.5e3`    | `Number(f64)`    |
//! | anything else     | `Symbol`         |
//!
//! There is no `false` keyword. A word such as `true` or `42x` is a symbol.
//!
//! ## Comments
//!
//! `;` starts a comment that runs to the end of the line. With
//! [`CommentStyle::DoubleSemicolon`](crate::CommentStyle::DoubleSemicolon) the tree
//! parser requires `;;` and rejects a lone `;`.
//!
//! # Tokens
//!
//! The [`Tokenizer`](crate::Tokenizer) writes one [`Token`](crate::Token) per object,
//! array, string and primitive:
//!
//! | Field    | Meaning                                                  |
//! |----------|----------------------------------------------------------|
//! | `kind`   | `SExp`, `Array`, `String` or `Primitive`                 |
//! | `start`  | first byte of the span (after the quote for strings)     |
//! | `end`    | one past the last byte (before the quote for strings)    |
//! | `size`   | number of direct children                                |
//! | `parent` | index of the enclosing object or array                   |
//!
//! Object keys are primitives in the token stream, so an object with two pairs
//! has a `size` of four.
//!
//! # Errors
//!
//! Both engines stop at the first error. Errors fall into three
//! [`Category`](crate::Category) values:
//!
//! - **ResourceExhausted**: token buffer too small, or allocation failure
//! - **Malformed**: invalid byte, bad escape, wrong token kind, unmatched `)`
//! - **Incomplete**: input ended inside a structure; supply more bytes and resume
