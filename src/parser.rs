//! Recursive-descent parser building an owned SEDF document tree.
//!
//! The [`Parser`] pulls one lexical token at a time from a [`Lexer`] and descends
//! into objects and arrays, producing [`Value`] atoms. Each grammar rule returns its
//! finished atom by value; on failure, whatever the rule had built so far is an
//! owned local and is dropped on the way out, so no partial tree survives an error.
//!
//! ## Literal inference
//!
//! Bare primitives are classified in this order:
//!
//! | Token            | Atom                  |
//! |------------------|-----------------------|
//! | `t`              | `Bool(true)`          |
//! | `nil`            | `Null`                |
//! | full numeric     | `Number(f64)`         |
//! | hex numeric      | `Number(f64)`         |
//! | anything else    | `Symbol(text)`        |
//!
//! ```rust
//! use serde_sedf::{parse_document, Value};
//!
//! let atoms = parse_document("t nil 42 42x").unwrap();
//! assert_eq!(
//!     atoms,
//!     vec![
//!         Value::Bool(true),
//!         Value::Null,
//!         Value::Number(42.0),
//!         Value::Symbol("42x".to_string()),
//!     ]
//! );
//! ```

use crate::lexer::{LexKind, LexToken, Lexer};
use crate::options::ParserOptions;
use crate::{Error, Result, SedfMap, Value};
use tracing::{debug, trace};

/// The SEDF tree parser.
///
/// Created via [`Parser::new`] or [`Parser::with_options`], bound to one input.
pub struct Parser<'a> {
    input: &'a str,
    lexer: Lexer<'a>,
    options: ParserOptions,
    depth: usize,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str) -> Self {
        Self::with_options(input, ParserOptions::default())
    }

    pub fn with_options(input: &'a str, options: ParserOptions) -> Self {
        Parser {
            input,
            lexer: Lexer::new(input, options.comments),
            options,
            depth: 0,
        }
    }

    /// Byte offset of the cursor.
    #[must_use]
    pub fn position(&self) -> usize {
        self.lexer.position()
    }

    /// Parses every remaining top-level atom.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_sedf::{Parser, Value};
    ///
    /// let mut parser = Parser::new("(:a 1) \"two\" three");
    /// let atoms = parser.parse_document().unwrap();
    /// assert_eq!(atoms.len(), 3);
    /// assert_eq!(atoms[2], Value::Symbol("three".to_string()));
    /// ```
    pub fn parse_document(&mut self) -> Result<Vec<Value>> {
        let result = self.document();
        match &result {
            Ok(atoms) => debug!(atoms = atoms.len(), bytes = self.input.len(), "document parsed"),
            Err(err) => debug!(position = self.position(), error = %err, "document rejected"),
        }
        result
    }

    fn document(&mut self) -> Result<Vec<Value>> {
        let mut atoms = Vec::new();
        loop {
            self.lexer.skip_trivia()?;
            if self.lexer.is_eof() {
                return Ok(atoms);
            }
            let atom = self.parse_value()?;
            atoms.try_reserve(1)?;
            atoms.push(atom);
        }
    }

    /// Parses exactly one atom and requires the input to end after it.
    ///
    /// # Errors
    ///
    /// `UnexpectedEof` for an empty document, `UnexpectedToken` if a second atom follows.
    pub fn parse_single(&mut self) -> Result<Value> {
        let value = self.parse_value()?;
        self.lexer.skip_trivia()?;
        if !self.lexer.is_eof() {
            return Err(Error::unexpected_token(
                self.input,
                self.position(),
                "end of input",
                "another value",
            ));
        }
        Ok(value)
    }

    /// Parses the next atom.
    pub fn parse_value(&mut self) -> Result<Value> {
        let token = self.expect_token("a value")?;
        match token.kind {
            LexKind::Open => self.nested(token.start, Self::parse_object),
            LexKind::ArrayOpen => self.nested(token.start, Self::parse_array),
            LexKind::StringOpen => self.parse_string(),
            LexKind::Primitive => self.parse_primitive(token),
            LexKind::Symbol => Ok(Value::Symbol(owned(token.text(self.input))?)),
            LexKind::Close => Err(Error::unexpected_token(
                self.input,
                token.start,
                "a value",
                token.kind.describe(),
            )),
        }
    }

    fn expect_token(&mut self, expected: &str) -> Result<LexToken> {
        self.lexer
            .next_token()?
            .ok_or_else(|| Error::unexpected_eof(self.input, self.input.len(), expected))
    }

    /// Runs `rule` one nesting level deeper, enforcing the depth limit.
    fn nested(&mut self, at: usize, rule: fn(&mut Self) -> Result<Value>) -> Result<Value> {
        if self.depth >= self.options.max_depth {
            return Err(Error::recursion_limit(self.input, at, self.options.max_depth));
        }
        self.depth += 1;
        let result = rule(self);
        self.depth -= 1;
        result
    }

    /// `( (key atom)* )`, with the `(` already consumed.
    fn parse_object(&mut self) -> Result<Value> {
        let mut object = SedfMap::new();
        loop {
            let token = self.expect_token("a key or ')'")?;
            match token.kind {
                LexKind::Close => break,
                LexKind::Symbol => {
                    let key = owned(&token.text(self.input)[1..])?;
                    let value = self.parse_value()?;
                    object.try_reserve(1)?;
                    object.push(key, value);
                }
                _ => {
                    return Err(Error::unexpected_token(
                        self.input,
                        token.start,
                        "a key or ')'",
                        token.kind.describe(),
                    ))
                }
            }
        }
        trace!(pairs = object.len(), "object parsed");
        Ok(Value::Object(object))
    }

    /// `#( atom* )`, with the `#` already consumed.
    fn parse_array(&mut self) -> Result<Value> {
        match self.lexer.peek_byte() {
            Some(b'(') => self.lexer.bump(),
            Some(_) => {
                let at = self.position();
                let found: String = self.input[at..].chars().take(1).collect();
                return Err(Error::unexpected_token(
                    self.input,
                    at,
                    "'(' immediately after '#'",
                    &format!("{:?}", found),
                ));
            }
            None => return Err(Error::unexpected_eof(self.input, self.input.len(), "'('")),
        }

        let mut items = Vec::new();
        loop {
            self.lexer.skip_trivia()?;
            match self.lexer.peek_byte() {
                Some(b')') => {
                    self.lexer.bump();
                    break;
                }
                None => return Err(Error::unexpected_eof(self.input, self.input.len(), "')'")),
                Some(_) => {
                    let item = self.parse_value()?;
                    items.try_reserve(1)?;
                    items.push(item);
                }
            }
        }
        trace!(items = items.len(), "array parsed");
        Ok(Value::Array(items))
    }

    fn parse_string(&mut self) -> Result<Value> {
        let text = self.lexer.read_string()?;
        Ok(Value::String(owned(text)?))
    }

    fn parse_primitive(&self, token: LexToken) -> Result<Value> {
        let text = token.text(self.input);
        match text {
            "t" => Ok(Value::Bool(true)),
            "nil" => Ok(Value::Null),
            _ => match parse_hex(text).or_else(|| text.parse::<f64>().ok()) {
                Some(n) => Ok(Value::Number(n)),
                None => Ok(Value::Symbol(owned(text)?)),
            },
        }
    }
}

/// Reads a C-style hexadecimal number: `[+-]0x` digits, an optional `.` fraction
/// and an optional binary exponent `p[+-]N`. The whole token must match.
fn parse_hex(text: &str) -> Option<f64> {
    let (negative, rest) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let body = rest.strip_prefix("0x").or_else(|| rest.strip_prefix("0X"))?;
    let bytes = body.as_bytes();

    let mut mantissa = 0f64;
    let mut exponent: i64 = 0;
    let mut digits = 0usize;
    let mut i = 0;
    let mut seen_point = false;
    while i < bytes.len() {
        match bytes[i] {
            b'.' if !seen_point => seen_point = true,
            b => {
                let digit = match (b as char).to_digit(16) {
                    Some(d) => d,
                    None => break,
                };
                mantissa = mantissa * 16.0 + f64::from(digit);
                if seen_point {
                    exponent -= 4;
                }
                digits += 1;
            }
        }
        i += 1;
    }
    if digits == 0 {
        return None;
    }

    if i < bytes.len() {
        if !matches!(bytes[i], b'p' | b'P') {
            return None;
        }
        let power = &body[i + 1..];
        let unsigned = power.strip_prefix(|c: char| c == '+' || c == '-').unwrap_or(power);
        if unsigned.is_empty() || !unsigned.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let magnitude: i64 = unsigned.parse().unwrap_or(i64::from(i32::MAX));
        exponent = if power.starts_with('-') {
            exponent.saturating_sub(magnitude)
        } else {
            exponent.saturating_add(magnitude)
        };
    }

    let exponent = exponent.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32;
    let value = mantissa * 2f64.powi(exponent);
    Some(if negative { -value } else { value })
}

/// Copies `text` into a fresh `String`, reporting allocation failure.
fn owned(text: &str) -> Result<String> {
    let mut s = String::new();
    s.try_reserve_exact(text.len())?;
    s.push_str(text);
    Ok(s)
}
