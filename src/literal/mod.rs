//! Restricted parser for collection literals written in step text.
//!
//! Steps such as `the response JSON should have "colors" fields with array
//! "['red', 'green']" as value` carry an expected sequence inline. The parser
//! accepts exactly two shapes, `[a, b]` and `array(a, b)`, whose items are
//! scalars: quoted strings, numbers, `true`, `false`, and `null`. Nothing in
//! the input is ever executed.
//!
//! # Examples
//!
//! ```rust
//! use restapi_steps::literal::parse_literal;
//! use serde_json::json;
//!
//! let items = parse_literal("['red', 2, true]").expect("literal should parse");
//! assert_eq!(items, vec![json!("red"), json!(2), json!(true)]);
//! ```

use serde_json::{Number, Value};
use thiserror::Error;

/// Reasons a collection literal failed to parse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LiteralError {
    /// The text does not open with `[` or `array(`.
    #[error("expected '[' or 'array(' at offset {offset}")]
    NotACollection {
        /// Byte offset of the first non-blank character.
        offset: usize,
    },
    /// The input ended before the collection was closed.
    #[error("unexpected end of input; expected '{expected}'")]
    UnexpectedEnd {
        /// Closing delimiter that was still pending.
        expected: char,
    },
    /// A character that cannot start or continue an item.
    #[error("unexpected character '{found}' at offset {offset}")]
    UnexpectedChar {
        /// The offending character.
        found: char,
        /// Byte offset of the character.
        offset: usize,
    },
    /// A bare word other than `true`, `false`, or `null`.
    #[error("unsupported bare word '{word}' at offset {offset}")]
    UnsupportedWord {
        /// The rejected word.
        word: String,
        /// Byte offset where the word starts.
        offset: usize,
    },
    /// A numeric token that is not a finite number.
    #[error("invalid number '{text}' at offset {offset}")]
    InvalidNumber {
        /// The rejected token.
        text: String,
        /// Byte offset where the token starts.
        offset: usize,
    },
    /// A quoted string was not terminated.
    #[error("unterminated string starting at offset {offset}")]
    UnterminatedString {
        /// Byte offset of the opening quote.
        offset: usize,
    },
    /// Input continued after the closing delimiter.
    #[error("unexpected trailing input at offset {offset}")]
    TrailingInput {
        /// Byte offset of the first trailing character.
        offset: usize,
    },
}

/// Parse a collection literal into an ordered sequence of scalars.
///
/// # Errors
///
/// Returns [`LiteralError`] when the text is not a well-formed `[...]` or
/// `array(...)` literal of scalars.
pub fn parse_literal(text: &str) -> Result<Vec<Value>, LiteralError> {
    let mut cursor = Cursor::new(text);
    cursor.skip_blank();
    let close = cursor.open_collection()?;
    let items = cursor.items(close)?;
    cursor.skip_blank();
    if let Some((offset, _)) = cursor.peek() {
        return Err(LiteralError::TrailingInput { offset });
    }
    Ok(items)
}

/// Return `true` when `text` has the outer shape of a collection literal.
///
/// This is a cheap shape check used to decide whether a table value should
/// be parsed as a sequence or passed through placeholder substitution; it
/// does not validate the items.
#[must_use]
pub fn looks_like_collection(text: &str) -> bool {
    let trimmed = text.trim();
    if trimmed.starts_with('[') && trimmed.ends_with(']') {
        return true;
    }
    let lowered = trimmed.to_ascii_lowercase();
    lowered
        .strip_prefix("array")
        .map(str::trim_start)
        .is_some_and(|rest| rest.starts_with('(') && rest.ends_with(')'))
}

struct Cursor {
    chars: Vec<(usize, char)>,
    pos: usize,
}

impl Cursor {
    fn new(text: &str) -> Self {
        Self {
            chars: text.char_indices().collect(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<(usize, char)> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<(usize, char)> {
        let next = self.peek();
        if next.is_some() {
            self.pos += 1;
        }
        next
    }

    fn skip_blank(&mut self) {
        while self.peek().is_some_and(|(_, c)| c.is_whitespace()) {
            self.pos += 1;
        }
    }

    fn end_offset(&self) -> usize {
        self.chars
            .last()
            .map_or(0, |(offset, c)| offset + c.len_utf8())
    }

    fn open_collection(&mut self) -> Result<char, LiteralError> {
        let Some((offset, first)) = self.peek() else {
            return Err(LiteralError::NotACollection {
                offset: self.end_offset(),
            });
        };
        if first == '[' {
            self.pos += 1;
            return Ok(']');
        }
        if first.is_ascii_alphabetic() {
            let word = self.word();
            if word.eq_ignore_ascii_case("array") {
                self.skip_blank();
                if let Some((_, '(')) = self.peek() {
                    self.pos += 1;
                    return Ok(')');
                }
            }
        }
        Err(LiteralError::NotACollection { offset })
    }

    fn items(&mut self, close: char) -> Result<Vec<Value>, LiteralError> {
        let mut items = Vec::new();
        self.skip_blank();
        if self.peek().is_some_and(|(_, c)| c == close) {
            self.pos += 1;
            return Ok(items);
        }
        loop {
            self.skip_blank();
            items.push(self.scalar(close)?);
            self.skip_blank();
            match self.bump() {
                Some((_, c)) if c == close => return Ok(items),
                Some((_, ',')) => {
                    self.skip_blank();
                    if self.peek().is_some_and(|(_, c)| c == close) {
                        self.pos += 1;
                        return Ok(items);
                    }
                }
                Some((offset, found)) => {
                    return Err(LiteralError::UnexpectedChar { found, offset });
                }
                None => return Err(LiteralError::UnexpectedEnd { expected: close }),
            }
        }
    }

    fn scalar(&mut self, close: char) -> Result<Value, LiteralError> {
        match self.peek() {
            None => Err(LiteralError::UnexpectedEnd { expected: close }),
            Some((offset, quote @ ('\'' | '"'))) => {
                self.pos += 1;
                self.quoted(quote, offset).map(Value::String)
            }
            Some((offset, c)) if c == '-' || c == '+' || c == '.' || c.is_ascii_digit() => {
                self.number(offset)
            }
            Some((offset, c)) if c.is_ascii_alphabetic() => {
                let word = self.word();
                match word.to_ascii_lowercase().as_str() {
                    "true" => Ok(Value::Bool(true)),
                    "false" => Ok(Value::Bool(false)),
                    "null" => Ok(Value::Null),
                    _ => Err(LiteralError::UnsupportedWord { word, offset }),
                }
            }
            Some((offset, found)) => Err(LiteralError::UnexpectedChar { found, offset }),
        }
    }

    fn quoted(&mut self, quote: char, start: usize) -> Result<String, LiteralError> {
        let mut out = String::new();
        loop {
            match self.bump() {
                None => return Err(LiteralError::UnterminatedString { offset: start }),
                Some((_, c)) if c == quote => return Ok(out),
                Some((_, '\\')) => match self.peek() {
                    Some((_, next)) if next == quote || next == '\\' => {
                        self.pos += 1;
                        out.push(next);
                    }
                    _ => out.push('\\'),
                },
                Some((_, c)) => out.push(c),
            }
        }
    }

    fn number(&mut self, start: usize) -> Result<Value, LiteralError> {
        let mut token = String::new();
        while let Some((_, c)) = self.peek() {
            if c.is_ascii_digit() || matches!(c, '-' | '+' | '.' | 'e' | 'E') {
                token.push(c);
                self.pos += 1;
            } else {
                break;
            }
        }
        parse_number(&token).ok_or(LiteralError::InvalidNumber {
            text: token,
            offset: start,
        })
    }

    fn word(&mut self) -> String {
        let mut word = String::new();
        while let Some((_, c)) = self.peek() {
            if c.is_ascii_alphanumeric() || c == '_' {
                word.push(c);
                self.pos += 1;
            } else {
                break;
            }
        }
        word
    }
}

fn parse_number(token: &str) -> Option<Value> {
    let unsigned = token.strip_prefix('+').unwrap_or(token);
    if !unsigned.contains(['.', 'e', 'E']) {
        if let Ok(int) = unsigned.parse::<i64>() {
            return Some(Value::from(int));
        }
        if let Ok(big) = unsigned.parse::<u64>() {
            return Some(Value::from(big));
        }
    }
    unsigned
        .parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map(Value::Number)
}
