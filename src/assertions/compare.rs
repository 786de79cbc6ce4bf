//! Value comparison under the engine's three modes.
//!
//! Loose equality follows the coercion rules API test authors expect from
//! dynamically typed backends: numeric strings equal numbers, booleans
//! compare by truthiness, and `null` equals empty values.

use regex::{Regex, RegexBuilder};
use serde_json::{Map, Number, Value};

use super::AssertionError;

/// How an expected value is compared with the value found in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompareMode {
    /// Compare after implicit type coercion (`"1"` equals `1`).
    #[default]
    Loose,
    /// Type and value must both match.
    Exact,
    /// The expected value is a regular expression the actual value must match.
    RegexLike,
}

/// Render a JSON value for diagnostics: strings verbatim, everything else as
/// compact JSON.
#[must_use]
pub fn render(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Loose equality between two JSON values.
#[must_use]
pub fn loose_eq(actual: &Value, expected: &Value) -> bool {
    match (actual, expected) {
        (Value::Null, Value::Null) => true,
        (Value::Null, Value::String(text)) | (Value::String(text), Value::Null) => text.is_empty(),
        (Value::Null, other) | (other, Value::Null) => !truthy(other),
        (Value::Bool(flag), other) | (other, Value::Bool(flag)) => *flag == truthy(other),
        (Value::Number(left), Value::Number(right)) => numbers_eq(left, right),
        (Value::Number(number), Value::String(text))
        | (Value::String(text), Value::Number(number)) => numeric_string(text).map_or_else(
            || number.to_string() == *text,
            |parsed| numbers_eq(number, &parsed),
        ),
        (Value::String(left), Value::String(right)) => {
            match (numeric_string(left), numeric_string(right)) {
                (Some(l), Some(r)) => numbers_eq(&l, &r),
                _ => left == right,
            }
        }
        (Value::Array(left), Value::Array(right)) => {
            left.len() == right.len() && left.iter().zip(right).all(|(l, r)| loose_eq(l, r))
        }
        (Value::Object(left), Value::Object(right)) => objects_loose_eq(left, right),
        _ => false,
    }
}

fn objects_loose_eq(left: &Map<String, Value>, right: &Map<String, Value>) -> bool {
    left.len() == right.len()
        && left
            .iter()
            .all(|(key, value)| right.get(key).is_some_and(|other| loose_eq(value, other)))
}

/// Truthiness used when a boolean meets another type.
fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !(text.is_empty() || text == "0"),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
    }
}

#[expect(
    clippy::float_cmp,
    reason = "loose equality compares numeric values exactly, like the backends it mirrors"
)]
fn numbers_eq(left: &Number, right: &Number) -> bool {
    if let (Some(l), Some(r)) = (left.as_i64(), right.as_i64()) {
        return l == r;
    }
    if let (Some(l), Some(r)) = (left.as_u64(), right.as_u64()) {
        return l == r;
    }
    match (left.as_f64(), right.as_f64()) {
        (Some(l), Some(r)) => l == r,
        _ => false,
    }
}

/// Parse a numeric string (optional surrounding whitespace, sign, digits,
/// fraction, exponent). Hex, `inf`, and `nan` are not numeric.
fn numeric_string(text: &str) -> Option<Number> {
    let trimmed = text.trim();
    let body = trimmed.strip_prefix(['+', '-']).unwrap_or(trimmed);
    let starts_well = body
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_digit() || c == '.');
    if !starts_well
        || !body
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'))
    {
        return None;
    }
    let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
    if let Ok(int) = unsigned.parse::<i64>() {
        return Some(Number::from(int));
    }
    unsigned.parse::<f64>().ok().and_then(Number::from_f64)
}

/// Compile a regex-like expectation.
///
/// Bare patterns are used as written. A pattern wrapped in `/…/` may carry
/// trailing flags (`i`, `m`, `s`, `x`, `u`).
///
/// # Errors
///
/// Returns [`AssertionError::InvalidPattern`] when the pattern does not
/// compile or carries an unknown flag.
pub fn compile_pattern(pattern: &str) -> Result<Regex, AssertionError> {
    let invalid = |reason: String| AssertionError::InvalidPattern {
        pattern: pattern.to_owned(),
        reason,
    };
    let (body, flags) = split_delimited(pattern).unwrap_or((pattern, ""));
    let mut builder = RegexBuilder::new(body);
    for flag in flags.chars() {
        match flag {
            'i' => builder.case_insensitive(true),
            'm' => builder.multi_line(true),
            's' => builder.dot_matches_new_line(true),
            'x' => builder.ignore_whitespace(true),
            'u' => builder.unicode(true),
            other => return Err(invalid(format!("unsupported flag '{other}'"))),
        };
    }
    builder.build().map_err(|err| invalid(err.to_string()))
}

fn split_delimited(pattern: &str) -> Option<(&str, &str)> {
    let rest = pattern.strip_prefix('/')?;
    let end = rest.rfind('/')?;
    let body = rest.get(..end)?;
    let flags = rest.get(end + 1..)?;
    flags
        .chars()
        .all(|c| matches!(c, 'i' | 'm' | 's' | 'x' | 'u'))
        .then_some((body, flags))
}

/// Compare `actual` with `expected` under `mode`, reporting failures against
/// `property`.
///
/// # Errors
///
/// Returns [`AssertionError::IncorrectValue`] on mismatch, or
/// [`AssertionError::InvalidPattern`] for an uncompilable regex.
pub fn compare(
    property: &str,
    actual: &Value,
    expected: &Value,
    mode: CompareMode,
) -> Result<(), AssertionError> {
    let matched = match mode {
        CompareMode::Loose => loose_eq(actual, expected),
        CompareMode::Exact => actual == expected,
        CompareMode::RegexLike => {
            let regex = compile_pattern(&render(expected))?;
            regex.is_match(&render(actual))
        }
    };
    if matched {
        Ok(())
    } else {
        Err(AssertionError::incorrect(
            property,
            render(expected),
            render(actual),
        ))
    }
}
