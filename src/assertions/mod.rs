//! JSON assertion engine.
//!
//! Every assertion is a pure function of a document subtree and an
//! expectation: it either returns `Ok(())` or a typed [`AssertionError`]
//! describing the property, the expectation, and what was actually found.
//! Nothing here performs I/O or keeps state between calls.
//!
//! # Examples
//!
//! ```rust
//! use restapi_steps::assertions::{self, CompareMode};
//! use serde_json::json;
//!
//! let doc = json!({"id": 42, "name": "Ann", "active": true});
//! assertions::has_property(&doc, "name").expect("name is present");
//! assertions::has_property_with_boolean(&doc, "active", "true").expect("active");
//! assertions::has_property_with_value(&doc, "id", &json!("42"), CompareMode::Loose)
//!     .expect("loose comparison coerces the numeric string");
//! assert!(
//!     assertions::has_property_with_value(&doc, "id", &json!("42"), CompareMode::Exact)
//!         .is_err()
//! );
//! ```

mod collection;
mod compare;
mod error;
mod nested;

pub use collection::{
    all_items_have_boolean, all_items_have_nested_value, all_items_have_property,
    all_items_have_value, all_nested_items_have_boolean, all_nested_items_have_nested_value,
    all_nested_items_have_property, all_nested_items_have_value, at_least_one_item_has_value,
    collection_is_empty, collection_is_not_empty, collection_item_count, field_is_collection,
    is_collection, is_single_object,
};
pub use compare::{CompareMode, compare, compile_pattern, loose_eq, render};
pub use error::AssertionError;
pub use nested::{PATH_DELIMITER, PropertyPath, first_value};

use serde_json::Value;
use tracing::debug;

use crate::literal::parse_literal;

/// Token that coerces to `true`; any other token coerces to `false`.
pub const TRUE_TOKEN: &str = "true";

/// Coerce a step token into the boolean it denotes.
#[must_use]
pub fn expected_boolean(token: &str) -> bool {
    token == TRUE_TOKEN
}

/// Return the value stored under `property`, treating `null` as absent.
///
/// # Errors
///
/// Returns [`AssertionError::PropertyNotFound`] when `document` is not an
/// object, or the key is missing or `null`.
pub fn property_value<'a>(document: &'a Value, property: &str) -> Result<&'a Value, AssertionError> {
    document
        .as_object()
        .and_then(|fields| fields.get(property))
        .filter(|value| !value.is_null())
        .ok_or_else(|| AssertionError::not_found(property))
}

/// Assert that `document` is an object holding a non-null `property`.
///
/// # Errors
///
/// Returns [`AssertionError::PropertyNotFound`] otherwise.
pub fn has_property(document: &Value, property: &str) -> Result<(), AssertionError> {
    property_value(document, property).map(|_| ())
}

/// Assert that `property` exists and compares equal to `expected` under
/// `mode`.
///
/// # Errors
///
/// Returns [`AssertionError::PropertyNotFound`] when the property is absent,
/// [`AssertionError::IncorrectValue`] on mismatch, and
/// [`AssertionError::InvalidPattern`] when a regex-like expectation does not
/// compile.
pub fn has_property_with_value(
    document: &Value,
    property: &str,
    expected: &Value,
    mode: CompareMode,
) -> Result<(), AssertionError> {
    let actual = property_value(document, property)?;
    compare(property, actual, expected, mode)
}

/// Assert that `property` holds exactly the boolean `token` denotes.
///
/// # Errors
///
/// Returns [`AssertionError::PropertyNotFound`] when the property is absent,
/// or [`AssertionError::IncorrectValue`] with the actual value rendered as
/// `"true"` or `"false"`.
pub fn has_property_with_boolean(
    document: &Value,
    property: &str,
    token: &str,
) -> Result<(), AssertionError> {
    let expected = expected_boolean(token);
    let actual = property_value(document, property)?;
    if actual.as_bool() == Some(expected) {
        return Ok(());
    }
    let rendered = if actual.as_bool() == Some(true) {
        "true"
    } else {
        "false"
    };
    Err(AssertionError::incorrect(property, token, rendered))
}

/// Assert that `property` is identical to the sequence written in
/// `literal`.
///
/// # Errors
///
/// Returns [`AssertionError::PropertyNotFound`] when the property is absent,
/// [`AssertionError::ArrayExpected`] when the literal is not a sequence, and
/// [`AssertionError::IncorrectValue`] when the sequences differ in order,
/// type, or value.
pub fn has_property_with_array_value(
    document: &Value,
    property: &str,
    literal: &str,
) -> Result<(), AssertionError> {
    let actual = property_value(document, property)?;
    let items = parse_literal(literal).map_err(|err| {
        debug!(property, literal, error = %err, "collection literal rejected");
        AssertionError::ArrayExpected {
            property: property.to_owned(),
            literal: literal.to_owned(),
            actual: render(actual),
        }
    })?;
    let expected = Value::Array(items);
    if *actual == expected {
        Ok(())
    } else {
        Err(AssertionError::incorrect(
            property,
            render(&expected),
            render(actual),
        ))
    }
}

/// Walk `path` through `document`, then compare the first value of the final
/// node with `expected`.
///
/// # Errors
///
/// Returns [`AssertionError::PropertyNotFound`] with the whole path when a
/// segment is missing, and [`AssertionError::IncorrectValue`] when the
/// extracted value differs or the final node is empty.
pub fn has_nested_property_with_value(
    document: &Value,
    path: &str,
    expected: &Value,
    mode: CompareMode,
) -> Result<(), AssertionError> {
    let walk = PropertyPath::parse(path);
    let node = walk.resolve(document)?;
    let Some(actual) = first_value(node) else {
        return Err(AssertionError::incorrect(path, render(expected), ""));
    };
    compare(path, actual, expected, mode)
}
