//! Collection classification and the bulk "all items" / "at least one"
//! assertions.

use itertools::Itertools;
use serde_json::Value;

use super::{
    AssertionError, CompareMode, has_nested_property_with_value, has_property,
    has_property_with_boolean, has_property_with_value, property_value, render,
};

fn items(node: &Value) -> Result<&[Value], AssertionError> {
    node.as_array()
        .map(Vec::as_slice)
        .ok_or(AssertionError::CollectionExpected)
}

/// Assert that `document` is an array.
///
/// # Errors
///
/// Returns [`AssertionError::CollectionExpected`] otherwise.
pub fn is_collection(document: &Value) -> Result<(), AssertionError> {
    items(document).map(|_| ())
}

/// Assert that `document` is an object.
///
/// # Errors
///
/// Returns [`AssertionError::SingleObjectExpected`] otherwise.
pub fn is_single_object(document: &Value) -> Result<(), AssertionError> {
    if document.is_object() {
        Ok(())
    } else {
        Err(AssertionError::SingleObjectExpected)
    }
}

/// Assert that `document[field]` is an array.
///
/// # Errors
///
/// Returns [`AssertionError::CollectionExpected`] when the field is absent
/// or not an array.
pub fn field_is_collection(document: &Value, field: &str) -> Result<(), AssertionError> {
    document
        .get(field)
        .ok_or(AssertionError::CollectionExpected)
        .and_then(items)
        .map(|_| ())
}

/// Assert that the collection holds exactly `expected` items.
///
/// # Errors
///
/// Returns [`AssertionError::CollectionExpected`] for non-arrays and
/// [`AssertionError::WrongCollectionCount`] on a count mismatch.
pub fn collection_item_count(document: &Value, expected: usize) -> Result<(), AssertionError> {
    let actual = items(document)?.len();
    if actual == expected {
        Ok(())
    } else {
        Err(AssertionError::WrongCollectionCount { expected, actual })
    }
}

fn emptiness(document: &Value, expected_empty: bool) -> Result<(), AssertionError> {
    let actual_count = items(document)?.len();
    if (actual_count == 0) == expected_empty {
        Ok(())
    } else {
        Err(AssertionError::EmptinessMismatch {
            expected_empty,
            actual_count,
        })
    }
}

/// Assert that the collection has no items.
///
/// # Errors
///
/// Returns [`AssertionError::CollectionExpected`] for non-arrays and
/// [`AssertionError::EmptinessMismatch`] when items are present.
pub fn collection_is_empty(document: &Value) -> Result<(), AssertionError> {
    emptiness(document, true)
}

/// Assert that the collection has at least one item.
///
/// # Errors
///
/// Returns [`AssertionError::CollectionExpected`] for non-arrays and
/// [`AssertionError::EmptinessMismatch`] when it is empty.
pub fn collection_is_not_empty(document: &Value) -> Result<(), AssertionError> {
    emptiness(document, false)
}

/// Values that count as "empty" when gating a nested collection: missing,
/// `null`, `false`, zero, `""`, `"0"`, and `[]`. Objects are never empty.
fn is_empty_like(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null | Value::Bool(false)) => true,
        Some(Value::Number(number)) => number.as_f64().is_some_and(|n| n == 0.0),
        Some(Value::String(text)) => text.is_empty() || text == "0",
        Some(Value::Array(list)) => list.is_empty(),
        Some(Value::Bool(true) | Value::Object(_)) => false,
    }
}

fn gated_top_level(document: &Value) -> Result<&[Value], AssertionError> {
    let list = items(document)?;
    if list.is_empty() {
        return Err(AssertionError::EmptyCollection { field: None });
    }
    Ok(list)
}

fn gated_nested<'a>(document: &'a Value, field: &str) -> Result<&'a [Value], AssertionError> {
    let node = document.get(field);
    if is_empty_like(node) {
        return Err(AssertionError::EmptyCollection {
            field: Some(field.to_owned()),
        });
    }
    node.map_or(Err(AssertionError::CollectionExpected), items)
}

fn each(
    list: &[Value],
    check: impl Fn(&Value) -> Result<(), AssertionError>,
) -> Result<(), AssertionError> {
    list.iter().try_for_each(check)
}

/// Assert that every item of the top-level collection has `property`.
///
/// An empty collection passes.
///
/// # Errors
///
/// Returns the first item failure, or [`AssertionError::CollectionExpected`].
pub fn all_items_have_property(document: &Value, property: &str) -> Result<(), AssertionError> {
    each(items(document)?, |item| has_property(item, property))
}

/// Assert that every item's `property` compares equal to `expected`.
///
/// An empty collection passes.
///
/// # Errors
///
/// Returns the first item failure, or [`AssertionError::CollectionExpected`].
pub fn all_items_have_value(
    document: &Value,
    property: &str,
    expected: &Value,
    mode: CompareMode,
) -> Result<(), AssertionError> {
    each(items(document)?, |item| {
        has_property_with_value(item, property, expected, mode)
    })
}

/// Assert the nested-path comparison for every item.
///
/// An empty collection passes.
///
/// # Errors
///
/// Returns the first item failure, or [`AssertionError::CollectionExpected`].
pub fn all_items_have_nested_value(
    document: &Value,
    path: &str,
    expected: &Value,
    mode: CompareMode,
) -> Result<(), AssertionError> {
    each(items(document)?, |item| {
        has_nested_property_with_value(item, path, expected, mode)
    })
}

/// Assert that every item's `property` is the boolean `token` denotes.
///
/// # Errors
///
/// Returns [`AssertionError::EmptyCollection`] for an empty collection,
/// otherwise the first item failure.
pub fn all_items_have_boolean(
    document: &Value,
    property: &str,
    token: &str,
) -> Result<(), AssertionError> {
    each(gated_top_level(document)?, |item| {
        has_property_with_boolean(item, property, token)
    })
}

/// Assert that every item of `document[field]` has `property`.
///
/// # Errors
///
/// Returns [`AssertionError::EmptyCollection`] naming `field` when the field
/// is missing or empty, otherwise the first item failure.
pub fn all_nested_items_have_property(
    document: &Value,
    field: &str,
    property: &str,
) -> Result<(), AssertionError> {
    each(gated_nested(document, field)?, |item| {
        has_property(item, property)
    })
}

/// Assert that every item of `document[field]` has `property` equal to
/// `expected`.
///
/// # Errors
///
/// Returns [`AssertionError::EmptyCollection`] naming `field` when the field
/// is missing or empty, otherwise the first item failure.
pub fn all_nested_items_have_value(
    document: &Value,
    field: &str,
    property: &str,
    expected: &Value,
    mode: CompareMode,
) -> Result<(), AssertionError> {
    each(gated_nested(document, field)?, |item| {
        has_property_with_value(item, property, expected, mode)
    })
}

/// Assert the nested-path comparison for every item of `document[field]`.
///
/// # Errors
///
/// Returns [`AssertionError::EmptyCollection`] naming `field` when the field
/// is missing or empty, otherwise the first item failure.
pub fn all_nested_items_have_nested_value(
    document: &Value,
    field: &str,
    path: &str,
    expected: &Value,
    mode: CompareMode,
) -> Result<(), AssertionError> {
    each(gated_nested(document, field)?, |item| {
        has_nested_property_with_value(item, path, expected, mode)
    })
}

/// Assert that every item of `document[field]` has the boolean `token`
/// denotes under `property`.
///
/// # Errors
///
/// Returns [`AssertionError::EmptyCollection`] naming `field` when the field
/// is missing or empty, otherwise the first item failure.
pub fn all_nested_items_have_boolean(
    document: &Value,
    field: &str,
    property: &str,
    token: &str,
) -> Result<(), AssertionError> {
    each(gated_nested(document, field)?, |item| {
        has_property_with_boolean(item, property, token)
    })
}

/// Assert that some item's `property` compares equal to `expected`,
/// stopping at the first match.
///
/// # Errors
///
/// Returns [`AssertionError::EmptyCollection`] for an empty collection and
/// [`AssertionError::IncorrectValue`] listing the values seen when nothing
/// matches. Invalid regex patterns surface immediately.
pub fn at_least_one_item_has_value(
    document: &Value,
    property: &str,
    expected: &Value,
    mode: CompareMode,
) -> Result<(), AssertionError> {
    let list = gated_top_level(document)?;
    for item in list {
        match has_property_with_value(item, property, expected, mode) {
            Ok(()) => return Ok(()),
            Err(err @ AssertionError::InvalidPattern { .. }) => return Err(err),
            Err(_) => {}
        }
    }
    let seen = list
        .iter()
        .filter_map(|item| property_value(item, property).ok())
        .map(render)
        .join(", ");
    Err(AssertionError::incorrect(
        property,
        render(expected),
        format!("[{seen}]"),
    ))
}
