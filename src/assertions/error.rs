//! Failure taxonomy raised by the assertion engine.
//!
//! Every variant carries the context needed to render a precise diagnostic:
//! the property or path under test, the expected value or pattern, and the
//! actual value rendered as text.
//!
//! This submodule isolates derive-macro-affected code to scope lint
//! suppressions narrowly. The `unused_assignments` lint fires in some Rust
//! versions due to thiserror/miette derive macro expansion.

// FIXME(rust-lang/rust#130021): remove once upstream is fixed.
#![allow(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    unused_assignments
)]

use miette::Diagnostic;
use thiserror::Error;

/// Errors raised when a response document fails an assertion.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum AssertionError {
    /// The response body is not valid JSON, or decodes to `null`.
    #[error("Expected response with type JSON")]
    #[diagnostic(code(restapi_steps::assertion::json_expected))]
    JsonExpected,

    /// The node under test is not an array.
    #[error("Expected response JSON with collection")]
    #[diagnostic(code(restapi_steps::assertion::collection_expected))]
    CollectionExpected,

    /// The node under test is not an object.
    #[error("Expected response JSON with single object")]
    #[diagnostic(code(restapi_steps::assertion::single_object_expected))]
    SingleObjectExpected,

    /// A required key or path segment is absent or `null`.
    #[error("JSON should have property: {property}")]
    #[diagnostic(code(restapi_steps::assertion::property_not_found))]
    PropertyNotFound {
        /// Property name or the whole arrow-delimited path.
        property: String,
    },

    /// The property exists but does not satisfy the comparison.
    #[error("JSON '{property}' property should have value: '{expected}', actual: '{actual}'")]
    #[diagnostic(code(restapi_steps::assertion::incorrect_value))]
    IncorrectValue {
        /// Property name or path.
        property: String,
        /// Expected value, pattern, or token as written in the step.
        expected: String,
        /// Actual value rendered as text.
        actual: String,
    },

    /// A collection literal could not be parsed into a sequence.
    #[error("JSON '{property}' property should have array value: '{literal}', actual: '{actual}'")]
    #[diagnostic(
        code(restapi_steps::assertion::array_expected),
        help("write the expected value as ['a', 'b'] or array('a', 'b')")
    )]
    ArrayExpected {
        /// Property name.
        property: String,
        /// Literal text that failed to parse.
        literal: String,
        /// Actual value rendered as text.
        actual: String,
    },

    /// A collection that must be non-empty for an "all items" check is empty.
    #[error("{}", empty_collection_message(.field.as_deref()))]
    #[diagnostic(code(restapi_steps::assertion::empty_collection))]
    EmptyCollection {
        /// Nested collection field, when the check targeted one.
        field: Option<String>,
    },

    /// The item count differs from the expected count.
    #[error("Collection has the wrong number of items: expected {expected}, actual {actual}")]
    #[diagnostic(code(restapi_steps::assertion::wrong_collection_count))]
    WrongCollectionCount {
        /// Expected number of items.
        expected: usize,
        /// Actual number of items.
        actual: usize,
    },

    /// The collection is empty when it should not be, or the other way round.
    #[error("{}", emptiness_message(.expected_empty, .actual_count))]
    #[diagnostic(code(restapi_steps::assertion::emptiness_mismatch))]
    EmptinessMismatch {
        /// Whether the step expected an empty collection.
        expected_empty: bool,
        /// Number of items actually present.
        actual_count: usize,
    },

    /// The last response carries a different status code.
    #[error("Response status code should be {expected}, actual: {actual}")]
    #[diagnostic(code(restapi_steps::assertion::unexpected_status))]
    UnexpectedStatus {
        /// Status code named in the step.
        expected: u16,
        /// Status code of the last response.
        actual: u16,
    },

    /// A regex-like expectation did not compile.
    #[error("Invalid regular expression '{pattern}': {reason}")]
    #[diagnostic(
        code(restapi_steps::assertion::invalid_pattern),
        help("patterns may be bare (^abc$) or delimited with flags (/abc/i)")
    )]
    InvalidPattern {
        /// Pattern text as written in the step.
        pattern: String,
        /// Compiler error message.
        reason: String,
    },
}

fn empty_collection_message(field: Option<&str>) -> String {
    field.map_or_else(
        || String::from("Collection should not be empty"),
        |name| format!("Collection '{name}' should not be empty"),
    )
}

#[expect(
    clippy::trivially_copy_pass_by_ref,
    reason = "thiserror hands formatting helpers references to fields"
)]
fn emptiness_message(expected_empty: &bool, actual_count: &usize) -> String {
    if *expected_empty {
        format!("Collection should be empty, actual: {actual_count} items")
    } else {
        String::from("Collection should not be empty")
    }
}

impl AssertionError {
    pub(crate) fn not_found(property: impl Into<String>) -> Self {
        Self::PropertyNotFound {
            property: property.into(),
        }
    }

    pub(crate) fn incorrect(
        property: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::IncorrectValue {
            property: property.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }
}
