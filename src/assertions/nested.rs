//! Arrow-delimited path traversal.
//!
//! A path such as `owner->address->city` is walked one segment at a time.
//! Every level is treated as a map: objects by key, arrays by decimal index,
//! and a scalar as a one-element map whose only key is `0`. Once the walk
//! ends, the final node is re-entered as a map and its first value is the
//! one compared, so `{"owner": {"name": "John"}}` with `owner->name`
//! compares `"John"`, while a path ending on an object compares that
//! object's first field.

use serde_json::Value;

use super::AssertionError;

/// Literal delimiter separating path segments.
pub const PATH_DELIMITER: &str = "->";

/// An ordered, non-empty sequence of path segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyPath {
    raw: String,
    segments: Vec<String>,
}

impl PropertyPath {
    /// Split `raw` on [`PATH_DELIMITER`].
    ///
    /// Splitting always yields at least one segment, so a path without
    /// delimiters is a single-segment path.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use restapi_steps::assertions::PropertyPath;
    ///
    /// let path = PropertyPath::parse("owner->name");
    /// assert_eq!(path.segments(), ["owner", "name"]);
    /// ```
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        Self {
            raw: raw.to_owned(),
            segments: raw.split(PATH_DELIMITER).map(str::to_owned).collect(),
        }
    }

    /// The path as written in the step.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The individual segments in traversal order.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Walk `document` along the path and return the node the last segment
    /// names.
    ///
    /// # Errors
    ///
    /// Returns [`AssertionError::PropertyNotFound`] carrying the whole path
    /// when any segment is absent or `null`.
    pub fn resolve<'a>(&self, document: &'a Value) -> Result<&'a Value, AssertionError> {
        self.segments.iter().try_fold(document, |node, segment| {
            entry(node, segment).ok_or_else(|| AssertionError::not_found(self.raw.as_str()))
        })
    }
}

/// Look up `segment` in `node` viewed as a map; `null` entries count as
/// absent.
fn entry<'a>(node: &'a Value, segment: &str) -> Option<&'a Value> {
    let found = match node {
        Value::Object(fields) => fields.get(segment),
        Value::Array(items) => index(segment).and_then(|i| items.get(i)),
        Value::Null => None,
        scalar => (segment == "0").then_some(scalar),
    };
    found.filter(|value| !value.is_null())
}

/// Parse a canonical decimal index: `0`, or digits without a leading zero.
fn index(segment: &str) -> Option<usize> {
    let canonical = segment == "0"
        || (!segment.starts_with('0')
            && !segment.is_empty()
            && segment.bytes().all(|b| b.is_ascii_digit()));
    if !canonical {
        return None;
    }
    segment.parse().ok()
}

/// Re-enter `node` as a map and return its first value in declaration order.
///
/// Scalars yield themselves; empty containers and `null` have no first
/// value.
#[must_use]
pub fn first_value(node: &Value) -> Option<&Value> {
    match node {
        Value::Object(fields) => fields.values().next(),
        Value::Array(items) => items.first(),
        Value::Null => None,
        scalar => Some(scalar),
    }
}
