//! Header bookkeeping.
//!
//! Steps name headers the way they appear on the wire (`Content-Type`,
//! `X-Api-Key`). Clients receive them in server-variable form instead:
//! upper-cased, dashes replaced by underscores, and prefixed with `HTTP_`
//! unless the name is one of [`UNPREFIXED_HEADERS`].

use indexmap::IndexMap;
use itertools::Itertools;

/// Server-variable names that keep no `HTTP_` prefix.
pub const UNPREFIXED_HEADERS: [&str; 2] = ["CONTENT_TYPE", "CONTENT_LENGTH"];

const SERVER_PREFIX: &str = "HTTP_";

/// Convert a wire header name into its server-variable form.
///
/// # Examples
///
/// ```rust
/// use restapi_steps::http::server_name;
///
/// assert_eq!(server_name("x-api-key"), "HTTP_X_API_KEY");
/// assert_eq!(server_name("Content-Type"), "CONTENT_TYPE");
/// ```
#[must_use]
pub fn server_name(name: &str) -> String {
    let upper = name.trim().replace('-', "_").to_ascii_uppercase();
    if UNPREFIXED_HEADERS.contains(&upper.as_str()) {
        upper
    } else {
        format!("{SERVER_PREFIX}{upper}")
    }
}

/// Convert a server-variable name back to a wire header name.
///
/// `HTTP_X_API_KEY` becomes `X-Api-Key`; `CONTENT_TYPE` becomes
/// `Content-Type`.
#[must_use]
pub fn wire_name(server: &str) -> String {
    server
        .strip_prefix(SERVER_PREFIX)
        .unwrap_or(server)
        .split('_')
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                let mut out = first.to_ascii_uppercase().to_string();
                out.push_str(&chars.as_str().to_ascii_lowercase());
                out
            })
        })
        .join("-")
}

/// Ordered set of headers keyed by their wire names.
///
/// Names differing only in case or in `-`/`_` spelling refer to the same
/// header; setting one replaces the other.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderSet {
    entries: IndexMap<String, String>,
}

impl HeaderSet {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `name` to `value`, replacing any equivalent name.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let key = name.into();
        self.remove(&key);
        self.entries.insert(key, value.into());
    }

    /// Remove `name` and any equivalent spelling. Returns the removed value.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        let target = server_name(name);
        let found = self
            .entries
            .keys()
            .position(|key| server_name(key) == target)?;
        self.entries
            .shift_remove_index(found)
            .map(|(_, value)| value)
    }

    /// Value stored for `name` or an equivalent spelling.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        let target = server_name(name);
        self.entries
            .iter()
            .find(|(key, _)| server_name(key) == target)
            .map(|(_, value)| value.as_str())
    }

    /// Iterate over `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Number of headers in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the set holds no headers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for HeaderSet
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut set = Self::new();
        for (name, value) in iter {
            set.set(name, value);
        }
        set
    }
}

/// Headers in server-variable form, as handed to an [`HttpClient`].
///
/// [`HttpClient`]: super::HttpClient
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerHeaders {
    entries: IndexMap<String, String>,
}

impl ServerHeaders {
    /// Value stored under the server-variable `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    /// Iterate over `(server_name, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Iterate over `(wire_name, value)` pairs.
    pub fn wire_headers(&self) -> impl Iterator<Item = (String, &str)> {
        self.iter().map(|(name, value)| (wire_name(name), value))
    }

    /// Number of headers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no headers are present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Merge `request` over `persistent` and normalise every name.
///
/// Request headers win when both sets name the same header.
///
/// # Examples
///
/// ```rust
/// use restapi_steps::http::{HeaderSet, server_headers};
///
/// let persistent: HeaderSet = [("Accept", "text/plain")].into_iter().collect();
/// let request: HeaderSet = [("accept", "application/json")].into_iter().collect();
/// let merged = server_headers(&persistent, &request);
/// assert_eq!(merged.get("HTTP_ACCEPT"), Some("application/json"));
/// ```
#[must_use]
pub fn server_headers(persistent: &HeaderSet, request: &HeaderSet) -> ServerHeaders {
    let entries = persistent
        .iter()
        .chain(request.iter())
        .map(|(name, value)| (server_name(name), value.to_owned()))
        .collect();
    ServerHeaders { entries }
}
