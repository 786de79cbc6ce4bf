//! Placeholder substitution for step arguments.
//!
//! Step text may reference values stored earlier in a scenario using
//! `%name%` tokens. The [`Substitutor`] trait lets a host plug in its own
//! resolver; [`ParameterBag`] is the in-memory implementation the context
//! uses by default.

use indexmap::IndexMap;

/// Resolves named placeholders inside step arguments.
pub trait Substitutor {
    /// Return `text` with every known placeholder replaced.
    fn replace(&self, text: &str) -> String;
}

/// Delimiter surrounding placeholder names.
pub const TOKEN_DELIMITER: char = '%';

/// Ordered key/value store backing `%name%` substitution.
///
/// # Examples
///
/// ```rust
/// use restapi_steps::params::{ParameterBag, Substitutor};
///
/// let mut bag = ParameterBag::default();
/// bag.set("id", "42");
/// assert_eq!(bag.replace("/users/%id%/posts/%page%"), "/users/42/posts/%page%");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterBag {
    values: IndexMap<String, String>,
}

impl ParameterBag {
    /// Store `value` under `name`, replacing any earlier value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    /// Value stored under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Remove `name`, returning its value.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.values.shift_remove(name)
    }

    /// Whether no values are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for ParameterBag
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }
}

impl Substitutor for ParameterBag {
    fn replace(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut rest = text;
        while let Some((head, tail)) = rest.split_once(TOKEN_DELIMITER) {
            out.push_str(head);
            let Some((name, after)) = tail.split_once(TOKEN_DELIMITER) else {
                out.push(TOKEN_DELIMITER);
                out.push_str(tail);
                return out;
            };
            if let Some(value) = self.get(name) {
                out.push_str(value);
                rest = after;
            } else {
                // The closing delimiter may open a known token.
                out.push(TOKEN_DELIMITER);
                rest = tail;
            }
        }
        out.push_str(rest);
        out
    }
}

impl<S: Substitutor + ?Sized> Substitutor for &S {
    fn replace(&self, text: &str) -> String {
        (**self).replace(text)
    }
}

#[cfg(test)]
mod tests;
