//! HTTP methods accepted by request steps.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Request method named in a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// `GET`
    Get,
    /// `HEAD`
    Head,
    /// `POST`
    Post,
    /// `PUT`
    Put,
    /// `PATCH`
    Patch,
    /// `DELETE`
    Delete,
    /// `OPTIONS`
    Options,
}

/// Raised when a step names a method outside [`Method`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported HTTP method '{method}'")]
pub struct UnknownMethod {
    /// Method text as written.
    pub method: String,
}

impl Method {
    /// Canonical upper-case name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Head => "HEAD",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
            Self::Options => "OPTIONS",
        }
    }

    /// Whether parameters travel in the query string rather than the body.
    #[must_use]
    pub const fn sends_query(self) -> bool {
        matches!(self, Self::Get | Self::Head | Self::Delete)
    }
}

impl FromStr for Method {
    type Err = UnknownMethod;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        [
            Self::Get,
            Self::Head,
            Self::Post,
            Self::Put,
            Self::Patch,
            Self::Delete,
            Self::Options,
        ]
        .into_iter()
        .find(|method| method.as_str().eq_ignore_ascii_case(text.trim()))
        .ok_or_else(|| UnknownMethod {
            method: text.to_owned(),
        })
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
