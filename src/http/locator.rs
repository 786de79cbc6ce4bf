//! Resolution of step URIs into absolute request URLs.

use url::Url;

use super::HttpError;

/// Turns the URI written in a step into the one the client requests.
pub trait PathLocator {
    /// Resolve `uri`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidUri`] when `uri` cannot be resolved.
    fn locate(&self, uri: &str) -> Result<String, HttpError>;
}

/// Passes URIs through untouched. Suitable for clients that route relative
/// paths themselves.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityLocator;

impl PathLocator for IdentityLocator {
    fn locate(&self, uri: &str) -> Result<String, HttpError> {
        Ok(uri.to_owned())
    }
}

/// Appends relative URIs to a base URL. URIs carrying a host pass through.
///
/// Joining concatenates paths, so a base of `http://host/api` and a step URI
/// of `/users` request `http://host/api/users`.
///
/// # Examples
///
/// ```rust
/// use restapi_steps::http::{BaseUrlLocator, PathLocator};
///
/// let locator = BaseUrlLocator::new("http://localhost:8080/api/")?;
/// assert_eq!(locator.locate("/users/42")?, "http://localhost:8080/api/users/42");
/// assert_eq!(locator.locate("https://example.com/x")?, "https://example.com/x");
/// # Ok::<(), restapi_steps::http::HttpError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseUrlLocator {
    base: Url,
}

impl BaseUrlLocator {
    /// Parse `base` as an absolute URL.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidUri`] when `base` is not absolute or cannot
    /// carry a path.
    pub fn new(base: &str) -> Result<Self, HttpError> {
        let parsed = parse(base)?;
        if parsed.cannot_be_a_base() {
            return Err(HttpError::InvalidUri {
                uri: base.to_owned(),
                reason: String::from("URL cannot be used as a base"),
            });
        }
        Ok(Self { base: parsed })
    }

    /// The configured base URL.
    #[must_use]
    pub const fn base(&self) -> &Url {
        &self.base
    }
}

impl PathLocator for BaseUrlLocator {
    fn locate(&self, uri: &str) -> Result<String, HttpError> {
        // `users:search` parses with a scheme but no host; it is still relative.
        if let Ok(absolute) = Url::parse(uri)
            && absolute.has_host()
        {
            return Ok(absolute.into());
        }
        let joined = format!(
            "{}/{}",
            self.base.as_str().trim_end_matches('/'),
            uri.trim_start_matches('/')
        );
        parse(&joined).map(String::from)
    }
}

fn parse(uri: &str) -> Result<Url, HttpError> {
    Url::parse(uri).map_err(|err| HttpError::InvalidUri {
        uri: uri.to_owned(),
        reason: err.to_string(),
    })
}
