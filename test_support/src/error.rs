//! Error formatting helpers for stable, deterministic test assertions.

use std::error::Error;

/// Join an error and its sources (outermost to root cause) with `": "`.
///
/// # Examples
///
/// ```rust
/// use restapi_steps::config::ConfigError;
/// use restapi_steps::http::HttpError;
/// use test_support::display_error_chain;
///
/// let err = ConfigError::BaseUrl(HttpError::NoResponse);
/// assert_eq!(display_error_chain(&err), "invalid base URL: no request has been made yet");
/// ```
pub fn display_error_chain(e: &(dyn Error + 'static)) -> String {
    let mut current: Option<&(dyn Error + 'static)> = Some(e);
    std::iter::from_fn(|| {
        let err = current?;
        current = err.source();
        Some(err.to_string())
    })
    .collect::<Vec<_>>()
    .join(": ")
}
