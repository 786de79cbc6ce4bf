#![forbid(unsafe_code)]

//! Environment variable names shared across restapi-steps crates (library,
//! tests, and helpers).

/// Prefix applied to every configuration variable read from the environment.
///
/// Nested keys are separated with a double underscore, so
/// `RESTAPI_STEPS_HEADERS__ACCEPT` sets the persistent `accept` header.
pub const ENV_PREFIX: &str = "RESTAPI_STEPS_";

/// Environment variable overriding the base URL that relative request URIs
/// are resolved against.
///
/// # Examples
///
/// ```
/// use restapi_env::{BASE_URL_ENV, ENV_PREFIX};
/// assert!(BASE_URL_ENV.starts_with(ENV_PREFIX));
/// ```
pub const BASE_URL_ENV: &str = "RESTAPI_STEPS_BASE_URL";

/// Environment variable overriding the overall request timeout in seconds.
pub const TIMEOUT_ENV: &str = "RESTAPI_STEPS_TIMEOUT_SECS";
