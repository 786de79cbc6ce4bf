//! Gherkin step library for exercising HTTP/JSON APIs.
//!
//! Steps such as `When I make request GET "/users/42"` and `Then the
//! response JSON should have "name" field with value "Ann"` are implemented
//! by [`context::RestApiContext`]. Requests go through an
//! [`http::HttpClient`]; responses are checked by the pure functions in
//! [`assertions`]. [`steps::Steps`] matches raw step text against the
//! supported phrases for hosts without a step registry of their own.

pub mod assertions;
pub mod config;
pub mod context;
pub mod http;
pub mod literal;
pub mod params;
pub mod steps;

pub use assertions::{AssertionError, CompareMode};
pub use config::{ConfigError, RestApiConfig};
pub use context::{RestApiContext, ScenarioConfig};
pub use http::HttpError;
pub use steps::{StepError, Steps};
