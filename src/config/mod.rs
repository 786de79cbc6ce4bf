//! Layered configuration for `ureq`-backed contexts.
//!
//! Values start from [`RestApiConfig::default`] and are overridden by
//! `RESTAPI_STEPS_*` environment variables. Nested keys use a double
//! underscore, so `RESTAPI_STEPS_HEADERS__ACCEPT=application/json` adds a
//! persistent `accept` header.
//!
//! The layers are composed with figment directly rather than through the
//! `OrthoConfig` derive. The derive generates a `clap` parser over the
//! process arguments, and a step library runs inside a test harness whose
//! arguments belong to the harness.

mod error;

pub use error::ConfigError;

use indexmap::IndexMap;
use ortho_config::figment::{
    Figment,
    providers::{Env, Serialized},
};
use restapi_env::ENV_PREFIX;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Default connect timeout in seconds.
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
/// Default overall request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Settings for building a [`RestApiContext`](crate::context::RestApiContext)
/// that talks to a live API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RestApiConfig {
    /// Base URL relative request URIs are appended to. Without one, step
    /// URIs must be absolute.
    pub base_url: Option<String>,
    /// Headers sent with every request.
    pub headers: IndexMap<String, String>,
    /// Seconds allowed for establishing a connection.
    pub connect_timeout_secs: u64,
    /// Seconds allowed for the whole exchange.
    pub timeout_secs: u64,
}

impl Default for RestApiConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            headers: IndexMap::new(),
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl RestApiConfig {
    /// Defaults layered under the prefixed environment.
    #[must_use]
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Load configuration from defaults and the environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a value has the wrong type or a timeout
    /// is zero.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(&Self::figment())
    }

    /// Extract and validate configuration from `figment`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Extract`] when extraction fails and
    /// [`ConfigError::ZeroTimeout`] when a timeout is zero.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ortho_config::figment::{Figment, providers::Serialized};
    /// use restapi_steps::config::RestApiConfig;
    /// use serde_json::json;
    ///
    /// let figment = RestApiConfig::figment()
    ///     .merge(Serialized::defaults(json!({"base_url": "http://localhost:8080"})));
    /// let config = RestApiConfig::from_figment(&figment)?;
    /// assert_eq!(config.base_url.as_deref(), Some("http://localhost:8080"));
    /// # Ok::<(), restapi_steps::config::ConfigError>(())
    /// ```
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let config: Self = figment
            .extract()
            .map_err(|err| ConfigError::Extract(Box::new(err)))?;
        config.validate()?;
        debug!(
            base_url = config.base_url.as_deref(),
            headers = config.headers.len(),
            "configuration loaded"
        );
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        [
            ("connect_timeout_secs", self.connect_timeout_secs),
            ("timeout_secs", self.timeout_secs),
        ]
        .into_iter()
        .find(|(_, secs)| *secs == 0)
        .map_or(Ok(()), |(field, _)| Err(ConfigError::ZeroTimeout { field }))
    }
}

#[cfg(test)]
mod tests;
