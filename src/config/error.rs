//! Configuration errors.
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
use ortho_config::figment;
use thiserror::Error;

use crate::http::HttpError;

/// Failures while loading configuration or building a context from it.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    /// A layer held a value of the wrong shape.
    #[error("failed to load configuration: {0}")]
    #[diagnostic(
        code(restapi_steps::config::extract),
        help("check RESTAPI_STEPS_* environment variables")
    )]
    Extract(#[source] Box<figment::Error>),

    /// A timeout was configured as zero seconds.
    #[error("{field} must be at least one second")]
    #[diagnostic(code(restapi_steps::config::zero_timeout))]
    ZeroTimeout {
        /// Configuration key holding the zero.
        field: &'static str,
    },

    /// The configured base URL is not usable.
    #[error("invalid base URL")]
    #[diagnostic(code(restapi_steps::config::base_url))]
    BaseUrl(#[source] HttpError),
}
