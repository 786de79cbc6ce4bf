//! Errors raised while issuing requests or reading the last response.
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
use thiserror::Error;

use crate::assertions::AssertionError;

/// Failures of the HTTP adapter and its collaborators.
#[derive(Debug, Error, Diagnostic)]
pub enum HttpError {
    /// The request URI could not be resolved to an absolute URL.
    #[error("invalid request URI '{uri}': {reason}")]
    #[diagnostic(
        code(restapi_steps::http::invalid_uri),
        help("set RESTAPI_STEPS_BASE_URL or use an absolute URI")
    )]
    InvalidUri {
        /// URI as passed to the adapter.
        uri: String,
        /// Parser message.
        reason: String,
    },

    /// The client could not complete the exchange.
    #[error("{method} {url} failed: {reason}")]
    #[diagnostic(code(restapi_steps::http::transport))]
    Transport {
        /// HTTP method of the failed request.
        method: String,
        /// Absolute URL of the failed request.
        url: String,
        /// Transport error message.
        reason: String,
    },

    /// The response arrived but its body could not be read.
    #[error("failed to read response body from {url}: {reason}")]
    #[diagnostic(code(restapi_steps::http::read_body))]
    ReadBody {
        /// URL the response came from.
        url: String,
        /// I/O error message.
        reason: String,
    },

    /// A response was requested before any request was made.
    #[error("no request has been made yet")]
    #[diagnostic(
        code(restapi_steps::http::no_response),
        help("add a 'When I make request' step before asserting on the response")
    )]
    NoResponse,

    /// The last response body is not usable as a JSON document.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Decode(#[from] AssertionError),
}
