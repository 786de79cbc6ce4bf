//! Errors reported by step definitions.
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
use crate::http::HttpError;

/// Failure of a single step.
#[derive(Debug, Error, Diagnostic)]
pub enum StepError {
    /// The response failed an assertion.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Assertion(#[from] AssertionError),

    /// The request could not be made or its response read.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Http(#[from] HttpError),

    /// A captured argument could not be interpreted.
    #[error("invalid {argument} '{value}': {reason}")]
    #[diagnostic(code(restapi_steps::step::invalid_argument))]
    InvalidArgument {
        /// Name of the placeholder the value was captured for.
        argument: &'static str,
        /// Captured text.
        value: String,
        /// Why the text was rejected.
        reason: String,
    },

    /// A step table does not have the expected shape.
    #[error("invalid step table: {reason}")]
    #[diagnostic(code(restapi_steps::step::invalid_table))]
    InvalidTable {
        /// Description of the problem.
        reason: String,
    },

    /// A step that requires a table was given none.
    #[error("step '{step}' requires a table")]
    #[diagnostic(code(restapi_steps::step::missing_table))]
    MissingTable {
        /// Step text as written.
        step: String,
    },

    /// No step definition matches the text.
    #[error("undefined step: {text}")]
    #[diagnostic(
        code(restapi_steps::step::undefined),
        help("check the phrase against Steps::definitions()")
    )]
    UndefinedStep {
        /// Step text as written.
        text: String,
    },

    /// A step phrase could not be compiled into a matcher.
    #[error("invalid step phrase '{phrase}': {reason}")]
    #[diagnostic(code(restapi_steps::step::invalid_phrase))]
    InvalidPhrase {
        /// Phrase as declared.
        phrase: String,
        /// Compiler error message.
        reason: String,
    },
}

impl StepError {
    pub(crate) fn invalid_argument(
        argument: &'static str,
        value: &str,
        reason: impl ToString,
    ) -> Self {
        Self::InvalidArgument {
            argument,
            value: value.to_owned(),
            reason: reason.to_string(),
        }
    }
}
