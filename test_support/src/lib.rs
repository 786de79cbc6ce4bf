//! Test utilities for restapi-steps.
//!
//! This crate provides an in-memory API stub, a threaded HTTP fixture
//! server, environment guards, and logging helpers shared by the unit,
//! integration, and behavioural test suites.

pub mod env_lock;
pub mod env_var_guard;
pub mod error;
pub mod http;
pub mod logging;
pub mod stub;

pub use env_lock::EnvLock;
pub use env_var_guard::EnvVarGuard;
pub use error::display_error_chain;
pub use http::{CapturedRequest, HttpServer, spawn_http_server};
pub use logging::{capture_logs, init_tracing};
pub use stub::StubApi;
