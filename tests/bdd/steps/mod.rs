//! Step definition modules for BDD scenarios.
//!
//! Each module contains step definitions for one part of the vocabulary.
//! Steps are registered via `#[given]`, `#[when]`, and `#[then]` attribute
//! macros and forward to `RestApiContext`, so the scenarios read like the
//! suites hosts write on top of this crate.
//!
//! ## File-wide lint suppressions
//!
//! The `rstest-bdd` macros generate wrapper code for each step function that
//! triggers Clippy lints the generated code cannot be annotated against.
//!
//! - `shadow_reuse`: Step functions strip quotes via intentional shadowing
//! - `needless_pass_by_value`: Step signatures prioritise ergonomics
//! - `redundant_closure_for_method_calls`: Closures keep every step in the
//!   same `with_context` shape

#![expect(
    clippy::shadow_reuse,
    reason = "rstest-bdd macros generate step wrappers that shadow parameters"
)]
#![expect(
    clippy::needless_pass_by_value,
    reason = "rstest-bdd step signatures prioritise ergonomics"
)]
#![expect(
    clippy::redundant_closure_for_method_calls,
    reason = "rstest-bdd step closures prioritise readability over brevity"
)]

mod api;
mod dispatch;
mod requests;
mod responses;
