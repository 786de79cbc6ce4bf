//! BDD test entry point using rstest-bdd.
//!
//! The `scenarios!` macro generates one test per scenario found under
//! `tests/features`, each with a fresh `TestWorld`.

mod bdd;

pub use bdd::fixtures::*;

use rstest_bdd_macros::scenarios;

scenarios!("tests/features", fixtures = [world: TestWorld]);
