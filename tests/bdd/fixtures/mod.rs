//! Fixture modules for BDD scenarios.
//!
//! The `TestWorld` struct holds all state for one scenario. Non-Clone types
//! use `RefCell<Option<T>>` directly, while Clone types use `Slot<T>`.

// The `#[fixture]` macro generates types that cannot have doc comments attached
#![allow(
    missing_docs,
    reason = "Generated fixture types cannot have doc comments attached"
)]

use std::cell::RefCell;

use restapi_steps::params::ParameterBag;
use restapi_steps::{RestApiContext, ScenarioConfig};
use rstest::fixture;
use rstest_bdd::Slot;
use test_support::{StubApi, init_tracing};

/// Combined test world for all BDD scenarios.
#[derive(Default)]
pub struct TestWorld {
    /// In-memory API every request of the scenario is sent to. Clones share
    /// state, so steps can inspect what the context sent.
    pub api: StubApi,
    /// Placeholder values handed to the context when it is created.
    pub params: RefCell<ParameterBag>,
    /// Context under test, created on first use (non-Clone).
    pub context: RefCell<Option<RestApiContext>>,
    /// Rendered error of the last step expected to fail.
    pub step_error: Slot<String>,
}

impl TestWorld {
    /// Run `f` against the scenario's context, creating it on first use.
    pub fn with_context<R>(&self, f: impl FnOnce(&mut RestApiContext) -> R) -> R {
        let mut slot = self.context.borrow_mut();
        let context = slot.get_or_insert_with(|| {
            RestApiContext::new(self.api.clone(), ScenarioConfig::default())
                .with_substitutor(self.params.borrow().clone())
        });
        f(context)
    }
}

/// Fixture providing a fresh `TestWorld` for each scenario.
#[fixture]
pub fn world() -> TestWorld {
    init_tracing();
    TestWorld::default()
}

/// Helper trait extensions for `RefCell<Option<T>>`.
pub trait RefCellOptionExt<T> {
    /// Returns `true` if the `RefCell` contains `Some`.
    fn is_some(&self) -> bool;
}

impl<T> RefCellOptionExt<T> for RefCell<Option<T>> {
    fn is_some(&self) -> bool {
        self.borrow().is_some()
    }
}

/// Strip surrounding double quotes from a string parameter.
///
/// rstest-bdd captures quoted strings including the quotes (unlike cucumber),
/// so we need to strip them when processing step parameters.
#[must_use]
pub fn strip_quotes(s: &str) -> &str {
    s.strip_prefix('"')
        .and_then(|stripped| stripped.strip_suffix('"'))
        .unwrap_or(s)
}
