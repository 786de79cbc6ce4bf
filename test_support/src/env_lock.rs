//! Process-wide lock for tests that touch `RESTAPI_STEPS_*` variables.
//!
//! Two mechanisms cooperate here. `#[serial]` from `serial_test` orders whole
//! test functions inside one integration binary, so a config test never runs
//! beside another config test. It knows nothing about code that calls
//! [`EnvVarGuard`](crate::env_var_guard::EnvVarGuard) from a doctest, a unit
//! test without the attribute, or a helper shared by several binaries.
//! [`EnvLock`] covers that gap: every environment write in this crate is made
//! while it is held, which is what makes the `unsafe` calls in
//! `env_var_guard` sound.

use std::sync::{Mutex, MutexGuard, PoisonError};

static CONFIG_ENV: Mutex<()> = Mutex::new(());

/// Held for as long as a test may read or write configuration variables.
#[derive(Debug)]
#[must_use = "the environment is only protected while the lock is held"]
pub struct EnvLock(MutexGuard<'static, ()>);

impl EnvLock {
    /// Block until no other test holds the lock.
    ///
    /// A test that panicked while holding it leaves the environment restored
    /// by its `EnvVarGuard`s, so a poisoned lock is taken over as is.
    pub fn acquire() -> Self {
        Self(CONFIG_ENV.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

#[cfg(test)]
mod tests {
    use super::EnvLock;

    #[test]
    fn lock_survives_a_panicking_holder() {
        let outcome = std::thread::spawn(|| {
            let _held = EnvLock::acquire();
            panic!("holder failed");
        })
        .join();
        assert!(outcome.is_err());
        let _again = EnvLock::acquire();
    }
}
