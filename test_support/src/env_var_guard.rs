//! Guards for temporarily modifying environment variables in tests.
//!
//! `std::env::set_var` and `remove_var` are `unsafe` in Rust 2024 because they
//! mutate process-global state. Acquire an [`EnvLock`](crate::env_lock::EnvLock)
//! before calling the provided constructors to serialise mutations across
//! threads. Each guard restores the previous value on drop.
//!
//! # Examples
//!
//! ```rust
//! use restapi_env::BASE_URL_ENV;
//! use test_support::{EnvLock, EnvVarGuard};
//!
//! let _lock = EnvLock::acquire();
//! let _guard = EnvVarGuard::set(BASE_URL_ENV, "http://localhost:9");
//! assert_eq!(std::env::var(BASE_URL_ENV).as_deref(), Ok("http://localhost:9"));
//! ```
use std::{borrow::Cow, ffi::OsString};

use restapi_env::ENV_PREFIX;

/// RAII guard that resets an environment variable to its previous value on drop.
#[derive(Debug)]
pub struct EnvVarGuard {
    name: Cow<'static, str>,
    prev: Option<OsString>,
}

impl EnvVarGuard {
    /// Set `name` to `val`, returning a guard that restores the prior value.
    ///
    /// Callers must hold an [`EnvLock`](crate::env_lock::EnvLock).
    #[must_use]
    pub fn set(name: impl Into<Cow<'static, str>>, val: &str) -> Self {
        let name = name.into();
        let prev = std::env::var_os(&*name);
        // SAFETY: `EnvLock` serialises mutations of the process environment.
        unsafe { std::env::set_var(&*name, val) };
        Self { name, prev }
    }

    /// Remove `name`, returning a guard that restores the prior value.
    ///
    /// Callers must hold an [`EnvLock`](crate::env_lock::EnvLock).
    #[must_use]
    pub fn remove(name: impl Into<Cow<'static, str>>) -> Self {
        let name = name.into();
        let prev = std::env::var_os(&*name);
        // SAFETY: `EnvLock` serialises mutations of the process environment.
        unsafe { std::env::remove_var(&*name) };
        Self { name, prev }
    }

    /// Remove every `RESTAPI_STEPS_*` variable so configuration tests start
    /// from defaults. The returned guards restore them on drop.
    #[must_use]
    pub fn clear_configuration() -> Vec<Self> {
        std::env::vars_os()
            .filter_map(|(key, _)| key.into_string().ok())
            .filter(|key| key.starts_with(ENV_PREFIX))
            .map(Self::remove)
            .collect()
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        // SAFETY: `EnvLock` serialises mutations while the prior value is
        // restored.
        unsafe {
            if let Some(ref v) = self.prev {
                std::env::set_var(&*self.name, v);
            } else {
                std::env::remove_var(&*self.name);
            }
        }
    }
}
