//! Common test utilities for integration tests.

use std::env;

/// Sets environment variables for the lifetime of the guard and restores
/// the previous state on drop.
///
/// Tests using this must be `#[serial]`; the environment is process-global.
#[allow(dead_code)]
pub struct EnvGuard {
    saved: Vec<(String, Option<String>)>,
}

#[allow(dead_code)]
impl EnvGuard {
    /// Creates an empty guard.
    pub fn new() -> Self {
        Self { saved: Vec::new() }
    }

    /// Sets `key` to `value`.
    pub fn set(&mut self, key: &str, value: &str) -> &mut Self {
        self.save(key);
        env::set_var(key, value);
        self
    }

    /// Removes `key`.
    pub fn unset(&mut self, key: &str) -> &mut Self {
        self.save(key);
        env::remove_var(key);
        self
    }

    fn save(&mut self, key: &str) {
        if !self.saved.iter().any(|(saved, _)| saved == key) {
            self.saved.push((key.to_string(), env::var(key).ok()));
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (key, value) in self.saved.drain(..).rev() {
            match value {
                Some(value) => env::set_var(&key, value),
                None => env::remove_var(&key),
            }
        }
    }
}

/// Keys used by the hero fixtures, unset before each environment test.
#[allow(dead_code)]
pub const HERO_KEYS: &[&str] = &[
    "CFG_TEST_MY_HERO",
    "CFG_TEST_POWER_LEVEL",
    "CFG_TEST_IS_STRONG",
    "CFG_TEST_EVENTS",
    "CFG_TEST_SHOUT",
    "NEW_CFG_TEST_MY_HERO",
];

/// A guard with every hero key unset.
#[allow(dead_code)]
pub fn clean_env() -> EnvGuard {
    let mut guard = EnvGuard::new();
    for key in HERO_KEYS {
        guard.unset(key);
    }
    guard
}
