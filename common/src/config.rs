//! Environment variable parsing helpers
//!
//! Provides ergonomic helpers for reading configuration from environment variables.

use std::env;

/// Extension trait for parsing environment variables.
///
/// Provides convenient methods for reading env vars with defaults and presence checks.
pub trait ConfigExt {
    /// Get an environment variable with a default value.
    ///
    /// A variable that is set but blank counts as unset.
    ///
    /// # Example
    /// ```ignore
    /// let cli = String::env_or("DB_SETUP_UPSTASH_CLI", "upstash");
    /// ```
    fn env_or(name: &str, default: &str) -> String {
        env::var(name)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| default.to_string())
    }

    /// Check whether an environment variable is set to a non-blank value.
    fn env_present(name: &str) -> bool {
        env::var(name).map(|v| !v.trim().is_empty()).unwrap_or(false)
    }
}

// Blanket implementation for all types
impl<T> ConfigExt for T {}
