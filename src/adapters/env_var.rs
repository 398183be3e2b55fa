// SPDX-License-Identifier: MIT OR Apache-2.0

//! Environment variable configuration source adapter.
//!
//! Variables are mapped to keys by stripping an optional prefix, optionally
//! lowercasing, and turning `_` into the `.` delimiter, so `APP_DB_HOST` with
//! prefix `APP_` becomes `db.host`. Values are always strings.

use crate::domain::{ConfigKey, ConfigValue, Result};
use crate::ports::ConfigSource;
use std::collections::HashMap;
use std::env;
use std::sync::{PoisonError, RwLock};

/// Maximum length for environment variable keys (prevents DoS)
const MAX_ENV_KEY_LEN: usize = 512;

/// Maximum length for environment variable values (prevents DoS)
const MAX_ENV_VALUE_LEN: usize = 1048576; // 1MB

/// Priority of environment variables: above files, below the command line.
pub const ENV_PRIORITY: u8 = 2;

/// Configuration source adapter for environment variables.
///
/// Variables are read lazily on first access and cached until
/// [`reload`](ConfigSource::reload) is called.
///
/// # Examples
///
/// ```rust
/// use ministruts::adapters::EnvVarAdapter;
///
/// let adapter = EnvVarAdapter::with_prefix("MYAPP_").lowercase_keys(true);
/// ```
#[derive(Debug)]
pub struct EnvVarAdapter {
    prefix: Option<String>,
    lowercase_keys: bool,
    replace_underscores: bool,
    fixed: bool,
    cache: RwLock<Option<HashMap<ConfigKey, String>>>,
}

impl EnvVarAdapter {
    /// Creates an adapter over all environment variables.
    pub fn new() -> Self {
        Self {
            prefix: None,
            lowercase_keys: false,
            replace_underscores: true,
            fixed: false,
            cache: RwLock::new(None),
        }
    }

    /// Creates an adapter over variables starting with `prefix`; the prefix is stripped.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
            ..Self::new()
        }
    }

    /// Sets whether variable names are lowercased.
    pub fn lowercase_keys(mut self, enabled: bool) -> Self {
        self.lowercase_keys = enabled;
        self
    }

    /// Sets whether `_` is mapped to the `.` delimiter. On by default.
    pub fn replace_underscores(mut self, enabled: bool) -> Self {
        self.replace_underscores = enabled;
        self
    }

    /// Creates an adapter over a fixed set of values instead of the process environment.
    ///
    /// Reloading such an adapter keeps the given values.
    pub fn with_values(values: HashMap<String, String>) -> Self {
        let cache = values
            .into_iter()
            .filter_map(|(k, v)| ConfigKey::new(&k).ok().map(|k| (k, v)))
            .collect();
        Self {
            prefix: None,
            lowercase_keys: false,
            replace_underscores: false,
            fixed: true,
            cache: RwLock::new(Some(cache)),
        }
    }

    fn map_key(&self, name: &str) -> Option<ConfigKey> {
        let name = match &self.prefix {
            Some(prefix) => name.strip_prefix(prefix.as_str())?,
            None => name,
        };

        let mut transformed = name.to_string();
        if self.lowercase_keys {
            transformed = transformed.to_lowercase();
        }
        if self.replace_underscores {
            transformed = transformed.replace('_', ".");
        }

        ConfigKey::new(&transformed).ok()
    }

    fn load(&self) -> HashMap<ConfigKey, String> {
        let mut values = HashMap::new();
        let mut skipped = 0usize;

        for (name, value) in env::vars() {
            if name.len() > MAX_ENV_KEY_LEN || value.len() > MAX_ENV_VALUE_LEN {
                tracing::debug!(
                    "Skipping oversized environment variable: key_len={}, value_len={}",
                    name.len(),
                    value.len()
                );
                continue;
            }

            match self.map_key(&name) {
                Some(key) => {
                    values.insert(key, value);
                }
                None => skipped += 1,
            }
        }

        tracing::debug!(
            "Loaded {} environment variables, skipped {} (prefix={:?}, lowercase={}, replace_underscores={})",
            values.len(),
            skipped,
            self.prefix,
            self.lowercase_keys,
            self.replace_underscores
        );

        values
    }

    fn with_cache<T>(&self, f: impl FnOnce(&HashMap<ConfigKey, String>) -> T) -> T {
        {
            let guard = self.cache.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(cache) = guard.as_ref() {
                return f(cache);
            }
        }

        let mut guard = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        let cache = guard.get_or_insert_with(|| self.load());
        f(cache)
    }
}

impl Default for EnvVarAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigSource for EnvVarAdapter {
    fn name(&self) -> &str {
        "env"
    }

    fn priority(&self) -> u8 {
        ENV_PRIORITY
    }

    fn get(&self, key: &ConfigKey) -> Result<Option<ConfigValue>> {
        Ok(self.with_cache(|cache| cache.get(key).map(|v| ConfigValue::from(v.as_str()))))
    }

    fn all_keys(&self) -> Result<Vec<ConfigKey>> {
        Ok(self.with_cache(|cache| cache.keys().cloned().collect()))
    }

    fn reload(&mut self) -> Result<()> {
        if self.fixed {
            return Ok(());
        }
        // Cleared cache forces a reload on next access
        *self.cache.get_mut().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}
