// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration source trait definition.
//!
//! This module defines the `ConfigSource` trait, the port every configuration
//! source (files, environment variables, command-line overrides) implements.
//! The store merges sources from lowest to highest priority, so a source with
//! a higher priority overrides the ones below it.

use crate::domain::{ConfigKey, ConfigValue, Result};

/// A trait for configuration sources.
///
/// # Priority
///
/// The built-in sources use:
/// - `config.dist.*` files: 0
/// - configuration files: 1
/// - environment variables: 2
/// - command-line overrides: 3
///
/// # Examples
///
/// ```rust
/// use ministruts::ports::ConfigSource;
/// use ministruts::domain::{ConfigKey, ConfigValue, Result};
///
/// struct StaticSource;
///
/// impl ConfigSource for StaticSource {
///     fn name(&self) -> &str { "static" }
///     fn priority(&self) -> u8 { 1 }
///     fn get(&self, key: &ConfigKey) -> Result<Option<ConfigValue>> {
///         Ok((key.as_str() == "app.name").then(|| ConfigValue::from("demo")))
///     }
///     fn all_keys(&self) -> Result<Vec<ConfigKey>> {
///         Ok(vec![ConfigKey::new("app.name")?])
///     }
///     fn reload(&mut self) -> Result<()> { Ok(()) }
/// }
///
/// let entries = StaticSource.entries().unwrap();
/// assert_eq!(entries.len(), 1);
/// ```
pub trait ConfigSource: Send + Sync {
    /// Returns the name of this source, used in logs and error messages.
    fn name(&self) -> &str;

    /// Returns the priority of this source. Higher wins.
    fn priority(&self) -> u8;

    /// Returns the value for `key`, or `None` if this source doesn't define it.
    fn get(&self, key: &ConfigKey) -> Result<Option<ConfigValue>>;

    /// Returns every key this source defines.
    fn all_keys(&self) -> Result<Vec<ConfigKey>>;

    /// Re-reads the underlying data.
    fn reload(&mut self) -> Result<()>;

    /// Returns every key/value pair this source defines, sorted by key.
    fn entries(&self) -> Result<Vec<(ConfigKey, ConfigValue)>> {
        let mut keys = self.all_keys()?;
        keys.sort();

        let mut entries = Vec::with_capacity(keys.len());
        for key in keys {
            if let Some(value) = self.get(&key)? {
                entries.push((key, value));
            }
        }
        Ok(entries)
    }
}
