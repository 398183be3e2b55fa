// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration service trait definition.
//!
//! `ConfigurationService` is the contract the rest of the framework codes
//! against: DAOs read their connection settings through it, messengers read
//! their channel credentials through it. The store in
//! [`crate::service::ConfigStore`] is the default implementation.

use crate::domain::{ConfigError, ConfigKey, ConfigValue, Result};

/// Typed, fallback-aware read/write access to hierarchical settings.
///
/// Only [`get_with`](Self::get_with) and [`set`](Self::set) must be provided;
/// every other method is derived from them.
///
/// # Miss policy
///
/// A lookup of an absent key either returns the caller's fallback or fails
/// with [`ConfigError::ConfigKeyNotFound`]. The "no fallback" sentinel is
/// `None`; `Some(ConfigValue::Null)` is a legitimate fallback and is returned
/// like any other.
pub trait ConfigurationService {
    /// Looks up `key`, applying `fallback` on a miss.
    ///
    /// # Errors
    ///
    /// Fails with [`ConfigError::ConfigKeyNotFound`] when the key is absent
    /// and `fallback` is `None`.
    fn get_with(&self, key: &ConfigKey, fallback: Option<ConfigValue>) -> Result<ConfigValue>;

    /// Inserts or overwrites the value at `key`.
    fn set(&mut self, key: ConfigKey, value: ConfigValue);

    /// Looks up `key` with no fallback.
    fn get(&self, key: &ConfigKey) -> Result<ConfigValue> {
        self.get_with(key, None)
    }

    /// Looks up `key`, returning `fallback` if it is absent. Never fails.
    fn get_or(&self, key: &ConfigKey, fallback: impl Into<ConfigValue>) -> ConfigValue
    where
        Self: Sized,
    {
        let fallback = fallback.into();
        match self.get_with(key, Some(fallback.clone())) {
            Ok(value) => value,
            Err(_) => fallback,
        }
    }

    /// Returns `true` if `key` is present.
    fn has(&self, key: &ConfigKey) -> bool {
        self.get(key).is_ok()
    }

    /// Parses `key` and looks it up with no fallback.
    fn get_str(&self, key: &str) -> Result<ConfigValue> {
        self.get(&ConfigKey::new(key)?)
    }

    /// Parses `key` and looks it up, returning `fallback` on a miss.
    ///
    /// An invalid key is still an error; only absence triggers the fallback.
    fn get_str_or(&self, key: &str, fallback: impl Into<ConfigValue>) -> Result<ConfigValue>
    where
        Self: Sized,
    {
        self.get_with(&ConfigKey::new(key)?, Some(fallback.into()))
    }

    /// Parses `key` and sets it.
    fn set_str(&mut self, key: &str, value: impl Into<ConfigValue>) -> Result<()>
    where
        Self: Sized,
    {
        self.set(ConfigKey::new(key)?, value.into());
        Ok(())
    }

    /// Reads `key` as a boolean.
    fn get_bool(&self, key: &ConfigKey) -> Result<bool> {
        self.get(key)?.as_bool(key.as_str())
    }

    /// Reads `key` as a string; numbers and booleans are formatted.
    fn get_string(&self, key: &ConfigKey) -> Result<String> {
        self.get(key)?.to_string_value(key.as_str())
    }

    /// Reads `key` as an `i64`.
    fn get_i64(&self, key: &ConfigKey) -> Result<i64> {
        self.get(key)?.as_i64(key.as_str())
    }

    /// Reads `key` as a `u16`.
    fn get_u16(&self, key: &ConfigKey) -> Result<u16> {
        self.get(key)?.as_u16(key.as_str())
    }

    /// Reads `key` as an `f64`.
    fn get_f64(&self, key: &ConfigKey) -> Result<f64> {
        self.get(key)?.as_f64(key.as_str())
    }

    /// Reads an optional string setting: absent is `None`, present must convert.
    fn get_optional_string(&self, key: &ConfigKey) -> Result<Option<String>> {
        match self.get(key) {
            Ok(ConfigValue::Null) => Ok(None),
            Ok(value) => value.to_string_value(key.as_str()).map(Some),
            Err(ConfigError::ConfigKeyNotFound { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    // Flat map implementation used to exercise the provided methods
    #[derive(Default)]
    struct MapService {
        values: HashMap<ConfigKey, ConfigValue>,
    }

    impl ConfigurationService for MapService {
        fn get_with(&self, key: &ConfigKey, fallback: Option<ConfigValue>) -> Result<ConfigValue> {
            match (self.values.get(key), fallback) {
                (Some(value), _) => Ok(value.clone()),
                (None, Some(fallback)) => Ok(fallback),
                (None, None) => Err(ConfigError::ConfigKeyNotFound {
                    key: key.to_string(),
                }),
            }
        }

        fn set(&mut self, key: ConfigKey, value: ConfigValue) {
            self.values.insert(key, value);
        }
    }

    fn key(s: &str) -> ConfigKey {
        ConfigKey::new(s).unwrap()
    }

    #[test]
    fn test_get_missing_without_fallback_fails() {
        let service = MapService::default();
        let err = service.get(&key("missing.key")).unwrap_err();
        assert!(matches!(err, ConfigError::ConfigKeyNotFound { ref key } if key == "missing.key"));
    }

    #[test]
    fn test_get_or_returns_fallback() {
        let service = MapService::default();
        assert_eq!(
            service.get_or(&key("db.host"), "localhost"),
            ConfigValue::from("localhost")
        );
    }

    #[test]
    fn test_null_fallback_is_returned() {
        let service = MapService::default();
        let value = service.get_with(&key("db.host"), Some(ConfigValue::Null)).unwrap();
        assert!(value.is_null());
    }

    #[test]
    fn test_set_then_get() {
        let mut service = MapService::default();
        service.set(key("db.host"), ConfigValue::from("10.0.0.5"));
        assert_eq!(service.get(&key("db.host")).unwrap(), ConfigValue::from("10.0.0.5"));
        assert!(service.has(&key("db.host")));
    }

    #[test]
    fn test_str_helpers() {
        let mut service = MapService::default();
        service.set_str("app/name", "demo").unwrap();
        assert_eq!(service.get_str("app.name").unwrap(), ConfigValue::from("demo"));
        assert_eq!(
            service.get_str_or("app.title", "none").unwrap(),
            ConfigValue::from("none")
        );
        assert!(matches!(
            service.get_str_or("", "none"),
            Err(ConfigError::InvalidKey { .. })
        ));
        assert!(service.set_str("a..b", 1).is_err());
    }

    #[test]
    fn test_typed_getters() {
        let mut service = MapService::default();
        service.set(key("debug"), ConfigValue::from("yes"));
        service.set(key("port"), ConfigValue::from(8080));
        service.set(key("ratio"), ConfigValue::from(0.25));

        assert!(service.get_bool(&key("debug")).unwrap());
        assert_eq!(service.get_u16(&key("port")).unwrap(), 8080);
        assert_eq!(service.get_i64(&key("port")).unwrap(), 8080);
        assert_eq!(service.get_string(&key("port")).unwrap(), "8080");
        assert_eq!(service.get_f64(&key("ratio")).unwrap(), 0.25);
    }

    #[test]
    fn test_get_optional_string() {
        let mut service = MapService::default();
        service.set(key("user"), ConfigValue::from("root"));
        service.set(key("password"), ConfigValue::Null);

        assert_eq!(service.get_optional_string(&key("user")).unwrap(), Some("root".to_string()));
        assert_eq!(service.get_optional_string(&key("password")).unwrap(), None);
        assert_eq!(service.get_optional_string(&key("schema")).unwrap(), None);
    }
}
