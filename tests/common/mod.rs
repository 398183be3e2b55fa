// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use ministruts::domain::{ConfigError, ConfigKey, ConfigValue, Result};
use ministruts::ports::ConfigSource;
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A mock configuration source with predefined values and priority.
#[derive(Debug, Clone)]
pub struct MockConfigSource {
    name: String,
    priority: u8,
    values: HashMap<String, ConfigValue>,
    fail: Arc<AtomicBool>,
}

impl MockConfigSource {
    /// Creates a new mock source with the given name and priority.
    pub fn new(name: impl Into<String>, priority: u8) -> Self {
        Self {
            name: name.into(),
            priority,
            values: HashMap::new(),
            fail: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Adds a value to the mock source.
    pub fn with_value(mut self, key: &str, value: impl Into<ConfigValue>) -> Self {
        self.values.insert(key.to_string(), value.into());
        self
    }

    /// Returns a switch that makes every subsequent enumeration fail.
    pub fn fail_switch(&self) -> Arc<AtomicBool> {
        self.fail.clone()
    }
}

impl ConfigSource for MockConfigSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn priority(&self) -> u8 {
        self.priority
    }

    fn get(&self, key: &ConfigKey) -> Result<Option<ConfigValue>> {
        Ok(self.values.get(key.as_str()).cloned())
    }

    fn all_keys(&self) -> Result<Vec<ConfigKey>> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(ConfigError::SourceError {
                source_name: self.name.clone(),
                message: "mock failure".to_string(),
                source: None,
            });
        }
        self.values.keys().map(|k| ConfigKey::new(k)).collect()
    }

    fn reload(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Sets environment variables and removes them on drop.
pub struct EnvGuard {
    keys: Vec<String>,
}

impl EnvGuard {
    pub fn new() -> Self {
        EnvGuard { keys: Vec::new() }
    }

    pub fn set(&mut self, key: &str, value: &str) {
        env::set_var(key, value);
        self.keys.push(key.to_string());
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for key in &self.keys {
            env::remove_var(key);
        }
    }
}

/// Writes `content` to `dir/name`.
pub fn write_file(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).unwrap();
}
