// SPDX-License-Identifier: MIT OR Apache-2.0

//! Hierarchical configuration keys.
//!
//! A `ConfigKey` names a location in the configuration tree. Segments are
//! separated by `.` or `/`; both spellings address the same location and the
//! key is stored in its canonical dotted form.

use crate::domain::errors::{ConfigError, Result};
use std::fmt;
use std::str::FromStr;

/// A validated, hierarchical configuration key.
///
/// Keys are compared exactly and case-sensitively. Construction fails for an
/// empty key or a key with an empty segment.
///
/// # Examples
///
/// ```
/// use ministruts::domain::config_key::ConfigKey;
///
/// let key = ConfigKey::new("database.host").unwrap();
/// let same = ConfigKey::new("database/host").unwrap();
///
/// assert_eq!(key, same);
/// assert_eq!(key.as_str(), "database.host");
/// assert_eq!(key.segments().collect::<Vec<_>>(), vec!["database", "host"]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConfigKey(String);

impl ConfigKey {
    /// The canonical segment delimiter.
    pub const DELIMITER: char = '.';

    /// Parses and validates a key.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidKey`] if the key is empty or contains an
    /// empty segment (`"db..host"`, `".db"`, `"db."`).
    pub fn new(key: &str) -> Result<Self> {
        if key.is_empty() {
            return Err(ConfigError::InvalidKey {
                key: String::new(),
                reason: "key must not be empty".to_string(),
            });
        }

        let segments: Vec<&str> = key.split(['.', '/']).collect();
        if let Some(pos) = segments.iter().position(|s| s.is_empty()) {
            return Err(ConfigError::InvalidKey {
                key: key.to_string(),
                reason: format!("segment {} is empty", pos),
            });
        }

        Ok(ConfigKey(segments.join(".")))
    }

    /// Builds a key by appending a segment path to this one.
    ///
    /// ```
    /// use ministruts::domain::ConfigKey;
    ///
    /// let db = ConfigKey::new("db.main").unwrap();
    /// assert_eq!(db.join("host").unwrap().as_str(), "db.main.host");
    /// ```
    pub fn join(&self, child: &str) -> Result<Self> {
        Self::new(&format!("{}.{}", self.0, child))
    }

    /// Returns the key in canonical dotted form.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Iterates over the key's segments.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split(Self::DELIMITER)
    }

    /// Converts the key into its canonical `String`.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl FromStr for ConfigKey {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<&str> for ConfigKey {
    type Error = ConfigError;

    fn try_from(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<String> for ConfigKey {
    type Error = ConfigError;

    fn try_from(s: String) -> Result<Self> {
        Self::new(&s)
    }
}

impl From<ConfigKey> for String {
    fn from(key: ConfigKey) -> Self {
        key.0
    }
}

impl AsRef<str> for ConfigKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
