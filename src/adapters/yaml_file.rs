// SPDX-License-Identifier: MIT OR Apache-2.0

//! YAML configuration parser.
//!
//! Nested mappings are flattened into dotted keys. Scalars keep their YAML
//! type; sequences become [`ConfigValue::List`] values and are not flattened.

use crate::domain::{ConfigError, ConfigValue, Result};
use crate::ports::ConfigParser;
use std::collections::{BTreeMap, HashMap};

/// YAML parser implementation.
///
/// # Examples
///
/// ```rust
/// use ministruts::adapters::YamlParser;
/// use ministruts::domain::ConfigValue;
/// use ministruts::ports::ConfigParser;
///
/// let parser = YamlParser::new();
/// let result = parser.parse("db:\n  host: localhost\n  port: 5432").unwrap();
/// assert_eq!(result.get("db.host"), Some(&ConfigValue::from("localhost")));
/// assert_eq!(result.get("db.port"), Some(&ConfigValue::from(5432)));
/// ```
#[derive(Debug, Clone, Default)]
pub struct YamlParser;

impl YamlParser {
    /// Creates a new YAML parser.
    pub fn new() -> Self {
        YamlParser
    }

    fn flatten(value: &serde_yaml::Value, prefix: &str, result: &mut HashMap<String, ConfigValue>) {
        match value {
            serde_yaml::Value::Mapping(map) if !map.is_empty() || prefix.is_empty() => {
                for (key, val) in map {
                    let Some(key) = Self::key_text(key) else {
                        tracing::debug!("Skipping non-scalar YAML key under '{}'", prefix);
                        continue;
                    };
                    let new_prefix = if prefix.is_empty() {
                        key
                    } else {
                        format!("{}.{}", prefix, key)
                    };
                    Self::flatten(val, &new_prefix, result);
                }
            }
            serde_yaml::Value::Tagged(tagged) => Self::flatten(&tagged.value, prefix, result),
            other => {
                result.insert(prefix.to_string(), Self::convert(other));
            }
        }
    }

    fn key_text(key: &serde_yaml::Value) -> Option<String> {
        match key {
            serde_yaml::Value::String(s) => Some(s.clone()),
            serde_yaml::Value::Number(n) => Some(n.to_string()),
            serde_yaml::Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    fn convert(value: &serde_yaml::Value) -> ConfigValue {
        match value {
            serde_yaml::Value::Null => ConfigValue::Null,
            serde_yaml::Value::Bool(b) => ConfigValue::Bool(*b),
            serde_yaml::Value::Number(n) => match n.as_i64() {
                Some(i) => ConfigValue::Integer(i),
                None => ConfigValue::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_yaml::Value::String(s) => ConfigValue::String(s.clone()),
            serde_yaml::Value::Sequence(seq) => {
                ConfigValue::List(seq.iter().map(Self::convert).collect())
            }
            serde_yaml::Value::Mapping(map) => {
                let entries: BTreeMap<String, ConfigValue> = map
                    .iter()
                    .filter_map(|(k, v)| Self::key_text(k).map(|k| (k, Self::convert(v))))
                    .collect();
                ConfigValue::Map(entries)
            }
            serde_yaml::Value::Tagged(tagged) => Self::convert(&tagged.value),
        }
    }
}

impl ConfigParser for YamlParser {
    fn parse(&self, content: &str) -> Result<HashMap<String, ConfigValue>> {
        let value: serde_yaml::Value =
            serde_yaml::from_str(content).map_err(|e| ConfigError::ParseError {
                message: format!("Failed to parse YAML: {}", e),
                source: Some(Box::new(e)),
            })?;

        let mut result = HashMap::new();
        match value {
            serde_yaml::Value::Null => {}
            serde_yaml::Value::Mapping(_) => Self::flatten(&value, "", &mut result),
            other => {
                return Err(ConfigError::ParseError {
                    message: format!(
                        "YAML document must be a mapping, found {}",
                        Self::convert(&other).kind()
                    ),
                    source: None,
                })
            }
        }
        Ok(result)
    }

    fn supported_extensions(&self) -> &[&str] {
        &["yaml", "yml"]
    }
}
