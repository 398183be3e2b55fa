// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration value type with explicit conversions.
//!
//! A [`ConfigValue`] is stored and returned exactly as it was loaded or set.
//! Conversions only happen when a caller asks for one through an `as_*`
//! accessor, and they fail with an error naming the key when they don't apply.

use crate::domain::errors::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// A configuration setting value.
///
/// # Examples
///
/// ```
/// use ministruts::domain::config_value::ConfigValue;
///
/// let port = ConfigValue::from(5432);
/// assert_eq!(port.as_u16("db.port").unwrap(), 5432);
///
/// let flag = ConfigValue::from("on");
/// assert!(flag.as_bool("app.debug").unwrap());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    /// An explicit null.
    #[default]
    Null,
    /// A boolean.
    Bool(bool),
    /// A signed integer.
    Integer(i64),
    /// A floating point number.
    Float(f64),
    /// A string.
    String(String),
    /// An ordered list of values.
    List(Vec<ConfigValue>),
    /// A nested mapping of segment names to values.
    Map(BTreeMap<String, ConfigValue>),
}

impl ConfigValue {
    /// Returns a short name for the kind of value, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            ConfigValue::Null => "null",
            ConfigValue::Bool(_) => "boolean",
            ConfigValue::Integer(_) => "integer",
            ConfigValue::Float(_) => "float",
            ConfigValue::String(_) => "string",
            ConfigValue::List(_) => "list",
            ConfigValue::Map(_) => "map",
        }
    }

    /// Returns `true` for [`ConfigValue::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, ConfigValue::Null)
    }

    /// Returns the string slice if this is a [`ConfigValue::String`].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConfigValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the items if this is a [`ConfigValue::List`].
    pub fn as_list(&self) -> Option<&[ConfigValue]> {
        match self {
            ConfigValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the entries if this is a [`ConfigValue::Map`].
    pub fn as_map(&self) -> Option<&BTreeMap<String, ConfigValue>> {
        match self {
            ConfigValue::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Renders a scalar as a string.
    ///
    /// Strings are returned as-is, numbers and booleans are formatted.
    /// Null, lists and maps are a [`ConfigError::TypeMismatch`].
    pub fn to_string_value(&self, key: &str) -> Result<String> {
        match self {
            ConfigValue::String(s) => Ok(s.clone()),
            ConfigValue::Bool(b) => Ok(b.to_string()),
            ConfigValue::Integer(n) => Ok(n.to_string()),
            ConfigValue::Float(n) => Ok(n.to_string()),
            other => Err(mismatch(key, "string", other)),
        }
    }

    /// Interprets the value as a boolean.
    ///
    /// Accepts booleans and the strings `true/yes/1/on` and `false/no/0/off`
    /// in any case.
    pub fn as_bool(&self, key: &str) -> Result<bool> {
        match self {
            ConfigValue::Bool(b) => Ok(*b),
            ConfigValue::String(s) => match s.to_lowercase().as_str() {
                "true" | "yes" | "1" | "on" => Ok(true),
                "false" | "no" | "0" | "off" => Ok(false),
                _ => s
                    .parse::<bool>()
                    .map_err(|e| ConfigError::from_parse_bool_error(key.to_string(), e)),
            },
            other => Err(mismatch(key, "boolean", other)),
        }
    }

    /// Interprets the value as an `i64`. Accepts integers and numeric strings.
    pub fn as_i64(&self, key: &str) -> Result<i64> {
        match self {
            ConfigValue::Integer(n) => Ok(*n),
            ConfigValue::String(s) => s
                .parse::<i64>()
                .map_err(|e| ConfigError::from_parse_int_error(key.to_string(), e)),
            other => Err(mismatch(key, "integer", other)),
        }
    }

    /// Interprets the value as an `i32`.
    pub fn as_i32(&self, key: &str) -> Result<i32> {
        self.narrow(key, "i32")
    }

    /// Interprets the value as a `u64`.
    pub fn as_u64(&self, key: &str) -> Result<u64> {
        match self {
            ConfigValue::String(s) => s
                .parse::<u64>()
                .map_err(|e| ConfigError::from_parse_int_error(key.to_string(), e)),
            _ => self.narrow(key, "u64"),
        }
    }

    /// Interprets the value as a `u32`.
    pub fn as_u32(&self, key: &str) -> Result<u32> {
        self.narrow(key, "u32")
    }

    /// Interprets the value as a `u16`, typically a port number.
    pub fn as_u16(&self, key: &str) -> Result<u16> {
        self.narrow(key, "u16")
    }

    /// Interprets the value as an `f64`. Accepts floats, integers and numeric strings.
    pub fn as_f64(&self, key: &str) -> Result<f64> {
        match self {
            ConfigValue::Float(n) => Ok(*n),
            ConfigValue::Integer(n) => Ok(*n as f64),
            ConfigValue::String(s) => s
                .parse::<f64>()
                .map_err(|e| ConfigError::from_parse_float_error(key.to_string(), e)),
            other => Err(mismatch(key, "float", other)),
        }
    }

    /// Parses a scalar into any type implementing `FromStr`.
    ///
    /// ```
    /// use ministruts::domain::ConfigValue;
    /// use std::net::IpAddr;
    ///
    /// let value = ConfigValue::from("10.0.0.5");
    /// let ip: IpAddr = value.parse("db.host").unwrap();
    /// assert_eq!(ip.to_string(), "10.0.0.5");
    /// ```
    pub fn parse<T>(&self, key: &str) -> Result<T>
    where
        T: FromStr,
        T::Err: std::error::Error + Send + Sync + 'static,
    {
        self.to_string_value(key)?
            .parse::<T>()
            .map_err(|e| ConfigError::TypeConversionError {
                key: key.to_string(),
                target_type: std::any::type_name::<T>().to_string(),
                source: Box::new(e),
            })
    }

    fn narrow<T>(&self, key: &str, target: &str) -> Result<T>
    where
        T: TryFrom<i64> + FromStr<Err = std::num::ParseIntError>,
        <T as TryFrom<i64>>::Error: std::error::Error + Send + Sync + 'static,
    {
        match self {
            ConfigValue::Integer(n) => {
                T::try_from(*n).map_err(|e| ConfigError::TypeConversionError {
                    key: key.to_string(),
                    target_type: target.to_string(),
                    source: Box::new(e),
                })
            }
            ConfigValue::String(s) => s
                .parse::<T>()
                .map_err(|e| ConfigError::from_parse_int_error(key.to_string(), e)),
            other => Err(mismatch(key, "integer", other)),
        }
    }
}

fn mismatch(key: &str, expected: &'static str, found: &ConfigValue) -> ConfigError {
    ConfigError::TypeMismatch {
        key: key.to_string(),
        expected,
        found: found.kind(),
    }
}

impl From<String> for ConfigValue {
    fn from(s: String) -> Self {
        ConfigValue::String(s)
    }
}

impl From<&str> for ConfigValue {
    fn from(s: &str) -> Self {
        ConfigValue::String(s.to_string())
    }
}

impl From<bool> for ConfigValue {
    fn from(b: bool) -> Self {
        ConfigValue::Bool(b)
    }
}

impl From<i64> for ConfigValue {
    fn from(n: i64) -> Self {
        ConfigValue::Integer(n)
    }
}

impl From<i32> for ConfigValue {
    fn from(n: i32) -> Self {
        ConfigValue::Integer(i64::from(n))
    }
}

impl From<u16> for ConfigValue {
    fn from(n: u16) -> Self {
        ConfigValue::Integer(i64::from(n))
    }
}

impl From<f64> for ConfigValue {
    fn from(n: f64) -> Self {
        ConfigValue::Float(n)
    }
}

impl From<Vec<ConfigValue>> for ConfigValue {
    fn from(items: Vec<ConfigValue>) -> Self {
        ConfigValue::List(items)
    }
}

impl From<BTreeMap<String, ConfigValue>> for ConfigValue {
    fn from(map: BTreeMap<String, ConfigValue>) -> Self {
        ConfigValue::Map(map)
    }
}

impl<T: Into<ConfigValue>> From<Option<T>> for ConfigValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(ConfigValue::Null, Into::into)
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigValue::Null => Ok(()),
            ConfigValue::Bool(b) => write!(f, "{}", b),
            ConfigValue::Integer(n) => write!(f, "{}", n),
            ConfigValue::Float(n) => write!(f, "{}", n),
            ConfigValue::String(s) => f.write_str(s),
            ConfigValue::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
            ConfigValue::Map(map) => {
                f.write_str("{")?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {}", k, v)?;
                }
                f.write_str("}")
            }
        }
    }
}
