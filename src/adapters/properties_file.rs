// SPDX-License-Identifier: MIT OR Apache-2.0

//! Properties file parser.
//!
//! The format is one `key = value` pair per line. Keys are already dotted, so
//! nothing is flattened. Values are kept as strings; typed access goes through
//! the `ConfigValue` accessors.
//!
//! ```text
//! # database
//! db.main.connector = mysql
//! db.main.host      = 10.0.0.5
//! app.motd          = first line \
//!                     continued
//! ```

use crate::domain::{ConfigError, ConfigValue, Result};
use crate::ports::ConfigParser;
use std::collections::HashMap;

const COMMENT_MARKERS: [char; 3] = ['#', ';', '!'];

/// Parser for `.properties` files.
#[derive(Debug, Clone, Default)]
pub struct PropertiesParser;

impl PropertiesParser {
    /// Creates a new properties parser.
    pub fn new() -> Self {
        PropertiesParser
    }
}

impl ConfigParser for PropertiesParser {
    fn parse(&self, content: &str) -> Result<HashMap<String, ConfigValue>> {
        let mut result = HashMap::new();
        let mut lines = content.lines().enumerate();

        while let Some((index, raw)) = lines.next() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with(COMMENT_MARKERS) {
                continue;
            }

            // a trailing backslash continues the value on the next line
            let mut logical = line.to_string();
            while logical.ends_with('\\') {
                logical.pop();
                match lines.next() {
                    Some((_, next)) => logical.push_str(next.trim()),
                    None => break,
                }
            }

            let (key, value) = logical.split_once('=').ok_or_else(|| ConfigError::ParseError {
                message: format!("line {}: expected 'key = value'", index + 1),
                source: None,
            })?;

            let key = key.trim();
            if key.is_empty() {
                return Err(ConfigError::ParseError {
                    message: format!("line {}: missing key", index + 1),
                    source: None,
                });
            }

            result.insert(key.to_string(), ConfigValue::from(value.trim()));
        }

        Ok(result)
    }

    fn supported_extensions(&self) -> &[&str] {
        &["properties"]
    }
}
