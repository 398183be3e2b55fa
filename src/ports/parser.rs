// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration parser trait definition.
//!
//! A `ConfigParser` turns the text of a configuration file into a flat map of
//! dotted keys to values. Nested mappings are flattened; lists are kept whole.

use crate::domain::{ConfigValue, Result};
use std::collections::HashMap;
use std::fmt::Debug;

/// A trait for parsing configuration files.
///
/// # Key Format
///
/// Parsers flatten nested structures using dot notation. A YAML document
///
/// ```yaml
/// db:
///   main:
///     host: localhost
///     port: 3306
/// ```
///
/// parses into `db.main.host -> "localhost"` and `db.main.port -> 3306`.
pub trait ConfigParser: Debug + Send + Sync {
    /// Parses configuration content into a flat key-value map.
    ///
    /// # Errors
    ///
    /// Returns [`crate::domain::ConfigError::ParseError`] when the content is
    /// not valid for this format.
    fn parse(&self, content: &str) -> Result<HashMap<String, ConfigValue>>;

    /// Returns the file extensions (without the leading dot) this parser handles.
    fn supported_extensions(&self) -> &[&str];

    /// Returns `true` if this parser handles files with `extension`.
    fn supports(&self, extension: &str) -> bool {
        self.supported_extensions()
            .iter()
            .any(|e| e.eq_ignore_ascii_case(extension))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct FlatteningParser;

    impl ConfigParser for FlatteningParser {
        fn parse(&self, _content: &str) -> Result<HashMap<String, ConfigValue>> {
            let mut map = HashMap::new();
            map.insert("database.host".to_string(), ConfigValue::from("localhost"));
            map.insert("database.port".to_string(), ConfigValue::from(5432));
            Ok(map)
        }

        fn supported_extensions(&self) -> &[&str] {
            &["flat", "fl"]
        }
    }

    #[test]
    fn test_flattening_parser() {
        let result = FlatteningParser.parse("").unwrap();
        assert_eq!(result.len(), 2);
        assert_eq!(result.get("database.port"), Some(&ConfigValue::from(5432)));
    }

    #[test]
    fn test_supports_is_case_insensitive() {
        assert!(FlatteningParser.supports("flat"));
        assert!(FlatteningParser.supports("FL"));
        assert!(!FlatteningParser.supports("yaml"));
    }
}
