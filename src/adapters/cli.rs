// SPDX-License-Identifier: MIT OR Apache-2.0

//! Command-line override configuration source adapter.
//!
//! Overrides given on the command line take precedence over every other
//! source. Values are always strings.

use crate::domain::{ConfigError, ConfigKey, ConfigValue, Result};
use crate::ports::ConfigSource;
use std::collections::HashMap;

/// Priority of command-line overrides, the highest of the built-in sources.
pub const CLI_PRIORITY: u8 = 3;

/// Configuration source adapter for command-line overrides.
///
/// Supported argument formats:
/// - `--key=value`
/// - `--key value`
/// - `-k value`
///
/// Arguments that don't form a valid key are ignored.
///
/// # Examples
///
/// ```rust
/// use ministruts::adapters::CommandLineAdapter;
/// use ministruts::domain::ConfigKey;
/// use ministruts::ports::ConfigSource;
///
/// let adapter = CommandLineAdapter::from_args(vec!["--db.host=10.0.0.5", "--db.port", "3306"]);
/// let host = adapter.get(&ConfigKey::new("db.host").unwrap()).unwrap();
/// assert_eq!(host.unwrap().as_str(), Some("10.0.0.5"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct CommandLineAdapter {
    values: HashMap<ConfigKey, String>,
}

impl CommandLineAdapter {
    /// Creates an adapter with no overrides.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an adapter from raw arguments.
    pub fn from_args<S: AsRef<str>>(args: Vec<S>) -> Self {
        let mut adapter = Self::new();
        adapter.parse_args(&args);
        adapter
    }

    /// Creates an adapter from the process arguments, skipping the program name.
    pub fn from_env_args() -> Self {
        let args: Vec<String> = std::env::args().skip(1).collect();
        Self::from_args(args)
    }

    /// Creates an adapter from a clap argument collecting `key=value` pairs.
    ///
    /// ```rust
    /// use clap::{Arg, ArgAction, Command};
    /// use ministruts::adapters::CommandLineAdapter;
    /// use ministruts::ports::ConfigSource;
    ///
    /// let matches = Command::new("app")
    ///     .arg(Arg::new("set").long("set").action(ArgAction::Append))
    ///     .get_matches_from(["app", "--set", "db.host=10.0.0.5"]);
    ///
    /// let adapter = CommandLineAdapter::from_arg_matches(&matches, "set").unwrap();
    /// assert_eq!(adapter.all_keys().unwrap().len(), 1);
    /// ```
    ///
    /// # Errors
    ///
    /// Fails with [`ConfigError::ParseError`] for a pair without `=` and with
    /// [`ConfigError::InvalidKey`] for a malformed key.
    pub fn from_arg_matches(matches: &clap::ArgMatches, id: &str) -> Result<Self> {
        let mut adapter = Self::new();
        let pairs = matches
            .try_get_many::<String>(id)
            .map_err(|e| ConfigError::ParseError {
                message: format!("Failed to read argument '{}'", id),
                source: Some(Box::new(e)),
            })?;

        for pair in pairs.into_iter().flatten() {
            let (key, value) = pair.split_once('=').ok_or_else(|| ConfigError::ParseError {
                message: format!("expected key=value, got '{}'", pair),
                source: None,
            })?;
            adapter.values.insert(ConfigKey::new(key)?, value.to_string());
        }

        Ok(adapter)
    }

    fn insert(&mut self, key: &str, value: &str) {
        match ConfigKey::new(key) {
            Ok(key) => {
                self.values.insert(key, value.to_string());
            }
            Err(e) => tracing::debug!("Ignoring command-line argument: {}", e),
        }
    }

    fn parse_args<S: AsRef<str>>(&mut self, args: &[S]) {
        let mut i = 0;
        while i < args.len() {
            let arg = args[i].as_ref();
            let next = args.get(i + 1).map(AsRef::as_ref);

            if let Some(long) = arg.strip_prefix("--") {
                if let Some((key, value)) = long.split_once('=') {
                    self.insert(key, value);
                    i += 1;
                    continue;
                }
                match next {
                    Some(value) if !value.starts_with('-') => {
                        self.insert(long, value);
                        i += 2;
                    }
                    _ => i += 1,
                }
            } else if arg.len() == 2 && arg.starts_with('-') {
                match next {
                    Some(value) if !value.starts_with('-') => {
                        self.insert(&arg[1..], value);
                        i += 2;
                    }
                    _ => i += 1,
                }
            } else {
                i += 1;
            }
        }
    }
}

impl ConfigSource for CommandLineAdapter {
    fn name(&self) -> &str {
        "cli"
    }

    fn priority(&self) -> u8 {
        CLI_PRIORITY
    }

    fn get(&self, key: &ConfigKey) -> Result<Option<ConfigValue>> {
        Ok(self.values.get(key).map(|v| ConfigValue::from(v.as_str())))
    }

    fn all_keys(&self) -> Result<Vec<ConfigKey>> {
        Ok(self.values.keys().cloned().collect())
    }

    fn reload(&mut self) -> Result<()> {
        // Command-line arguments don't change during runtime
        Ok(())
    }
}
