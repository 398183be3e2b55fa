// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration file source adapter.
//!
//! `ConfigFileAdapter` reads one configuration file with the parser matching
//! its extension and serves the flattened values as a [`ConfigSource`].

use crate::adapters::PropertiesParser;
use crate::domain::{ConfigError, ConfigKey, ConfigValue, Result};
use crate::ports::{ConfigParser, ConfigSource};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Maximum allowed size for a configuration file (10MB)
const MAX_CONFIG_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Default priority of configuration files.
pub const FILE_PRIORITY: u8 = 1;

/// Returns a parser for the given file extension, if one is compiled in.
pub fn parser_for(extension: &str) -> Option<Box<dyn ConfigParser>> {
    #[allow(unused_mut)]
    let mut parsers: Vec<Box<dyn ConfigParser>> = vec![Box::new(PropertiesParser::new())];
    #[cfg(feature = "yaml")]
    parsers.push(Box::new(crate::adapters::YamlParser::new()));

    parsers.into_iter().find(|p| p.supports(extension))
}

/// Returns every file extension a compiled-in parser handles, in lookup order.
pub fn supported_extensions() -> Vec<&'static str> {
    let mut extensions = vec!["properties"];
    if cfg!(feature = "yaml") {
        extensions.extend(["yaml", "yml"]);
    }
    extensions
}

fn display_name(path: &Path) -> &str {
    path.file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("<unknown>")
}

/// Configuration source adapter for a single file.
///
/// # Examples
///
/// ```rust,no_run
/// use ministruts::adapters::ConfigFileAdapter;
/// use ministruts::ports::ConfigSource;
///
/// let adapter = ConfigFileAdapter::from_file("/etc/myapp/config.properties").unwrap();
/// assert_eq!(adapter.name(), "properties-file");
/// ```
#[derive(Debug)]
pub struct ConfigFileAdapter {
    name: String,
    file_path: PathBuf,
    priority: u8,
    values: HashMap<ConfigKey, ConfigValue>,
    parser: Box<dyn ConfigParser>,
}

impl ConfigFileAdapter {
    /// Loads a file, selecting the parser by its extension.
    ///
    /// # Errors
    ///
    /// Fails with [`ConfigError::SourceError`] if no parser handles the
    /// extension or the file can't be read, and with
    /// [`ConfigError::ParseError`] if the content is invalid.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        let parser = parser_for(extension).ok_or_else(|| ConfigError::SourceError {
            source_name: "config-file".to_string(),
            message: format!("No parser for configuration file: {}", display_name(path)),
            source: None,
        })?;
        Self::with_parser(path, parser)
    }

    /// Loads a file with an explicit parser, ignoring its extension.
    pub fn with_parser<P: AsRef<Path>>(path: P, parser: Box<dyn ConfigParser>) -> Result<Self> {
        let file_path = path.as_ref().to_path_buf();
        let name = format!(
            "{}-file",
            parser.supported_extensions().first().copied().unwrap_or("config")
        );

        // Canonicalize path to prevent directory traversal attacks
        let canonical_path = file_path.canonicalize().map_err(|e| ConfigError::SourceError {
            source_name: name.clone(),
            message: format!("Invalid or inaccessible path: {}", display_name(&file_path)),
            source: Some(Box::new(e)),
        })?;

        let mut adapter = Self {
            name,
            file_path: canonical_path,
            priority: FILE_PRIORITY,
            values: HashMap::new(),
            parser,
        };
        adapter.values = adapter.read_values()?;

        tracing::debug!(
            "Loaded {} keys from {} ({})",
            adapter.values.len(),
            display_name(&adapter.file_path),
            adapter.name
        );

        Ok(adapter)
    }

    /// Loads `config.yaml` from the OS-appropriate configuration directory.
    ///
    /// ```rust,no_run
    /// use ministruts::adapters::ConfigFileAdapter;
    ///
    /// let adapter = ConfigFileAdapter::from_default_location("myapp", "com.example").unwrap();
    /// ```
    #[cfg(feature = "yaml")]
    pub fn from_default_location(app_name: &str, qualifier: &str) -> Result<Self> {
        let proj_dirs = directories::ProjectDirs::from(qualifier, "", app_name).ok_or_else(|| {
            ConfigError::SourceError {
                source_name: "yaml-file".to_string(),
                message: "Failed to determine project directories".to_string(),
                source: None,
            }
        })?;

        Self::from_file(proj_dirs.config_dir().join("config.yaml"))
    }

    /// Overrides the priority of this source.
    pub fn with_priority(mut self, priority: u8) -> Self {
        self.priority = priority;
        self
    }

    /// Returns the canonical path of the configuration file.
    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    fn read_values(&self) -> Result<HashMap<ConfigKey, ConfigValue>> {
        let file_name = display_name(&self.file_path);

        // Check file size before reading to prevent DoS via large files
        let metadata = fs::metadata(&self.file_path).map_err(|e| ConfigError::SourceError {
            source_name: self.name.clone(),
            message: format!("Failed to read file metadata: {}", file_name),
            source: Some(Box::new(e)),
        })?;

        if metadata.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::SourceError {
                source_name: self.name.clone(),
                message: format!(
                    "Configuration file too large: {} bytes (max {} bytes)",
                    metadata.len(),
                    MAX_CONFIG_FILE_SIZE
                ),
                source: None,
            });
        }

        let content = fs::read_to_string(&self.file_path).map_err(|e| ConfigError::SourceError {
            source_name: self.name.clone(),
            message: format!("Failed to read configuration file: {}", file_name),
            source: Some(Box::new(e)),
        })?;

        let mut values = HashMap::new();
        for (key, value) in self.parser.parse(&content)? {
            match ConfigKey::new(&key) {
                Ok(key) => {
                    values.insert(key, value);
                }
                Err(e) => tracing::debug!("Skipping key in {}: {}", file_name, e),
            }
        }
        Ok(values)
    }
}

impl ConfigSource for ConfigFileAdapter {
    fn name(&self) -> &str {
        &self.name
    }

    fn priority(&self) -> u8 {
        self.priority
    }

    fn get(&self, key: &ConfigKey) -> Result<Option<ConfigValue>> {
        Ok(self.values.get(key).cloned())
    }

    fn all_keys(&self) -> Result<Vec<ConfigKey>> {
        Ok(self.values.keys().cloned().collect())
    }

    fn reload(&mut self) -> Result<()> {
        self.values = self.read_values()?;
        Ok(())
    }
}
