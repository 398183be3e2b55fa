// SPDX-License-Identifier: MIT OR Apache-2.0

//! The configuration store.
//!
//! `ConfigStore` merges its sources into one in-memory tree when it is built
//! and answers lookups from that tree. Runtime `set` calls write into the tree
//! and are remembered so they survive a [`reload`](ConfigStore::reload).

use crate::domain::{ConfigError, ConfigKey, ConfigValue, ConfigurationService, Result};
use crate::ports::ConfigSource;
use std::collections::BTreeMap;
use std::path::Path;

/// Hierarchical configuration store.
///
/// Sources are merged from lowest to highest priority; among sources with the
/// same priority the one added last wins. The store holds no locks: share it
/// behind an `RwLock` if concurrent handlers need to mutate it.
///
/// # Examples
///
/// ```rust
/// use ministruts::prelude::*;
///
/// # fn main() -> Result<()> {
/// let mut config = ConfigStore::new();
///
/// let host = ConfigKey::new("db.host")?;
/// assert_eq!(config.get_or(&host, "localhost"), ConfigValue::from("localhost"));
///
/// config.set(host.clone(), ConfigValue::from("10.0.0.5"));
/// assert_eq!(config.get(&host)?, ConfigValue::from("10.0.0.5"));
///
/// // parents resolve to the subtree
/// assert!(config.get_str("db")?.as_map().is_some());
/// # Ok(())
/// # }
/// ```
pub struct ConfigStore {
    /// Sources in merge order (lowest priority first)
    sources: Vec<Box<dyn ConfigSource>>,
    /// The merged tree; always a `ConfigValue::Map`
    root: ConfigValue,
    /// Runtime `set` calls, replayed after every rebuild
    overrides: Vec<(ConfigKey, ConfigValue)>,
}

impl ConfigStore {
    /// Creates an empty store with no sources.
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
            root: ConfigValue::Map(BTreeMap::new()),
            overrides: Vec::new(),
        }
    }

    /// Creates a builder for configuring a store with multiple sources.
    pub fn builder() -> ConfigStoreBuilder {
        ConfigStoreBuilder::new()
    }

    /// Creates a store from environment variables plus `config.yaml` in the
    /// OS configuration directory, if that file exists.
    pub fn with_defaults(app_name: &str, qualifier: &str) -> Result<Self> {
        #[allow(unused_mut)]
        let mut builder = Self::builder();

        #[cfg(feature = "env")]
        {
            builder = builder.with_env_vars();
        }

        #[cfg(feature = "yaml")]
        {
            use crate::adapters::ConfigFileAdapter;
            if let Ok(adapter) = ConfigFileAdapter::from_default_location(app_name, qualifier) {
                builder = builder.with_source(Box::new(adapter));
            }
        }
        #[cfg(not(feature = "yaml"))]
        let _ = (app_name, qualifier);

        builder.build()
    }

    /// Adds a source and rebuilds the tree.
    ///
    /// # Errors
    ///
    /// Fails if the new source cannot enumerate its entries; the store is left
    /// unchanged in that case.
    pub fn add_source(&mut self, source: Box<dyn ConfigSource>) -> Result<()> {
        if let Err(e) = source.entries() {
            tracing::debug!("Rejecting source '{}': {}", source.name(), e);
            return Err(e);
        }
        self.sources.push(source);
        self.sort_sources();
        self.rebuild(false)
    }

    /// Returns the source names in merge order (lowest priority first).
    pub fn source_names(&self) -> Vec<&str> {
        self.sources.iter().map(|s| s.name()).collect()
    }

    /// Returns every leaf key in the tree, sorted.
    pub fn keys(&self) -> Vec<ConfigKey> {
        let mut keys = Vec::new();
        if let ConfigValue::Map(map) = &self.root {
            for (segment, value) in map {
                collect_leaves(segment, value, &mut keys);
            }
        }
        keys
    }

    /// Returns the whole tree as a `ConfigValue::Map`.
    pub fn as_value(&self) -> &ConfigValue {
        &self.root
    }

    /// Reloads every source, rebuilds the tree, and replays runtime overrides.
    ///
    /// A source that fails to reload is logged and skipped; its previously
    /// loaded values are still merged.
    pub fn reload(&mut self) -> Result<()> {
        for source in &mut self.sources {
            if let Err(e) = source.reload() {
                tracing::warn!("Failed to reload source '{}': {}", source.name(), e);
            }
        }
        self.rebuild(false)
    }

    fn sort_sources(&mut self) {
        // stable, so equal priorities keep insertion order
        self.sources.sort_by_key(|s| s.priority());
    }

    fn rebuild(&mut self, strict: bool) -> Result<()> {
        let mut root = ConfigValue::Map(BTreeMap::new());

        for source in &self.sources {
            match source.entries() {
                Ok(entries) => {
                    tracing::debug!(
                        "Merging {} keys from source '{}' (priority {})",
                        entries.len(),
                        source.name(),
                        source.priority()
                    );
                    for (key, value) in entries {
                        insert_path(&mut root, &key, value);
                    }
                }
                Err(e) if strict => return Err(e),
                Err(e) => {
                    tracing::warn!("Skipping source '{}': {}", source.name(), e);
                }
            }
        }

        for (key, value) in &self.overrides {
            insert_path(&mut root, key, value.clone());
        }

        self.root = root;
        Ok(())
    }
}

fn lookup<'a>(root: &'a ConfigValue, key: &ConfigKey) -> Option<&'a ConfigValue> {
    key.segments().try_fold(root, |node, segment| match node {
        ConfigValue::Map(map) => map.get(segment),
        ConfigValue::List(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}

fn insert_path(root: &mut ConfigValue, key: &ConfigKey, value: ConfigValue) {
    let segments: Vec<&str> = key.segments().collect();
    insert_segments(root, &segments, value);
}

fn insert_segments(slot: &mut ConfigValue, segments: &[&str], value: ConfigValue) {
    let Some((head, rest)) = segments.split_first() else {
        *slot = nest_entries(value);
        return;
    };

    if let ConfigValue::List(items) = slot {
        if let Some(item) = head.parse::<usize>().ok().and_then(|i| items.get_mut(i)) {
            insert_segments(item, rest, value);
            return;
        }
    }

    if !matches!(slot, ConfigValue::Map(_)) {
        *slot = ConfigValue::Map(BTreeMap::new());
    }
    if let ConfigValue::Map(map) = slot {
        let child = map.entry((*head).to_string()).or_insert(ConfigValue::Null);
        insert_segments(child, rest, value);
    }
}

// Map entry names may themselves be paths ("x.y", "p/q"); store them nested so
// every leaf stays addressable by a key.
fn nest_entries(value: ConfigValue) -> ConfigValue {
    match value {
        ConfigValue::Map(map) => {
            let mut tree = ConfigValue::Map(BTreeMap::new());
            for (name, child) in map {
                match ConfigKey::new(&name) {
                    Ok(key) => insert_path(&mut tree, &key, child),
                    Err(e) => tracing::debug!("Skipping map entry: {}", e),
                }
            }
            tree
        }
        ConfigValue::List(items) => ConfigValue::List(items.into_iter().map(nest_entries).collect()),
        other => other,
    }
}

fn collect_leaves(path: &str, value: &ConfigValue, keys: &mut Vec<ConfigKey>) {
    match value {
        ConfigValue::Map(map) if !map.is_empty() => {
            for (segment, child) in map {
                collect_leaves(&format!("{}.{}", path, segment), child, keys);
            }
        }
        _ => {
            if let Ok(key) = ConfigKey::new(path) {
                keys.push(key);
            }
        }
    }
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ConfigStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigStore")
            .field("sources", &self.source_names())
            .field("keys", &self.keys().len())
            .field("overrides", &self.overrides.len())
            .finish()
    }
}

impl ConfigurationService for ConfigStore {
    fn get_with(&self, key: &ConfigKey, fallback: Option<ConfigValue>) -> Result<ConfigValue> {
        if let Some(value) = lookup(&self.root, key) {
            return Ok(value.clone());
        }

        match fallback {
            Some(fallback) => {
                tracing::debug!("Key '{}' not set, using fallback", key);
                Ok(fallback)
            }
            None => Err(ConfigError::ConfigKeyNotFound {
                key: key.to_string(),
            }),
        }
    }

    fn set(&mut self, key: ConfigKey, value: ConfigValue) {
        insert_path(&mut self.root, &key, value.clone());
        self.overrides.retain(|(k, _)| k != &key);
        self.overrides.push((key, value));
    }

    fn has(&self, key: &ConfigKey) -> bool {
        lookup(&self.root, key).is_some()
    }
}

/// Builder for creating a [`ConfigStore`] with multiple sources.
///
/// # Examples
///
/// ```rust,no_run
/// use ministruts::service::ConfigStore;
///
/// # fn main() -> ministruts::domain::Result<()> {
/// let store = ConfigStore::builder()
///     .with_config_dir("/srv/app/config")?
///     .with_env_prefix("APP_")
///     .with_cli_args(std::env::args().skip(1).collect())
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct ConfigStoreBuilder {
    sources: Vec<Box<dyn ConfigSource>>,
}

impl ConfigStoreBuilder {
    /// Creates a builder with no sources.
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
        }
    }

    /// Adds a source.
    pub fn with_source(mut self, source: Box<dyn ConfigSource>) -> Self {
        self.sources.push(source);
        self
    }

    /// Adds `config.dist.*` and `config.*` from `dir`.
    pub fn with_config_dir(mut self, dir: impl AsRef<Path>) -> Result<Self> {
        for adapter in crate::adapters::config_dir::discover(dir.as_ref())? {
            self.sources.push(Box::new(adapter));
        }
        Ok(self)
    }

    /// Adds a YAML file.
    #[cfg(feature = "yaml")]
    pub fn with_yaml_file(self, path: impl AsRef<Path>) -> Result<Self> {
        use crate::adapters::{ConfigFileAdapter, YamlParser};
        let adapter = ConfigFileAdapter::with_parser(path, Box::new(YamlParser::new()))?;
        Ok(self.with_source(Box::new(adapter)))
    }

    /// Adds a properties file.
    pub fn with_properties_file(self, path: impl AsRef<Path>) -> Result<Self> {
        use crate::adapters::{ConfigFileAdapter, PropertiesParser};
        let adapter = ConfigFileAdapter::with_parser(path, Box::new(PropertiesParser::new()))?;
        Ok(self.with_source(Box::new(adapter)))
    }

    /// Adds all environment variables, lowercased, `_` mapped to `.`.
    #[cfg(feature = "env")]
    pub fn with_env_vars(self) -> Self {
        use crate::adapters::EnvVarAdapter;
        self.with_source(Box::new(EnvVarAdapter::new().lowercase_keys(true)))
    }

    /// Adds environment variables starting with `prefix`, lowercased, `_` mapped to `.`.
    #[cfg(feature = "env")]
    pub fn with_env_prefix(self, prefix: impl Into<String>) -> Self {
        use crate::adapters::EnvVarAdapter;
        self.with_source(Box::new(
            EnvVarAdapter::with_prefix(prefix).lowercase_keys(true),
        ))
    }

    /// Adds command-line overrides.
    #[cfg(feature = "cli")]
    pub fn with_cli_args<S: AsRef<str>>(self, args: Vec<S>) -> Self {
        use crate::adapters::CommandLineAdapter;
        self.with_source(Box::new(CommandLineAdapter::from_args(args)))
    }

    /// Builds the store, merging every source.
    ///
    /// # Errors
    ///
    /// Propagates the first source that fails to enumerate its entries.
    pub fn build(self) -> Result<ConfigStore> {
        let mut store = ConfigStore::new();
        store.sources = self.sources;
        store.sort_sources();
        store.rebuild(true)?;

        tracing::debug!(
            "Built configuration store with {} sources and {} keys",
            store.sources.len(),
            store.keys().len()
        );
        Ok(store)
    }
}

impl Default for ConfigStoreBuilder {
    fn default() -> Self {
        Self::new()
    }
}
