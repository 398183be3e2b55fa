// SPDX-License-Identifier: MIT OR Apache-2.0

//! Application bootstrap.
//!
//! An [`AppContext`] owns the configuration store for one application
//! instance. Nothing is installed process-wide; callers hand the context to
//! whatever needs it.

use crate::adapters::messengers::messenger_from_config;
use crate::domain::{ConfigurationService, FrameworkResult};
use crate::ports::MessageSender;
use crate::service::ConfigStore;
use std::path::{Path, PathBuf};

/// Name of the configuration directory below the root when none is given.
pub const DEFAULT_CONFIG_DIR: &str = "config";

/// Options for [`AppContext::new`].
#[derive(Debug, Clone, Default)]
pub struct AppOptions {
    root_dir: PathBuf,
    config_dir: Option<PathBuf>,
    env_prefix: Option<String>,
    cli_args: Vec<String>,
}

impl AppOptions {
    /// Creates options for an application rooted at `root_dir`.
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
            ..Self::default()
        }
    }

    /// Overrides the configuration directory (default `<root>/config`).
    pub fn config_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config_dir = Some(dir.into());
        self
    }

    /// Reads environment variables starting with `prefix`.
    pub fn env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = Some(prefix.into());
        self
    }

    /// Applies command-line overrides.
    pub fn cli_args<S: Into<String>>(mut self, args: impl IntoIterator<Item = S>) -> Self {
        self.cli_args = args.into_iter().map(Into::into).collect();
        self
    }

    fn resolved_config_dir(&self) -> PathBuf {
        self.config_dir
            .clone()
            .unwrap_or_else(|| self.root_dir.join(DEFAULT_CONFIG_DIR))
    }
}

/// A bootstrapped application: its directories and configuration.
///
/// ```rust,no_run
/// use ministruts::service::{AppContext, AppOptions};
/// use ministruts::prelude::*;
///
/// # fn main() -> FrameworkResult<()> {
/// let ctx = AppContext::new(AppOptions::new("/srv/app").env_prefix("APP_"))?;
/// let root = ctx.config().get_str("app.dir.root")?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct AppContext {
    root_dir: PathBuf,
    config_dir: PathBuf,
    config: ConfigStore,
}

impl AppContext {
    /// Builds the configuration store from the options and records the
    /// application directories under `app.dir.root` and `app.dir.config`.
    ///
    /// # Errors
    ///
    /// Fails if the configuration directory is missing or one of its files
    /// cannot be parsed.
    pub fn new(options: AppOptions) -> FrameworkResult<Self> {
        let config_dir = options.resolved_config_dir();

        #[allow(unused_mut)]
        let mut builder = ConfigStore::builder().with_config_dir(&config_dir)?;

        #[cfg(feature = "env")]
        {
            if let Some(prefix) = &options.env_prefix {
                builder = builder.with_env_prefix(prefix.clone());
            }
        }

        #[cfg(feature = "cli")]
        {
            if !options.cli_args.is_empty() {
                builder = builder.with_cli_args(options.cli_args.clone());
            }
        }

        let mut config = builder.build()?;
        config.set_str("app.dir.root", options.root_dir.display().to_string())?;
        config.set_str("app.dir.config", config_dir.display().to_string())?;

        tracing::info!(
            "Application context ready: root={}, config={}, sources={:?}",
            options.root_dir.display(),
            config_dir.display(),
            config.source_names()
        );

        Ok(Self {
            root_dir: options.root_dir,
            config_dir,
            config,
        })
    }

    /// Returns the configuration store.
    pub fn config(&self) -> &ConfigStore {
        &self.config
    }

    /// Returns the configuration store for runtime changes.
    pub fn config_mut(&mut self) -> &mut ConfigStore {
        &mut self.config
    }

    /// Returns the application root directory.
    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    /// Returns the configuration directory.
    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Creates the messenger named by `messenger.default`.
    pub fn messenger(&self) -> FrameworkResult<Box<dyn MessageSender>> {
        messenger_from_config(&self.config)
    }
}
