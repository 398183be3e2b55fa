// SPDX-License-Identifier: MIT OR Apache-2.0

//! Logging bootstrap driven by the `log.*` configuration keys.

use crate::domain::{ConfigKey, ConfigValue, ConfigurationService, FrameworkError, FrameworkResult};
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Level used when `log.level` is absent or unparsable.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Logging settings read from the configuration store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    /// Filter directive, e.g. `info` or `ministruts=debug,warn`
    pub level: String,
    /// Log file; stdout when `None`
    pub file: Option<PathBuf>,
    /// Whether to emit ANSI colors (ignored for files)
    pub ansi: bool,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            file: None,
            ansi: true,
        }
    }
}

impl LogSettings {
    /// Reads `log.level`, `log.file` and `log.ansi`.
    pub fn from_config(config: &dyn ConfigurationService) -> FrameworkResult<Self> {
        let level_key = ConfigKey::new("log.level")?;
        let file_key = ConfigKey::new("log.file")?;
        let ansi_key = ConfigKey::new("log.ansi")?;

        let level = config
            .get_with(&level_key, Some(ConfigValue::from(DEFAULT_LOG_LEVEL)))?
            .to_string_value(level_key.as_str())?;
        let file = config.get_optional_string(&file_key)?.map(PathBuf::from);
        let ansi = config
            .get_with(&ansi_key, Some(ConfigValue::Bool(true)))?
            .as_bool(ansi_key.as_str())?;

        Ok(Self { level, file, ansi })
    }
}

/// Installs a global `tracing` subscriber for `settings`.
///
/// # Errors
///
/// Returns [`FrameworkError::Infrastructure`] if the log file cannot be opened
/// or a global subscriber is already installed.
pub fn init_logging(settings: &LogSettings) -> FrameworkResult<()> {
    let filter = EnvFilter::try_new(&settings.level).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL));

    let result = match &settings.file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| {
                    FrameworkError::infrastructure(format!("cannot open log file {}", path.display()), e)
                })?;

            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .with_ansi(false)
                        .with_target(true)
                        .with_writer(Mutex::new(file)),
                )
                .try_init()
        }
        None => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_ansi(settings.ansi).with_target(true))
            .try_init(),
    };

    result.map_err(|e| FrameworkError::infrastructure("logging already initialized", e))?;
    tracing::debug!("Logging initialized at level '{}'", settings.level);
    Ok(())
}
