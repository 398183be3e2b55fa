// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration directory discovery.
//!
//! An application's configuration directory holds a shipped defaults file,
//! `config.dist.<ext>`, and an optional local file, `config.<ext>`. The local
//! file overrides the defaults.

use crate::adapters::file::{supported_extensions, FILE_PRIORITY};
use crate::adapters::ConfigFileAdapter;
use crate::domain::{ConfigError, Result};
use std::path::Path;

/// Priority of `config.dist.*` files, below regular configuration files.
pub const DIST_PRIORITY: u8 = 0;

/// Loads every configuration file found in `dir`.
///
/// For each supported extension, `config.dist.<ext>` is loaded at
/// [`DIST_PRIORITY`] and `config.<ext>` at [`FILE_PRIORITY`]. Missing files
/// are skipped; an empty directory yields no sources.
///
/// # Errors
///
/// Fails with [`ConfigError::SourceError`] if `dir` is not a directory, and
/// propagates any read or parse failure of a file that does exist.
pub fn discover(dir: &Path) -> Result<Vec<ConfigFileAdapter>> {
    if !dir.is_dir() {
        return Err(ConfigError::SourceError {
            source_name: "config-dir".to_string(),
            message: format!("Not a directory: {}", dir.display()),
            source: None,
        });
    }

    let mut found = Vec::new();
    for (stem, priority) in [("config.dist", DIST_PRIORITY), ("config", FILE_PRIORITY)] {
        for extension in supported_extensions() {
            let path = dir.join(format!("{}.{}", stem, extension));
            if path.is_file() {
                tracing::debug!("Found configuration file {}", path.display());
                found.push(ConfigFileAdapter::from_file(&path)?.with_priority(priority));
            }
        }
    }

    if found.is_empty() {
        tracing::debug!("No configuration files in {}", dir.display());
    }
    Ok(found)
}
