// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the framework.
//!
//! Two layers are defined here. [`ConfigError`] covers everything that can go
//! wrong while building or querying the configuration store. [`FrameworkError`]
//! is the wider taxonomy surfaced by collaborators (messengers, DAOs, the
//! application context) and wraps configuration failures.
//!
//! Nothing in this crate retries or recovers from these errors internally;
//! they are always returned to the immediate caller.

use std::num::{ParseFloatError, ParseIntError};
use std::str::ParseBoolError;
use thiserror::Error;

/// The error type for configuration operations.
///
/// # Examples
///
/// ```
/// use ministruts::domain::errors::ConfigError;
///
/// fn get_config_value() -> Result<String, ConfigError> {
///     Err(ConfigError::ConfigKeyNotFound {
///         key: "database.host".to_string(),
///     })
/// }
/// ```
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// The requested configuration key was not found and no fallback was given.
    #[error("Configuration key not found: {key}")]
    ConfigKeyNotFound {
        /// The key that was not found
        key: String,
    },

    /// A configuration key is malformed (empty, or containing an empty segment).
    #[error("Invalid configuration key '{key}': {reason}")]
    InvalidKey {
        /// The rejected key text
        key: String,
        /// Why the key was rejected
        reason: String,
    },

    /// Failed to convert a configuration value to the requested type.
    #[error(
        "Failed to convert configuration value for key '{key}' to type {target_type}: {source}"
    )]
    TypeConversionError {
        /// The key being converted
        key: String,
        /// The target type name
        target_type: String,
        /// The underlying conversion error
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The stored value has a shape the requested accessor cannot handle.
    #[error("Configuration value for key '{key}' is a {found}, expected {expected}")]
    TypeMismatch {
        /// The key being converted
        key: String,
        /// The kind of value the accessor expects
        expected: &'static str,
        /// The kind of value actually stored
        found: &'static str,
    },

    /// An error occurred in a configuration source.
    #[error("Configuration source '{source_name}' error: {message}")]
    SourceError {
        /// The name of the source that encountered the error
        source_name: String,
        /// The error message
        message: String,
        /// The underlying error, if any
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Failed to parse a configuration file or value.
    #[error("Failed to parse configuration: {message}")]
    ParseError {
        /// The error message
        message: String,
        /// The underlying parsing error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// An I/O error occurred while reading configuration.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ConfigError {
    /// Creates a TypeConversionError from a ParseIntError.
    pub fn from_parse_int_error(key: String, err: ParseIntError) -> Self {
        ConfigError::TypeConversionError {
            key,
            target_type: "integer".to_string(),
            source: Box::new(err),
        }
    }

    /// Creates a TypeConversionError from a ParseFloatError.
    pub fn from_parse_float_error(key: String, err: ParseFloatError) -> Self {
        ConfigError::TypeConversionError {
            key,
            target_type: "float".to_string(),
            source: Box::new(err),
        }
    }

    /// Creates a TypeConversionError from a ParseBoolError.
    pub fn from_parse_bool_error(key: String, err: ParseBoolError) -> Self {
        ConfigError::TypeConversionError {
            key,
            target_type: "boolean".to_string(),
            source: Box::new(err),
        }
    }

    /// Returns `true` if this is a missing-key error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ConfigError::ConfigKeyNotFound { .. })
    }
}

/// A specialized Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// The error taxonomy shared by framework collaborators.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FrameworkError {
    /// A configuration lookup or load failed.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A stubbed extension point was invoked. Never transient.
    #[error("Not implemented: {feature}")]
    Unimplemented {
        /// The feature that has not been built
        feature: String,
    },

    /// A shared resource was mutated concurrently without synchronization.
    #[error("Concurrent modification of {resource}")]
    ConcurrentModification {
        /// The resource that was modified
        resource: String,
    },

    /// A downstream database, network or socket failure.
    #[error("Infrastructure failure: {message}")]
    Infrastructure {
        /// The error message
        message: String,
        /// The underlying error, if any
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl FrameworkError {
    /// Creates an `Unimplemented` error for the named feature.
    pub fn unimplemented(feature: impl Into<String>) -> Self {
        FrameworkError::Unimplemented {
            feature: feature.into(),
        }
    }

    /// Creates an `Infrastructure` error wrapping the given source.
    pub fn infrastructure<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        FrameworkError::Infrastructure {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

/// A specialized Result type for framework collaborators.
pub type FrameworkResult<T> = std::result::Result<T, FrameworkError>;
