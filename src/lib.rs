// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration core and collaborator contracts for a Struts-style web
//! application framework.
//!
//! The heart of the crate is [`ConfigStore`](service::ConfigStore), a
//! hierarchical key/value store addressed by dotted (or slashed) keys such as
//! `db.main.host`. It merges configuration from layered sources and answers
//! lookups with an optional fallback that is returned, never stored, on a miss.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain Layer**: Core types and contracts (`ConfigKey`, `ConfigValue`, errors, `Dao`)
//! - **Ports**: Trait definitions (`ConfigSource`, `ConfigParser`, `MessageSender`)
//! - **Adapters**: Files, environment variables, command line, messenger stubs
//! - **Service**: The store, application bootstrap and logging setup
//!
//! # Sources and precedence
//!
//! | Source                        | Priority |
//! |-------------------------------|----------|
//! | `config.dist.{yaml,properties}` | 0      |
//! | `config.{yaml,properties}`    | 1        |
//! | environment variables         | 2        |
//! | command-line overrides        | 3        |
//! | runtime `set`                 | always wins, survives reload |
//!
//! # Feature Flags
//!
//! - `yaml`: Enable YAML file support (default)
//! - `env`: Enable environment variable support (default)
//! - `cli`: Enable command-line override support, including clap `ArgMatches` (default)
//! - `full`: Enable all features
//!
//! # Quick Start
//!
//! ```rust
//! use ministruts::prelude::*;
//!
//! # fn main() -> Result<()> {
//! let mut config = ConfigStore::builder()
//!     .with_cli_args(vec!["--db.main.host=10.0.0.5"])
//!     .build()?;
//!
//! let host = config.get_str("db.main.host")?;
//! assert_eq!(host.as_str(), Some("10.0.0.5"));
//!
//! let port = config.get_str_or("db.main.port", 3306)?;
//! assert_eq!(port.as_u16("db.main.port")?, 3306);
//!
//! config.set_str("db.main.host", "localhost")?;
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;
pub mod signals;

/// Commonly used types and traits.
///
/// This module re-exports the most commonly used types and traits for convenient access.
pub mod prelude {
    pub use crate::domain::{
        ConfigError, ConfigKey, ConfigValue, ConfigurationService, FrameworkError,
        FrameworkResult, Result,
    };
    pub use crate::ports::{ConfigParser, ConfigSource, MessageSender};
    pub use crate::service::{AppContext, AppOptions, ConfigStore, ConfigStoreBuilder};

    // Re-export adapters based on feature flags
    #[cfg(feature = "cli")]
    pub use crate::adapters::CommandLineAdapter;
    #[cfg(feature = "env")]
    pub use crate::adapters::EnvVarAdapter;
    #[cfg(feature = "yaml")]
    pub use crate::adapters::YamlParser;
    pub use crate::adapters::{ConfigFileAdapter, PropertiesParser};
}
