// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain layer containing core types and contracts.
//!
//! This module holds the configuration model (keys, values, errors), the
//! `ConfigurationService` contract, and the DAO association contract. It is
//! independent of any concrete configuration source.

pub mod config_key;
pub mod config_value;
pub mod dao;
pub mod errors;
pub mod service;

// Re-export commonly used types
pub use config_key::ConfigKey;
pub use config_value::ConfigValue;
pub use dao::{ConnectionSettings, Dao, PersistableObject};
pub use errors::{ConfigError, FrameworkError, FrameworkResult, Result};
pub use service::ConfigurationService;
