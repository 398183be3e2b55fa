// SPDX-License-Identifier: MIT OR Apache-2.0

//! Service layer: the configuration store, application bootstrap and logging.

pub mod config_store;
pub mod context;
pub mod logging;

// Re-export commonly used types
pub use config_store::{ConfigStore, ConfigStoreBuilder};
pub use context::{AppContext, AppOptions};
pub use logging::{init_logging, LogSettings};
