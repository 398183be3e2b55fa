// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapters layer containing implementations of the ports.
//!
//! Configuration sources (files, environment variables, command-line
//! overrides), file parsers, and messenger channels live here.

#[cfg(feature = "cli")]
pub mod cli;
pub mod config_dir;
#[cfg(feature = "env")]
pub mod env_var;
pub mod file;
pub mod messengers;
pub mod properties_file;
#[cfg(feature = "yaml")]
pub mod yaml_file;

// Re-export adapters based on feature flags
#[cfg(feature = "cli")]
pub use cli::CommandLineAdapter;
#[cfg(feature = "env")]
pub use env_var::EnvVarAdapter;
pub use file::ConfigFileAdapter;
pub use messengers::{ClickatellMessenger, IrcMessenger, MessengerKind, NexmoMessenger};
pub use properties_file::PropertiesParser;
#[cfg(feature = "yaml")]
pub use yaml_file::YamlParser;
