// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ports layer containing trait definitions.
//!
//! These traits define the seams of the framework core: where configuration
//! comes from, how files are parsed, and how messages leave the process.
//! Adapters in the adapters layer implement them.

pub mod messenger;
pub mod parser;
pub mod source;

// Re-export commonly used types
pub use messenger::MessageSender;
pub use parser::ConfigParser;
pub use source::ConfigSource;
