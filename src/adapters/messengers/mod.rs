// SPDX-License-Identifier: MIT OR Apache-2.0

//! Messenger implementations and the factory selecting one by configuration.

pub mod clickatell;
pub mod irc;
pub mod nexmo;

pub use clickatell::ClickatellMessenger;
pub use irc::IrcMessenger;
pub use nexmo::NexmoMessenger;

use crate::domain::{ConfigError, ConfigKey, ConfigurationService, FrameworkResult};
use crate::ports::MessageSender;
use std::fmt;
use std::str::FromStr;

/// Configuration key naming the default messenger.
pub const DEFAULT_MESSENGER_KEY: &str = "messenger.default";

/// The available messenger channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessengerKind {
    /// IRC
    Irc,
    /// SMS via Clickatell
    Clickatell,
    /// SMS via Nexmo
    Nexmo,
}

impl MessengerKind {
    /// Returns the configuration name of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            MessengerKind::Irc => "irc",
            MessengerKind::Clickatell => "clickatell",
            MessengerKind::Nexmo => "nexmo",
        }
    }
}

impl FromStr for MessengerKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "irc" => Ok(MessengerKind::Irc),
            "clickatell" => Ok(MessengerKind::Clickatell),
            "nexmo" => Ok(MessengerKind::Nexmo),
            other => Err(ConfigError::ParseError {
                message: format!("unknown messenger '{}'", other),
                source: None,
            }),
        }
    }
}

impl fmt::Display for MessengerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Creates the messenger of the given kind from its configuration.
///
/// ```rust
/// use ministruts::adapters::messengers::{create_messenger, MessengerKind};
/// use ministruts::prelude::*;
///
/// let mut config = ConfigStore::new();
/// config.set_str("sms.nexmo.api_key", "key").unwrap();
/// config.set_str("sms.nexmo.api_secret", "secret").unwrap();
///
/// let messenger = create_messenger(MessengerKind::Nexmo, &config).unwrap();
/// assert!(messenger.send("+4917012345", "hello").is_err());
/// ```
pub fn create_messenger(
    kind: MessengerKind,
    config: &dyn ConfigurationService,
) -> FrameworkResult<Box<dyn MessageSender>> {
    tracing::debug!("Creating {} messenger", kind);
    let messenger: Box<dyn MessageSender> = match kind {
        MessengerKind::Irc => Box::new(IrcMessenger::from_config(config)?),
        MessengerKind::Clickatell => Box::new(ClickatellMessenger::from_config(config)?),
        MessengerKind::Nexmo => Box::new(NexmoMessenger::from_config(config)?),
    };
    Ok(messenger)
}

/// Creates the messenger named by `messenger.default`.
pub fn messenger_from_config(
    config: &dyn ConfigurationService,
) -> FrameworkResult<Box<dyn MessageSender>> {
    let key = ConfigKey::new(DEFAULT_MESSENGER_KEY)?;
    let kind: MessengerKind = config.get(&key)?.parse(key.as_str())?;
    create_messenger(kind, config)
}
