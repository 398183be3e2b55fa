// SPDX-License-Identifier: MIT OR Apache-2.0

//! IRC messenger.

use crate::domain::{ConfigKey, ConfigurationService, FrameworkError, FrameworkResult, Result};
use crate::ports::MessageSender;

/// Default IRC port when `irc.port` is not configured.
pub const DEFAULT_IRC_PORT: u16 = 6667;

/// Sends messages to IRC channels or users.
///
/// Reads `irc.server` and `irc.nick` (required) and `irc.port` (optional).
/// Delivery is not built yet; [`send`](MessageSender::send) always fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IrcMessenger {
    server: String,
    port: u16,
    nick: String,
}

impl IrcMessenger {
    /// Creates a messenger for the given server and nickname.
    pub fn new(server: impl Into<String>, port: u16, nick: impl Into<String>) -> Self {
        Self {
            server: server.into(),
            port,
            nick: nick.into(),
        }
    }

    /// Reads the messenger settings from `irc.*`.
    pub fn from_config(config: &dyn ConfigurationService) -> Result<Self> {
        let base = ConfigKey::new("irc")?;
        let port_key = base.join("port")?;
        let port = if config.has(&port_key) {
            config.get_u16(&port_key)?
        } else {
            DEFAULT_IRC_PORT
        };

        Ok(Self::new(
            config.get_string(&base.join("server")?)?,
            port,
            config.get_string(&base.join("nick")?)?,
        ))
    }

    /// Returns the `host:port` this messenger connects to.
    pub fn address(&self) -> String {
        format!("{}:{}", self.server, self.port)
    }

    /// Returns the configured nickname.
    pub fn nick(&self) -> &str {
        &self.nick
    }
}

impl MessageSender for IrcMessenger {
    fn name(&self) -> &'static str {
        "irc"
    }

    fn send(&self, receiver: &str, _message: &str) -> FrameworkResult<()> {
        tracing::warn!(
            "IRC delivery to '{}' via {} requested but not implemented",
            receiver,
            self.address()
        );
        Err(FrameworkError::unimplemented("IRC messenger"))
    }
}
