// SPDX-License-Identifier: MIT OR Apache-2.0

//! SMS messenger using the Nexmo gateway.

use crate::domain::{ConfigKey, ConfigurationService, FrameworkError, FrameworkResult, Result};
use crate::ports::MessageSender;
use std::fmt;

/// Sends SMS messages through Nexmo.
///
/// Reads `sms.nexmo.api_key` and `sms.nexmo.api_secret` (required) and
/// `sms.nexmo.from` (optional sender id). Delivery is not built yet;
/// [`send`](MessageSender::send) always fails.
#[derive(Clone)]
pub struct NexmoMessenger {
    api_key: String,
    // consumed by gateway delivery once it is built
    #[allow(dead_code)]
    api_secret: String,
    sender_id: Option<String>,
}

impl NexmoMessenger {
    /// Creates a messenger with the given API credentials.
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: api_secret.into(),
            sender_id: None,
        }
    }

    /// Sets the sender id shown to receivers.
    pub fn with_sender_id(mut self, sender_id: impl Into<String>) -> Self {
        self.sender_id = Some(sender_id.into());
        self
    }

    /// Reads the API credentials from `sms.nexmo.*`.
    pub fn from_config(config: &dyn ConfigurationService) -> Result<Self> {
        let base = ConfigKey::new("sms.nexmo")?;
        let mut messenger = Self::new(
            config.get_string(&base.join("api_key")?)?,
            config.get_string(&base.join("api_secret")?)?,
        );
        messenger.sender_id = config.get_optional_string(&base.join("from")?)?;
        Ok(messenger)
    }

    /// Returns the configured sender id.
    pub fn sender_id(&self) -> Option<&str> {
        self.sender_id.as_deref()
    }
}

impl fmt::Debug for NexmoMessenger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NexmoMessenger")
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .field("sender_id", &self.sender_id)
            .finish()
    }
}

impl MessageSender for NexmoMessenger {
    fn name(&self) -> &'static str {
        "nexmo"
    }

    fn send(&self, receiver: &str, _message: &str) -> FrameworkResult<()> {
        tracing::warn!("Nexmo SMS to '{}' requested but not implemented", receiver);
        Err(FrameworkError::unimplemented("Nexmo SMS messenger"))
    }
}
