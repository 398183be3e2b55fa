// SPDX-License-Identifier: MIT OR Apache-2.0

//! SMS messenger using the Clickatell gateway.

use crate::domain::{ConfigKey, ConfigurationService, FrameworkError, FrameworkResult, Result};
use crate::ports::MessageSender;
use std::fmt;

/// Sends SMS messages through Clickatell.
///
/// Reads `sms.clickatell.username`, `sms.clickatell.password` and
/// `sms.clickatell.api_id`, all required. Delivery is not built yet;
/// [`send`](MessageSender::send) always fails.
#[derive(Clone)]
pub struct ClickatellMessenger {
    username: String,
    // consumed by gateway delivery once it is built
    #[allow(dead_code)]
    password: String,
    api_id: String,
}

impl ClickatellMessenger {
    /// Creates a messenger with the given gateway credentials.
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        api_id: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            api_id: api_id.into(),
        }
    }

    /// Reads the gateway credentials from `sms.clickatell.*`.
    pub fn from_config(config: &dyn ConfigurationService) -> Result<Self> {
        let base = ConfigKey::new("sms.clickatell")?;
        Ok(Self::new(
            config.get_string(&base.join("username")?)?,
            config.get_string(&base.join("password")?)?,
            config.get_string(&base.join("api_id")?)?,
        ))
    }

    /// Returns the gateway API id.
    pub fn api_id(&self) -> &str {
        &self.api_id
    }
}

impl fmt::Debug for ClickatellMessenger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClickatellMessenger")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("api_id", &self.api_id)
            .finish()
    }
}

impl MessageSender for ClickatellMessenger {
    fn name(&self) -> &'static str {
        "clickatell"
    }

    fn send(&self, receiver: &str, _message: &str) -> FrameworkResult<()> {
        tracing::warn!(
            "Clickatell SMS to '{}' requested but not implemented",
            receiver
        );
        Err(FrameworkError::unimplemented("Clickatell SMS messenger"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ConfigError;
    use crate::service::ConfigStore;

    #[test]
    fn test_from_config() {
        let mut store = ConfigStore::new();
        store.set_str("sms.clickatell.username", "user").unwrap();
        store.set_str("sms.clickatell.password", "secret").unwrap();
        store.set_str("sms.clickatell.api_id", 3456789).unwrap();

        let messenger = ClickatellMessenger::from_config(&store).unwrap();
        assert_eq!(messenger.api_id(), "3456789");
    }

    #[test]
    fn test_from_config_missing_password() {
        let mut store = ConfigStore::new();
        store.set_str("sms.clickatell.username", "user").unwrap();

        let err = ClickatellMessenger::from_config(&store).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::ConfigKeyNotFound { ref key } if key == "sms.clickatell.password"
        ));
    }

    #[test]
    fn test_debug_redacts_password() {
        let messenger = ClickatellMessenger::new("user", "secret", "1");
        let debug = format!("{:?}", messenger);
        assert!(!debug.contains("secret"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_send_is_unimplemented() {
        let messenger = ClickatellMessenger::new("user", "secret", "1");
        for (receiver, message) in [("+4917012345", "hi"), ("", "")] {
            let err = messenger.send(receiver, message).unwrap_err();
            assert!(matches!(err, FrameworkError::Unimplemented { .. }));
        }
    }
}
