// SPDX-License-Identifier: MIT OR Apache-2.0

//! Messenger capability definition.
//!
//! A `MessageSender` delivers a short text message to a receiver over one
//! channel (IRC, an SMS gateway, ...). Each channel is its own type; the
//! factory in [`crate::adapters::messengers`] picks one by configuration.

use crate::domain::FrameworkResult;

/// A trait for message delivery channels.
///
/// Implementations must be `Send + Sync` so a sender can be shared between
/// request handlers.
///
/// # Examples
///
/// ```rust
/// use ministruts::ports::MessageSender;
/// use ministruts::domain::FrameworkResult;
///
/// struct ConsoleSender;
///
/// impl MessageSender for ConsoleSender {
///     fn name(&self) -> &'static str { "console" }
///
///     fn send(&self, receiver: &str, message: &str) -> FrameworkResult<()> {
///         println!("{}: {}", receiver, message);
///         Ok(())
///     }
/// }
///
/// ConsoleSender.send("ops", "deploy finished").unwrap();
/// ```
pub trait MessageSender: Send + Sync {
    /// Returns the channel name for logging.
    fn name(&self) -> &'static str;

    /// Sends `message` to `receiver`.
    ///
    /// # Errors
    ///
    /// Channels that have not been built fail with
    /// [`crate::domain::FrameworkError::Unimplemented`] on every call.
    fn send(&self, receiver: &str, message: &str) -> FrameworkResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingSender {
        sent: Mutex<Vec<(String, String)>>,
    }

    impl MessageSender for RecordingSender {
        fn name(&self) -> &'static str {
            "recording"
        }

        fn send(&self, receiver: &str, message: &str) -> FrameworkResult<()> {
            self.sent
                .lock()
                .unwrap()
                .push((receiver.to_string(), message.to_string()));
            Ok(())
        }
    }

    #[test]
    fn test_sender_through_trait_object() {
        let sender = RecordingSender::default();
        {
            let dyn_sender: &dyn MessageSender = &sender;
            dyn_sender.send("+4917012345", "hello").unwrap();
            assert_eq!(dyn_sender.name(), "recording");
        }
        let sent = sender.sent.lock().unwrap();
        assert_eq!(sent.as_slice(), &[("+4917012345".to_string(), "hello".to_string())]);
    }

    #[test]
    fn test_sender_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Box<dyn MessageSender>>();
    }
}
