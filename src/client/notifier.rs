//! Chat delivery with translation into [`DeliveryError`]

use tracing::{debug, error};

use super::telegram::ChatSender;
use crate::{id::ChatId, result::DeliveryError};

/// Sends to one fixed chat; never retries, the next poll cycle does
#[derive(Debug)]
pub struct Notifier<S> {
    sender: S,
    chat_id: ChatId,
}

impl<S: ChatSender> Notifier<S> {
    pub fn new(sender: S, chat_id: ChatId) -> Self {
        Self { sender, chat_id }
    }

    pub async fn notify(&self, text: &str) -> Result<(), DeliveryError> {
        match self.sender.send(self.chat_id, text).await {
            Ok(()) => {
                debug!(chat_id = %self.chat_id, "Message sent successfully");
                Ok(())
            },
            Err(e) => {
                error!(chat_id = %self.chat_id, error = %e, "Failed to send message");
                Err(DeliveryError::new(e))
            },
        }
    }

    #[cfg(test)]
    pub fn sender(&self) -> &S {
        &self.sender
    }
}

#[cfg(test)]
pub(crate) mod fake {
    use std::sync::Mutex;

    use super::*;
    use crate::client::ClientError;

    /// Records every message; fails while `failing` is set
    #[derive(Debug, Default)]
    pub struct RecordingSender {
        pub sent: Mutex<Vec<(ChatId, String)>>,
        pub failing: Mutex<bool>,
    }

    impl RecordingSender {
        pub fn failing() -> Self {
            Self { failing: Mutex::new(true), ..Default::default() }
        }

        pub fn set_failing(&self, failing: bool) {
            *self.failing.lock().unwrap() = failing;
        }

        pub fn messages(&self) -> Vec<String> {
            self.sent
                .lock()
                .unwrap()
                .iter()
                .map(|(_, text)| text.clone())
                .collect()
        }
    }

    impl ChatSender for RecordingSender {
        async fn send(&self, chat_id: ChatId, text: &str) -> crate::client::error::Result<()> {
            if *self.failing.lock().unwrap() {
                return Err(ClientError::api(400, "Bad Request: chat not found"));
            }
            self.sent.lock().unwrap().push((chat_id, text.to_string()));
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{fake::RecordingSender, *};

    #[tokio::test]
    async fn delivers_to_configured_chat() {
        let notifier = Notifier::new(RecordingSender::default(), ChatId::new(7));
        notifier.notify("hello").await.unwrap();

        let sent = notifier.sender().sent.lock().unwrap().clone();
        assert_eq!(sent, vec![(ChatId::new(7), "hello".to_string())]);
    }

    #[tokio::test]
    async fn failure_becomes_delivery_error_with_cause() {
        let notifier = Notifier::new(RecordingSender::failing(), ChatId::new(7));
        let err = notifier.notify("hello").await.unwrap_err();

        assert!(err.cause.contains("chat not found"));
        assert!(notifier.sender().messages().is_empty());
    }
}
