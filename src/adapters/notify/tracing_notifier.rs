//! Notifier that records notifications in the log.
//!
//! Stands in for a mail transport in development and in deployments without
//! an SMTP relay. Message bodies are emitted at `debug` only.

use async_trait::async_trait;
use tracing::{debug, info};

use crate::config::EmailConfig;
use crate::domain::foundation::DomainError;
use crate::ports::{Notification, Notifier, Recipient};

#[derive(Debug, Clone)]
pub struct TracingNotifier {
    sender: String,
}

impl TracingNotifier {
    /// `sender` is the formatted "From" header of outbound mail.
    pub fn new(sender: impl Into<String>) -> Self {
        Self {
            sender: sender.into(),
        }
    }

    pub fn from_config(config: &EmailConfig) -> Self {
        Self::new(config.from_header())
    }
}

#[async_trait]
impl Notifier for TracingNotifier {
    async fn notify(
        &self,
        notification: &Notification,
        recipient: &Recipient,
    ) -> Result<(), DomainError> {
        info!(
            kind = notification.kind(),
            from = %self.sender,
            recipient = %recipient.email,
            "Notification sent"
        );
        debug!(notification = ?notification, "Notification body");
        Ok(())
    }
}
