//! Outbound notification port.

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::foundation::{CommentId, DomainError, DomainName};

/// Who a notification goes to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recipient {
    pub email: String,
    pub name: String,
}

/// What happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notification {
    OwnerConfirmation {
        token: String,
    },
    OwnerPasswordReset {
        token: String,
    },
    /// Sent to moderators.
    NewComment {
        domain: DomainName,
        path: String,
        comment_id: CommentId,
        html: String,
        pending_moderation: bool,
    },
    /// Sent to the author of the parent comment.
    Reply {
        domain: DomainName,
        path: String,
        comment_id: CommentId,
        html: String,
    },
}

impl Notification {
    pub fn kind(&self) -> &'static str {
        match self {
            Notification::OwnerConfirmation { .. } => "owner_confirmation",
            Notification::OwnerPasswordReset { .. } => "owner_password_reset",
            Notification::NewComment { .. } => "new_comment",
            Notification::Reply { .. } => "reply",
        }
    }
}

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(
        &self,
        notification: &Notification,
        recipient: &Recipient,
    ) -> Result<(), DomainError>;
}
