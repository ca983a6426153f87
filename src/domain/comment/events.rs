//! Events emitted by the comment lifecycle.

use serde::Serialize;

use super::{Comment, CommentState, ParentRef};
use crate::domain::foundation::{CommentId, CommenterId, DomainName, Timestamp};

/// A comment was accepted for a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentCreated {
    pub comment_id: CommentId,
    pub domain: DomainName,
    pub path: String,
    pub author_id: CommenterId,
    pub parent: ParentRef,
    pub state: CommentState,
    pub html: String,
    pub occurred_at: Timestamp,
}

impl CommentCreated {
    pub fn from_comment(comment: &Comment) -> Self {
        Self {
            comment_id: comment.id().clone(),
            domain: comment.domain().clone(),
            path: comment.path().to_string(),
            author_id: comment.author_id().clone(),
            parent: comment.parent().clone(),
            state: comment.state(),
            html: comment.html().to_string(),
            occurred_at: *comment.created_at(),
        }
    }

    /// True when moderators must act before the comment is public.
    pub fn awaits_moderation(&self) -> bool {
        !self.state.is_approved()
    }
}
