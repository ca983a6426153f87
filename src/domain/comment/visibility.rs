//! Listing filter and redaction projection.

use serde::Serialize;

use super::{Comment, CommentState, ParentRef};
use crate::domain::auth::Role;
use crate::domain::foundation::{CommentId, CommenterId, Timestamp};
use crate::domain::vote::VoteDirection;

/// Whether a comment belongs in a listing for the given role.
///
/// Moderators see everything; everyone else sees approved comments plus
/// their own pending ones.
pub fn is_listed(comment: &Comment, role: Role) -> bool {
    match role {
        Role::Owner | Role::Moderator | Role::Author => true,
        Role::Other => comment.state().is_approved(),
    }
}

/// A comment as returned to a particular requester.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentView {
    pub comment_id: CommentId,
    pub commenter_id: CommenterId,
    pub parent_id: ParentRef,
    pub markdown: String,
    pub html: String,
    pub score: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<CommentState>,
    pub direction: VoteDirection,
    pub creation_date: Timestamp,
}

impl CommentView {
    /// Projects a comment for a requester holding `role`.
    pub fn project(comment: &Comment, role: Role, direction: VoteDirection) -> Self {
        Self {
            comment_id: comment.id().clone(),
            commenter_id: comment.author_id().clone(),
            parent_id: comment.parent().clone(),
            markdown: if role.sees_markdown() {
                comment.markdown().to_string()
            } else {
                String::new()
            },
            html: comment.html().to_string(),
            score: comment.score(),
            state: role.sees_state().then(|| comment.state()),
            direction,
            creation_date: *comment.created_at(),
        }
    }
}
