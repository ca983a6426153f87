//! Comment entity.

use serde::Serialize;

use super::{CommentError, CommentState, ParentRef};
use crate::domain::foundation::{CommentId, CommenterId, DomainName, Timestamp};

/// Content substituted for the markdown and HTML of a deleted comment.
pub const TOMBSTONE: &str = "[deleted]";

/// Who deleted a comment, and when.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Deletion {
    pub deleter_id: CommenterId,
    pub deleted_at: Timestamp,
}

/// A threaded comment attached to a page.
///
/// # Invariants
///
/// - Once deleted, content reads as [`TOMBSTONE`] and the author as anonymous
/// - Deletion keeps the identifier and the thread position
/// - Moderation state is independent from deletion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    id: CommentId,
    domain: DomainName,
    path: String,
    author_id: CommenterId,
    parent: ParentRef,
    markdown: String,
    html: String,
    state: CommentState,
    score: i64,
    created_at: Timestamp,
    deletion: Option<Deletion>,
}

impl Comment {
    /// Creates a freshly submitted comment.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: CommentId,
        domain: DomainName,
        path: impl Into<String>,
        author_id: CommenterId,
        parent: ParentRef,
        markdown: impl Into<String>,
        html: impl Into<String>,
        state: CommentState,
    ) -> Self {
        Self {
            id,
            domain,
            path: path.into(),
            author_id,
            parent,
            markdown: markdown.into(),
            html: html.into(),
            state,
            score: 0,
            created_at: Timestamp::now(),
            deletion: None,
        }
    }

    /// Reconstitute a comment from persistence.
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: CommentId,
        domain: DomainName,
        path: String,
        author_id: CommenterId,
        parent: ParentRef,
        markdown: String,
        html: String,
        state: CommentState,
        score: i64,
        created_at: Timestamp,
        deletion: Option<Deletion>,
    ) -> Self {
        Self {
            id,
            domain,
            path,
            author_id,
            parent,
            markdown,
            html,
            state,
            score,
            created_at,
            deletion,
        }
    }

    pub fn id(&self) -> &CommentId {
        &self.id
    }

    pub fn domain(&self) -> &DomainName {
        &self.domain
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn author_id(&self) -> &CommenterId {
        &self.author_id
    }

    pub fn parent(&self) -> &ParentRef {
        &self.parent
    }

    pub fn markdown(&self) -> &str {
        &self.markdown
    }

    pub fn html(&self) -> &str {
        &self.html
    }

    pub fn state(&self) -> CommentState {
        self.state
    }

    pub fn score(&self) -> i64 {
        self.score
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn deletion(&self) -> Option<&Deletion> {
        self.deletion.as_ref()
    }

    pub fn is_deleted(&self) -> bool {
        self.deletion.is_some()
    }

    pub fn is_authored_by(&self, commenter_id: &CommenterId) -> bool {
        !commenter_id.is_anonymous() && &self.author_id == commenter_id
    }

    /// Replaces the content. Moderation state is left untouched.
    pub fn edit(
        &mut self,
        markdown: impl Into<String>,
        html: impl Into<String>,
    ) -> Result<(), CommentError> {
        if self.is_deleted() {
            return Err(CommentError::NoSuchComment);
        }
        self.markdown = markdown.into();
        self.html = html.into();
        Ok(())
    }

    /// Moves an unapproved or flagged comment to approved.
    pub fn approve(&mut self) -> Result<(), CommentError> {
        self.moderate(CommentState::Approved)
    }

    /// Sets the moderation state of a live comment.
    pub fn moderate(&mut self, state: CommentState) -> Result<(), CommentError> {
        if self.is_deleted() {
            return Err(CommentError::NoSuchComment);
        }
        self.state = state;
        Ok(())
    }

    /// Tombstones the comment. A second call keeps the first deletion record.
    pub fn soft_delete(&mut self, deleter_id: CommenterId, deleted_at: Timestamp) {
        self.markdown = TOMBSTONE.to_string();
        self.html = TOMBSTONE.to_string();
        self.author_id = CommenterId::anonymous();
        if self.deletion.is_none() {
            self.deletion = Some(Deletion {
                deleter_id,
                deleted_at,
            });
        }
    }

    /// Sets the aggregated score maintained by the vote ledger.
    pub fn set_score(&mut self, score: i64) {
        self.score = score;
    }
}
