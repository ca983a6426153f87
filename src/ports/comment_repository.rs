//! Comment repository port.
//!
//! # Design
//!
//! - **Soft delete only**: rows are never removed, so replies keep their parent
//! - **Atomic counts**: inserting a comment bumps its page's cached count in
//!   the same transaction
//! - **Rows touched**: mutations return false when no live comment matched

use async_trait::async_trait;

use crate::domain::comment::{Comment, CommentState};
use crate::domain::foundation::{CommentId, CommenterId, DomainError, DomainName, Timestamp};

/// Which comments a page listing loads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommentFilter {
    /// Every live comment, for moderators.
    All,
    /// Approved comments plus those written by the given commenter.
    ApprovedOrAuthoredBy(Option<CommenterId>),
}

#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Inserts a comment and increments its page's comment count.
    async fn insert(&self, comment: &Comment) -> Result<(), DomainError>;

    async fn find(&self, id: &CommentId) -> Result<Option<Comment>, DomainError>;

    /// Replaces markdown and HTML of a live comment.
    async fn update_content(
        &self,
        id: &CommentId,
        markdown: &str,
        html: &str,
    ) -> Result<bool, DomainError>;

    async fn set_state(&self, id: &CommentId, state: CommentState) -> Result<bool, DomainError>;

    /// Tombstones a comment. Deleting twice keeps the first deletion record.
    async fn mark_deleted(
        &self,
        id: &CommentId,
        deleter_id: &CommenterId,
        deleted_at: Timestamp,
    ) -> Result<bool, DomainError>;

    /// Live comments of a page, oldest first.
    async fn list_for_page(
        &self,
        domain: &DomainName,
        path: &str,
        filter: &CommentFilter,
    ) -> Result<Vec<Comment>, DomainError>;
}
