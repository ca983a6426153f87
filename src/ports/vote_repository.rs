//! Vote ledger port.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::domain::foundation::{CommentId, CommenterId, DomainError};
use crate::domain::vote::{Vote, VoteDirection};

#[async_trait]
pub trait VoteRepository: Send + Sync {
    /// Inserts or overwrites the vote keyed by (comment, voter) and
    /// recomputes the comment's score, atomically.
    async fn upsert(&self, vote: &Vote) -> Result<(), DomainError>;

    /// The voter's current direction on each of `comment_ids` that has a vote.
    async fn directions(
        &self,
        voter_id: &CommenterId,
        comment_ids: &[CommentId],
    ) -> Result<HashMap<CommentId, VoteDirection>, DomainError>;
}
