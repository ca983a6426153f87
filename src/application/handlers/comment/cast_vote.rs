//! CastVoteHandler - Records a voter's current standing on a comment.

use std::sync::Arc;

use tracing::{debug, error};

use crate::application::authorization::Authorizer;
use crate::domain::auth::Actor;
use crate::domain::comment::CommentError;
use crate::domain::foundation::CommentId;
use crate::domain::vote::{Vote, VoteDirection};
use crate::ports::{CommentRepository, VoteRepository};

#[derive(Debug, Clone)]
pub struct CastVoteCommand {
    pub commenter_token: String,
    pub comment_id: String,
    /// Any magnitude; clamped to -1, 0 or +1.
    pub direction: i64,
}

pub struct CastVoteHandler {
    authorizer: Arc<Authorizer>,
    comments: Arc<dyn CommentRepository>,
    votes: Arc<dyn VoteRepository>,
}

impl CastVoteHandler {
    pub fn new(
        authorizer: Arc<Authorizer>,
        comments: Arc<dyn CommentRepository>,
        votes: Arc<dyn VoteRepository>,
    ) -> Self {
        Self {
            authorizer,
            comments,
            votes,
        }
    }

    pub async fn handle(&self, cmd: CastVoteCommand) -> Result<VoteDirection, CommentError> {
        if cmd.commenter_token.trim().is_empty() {
            return Err(CommentError::missing("commenterToken"));
        }
        let comment_id = CommentId::new(cmd.comment_id)?;

        let actor = self.authorizer.commenter(&cmd.commenter_token).await?;
        let Actor::Commenter(voter) = actor else {
            return Err(CommentError::NotAuthorised);
        };

        let Some(comment) = self.comments.find(&comment_id).await? else {
            error!(comment_id = %comment_id, "Vote on unresolvable comment");
            return Err(CommentError::Internal);
        };
        if comment.is_authored_by(voter.id()) {
            return Err(CommentError::SelfVote);
        }

        let direction = VoteDirection::clamp(cmd.direction);
        self.votes
            .upsert(&Vote::new(comment_id, voter.id().clone(), direction))
            .await?;

        debug!(voter = %voter.id(), direction = direction.value(), "Vote recorded");
        Ok(direction)
    }
}
