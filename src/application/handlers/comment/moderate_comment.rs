//! Approve, edit and delete: the mutating comment operations.
//!
//! Approval is reserved to moderators. Edit and delete are allowed to the
//! author first and fall back to a moderator check.

use std::sync::Arc;

use tracing::info;

use crate::application::authorization::Authorizer;
use crate::domain::auth::Actor;
use crate::domain::comment::{Comment, CommentError, CommentState};
use crate::domain::foundation::{CommentId, Timestamp};
use crate::ports::{CommentRepository, MarkdownRenderer};

/// Identifies the caller and the comment they act on.
#[derive(Debug, Clone)]
pub struct CommentTarget {
    pub commenter_token: String,
    pub comment_id: String,
}

/// Resolves the caller and a live comment.
async fn resolve(
    authorizer: &Authorizer,
    comments: &dyn CommentRepository,
    target: &CommentTarget,
) -> Result<(Actor, Comment), CommentError> {
    if target.commenter_token.trim().is_empty() {
        return Err(CommentError::missing("commenterToken"));
    }
    let comment_id = CommentId::new(target.comment_id.as_str())?;
    let actor = authorizer.commenter(&target.commenter_token).await?;
    let comment = comments
        .find(&comment_id)
        .await?
        .ok_or(CommentError::NoSuchComment)?;
    Ok((actor, comment))
}

pub struct ApproveCommentHandler {
    authorizer: Arc<Authorizer>,
    comments: Arc<dyn CommentRepository>,
}

impl ApproveCommentHandler {
    pub fn new(authorizer: Arc<Authorizer>, comments: Arc<dyn CommentRepository>) -> Self {
        Self {
            authorizer,
            comments,
        }
    }

    pub async fn handle(&self, target: CommentTarget) -> Result<(), CommentError> {
        let (actor, comment) = resolve(&self.authorizer, self.comments.as_ref(), &target).await?;
        if comment.is_deleted() {
            return Err(CommentError::NoSuchComment);
        }
        self.authorizer
            .require_moderator(&actor, comment.domain())
            .await?;

        if !self
            .comments
            .set_state(comment.id(), CommentState::Approved)
            .await?
        {
            return Err(CommentError::NoSuchComment);
        }

        info!(comment_id = %comment.id(), approver = %actor.id(), "Comment approved");
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct EditCommentCommand {
    pub target: CommentTarget,
    pub markdown: String,
}

pub struct EditCommentHandler {
    authorizer: Arc<Authorizer>,
    comments: Arc<dyn CommentRepository>,
    renderer: Arc<dyn MarkdownRenderer>,
}

impl EditCommentHandler {
    pub fn new(
        authorizer: Arc<Authorizer>,
        comments: Arc<dyn CommentRepository>,
        renderer: Arc<dyn MarkdownRenderer>,
    ) -> Self {
        Self {
            authorizer,
            comments,
            renderer,
        }
    }

    /// Returns the re-rendered HTML.
    pub async fn handle(&self, cmd: EditCommentCommand) -> Result<String, CommentError> {
        if cmd.markdown.trim().is_empty() {
            return Err(CommentError::missing("markdown"));
        }
        let (actor, comment) =
            resolve(&self.authorizer, self.comments.as_ref(), &cmd.target).await?;
        if comment.is_deleted() {
            return Err(CommentError::NoSuchComment);
        }
        self.authorizer.authorize_mutation(&actor, &comment).await?;

        let html = self.renderer.render(&cmd.markdown);
        if !self
            .comments
            .update_content(comment.id(), &cmd.markdown, &html)
            .await?
        {
            return Err(CommentError::NoSuchComment);
        }

        info!(comment_id = %comment.id(), editor = %actor.id(), "Comment edited");
        Ok(html)
    }
}

pub struct DeleteCommentHandler {
    authorizer: Arc<Authorizer>,
    comments: Arc<dyn CommentRepository>,
}

impl DeleteCommentHandler {
    pub fn new(authorizer: Arc<Authorizer>, comments: Arc<dyn CommentRepository>) -> Self {
        Self {
            authorizer,
            comments,
        }
    }

    /// Tombstones the comment. Deleting a deleted comment changes nothing.
    pub async fn handle(&self, target: CommentTarget) -> Result<(), CommentError> {
        let (actor, comment) = resolve(&self.authorizer, self.comments.as_ref(), &target).await?;
        if comment.is_deleted() {
            return Ok(());
        }
        self.authorizer.authorize_mutation(&actor, &comment).await?;

        if !self
            .comments
            .mark_deleted(comment.id(), &actor.id(), Timestamp::now())
            .await?
        {
            return Err(CommentError::NoSuchComment);
        }

        info!(comment_id = %comment.id(), deleter = %actor.id(), "Comment deleted");
        Ok(())
    }
}
