//! Comment lifecycle and vote handlers.

mod cast_vote;
mod count_comments;
mod create_comment;
mod list_comments;
mod moderate_comment;

pub use cast_vote::{CastVoteCommand, CastVoteHandler};
pub use count_comments::{CountCommentsHandler, CountCommentsQuery};
pub use create_comment::{
    ClientInfo, CommentServices, CreateCommentCommand, CreateCommentHandler, CreateCommentResult,
};
pub use list_comments::{
    DomainAttributes, ListCommentsHandler, ListCommentsQuery, ListCommentsResult, PageAttributes,
};
pub use moderate_comment::{
    ApproveCommentHandler, CommentTarget, DeleteCommentHandler, EditCommentCommand,
    EditCommentHandler,
};
