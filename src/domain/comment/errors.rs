//! Comment and vote error types.

use tracing::error;

use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};

/// Errors surfaced by comment lifecycle and vote operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommentError {
    #[error("missing field: {0}")]
    MissingField(String),

    #[error("not authorised")]
    NotAuthorised,

    #[error("not a moderator of this domain")]
    NotModerator,

    #[error("no such domain")]
    NoSuchDomain,

    #[error("no such comment")]
    NoSuchComment,

    #[error("no such token")]
    NoSuchToken,

    #[error("domain is frozen")]
    DomainFrozen,

    #[error("thread is locked")]
    ThreadLocked,

    #[error("cannot vote on your own comment")]
    SelfVote,

    #[error("no paths given")]
    EmptyPaths,

    /// Storage or unexpected failure. The cause is logged, never surfaced.
    #[error("internal error")]
    Internal,
}

impl CommentError {
    pub fn missing(field: impl Into<String>) -> Self {
        CommentError::MissingField(field.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            CommentError::MissingField(_) => ErrorCode::MissingField,
            CommentError::NotAuthorised => ErrorCode::NotAuthorised,
            CommentError::NotModerator => ErrorCode::NotModerator,
            CommentError::NoSuchDomain => ErrorCode::NoSuchDomain,
            CommentError::NoSuchComment => ErrorCode::NoSuchComment,
            CommentError::NoSuchToken => ErrorCode::NoSuchToken,
            CommentError::DomainFrozen => ErrorCode::DomainFrozen,
            CommentError::ThreadLocked => ErrorCode::ThreadLocked,
            CommentError::SelfVote => ErrorCode::SelfVote,
            CommentError::EmptyPaths => ErrorCode::EmptyPaths,
            CommentError::Internal => ErrorCode::InternalError,
        }
    }
}

impl From<ValidationError> for CommentError {
    fn from(err: ValidationError) -> Self {
        CommentError::MissingField(err.field().to_string())
    }
}

impl From<DomainError> for CommentError {
    fn from(err: DomainError) -> Self {
        error!(code = %err.code, error = %err, "comment operation failed");
        CommentError::Internal
    }
}
