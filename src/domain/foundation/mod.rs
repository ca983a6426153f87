//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, and error types
//! that form the vocabulary of the comment hosting domain.

mod errors;
mod ids;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{
    CommentId, CommenterId, CommenterToken, ConfirmationToken, DomainName, OwnerId, OwnerToken,
    ResetToken, SsoToken, ANONYMOUS_COMMENTER_ID,
};
pub use timestamp::Timestamp;
