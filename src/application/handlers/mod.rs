//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations. One struct
//! per operation, constructed from ports and invoked through `handle`.

pub mod comment;
pub mod commenter;
pub mod owner;

pub use comment::{
    ApproveCommentHandler, CastVoteCommand, CastVoteHandler, ClientInfo, CommentServices,
    CommentTarget, CountCommentsHandler, CountCommentsQuery, CreateCommentCommand,
    CreateCommentHandler, CreateCommentResult, DeleteCommentHandler, DomainAttributes,
    EditCommentCommand, EditCommentHandler, ListCommentsHandler, ListCommentsQuery,
    ListCommentsResult, PageAttributes,
};
pub use commenter::{
    CompleteSsoCommand, CompleteSsoHandler, CompleteSsoResult, LoginCommenterCommand,
    LoginCommenterHandler, LoginCommenterResult, NewCommenterSessionHandler,
    RegisterCommenterCommand, RegisterCommenterHandler, StartSsoCommand, StartSsoHandler,
    StartSsoResult,
};
pub use owner::{
    ConfirmOwnerCommand, ConfirmOwnerHandler, DeleteOwnerCommand, DeleteOwnerHandler,
    GetOwnerHandler, GetOwnerQuery, LoginOwnerCommand, LoginOwnerHandler, LoginOwnerResult,
    RegisterOwnerCommand, RegisterOwnerHandler, RegisterOwnerResult, RequestPasswordResetCommand,
    RequestPasswordResetHandler, ResetPasswordCommand, ResetPasswordHandler,
    VerifyDomainOwnershipHandler, VerifyDomainOwnershipQuery,
};
