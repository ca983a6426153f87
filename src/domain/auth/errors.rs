//! Owner and commenter authentication errors.

use tracing::error;

use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};

/// Errors surfaced by owner auth, commenter auth and the SSO handshake.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("missing field: {0}")]
    MissingField(String),

    #[error("new owner registrations are disabled")]
    RegistrationForbidden,

    #[error("that email address is already registered")]
    EmailAlreadyExists,

    #[error("no such confirmation token")]
    NoSuchConfirmationToken,

    #[error("no such reset token")]
    NoSuchResetToken,

    /// Same error for unknown accounts and wrong passwords.
    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("email address has not been confirmed")]
    UnconfirmedEmail,

    #[error("no such token")]
    NoSuchToken,

    #[error("no such domain")]
    NoSuchDomain,

    #[error("no such owner")]
    NoSuchOwner,

    #[error("owner still has active domains")]
    CannotDeleteOwnerWithActiveDomains,

    #[error("SSO is not configured for this domain")]
    MissingConfig,

    #[error("invalid payload: {0}")]
    InvalidPayload(String),

    #[error("signature mismatch")]
    SignatureMismatch,

    #[error("not authorised")]
    NotAuthorised,

    /// Storage or unexpected failure. The cause is logged, never surfaced.
    #[error("internal error")]
    Internal,
}

impl AuthError {
    pub fn missing(field: impl Into<String>) -> Self {
        AuthError::MissingField(field.into())
    }

    pub fn invalid_payload(reason: impl Into<String>) -> Self {
        AuthError::InvalidPayload(reason.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            AuthError::MissingField(_) => ErrorCode::MissingField,
            AuthError::RegistrationForbidden => ErrorCode::RegistrationForbidden,
            AuthError::EmailAlreadyExists => ErrorCode::EmailAlreadyExists,
            AuthError::NoSuchConfirmationToken => ErrorCode::NoSuchConfirmationToken,
            AuthError::NoSuchResetToken => ErrorCode::NoSuchResetToken,
            AuthError::InvalidCredentials => ErrorCode::InvalidCredentials,
            AuthError::UnconfirmedEmail => ErrorCode::UnconfirmedEmail,
            AuthError::NoSuchToken => ErrorCode::NoSuchToken,
            AuthError::NoSuchDomain => ErrorCode::NoSuchDomain,
            AuthError::NoSuchOwner => ErrorCode::NoSuchOwner,
            AuthError::CannotDeleteOwnerWithActiveDomains => {
                ErrorCode::CannotDeleteOwnerWithActiveDomains
            }
            AuthError::MissingConfig => ErrorCode::MissingConfig,
            AuthError::InvalidPayload(_) => ErrorCode::InvalidFormat,
            AuthError::SignatureMismatch => ErrorCode::SignatureMismatch,
            AuthError::NotAuthorised => ErrorCode::NotAuthorised,
            AuthError::Internal => ErrorCode::InternalError,
        }
    }
}

impl From<ValidationError> for AuthError {
    fn from(err: ValidationError) -> Self {
        AuthError::MissingField(err.field().to_string())
    }
}

impl From<DomainError> for AuthError {
    fn from(err: DomainError) -> Self {
        error!(code = %err.code, error = %err, "auth operation failed");
        AuthError::Internal
    }
}
