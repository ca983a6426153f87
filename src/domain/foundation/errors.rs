//! Error types for the domain layer.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use thiserror::Error;

/// Errors that occur during value object construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Returns the name of the offending field.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::EmptyField { field } => field,
            ValidationError::InvalidFormat { field, .. } => field,
        }
    }
}

/// Error codes organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Validation errors
    MissingField,
    InvalidFormat,
    EmptyPaths,

    // Not found errors
    NoSuchDomain,
    NoSuchComment,
    NoSuchOwner,
    NoSuchCommenter,
    NoSuchEmail,
    NoSuchToken,
    NoSuchConfirmationToken,
    NoSuchResetToken,

    // State errors
    DomainFrozen,
    ThreadLocked,
    SelfVote,
    UnconfirmedEmail,
    CannotDeleteOwnerWithActiveDomains,
    Conflict,
    EmailAlreadyExists,

    // Authorization errors
    NotAuthorised,
    NotModerator,
    InvalidCredentials,
    RegistrationForbidden,
    SignatureMismatch,
    MissingConfig,

    // Infrastructure errors
    DatabaseError,
    InternalError,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::MissingField => "MISSING_FIELD",
            ErrorCode::InvalidFormat => "INVALID_FORMAT",
            ErrorCode::EmptyPaths => "EMPTY_PATHS",
            ErrorCode::NoSuchDomain => "NO_SUCH_DOMAIN",
            ErrorCode::NoSuchComment => "NO_SUCH_COMMENT",
            ErrorCode::NoSuchOwner => "NO_SUCH_OWNER",
            ErrorCode::NoSuchCommenter => "NO_SUCH_COMMENTER",
            ErrorCode::NoSuchEmail => "NO_SUCH_EMAIL",
            ErrorCode::NoSuchToken => "NO_SUCH_TOKEN",
            ErrorCode::NoSuchConfirmationToken => "NO_SUCH_CONFIRMATION_TOKEN",
            ErrorCode::NoSuchResetToken => "NO_SUCH_RESET_TOKEN",
            ErrorCode::DomainFrozen => "DOMAIN_FROZEN",
            ErrorCode::ThreadLocked => "THREAD_LOCKED",
            ErrorCode::SelfVote => "SELF_VOTE",
            ErrorCode::UnconfirmedEmail => "UNCONFIRMED_EMAIL",
            ErrorCode::CannotDeleteOwnerWithActiveDomains => {
                "CANNOT_DELETE_OWNER_WITH_ACTIVE_DOMAINS"
            }
            ErrorCode::Conflict => "CONFLICT",
            ErrorCode::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",
            ErrorCode::NotAuthorised => "NOT_AUTHORISED",
            ErrorCode::NotModerator => "NOT_MODERATOR",
            ErrorCode::InvalidCredentials => "INVALID_CREDENTIALS",
            ErrorCode::RegistrationForbidden => "REGISTRATION_FORBIDDEN",
            ErrorCode::SignatureMismatch => "SIGNATURE_MISMATCH",
            ErrorCode::MissingConfig => "MISSING_CONFIG",
            ErrorCode::DatabaseError => "DATABASE_ERROR",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        };
        write!(f, "{}", s)
    }
}

/// Standard domain error with code, message, and optional details.
///
/// Returned by every port. A missing row is never reported through this type:
/// lookups return `Option` and mutations report whether a row was touched.
#[derive(Debug, Clone)]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
    pub details: HashMap<String, String>,
}

impl DomainError {
    /// Creates a new domain error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: HashMap::new(),
        }
    }

    /// Creates a storage failure error.
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DatabaseError, message)
    }

    /// Creates a unique-constraint violation error.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Conflict, message)
    }

    /// Adds a detail to the error.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }

    /// Returns true if this error reports a unique-constraint violation.
    pub fn is_conflict(&self) -> bool {
        self.code == ErrorCode::Conflict
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for DomainError {}

impl From<ValidationError> for DomainError {
    fn from(err: ValidationError) -> Self {
        let code = match err {
            ValidationError::EmptyField { .. } => ErrorCode::MissingField,
            ValidationError::InvalidFormat { .. } => ErrorCode::InvalidFormat,
        };
        let field = err.field().to_string();
        DomainError::new(code, err.to_string()).with_detail("field", field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_empty_field_displays_correctly() {
        let err = ValidationError::empty_field("email");
        assert_eq!(format!("{}", err), "Field 'email' cannot be empty");
    }

    #[test]
    fn validation_error_invalid_format_displays_correctly() {
        let err = ValidationError::invalid_format("payload", "odd length");
        assert_eq!(
            format!("{}", err),
            "Field 'payload' has invalid format: odd length"
        );
    }

    #[test]
    fn domain_error_displays_code_and_message() {
        let err = DomainError::new(ErrorCode::NoSuchComment, "Comment not found");
        assert_eq!(format!("{}", err), "[NO_SUCH_COMMENT] Comment not found");
    }

    #[test]
    fn domain_error_from_validation_keeps_field() {
        let err: DomainError = ValidationError::empty_field("token").into();
        assert_eq!(err.code, ErrorCode::MissingField);
        assert_eq!(err.details.get("field"), Some(&"token".to_string()));
    }

    #[test]
    fn conflict_is_recognised() {
        assert!(DomainError::conflict("duplicate email").is_conflict());
        assert!(!DomainError::database("connection reset").is_conflict());
    }
}
