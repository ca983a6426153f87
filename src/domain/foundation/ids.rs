//! Strongly-typed identifier value objects.
//!
//! Every identifier in the system is an opaque string: records and bearer
//! tokens are random hex tokens, domains are keyed by their host name.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident, $field:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates the identifier, returning error if empty.
            pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
                let value = value.into();
                if value.trim().is_empty() {
                    return Err(ValidationError::empty_field($field));
                }
                Ok(Self(value))
            }

            /// Returns the inner string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

string_id!(
    /// Identifier of a domain owner.
    OwnerId,
    "owner_id"
);

string_id!(
    /// Identifier of a commenter, or the anonymous sentinel.
    CommenterId,
    "commenter_id"
);

string_id!(
    /// Identifier of a comment.
    CommentId,
    "comment_id"
);

string_id!(
    /// Name of a registered domain (the domain's primary key).
    DomainName,
    "domain"
);

string_id!(
    /// Bearer token of an owner session.
    OwnerToken,
    "owner_token"
);

string_id!(
    /// Bearer token of a commenter session (pending or bound).
    CommenterToken,
    "commenter_token"
);

string_id!(
    /// One-time owner email confirmation token.
    ConfirmationToken,
    "confirmation_token"
);

string_id!(
    /// One-time owner password reset token.
    ResetToken,
    "reset_token"
);

string_id!(
    /// Per-attempt SSO handshake token.
    SsoToken,
    "token"
);

/// Wire value of the anonymous commenter sentinel.
pub const ANONYMOUS_COMMENTER_ID: &str = "anonymous";

impl CommenterId {
    /// The well-known identifier of the unauthenticated commenter.
    ///
    /// Never stored as a commenter record.
    pub fn anonymous() -> Self {
        Self(ANONYMOUS_COMMENTER_ID.to_string())
    }

    /// Returns true for the anonymous sentinel.
    pub fn is_anonymous(&self) -> bool {
        self.0 == ANONYMOUS_COMMENTER_ID
    }
}
