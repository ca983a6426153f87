//! Owner entity.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{CommenterId, OwnerId, Timestamp};

/// Administrator of one or more domains.
///
/// # Invariants
///
/// - `email` is unique across owners
/// - `password_hash` is a salted digest, never the raw password
/// - only the commenter named by `companion_id` acts with owner standing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    id: OwnerId,
    email: String,
    name: String,
    #[serde(skip_serializing)]
    password_hash: String,
    confirmed: bool,
    joined_at: Timestamp,
    companion_id: Option<CommenterId>,
}

impl Owner {
    /// Creates a freshly registered owner.
    pub fn register(
        id: OwnerId,
        email: impl Into<String>,
        name: impl Into<String>,
        password_hash: impl Into<String>,
        confirmed: bool,
    ) -> Self {
        Self {
            id,
            email: email.into(),
            name: name.into(),
            password_hash: password_hash.into(),
            confirmed,
            joined_at: Timestamp::now(),
            companion_id: None,
        }
    }

    /// Names the local commenter identity the owner comments under.
    pub fn with_companion(mut self, companion_id: CommenterId) -> Self {
        self.companion_id = Some(companion_id);
        self
    }

    /// Reconstitute an owner from persistence.
    pub fn reconstitute(
        id: OwnerId,
        email: String,
        name: String,
        password_hash: String,
        confirmed: bool,
        joined_at: Timestamp,
        companion_id: Option<CommenterId>,
    ) -> Self {
        Self {
            id,
            email,
            name,
            password_hash,
            confirmed,
            joined_at,
            companion_id,
        }
    }

    pub fn id(&self) -> &OwnerId {
        &self.id
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    /// Returns true once the owner's email has been verified.
    pub fn is_confirmed(&self) -> bool {
        self.confirmed
    }

    pub fn joined_at(&self) -> &Timestamp {
        &self.joined_at
    }

    pub fn companion_id(&self) -> Option<&CommenterId> {
        self.companion_id.as_ref()
    }

    /// Marks the email as verified.
    pub fn confirm(&mut self) {
        self.confirmed = true;
    }

    /// Replaces the password digest.
    pub fn set_password_hash(&mut self, password_hash: impl Into<String>) {
        self.password_hash = password_hash.into();
    }
}
