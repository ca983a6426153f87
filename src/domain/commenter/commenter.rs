//! Commenter entity.

use serde::{Deserialize, Serialize};

use super::IdentityProvider;
use crate::domain::foundation::{CommenterId, Timestamp};

/// Placeholder for absent profile attributes.
pub const UNDEFINED: &str = "undefined";

/// Identity of a comment author.
///
/// # Invariants
///
/// - `(email, provider)` is unique across commenters
/// - `password_hash` is present only for the local provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commenter {
    id: CommenterId,
    email: String,
    name: String,
    link: String,
    photo: String,
    provider: IdentityProvider,
    #[serde(skip_serializing)]
    password_hash: Option<String>,
    joined_at: Timestamp,
}

impl Commenter {
    /// Creates a new commenter. Empty link and photo become `"undefined"`.
    pub fn new(
        id: CommenterId,
        email: impl Into<String>,
        name: impl Into<String>,
        link: impl Into<String>,
        photo: impl Into<String>,
        provider: IdentityProvider,
        password_hash: Option<String>,
    ) -> Self {
        Self {
            id,
            email: email.into(),
            name: name.into(),
            link: or_undefined(link.into()),
            photo: or_undefined(photo.into()),
            provider,
            password_hash,
            joined_at: Timestamp::now(),
        }
    }

    /// The anonymous sentinel with its fixed placeholder attributes.
    pub fn anonymous() -> Self {
        Self {
            id: CommenterId::anonymous(),
            email: UNDEFINED.to_string(),
            name: "Anonymous".to_string(),
            link: UNDEFINED.to_string(),
            photo: UNDEFINED.to_string(),
            provider: IdentityProvider::Anonymous,
            password_hash: None,
            joined_at: Timestamp::default(),
        }
    }

    /// Reconstitute a commenter from persistence.
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: CommenterId,
        email: String,
        name: String,
        link: String,
        photo: String,
        provider: IdentityProvider,
        password_hash: Option<String>,
        joined_at: Timestamp,
    ) -> Self {
        Self {
            id,
            email,
            name,
            link,
            photo,
            provider,
            password_hash,
            joined_at,
        }
    }

    pub fn id(&self) -> &CommenterId {
        &self.id
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn link(&self) -> &str {
        &self.link
    }

    pub fn photo(&self) -> &str {
        &self.photo
    }

    pub fn provider(&self) -> &IdentityProvider {
        &self.provider
    }

    pub fn password_hash(&self) -> Option<&str> {
        self.password_hash.as_deref()
    }

    pub fn joined_at(&self) -> &Timestamp {
        &self.joined_at
    }

    pub fn is_anonymous(&self) -> bool {
        self.id.is_anonymous()
    }

    /// Applies a profile update pushed by the identity provider.
    pub fn apply(&mut self, update: &ProfileUpdate) {
        self.email = update.email.clone();
        self.name = update.name.clone();
        self.link = or_undefined(update.link.clone());
        self.photo = or_undefined(update.photo.clone());
    }

    /// Public projection for the comment listing directory.
    pub fn profile(&self, is_moderator: bool) -> CommenterProfile {
        CommenterProfile {
            id: self.id.clone(),
            name: self.name.clone(),
            link: self.link.clone(),
            photo: self.photo.clone(),
            provider: self.provider.tag(),
            is_moderator,
        }
    }
}

/// Profile attributes refreshed on every SSO login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub email: String,
    pub name: String,
    pub link: String,
    pub photo: String,
}

/// Commenter as exposed next to a comment listing. Never carries the email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommenterProfile {
    pub id: CommenterId,
    pub name: String,
    pub link: String,
    pub photo: String,
    pub provider: String,
    pub is_moderator: bool,
}

fn or_undefined(value: String) -> String {
    if value.trim().is_empty() {
        UNDEFINED.to_string()
    } else {
        value
    }
}
