//! RegisterCommenterHandler - Local commenter sign-up.

use std::sync::Arc;

use tracing::info;

use crate::domain::auth::AuthError;
use crate::domain::commenter::{Commenter, IdentityProvider};
use crate::domain::foundation::CommenterId;
use crate::ports::{CommenterRepository, PasswordHasher, TokenGenerator};

#[derive(Debug, Clone, Default)]
pub struct RegisterCommenterCommand {
    pub email: String,
    pub name: String,
    pub password: String,
    pub link: Option<String>,
    pub photo: Option<String>,
}

pub struct RegisterCommenterHandler {
    commenters: Arc<dyn CommenterRepository>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenGenerator>,
}

impl RegisterCommenterHandler {
    pub fn new(
        commenters: Arc<dyn CommenterRepository>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenGenerator>,
    ) -> Self {
        Self {
            commenters,
            hasher,
            tokens,
        }
    }

    pub async fn handle(&self, cmd: RegisterCommenterCommand) -> Result<CommenterId, AuthError> {
        for (field, value) in [
            ("email", &cmd.email),
            ("name", &cmd.name),
            ("password", &cmd.password),
        ] {
            if value.trim().is_empty() {
                return Err(AuthError::missing(field));
            }
        }

        let existing = self
            .commenters
            .find_by_email(&cmd.email, &IdentityProvider::Local)
            .await?;
        if existing.is_some() {
            return Err(AuthError::EmailAlreadyExists);
        }

        let commenter = Commenter::new(
            CommenterId::new(self.tokens.hex_token())?,
            cmd.email,
            cmd.name,
            cmd.link.unwrap_or_default(),
            cmd.photo.unwrap_or_default(),
            IdentityProvider::Local,
            Some(self.hasher.hash(&cmd.password)?),
        );

        match self.commenters.insert(&commenter).await {
            Ok(()) => {}
            Err(err) if err.is_conflict() => return Err(AuthError::EmailAlreadyExists),
            Err(err) => return Err(err.into()),
        }

        info!(commenter_id = %commenter.id(), "Commenter registered");
        Ok(commenter.id().clone())
    }
}
