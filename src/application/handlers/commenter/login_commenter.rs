//! LoginCommenterHandler - Local commenter login.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use crate::domain::auth::AuthError;
use crate::domain::commenter::{Commenter, IdentityProvider};
use crate::domain::foundation::CommenterToken;
use crate::ports::{CommenterRepository, PasswordHasher, TokenGenerator};

#[derive(Debug, Clone)]
pub struct LoginCommenterCommand {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct LoginCommenterResult {
    pub token: CommenterToken,
    pub commenter: Commenter,
}

pub struct LoginCommenterHandler {
    commenters: Arc<dyn CommenterRepository>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenGenerator>,
    wrong_auth_delay: Duration,
}

impl LoginCommenterHandler {
    pub fn new(
        commenters: Arc<dyn CommenterRepository>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenGenerator>,
        wrong_auth_delay: Duration,
    ) -> Self {
        Self {
            commenters,
            hasher,
            tokens,
            wrong_auth_delay,
        }
    }

    pub async fn handle(
        &self,
        cmd: LoginCommenterCommand,
    ) -> Result<LoginCommenterResult, AuthError> {
        if cmd.email.trim().is_empty() {
            return Err(AuthError::missing("email"));
        }
        if cmd.password.is_empty() {
            return Err(AuthError::missing("password"));
        }

        let found = self
            .commenters
            .find_by_email(&cmd.email, &IdentityProvider::Local)
            .await?;
        let verified = match found.as_ref().and_then(Commenter::password_hash) {
            Some(digest) => self.hasher.verify(digest, &cmd.password),
            None => {
                self.hasher.verify_nothing(&cmd.password);
                false
            }
        };
        let commenter = match found {
            Some(c) if verified => c,
            _ => {
                debug!("Commenter login rejected");
                tokio::time::sleep(self.wrong_auth_delay).await;
                return Err(AuthError::InvalidCredentials);
            }
        };

        let token = CommenterToken::new(self.tokens.hex_token())?;
        self.commenters
            .create_session(&token, Some(commenter.id()))
            .await?;

        info!(commenter_id = %commenter.id(), "Commenter logged in");
        Ok(LoginCommenterResult { token, commenter })
    }
}
