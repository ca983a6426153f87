//! LoginOwnerHandler - Exchanges owner credentials for a session token.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use crate::domain::auth::AuthError;
use crate::domain::foundation::{OwnerId, OwnerToken};
use crate::ports::{OwnerRepository, PasswordHasher, TokenGenerator};

#[derive(Debug, Clone)]
pub struct LoginOwnerCommand {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct LoginOwnerResult {
    pub owner_id: OwnerId,
    pub token: OwnerToken,
}

pub struct LoginOwnerHandler {
    owners: Arc<dyn OwnerRepository>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenGenerator>,
    wrong_auth_delay: Duration,
}

impl LoginOwnerHandler {
    pub fn new(
        owners: Arc<dyn OwnerRepository>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenGenerator>,
        wrong_auth_delay: Duration,
    ) -> Self {
        Self {
            owners,
            hasher,
            tokens,
            wrong_auth_delay,
        }
    }

    pub async fn handle(&self, cmd: LoginOwnerCommand) -> Result<LoginOwnerResult, AuthError> {
        if cmd.email.trim().is_empty() {
            return Err(AuthError::missing("email"));
        }
        if cmd.password.is_empty() {
            return Err(AuthError::missing("password"));
        }

        let found = self.owners.find_by_email(&cmd.email).await?;
        let verified = match &found {
            Some(owner) => self.hasher.verify(owner.password_hash(), &cmd.password),
            None => {
                self.hasher.verify_nothing(&cmd.password);
                false
            }
        };
        let owner = match found {
            Some(owner) if verified => owner,
            _ => return Err(self.reject().await),
        };

        if !owner.is_confirmed() {
            return Err(AuthError::UnconfirmedEmail);
        }

        let token = OwnerToken::new(self.tokens.hex_token())?;
        self.owners.insert_session(&token, owner.id()).await?;

        info!(owner_id = %owner.id(), "Owner logged in");
        Ok(LoginOwnerResult {
            owner_id: owner.id().clone(),
            token,
        })
    }

    /// Unknown accounts and wrong passwords take the same path and time.
    async fn reject(&self) -> AuthError {
        debug!("Owner login rejected");
        tokio::time::sleep(self.wrong_auth_delay).await;
        AuthError::InvalidCredentials
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;
    use crate::application::test_support::{CountingHasher, PlainHasher, SequentialTokens};
    use crate::domain::owner::Owner;
    use std::time::Instant;

    const DELAY: Duration = Duration::from_millis(30);

    async fn handler_with(confirmed: bool) -> (Arc<InMemoryStore>, LoginOwnerHandler) {
        let store = Arc::new(InMemoryStore::new());
        let owner = Owner::register(
            OwnerId::new("o1").unwrap(),
            "owner@example.com",
            "Owner",
            "plain:hunter2",
            confirmed,
        );
        OwnerRepository::insert(store.as_ref(), &owner).await.unwrap();
        let handler = LoginOwnerHandler::new(
            store.clone(),
            Arc::new(PlainHasher),
            Arc::new(SequentialTokens::default()),
            DELAY,
        );
        (store, handler)
    }

    fn login(email: &str, password: &str) -> LoginOwnerCommand {
        LoginOwnerCommand {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn valid_credentials_mint_a_session() {
        let (store, handler) = handler_with(true).await;

        let result = handler
            .handle(login("owner@example.com", "hunter2"))
            .await
            .unwrap();

        let owner = store.find_by_session(&result.token).await.unwrap().unwrap();
        assert_eq!(owner.id(), &result.owner_id);
    }

    #[tokio::test]
    async fn unknown_email_and_wrong_password_are_indistinguishable() {
        let (_, handler) = handler_with(true).await;

        let started = Instant::now();
        let unknown = handler
            .handle(login("nobody@example.com", "hunter2"))
            .await
            .unwrap_err();
        assert!(started.elapsed() >= DELAY);

        let started = Instant::now();
        let wrong = handler
            .handle(login("owner@example.com", "wrong"))
            .await
            .unwrap_err();
        assert!(started.elapsed() >= DELAY);

        assert_eq!(unknown, AuthError::InvalidCredentials);
        assert_eq!(unknown, wrong);
        assert_eq!(unknown.to_string(), wrong.to_string());
    }

    #[tokio::test]
    async fn unknown_email_costs_one_digest_like_a_wrong_password() {
        let (store, _) = handler_with(true).await;
        let hasher = Arc::new(CountingHasher::default());
        let handler = LoginOwnerHandler::new(
            store,
            hasher.clone(),
            Arc::new(SequentialTokens::default()),
            Duration::ZERO,
        );

        handler
            .handle(login("nobody@example.com", "hunter2"))
            .await
            .unwrap_err();
        assert_eq!(hasher.work(), 1);

        handler
            .handle(login("owner@example.com", "wrong"))
            .await
            .unwrap_err();
        assert_eq!(hasher.work(), 2);
    }

    #[tokio::test]
    async fn unconfirmed_owner_cannot_log_in() {
        let (store, handler) = handler_with(false).await;

        assert_eq!(
            handler
                .handle(login("owner@example.com", "hunter2"))
                .await
                .unwrap_err(),
            AuthError::UnconfirmedEmail
        );
        assert_eq!(
            store.owner_session_count(&OwnerId::new("o1").unwrap()).await,
            0
        );
    }
}
