//! Owner password reset: request a reset token, then redeem it.

use std::sync::Arc;

use tracing::{debug, info};

use crate::application::notification::NotificationDispatcher;
use crate::domain::auth::AuthError;
use crate::domain::foundation::ResetToken;
use crate::ports::{Notification, OwnerRepository, PasswordHasher, Recipient, TokenGenerator};

#[derive(Debug, Clone)]
pub struct RequestPasswordResetCommand {
    pub email: String,
}

/// Issues a reset token and mails it to the owner.
pub struct RequestPasswordResetHandler {
    owners: Arc<dyn OwnerRepository>,
    tokens: Arc<dyn TokenGenerator>,
    notifications: NotificationDispatcher,
}

impl RequestPasswordResetHandler {
    pub fn new(
        owners: Arc<dyn OwnerRepository>,
        tokens: Arc<dyn TokenGenerator>,
        notifications: NotificationDispatcher,
    ) -> Self {
        Self {
            owners,
            tokens,
            notifications,
        }
    }

    /// Succeeds for unknown emails too, so the endpoint cannot probe accounts.
    pub async fn handle(&self, cmd: RequestPasswordResetCommand) -> Result<(), AuthError> {
        if cmd.email.trim().is_empty() {
            return Err(AuthError::missing("email"));
        }

        let Some(owner) = self.owners.find_by_email(&cmd.email).await? else {
            debug!("Password reset requested for unknown email");
            return Ok(());
        };

        let token = ResetToken::new(self.tokens.hex_token())?;
        self.owners.insert_reset_token(&token, owner.id()).await?;
        self.notifications.notify(
            Notification::OwnerPasswordReset {
                token: token.as_str().to_string(),
            },
            Recipient {
                email: owner.email().to_string(),
                name: owner.name().to_string(),
            },
        );

        info!(owner_id = %owner.id(), "Password reset issued");
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct ResetPasswordCommand {
    pub token: String,
    pub password: String,
}

/// Replaces the owner's password digest using a reset token.
pub struct ResetPasswordHandler {
    owners: Arc<dyn OwnerRepository>,
    hasher: Arc<dyn PasswordHasher>,
}

impl ResetPasswordHandler {
    pub fn new(owners: Arc<dyn OwnerRepository>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { owners, hasher }
    }

    pub async fn handle(&self, cmd: ResetPasswordCommand) -> Result<(), AuthError> {
        let token = ResetToken::new(cmd.token).map_err(|_| AuthError::missing("resetToken"))?;
        if cmd.password.is_empty() {
            return Err(AuthError::missing("password"));
        }

        let digest = self.hasher.hash(&cmd.password)?;
        let owner_id = self
            .owners
            .consume_reset_token(&token)
            .await?
            .ok_or(AuthError::NoSuchResetToken)?;

        if !self.owners.update_password_hash(&owner_id, &digest).await? {
            return Err(AuthError::NoSuchOwner);
        }

        info!(owner_id = %owner_id, "Owner password reset");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;
    use crate::application::notification::NotificationJob;
    use crate::application::test_support::{PlainHasher, SequentialTokens};
    use crate::domain::foundation::OwnerId;
    use crate::domain::owner::Owner;

    async fn store_with_owner() -> (Arc<InMemoryStore>, OwnerId) {
        let store = Arc::new(InMemoryStore::new());
        let id = OwnerId::new("o1").unwrap();
        let owner = Owner::register(id.clone(), "owner@example.com", "Owner", "plain:old", true);
        store.insert(&owner).await.unwrap();
        (store, id)
    }

    #[tokio::test]
    async fn request_then_reset_replaces_digest() {
        let (store, id) = store_with_owner().await;
        let (notifications, mut jobs) = NotificationDispatcher::channel(4);
        let request = RequestPasswordResetHandler::new(
            store.clone(),
            Arc::new(SequentialTokens::default()),
            notifications,
        );
        let reset = ResetPasswordHandler::new(store.clone(), Arc::new(PlainHasher));

        request
            .handle(RequestPasswordResetCommand {
                email: "owner@example.com".to_string(),
            })
            .await
            .unwrap();
        let token = store.reset_token_for(&id).await.unwrap();
        assert!(matches!(
            jobs.try_recv().unwrap(),
            NotificationJob::Direct {
                notification: Notification::OwnerPasswordReset { .. },
                ..
            }
        ));

        reset
            .handle(ResetPasswordCommand {
                token: token.as_str().to_string(),
                password: "new".to_string(),
            })
            .await
            .unwrap();

        let owner = store.find_by_id(&id).await.unwrap().unwrap();
        assert_eq!(owner.password_hash(), "plain:new");
        assert_eq!(store.reset_token_count(&id).await, 0);
    }

    #[tokio::test]
    async fn unknown_email_succeeds_silently() {
        let (store, _) = store_with_owner().await;
        let (notifications, mut jobs) = NotificationDispatcher::channel(4);
        let request = RequestPasswordResetHandler::new(
            store,
            Arc::new(SequentialTokens::default()),
            notifications,
        );

        request
            .handle(RequestPasswordResetCommand {
                email: "nobody@example.com".to_string(),
            })
            .await
            .unwrap();

        assert!(jobs.try_recv().is_err());
    }

    #[tokio::test]
    async fn reset_token_is_single_use() {
        let (store, id) = store_with_owner().await;
        store
            .insert_reset_token(&ResetToken::new("rt").unwrap(), &id)
            .await
            .unwrap();
        let reset = ResetPasswordHandler::new(store, Arc::new(PlainHasher));
        let cmd = ResetPasswordCommand {
            token: "rt".to_string(),
            password: "new".to_string(),
        };

        reset.handle(cmd.clone()).await.unwrap();

        assert_eq!(
            reset.handle(cmd).await.unwrap_err(),
            AuthError::NoSuchResetToken
        );
    }
}
