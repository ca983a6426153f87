//! RegisterOwnerHandler - Command handler for owner sign-up.

use std::sync::Arc;

use tracing::{info, warn};

use crate::application::notification::NotificationDispatcher;
use crate::application::settings::AuthSettings;
use crate::domain::auth::AuthError;
use crate::domain::commenter::{Commenter, IdentityProvider};
use crate::domain::foundation::{CommenterId, ConfirmationToken, OwnerId};
use crate::domain::owner::Owner;
use crate::ports::{
    CommenterRepository, Notification, OwnerRepository, PasswordHasher, Recipient, TokenGenerator,
};

/// Command to register a new owner.
#[derive(Debug, Clone)]
pub struct RegisterOwnerCommand {
    pub email: String,
    pub name: String,
    pub password: String,
}

/// Result of a successful registration.
#[derive(Debug, Clone)]
pub struct RegisterOwnerResult {
    pub owner_id: OwnerId,
    /// False when a confirmation email must be acted on before login.
    pub confirmed: bool,
}

/// Handler for owner registration.
pub struct RegisterOwnerHandler {
    owners: Arc<dyn OwnerRepository>,
    commenters: Arc<dyn CommenterRepository>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenGenerator>,
    notifications: NotificationDispatcher,
    settings: AuthSettings,
}

impl RegisterOwnerHandler {
    pub fn new(
        owners: Arc<dyn OwnerRepository>,
        commenters: Arc<dyn CommenterRepository>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenGenerator>,
        notifications: NotificationDispatcher,
        settings: AuthSettings,
    ) -> Self {
        Self {
            owners,
            commenters,
            hasher,
            tokens,
            notifications,
            settings,
        }
    }

    pub async fn handle(&self, cmd: RegisterOwnerCommand) -> Result<RegisterOwnerResult, AuthError> {
        if cmd.email.trim().is_empty() {
            return Err(AuthError::missing("email"));
        }
        if cmd.name.trim().is_empty() {
            return Err(AuthError::missing("name"));
        }
        if cmd.password.is_empty() {
            return Err(AuthError::missing("password"));
        }
        if !self.settings.allow_new_owners {
            return Err(AuthError::RegistrationForbidden);
        }
        if self.owners.find_by_email(&cmd.email).await?.is_some() {
            return Err(AuthError::EmailAlreadyExists);
        }

        let digest = self.hasher.hash(&cmd.password)?;
        let confirmed = !self.settings.email_verification;
        let owner = Owner::register(
            OwnerId::new(self.tokens.hex_token())?,
            cmd.email.clone(),
            cmd.name.clone(),
            digest.clone(),
            confirmed,
        )
        .with_companion(CommenterId::new(self.tokens.hex_token())?);

        // A concurrent sign-up can still win the race to the unique index.
        match self.owners.insert(&owner).await {
            Ok(()) => {}
            Err(err) if err.is_conflict() => return Err(AuthError::EmailAlreadyExists),
            Err(err) => return Err(err.into()),
        }

        if !confirmed {
            let token = ConfirmationToken::new(self.tokens.hex_token())?;
            self.owners.insert_confirmation_token(&token, owner.id()).await?;
            self.notifications.notify(
                Notification::OwnerConfirmation {
                    token: token.as_str().to_string(),
                },
                Recipient {
                    email: owner.email().to_string(),
                    name: owner.name().to_string(),
                },
            );
        }

        self.provision_companion(&owner, digest).await;

        info!(owner_id = %owner.id(), confirmed, "Owner registered");
        Ok(RegisterOwnerResult {
            owner_id: owner.id().clone(),
            confirmed,
        })
    }

    /// Local commenter identity so the owner can comment on their domains.
    ///
    /// Owner standing follows the id recorded on the owner, so a failed
    /// insert leaves the owner without a companion rather than promoting
    /// whoever already holds the email.
    async fn provision_companion(&self, owner: &Owner, digest: String) {
        let Some(id) = owner.companion_id() else {
            return;
        };
        let companion = Commenter::new(
            id.clone(),
            owner.email(),
            owner.name(),
            "",
            "",
            IdentityProvider::Local,
            Some(digest),
        );
        if let Err(err) = self.commenters.insert(&companion).await {
            warn!(owner_id = %owner.id(), error = %err, "Failed to create companion commenter");
        }
    }
}
