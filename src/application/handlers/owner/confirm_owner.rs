//! ConfirmOwnerHandler - Redeems an email confirmation token.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::auth::AuthError;
use crate::domain::foundation::ConfirmationToken;
use crate::ports::OwnerRepository;

#[derive(Debug, Clone)]
pub struct ConfirmOwnerCommand {
    pub token: String,
}

pub struct ConfirmOwnerHandler {
    owners: Arc<dyn OwnerRepository>,
}

impl ConfirmOwnerHandler {
    pub fn new(owners: Arc<dyn OwnerRepository>) -> Self {
        Self { owners }
    }

    pub async fn handle(&self, cmd: ConfirmOwnerCommand) -> Result<(), AuthError> {
        let token = ConfirmationToken::new(cmd.token).map_err(|_| AuthError::missing("token"))?;

        let confirmed = self.owners.confirm_by_token(&token).await?;
        if confirmed == 0 {
            return Err(AuthError::NoSuchConfirmationToken);
        }

        if let Err(err) = self.owners.delete_confirmation_token(&token).await {
            warn!(error = %err, "Failed to delete used confirmation token");
        }

        info!(confirmed, "Owner email confirmed");
        Ok(())
    }
}
