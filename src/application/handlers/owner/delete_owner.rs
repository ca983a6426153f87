//! DeleteOwnerHandler - Removes an owner account, optionally with its domains.

use std::sync::Arc;

use tracing::info;

use crate::domain::auth::AuthError;
use crate::domain::foundation::OwnerId;
use crate::ports::{DomainRepository, OwnerRepository};

#[derive(Debug, Clone)]
pub struct DeleteOwnerCommand {
    pub owner_id: OwnerId,
    /// Delete every owned domain first instead of refusing.
    pub cascade_domains: bool,
}

pub struct DeleteOwnerHandler {
    owners: Arc<dyn OwnerRepository>,
    domains: Arc<dyn DomainRepository>,
}

impl DeleteOwnerHandler {
    pub fn new(owners: Arc<dyn OwnerRepository>, domains: Arc<dyn DomainRepository>) -> Self {
        Self { owners, domains }
    }

    pub async fn handle(&self, cmd: DeleteOwnerCommand) -> Result<(), AuthError> {
        let owned = self.domains.list_by_owner(&cmd.owner_id).await?;
        if !owned.is_empty() && !cmd.cascade_domains {
            return Err(AuthError::CannotDeleteOwnerWithActiveDomains);
        }

        for domain in &owned {
            self.domains.delete(domain.name()).await?;
        }

        if !self.owners.delete(&cmd.owner_id).await? {
            return Err(AuthError::NoSuchOwner);
        }

        info!(
            owner_id = %cmd.owner_id,
            domains = owned.len(),
            "Owner deleted"
        );
        Ok(())
    }
}
