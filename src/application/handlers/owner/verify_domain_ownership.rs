//! VerifyDomainOwnershipHandler - Answers whether an owner owns a domain.

use std::sync::Arc;

use crate::domain::auth::AuthError;
use crate::domain::foundation::{DomainName, OwnerId};
use crate::ports::DomainRepository;

#[derive(Debug, Clone)]
pub struct VerifyDomainOwnershipQuery {
    pub owner_id: String,
    pub domain: String,
}

pub struct VerifyDomainOwnershipHandler {
    domains: Arc<dyn DomainRepository>,
}

impl VerifyDomainOwnershipHandler {
    pub fn new(domains: Arc<dyn DomainRepository>) -> Self {
        Self { domains }
    }

    /// An unknown domain is not owned by anyone.
    pub async fn handle(&self, query: VerifyDomainOwnershipQuery) -> Result<bool, AuthError> {
        let owner_id = OwnerId::new(query.owner_id)?;
        let domain = DomainName::new(query.domain)?;

        Ok(self
            .domains
            .find(&domain)
            .await?
            .is_some_and(|d| d.is_owned_by(&owner_id)))
    }
}
