//! Domain repository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, DomainName, OwnerId};
use crate::domain::site::Domain;

#[async_trait]
pub trait DomainRepository: Send + Sync {
    async fn find(&self, name: &DomainName) -> Result<Option<Domain>, DomainError>;

    async fn list_by_owner(&self, owner_id: &OwnerId) -> Result<Vec<Domain>, DomainError>;

    /// Inserts or replaces a domain.
    async fn save(&self, domain: &Domain) -> Result<(), DomainError>;

    /// Deletes a domain with its pages, comments and votes.
    ///
    /// Returns false if the domain is unknown.
    async fn delete(&self, name: &DomainName) -> Result<bool, DomainError>;
}
