//! Commenter repository port.
//!
//! Commenter identities are unique per `(email, provider)`. Sessions are
//! bearer tokens that are either pending (no identity yet, during an SSO
//! round-trip) or bound to a commenter.

use async_trait::async_trait;

use crate::domain::commenter::{Commenter, IdentityProvider, ProfileUpdate, SessionLookup};
use crate::domain::foundation::{CommenterId, CommenterToken, DomainError};

#[async_trait]
pub trait CommenterRepository: Send + Sync {
    /// Inserts a new commenter.
    ///
    /// # Errors
    ///
    /// - `Conflict` if `(email, provider)` is taken
    /// - `DatabaseError` on persistence failure
    async fn insert(&self, commenter: &Commenter) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &CommenterId) -> Result<Option<Commenter>, DomainError>;

    async fn find_by_email(
        &self,
        email: &str,
        provider: &IdentityProvider,
    ) -> Result<Option<Commenter>, DomainError>;

    /// Loads every known commenter among `ids`. Unknown ids are skipped.
    async fn find_many(&self, ids: &[CommenterId]) -> Result<Vec<Commenter>, DomainError>;

    /// Overwrites profile attributes. Returns false if the commenter is unknown.
    async fn update_profile(
        &self,
        id: &CommenterId,
        update: &ProfileUpdate,
    ) -> Result<bool, DomainError>;

    /// Creates a session, pending when `commenter_id` is `None`.
    async fn create_session(
        &self,
        token: &CommenterToken,
        commenter_id: Option<&CommenterId>,
    ) -> Result<(), DomainError>;

    async fn find_session(&self, token: &CommenterToken) -> Result<SessionLookup, DomainError>;

    /// Binds an existing session to a commenter. Returns false if the token
    /// is unknown.
    async fn bind_session(
        &self,
        token: &CommenterToken,
        commenter_id: &CommenterId,
    ) -> Result<bool, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commenter_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn CommenterRepository) {}
    }
}
