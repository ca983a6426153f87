//! Owner repository port.
//!
//! Persists owners together with their sessions, email confirmation tokens
//! and password reset tokens.
//!
//! # Design
//!
//! - **Not-found is not an error**: lookups return `Option`, mutations report
//!   whether a row was touched
//! - **Unique email**: `insert` fails with `ErrorCode::Conflict` on a taken email

use async_trait::async_trait;

use crate::domain::foundation::{ConfirmationToken, DomainError, OwnerId, OwnerToken, ResetToken};
use crate::domain::owner::Owner;

#[async_trait]
pub trait OwnerRepository: Send + Sync {
    /// Inserts a newly registered owner.
    ///
    /// # Errors
    ///
    /// - `Conflict` if the email is already registered
    /// - `DatabaseError` on persistence failure
    async fn insert(&self, owner: &Owner) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &OwnerId) -> Result<Option<Owner>, DomainError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<Owner>, DomainError>;

    async fn insert_confirmation_token(
        &self,
        token: &ConfirmationToken,
        owner_id: &OwnerId,
    ) -> Result<(), DomainError>;

    /// Confirms every owner bound to the token.
    ///
    /// Returns the number of owners confirmed.
    async fn confirm_by_token(&self, token: &ConfirmationToken) -> Result<u64, DomainError>;

    async fn delete_confirmation_token(&self, token: &ConfirmationToken)
        -> Result<(), DomainError>;

    async fn insert_session(&self, token: &OwnerToken, owner_id: &OwnerId)
        -> Result<(), DomainError>;

    /// Resolves a session token to its owner.
    async fn find_by_session(&self, token: &OwnerToken) -> Result<Option<Owner>, DomainError>;

    async fn insert_reset_token(&self, token: &ResetToken, owner_id: &OwnerId)
        -> Result<(), DomainError>;

    /// Atomically removes a reset token, returning the owner it was issued to.
    async fn consume_reset_token(&self, token: &ResetToken)
        -> Result<Option<OwnerId>, DomainError>;

    /// Replaces the password digest. Returns false if the owner is unknown.
    async fn update_password_hash(
        &self,
        owner_id: &OwnerId,
        password_hash: &str,
    ) -> Result<bool, DomainError>;

    /// Deletes the owner and every session, confirmation and reset token
    /// bound to it. Returns false if the owner is unknown.
    async fn delete(&self, owner_id: &OwnerId) -> Result<bool, DomainError>;
}
