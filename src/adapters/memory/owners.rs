use async_trait::async_trait;

use super::InMemoryStore;
use crate::domain::foundation::{ConfirmationToken, DomainError, OwnerId, OwnerToken, ResetToken};
use crate::domain::owner::Owner;
use crate::ports::OwnerRepository;

#[async_trait]
impl OwnerRepository for InMemoryStore {
    async fn insert(&self, owner: &Owner) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        if state.owners.values().any(|o| o.email() == owner.email()) {
            return Err(DomainError::conflict("owner email already registered"));
        }
        state.owners.insert(owner.id().clone(), owner.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &OwnerId) -> Result<Option<Owner>, DomainError> {
        Ok(self.state.read().await.owners.get(id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Owner>, DomainError> {
        let state = self.state.read().await;
        Ok(state.owners.values().find(|o| o.email() == email).cloned())
    }

    async fn insert_confirmation_token(
        &self,
        token: &ConfirmationToken,
        owner_id: &OwnerId,
    ) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        state
            .confirmation_tokens
            .insert(token.clone(), owner_id.clone());
        Ok(())
    }

    async fn confirm_by_token(&self, token: &ConfirmationToken) -> Result<u64, DomainError> {
        let mut state = self.state.write().await;
        let Some(owner_id) = state.confirmation_tokens.get(token).cloned() else {
            return Ok(0);
        };
        match state.owners.get_mut(&owner_id) {
            Some(owner) => {
                owner.confirm();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete_confirmation_token(
        &self,
        token: &ConfirmationToken,
    ) -> Result<(), DomainError> {
        self.state.write().await.confirmation_tokens.remove(token);
        Ok(())
    }

    async fn insert_session(
        &self,
        token: &OwnerToken,
        owner_id: &OwnerId,
    ) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        if state.owner_sessions.contains_key(token) {
            return Err(DomainError::conflict("owner token already in use"));
        }
        state.owner_sessions.insert(token.clone(), owner_id.clone());
        Ok(())
    }

    async fn find_by_session(&self, token: &OwnerToken) -> Result<Option<Owner>, DomainError> {
        let state = self.state.read().await;
        Ok(state
            .owner_sessions
            .get(token)
            .and_then(|id| state.owners.get(id))
            .cloned())
    }

    async fn insert_reset_token(
        &self,
        token: &ResetToken,
        owner_id: &OwnerId,
    ) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        state.reset_tokens.insert(token.clone(), owner_id.clone());
        Ok(())
    }

    async fn consume_reset_token(&self, token: &ResetToken) -> Result<Option<OwnerId>, DomainError> {
        Ok(self.state.write().await.reset_tokens.remove(token))
    }

    async fn update_password_hash(
        &self,
        owner_id: &OwnerId,
        password_hash: &str,
    ) -> Result<bool, DomainError> {
        let mut state = self.state.write().await;
        match state.owners.get_mut(owner_id) {
            Some(owner) => {
                owner.set_password_hash(password_hash);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, owner_id: &OwnerId) -> Result<bool, DomainError> {
        let mut state = self.state.write().await;
        let existed = state.owners.remove(owner_id).is_some();
        state.owner_sessions.retain(|_, o| o != owner_id);
        state.confirmation_tokens.retain(|_, o| o != owner_id);
        state.reset_tokens.retain(|_, o| o != owner_id);
        Ok(existed)
    }
}
