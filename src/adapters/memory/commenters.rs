use async_trait::async_trait;

use super::InMemoryStore;
use crate::domain::commenter::{Commenter, IdentityProvider, ProfileUpdate, SessionLookup};
use crate::domain::foundation::{CommenterId, CommenterToken, DomainError};
use crate::ports::CommenterRepository;

#[async_trait]
impl CommenterRepository for InMemoryStore {
    async fn insert(&self, commenter: &Commenter) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        let taken = state.commenters.values().any(|c| {
            c.email() == commenter.email() && c.provider() == commenter.provider()
        });
        if taken || state.commenters.contains_key(commenter.id()) {
            return Err(DomainError::conflict("commenter already exists"));
        }
        state
            .commenters
            .insert(commenter.id().clone(), commenter.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &CommenterId) -> Result<Option<Commenter>, DomainError> {
        Ok(self.state.read().await.commenters.get(id).cloned())
    }

    async fn find_by_email(
        &self,
        email: &str,
        provider: &IdentityProvider,
    ) -> Result<Option<Commenter>, DomainError> {
        let state = self.state.read().await;
        Ok(state
            .commenters
            .values()
            .find(|c| c.email() == email && c.provider() == provider)
            .cloned())
    }

    async fn find_many(&self, ids: &[CommenterId]) -> Result<Vec<Commenter>, DomainError> {
        let state = self.state.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| state.commenters.get(id))
            .cloned()
            .collect())
    }

    async fn update_profile(
        &self,
        id: &CommenterId,
        update: &ProfileUpdate,
    ) -> Result<bool, DomainError> {
        let mut state = self.state.write().await;
        match state.commenters.get_mut(id) {
            Some(commenter) => {
                commenter.apply(update);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn create_session(
        &self,
        token: &CommenterToken,
        commenter_id: Option<&CommenterId>,
    ) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        if state.commenter_sessions.contains_key(token) {
            return Err(DomainError::conflict("commenter token already in use"));
        }
        state
            .commenter_sessions
            .insert(token.clone(), commenter_id.cloned());
        Ok(())
    }

    async fn find_session(&self, token: &CommenterToken) -> Result<SessionLookup, DomainError> {
        let state = self.state.read().await;
        Ok(match state.commenter_sessions.get(token) {
            None => SessionLookup::Unknown,
            Some(None) => SessionLookup::Pending,
            Some(Some(id)) => match state.commenters.get(id) {
                Some(commenter) => SessionLookup::Bound(commenter.clone()),
                None => SessionLookup::Unknown,
            },
        })
    }

    async fn bind_session(
        &self,
        token: &CommenterToken,
        commenter_id: &CommenterId,
    ) -> Result<bool, DomainError> {
        let mut state = self.state.write().await;
        match state.commenter_sessions.get_mut(token) {
            Some(slot) => {
                *slot = Some(commenter_id.clone());
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
