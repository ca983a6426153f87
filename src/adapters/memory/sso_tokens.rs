use async_trait::async_trait;

use super::InMemoryStore;
use crate::domain::foundation::{DomainError, SsoToken};
use crate::ports::{SsoGrant, SsoTokenStore};

#[async_trait]
impl SsoTokenStore for InMemoryStore {
    async fn issue(&self, token: &SsoToken, grant: &SsoGrant) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        if state.sso_tokens.contains_key(token) {
            return Err(DomainError::conflict("SSO token already issued"));
        }
        state.sso_tokens.insert(token.clone(), grant.clone());
        Ok(())
    }

    async fn peek(&self, token: &SsoToken) -> Result<Option<SsoGrant>, DomainError> {
        Ok(self.state.read().await.sso_tokens.get(token).cloned())
    }

    async fn consume(&self, token: &SsoToken) -> Result<bool, DomainError> {
        Ok(self.state.write().await.sso_tokens.remove(token).is_some())
    }
}
