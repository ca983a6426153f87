//! GetOwnerHandler - Resolves an owner session token.

use std::sync::Arc;

use crate::domain::auth::AuthError;
use crate::domain::foundation::OwnerToken;
use crate::domain::owner::Owner;
use crate::ports::OwnerRepository;

#[derive(Debug, Clone)]
pub struct GetOwnerQuery {
    pub token: String,
}

pub struct GetOwnerHandler {
    owners: Arc<dyn OwnerRepository>,
}

impl GetOwnerHandler {
    pub fn new(owners: Arc<dyn OwnerRepository>) -> Self {
        Self { owners }
    }

    pub async fn handle(&self, query: GetOwnerQuery) -> Result<Owner, AuthError> {
        let token = OwnerToken::new(query.token).map_err(|_| AuthError::missing("ownerToken"))?;
        self.owners
            .find_by_session(&token)
            .await?
            .ok_or(AuthError::NoSuchToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;
    use crate::domain::foundation::OwnerId;

    #[tokio::test]
    async fn resolves_live_session() {
        let store = Arc::new(InMemoryStore::new());
        let owner = Owner::register(
            OwnerId::new("o1").unwrap(),
            "owner@example.com",
            "Owner",
            "digest",
            true,
        );
        store.insert(&owner).await.unwrap();
        store
            .insert_session(&OwnerToken::new("s1").unwrap(), owner.id())
            .await
            .unwrap();
        let handler = GetOwnerHandler::new(store);

        let found = handler
            .handle(GetOwnerQuery {
                token: "s1".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(found.email(), "owner@example.com");
    }

    #[tokio::test]
    async fn unknown_session_is_no_such_token() {
        let handler = GetOwnerHandler::new(Arc::new(InMemoryStore::new()));

        assert_eq!(
            handler
                .handle(GetOwnerQuery {
                    token: "nope".to_string()
                })
                .await
                .unwrap_err(),
            AuthError::NoSuchToken
        );
    }
}
