//! NewCommenterSessionHandler - Mints a pending commenter token.

use std::sync::Arc;

use tracing::debug;

use crate::domain::auth::AuthError;
use crate::domain::foundation::CommenterToken;
use crate::ports::{CommenterRepository, TokenGenerator};

pub struct NewCommenterSessionHandler {
    commenters: Arc<dyn CommenterRepository>,
    tokens: Arc<dyn TokenGenerator>,
}

impl NewCommenterSessionHandler {
    pub fn new(commenters: Arc<dyn CommenterRepository>, tokens: Arc<dyn TokenGenerator>) -> Self {
        Self { commenters, tokens }
    }

    /// The token resolves to nobody until a login or SSO handshake binds it.
    pub async fn handle(&self) -> Result<CommenterToken, AuthError> {
        let token = CommenterToken::new(self.tokens.hex_token())?;
        self.commenters.create_session(&token, None).await?;
        debug!("Pending commenter session created");
        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;
    use crate::application::test_support::SequentialTokens;
    use crate::domain::commenter::SessionLookup;

    #[tokio::test]
    async fn minted_token_is_pending() {
        let store = Arc::new(InMemoryStore::new());
        let handler =
            NewCommenterSessionHandler::new(store.clone(), Arc::new(SequentialTokens::default()));

        let token = handler.handle().await.unwrap();

        assert_eq!(token.as_str().len(), 64);
        assert_eq!(
            store.find_session(&token).await.unwrap(),
            SessionLookup::Pending
        );
    }
}
