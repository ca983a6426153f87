//! Store for outstanding SSO handshake tokens.

use async_trait::async_trait;

use crate::domain::foundation::{CommenterToken, DomainError, DomainName, SsoToken, Timestamp};

/// What an SSO token was issued for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SsoGrant {
    pub domain: DomainName,
    pub commenter_token: CommenterToken,
    pub expires_at: Timestamp,
}

impl SsoGrant {
    pub fn is_expired(&self, now: &Timestamp) -> bool {
        !now.is_before(&self.expires_at)
    }
}

#[async_trait]
pub trait SsoTokenStore: Send + Sync {
    async fn issue(&self, token: &SsoToken, grant: &SsoGrant) -> Result<(), DomainError>;

    /// Looks up a token without consuming it.
    async fn peek(&self, token: &SsoToken) -> Result<Option<SsoGrant>, DomainError>;

    /// Atomically removes a token. Returns false if it was already gone, so
    /// at most one caller ever consumes a given token.
    async fn consume(&self, token: &SsoToken) -> Result<bool, DomainError>;
}
