//! StartSsoHandler - Token mint leg of the SSO handshake.
//!
//! Binds a fresh SSO token to `(domain, pending commenter token)` and builds
//! the provider URL the visitor is redirected to. The provider receives the
//! token and an HMAC-SHA256 of the raw token bytes, proving the request came
//! from this service.

use std::sync::Arc;

use tracing::{error, info};

use crate::domain::auth::{AuthError, SsoSigner};
use crate::domain::foundation::{CommenterToken, DomainName, SsoToken, Timestamp};
use crate::ports::{CommenterRepository, DomainRepository, SsoGrant, SsoTokenStore, TokenGenerator};

#[derive(Debug, Clone)]
pub struct StartSsoCommand {
    pub domain: String,
    pub commenter_token: String,
}

#[derive(Debug, Clone)]
pub struct StartSsoResult {
    pub token: SsoToken,
    pub redirect_url: String,
}

pub struct StartSsoHandler {
    domains: Arc<dyn DomainRepository>,
    commenters: Arc<dyn CommenterRepository>,
    sso_tokens: Arc<dyn SsoTokenStore>,
    tokens: Arc<dyn TokenGenerator>,
    ttl_secs: u64,
}

impl StartSsoHandler {
    pub fn new(
        domains: Arc<dyn DomainRepository>,
        commenters: Arc<dyn CommenterRepository>,
        sso_tokens: Arc<dyn SsoTokenStore>,
        tokens: Arc<dyn TokenGenerator>,
        ttl_secs: u64,
    ) -> Self {
        Self {
            domains,
            commenters,
            sso_tokens,
            tokens,
            ttl_secs,
        }
    }

    pub async fn handle(&self, cmd: StartSsoCommand) -> Result<StartSsoResult, AuthError> {
        let domain_name = DomainName::new(cmd.domain)?;
        let commenter_token =
            CommenterToken::new(cmd.commenter_token).map_err(|_| AuthError::missing("commenterToken"))?;

        let domain = self
            .domains
            .find(&domain_name)
            .await?
            .ok_or(AuthError::NoSuchDomain)?;
        let settings = domain.sso_settings().ok_or(AuthError::MissingConfig)?;

        if !self.commenters.find_session(&commenter_token).await?.exists() {
            return Err(AuthError::NoSuchToken);
        }

        let token = SsoToken::new(self.tokens.hex_token())?;
        let token_bytes = hex::decode(token.as_str()).map_err(|e| {
            error!(error = %e, "token generator produced non-hex output");
            AuthError::Internal
        })?;
        let signature = SsoSigner::from_secret(settings.secret)?.sign(&token_bytes)?;

        let grant = SsoGrant {
            domain: domain_name.clone(),
            commenter_token,
            expires_at: Timestamp::now().plus_secs(self.ttl_secs),
        };
        self.sso_tokens.issue(&token, &grant).await?;

        let separator = if settings.url.contains('?') { '&' } else { '?' };
        let redirect_url = format!(
            "{}{}token={}&hmac={}",
            settings.url,
            separator,
            token,
            hex::encode(signature)
        );

        info!(domain = %domain_name, "SSO handshake started");
        Ok(StartSsoResult {
            token,
            redirect_url,
        })
    }
}
