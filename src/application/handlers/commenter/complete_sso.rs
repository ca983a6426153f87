//! CompleteSsoHandler - Callback leg of the SSO handshake.
//!
//! Every step is a hard gate, in order:
//!
//! 1. Hex-decode payload and signature
//! 2. Parse the payload and require token, email and name
//! 3. Resolve the SSO token to its domain and pending commenter token
//! 4. Load the domain and its SSO settings
//! 5. Verify the HMAC in constant time
//! 6. Resolve or create the `sso:<domain>` commenter
//! 7. Bind the commenter to the pending session
//!
//! The SSO token is consumed right before step 7, so a callback that fails
//! anywhere earlier leaves the handshake retryable. Nothing is bound before
//! step 7.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::auth::{decode_hex, AuthError, SsoPayload, SsoSigner};
use crate::domain::commenter::{Commenter, IdentityProvider};
use crate::domain::foundation::{CommenterId, Timestamp};
use crate::ports::{CommenterRepository, DomainRepository, SsoTokenStore, TokenGenerator};

#[derive(Debug, Clone)]
pub struct CompleteSsoCommand {
    /// Hex-encoded JSON payload.
    pub payload: String,
    /// Hex-encoded HMAC-SHA256 of the decoded payload.
    pub hmac: String,
}

#[derive(Debug, Clone)]
pub struct CompleteSsoResult {
    pub commenter_id: CommenterId,
    /// True when this handshake created the commenter.
    pub created: bool,
}

pub struct CompleteSsoHandler {
    domains: Arc<dyn DomainRepository>,
    commenters: Arc<dyn CommenterRepository>,
    sso_tokens: Arc<dyn SsoTokenStore>,
    tokens: Arc<dyn TokenGenerator>,
}

impl CompleteSsoHandler {
    pub fn new(
        domains: Arc<dyn DomainRepository>,
        commenters: Arc<dyn CommenterRepository>,
        sso_tokens: Arc<dyn SsoTokenStore>,
        tokens: Arc<dyn TokenGenerator>,
    ) -> Self {
        Self {
            domains,
            commenters,
            sso_tokens,
            tokens,
        }
    }

    pub async fn handle(&self, cmd: CompleteSsoCommand) -> Result<CompleteSsoResult, AuthError> {
        let payload_bytes = decode_hex("payload", &cmd.payload)?;
        let signature = decode_hex("hmac", &cmd.hmac)?;

        let payload = SsoPayload::parse(&payload_bytes)?;
        let sso_token = payload.token()?;

        let grant = self
            .sso_tokens
            .peek(&sso_token)
            .await?
            .filter(|grant| !grant.is_expired(&Timestamp::now()))
            .ok_or(AuthError::NoSuchToken)?;

        let domain = self
            .domains
            .find(&grant.domain)
            .await?
            .ok_or(AuthError::NoSuchDomain)?;
        let settings = domain.sso_settings().ok_or(AuthError::MissingConfig)?;

        SsoSigner::from_secret(settings.secret)?.verify(&payload_bytes, &signature)?;

        let provider = IdentityProvider::Sso(grant.domain.clone());
        let (commenter_id, created) = self.resolve_commenter(&payload, provider).await?;

        if !self.sso_tokens.consume(&sso_token).await? {
            // Lost a race against a concurrent callback for the same token.
            return Err(AuthError::NoSuchToken);
        }

        if !self
            .commenters
            .bind_session(&grant.commenter_token, &commenter_id)
            .await?
        {
            return Err(AuthError::NoSuchToken);
        }

        info!(
            domain = %grant.domain,
            commenter_id = %commenter_id,
            created,
            "SSO handshake completed"
        );
        Ok(CompleteSsoResult {
            commenter_id,
            created,
        })
    }

    /// Finds the commenter for this identity, refreshing its profile, or
    /// creates it. A concurrent first login for the same identity surfaces
    /// as a conflict on insert and resolves to the winner's row.
    async fn resolve_commenter(
        &self,
        payload: &SsoPayload,
        provider: IdentityProvider,
    ) -> Result<(CommenterId, bool), AuthError> {
        if let Some(existing) = self
            .commenters
            .find_by_email(&payload.email, &provider)
            .await?
        {
            if let Err(err) = self
                .commenters
                .update_profile(existing.id(), &payload.profile())
                .await
            {
                warn!(
                    commenter_id = %existing.id(),
                    error = %err,
                    "Failed to refresh SSO commenter profile"
                );
            }
            return Ok((existing.id().clone(), false));
        }

        let commenter = Commenter::new(
            CommenterId::new(self.tokens.hex_token())?,
            payload.email.clone(),
            payload.name.clone(),
            payload.link.clone(),
            payload.photo.clone(),
            provider.clone(),
            None,
        );
        match self.commenters.insert(&commenter).await {
            Ok(()) => Ok((commenter.id().clone(), true)),
            Err(err) if err.is_conflict() => {
                let winner = self
                    .commenters
                    .find_by_email(&payload.email, &provider)
                    .await?
                    .ok_or(AuthError::Internal)?;
                Ok((winner.id().clone(), false))
            }
            Err(err) => Err(err.into()),
        }
    }
}
