//! PostgreSQL implementation of SsoTokenStore.

use async_trait::async_trait;
use sqlx::PgPool;

use super::store::{column, db_error, timestamp, write_error};
use crate::domain::foundation::{CommenterToken, DomainError, DomainName, SsoToken};
use crate::ports::{SsoGrant, SsoTokenStore};

#[derive(Clone)]
pub struct PostgresSsoTokenStore {
    pool: PgPool,
}

impl PostgresSsoTokenStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SsoTokenStore for PostgresSsoTokenStore {
    async fn issue(&self, token: &SsoToken, grant: &SsoGrant) -> Result<(), DomainError> {
        sqlx::query(
            "INSERT INTO sso_tokens (token, domain, commenter_token, expires_at) VALUES ($1, $2, $3, $4)",
        )
        .bind(token.as_str())
        .bind(grant.domain.as_str())
        .bind(grant.commenter_token.as_str())
        .bind(grant.expires_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| write_error("Failed to issue SSO token", e))?;

        Ok(())
    }

    async fn peek(&self, token: &SsoToken) -> Result<Option<SsoGrant>, DomainError> {
        let row = sqlx::query(
            "SELECT domain, commenter_token, expires_at FROM sso_tokens WHERE token = $1",
        )
        .bind(token.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to fetch SSO token", e))?;

        let Some(row) = row else {
            return Ok(None);
        };
        let domain: String = column(&row, "domain")?;
        let commenter_token: String = column(&row, "commenter_token")?;
        Ok(Some(SsoGrant {
            domain: DomainName::new(domain)?,
            commenter_token: CommenterToken::new(commenter_token)?,
            expires_at: timestamp(&row, "expires_at")?,
        }))
    }

    /// Exactly one concurrent caller observes `true`.
    async fn consume(&self, token: &SsoToken) -> Result<bool, DomainError> {
        let consumed: Option<String> =
            sqlx::query_scalar("DELETE FROM sso_tokens WHERE token = $1 RETURNING token")
                .bind(token.as_str())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| db_error("Failed to consume SSO token", e))?;

        Ok(consumed.is_some())
    }
}
