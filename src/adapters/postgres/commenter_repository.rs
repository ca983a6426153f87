//! PostgreSQL implementation of CommenterRepository.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;

use super::store::{column, db_error, timestamp, write_error};
use crate::domain::commenter::{
    Commenter, IdentityProvider, ProfileUpdate, SessionLookup, UNDEFINED,
};
use crate::domain::foundation::{CommenterId, CommenterToken, DomainError};
use crate::ports::CommenterRepository;

const COMMENTER_COLUMNS: &str =
    "c.commenter_id, c.email, c.name, c.link, c.photo, c.provider, c.password_hash, c.joined_at";

/// PostgreSQL implementation of CommenterRepository.
#[derive(Clone)]
pub struct PostgresCommenterRepository {
    pool: PgPool,
}

impl PostgresCommenterRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommenterRepository for PostgresCommenterRepository {
    async fn insert(&self, commenter: &Commenter) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO commenters (
                commenter_id, email, name, link, photo, provider, password_hash, joined_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(commenter.id().as_str())
        .bind(commenter.email())
        .bind(commenter.name())
        .bind(commenter.link())
        .bind(commenter.photo())
        .bind(commenter.provider().tag())
        .bind(commenter.password_hash())
        .bind(commenter.joined_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| write_error("Failed to insert commenter", e))?;

        Ok(())
    }

    async fn find_by_id(&self, id: &CommenterId) -> Result<Option<Commenter>, DomainError> {
        let sql = format!(
            "SELECT {} FROM commenters c WHERE c.commenter_id = $1",
            COMMENTER_COLUMNS
        );
        let row = sqlx::query(&sql)
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to fetch commenter", e))?;

        row.as_ref().map(row_to_commenter).transpose()
    }

    async fn find_by_email(
        &self,
        email: &str,
        provider: &IdentityProvider,
    ) -> Result<Option<Commenter>, DomainError> {
        let sql = format!(
            "SELECT {} FROM commenters c WHERE c.email = $1 AND c.provider = $2",
            COMMENTER_COLUMNS
        );
        let row = sqlx::query(&sql)
            .bind(email)
            .bind(provider.tag())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to fetch commenter by email", e))?;

        row.as_ref().map(row_to_commenter).transpose()
    }

    async fn find_many(&self, ids: &[CommenterId]) -> Result<Vec<Commenter>, DomainError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<String> = ids.iter().map(|id| id.as_str().to_string()).collect();
        let sql = format!(
            "SELECT {} FROM commenters c WHERE c.commenter_id = ANY($1)",
            COMMENTER_COLUMNS
        );
        let rows = sqlx::query(&sql)
            .bind(ids)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("Failed to fetch commenters", e))?;

        rows.iter().map(row_to_commenter).collect()
    }

    async fn update_profile(
        &self,
        id: &CommenterId,
        update: &ProfileUpdate,
    ) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE commenters SET email = $2, name = $3, link = $4, photo = $5
            WHERE commenter_id = $1
            "#,
        )
        .bind(id.as_str())
        .bind(&update.email)
        .bind(&update.name)
        .bind(or_undefined(&update.link))
        .bind(or_undefined(&update.photo))
        .execute(&self.pool)
        .await
        .map_err(|e| write_error("Failed to update commenter profile", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn create_session(
        &self,
        token: &CommenterToken,
        commenter_id: Option<&CommenterId>,
    ) -> Result<(), DomainError> {
        sqlx::query("INSERT INTO commenter_sessions (commenter_token, commenter_id) VALUES ($1, $2)")
            .bind(token.as_str())
            .bind(commenter_id.map(CommenterId::as_str))
            .execute(&self.pool)
            .await
            .map_err(|e| write_error("Failed to create commenter session", e))?;

        Ok(())
    }

    async fn find_session(&self, token: &CommenterToken) -> Result<SessionLookup, DomainError> {
        let sql = format!(
            r#"
            SELECT s.commenter_id AS session_commenter_id, {}
            FROM commenter_sessions s
            LEFT JOIN commenters c ON c.commenter_id = s.commenter_id
            WHERE s.commenter_token = $1
            "#,
            COMMENTER_COLUMNS
        );
        let row = sqlx::query(&sql)
            .bind(token.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to fetch commenter session", e))?;

        let Some(row) = row else {
            return Ok(SessionLookup::Unknown);
        };
        let bound: Option<String> = column(&row, "session_commenter_id")?;
        if bound.is_none() {
            return Ok(SessionLookup::Pending);
        }
        let joined: Option<String> = column(&row, "commenter_id")?;
        match joined {
            Some(_) => Ok(SessionLookup::Bound(row_to_commenter(&row)?)),
            None => Ok(SessionLookup::Unknown),
        }
    }

    async fn bind_session(
        &self,
        token: &CommenterToken,
        commenter_id: &CommenterId,
    ) -> Result<bool, DomainError> {
        let result = sqlx::query(
            "UPDATE commenter_sessions SET commenter_id = $2 WHERE commenter_token = $1",
        )
        .bind(token.as_str())
        .bind(commenter_id.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to bind commenter session", e))?;

        Ok(result.rows_affected() > 0)
    }
}

fn or_undefined(value: &str) -> &str {
    if value.trim().is_empty() {
        UNDEFINED
    } else {
        value
    }
}

fn row_to_commenter(row: &PgRow) -> Result<Commenter, DomainError> {
    let id: String = column(row, "commenter_id")?;
    let provider: String = column(row, "provider")?;
    Ok(Commenter::reconstitute(
        CommenterId::new(id)?,
        column(row, "email")?,
        column(row, "name")?,
        column(row, "link")?,
        column(row, "photo")?,
        IdentityProvider::from_tag(&provider)?,
        column(row, "password_hash")?,
        timestamp(row, "joined_at")?,
    ))
}
