//! PostgreSQL implementation of OwnerRepository.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;

use super::store::{column, db_error, timestamp, write_error};
use crate::domain::foundation::{
    CommenterId, ConfirmationToken, DomainError, OwnerId, OwnerToken, ResetToken,
};
use crate::domain::owner::Owner;
use crate::ports::OwnerRepository;

const OWNER_COLUMNS: &str =
    "o.owner_id, o.email, o.name, o.password_hash, o.confirmed, o.joined_at, o.companion_id";

/// PostgreSQL implementation of OwnerRepository.
#[derive(Clone)]
pub struct PostgresOwnerRepository {
    pool: PgPool,
}

impl PostgresOwnerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_one_where(
        &self,
        clause: &str,
        value: &str,
    ) -> Result<Option<Owner>, DomainError> {
        let sql = format!("SELECT {} FROM owners o {}", OWNER_COLUMNS, clause);
        let row = sqlx::query(&sql)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to fetch owner", e))?;

        row.as_ref().map(row_to_owner).transpose()
    }
}

#[async_trait]
impl OwnerRepository for PostgresOwnerRepository {
    async fn insert(&self, owner: &Owner) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO owners
                (owner_id, email, name, password_hash, confirmed, joined_at, companion_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(owner.id().as_str())
        .bind(owner.email())
        .bind(owner.name())
        .bind(owner.password_hash())
        .bind(owner.is_confirmed())
        .bind(owner.joined_at().as_datetime())
        .bind(owner.companion_id().map(|id| id.as_str()))
        .execute(&self.pool)
        .await
        .map_err(|e| write_error("Failed to insert owner", e))?;

        Ok(())
    }

    async fn find_by_id(&self, id: &OwnerId) -> Result<Option<Owner>, DomainError> {
        self.fetch_one_where("WHERE o.owner_id = $1", id.as_str())
            .await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Owner>, DomainError> {
        self.fetch_one_where("WHERE o.email = $1", email).await
    }

    async fn insert_confirmation_token(
        &self,
        token: &ConfirmationToken,
        owner_id: &OwnerId,
    ) -> Result<(), DomainError> {
        sqlx::query(
            "INSERT INTO owner_confirmation_tokens (confirmation_token, owner_id) VALUES ($1, $2)",
        )
        .bind(token.as_str())
        .bind(owner_id.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| write_error("Failed to insert confirmation token", e))?;

        Ok(())
    }

    async fn confirm_by_token(&self, token: &ConfirmationToken) -> Result<u64, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE owners SET confirmed = TRUE
            WHERE owner_id = (
                SELECT owner_id FROM owner_confirmation_tokens WHERE confirmation_token = $1
            )
            "#,
        )
        .bind(token.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to confirm owner", e))?;

        Ok(result.rows_affected())
    }

    async fn delete_confirmation_token(
        &self,
        token: &ConfirmationToken,
    ) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM owner_confirmation_tokens WHERE confirmation_token = $1")
            .bind(token.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to delete confirmation token", e))?;

        Ok(())
    }

    async fn insert_session(
        &self,
        token: &OwnerToken,
        owner_id: &OwnerId,
    ) -> Result<(), DomainError> {
        sqlx::query("INSERT INTO owner_sessions (owner_token, owner_id) VALUES ($1, $2)")
            .bind(token.as_str())
            .bind(owner_id.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| write_error("Failed to insert owner session", e))?;

        Ok(())
    }

    async fn find_by_session(&self, token: &OwnerToken) -> Result<Option<Owner>, DomainError> {
        self.fetch_one_where(
            "JOIN owner_sessions s ON s.owner_id = o.owner_id WHERE s.owner_token = $1",
            token.as_str(),
        )
        .await
    }

    async fn insert_reset_token(
        &self,
        token: &ResetToken,
        owner_id: &OwnerId,
    ) -> Result<(), DomainError> {
        sqlx::query("INSERT INTO owner_reset_tokens (reset_token, owner_id) VALUES ($1, $2)")
            .bind(token.as_str())
            .bind(owner_id.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| write_error("Failed to insert reset token", e))?;

        Ok(())
    }

    async fn consume_reset_token(
        &self,
        token: &ResetToken,
    ) -> Result<Option<OwnerId>, DomainError> {
        let owner_id: Option<String> = sqlx::query_scalar(
            "DELETE FROM owner_reset_tokens WHERE reset_token = $1 RETURNING owner_id",
        )
        .bind(token.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to consume reset token", e))?;

        Ok(owner_id.map(OwnerId::new).transpose()?)
    }

    async fn update_password_hash(
        &self,
        owner_id: &OwnerId,
        password_hash: &str,
    ) -> Result<bool, DomainError> {
        let result = sqlx::query("UPDATE owners SET password_hash = $2 WHERE owner_id = $1")
            .bind(owner_id.as_str())
            .bind(password_hash)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to update password", e))?;

        Ok(result.rows_affected() > 0)
    }

    /// Sessions and outstanding tokens go with the owner.
    async fn delete(&self, owner_id: &OwnerId) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM owners WHERE owner_id = $1")
            .bind(owner_id.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to delete owner", e))?;

        Ok(result.rows_affected() > 0)
    }
}

fn row_to_owner(row: &PgRow) -> Result<Owner, DomainError> {
    let id: String = column(row, "owner_id")?;
    let companion_id = column::<Option<String>>(row, "companion_id")?
        .map(CommenterId::new)
        .transpose()?;
    Ok(Owner::reconstitute(
        OwnerId::new(id)?,
        column(row, "email")?,
        column(row, "name")?,
        column(row, "password_hash")?,
        column(row, "confirmed")?,
        timestamp(row, "joined_at")?,
        companion_id,
    ))
}
