//! PostgreSQL implementation of DomainRepository and PageRepository.
//!
//! Moderators live in their own table, ordered by `position`, and are
//! rewritten wholesale on every save.

use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;

use super::store::{column, count, db_error, timestamp, write_error};
use crate::domain::foundation::{DomainError, DomainName, ErrorCode, OwnerId};
use crate::domain::site::{
    Domain, DomainState, IdentityProviders, ModerationPolicy, Page, SortPolicy, SsoSecret,
};
use crate::ports::{DomainRepository, PageRepository};

const DOMAIN_COLUMNS: &str = r#"
    domain, owner_id, state, require_identification, require_moderation,
    moderate_all_anonymous, auto_spam_filter, default_sort_policy, sso_secret,
    sso_url, local_auth, sso_auth, federated_providers, created_at
"#;

/// PostgreSQL store for domains and their pages.
#[derive(Clone)]
pub struct PostgresSiteRepository {
    pool: PgPool,
}

impl PostgresSiteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn moderators_of(
        &self,
        domains: &[String],
    ) -> Result<HashMap<String, Vec<String>>, DomainError> {
        let rows = sqlx::query(
            "SELECT domain, email FROM moderators WHERE domain = ANY($1) ORDER BY domain, position",
        )
        .bind(domains.to_vec())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to fetch moderators", e))?;

        let mut by_domain: HashMap<String, Vec<String>> = HashMap::new();
        for row in &rows {
            let domain: String = column(row, "domain")?;
            by_domain.entry(domain).or_default().push(column(row, "email")?);
        }
        Ok(by_domain)
    }
}

#[async_trait]
impl DomainRepository for PostgresSiteRepository {
    async fn find(&self, name: &DomainName) -> Result<Option<Domain>, DomainError> {
        let sql = format!("SELECT {} FROM domains WHERE domain = $1", DOMAIN_COLUMNS);
        let row = sqlx::query(&sql)
            .bind(name.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to fetch domain", e))?;

        let Some(row) = row else {
            return Ok(None);
        };
        let mut moderators = self.moderators_of(&[name.as_str().to_string()]).await?;
        let emails = moderators.remove(name.as_str()).unwrap_or_default();
        Ok(Some(row_to_domain(&row, emails)?))
    }

    async fn list_by_owner(&self, owner_id: &OwnerId) -> Result<Vec<Domain>, DomainError> {
        let sql = format!(
            "SELECT {} FROM domains WHERE owner_id = $1 ORDER BY domain",
            DOMAIN_COLUMNS
        );
        let rows = sqlx::query(&sql)
            .bind(owner_id.as_str())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("Failed to list domains", e))?;

        let names = rows
            .iter()
            .map(|row| column::<String>(row, "domain"))
            .collect::<Result<Vec<_>, _>>()?;
        let mut moderators = self.moderators_of(&names).await?;

        rows.iter()
            .zip(&names)
            .map(|(row, name)| row_to_domain(row, moderators.remove(name).unwrap_or_default()))
            .collect()
    }

    async fn save(&self, domain: &Domain) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("Failed to start transaction", e))?;

        let policy = domain.policy();
        let providers = domain.identity_providers();
        sqlx::query(
            r#"
            INSERT INTO domains (
                domain, owner_id, state, require_identification, require_moderation,
                moderate_all_anonymous, auto_spam_filter, default_sort_policy, sso_secret,
                sso_url, local_auth, sso_auth, federated_providers, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            ON CONFLICT (domain) DO UPDATE SET
                state = EXCLUDED.state,
                require_identification = EXCLUDED.require_identification,
                require_moderation = EXCLUDED.require_moderation,
                moderate_all_anonymous = EXCLUDED.moderate_all_anonymous,
                auto_spam_filter = EXCLUDED.auto_spam_filter,
                default_sort_policy = EXCLUDED.default_sort_policy,
                sso_secret = EXCLUDED.sso_secret,
                sso_url = EXCLUDED.sso_url,
                local_auth = EXCLUDED.local_auth,
                sso_auth = EXCLUDED.sso_auth,
                federated_providers = EXCLUDED.federated_providers
            "#,
        )
        .bind(domain.name().as_str())
        .bind(domain.owner_id().as_str())
        .bind(domain.state().as_str())
        .bind(policy.require_identification)
        .bind(policy.require_moderation)
        .bind(policy.moderate_all_anonymous)
        .bind(policy.auto_spam_filter)
        .bind(domain.default_sort().as_str())
        .bind(domain.sso_secret().map(|s| s.expose().to_string()))
        .bind(domain.sso_url().map(str::to_string))
        .bind(providers.local)
        .bind(providers.sso)
        .bind(providers.federated.iter().cloned().collect::<Vec<String>>())
        .bind(domain.created_at().as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| write_error("Failed to save domain", e))?;

        sqlx::query("DELETE FROM moderators WHERE domain = $1")
            .bind(domain.name().as_str())
            .execute(&mut *tx)
            .await
            .map_err(|e| db_error("Failed to clear moderators", e))?;

        for (position, email) in domain.moderators().iter().enumerate() {
            sqlx::query("INSERT INTO moderators (domain, email, position) VALUES ($1, $2, $3)")
                .bind(domain.name().as_str())
                .bind(email)
                .bind(i32::try_from(position).unwrap_or(i32::MAX))
                .execute(&mut *tx)
                .await
                .map_err(|e| write_error("Failed to insert moderator", e))?;
        }

        tx.commit()
            .await
            .map_err(|e| db_error("Failed to commit transaction", e))?;

        Ok(())
    }

    /// Pages, comments, votes, moderators and SSO tokens cascade.
    async fn delete(&self, name: &DomainName) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM domains WHERE domain = $1")
            .bind(name.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to delete domain", e))?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl PageRepository for PostgresSiteRepository {
    async fn find(&self, domain: &DomainName, path: &str) -> Result<Option<Page>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT domain, path, is_locked, comment_count, created_at
            FROM pages WHERE domain = $1 AND path = $2
            "#,
        )
        .bind(domain.as_str())
        .bind(path)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to fetch page", e))?;

        row.as_ref().map(row_to_page).transpose()
    }

    async fn upsert(&self, domain: &DomainName, path: &str) -> Result<Page, DomainError> {
        let row = sqlx::query(
            r#"
            INSERT INTO pages (domain, path) VALUES ($1, $2)
            ON CONFLICT (domain, path) DO UPDATE SET path = EXCLUDED.path
            RETURNING domain, path, is_locked, comment_count, created_at
            "#,
        )
        .bind(domain.as_str())
        .bind(path)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("Failed to upsert page", e))?;

        row_to_page(&row)
    }

    async fn set_locked(
        &self,
        domain: &DomainName,
        path: &str,
        locked: bool,
    ) -> Result<bool, DomainError> {
        let result = sqlx::query("UPDATE pages SET is_locked = $3 WHERE domain = $1 AND path = $2")
            .bind(domain.as_str())
            .bind(path)
            .bind(locked)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to lock page", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn comment_counts(
        &self,
        domain: &DomainName,
        paths: &[String],
    ) -> Result<HashMap<String, u64>, DomainError> {
        let rows: Vec<(String, i64)> = sqlx::query_as(
            "SELECT path, comment_count FROM pages WHERE domain = $1 AND path = ANY($2)",
        )
        .bind(domain.as_str())
        .bind(paths.to_vec())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to count comments", e))?;

        Ok(rows.into_iter().map(|(path, n)| (path, count(n))).collect())
    }
}

fn row_to_domain(row: &PgRow, moderators: Vec<String>) -> Result<Domain, DomainError> {
    let name: String = column(row, "domain")?;
    let owner_id: String = column(row, "owner_id")?;

    let state_str: String = column(row, "state")?;
    let state = DomainState::parse(&state_str).ok_or_else(|| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid domain state: {}", state_str),
        )
    })?;
    let sort_str: String = column(row, "default_sort_policy")?;
    let default_sort = SortPolicy::parse(&sort_str).ok_or_else(|| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid sort policy: {}", sort_str),
        )
    })?;

    let policy = ModerationPolicy {
        require_identification: column(row, "require_identification")?,
        require_moderation: column(row, "require_moderation")?,
        moderate_all_anonymous: column(row, "moderate_all_anonymous")?,
        auto_spam_filter: column(row, "auto_spam_filter")?,
    };
    let federated: Vec<String> = column(row, "federated_providers")?;
    let providers = IdentityProviders {
        local: column(row, "local_auth")?,
        sso: column(row, "sso_auth")?,
        federated: federated.into_iter().collect::<BTreeSet<_>>(),
    };
    let sso_secret: Option<String> = column(row, "sso_secret")?;

    Ok(Domain::reconstitute(
        DomainName::new(name)?,
        OwnerId::new(owner_id)?,
        moderators,
        state,
        policy,
        default_sort,
        sso_secret.map(SsoSecret::new),
        column(row, "sso_url")?,
        providers,
        timestamp(row, "created_at")?,
    ))
}

fn row_to_page(row: &PgRow) -> Result<Page, DomainError> {
    let domain: String = column(row, "domain")?;
    let comment_count: i64 = column(row, "comment_count")?;
    Ok(Page::reconstitute(
        DomainName::new(domain)?,
        column(row, "path")?,
        column(row, "is_locked")?,
        count(comment_count),
        timestamp(row, "created_at")?,
    ))
}
