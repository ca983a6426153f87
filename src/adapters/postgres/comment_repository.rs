//! PostgreSQL implementation of CommentRepository and VoteRepository.
//!
//! Comment inserts bump the page counter and vote upserts recompute the
//! comment score inside the same transaction.

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;

use super::store::{column, db_error, timestamp, write_error};
use crate::domain::comment::{Comment, CommentState, Deletion, ParentRef, TOMBSTONE};
use crate::domain::foundation::{CommentId, CommenterId, DomainError, DomainName, Timestamp};
use crate::domain::vote::{Vote, VoteDirection};
use crate::ports::{CommentFilter, CommentRepository, VoteRepository};

const LOCK_COMMENT: &str = "SELECT 1 FROM comments WHERE comment_id = $1 FOR UPDATE";

const UPSERT_VOTE: &str = r#"
    INSERT INTO votes (comment_id, commenter_id, direction, voted_at)
    VALUES ($1, $2, $3, $4)
    ON CONFLICT (comment_id, commenter_id) DO UPDATE SET
        direction = EXCLUDED.direction,
        voted_at = EXCLUDED.voted_at
"#;

const RECOUNT_SCORE: &str = r#"
    UPDATE comments SET score = (
        SELECT COALESCE(SUM(direction), 0) FROM votes WHERE comment_id = $1
    )
    WHERE comment_id = $1
"#;

const COMMENT_COLUMNS: &str = r#"
    comment_id, domain, path, commenter_id, parent_id, markdown, html, state,
    score, created_at, deleted, deleter_id, deleted_at
"#;

/// PostgreSQL store for comments and the vote ledger.
#[derive(Clone)]
pub struct PostgresCommentRepository {
    pool: PgPool,
}

impl PostgresCommentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn insert(&self, comment: &Comment) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("Failed to start transaction", e))?;

        sqlx::query(
            r#"
            INSERT INTO comments (
                comment_id, domain, path, commenter_id, parent_id, markdown, html,
                state, score, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(comment.id().as_str())
        .bind(comment.domain().as_str())
        .bind(comment.path())
        .bind(comment.author_id().as_str())
        .bind(comment.parent().as_str())
        .bind(comment.markdown())
        .bind(comment.html())
        .bind(comment.state().as_str())
        .bind(comment.score())
        .bind(comment.created_at().as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| write_error("Failed to insert comment", e))?;

        sqlx::query(
            r#"
            INSERT INTO pages (domain, path, comment_count) VALUES ($1, $2, 1)
            ON CONFLICT (domain, path) DO UPDATE SET comment_count = pages.comment_count + 1
            "#,
        )
        .bind(comment.domain().as_str())
        .bind(comment.path())
        .execute(&mut *tx)
        .await
        .map_err(|e| db_error("Failed to increment comment count", e))?;

        tx.commit()
            .await
            .map_err(|e| db_error("Failed to commit transaction", e))?;

        Ok(())
    }

    async fn find(&self, id: &CommentId) -> Result<Option<Comment>, DomainError> {
        let sql = format!("SELECT {} FROM comments WHERE comment_id = $1", COMMENT_COLUMNS);
        let row = sqlx::query(&sql)
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to fetch comment", e))?;

        row.as_ref().map(row_to_comment).transpose()
    }

    async fn update_content(
        &self,
        id: &CommentId,
        markdown: &str,
        html: &str,
    ) -> Result<bool, DomainError> {
        let result = sqlx::query(
            "UPDATE comments SET markdown = $2, html = $3 WHERE comment_id = $1 AND NOT deleted",
        )
        .bind(id.as_str())
        .bind(markdown)
        .bind(html)
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to update comment", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn set_state(&self, id: &CommentId, state: CommentState) -> Result<bool, DomainError> {
        let result =
            sqlx::query("UPDATE comments SET state = $2 WHERE comment_id = $1 AND NOT deleted")
                .bind(id.as_str())
                .bind(state.as_str())
                .execute(&self.pool)
                .await
                .map_err(|e| db_error("Failed to update comment state", e))?;

        Ok(result.rows_affected() > 0)
    }

    /// A repeated deletion keeps the first deleter and date.
    async fn mark_deleted(
        &self,
        id: &CommentId,
        deleter_id: &CommenterId,
        deleted_at: Timestamp,
    ) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE comments SET
                deleted = TRUE,
                markdown = $4,
                html = $4,
                commenter_id = $5,
                deleter_id = COALESCE(deleter_id, $2),
                deleted_at = COALESCE(deleted_at, $3)
            WHERE comment_id = $1
            "#,
        )
        .bind(id.as_str())
        .bind(deleter_id.as_str())
        .bind(deleted_at.as_datetime())
        .bind(TOMBSTONE)
        .bind(CommenterId::anonymous().as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to delete comment", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_for_page(
        &self,
        domain: &DomainName,
        path: &str,
        filter: &CommentFilter,
    ) -> Result<Vec<Comment>, DomainError> {
        let (everything, author) = match filter {
            CommentFilter::All => (true, None),
            CommentFilter::ApprovedOrAuthoredBy(author) => {
                (false, author.as_ref().map(|a| a.as_str().to_string()))
            }
        };
        let sql = format!(
            r#"
            SELECT {} FROM comments
            WHERE domain = $1 AND path = $2 AND NOT deleted
              AND ($3 OR state = 'approved' OR commenter_id = $4)
            ORDER BY created_at, comment_id
            "#,
            COMMENT_COLUMNS
        );
        let rows = sqlx::query(&sql)
            .bind(domain.as_str())
            .bind(path)
            .bind(everything)
            .bind(author)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("Failed to list comments", e))?;

        rows.iter().map(row_to_comment).collect()
    }
}

#[async_trait]
impl VoteRepository for PostgresCommentRepository {
    async fn upsert(&self, vote: &Vote) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("Failed to start transaction", e))?;

        // Serializes voters on this comment, so the recount below starts
        // after every earlier vote has committed.
        sqlx::query(LOCK_COMMENT)
            .bind(vote.comment_id.as_str())
            .execute(&mut *tx)
            .await
            .map_err(|e| db_error("Failed to lock comment for voting", e))?;

        sqlx::query(UPSERT_VOTE)
            .bind(vote.comment_id.as_str())
            .bind(vote.voter_id.as_str())
            .bind(i16::from(vote.direction.value()))
            .bind(vote.voted_at.as_datetime())
            .execute(&mut *tx)
            .await
            .map_err(|e| db_error("Failed to upsert vote", e))?;

        sqlx::query(RECOUNT_SCORE)
            .bind(vote.comment_id.as_str())
            .execute(&mut *tx)
            .await
            .map_err(|e| db_error("Failed to update comment score", e))?;

        tx.commit()
            .await
            .map_err(|e| db_error("Failed to commit transaction", e))?;

        Ok(())
    }

    async fn directions(
        &self,
        voter_id: &CommenterId,
        comment_ids: &[CommentId],
    ) -> Result<HashMap<CommentId, VoteDirection>, DomainError> {
        if comment_ids.is_empty() {
            return Ok(HashMap::new());
        }
        let ids: Vec<String> = comment_ids.iter().map(|id| id.as_str().to_string()).collect();
        let rows: Vec<(String, i16)> = sqlx::query_as(
            "SELECT comment_id, direction FROM votes WHERE commenter_id = $1 AND comment_id = ANY($2)",
        )
        .bind(voter_id.as_str())
        .bind(ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to fetch votes", e))?;

        rows.into_iter()
            .map(|(id, direction)| {
                Ok((CommentId::new(id)?, VoteDirection::from(i64::from(direction))))
            })
            .collect()
    }
}

fn row_to_comment(row: &PgRow) -> Result<Comment, DomainError> {
    let id: String = column(row, "comment_id")?;
    let domain: String = column(row, "domain")?;
    let author: String = column(row, "commenter_id")?;
    let parent: String = column(row, "parent_id")?;
    let state: String = column(row, "state")?;

    let deleted: bool = column(row, "deleted")?;
    let deletion = if deleted {
        let deleter: Option<String> = column(row, "deleter_id")?;
        let deleted_at: Option<chrono::DateTime<chrono::Utc>> = column(row, "deleted_at")?;
        Some(Deletion {
            deleter_id: match deleter {
                Some(d) => CommenterId::new(d)?,
                None => CommenterId::anonymous(),
            },
            deleted_at: deleted_at.map(Timestamp::from_datetime).unwrap_or_default(),
        })
    } else {
        None
    };

    Ok(Comment::reconstitute(
        CommentId::new(id)?,
        DomainName::new(domain)?,
        column(row, "path")?,
        CommenterId::new(author)?,
        ParentRef::parse(&parent)?,
        column(row, "markdown")?,
        column(row, "html")?,
        CommentState::parse(&state)?,
        column(row, "score")?,
        timestamp(row, "created_at")?,
        deletion,
    ))
}
