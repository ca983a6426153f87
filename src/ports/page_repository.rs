//! Page repository port.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, DomainName};
use crate::domain::site::Page;

#[async_trait]
pub trait PageRepository: Send + Sync {
    async fn find(&self, domain: &DomainName, path: &str) -> Result<Option<Page>, DomainError>;

    /// Creates the page if absent and returns the stored row. Idempotent.
    async fn upsert(&self, domain: &DomainName, path: &str) -> Result<Page, DomainError>;

    /// Locks or unlocks a page's thread. Returns false if the page is unknown.
    async fn set_locked(
        &self,
        domain: &DomainName,
        path: &str,
        locked: bool,
    ) -> Result<bool, DomainError>;

    /// Cached comment counts keyed by path. Unknown paths are omitted.
    async fn comment_counts(
        &self,
        domain: &DomainName,
        paths: &[String],
    ) -> Result<HashMap<String, u64>, DomainError>;
}
