//! Page entity.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainName, Timestamp};

/// A `(domain, path)` addressable unit comments attach to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    domain: DomainName,
    path: String,
    is_locked: bool,
    comment_count: u64,
    created_at: Timestamp,
}

impl Page {
    /// Creates an unlocked page with no comments.
    pub fn new(domain: DomainName, path: impl Into<String>) -> Self {
        Self {
            domain,
            path: path.into(),
            is_locked: false,
            comment_count: 0,
            created_at: Timestamp::now(),
        }
    }

    /// Reconstitute a page from persistence.
    pub fn reconstitute(
        domain: DomainName,
        path: String,
        is_locked: bool,
        comment_count: u64,
        created_at: Timestamp,
    ) -> Self {
        Self {
            domain,
            path,
            is_locked,
            comment_count,
            created_at,
        }
    }

    pub fn domain(&self) -> &DomainName {
        &self.domain
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Locked pages accept no new comments.
    pub fn is_locked(&self) -> bool {
        self.is_locked
    }

    pub fn comment_count(&self) -> u64 {
        self.comment_count
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn set_locked(&mut self, locked: bool) {
        self.is_locked = locked;
    }

    pub fn record_comment(&mut self) {
        self.comment_count += 1;
    }
}
