//! Commenter session lookup result.

use super::Commenter;

/// What a commenter bearer token resolves to.
///
/// A pending session exists between the SSO mint leg and the callback;
/// it never stands for an identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionLookup {
    Unknown,
    Pending,
    Bound(Commenter),
}

impl SessionLookup {
    /// Returns the bound commenter, if any.
    pub fn into_commenter(self) -> Option<Commenter> {
        match self {
            SessionLookup::Bound(commenter) => Some(commenter),
            SessionLookup::Unknown | SessionLookup::Pending => None,
        }
    }

    /// Returns true if the token exists, pending or bound.
    pub fn exists(&self) -> bool {
        !matches!(self, SessionLookup::Unknown)
    }
}
