//! Shared state of the in-memory store.

use std::collections::HashMap;

use tokio::sync::RwLock;

use crate::domain::comment::Comment;
use crate::domain::commenter::Commenter;
use crate::domain::foundation::{
    CommentId, CommenterId, CommenterToken, ConfirmationToken, DomainName, OwnerId, OwnerToken,
    ResetToken, SsoToken,
};
use crate::domain::owner::Owner;
use crate::domain::site::{Domain, Page};
use crate::domain::vote::Vote;
use crate::ports::SsoGrant;

#[derive(Default)]
pub(super) struct State {
    pub owners: HashMap<OwnerId, Owner>,
    pub owner_sessions: HashMap<OwnerToken, OwnerId>,
    pub confirmation_tokens: HashMap<ConfirmationToken, OwnerId>,
    pub reset_tokens: HashMap<ResetToken, OwnerId>,
    pub commenters: HashMap<CommenterId, Commenter>,
    pub commenter_sessions: HashMap<CommenterToken, Option<CommenterId>>,
    pub domains: HashMap<DomainName, Domain>,
    pub pages: HashMap<(DomainName, String), Page>,
    /// Insertion order doubles as creation order.
    pub comments: Vec<Comment>,
    pub votes: HashMap<(CommentId, CommenterId), Vote>,
    pub sso_tokens: HashMap<SsoToken, SsoGrant>,
}

impl State {
    pub fn comment_mut(&mut self, id: &CommentId) -> Option<&mut Comment> {
        self.comments.iter_mut().find(|c| c.id() == id)
    }

    pub fn page_mut(&mut self, domain: &DomainName, path: &str) -> &mut Page {
        self.pages
            .entry((domain.clone(), path.to_string()))
            .or_insert_with(|| Page::new(domain.clone(), path))
    }
}

/// In-memory implementation of all repository ports.
///
/// Thread-safe via an internal `tokio::sync::RwLock`. Does not persist data
/// across restarts.
#[derive(Default)]
pub struct InMemoryStore {
    pub(super) state: RwLock<State>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live sessions of an owner.
    pub async fn owner_session_count(&self, owner_id: &OwnerId) -> usize {
        let state = self.state.read().await;
        state.owner_sessions.values().filter(|o| *o == owner_id).count()
    }

    /// Number of outstanding reset tokens of an owner.
    pub async fn reset_token_count(&self, owner_id: &OwnerId) -> usize {
        let state = self.state.read().await;
        state.reset_tokens.values().filter(|o| *o == owner_id).count()
    }

    /// Latest reset token issued to an owner, if any.
    pub async fn reset_token_for(&self, owner_id: &OwnerId) -> Option<ResetToken> {
        let state = self.state.read().await;
        state
            .reset_tokens
            .iter()
            .find(|(_, o)| *o == owner_id)
            .map(|(t, _)| t.clone())
    }

    /// Confirmation token issued to an owner, if any.
    pub async fn confirmation_token_for(&self, owner_id: &OwnerId) -> Option<ConfirmationToken> {
        let state = self.state.read().await;
        state
            .confirmation_tokens
            .iter()
            .find(|(_, o)| *o == owner_id)
            .map(|(t, _)| t.clone())
    }

    /// Stored vote of a (comment, voter) pair.
    pub async fn vote(&self, comment_id: &CommentId, voter_id: &CommenterId) -> Option<Vote> {
        let state = self.state.read().await;
        state
            .votes
            .get(&(comment_id.clone(), voter_id.clone()))
            .cloned()
    }

    /// Number of commenters stored under any provider.
    pub async fn commenter_count(&self) -> usize {
        self.state.read().await.commenters.len()
    }
}
