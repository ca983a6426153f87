//! ListCommentsHandler - Page listing with per-requester redaction.
//!
//! The requester's standing is resolved once, then every comment is
//! projected through the role it yields for that comment.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;

use crate::application::authorization::Authorizer;
use crate::domain::auth::{Actor, Role};
use crate::domain::comment::{is_listed, CommentError, CommentView};
use crate::domain::commenter::{Commenter, CommenterProfile};
use crate::domain::foundation::{CommentId, CommenterId, DomainName};
use crate::domain::site::{IdentityProviders, SortPolicy};
use crate::domain::vote::VoteDirection;
use crate::ports::{
    CommentFilter, CommentRepository, CommenterRepository, DomainRepository, PageRepository,
    VoteRepository,
};

#[derive(Debug, Clone)]
pub struct ListCommentsQuery {
    /// Session token, or `"anonymous"`.
    pub commenter_token: String,
    pub domain: String,
    pub path: String,
}

/// Attributes of the listed page. Defaults when no comment exists yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageAttributes {
    pub is_locked: bool,
    pub comment_count: u64,
}

/// Domain attributes the embed needs to render its form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainAttributes {
    pub is_frozen: bool,
    pub require_identification: bool,
    pub require_moderation: bool,
    pub default_sort_policy: SortPolicy,
    pub identity_providers: IdentityProviders,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListCommentsResult {
    pub domain: DomainAttributes,
    pub page: PageAttributes,
    pub requester_is_moderator: bool,
    pub comments: Vec<CommentView>,
    pub commenters: HashMap<CommenterId, CommenterProfile>,
}

pub struct ListCommentsHandler {
    authorizer: Arc<Authorizer>,
    domains: Arc<dyn DomainRepository>,
    pages: Arc<dyn PageRepository>,
    comments: Arc<dyn CommentRepository>,
    commenters: Arc<dyn CommenterRepository>,
    votes: Arc<dyn VoteRepository>,
}

impl ListCommentsHandler {
    pub fn new(
        authorizer: Arc<Authorizer>,
        domains: Arc<dyn DomainRepository>,
        pages: Arc<dyn PageRepository>,
        comments: Arc<dyn CommentRepository>,
        commenters: Arc<dyn CommenterRepository>,
        votes: Arc<dyn VoteRepository>,
    ) -> Self {
        Self {
            authorizer,
            domains,
            pages,
            comments,
            commenters,
            votes,
        }
    }

    pub async fn handle(&self, query: ListCommentsQuery) -> Result<ListCommentsResult, CommentError> {
        if query.commenter_token.trim().is_empty() {
            return Err(CommentError::missing("commenterToken"));
        }
        if query.path.is_empty() {
            return Err(CommentError::missing("path"));
        }
        let domain_name = DomainName::new(query.domain)?;

        let actor = self
            .authorizer
            .actor(&query.commenter_token)
            .await?
            .ok_or(CommentError::NoSuchToken)?;
        let domain = self
            .domains
            .find(&domain_name)
            .await?
            .ok_or(CommentError::NoSuchDomain)?;
        let standing = self.authorizer.standing(&actor, &domain).await?;

        let page = self
            .pages
            .find(&domain_name, &query.path)
            .await?
            .map(|p| PageAttributes {
                is_locked: p.is_locked(),
                comment_count: p.comment_count(),
            })
            .unwrap_or_default();

        let filter = if standing.moderates() {
            CommentFilter::All
        } else {
            CommentFilter::ApprovedOrAuthoredBy(actor.commenter().map(|c| c.id().clone()))
        };
        let listed = self
            .comments
            .list_for_page(&domain_name, &query.path, &filter)
            .await?;

        let directions = match &actor {
            Actor::Commenter(c) => {
                let ids: Vec<CommentId> = listed.iter().map(|c| c.id().clone()).collect();
                self.votes.directions(c.id(), &ids).await?
            }
            Actor::Anonymous => HashMap::new(),
        };

        let mut comments = Vec::with_capacity(listed.len());
        for comment in &listed {
            let role = Role::resolve(standing, &actor, comment.author_id());
            if !is_listed(comment, role) {
                continue;
            }
            let direction = directions
                .get(comment.id())
                .copied()
                .unwrap_or(VoteDirection::None);
            comments.push(CommentView::project(comment, role, direction));
        }

        let mut author_ids: Vec<CommenterId> = comments
            .iter()
            .map(|v| v.commenter_id.clone())
            .filter(|id| !id.is_anonymous())
            .collect();
        author_ids.sort();
        author_ids.dedup();

        let mut commenters: HashMap<CommenterId, CommenterProfile> = self
            .commenters
            .find_many(&author_ids)
            .await?
            .iter()
            .map(|c| {
                let moderator =
                    c.provider().vouches_for(domain.name()) && domain.is_moderator(c.email());
                (c.id().clone(), c.profile(moderator))
            })
            .collect();
        let anonymous = Commenter::anonymous();
        commenters.insert(anonymous.id().clone(), anonymous.profile(false));

        let policy = domain.policy();
        Ok(ListCommentsResult {
            domain: DomainAttributes {
                is_frozen: domain.is_frozen(),
                require_identification: policy.require_identification,
                require_moderation: policy.require_moderation,
                default_sort_policy: domain.default_sort(),
                identity_providers: domain.identity_providers().clone(),
            },
            page,
            requester_is_moderator: standing.moderates(),
            comments,
            commenters,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;
    use crate::application::test_support::{
        authorizer, example_domain, save_domain, seed_comment, sign_in, DOMAIN, PATH,
    };
    use crate::domain::comment::CommentState;
    use crate::domain::foundation::Timestamp;
    use crate::domain::vote::Vote;

    struct Fixture {
        store: Arc<InMemoryStore>,
        handler: ListCommentsHandler,
    }

    async fn fixture() -> Fixture {
        let store = Arc::new(InMemoryStore::new());
        save_domain(&store, &example_domain()).await;
        let handler = ListCommentsHandler::new(
            authorizer(&store),
            store.clone(),
            store.clone(),
            store.clone(),
            store.clone(),
            store.clone(),
        );
        Fixture { store, handler }
    }

    fn query(token: &str) -> ListCommentsQuery {
        ListCommentsQuery {
            commenter_token: token.to_string(),
            domain: DOMAIN.to_string(),
            path: PATH.to_string(),
        }
    }

    /// alice: approved c1, pending c2, flagged c3. bob: pending c4.
    async fn seed(store: &Arc<InMemoryStore>) {
        seed_comment(store, "c1", "alice", CommentState::Approved).await;
        seed_comment(store, "c2", "alice", CommentState::Unapproved).await;
        seed_comment(store, "c3", "alice", CommentState::Flagged).await;
        seed_comment(store, "c4", "bob", CommentState::Unapproved).await;
    }

    fn ids(result: &ListCommentsResult) -> Vec<&str> {
        result.comments.iter().map(|v| v.comment_id.as_str()).collect()
    }

    #[tokio::test]
    async fn anonymous_sees_only_approved_and_no_markdown_or_state() {
        let f = fixture().await;
        seed(&f.store).await;

        let result = f.handler.handle(query("anonymous")).await.unwrap();

        assert_eq!(ids(&result), vec!["c1"]);
        let view = &result.comments[0];
        assert_eq!(view.markdown, "");
        assert_eq!(view.html, "<p>html of c1</p>");
        assert_eq!(view.state, None);
        assert!(!result.requester_is_moderator);
    }

    #[tokio::test]
    async fn author_sees_own_pending_with_markdown_but_no_state() {
        let f = fixture().await;
        let token = sign_in(&f.store, "alice", "alice@example.com").await;
        seed(&f.store).await;

        let result = f.handler.handle(query(&token)).await.unwrap();

        assert_eq!(ids(&result), vec!["c1", "c2", "c3"]);
        assert!(result.comments.iter().all(|v| !v.markdown.is_empty()));
        assert!(result.comments.iter().all(|v| v.state.is_none()));
    }

    #[tokio::test]
    async fn moderator_sees_everything_with_state() {
        let f = fixture().await;
        let token = sign_in(&f.store, "mod", "mod@example.com").await;
        seed(&f.store).await;

        let result = f.handler.handle(query(&token)).await.unwrap();

        assert_eq!(ids(&result), vec!["c1", "c2", "c3", "c4"]);
        assert_eq!(result.comments[2].state, Some(CommentState::Flagged));
        assert!(result.requester_is_moderator);
    }

    #[tokio::test]
    async fn deleted_comments_are_not_listed() {
        let f = fixture().await;
        seed(&f.store).await;
        f.store
            .mark_deleted(
                &CommentId::new("c1").unwrap(),
                &CommenterId::new("alice").unwrap(),
                Timestamp::now(),
            )
            .await
            .unwrap();

        let result = f.handler.handle(query("anonymous")).await.unwrap();

        assert!(result.comments.is_empty());
    }

    #[tokio::test]
    async fn every_view_carries_the_requesters_vote() {
        let f = fixture().await;
        let token = sign_in(&f.store, "bob", "bob@example.com").await;
        seed(&f.store).await;
        VoteRepository::upsert(
            f.store.as_ref(),
            &Vote::new(
                CommentId::new("c1").unwrap(),
                CommenterId::new("bob").unwrap(),
                VoteDirection::Down,
            ),
        )
        .await
        .unwrap();

        let result = f.handler.handle(query(&token)).await.unwrap();

        let c1 = result.comments.iter().find(|v| v.comment_id.as_str() == "c1").unwrap();
        assert_eq!(c1.direction, VoteDirection::Down);
        let c4 = result.comments.iter().find(|v| v.comment_id.as_str() == "c4").unwrap();
        assert_eq!(c4.direction, VoteDirection::None);
    }

    #[tokio::test]
    async fn directory_contains_anonymous_and_marks_moderators() {
        let f = fixture().await;
        sign_in(&f.store, "alice", "alice@example.com").await;
        sign_in(&f.store, "mod", "mod@example.com").await;
        seed_comment(&f.store, "c1", "alice", CommentState::Approved).await;
        seed_comment(&f.store, "c2", "mod", CommentState::Approved).await;

        let result = f.handler.handle(query("anonymous")).await.unwrap();

        let anonymous = &result.commenters[&CommenterId::anonymous()];
        assert_eq!(anonymous.name, "Anonymous");
        assert!(!result.commenters[&CommenterId::new("alice").unwrap()].is_moderator);
        assert!(result.commenters[&CommenterId::new("mod").unwrap()].is_moderator);
        let json = serde_json::to_string(&result).unwrap();
        assert!(!json.contains("alice@example.com"));
    }

    #[tokio::test]
    async fn missing_page_yields_default_attributes() {
        let f = fixture().await;

        let result = f.handler.handle(query("anonymous")).await.unwrap();

        assert_eq!(result.page, PageAttributes::default());
        assert!(result.commenters.contains_key(&CommenterId::anonymous()));
    }

    #[tokio::test]
    async fn unknown_domain_is_reported() {
        let f = fixture().await;
        let mut q = query("anonymous");
        q.domain = "unknown.com".to_string();

        assert_eq!(
            f.handler.handle(q).await.unwrap_err(),
            CommentError::NoSuchDomain
        );
    }
}
