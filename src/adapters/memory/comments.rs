use std::collections::HashMap;

use async_trait::async_trait;

use super::InMemoryStore;
use crate::domain::comment::{Comment, CommentState};
use crate::domain::foundation::{CommentId, CommenterId, DomainError, DomainName, Timestamp};
use crate::domain::vote::{Vote, VoteDirection};
use crate::ports::{CommentFilter, CommentRepository, VoteRepository};

#[async_trait]
impl CommentRepository for InMemoryStore {
    async fn insert(&self, comment: &Comment) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        if state.comments.iter().any(|c| c.id() == comment.id()) {
            return Err(DomainError::conflict("comment id already in use"));
        }
        state
            .page_mut(comment.domain(), comment.path())
            .record_comment();
        state.comments.push(comment.clone());
        Ok(())
    }

    async fn find(&self, id: &CommentId) -> Result<Option<Comment>, DomainError> {
        let state = self.state.read().await;
        Ok(state.comments.iter().find(|c| c.id() == id).cloned())
    }

    async fn update_content(
        &self,
        id: &CommentId,
        markdown: &str,
        html: &str,
    ) -> Result<bool, DomainError> {
        let mut state = self.state.write().await;
        Ok(match state.comment_mut(id) {
            Some(comment) => comment.edit(markdown, html).is_ok(),
            None => false,
        })
    }

    async fn set_state(&self, id: &CommentId, new_state: CommentState) -> Result<bool, DomainError> {
        let mut state = self.state.write().await;
        Ok(match state.comment_mut(id) {
            Some(comment) => comment.moderate(new_state).is_ok(),
            None => false,
        })
    }

    async fn mark_deleted(
        &self,
        id: &CommentId,
        deleter_id: &CommenterId,
        deleted_at: Timestamp,
    ) -> Result<bool, DomainError> {
        let mut state = self.state.write().await;
        Ok(match state.comment_mut(id) {
            Some(comment) => {
                comment.soft_delete(deleter_id.clone(), deleted_at);
                true
            }
            None => false,
        })
    }

    async fn list_for_page(
        &self,
        domain: &DomainName,
        path: &str,
        filter: &CommentFilter,
    ) -> Result<Vec<Comment>, DomainError> {
        let state = self.state.read().await;
        Ok(state
            .comments
            .iter()
            .filter(|c| c.domain() == domain && c.path() == path && !c.is_deleted())
            .filter(|c| match filter {
                CommentFilter::All => true,
                CommentFilter::ApprovedOrAuthoredBy(author) => {
                    c.state().is_approved()
                        || author.as_ref().is_some_and(|a| c.is_authored_by(a))
                }
            })
            .cloned()
            .collect())
    }
}

#[async_trait]
impl VoteRepository for InMemoryStore {
    async fn upsert(&self, vote: &Vote) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        state.votes.insert(
            (vote.comment_id.clone(), vote.voter_id.clone()),
            vote.clone(),
        );
        let score: i64 = state
            .votes
            .values()
            .filter(|v| v.comment_id == vote.comment_id)
            .map(|v| i64::from(v.direction.value()))
            .sum();
        if let Some(comment) = state.comment_mut(&vote.comment_id) {
            comment.set_score(score);
        }
        Ok(())
    }

    async fn directions(
        &self,
        voter_id: &CommenterId,
        comment_ids: &[CommentId],
    ) -> Result<HashMap<CommentId, VoteDirection>, DomainError> {
        let state = self.state.read().await;
        Ok(comment_ids
            .iter()
            .filter_map(|id| {
                state
                    .votes
                    .get(&(id.clone(), voter_id.clone()))
                    .map(|v| (id.clone(), v.direction))
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::comment::{ParentRef, TOMBSTONE};
    use crate::ports::PageRepository;

    fn comment(id: &str, author: &str, state: CommentState) -> Comment {
        Comment::new(
            CommentId::new(id).unwrap(),
            DomainName::new("example.com").unwrap(),
            "/post",
            CommenterId::new(author).unwrap(),
            ParentRef::Root,
            "md",
            "<p>md</p>",
            state,
        )
    }

    #[tokio::test]
    async fn insert_bumps_page_count() {
        let store = InMemoryStore::new();
        CommentRepository::insert(&store, &comment("c1", "a", CommentState::Approved))
            .await
            .unwrap();
        CommentRepository::insert(&store, &comment("c2", "a", CommentState::Flagged))
            .await
            .unwrap();

        let page = PageRepository::find(&store, &DomainName::new("example.com").unwrap(), "/post")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(page.comment_count(), 2);
    }

    #[tokio::test]
    async fn listing_filter_keeps_own_pending_comments() {
        let store = InMemoryStore::new();
        for c in [
            comment("c1", "a", CommentState::Approved),
            comment("c2", "a", CommentState::Unapproved),
            comment("c3", "b", CommentState::Flagged),
        ] {
            CommentRepository::insert(&store, &c).await.unwrap();
        }
        let domain = DomainName::new("example.com").unwrap();

        let filter = CommentFilter::ApprovedOrAuthoredBy(Some(CommenterId::new("a").unwrap()));
        let listed = store.list_for_page(&domain, "/post", &filter).await.unwrap();
        assert_eq!(listed.len(), 2);

        let anon = CommentFilter::ApprovedOrAuthoredBy(None);
        assert_eq!(store.list_for_page(&domain, "/post", &anon).await.unwrap().len(), 1);

        let all = store
            .list_for_page(&domain, "/post", &CommentFilter::All)
            .await
            .unwrap();
        assert_eq!(all.len(), 3);
    }

    #[tokio::test]
    async fn deleted_comments_are_hidden_but_kept() {
        let store = InMemoryStore::new();
        let c = comment("c1", "a", CommentState::Approved);
        CommentRepository::insert(&store, &c).await.unwrap();

        let deleter = CommenterId::new("a").unwrap();
        assert!(store.mark_deleted(c.id(), &deleter, Timestamp::now()).await.unwrap());
        assert!(!store.update_content(c.id(), "new", "new").await.unwrap());

        let stored = CommentRepository::find(&store, c.id()).await.unwrap().unwrap();
        assert_eq!(stored.markdown(), TOMBSTONE);
        let listed = store
            .list_for_page(c.domain(), c.path(), &CommentFilter::All)
            .await
            .unwrap();
        assert!(listed.is_empty());
    }

    #[tokio::test]
    async fn revote_overwrites_and_rescores() {
        let store = InMemoryStore::new();
        let c = comment("c1", "a", CommentState::Approved);
        CommentRepository::insert(&store, &c).await.unwrap();
        let voter = CommenterId::new("b").unwrap();

        VoteRepository::upsert(&store, &Vote::new(c.id().clone(), voter.clone(), VoteDirection::Up))
            .await
            .unwrap();
        VoteRepository::upsert(&store, &Vote::new(c.id().clone(), voter.clone(), VoteDirection::Down))
            .await
            .unwrap();

        let stored = CommentRepository::find(&store, c.id()).await.unwrap().unwrap();
        assert_eq!(stored.score(), -1);
        let dirs = store.directions(&voter, &[c.id().clone()]).await.unwrap();
        assert_eq!(dirs.get(c.id()), Some(&VoteDirection::Down));
    }
}
