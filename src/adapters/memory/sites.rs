use std::collections::HashMap;

use async_trait::async_trait;

use super::InMemoryStore;
use crate::domain::foundation::{DomainError, DomainName, OwnerId};
use crate::domain::site::{Domain, Page};
use crate::ports::{DomainRepository, PageRepository};

#[async_trait]
impl DomainRepository for InMemoryStore {
    async fn find(&self, name: &DomainName) -> Result<Option<Domain>, DomainError> {
        Ok(self.state.read().await.domains.get(name).cloned())
    }

    async fn list_by_owner(&self, owner_id: &OwnerId) -> Result<Vec<Domain>, DomainError> {
        let state = self.state.read().await;
        let mut owned: Vec<Domain> = state
            .domains
            .values()
            .filter(|d| d.is_owned_by(owner_id))
            .cloned()
            .collect();
        owned.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(owned)
    }

    async fn save(&self, domain: &Domain) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        state.domains.insert(domain.name().clone(), domain.clone());
        Ok(())
    }

    async fn delete(&self, name: &DomainName) -> Result<bool, DomainError> {
        let mut state = self.state.write().await;
        if state.domains.remove(name).is_none() {
            return Ok(false);
        }
        state.pages.retain(|(domain, _), _| domain != name);
        let removed: Vec<_> = state
            .comments
            .iter()
            .filter(|c| c.domain() == name)
            .map(|c| c.id().clone())
            .collect();
        state.comments.retain(|c| c.domain() != name);
        state
            .votes
            .retain(|(comment_id, _), _| !removed.contains(comment_id));
        Ok(true)
    }
}

#[async_trait]
impl PageRepository for InMemoryStore {
    async fn find(&self, domain: &DomainName, path: &str) -> Result<Option<Page>, DomainError> {
        let state = self.state.read().await;
        Ok(state
            .pages
            .get(&(domain.clone(), path.to_string()))
            .cloned())
    }

    async fn upsert(&self, domain: &DomainName, path: &str) -> Result<Page, DomainError> {
        let mut state = self.state.write().await;
        Ok(state.page_mut(domain, path).clone())
    }

    async fn set_locked(
        &self,
        domain: &DomainName,
        path: &str,
        locked: bool,
    ) -> Result<bool, DomainError> {
        let mut state = self.state.write().await;
        match state.pages.get_mut(&(domain.clone(), path.to_string())) {
            Some(page) => {
                page.set_locked(locked);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn comment_counts(
        &self,
        domain: &DomainName,
        paths: &[String],
    ) -> Result<HashMap<String, u64>, DomainError> {
        let state = self.state.read().await;
        Ok(paths
            .iter()
            .filter_map(|path| {
                state
                    .pages
                    .get(&(domain.clone(), path.clone()))
                    .map(|page| (path.clone(), page.comment_count()))
            })
            .collect())
    }
}
