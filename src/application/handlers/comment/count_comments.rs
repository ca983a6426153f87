//! CountCommentsHandler - Cached comment counts for a set of pages.

use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::comment::CommentError;
use crate::domain::foundation::DomainName;
use crate::ports::PageRepository;

#[derive(Debug, Clone)]
pub struct CountCommentsQuery {
    pub domain: String,
    pub paths: Vec<String>,
}

pub struct CountCommentsHandler {
    pages: Arc<dyn PageRepository>,
}

impl CountCommentsHandler {
    pub fn new(pages: Arc<dyn PageRepository>) -> Self {
        Self { pages }
    }

    /// Paths without a page row are omitted from the result.
    pub async fn handle(&self, query: CountCommentsQuery) -> Result<HashMap<String, u64>, CommentError> {
        let domain = DomainName::new(query.domain)?;
        if query.paths.is_empty() {
            return Err(CommentError::EmptyPaths);
        }
        Ok(self.pages.comment_counts(&domain, &query.paths).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;
    use crate::application::test_support::{seed_comment, DOMAIN, PATH};
    use crate::domain::comment::CommentState;

    #[tokio::test]
    async fn counts_known_paths() {
        let store = Arc::new(InMemoryStore::new());
        seed_comment(&store, "c1", "alice", CommentState::Approved).await;
        seed_comment(&store, "c2", "bob", CommentState::Unapproved).await;
        let handler = CountCommentsHandler::new(store);

        let counts = handler
            .handle(CountCommentsQuery {
                domain: DOMAIN.to_string(),
                paths: vec![PATH.to_string(), "/empty".to_string()],
            })
            .await
            .unwrap();

        assert_eq!(counts.get(PATH), Some(&2));
        assert!(!counts.contains_key("/empty"));
    }

    #[tokio::test]
    async fn empty_path_list_is_an_input_error() {
        let handler = CountCommentsHandler::new(Arc::new(InMemoryStore::new()));

        assert_eq!(
            handler
                .handle(CountCommentsQuery {
                    domain: DOMAIN.to_string(),
                    paths: Vec::new(),
                })
                .await
                .unwrap_err(),
            CommentError::EmptyPaths
        );
    }
}
