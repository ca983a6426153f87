//! Stateless collaborators: markdown rendering, spam screening, password
//! digests and random tokens.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;

/// Markdown to HTML. Pure: identical input yields byte-identical output.
pub trait MarkdownRenderer: Send + Sync {
    fn render(&self, markdown: &str) -> String;
}

/// Everything the spam oracle gets to see about a submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpamContext {
    pub domain: String,
    pub ip: String,
    pub user_agent: String,
    pub name: String,
    pub email: String,
    pub link: String,
    pub markdown: String,
}

#[async_trait]
pub trait SpamChecker: Send + Sync {
    /// Oracle failures are the adapter's concern; it answers `false` then.
    async fn is_spam(&self, context: &SpamContext) -> bool;
}

pub trait PasswordHasher: Send + Sync {
    /// Produces a salted digest.
    fn hash(&self, secret: &str) -> Result<String, DomainError>;

    fn verify(&self, digest: &str, secret: &str) -> bool;

    /// Spends the work of one `verify` without a digest to check against.
    /// Login paths call this when no account matched.
    fn verify_nothing(&self, secret: &str) {
        let _ = self.hash(secret);
    }
}

/// Cryptographically secure hex tokens of a fixed byte length.
pub trait TokenGenerator: Send + Sync {
    fn hex_token(&self) -> String;
}
