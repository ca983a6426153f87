//! Deterministic collaborators shared by handler tests.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::adapters::memory::InMemoryStore;
use crate::application::authorization::Authorizer;
use crate::domain::comment::{Comment, CommentState, ParentRef};
use crate::domain::commenter::{Commenter, IdentityProvider};
use crate::domain::foundation::{
    CommentId, CommenterId, CommenterToken, DomainError, DomainName, ErrorCode, OwnerId,
};
use crate::domain::site::Domain;
use crate::ports::{
    CommentRepository, CommenterRepository, DomainRepository, MarkdownRenderer, Notification,
    Notifier, PasswordHasher, Recipient, SpamChecker, SpamContext, TokenGenerator,
};

/// Reversible "hash" so tests can assert on stored digests.
pub struct PlainHasher;

impl PasswordHasher for PlainHasher {
    fn hash(&self, secret: &str) -> Result<String, DomainError> {
        Ok(format!("plain:{}", secret))
    }

    fn verify(&self, digest: &str, secret: &str) -> bool {
        digest.strip_prefix("plain:") == Some(secret)
    }
}

/// `PlainHasher` that counts how many digests it computed or checked.
#[derive(Default)]
pub struct CountingHasher {
    work: AtomicUsize,
}

impl CountingHasher {
    pub fn work(&self) -> usize {
        self.work.load(Ordering::SeqCst)
    }
}

impl PasswordHasher for CountingHasher {
    fn hash(&self, secret: &str) -> Result<String, DomainError> {
        self.work.fetch_add(1, Ordering::SeqCst);
        PlainHasher.hash(secret)
    }

    fn verify(&self, digest: &str, secret: &str) -> bool {
        self.work.fetch_add(1, Ordering::SeqCst);
        PlainHasher.verify(digest, secret)
    }
}

/// Spam checker returning a fixed verdict and counting calls.
pub struct FixedSpam {
    verdict: bool,
    calls: AtomicUsize,
}

impl FixedSpam {
    pub fn new(verdict: bool) -> Self {
        Self {
            verdict,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SpamChecker for FixedSpam {
    async fn is_spam(&self, _context: &SpamContext) -> bool {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.verdict
    }
}

pub struct EchoRenderer;

impl MarkdownRenderer for EchoRenderer {
    fn render(&self, markdown: &str) -> String {
        format!("<p>{}</p>", markdown)
    }
}

/// Counter-backed 64-character hex tokens.
#[derive(Default)]
pub struct SequentialTokens {
    next: AtomicU64,
}

impl TokenGenerator for SequentialTokens {
    fn hex_token(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::SeqCst) + 1;
        format!("{:064x}", n)
    }
}

/// Notifier that records every delivery.
#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<(Notification, Recipient)>>,
    failing: std::sync::atomic::AtomicBool,
}

impl RecordingNotifier {
    pub fn sent(&self) -> Vec<(Notification, Recipient)> {
        self.sent.lock().unwrap().clone()
    }

    pub fn fail_all(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(
        &self,
        notification: &Notification,
        recipient: &Recipient,
    ) -> Result<(), DomainError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(DomainError::new(ErrorCode::InternalError, "smtp unreachable"));
        }
        self.sent
            .lock()
            .unwrap()
            .push((notification.clone(), recipient.clone()));
        Ok(())
    }
}

/// Stores a local commenter with id `id`.
pub async fn seed_commenter(store: &Arc<InMemoryStore>, id: &str, email: &str) -> Commenter {
    let commenter = Commenter::new(
        CommenterId::new(id).unwrap(),
        email,
        id,
        "",
        "",
        IdentityProvider::Local,
        Some("plain:secret".into()),
    );
    CommenterRepository::insert(store.as_ref(), &commenter)
        .await
        .unwrap();
    commenter
}

/// Stores a local commenter and a session bound to it. Returns the token.
pub async fn sign_in(store: &Arc<InMemoryStore>, id: &str, email: &str) -> String {
    let commenter = seed_commenter(store, id, email).await;
    let token = format!("token-{}", id);
    store
        .create_session(&CommenterToken::new(token.clone()).unwrap(), Some(commenter.id()))
        .await
        .unwrap();
    token
}

pub const DOMAIN: &str = "example.com";
pub const PATH: &str = "/post";

/// `example.com`, owned by `o1`, moderated by `mod@example.com`.
pub fn example_domain() -> Domain {
    Domain::new(
        DomainName::new(DOMAIN).unwrap(),
        OwnerId::new("o1").unwrap(),
    )
    .with_moderators(["mod@example.com"])
}

pub async fn save_domain(store: &Arc<InMemoryStore>, domain: &Domain) {
    DomainRepository::save(store.as_ref(), domain).await.unwrap();
}

pub fn authorizer(store: &Arc<InMemoryStore>) -> Arc<Authorizer> {
    Arc::new(Authorizer::new(store.clone(), store.clone(), store.clone()))
}

/// Stores a comment on [`DOMAIN`]/[`PATH`].
pub async fn seed_comment(
    store: &Arc<InMemoryStore>,
    id: &str,
    author: &str,
    state: CommentState,
) -> Comment {
    let comment = Comment::new(
        CommentId::new(id).unwrap(),
        DomainName::new(DOMAIN).unwrap(),
        PATH,
        CommenterId::new(author).unwrap(),
        ParentRef::Root,
        format!("markdown of {}", id),
        format!("<p>html of {}</p>", id),
        state,
    );
    CommentRepository::insert(store.as_ref(), &comment)
        .await
        .unwrap();
    comment
}
