//! Integration tests for the comment lifecycle.
//!
//! Drives the public handlers end to end against the in-memory store and the
//! real renderer: submission under moderation, approval, listing redaction,
//! voting, replies with notifications, and deletion.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::mpsc;

use commentary::adapters::markdown::PulldownRenderer;
use commentary::adapters::memory::InMemoryStore;
use commentary::adapters::security::RandomTokenGenerator;
use commentary::adapters::spam::NoSpamChecker;
use commentary::application::handlers::comment::{
    ApproveCommentHandler, CastVoteCommand, CastVoteHandler, ClientInfo, CommentServices,
    CommentTarget, CountCommentsHandler, CountCommentsQuery, CreateCommentCommand,
    CreateCommentHandler, DeleteCommentHandler, ListCommentsHandler, ListCommentsQuery,
};
use commentary::application::handlers::commenter::{
    LoginCommenterCommand, LoginCommenterHandler, RegisterCommenterCommand,
    RegisterCommenterHandler,
};
use commentary::application::handlers::owner::{RegisterOwnerCommand, RegisterOwnerHandler};
use commentary::application::{
    AuthSettings, Authorizer, NotificationDispatcher, NotificationJob, NotificationWorker,
};
use commentary::domain::comment::{CommentError, CommentState, TOMBSTONE};
use commentary::domain::foundation::{DomainError, DomainName, OwnerId};
use commentary::domain::site::{Domain, ModerationPolicy};
use commentary::domain::vote::VoteDirection;
use commentary::ports::{DomainRepository, Notification, Notifier, PasswordHasher, Recipient};

// =============================================================================
// Test Infrastructure
// =============================================================================

const DOMAIN: &str = "blog.example.com";
const PATH: &str = "/posts/hello";

/// Reversible digest; argon2 is covered by the adapter's own tests.
struct PlainHasher;

impl PasswordHasher for PlainHasher {
    fn hash(&self, secret: &str) -> Result<String, DomainError> {
        Ok(format!("plain:{}", secret))
    }

    fn verify(&self, digest: &str, secret: &str) -> bool {
        digest == format!("plain:{}", secret)
    }
}

#[derive(Default)]
struct RecordingNotifier {
    sent: Mutex<Vec<(Notification, Recipient)>>,
}

impl RecordingNotifier {
    fn kinds_for(&self, email: &str) -> Vec<&'static str> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, r)| r.email == email)
            .map(|(n, _)| n.kind())
            .collect()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, notification: &Notification, recipient: &Recipient) -> Result<(), DomainError> {
        self.sent
            .lock()
            .unwrap()
            .push((notification.clone(), recipient.clone()));
        Ok(())
    }
}

struct App {
    store: Arc<InMemoryStore>,
    notifier: Arc<RecordingNotifier>,
    worker: NotificationWorker,
    jobs: mpsc::Receiver<NotificationJob>,
    register_owner: RegisterOwnerHandler,
    register_commenter: RegisterCommenterHandler,
    login_commenter: LoginCommenterHandler,
    create: CreateCommentHandler,
    approve: ApproveCommentHandler,
    delete: DeleteCommentHandler,
    vote: CastVoteHandler,
    list: ListCommentsHandler,
    count: CountCommentsHandler,
}

impl App {
    fn new() -> Self {
        let store = Arc::new(InMemoryStore::new());
        let tokens = Arc::new(RandomTokenGenerator::default());
        let hasher = Arc::new(PlainHasher);
        let notifier = Arc::new(RecordingNotifier::default());
        let (notifications, jobs) = NotificationDispatcher::channel(64);
        let worker = NotificationWorker::new(
            notifier.clone(),
            store.clone(),
            store.clone(),
            store.clone(),
        );
        let authorizer = Arc::new(Authorizer::new(store.clone(), store.clone(), store.clone()));
        let settings = AuthSettings {
            wrong_auth_delay: std::time::Duration::from_millis(1),
            ..AuthSettings::default()
        };

        Self {
            register_owner: RegisterOwnerHandler::new(
                store.clone(),
                store.clone(),
                hasher.clone(),
                tokens.clone(),
                notifications.clone(),
                settings.clone(),
            ),
            register_commenter: RegisterCommenterHandler::new(
                store.clone(),
                hasher.clone(),
                tokens.clone(),
            ),
            login_commenter: LoginCommenterHandler::new(
                store.clone(),
                hasher,
                tokens.clone(),
                settings.wrong_auth_delay,
            ),
            create: CreateCommentHandler::new(
                authorizer.clone(),
                store.clone(),
                store.clone(),
                store.clone(),
                CommentServices {
                    renderer: Arc::new(PulldownRenderer::new()),
                    spam: Arc::new(NoSpamChecker),
                    tokens,
                },
                notifications,
            ),
            approve: ApproveCommentHandler::new(authorizer.clone(), store.clone()),
            delete: DeleteCommentHandler::new(authorizer.clone(), store.clone()),
            vote: CastVoteHandler::new(authorizer.clone(), store.clone(), store.clone()),
            list: ListCommentsHandler::new(
                authorizer,
                store.clone(),
                store.clone(),
                store.clone(),
                store.clone(),
                store.clone(),
            ),
            count: CountCommentsHandler::new(store.clone()),
            store,
            notifier,
            worker,
            jobs,
        }
    }

    /// Registers a local commenter and returns a bound session token.
    async fn commenter(&self, email: &str, name: &str) -> String {
        self.register_commenter
            .handle(RegisterCommenterCommand {
                email: email.to_string(),
                name: name.to_string(),
                password: "secret".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
        self.login(email, "secret").await
    }

    async fn login(&self, email: &str, password: &str) -> String {
        self.login_commenter
            .handle(LoginCommenterCommand {
                email: email.to_string(),
                password: password.to_string(),
            })
            .await
            .unwrap()
            .token
            .as_str()
            .to_string()
    }

    /// Registers an owner and a domain they moderate under `policy`.
    async fn owner_with_domain(&self, policy: ModerationPolicy) -> OwnerId {
        let owner = self
            .register_owner
            .handle(RegisterOwnerCommand {
                email: "owner@example.com".to_string(),
                name: "Owner".to_string(),
                password: "owner-pass".to_string(),
            })
            .await
            .unwrap();
        let domain = Domain::new(DomainName::new(DOMAIN).unwrap(), owner.owner_id.clone())
            .with_moderators(["mod@example.com"])
            .with_policy(policy);
        DomainRepository::save(self.store.as_ref(), &domain)
            .await
            .unwrap();
        owner.owner_id
    }

    async fn post(&self, token: &str, parent: &str, markdown: &str) -> Result<String, CommentError> {
        self.create
            .handle(CreateCommentCommand {
                commenter_token: token.to_string(),
                domain: DOMAIN.to_string(),
                path: PATH.to_string(),
                parent_id: parent.to_string(),
                markdown: markdown.to_string(),
                client: ClientInfo::default(),
            })
            .await
            .map(|r| r.comment_id.as_str().to_string())
    }

    async fn listed_ids(&self, token: &str) -> Vec<String> {
        self.list
            .handle(ListCommentsQuery {
                commenter_token: token.to_string(),
                domain: DOMAIN.to_string(),
                path: PATH.to_string(),
            })
            .await
            .unwrap()
            .comments
            .iter()
            .map(|v| v.comment_id.as_str().to_string())
            .collect()
    }

    /// Delivers every queued notification job.
    async fn drain_notifications(&mut self) {
        while let Ok(job) = self.jobs.try_recv() {
            self.worker.process(job).await;
        }
    }
}

fn target(token: &str, comment_id: &str) -> CommentTarget {
    CommentTarget {
        commenter_token: token.to_string(),
        comment_id: comment_id.to_string(),
    }
}

fn moderated() -> ModerationPolicy {
    ModerationPolicy {
        require_moderation: true,
        ..ModerationPolicy::default()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn moderated_comment_is_hidden_until_the_owner_approves_it() {
    let app = App::new();
    app.owner_with_domain(moderated()).await;
    let alice = app.commenter("alice@example.com", "Alice").await;
    let owner = app.login("owner@example.com", "owner-pass").await;

    let id = app.post(&alice, "root", "Hello *world*").await.unwrap();

    assert!(app.listed_ids("anonymous").await.is_empty());
    assert_eq!(app.listed_ids(&alice).await, vec![id.clone()]);

    let owner_view = app
        .list
        .handle(ListCommentsQuery {
            commenter_token: owner.clone(),
            domain: DOMAIN.to_string(),
            path: PATH.to_string(),
        })
        .await
        .unwrap();
    assert!(owner_view.requester_is_moderator);
    assert_eq!(owner_view.comments[0].state, Some(CommentState::Unapproved));

    app.approve.handle(target(&owner, &id)).await.unwrap();

    let public = app
        .list
        .handle(ListCommentsQuery {
            commenter_token: "anonymous".to_string(),
            domain: DOMAIN.to_string(),
            path: PATH.to_string(),
        })
        .await
        .unwrap();
    assert_eq!(public.comments.len(), 1);
    assert_eq!(public.comments[0].html, "<p>Hello <em>world</em></p>\n");
    assert_eq!(public.comments[0].markdown, "");
    assert_eq!(public.comments[0].state, None);
}

#[tokio::test]
async fn commenter_registered_under_the_owner_email_gains_nothing() {
    let app = App::new();
    let squatter = app.commenter("owner@example.com", "Not the owner").await;
    app.owner_with_domain(moderated()).await;
    let alice = app.commenter("alice@example.com", "Alice").await;
    let id = app.post(&alice, "root", "Awaiting review").await.unwrap();

    assert_eq!(
        app.approve.handle(target(&squatter, &id)).await.unwrap_err(),
        CommentError::NotModerator
    );
    assert!(app.listed_ids("anonymous").await.is_empty());
}

#[tokio::test]
async fn moderator_comments_skip_the_queue() {
    let app = App::new();
    app.owner_with_domain(moderated()).await;
    let moderator = app.commenter("mod@example.com", "Mod").await;

    let id = app.post(&moderator, "root", "Pinned note").await.unwrap();

    assert_eq!(app.listed_ids("anonymous").await, vec![id]);
}

#[tokio::test]
async fn votes_are_ledgered_per_voter() {
    let app = App::new();
    app.owner_with_domain(ModerationPolicy::default()).await;
    let alice = app.commenter("alice@example.com", "Alice").await;
    let bob = app.commenter("bob@example.com", "Bob").await;
    let carol = app.commenter("carol@example.com", "Carol").await;
    let id = app.post(&alice, "root", "Vote on me").await.unwrap();

    let vote = |token: &str, direction: i64| CastVoteCommand {
        commenter_token: token.to_string(),
        comment_id: id.clone(),
        direction,
    };
    app.vote.handle(vote(&bob, 1)).await.unwrap();
    app.vote.handle(vote(&bob, 1)).await.unwrap();
    app.vote.handle(vote(&carol, 7)).await.unwrap();
    assert_eq!(
        app.vote.handle(vote(&alice, 1)).await.unwrap_err(),
        CommentError::SelfVote
    );

    let listing = app
        .list
        .handle(ListCommentsQuery {
            commenter_token: bob.clone(),
            domain: DOMAIN.to_string(),
            path: PATH.to_string(),
        })
        .await
        .unwrap();
    assert_eq!(listing.comments[0].score, 2);
    assert_eq!(listing.comments[0].direction, VoteDirection::Up);

    app.vote.handle(vote(&carol, -1)).await.unwrap();
    let listing = app
        .list
        .handle(ListCommentsQuery {
            commenter_token: carol,
            domain: DOMAIN.to_string(),
            path: PATH.to_string(),
        })
        .await
        .unwrap();
    assert_eq!(listing.comments[0].score, 0);
    assert_eq!(listing.comments[0].direction, VoteDirection::Down);
}

#[tokio::test]
async fn replies_notify_the_parent_author_and_moderators() {
    let mut app = App::new();
    app.owner_with_domain(ModerationPolicy::default()).await;
    let alice = app.commenter("alice@example.com", "Alice").await;
    let bob = app.commenter("bob@example.com", "Bob").await;

    let parent = app.post(&alice, "root", "First!").await.unwrap();
    app.post(&bob, &parent, "Second.").await.unwrap();
    app.drain_notifications().await;

    assert_eq!(app.notifier.kinds_for("alice@example.com"), vec!["reply"]);
    assert_eq!(
        app.notifier.kinds_for("mod@example.com"),
        vec!["new_comment", "new_comment"]
    );
    assert!(app.notifier.kinds_for("bob@example.com").is_empty());
}

#[tokio::test]
async fn reply_to_a_comment_on_another_page_is_rejected() {
    let app = App::new();
    app.owner_with_domain(ModerationPolicy::default()).await;
    let alice = app.commenter("alice@example.com", "Alice").await;
    let elsewhere = app
        .create
        .handle(CreateCommentCommand {
            commenter_token: alice.clone(),
            domain: DOMAIN.to_string(),
            path: "/other".to_string(),
            parent_id: "root".to_string(),
            markdown: "Elsewhere".to_string(),
            client: ClientInfo::default(),
        })
        .await
        .unwrap();

    assert_eq!(
        app.post(&alice, elsewhere.comment_id.as_str(), "Cross-page")
            .await
            .unwrap_err(),
        CommentError::NoSuchComment
    );
}

#[tokio::test]
async fn deleted_comment_disappears_but_keeps_its_count() {
    let app = App::new();
    app.owner_with_domain(ModerationPolicy::default()).await;
    let alice = app.commenter("alice@example.com", "Alice").await;
    let id = app.post(&alice, "root", "Regrettable").await.unwrap();

    app.delete.handle(target(&alice, &id)).await.unwrap();

    assert!(app.listed_ids("anonymous").await.is_empty());
    let counts = app
        .count
        .handle(CountCommentsQuery {
            domain: DOMAIN.to_string(),
            paths: vec![PATH.to_string()],
        })
        .await
        .unwrap();
    assert_eq!(counts.get(PATH), Some(&1));

    let stored = commentary::ports::CommentRepository::find(
        app.store.as_ref(),
        &commentary::domain::foundation::CommentId::new(id).unwrap(),
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(stored.markdown(), TOMBSTONE);
    assert!(stored.author_id().is_anonymous());
}

#[tokio::test]
async fn frozen_domain_accepts_no_comments() {
    let app = App::new();
    let owner_id = app.owner_with_domain(ModerationPolicy::default()).await;
    let frozen = Domain::new(DomainName::new(DOMAIN).unwrap(), owner_id).frozen();
    DomainRepository::save(app.store.as_ref(), &frozen)
        .await
        .unwrap();
    let alice = app.commenter("alice@example.com", "Alice").await;

    assert_eq!(
        app.post(&alice, "root", "Too late").await.unwrap_err(),
        CommentError::DomainFrozen
    );
}

#[tokio::test]
async fn anonymous_comments_wait_for_moderation_by_default() {
    let app = App::new();
    app.owner_with_domain(ModerationPolicy::default()).await;

    app.post("anonymous", "root", "Drive-by").await.unwrap();

    assert!(app.listed_ids("anonymous").await.is_empty());
}
