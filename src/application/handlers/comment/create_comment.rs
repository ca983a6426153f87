//! CreateCommentHandler - Accepts a new comment for a page.

use std::sync::Arc;

use tracing::info;

use crate::application::authorization::Authorizer;
use crate::application::notification::{NotificationDispatcher, NotificationJob};
use crate::domain::auth::Actor;
use crate::domain::comment::{Comment, CommentCreated, CommentError, CommentState, ParentRef, Screening};
use crate::domain::foundation::{CommentId, DomainName};
use crate::ports::{
    CommentRepository, DomainRepository, MarkdownRenderer, PageRepository, SpamChecker,
    SpamContext, TokenGenerator,
};

/// Request metadata forwarded to the spam oracle.
#[derive(Debug, Clone, Default)]
pub struct ClientInfo {
    pub ip: String,
    pub user_agent: String,
}

#[derive(Debug, Clone)]
pub struct CreateCommentCommand {
    /// Session token, or `"anonymous"`.
    pub commenter_token: String,
    pub domain: String,
    pub path: String,
    /// `"root"` or the parent comment's id.
    pub parent_id: String,
    pub markdown: String,
    pub client: ClientInfo,
}

#[derive(Debug, Clone)]
pub struct CreateCommentResult {
    pub comment_id: CommentId,
    pub html: String,
    pub state: CommentState,
}

/// Collaborators consulted while creating a comment.
pub struct CommentServices {
    pub renderer: Arc<dyn MarkdownRenderer>,
    pub spam: Arc<dyn SpamChecker>,
    pub tokens: Arc<dyn TokenGenerator>,
}

pub struct CreateCommentHandler {
    authorizer: Arc<Authorizer>,
    domains: Arc<dyn DomainRepository>,
    pages: Arc<dyn PageRepository>,
    comments: Arc<dyn CommentRepository>,
    services: CommentServices,
    notifications: NotificationDispatcher,
}

impl CreateCommentHandler {
    pub fn new(
        authorizer: Arc<Authorizer>,
        domains: Arc<dyn DomainRepository>,
        pages: Arc<dyn PageRepository>,
        comments: Arc<dyn CommentRepository>,
        services: CommentServices,
        notifications: NotificationDispatcher,
    ) -> Self {
        Self {
            authorizer,
            domains,
            pages,
            comments,
            services,
            notifications,
        }
    }

    pub async fn handle(&self, cmd: CreateCommentCommand) -> Result<CreateCommentResult, CommentError> {
        if cmd.commenter_token.trim().is_empty() {
            return Err(CommentError::missing("commenterToken"));
        }
        if cmd.path.is_empty() {
            return Err(CommentError::missing("path"));
        }
        if cmd.markdown.trim().is_empty() {
            return Err(CommentError::missing("markdown"));
        }
        let domain_name = DomainName::new(cmd.domain)?;
        let parent = ParentRef::parse(&cmd.parent_id)?;

        let actor = self
            .authorizer
            .actor(&cmd.commenter_token)
            .await?
            .ok_or(CommentError::NoSuchToken)?;

        let domain = self
            .domains
            .find(&domain_name)
            .await?
            .ok_or(CommentError::NoSuchDomain)?;
        if domain.is_frozen() {
            return Err(CommentError::DomainFrozen);
        }
        if domain.policy().require_identification && actor.is_anonymous() {
            return Err(CommentError::NotAuthorised);
        }

        let page = self.pages.upsert(&domain_name, &cmd.path).await?;
        if page.is_locked() {
            return Err(CommentError::ThreadLocked);
        }

        if let Some(parent_id) = parent.comment_id() {
            let same_page = self
                .comments
                .find(parent_id)
                .await?
                .is_some_and(|p| p.domain() == &domain_name && p.path() == cmd.path);
            if !same_page {
                return Err(CommentError::NoSuchComment);
            }
        }

        let standing = self.authorizer.standing(&actor, &domain).await?;
        let state = match Screening::screen(domain.policy(), standing.moderates(), actor.is_anonymous()) {
            Screening::Decided(state) => state,
            screening => {
                let context = spam_context(&actor, &domain_name, &cmd.client, &cmd.markdown);
                screening.resolve(self.services.spam.is_spam(&context).await)
            }
        };

        let html = self.services.renderer.render(&cmd.markdown);
        let comment = Comment::new(
            CommentId::new(self.services.tokens.hex_token())?,
            domain_name,
            cmd.path,
            actor.id(),
            parent,
            cmd.markdown,
            html,
            state,
        );
        self.comments.insert(&comment).await?;

        self.notifications
            .dispatch(NotificationJob::CommentCreated(CommentCreated::from_comment(&comment)));

        info!(
            comment_id = %comment.id(),
            domain = %comment.domain(),
            state = %comment.state(),
            "Comment created"
        );
        Ok(CreateCommentResult {
            comment_id: comment.id().clone(),
            html: comment.html().to_string(),
            state: comment.state(),
        })
    }
}

fn spam_context(actor: &Actor, domain: &DomainName, client: &ClientInfo, markdown: &str) -> SpamContext {
    let (name, email, link) = match actor.commenter() {
        Some(c) => (c.name().to_string(), c.email().to_string(), c.link().to_string()),
        None => ("Anonymous".to_string(), String::new(), String::new()),
    };
    SpamContext {
        domain: domain.to_string(),
        ip: client.ip.clone(),
        user_agent: client.user_agent.clone(),
        name,
        email,
        link,
        markdown: markdown.to_string(),
    }
}
