//! Identity and role resolution shared by the comment and vote handlers.
//!
//! A request carries a commenter token. The token resolves to an [`Actor`];
//! the actor's [`Standing`] on the comment's domain is then computed once and
//! turned into a per-comment role where needed.

use std::sync::Arc;

use crate::domain::auth::{Actor, Standing};
use crate::domain::comment::{Comment, CommentError};
use crate::domain::foundation::{CommenterToken, DomainError, DomainName, ANONYMOUS_COMMENTER_ID};
use crate::domain::site::Domain;
use crate::ports::{CommenterRepository, DomainRepository, OwnerRepository};

pub struct Authorizer {
    commenters: Arc<dyn CommenterRepository>,
    owners: Arc<dyn OwnerRepository>,
    domains: Arc<dyn DomainRepository>,
}

impl Authorizer {
    pub fn new(
        commenters: Arc<dyn CommenterRepository>,
        owners: Arc<dyn OwnerRepository>,
        domains: Arc<dyn DomainRepository>,
    ) -> Self {
        Self {
            commenters,
            owners,
            domains,
        }
    }

    /// Resolves a commenter token.
    ///
    /// The anonymous sentinel resolves to [`Actor::Anonymous`]. Unknown and
    /// pending tokens resolve to `None`.
    pub async fn actor(&self, token: &str) -> Result<Option<Actor>, DomainError> {
        if token == ANONYMOUS_COMMENTER_ID {
            return Ok(Some(Actor::Anonymous));
        }
        let Ok(token) = CommenterToken::new(token) else {
            return Ok(None);
        };
        let session = self.commenters.find_session(&token).await?;
        Ok(session.into_commenter().map(Actor::Commenter))
    }

    /// Resolves a token that must belong to a signed-in commenter.
    pub async fn commenter(&self, token: &str) -> Result<Actor, CommentError> {
        match self.actor(token).await? {
            Some(Actor::Anonymous) => Err(CommentError::NotAuthorised),
            Some(actor) => Ok(actor),
            None => Err(CommentError::NoSuchToken),
        }
    }

    /// The actor's domain-wide standing.
    pub async fn standing(&self, actor: &Actor, domain: &Domain) -> Result<Standing, DomainError> {
        let owner_companion = match actor.commenter() {
            Some(c) if c.provider().uses_password() => self
                .owners
                .find_by_id(domain.owner_id())
                .await?
                .and_then(|owner| owner.companion_id().cloned()),
            _ => None,
        };
        Ok(actor.standing(domain, owner_companion.as_ref()))
    }

    /// Loads the domain and requires the actor to moderate it.
    pub async fn require_moderator(
        &self,
        actor: &Actor,
        domain: &DomainName,
    ) -> Result<Domain, CommentError> {
        let domain = self
            .domains
            .find(domain)
            .await?
            .ok_or(CommentError::NoSuchDomain)?;
        if self.standing(actor, &domain).await?.moderates() {
            Ok(domain)
        } else {
            Err(CommentError::NotModerator)
        }
    }

    /// Authorizes an edit or delete of `comment`.
    ///
    /// Authorship short-circuits; otherwise the actor must moderate the
    /// comment's domain.
    pub async fn authorize_mutation(
        &self,
        actor: &Actor,
        comment: &Comment,
    ) -> Result<(), CommentError> {
        if actor.is_anonymous() {
            return Err(CommentError::NotAuthorised);
        }
        if actor.is_author_of(comment.author_id()) {
            return Ok(());
        }
        self.require_moderator(actor, comment.domain()).await?;
        Ok(())
    }
}
