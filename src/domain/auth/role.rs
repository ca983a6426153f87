//! Actors and their roles on a domain.

use crate::domain::commenter::Commenter;
use crate::domain::foundation::CommenterId;
use crate::domain::site::Domain;

/// The resolved caller of a commenter-facing operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Actor {
    Anonymous,
    Commenter(Commenter),
}

impl Actor {
    /// Identifier the actor writes comments under.
    pub fn id(&self) -> CommenterId {
        match self {
            Actor::Anonymous => CommenterId::anonymous(),
            Actor::Commenter(c) => c.id().clone(),
        }
    }

    pub fn commenter(&self) -> Option<&Commenter> {
        match self {
            Actor::Anonymous => None,
            Actor::Commenter(c) => Some(c),
        }
    }

    pub fn is_anonymous(&self) -> bool {
        matches!(self, Actor::Anonymous)
    }

    /// True when the actor wrote a comment with the given author.
    pub fn is_author_of(&self, author_id: &CommenterId) -> bool {
        match self {
            Actor::Anonymous => false,
            Actor::Commenter(c) => !author_id.is_anonymous() && c.id() == author_id,
        }
    }

    /// Computes the actor's domain-wide standing.
    ///
    /// `owner_companion` is the commenter id recorded on the domain owner's
    /// account. Moderator emails only count when the identity's provider
    /// vouches for this domain.
    pub fn standing(&self, domain: &Domain, owner_companion: Option<&CommenterId>) -> Standing {
        let Actor::Commenter(c) = self else {
            return Standing::Visitor;
        };
        if owner_companion == Some(c.id()) {
            Standing::Owner
        } else if c.provider().vouches_for(domain.name()) && domain.is_moderator(c.email()) {
            Standing::Moderator
        } else {
            Standing::Visitor
        }
    }
}

/// Domain-wide standing, resolved once per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Standing {
    Owner,
    Moderator,
    Visitor,
}

impl Standing {
    pub fn moderates(&self) -> bool {
        matches!(self, Standing::Owner | Standing::Moderator)
    }
}

/// Role of an actor with respect to one comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Owner,
    Moderator,
    Author,
    Other,
}

impl Role {
    pub fn resolve(standing: Standing, actor: &Actor, author_id: &CommenterId) -> Self {
        match standing {
            Standing::Owner => Role::Owner,
            Standing::Moderator => Role::Moderator,
            Standing::Visitor if actor.is_author_of(author_id) => Role::Author,
            Standing::Visitor => Role::Other,
        }
    }

    pub fn moderates(&self) -> bool {
        matches!(self, Role::Owner | Role::Moderator)
    }

    /// Raw markdown is withheld from everyone but moderators and the author.
    pub fn sees_markdown(&self) -> bool {
        !matches!(self, Role::Other)
    }

    /// Moderation state is exposed to moderators only.
    pub fn sees_state(&self) -> bool {
        self.moderates()
    }
}
