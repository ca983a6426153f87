//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Storage Ports
//!
//! - `OwnerRepository` - Owners, owner sessions, confirmation and reset tokens
//! - `CommenterRepository` - Commenters and commenter sessions
//! - `DomainRepository` / `PageRepository` - Sites and their pages
//! - `CommentRepository` - Comments, soft deletion and page listings
//! - `VoteRepository` - Per-(comment, voter) vote ledger
//! - `SsoTokenStore` - Outstanding SSO handshake tokens
//!
//! ## Collaborator Ports
//!
//! - `MarkdownRenderer`, `SpamChecker`, `PasswordHasher`, `TokenGenerator`
//! - `Notifier` - Outbound notifications, always fire-and-forget

mod collaborators;
mod comment_repository;
mod commenter_repository;
mod domain_repository;
mod notifier;
mod owner_repository;
mod page_repository;
mod sso_token_store;
mod vote_repository;

pub use collaborators::{MarkdownRenderer, PasswordHasher, SpamChecker, SpamContext, TokenGenerator};
pub use comment_repository::{CommentFilter, CommentRepository};
pub use commenter_repository::CommenterRepository;
pub use domain_repository::DomainRepository;
pub use notifier::{Notification, Notifier, Recipient};
pub use owner_repository::OwnerRepository;
pub use page_repository::PageRepository;
pub use sso_token_store::{SsoGrant, SsoTokenStore};
pub use vote_repository::VoteRepository;
