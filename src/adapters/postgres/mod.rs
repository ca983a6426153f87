//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresOwnerRepository` - Owners, owner sessions, confirmation and reset tokens
//! - `PostgresCommenterRepository` - Commenters and commenter sessions
//! - `PostgresSiteRepository` - Domains, moderators and pages
//! - `PostgresCommentRepository` - Comments and the vote ledger
//! - `PostgresSsoTokenStore` - Outstanding SSO handshakes
//!
//! The schema lives in `migrations/` and is applied with `sqlx::migrate!`.

mod comment_repository;
mod commenter_repository;
mod owner_repository;
mod site_repository;
mod sso_token_store;
mod store;

pub use comment_repository::PostgresCommentRepository;
pub use commenter_repository::PostgresCommenterRepository;
pub use owner_repository::PostgresOwnerRepository;
pub use site_repository::PostgresSiteRepository;
pub use sso_token_store::PostgresSsoTokenStore;
