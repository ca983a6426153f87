//! In-memory persistence.
//!
//! `InMemoryStore` implements every repository port behind a single lock, so
//! multi-row operations (comment insert plus page count, vote upsert plus
//! score) are atomic. Used by tests and single-process development setups.

mod comments;
mod commenters;
mod owners;
mod sites;
mod sso_tokens;
mod store;

pub use store::InMemoryStore;
