//! Adapters - Concrete implementations of the ports.
//!
//! - `memory` - In-memory store for every repository port
//! - `postgres` - PostgreSQL store (`sqlx`)
//! - `markdown` - pulldown-cmark renderer
//! - `security` - Argon2 password digests, OS-random hex tokens
//! - `spam` - Akismet oracle and the no-op fallback
//! - `notify` - Log-backed notifier
//! - `http` - axum SSO surface

pub mod http;
pub mod markdown;
pub mod memory;
pub mod notify;
pub mod postgres;
pub mod security;
pub mod spam;
