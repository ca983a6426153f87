//! Commentary - Embeddable comment hosting backend
//!
//! Sites embed a comment thread per page. This crate owns the threads:
//! owner and commenter authentication (including a per-domain SSO handshake),
//! role resolution, the moderated comment lifecycle, the vote ledger and
//! per-requester redaction of listings.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
