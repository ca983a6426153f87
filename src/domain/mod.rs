//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (identifiers, timestamps, errors)
//! - `owner` - Domain administrators
//! - `commenter` - Comment authors, identity providers and session lookups
//! - `site` - Registered domains, their moderation policy, and pages
//! - `comment` - Comment lifecycle, initial-state screening and visibility
//! - `vote` - Per-(comment, voter) vote ledger types
//! - `auth` - Authentication errors, role resolution and SSO signatures

pub mod auth;
pub mod comment;
pub mod commenter;
pub mod foundation;
pub mod owner;
pub mod site;
pub mod vote;
