//! Site domain module.
//!
//! A `Domain` is a registered site under moderation policy; comments attach
//! to its `Page`s, which are created lazily on first comment.

mod domain;
mod page;

pub use domain::{
    Domain, DomainState, IdentityProviders, ModerationPolicy, SortPolicy, SsoSecret, SsoSettings,
};
pub use page::Page;
