//! Commenter domain module.
//!
//! Commenters author comments. An identity is scoped to the provider that
//! vouched for it: the same email under two providers is two commenters.
//! The anonymous sentinel stands in for unauthenticated visitors.

mod commenter;
mod provider;
mod session;

pub use commenter::{Commenter, CommenterProfile, ProfileUpdate, UNDEFINED};
pub use provider::IdentityProvider;
pub use session::SessionLookup;
