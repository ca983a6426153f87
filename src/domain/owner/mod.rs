//! Owner domain module.
//!
//! Owners administer one or more domains. They authenticate with an email and
//! password and must confirm their email when a verification channel exists.

mod owner;

pub use owner::Owner;
