//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Handlers resolve identity through the shared [`Authorizer`] and hand
//! outbound notifications to the [`NotificationDispatcher`] without waiting.

pub mod authorization;
pub mod handlers;
pub mod notification;
pub mod settings;

#[cfg(test)]
pub(crate) mod test_support;

pub use authorization::Authorizer;
pub use notification::{NotificationDispatcher, NotificationJob, NotificationWorker};
pub use settings::AuthSettings;
