//! SSO HTTP surface.
//!
//! The callback answers a browser popup, so both legs respond with inline
//! HTML or plain text instead of the JSON error envelope.

mod dto;
mod handlers;
mod routes;

pub use dto::{SsoCallbackForm, SsoRedirectQuery};
pub use handlers::{sso_callback_form, sso_callback_query, sso_redirect, SsoHandlers, CLOSE_POPUP};
pub use routes::sso_routes;
