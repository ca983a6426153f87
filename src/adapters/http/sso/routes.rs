//! HTTP routes for the SSO endpoints.

use axum::{routing::get, Router};

use super::handlers::{sso_callback_form, sso_callback_query, sso_redirect, SsoHandlers};

/// Creates the SSO router, to be nested under `/api/oauth/sso`.
pub fn sso_routes(handlers: SsoHandlers) -> Router {
    Router::new()
        .route("/redirect", get(sso_redirect))
        .route("/callback", get(sso_callback_query).post(sso_callback_form))
        .with_state(handlers)
}
