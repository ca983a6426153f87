//! HTTP handlers for the SSO endpoints.

use std::sync::Arc;

use axum::{
    extract::{Form, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use tracing::debug;

use crate::application::handlers::commenter::{
    CompleteSsoCommand, CompleteSsoHandler, StartSsoCommand, StartSsoHandler,
};
use crate::domain::auth::AuthError;

use super::dto::{SsoCallbackForm, SsoRedirectQuery};

/// Snippet closing the login popup once the session is bound.
pub const CLOSE_POPUP: &str = "<html><script>window.parent.close()</script></html>";

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct SsoHandlers {
    start_handler: Arc<StartSsoHandler>,
    complete_handler: Arc<CompleteSsoHandler>,
}

impl SsoHandlers {
    pub fn new(
        start_handler: Arc<StartSsoHandler>,
        complete_handler: Arc<CompleteSsoHandler>,
    ) -> Self {
        Self {
            start_handler,
            complete_handler,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// GET /api/oauth/sso/redirect - Send the visitor to the domain's provider
pub async fn sso_redirect(
    State(handlers): State<SsoHandlers>,
    Query(query): Query<SsoRedirectQuery>,
) -> Response {
    let cmd = StartSsoCommand {
        domain: query.domain,
        commenter_token: query.commenter_token,
    };

    match handlers.start_handler.handle(cmd).await {
        Ok(result) => Redirect::temporary(&result.redirect_url).into_response(),
        Err(e) => inline_error(e),
    }
}

/// GET /api/oauth/sso/callback - Provider callback with query parameters
pub async fn sso_callback_query(
    State(handlers): State<SsoHandlers>,
    Query(form): Query<SsoCallbackForm>,
) -> Response {
    complete(&handlers, form).await
}

/// POST /api/oauth/sso/callback - Provider callback with a form body
pub async fn sso_callback_form(
    State(handlers): State<SsoHandlers>,
    Form(form): Form<SsoCallbackForm>,
) -> Response {
    complete(&handlers, form).await
}

async fn complete(handlers: &SsoHandlers, form: SsoCallbackForm) -> Response {
    let cmd = CompleteSsoCommand {
        payload: form.payload,
        hmac: form.hmac,
    };

    match handlers.complete_handler.handle(cmd).await {
        Ok(result) => {
            debug!(commenter_id = %result.commenter_id, created = result.created, "SSO callback accepted");
            Html(CLOSE_POPUP).into_response()
        }
        Err(e) => inline_error(e),
    }
}

/// Renders a failure the way the popup expects it.
fn inline_error(error: AuthError) -> Response {
    Html(format!("Error: {}\n", error)).into_response()
}
