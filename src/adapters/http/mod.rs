//! HTTP adapters - axum surfaces.

pub mod sso;

use axum::{routing::get, Router};

pub use sso::{sso_routes, SsoHandlers, CLOSE_POPUP};

/// Assembles the service router.
pub fn router(sso: SsoHandlers) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/api/oauth/sso", sso_routes(sso))
}

async fn health() -> &'static str {
    "ok"
}
