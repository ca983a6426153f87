//! Request DTOs of the SSO endpoints.

use serde::Deserialize;

/// Query of `GET /api/oauth/sso/redirect`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SsoRedirectQuery {
    #[serde(default)]
    pub domain: String,
    #[serde(default)]
    pub commenter_token: String,
}

/// Form (POST) or query (GET) of the SSO callback.
///
/// Absent fields deserialize empty so the handler reports which one is missing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SsoCallbackForm {
    /// Hex-encoded JSON payload.
    #[serde(default)]
    pub payload: String,
    /// Hex-encoded HMAC-SHA256 of the decoded payload.
    #[serde(default)]
    pub hmac: String,
}
