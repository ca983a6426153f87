//! Startup-time settings consumed by the handlers.

use std::time::Duration;

use crate::config::AppConfig;

/// Authentication settings, fixed for the life of the process.
#[derive(Debug, Clone)]
pub struct AuthSettings {
    /// New owners may register.
    pub allow_new_owners: bool,
    /// A verification channel exists, so new owners start unconfirmed.
    pub email_verification: bool,
    /// Fixed delay applied to every failed login.
    pub wrong_auth_delay: Duration,
    /// Lifetime of an outstanding SSO token.
    pub sso_token_ttl_secs: u64,
}

impl AuthSettings {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            allow_new_owners: config.auth.allow_new_owners,
            email_verification: config.email.can_verify(),
            wrong_auth_delay: config.auth.wrong_auth_delay(),
            sso_token_ttl_secs: config.auth.sso_token_ttl_secs,
        }
    }
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            allow_new_owners: true,
            email_verification: false,
            wrong_auth_delay: Duration::from_millis(100),
            sso_token_ttl_secs: 600,
        }
    }
}
