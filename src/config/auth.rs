//! Authentication configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Owner and commenter authentication settings
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Whether new owners may sign up
    #[serde(default = "default_allow_new_owners")]
    pub allow_new_owners: bool,

    /// Fixed delay applied to every failed login, in milliseconds
    #[serde(default = "default_wrong_auth_delay")]
    pub wrong_auth_delay_ms: u64,

    /// Random bytes per generated token and identifier
    #[serde(default = "default_token_bytes")]
    pub token_bytes: usize,

    /// Lifetime of an outstanding SSO handshake token, in seconds
    #[serde(default = "default_sso_token_ttl")]
    pub sso_token_ttl_secs: u64,
}

impl AuthConfig {
    pub fn wrong_auth_delay(&self) -> Duration {
        Duration::from_millis(self.wrong_auth_delay_ms)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(16..=64).contains(&self.token_bytes) {
            return Err(ValidationError::InvalidTokenLength);
        }
        if self.wrong_auth_delay_ms > 10_000 {
            return Err(ValidationError::InvalidAuthDelay);
        }
        if self.sso_token_ttl_secs == 0 {
            return Err(ValidationError::InvalidSsoTokenTtl);
        }
        Ok(())
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            allow_new_owners: default_allow_new_owners(),
            wrong_auth_delay_ms: default_wrong_auth_delay(),
            token_bytes: default_token_bytes(),
            sso_token_ttl_secs: default_sso_token_ttl(),
        }
    }
}

fn default_allow_new_owners() -> bool {
    true
}

fn default_wrong_auth_delay() -> u64 {
    100
}

fn default_token_bytes() -> usize {
    32
}

fn default_sso_token_ttl() -> u64 {
    600
}
