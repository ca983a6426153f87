//! Startup configuration failures. Any of these aborts the process.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read COMMENTARY__* settings: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("rejected settings: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// A setting that parsed but makes no sense for a running server.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{0} must be set")]
    MissingRequired(&'static str),

    #[error("listen port must be non-zero")]
    InvalidPort,

    #[error("host and port do not form a socket address")]
    InvalidBindAddress,

    #[error("timeouts must be between 1 and 300 seconds")]
    InvalidTimeout,

    #[error("CORS origins must be * or http(s) URLs")]
    InvalidCorsOrigin,

    #[error("database URL must use the postgres:// scheme")]
    InvalidDatabaseUrl,

    #[error("database pool minimum is above its maximum")]
    InvalidPoolSize,

    #[error("database pool is capped at 100 connections")]
    PoolSizeTooLarge,

    #[error("Token length must be between 16 and 64 bytes")]
    InvalidTokenLength,

    #[error("Failed-login delay must not exceed 10 seconds")]
    InvalidAuthDelay,

    #[error("SSO token lifetime must be positive")]
    InvalidSsoTokenTtl,

    #[error("sender address is not an email address")]
    InvalidFromEmail,

    #[error("Spam filter site URL must be http(s)")]
    InvalidSiteUrl,
}
