//! Akismet Spam Checker - Implementation of SpamChecker against the Akismet API.
//!
//! # Configuration
//!
//! ```ignore
//! let config = AkismetConfig::new(api_key, "https://comments.example.com")
//!     .with_timeout(Duration::from_secs(5));
//!
//! let checker = AkismetSpamChecker::new(config)?;
//! ```
//!
//! The oracle is advisory: transport errors, non-success statuses and
//! unexpected bodies are logged and the comment is treated as legitimate.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::Serialize;
use tracing::{debug, warn};

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::{SpamChecker, SpamContext};

/// Configuration for the Akismet checker.
#[derive(Debug, Clone)]
pub struct AkismetConfig {
    api_key: Secret<String>,
    /// Public URL of this deployment, sent as the `blog` parameter.
    pub site_url: String,
    /// Base URL for the API (default: https://rest.akismet.com).
    pub base_url: String,
    pub timeout: Duration,
}

impl AkismetConfig {
    pub fn new(api_key: impl Into<String>, site_url: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            site_url: site_url.into(),
            base_url: "https://rest.akismet.com".to_string(),
            timeout: Duration::from_secs(5),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// Form body of the `comment-check` call.
#[derive(Debug, Serialize)]
struct CommentCheck<'a> {
    api_key: &'a str,
    blog: &'a str,
    user_ip: &'a str,
    user_agent: &'a str,
    comment_type: &'static str,
    comment_author: &'a str,
    comment_author_email: &'a str,
    comment_author_url: &'a str,
    comment_content: &'a str,
}

pub struct AkismetSpamChecker {
    config: AkismetConfig,
    client: Client,
}

impl AkismetSpamChecker {
    pub fn new(config: AkismetConfig) -> Result<Self, DomainError> {
        let client = Client::builder().timeout(config.timeout).build().map_err(|e| {
            DomainError::new(
                ErrorCode::InternalError,
                format!("Failed to create HTTP client: {}", e),
            )
        })?;

        Ok(Self { config, client })
    }

    fn check_url(&self) -> String {
        format!("{}/1.1/comment-check", self.config.base_url.trim_end_matches('/'))
    }

    fn to_form<'a>(&'a self, context: &'a SpamContext) -> CommentCheck<'a> {
        CommentCheck {
            api_key: self.config.api_key(),
            blog: &self.config.site_url,
            user_ip: &context.ip,
            user_agent: &context.user_agent,
            comment_type: "comment",
            comment_author: &context.name,
            comment_author_email: &context.email,
            comment_author_url: &context.link,
            comment_content: &context.markdown,
        }
    }

    async fn comment_check(&self, context: &SpamContext) -> Result<bool, reqwest::Error> {
        let body = self
            .client
            .post(self.check_url())
            .form(&self.to_form(context))
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        match body.trim() {
            "true" => Ok(true),
            "false" => Ok(false),
            other => {
                warn!(response = %other, domain = %context.domain, "Unexpected Akismet response");
                Ok(false)
            }
        }
    }
}

#[async_trait]
impl SpamChecker for AkismetSpamChecker {
    async fn is_spam(&self, context: &SpamContext) -> bool {
        match self.comment_check(context).await {
            Ok(verdict) => {
                debug!(domain = %context.domain, spam = verdict, "Akismet verdict");
                verdict
            }
            Err(e) => {
                warn!(error = %e, domain = %context.domain, "Akismet check failed, treating as not spam");
                false
            }
        }
    }
}
