//! Spam filter configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Akismet spam oracle settings
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SpamConfig {
    /// Akismet API key; without one every comment passes the spam check
    pub akismet_key: Option<String>,

    /// Public URL of this deployment, reported to Akismet as the blog
    #[serde(default)]
    pub site_url: String,
}

impl SpamConfig {
    pub fn is_enabled(&self) -> bool {
        self.akismet_key
            .as_deref()
            .is_some_and(|key| !key.trim().is_empty())
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.is_enabled() {
            return Ok(());
        }
        if !self.site_url.starts_with("http://") && !self.site_url.starts_with("https://") {
            return Err(ValidationError::InvalidSiteUrl);
        }
        Ok(())
    }
}
