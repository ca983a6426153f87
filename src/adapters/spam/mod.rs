//! Spam oracle adapters.

mod akismet;
mod noop;

use std::sync::Arc;

pub use akismet::{AkismetConfig, AkismetSpamChecker};
pub use noop::NoSpamChecker;

use crate::config::SpamConfig;
use crate::domain::foundation::DomainError;
use crate::ports::SpamChecker;

/// Selects the spam oracle for a deployment.
///
/// Without an Akismet key every comment passes the check.
pub fn spam_checker(config: &SpamConfig) -> Result<Arc<dyn SpamChecker>, DomainError> {
    match config.akismet_key.as_deref() {
        Some(key) if config.is_enabled() => {
            let akismet = AkismetConfig::new(key, config.site_url.clone());
            Ok(Arc::new(AkismetSpamChecker::new(akismet)?))
        }
        _ => Ok(Arc::new(NoSpamChecker)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::SpamContext;

    #[tokio::test]
    async fn missing_key_selects_the_permissive_checker() {
        let checker = spam_checker(&SpamConfig::default()).unwrap();

        assert!(!checker.is_spam(&SpamContext::default()).await);
    }

    #[test]
    fn configured_key_builds_akismet() {
        let config = SpamConfig {
            akismet_key: Some("abc123".to_string()),
            site_url: "https://comments.example.com".to_string(),
        };

        assert!(spam_checker(&config).is_ok());
    }
}
