//! Email configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Outbound email settings
///
/// A configured SMTP host is what makes email verification of new owners
/// possible; without one, owners are confirmed on registration.
#[derive(Debug, Clone, Deserialize)]
pub struct EmailConfig {
    /// SMTP relay host
    pub smtp_host: Option<String>,

    /// From email address
    #[serde(default = "default_from_email")]
    pub from_email: String,

    /// From name
    #[serde(default = "default_from_name")]
    pub from_name: String,
}

impl EmailConfig {
    /// True when a verification channel exists
    pub fn can_verify(&self) -> bool {
        self.smtp_host
            .as_deref()
            .is_some_and(|host| !host.trim().is_empty())
    }

    /// Formatted "From" header value
    pub fn from_header(&self) -> String {
        format!("{} <{}>", self.from_name, self.from_email)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.can_verify() && !self.from_email.contains('@') {
            return Err(ValidationError::InvalidFromEmail);
        }
        Ok(())
    }
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            smtp_host: None,
            from_email: default_from_email(),
            from_name: default_from_name(),
        }
    }
}

fn default_from_email() -> String {
    "noreply@localhost".to_string()
}

fn default_from_name() -> String {
    "Commentary".to_string()
}
