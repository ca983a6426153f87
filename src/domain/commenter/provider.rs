//! Identity provider tags.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::domain::foundation::{DomainName, ValidationError};

const LOCAL_TAG: &str = "commentary";
const ANONYMOUS_TAG: &str = "undefined";
const SSO_PREFIX: &str = "sso:";

/// The authority that vouched for a commenter identity.
///
/// Persisted as a tag string: `commentary` for local accounts,
/// `sso:<domain>` for identities bound to one domain's SSO provider,
/// and the provider name for federated logins.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IdentityProvider {
    Anonymous,
    Local,
    Sso(DomainName),
    Federated(String),
}

impl IdentityProvider {
    /// Returns the persisted tag.
    pub fn tag(&self) -> String {
        match self {
            IdentityProvider::Anonymous => ANONYMOUS_TAG.to_string(),
            IdentityProvider::Local => LOCAL_TAG.to_string(),
            IdentityProvider::Sso(domain) => format!("{}{}", SSO_PREFIX, domain),
            IdentityProvider::Federated(name) => name.clone(),
        }
    }

    /// Parses a persisted tag.
    pub fn from_tag(tag: &str) -> Result<Self, ValidationError> {
        match tag {
            "" => Err(ValidationError::empty_field("provider")),
            ANONYMOUS_TAG => Ok(IdentityProvider::Anonymous),
            LOCAL_TAG => Ok(IdentityProvider::Local),
            _ => match tag.strip_prefix(SSO_PREFIX) {
                Some(domain) => Ok(IdentityProvider::Sso(DomainName::new(domain)?)),
                None => Ok(IdentityProvider::Federated(tag.to_string())),
            },
        }
    }

    /// Whether this provider's word on an email address holds on `domain`.
    ///
    /// A domain's SSO secret only vouches for identities on that domain.
    pub fn vouches_for(&self, domain: &DomainName) -> bool {
        match self {
            IdentityProvider::Anonymous => false,
            IdentityProvider::Local | IdentityProvider::Federated(_) => true,
            IdentityProvider::Sso(own) => own == domain,
        }
    }

    /// Returns true for identities that log in with a password.
    pub fn uses_password(&self) -> bool {
        matches!(self, IdentityProvider::Local)
    }
}

impl fmt::Display for IdentityProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

impl Serialize for IdentityProvider {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.tag())
    }
}

impl<'de> Deserialize<'de> for IdentityProvider {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        IdentityProvider::from_tag(&tag).map_err(serde::de::Error::custom)
    }
}
