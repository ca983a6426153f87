//! Domain entity and its moderation policy.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainName, OwnerId, Timestamp};

/// Whether a domain accepts new comments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DomainState {
    #[default]
    Active,
    Frozen,
}

impl DomainState {
    pub fn as_str(&self) -> &'static str {
        match self {
            DomainState::Active => "active",
            DomainState::Frozen => "frozen",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "active" => Some(DomainState::Active),
            "frozen" => Some(DomainState::Frozen),
            _ => None,
        }
    }
}

/// Default ordering of a domain's comment threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortPolicy {
    #[default]
    ScoreDesc,
    CreationDateDesc,
    CreationDateAsc,
}

impl SortPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortPolicy::ScoreDesc => "score-desc",
            SortPolicy::CreationDateDesc => "creation-date-desc",
            SortPolicy::CreationDateAsc => "creation-date-asc",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "score-desc" => Some(SortPolicy::ScoreDesc),
            "creation-date-desc" => Some(SortPolicy::CreationDateDesc),
            "creation-date-asc" => Some(SortPolicy::CreationDateAsc),
            _ => None,
        }
    }
}

/// Moderation switches of a domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModerationPolicy {
    /// Anonymous visitors may not comment.
    pub require_identification: bool,
    /// Every non-moderator comment waits for approval.
    pub require_moderation: bool,
    /// Anonymous comments wait for approval.
    pub moderate_all_anonymous: bool,
    /// Consult the spam oracle for comments that would otherwise be approved.
    pub auto_spam_filter: bool,
}

impl Default for ModerationPolicy {
    fn default() -> Self {
        Self {
            require_identification: false,
            require_moderation: false,
            moderate_all_anonymous: true,
            auto_spam_filter: true,
        }
    }
}

/// Identity providers a domain offers to its commenters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityProviders {
    pub local: bool,
    pub sso: bool,
    pub federated: BTreeSet<String>,
}

impl Default for IdentityProviders {
    fn default() -> Self {
        Self {
            local: true,
            sso: false,
            federated: BTreeSet::new(),
        }
    }
}

/// Hex-encoded shared secret of a domain's SSO provider.
#[derive(Clone, PartialEq, Eq)]
pub struct SsoSecret(String);

impl SsoSecret {
    pub fn new(hex_secret: impl Into<String>) -> Self {
        Self(hex_secret.into())
    }

    /// Returns the hex-encoded secret.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SsoSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SsoSecret([REDACTED])")
    }
}

/// Complete SSO configuration of a domain.
#[derive(Debug, Clone, Copy)]
pub struct SsoSettings<'a> {
    pub secret: &'a SsoSecret,
    pub url: &'a str,
}

/// A registered site under moderation.
///
/// # Invariants
///
/// - SSO is usable only when both secret and URL are configured
/// - `owner_id` never changes after registration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Domain {
    name: DomainName,
    owner_id: OwnerId,
    moderators: Vec<String>,
    state: DomainState,
    policy: ModerationPolicy,
    default_sort: SortPolicy,
    sso_secret: Option<SsoSecret>,
    sso_url: Option<String>,
    identity_providers: IdentityProviders,
    created_at: Timestamp,
}

impl Domain {
    /// Creates an active domain with the default policy.
    pub fn new(name: DomainName, owner_id: OwnerId) -> Self {
        Self {
            name,
            owner_id,
            moderators: Vec::new(),
            state: DomainState::Active,
            policy: ModerationPolicy::default(),
            default_sort: SortPolicy::default(),
            sso_secret: None,
            sso_url: None,
            identity_providers: IdentityProviders::default(),
            created_at: Timestamp::now(),
        }
    }

    /// Reconstitute a domain from persistence.
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        name: DomainName,
        owner_id: OwnerId,
        moderators: Vec<String>,
        state: DomainState,
        policy: ModerationPolicy,
        default_sort: SortPolicy,
        sso_secret: Option<SsoSecret>,
        sso_url: Option<String>,
        identity_providers: IdentityProviders,
        created_at: Timestamp,
    ) -> Self {
        Self {
            name,
            owner_id,
            moderators,
            state,
            policy,
            default_sort,
            sso_secret,
            sso_url,
            identity_providers,
            created_at,
        }
    }

    pub fn with_moderators<I, S>(mut self, emails: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.moderators = emails.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_policy(mut self, policy: ModerationPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_default_sort(mut self, sort: SortPolicy) -> Self {
        self.default_sort = sort;
        self
    }

    pub fn with_identity_providers(mut self, providers: IdentityProviders) -> Self {
        self.identity_providers = providers;
        self
    }

    /// Configures the domain's SSO provider.
    pub fn with_sso(mut self, hex_secret: impl Into<String>, url: impl Into<String>) -> Self {
        self.sso_secret = Some(SsoSecret::new(hex_secret));
        self.sso_url = Some(url.into());
        self.identity_providers.sso = true;
        self
    }

    pub fn frozen(mut self) -> Self {
        self.state = DomainState::Frozen;
        self
    }

    pub fn name(&self) -> &DomainName {
        &self.name
    }

    pub fn owner_id(&self) -> &OwnerId {
        &self.owner_id
    }

    pub fn moderators(&self) -> &[String] {
        &self.moderators
    }

    pub fn state(&self) -> DomainState {
        self.state
    }

    pub fn is_frozen(&self) -> bool {
        self.state == DomainState::Frozen
    }

    pub fn policy(&self) -> &ModerationPolicy {
        &self.policy
    }

    pub fn default_sort(&self) -> SortPolicy {
        self.default_sort
    }

    pub fn identity_providers(&self) -> &IdentityProviders {
        &self.identity_providers
    }

    pub fn sso_secret(&self) -> Option<&SsoSecret> {
        self.sso_secret.as_ref()
    }

    pub fn sso_url(&self) -> Option<&str> {
        self.sso_url.as_deref()
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    /// Returns the SSO configuration when both secret and URL are present.
    pub fn sso_settings(&self) -> Option<SsoSettings<'_>> {
        let secret = self.sso_secret.as_ref().filter(|s| !s.expose().is_empty())?;
        let url = self.sso_url.as_deref().filter(|u| !u.is_empty())?;
        Some(SsoSettings { secret, url })
    }

    /// True iff the email appears in the moderator list (ASCII case-insensitive).
    pub fn is_moderator(&self, email: &str) -> bool {
        !email.is_empty()
            && self
                .moderators
                .iter()
                .any(|m| m.eq_ignore_ascii_case(email))
    }

    /// Exact match against the registered owner.
    pub fn is_owned_by(&self, owner_id: &OwnerId) -> bool {
        &self.owner_id == owner_id
    }
}
