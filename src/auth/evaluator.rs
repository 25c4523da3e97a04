use subtle::ConstantTimeEq;
use uuid::Uuid;

use crate::config::SecurityConfig;

use super::Identity;

/// Header carrying the static shared secret
pub const API_KEY_HEADER: &str = "x-api-key";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    /// May delete
    Admin,
    /// May create and update
    TrustedMember,
    /// Any caller attributable to a user
    Authenticated,
}

impl Policy {
    fn satisfied_by(&self, identity: &Identity) -> bool {
        match self {
            Policy::Admin => identity.admin,
            Policy::TrustedMember => identity.admin || identity.trusted_member,
            Policy::Authenticated => identity.authenticated && identity.user_id.is_some(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    /// No usable identity and no API key
    Unauthenticated,
    /// Authenticated, but without the required claim
    MissingClaim,
    /// API key present but wrong
    InvalidApiKey,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthDecision {
    /// `attributed_user_id` is set when the caller was admitted by API key
    Allow { attributed_user_id: Option<Uuid> },
    Deny(DenyReason),
}

/// Decide one privileged request. Claims win first; the API key is the
/// fallback and attributes the caller to the configured key user.
pub fn evaluate(
    policy: Policy,
    identity: &Identity,
    api_key: Option<&[u8]>,
    security: &SecurityConfig,
) -> AuthDecision {
    if policy.satisfied_by(identity) {
        return AuthDecision::Allow { attributed_user_id: None };
    }

    let Some(presented) = api_key else {
        return AuthDecision::Deny(if identity.authenticated {
            DenyReason::MissingClaim
        } else {
            DenyReason::Unauthenticated
        });
    };

    // An unset server key never matches
    if security.api_key.is_empty() || !bool::from(presented.ct_eq(security.api_key.as_bytes())) {
        return AuthDecision::Deny(DenyReason::InvalidApiKey);
    }

    AuthDecision::Allow {
        attributed_user_id: Some(security.api_key_user_id),
    }
}
