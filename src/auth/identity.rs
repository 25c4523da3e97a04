use uuid::Uuid;

use super::Claims;

/// Caller identity for the remainder of request handling.
///
/// Built once by the authentication middleware; authorization replaces it
/// with an attributed copy instead of mutating it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Identity {
    pub user_id: Option<Uuid>,
    pub admin: bool,
    pub trusted_member: bool,
    pub authenticated: bool,
}

impl Identity {
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Copy of this identity attributed to `user_id`
    pub fn attributed_to(&self, user_id: Uuid) -> Self {
        Self {
            user_id: Some(user_id),
            authenticated: true,
            ..self.clone()
        }
    }
}

impl From<Claims> for Identity {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.userid,
            admin: claims.admin,
            trusted_member: claims.trusted_member,
            authenticated: true,
        }
    }
}
