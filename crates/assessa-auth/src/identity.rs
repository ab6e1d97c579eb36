//! Who the caller is, as far as the backend is concerned.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use assessa_core::models::user::Role;

use crate::error::AuthError;
use crate::jwt::SessionClaims;

/// Role stored in the identity provider's public metadata. Separate from
/// the organizational [`Role`] kept by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionRole {
    Admin,
    User,
}

impl SessionRole {
    pub fn as_str(self) -> &'static str {
        match self {
            SessionRole::Admin => "admin",
            SessionRole::User => "user",
        }
    }
}

impl fmt::Display for SessionRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SessionRole {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(SessionRole::Admin),
            "user" => Ok(SessionRole::User),
            other => Err(AuthError::UnknownRole(other.to_string())),
        }
    }
}

fn non_blank(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}

/// The name the backend knows a person by. Question records store this
/// string, so it must be derived the same way everywhere: first and last
/// name concatenated without a separator, else the first name, else the
/// username.
pub fn display_name(first: Option<&str>, last: Option<&str>, username: Option<&str>) -> Option<String> {
    match (non_blank(first), non_blank(last)) {
        (Some(first), Some(last)) => Some(format!("{first}{last}")),
        (Some(first), None) => Some(first.to_string()),
        _ => non_blank(username).map(str::to_string),
    }
}

/// A validated caller.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub user_id: String,
    pub display_name: String,
    pub role: Option<SessionRole>,
}

impl Session {
    pub fn from_claims(claims: &SessionClaims) -> Result<Self, AuthError> {
        let display_name = display_name(
            claims.first_name.as_deref(),
            claims.last_name.as_deref(),
            claims.username.as_deref(),
        )
        .ok_or_else(|| AuthError::InvalidToken("token carries no usable name".to_string()))?;

        Ok(Self {
            user_id: claims.sub.clone(),
            display_name,
            role: claims.metadata.role.as_deref().and_then(|r| r.parse().ok()),
        })
    }

    pub fn has_role(&self, role: SessionRole) -> bool {
        self.role == Some(role)
    }

    pub fn require(&self, role: SessionRole) -> Result<(), AuthError> {
        if self.has_role(role) {
            Ok(())
        } else {
            Err(AuthError::Forbidden {
                required: role.to_string(),
            })
        }
    }
}

/// The session role a person should hold given their backend record.
/// Returns `None` when the current role is already right.
pub fn reconcile_role(backend_role: Option<Role>, current: Option<SessionRole>) -> Option<SessionRole> {
    let is_admin = current == Some(SessionRole::Admin);
    match (backend_role == Some(Role::Admin), is_admin) {
        (true, false) => Some(SessionRole::Admin),
        (false, true) => Some(SessionRole::User),
        _ => None,
    }
}
